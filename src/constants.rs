/// Page-side constants for the hero front-end.
///
/// Everything here is plain data so it can be checked on the host without a
/// browser.
// Default element ids
pub const SCANNER_CANVAS_ID: &str = "scannerCanvas";
pub const CARD_STREAM_ID: &str = "cardStream";
pub const CARD_LINE_ID: &str = "cardLine";
pub const AMBIENT_CANVAS_ID: &str = "particleCanvas";

// Hero section box the ambient layer fills; its height when absent
pub const HERO_WRAPPER_SELECTOR: &str = ".hero-cards-wrapper";
pub const HERO_FALLBACK_HEIGHT: f32 = 300.0;

// Particle sprite cache (square, px)
pub const SPRITE_SIZE: u32 = 16;
pub const SPRITE_STOPS: [(f32, &str); 4] = [
    (0.0, "rgba(255, 255, 255, 1)"),
    (0.3, "rgba(196, 181, 253, 0.8)"),
    (0.7, "rgba(139, 92, 246, 0.4)"),
    (1.0, "transparent"),
];

// Card markup
pub const CARD_WRAPPER_CLASS: &str = "card-wrapper";
pub const CARD_NORMAL_CLASS: &str = "card card-normal";
pub const CARD_ASCII_CLASS: &str = "card card-ascii";
pub const CARD_IMAGE_CLASS: &str = "card-image";
pub const CARD_NORMAL_SELECTOR: &str = ".card-normal";
pub const CARD_ASCII_SELECTOR: &str = ".card-ascii";
pub const ASCII_CONTENT_CLASS: &str = "ascii-content";
pub const SCAN_EFFECT_CLASS: &str = "scan-effect";
pub const DRAGGING_CLASS: &str = "dragging";
pub const SCANNED_ATTR: &str = "data-scanned";
pub const CLIP_RIGHT_VAR: &str = "--clip-right";
pub const CLIP_LEFT_VAR: &str = "--clip-left";
pub const CARD_FALLBACK_BACKGROUND: &str = "linear-gradient(45deg, #161b22, #0d1117)";

// Timers (ms)
pub const SCAN_EFFECT_MS: i32 = 600;
pub const CODE_REFRESH_MS: i32 = 200;

/// Placeholder artwork for card `index` (zero-based).
pub fn card_image_url(index: u32) -> String {
    format!(
        "https://placehold.co/400x250/161b22/b4ff39?text=Automation+{}",
        index + 1
    )
}

/// CSS percentage value for a clip custom property.
pub fn clip_value(percent: f32) -> String {
    format!("{percent}%")
}

/// CSS transform for the card line at `position` px.
pub fn translate_x(position: f32) -> String {
    format!("translateX({position}px)")
}
