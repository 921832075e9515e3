// Host-side tests for the web front-end's constants and formatting helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use hero_core::{CardStreamConfig, Params};

#[test]
fn sprite_gradient_stops_are_ordered_and_end_transparent() {
    let mut prev = -1.0;
    for (offset, _) in SPRITE_STOPS {
        assert!(offset > prev, "stop {offset} out of order");
        assert!((0.0..=1.0).contains(&offset));
        prev = offset;
    }
    assert_eq!(SPRITE_STOPS[0].0, 0.0);
    assert_eq!(SPRITE_STOPS[SPRITE_STOPS.len() - 1], (1.0, "transparent"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn sprite_is_big_enough_for_the_largest_particle() {
    // Largest radius while scanning: 1.0 * (1 + (1.8 / 0.8 - 1) * 0.7)
    let ratio = Params::SCAN_INTENSITY / Params::BASE_INTENSITY;
    let max_diameter = 2.0 * (1.0 + (ratio - 1.0) * 0.7);
    assert!(SPRITE_SIZE as f32 >= max_diameter);
    assert!(SPRITE_SIZE % 2 == 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timers_are_positive_and_flash_outlasts_refresh() {
    assert!(CODE_REFRESH_MS > 0);
    assert!(SCAN_EFFECT_MS > CODE_REFRESH_MS);
}

#[test]
fn card_urls_are_one_based() {
    assert!(card_image_url(0).ends_with("Automation+1"));
    let count = CardStreamConfig::default().card_count;
    assert!(card_image_url(count - 1).ends_with(&format!("+{count}")));
}

#[test]
fn css_helpers_format_plain_numbers() {
    assert_eq!(clip_value(0.0), "0%");
    assert_eq!(clip_value(37.5), "37.5%");
    assert_eq!(translate_x(-120.25), "translateX(-120.25px)");
    assert_eq!(translate_x(40.0), "translateX(40px)");
}

#[test]
fn card_classes_share_the_card_base_class() {
    assert!(CARD_NORMAL_CLASS.split(' ').any(|c| c == "card"));
    assert!(CARD_ASCII_CLASS.split(' ').any(|c| c == "card"));
    assert!(CLIP_RIGHT_VAR.starts_with("--") && CLIP_LEFT_VAR.starts_with("--"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn default_element_ids_match_the_hero_markup() {
    assert_eq!(SCANNER_CANVAS_ID, "scannerCanvas");
    assert_eq!(AMBIENT_CANVAS_ID, "particleCanvas");
    assert_eq!(CARD_STREAM_ID, "cardStream");
    assert_eq!(CARD_LINE_ID, "cardLine");
    assert!(HERO_WRAPPER_SELECTOR.starts_with('.'));
    assert!(HERO_FALLBACK_HEIGHT > 0.0);
}
