//! Platform-neutral drawing vocabulary.
//!
//! The scanner describes each frame as a short sequence of calls on a
//! [`Surface`]. The web front-end implements it on top of
//! `CanvasRenderingContext2d`; tests implement it with a recorder.

use smallvec::SmallVec;

/// Compositing mode for subsequent fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// Normal painting; used for clearing.
    SourceOver,
    /// Additive; used for the glow bar and particles.
    Lighter,
    /// Keeps existing pixels scaled by the new fill's alpha.
    DestinationIn,
}

impl Blend {
    /// Canvas `globalCompositeOperation` keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Blend::SourceOver => "source-over",
            Blend::Lighter => "lighter",
            Blend::DestinationIn => "destination-in",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string. Alpha is written unclamped; the canvas clamps
    /// it when parsing.
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);
pub const LAVENDER: Rgba = Rgba::new(196, 181, 253, 1.0);
pub const VIOLET: Rgba = Rgba::new(139, 92, 246, 1.0);
pub const LIME: Rgba = Rgba::new(180, 255, 57, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Linear gradient between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub stops: SmallVec<[ColorStop; 5]>,
}

impl LinearGradient {
    pub fn horizontal(x0: f32, x1: f32) -> Self {
        Self {
            from: (x0, 0.0),
            to: (x1, 0.0),
            stops: SmallVec::new(),
        }
    }

    pub fn vertical(y0: f32, y1: f32) -> Self {
        Self {
            from: (0.0, y0),
            to: (0.0, y1),
            stops: SmallVec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self
    }
}

/// Sink for one frame of drawing.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn set_blend(&mut self, blend: Blend);
    fn set_global_alpha(&mut self, alpha: f32);
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, fill: &LinearGradient);
    fn fill_rect(&mut self, rect: Rect, fill: &LinearGradient);
    /// Draw the cached particle sprite scaled into `rect`.
    fn draw_sprite(&mut self, rect: Rect);
    fn fill_solid(&mut self, rect: Rect, color: Rgba);
}

/// Opacity multiplier for something at height `y`: a linear ramp over
/// `fade_zone` pixels at the top and bottom edges, 1 in between.
#[inline]
pub fn edge_fade(y: f32, height: f32, fade_zone: f32) -> f32 {
    let fade = if y < fade_zone {
        y / fade_zone
    } else if y > height - fade_zone {
        (height - y) / fade_zone
    } else {
        1.0
    };
    fade.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_fade_ramps_at_both_ends() {
        assert_eq!(edge_fade(0.0, 250.0, 60.0), 0.0);
        assert!((edge_fade(30.0, 250.0, 60.0) - 0.5).abs() < 1e-6);
        assert_eq!(edge_fade(125.0, 250.0, 60.0), 1.0);
        assert!((edge_fade(220.0, 250.0, 60.0) - 0.5).abs() < 1e-6);
        assert_eq!(edge_fade(260.0, 250.0, 60.0), 0.0);
        assert_eq!(edge_fade(-5.0, 250.0, 60.0), 0.0);
    }

    #[test]
    fn css_strings() {
        assert_eq!(VIOLET.with_alpha(0.0).to_css(), "rgba(139, 92, 246, 0)");
        assert_eq!(Blend::Lighter.as_css(), "lighter");
    }
}
