//! Card stream kinematics and the scan-line reveal.
//!
//! The card line drifts sideways at a cruise speed, can be dragged and flung,
//! and wraps around once it leaves the container. Each card is split into a
//! "normal" face and a code face; where the card crosses the scanner the
//! normal face is clipped away and the code face revealed.

use crate::config::{CardStreamConfig, Params};
use crate::error::ConfigResult;
use rand::Rng;

pub struct CardStream {
    config: CardStreamConfig,
    position: f32,
    velocity: f32,
    /// -1 drifts left, +1 drifts right.
    direction: f32,
    animating: bool,
    dragging: bool,
    last_pointer_x: f32,
    pointer_velocity: f32,
    container_width: f32,
}

impl CardStream {
    pub fn new(config: CardStreamConfig, container_width: f32) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            position: 0.0,
            velocity: config.cruise_velocity,
            direction: -1.0,
            animating: true,
            dragging: false,
            last_pointer_x: 0.0,
            pointer_velocity: 0.0,
            container_width,
            config,
        })
    }

    pub fn config(&self) -> &CardStreamConfig {
        &self.config
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn direction(&self) -> f32 {
        self.direction
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn line_width(&self) -> f32 {
        self.config.line_width()
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width;
    }

    pub fn begin_drag(&mut self, pointer_x: f32) {
        self.dragging = true;
        self.animating = false;
        self.last_pointer_x = pointer_x;
        self.pointer_velocity = 0.0;
    }

    /// Follow the pointer. Returns `false` when no drag is in progress.
    pub fn drag_to(&mut self, pointer_x: f32) -> bool {
        if !self.dragging {
            return false;
        }
        let dx = pointer_x - self.last_pointer_x;
        self.position += dx;
        self.pointer_velocity = dx * self.config.drag_velocity_scale;
        self.last_pointer_x = pointer_x;
        true
    }

    /// Release the line. A fast enough drag becomes a fling in the drag
    /// direction; anything slower resumes cruising the way it was going.
    pub fn end_drag(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        if self.pointer_velocity.abs() > self.config.min_velocity {
            self.velocity = self.pointer_velocity.abs();
            self.direction = self.pointer_velocity.signum();
        } else {
            self.velocity = self.config.cruise_velocity;
        }
        self.animating = true;
        true
    }

    /// Advance by `dt_sec` seconds (clamped to [`Params::MAX_DT`]).
    pub fn tick(&mut self, dt_sec: f32) {
        if !self.animating || self.dragging {
            return;
        }
        let dt = dt_sec.clamp(0.0, Params::MAX_DT);
        if self.velocity > self.config.min_velocity {
            self.velocity *= self.config.friction;
        } else {
            self.velocity = self.velocity.max(self.config.min_velocity);
        }
        self.position += self.velocity * self.direction * dt;
        self.wrap();
    }

    /// Jump to the far side once the whole line has left the container.
    pub fn wrap(&mut self) {
        let line = self.line_width();
        if self.position < -line {
            self.position = self.container_width;
        } else if self.position > self.container_width {
            self.position = -line;
        }
    }

    /// Scanner span in container coordinates, centred on the container.
    pub fn scanner_span(&self) -> Span {
        let mid = self.container_width / 2.0;
        let half = self.config.scanner_width / 2.0;
        Span {
            left: mid - half,
            right: mid + half,
        }
    }
}

/// Horizontal extent, in any shared coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn offset(&self, dx: f32) -> Span {
        Span {
            left: self.left + dx,
            right: self.right + dx,
        }
    }
}

/// How a card relates to the scanner this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CardClip {
    /// Overlapping the scanner. `percent` of the card (from its left edge)
    /// has passed the scanner's left edge: the normal face is clipped from
    /// the right by that much and the code face from the left.
    Crossing { percent: f32 },
    /// Entirely past the scanner: fully code.
    Scanned,
    /// Not reached yet: fully normal.
    Pending,
    /// Edges exactly touching; leave the clip as it was.
    Touching,
}

impl CardClip {
    /// CSS values for `--clip-right` (normal face) and `--clip-left` (code
    /// face), or `None` when the clip should stay unchanged.
    pub fn clip_percents(&self) -> Option<(f32, f32)> {
        match *self {
            CardClip::Crossing { percent } => Some((percent, percent)),
            CardClip::Scanned => Some((100.0, 100.0)),
            CardClip::Pending => Some((0.0, 0.0)),
            CardClip::Touching => None,
        }
    }

    /// Whether this crossing should fire the one-shot scan flash.
    pub fn starts_scan(&self) -> bool {
        matches!(*self, CardClip::Crossing { percent } if percent > 0.0)
    }

    pub fn is_crossing(&self) -> bool {
        matches!(self, CardClip::Crossing { .. })
    }
}

pub fn card_clip(card: Span, scanner: Span) -> CardClip {
    if card.left < scanner.right && card.right > scanner.left {
        let width = card.width();
        let passed = (scanner.left - card.left).max(0.0);
        let percent = if width > 0.0 {
            passed / width * 100.0
        } else {
            0.0
        };
        CardClip::Crossing { percent }
    } else if card.right < scanner.left {
        CardClip::Scanned
    } else if card.left > scanner.right {
        CardClip::Pending
    } else {
        CardClip::Touching
    }
}

/// A block of random binary digits, `rows` lines of `cols` characters, each
/// line newline-terminated.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, cols: usize, rows: usize) -> String {
    let mut out = String::with_capacity((cols + 1) * rows);
    for _ in 0..rows {
        for _ in 0..cols {
            out.push(if rng.gen::<bool>() { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}
