//! First-order exponential smoothing between an idle and a scanning profile.

/// A parameter that eases toward one of two targets selected by the
/// scanning flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eased {
    pub base: f32,
    pub scan: f32,
    current: f32,
}

impl Eased {
    /// Starts at rest on the idle value.
    pub fn new(base: f32, scan: f32) -> Self {
        Self {
            base,
            scan,
            current: base,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self, scanning: bool) -> f32 {
        if scanning {
            self.scan
        } else {
            self.base
        }
    }

    /// Move `fraction` of the remaining distance toward the selected target
    /// and return the new value.
    #[inline]
    pub fn step(&mut self, scanning: bool, fraction: f32) -> f32 {
        self.current = approach(self.current, self.target(scanning), fraction);
        self.current
    }
}

/// `current + (target - current) * fraction`
#[inline]
pub fn approach(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction
}

/// Frames needed for a smoothed value to close all but `tolerance` of the
/// initial gap, i.e. the smallest `n` with `(1 - fraction)^n <= tolerance`.
pub fn frames_to_settle(fraction: f32, tolerance: f32) -> u32 {
    if fraction >= 1.0 {
        return 1;
    }
    if fraction <= 0.0 || tolerance <= 0.0 {
        return u32::MAX;
    }
    (tolerance.ln() / (1.0 - fraction).ln()).ceil().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_covers_the_fraction() {
        let mut e = Eased::new(0.8, 1.8);
        let v = e.step(true, 0.05);
        assert!((v - 0.85).abs() < 1e-6, "got {v}");
    }

    #[test]
    fn settle_estimate_is_tight() {
        let n = frames_to_settle(0.05, 0.01);
        let remaining = 0.95_f32.powi(n as i32);
        let before = 0.95_f32.powi(n as i32 - 1);
        assert!(remaining <= 0.01 && before > 0.01, "n={n}");
    }
}
