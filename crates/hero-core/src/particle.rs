//! A single glinting point drifting away from the light bar.

use glam::Vec2;
use rand::Rng;

// Uniform spawn ranges, before intensity scaling.
pub const VX_RANGE: (f32, f32) = (0.2, 1.0);
pub const VY_RANGE: (f32, f32) = (-0.15, 0.15);
pub const RADIUS_RANGE: (f32, f32) = (0.4, 1.0);
pub const ALPHA_RANGE: (f32, f32) = (0.6, 1.0);
pub const DECAY_RANGE: (f32, f32) = (0.005, 0.025);
pub const TWINKLE_SPEED_RANGE: (f32, f32) = (0.02, 0.08);
pub const TWINKLE_AMOUNT_RANGE: (f32, f32) = (0.1, 0.25);

// Intensity-ratio coupling
const SPEED_COUPLING: f32 = 1.2;
const SIZE_COUPLING: f32 = 0.7;
const DECAY_BASE: f32 = 2.0;
const DECAY_COUPLING: f32 = 0.5;
// Keeps decay positive for very large intensity ratios
const MIN_DECAY_SCALE: f32 = 0.1;

/// Where new particles appear: a thin vertical strip around the bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnArea {
    pub bar_x: f32,
    pub bar_width: f32,
    pub height: f32,
}

impl SpawnArea {
    pub fn x_range(&self) -> (f32, f32) {
        let half = self.bar_width / 2.0;
        (self.bar_x - half, self.bar_x + half)
    }

    fn sample_pos<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let (x0, x1) = self.x_range();
        Vec2::new(uniform(rng, x0, x1), uniform(rng, 0.0, self.height))
    }
}

/// Multipliers derived from `current_intensity / base_intensity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaling {
    pub speed: f32,
    pub size: f32,
    pub decay: f32,
}

impl Scaling {
    pub fn from_ratio(ratio: f32) -> Self {
        Self {
            speed: 1.0 + (ratio - 1.0) * SPEED_COUPLING,
            size: 1.0 + (ratio - 1.0) * SIZE_COUPLING,
            decay: (DECAY_BASE - ratio * DECAY_COUPLING).max(MIN_DECAY_SCALE),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub base_alpha: f32,
    /// 1.0 at spawn, recycled once it reaches zero.
    pub life: f32,
    pub decay: f32,
    /// Frames since spawn or last recycle.
    pub age: u32,
    pub twinkle_speed: f32,
    pub twinkle_amount: f32,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, area: &SpawnArea, scaling: Scaling) -> Self {
        let pos = area.sample_pos(rng);
        let vel = Vec2::new(
            uniform(rng, VX_RANGE.0, VX_RANGE.1) * scaling.speed,
            uniform(rng, VY_RANGE.0, VY_RANGE.1) * scaling.speed,
        );
        let radius = uniform(rng, RADIUS_RANGE.0, RADIUS_RANGE.1) * scaling.size;
        let alpha = uniform(rng, ALPHA_RANGE.0, ALPHA_RANGE.1);
        let decay = uniform(rng, DECAY_RANGE.0, DECAY_RANGE.1) * scaling.decay;
        let twinkle_speed =
            uniform(rng, TWINKLE_SPEED_RANGE.0, TWINKLE_SPEED_RANGE.1) * scaling.speed;
        let twinkle_amount = uniform(rng, TWINKLE_AMOUNT_RANGE.0, TWINKLE_AMOUNT_RANGE.1);
        Self {
            pos,
            vel,
            radius,
            alpha,
            base_alpha: alpha,
            life: 1.0,
            decay,
            age: 0,
            twinkle_speed,
            twinkle_amount,
        }
    }

    /// Reset kinematics, opacity and life in place. Radius, decay and the
    /// twinkle parameters keep the values chosen at spawn.
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, area: &SpawnArea) {
        self.pos = area.sample_pos(rng);
        self.vel = Vec2::new(
            uniform(rng, VX_RANGE.0, VX_RANGE.1),
            uniform(rng, VY_RANGE.0, VY_RANGE.1),
        );
        self.alpha = uniform(rng, ALPHA_RANGE.0, ALPHA_RANGE.1);
        self.base_alpha = self.alpha;
        self.life = 1.0;
        self.age = 0;
    }

    /// One frame of motion, twinkle and decay.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.age += 1;
        self.alpha = self.base_alpha * self.life
            + (self.age as f32 * self.twinkle_speed).sin() * self.twinkle_amount;
        self.life -= self.decay;
    }

    #[inline]
    pub fn is_spent(&self, right_bound: f32) -> bool {
        self.pos.x > right_bound || self.life <= 0.0
    }
}

/// `min + u * (max - min)` for `u` uniform in [0, 1).
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn idle_ratio_leaves_decay_scaled_by_one_and_a_half() {
        let s = Scaling::from_ratio(1.0);
        assert_eq!(s.speed, 1.0);
        assert_eq!(s.size, 1.0);
        assert!((s.decay - 1.5).abs() < 1e-6);
    }

    #[test]
    fn uniform_handles_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform(&mut rng, 3.0, 3.0), 3.0);
    }
}
