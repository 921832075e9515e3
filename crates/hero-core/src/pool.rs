//! Fixed-capacity particle storage with an explicit live count.

use crate::particle::{Particle, Scaling, SpawnArea};
use rand::Rng;

/// Dense particle storage. Slots `0..len()` are live; the backing vector is
/// allocated once and never grows past `capacity`.
pub struct ParticlePool {
    slots: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.slots.iter_mut()
    }

    /// Append a freshly randomized particle. Returns `false` when full.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, area: &SpawnArea, scaling: Scaling) -> bool {
        if self.slots.len() >= self.capacity {
            log::trace!("particle pool full at {}", self.capacity);
            return false;
        }
        self.slots.push(Particle::spawn(rng, area, scaling));
        true
    }

    /// Drop the most recently added particles when the pool is more than
    /// `slack` over `target`, at most `batch` per call. Returns how many were
    /// removed.
    ///
    /// Removal is by slot index, not by age or remaining life, so freshly
    /// spawned particles can go first.
    pub fn prune(&mut self, target: usize, slack: usize, batch: usize) -> usize {
        let live = self.slots.len();
        if live <= target + slack {
            return 0;
        }
        let excess = batch.min(live - target);
        self.slots.truncate(live - excess);
        log::trace!("pruned {excess} particles, {} live", self.slots.len());
        excess
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn area() -> SpawnArea {
        SpawnArea {
            bar_x: 50.0,
            bar_width: 3.0,
            height: 100.0,
        }
    }

    #[test]
    fn spawn_refuses_past_capacity() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = ParticlePool::with_capacity(2);
        let s = Scaling::from_ratio(1.0);
        assert!(pool.spawn(&mut rng, &area(), s));
        assert!(pool.spawn(&mut rng, &area(), s));
        assert!(!pool.spawn(&mut rng, &area(), s));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn prune_only_past_slack_and_in_batches() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = ParticlePool::with_capacity(64);
        let s = Scaling::from_ratio(1.0);
        for _ in 0..40 {
            pool.spawn(&mut rng, &area(), s);
        }
        assert_eq!(pool.prune(10, 30, 15), 0);
        assert_eq!(pool.len(), 40);
        assert_eq!(pool.prune(10, 20, 15), 15);
        assert_eq!(pool.len(), 25);
        // Excess smaller than the batch
        assert_eq!(pool.prune(22, 2, 15), 3);
        assert_eq!(pool.len(), 22);
    }
}
