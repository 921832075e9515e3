//! The particle scanner: a glowing vertical bar shedding particles that drift
//! to the right, eased between an idle and a scanning profile.

use crate::config::ScannerConfig;
use crate::draw::{
    edge_fade, Blend, LinearGradient, Rect, Rgba, Surface, LAVENDER, VIOLET, WHITE,
};
use crate::easing::Eased;
use crate::error::ConfigResult;
use crate::particle::{Scaling, SpawnArea};
use crate::pool::ParticlePool;
use rand::prelude::*;
use serde::Serialize;

// Glow bar geometry: (half-width in bar widths, corner radius)
const CORE_RADIUS: f32 = 15.0;
const GLOW1: (f32, f32) = (2.0, 25.0);
const GLOW2: (f32, f32) = (4.0, 35.0);
const GLOW3: (f32, f32) = (8.0, 45.0);

// Layer opacity as (idle, scanning)
const GLOW1_ALPHA: (f32, f32) = (0.8, 1.0);
const GLOW2_ALPHA: (f32, f32) = (0.6, 0.8);
const GLOW3_ALPHA: f32 = 0.6;
const GLOW3_PEAK: f32 = 0.2;

// Extra spawning kicks in once intensity is this far above base
const EXTRA_SPAWN_RATIO: f32 = 1.1;
const EXTRA_SPAWN_GAIN: f32 = 1.2;

/// Snapshot exposed to page code for diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerStats {
    pub intensity: f32,
    pub max_particles: usize,
    pub current_particles: usize,
    pub light_bar_width: f32,
    pub fade_zone: f32,
    pub scanning_active: bool,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

pub struct ParticleScanner {
    config: ScannerConfig,
    width: f32,
    height: f32,
    bar_x: f32,
    scanning: bool,
    intensity: Eased,
    max_particles: Eased,
    fade_zone: Eased,
    glow: Eased,
    pool: ParticlePool,
    rng: StdRng,
}

impl ParticleScanner {
    /// Build a scanner for a `width` × `height` surface and fill the initial
    /// pool with `base_max_particles` particles.
    pub fn new(config: ScannerConfig, width: f32, height: f32, seed: u64) -> ConfigResult<Self> {
        config.validate()?;
        let mut scanner = Self {
            width,
            height,
            bar_x: width / 2.0,
            scanning: false,
            intensity: Eased::new(config.base_intensity, config.scan_intensity),
            max_particles: Eased::new(
                config.base_max_particles as f32,
                config.scan_max_particles as f32,
            ),
            fade_zone: Eased::new(config.base_fade_zone, config.scan_fade_zone),
            glow: Eased::new(config.base_glow, config.scan_glow),
            pool: ParticlePool::with_capacity(config.pool_capacity()),
            rng: StdRng::seed_from_u64(seed),
            config,
        };
        scanner.fill_initial_pool();
        log::debug!(
            "[scanner] {}x{} with {} particles",
            width,
            height,
            scanner.pool.len()
        );
        Ok(scanner)
    }

    fn fill_initial_pool(&mut self) {
        let area = self.spawn_area();
        let scaling = self.scaling();
        for _ in 0..self.config.base_max_particles {
            self.pool.spawn(&mut self.rng, &area, scaling);
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn set_scanning_active(&mut self, active: bool) {
        if self.scanning != active {
            log::info!("[scanner] scanning {}", if active { "on" } else { "off" });
        }
        self.scanning = active;
    }

    pub fn scanning_active(&self) -> bool {
        self.scanning
    }

    /// Adopt new surface dimensions and recentre the bar.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.bar_x = width / 2.0;
        log::info!("[scanner] resized to {}x{}", width, height);
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn bar_x(&self) -> f32 {
        self.bar_x
    }

    pub fn current_intensity(&self) -> f32 {
        self.intensity.current()
    }

    pub fn current_fade_zone(&self) -> f32 {
        self.fade_zone.current()
    }

    pub fn current_glow(&self) -> f32 {
        self.glow.current()
    }

    /// Effective particle target: the eased value, floored.
    pub fn max_particles(&self) -> usize {
        self.max_particles.current().max(0.0).floor() as usize
    }

    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn intensity_ratio(&self) -> f32 {
        self.intensity.current() / self.config.base_intensity
    }

    pub fn spawn_area(&self) -> SpawnArea {
        SpawnArea {
            bar_x: self.bar_x,
            bar_width: self.config.light_bar_width,
            height: self.height,
        }
    }

    fn scaling(&self) -> Scaling {
        Scaling::from_ratio(self.intensity_ratio())
    }

    pub fn stats(&self) -> ScannerStats {
        ScannerStats {
            intensity: self.intensity.current(),
            max_particles: self.max_particles(),
            current_particles: self.pool.len(),
            light_bar_width: self.config.light_bar_width,
            fade_zone: self.fade_zone.current(),
            scanning_active: self.scanning,
            canvas_width: self.width,
            canvas_height: self.height,
        }
    }

    /// Drop every particle. The scanner stays usable; the pool refills
    /// through regular spawning on later ticks.
    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Run one frame: ease, draw the bar, update and draw particles, spawn,
    /// prune.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.ease_profile();
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }

        surface.set_blend(Blend::SourceOver);
        surface.clear(self.width, self.height);

        self.draw_light_bar(surface);

        surface.set_blend(Blend::Lighter);
        self.update_and_draw_particles(surface);

        self.spawn_replacements();

        let pruned = self.pool.prune(
            self.max_particles(),
            self.config.prune_slack as usize,
            self.config.prune_batch as usize,
        );
        if pruned > 0 {
            log::debug!("[scanner] pruned {pruned}, {} live", self.pool.len());
        }
    }

    fn ease_profile(&mut self) {
        let k = self.config.transition_speed;
        let on = self.scanning;
        self.intensity.step(on, k);
        self.max_particles.step(on, k);
        self.fade_zone.step(on, k);
        self.glow.step(on, k);
    }

    fn update_and_draw_particles<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let area = self.spawn_area();
        let right_bound = self.width + self.config.overscan;
        let height = self.height;
        let fade_zone = self.fade_zone.current();
        let rng = &mut self.rng;
        for p in self.pool.iter_mut() {
            p.advance();
            if p.is_spent(right_bound) {
                p.recycle(rng, &area);
            }
            surface.set_global_alpha(p.alpha * edge_fade(p.pos.y, height, fade_zone));
            surface.draw_sprite(Rect {
                x: p.pos.x - p.radius,
                y: p.pos.y - p.radius,
                w: p.radius * 2.0,
                h: p.radius * 2.0,
            });
        }
    }

    fn spawn_replacements(&mut self) {
        let area = self.spawn_area();
        let scaling = self.scaling();
        let intensity = self.intensity.current();
        if self.rng.gen::<f32>() < intensity && self.pool.len() < self.max_particles() {
            self.pool.spawn(&mut self.rng, &area, scaling);
        }
        let ratio = self.intensity_ratio();
        if ratio > EXTRA_SPAWN_RATIO
            && self.rng.gen::<f32>() < (ratio - 1.0) * EXTRA_SPAWN_GAIN
        {
            self.pool.spawn(&mut self.rng, &area, scaling);
        }
    }

    fn draw_light_bar<S: Surface + ?Sized>(&self, surface: &mut S) {
        let g = self.glow.current();
        let w = self.config.light_bar_width;
        let h = self.height;
        let x = self.bar_x;
        let layer_alpha = |(idle, scan): (f32, f32)| if self.scanning { scan } else { idle };

        surface.set_blend(Blend::Lighter);

        let core = LinearGradient::horizontal(x - w / 2.0, x + w / 2.0)
            .stop(0.0, WHITE.with_alpha(0.0))
            .stop(0.3, WHITE.with_alpha(0.9 * g))
            .stop(0.5, WHITE.with_alpha(g))
            .stop(0.7, WHITE.with_alpha(0.9 * g))
            .stop(1.0, WHITE.with_alpha(0.0));
        surface.set_global_alpha(1.0);
        surface.fill_round_rect(
            Rect {
                x: x - w / 2.0,
                y: 0.0,
                w,
                h,
            },
            CORE_RADIUS,
            &core,
        );

        let bar = BarGeometry { x, w, h };
        bar.glow_layer(
            surface,
            GLOW1,
            LAVENDER.with_alpha(0.8 * g),
            layer_alpha(GLOW1_ALPHA),
        );
        bar.glow_layer(
            surface,
            GLOW2,
            VIOLET.with_alpha(0.4 * g),
            layer_alpha(GLOW2_ALPHA),
        );
        if self.scanning {
            bar.glow_layer(surface, GLOW3, VIOLET.with_alpha(GLOW3_PEAK), GLOW3_ALPHA);
        }

        let fade = self.fade_zone.current() / h;
        let vertical = LinearGradient::vertical(0.0, h)
            .stop(0.0, WHITE.with_alpha(0.0))
            .stop(fade, WHITE)
            .stop(1.0 - fade, WHITE)
            .stop(1.0, WHITE.with_alpha(0.0));
        surface.set_blend(Blend::DestinationIn);
        surface.set_global_alpha(1.0);
        surface.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                w: self.width,
                h,
            },
            &vertical,
        );
    }
}

struct BarGeometry {
    x: f32,
    w: f32,
    h: f32,
}

impl BarGeometry {
    /// A rounded rect `span` bar widths either side of the centre line with a
    /// horizontal gradient peaking at `peak` in the middle.
    fn glow_layer<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        (span, radius): (f32, f32),
        peak: Rgba,
        alpha: f32,
    ) {
        let half = self.w * span;
        let gradient = LinearGradient::horizontal(self.x - half, self.x + half)
            .stop(0.0, VIOLET.with_alpha(0.0))
            .stop(0.5, peak)
            .stop(1.0, VIOLET.with_alpha(0.0));
        surface.set_global_alpha(alpha);
        surface.fill_round_rect(
            Rect {
                x: self.x - half,
                y: 0.0,
                w: half * 2.0,
                h: self.h,
            },
            radius,
            &gradient,
        );
    }
}
