//! Background drift layer: a sparse field of lime points sliding slowly to
//! the right behind the cards.
//!
//! Positions are kept relative to the centre of the surface, x to the right
//! and y up, and mapped to surface pixels only when drawn.

use crate::config::AmbientConfig;
use crate::draw::{Blend, Rect, Surface, LIME};
use crate::error::ConfigResult;
use crate::particle::uniform;
use glam::Vec2;
use rand::prelude::*;

pub struct AmbientField {
    config: AmbientConfig,
    width: f32,
    height: f32,
    points: Vec<Vec2>,
}

impl AmbientField {
    /// Scatter `config.count` points over a band twice the surface width
    /// (centred on it) and the full surface height.
    pub fn new(config: AmbientConfig, width: f32, height: f32, seed: u64) -> ConfigResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..config.count)
            .map(|_| {
                Vec2::new(
                    uniform(&mut rng, -width, width),
                    uniform(&mut rng, -height / 2.0, height / 2.0),
                )
            })
            .collect();
        log::debug!("[ambient] {} points on {}x{}", config.count, width, height);
        Ok(Self {
            config,
            width,
            height,
            points,
        })
    }

    pub fn config(&self) -> &AmbientConfig {
        &self.config
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Adopt new surface dimensions. Points keep their positions; the wrap
    /// edge follows the new width from the next step on.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        log::info!("[ambient] resized to {}x{}", width, height);
    }

    /// Drift every point right, sending those past the right edge back to
    /// the left edge.
    pub fn advance(&mut self) {
        let half = self.width / 2.0;
        for p in &mut self.points {
            p.x += self.config.drift;
            if p.x > half {
                p.x = -half;
            }
        }
    }

    /// Surface pixel rect for a point, or `None` when it lies off-surface.
    pub fn screen_rect(&self, point: Vec2) -> Option<Rect> {
        let size = self.config.point_size;
        let x = point.x + self.width / 2.0 - size / 2.0;
        let y = self.height / 2.0 - point.y - size / 2.0;
        let visible = x + size > 0.0 && x < self.width && y + size > 0.0 && y < self.height;
        visible.then_some(Rect {
            x,
            y,
            w: size,
            h: size,
        })
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        surface.set_blend(Blend::SourceOver);
        surface.clear(self.width, self.height);
        surface.set_global_alpha(self.config.opacity);
        for rect in self.points.iter().filter_map(|&p| self.screen_rect(p)) {
            surface.fill_solid(rect, LIME);
        }
    }

    /// One frame: move, then draw.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.advance();
        self.draw(surface);
    }
}
