// Host-side tests for the background drift layer.

use glam::Vec2;
use hero_core::draw::{LinearGradient, LIME};
use hero_core::{AmbientConfig, AmbientField, Blend, ConfigError, Rect, Rgba, Surface};

#[derive(Default)]
struct Dots {
    cleared: Option<(f32, f32)>,
    blend: Option<Blend>,
    alpha: Option<f32>,
    dots: Vec<(Rect, Rgba)>,
}

impl Surface for Dots {
    fn clear(&mut self, width: f32, height: f32) {
        self.cleared = Some((width, height));
    }
    fn set_blend(&mut self, blend: Blend) {
        self.blend = Some(blend);
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = Some(alpha);
    }
    fn fill_round_rect(&mut self, _: Rect, _: f32, _: &LinearGradient) {}
    fn fill_rect(&mut self, _: Rect, _: &LinearGradient) {}
    fn draw_sprite(&mut self, _: Rect) {}
    fn fill_solid(&mut self, rect: Rect, color: Rgba) {
        self.dots.push((rect, color));
    }
}

fn make_field(width: f32, height: f32) -> AmbientField {
    AmbientField::new(AmbientConfig::default(), width, height, 11).expect("default config")
}

#[test]
fn points_start_in_a_band_twice_the_width() {
    let field = make_field(1000.0, 300.0);
    assert_eq!(field.points().len(), 150);
    for p in field.points() {
        assert!((-1000.0..=1000.0).contains(&p.x), "x {} out of band", p.x);
        assert!((-150.0..=150.0).contains(&p.y), "y {} out of band", p.y);
    }
    // Roughly half of the band lies off the visible surface
    let off = field.points().iter().filter(|p| p.x.abs() > 500.0).count();
    assert!(off > 30 && off < 120, "{off} points off-surface");
}

#[test]
fn same_seed_same_field() {
    let a = make_field(800.0, 300.0);
    let b = make_field(800.0, 300.0);
    assert_eq!(a.points(), b.points());
}

#[test]
fn points_drift_right_each_frame() {
    let mut field = make_field(1000.0, 300.0);
    let before: Vec<Vec2> = field.points().to_vec();
    field.advance();
    for (old, new) in before.iter().zip(field.points()) {
        if old.x + 0.3 <= 500.0 {
            assert!((new.x - (old.x + 0.3)).abs() < 1e-4);
        }
        assert_eq!(new.y, old.y);
    }
}

#[test]
fn points_past_the_right_edge_wrap_to_the_left_edge() {
    let cfg = AmbientConfig {
        count: 1,
        ..Default::default()
    };
    let mut field = AmbientField::new(cfg, 200.0, 100.0, 3).expect("config");
    // Walk the point until it crosses x = 100
    let mut wrapped = false;
    for _ in 0..20_000 {
        let x = field.points()[0].x;
        field.advance();
        let next = field.points()[0].x;
        if next < x {
            assert_eq!(next, -100.0, "wraps to the left edge exactly");
            assert!(x + 0.3 > 100.0);
            wrapped = true;
            break;
        }
    }
    assert!(wrapped, "point never wrapped");
}

#[test]
fn wrap_edge_follows_resize() {
    let cfg = AmbientConfig {
        count: 1,
        drift: 50.0,
        ..Default::default()
    };
    let mut field = AmbientField::new(cfg, 2000.0, 100.0, 5).expect("config");
    field.resize(100.0, 100.0);
    assert_eq!(field.size(), (100.0, 100.0));
    for _ in 0..200 {
        field.advance();
        assert!(field.points()[0].x <= 50.0, "past the new right edge");
    }
    assert!(field.points()[0].x.abs() <= 50.0);
}

#[test]
fn draw_fills_visible_points_in_lime_at_layer_opacity() {
    let field = make_field(1000.0, 300.0);
    let mut dots = Dots::default();
    field.draw(&mut dots);

    assert_eq!(dots.cleared, Some((1000.0, 300.0)));
    assert_eq!(dots.blend, Some(Blend::SourceOver));
    assert_eq!(dots.alpha, Some(0.4));

    let visible = field
        .points()
        .iter()
        .filter(|p| p.x.abs() < 501.0)
        .count();
    assert_eq!(dots.dots.len(), visible);
    for (rect, color) in &dots.dots {
        assert_eq!(*color, LIME);
        assert_eq!((rect.w, rect.h), (2.0, 2.0));
        assert!(rect.x > -2.0 && rect.x < 1000.0);
        assert!(rect.y > -2.0 && rect.y < 300.0);
    }
}

#[test]
fn centre_maps_to_the_middle_of_the_surface_with_y_up() {
    let field = make_field(400.0, 200.0);
    let centre = field.screen_rect(Vec2::ZERO).expect("visible");
    assert_eq!((centre.x, centre.y), (199.0, 99.0));
    let above = field.screen_rect(Vec2::new(0.0, 50.0)).expect("visible");
    assert!(above.y < centre.y);
    assert!(field.screen_rect(Vec2::new(-300.0, 0.0)).is_none());
}

#[test]
fn zero_sized_surface_draws_nothing() {
    let mut field = make_field(0.0, 300.0);
    let mut dots = Dots::default();
    field.tick(&mut dots);
    assert!(dots.cleared.is_none());
    assert!(dots.dots.is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = AmbientConfig {
        point_size: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        AmbientField::new(cfg, 100.0, 100.0, 1),
        Err(ConfigError::NotPositive {
            field: "pointSize",
            ..
        })
    ));
}
