// Host-side tests for card stream motion, wrap-around and scan clipping.

use hero_core::{card_clip, generate_code, CardClip, CardStream, CardStreamConfig, Span};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: f32 = 1.0 / 60.0;

fn make_stream() -> CardStream {
    CardStream::new(CardStreamConfig::default(), 1000.0).expect("default config")
}

#[test]
fn cruise_decays_to_minimum_speed_and_drifts_left() {
    let mut s = make_stream();
    assert_eq!(s.velocity(), 40.0);
    assert_eq!(s.direction(), -1.0);

    s.tick(FRAME);
    assert!((s.velocity() - 38.0).abs() < 1e-4);
    assert!(s.position() < 0.0);

    for _ in 0..100 {
        s.tick(FRAME);
    }
    assert_eq!(s.velocity(), 20.0);
}

#[test]
fn fast_drag_becomes_a_fling() {
    let mut s = make_stream();
    s.begin_drag(100.0);
    assert!(s.drag_to(110.0));
    assert_eq!(s.position(), 10.0);
    assert!(s.end_drag());

    assert_eq!(s.velocity(), 600.0);
    assert_eq!(s.direction(), 1.0);
    s.tick(FRAME);
    assert!((s.velocity() - 570.0).abs() < 1e-3);
    assert!(s.position() > 10.0);
}

#[test]
fn slow_drag_resumes_cruise_in_previous_direction() {
    let mut s = make_stream();
    s.begin_drag(100.0);
    s.drag_to(100.25);
    s.end_drag();
    assert_eq!(s.velocity(), 40.0);
    assert_eq!(s.direction(), -1.0);
}

#[test]
fn no_motion_while_dragging() {
    let mut s = make_stream();
    s.begin_drag(0.0);
    s.drag_to(-30.0);
    let held = s.position();
    for _ in 0..10 {
        s.tick(FRAME);
    }
    assert_eq!(s.position(), held);
    assert!(s.is_dragging());
}

#[test]
fn drag_without_begin_is_ignored() {
    let mut s = make_stream();
    assert!(!s.drag_to(50.0));
    assert!(!s.end_drag());
    assert_eq!(s.position(), 0.0);
}

#[test]
fn wraps_around_both_edges() {
    let mut s = make_stream();
    let line = s.line_width();

    s.begin_drag(0.0);
    s.drag_to(-line - 5.0);
    s.end_drag();
    s.tick(FRAME);
    assert_eq!(s.position(), 1000.0);

    s.begin_drag(0.0);
    s.drag_to(50.0);
    s.end_drag();
    s.tick(FRAME);
    assert_eq!(s.position(), -line);
}

#[test]
fn long_frames_are_clamped() {
    let mut s = make_stream();
    s.tick(5.0);
    // 38 px/s for at most 0.1 s
    assert!((s.position() + 3.8).abs() < 1e-4, "moved to {}", s.position());
}

#[test]
fn resize_moves_the_scanner() {
    let mut s = make_stream();
    assert_eq!(s.scanner_span(), Span { left: 496.0, right: 504.0 });
    s.set_container_width(600.0);
    assert_eq!(s.scanner_span(), Span { left: 296.0, right: 304.0 });
}

#[test]
fn clip_follows_the_scanner_crossing() {
    let scanner = Span {
        left: 496.0,
        right: 504.0,
    };

    let pending = card_clip(Span { left: 600.0, right: 1000.0 }, scanner);
    assert_eq!(pending, CardClip::Pending);
    assert_eq!(pending.clip_percents(), Some((0.0, 0.0)));

    let scanned = card_clip(Span { left: 0.0, right: 400.0 }, scanner);
    assert_eq!(scanned, CardClip::Scanned);
    assert_eq!(scanned.clip_percents(), Some((100.0, 100.0)));

    let entering = card_clip(Span { left: 500.0, right: 900.0 }, scanner);
    assert_eq!(entering, CardClip::Crossing { percent: 0.0 });
    assert!(entering.is_crossing());
    assert!(!entering.starts_scan());

    let halfway = card_clip(Span { left: 296.0, right: 696.0 }, scanner);
    assert_eq!(halfway, CardClip::Crossing { percent: 50.0 });
    assert!(halfway.starts_scan());

    let touching = card_clip(Span { left: 504.0, right: 904.0 }, scanner);
    assert_eq!(touching, CardClip::Touching);
    assert_eq!(touching.clip_percents(), None);
}

#[test]
fn generated_code_is_binary_rows() {
    let mut rng = StdRng::seed_from_u64(9);
    let code = generate_code(&mut rng, 40, 20);
    assert_eq!(code.len(), 41 * 20);
    let rows: Vec<&str> = code.lines().collect();
    assert_eq!(rows.len(), 20);
    for row in rows {
        assert_eq!(row.len(), 40);
        assert!(row.chars().all(|c| c == '0' || c == '1'));
    }
    assert!(code.contains('0') && code.contains('1'));
}
