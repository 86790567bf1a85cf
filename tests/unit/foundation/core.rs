use super::*;

#[test]
fn millis_ordering_is_strict() {
    let t = Millis(100.0);
    assert!(t.after(0.5).is_after(t));
    assert!(!t.is_after(t));
    assert_eq!(t.after(600.0), Millis(700.0));
}

#[test]
fn draw_rect_admits_far_edge_inclusive() {
    let r = DrawRect::new(10, 20, 50, 30);
    assert_eq!(r.right(), 60);
    assert_eq!(r.bottom(), 50);
    assert!(r.admits(60, 50));
    assert!(!r.admits(61, 50));
    assert!(!r.admits(60, 51));
}

#[test]
fn draw_rect_full_covers_canvas() {
    let r = DrawRect::full(Canvas::new(640, 360));
    assert_eq!(r, DrawRect::new(0, 0, 640, 360));
}

#[test]
fn draw_rect_rejects_negative_extents() {
    assert!(DrawRect::new(0, 0, -1, 10).validate().is_err());
    assert!(DrawRect::new(0, 0, 0, 0).validate().is_ok());
}
