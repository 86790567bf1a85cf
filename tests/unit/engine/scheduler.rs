use super::*;

#[test]
fn unbounded_scheduler_keeps_requesting() {
    let mut s = FrameScheduler::new(0);
    assert!(!s.is_running());
    s.start();
    for _ in 0..1000 {
        assert_eq!(s.record_tick(), FrameRequest::Next);
    }
    assert_eq!(s.ticks(), 1000);
}

#[test]
fn limited_scheduler_stops_after_limit() {
    let mut s = FrameScheduler::new(3);
    s.start();
    assert_eq!(s.record_tick(), FrameRequest::Next);
    assert_eq!(s.record_tick(), FrameRequest::Next);
    assert_eq!(s.record_tick(), FrameRequest::Stop);
    assert!(!s.is_running());

    s.start();
    assert!(!s.is_running());
}

#[test]
fn stop_is_cooperative() {
    let mut s = FrameScheduler::new(0);
    s.start();
    s.stop();
    assert_eq!(s.record_tick(), FrameRequest::Stop);
    assert_eq!(s.ticks(), 1);
}

#[test]
fn fixed_step_driver_spaces_timestamps_evenly() {
    let mut d = FixedStepDriver::new(50.0).unwrap().with_max_frames(3);
    assert_eq!(d.interval_ms(), 20.0);
    assert_eq!(d.next_timestamp(), Some(Millis(20.0)));
    assert_eq!(d.next_timestamp(), Some(Millis(40.0)));
    assert_eq!(d.next_timestamp(), Some(Millis(60.0)));
    assert_eq!(d.next_timestamp(), None);
}

#[test]
fn fixed_step_driver_rejects_bad_fps() {
    assert!(FixedStepDriver::new(0.0).is_err());
    assert!(FixedStepDriver::new(f64::INFINITY).is_err());
}
