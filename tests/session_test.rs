mod common;

use abrepeat::drag::{Bounds, DragTarget, Pointer};
use abrepeat::error::SessionError;
use abrepeat::media::MediaEvent;
use abrepeat::region::{LoopRegion, Marker};
use abrepeat::repeat::RepeatMode;
use abrepeat::session::{NoticeLevel, Session, SessionOptions};
use common::{MockBackend, file, loaded_session};

fn practice_session(mode: RepeatMode) -> Session<MockBackend> {
    let mut session = loaded_session(100.0);
    session.drag_marker(Marker::A, 10.0);
    session.drag_marker(Marker::B, 20.0);
    session.select_repeat(mode);
    session.play();
    session
}

/// Play through the region until the playhead passes B.
fn cross_b(session: &mut Session<MockBackend>) {
    session.handle_event(MediaEvent::PositionAdvanced(15.0));
    session.handle_event(MediaEvent::PositionAdvanced(20.1));
}

#[test]
fn test_x5_stops_after_fifth_pass() {
    let mut session = practice_session(RepeatMode::X5);
    assert_eq!(session.position(), 10.0);

    for _ in 0..4 {
        cross_b(&mut session);
        assert_eq!(session.position(), 10.0);
        assert!(session.is_playing());
    }
    assert_eq!(session.repeat_mode(), RepeatMode::X5);
    assert_eq!(session.repeat_count(), 4);

    cross_b(&mut session);
    assert_eq!(session.repeat_mode(), RepeatMode::Off);
    assert_eq!(session.repeat_count(), 0);
    assert!(!session.is_playing());
    assert!(!session.backend().playing);
    assert_eq!(session.position(), 20.0);
    assert_eq!(session.backend().seeks.last(), Some(&20.0));
}

#[test]
fn test_infinite_keeps_looping() {
    let mut session = practice_session(RepeatMode::Infinite);
    for _ in 0..50 {
        cross_b(&mut session);
        assert_eq!(session.position(), 10.0);
        assert!(session.is_playing());
    }
    assert_eq!(session.repeat_mode(), RepeatMode::Infinite);
}

#[test]
fn test_marker_change_resets_x10_count() {
    let mut session = practice_session(RepeatMode::X10);
    for _ in 0..3 {
        cross_b(&mut session);
    }
    assert_eq!(session.repeat_count(), 3);

    session.drag_marker(Marker::B, 25.0);
    assert_eq!(session.repeat_count(), 0);
    assert_eq!(session.repeat_mode(), RepeatMode::X10);
}

#[test]
fn test_marker_drags_keep_order() {
    let mut session = loaded_session(60.0);
    let track = Bounds::new(0.0, 0.0, 60.0, 1.0);

    session.begin_drag(DragTarget::MarkerB, track, Pointer::new(60.0, 0.0));
    for x in [40.0, 10.0, 0.0, -30.0, 5.0] {
        session.drag_to(Pointer::new(x, 0.0));
        let region = session.region();
        assert!(region.a < region.b);
    }
    session.end_drag();
    assert_eq!(session.region(), LoopRegion { a: 0.0, b: 5.0 });

    session.begin_drag(DragTarget::MarkerA, track, Pointer::new(0.0, 0.0));
    for x in [3.0, 4.0, 5.0, 59.0, 100.0] {
        session.drag_to(Pointer::new(x, 0.0));
        let region = session.region();
        assert!(region.a < region.b);
        assert!(region.b - region.a >= 1.0);
    }
    session.end_drag();
    assert_eq!(session.region(), LoopRegion { a: 4.0, b: 5.0 });
}

#[test]
fn test_seek_drag_clamps_into_region() {
    let mut session = practice_session(RepeatMode::Off);
    let track = Bounds::new(0.0, 0.0, 100.0, 1.0);

    assert!(session.begin_drag(DragTarget::Seek, track, Pointer::new(15.5, 0.0)));
    assert_eq!(session.position(), 15.5);
    session.drag_to(Pointer::new(90.0, 0.0));
    assert_eq!(session.position(), 20.0);
    session.drag_to(Pointer::new(-10.0, 0.0));
    assert_eq!(session.position(), 10.0);
    assert_eq!(session.end_drag(), Some(DragTarget::Seek));
}

#[test]
fn test_slot_round_trip() {
    let mut session = loaded_session(100.0);

    session.select_slot(2).unwrap();
    session.drag_marker(Marker::A, 5.0);
    session.drag_marker(Marker::B, 50.0);
    assert_eq!(session.region(), LoopRegion { a: 5.0, b: 50.0 });

    session.select_slot(3).unwrap();
    assert_eq!(session.region(), LoopRegion { a: 5.0, b: 50.0 });
    session.select_all();

    session.select_slot(2).unwrap();
    assert_eq!(session.region(), LoopRegion { a: 5.0, b: 50.0 });

    session.select_slot(3).unwrap();
    assert_eq!(session.region(), LoopRegion::full(100.0));

    assert!(matches!(session.select_slot(6), Err(SessionError::InvalidSlot(6))));
}

#[test]
fn test_slot_recall_fits_shorter_track() {
    let mut session = loaded_session(100.0);
    session.add_file(file("short.wav")).unwrap();

    session.select_slot(1).unwrap();
    session.drag_marker(Marker::A, 70.0);
    session.select_slot(2).unwrap();
    session.select_all();

    session.skip_next();
    session.handle_event(MediaEvent::MetadataReady { duration: 40.0 });
    session.select_slot(1).unwrap();

    let region = session.region();
    assert!(region.b <= 40.0);
    assert!(region.a < region.b);
}

#[test]
fn test_third_upload_is_rejected() {
    let mut session = Session::new(MockBackend::default(), SessionOptions::default());
    session.add_file(file("one.wav")).unwrap();
    session.add_file(file("two.wav")).unwrap();

    let result = session.add_file(file("three.wav"));
    assert!(matches!(result, Err(SessionError::PlaylistFull { max: 2 })));

    let names: Vec<&str> = session.playlist().files().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["one.wav", "two.wav"]);
    let notice = session.take_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(session.backend().loads, 1);
}

#[test]
fn test_skip_stops_and_resets() {
    let mut session = loaded_session(100.0);
    session.add_file(file("second.wav")).unwrap();
    session.play();
    session.handle_event(MediaEvent::PositionAdvanced(42.0));

    session.skip_next();
    assert_eq!(session.playlist().current_index(), Some(1));
    assert!(!session.is_playing());
    assert_eq!(session.position(), 0.0);
    assert!(!session.has_media());

    session.handle_event(MediaEvent::MetadataReady { duration: 30.0 });
    session.skip_previous();
    assert_eq!(session.playlist().current_index(), Some(0));
}

#[test]
fn test_skip_needs_two_files() {
    let mut session = loaded_session(100.0);
    session.skip_next();
    session.skip_previous();
    assert_eq!(session.backend().loads, 1);
    assert!(session.has_media());
}

#[test]
fn test_volume_and_speed_reach_backend_while_paused() {
    let mut session = loaded_session(100.0);
    assert!(!session.is_playing());

    session.set_volume(40);
    session.set_speed(1.5);
    assert_eq!(session.backend().volume, 0.4);
    assert_eq!(session.backend().speed, 1.5);
}

#[test]
fn test_metadata_applies_session_settings() {
    let options = SessionOptions {
        volume: 30,
        speed: 0.8,
        ..SessionOptions::default()
    };
    let mut session = Session::new(MockBackend::default(), options);
    session.add_file(file("lesson.wav")).unwrap();
    session.handle_event(MediaEvent::MetadataReady { duration: 12.0 });

    assert_eq!(session.backend().volume, 0.3);
    assert_eq!(session.backend().speed, 0.8);
    assert_eq!(session.region(), LoopRegion { a: 0.0, b: 12.0 });
}

#[test]
fn test_markers_stay_inside_short_track() {
    let mut session = loaded_session(0.5);
    session.play();

    session.drag_marker(Marker::B, 0.3);
    assert_eq!(session.region(), LoopRegion { a: 0.0, b: 0.5 });
    session.set_marker_b_here();
    assert_eq!(session.region(), LoopRegion { a: 0.0, b: 0.5 });

    session.handle_event(MediaEvent::PositionAdvanced(0.4));
    session.handle_event(MediaEvent::Ended);
    assert!(!session.is_playing());
    assert_eq!(session.position(), 0.5);
}
