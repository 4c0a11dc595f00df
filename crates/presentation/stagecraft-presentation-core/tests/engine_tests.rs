use stagecraft_presentation_core::{
    ActionText, Advance, BarColor, BarFrame, BarStyle, BoardLine, BossBar, CameraPath, Config,
    EmptyWorld, FramePayload, InstanceKey, Orientation, PlaybackState, PresentationError,
    Registry, SidebarBoard, TickDispatcher, Vec3, ViewerId,
};
use stagecraft_test_fixtures::{RecordingSink, SinkCall};

fn bar(progress: f32) -> BarFrame {
    BarFrame::new(BarColor::Purple, BarStyle::Segmented10, progress, "boss").unwrap()
}

/// it should render a three-frame cycle in order and wrap back to the first
#[test]
fn cycle_renders_in_order_and_wraps() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let instance = ActionText::for_viewer(viewer)
        .add_frame("A", 1)
        .add_frame("B", 1)
        .add_frame("C", 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    assert_eq!(instance.cursor(), 0);

    for _ in 0..3 {
        instance.advance(&mut sink, &EmptyWorld);
    }
    assert_eq!(sink.texts(), vec!["A", "B", "C"]);
    // N advances over N frames return the cursor to its start
    assert_eq!(instance.cursor(), 0);

    instance.advance(&mut sink, &EmptyWorld);
    assert_eq!(sink.texts(), vec!["A", "B", "C", "A"]);
}

/// it should freeze the cursor under pause and resume from it, not restart
#[test]
fn pause_resumes_mid_cycle() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let instance = ActionText::for_viewer(viewer)
        .add_frame("A", 1)
        .add_frame("B", 1)
        .add_frame("C", 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    instance.advance(&mut sink, &EmptyWorld);
    instance.advance(&mut sink, &EmptyWorld);
    assert_eq!(sink.texts(), vec!["A", "B"]);

    assert!(instance.pause(&mut sink).unwrap());
    let frozen = instance.cursor();
    assert_eq!(instance.advance(&mut sink, &EmptyWorld), Advance::Idle);
    assert_eq!(instance.advance(&mut sink, &EmptyWorld), Advance::Idle);
    assert_eq!(sink.texts(), vec!["A", "B"]);
    assert_eq!(instance.cursor(), frozen);

    assert!(instance.play().unwrap());
    instance.advance(&mut sink, &EmptyWorld);
    assert_eq!(sink.texts(), vec!["A", "B", "C"]);
}

/// it should expand repeat counts into consecutive identical frames
#[test]
fn repeat_counts_hold_frames() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let instance = ActionText::for_viewer(viewer)
        .add_frame("hold", 3)
        .add_frame("blink", 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    for _ in 0..4 {
        instance.advance(&mut sink, &EmptyWorld);
    }
    assert_eq!(sink.texts(), vec!["hold", "hold", "hold", "blink"]);
}

/// it should merge a second registration instead of duplicating the entry
#[test]
fn merge_not_duplicate() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    ActionText::for_viewer(viewer)
        .add_frame("A", 1)
        .add_frame("B", 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    assert_eq!(registry.len(), 1);

    // Re-registering the same identity appends frames to the live cycle.
    let merged = ActionText::for_viewer(viewer)
        .add_frame("C", 1)
        .build(&mut registry, &mut sink)
        .unwrap();
    assert_eq!(merged.frame_count(), 3);
    assert_eq!(merged.state(), PlaybackState::Playing);

    assert_eq!(registry.len(), 1);
    for _ in 0..3 {
        registry
            .lookup_mut(&InstanceKey::Viewer(viewer))
            .unwrap()
            .advance(&mut sink, &EmptyWorld);
    }
    assert_eq!(sink.texts(), vec!["A", "B", "C"]);
}

/// it should reject a second subscription of the same viewer
#[test]
fn idempotent_viewer_add() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let instance = ActionText::for_viewer(viewer)
        .add_frame("A", 1)
        .build(&mut registry, &mut sink)
        .unwrap();
    let err = instance.add_viewer(viewer, &mut sink).unwrap_err();
    assert_eq!(err, PresentationError::DuplicateViewer { viewer });
    assert_eq!(instance.viewers().len(), 1);
}

/// it should stay idle without viewers or before play
#[test]
fn idle_conditions() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();

    // Playing but audience-less
    let empty_audience = BossBar::named("raid")
        .add_frame(bar(1.0), 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    assert_eq!(empty_audience.advance(&mut sink, &EmptyWorld), Advance::Idle);

    // Audience but paused (initial state)
    let viewer = ViewerId::new();
    let paused = BossBar::named("boss")
        .add_frame(bar(0.5), 1)
        .add_viewer(viewer)
        .build(&mut registry, &mut sink)
        .unwrap();
    assert_eq!(paused.state(), PlaybackState::Paused);
    assert_eq!(paused.advance(&mut sink, &EmptyWorld), Advance::Idle);
    assert!(sink.calls.is_empty());
}

/// it should skip unreachable viewers without aborting the advance
#[test]
fn unreachable_viewer_skipped() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let near = ViewerId::new();
    let gone = ViewerId::new();

    let instance = BossBar::named("boss")
        .add_frame(bar(0.25), 1)
        .add_viewer(near)
        .add_viewer(gone)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    sink.disconnect(gone);
    assert_eq!(
        instance.advance(&mut sink, &EmptyWorld),
        Advance::Applied { viewers: 1 }
    );
    assert_eq!(sink.calls_for(gone).len(), 0);
    assert_eq!(sink.calls_for(near).len(), 1);
    // The viewer stays subscribed; only this advance skipped it.
    assert!(instance.viewers().contains(&gone));
}

/// it should replace a frame in place via update_frame
#[test]
fn update_frame_replaces_payload() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let instance = ActionText::for_viewer(viewer)
        .add_frame("old", 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    instance
        .update_frame(0, FramePayload::Text("new".into()))
        .unwrap();
    instance.advance(&mut sink, &EmptyWorld);
    assert_eq!(sink.texts(), vec!["new"]);

    let err = instance
        .update_frame(5, FramePayload::Text("x".into()))
        .unwrap_err();
    assert_eq!(
        err,
        PresentationError::FrameIndexOutOfRange { index: 5, len: 1 }
    );
}

/// it should fail fast on invalid builder input
#[test]
fn builder_validation() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let err = ActionText::for_viewer(viewer)
        .build(&mut registry, &mut sink)
        .unwrap_err();
    assert_eq!(err, PresentationError::EmptyFrames);

    let err = ActionText::for_viewer(viewer)
        .add_frame("A", 0)
        .build(&mut registry, &mut sink)
        .unwrap_err();
    assert_eq!(err, PresentationError::InvalidRepeat);

    let err = SidebarBoard::named("hud")
        .add_frame(
            vec![BoardLine {
                index: 15,
                text: "overflow".into(),
            }],
            1,
        )
        .build(&mut registry, &mut sink)
        .unwrap_err();
    assert_eq!(
        err,
        PresentationError::LineIndexOutOfRange { index: 15, max: 14 }
    );

    // Nothing half-registered after failed builds
    assert!(registry.is_empty());
}

/// it should carry camera paths through their poses with holds
#[test]
fn camera_path_poses() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let start = Vec3::new(0.0, 80.0, 0.0);
    let end = Vec3::new(10.0, 80.0, 0.0);
    let level = Orientation::new(0.0, 0.0);
    let instance = CameraPath::for_viewer(viewer)
        .add_pose(start, level, 2)
        .add_pose(end, level, 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    assert_eq!(instance.frame_count(), 3);

    for _ in 0..3 {
        instance.advance(&mut sink, &EmptyWorld);
    }
    let teleports: Vec<_> = sink
        .calls
        .iter()
        .filter_map(|call| match call {
            SinkCall::Teleport { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(teleports, vec![start, start, end]);
}

/// it should advance slow instances only on the divisor tick
#[test]
fn dispatcher_cadences() {
    let mut registry_fast = Registry::new();
    let mut registry_slow = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    ActionText::for_viewer(viewer)
        .add_frame("tick", 1)
        .start_playing()
        .build(&mut registry_fast, &mut sink)
        .unwrap();
    SidebarBoard::named("hud")
        .add_frame(
            vec![BoardLine {
                index: 0,
                text: "score".into(),
            }],
            1,
        )
        .add_viewer(viewer)
        .start_playing()
        .build(&mut registry_slow, &mut sink)
        .unwrap();

    let config = Config {
        slow_divisor: 4,
        ..Config::default()
    };
    let mut fast_ticker = TickDispatcher::new(&config).unwrap();
    let mut slow_ticker = TickDispatcher::new(&config).unwrap();
    for _ in 0..4 {
        fast_ticker.tick(&mut registry_fast, &mut sink, &EmptyWorld);
        slow_ticker.tick(&mut registry_slow, &mut sink, &EmptyWorld);
    }

    assert_eq!(sink.texts().len(), 4);
    let board_updates = sink
        .calls
        .iter()
        .filter(|call| matches!(call, SinkCall::BoardLine { .. }))
        .count();
    assert_eq!(board_updates, 1);
}

/// it should deliver notices one tick after they arise
#[test]
fn dispatcher_defers_notices() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    ActionText::for_viewer(viewer)
        .add_frame("A", 1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    let mut ticker = TickDispatcher::new(&Config::default()).unwrap();
    let first = ticker.tick(&mut registry, &mut sink, &EmptyWorld);
    assert_eq!(first.advanced, 1);
    assert!(first.notices.is_empty());

    let second = ticker.tick(&mut registry, &mut sink, &EmptyWorld);
    assert_eq!(second.notices.len(), 1);
}

/// it should reject a zero slow divisor at construction
#[test]
fn dispatcher_validates_config() {
    let config = Config {
        slow_divisor: 0,
        ..Config::default()
    };
    let err = TickDispatcher::new(&config).unwrap_err();
    assert_eq!(err.category(), "validation");
}

/// it should leave a singleton loop untouched when re-registered
#[test]
fn boss_bar_merge_is_noop() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    BossBar::named("raid")
        .add_frame(bar(1.0), 1)
        .add_frame(bar(0.5), 1)
        .add_viewer(viewer)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    let other = ViewerId::new();
    let merged = BossBar::named("raid")
        .add_frame(bar(0.1), 4)
        .add_viewer(other)
        .build(&mut registry, &mut sink)
        .unwrap();
    // Frames unchanged, audience extended
    assert_eq!(merged.frame_count(), 2);
    assert_eq!(merged.viewers().len(), 2);
    assert_eq!(registry.len(), 1);
}
