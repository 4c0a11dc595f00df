use std::collections::HashSet;

use stagecraft_presentation_core::{
    scan_region, Advance, BlockMask, BlockPos, Content, ContentChange, InstanceKey,
    PresentationError, Registry, TargetId, ViewerId, VisibilityMask,
};
use stagecraft_test_fixtures::{MemoryWorld, RecordingSink, SinkCall};

fn scan_set(center: BlockPos, extents: u32, min_distance: u32) -> HashSet<BlockPos> {
    scan_region(center, extents, min_distance).into_iter().collect()
}

/// it should recompute the masked set every tick and restore what left it
#[test]
fn region_mask_diffs_against_previous_tick() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let start = BlockPos::new(0, 64, 0);
    let moved = BlockPos::new(1, 64, 0);
    world.place_viewer(viewer, start);

    let instance = BlockMask::for_viewer(viewer, Content::new("air"))
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    let first = scan_set(start, 5, 2);
    assert_eq!(
        instance.advance(&mut sink, &world),
        Advance::Applied { viewers: 1 }
    );
    assert_eq!(sink.override_count(), first.len());
    assert_eq!(sink.restore_count(), 0);

    // The viewer moves one block; the set is recomputed, not cached.
    world.place_viewer(viewer, moved);
    sink.clear();
    instance.advance(&mut sink, &world);

    let second = scan_set(moved, 5, 2);
    assert_eq!(sink.override_count(), second.len());
    let left_behind: HashSet<_> = first.difference(&second).copied().collect();
    assert_eq!(sink.restore_count(), left_behind.len());
    // Restores land in the same advance as the disappearance, targeting
    // exactly the departed positions.
    for call in &sink.calls {
        if let SinkCall::ContentChange {
            pos,
            change: ContentChange::Restore,
            ..
        } = call
        {
            assert!(left_behind.contains(pos));
        }
    }
}

/// it should restore exactly the last frame on stop when no trail persists
#[test]
fn stop_restores_exactly_last_frame_without_trail() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let start = BlockPos::new(0, 64, 0);
    let moved = BlockPos::new(3, 64, 0);
    world.place_viewer(viewer, start);

    BlockMask::for_viewer(viewer, Content::new("air"))
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    let key = InstanceKey::Viewer(viewer);
    registry.lookup_mut(&key).unwrap().advance(&mut sink, &world);
    world.place_viewer(viewer, moved);
    registry.lookup_mut(&key).unwrap().advance(&mut sink, &world);

    sink.clear();
    assert!(registry.stop(&key, &mut sink).unwrap());
    // last frame only: the trail set is empty for this mask
    assert_eq!(sink.restore_count(), scan_set(moved, 5, 2).len());
    assert!(registry.lookup(&key).is_none());
}

/// it should restore the union of last frame and trail on stop
#[test]
fn stop_restores_union_of_last_frame_and_trail() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let start = BlockPos::new(0, 64, 0);
    let moved = BlockPos::new(3, 64, 0);
    world.place_viewer(viewer, start);

    BlockMask::for_viewer(viewer, Content::new("air"))
        .with_trail()
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    let key = InstanceKey::Viewer(viewer);
    registry.lookup_mut(&key).unwrap().advance(&mut sink, &world);
    world.place_viewer(viewer, moved);
    sink.clear();
    registry.lookup_mut(&key).unwrap().advance(&mut sink, &world);
    // Trail-protected positions are not restored mid-flight
    assert_eq!(sink.restore_count(), 0);

    sink.clear();
    assert!(registry.stop(&key, &mut sink).unwrap());
    let union: HashSet<_> = scan_set(start, 5, 2)
        .union(&scan_set(moved, 5, 2))
        .copied()
        .collect();
    assert_eq!(sink.restore_count(), union.len());
}

/// it should keep the inner hole of the scan untouched
#[test]
fn min_distance_hole_is_excluded() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let center = BlockPos::new(0, 64, 0);
    world.place_viewer(viewer, center);

    let instance = BlockMask::for_viewer(viewer, Content::new("air"))
        .extents(2)
        .min_distance(2)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    instance.advance(&mut sink, &world);

    assert_eq!(sink.override_count(), 5 * 5 * 5 - 27);
    for call in &sink.calls {
        if let SinkCall::ContentChange { pos, .. } = call {
            assert!(center.chebyshev(pos) >= 2);
        }
    }
}

/// it should honor exception rules and union them across registrations
#[test]
fn exception_rules_union_on_merge() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let center = BlockPos::new(0, 64, 0);
    world.place_viewer(viewer, center);
    let bedrock_at = BlockPos::new(2, 64, 0);
    let obsidian_at = BlockPos::new(0, 66, 0);
    world.set_content(bedrock_at, Content::new("bedrock"));
    world.set_content(obsidian_at, Content::new("obsidian"));

    BlockMask::for_viewer(viewer, Content::new("air"))
        .extents(3)
        .min_distance(0)
        .except(Content::new("bedrock"))
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();

    // Second registration merges its exception into the live mask.
    let merged = BlockMask::for_viewer(viewer, Content::new("air"))
        .except(Content::new("obsidian"))
        .build(&mut registry, &mut sink)
        .unwrap();

    merged.advance(&mut sink, &world);
    assert_eq!(registry.len(), 1);
    assert_eq!(sink.override_count(), 7 * 7 * 7 - 2);
    for call in &sink.calls {
        if let SinkCall::ContentChange { pos, .. } = call {
            assert_ne!(*pos, bedrock_at);
            assert_ne!(*pos, obsidian_at);
        }
    }
}

/// it should restrict masking to matching content when rules are given
#[test]
fn match_rules_filter_real_content() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let center = BlockPos::new(0, 64, 0);
    world.place_viewer(viewer, center);
    let ore_a = BlockPos::new(1, 64, 0);
    let ore_b = BlockPos::new(0, 65, 1);
    world.set_content(ore_a, Content::new("gold_ore"));
    world.set_content(ore_b, Content::new("gold_ore"));

    let instance = BlockMask::for_viewer(viewer, Content::new("stone"))
        .extents(2)
        .min_distance(0)
        .matching(Content::new("gold_ore"))
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    instance.advance(&mut sink, &world);

    // Only the two ore positions are overridden
    assert_eq!(sink.override_count(), 2);
}

/// it should restore stale overrides on pause since no advance will refresh them
#[test]
fn pause_restores_computed_overrides() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let center = BlockPos::new(0, 64, 0);
    world.place_viewer(viewer, center);

    let instance = BlockMask::for_viewer(viewer, Content::new("air"))
        .extents(2)
        .min_distance(1)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    instance.advance(&mut sink, &world);
    let shown = sink.override_count();
    assert!(shown > 0);

    sink.clear();
    assert!(instance.pause(&mut sink).unwrap());
    assert_eq!(sink.restore_count(), shown);
    assert_eq!(instance.advance(&mut sink, &world), Advance::Idle);
}

/// it should reject invalid scan regions at build time
#[test]
fn region_validation_fails_fast() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    let err = BlockMask::for_viewer(viewer, Content::new("air"))
        .extents(0)
        .build(&mut registry, &mut sink)
        .unwrap_err();
    assert_eq!(
        err,
        PresentationError::InvalidRegion {
            extents: 0,
            min_distance: 2
        }
    );

    let err = BlockMask::for_viewer(viewer, Content::new("air"))
        .extents(3)
        .min_distance(4)
        .build(&mut registry, &mut sink)
        .unwrap_err();
    assert_eq!(
        err,
        PresentationError::InvalidRegion {
            extents: 3,
            min_distance: 4
        }
    );
    assert!(registry.is_empty());
}

/// it should hide unioned targets each tick and reveal them on stop
#[test]
fn visibility_mask_union_and_stop() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let world = MemoryWorld::default();
    let viewer = ViewerId::new();

    VisibilityMask::for_viewer(viewer)
        .hide(TargetId(1))
        .hide(TargetId(2))
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    let merged = VisibilityMask::for_viewer(viewer)
        .hide(TargetId(3))
        .build(&mut registry, &mut sink)
        .unwrap();

    merged.advance(&mut sink, &world);
    assert_eq!(registry.len(), 1);
    let hidden: HashSet<_> = sink
        .calls
        .iter()
        .filter_map(|call| match call {
            SinkCall::Visibility {
                target,
                visible: false,
                ..
            } => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(
        hidden,
        HashSet::from([TargetId(1), TargetId(2), TargetId(3)])
    );

    sink.clear();
    let key = InstanceKey::Viewer(viewer);
    assert!(registry.stop(&key, &mut sink).unwrap());
    let revealed: HashSet<_> = sink
        .calls
        .iter()
        .filter_map(|call| match call {
            SinkCall::Visibility {
                target,
                visible: true,
                ..
            } => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(revealed, hidden);
}

/// it should restore a leaving viewer's overrides on remove
#[test]
fn remove_viewer_restores_overrides() {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let mut world = MemoryWorld::default();
    let viewer = ViewerId::new();

    let center = BlockPos::new(0, 64, 0);
    world.place_viewer(viewer, center);

    let instance = BlockMask::for_viewer(viewer, Content::new("air"))
        .extents(1)
        .min_distance(0)
        .start_playing()
        .build(&mut registry, &mut sink)
        .unwrap();
    instance.advance(&mut sink, &world);
    assert_eq!(sink.override_count(), 27);

    sink.clear();
    assert!(instance.remove_viewer(viewer, &mut sink).unwrap());
    assert_eq!(sink.restore_count(), 27);
    assert!(instance.viewers().is_empty());
}
