use alphablock_core::layout::PLACEMENTS;
use alphablock_core::{
    Bounds, Draggable, HitTarget, PointerKind, Position, Size, Viewport, WidgetId, WidgetLayout,
    WidgetVisibility,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn desktop() -> Viewport {
    Viewport::new(1280.0, 800.0)
}

#[test]
fn every_move_respects_bounds() {
    let bounds = Bounds {
        top: Some(70.0),
        right: Some(1270.0),
        bottom: Some(780.0),
        left: Some(10.0),
    };
    let size = Size::new(320.0, 240.0);
    let mut rng = StdRng::seed_from_u64(0xA1B);

    for _ in 0..200 {
        let mut d = Draggable::new(Position::new(500.0, 300.0), bounds);
        d.set_measured_size(Some(size));
        let start = Position::new(rng.random_range(0.0..1280.0), rng.random_range(0.0..800.0));
        assert!(d.pointer_down(start, HitTarget::Handle));

        for _ in 0..20 {
            let p = Position::new(
                rng.random_range(-2000.0..3000.0),
                rng.random_range(-2000.0..3000.0),
            );
            let pos = d.pointer_move(p).expect("drag is active");
            assert!(pos.x >= 10.0, "{pos:?}");
            assert!(pos.x + size.width <= 1270.0, "{pos:?}");
            assert!(pos.y >= 70.0, "{pos:?}");
            assert!(pos.y + size.height <= 780.0, "{pos:?}");
        }
    }
}

#[test]
fn zero_delta_move_keeps_position() {
    let mut d = Draggable::new(Position::new(20.0, 80.0), Bounds::NONE);
    d.pointer_down(Position::new(100.0, 100.0), HitTarget::Handle);
    d.pointer_move(Position::new(100.0, 100.0));
    assert_eq!(d.position(), Position::new(20.0, 80.0));
}

#[test]
fn drag_delta_is_relative() {
    let mut d = Draggable::new(Position::new(20.0, 80.0), Bounds::NONE);
    d.pointer_down(Position::new(100.0, 100.0), HitTarget::Handle);
    d.pointer_move(Position::new(140.0, 130.0));
    assert_eq!(d.position(), Position::new(60.0, 110.0));
}

#[test]
fn content_press_never_drags() {
    let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
    let before = layout.position(WidgetId::Metrics);
    let hit = Some((WidgetId::Metrics, HitTarget::Content));
    assert!(layout
        .dispatch(PointerKind::Down, Position::new(960.0, 150.0), hit)
        .is_none());
    layout.dispatch(PointerKind::Move, Position::new(100.0, 500.0), None);
    assert_eq!(layout.position(WidgetId::Metrics), before);
    assert_eq!(layout.capture(), None);
}

#[test]
fn release_anywhere_ends_drag() {
    let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
    let hit = Some((WidgetId::Tasks, HitTarget::Handle));
    layout.dispatch(PointerKind::Down, Position::new(40.0, 330.0), hit);

    // Moves far outside the panel still reach it.
    layout.dispatch(PointerKind::Move, Position::new(240.0, 430.0), None);
    assert_eq!(layout.position(WidgetId::Tasks), Some(Position::new(220.0, 420.0)));

    layout.dispatch(PointerKind::Up, Position::new(5000.0, 5000.0), None);
    assert_eq!(layout.capture(), None);

    layout.dispatch(PointerKind::Move, Position::new(600.0, 600.0), None);
    assert_eq!(layout.position(WidgetId::Tasks), Some(Position::new(220.0, 420.0)));
}

#[test]
fn dragging_one_panel_leaves_others_alone() {
    let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
    let metrics = layout.position(WidgetId::Metrics);
    let minimap = layout.position(WidgetId::Minimap);

    layout.dispatch(
        PointerKind::Down,
        Position::new(40.0, 330.0),
        Some((WidgetId::Tasks, HitTarget::Handle)),
    );
    layout.dispatch(PointerKind::Move, Position::new(400.0, 500.0), None);
    layout.dispatch(PointerKind::Up, Position::new(400.0, 500.0), None);

    assert_eq!(layout.position(WidgetId::Metrics), metrics);
    assert_eq!(layout.position(WidgetId::Minimap), minimap);
}

#[test]
fn toggle_only_touches_its_own_flag() {
    let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
    let before = layout.visibility();
    let mut seen = Vec::new();
    layout.toggle(WidgetId::Tasks, &mut seen);
    let after = layout.visibility();

    assert!(!after.tasks);
    for id in [WidgetId::Metrics, WidgetId::Activity, WidgetId::Graph, WidgetId::Minimap] {
        assert_eq!(before.get(id), after.get(id), "{id:?}");
    }
    assert_eq!(seen, vec![(WidgetId::Tasks, false)]);
}

#[test]
fn remount_resets_to_initial_position() {
    let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
    let initial = PLACEMENTS[WidgetId::Tasks as usize].initial_position(desktop());
    assert_eq!(layout.position(WidgetId::Tasks), Some(initial));

    layout.dispatch(
        PointerKind::Down,
        Position::new(40.0, 330.0),
        Some((WidgetId::Tasks, HitTarget::Handle)),
    );
    layout.dispatch(PointerKind::Move, Position::new(300.0, 400.0), None);
    layout.dispatch(PointerKind::Up, Position::new(300.0, 400.0), None);
    assert_ne!(layout.position(WidgetId::Tasks), Some(initial));

    let mut seen = Vec::new();
    layout.toggle(WidgetId::Tasks, &mut seen);
    assert_eq!(layout.position(WidgetId::Tasks), None);
    layout.toggle(WidgetId::Tasks, &mut seen);
    assert_eq!(layout.position(WidgetId::Tasks), Some(initial));
    assert_eq!(seen, vec![(WidgetId::Tasks, false), (WidgetId::Tasks, true)]);
}

#[test]
fn right_bound_subtracts_panel_width() {
    let bounds = Bounds {
        right: Some(800.0),
        ..Bounds::NONE
    };
    let mut d = Draggable::new(Position::new(750.0, 100.0), bounds);
    d.set_measured_size(Some(Size::new(320.0, 200.0)));
    d.pointer_down(Position::new(760.0, 110.0), HitTarget::Handle);
    d.pointer_move(Position::new(900.0, 110.0));
    assert_eq!(d.position().x, 480.0);
}

#[test]
fn hiding_mid_drag_releases_capture() {
    let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
    layout.dispatch(
        PointerKind::Down,
        Position::new(960.0, 90.0),
        Some((WidgetId::Metrics, HitTarget::Handle)),
    );
    assert_eq!(layout.capture(), Some(WidgetId::Metrics));

    let mut seen = Vec::new();
    layout.toggle(WidgetId::Metrics, &mut seen);
    assert_eq!(layout.capture(), None);
    assert!(layout
        .dispatch(PointerKind::Move, Position::new(0.0, 0.0), None)
        .is_none());
}

#[test]
fn lost_focus_cancels_drag() {
    let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
    layout.dispatch(
        PointerKind::Down,
        Position::new(960.0, 90.0),
        Some((WidgetId::Metrics, HitTarget::Handle)),
    );
    layout.dispatch(PointerKind::Cancel, Position::new(960.0, 90.0), None);
    assert_eq!(layout.capture(), None);
    assert!(!layout.draggable(WidgetId::Metrics).unwrap().is_dragging());
}
