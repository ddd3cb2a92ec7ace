#![forbid(unsafe_code)]

//! End-to-end layout scenarios driven through the public API.

use std::cell::Cell;
use std::rc::Rc;

use flexgrid_layout::{
    Alignment, BorderSide, Bounds, EntityConstraints, EntityHandle, FlexGridLayout, HideMode,
    Insets, LayoutConstraints, LayoutSize, SizeConstraint,
};

fn aligned(h: Alignment, v: Alignment) -> EntityConstraints {
    let mut c = EntityConstraints::new();
    c.set_align(h, v);
    c
}

fn docked(side: BorderSide) -> EntityConstraints {
    let mut c = EntityConstraints::new();
    c.set_border_side(side);
    c
}

fn fill_grow() -> EntityConstraints {
    let mut c = aligned(Alignment::Fill, Alignment::Fill);
    c.set_grow_x(100.0).set_grow_y(100.0);
    c
}

// ============================================================================
// Grid placement
// ============================================================================

#[test]
fn wrapped_grid_starts_at_insets() {
    let mut layout = FlexGridLayout::new();
    layout.set_wrap(Some(3)).set_gap(0.0, 0.0).set_insets(20.0);
    let handles: Vec<_> = (0..3).map(|_| EntityHandle::new(80.0, 25.0)).collect();
    for h in &handles {
        layout.add_entity(h, aligned(Alignment::Center, Alignment::Center));
    }

    layout.perform_layout(LayoutConstraints::bounded(400.0, 300.0));

    assert_eq!(handles[0].bounds(), Bounds::new(20.0, 20.0, 80.0, 25.0));
    assert_eq!(handles[1].x(), 100.0);
    assert_eq!(handles[2].x(), 180.0);
}

#[test]
fn column_width_is_widest_single_span_member() {
    let mut layout = FlexGridLayout::new();
    layout.set_wrap(Some(2));
    let sizes = [(30.0, 10.0), (50.0, 10.0), (70.0, 10.0), (20.0, 10.0)];
    let handles: Vec<_> = sizes
        .iter()
        .map(|&(w, h)| EntityHandle::new(w, h))
        .collect();
    for h in &handles {
        layout.add_entity(h, None);
    }
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(layout.column_widths(), &[70.0, 50.0]);
    assert_eq!(layout.row_heights(), &[10.0, 10.0]);
}

#[test]
fn spanning_entity_shares_width_across_columns() {
    let mut layout = FlexGridLayout::new();
    layout.set_wrap(Some(2)).set_gap(0.0, 0.0);
    let wide = EntityHandle::new(100.0, 10.0);
    let mut span = EntityConstraints::new();
    span.set_span_x(2);
    layout.add_entity(&wide, span);
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(layout.column_widths(), &[50.0, 50.0]);
    assert_eq!(wide.width(), 100.0);
}

#[test]
fn growth_goes_to_weighted_columns_only() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(10.0, 10.0);
    let fixed = EntityHandle::new(50.0, 20.0);
    let grow = EntityHandle::new(50.0, 20.0);
    let mut growing = EntityConstraints::new();
    growing.set_grow_x(1.0);
    layout.add_entity(&fixed, None).add_entity(&grow, growing);

    layout.perform_layout(LayoutConstraints::bounded(310.0, 100.0));

    assert_eq!(layout.column_widths(), &[50.0, 250.0]);
    assert_eq!(grow.width(), 250.0);
    assert_eq!(grow.x(), 60.0);
}

#[test]
fn grow_respects_max_constraint() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(0.0, 0.0);
    let e = EntityHandle::new(50.0, 20.0);
    let mut c = aligned(Alignment::Start, Alignment::Start);
    c.set_grow_x(1.0)
        .set_max_width(SizeConstraint::fixed(120.0));
    layout.add_entity(&e, c);
    layout.perform_layout(LayoutConstraints::bounded(300.0, 100.0));
    assert_eq!(layout.column_widths(), &[300.0]);
    assert_eq!(e.width(), 120.0);
}

#[test]
fn cell_alignment_offsets() {
    let mut layout = FlexGridLayout::new();
    layout.set_wrap(Some(1)).set_gap(0.0, 0.0);
    let wide = EntityHandle::new(100.0, 10.0);
    let start = EntityHandle::new(40.0, 10.0);
    let center = EntityHandle::new(40.0, 10.0);
    let end = EntityHandle::new(40.0, 10.0);
    let fill = EntityHandle::new(40.0, 10.0);
    layout
        .add_entity(&wide, None)
        .add_entity(&start, aligned(Alignment::Start, Alignment::Start))
        .add_entity(&center, aligned(Alignment::Center, Alignment::Start))
        .add_entity(&end, aligned(Alignment::End, Alignment::Start))
        .add_entity(&fill, aligned(Alignment::Fill, Alignment::Start));
    layout.perform_layout(LayoutConstraints::UNBOUNDED);

    assert_eq!(start.x(), 0.0);
    assert_eq!(center.x(), 30.0);
    assert_eq!(end.x(), 60.0);
    assert_eq!((fill.x(), fill.width()), (0.0, 100.0));
}

// ============================================================================
// Docking
// ============================================================================

#[test]
fn top_band_stretches_and_pushes_grid_down() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(0.0, 0.0).set_insets(10.0);
    let top = EntityHandle::new(100.0, 30.0);
    let center = EntityHandle::new(50.0, 50.0);
    let mut top_c = docked(BorderSide::Top);
    top_c.set_horizontal_align(Alignment::Fill);
    layout.add_entity(&top, top_c).add_entity(&center, fill_grow());

    let total = layout.perform_layout(LayoutConstraints::bounded(300.0, 200.0));

    assert_eq!(top.bounds(), Bounds::new(10.0, 10.0, 280.0, 30.0));
    assert_eq!(center.bounds(), Bounds::new(10.0, 40.0, 280.0, 150.0));
    assert_eq!(total, LayoutSize::new(300.0, 200.0));
}

#[test]
fn left_band_stacks_and_offsets_grid() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(5.0, 5.0).set_insets(10.0);
    let first = EntityHandle::new(50.0, 50.0);
    let second = EntityHandle::new(50.0, 50.0);
    let center = EntityHandle::new(60.0, 60.0);
    layout
        .add_entity(&first, docked(BorderSide::Left))
        .add_entity(&second, docked(BorderSide::Left))
        .add_entity(&center, fill_grow());

    layout.perform_layout(LayoutConstraints::bounded(400.0, 300.0));

    assert_eq!((first.x(), first.y()), (10.0, 10.0));
    assert_eq!((second.x(), second.y()), (10.0, 65.0));
    assert_eq!((center.x(), center.y()), (65.0, 10.0));
    assert_eq!(center.width(), 400.0 - 20.0 - 55.0);
}

#[test]
fn right_and_bottom_bands_follow_the_grid() {
    let mut layout = FlexGridLayout::new();
    layout.set_insets(10.0);
    let center = EntityHandle::new(100.0, 80.0);
    let right = EntityHandle::new(40.0, 40.0);
    let bottom = EntityHandle::new(60.0, 20.0);
    layout
        .add_entity(&center, None)
        .add_entity(&right, docked(BorderSide::Right))
        .add_entity(&bottom, docked(BorderSide::Bottom));

    layout.perform_layout(LayoutConstraints::UNBOUNDED);

    assert_eq!(center.bounds(), Bounds::new(10.0, 10.0, 100.0, 80.0));
    assert_eq!((right.x(), right.y()), (115.0, 10.0));
    assert_eq!((bottom.x(), bottom.y()), (10.0, 95.0));
    assert!(right.x() > center.x());
    assert!(bottom.y() > center.y());
}

// ============================================================================
// Groups
// ============================================================================

#[test]
fn size_group_shares_largest_size() {
    let mut layout = FlexGridLayout::new();
    let widths = [40.0, 80.0, 60.0];
    let buttons: Vec<_> = widths
        .iter()
        .map(|&w| EntityHandle::new(w, 20.0))
        .collect();
    for b in &buttons {
        let mut c = EntityConstraints::new();
        c.set_size_group("buttons");
        layout.add_entity(b, c);
    }
    layout.perform_layout(LayoutConstraints::bounded(400.0, 100.0));

    for info in layout.entities() {
        assert_eq!(info.calculated_size(), LayoutSize::new(80.0, 20.0));
    }
    for b in &buttons {
        assert_eq!(b.width(), 80.0);
    }
}

#[test]
fn size_group_via_api() {
    let mut layout = FlexGridLayout::new();
    let a = EntityHandle::new(10.0, 30.0);
    let b = EntityHandle::new(25.0, 5.0);
    layout.add_entity(&a, None).add_entity(&b, None);
    layout.add_to_size_group(&a, "g");
    layout.add_to_size_group(&b, "g");
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(a.bounds().size(), LayoutSize::new(25.0, 30.0));
    assert_eq!(b.bounds().size(), LayoutSize::new(25.0, 30.0));

    layout.remove_from_size_group(&b, "g");
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(b.bounds().size(), LayoutSize::new(25.0, 5.0));
}

#[test]
fn end_group_aligns_right_edges() {
    let mut layout = FlexGridLayout::new();
    layout.set_wrap(Some(1));
    let short = EntityHandle::new(30.0, 10.0);
    let long = EntityHandle::new(90.0, 10.0);
    for (h, w) in [(&short, 30.0), (&long, 90.0)] {
        let mut c = aligned(Alignment::Start, Alignment::Start);
        c.set_end_group("edge");
        layout.add_entity(h, c);
        assert_eq!(h.preferred_size().width, w);
    }
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(short.bounds().right(), 90.0);
    assert_eq!(long.bounds().right(), 90.0);
    assert_eq!(short.x(), 60.0);
    assert_eq!(short.y(), 0.0);
}

#[test]
fn end_group_leaves_vertical_placement_alone() {
    let mut layout = FlexGridLayout::new();
    let short = EntityHandle::new(30.0, 10.0);
    let tall = EntityHandle::new(50.0, 40.0);
    let mut c = aligned(Alignment::Start, Alignment::Center);
    c.set_end_group("edge");
    layout.add_entity(&short, c);
    let mut c = aligned(Alignment::Start, Alignment::Start);
    c.set_end_group("edge");
    layout.add_entity(&tall, c);

    layout.perform_layout(LayoutConstraints::UNBOUNDED);

    assert_eq!(layout.row_heights(), &[40.0]);
    assert_eq!(short.bounds().right(), tall.bounds().right());
    // Centred in the 40-high row, untouched by the group.
    assert_eq!((short.y(), short.height()), (15.0, 10.0));
    assert_eq!((tall.y(), tall.height()), (0.0, 40.0));
}

#[test]
fn component_id_lookup() {
    let mut layout = FlexGridLayout::new();
    let a = EntityHandle::named("ok", 10.0, 10.0);
    let mut c = EntityConstraints::new();
    c.set_component_id("okButton");
    layout.add_entity(&a, c);
    let found = layout.get_entity_by_id("okButton");
    assert!(found.is_some_and(|e| e.ptr_eq(&a)));
    assert!(layout.get_entity_by_id("cancel").is_none());
}

fn with_id(id: &str) -> EntityConstraints {
    let mut c = EntityConstraints::new();
    c.set_component_id(id);
    c
}

#[test]
fn duplicate_id_moves_to_the_newest_entity() {
    let mut layout = FlexGridLayout::new();
    let a = EntityHandle::new(10.0, 10.0);
    let b = EntityHandle::new(10.0, 10.0);
    layout.add_entity(&a, with_id("x"));
    layout.add_entity(&b, with_id("x"));

    assert!(layout.get_entity_by_id("x").is_some_and(|e| e.ptr_eq(&b)));
    assert_eq!(layout.entity_constraints(&a).unwrap().component_id(), None);
    assert_eq!(layout.entity_constraints(&b).unwrap().component_id(), Some("x"));

    layout.remove_entity(&b);
    assert!(layout.get_entity_by_id("x").is_none());
    assert_eq!(layout.entity_constraints(&a).unwrap().component_id(), None);
}

#[test]
fn set_entity_id_takes_the_id_from_its_holder() {
    let mut layout = FlexGridLayout::new();
    let a = EntityHandle::new(10.0, 10.0);
    let b = EntityHandle::new(10.0, 10.0);
    layout.add_entity(&a, with_id("x"));
    layout.add_entity(&b, with_id("y"));

    layout.set_entity_id(&b, "x");
    assert!(layout.get_entity_by_id("x").is_some_and(|e| e.ptr_eq(&b)));
    assert!(layout.get_entity_by_id("y").is_none());
    assert_eq!(layout.entity_constraints(&a).unwrap().component_id(), None);

    // A later rename of `a` must not unregister `b`.
    layout.set_entity_id(&a, "z");
    assert!(layout.get_entity_by_id("x").is_some_and(|e| e.ptr_eq(&b)));
    assert!(layout.get_entity_by_id("z").is_some_and(|e| e.ptr_eq(&a)));

    layout.set_entity_id(&b, "");
    assert!(layout.get_entity_by_id("x").is_none());
    assert!(layout.get_entity_by_id("z").is_some_and(|e| e.ptr_eq(&a)));
}

#[test]
fn replacing_constraints_keeps_an_id_it_lost() {
    let mut layout = FlexGridLayout::new();
    let a = EntityHandle::new(10.0, 10.0);
    let b = EntityHandle::new(10.0, 10.0);
    layout.add_entity(&a, with_id("x"));
    layout.add_entity(&b, with_id("x"));

    // `a` re-asserting the id through its constraints wins it back.
    layout.set_entity_constraints(&a, with_id("x"));
    assert!(layout.get_entity_by_id("x").is_some_and(|e| e.ptr_eq(&a)));
    assert_eq!(layout.entity_constraints(&b).unwrap().component_id(), None);

    layout.remove_entity(&a);
    assert!(layout.get_entity_by_id("x").is_none());
}

// ============================================================================
// Participation
// ============================================================================

#[test]
fn invisible_entity_keeps_space_by_default() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(0.0, 0.0);
    let hidden = EntityHandle::new(40.0, 10.0);
    let shown = EntityHandle::new(40.0, 10.0);
    hidden.set_visible(false);
    layout.add_entity(&hidden, None).add_entity(&shown, None);
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(shown.x(), 40.0);
}

#[test]
fn exclude_hide_mode_drops_invisible_entities() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(0.0, 0.0);
    let hidden = EntityHandle::new(40.0, 10.0);
    let shown = EntityHandle::new(40.0, 10.0);
    hidden.set_visible(false);
    let mut exclude = EntityConstraints::new();
    exclude.set_hide_mode(HideMode::Exclude);
    layout.add_entity(&hidden, exclude).add_entity(&shown, None);
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(shown.x(), 0.0);
    assert!(!layout.entities()[0].participates());
    assert_eq!(layout.entities()[0].grid_position(), None);
}

#[test]
fn container_hide_mode_is_the_fallback() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(0.0, 0.0).set_hide_mode(HideMode::Exclude);
    let hidden = EntityHandle::new(40.0, 10.0);
    let shown = EntityHandle::new(40.0, 10.0);
    hidden.set_visible(false);
    layout.add_entity(&hidden, None).add_entity(&shown, None);
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(shown.x(), 0.0);

    hidden.set_visible(true);
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(shown.x(), 40.0);
}

// ============================================================================
// Host boundary
// ============================================================================

#[test]
fn callbacks_receive_final_geometry() {
    let mut layout = FlexGridLayout::new();
    layout.set_insets(Insets::new(3.0, 7.0, 0.0, 0.0));
    let e = EntityHandle::new(20.0, 10.0);
    let last = Rc::new(Cell::new(Bounds::default()));
    {
        let last = Rc::clone(&last);
        e.set_update_callback(move |x, y, w, h| last.set(Bounds::new(x, y, w, h)));
    }
    layout.add_entity(&e, None);
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(last.get(), Bounds::new(7.0, 3.0, 20.0, 10.0));
}

#[test]
fn dropped_entities_disappear_from_the_pass() {
    let mut layout = FlexGridLayout::new();
    layout.set_gap(0.0, 0.0);
    let keep = EntityHandle::new(30.0, 10.0);
    {
        let temp = EntityHandle::new(50.0, 10.0);
        layout.add_entity(&temp, None).add_entity(&keep, None);
        layout.perform_layout(LayoutConstraints::UNBOUNDED);
        assert_eq!(keep.x(), 50.0);
    }
    layout.perform_layout(LayoutConstraints::UNBOUNDED);
    assert_eq!(layout.len(), 1);
    assert_eq!(keep.x(), 0.0);
}

#[test]
fn repeated_passes_are_identical() {
    let mut layout = FlexGridLayout::new();
    layout.set_wrap(Some(2)).set_insets(4.0).set_fill(true, true);
    let handles: Vec<_> = (1..=5)
        .map(|i| EntityHandle::new(10.0 * i as f32, 7.0 * i as f32))
        .collect();
    for (i, h) in handles.iter().enumerate() {
        let mut c = EntityConstraints::new();
        if i % 2 == 0 {
            c.set_grow_x(1.0);
        }
        layout.add_entity(h, c);
    }
    let available = LayoutConstraints::bounded(500.0, 400.0);
    let first_total = layout.perform_layout(available);
    let first: Vec<_> = handles.iter().map(EntityHandle::bounds).collect();
    let second_total = layout.perform_layout(available);
    let second: Vec<_> = handles.iter().map(EntityHandle::bounds).collect();
    assert_eq!(first_total, second_total);
    assert_eq!(first, second);
}
