#![forbid(unsafe_code)]

//! Layouts built from constraint strings, end to end.

use flexgrid_dsl::{
    ConstraintCache, ConstraintParseError, parse_entity_constraints, parse_entity_constraints_string,
    parse_layout_constraints,
};
use flexgrid_layout::{
    Bounds, EntityConstraints, EntityHandle, FlexGridLayout, LayoutConstraints, LayoutSize,
};

fn add(layout: &mut FlexGridLayout, w: f32, h: f32, constraints: &str) -> EntityHandle {
    let handle = EntityHandle::new(w, h);
    let parsed = parse_entity_constraints(constraints).expect("valid entity constraints");
    layout.add_entity(&handle, parsed);
    handle
}

// ============================================================================
// Strict grammar
// ============================================================================

#[test]
fn wrapped_row_from_strings() {
    let mut layout = parse_layout_constraints("wrap 3, gap 0, insets 20").unwrap();
    let handles: Vec<_> = (0..3)
        .map(|_| add(&mut layout, 80.0, 25.0, "alignx center, aligny center"))
        .collect();

    layout.perform_layout(LayoutConstraints::bounded(400.0, 300.0));

    assert_eq!(handles[0].bounds(), Bounds::new(20.0, 20.0, 80.0, 25.0));
    assert_eq!(handles[1].x(), 100.0);
    assert_eq!(handles[2].x(), 180.0);
    assert_eq!(layout.grid_size(), (3, 1));
}

#[test]
fn size_group_from_strings() {
    let mut layout = parse_layout_constraints("").unwrap();
    let buttons: Vec<_> = [40.0, 80.0, 60.0]
        .into_iter()
        .map(|w| add(&mut layout, w, 20.0, "sg buttons"))
        .collect();

    layout.perform_layout(LayoutConstraints::bounded(400.0, 100.0));

    for info in layout.entities() {
        assert_eq!(info.calculated_size(), LayoutSize::new(80.0, 20.0));
    }
    assert_eq!(layout.size_group_members("buttons").len(), 3);
    assert!(buttons.iter().all(|b| b.width() == 80.0));
}

#[test]
fn docked_header_from_strings() {
    let mut layout = parse_layout_constraints("gap 0, insets 10").unwrap();
    let top = add(&mut layout, 100.0, 30.0, "dock north, alignx fill");
    let center = add(&mut layout, 50.0, 50.0, "grow, fill");

    layout.perform_layout(LayoutConstraints::bounded(300.0, 200.0));

    assert_eq!(top.bounds(), Bounds::new(10.0, 10.0, 280.0, 30.0));
    assert_eq!(center.y(), 10.0 + top.height());
    assert_eq!(center.bounds(), Bounds::new(10.0, 40.0, 280.0, 150.0));
}

#[test]
fn form_dialog_from_strings() {
    let mut layout = parse_layout_constraints("wrap 3, gap 5, insets 10, fill").unwrap();
    let name_label = add(&mut layout, 60.0, 20.0, "left, top");
    let name_field = add(&mut layout, 100.0, 20.0, "growx, alignx fill, aligny top");
    let ok = add(&mut layout, 50.0, 20.0, "sg buttons, id ok");
    let mail_label = add(&mut layout, 40.0, 20.0, "left, top");
    let _mail_field = add(&mut layout, 100.0, 20.0, "growx, alignx fill");
    let cancel = add(&mut layout, 70.0, 20.0, "sg buttons, id cancel");

    layout.perform_layout(LayoutConstraints::bounded(400.0, 200.0));

    assert_eq!(layout.grid_size(), (3, 2));
    assert_eq!((name_label.x(), name_label.y()), (10.0, 10.0));
    // 380 wide minus 60 + 70 + two gaps of 5 leaves 240 for the growing column.
    assert_eq!(layout.column_widths(), &[60.0, 240.0, 70.0]);
    assert_eq!((name_field.x(), name_field.width()), (75.0, 240.0));
    assert_eq!((ok.x(), ok.width()), (320.0, 70.0));
    assert_eq!(cancel.bounds().right(), 390.0);
    // Fill without row weights splits the leftover height evenly.
    assert_eq!(layout.row_heights(), &[87.5, 87.5]);
    assert_eq!(mail_label.y(), 102.5);

    let found = layout.get_entity_by_id("ok");
    assert!(found.is_some_and(|e| e.ptr_eq(&ok)));
}

#[test]
fn absolute_entity_keeps_its_rectangle() {
    let mut layout = parse_layout_constraints("insets 10").unwrap();
    let grid = add(&mut layout, 30.0, 30.0, "left, top");
    let overlay = add(&mut layout, 5.0, 5.0, "pos 50 60 90 80");

    layout.perform_layout(LayoutConstraints::UNBOUNDED);

    assert_eq!(overlay.bounds(), Bounds::new(50.0, 60.0, 40.0, 20.0));
    assert_eq!((grid.x(), grid.y()), (10.0, 10.0));
    assert_eq!(layout.grid_size(), (1, 1));
}

#[test]
fn malformed_strings_are_rejected() {
    let cases: [(&str, fn(&str) -> Result<(), ConstraintParseError>); 3] = [
        ("badconstraint", |s| parse_layout_constraints(s).map(drop)),
        ("width abc", |s| parse_entity_constraints(s).map(drop)),
        ("gap", |s| parse_layout_constraints(s).map(drop)),
    ];
    for (text, parse) in cases {
        let err = parse(text).expect_err(text);
        assert!(!err.message.is_empty());
        assert!(err.to_string().starts_with("constraint parse error: "));
    }
}

// ============================================================================
// Lenient grammar and cache
// ============================================================================

#[test]
fn cached_entity_parse_matches_uncached() {
    let text = "width 10:20:30, growx 2, span 2, dock south, margin 1 2 3 4, id name";
    let mut expected = EntityConstraints::new();
    parse_entity_constraints_string(&mut expected, text);

    let mut cache = ConstraintCache::new();
    assert_eq!(cache.parse_entity_constraints_with_cache(text), expected);
    assert_eq!(cache.parse_entity_constraints_with_cache(text), expected);
    assert_eq!(cache.stats().entity.hits, 1);
}

#[test]
fn cached_container_drives_a_layout() {
    let mut cache = ConstraintCache::new();
    let mut layout = FlexGridLayout::new();
    cache.parse_container_configuration_with_cache(&mut layout, "wrap 2, gap 0, insets 5");
    let a = EntityHandle::new(10.0, 10.0);
    let b = EntityHandle::new(10.0, 10.0);
    let c = EntityHandle::new(10.0, 10.0);
    for (handle, text) in [(&a, "align left top"), (&b, "align left top"), (&c, "align left top")] {
        let constraints = cache.parse_entity_constraints_with_cache(text);
        layout.add_entity(handle, constraints);
    }

    layout.perform_layout(LayoutConstraints::UNBOUNDED);

    assert_eq!((a.x(), a.y()), (5.0, 5.0));
    assert_eq!((b.x(), b.y()), (15.0, 5.0));
    assert_eq!((c.x(), c.y()), (5.0, 15.0));
    let stats = cache.stats();
    assert_eq!((stats.entity.hits, stats.entity.misses), (2, 1));
    assert_eq!((stats.container.misses, stats.container.entries), (1, 1));
    assert_eq!(cache.len(), 2);
}
