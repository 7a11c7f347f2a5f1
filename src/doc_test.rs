#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use uuid::Uuid;

use super::*;

fn make_rect(x: f64, y: f64, width: f64, height: f64) -> Shape {
    Shape {
        id: Uuid::new_v4(),
        x,
        y,
        rotation: 0.0,
        style: Style { fill: Some("#fa5252".into()), ..Style::default() },
        geometry: Geometry::Rectangle {
            width,
            height,
            corner_radius: 5.0,
            scale_x: Sign::Positive,
            scale_y: Sign::Positive,
        },
    }
}

fn make_circle(x: f64, y: f64, radius: f64) -> Shape {
    Shape {
        id: Uuid::new_v4(),
        x,
        y,
        rotation: 0.0,
        style: Style::default(),
        geometry: Geometry::Circle { radius },
    }
}

fn store_of(n: usize) -> (ShapeStore, Vec<ShapeId>) {
    let mut store = ShapeStore::new();
    let mut ids = Vec::new();
    for i in 0..n {
        let shape = make_circle(i as f64, 0.0, 10.0);
        ids.push(shape.id);
        assert!(store.append(shape));
    }
    (store, ids)
}

fn ids_of(store: &ShapeStore) -> Vec<ShapeId> {
    store.iter().map(|s| s.id).collect()
}

// =============================================================
// ShapeType / Geometry
// =============================================================

#[test]
fn shape_type_labels() {
    assert_eq!(ShapeType::Rectangle.label(), "rectangle");
    assert_eq!(ShapeType::Circle.label(), "circle");
    assert_eq!(ShapeType::Triangle.to_string(), "triangle");
}

#[test]
fn shape_type_serde_is_lowercase() {
    let json = serde_json::to_string(&ShapeType::Triangle).unwrap();
    assert_eq!(json, "\"triangle\"");
}

#[test]
fn geometry_reports_shape_type() {
    assert_eq!(make_rect(0.0, 0.0, 1.0, 1.0).shape_type(), ShapeType::Rectangle);
    assert_eq!(make_circle(0.0, 0.0, 1.0).shape_type(), ShapeType::Circle);
    let tri = Geometry::Triangle { radius: 3.0, sides: 3 };
    assert_eq!(tri.shape_type(), ShapeType::Triangle);
}

#[test]
fn geometry_serde_is_tagged() {
    let value = serde_json::to_value(Geometry::Circle { radius: 4.0 }).unwrap();
    assert_eq!(value["type"], "circle");
    assert_eq!(value["radius"], 4.0);
}

#[test]
fn degenerate_rect_zero_width() {
    assert!(make_rect(0.0, 0.0, 0.0, 10.0).is_degenerate());
}

#[test]
fn degenerate_rect_zero_height() {
    assert!(make_rect(0.0, 0.0, 10.0, 0.0).is_degenerate());
}

#[test]
fn degenerate_circle_zero_radius() {
    assert!(make_circle(0.0, 0.0, 0.0).is_degenerate());
}

#[test]
fn non_degenerate_shapes() {
    assert!(!make_rect(0.0, 0.0, 1.0, 1.0).is_degenerate());
    assert!(!make_circle(0.0, 0.0, 0.5).is_degenerate());
    assert!(!Geometry::Triangle { radius: 2.0, sides: 3 }.is_degenerate());
}

// =============================================================
// Sign
// =============================================================

#[test]
fn sign_of_delta() {
    assert_eq!(Sign::of(-3.0), Sign::Negative);
    assert_eq!(Sign::of(3.0), Sign::Positive);
    assert_eq!(Sign::of(0.0), Sign::Positive);
}

#[test]
fn sign_factor() {
    assert_eq!(Sign::Positive.factor(), 1.0);
    assert_eq!(Sign::Negative.factor(), -1.0);
}

// =============================================================
// ShapePatch
// =============================================================

#[test]
fn patch_position_sets_only_position() {
    let patch = ShapePatch::position(1.0, 2.0);
    assert_eq!(patch.x, Some(1.0));
    assert_eq!(patch.y, Some(2.0));
    assert!(patch.rotation.is_none());
    assert!(patch.fill.is_none());
}

#[test]
fn patch_serializes_only_present_fields() {
    let value = serde_json::to_value(ShapePatch::fill("#228be6")).unwrap();
    assert_eq!(value, serde_json::json!({ "fill": "#228be6" }));
}

// =============================================================
// ShapeStore: append
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = ShapeStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn append_adds_on_top() {
    let (store, ids) = store_of(3);
    assert_eq!(store.len(), 3);
    assert_eq!(ids_of(&store), ids);
}

#[test]
fn append_rejects_duplicate_id() {
    let mut store = ShapeStore::new();
    let shape = make_rect(0.0, 0.0, 10.0, 10.0);
    assert!(store.append(shape.clone()));
    assert!(!store.append(shape));
    assert_eq!(store.len(), 1);
}

#[test]
fn ids_stay_unique_after_removals_and_additions() {
    let mut store = ShapeStore::new();
    let mut seen = HashSet::new();
    for round in 0..20 {
        let shape = make_circle(f64::from(round), 0.0, 1.0);
        seen.insert(shape.id);
        store.append(shape);
        if round % 3 == 0 {
            store.remove(0);
        }
    }
    let live: HashSet<ShapeId> = store.iter().map(|s| s.id).collect();
    assert_eq!(live.len(), store.len());
    assert_eq!(seen.len(), 20);
}

// =============================================================
// ShapeStore: update
// =============================================================

#[test]
fn update_applies_position() {
    let mut store = ShapeStore::new();
    store.append(make_rect(10.0, 10.0, 5.0, 5.0));
    assert!(store.update(0, &ShapePatch::position(110.0, 120.0)));
    let shape = store.get(0).unwrap();
    assert_eq!(shape.x, 110.0);
    assert_eq!(shape.y, 120.0);
}

#[test]
fn update_applies_fill() {
    let mut store = ShapeStore::new();
    store.append(make_rect(0.0, 0.0, 5.0, 5.0));
    store.update(0, &ShapePatch::fill("#12b886"));
    assert_eq!(store.get(0).unwrap().style.fill.as_deref(), Some("#12b886"));
}

#[test]
fn update_leaves_absent_fields() {
    let mut store = ShapeStore::new();
    store.append(make_rect(3.0, 4.0, 5.0, 5.0));
    store.update(0, &ShapePatch { rotation: Some(45.0), ..Default::default() });
    let shape = store.get(0).unwrap();
    assert_eq!(shape.x, 3.0);
    assert_eq!(shape.y, 4.0);
    assert_eq!(shape.rotation, 45.0);
    assert_eq!(shape.style.fill.as_deref(), Some("#fa5252"));
}

#[test]
fn update_out_of_range_is_noop() {
    let (mut store, ids) = store_of(2);
    assert!(!store.update(5, &ShapePatch::position(1.0, 1.0)));
    assert_eq!(ids_of(&store), ids);
}

#[test]
fn update_keeps_id() {
    let (mut store, ids) = store_of(1);
    store.update(0, &ShapePatch::position(9.0, 9.0));
    assert_eq!(store.get(0).unwrap().id, ids[0]);
}

// =============================================================
// ShapeStore: remove
// =============================================================

#[test]
fn remove_returns_shape() {
    let (mut store, ids) = store_of(3);
    let removed = store.remove(1).unwrap();
    assert_eq!(removed.id, ids[1]);
    assert_eq!(ids_of(&store), vec![ids[0], ids[2]]);
}

#[test]
fn remove_out_of_range_is_noop() {
    let (mut store, ids) = store_of(2);
    assert!(store.remove(2).is_none());
    assert_eq!(ids_of(&store), ids);
}

#[test]
fn remove_from_empty_is_noop() {
    let mut store = ShapeStore::new();
    assert!(store.remove(0).is_none());
}

// =============================================================
// ShapeStore: reorder
// =============================================================

#[test]
fn reorder_moves_forward() {
    let (mut store, ids) = store_of(4);
    assert!(store.reorder(0, 3));
    assert_eq!(ids_of(&store), vec![ids[1], ids[2], ids[3], ids[0]]);
}

#[test]
fn reorder_moves_backward() {
    let (mut store, ids) = store_of(4);
    assert!(store.reorder(3, 1));
    assert_eq!(ids_of(&store), vec![ids[0], ids[3], ids[1], ids[2]]);
}

#[test]
fn reorder_same_index_is_identity() {
    let (mut store, ids) = store_of(3);
    assert!(store.reorder(1, 1));
    assert_eq!(ids_of(&store), ids);
}

#[test]
fn reorder_out_of_range_is_noop() {
    let (mut store, ids) = store_of(3);
    assert!(!store.reorder(0, 3));
    assert!(!store.reorder(7, 0));
    assert_eq!(ids_of(&store), ids);
}

#[test]
fn reorder_preserves_id_set() {
    let (mut store, ids) = store_of(5);
    store.reorder(1, 4);
    store.reorder(4, 0);
    let before: HashSet<ShapeId> = ids.into_iter().collect();
    let after: HashSet<ShapeId> = store.iter().map(|s| s.id).collect();
    assert_eq!(before, after);
}

#[test]
fn raise_to_top_moves_to_end() {
    let (mut store, ids) = store_of(3);
    assert!(store.raise_to_top(0));
    assert_eq!(ids_of(&store), vec![ids[1], ids[2], ids[0]]);
}

#[test]
fn raise_to_top_on_empty_is_noop() {
    let mut store = ShapeStore::new();
    assert!(!store.raise_to_top(0));
}

// =============================================================
// ShapeStore: lookups
// =============================================================

#[test]
fn find_returns_first_match_with_index() {
    let mut store = ShapeStore::new();
    store.append(make_circle(0.0, 0.0, 1.0));
    store.append(make_rect(0.0, 0.0, 1.0, 1.0));
    store.append(make_rect(5.0, 0.0, 1.0, 1.0));
    let (index, shape) = store.find(|s| s.shape_type() == ShapeType::Rectangle).unwrap();
    assert_eq!(index, 1);
    assert_eq!(shape.x, 0.0);
}

#[test]
fn find_without_match() {
    let (store, _) = store_of(2);
    assert!(store.find(|s| s.shape_type() == ShapeType::Triangle).is_none());
}

#[test]
fn position_and_get_by_id() {
    let (store, ids) = store_of(3);
    assert_eq!(store.position(&ids[2]), Some(2));
    assert_eq!(store.get_by_id(&ids[1]).unwrap().id, ids[1]);
    assert!(store.position(&Uuid::new_v4()).is_none());
    assert!(store.get_by_id(&Uuid::new_v4()).is_none());
}

#[test]
fn get_out_of_range() {
    let (store, _) = store_of(1);
    assert!(store.get(1).is_none());
}
