//! Integration tests for shapeflow-types.

use shapeflow_types::{TransferError, TriangleId, VertexId};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn vertex_id_index() {
    let id = VertexId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn triangle_id_index() {
    let id = TriangleId(7);
    assert_eq!(id.index(), 7);
}

#[test]
fn ids_are_not_interchangeable() {
    // Compile-time guarantee — these types are distinct.
    let _v = VertexId(0);
    let _t = TriangleId(0);
}

#[test]
fn ids_are_serializable() {
    let id = VertexId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: VertexId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = TransferError::InvalidMesh("index 9 out of range".into());
    assert!(err.to_string().contains("index 9 out of range"));
}

#[test]
fn degenerate_geometry_names_triangle() {
    let err = TransferError::DegenerateGeometry { triangle: 17 };
    let msg = err.to_string();
    assert!(msg.contains("17"));
    assert!(msg.contains("zero area"));
}

#[test]
fn singular_system_display() {
    let err = TransferError::SingularSystem("component 2 has no stationary vertex".into());
    assert!(err.to_string().contains("component 2"));
}
