//! Integration tests for shapeflow-mesh.

use shapeflow_mesh::generators::{quad_grid, uv_sphere};
use shapeflow_mesh::topology::Topology;
use shapeflow_mesh::TriangleMesh;

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        indices: vec![0, 1, 2],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
}

#[test]
fn triangle_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
}

#[test]
fn validate_ok() {
    let mesh = make_single_triangle();
    assert!(mesh.validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_repeated_index() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn set_position_writes_all_channels() {
    let mut mesh = make_single_triangle();
    mesh.set_position(2, 4.0, 5.0, 6.0);
    assert_eq!(mesh.position(2), [4.0, 5.0, 6.0]);
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let indices = vec![0, 1, 2];
    let mesh = TriangleMesh::from_interleaved(&positions, &indices).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0]);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn same_topology_detects_differences() {
    let a = make_single_triangle();
    let mut b = a.clone();
    assert!(a.same_topology(&b));

    b.pos_x[0] = 5.0; // Positions may differ
    assert!(a.same_topology(&b));

    b.indices = vec![0, 2, 1]; // Connectivity may not
    assert!(!a.same_topology(&b));
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(2, 3, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 12); // 3 × 4
    assert_eq!(mesh.triangle_count(), 12); // 2 × 3 quads × 2
    mesh.validate().unwrap();
}

#[test]
fn uv_sphere_counts() {
    let mesh = uv_sphere(1.0, 4, 6);
    assert_eq!(mesh.vertex_count(), 5 * 7);
    assert_eq!(mesh.triangle_count(), 4 * 6 * 2 - 2 * 6); // Pole rows skipped
    mesh.validate().unwrap();
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_single_quad() {
    let mesh = quad_grid(1, 1, 1.0, 1.0);
    let topo = Topology::build(&mesh);

    assert_eq!(topo.edges.len(), 5); // 4 boundary + 1 diagonal
    assert_eq!(topo.component_count, 1);
    assert_eq!(topo.vertex_triangles[0].len(), 1); // Top-left corner
    assert_eq!(topo.vertex_triangles[2].len(), 2); // On the diagonal
}

#[test]
fn topology_disconnected_components() {
    // Two triangles sharing no vertices.
    let mesh = TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0, 5.0, 6.0, 5.0],
        pos_y: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        pos_z: vec![0.0; 6],
        indices: vec![0, 1, 2, 3, 4, 5],
    };
    let topo = Topology::build(&mesh);

    assert_eq!(topo.component_count, 2);
    assert_eq!(topo.component_of(0), topo.component_of(2));
    assert_ne!(topo.component_of(0), topo.component_of(3));
    assert_eq!(topo.component_representatives(), vec![0, 3]);
}

#[test]
fn topology_isolated_vertex_is_own_component() {
    // Vertex 3 is referenced by no triangle.
    let mesh = TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0, 9.0],
        pos_y: vec![0.0, 0.0, 1.0, 9.0],
        pos_z: vec![0.0; 4],
        indices: vec![0, 1, 2],
    };
    let topo = Topology::build(&mesh);

    assert_eq!(topo.component_count, 2);
    assert_eq!(topo.component_representatives(), vec![0, 3]);
}

#[test]
fn topology_component_labels_are_deterministic() {
    let mesh = quad_grid(3, 3, 2.0, 2.0);
    let a = Topology::build(&mesh);
    let b = Topology::build(&mesh);
    assert_eq!(a.component, b.component);
    assert_eq!(a.edges, b.edges);
}
