//! Mesh topology queries.
//!
//! Builds adjacency data structures from the triangle index buffer:
//! vertex-to-triangle fans, unique edges, and connected-component
//! labels. Component labels drive the solver's translation-gauge
//! pinning and its singularity diagnostics.

use std::collections::{HashMap, HashSet};

use crate::mesh::TriangleMesh;

/// Precomputed topology information for a triangle mesh.
///
/// Built once per bound mesh; valid as long as the index buffer is
/// unchanged.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the list of triangles that contain it.
    pub vertex_triangles: Vec<Vec<u32>>,

    /// Unique edges as `(v_min, v_max)` pairs.
    pub edges: Vec<[u32; 2]>,

    /// Connected-component label per vertex, in `0..component_count`.
    /// Labels are assigned in increasing order of each component's
    /// lowest vertex index, so they are deterministic for a given
    /// index buffer.
    pub component: Vec<u32>,

    /// Number of connected components. Vertices referenced by no
    /// triangle each count as their own component.
    pub component_count: usize,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let tri_count = mesh.triangle_count();

        // Vertex → triangle adjacency
        let mut vertex_triangles: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            vertex_triangles[a as usize].push(t as u32);
            vertex_triangles[b as usize].push(t as u32);
            vertex_triangles[c as usize].push(t as u32);
        }

        // Unique edges, canonicalized as (min_vertex, max_vertex)
        let mut edge_set: HashSet<[u32; 2]> = HashSet::new();
        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { [v0, v1] } else { [v1, v0] };
                edge_set.insert(key);
            }
        }
        let mut edges: Vec<[u32; 2]> = edge_set.into_iter().collect();
        edges.sort_unstable();

        // Connected components via union-find over triangle vertices
        let mut parent: Vec<u32> = (0..vertex_count as u32).collect();
        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            union(&mut parent, a, b);
            union(&mut parent, b, c);
        }

        // Relabel roots to compact 0..k ordered by lowest member index
        let mut component = vec![0u32; vertex_count];
        let mut label_of_root: HashMap<u32, u32> = HashMap::new();
        let mut next = 0u32;
        for v in 0..vertex_count as u32 {
            let root = find(&mut parent, v);
            let label = *label_of_root.entry(root).or_insert_with(|| {
                let l = next;
                next += 1;
                l
            });
            component[v as usize] = label;
        }

        Self {
            vertex_triangles,
            edges,
            component,
            component_count: next as usize,
        }
    }

    /// Returns the component label of vertex `v`.
    #[inline]
    pub fn component_of(&self, v: u32) -> u32 {
        self.component[v as usize]
    }

    /// Returns, for each component, the lowest vertex index it contains.
    pub fn component_representatives(&self) -> Vec<u32> {
        let mut reps = vec![u32::MAX; self.component_count];
        for (v, &label) in self.component.iter().enumerate() {
            if reps[label as usize] == u32::MAX {
                reps[label as usize] = v as u32;
            }
        }
        reps
    }
}

fn find(parent: &mut [u32], v: u32) -> u32 {
    let mut root = v;
    while parent[root as usize] != root {
        root = parent[root as usize];
    }
    // Path compression
    let mut cur = v;
    while parent[cur as usize] != root {
        let next = parent[cur as usize];
        parent[cur as usize] = root;
        cur = next;
    }
    root
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Attach the larger root under the smaller so the lowest
        // vertex of a component stays its root.
        if ra < rb {
            parent[rb as usize] = ra;
        } else {
            parent[ra as usize] = rb;
        }
    }
}
