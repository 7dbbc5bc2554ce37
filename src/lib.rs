//! # Hemesh
//!
//! A half-edge topology engine for 2D and 3D polygonal surface meshes.
//!
//! Hemesh represents a surface mesh as an edge-centric adjacency graph:
//! every undirected edge splits into two antiparallel half-edges, each
//! knowing its cyclic neighbors along a face boundary, its anchor vertex,
//! and its partner across the seam. On top of that structure the crate
//! offers construction builders, read-only traversal queries, and
//! graph-rewriting edits (edge flip, face attachment, vertex fan insertion,
//! boundary extraction with closed-loop reconstruction).
//!
//! ## Features
//!
//! - **Arena storage with type-safe handles**: the mutually-referential
//!   vertex/edge/face graph lives in plain `Vec` slots addressed by
//!   [`VertexId`](mesh::VertexId), [`HalfEdgeId`](mesh::HalfEdgeId), and
//!   [`FaceId`](mesh::FaceId) — no shared pointers, no unsafe
//! - **Flexible indexing**: 16-bit, 32-bit, and 64-bit handle widths
//! - **Dimension-generic coordinates**: `nalgebra` points of any scalar
//!   type, in 2D or 3D; coordinates are opaque payload, never interpreted
//! - **Pure topology**: no geometric predicates, no tolerances — correctness
//!   rests on adjacency bookkeeping alone
//!
//! ## Quick Start
//!
//! ```
//! use hemesh::prelude::*;
//! use nalgebra::Point2;
//!
//! // A unit square bound to a face.
//! let mut mesh = HalfEdgeMesh2::<f64>::new();
//! let square = mesh.add_loop_halfedges(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//! let face = mesh.add_face(&square).unwrap();
//!
//! // The boundary walk hands back the coordinates in input order.
//! assert_eq!(mesh.face_positions(face).len(), 4);
//! assert!(mesh.is_valid());
//! ```
//!
//! ## Editing
//!
//! Edits rewrite adjacency in place and return handles to what they create:
//!
//! ```
//! use hemesh::prelude::*;
//! use nalgebra::Point2;
//!
//! let mut mesh = HalfEdgeMesh2::<f64>::new();
//! let square = mesh.add_loop_halfedges(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//!
//! // Subdivide the square into four triangles around a center vertex.
//! let center = mesh.add_vertex(Point2::new(0.5, 0.5));
//! let fan = mesh.insert_vertex_fan(&square, center);
//! assert_eq!(fan.len(), 4);
//! assert_eq!(mesh.vertex_faces(center).len(), 4);
//!
//! // Two adjacent fan triangles can trade their shared diagonal.
//! mesh.flip(fan[0], fan[1]);
//! assert!(mesh.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types:
///
/// ```
/// use hemesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, HalfEdgeMesh2, HalfEdgeMesh3, MeshIndex,
        Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_grow_and_flip_strip() {
        // Build a triangle in 3D, grow a neighbor from each boundary edge,
        // then flip against one of them; the invariants must hold throughout.
        let mut mesh = HalfEdgeMesh3::<f64>::new();
        let tri = mesh.add_loop_halfedges(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ]);
        let first = mesh.add_face(&tri).unwrap();

        let apexes = [
            Point3::new(1.5, 1.0, 0.2),
            Point3::new(-0.5, 1.0, 0.2),
            Point3::new(0.5, -1.0, 0.2),
        ];
        let mut grown = Vec::new();
        for (&edge, apex) in tri.iter().zip(apexes) {
            let face = mesh.attach_face(edge, apex).expect("boundary edge");
            grown.push(face);
        }
        assert!(mesh.is_valid());
        assert_eq!(mesh.neighboring_faces(first).len(), 3);

        let before = mesh.num_vertices();
        mesh.flip(first, grown[0]);
        assert!(mesh.is_valid());
        assert_eq!(mesh.num_vertices(), before);
        assert!(mesh.common_edge(first, grown[0]).is_some());
    }
}
