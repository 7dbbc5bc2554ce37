//! Core mesh data structures and operations.
//!
//! This module provides the half-edge mesh representation together with its
//! three operation layers: construction builders, read-only queries, and
//! structural edits, all exposed as methods on [`HalfEdgeMesh`].
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], a half-edge (doubly-connected edge
//! list) arena for polygonal meshes over 2D or 3D coordinates. Adjacency is
//! stored as type-safe handles into the arena, so the cyclic vertex ↔ edge ↔
//! face graph carries no shared-pointer ownership.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe handle wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! Meshes are grown in place from coordinates:
//!
//! ```
//! use hemesh::mesh::HalfEdgeMesh2;
//! use nalgebra::Point2;
//!
//! let mut mesh = HalfEdgeMesh2::<f64>::new();
//! let loop_edges = mesh.add_loop_halfedges(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//! ]);
//! let face = mesh.add_face(&loop_edges).unwrap();
//! assert_eq!(mesh.face_degree(face), 3);
//! ```

mod build;
mod edit;
mod halfedge;
mod index;
mod query;

pub use halfedge::{
    Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, HalfEdgeMesh2, HalfEdgeMesh3, Vertex,
};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
