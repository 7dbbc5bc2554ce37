//! Error types for hemesh.
//!
//! Operations whose preconditions can fail on well-formed input (a missing
//! seam, a run too short to bind a face) signal that by returning `None` and
//! performing no mutation. The variants here are the structural diagnostics
//! reported by [`validate`](crate::mesh::HalfEdgeMesh::validate) when the
//! connectivity invariants themselves are broken.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Structural-consistency errors detected in a half-edge mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A vertex's seed half-edge is not anchored at the vertex.
    #[error("vertex {vertex}: seed half-edge is not anchored at this vertex")]
    BadVertexSeed {
        /// The vertex slot index.
        vertex: usize,
    },

    /// A half-edge's opposite does not point back at it.
    #[error("half-edge {halfedge}: opposite link is not mutual")]
    HalfOpenSeam {
        /// The half-edge slot index.
        halfedge: usize,
    },

    /// The two half-edges of a seam disagree about their shared endpoint.
    #[error("half-edge {halfedge}: seam endpoints do not coincide")]
    SeamEndpointMismatch {
        /// The half-edge slot index.
        halfedge: usize,
    },

    /// `next` and `prev` are not inverse at a half-edge.
    #[error("half-edge {halfedge}: next/prev links are not inverse")]
    BrokenLinkage {
        /// The half-edge slot index.
        halfedge: usize,
    },

    /// A half-edge on a face boundary carries a different face handle.
    #[error("face {face}: boundary half-edge {halfedge} belongs to another face")]
    ForeignLoopEdge {
        /// The face slot index.
        face: usize,
        /// The offending half-edge slot index.
        halfedge: usize,
    },

    /// A face boundary walk never returns to its seed half-edge.
    #[error("face {face}: boundary does not close")]
    OpenFaceLoop {
        /// The face slot index.
        face: usize,
    },

    /// A face boundary has fewer than two half-edges.
    #[error("face {face}: boundary has fewer than two half-edges")]
    DegenerateFace {
        /// The face slot index.
        face: usize,
    },
}
