//! Mesh construction primitives.
//!
//! The builders in this module create the raw material every higher-level
//! edit is assembled from: vertices, single half-edges, cyclically linked
//! loops of half-edges, and faces bound to such loops.
//!
//! Two rules are enforced centrally here:
//!
//! - **First-edge-wins seeding**: a vertex's seed half-edge is assigned by the
//!   first half-edge created at it and never overwritten by a builder. Only
//!   the explicit relink inside [`flip`](super::HalfEdgeMesh::flip) replaces
//!   a seed.
//! - **Single binding point**: [`make_loop`](super::HalfEdgeMesh::make_loop)
//!   is the only place that binds a face to a particular boundary ordering.

use nalgebra::{Point, Scalar};

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

impl<T: Scalar, const D: usize, I: MeshIndex> HalfEdgeMesh<T, D, I> {
    /// Add a new vertex with no incident half-edge and return its handle.
    pub fn add_vertex(&mut self, position: Point<T, D>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(super::halfedge::Vertex::new(position));
        id
    }

    /// Add a new half-edge anchored at an existing vertex.
    ///
    /// If the vertex has no seed half-edge yet, the new half-edge becomes it.
    /// All other relations (`next`, `prev`, `opposite`, `face`) start unset;
    /// face binding happens through [`make_loop`](Self::make_loop).
    pub fn add_halfedge(&mut self, vertex: VertexId<I>) -> HalfEdgeId<I> {
        let id = HalfEdgeId::new(self.halfedges.len());
        self.halfedges.push(HalfEdge::new(vertex));
        self.seed_vertex(vertex, id);
        id
    }

    /// Add a fresh vertex at `position` together with a half-edge anchored
    /// at it.
    pub fn add_halfedge_at(&mut self, position: Point<T, D>) -> HalfEdgeId<I> {
        let vertex = self.add_vertex(position);
        self.add_halfedge(vertex)
    }

    /// Build one half-edge per position and link them into a single cyclic
    /// `next`/`prev` loop in input order.
    ///
    /// Half-edge `i` links forward to `i + 1 (mod n)` and backward to
    /// `i - 1 (mod n)`. No face is assigned; pass the result to
    /// [`add_face`](Self::add_face) to bind one.
    pub fn add_loop_halfedges(&mut self, positions: &[Point<T, D>]) -> Vec<HalfEdgeId<I>> {
        let n = positions.len();
        let halfedges: Vec<HalfEdgeId<I>> = positions
            .iter()
            .map(|p| self.add_halfedge_at(p.clone()))
            .collect();

        for i in 0..n {
            let he = self.halfedge_mut(halfedges[i]);
            he.next = halfedges[(i + 1) % n];
            he.prev = halfedges[(i + n - 1) % n];
        }

        halfedges
    }

    /// Bind a run of half-edges into the boundary loop of `face`.
    ///
    /// Sets the face's seed to the first half-edge of the run and, for every
    /// half-edge, assigns `face` and relinks `next`/`prev` to its cyclic
    /// neighbors within the run. This is the sole place a face is bound to a
    /// specific boundary ordering.
    ///
    /// # Panics
    /// Panics if `face` is invalid or the run has fewer than two half-edges;
    /// both are caller bugs, not recoverable conditions.
    pub fn make_loop(&mut self, run: &[HalfEdgeId<I>], face: FaceId<I>) {
        assert!(face.is_valid(), "make_loop requires a valid face");
        assert!(run.len() > 1, "a face boundary needs at least two half-edges");

        self.face_mut(face).halfedge = run[0];

        let n = run.len();
        for (i, &id) in run.iter().enumerate() {
            let he = self.halfedge_mut(id);
            he.face = face;
            he.next = run[(i + 1) % n];
            he.prev = run[(i + n - 1) % n];
        }
    }

    /// Allocate a face and bind the given run of half-edges as its boundary.
    ///
    /// Returns `None` without allocating anything when the run has fewer than
    /// two half-edges.
    pub fn add_face(&mut self, run: &[HalfEdgeId<I>]) -> Option<FaceId<I>> {
        if run.len() < 2 {
            return None;
        }

        let face = FaceId::new(self.faces.len());
        self.faces.push(Face::default());
        self.make_loop(run, face);

        Some(face)
    }

    /// Create the antiparallel partner of `edge`, anchored at `vertex`, and
    /// mutually link the two as a seam.
    ///
    /// `vertex` must be the tail of `edge` (`edge.prev.vertex`); this is a
    /// caller contract and is not validated here.
    pub fn add_opposite(&mut self, vertex: VertexId<I>, edge: HalfEdgeId<I>) -> HalfEdgeId<I> {
        let opposite = self.add_halfedge(vertex);
        self.halfedge_mut(opposite).opposite = edge;
        self.halfedge_mut(edge).opposite = opposite;
        opposite
    }

    /// Assign a vertex's seed half-edge if it has none yet.
    pub(crate) fn seed_vertex(&mut self, vertex: VertexId<I>, he: HalfEdgeId<I>) {
        let v = self.vertex_mut(vertex);
        if !v.halfedge.is_valid() {
            v.halfedge = he;
        }
    }
}
