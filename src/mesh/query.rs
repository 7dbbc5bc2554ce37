//! Read-only topology queries.
//!
//! Every query is a pure traversal: a bounded walk from a start half-edge back
//! to itself, or a scan over an explicit face selection. Nothing here mutates
//! the mesh. Behavior over malformed connectivity (an unset `next` inside a
//! bound face loop) is undefined beyond terminating.

use nalgebra::{Point, Scalar};

use super::halfedge::HalfEdgeMesh;
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

impl<T: Scalar, const D: usize, I: MeshIndex> HalfEdgeMesh<T, D, I> {
    /// Find the boundary half-edge of `face` anchored at `vertex`.
    ///
    /// Walks the boundary from the face's seed via `next`; returns `None`
    /// when the walk comes back around without a match.
    pub fn face_halfedge_from(&self, face: FaceId<I>, vertex: VertexId<I>) -> Option<HalfEdgeId<I>> {
        let start = self.face(face).halfedge;
        if !start.is_valid() {
            return None;
        }

        let mut he = start;
        while self.head(he) != vertex {
            he = self.next(he);
            if he == start {
                return None;
            }
        }
        Some(he)
    }

    /// Collect the positions of a face boundary, in loop order.
    pub fn face_positions(&self, face: FaceId<I>) -> Vec<Point<T, D>> {
        self.face_halfedges(face)
            .map(|he| self.position(self.head(he)).clone())
            .collect()
    }

    /// Find the half-edge of `face` whose seam leads into `other`.
    ///
    /// Scans the boundary of `face` in loop order; the first matching seam
    /// wins. A well-formed simple mesh has at most one seam per face pair.
    pub fn common_edge(&self, face: FaceId<I>, other: FaceId<I>) -> Option<HalfEdgeId<I>> {
        self.face_halfedges(face).find(|&he| {
            let opp = self.opposite(he);
            opp.is_valid() && self.face_of(opp) == other
        })
    }

    /// Like [`common_edge`](Self::common_edge), but returns both sides of the
    /// seam.
    pub fn common_edges(
        &self,
        face: FaceId<I>,
        other: FaceId<I>,
    ) -> Option<(HalfEdgeId<I>, HalfEdgeId<I>)> {
        self.common_edge(face, other)
            .map(|he| (he, self.opposite(he)))
    }

    /// Collect every face incident to a vertex, in a single ordered pass.
    ///
    /// Walks outward from the vertex's seed via `opposite.prev` until the walk
    /// either closes (manifold interior vertex) or runs into the mesh boundary.
    /// In the boundary case a second walk via `next.opposite` picks up the
    /// remaining incident faces on the far side, so both open and closed
    /// vertex stars produce each incident face exactly once.
    pub fn vertex_faces(&self, vertex: VertexId<I>) -> Vec<FaceId<I>> {
        let start = self.vertex(vertex).halfedge;
        debug_assert!(start.is_valid(), "vertex has no seed half-edge");
        if !start.is_valid() {
            return Vec::new();
        }

        let mut faces = Vec::new();
        let mut current = start;
        let closed = loop {
            faces.push(self.face_of(current));
            let opp = self.opposite(current);
            if !opp.is_valid() {
                break false;
            }
            current = self.prev(opp);
            if current == start {
                break true;
            }
        };
        faces.reverse();

        if !closed {
            let mut current = self.opposite(self.next(start));
            while current.is_valid() && current != start {
                faces.push(self.face_of(current));
                current = self.opposite(self.next(current));
            }
        }

        faces
    }

    /// Collect the faces adjacent to `face` across each of its seams.
    pub fn neighboring_faces(&self, face: FaceId<I>) -> Vec<FaceId<I>> {
        self.face_halfedges(face)
            .filter_map(|he| {
                let opp = self.opposite(he);
                if opp.is_valid() {
                    debug_assert!(self.face_of(opp).is_valid());
                    Some(self.face_of(opp))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Get the face across the seam of `edge`, if any.
    pub fn next_face(&self, edge: HalfEdgeId<I>) -> Option<FaceId<I>> {
        let opp = self.opposite(edge);
        if opp.is_valid() && self.face_of(opp).is_valid() {
            Some(self.face_of(opp))
        } else {
            None
        }
    }

    /// Get the face across the seam of `edge.next`, if any.
    pub fn previous_face(&self, edge: HalfEdgeId<I>) -> Option<FaceId<I>> {
        let next = self.next(edge);
        if !next.is_valid() {
            return None;
        }
        self.next_face(next)
    }

    /// Collect the boundary half-edges of a face selection.
    ///
    /// A half-edge of a selected face is on the boundary when it has no seam
    /// at all (whole-mesh boundary) or when its seam leads to a face outside
    /// the selection (internal boundary of the selection).
    pub fn selection_boundary(&self, faces: &[FaceId<I>]) -> Vec<HalfEdgeId<I>> {
        let mut boundary = Vec::new();
        for &face in faces {
            for he in self.face_halfedges(face) {
                let opp = self.opposite(he);
                if !opp.is_valid() || !faces.contains(&self.face_of(opp)) {
                    boundary.push(he);
                }
            }
        }
        boundary
    }

    /// Reconstruct oriented closed loops from the boundary of a face
    /// selection.
    ///
    /// Repeatedly removes one half-edge from the boundary pool and greedily
    /// extends its chain backward by matching tail vertices among the
    /// remaining pool entries, first match in pool order. A well-formed
    /// selection boundary yields disjoint closed loops; a malformed pool can
    /// legitimately leave a chain open, so this is best-effort reconstruction,
    /// not a guaranteed-closed result.
    pub fn oriented_boundaries(&self, faces: &[FaceId<I>]) -> Vec<Vec<HalfEdgeId<I>>> {
        self.take_closed_loops(self.selection_boundary(faces))
    }

    /// The first loop of [`oriented_boundaries`](Self::oriented_boundaries),
    /// or `None` for a selection without boundary.
    pub fn oriented_boundary(&self, faces: &[FaceId<I>]) -> Option<Vec<HalfEdgeId<I>>> {
        self.oriented_boundaries(faces).into_iter().next()
    }

    fn take_closed_loops(&self, mut pool: Vec<HalfEdgeId<I>>) -> Vec<Vec<HalfEdgeId<I>>> {
        use std::collections::VecDeque;

        let mut loops = Vec::new();
        while !pool.is_empty() {
            let mut chain: VecDeque<HalfEdgeId<I>> = VecDeque::new();
            chain.push_front(pool.remove(0));

            loop {
                let tail = self.tail(chain[0]);
                match pool.iter().position(|&he| self.head(he) == tail) {
                    Some(i) => chain.push_front(pool.remove(i)),
                    None => break,
                }
            }

            loops.push(chain.into_iter().collect());
        }
        loops
    }
}
