//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list) representation
//! for polygonal meshes with 2D or 3D coordinates. Every undirected edge is
//! split into two antiparallel **half-edges**; the pairing between them (the
//! *seam*) is what stitches neighboring faces together.
//!
//! # Structure
//!
//! - Each half-edge knows its **opposite** (the antiparallel half-edge on the
//!   adjacent face, unset at a mesh boundary), **next** and **prev** (its
//!   cyclic neighbors along the same face boundary), its anchor **vertex**,
//!   and its incident **face**
//! - Each vertex stores one incident half-edge as a traversal seed
//! - Each face stores one half-edge on its boundary
//!
//! # Vertex convention
//!
//! A half-edge's `vertex` is the vertex at its *head*; the tail is recovered
//! from the loop as `prev.vertex`. Consequently a seam `e`/`e.opposite`
//! satisfies `e.vertex == e.opposite.prev.vertex`.
//!
//! # Boundary Handling
//!
//! A half-edge on the outer boundary of an open mesh simply has no `opposite`.
//! No placeholder boundary records are materialized.

use nalgebra::{Point, Scalar};

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<T: Scalar, const D: usize, I: MeshIndex = u32> {
    /// The position of this vertex. Treated as opaque payload; no operation
    /// in this crate inspects coordinate values.
    pub position: Point<T, D>,

    /// One half-edge anchored at this vertex, used as a traversal seed.
    /// Assigned first-edge-wins and unset until the first incident half-edge
    /// is created.
    pub halfedge: HalfEdgeId<I>,
}

impl<T: Scalar, const D: usize, I: MeshIndex> Vertex<T, D, I> {
    /// Create a new vertex at the given position, with no incident half-edge.
    pub fn new(position: Point<T, D>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex at the head of this half-edge. The tail is `prev.vertex`.
    pub vertex: VertexId<I>,

    /// The antiparallel half-edge on the adjacent face.
    /// Unset for half-edges on the mesh boundary.
    pub opposite: HalfEdgeId<I>,

    /// The next half-edge along the face boundary.
    pub next: HalfEdgeId<I>,

    /// The previous half-edge along the face boundary.
    pub prev: HalfEdgeId<I>,

    /// The face to the left of this half-edge.
    /// Unset until the half-edge is bound into a face loop.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new half-edge anchored at the given vertex, with every other
    /// relation unset.
    pub fn new(vertex: VertexId<I>) -> Self {
        Self {
            vertex,
            opposite: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Check if this half-edge lies on the mesh boundary (no opposite).
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.opposite.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new(VertexId::invalid())
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face. Unset when the face has
    /// been detached by an edit that paved over it.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face seeded with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

impl<I: MeshIndex> Default for Face<I> {
    fn default() -> Self {
        Self {
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge mesh over `D`-dimensional coordinates of scalar type `T`.
///
/// Vertices, half-edges, and faces live in three arenas addressed by the
/// type-safe handles of [`super::index`]. Relations between entities are
/// handles too, so the intentionally cyclic adjacency graph (face ↔ edge ↔
/// vertex ↔ edge) needs no shared-pointer ownership: an entity is *live* as
/// long as some relation still reaches it, and an edit that relinks every
/// path away from an entity leaves its slot behind as inert storage.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<T: Scalar, const D: usize, I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex<T, D, I>>,

    /// All half-edges in the mesh.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,
}

/// A half-edge mesh with 2D coordinates.
pub type HalfEdgeMesh2<T = f64, I = u32> = HalfEdgeMesh<T, 2, I>;

/// A half-edge mesh with 3D coordinates.
pub type HalfEdgeMesh3<T = f64, I = u32> = HalfEdgeMesh<T, 3, I>;

impl<T: Scalar, const D: usize, I: MeshIndex> Default for HalfEdgeMesh<T, D, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, const D: usize, I: MeshIndex> HalfEdgeMesh<T, D, I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // Triangular faces carry 3 half-edges each; leave headroom for the
        // unpaired boundary ring of an open mesh.
        let num_halfedges = num_faces * 3 + num_faces / 2;

        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertex slots.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edge slots.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of face slots, detached faces included.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by handle.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<T, D, I> {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by handle.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<T, D, I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by handle.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a mutable half-edge by handle.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by handle.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a mutable face by handle.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point<T, D> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point<T, D>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Topology Links ====================

    /// Get the opposite (antiparallel) half-edge, or an invalid handle at a
    /// mesh boundary.
    #[inline]
    pub fn opposite(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).opposite
    }

    /// Get the next half-edge along the face boundary.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge along the face boundary.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the vertex at the head of a half-edge.
    #[inline]
    pub fn head(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).vertex
    }

    /// Get the vertex at the tail of a half-edge (the head of its `prev`).
    #[inline]
    pub fn tail(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.head(self.prev(he))
    }

    /// Get the face of a half-edge, invalid if the half-edge is not bound
    /// into a face loop yet.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge is on the mesh boundary (no opposite).
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if a vertex lies on the mesh boundary.
    ///
    /// Walks the incident half-edges the same way as
    /// [`vertex_faces`](Self::vertex_faces); a vertex with no seed is
    /// considered boundary (isolated).
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        let start = self.vertex(v).halfedge;
        if !start.is_valid() {
            return true;
        }

        let mut he = start;
        loop {
            let opp = self.opposite(he);
            if !opp.is_valid() {
                return true;
            }
            he = self.prev(opp);
            if he == start {
                return false;
            }
        }
    }

    /// Check if a face has been detached by an edit (seed half-edge unset).
    #[inline]
    pub fn is_detached_face(&self, f: FaceId<I>) -> bool {
        !self.face(f).halfedge.is_valid()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex handles.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(|i| VertexId::new(i))
    }

    /// Iterate over all vertices with their handles.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<T, D, I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge handles.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(|i| HalfEdgeId::new(i))
    }

    /// Iterate over all half-edges with their handles.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over all face handles, detached faces included.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(|i| FaceId::new(i))
    }

    /// Iterate over all faces with their handles.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// Iterate over the half-edges of a face boundary, in loop order.
    ///
    /// Starts at the face's seed half-edge and follows `next` until the walk
    /// returns to the seed or reaches an unset link.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, T, D, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over the vertices of a face boundary, in loop order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.head(he))
    }

    /// Get the number of half-edges on a face boundary.
    pub fn face_degree(&self, f: FaceId<I>) -> usize {
        self.face_halfedges(f).count()
    }

    // ==================== Validation ====================

    /// Check that every connectivity invariant holds.
    ///
    /// Verifies vertex seeds, mutual opposites with coincident seam endpoints,
    /// `next`/`prev` inversion, and per-face loop closure with a uniform face
    /// field and at least two boundary half-edges. Detached faces are skipped.
    /// Walks are bounded by the half-edge count, so a malformed cycle is
    /// reported rather than looped over forever.
    pub fn validate(&self) -> Result<()> {
        for (vid, v) in self.vertices() {
            if v.halfedge.is_valid() && self.halfedge(v.halfedge).vertex != vid {
                return Err(MeshError::BadVertexSeed { vertex: vid.index() });
            }
        }

        for (heid, he) in self.halfedges() {
            if he.opposite.is_valid() {
                let opp = self.halfedge(he.opposite);
                if opp.opposite != heid {
                    return Err(MeshError::HalfOpenSeam {
                        halfedge: heid.index(),
                    });
                }
                if opp.prev.is_valid() && self.halfedge(opp.prev).vertex != he.vertex {
                    return Err(MeshError::SeamEndpointMismatch {
                        halfedge: heid.index(),
                    });
                }
            }

            if he.next.is_valid() && self.halfedge(he.next).prev != heid {
                return Err(MeshError::BrokenLinkage {
                    halfedge: heid.index(),
                });
            }
            if he.prev.is_valid() && self.halfedge(he.prev).next != heid {
                return Err(MeshError::BrokenLinkage {
                    halfedge: heid.index(),
                });
            }
        }

        for (fid, f) in self.faces() {
            if !f.halfedge.is_valid() {
                continue;
            }

            let mut count = 0usize;
            let mut he = f.halfedge;
            loop {
                if self.halfedge(he).face != fid {
                    return Err(MeshError::ForeignLoopEdge {
                        face: fid.index(),
                        halfedge: he.index(),
                    });
                }
                count += 1;
                if count > self.halfedges.len() {
                    return Err(MeshError::OpenFaceLoop { face: fid.index() });
                }

                let next = self.halfedge(he).next;
                if !next.is_valid() {
                    return Err(MeshError::OpenFaceLoop { face: fid.index() });
                }
                he = next;
                if he == f.halfedge {
                    break;
                }
            }

            if count < 2 {
                return Err(MeshError::DegenerateFace { face: fid.index() });
            }
        }

        Ok(())
    }

    /// Check if the mesh is structurally consistent.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, T: Scalar, const D: usize, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<T, D, I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, T: Scalar, const D: usize, I: MeshIndex> FaceHalfEdgeIter<'a, T, D, I> {
    fn new(mesh: &'a HalfEdgeMesh<T, D, I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, T: Scalar, const D: usize, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, T, D, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);

        if self.current == self.start || !self.current.is_valid() {
            self.done = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_vertex_creation() {
        let v: Vertex<f64, 2> = Vertex::new(Point2::new(1.0, 2.0));
        assert_eq!(v.position, Point2::new(1.0, 2.0));
        assert!(!v.halfedge.is_valid());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh2::<f64>::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_new_halfedge_is_boundary() {
        let he: HalfEdge<u32> = HalfEdge::default();
        assert!(he.is_boundary());
        assert!(!he.face.is_valid());
    }

    #[test]
    fn test_face_iter_stops_on_unset_next() {
        // A face whose boundary was never cyclically linked: the walk must
        // stop at the unset link instead of running off the arena.
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let v0 = mesh.add_vertex(Point2::new(0.0, 0.0));
        let v1 = mesh.add_vertex(Point2::new(1.0, 0.0));
        let a = mesh.add_halfedge(v0);
        let b = mesh.add_halfedge(v1);
        mesh.halfedge_mut(a).next = b;
        mesh.halfedge_mut(b).prev = a;
        mesh.faces.push(Face::new(a));
        mesh.halfedge_mut(a).face = FaceId::new(0);
        mesh.halfedge_mut(b).face = FaceId::new(0);

        let walked: Vec<_> = mesh.face_halfedges(FaceId::new(0)).collect();
        assert_eq!(walked, vec![a, b]);
    }

    #[test]
    fn test_validate_detects_half_open_seam() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let a = mesh.add_halfedge_at(Point2::new(0.0, 0.0));
        let b = mesh.add_halfedge_at(Point2::new(1.0, 0.0));
        // One-way opposite link: must be flagged.
        mesh.halfedge_mut(a).opposite = b;
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::HalfOpenSeam { .. })
        ));
    }
}
