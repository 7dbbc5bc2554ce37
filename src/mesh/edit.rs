//! Structural mesh edits.
//!
//! Edits rewrite adjacency only: no operation here inspects coordinates, and
//! none deletes storage. A precondition failure on well-formed input returns
//! `None` before anything is touched; a violated caller contract (a null
//! argument, a non-triangle handed to [`flip`](HalfEdgeMesh::flip)) fails
//! fast instead of degrading silently.

use nalgebra::{Point, Scalar};

use super::halfedge::{Face, HalfEdgeMesh};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

impl<T: Scalar, const D: usize, I: MeshIndex> HalfEdgeMesh<T, D, I> {
    /// Grow a new triangular face against a boundary half-edge of an existing
    /// face.
    ///
    /// `edge` must have no seam yet, i.e. lie on the current outer boundary.
    /// The edit creates its antiparallel partner (the new seam) and a triangle
    /// spanning the seam's two endpoints plus a fresh vertex at `position`.
    ///
    /// Returns `None` without any mutation when `edge` is invalid or already
    /// paired.
    pub fn attach_face(&mut self, edge: HalfEdgeId<I>, position: Point<T, D>) -> Option<FaceId<I>> {
        if !edge.is_valid() || self.opposite(edge).is_valid() {
            return None;
        }

        let seam_tail = self.tail(edge);
        let opposite = self.add_opposite(seam_tail, edge);
        let lead = self.add_halfedge(self.head(edge));
        let apex = self.add_halfedge_at(position);

        self.add_face(&[lead, opposite, apex])
    }

    /// Like [`attach_face`](Self::attach_face), additionally checking that
    /// `edge` belongs to `face`.
    pub fn attach_face_on(
        &mut self,
        face: FaceId<I>,
        edge: HalfEdgeId<I>,
        position: Point<T, D>,
    ) -> Option<FaceId<I>> {
        if !edge.is_valid() || self.opposite(edge).is_valid() || self.face_of(edge) != face {
            return None;
        }
        self.attach_face(edge, position)
    }

    /// Unconditionally pair two half-edges as a mutual seam.
    ///
    /// # Panics
    /// Panics if either handle is invalid; passing one is a caller bug.
    pub fn link_opposites(&mut self, a: HalfEdgeId<I>, b: HalfEdgeId<I>) {
        assert!(a.is_valid() && b.is_valid(), "link_opposites needs two half-edges");
        self.halfedge_mut(a).opposite = b;
        self.halfedge_mut(b).opposite = a;
    }

    /// Flip the shared edge of two adjacent triangles.
    ///
    /// The two triangles are re-triangulated across the other diagonal of
    /// their union quadrilateral. The two apex vertices gaining the diagonal
    /// are re-seeded onto it, and the two old endpoints are re-seeded off it
    /// when their seed pointed at the flipped pair. No half-edge outside the
    /// two faces and their seam is touched. A no-op when the faces share no
    /// edge.
    ///
    /// Both faces must be triangles; that contract is debug-asserted.
    pub fn flip(&mut self, f1: FaceId<I>, f2: FaceId<I>) {
        debug_assert_eq!(self.face_degree(f1), 3);
        debug_assert_eq!(self.face_degree(f2), 3);

        let Some((e11, e12)) = self.common_edges(f1, f2) else {
            return;
        };
        let e21 = self.next(e11);
        let e31 = self.next(e21);
        let e22 = self.next(e12);
        let e32 = self.next(e22);

        let v1 = self.head(e11);
        let v2 = self.head(e21);
        let v3 = self.head(e31);
        let v4 = self.head(e22);

        // The apexes gain the diagonal and anchor onto it.
        self.associate(v4, e11);
        self.associate(v2, e12);

        // The old endpoints keep a valid seed if theirs pointed at the
        // diagonal: e32 stays anchored at v1 and e31 at v3.
        if self.vertex(v1).halfedge == e11 {
            self.vertex_mut(v1).halfedge = e32;
        }
        if self.vertex(v3).halfedge == e12 {
            self.vertex_mut(v3).halfedge = e31;
        }

        self.make_loop(&[e11, e32, e21], f1);
        self.make_loop(&[e12, e31, e22], f2);
    }

    /// Fan-insert a vertex against a chain of half-edges.
    ///
    /// For each chain half-edge a new triangle is synthesized from the chain
    /// edge plus two spokes through `vertex`; consecutive triangles are
    /// seamed together and the fan is closed last-to-first. The vertex is
    /// re-seeded by the first synthesized spoke. Faces the chain previously
    /// bounded are left detached once every path into them is relinked.
    ///
    /// The chain is assumed counter-clockwise, consistent with face winding;
    /// orientation is a caller contract and is not derived from coordinates.
    /// A chain of `k` half-edges yields exactly `k` faces.
    pub fn insert_vertex_fan(
        &mut self,
        chain: &[HalfEdgeId<I>],
        vertex: VertexId<I>,
    ) -> Vec<FaceId<I>> {
        // Faces being paved over, recorded before any relinking.
        let mut paved: Vec<FaceId<I>> = Vec::new();
        for &he in chain {
            let f = self.face_of(he);
            if f.is_valid() && !paved.contains(&f) {
                paved.push(f);
            }
        }

        // The first spoke takes over the seed.
        self.vertex_mut(vertex).halfedge = HalfEdgeId::invalid();

        let mut faces = Vec::with_capacity(chain.len());
        let mut prev_spoke: Option<HalfEdgeId<I>> = None;
        for &he in chain {
            debug_assert!(self.prev(he).is_valid());

            let spoke_in = self.add_halfedge(vertex);
            let spoke_out = self.add_halfedge(self.tail(he));
            if let Some(prev) = prev_spoke {
                self.link_opposites(spoke_out, prev);
            }
            prev_spoke = Some(spoke_in);

            let face = FaceId::new(self.faces.len());
            self.faces.push(Face::default());
            self.make_loop(&[he, spoke_in, spoke_out], face);
            faces.push(face);
        }

        // Close the fan: the last inbound spoke pairs with the first
        // outbound one.
        if let (Some(&first), Some(&last)) = (faces.first(), faces.last()) {
            let first_out = self.prev(self.face(first).halfedge);
            let last_in = self.next(self.face(last).halfedge);
            self.link_opposites(last_in, first_out);
        }

        // A paved-over face whose seed was captured by a new loop has no
        // surviving path into it; detach it.
        for f in paved {
            let seed = self.face(f).halfedge;
            if seed.is_valid() && self.face_of(seed) != f {
                self.face_mut(f).halfedge = HalfEdgeId::invalid();
            }
        }

        faces
    }

    /// Re-anchor a half-edge at a vertex and point the vertex's seed at it.
    ///
    /// This is the one relink that overwrites an existing seed; builders only
    /// ever assign first-edge-wins.
    fn associate(&mut self, vertex: VertexId<I>, he: HalfEdgeId<I>) {
        self.halfedge_mut(he).vertex = vertex;
        self.vertex_mut(vertex).halfedge = he;
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::{FaceId, HalfEdgeId, HalfEdgeMesh2, VertexId};
    use nalgebra::Point2;

    fn square() -> [Point2<f64>; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    /// Two triangles A-B-C and B-A-D glued along the A-B edge.
    fn triangle_pair(
        mesh: &mut HalfEdgeMesh2<f64>,
    ) -> ([VertexId; 4], [HalfEdgeId; 6], [FaceId; 2]) {
        let a = mesh.add_vertex(Point2::new(0.0, 0.0));
        let b = mesh.add_vertex(Point2::new(1.0, 0.0));
        let c = mesh.add_vertex(Point2::new(0.5, 1.0));
        let d = mesh.add_vertex(Point2::new(0.5, -1.0));

        let ab = mesh.add_halfedge(b);
        let bc = mesh.add_halfedge(c);
        let ca = mesh.add_halfedge(a);
        let f1 = mesh.add_face(&[ab, bc, ca]).unwrap();

        let ba = mesh.add_halfedge(a);
        let ad = mesh.add_halfedge(d);
        let db = mesh.add_halfedge(b);
        let f2 = mesh.add_face(&[ba, ad, db]).unwrap();

        mesh.link_opposites(ab, ba);

        ([a, b, c, d], [ab, bc, ca, ba, ad, db], [f1, f2])
    }

    fn boundary_count(mesh: &HalfEdgeMesh2<f64>) -> usize {
        mesh.halfedge_ids()
            .filter(|&he| mesh.is_boundary_halfedge(he))
            .count()
    }

    fn sorted_face_vertices(mesh: &HalfEdgeMesh2<f64>, f: FaceId) -> Vec<VertexId> {
        let mut vs: Vec<_> = mesh.face_vertices(f).collect();
        vs.sort();
        vs
    }

    #[test]
    fn test_flip_rewires_diagonal() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let ([a, b, c, d], [ab, _, _, ba, _, _], [f1, f2]) = triangle_pair(&mut mesh);

        mesh.flip(f1, f2);
        assert!(mesh.is_valid());

        // The seam now runs between the two former apexes.
        let seam = mesh.common_edge(f1, f2).expect("faces still adjacent");
        let endpoints = [mesh.tail(seam), mesh.head(seam)];
        assert!(endpoints.contains(&c) && endpoints.contains(&d));

        // Both faces stay triangles, and each swapped exactly one vertex:
        // {A,B,C} / {A,B,D} became {B,C,D} / {A,C,D}.
        assert_eq!(sorted_face_vertices(&mesh, f1), vec![b, c, d]);
        assert_eq!(sorted_face_vertices(&mesh, f2), vec![a, c, d]);

        // The flipped pair is still the same pair of half-edges.
        assert_eq!(mesh.common_edges(f1, f2), Some((ab, ba)));
    }

    #[test]
    fn test_flip_preserves_counts() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let (_, _, [f1, f2]) = triangle_pair(&mut mesh);

        let vertices_before = mesh.num_vertices();
        let faces_before = mesh.num_faces();
        let halfedges_before = mesh.num_halfedges();
        let boundary_before = boundary_count(&mesh);

        mesh.flip(f1, f2);

        assert_eq!(mesh.num_vertices(), vertices_before);
        assert_eq!(mesh.num_faces(), faces_before);
        assert_eq!(mesh.num_halfedges(), halfedges_before);
        assert_eq!(boundary_count(&mesh), boundary_before);
    }

    #[test]
    fn test_flip_twice_restores_diagonal() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let ([a, b, c, d], _, [f1, f2]) = triangle_pair(&mut mesh);

        mesh.flip(f1, f2);
        mesh.flip(f1, f2);
        assert!(mesh.is_valid());

        // The diagonal runs between A and B again; the two face slots end up
        // holding each other's original triangle.
        let seam = mesh.common_edge(f1, f2).unwrap();
        let endpoints = [mesh.tail(seam), mesh.head(seam)];
        assert!(endpoints.contains(&a) && endpoints.contains(&b));
        assert_eq!(sorted_face_vertices(&mesh, f1), vec![a, b, d]);
        assert_eq!(sorted_face_vertices(&mesh, f2), vec![a, b, c]);
    }

    #[test]
    fn test_flip_without_shared_edge_is_noop() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();

        // Two unconnected triangles.
        let t1 = mesh.add_loop_halfedges(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
        ]);
        let f1 = mesh.add_face(&t1).unwrap();
        let t2 = mesh.add_loop_halfedges(&[
            Point2::new(5.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(5.5, 1.0),
        ]);
        let f2 = mesh.add_face(&t2).unwrap();

        let before = mesh.clone();
        mesh.flip(f1, f2);

        for (he_before, he_after) in before.halfedges().zip(mesh.halfedges()) {
            assert_eq!(he_before.1.next, he_after.1.next);
            assert_eq!(he_before.1.vertex, he_after.1.vertex);
        }
    }

    #[test]
    fn test_attach_face_grows_boundary() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let (_, [_, bc, _, _, _, _], _) = triangle_pair(&mut mesh);

        let faces_before = mesh.num_faces();
        let new_face = mesh
            .attach_face(bc, Point2::new(1.5, 1.0))
            .expect("bc is unpaired");

        assert_eq!(mesh.num_faces(), faces_before + 1);
        assert_eq!(mesh.face_degree(new_face), 3);
        assert!(mesh.opposite(bc).is_valid());
        assert_eq!(mesh.face_of(mesh.opposite(bc)), new_face);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_attach_face_rejects_paired_edge() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let (_, [ab, _, _, _, _, _], _) = triangle_pair(&mut mesh);

        let vertices_before = mesh.num_vertices();
        let halfedges_before = mesh.num_halfedges();

        // ab already has a seam into f2.
        assert!(mesh.attach_face(ab, Point2::new(0.5, 0.5)).is_none());

        // Nothing was allocated or relinked.
        assert_eq!(mesh.num_vertices(), vertices_before);
        assert_eq!(mesh.num_halfedges(), halfedges_before);
    }

    #[test]
    fn test_attach_face_rejects_invalid_edge() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        triangle_pair(&mut mesh);
        assert!(mesh
            .attach_face(HalfEdgeId::invalid(), Point2::new(0.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_attach_face_on_checks_ownership() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let (_, [_, bc, _, _, ad, _], [f1, f2]) = triangle_pair(&mut mesh);

        // bc belongs to f1, not f2.
        assert!(mesh.attach_face_on(f2, bc, Point2::new(1.5, 1.0)).is_none());
        // ad belongs to f2.
        assert!(mesh.attach_face_on(f2, ad, Point2::new(0.0, -1.0)).is_some());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_link_opposites_mutual() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let a = mesh.add_halfedge_at(Point2::new(0.0, 0.0));
        let b = mesh.add_halfedge_at(Point2::new(1.0, 0.0));

        mesh.link_opposites(a, b);
        assert_eq!(mesh.opposite(a), b);
        assert_eq!(mesh.opposite(b), a);
    }

    #[test]
    #[should_panic(expected = "link_opposites")]
    fn test_link_opposites_panics_on_invalid() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let a = mesh.add_halfedge_at(Point2::new(0.0, 0.0));
        mesh.link_opposites(a, HalfEdgeId::invalid());
    }

    #[test]
    fn test_fan_insertion_face_count() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let hes = mesh.add_loop_halfedges(&square());
        let center = mesh.add_vertex(Point2::new(0.5, 0.5));

        let fan = mesh.insert_vertex_fan(&hes, center);
        assert_eq!(fan.len(), 4);
        assert!(mesh.is_valid());

        // Every fan triangle is a triangle touching the center.
        for &f in &fan {
            assert_eq!(mesh.face_degree(f), 3);
            assert!(mesh.face_vertices(f).any(|v| v == center));
        }

        // The center's seed is the first synthesized spoke, and its star
        // covers exactly the fan.
        let seed = mesh.vertex(center).halfedge;
        assert_eq!(mesh.head(seed), center);
        assert_eq!(mesh.face_of(seed), fan[0]);
        assert_eq!(mesh.vertex_faces(center).len(), 4);
    }

    #[test]
    fn test_fan_spokes_are_seamed() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let hes = mesh.add_loop_halfedges(&square());
        let center = mesh.add_vertex(Point2::new(0.5, 0.5));
        let fan = mesh.insert_vertex_fan(&hes, center);

        // Each triangle's inbound spoke pairs with its successor's outbound
        // spoke, wrapping around.
        for i in 0..fan.len() {
            let spoke_in = mesh.next(mesh.face(fan[i]).halfedge);
            let next_out = mesh.prev(mesh.face(fan[(i + 1) % fan.len()]).halfedge);
            assert_eq!(mesh.opposite(spoke_in), next_out);
            assert_eq!(mesh.opposite(next_out), spoke_in);
        }

        // Only the original chain stays unpaired.
        for &he in &hes {
            assert!(mesh.is_boundary_halfedge(he));
        }
    }

    #[test]
    fn test_fan_detaches_paved_face() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let hes = mesh.add_loop_halfedges(&square());
        let old = mesh.add_face(&hes).unwrap();

        let center = mesh.add_vertex(Point2::new(0.5, 0.5));
        let fan = mesh.insert_vertex_fan(&hes, center);

        assert_eq!(fan.len(), 4);
        assert!(mesh.is_detached_face(old));
        assert!(mesh.is_valid());

        // The chain edges now belong to the fan triangles.
        for (&he, &f) in hes.iter().zip(fan.iter()) {
            assert_eq!(mesh.face_of(he), f);
        }
    }

    #[test]
    fn test_fan_on_empty_chain() {
        let mut mesh = HalfEdgeMesh2::<f64>::new();
        let v = mesh.add_vertex(Point2::new(0.0, 0.0));
        assert!(mesh.insert_vertex_fan(&[], v).is_empty());
    }
}
