//! Structural invariant checks over a connectivity.

use super::tables::{edge_across, CHILDREN, EDGES, EDGE_FACES, FACES};
use super::{Connectivity, Topidx};

impl Connectivity {
    /// Checks every structural invariant of the data model: array sizing,
    /// index ranges, face reciprocity, edge/corner bucket closure, and the
    /// absence of buckets that face reciprocity already fully describes.
    ///
    /// Vertex coordinates are not inspected; a connectivity whose periodic
    /// faces disagree on vertices is valid but non-conforming.
    pub fn is_valid(&self) -> bool {
        let nt = self.num_trees();

        if self.tree_to_tree.len() != FACES * nt || self.tree_to_face.len() != FACES * nt {
            return false;
        }
        if self.num_vertices() == 0 && !self.tree_to_vertex.is_empty() {
            return false;
        }
        if self.num_vertices() > 0 && self.tree_to_vertex.len() != CHILDREN * nt {
            return false;
        }
        if !self
            .tree_to_vertex
            .iter()
            .all(|&v| v >= 0 && (v as usize) < self.num_vertices())
        {
            return false;
        }

        if !self.faces_are_reciprocal() {
            return false;
        }

        let edges_ok = self.buckets_are_closed(
            &self.tree_to_edge,
            EDGES,
            &self.ett_offset,
            &self.edge_to_tree,
            &self.edge_to_edge,
            2 * EDGES as i8,
        );
        let corners_ok = self.buckets_are_closed(
            &self.tree_to_corner,
            CHILDREN,
            &self.ctt_offset,
            &self.corner_to_tree,
            &self.corner_to_corner,
            CHILDREN as i8,
        );
        if !edges_ok || !corners_ok {
            return false;
        }

        self.no_edge_bucket_is_face_described() && self.no_corner_bucket_is_face_described()
    }

    fn faces_are_reciprocal(&self) -> bool {
        for tree in 0..self.num_trees() as Topidx {
            for face in 0..FACES {
                let idx = FACES * tree as usize + face;
                let ntree = self.tree_to_tree[idx];
                let code = self.tree_to_face[idx];
                if ntree < 0 || ntree as usize >= self.num_trees() {
                    return false;
                }
                if code < 0 || code >= (4 * FACES) as i8 {
                    return false;
                }

                let (nface, orientation) = ((code % 6) as usize, (code / 6) as usize);
                if ntree == tree && nface == face {
                    // Boundary faces carry the identity orientation.
                    if orientation != 0 {
                        return false;
                    }
                    continue;
                }

                let back = FACES * ntree as usize + nface;
                if self.tree_to_tree[back] != tree {
                    return false;
                }
                if self.tree_to_face[back] != (face + FACES * orientation) as i8 {
                    return false;
                }
            }
        }
        true
    }

    /// Shared closure check for the edge and corner tables: offsets frame
    /// the entry arrays, every entry points back at its bucket, and every
    /// recorded tree side appears in its bucket exactly once.
    #[allow(clippy::too_many_arguments)]
    fn buckets_are_closed(
        &self,
        tree_to: &[Topidx],
        per_tree: usize,
        offsets: &[Topidx],
        to_tree: &[Topidx],
        to_local: &[i8],
        code_limit: i8,
    ) -> bool {
        let nt = self.num_trees();
        if offsets.is_empty() {
            return tree_to.is_empty() && to_tree.is_empty() && to_local.is_empty();
        }
        let num = offsets.len() - 1;
        let entries = to_tree.len();

        if to_local.len() != entries {
            return false;
        }
        if tree_to.len() != if num > 0 { per_tree * nt } else { 0 } {
            return false;
        }
        if offsets[0] != 0 || offsets[num] as usize != entries {
            return false;
        }

        let mut found = vec![0u8; tree_to.len()];
        for bucket in 0..num {
            let (lo, hi) = (offsets[bucket] as usize, offsets[bucket + 1] as usize);
            if lo >= hi {
                // Empty buckets and single-sided macro entities are not
                // representable; hi == lo also catches reversed offsets.
                return false;
            }
            for i in lo..hi {
                let ntree = to_tree[i];
                let code = to_local[i];
                if ntree < 0 || ntree as usize >= nt || code < 0 || code >= code_limit {
                    return false;
                }
                let local = code as usize % per_tree;
                let slot = per_tree * ntree as usize + local;
                if tree_to[slot] != bucket as Topidx {
                    return false;
                }
                found[slot] += 1;
            }
        }

        for (slot, &bucket) in tree_to.iter().enumerate() {
            if bucket < -1 || bucket >= num as Topidx {
                return false;
            }
            if bucket >= 0 && found[slot] != 1 {
                return false;
            }
        }
        true
    }

    /// Rejects edge buckets whose sides are pairwise co-described by face
    /// gluings; those must stay out of the edge table. Only buckets of at
    /// most three sides can be fully described, since each side touches
    /// two faces.
    fn no_edge_bucket_is_face_described(&self) -> bool {
        for bucket in 0..self.num_edges() as Topidx {
            let (trees, codes) = self.edge_bucket(bucket);
            if trees.len() > 3 {
                continue;
            }

            let sides: Vec<(Topidx, usize)> = trees
                .iter()
                .zip(codes)
                .map(|(&t, &code)| (t, (code % EDGES as i8) as usize))
                .collect();
            let described = |a: (Topidx, usize), b: (Topidx, usize)| {
                EDGE_FACES[a.1].iter().any(|&face| {
                    let (ntree, nface, orientation) = self.face_neighbor(a.0, face as usize);
                    if ntree == a.0 && nface == face as usize {
                        return false;
                    }
                    let (nedge, _) = edge_across(a.1, face as usize, nface, orientation);
                    (ntree, nedge) == b
                })
            };

            let mut all_pairs = true;
            for i in 0..sides.len() {
                for j in i + 1..sides.len() {
                    if !described(sides[i], sides[j]) && !described(sides[j], sides[i]) {
                        all_pairs = false;
                    }
                }
            }
            if all_pairs {
                return false;
            }
        }
        true
    }

    /// The corner analogue: each corner side touches three faces, so only
    /// buckets of at most four sides can be fully face-described.
    fn no_corner_bucket_is_face_described(&self) -> bool {
        use super::tables::{corner_across, CORNER_FACES};

        for bucket in 0..self.num_corners() as Topidx {
            let (trees, corners) = self.corner_bucket(bucket);
            if trees.len() > 4 {
                continue;
            }

            let sides: Vec<(Topidx, usize)> = trees
                .iter()
                .zip(corners)
                .map(|(&t, &c)| (t, c as usize))
                .collect();
            let described = |a: (Topidx, usize), b: (Topidx, usize)| {
                CORNER_FACES[a.1].iter().any(|&face| {
                    let (ntree, nface, orientation) = self.face_neighbor(a.0, face as usize);
                    if ntree == a.0 && nface == face as usize {
                        return false;
                    }
                    (ntree, corner_across(a.1, face as usize, nface, orientation)) == b
                })
            };

            let mut all_pairs = true;
            for i in 0..sides.len() {
                for j in i + 1..sides.len() {
                    if !described(sides[i], sides[j]) && !described(sides[j], sides[i]) {
                        all_pairs = false;
                    }
                }
            }
            if all_pairs {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::all_factories;
    use super::*;
    use test_case::test_case;

    #[test_case("unitcube")]
    #[test_case("periodic")]
    #[test_case("rotwrap")]
    #[test_case("twocubes")]
    #[test_case("twowrap")]
    #[test_case("rotcubes")]
    #[test_case("brick")]
    #[test_case("shell")]
    #[test_case("sphere")]
    fn factories_are_valid(name: &str) {
        let conn = super::super::test_helpers::factory(name);
        assert!(conn.is_valid());
    }

    #[test]
    fn broken_face_reciprocity_is_rejected() {
        let mut conn = Connectivity::twocubes();
        conn.tree_to_tree[1] = 0;
        conn.tree_to_face[1] = 0;
        assert!(!conn.is_valid());
    }

    #[test]
    fn twisted_boundary_face_is_rejected() {
        let mut conn = Connectivity::unitcube();
        conn.tree_to_face[4] = 4 + 6;
        assert!(!conn.is_valid());
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mut conn = Connectivity::twocubes();
        conn.tree_to_vertex[3] = conn.num_vertices() as Topidx;
        assert!(!conn.is_valid());
    }

    #[test]
    fn bucket_missing_its_own_side_is_rejected() {
        let mut conn = Connectivity::periodic();
        // Replace the self-entry of edge 0 with a second copy of edge 1.
        conn.edge_to_edge[0] = 1;
        assert!(!conn.is_valid());
    }

    #[test]
    fn dangling_bucket_entry_is_rejected() {
        let mut conn = Connectivity::periodic();
        conn.tree_to_edge[3] = -1;
        assert!(!conn.is_valid());
    }

    #[test]
    fn face_described_edge_record_is_rejected() {
        // Two trees glued on one face must not also record the edges of
        // that face.
        let mut conn = Connectivity::twocubes();
        conn.tree_to_edge = vec![-1; 12 * 2];
        conn.tree_to_edge[5] = 0; // tree 0, edge 5
        conn.tree_to_edge[12 + 4] = 0; // tree 1, edge 4
        conn.ett_offset = vec![0, 2];
        conn.edge_to_tree = vec![0, 1];
        conn.edge_to_edge = vec![5, 4];
        assert!(!conn.is_valid());
    }

    #[test]
    fn mutated_orientation_breaks_validity_everywhere() {
        for conn in all_factories() {
            let mut broken = conn.clone();
            // Bump the orientation of the first interior face entry.
            let Some(idx) = (0..broken.tree_to_face.len()).find(|&i| {
                let tree = (i / 6) as Topidx;
                !broken.face_is_boundary(tree, i % 6)
            }) else {
                continue;
            };
            broken.tree_to_face[idx] = (broken.tree_to_face[idx] + 6) % 24;
            assert!(!broken.is_valid());
        }
    }
}
