//! Rebuilding edge and corner tables from vertex identity.

use super::tables::{
    corner_across, edge_across, CHILDREN, CORNER_FACES, EDGES, EDGE_CORNERS, EDGE_FACES,
};
use super::{Connectivity, Topidx};
use std::collections::HashMap;

type Side = (Topidx, usize);

impl Connectivity {
    /// Derives the edge and corner tables from `tree_to_vertex`, assuming
    /// the face skeleton (`tree_to_tree`/`tree_to_face`) is already valid.
    /// Any existing edge/corner tables are dropped first.
    ///
    /// Identifications that are not encoded in the vertex list, such as
    /// periodic wraps, are lost here; that is a documented limitation, not
    /// a defect. Without vertices this reduces to clearing the tables.
    pub fn complete(&mut self) {
        self.tree_to_edge.clear();
        self.ett_offset = vec![0];
        self.edge_to_tree.clear();
        self.edge_to_edge.clear();
        self.tree_to_corner.clear();
        self.ctt_offset = vec![0];
        self.corner_to_tree.clear();
        self.corner_to_corner.clear();

        if self.num_vertices() == 0 {
            return;
        }

        let edge_buckets = self.collect_edge_buckets();
        let num_trees = self.num_trees();
        if !edge_buckets.is_empty() {
            self.tree_to_edge = vec![-1; EDGES * num_trees];
            for (id, sides) in edge_buckets.iter().enumerate() {
                for &((tree, edge), flip) in sides {
                    self.tree_to_edge[EDGES * tree as usize + edge] = id as Topidx;
                    self.edge_to_tree.push(tree);
                    self.edge_to_edge.push((edge + EDGES * flip as usize) as i8);
                }
                self.ett_offset.push(self.edge_to_tree.len() as Topidx);
            }
        }

        let corner_buckets = self.collect_corner_buckets(&edge_buckets);
        if !corner_buckets.is_empty() {
            self.tree_to_corner = vec![-1; CHILDREN * num_trees];
            for (id, sides) in corner_buckets.iter().enumerate() {
                for &(tree, corner) in sides {
                    self.tree_to_corner[CHILDREN * tree as usize + corner] = id as Topidx;
                    self.corner_to_tree.push(tree);
                    self.corner_to_corner.push(corner as i8);
                }
                self.ctt_offset.push(self.corner_to_tree.len() as Topidx);
            }
        }
    }

    /// The ordered endpoint vertices of a tree's local edge.
    #[inline]
    fn edge_vertices(&self, tree: Topidx, edge: usize) -> (Topidx, Topidx) {
        let base = CHILDREN * tree as usize;
        (
            self.tree_to_vertex[base + EDGE_CORNERS[edge][0] as usize],
            self.tree_to_vertex[base + EDGE_CORNERS[edge][1] as usize],
        )
    }

    /// True when the two sides are glued by a face containing the edge.
    fn edge_sides_face_described(&self, a: Side, b: Side) -> bool {
        for side in [(a, b), (b, a)] {
            let ((tree, edge), other) = side;
            for &face in &EDGE_FACES[edge] {
                let (ntree, nface, orientation) = self.face_neighbor(tree, face as usize);
                if ntree == tree && nface == face as usize {
                    continue;
                }
                let (nedge, _) = edge_across(edge, face as usize, nface, orientation);
                if (ntree, nedge) == other {
                    return true;
                }
            }
        }
        false
    }

    /// Groups edge sides by their unordered endpoint vertex pair and keeps
    /// the groups that face reciprocity does not fully describe. Buckets
    /// come out ordered by their first side, entries ordered by
    /// (tree, edge), flips relative to the first side's direction.
    fn collect_edge_buckets(&self) -> Vec<Vec<(Side, bool)>> {
        let mut groups: HashMap<(Topidx, Topidx), Vec<Side>> = HashMap::new();
        for tree in 0..self.num_trees() as Topidx {
            for edge in 0..EDGES {
                let (v0, v1) = self.edge_vertices(tree, edge);
                if v0 == v1 {
                    // Degenerate under collapsed vertices; no direction to
                    // recover, leave the edge unrecorded.
                    continue;
                }
                let key = (v0.min(v1), v0.max(v1));
                groups.entry(key).or_default().push((tree, edge));
            }
        }

        let mut buckets = Vec::new();
        for sides in groups.into_values() {
            if sides.len() < 2 {
                continue;
            }
            let described = (0..sides.len()).all(|i| {
                (i + 1..sides.len())
                    .all(|j| self.edge_sides_face_described(sides[i], sides[j]))
            });
            if described {
                continue;
            }

            // Sides were collected in ascending (tree, edge) order.
            let first_dir = self.edge_vertices(sides[0].0, sides[0].1);
            let bucket: Vec<(Side, bool)> = sides
                .iter()
                .map(|&side| (side, self.edge_vertices(side.0, side.1) != first_dir))
                .collect();
            buckets.push(bucket);
        }

        buckets.sort_unstable_by_key(|bucket| bucket[0].0);
        buckets
    }

    /// True when the two sides are glued by a face containing the corner.
    fn corner_sides_face_described(&self, a: Side, b: Side) -> bool {
        for side in [(a, b), (b, a)] {
            let ((tree, corner), other) = side;
            for &face in &CORNER_FACES[corner] {
                let (ntree, nface, orientation) = self.face_neighbor(tree, face as usize);
                if ntree == tree && nface == face as usize {
                    continue;
                }
                if (ntree, corner_across(corner, face as usize, nface, orientation)) == other {
                    return true;
                }
            }
        }
        false
    }

    /// Groups corner sides by vertex and keeps the groups described by
    /// neither face reciprocity nor the freshly built edge buckets.
    fn collect_corner_buckets(&self, edge_buckets: &[Vec<(Side, bool)>]) -> Vec<Vec<Side>> {
        // Corner sides co-described through a recorded macro-edge: matching
        // endpoints of any two sides of one bucket.
        let mut edge_described: HashMap<Side, Vec<Side>> = HashMap::new();
        for bucket in edge_buckets {
            let endpoints: Vec<[Side; 2]> = bucket
                .iter()
                .map(|&((tree, edge), flip)| {
                    let lo = EDGE_CORNERS[edge][flip as usize] as usize;
                    let hi = EDGE_CORNERS[edge][1 - flip as usize] as usize;
                    [(tree, lo), (tree, hi)]
                })
                .collect();
            for i in 0..endpoints.len() {
                for j in 0..endpoints.len() {
                    if i == j {
                        continue;
                    }
                    for end in 0..2 {
                        edge_described
                            .entry(endpoints[i][end])
                            .or_default()
                            .push(endpoints[j][end]);
                    }
                }
            }
        }

        let mut groups: HashMap<Topidx, Vec<Side>> = HashMap::new();
        for tree in 0..self.num_trees() as Topidx {
            for corner in 0..CHILDREN {
                let vertex = self.tree_to_vertex[CHILDREN * tree as usize + corner];
                groups.entry(vertex).or_default().push((tree, corner));
            }
        }

        let mut buckets = Vec::new();
        for sides in groups.into_values() {
            if sides.len() < 2 {
                continue;
            }
            let described = (0..sides.len()).all(|i| {
                (i + 1..sides.len()).all(|j| {
                    self.corner_sides_face_described(sides[i], sides[j])
                        || edge_described
                            .get(&sides[i])
                            .is_some_and(|partners| partners.contains(&sides[j]))
                })
            });
            if !described {
                buckets.push(sides);
            }
        }

        buckets.sort_unstable_by_key(|bucket| bucket[0]);
        buckets
    }
}
