//! Coordinate-transform queries across faces, edges and corners.
//!
//! The descriptors returned here are plain values; once copied they do not
//! borrow from the connectivity.

use super::tables::{
    corner_across, edge_across, face_corner_across, CORNER_EDGES, CORNER_FACES, EDGES,
    EDGE_CORNERS, EDGE_FACES, FACE_CORNERS,
};
use super::{Connectivity, Topidx};

/// Everything needed to map a coordinate on one tree face into the frame
/// of the glued neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTransform {
    /// The neighbor tree.
    pub ntree: Topidx,
    /// In-face axes 0 and 1 plus the outward normal axis of the origin face.
    pub my_axis: [usize; 3],
    /// The same three axes in the neighbor's frame, ordered so that entry
    /// `i` corresponds to `my_axis[i]` under the face gluing.
    pub target_axis: [usize; 3],
    /// Whether each in-face axis reverses direction across the gluing.
    pub reverse: [bool; 2],
    /// Crossing code: 0 for a minus-to-plus crossing, 1 for plus-to-minus,
    /// 2 when both faces sit on the same side or belong to the same tree
    /// (self-periodic pairing).
    pub sign: u8,
}

/// One neighbor of a tree across a macro-edge that is not already
/// reachable through a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTransform {
    /// The neighbor tree.
    pub ntree: Topidx,
    /// The neighbor's local edge.
    pub nedge: u8,
    /// The axis the neighbor edge runs along, then the remaining two axes
    /// in ascending order.
    pub naxis: [u8; 3],
    /// Whether the neighbor edge runs opposite to the queried edge.
    pub nflip: bool,
    /// z-order position of the neighbor edge among the four parallel cube
    /// edges; disambiguates alignments around the macro-edge.
    pub corners: u8,
}

/// Reusable output buffer for [`Connectivity::find_edge_transform`].
#[derive(Debug, Default)]
pub struct EdgeInfo {
    pub transforms: Vec<EdgeTransform>,
}

impl EdgeInfo {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }
}

/// One neighbor of a tree across a macro-corner that is not already
/// reachable through a face or an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerTransform {
    pub ntree: Topidx,
    pub ncorner: u8,
}

/// Reusable output buffer for [`Connectivity::find_corner_transform`].
#[derive(Debug, Default)]
pub struct CornerInfo {
    pub transforms: Vec<CornerTransform>,
}

impl CornerInfo {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }
}

#[inline]
fn corner_bit(corner: usize, axis: usize) -> usize {
    (corner >> axis) & 1
}

impl Connectivity {
    /// Decodes the face entry of `tree` at `face` into a transform
    /// descriptor, or `None` when the face is a domain boundary.
    pub fn find_face_transform(&self, tree: Topidx, face: usize) -> Option<FaceTransform> {
        let (ntree, nface, orientation) = self.face_neighbor(tree, face);
        if ntree == tree && nface == face {
            return None;
        }

        let normal = face / 2;
        let my_axis = [(normal + 1) % 3, (normal + 2) % 3, normal];
        let mut target_axis = [0, 0, nface / 2];
        let mut reverse = [false; 2];

        let origin = FACE_CORNERS[face][0] as usize;
        let image0 = FACE_CORNERS[nface][face_corner_across(0, face, nface, orientation)] as usize;
        for k in 0..2 {
            // The face corner one step from corner 0 along this axis, and
            // where the gluing sends it.
            let step = (1..4)
                .find(|&i| {
                    FACE_CORNERS[face][i] as usize ^ origin == 1 << my_axis[k]
                })
                .unwrap();
            let image =
                FACE_CORNERS[nface][face_corner_across(step, face, nface, orientation)] as usize;
            let axis = (0..3).find(|&a| corner_bit(image, a) != corner_bit(image0, a)).unwrap();
            target_axis[k] = axis;
            reverse[k] = corner_bit(image0, axis) == 1;
        }

        let sign = if ntree == tree || face % 2 == nface % 2 {
            2
        } else {
            (face % 2) as u8
        };

        Some(FaceTransform {
            ntree,
            my_axis,
            target_axis,
            reverse,
            sign,
        })
    }

    /// Collects the neighbors of `tree` around its local `edge`, excluding
    /// the tree itself and neighbors already reachable through either face
    /// containing the edge. Leaves `info` empty when the edge carries no
    /// record.
    pub fn find_edge_transform(&self, tree: Topidx, edge: usize, info: &mut EdgeInfo) {
        assert!(edge < EDGES, "edge index out of range");
        info.transforms.clear();

        let bucket = self.tree_edge(tree, edge);
        if bucket < 0 {
            return;
        }

        // Sides of the edge that face reciprocity already describes.
        let mut through_faces = [None; 2];
        for (slot, &face) in EDGE_FACES[edge].iter().enumerate() {
            let (ntree, nface, orientation) = self.face_neighbor(tree, face as usize);
            if ntree == tree && nface == face as usize {
                continue;
            }
            let (nedge, _) = edge_across(edge, face as usize, nface, orientation);
            through_faces[slot] = Some((ntree, nedge));
        }

        let (trees, codes) = self.edge_bucket(bucket);
        let iflip = trees
            .iter()
            .zip(codes)
            .find(|&(&t, &code)| t == tree && (code % EDGES as i8) as usize == edge)
            .map(|(_, &code)| code / EDGES as i8)
            .expect("edge bucket misses its own tree side");

        for (&ntree, &code) in trees.iter().zip(codes) {
            let nedge = (code % EDGES as i8) as usize;
            let nflip = code / EDGES as i8;
            if ntree == tree && nedge == edge {
                continue;
            }
            if through_faces.contains(&Some((ntree, nedge))) {
                continue;
            }
            info.transforms.push(EdgeTransform {
                ntree,
                nedge: nedge as u8,
                naxis: [
                    (nedge / 4) as u8,
                    if nedge < 4 { 1 } else { 0 },
                    if nedge < 8 { 2 } else { 1 },
                ],
                nflip: nflip != iflip,
                corners: (nedge % 4) as u8,
            });
        }
    }

    /// Collects the neighbors of `tree` around its local `corner`,
    /// excluding the tree itself and neighbors already reachable through
    /// the three faces or three edges meeting at the corner.
    pub fn find_corner_transform(&self, tree: Topidx, corner: usize, info: &mut CornerInfo) {
        info.transforms.clear();

        let bucket = self.tree_corner(tree, corner);
        if bucket < 0 {
            return;
        }

        let mut reachable = Vec::new();
        for &face in &CORNER_FACES[corner] {
            let (ntree, nface, orientation) = self.face_neighbor(tree, face as usize);
            if ntree == tree && nface == face as usize {
                continue;
            }
            reachable.push((ntree, corner_across(corner, face as usize, nface, orientation)));
        }

        for &edge in &CORNER_EDGES[corner] {
            let edge = edge as usize;
            let ebucket = self.tree_edge(tree, edge);
            if ebucket < 0 {
                continue;
            }
            let endpoint = if EDGE_CORNERS[edge][0] as usize == corner { 0 } else { 1 };
            let (trees, codes) = self.edge_bucket(ebucket);
            let iflip = trees
                .iter()
                .zip(codes)
                .find(|&(&t, &code)| t == tree && (code % EDGES as i8) as usize == edge)
                .map(|(_, &code)| code / EDGES as i8)
                .expect("edge bucket misses its own tree side");
            for (&ntree, &code) in trees.iter().zip(codes) {
                let nedge = (code % EDGES as i8) as usize;
                let nflip = code / EDGES as i8;
                if ntree == tree && nedge == edge {
                    continue;
                }
                let nendpoint = endpoint ^ (nflip != iflip) as usize;
                reachable.push((ntree, EDGE_CORNERS[nedge][nendpoint] as usize));
            }
        }

        let (trees, corners) = self.corner_bucket(bucket);
        for (&ntree, &ncorner) in trees.iter().zip(corners) {
            let ncorner = ncorner as usize;
            if ntree == tree && ncorner == corner {
                continue;
            }
            if reachable.contains(&(ntree, ncorner)) {
                continue;
            }
            info.transforms.push(CornerTransform {
                ntree,
                ncorner: ncorner as u8,
            });
        }
    }
}
