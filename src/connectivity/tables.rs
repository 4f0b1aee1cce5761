//! Static lookup tables encoding the symmetry of the reference cube.
//!
//! Numbering conventions, shared with every consumer of the connectivity:
//! corners 0..8 in zyx order (bit 0 = x, bit 1 = y, bit 2 = z); faces in
//! order -x, +x, -y, +y, -z, +z; edges 0..12 with the x-parallel edges
//! first (ordered by y then z), then y-parallel, then z-parallel.
//!
//! The tables are a fixed contract. They are never derived at runtime.

/// Faces of the reference cube.
pub const FACES: usize = 6;
/// Children of a refined cube.
pub const CHILDREN: usize = 8;
/// Corners of a cube face.
pub const HALF: usize = 4;
/// Edges of the reference cube.
pub const EDGES: usize = 12;
/// Size of a full insulation neighborhood.
pub const INSUL: usize = 27;
/// Number of entries in a face transform descriptor.
pub const FTRANSFORM: usize = 9;

/// Corners of each face, listed so that index bits follow the zyx corner
/// order restricted to the face. Index 0 is the first face corner used by
/// the orientation code.
pub const FACE_CORNERS: [[i8; 4]; 6] = [
    [0, 2, 4, 6],
    [1, 3, 5, 7],
    [0, 1, 4, 5],
    [2, 3, 6, 7],
    [0, 1, 2, 3],
    [4, 5, 6, 7],
];

/// Edges of each face, ascending.
pub const FACE_EDGES: [[i8; 4]; 6] = [
    [4, 6, 8, 10],
    [5, 7, 9, 11],
    [0, 2, 8, 9],
    [1, 3, 10, 11],
    [0, 1, 4, 5],
    [2, 3, 6, 7],
];

/// The opposite face of each face.
pub const FACE_DUAL: [i8; 6] = [1, 0, 3, 2, 5, 4];

/// Only 8 of the 24 permutations of four face corners can occur between two
/// glued cube faces.
pub const FACE_PERMUTATIONS: [[i8; 4]; 8] = [
    [0, 1, 2, 3],
    [0, 2, 1, 3],
    [1, 0, 3, 2],
    [1, 3, 0, 2],
    [2, 0, 3, 1],
    [2, 3, 0, 1],
    [3, 1, 2, 0],
    [3, 2, 1, 0],
];

/// The three 4-element subsets of `FACE_PERMUTATIONS` realisable for a
/// fixed face pair, indexed by orientation code.
pub const FACE_PERMUTATION_SETS: [[i8; 4]; 3] = [
    [1, 2, 5, 6],
    [0, 3, 4, 7],
    [0, 4, 3, 7],
];

/// `FACE_PERMUTATION_REFS[f][nf]` selects which permutation set applies
/// when face `f` is glued to face `nf`.
pub const FACE_PERMUTATION_REFS: [[i8; 6]; 6] = [
    [0, 1, 1, 0, 0, 1],
    [2, 0, 0, 1, 1, 0],
    [2, 0, 0, 1, 1, 0],
    [0, 2, 2, 0, 0, 1],
    [0, 2, 2, 0, 0, 1],
    [2, 0, 0, 2, 2, 0],
];

/// The two faces containing each edge, ascending.
pub const EDGE_FACES: [[i8; 2]; 12] = [
    [2, 4],
    [3, 4],
    [2, 5],
    [3, 5],
    [0, 4],
    [1, 4],
    [0, 5],
    [1, 5],
    [0, 2],
    [1, 2],
    [0, 3],
    [1, 3],
];

/// The endpoint corners of each edge, ascending; the edge direction runs
/// from the first to the second.
pub const EDGE_CORNERS: [[i8; 2]; 12] = [
    [0, 1],
    [2, 3],
    [4, 5],
    [6, 7],
    [0, 2],
    [1, 3],
    [4, 6],
    [5, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Positions of an edge's endpoints within `FACE_CORNERS` of each face, or
/// -1 where the edge does not lie on the face.
pub const EDGE_FACE_CORNERS: [[[i8; 2]; 6]; 12] = [
    [[-1, -1], [-1, -1], [0, 1], [-1, -1], [0, 1], [-1, -1]],
    [[-1, -1], [-1, -1], [-1, -1], [0, 1], [2, 3], [-1, -1]],
    [[-1, -1], [-1, -1], [2, 3], [-1, -1], [-1, -1], [0, 1]],
    [[-1, -1], [-1, -1], [-1, -1], [2, 3], [-1, -1], [2, 3]],
    [[0, 1], [-1, -1], [-1, -1], [-1, -1], [0, 2], [-1, -1]],
    [[-1, -1], [0, 1], [-1, -1], [-1, -1], [1, 3], [-1, -1]],
    [[2, 3], [-1, -1], [-1, -1], [-1, -1], [-1, -1], [0, 2]],
    [[-1, -1], [2, 3], [-1, -1], [-1, -1], [-1, -1], [1, 3]],
    [[0, 2], [-1, -1], [0, 2], [-1, -1], [-1, -1], [-1, -1]],
    [[-1, -1], [0, 2], [1, 3], [-1, -1], [-1, -1], [-1, -1]],
    [[1, 3], [-1, -1], [-1, -1], [0, 2], [-1, -1], [-1, -1]],
    [[-1, -1], [1, 3], [-1, -1], [1, 3], [-1, -1], [-1, -1]],
];

/// The three faces meeting at each corner, ascending.
pub const CORNER_FACES: [[i8; 3]; 8] = [
    [0, 2, 4],
    [1, 2, 4],
    [0, 3, 4],
    [1, 3, 4],
    [0, 2, 5],
    [1, 2, 5],
    [0, 3, 5],
    [1, 3, 5],
];

/// The three edges meeting at each corner, ascending.
pub const CORNER_EDGES: [[i8; 3]; 8] = [
    [0, 4, 8],
    [0, 5, 9],
    [1, 4, 10],
    [1, 5, 11],
    [2, 6, 8],
    [2, 7, 9],
    [3, 6, 10],
    [3, 7, 11],
];

/// Position of each corner within `FACE_CORNERS` of each face, or -1.
pub const CORNER_FACE_CORNERS: [[i8; 6]; 8] = [
    [0, -1, 0, -1, 0, -1],
    [-1, 0, 1, -1, 1, -1],
    [1, -1, -1, 0, 2, -1],
    [-1, 1, -1, 1, 3, -1],
    [2, -1, 2, -1, -1, 0],
    [-1, 2, 3, -1, -1, 1],
    [3, -1, -1, 2, -1, 2],
    [-1, 3, -1, 3, -1, 3],
];

/// For child `c` and edge `e`: the face of the parent whose interior
/// contains the child's edge `e`, or -1 when that edge lies on a parent
/// edge or in the parent's interior.
pub const CHILD_EDGE_FACES: [[i8; 12]; 8] = [
    [-1, 4, 2, -1, -1, 4, 0, -1, -1, 2, 0, -1],
    [-1, 4, 2, -1, 4, -1, -1, 1, 2, -1, -1, 1],
    [4, -1, -1, 3, -1, 4, 0, -1, 0, -1, -1, 3],
    [4, -1, -1, 3, 4, -1, -1, 1, -1, 1, 3, -1],
    [2, -1, -1, 5, 0, -1, -1, 5, -1, 2, 0, -1],
    [2, -1, -1, 5, -1, 1, 5, -1, 2, -1, -1, 1],
    [-1, 3, 5, -1, 0, -1, -1, 5, 0, -1, -1, 3],
    [-1, 3, 5, -1, -1, 1, 5, -1, -1, 1, 3, -1],
];

/// For child `c` and corner `k`: the face of the parent whose interior
/// contains the child's corner `k`, or -1.
pub const CHILD_CORNER_FACES: [[i8; 8]; 8] = [
    [-1, -1, -1, 4, -1, 2, 0, -1],
    [-1, -1, 4, -1, 2, -1, -1, 1],
    [-1, 4, -1, -1, 0, -1, -1, 3],
    [4, -1, -1, -1, -1, 1, 3, -1],
    [-1, 2, 0, -1, -1, -1, -1, 5],
    [2, -1, -1, 1, -1, -1, 5, -1],
    [0, -1, -1, 3, -1, 5, -1, -1],
    [-1, 1, 3, -1, 5, -1, -1, -1],
];

/// For child `c` and corner `k`: the edge of the parent whose interior
/// contains the child's corner `k`, or -1.
pub const CHILD_CORNER_EDGES: [[i8; 8]; 8] = [
    [-1, 0, 4, -1, 8, -1, -1, -1],
    [0, -1, -1, 5, -1, 9, -1, -1],
    [4, -1, -1, 1, -1, -1, 10, -1],
    [-1, 5, 1, -1, -1, -1, -1, 11],
    [8, -1, -1, -1, -1, 2, 6, -1],
    [-1, 9, -1, -1, 2, -1, -1, 7],
    [-1, -1, 10, -1, 6, -1, -1, 3],
    [-1, -1, -1, 11, -1, 7, 3, -1],
];

/// Maps face corner `fc` of face `face` onto the matching face corner of
/// the glued face `nface` under orientation code `orientation`.
#[inline]
pub fn face_corner_across(fc: usize, face: usize, nface: usize, orientation: usize) -> usize {
    let set = FACE_PERMUTATION_REFS[face][nface] as usize;
    let perm = FACE_PERMUTATION_SETS[set][orientation] as usize;
    FACE_PERMUTATIONS[perm][fc] as usize
}

/// Maps corner `corner` lying on face `face` onto the matching corner of
/// the neighbor across that face.
#[inline]
pub fn corner_across(corner: usize, face: usize, nface: usize, orientation: usize) -> usize {
    let fc = CORNER_FACE_CORNERS[corner][face];
    debug_assert!(fc >= 0, "corner is not on the face");
    FACE_CORNERS[nface][face_corner_across(fc as usize, face, nface, orientation)] as usize
}

/// Maps edge `edge` lying on face `face` onto the matching edge of the
/// neighbor across that face, together with the ordered images of the
/// edge's endpoint corners.
pub fn edge_across(edge: usize, face: usize, nface: usize, orientation: usize) -> (usize, [usize; 2]) {
    let c0 = corner_across(EDGE_CORNERS[edge][0] as usize, face, nface, orientation);
    let c1 = corner_across(EDGE_CORNERS[edge][1] as usize, face, nface, orientation);
    let (lo, hi) = if c0 < c1 { (c0, c1) } else { (c1, c0) };
    for (e, corners) in EDGE_CORNERS.iter().enumerate() {
        if corners[0] as usize == lo && corners[1] as usize == hi {
            return (e, [c0, c1]);
        }
    }
    unreachable!("two cube corners differing in one bit always span an edge")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_bit(c: i8, axis: usize) -> i8 {
        (c >> axis) & 1
    }

    #[test]
    fn face_corners_lie_on_their_face() {
        for f in 0..FACES {
            for &c in &FACE_CORNERS[f] {
                assert_eq!(corner_bit(c, f / 2), (f % 2) as i8);
            }
        }
    }

    #[test]
    fn edge_corners_differ_along_the_edge_axis_only() {
        for e in 0..EDGES {
            let [a, b] = EDGE_CORNERS[e];
            assert_eq!(a ^ b, 1 << (e / 4));
            assert!(a < b);
        }
    }

    #[test]
    fn edge_faces_contain_their_edges() {
        for e in 0..EDGES {
            for &f in &EDGE_FACES[e] {
                assert!(FACE_EDGES[f as usize].contains(&(e as i8)));
            }
        }
    }

    #[test]
    fn corner_tables_are_mutually_consistent() {
        for c in 0..CHILDREN {
            for &f in &CORNER_FACES[c] {
                let fc = CORNER_FACE_CORNERS[c][f as usize];
                assert_eq!(FACE_CORNERS[f as usize][fc as usize], c as i8);
            }
            for &e in &CORNER_EDGES[c] {
                assert!(EDGE_CORNERS[e as usize].contains(&(c as i8)));
            }
        }
    }

    #[test]
    fn edge_face_corners_match_face_listings() {
        for e in 0..EDGES {
            for f in 0..FACES {
                let [i, j] = EDGE_FACE_CORNERS[e][f];
                if i < 0 {
                    assert!(!EDGE_FACES[e].contains(&(f as i8)));
                    continue;
                }
                assert_eq!(FACE_CORNERS[f][i as usize], EDGE_CORNERS[e][0]);
                assert_eq!(FACE_CORNERS[f][j as usize], EDGE_CORNERS[e][1]);
            }
        }
    }

    #[test]
    fn face_permutations_are_reciprocal() {
        for f in 0..FACES {
            for nf in 0..FACES {
                for o in 0..4 {
                    for fc in 0..HALF {
                        let there = face_corner_across(fc, f, nf, o);
                        assert_eq!(face_corner_across(there, nf, f, o), fc);
                    }
                }
            }
        }
    }

    #[test]
    fn corner_images_stay_on_the_glued_face() {
        for f in 0..FACES {
            for nf in 0..FACES {
                for o in 0..4 {
                    for &c in &FACE_CORNERS[f] {
                        let nc = corner_across(c as usize, f, nf, o);
                        assert!(FACE_CORNERS[nf].contains(&(nc as i8)));
                    }
                }
            }
        }
    }

    #[test]
    fn child_corner_tables_agree_with_position() {
        // A child's corner k sits strictly inside a parent face iff exactly
        // one of its half-resolution coordinates is extreme.
        for child in 0..CHILDREN {
            for k in 0..CHILDREN {
                let coords: Vec<i8> = (0..3)
                    .map(|a| corner_bit(child as i8, a) + corner_bit(k as i8, a))
                    .collect();
                let extreme = coords.iter().filter(|&&v| v == 0 || v == 2).count();
                assert_eq!(CHILD_CORNER_FACES[child][k] >= 0, extreme == 1);
                assert_eq!(CHILD_CORNER_EDGES[child][k] >= 0, extreme == 2);
            }
        }
    }
}
