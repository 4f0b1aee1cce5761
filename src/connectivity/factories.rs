//! Built-in connectivity factories.
//!
//! Each constructor returns a connectivity that passes `is_valid`; the
//! literal tables are fixed data of the library, validated on every call
//! through `from_arrays`.

use super::tables::{CHILDREN, EDGE_CORNERS, EDGES, FACES};
use super::{Connectivity, Topidx};
use std::collections::BTreeSet;

/// Corner coordinates of the unit reference cube in zyx corner order.
const UNIT_VERTICES: [f64; 24] = [
    0.0, 0.0, 0.0,
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    1.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
    1.0, 0.0, 1.0,
    0.0, 1.0, 1.0,
    1.0, 1.0, 1.0,
];

impl Connectivity {
    /// A single tree whose six faces are all domain boundaries.
    pub fn unitcube() -> Self {
        Self::from_arrays(
            &UNIT_VERTICES,
            &[0, 1, 2, 3, 4, 5, 6, 7],
            &[0; 6],
            &[0, 1, 2, 3, 4, 5],
            &[],
            &[0],
            &[],
            &[],
            &[],
            &[0],
            &[],
            &[],
        )
        .expect("built-in connectivity data is valid")
    }

    /// A single tree with all three face pairs identified; every edge
    /// quadruple and all eight corners collapse onto one macro entity.
    pub fn periodic() -> Self {
        const TREE_TO_TREE: [Topidx; 6] = [
         0,  0,  0,  0,  0,  0,
        ];

        const TREE_TO_FACE: [i8; 6] = [
         1,  0,  3,  2,  5,  4,
        ];

        const TREE_TO_EDGE: [Topidx; 12] = [
         0,  0,  0,  0,  1,  1,  1,  1,  2,  2,  2,  2,
        ];

        const ETT_OFFSET: [Topidx; 4] = [
         0,  4,  8, 12,
        ];

        const EDGE_TO_TREE: [Topidx; 12] = [
         0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,
        ];

        const EDGE_TO_EDGE: [i8; 12] = [
         0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11,
        ];

        const TREE_TO_CORNER: [Topidx; 8] = [
         0,  0,  0,  0,  0,  0,  0,  0,
        ];

        const CTT_OFFSET: [Topidx; 2] = [
         0,  8,
        ];

        const CORNER_TO_TREE: [Topidx; 8] = [
         0,  0,  0,  0,  0,  0,  0,  0,
        ];

        const CORNER_TO_CORNER: [i8; 8] = [
         0,  1,  2,  3,  4,  5,  6,  7,
        ];

        Self::from_arrays(
            &UNIT_VERTICES,
            &[0, 1, 2, 3, 4, 5, 6, 7],
            &TREE_TO_TREE,
            &TREE_TO_FACE,
            &TREE_TO_EDGE,
            &ETT_OFFSET,
            &EDGE_TO_TREE,
            &EDGE_TO_EDGE,
            &TREE_TO_CORNER,
            &CTT_OFFSET,
            &CORNER_TO_TREE,
            &CORNER_TO_CORNER,
        )
        .expect("built-in connectivity data is valid")
    }

    /// A single tree wrapped in x and, with a half-turn, in y; the z faces
    /// stay open. The rotated wrap reverses two of the four identified
    /// z-parallel edges.
    pub fn rotwrap() -> Self {
        const TREE_TO_TREE: [Topidx; 6] = [
         0,  0,  0,  0,  0,  0,
        ];

        const TREE_TO_FACE: [i8; 6] = [
         1,  0, 21, 20,  4,  5,
        ];

        const TREE_TO_EDGE: [Topidx; 12] = [
        -1, -1, -1, -1, -1, -1, -1, -1,  0,  0,  0,  0,
        ];

        const ETT_OFFSET: [Topidx; 2] = [
         0,  4,
        ];

        const EDGE_TO_TREE: [Topidx; 4] = [
         0,  0,  0,  0,
        ];

        const EDGE_TO_EDGE: [i8; 4] = [
         8,  9, 22, 23,
        ];

        Self::from_arrays(
            &[],
            &[],
            &TREE_TO_TREE,
            &TREE_TO_FACE,
            &TREE_TO_EDGE,
            &ETT_OFFSET,
            &EDGE_TO_TREE,
            &EDGE_TO_EDGE,
            &[],
            &[0],
            &[],
            &[],
        )
        .expect("built-in connectivity data is valid")
    }

    /// Two trees glued on one face.
    pub fn twocubes() -> Self {
        const VERTICES: [f64; 36] = [
            0.0, 0.0, 0.0,
            1.0, 0.0, 0.0,
            2.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            1.0, 1.0, 0.0,
            2.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
            1.0, 0.0, 1.0,
            2.0, 0.0, 1.0,
            0.0, 1.0, 1.0,
            1.0, 1.0, 1.0,
            2.0, 1.0, 1.0,
        ];

        const TREE_TO_VERTEX: [Topidx; 16] = [
            0, 1, 3, 4, 6, 7, 9, 10,
            1, 2, 4, 5, 7, 8, 10, 11,
        ];

        const TREE_TO_TREE: [Topidx; 12] = [
            0, 1, 0, 0, 0, 0,
            0, 1, 1, 1, 1, 1,
        ];

        const TREE_TO_FACE: [i8; 12] = [
            0, 0, 2, 3, 4, 5,
            1, 1, 2, 3, 4, 5,
        ];

        Self::from_arrays(
            &VERTICES,
            &TREE_TO_VERTEX,
            &TREE_TO_TREE,
            &TREE_TO_FACE,
            &[],
            &[0],
            &[],
            &[],
            &[],
            &[0],
            &[],
            &[],
        )
        .expect("built-in connectivity data is valid")
    }

    /// Two trees stacked in x whose outward faces are identified through
    /// periodicity, so every face of the column is interior.
    pub fn twowrap() -> Self {
        const TREE_TO_TREE: [Topidx; 12] = [
         1,  1,  0,  0,  0,  0,
         0,  0,  1,  1,  1,  1,
        ];

        const TREE_TO_FACE: [i8; 12] = [
         1,  0,  2,  3,  4,  5,
         1,  0,  2,  3,  4,  5,
        ];

        Self::from_arrays(
            &[],
            &[],
            &TREE_TO_TREE,
            &TREE_TO_FACE,
            &[],
            &[0],
            &[],
            &[],
            &[],
            &[0],
            &[],
            &[],
        )
        .expect("built-in connectivity data is valid")
    }

    /// Eight unit cubes in a 2x2x2 block, seven of them rotated against
    /// the first. Every face orientation code occurs, several edge sides
    /// are direction-reversed, and the shared lattice vertices stay
    /// consistent, which makes this arrangement a stress case for the
    /// validator and the completer alike.
    pub fn rotcubes() -> Self {
        const VERTICES: [f64; 81] = [
        0.0, 0.0, 0.0,
        1.0, 0.0, 0.0,
        2.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        1.0, 1.0, 0.0,
        2.0, 1.0, 0.0,
        0.0, 2.0, 0.0,
        1.0, 2.0, 0.0,
        2.0, 2.0, 0.0,
        0.0, 0.0, 1.0,
        1.0, 0.0, 1.0,
        2.0, 0.0, 1.0,
        0.0, 1.0, 1.0,
        1.0, 1.0, 1.0,
        2.0, 1.0, 1.0,
        0.0, 2.0, 1.0,
        1.0, 2.0, 1.0,
        2.0, 2.0, 1.0,
        0.0, 0.0, 2.0,
        1.0, 0.0, 2.0,
        2.0, 0.0, 2.0,
        0.0, 1.0, 2.0,
        1.0, 1.0, 2.0,
        2.0, 1.0, 2.0,
        0.0, 2.0, 2.0,
        1.0, 2.0, 2.0,
        2.0, 2.0, 2.0,
        ];

        const TREE_TO_VERTEX: [Topidx; 64] = [
         0,  1,  3,  4,  9, 10, 12, 13,
         2,  5,  1,  4, 11, 14, 10, 13,
        12, 13,  3,  4, 15, 16,  6,  7,
         4, 13,  5, 14,  7, 16,  8, 17,
        18,  9, 21, 12, 19, 10, 22, 13,
        22, 23, 19, 20, 13, 14, 10, 11,
        22, 21, 25, 24, 13, 12, 16, 15,
        25, 22, 16, 13, 26, 23, 17, 14,
        ];

        const TREE_TO_TREE: [Topidx; 48] = [
         0,  1,  0,  2,  0,  4,
         1,  3,  1,  0,  1,  5,
         2,  3,  6,  2,  0,  2,
         3,  7,  2,  3,  1,  3,
         4,  0,  4,  6,  4,  5,
         4,  5,  7,  5,  5,  1,
         7,  6,  4,  6,  6,  2,
         7,  5,  7,  3,  6,  7,
        ];

        const TREE_TO_FACE: [i8; 48] = [
         0,  3,  2, 16,  4,  1,
         0, 16,  2,  1,  4, 23,
         0,  8, 11,  3, 15,  5,
         0,  9,  7,  3, 13,  5,
         0,  5,  2, 14,  4, 12,
        17,  1,  1,  3,  4, 23,
        10,  1, 15,  3,  4,  8,
         0,  2,  2,  7,  6,  5,
        ];

        const TREE_TO_EDGE: [Topidx; 96] = [
        -1, -1, -1,  0, -1, -1, -1,  1, -1, -1, -1,  2,
        -1, -1, -1,  1, -1, -1, -1,  3, -1, -1, -1,  2,
         0, -1, -1, -1, -1,  2, -1, -1, -1,  4, -1, -1,
         2, -1, -1, -1, -1,  3, -1, -1, -1,  4, -1, -1,
        -1, -1, -1,  5, -1, -1, -1,  1, -1, -1, -1,  0,
        -1, -1,  3, -1, -1, -1,  1, -1,  5, -1, -1, -1,
        -1, -1,  0, -1, -1, -1,  4, -1,  5, -1, -1, -1,
        -1,  4, -1, -1, -1,  5, -1, -1, -1, -1, -1,  3,
        ];

        const ETT_OFFSET: [Topidx; 7] = [
         0,  4,  8, 12, 16, 20, 24,
        ];

        const EDGE_TO_TREE: [Topidx; 24] = [
         0,  2,  4,  6,  0,  1,  4,  5,  0,  1,  2,  3,
         1,  3,  5,  7,  2,  3,  6,  7,  4,  5,  6,  7,
        ];

        const EDGE_TO_EDGE: [i8; 24] = [
         3,  0, 11, 14,  7,  3,  7, 18, 11, 11, 17,  0,
         7, 17, 14, 23,  9,  9,  6, 13,  3,  8,  8,  5,
        ];

        const TREE_TO_CORNER: [Topidx; 64] = [
        -1, -1, -1, -1, -1, -1, -1,  0,
        -1, -1, -1, -1, -1, -1, -1,  0,
        -1,  0, -1, -1, -1, -1, -1, -1,
        -1,  0, -1, -1, -1, -1, -1, -1,
        -1, -1, -1, -1, -1, -1, -1,  0,
        -1, -1, -1, -1,  0, -1, -1, -1,
        -1, -1, -1, -1,  0, -1, -1, -1,
        -1, -1, -1,  0, -1, -1, -1, -1,
        ];

        const CTT_OFFSET: [Topidx; 2] = [
         0,  8,
        ];

        const CORNER_TO_TREE: [Topidx; 8] = [
         0,  1,  2,  3,  4,  5,  6,  7,
        ];

        const CORNER_TO_CORNER: [i8; 8] = [
         7,  7,  1,  1,  7,  4,  4,  3,
        ];

        Self::from_arrays(
            &VERTICES,
            &TREE_TO_VERTEX,
            &TREE_TO_TREE,
            &TREE_TO_FACE,
            &TREE_TO_EDGE,
            &ETT_OFFSET,
            &EDGE_TO_TREE,
            &EDGE_TO_EDGE,
            &TREE_TO_CORNER,
            &CTT_OFFSET,
            &CORNER_TO_TREE,
            &CORNER_TO_CORNER,
        )
        .expect("built-in connectivity data is valid")
    }

    /// Twenty-four trees tiling a spherical shell, four per patch in the
    /// order right, bottom, left, top, back, front. The 26 vertices sit on
    /// the surface grid with the radial direction collapsed, so this
    /// connectivity is not a candidate for `complete`.
    pub fn shell() -> Self {
        const VERTICES: [f64; 78] = [
        1.0, -1.0, -1.0,
        1.0, 0.0, -1.0,
        1.0, -1.0, 0.0,
        1.0, 0.0, 0.0,
        1.0, 1.0, -1.0,
        1.0, 1.0, 0.0,
        1.0, -1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
        -1.0, -1.0, -1.0,
        -1.0, 0.0, -1.0,
        0.0, -1.0, -1.0,
        0.0, 0.0, -1.0,
        -1.0, 1.0, -1.0,
        0.0, 1.0, -1.0,
        -1.0, -1.0, 0.0,
        -1.0, 0.0, 0.0,
        -1.0, -1.0, 1.0,
        -1.0, 0.0, 1.0,
        -1.0, 1.0, 0.0,
        -1.0, 1.0, 1.0,
        0.0, -1.0, 1.0,
        0.0, 0.0, 1.0,
        0.0, 1.0, 1.0,
        0.0, 1.0, 0.0,
        0.0, -1.0, 0.0,
        ];

        const TREE_TO_VERTEX: [Topidx; 192] = [
         0,  1,  2,  3,  0,  1,  2,  3,
         1,  4,  3,  5,  1,  4,  3,  5,
         2,  3,  6,  7,  2,  3,  6,  7,
         3,  5,  7,  8,  3,  5,  7,  8,
         9, 10, 11, 12,  9, 10, 11, 12,
        10, 13, 12, 14, 10, 13, 12, 14,
        11, 12,  0,  1, 11, 12,  0,  1,
        12, 14,  1,  4, 12, 14,  1,  4,
         9, 15, 10, 16,  9, 15, 10, 16,
        15, 17, 16, 18, 15, 17, 16, 18,
        10, 16, 13, 19, 10, 16, 13, 19,
        16, 18, 19, 20, 16, 18, 19, 20,
        17, 21, 18, 22, 17, 21, 18, 22,
        21,  6, 22,  7, 21,  6, 22,  7,
        18, 22, 20, 23, 18, 22, 20, 23,
        22,  7, 23,  8, 22,  7, 23,  8,
        20, 23, 19, 24, 20, 23, 19, 24,
        23,  8, 24,  5, 23,  8, 24,  5,
        19, 24, 13, 14, 19, 24, 13, 14,
        24,  5, 14,  4, 24,  5, 14,  4,
         9, 11, 15, 25,  9, 11, 15, 25,
        11,  0, 25,  2, 11,  0, 25,  2,
        15, 25, 17, 21, 15, 25, 17, 21,
        25,  2, 21,  6, 25,  2, 21,  6,
        ];

        const TREE_TO_TREE: [Topidx; 144] = [
        21,  1,  6,  2,  0,  0,
         0, 19,  7,  3,  1,  1,
        23,  3,  0, 13,  2,  2,
         2, 17,  1, 15,  3,  3,
        20,  5,  8,  6,  4,  4,
         4, 18, 10,  7,  5,  5,
        21,  7,  4,  0,  6,  6,
         6, 19,  5,  1,  7,  7,
         4,  9, 20, 10,  8,  8,
         8, 12, 22, 11,  9,  9,
         5, 11,  8, 18, 10, 10,
        10, 14,  9, 16, 11, 11,
         9, 13, 22, 14, 12, 12,
        12,  2, 23, 15, 13, 13,
        11, 15, 12, 16, 14, 14,
        14,  3, 13, 17, 15, 15,
        11, 17, 14, 18, 16, 16,
        16,  3, 15, 19, 17, 17,
        10, 19, 16,  5, 18, 18,
        18,  1, 17,  7, 19, 19,
         8, 21,  4, 22, 20, 20,
        20,  0,  6, 23, 21, 21,
         9, 23, 20, 12, 22, 22,
        22,  2, 21, 13, 23, 23,
        ];

        const TREE_TO_FACE: [i8; 144] = [
         1,  0,  3,  2,  4,  5,
         1,  7,  3,  2,  4,  5,
         1,  0,  3,  1,  4,  5,
         1,  7,  3,  1,  4,  5,
         2,  0,  0,  2,  4,  5,
         1,  3,  0,  2,  4,  5,
         2,  0,  3,  2,  4,  5,
         1,  3,  3,  2,  4,  5,
         2,  0,  0,  2,  4,  5,
         1,  0,  0,  2,  4,  5,
         2,  0,  3,  6,  4,  5,
         1,  0,  3,  6,  4,  5,
         1,  0,  3,  2,  4,  5,
         1,  3,  3,  2,  4,  5,
         1,  0,  3,  2,  4,  5,
         1,  3,  3,  2,  4,  5,
         9,  0,  3,  2,  4,  5,
         1,  7,  3,  2,  4,  5,
         9,  0,  3,  1,  4,  5,
         1,  7,  3,  1,  4,  5,
         2,  0,  0,  2,  4,  5,
         1,  0,  0,  2,  4,  5,
         2,  0,  3,  2,  4,  5,
         1,  0,  3,  2,  4,  5,
        ];

        const TREE_TO_EDGE: [Topidx; 288] = [
        -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  1,  2,
        -1, -1, -1, -1, -1, -1, -1, -1,  0, -1,  2,  3,
        -1, -1, -1, -1, -1, -1, -1, -1,  1,  2, -1,  4,
        -1, -1, -1, -1, -1, -1, -1, -1,  2,  3,  4, -1,
        -1, -1, -1, -1, -1, -1, -1, -1, -1,  5,  6,  7,
        -1, -1, -1, -1, -1, -1, -1, -1,  5, -1,  7,  8,
        -1, -1, -1, -1, -1, -1, -1, -1,  6,  7, -1,  0,
        -1, -1, -1, -1, -1, -1, -1, -1,  7,  8,  0, -1,
        -1, -1, -1, -1, -1, -1, -1, -1, -1,  9,  5, 10,
        -1, -1, -1, -1, -1, -1, -1, -1,  9, -1, 10, 11,
        -1, -1, -1, -1, -1, -1, -1, -1,  5, 10, -1, 12,
        -1, -1, -1, -1, -1, -1, -1, -1, 10, 11, 12, -1,
        -1, -1, -1, -1, -1, -1, -1, -1, -1, 13, 11, 14,
        -1, -1, -1, -1, -1, -1, -1, -1, 13, -1, 14,  4,
        -1, -1, -1, -1, -1, -1, -1, -1, 11, 14, -1, 15,
        -1, -1, -1, -1, -1, -1, -1, -1, 14,  4, 15, -1,
        -1, -1, -1, -1, -1, -1, -1, -1, -1, 15, 12, 16,
        -1, -1, -1, -1, -1, -1, -1, -1, 15, -1, 16,  3,
        -1, -1, -1, -1, -1, -1, -1, -1, 12, 16, -1,  8,
        -1, -1, -1, -1, -1, -1, -1, -1, 16,  3,  8, -1,
        -1, -1, -1, -1, -1, -1, -1, -1, -1,  6,  9, 17,
        -1, -1, -1, -1, -1, -1, -1, -1,  6, -1, 17,  1,
        -1, -1, -1, -1, -1, -1, -1, -1,  9, 17, -1, 13,
        -1, -1, -1, -1, -1, -1, -1, -1, 17,  1, 13, -1,
        ];

        const ETT_OFFSET: [Topidx; 19] = [
         0,  4,  8, 12, 16, 20, 24, 28, 32, 36, 40, 44,
        48, 52, 56, 60, 64, 68, 72,
        ];

        const EDGE_TO_TREE: [Topidx; 72] = [
         0,  1,  6,  7,  0,  2, 21, 23,  0,  1,  2,  3,
         1,  3, 17, 19,  2,  3, 13, 15,  4,  5,  8, 10,
         4,  6, 20, 21,  4,  5,  6,  7,  5,  7, 18, 19,
         8,  9, 20, 22,  8,  9, 10, 11,  9, 11, 12, 14,
        10, 11, 16, 18, 12, 13, 22, 23, 12, 13, 14, 15,
        14, 15, 16, 17, 16, 17, 18, 19, 20, 21, 22, 23,
        ];

        const EDGE_TO_EDGE: [i8; 72] = [
         9,  8, 11, 10, 10,  8, 11,  9, 11, 10,  9,  8,
        11,  9, 11,  9, 11, 10, 11,  9,  9,  8, 10,  8,
        10,  8,  9,  8, 11, 10,  9,  8, 11,  9, 11, 10,
         9,  8, 10,  8, 11, 10,  9,  8, 11,  9, 10,  8,
        11, 10, 10,  8,  9,  8, 11, 10, 11, 10,  9,  8,
        11, 10,  9,  8, 11, 10,  9,  8, 11, 10,  9,  8,
        ];

        Self::from_arrays(
            &VERTICES,
            &TREE_TO_VERTEX,
            &TREE_TO_TREE,
            &TREE_TO_FACE,
            &TREE_TO_EDGE,
            &ETT_OFFSET,
            &EDGE_TO_TREE,
            &EDGE_TO_EDGE,
            &[],
            &[0],
            &[],
            &[],
        )
        .expect("built-in connectivity data is valid")
    }

    /// Thirteen trees filling a solid sphere: six outer-shell patches, six
    /// inner-shell patches and a center cube. The eight vertices sit at
    /// the corner directions with the radial direction collapsed, so this
    /// connectivity is not a candidate for `complete`.
    pub fn sphere() -> Self {
        const VERTICES: [f64; 24] = [
        -1.0, -1.0, -1.0,
        1.0, -1.0, -1.0,
        -1.0, -1.0, 1.0,
        1.0, -1.0, 1.0,
        -1.0, 1.0, 1.0,
        1.0, 1.0, 1.0,
        -1.0, 1.0, -1.0,
        1.0, 1.0, -1.0,
        ];

        const TREE_TO_VERTEX: [Topidx; 104] = [
         0,  1,  2,  3,  0,  1,  2,  3,
         2,  3,  4,  5,  2,  3,  4,  5,
         4,  5,  6,  7,  4,  5,  6,  7,
         1,  7,  3,  5,  1,  7,  3,  5,
         0,  6,  1,  7,  0,  6,  1,  7,
         0,  2,  6,  4,  0,  2,  6,  4,
         0,  1,  2,  3,  0,  1,  2,  3,
         2,  3,  4,  5,  2,  3,  4,  5,
         4,  5,  6,  7,  4,  5,  6,  7,
         1,  7,  3,  5,  1,  7,  3,  5,
         0,  6,  1,  7,  0,  6,  1,  7,
         0,  2,  6,  4,  0,  2,  6,  4,
         0,  1,  6,  7,  2,  3,  4,  5,
        ];

        const TREE_TO_TREE: [Topidx; 78] = [
         5,  3,  4,  1,  6,  0,
         5,  3,  0,  2,  7,  1,
         5,  3,  1,  4,  8,  2,
         0,  2,  4,  1,  9,  3,
         0,  2,  5,  3, 10,  4,
         4,  1,  0,  2, 11,  5,
        11,  9, 10,  7, 12,  0,
        11,  9,  6,  8, 12,  1,
        11,  9,  7, 10, 12,  2,
         6,  8, 10,  7, 12,  3,
         6,  8, 11,  9, 12,  4,
        10,  7,  6,  8, 12,  5,
        11,  9,  6,  8, 10,  7,
        ];

        const TREE_TO_FACE: [i8; 78] = [
         2,  0,  0,  2,  5,  5,
         1,  3,  3,  2,  5,  5,
         9,  7,  3,  1,  5,  5,
         1,  7,  3,  1,  5,  5,
         2,  3,  0,  2,  5,  5,
         2,  0,  0,  6,  5,  5,
         2,  0,  0,  2,  2,  4,
         1,  3,  3,  2,  5,  4,
         9,  7,  3,  1, 15,  4,
         1,  7,  3,  1,  1,  4,
         2,  3,  0,  2,  4,  4,
         2,  0,  0,  6,  0,  4,
         4,  4,  4, 16,  4,  4,
        ];

        const TREE_TO_EDGE: [Topidx; 156] = [
         0,  1, -1, -1,  2,  3, -1, -1, -1, -1, -1, -1,
         1,  4, -1, -1,  5,  6, -1, -1, -1, -1, -1, -1,
         4,  7, -1, -1,  8,  9, -1, -1, -1, -1, -1, -1,
        10,  6, -1, -1,  3,  9, -1, -1, -1, -1, -1, -1,
        11, 10, -1, -1,  0,  7, -1, -1, -1, -1, -1, -1,
         2,  8, -1, -1, 11,  5, -1, -1, -1, -1, -1, -1,
        -1, -1,  0,  1, -1, -1,  2,  3, -1, -1, -1, -1,
        -1, -1,  1,  4, -1, -1,  5,  6, -1, -1, -1, -1,
        -1, -1,  4,  7, -1, -1,  8,  9, -1, -1, -1, -1,
        -1, -1, 10,  6, -1, -1,  3,  9, -1, -1, -1, -1,
        -1, -1, 11, 10, -1, -1,  0,  7, -1, -1, -1, -1,
        -1, -1,  2,  8, -1, -1, 11,  5, -1, -1, -1, -1,
        -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        ];

        const ETT_OFFSET: [Topidx; 13] = [
         0,  4,  8, 12, 16, 20, 24, 28, 32, 36, 40, 44,
        48,
        ];

        const EDGE_TO_TREE: [Topidx; 48] = [
         0,  4,  6, 10,  0,  1,  6,  7,  0,  5,  6, 11,
         0,  3,  6,  9,  1,  2,  7,  8,  1,  5,  7, 11,
         1,  3,  7,  9,  2,  4,  8, 10,  2,  5,  8, 11,
         2,  3,  8,  9,  3,  4,  9, 10,  4,  5, 10, 11,
        ];

        const EDGE_TO_EDGE: [i8; 48] = [
         0,  4,  2,  6,  1,  0,  3,  2,  4,  0,  6,  2,
         5,  4,  7,  6,  1,  0,  3,  2,  4,  5,  6,  7,
         5,  1,  7,  3,  1,  5,  3,  7,  4, 13,  6, 15,
         5, 17,  7, 19,  0,  1,  2,  3,  0,  4,  2,  6,
        ];

        Self::from_arrays(
            &VERTICES,
            &TREE_TO_VERTEX,
            &TREE_TO_TREE,
            &TREE_TO_FACE,
            &TREE_TO_EDGE,
            &ETT_OFFSET,
            &EDGE_TO_TREE,
            &EDGE_TO_EDGE,
            &[],
            &[0],
            &[],
            &[],
        )
        .expect("built-in connectivity data is valid")
    }

    /// `m * n * p` trees on an integer lattice with per-axis periodicity.
    ///
    /// An edge bucket is recorded when all four cells around a lattice
    /// edge exist under the periodicity flags, a corner bucket when all
    /// eight cells around a lattice corner exist; everything else is
    /// already described by face reciprocity.
    pub fn brick(m: usize, n: usize, p: usize, px: bool, py: bool, pz: bool) -> Self {
        assert!(m > 0 && n > 0 && p > 0, "brick dimensions must be positive");

        let dims = [m, n, p];
        let periodic = [px, py, pz];
        let num_trees = m * n * p;

        let tree_id = |pos: [usize; 3]| (pos[0] + m * (pos[1] + n * pos[2])) as Topidx;
        let cell = |pos: [isize; 3]| -> Option<[usize; 3]> {
            let mut out = [0; 3];
            for axis in 0..3 {
                let extent = dims[axis] as isize;
                let v = pos[axis];
                out[axis] = if periodic[axis] {
                    v.rem_euclid(extent) as usize
                } else if (0..extent).contains(&v) {
                    v as usize
                } else {
                    return None;
                };
            }
            Some(out)
        };
        let corner_bit = |c: usize, axis: usize| (c >> axis) & 1;

        let mut vertices = Vec::with_capacity(3 * (m + 1) * (n + 1) * (p + 1));
        for k in 0..=p {
            for j in 0..=n {
                for i in 0..=m {
                    vertices.extend([i as f64, j as f64, k as f64]);
                }
            }
        }

        let mut tree_to_vertex = Vec::with_capacity(CHILDREN * num_trees);
        let mut tree_to_tree = Vec::with_capacity(FACES * num_trees);
        let mut tree_to_face = Vec::with_capacity(FACES * num_trees);
        let mut edge_classes = BTreeSet::new();
        let mut corner_classes = BTreeSet::new();

        for k in 0..p {
            for j in 0..n {
                for i in 0..m {
                    let pos = [i, j, k];
                    let tree = tree_id(pos);

                    for c in 0..CHILDREN {
                        let vid = (i + corner_bit(c, 0))
                            + (m + 1) * ((j + corner_bit(c, 1)) + (n + 1) * (k + corner_bit(c, 2)));
                        tree_to_vertex.push(vid as Topidx);
                    }

                    for face in 0..FACES {
                        let axis = face / 2;
                        let mut npos = [pos[0] as isize, pos[1] as isize, pos[2] as isize];
                        npos[axis] += if face % 2 == 1 { 1 } else { -1 };
                        match cell(npos) {
                            Some(ncell) => {
                                tree_to_tree.push(tree_id(ncell));
                                tree_to_face.push((face ^ 1) as i8);
                            }
                            None => {
                                tree_to_tree.push(tree);
                                tree_to_face.push(face as i8);
                            }
                        }
                    }

                    for edge in 0..EDGES {
                        let axis = edge / 4;
                        let transverse = match axis {
                            0 => [1, 2],
                            1 => [0, 2],
                            _ => [0, 1],
                        };
                        let bits = transverse
                            .map(|a| corner_bit(EDGE_CORNERS[edge][0] as usize, a));
                        if let Some(sides) =
                            edge_sides(pos, axis, transverse, bits, &cell, &tree_id)
                        {
                            edge_classes.insert(sides);
                        }
                    }

                    for corner in 0..CHILDREN {
                        let mut sides = Vec::with_capacity(CHILDREN);
                        let mut complete = true;
                        for d in 0..CHILDREN {
                            let mut npos = [pos[0] as isize, pos[1] as isize, pos[2] as isize];
                            for axis in 0..3 {
                                if corner_bit(d, axis) == 1 {
                                    npos[axis] += if corner_bit(corner, axis) == 1 { 1 } else { -1 };
                                }
                            }
                            match cell(npos) {
                                Some(ncell) => sides.push((tree_id(ncell), (corner ^ d) as i8)),
                                None => {
                                    complete = false;
                                    break;
                                }
                            }
                        }
                        if complete {
                            sides.sort_unstable();
                            sides.dedup();
                            corner_classes.insert(sides);
                        }
                    }
                }
            }
        }

        let mut tree_to_edge = vec![-1; if edge_classes.is_empty() { 0 } else { EDGES * num_trees }];
        let mut ett_offset = vec![0];
        let mut edge_to_tree = Vec::new();
        let mut edge_to_edge = Vec::new();
        for (id, sides) in edge_classes.iter().enumerate() {
            for &(tree, edge) in sides {
                tree_to_edge[EDGES * tree as usize + edge as usize] = id as Topidx;
                edge_to_tree.push(tree);
                edge_to_edge.push(edge);
            }
            ett_offset.push(edge_to_tree.len() as Topidx);
        }

        let mut tree_to_corner =
            vec![-1; if corner_classes.is_empty() { 0 } else { CHILDREN * num_trees }];
        let mut ctt_offset = vec![0];
        let mut corner_to_tree = Vec::new();
        let mut corner_to_corner = Vec::new();
        for (id, sides) in corner_classes.iter().enumerate() {
            for &(tree, corner) in sides {
                tree_to_corner[CHILDREN * tree as usize + corner as usize] = id as Topidx;
                corner_to_tree.push(tree);
                corner_to_corner.push(corner);
            }
            ctt_offset.push(corner_to_tree.len() as Topidx);
        }

        Self::from_arrays(
            &vertices,
            &tree_to_vertex,
            &tree_to_tree,
            &tree_to_face,
            &tree_to_edge,
            &ett_offset,
            &edge_to_tree,
            &edge_to_edge,
            &tree_to_corner,
            &ctt_offset,
            &corner_to_tree,
            &corner_to_corner,
        )
        .expect("brick construction keeps all invariants")
    }
}

/// The four (tree, local edge) sides around one lattice edge, or `None`
/// when a neighboring cell is missing. Sides are sorted and deduplicated
/// so that equal macro-edges found from different cells coincide.
fn edge_sides(
    pos: [usize; 3],
    axis: usize,
    transverse: [usize; 2],
    bits: [usize; 2],
    cell: &impl Fn([isize; 3]) -> Option<[usize; 3]>,
    tree_id: &impl Fn([usize; 3]) -> Topidx,
) -> Option<Vec<(Topidx, i8)>> {
    let mut sides = Vec::with_capacity(4);
    for (du, dv) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let mut npos = [pos[0] as isize, pos[1] as isize, pos[2] as isize];
        let mut nbits = bits;
        if du == 1 {
            npos[transverse[0]] += if bits[0] == 1 { 1 } else { -1 };
            nbits[0] ^= 1;
        }
        if dv == 1 {
            npos[transverse[1]] += if bits[1] == 1 { 1 } else { -1 };
            nbits[1] ^= 1;
        }
        let ncell = cell(npos)?;
        let nedge = 4 * axis + nbits[0] + 2 * nbits[1];
        sides.push((tree_id(ncell), nedge as i8));
    }
    sides.sort_unstable();
    sides.dedup();
    Some(sides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unitcube_counts() {
        let conn = Connectivity::unitcube();
        assert_eq!(conn.num_vertices(), 8);
        assert_eq!(conn.num_trees(), 1);
        assert_eq!(conn.num_edges(), 0);
        assert_eq!(conn.num_corners(), 0);
    }

    #[test]
    fn periodic_collapses_edges_and_corners() {
        let conn = Connectivity::periodic();
        assert_eq!(conn.num_edges(), 3);
        assert_eq!(conn.num_corners(), 1);
        for edge in 0..3 {
            let (trees, codes) = conn.edge_bucket(edge);
            assert_eq!(trees, [0, 0, 0, 0]);
            assert!(codes.iter().all(|&c| c < 12), "all sides run the same way");
        }
        let (trees, corners) = conn.corner_bucket(0);
        assert_eq!(trees, [0; 8]);
        assert_eq!(corners, [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn single_periodic_brick_is_the_periodic_cube() {
        assert_eq!(
            Connectivity::brick(1, 1, 1, true, true, true),
            Connectivity::periodic()
        );
    }

    #[test]
    fn two_cell_brick_is_twocubes() {
        assert_eq!(
            Connectivity::brick(2, 1, 1, false, false, false),
            Connectivity::twocubes()
        );
    }

    #[test]
    fn brick_records_interior_edges_and_corners() {
        let conn = Connectivity::brick(2, 2, 2, false, false, false);
        assert_eq!(conn.num_trees(), 8);
        assert_eq!(conn.num_vertices(), 27);
        // The central line of each axis contributes two unit segments,
        // each surrounded by four trees.
        assert_eq!(conn.num_edges(), 6);
        assert_eq!(conn.num_corners(), 1);
        let (trees, _) = conn.corner_bucket(0);
        assert_eq!(trees.len(), 8);
    }

    #[test]
    fn fully_periodic_brick_wraps_every_face() {
        let conn = Connectivity::brick(2, 2, 2, true, true, true);
        for tree in 0..8 {
            for face in 0..6 {
                assert!(!conn.face_is_boundary(tree, face));
            }
        }
        assert_eq!(conn.num_edges(), 24);
        assert_eq!(conn.num_corners(), 8);
    }

    #[test]
    fn rotcubes_exercises_every_orientation() {
        let conn = Connectivity::rotcubes();
        let mut seen = [false; 4];
        for tree in 0..conn.num_trees() as Topidx {
            for face in 0..6 {
                if !conn.face_is_boundary(tree, face) {
                    let (_, _, orientation) = conn.face_neighbor(tree, face);
                    seen[orientation] = true;
                }
            }
        }
        assert_eq!(seen, [true; 4]);
        assert!(
            conn.edge_to_edge.iter().any(|&code| code >= 12),
            "some edge side is direction-reversed"
        );
    }

    #[test]
    fn shell_counts() {
        let conn = Connectivity::shell();
        assert_eq!(conn.num_trees(), 24);
        assert_eq!(conn.num_vertices(), 26);
        assert_eq!(conn.num_edges(), 18);
        assert_eq!(conn.num_corners(), 0);
        for edge in 0..18 {
            assert_eq!(conn.edge_bucket(edge).0.len(), 4);
        }
    }

    #[test]
    fn sphere_counts() {
        let conn = Connectivity::sphere();
        assert_eq!(conn.num_trees(), 13);
        assert_eq!(conn.num_vertices(), 8);
        assert_eq!(conn.num_edges(), 12);
        assert_eq!(conn.num_corners(), 0);
    }

    #[test]
    fn sphere_shells_are_radially_stacked() {
        let conn = Connectivity::sphere();
        for patch in 0..6 {
            // Outer tree below, inner tree above, center cube inside.
            let (below, _, _) = conn.face_neighbor(patch, 4);
            assert_eq!(below, patch + 6);
            let (inner_below, _, _) = conn.face_neighbor(patch + 6, 4);
            assert_eq!(inner_below, 12);
            assert!(conn.face_is_boundary(patch, 5));
        }
    }
}
