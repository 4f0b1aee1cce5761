//! The macro-mesh connectivity: trees glued at faces, edges and corners.

pub mod tables;

mod complete;
mod factories;
mod transform;
mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use transform::{CornerInfo, CornerTransform, EdgeInfo, EdgeTransform, FaceTransform};

use crate::helpers::aliases::Vec3d;
use std::fmt::Display;
use std::mem::size_of;
use tabled::{Table, Tabled};
use tables::{CHILDREN, EDGES, FACES};

/// Topology index type, wide enough for any tree/vertex/edge/corner count.
pub type Topidx = i32;

/// How far neighbor relations reach when a consumer walks the forest.
///
/// The discriminants are fixed; they are shared with on-disk and
/// inter-process encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ConnectType {
    Face = 31,
    Edge = 32,
    Corner = 33,
}

impl ConnectType {
    pub const DEFAULT: ConnectType = ConnectType::Edge;
    pub const FULL: ConnectType = ConnectType::Corner;

    /// Dimension-like rank of the connection: 1, 2 or 3.
    #[inline]
    pub fn as_int(self) -> i32 {
        match self {
            ConnectType::Face => 1,
            ConnectType::Edge => 2,
            ConnectType::Corner => 3,
        }
    }
}

impl Display for ConnectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectType::Face => "FACE",
            ConnectType::Edge => "EDGE",
            ConnectType::Corner => "CORNER",
        };
        write!(f, "{}", name)
    }
}

/// Bulk construction was handed arrays that violate the structural
/// invariants of the connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidConnectivity;

/// The macro-mesh graph. Owns every buffer it references; immutable in the
/// steady state, so shared references may be used freely across threads.
///
/// All arrays keep the flat external layout so that saving and loading is
/// a plain dump: six entries per tree in `tree_to_tree`/`tree_to_face`,
/// twelve in `tree_to_edge`, eight in `tree_to_vertex`/`tree_to_corner`,
/// and compressed ragged buckets behind `ett_offset`/`ctt_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connectivity {
    pub(crate) vertices: Vec<Vec3d>,
    pub(crate) tree_to_vertex: Vec<Topidx>,
    pub(crate) tree_to_tree: Vec<Topidx>,
    pub(crate) tree_to_face: Vec<i8>,
    pub(crate) tree_to_edge: Vec<Topidx>,
    pub(crate) ett_offset: Vec<Topidx>,
    pub(crate) edge_to_tree: Vec<Topidx>,
    pub(crate) edge_to_edge: Vec<i8>,
    pub(crate) tree_to_corner: Vec<Topidx>,
    pub(crate) ctt_offset: Vec<Topidx>,
    pub(crate) corner_to_tree: Vec<Topidx>,
    pub(crate) corner_to_corner: Vec<i8>,
    tree_attr: Option<Vec<u8>>,
}

impl Connectivity {
    /// Allocates a connectivity with all arrays sized for the given counts.
    /// The contents are unspecified until populated by the caller.
    pub fn new(
        num_vertices: usize,
        num_trees: usize,
        num_edges: usize,
        num_ett: usize,
        num_corners: usize,
        num_ctt: usize,
    ) -> Self {
        Self {
            vertices: vec![Vec3d::zeros(); num_vertices],
            tree_to_vertex: vec![0; if num_vertices > 0 { CHILDREN * num_trees } else { 0 }],
            tree_to_tree: vec![0; FACES * num_trees],
            tree_to_face: vec![0; FACES * num_trees],
            tree_to_edge: vec![-1; if num_edges > 0 { EDGES * num_trees } else { 0 }],
            ett_offset: vec![0; num_edges + 1],
            edge_to_tree: vec![0; num_ett],
            edge_to_edge: vec![0; num_ett],
            tree_to_corner: vec![-1; if num_corners > 0 { CHILDREN * num_trees } else { 0 }],
            ctt_offset: vec![0; num_corners + 1],
            corner_to_tree: vec![0; num_ctt],
            corner_to_corner: vec![0; num_ctt],
            tree_attr: None,
        }
    }

    /// Deep-copies caller-provided arrays into a new connectivity and
    /// validates it.
    #[allow(clippy::too_many_arguments)]
    pub fn from_arrays(
        vertices: &[f64],
        tree_to_vertex: &[Topidx],
        tree_to_tree: &[Topidx],
        tree_to_face: &[i8],
        tree_to_edge: &[Topidx],
        ett_offset: &[Topidx],
        edge_to_tree: &[Topidx],
        edge_to_edge: &[i8],
        tree_to_corner: &[Topidx],
        ctt_offset: &[Topidx],
        corner_to_tree: &[Topidx],
        corner_to_corner: &[i8],
    ) -> Result<Self, InvalidConnectivity> {
        if vertices.len() % 3 != 0 {
            return Err(InvalidConnectivity);
        }

        let conn = Self {
            vertices: vertices
                .chunks_exact(3)
                .map(|v| Vec3d::new(v[0], v[1], v[2]))
                .collect(),
            tree_to_vertex: tree_to_vertex.to_vec(),
            tree_to_tree: tree_to_tree.to_vec(),
            tree_to_face: tree_to_face.to_vec(),
            tree_to_edge: tree_to_edge.to_vec(),
            ett_offset: ett_offset.to_vec(),
            edge_to_tree: edge_to_tree.to_vec(),
            edge_to_edge: edge_to_edge.to_vec(),
            tree_to_corner: tree_to_corner.to_vec(),
            ctt_offset: ctt_offset.to_vec(),
            corner_to_tree: corner_to_tree.to_vec(),
            corner_to_corner: corner_to_corner.to_vec(),
            tree_attr: None,
        };

        if conn.is_valid() {
            Ok(conn)
        } else {
            Err(InvalidConnectivity)
        }
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_trees(&self) -> usize {
        self.tree_to_tree.len() / FACES
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.ett_offset.len().saturating_sub(1)
    }

    #[inline]
    pub fn num_corners(&self) -> usize {
        self.ctt_offset.len().saturating_sub(1)
    }

    #[inline]
    pub fn num_edge_entries(&self) -> usize {
        self.edge_to_tree.len()
    }

    #[inline]
    pub fn num_corner_entries(&self) -> usize {
        self.corner_to_tree.len()
    }

    #[inline]
    pub fn vertex(&self, vertex: Topidx) -> &Vec3d {
        &self.vertices[vertex as usize]
    }

    /// The eight corner-vertex indices of a tree, in zyx corner order.
    #[inline]
    pub fn tree_vertices(&self, tree: Topidx) -> &[Topidx] {
        let start = CHILDREN * tree as usize;
        &self.tree_to_vertex[start..start + CHILDREN]
    }

    /// Decodes the face entry of `tree` at local face `face` into
    /// (neighbor tree, neighbor face, orientation).
    #[inline]
    pub fn face_neighbor(&self, tree: Topidx, face: usize) -> (Topidx, usize, usize) {
        assert!(face < FACES, "face index out of range");
        let idx = FACES * tree as usize + face;
        let code = self.tree_to_face[idx];
        (
            self.tree_to_tree[idx],
            (code % FACES as i8) as usize,
            (code / FACES as i8) as usize,
        )
    }

    /// True when local face `face` of `tree` has no distinct neighbor.
    #[inline]
    pub fn face_is_boundary(&self, tree: Topidx, face: usize) -> bool {
        let (ntree, nface, _) = self.face_neighbor(tree, face);
        ntree == tree && nface == face
    }

    /// The edge table index of a tree's local edge, or -1 when the edge
    /// carries no record.
    #[inline]
    pub fn tree_edge(&self, tree: Topidx, edge: usize) -> Topidx {
        assert!(edge < EDGES, "edge index out of range");
        if self.tree_to_edge.is_empty() {
            return -1;
        }
        self.tree_to_edge[EDGES * tree as usize + edge]
    }

    /// The corner table index of a tree's local corner, or -1.
    #[inline]
    pub fn tree_corner(&self, tree: Topidx, corner: usize) -> Topidx {
        assert!(corner < CHILDREN, "corner index out of range");
        if self.tree_to_corner.is_empty() {
            return -1;
        }
        self.tree_to_corner[CHILDREN * tree as usize + corner]
    }

    /// All sides of one macro-edge: parallel slices of tree indices and
    /// local-edge codes (`edge + 12 * flip`).
    #[inline]
    pub fn edge_bucket(&self, edge: Topidx) -> (&[Topidx], &[i8]) {
        let lo = self.ett_offset[edge as usize] as usize;
        let hi = self.ett_offset[edge as usize + 1] as usize;
        (&self.edge_to_tree[lo..hi], &self.edge_to_edge[lo..hi])
    }

    /// All sides of one macro-corner.
    #[inline]
    pub fn corner_bucket(&self, corner: Topidx) -> (&[Topidx], &[i8]) {
        let lo = self.ctt_offset[corner as usize] as usize;
        let hi = self.ctt_offset[corner as usize + 1] as usize;
        (&self.corner_to_tree[lo..hi], &self.corner_to_corner[lo..hi])
    }

    /// Enables or disables the per-tree attribute byte array. Idempotent.
    pub fn set_tree_attr(&mut self, enable: bool) {
        if enable {
            if self.tree_attr.is_none() {
                self.tree_attr = Some(vec![0; self.num_trees()]);
            }
        } else {
            self.tree_attr = None;
        }
    }

    #[inline]
    pub fn tree_attrs(&self) -> Option<&[u8]> {
        self.tree_attr.as_deref()
    }

    #[inline]
    pub fn tree_attrs_mut(&mut self) -> Option<&mut [u8]> {
        self.tree_attr.as_deref_mut()
    }

    /// Total memory footprint: the container itself plus every owned buffer.
    pub fn memory_used(&self) -> usize {
        size_of::<Self>()
            + self.vertices.capacity() * size_of::<Vec3d>()
            + self.tree_to_vertex.capacity() * size_of::<Topidx>()
            + self.tree_to_tree.capacity() * size_of::<Topidx>()
            + self.tree_to_face.capacity() * size_of::<i8>()
            + self.tree_to_edge.capacity() * size_of::<Topidx>()
            + self.ett_offset.capacity() * size_of::<Topidx>()
            + self.edge_to_tree.capacity() * size_of::<Topidx>()
            + self.edge_to_edge.capacity() * size_of::<i8>()
            + self.tree_to_corner.capacity() * size_of::<Topidx>()
            + self.ctt_offset.capacity() * size_of::<Topidx>()
            + self.corner_to_tree.capacity() * size_of::<Topidx>()
            + self.corner_to_corner.capacity() * size_of::<i8>()
            + self.tree_attr.as_ref().map_or(0, |a| a.capacity())
    }
}

#[derive(Tabled)]
struct CountRow {
    entity: &'static str,
    count: usize,
    entries: usize,
}

impl Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = [
            CountRow {
                entity: "vertices",
                count: self.num_vertices(),
                entries: self.tree_to_vertex.len(),
            },
            CountRow {
                entity: "trees",
                count: self.num_trees(),
                entries: self.tree_to_tree.len(),
            },
            CountRow {
                entity: "edges",
                count: self.num_edges(),
                entries: self.num_edge_entries(),
            },
            CountRow {
                entity: "corners",
                count: self.num_corners(),
                entries: self.num_corner_entries(),
            },
        ];

        writeln!(f, "### CONNECTIVITY ###")?;
        writeln!(f, "{}", Table::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_type_codes() {
        assert_eq!(ConnectType::Face as i32, 31);
        assert_eq!(ConnectType::Edge as i32, 32);
        assert_eq!(ConnectType::Corner as i32, 33);
        assert_eq!(ConnectType::DEFAULT, ConnectType::Edge);
        assert_eq!(ConnectType::FULL, ConnectType::Corner);
        assert_eq!(ConnectType::Face.as_int(), 1);
        assert_eq!(ConnectType::Edge.as_int(), 2);
        assert_eq!(ConnectType::Corner.as_int(), 3);
        assert_eq!(ConnectType::Corner.to_string(), "CORNER");
    }

    #[test]
    fn tree_attr_is_idempotent() {
        let mut conn = Connectivity::unitcube();
        assert!(conn.tree_attrs().is_none());

        conn.set_tree_attr(true);
        conn.tree_attrs_mut().unwrap()[0] = 7;
        conn.set_tree_attr(true);
        assert_eq!(conn.tree_attrs().unwrap(), &[7]);

        conn.set_tree_attr(false);
        conn.set_tree_attr(false);
        assert!(conn.tree_attrs().is_none());
    }

    #[test]
    fn memory_used_counts_buffers() {
        let conn = Connectivity::brick(2, 2, 2, false, false, false);
        let base = conn.memory_used();
        assert!(base > size_of::<Connectivity>());

        let mut with_attr = conn.clone();
        with_attr.set_tree_attr(true);
        assert_eq!(with_attr.memory_used(), base + with_attr.num_trees());
    }

    #[test]
    fn from_arrays_rejects_broken_reciprocity() {
        let unit = Connectivity::unitcube();
        let vertices: Vec<f64> = unit.vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect();

        // Point the -x face at the +x face without the matching back-link.
        let mut ttf = unit.tree_to_face.clone();
        ttf[0] = 1;

        let result = Connectivity::from_arrays(
            &vertices,
            &unit.tree_to_vertex,
            &unit.tree_to_tree,
            &ttf,
            &[],
            &[0],
            &[],
            &[],
            &[],
            &[0],
            &[],
            &[],
        );
        assert_eq!(result, Err(InvalidConnectivity));
    }
}
