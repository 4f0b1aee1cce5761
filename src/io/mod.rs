//! Binary serialization of connectivities.
//!
//! A single little-endian blob: an 8-byte magic, a format version, the six
//! entity counts, then the raw arrays in a fixed order with their natural
//! element sizes. Arrays whose count is zero are omitted.

use crate::connectivity::{Connectivity, InvalidConnectivity, Topidx};
use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic bytes opening every connectivity blob.
pub const MAGIC: [u8; 8] = *b"p8est\0\0\0";
/// Format version understood by this reader/writer.
pub const FORMAT_VERSION: u32 = 0x0300_0008;

#[derive(Debug)]
pub enum ReadError {
    IO(std::io::Error),
    /// Bad magic, unsupported version, or truncated payload.
    CorruptFile,
    /// The payload decoded but fails validation.
    InvalidConnectivity,
}

impl From<std::io::Error> for ReadError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            ReadError::CorruptFile
        } else {
            ReadError::IO(err)
        }
    }
}

impl From<InvalidConnectivity> for ReadError {
    #[inline]
    fn from(_: InvalidConnectivity) -> Self {
        ReadError::InvalidConnectivity
    }
}

#[derive(Debug, Default)]
pub struct ConnectivityWriter;

impl ConnectivityWriter {
    pub fn new() -> Self {
        Default::default()
    }

    /// Writes the connectivity to a file, truncating any existing content.
    pub fn write_to_file(&self, conn: &Connectivity, filepath: &Path) -> std::io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(filepath)?;
        let mut writer = BufWriter::new(file);
        self.write(conn, &mut writer)
    }

    /// Writes the connectivity blob to a buffer.
    pub fn write<TBuffer: Write>(
        &self,
        conn: &Connectivity,
        writer: &mut TBuffer,
    ) -> std::io::Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
        for count in [
            conn.num_vertices(),
            conn.num_trees(),
            conn.num_edges(),
            conn.num_edge_entries(),
            conn.num_corners(),
            conn.num_corner_entries(),
        ] {
            writer.write_all(&(count as i64).to_le_bytes())?;
        }

        for vertex in &conn.vertices {
            for coord in [vertex.x, vertex.y, vertex.z] {
                writer.write_all(&coord.to_le_bytes())?;
            }
        }
        write_topidx(writer, &conn.tree_to_vertex)?;
        write_topidx(writer, &conn.tree_to_tree)?;
        write_codes(writer, &conn.tree_to_face)?;
        write_topidx(writer, &conn.tree_to_edge)?;
        if conn.num_edges() > 0 {
            write_topidx(writer, &conn.ett_offset)?;
        }
        write_topidx(writer, &conn.edge_to_tree)?;
        write_codes(writer, &conn.edge_to_edge)?;
        write_topidx(writer, &conn.tree_to_corner)?;
        if conn.num_corners() > 0 {
            write_topidx(writer, &conn.ctt_offset)?;
        }
        write_topidx(writer, &conn.corner_to_tree)?;
        write_codes(writer, &conn.corner_to_corner)?;
        writer.flush()
    }
}

#[derive(Debug, Default)]
pub struct ConnectivityReader {
    buf4: [u8; 4],
    buf8: [u8; 8],
}

impl ConnectivityReader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads a connectivity from a file.
    pub fn read_from_file(&mut self, filepath: &Path) -> Result<Connectivity, ReadError> {
        let file = OpenOptions::new().read(true).open(filepath)?;
        let mut reader = BufReader::new(file);
        self.read(&mut reader)
    }

    /// Reads a connectivity blob from a buffer and validates it.
    pub fn read<TBuffer: Read>(
        &mut self,
        reader: &mut TBuffer,
    ) -> Result<Connectivity, ReadError> {
        reader.read_exact(&mut self.buf8)?;
        if self.buf8 != MAGIC {
            return Err(ReadError::CorruptFile);
        }
        reader.read_exact(&mut self.buf4)?;
        if u32::from_le_bytes(self.buf4) != FORMAT_VERSION {
            return Err(ReadError::CorruptFile);
        }

        let mut counts = [0usize; 6];
        for count in &mut counts {
            reader.read_exact(&mut self.buf8)?;
            let value = i64::from_le_bytes(self.buf8);
            if value < 0 || value > Topidx::MAX as i64 {
                return Err(ReadError::CorruptFile);
            }
            *count = value as usize;
        }
        let [num_vertices, num_trees, num_edges, num_ett, num_corners, num_ctt] = counts;

        let vertices = self.read_f64s(reader, 3 * num_vertices)?;
        let tree_to_vertex =
            self.read_topidx(reader, if num_vertices > 0 { 8 * num_trees } else { 0 })?;
        let tree_to_tree = self.read_topidx(reader, 6 * num_trees)?;
        let tree_to_face = self.read_codes(reader, 6 * num_trees)?;
        let tree_to_edge =
            self.read_topidx(reader, if num_edges > 0 { 12 * num_trees } else { 0 })?;
        let ett_offset = if num_edges > 0 {
            self.read_topidx(reader, num_edges + 1)?
        } else {
            vec![0]
        };
        let edge_to_tree = self.read_topidx(reader, num_ett)?;
        let edge_to_edge = self.read_codes(reader, num_ett)?;
        let tree_to_corner =
            self.read_topidx(reader, if num_corners > 0 { 8 * num_trees } else { 0 })?;
        let ctt_offset = if num_corners > 0 {
            self.read_topidx(reader, num_corners + 1)?
        } else {
            vec![0]
        };
        let corner_to_tree = self.read_topidx(reader, num_ctt)?;
        let corner_to_corner = self.read_codes(reader, num_ctt)?;

        let conn = Connectivity::from_arrays(
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
        )?;
        Ok(conn)
    }

    fn read_f64s<TBuffer: Read>(
        &mut self,
        reader: &mut TBuffer,
        count: usize,
    ) -> Result<Vec<f64>, ReadError> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            reader.read_exact(&mut self.buf8)?;
            out.push(f64::from_le_bytes(self.buf8));
        }
        Ok(out)
    }

    fn read_topidx<TBuffer: Read>(
        &mut self,
        reader: &mut TBuffer,
        count: usize,
    ) -> Result<Vec<Topidx>, ReadError> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            reader.read_exact(&mut self.buf4)?;
            out.push(Topidx::from_le_bytes(self.buf4));
        }
        Ok(out)
    }

    fn read_codes<TBuffer: Read>(
        &mut self,
        reader: &mut TBuffer,
        count: usize,
    ) -> Result<Vec<i8>, ReadError> {
        let mut out = vec![0u8; count];
        reader.read_exact(&mut out)?;
        Ok(out.into_iter().map(|b| b as i8).collect())
    }
}

fn write_topidx<TBuffer: Write>(writer: &mut TBuffer, values: &[Topidx]) -> std::io::Result<()> {
    for &value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

fn write_codes<TBuffer: Write>(writer: &mut TBuffer, values: &[i8]) -> std::io::Result<()> {
    for &value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::test_helpers::all_factories;
    use std::io::Cursor;

    fn roundtrip(conn: &Connectivity) -> Connectivity {
        let mut blob = Vec::new();
        ConnectivityWriter::new().write(conn, &mut blob).unwrap();
        ConnectivityReader::new().read(&mut Cursor::new(blob)).unwrap()
    }

    #[test]
    fn every_factory_roundtrips() {
        for conn in all_factories() {
            assert_eq!(roundtrip(&conn), conn);
        }
    }

    #[test]
    fn bad_magic_is_corrupt() {
        let mut blob = Vec::new();
        ConnectivityWriter::new()
            .write(&Connectivity::unitcube(), &mut blob)
            .unwrap();
        blob[0] = b'q';

        let result = ConnectivityReader::new().read(&mut Cursor::new(blob));
        assert!(matches!(result, Err(ReadError::CorruptFile)));
    }

    #[test]
    fn unsupported_version_is_corrupt() {
        let mut blob = Vec::new();
        ConnectivityWriter::new()
            .write(&Connectivity::unitcube(), &mut blob)
            .unwrap();
        blob[8] ^= 0xff;

        let result = ConnectivityReader::new().read(&mut Cursor::new(blob));
        assert!(matches!(result, Err(ReadError::CorruptFile)));
    }

    #[test]
    fn truncated_payload_is_corrupt() {
        let mut blob = Vec::new();
        ConnectivityWriter::new()
            .write(&Connectivity::shell(), &mut blob)
            .unwrap();
        blob.truncate(blob.len() / 2);

        let result = ConnectivityReader::new().read(&mut Cursor::new(blob));
        assert!(matches!(result, Err(ReadError::CorruptFile)));
    }

    #[test]
    fn tampered_topology_is_invalid() {
        let mut conn = Connectivity::twocubes();
        conn.tree_to_face[1] = 6; // break reciprocity, keep ranges legal
        let mut tampered = Vec::new();
        ConnectivityWriter::new().write(&conn, &mut tampered).unwrap();

        let result = ConnectivityReader::new().read(&mut Cursor::new(tampered));
        assert!(matches!(result, Err(ReadError::InvalidConnectivity)));
    }

    #[test]
    fn file_roundtrip() {
        let dir = std::env::temp_dir().join("octoforest_io_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sphere.oct");

        let conn = Connectivity::sphere();
        ConnectivityWriter::new().write_to_file(&conn, &path).unwrap();
        let loaded = ConnectivityReader::new().read_from_file(&path).unwrap();
        assert_eq!(loaded, conn);

        std::fs::remove_file(&path).unwrap();
    }
}
