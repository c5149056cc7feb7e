//! Binary matrix format
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                       │
//! │   Magic: "GMTX" (4) | Version: u16 (2) | Dim: u64 (8)   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Data Block (dimension^2 × 8 bytes)                      │
//! │   elements as little-endian i64, row-major              │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                        │
//! │   DataCRC: u32                                          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! A contiguous matrix emits its data block with one bulk write; a
//! scattered matrix emits one write per row.

use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};

use crate::config::Layout;
use crate::error::{GridError, Result};
use crate::matrix::Matrix;

/// Magic bytes identifying a gridstore matrix file
pub(crate) const MAGIC: &[u8; 4] = b"GMTX";

/// Current binary format version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + Dimension (8) = 14 bytes
pub(crate) const HEADER_SIZE: usize = 14;

/// Footer size: DataCRC (4)
pub(crate) const FOOTER_SIZE: usize = 4;

/// Bytes per serialized element
const ELEMENT_SIZE: usize = std::mem::size_of::<i64>();

/// Write a matrix in the binary format
pub fn write<W: Write>(matrix: &Matrix, sink: W) -> Result<()> {
    let mut writer = BufWriter::new(sink);

    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(matrix.dimension() as u64).to_le_bytes())?;

    let mut hasher = crc32fast::Hasher::new();

    match matrix.as_flat() {
        // Contiguous: the whole element block in one transfer
        Some(flat) => {
            let block = encode_block(flat);
            hasher.update(&block);
            writer.write_all(&block)?;
        }
        // Scattered: one transfer per row block
        None => {
            for i in 0..matrix.dimension() {
                let block = encode_block(matrix.row(i));
                hasher.update(&block);
                writer.write_all(&block)?;
            }
        }
    }

    writer.write_all(&hasher.finalize().to_le_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read a matrix in the binary format into the requested layout
///
/// Validates magic, version and data checksum; truncation and corruption
/// are `Parse` errors.
pub fn read<R: Read>(source: R, layout: Layout) -> Result<Matrix> {
    let mut reader = BufReader::new(source);

    let mut header = [0u8; HEADER_SIZE];
    read_exact_or_truncated(&mut reader, &mut header, "header")?;

    if &header[0..4] != MAGIC {
        return Err(GridError::Parse(format!(
            "invalid magic: expected GMTX, got {:?}",
            &header[0..4]
        )));
    }

    let version = u16::from_le_bytes(header[4..6].try_into().unwrap());
    if version != VERSION {
        return Err(GridError::Parse(format!(
            "unsupported format version: {}",
            version
        )));
    }

    let dimension = u64::from_le_bytes(header[6..14].try_into().unwrap());
    let dimension = usize::try_from(dimension)
        .map_err(|_| GridError::Parse(format!("dimension {} does not fit usize", dimension)))?;

    // Allocation validates dimension^2 before any data is read
    let mut matrix = Matrix::with_layout(layout, dimension)?;

    let mut hasher = crc32fast::Hasher::new();
    let mut row_buf = vec![0u8; dimension * ELEMENT_SIZE];

    for i in 0..dimension {
        read_exact_or_truncated(&mut reader, &mut row_buf, "data block")?;
        hasher.update(&row_buf);
        for (j, chunk) in row_buf.chunks_exact(ELEMENT_SIZE).enumerate() {
            matrix.set(i, j, i64::from_le_bytes(chunk.try_into().unwrap()));
        }
    }

    let mut footer = [0u8; FOOTER_SIZE];
    read_exact_or_truncated(&mut reader, &mut footer, "footer")?;

    let stored_crc = u32::from_le_bytes(footer);
    let computed_crc = hasher.finalize();
    if stored_crc != computed_crc {
        return Err(GridError::Parse(format!(
            "data checksum mismatch: stored {:08x}, computed {:08x}",
            stored_crc, computed_crc
        )));
    }

    Ok(matrix)
}

/// Serialize a run of elements to little-endian bytes
fn encode_block(values: &[i64]) -> Vec<u8> {
    let mut block = Vec::with_capacity(values.len() * ELEMENT_SIZE);
    for value in values {
        block.extend_from_slice(&value.to_le_bytes());
    }
    block
}

/// `read_exact` with EOF reported as a `Parse` error naming the section
fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8], section: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => GridError::Parse(format!("truncated {}", section)),
        _ => GridError::Io(e),
    })
}
