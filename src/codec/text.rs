//! Text matrix format
//!
//! ## Format
//! ```text
//! dimension lines, each:
//!   dimension decimal integers separated by single spaces, then '\n'
//! ```
//!
//! No header and no dimension field; the reader must be told the dimension
//! out of band. The reader tokenizes on any whitespace, so files with
//! trailing spaces or different line breaking read identically.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use crate::config::Layout;
use crate::error::{GridError, Result};
use crate::matrix::Matrix;

/// Write a matrix as whitespace-separated decimal text
pub fn write<W: Write>(matrix: &Matrix, sink: W) -> Result<()> {
    let mut writer = BufWriter::new(sink);

    for i in 0..matrix.dimension() {
        for (j, value) in matrix.row(i).iter().enumerate() {
            if j > 0 {
                writer.write_all(b" ")?;
            }
            write!(writer, "{}", value)?;
        }
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a `dimension x dimension` matrix from whitespace-separated text
///
/// Tokens are consumed in row-major order into a fresh matrix of the
/// requested layout. Fewer tokens than `dimension^2` or a non-integer
/// token is a `Parse` error; a partially populated matrix is never
/// returned. Tokens past `dimension^2` are ignored.
pub fn read<R: Read>(source: R, dimension: usize, layout: Layout) -> Result<Matrix> {
    let mut matrix = Matrix::with_layout(layout, dimension)?;
    let expected = dimension * dimension;

    let reader = BufReader::new(source);
    let mut filled = 0usize;

    'lines: for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            if filled == expected {
                break 'lines;
            }
            let (i, j) = (filled / dimension, filled % dimension);
            let value: i64 = token.parse().map_err(|_| {
                GridError::Parse(format!(
                    "invalid integer {:?} at row {}, column {}",
                    token, i, j
                ))
            })?;
            matrix.set(i, j, value);
            filled += 1;
        }
    }

    if filled < expected {
        return Err(GridError::Parse(format!(
            "expected {} values for a {}x{} matrix, found {}",
            expected, dimension, dimension, filled
        )));
    }

    Ok(matrix)
}
