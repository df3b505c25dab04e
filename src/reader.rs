//! A reader for the line-oriented text representation of a sparse binary
//! matrix: one character per entry (`'0'` or `'1'`), one line per row.
//!
//! The reader first condenses the stream into a compressed sparse row (CSR)
//! form (the column ordinals of the 1-entries plus per-row offsets) and
//! then assembles the dancing-links structure row by row. Rows may have
//! different lengths; the matrix is as wide as the widest row, and shorter
//! rows simply carry no entries in the trailing columns.

use crate::matrix::Matrix;
use log::debug;
use std::io::{self, BufRead};
use thiserror::Error;

/// The error classes of [`read_matrix`].
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input contained a character other than `'0'`, `'1'` or a newline.
    /// Positions are 1-based.
    #[error("invalid character {found:?} at line {line}, column {column}")]
    Malformed {
        /// The 1-based line of the offending byte.
        line: usize,
        /// The 1-based column of the offending byte within its line.
        column: usize,
        /// The offending byte.
        found: char,
    },
    /// The underlying stream failed.
    #[error("failed to read matrix input")]
    Io(#[from] io::Error),
}

/// Reads a sparse binary matrix from a text stream and assembles it in
/// dancing-links form.
///
/// Column labels and row tags are the respective ordinals, starting at zero.
/// A newline terminates a row; a trailing newline before end of input does
/// not produce an extra row, while an empty line produces a row with no
/// entries.
///
/// # Errors
///
/// Returns [`ReadError::Malformed`] on any character outside the alphabet
/// and [`ReadError::Io`] if the stream fails.
///
/// # Examples
///
/// ```
/// let input = "10\n01\n11\n";
/// let mut matrix = dlx_cover::read_matrix(input.as_bytes())?;
/// assert_eq!(matrix.column_count(), 2);
/// assert_eq!(matrix.row_count(), 3);
///
/// let mut remaining = 1;
/// let solution = matrix.solve(&mut remaining).expect("rows 0 and 1 cover");
/// assert_eq!(solution.len(), 2);
/// # Ok::<(), dlx_cover::ReadError>(())
/// ```
pub fn read_matrix<B: BufRead>(input: B) -> Result<Matrix<usize, usize>, ReadError> {
    // CSR form of the input: `col_ind` holds the column ordinals of the
    // 1-entries, and row i's entries occupy `col_ind[row_ptr[i]..row_ptr[i + 1]]`.
    let mut col_ind: Vec<usize> = Vec::new();
    let mut row_ptr: Vec<usize> = vec![0];
    let mut max_cols = 0;
    for (line_ix, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let mut col = 0;
        for (byte_ix, &byte) in line.iter().enumerate() {
            match byte {
                b'1' => {
                    col_ind.push(col);
                    col += 1;
                }
                b'0' => col += 1,
                _ => {
                    return Err(ReadError::Malformed {
                        line: line_ix + 1,
                        column: byte_ix + 1,
                        found: char::from(byte),
                    })
                }
            }
        }
        row_ptr.push(col_ind.len());
        max_cols = max_cols.max(col);
    }

    let row_count = row_ptr.len() - 1;
    debug!("read {row_count} rows over {max_cols} columns from text input");
    let mut matrix = Matrix::new((0..max_cols).collect());
    for row in 0..row_count {
        matrix.add_row(row, &col_ind[row_ptr[row]..row_ptr[row + 1]]);
    }
    Ok(matrix)
}
