use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coordinate-format matrix as stored in the snapshot files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triplets<T> {
    pub rows: usize,
    pub cols: usize,
    /// `(row, col, value)` entries; zero values are ignored
    pub entries: Vec<(usize, usize, T)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("entry ({row}, {col}) outside a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Immutable compressed-sparse-row matrix.
///
/// Only nonzero entries are stored. Within a row, column indices are
/// strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<T>,
}

/// Borrowed view of one matrix row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a, T> {
    pub indices: &'a [usize],
    pub values: &'a [T],
}

impl<'a, T: Copy> Row<'a, T> {
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + 'a {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<T: Copy + Default + PartialEq> SparseMatrix<T> {
    /// Builds a matrix from coordinate entries. When a coordinate repeats,
    /// the last entry wins.
    pub fn from_triplets(triplets: Triplets<T>) -> Result<Self, MatrixError> {
        let Triplets {
            rows,
            cols,
            mut entries,
        } = triplets;

        if let Some(&(row, col, _)) = entries.iter().find(|(r, c, _)| *r >= rows || *c >= cols) {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }

        // Stable sort keeps file order among duplicates, so the last one is kept below.
        entries.sort_by_key(|&(r, c, _)| (r, c));

        let mut indptr = vec![0; rows + 1];
        let mut indices = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        let mut entry_rows = Vec::with_capacity(entries.len());

        for (i, &(r, c, v)) in entries.iter().enumerate() {
            let superseded = entries
                .get(i + 1)
                .is_some_and(|&(next_r, next_c, _)| next_r == r && next_c == c);
            if superseded || v == T::default() {
                continue;
            }
            entry_rows.push(r);
            indices.push(c);
            values.push(v);
        }

        for &r in &entry_rows {
            indptr[r + 1] += 1;
        }
        for r in 0..rows {
            indptr[r + 1] += indptr[r];
        }

        Ok(Self {
            rows,
            cols,
            indptr,
            indices,
            values,
        })
    }

    /// An all-zero matrix
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// The nonzero entries of row `r`; empty when `r` is out of range
    pub fn row(&self, r: usize) -> Row<'_, T> {
        if r >= self.rows {
            return Row {
                indices: &[],
                values: &[],
            };
        }
        let (start, end) = (self.indptr[r], self.indptr[r + 1]);
        Row {
            indices: &self.indices[start..end],
            values: &self.values[start..end],
        }
    }

    pub fn transpose(&self) -> Self {
        let mut counts = vec![0usize; self.cols + 1];
        for &c in &self.indices {
            counts[c + 1] += 1;
        }
        for c in 0..self.cols {
            counts[c + 1] += counts[c];
        }
        let indptr = counts.clone();
        let mut next = counts;
        let mut indices = vec![0; self.nnz()];
        let mut values = vec![T::default(); self.nnz()];

        for r in 0..self.rows {
            for (c, v) in self.row(r).iter() {
                let slot = next[c];
                indices[slot] = r;
                values[slot] = v;
                next[c] += 1;
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            indptr,
            indices,
            values,
        }
    }
}
