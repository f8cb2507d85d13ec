// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dense row-major trajectory: one row per evaluation time, one column per
//! state variable. Times are not stored; row `i` belongs to `times[i]`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("row {row} has {actual} values, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("a trajectory needs at least one row and one column")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Trajectory {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(ShapeError::Empty);
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    row: index,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    pub fn set_row(&mut self, index: usize, values: &[f64]) {
        self.data[index * self.cols..(index + 1) * self.cols].copy_from_slice(values);
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn column(&self, index: usize) -> Vec<f64> {
        self.iter_rows().map(|row| row[index]).collect()
    }

    pub fn last_row(&self) -> Option<&[f64]> {
        self.rows.checked_sub(1).map(|i| self.row(i))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// `(row, col, value)` of the first NaN or infinity, scanning row by row.
    pub fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        if self.cols == 0 {
            return None;
        }
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (i / self.cols, i % self.cols, self.data[i]))
    }
}
