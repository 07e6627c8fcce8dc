//! Column layout of an expanded feature matrix
//!
//! An expanded matrix over `d` base features has `d + d(d-1)/2` columns:
//!
//! - columns `[0, d)` hold the base features verbatim
//! - columns `[d, d + d(d-1)/2)` hold one product per unordered pair `(i, j)`,
//!   `i < j`, ordered lexicographically by `(i, j)`
//!
//! The pair `(i, j)` lives at column `d + i(2d - i - 1)/2 + (j - i - 1)`.
//! For `d = 3` the layout is `[x0, x1, x2, x0*x1, x0*x2, x1*x2]`.

use serde::{Deserialize, Serialize};

/// What a column of the expanded matrix holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpandedColumn {
    /// Copy of base feature `i`
    Base(usize),
    /// Scaled product of base features `i` and `j`, with `i < j`
    Interaction(usize, usize),
}

/// Bijection between feature pairs and expanded column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairLayout {
    d: usize,
}

impl PairLayout {
    /// Layout for `d` base features
    pub fn new(d: usize) -> Self {
        Self { d }
    }

    /// Number of base features
    pub fn base_features(&self) -> usize {
        self.d
    }

    /// Number of unordered pairs, `d(d-1)/2`
    pub fn pair_count(&self) -> usize {
        self.d * self.d.saturating_sub(1) / 2
    }

    /// Total number of expanded columns
    pub fn width(&self) -> usize {
        self.d + self.pair_count()
    }

    /// Column holding the product of features `i` and `j`
    ///
    /// Argument order does not matter. Returns `None` when `i == j` or either
    /// index is out of range.
    pub fn column(&self, i: usize, j: usize) -> Option<usize> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if i == j || j >= self.d {
            return None;
        }
        Some(self.block_start(i) + (j - i - 1))
    }

    /// First column of the run of pairs `(i, i+1), (i, i+2), ..., (i, d-1)`
    pub(crate) fn block_start(&self, i: usize) -> usize {
        self.d + i * (2 * self.d - i - 1) / 2
    }

    /// Pair stored at `column`, or `None` for base or out-of-range columns
    pub fn pair(&self, column: usize) -> Option<(usize, usize)> {
        if column < self.d || column >= self.width() {
            return None;
        }

        let mut offset = column - self.d;
        for i in 0..self.d {
            let block = self.d - i - 1;
            if offset < block {
                return Some((i, i + 1 + offset));
            }
            offset -= block;
        }
        None
    }

    /// Describe the content of `column`
    pub fn describe(&self, column: usize) -> Option<ExpandedColumn> {
        if column < self.d {
            return Some(ExpandedColumn::Base(column));
        }
        self.pair(column)
            .map(|(i, j)| ExpandedColumn::Interaction(i, j))
    }

    /// All pairs in column order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.d).flat_map(move |i| ((i + 1)..self.d).map(move |j| (i, j)))
    }

    /// Human readable column label
    ///
    /// Uses `base_names` when it covers every base feature, `x{i}` otherwise.
    pub fn column_name(&self, column: usize, base_names: Option<&[String]>) -> Option<String> {
        let name = |i: usize| match base_names {
            Some(names) if names.len() == self.d => names[i].clone(),
            _ => format!("x{}", i),
        };

        match self.describe(column)? {
            ExpandedColumn::Base(i) => Some(name(i)),
            ExpandedColumn::Interaction(i, j) => Some(format!("{}*{}", name(i), name(j))),
        }
    }
}
