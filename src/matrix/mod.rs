//! Matrix Module
//!
//! Square integer matrices with two allocation layouts.
//!
//! ## Layouts
//! ```text
//! Contiguous                         Scattered
//! ┌───────────────────────────┐      ┌───┐   ┌───────────┐
//! │ row 0 │ row 1 │ ... │ r n │      │ 0 ├──▶│   row 0   │
//! └───────────────────────────┘      ├───┤   └───────────┘
//!   one flat block, element (i, j)   │ 1 ├──▶┌───────────┐
//!   at offset i * dimension + j      ├───┤   │   row 1   │
//!                                    │...│   └───────────┘
//!                                    └───┘   each row its own block
//! ```
//!
//! The contiguous layout keeps all elements in one block, so the whole
//! matrix can be handed to bulk I/O as a single slice and row-major
//! traversal stays cache-friendly. The scattered layout allocates each row
//! independently; rows may land anywhere on the heap.
//!
//! Release is `Drop`: the scattered variant drops its row blocks before the
//! outer vector, the contiguous variant drops the flat block. There is no
//! manual free pairing.

mod alloc;

pub use alloc::AllocBudget;

use crate::config::Layout;
use crate::error::{GridError, Result};

use alloc::zeroed_block;

/// A square matrix of `i64` elements
///
/// Every element (i, j) with `0 <= i, j < dimension` is readable and
/// writable once construction succeeds; rows never alias.
#[derive(Debug, Clone)]
pub struct Matrix {
    /// Side length of the square matrix
    dimension: usize,

    /// Backing storage, one of the two layouts
    storage: Storage,
}

/// Backing storage for a matrix
#[derive(Debug, Clone)]
enum Storage {
    /// One flat block of `dimension * dimension` elements
    Contiguous(Vec<i64>),

    /// `dimension` independently allocated row blocks
    Scattered(Vec<Vec<i64>>),
}

impl Matrix {
    /// Allocate a zeroed matrix backed by one contiguous block
    pub fn contiguous(dimension: usize) -> Result<Self> {
        Self::contiguous_bounded(dimension, &mut AllocBudget::unlimited())
    }

    /// Allocate a zeroed matrix with independently allocated rows
    pub fn scattered(dimension: usize) -> Result<Self> {
        Self::scattered_bounded(dimension, &mut AllocBudget::unlimited())
    }

    /// Allocate a zeroed matrix in the given layout
    pub fn with_layout(layout: Layout, dimension: usize) -> Result<Self> {
        Self::with_layout_bounded(layout, dimension, &mut AllocBudget::unlimited())
    }

    /// Allocate in the given layout, charging every block against `budget`
    pub fn with_layout_bounded(
        layout: Layout,
        dimension: usize,
        budget: &mut AllocBudget,
    ) -> Result<Self> {
        match layout {
            Layout::Contiguous => Self::contiguous_bounded(dimension, budget),
            Layout::Scattered => Self::scattered_bounded(dimension, budget),
        }
    }

    /// Contiguous allocation against an explicit budget
    ///
    /// The element count is checked for overflow before any reservation, so
    /// an absurd dimension fails with `Allocation` rather than aborting.
    pub fn contiguous_bounded(dimension: usize, budget: &mut AllocBudget) -> Result<Self> {
        let elements = dimension.checked_mul(dimension).ok_or_else(|| {
            GridError::Allocation(format!(
                "element count overflow for dimension {}",
                dimension
            ))
        })?;

        let data = zeroed_block(elements, budget)?;

        Ok(Self {
            dimension,
            storage: Storage::Contiguous(data),
        })
    }

    /// Scattered allocation against an explicit budget
    ///
    /// If row k fails to allocate, rows 0..k-1 and the outer vector are
    /// dropped before the error surfaces; no partial matrix escapes.
    pub fn scattered_bounded(dimension: usize, budget: &mut AllocBudget) -> Result<Self> {
        // Outer array of row handles is an allocation too
        budget.charge(dimension.saturating_mul(std::mem::size_of::<Vec<i64>>()))?;

        let mut rows: Vec<Vec<i64>> = Vec::new();
        rows.try_reserve_exact(dimension)?;

        for _ in 0..dimension {
            rows.push(zeroed_block(dimension, budget)?);
        }

        Ok(Self {
            dimension,
            storage: Storage::Scattered(rows),
        })
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Side length of the matrix
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Layout of the backing storage
    pub fn layout(&self) -> Layout {
        match self.storage {
            Storage::Contiguous(_) => Layout::Contiguous,
            Storage::Scattered(_) => Layout::Scattered,
        }
    }

    /// Borrow row `i` as a slice
    ///
    /// Panics if `i >= dimension`.
    pub fn row(&self, i: usize) -> &[i64] {
        match &self.storage {
            Storage::Contiguous(data) => &data[i * self.dimension..(i + 1) * self.dimension],
            Storage::Scattered(rows) => &rows[i],
        }
    }

    /// Borrow row `i` as a mutable slice
    ///
    /// Panics if `i >= dimension`.
    pub fn row_mut(&mut self, i: usize) -> &mut [i64] {
        match &mut self.storage {
            Storage::Contiguous(data) => &mut data[i * self.dimension..(i + 1) * self.dimension],
            Storage::Scattered(rows) => &mut rows[i],
        }
    }

    /// Read element (i, j)
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.row(i)[j]
    }

    /// Write element (i, j)
    ///
    /// Panics if either index is out of range.
    pub fn set(&mut self, i: usize, j: usize, value: i64) {
        self.row_mut(i)[j] = value;
    }

    /// The whole element block as one slice
    ///
    /// `Some` only for the contiguous layout; scattered rows cannot be
    /// viewed as a single block.
    pub fn as_flat(&self) -> Option<&[i64]> {
        match &self.storage {
            Storage::Contiguous(data) => Some(data),
            Storage::Scattered(_) => None,
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Set every element (i, j) to `f(i, j)`
    pub fn fill(&mut self, f: impl Fn(usize, usize) -> i64) {
        for i in 0..self.dimension {
            let row = self.row_mut(i);
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = f(i, j);
            }
        }
    }
}

/// Element-wise equality, independent of layout
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        if self.dimension != other.dimension {
            return false;
        }
        (0..self.dimension).all(|i| self.row(i) == other.row(i))
    }
}

impl Eq for Matrix {}
