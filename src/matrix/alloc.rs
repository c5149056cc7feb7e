//! Fallible allocation helpers
//!
//! All matrix memory goes through `zeroed_block`, which sizes the request
//! with checked arithmetic, charges it against a byte budget, and reserves
//! through `try_reserve_exact` so exhaustion surfaces as an error instead
//! of an abort.

use crate::error::{GridError, Result};

/// Bytes per matrix element
pub(crate) const ELEMENT_SIZE: usize = std::mem::size_of::<i64>();

/// A byte budget charged by every allocation request
///
/// An unlimited budget never refuses. A limited budget refuses the first
/// request it cannot cover, which gives configs a memory ceiling and gives
/// tests a deterministic way to fail allocation mid-sequence.
#[derive(Debug, Clone)]
pub struct AllocBudget {
    /// Remaining bytes, or None for unbounded
    remaining: Option<usize>,
}

impl AllocBudget {
    /// A budget that never refuses
    pub fn unlimited() -> Self {
        Self { remaining: None }
    }

    /// A budget capped at `bytes`
    pub fn limited(bytes: usize) -> Self {
        Self {
            remaining: Some(bytes),
        }
    }

    /// Budget from an optional config limit
    pub fn from_limit(limit: Option<usize>) -> Self {
        Self { remaining: limit }
    }

    /// Charge `bytes` against the budget
    pub fn charge(&mut self, bytes: usize) -> Result<()> {
        match self.remaining {
            Some(left) if bytes > left => Err(GridError::Allocation(format!(
                "request for {} bytes exceeds remaining budget of {} bytes",
                bytes, left
            ))),
            Some(left) => {
                self.remaining = Some(left - bytes);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Allocate a zeroed block of `len` elements
pub(crate) fn zeroed_block(len: usize, budget: &mut AllocBudget) -> Result<Vec<i64>> {
    let bytes = len.checked_mul(ELEMENT_SIZE).ok_or_else(|| {
        GridError::Allocation(format!("byte size overflow for {} elements", len))
    })?;
    budget.charge(bytes)?;

    let mut block = Vec::new();
    block.try_reserve_exact(len)?;
    block.resize(len, 0);
    Ok(block)
}
