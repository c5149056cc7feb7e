//! # gridstore
//!
//! Storage for square integer matrices with:
//! - Two allocation layouts: one contiguous block, or per-row blocks
//! - Fallible allocation with an optional byte budget
//! - Whitespace-separated text format (round-trippable)
//! - Checksummed binary format with single-block bulk transfer
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Binaries                                │
//! │        (gridstore-cli, gridstore-roundtrip)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   MatrixStore                                │
//! │        (allocation budget, atomic save/load, verify)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Matrix    │          │    Codec    │
//!   │ (contiguous │          │ (text and   │
//!   │ / scattered)│          │  binary)    │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod matrix;
pub mod codec;
pub mod opts;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GridError, Result};
pub use config::{Config, Layout};
pub use matrix::Matrix;
pub use store::MatrixStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gridstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
