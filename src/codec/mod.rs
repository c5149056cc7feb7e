//! Codec Module
//!
//! Serialization of matrices to and from byte sinks/sources.
//!
//! Two formats:
//! - **Text** (`text`): human-readable whitespace-separated decimal grid;
//!   carries no shape information, the reader is told the dimension out of
//!   band.
//! - **Binary** (`binary`): self-describing little-endian format with a
//!   magic/version/dimension header and a CRC32 footer; the contiguous
//!   layout serializes its element block with a single bulk write.

pub mod binary;
pub mod text;
