//! Store Module
//!
//! Orchestration layer binding config, allocation and codecs.
//!
//! ## Responsibilities
//! - Allocate matrices per config, charging the optional memory limit
//! - Persist matrices atomically (temp file + rename); a failed save never
//!   leaves a partial file at the destination
//! - Load matrices back through either codec
//! - Verify a matrix against a fill rule, reporting the first mismatch

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::codec;
use crate::config::Config;
use crate::error::Result;
use crate::matrix::{AllocBudget, Matrix};

/// Coordinates matrix allocation and persistence
pub struct MatrixStore {
    /// Store configuration
    config: Config,
}

/// A position where a matrix disagrees with a fill rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub row: usize,
    pub column: usize,
    pub expected: i64,
    pub found: i64,
}

impl MatrixStore {
    /// Create a store with the given config
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Allocate a zeroed matrix per the config's layout and dimension
    ///
    /// The config's memory limit, if set, bounds the total bytes of the
    /// request; exceeding it fails with `Allocation` and releases any
    /// partially allocated rows.
    pub fn allocate(&self) -> Result<Matrix> {
        let mut budget = AllocBudget::from_limit(self.config.memory_limit);
        let matrix =
            Matrix::with_layout_bounded(self.config.layout, self.config.dimension, &mut budget)?;

        tracing::debug!(
            "allocated {}x{} matrix ({:?} layout)",
            self.config.dimension,
            self.config.dimension,
            self.config.layout
        );
        Ok(matrix)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Save a matrix as text (atomic)
    pub fn save_text(&self, matrix: &Matrix, path: &Path) -> Result<()> {
        self.save_with(path, |file| codec::text::write(matrix, file))
    }

    /// Save a matrix in the binary format (atomic)
    pub fn save_binary(&self, matrix: &Matrix, path: &Path) -> Result<()> {
        self.save_with(path, |file| codec::binary::write(matrix, file))
    }

    /// Load a matrix from text, using the config's dimension and layout
    pub fn load_text(&self, path: &Path) -> Result<Matrix> {
        let file = File::open(path)?;
        let matrix = codec::text::read(file, self.config.dimension, self.config.layout)?;

        tracing::debug!("loaded text matrix from {}", path.display());
        Ok(matrix)
    }

    /// Load a matrix from the binary format, into the config's layout
    pub fn load_binary(&self, path: &Path) -> Result<Matrix> {
        let file = File::open(path)?;
        let matrix = codec::binary::read(file, self.config.layout)?;

        tracing::debug!("loaded binary matrix from {}", path.display());
        Ok(matrix)
    }

    /// Write through a temp file, renaming over `path` only on success
    ///
    /// On any failure the temp file is removed, so the destination never
    /// holds partial output claiming success.
    fn save_with(
        &self,
        path: &Path,
        write_fn: impl FnOnce(&mut File) -> Result<()>,
    ) -> Result<()> {
        let tmp = tmp_path(path);

        let written = (|| -> Result<()> {
            let mut file = File::create(&tmp)?;
            write_fn(&mut file)?;
            file.sync_all()?;
            Ok(())
        })();

        match written.and_then(|()| fs::rename(&tmp, path).map_err(Into::into)) {
            Ok(()) => {
                tracing::debug!("wrote matrix to {}", path.display());
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Check every element against `rule`, returning the first mismatch
    pub fn verify(&self, matrix: &Matrix, rule: impl Fn(usize, usize) -> i64) -> Option<Mismatch> {
        for i in 0..matrix.dimension() {
            for (j, &found) in matrix.row(i).iter().enumerate() {
                let expected = rule(i, j);
                if found != expected {
                    return Some(Mismatch {
                        row: i,
                        column: j,
                        expected,
                        found,
                    });
                }
            }
        }
        None
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Sibling temp path for an in-progress save
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
