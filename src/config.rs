//! Configuration for gridstore
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a matrix store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Matrix Configuration
    // -------------------------------------------------------------------------
    /// Side length of the square matrix
    pub dimension: usize,

    /// Allocation layout for new matrices
    pub layout: Layout,

    // -------------------------------------------------------------------------
    // Resource Configuration
    // -------------------------------------------------------------------------
    /// Max bytes a single allocation request may consume (None = unbounded)
    pub memory_limit: Option<usize>,
}

/// Allocation layout for matrix storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One flat block holding all elements; rows are stride views into it
    Contiguous,

    /// Independently allocated per-row blocks behind an outer array
    Scattered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimension: 10,
            layout: Layout::Contiguous,
            memory_limit: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the matrix dimension
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = dimension;
        self
    }

    /// Set the allocation layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Set the allocation byte limit
    pub fn memory_limit(mut self, bytes: usize) -> Self {
        self.config.memory_limit = Some(bytes);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
