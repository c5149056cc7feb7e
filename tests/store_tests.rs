//! Tests for the matrix store
//!
//! These tests verify:
//! - Allocation honoring the configured layout, dimension and memory limit
//! - Atomic text/binary saves and loads through real files
//! - No partial file left at or near the destination after a failed save
//! - Fill-rule verification reporting the first mismatch

use std::fs;

use gridstore::{Config, GridError, Layout, MatrixStore};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn store_with(dimension: usize, layout: Layout) -> MatrixStore {
    let config = Config::builder().dimension(dimension).layout(layout).build();
    MatrixStore::new(config)
}

fn product_rule(i: usize, j: usize) -> i64 {
    (i * j) as i64
}

// =============================================================================
// Allocation Tests
// =============================================================================

#[test]
fn test_allocate_uses_config() {
    let store = store_with(7, Layout::Scattered);
    let matrix = store.allocate().unwrap();

    assert_eq!(matrix.dimension(), 7);
    assert_eq!(matrix.layout(), Layout::Scattered);
}

#[test]
fn test_allocate_respects_memory_limit() {
    for layout in [Layout::Contiguous, Layout::Scattered] {
        let config = Config::builder()
            .dimension(64)
            .layout(layout)
            .memory_limit(1024)
            .build();
        let store = MatrixStore::new(config);

        let err = store.allocate().unwrap_err();
        assert!(matches!(err, GridError::Allocation(_)));
    }
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_text_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("matrix.txt");

    let store = store_with(10, Layout::Contiguous);
    let mut matrix = store.allocate().unwrap();
    matrix.fill(product_rule);

    store.save_text(&matrix, &path).unwrap();
    let restored = store.load_text(&path).unwrap();

    assert_eq!(matrix, restored);
    assert_eq!(restored.get(3, 4), 12);
}

#[test]
fn test_binary_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("matrix.bin");

    let store = store_with(6, Layout::Scattered);
    let mut matrix = store.allocate().unwrap();
    matrix.fill(|i, j| (i as i64) - (j as i64));

    store.save_binary(&matrix, &path).unwrap();
    let restored = store.load_binary(&path).unwrap();

    assert_eq!(matrix, restored);
}

#[test]
fn test_save_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("matrix.txt");

    let store = store_with(4, Layout::Contiguous);
    let matrix = store.allocate().unwrap();
    store.save_text(&matrix, &path).unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["matrix.txt"]);
}

#[test]
fn test_failed_save_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();

    // A file where the save wants a directory, so creation fails
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, b"x").unwrap();
    let path = blocker.join("matrix.txt");

    let store = store_with(4, Layout::Contiguous);
    let matrix = store.allocate().unwrap();

    let err = store.save_text(&matrix, &path).unwrap_err();
    assert!(matches!(err, GridError::Io(_)));

    // Only the blocker remains; no destination, no temp file
    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["blocker"]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let store = store_with(4, Layout::Contiguous);

    let err = store.load_text(&temp.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, GridError::Io(_)));
}

#[test]
fn test_load_with_larger_dimension_is_parse_error() {
    // A 2x2 file read as 3x3 runs out of tokens
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("matrix.txt");

    let small = store_with(2, Layout::Contiguous);
    let mut matrix = small.allocate().unwrap();
    matrix.fill(product_rule);
    small.save_text(&matrix, &path).unwrap();

    let big = store_with(3, Layout::Contiguous);
    let err = big.load_text(&path).unwrap_err();
    assert!(matches!(err, GridError::Parse(_)));
}

// =============================================================================
// Verification Tests
// =============================================================================

#[test]
fn test_verify_accepts_matching_matrix() {
    let store = store_with(10, Layout::Scattered);
    let mut matrix = store.allocate().unwrap();
    matrix.fill(product_rule);

    assert_eq!(store.verify(&matrix, product_rule), None);
}

#[test]
fn test_verify_reports_first_mismatch() {
    let store = store_with(5, Layout::Contiguous);
    let mut matrix = store.allocate().unwrap();
    matrix.fill(product_rule);
    matrix.set(2, 3, 99);
    matrix.set(4, 4, 77);

    let mismatch = store.verify(&matrix, product_rule).unwrap();
    assert_eq!(mismatch.row, 2);
    assert_eq!(mismatch.column, 3);
    assert_eq!(mismatch.expected, 6);
    assert_eq!(mismatch.found, 99);
}
