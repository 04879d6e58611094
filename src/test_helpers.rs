//! Shared test utilities for the emugames-list test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! add_screenshots(tmp.path(), "nes/Games/mario", &["01.png", "02.jpg"]);
//! let report = build(&fixture_config(tmp.path()), fixed_date()).unwrap();
//!
//! assert_file(&output_dir(tmp.path()).join("systems/nes/index.html"));
//! ```

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{BuildConfig, SiteConfig};
use crate::types::{Entry, EntryType};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/catalog/` to `<tmp>/src` and return the temp dir.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog");
    copy_dir_recursive(&fixtures, &source_dir(tmp.path())).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

pub fn source_dir(tmp: &Path) -> PathBuf {
    tmp.join("src")
}

pub fn output_dir(tmp: &Path) -> PathBuf {
    tmp.join("pages")
}

/// Build config over the fixture copy, sitemap dates on.
pub fn fixture_config(tmp: &Path) -> BuildConfig {
    BuildConfig::new(source_dir(tmp), output_dir(tmp), SiteConfig::default())
}

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Write text as UTF-16LE with a byte-order mark, like the catalog editor.
pub fn write_utf16(path: &Path, text: &str) {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// Drop fake screenshot files into `Systems/<entry_rel>/Screenshots/`.
pub fn add_screenshots(tmp: &Path, entry_rel: &str, names: &[&str]) {
    let dir = source_dir(tmp)
        .join("Systems")
        .join(entry_rel)
        .join("Screenshots");
    for name in names {
        write_file(&dir.join(name), name);
    }
}

// =========================================================================
// Builders and assertions
// =========================================================================

/// A primary-title entry with no year, rating, or comment.
pub fn game(name: &str, dir: &str) -> Entry {
    Entry {
        name: name.to_string(),
        dir: dir.to_string(),
        year: String::new(),
        rating: String::new(),
        comment: String::new(),
        entry_type: EntryType::Games,
    }
}

pub fn assert_file(path: &Path) {
    assert!(path.is_file(), "expected file {}", path.display());
}

pub fn assert_no_path(path: &Path) {
    assert!(!path.exists(), "expected nothing at {}", path.display());
}

/// Every file under `root` as (relative path, bytes), sorted by path.
pub fn snapshot_tree(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}
