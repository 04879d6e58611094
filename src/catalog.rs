//! Entry normalization: INI sections → [`System`] and [`Entry`] records.
//!
//! The catalog files were written by hand and by several generations of a
//! desktop tool, so the same field shows up as `Name`, `NAME`, or `name`.
//! Each logical field is looked up under those three spellings in that order;
//! the first non-empty value wins. When several spellings coexist the
//! capitalized one is authoritative, which is why this is an ordered candidate
//! list and not a case-folded map.
//!
//! ## Fallbacks
//!
//! | Field   | Keys tried                 | Fallback     |
//! |---------|----------------------------|--------------|
//! | name    | `Name` `NAME` `name`       | section key  |
//! | dir     | `Dir` `DIR` `dir`          | section key  |
//! | year    | `Year` `YEAR` `year`       | empty        |
//! | rating  | `Rating` `RATING` `rating` | empty        |
//! | comment | `Comment` `COMMENT` `comment` | empty     |
//!
//! An entry whose name and directory both end up empty cannot be addressed
//! and is discarded.

use crate::ini::{self, Section};
use crate::types::{Entry, EntryType, System};
use std::path::Path;

/// Case variants of `field`, in lookup priority order.
fn key_variants(field: &str) -> [String; 3] {
    let mut chars = field.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    [capitalized, field.to_uppercase(), field.to_lowercase()]
}

/// Look up a logical field by its capitalized, uppercase, and lowercase keys.
pub fn lookup_field<'a>(section: &'a Section, field: &str) -> Option<&'a str> {
    key_variants(field)
        .iter()
        .filter_map(|key| section.get(key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

fn field_or_empty(section: &Section, field: &str) -> String {
    lookup_field(section, field).unwrap_or_default().to_string()
}

/// Build an [`Entry`] from one section of an entry-type INI file.
///
/// Returns `None` when neither a name nor a directory can be resolved.
pub fn normalize_entry(key: &str, section: &Section, entry_type: EntryType) -> Option<Entry> {
    let name = lookup_field(section, "name").unwrap_or(key).to_string();
    let dir = lookup_field(section, "dir").unwrap_or(key).to_string();
    if name.is_empty() && dir.is_empty() {
        return None;
    }
    Some(Entry {
        name,
        dir,
        year: field_or_empty(section, "year"),
        rating: field_or_empty(section, "rating"),
        comment: field_or_empty(section, "comment"),
        entry_type,
    })
}

/// Build a [`System`] from one section of `Systems.ini`.
pub fn normalize_system(key: &str, section: &Section) -> Option<System> {
    if key.is_empty() {
        return None;
    }
    let dir = lookup_field(section, "dir").unwrap_or(key).to_string();
    Some(System {
        name: key.to_string(),
        dir,
        fields: section.clone(),
    })
}

/// Load every system declared in the root catalog, in file order.
///
/// Returns `None` if the catalog is missing or cannot be decoded.
pub fn load_systems(catalog_path: &Path) -> Option<Vec<System>> {
    let doc = ini::load_ini(catalog_path)?;
    Some(
        doc.iter()
            .filter_map(|(key, section)| normalize_system(key, section))
            .collect(),
    )
}

/// Load the entries of one type for a system.
///
/// `system_root` is the system's source directory (`Systems/<dir>`). A missing
/// INI file contributes no entries; `None` distinguishes that from a file
/// whose sections were all discarded.
pub fn load_entries(system_root: &Path, entry_type: EntryType) -> Option<Vec<Entry>> {
    let doc = ini::load_ini(&system_root.join(entry_type.ini_file_name()))?;
    let entries = doc
        .iter()
        .filter_map(|(key, section)| {
            let entry = normalize_entry(key, section, entry_type);
            if entry.is_none() {
                log::debug!("discarding unnamed {entry_type} section in {}", system_root.display());
            }
            entry
        })
        .collect();
    Some(entries)
}
