//! Forgiving INI loader for the catalog configuration files.
//!
//! `Systems.ini` and the per-system `Emulators.ini` / `Games.ini` / `Demos.ini`
//! files are authored by a Windows desktop tool that saves them as UTF-16.
//! The free-text `Info.txt` descriptions are plain 8-bit text. Both are
//! decoded here so that non-ASCII titles survive the trip into the HTML.
//!
//! ## Parsing rules
//!
//! ```text
//! ; comment              ignored
//! # comment              ignored
//! orphan=value           ignored (no section yet)
//! [mario]                opens section "mario"
//! Name = Super Mario     field "Name" → "Super Mario"
//! Url=http://a?b=c       split on the first '=' only
//! garbage line           ignored (no '=')
//! ```
//!
//! Nothing in a malformed file aborts parsing: bad lines are dropped. Only a
//! file that cannot be read or decoded at all is reported as absent.

use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IniError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid UTF-16 text")]
    Utf16,
    #[error("invalid UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Fields of one section, in file order.
pub type Section = IndexMap<String, String>;

/// A parsed INI file: section name → fields, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    pub sections: IndexMap<String, Section>,
}

impl IniDocument {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Load and parse an INI file.
///
/// Returns `None` when the file does not exist or cannot be decoded. Read and
/// decode failures are logged; a missing file is not.
pub fn load_ini(path: &Path) -> Option<IniDocument> {
    if !path.is_file() {
        return None;
    }
    match read_config_text(path) {
        Ok(text) => Some(parse_ini(&text)),
        Err(e) => {
            log::warn!("could not read {}: {e}", path.display());
            None
        }
    }
}

fn read_config_text(path: &Path) -> Result<String, IniError> {
    let bytes = fs::read(path)?;
    decode_config_text(&bytes)
}

/// Decode a configuration file, honouring its byte-order mark.
///
/// Without a BOM, a zero second byte is taken as UTF-16LE and a zero first
/// byte as UTF-16BE (ASCII text saved as UTF-16 always looks like that);
/// anything else is UTF-8.
pub fn decode_config_text(bytes: &[u8]) -> Result<String, IniError> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => Ok(String::from_utf8(rest.to_vec())?),
        [_, 0x00, ..] => decode_utf16(bytes, u16::from_le_bytes),
        [0x00, _, ..] => decode_utf16(bytes, u16::from_be_bytes),
        _ => Ok(String::from_utf8(bytes.to_vec())?),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, IniError> {
    // A dangling odd byte is dropped.
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| IniError::Utf16)
}

/// Parse INI text into an ordered document. Never fails.
pub fn parse_ini(text: &str) -> IniDocument {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut doc = IniDocument::default();
    let mut current: Option<String> = None;

    for raw in normalized.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            doc.sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let Some(section) = current.as_ref() else {
            continue;
        };
        if let Some((key, value)) = line.split_once('=') {
            if let Some(fields) = doc.sections.get_mut(section) {
                fields.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    doc
}

/// Read an `Info.txt` description.
///
/// Valid UTF-8 is used as-is; anything else is read byte-per-character as
/// Latin-1. Returns `None` if the file is missing, unreadable, or blank.
pub fn read_info_text(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("could not read {}: {e}", path.display());
            return None;
        }
    };
    let text = decode_info_text(bytes);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn decode_info_text(bytes: Vec<u8>) -> String {
    let bytes = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes[3..].to_vec()
    } else {
        bytes
    };
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&b| char::from(b)).collect())
}
