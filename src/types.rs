//! Catalog types shared by the normalizer, projector, and renderer.

use crate::ini::Section;
use crate::naming::{entry_slug, slugify};
use std::fmt;

/// The three kinds of catalog entries, in the order they are processed.
///
/// The label doubles as the INI file stem (`Games.ini`) and the source
/// directory name (`Systems/nes/Games/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Emulators,
    Games,
    Demos,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [EntryType::Emulators, EntryType::Games, EntryType::Demos];

    pub fn label(self) -> &'static str {
        match self {
            EntryType::Emulators => "Emulators",
            EntryType::Games => "Games",
            EntryType::Demos => "Demos",
        }
    }

    pub fn ini_file_name(self) -> String {
        format!("{}.ini", self.label())
    }

    /// Suffix appended to display titles; primary titles get none.
    pub fn title_suffix(self) -> &'static str {
        match self {
            EntryType::Emulators => " - Emulator",
            EntryType::Games => "",
            EntryType::Demos => " - Demo",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A gaming platform from `Systems.ini`.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    /// Section key; the system's identity and display name.
    pub name: String,
    /// Source directory under `Systems/` (the `Dir` field, or the name).
    pub dir: String,
    /// Every field of the section as written.
    pub fields: Section,
}

impl System {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// One game, emulator, or demo under a system.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub dir: String,
    pub year: String,
    pub rating: String,
    pub comment: String,
    pub entry_type: EntryType,
}

impl Entry {
    pub fn slug(&self) -> String {
        entry_slug(&self.name)
    }
}
