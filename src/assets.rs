//! Asset projection: mirror descriptions and screenshots into the output.
//!
//! The client-side catalog reads the same layout the desktop tool writes, so
//! assets keep their relative paths:
//!
//! ```text
//! Systems/<sys>/Info/Info.txt                       system description
//! Systems/<sys>/{Emulators,Games,Demos}.ini         entry lists
//! Systems/<sys>/<Type>/<entry>/Info.txt             entry description
//! Systems/<sys>/<Type>/<entry>/Screenshots/*.png    screenshots
//! Systems/<sys>/<Type>/<entry>/screenshots.json     generated index
//! ```
//!
//! Only what exists is copied. A missing description stays missing here (the
//! page renderer picks a fallback), and an entry with no qualifying images
//! gets no `screenshots.json` at all: readers treat a missing index as "no
//! screenshots".
//!
//! Failures are scoped to one file. They are logged and the asset is treated
//! as absent; nothing here aborts a build.

use crate::ini;
use crate::naming::safe_join;
use crate::types::{Entry, EntryType, System};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const INFO_FILE: &str = "Info.txt";
pub const SYSTEM_INFO_DIR: &str = "Info";
pub const SCREENSHOTS_DIR: &str = "Screenshots";
pub const SCREENSHOT_INDEX_FILE: &str = "screenshots.json";

const SCREENSHOT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What was found for a system.
#[derive(Debug, Default)]
pub struct SystemAssets {
    /// Decoded system description, if `Info/Info.txt` exists and is not blank.
    pub description: Option<String>,
}

/// What was found for one entry.
#[derive(Debug, Default)]
pub struct EntryAssets {
    /// Decoded `Info.txt`, if present and not blank.
    pub description: Option<String>,
    /// Paths relative to the entry directory, as written to the index.
    pub screenshots: Vec<String>,
}

/// Source and output roots of one system (`.../Systems/<dir>`).
#[derive(Debug, Clone)]
pub struct SystemDirs {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl SystemDirs {
    /// Resolve a system's directories, refusing directory names that would
    /// escape either tree.
    pub fn resolve(system: &System, systems_src: &Path, systems_out: &Path) -> Option<Self> {
        Some(Self {
            source: safe_join(systems_src, &system.dir)?,
            output: safe_join(systems_out, &system.dir)?,
        })
    }

    /// Source and output directories of one entry, if its `dir` is safe.
    pub fn entry_dirs(&self, entry: &Entry) -> Option<(PathBuf, PathBuf)> {
        let rel = format!("{}/{}", entry.entry_type.label(), entry.dir);
        Some((safe_join(&self.source, &rel)?, safe_join(&self.output, &rel)?))
    }
}

/// Copy a system's description and entry lists into the output tree.
pub fn project_system(dirs: &SystemDirs) -> SystemAssets {
    let info_src = dirs.source.join(SYSTEM_INFO_DIR).join(INFO_FILE);
    let description = ini::read_info_text(&info_src);
    if description.is_some() {
        let info_dst = dirs.output.join(SYSTEM_INFO_DIR).join(INFO_FILE);
        copy_logged(&info_src, &info_dst);
    }

    for entry_type in EntryType::ALL {
        let name = entry_type.ini_file_name();
        let src = dirs.source.join(&name);
        if src.is_file() {
            copy_logged(&src, &dirs.output.join(&name));
        }
    }

    SystemAssets { description }
}

/// Copy an entry's description and screenshots, writing the screenshot index.
pub fn project_entry(dirs: &SystemDirs, entry: &Entry) -> EntryAssets {
    let Some((src, dst)) = dirs.entry_dirs(entry) else {
        log::warn!(
            "skipping assets for '{}': directory '{}' is not a plain relative path",
            entry.name,
            entry.dir
        );
        return EntryAssets::default();
    };

    let info_src = src.join(INFO_FILE);
    let description = ini::read_info_text(&info_src);
    if description.is_some() {
        copy_logged(&info_src, &dst.join(INFO_FILE));
    }

    let screenshots = match project_screenshots(&src, &dst) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("screenshots for '{}' skipped: {e}", entry.name);
            Vec::new()
        }
    };

    EntryAssets {
        description,
        screenshots,
    }
}

/// Whether a filename is a screenshot we publish.
pub fn is_screenshot(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    SCREENSHOT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// List qualifying screenshot filenames directly inside `dir`, sorted.
pub fn list_screenshots(dir: &Path) -> Result<Vec<String>, AssetError> {
    let mut names = Vec::new();
    for item in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let item = item?;
        if !item.file_type().is_file() {
            continue;
        }
        match item.file_name().to_str() {
            Some(name) if is_screenshot(name) => names.push(name.to_string()),
            Some(_) => {}
            None => log::warn!("skipping non-UTF-8 screenshot name in {}", dir.display()),
        }
    }
    Ok(names)
}

fn project_screenshots(entry_src: &Path, entry_dst: &Path) -> Result<Vec<String>, AssetError> {
    let shots_src = entry_src.join(SCREENSHOTS_DIR);
    if !shots_src.is_dir() {
        return Ok(Vec::new());
    }

    let names = list_screenshots(&shots_src)?;
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let shots_dst = entry_dst.join(SCREENSHOTS_DIR);
    fs::create_dir_all(&shots_dst)?;
    let mut copied = Vec::with_capacity(names.len());
    for name in &names {
        match fs::copy(shots_src.join(name), shots_dst.join(name)) {
            Ok(_) => copied.push(format!("{SCREENSHOTS_DIR}/{name}")),
            Err(e) => log::warn!("could not copy screenshot {name}: {e}"),
        }
    }

    if !copied.is_empty() {
        let json = serde_json::to_string_pretty(&copied)?;
        fs::write(entry_dst.join(SCREENSHOT_INDEX_FILE), json)?;
    }
    Ok(copied)
}

fn copy_logged(src: &Path, dst: &Path) {
    if let Err(e) = copy_file(src, dst) {
        log::warn!("could not copy {}: {e}", src.display());
    }
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), AssetError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Mirror a directory tree into `dst`, returning the number of files copied.
pub fn mirror_dir(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    let mut count = 0;
    for item in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let item = item?;
        let Ok(rel) = item.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if item.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if item.file_type().is_file() {
            copy_file(item.path(), &target)?;
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::Section;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn nes() -> System {
        System {
            name: "NES".to_string(),
            dir: "nes".to_string(),
            fields: Section::new(),
        }
    }

    fn setup() -> (TempDir, SystemDirs) {
        let tmp = TempDir::new().unwrap();
        let dirs = SystemDirs::resolve(
            &nes(),
            &tmp.path().join("src/Systems"),
            &tmp.path().join("out/Systems"),
        )
        .unwrap();
        fs::create_dir_all(&dirs.source).unwrap();
        (tmp, dirs)
    }

    #[test]
    fn screenshot_extensions_are_case_insensitive() {
        assert!(is_screenshot("title.PNG"));
        assert!(is_screenshot("level1.JpEg"));
        assert!(is_screenshot("x.jpg"));
        assert!(!is_screenshot("notes.txt"));
        assert!(!is_screenshot("movie.gif"));
        assert!(!is_screenshot("png"));
    }

    #[test]
    fn system_description_and_ini_files_are_copied() {
        let (_tmp, dirs) = setup();
        write_file(&dirs.source.join("Info/Info.txt"), "8-bit console.");
        write_file(&dirs.source.join("Games.ini"), "[mario]\n");

        let assets = project_system(&dirs);

        assert_eq!(assets.description.as_deref(), Some("8-bit console."));
        assert!(dirs.output.join("Info/Info.txt").is_file());
        assert!(dirs.output.join("Games.ini").is_file());
        assert!(!dirs.output.join("Demos.ini").exists());
    }

    #[test]
    fn system_without_description() {
        let (_tmp, dirs) = setup();
        let assets = project_system(&dirs);
        assert!(assets.description.is_none());
        assert!(!dirs.output.join("Info").exists());
    }

    #[test]
    fn entry_screenshots_are_filtered_copied_and_indexed() {
        let (_tmp, dirs) = setup();
        let entry = game("Super Mario Bros", "mario");
        let shots = dirs.source.join("Games/mario/Screenshots");
        write_file(&shots.join("02.PNG"), "png");
        write_file(&shots.join("01.jpg"), "jpg");
        write_file(&shots.join("thumbs.db"), "junk");

        let assets = project_entry(&dirs, &entry);

        assert_eq!(assets.screenshots, vec!["Screenshots/01.jpg", "Screenshots/02.PNG"]);
        let out = dirs.output.join("Games/mario");
        assert!(out.join("Screenshots/01.jpg").is_file());
        assert!(out.join("Screenshots/02.PNG").is_file());
        assert!(!out.join("Screenshots/thumbs.db").exists());

        let index: Vec<String> =
            serde_json::from_str(&fs::read_to_string(out.join(SCREENSHOT_INDEX_FILE)).unwrap())
                .unwrap();
        assert_eq!(index, assets.screenshots);
        for path in &index {
            assert!(out.join(path).is_file(), "{path} was not copied");
        }
    }

    #[test]
    fn no_qualifying_images_means_no_index_file() {
        let (_tmp, dirs) = setup();
        let entry = game("Tetris", "tetris");
        write_file(&dirs.source.join("Games/tetris/Screenshots/readme.txt"), "x");

        let assets = project_entry(&dirs, &entry);

        assert!(assets.screenshots.is_empty());
        let out = dirs.output.join("Games/tetris");
        assert!(!out.join(SCREENSHOT_INDEX_FILE).exists());
        assert!(!out.join(SCREENSHOTS_DIR).exists());
    }

    #[test]
    fn missing_entry_directory_is_not_an_error() {
        let (_tmp, dirs) = setup();
        let assets = project_entry(&dirs, &game("Ghost", "ghost"));
        assert!(assets.description.is_none());
        assert!(assets.screenshots.is_empty());
    }

    #[test]
    fn entry_description_is_copied_verbatim() {
        let (_tmp, dirs) = setup();
        let raw = "  Jump on things.\r\n";
        write_file(&dirs.source.join("Games/mario/Info.txt"), raw);

        let assets = project_entry(&dirs, &game("Super Mario Bros", "mario"));

        assert_eq!(assets.description.as_deref(), Some("Jump on things."));
        let copied = fs::read_to_string(dirs.output.join("Games/mario/Info.txt")).unwrap();
        assert_eq!(copied, raw);
    }

    #[test]
    fn escaping_entry_directory_is_refused() {
        let (tmp, dirs) = setup();
        write_file(&tmp.path().join("src/Systems/secret/Info.txt"), "secret");
        let entry = game("Sneaky", "../../secret");

        let assets = project_entry(&dirs, &entry);

        assert!(assets.description.is_none());
        assert!(!tmp.path().join("out/secret").exists());
    }

    #[test]
    fn mirror_dir_copies_nested_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("assets");
        write_file(&src.join("style.css"), "body{}");
        write_file(&src.join("js/app.js"), "run()");

        let count = mirror_dir(&src, &tmp.path().join("out")).unwrap();

        assert_eq!(count, 2);
        assert!(tmp.path().join("out/style.css").is_file());
        assert!(tmp.path().join("out/js/app.js").is_file());
    }
}
