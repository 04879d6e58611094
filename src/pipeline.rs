//! Build orchestration: catalog in, output tree out.
//!
//! ```text
//! Systems.ini ──► systems ──► for each system
//!                              ├─ Emulators.ini / Games.ini / Demos.ini ──► entries
//!                              ├─ Info/Info.txt ──► system page
//!                              └─ for each entry ──► assets + entry page
//!                                                       │
//!                                          sitemap.xml ◄┘
//! ```
//!
//! The output directory is deleted and rebuilt on every run, so pages for
//! entries removed from the catalog never linger. Only a missing or
//! unreadable catalog stops a build, and even then the template page is
//! written first so that deploy automation never publishes an empty
//! directory. Everything else that is missing is logged, reported as
//! skipped, and left out.

use crate::assets::{self, SystemDirs};
use crate::catalog;
use crate::config::{BuildConfig, ConfigError, SYSTEMS_DIR};
use crate::generate::{self, EntryLink, RenderedPage};
use crate::ini;
use crate::naming::safe_join;
use crate::sitemap::{Sitemap, SitemapError};
use crate::types::{Entry, EntryType, System};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const ROOT_PAGE: &str = "index.html";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot read template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog {0} not found or unreadable; wrote template page only")]
    Catalog(PathBuf),
    #[error("refusing to clear output directory {0}: it overlaps the catalog source")]
    UnsafeOutput(PathBuf),
    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),
}

/// Summary of one build (or dry run) for console output.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub systems: Vec<SystemReport>,
    pub skipped: Vec<Skipped>,
    /// URLs in the sitemap, root included.
    pub sitemap_entries: usize,
    /// Files mirrored from the static directory.
    pub static_files: usize,
}

impl BuildReport {
    fn skip(&mut self, what: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(Skipped {
            what: what.into(),
            reason: reason.into(),
        });
    }

    pub fn system_pages(&self) -> usize {
        self.systems.iter().filter(|s| s.page.is_some()).count()
    }

    pub fn entry_pages(&self) -> usize {
        self.systems.iter().map(|s| s.entries.len()).sum()
    }
}

#[derive(Debug)]
pub struct SystemReport {
    pub name: String,
    pub dir: String,
    /// URL of the system page, when one was generated.
    pub page: Option<String>,
    pub entries: Vec<EntryReport>,
}

#[derive(Debug)]
pub struct EntryReport {
    pub title: String,
    pub entry_type: EntryType,
    pub url: String,
    pub screenshots: usize,
    pub has_description: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub what: String,
    pub reason: String,
}

/// A system together with its resolved directories and loaded entries.
struct LoadedSystem {
    system: System,
    dirs: SystemDirs,
    entries: Vec<Entry>,
}

/// Run a full build.
///
/// `build_date` stamps the sitemap's `<lastmod>` (when enabled) and is the
/// only time-dependent input.
pub fn build(config: &BuildConfig, build_date: NaiveDate) -> Result<BuildReport, BuildError> {
    config.site.validate()?;
    let template = read_template(config)?;

    reset_output_dir(config)?;
    let out = &config.output_dir;
    fs::write(out.join(ROOT_PAGE), &template)?;

    let catalog_path = config.catalog_path();
    let mut report = BuildReport::default();
    let systems = load_catalog(config, &mut report)?;

    copy_catalog(&catalog_path, &out.join(&config.site.catalog_file))?;
    report.static_files = mirror_static(config, &mut report);

    let mut sitemap = Sitemap::new();
    let mut written: HashSet<PathBuf> = HashSet::new();

    for loaded in &systems {
        println!("Processing system: {} ({})", loaded.system.name, loaded.system.dir);
        let system_report = build_system(config, &template, loaded, &mut sitemap, &mut written, &mut report)?;
        report.systems.push(system_report);
    }

    let lastmod = config.site.sitemap.lastmod.then_some(build_date);
    sitemap.write(&out.join(SITEMAP_FILE), &config.site.base_url, lastmod)?;
    report.sitemap_entries = sitemap.len();
    Ok(report)
}

/// Load and resolve everything a build would, without writing anything.
pub fn check(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    config.site.validate()?;
    read_template(config)?;

    let mut report = BuildReport::default();
    let systems = load_catalog(config, &mut report)?;
    let mut sitemap_entries = 1;

    for loaded in &systems {
        let system = &loaded.system;
        let info = ini::read_info_text(
            &loaded
                .dirs
                .source
                .join(assets::SYSTEM_INFO_DIR)
                .join(assets::INFO_FILE),
        );
        let page = info.map(|_| generate::system_page_url(system));
        if page.is_none() {
            report.skip(format!("{} system page", system.name), "no Info/Info.txt");
        }

        let entries: Vec<EntryReport> = loaded
            .entries
            .iter()
            .map(|entry| {
                let (screenshots, has_description) = match loaded.dirs.entry_dirs(entry) {
                    Some((source, _)) => {
                        let shots = source.join(assets::SCREENSHOTS_DIR);
                        let count = if shots.is_dir() {
                            assets::list_screenshots(&shots).map(|l| l.len()).unwrap_or(0)
                        } else {
                            0
                        };
                        let description = ini::read_info_text(&source.join(assets::INFO_FILE));
                        (count, description.is_some())
                    }
                    None => (0, false),
                };
                EntryReport {
                    title: generate::display_title(entry),
                    entry_type: entry.entry_type,
                    url: generate::entry_page_url(system, entry),
                    screenshots,
                    has_description,
                }
            })
            .collect();

        sitemap_entries += usize::from(page.is_some()) + entries.len();
        report.systems.push(SystemReport {
            name: system.name.clone(),
            dir: system.dir.clone(),
            page,
            entries,
        });
    }

    report.sitemap_entries = sitemap_entries;
    Ok(report)
}

fn read_template(config: &BuildConfig) -> Result<String, BuildError> {
    let path = config.template_path();
    fs::read_to_string(&path).map_err(|source| BuildError::Template { path, source })
}

/// Delete and recreate the output directory.
///
/// Refuses an output directory that holds the source directory, or that
/// overlaps the catalog, template, `Systems/` tree, or static directory.
fn reset_output_dir(config: &BuildConfig) -> Result<(), BuildError> {
    let out = &config.output_dir;
    if overlaps_source(config, &resolve_path(out)?)? {
        return Err(BuildError::UnsafeOutput(out.clone()));
    }
    if out.exists() {
        log::info!("removing previous output {}", out.display());
        fs::remove_dir_all(out)?;
    }
    fs::create_dir_all(out)?;
    Ok(())
}

fn overlaps_source(config: &BuildConfig, out: &Path) -> Result<bool, BuildError> {
    if config.source_dir.canonicalize()?.starts_with(out) {
        return Ok(true);
    }
    let inputs = [
        config.catalog_path(),
        config.template_path(),
        config.systems_root(),
        config.static_path(),
    ];
    for input in inputs.iter().filter(|p| p.exists()) {
        let input = input.canonicalize()?;
        if input.starts_with(out) || out.starts_with(&input) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Absolute form of `path`, canonical up to its deepest existing ancestor.
fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }
    match path.file_name() {
        Some(name) => {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            Ok(resolve_path(parent)?.join(name))
        }
        None => std::path::absolute(path),
    }
}

fn load_catalog(
    config: &BuildConfig,
    report: &mut BuildReport,
) -> Result<Vec<LoadedSystem>, BuildError> {
    let catalog_path = config.catalog_path();
    let Some(systems) = catalog::load_systems(&catalog_path) else {
        log::error!("{} not found or empty, aborting", catalog_path.display());
        return Err(BuildError::Catalog(catalog_path));
    };

    let systems_src = config.systems_root();
    let systems_out = config.output_dir.join(SYSTEMS_DIR);
    let mut loaded = Vec::with_capacity(systems.len());

    for system in systems {
        let Some(dirs) = SystemDirs::resolve(&system, &systems_src, &systems_out) else {
            log::warn!("skipping system '{}': bad directory '{}'", system.name, system.dir);
            report.skip(system.name.clone(), format!("directory '{}' is not a plain relative path", system.dir));
            continue;
        };

        let mut entries = Vec::new();
        for entry_type in EntryType::ALL {
            match catalog::load_entries(&dirs.source, entry_type) {
                Some(list) => entries.extend(list),
                None => report.skip(
                    format!("{}/{}", system.dir, entry_type.ini_file_name()),
                    "not found or unreadable",
                ),
            }
        }

        loaded.push(LoadedSystem {
            system,
            dirs,
            entries,
        });
    }

    Ok(loaded)
}

fn copy_catalog(src: &Path, dst: &Path) -> Result<(), BuildError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

fn mirror_static(config: &BuildConfig, report: &mut BuildReport) -> usize {
    let src = config.static_path();
    if !src.is_dir() {
        return 0;
    }
    let Some(dst) = safe_join(&config.output_dir, &config.site.static_dir) else {
        report.skip(config.site.static_dir.clone(), "static_dir is not a plain relative path");
        return 0;
    };
    match assets::mirror_dir(&src, &dst) {
        Ok(count) => count,
        Err(e) => {
            log::warn!("could not mirror {}: {e}", src.display());
            report.skip(config.site.static_dir.clone(), e.to_string());
            0
        }
    }
}

fn build_system(
    config: &BuildConfig,
    template: &str,
    loaded: &LoadedSystem,
    sitemap: &mut Sitemap,
    written: &mut HashSet<PathBuf>,
    report: &mut BuildReport,
) -> Result<SystemReport, BuildError> {
    let system = &loaded.system;
    let system_assets = assets::project_system(&loaded.dirs);

    let page = match &system_assets.description {
        Some(description) => {
            let links: Vec<EntryLink> = loaded
                .entries
                .iter()
                .map(|entry| EntryLink {
                    title: generate::display_title(entry),
                    url: generate::entry_page_url(system, entry),
                })
                .collect();
            let rendered =
                generate::render_system_page(template, &config.site, system, description, &links);
            write_page(&config.output_dir, &rendered, written)?;
            sitemap.push(rendered.url.clone());
            println!("  Generated system page: {}", rendered.url);
            Some(rendered.url)
        }
        None => {
            report.skip(format!("{} system page", system.name), "no Info/Info.txt");
            None
        }
    };

    let mut entries = Vec::with_capacity(loaded.entries.len());
    for entry in &loaded.entries {
        let entry_assets = assets::project_entry(&loaded.dirs, entry);
        let rendered = generate::render_entry_page(
            template,
            &config.site,
            system,
            entry,
            entry_assets.description.as_deref(),
        );
        write_page(&config.output_dir, &rendered, written)?;
        sitemap.push(rendered.url.clone());
        log::debug!("generated entry page {}", rendered.url);

        entries.push(EntryReport {
            title: generate::display_title(entry),
            entry_type: entry.entry_type,
            url: rendered.url,
            screenshots: entry_assets.screenshots.len(),
            has_description: entry_assets.description.is_some(),
        });
    }

    Ok(SystemReport {
        name: system.name.clone(),
        dir: system.dir.clone(),
        page,
        entries,
    })
}

fn write_page(
    output_dir: &Path,
    page: &RenderedPage,
    written: &mut HashSet<PathBuf>,
) -> Result<(), BuildError> {
    if !written.insert(page.file.clone()) {
        log::warn!("page {} generated twice; the later entry wins", page.url);
    }
    let path = output_dir.join(&page.file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &page.html)?;
    Ok(())
}
