//! # EmuGames List
//!
//! Static site builder for a retro games catalog. The catalog itself is a set
//! of INI files maintained with a desktop tool; this crate turns it into
//! crawlable static pages next to the single-page app that browses it.
//!
//! # Pipeline
//!
//! ```text
//! Systems.ini            ─┐
//! Systems/<sys>/*.ini     ├─► catalog ─► assets + pages ─► sitemap.xml
//! Systems/<sys>/**/Info.txt, Screenshots/
//! index.html (template)  ─┘
//! ```
//!
//! One run regenerates the output directory from scratch:
//!
//! - every system with a description gets `systems/<slug>/index.html`,
//! - every game, emulator, and demo gets `systems/<sys>/<slug>.html`,
//! - descriptions, screenshots, and entry lists are mirrored under
//!   `Systems/` for the client-side catalog,
//! - `sitemap.xml` lists every generated page under the public base URL.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ini`] | Forgiving INI parser with UTF-16/8-bit decoding |
//! | [`catalog`] | Section → `System`/`Entry` normalization with case-variant lookups |
//! | [`types`] | `System`, `Entry`, `EntryType` |
//! | [`assets`] | Description and screenshot mirroring, screenshot index |
//! | [`generate`] | Template filling and hidden SEO block rendering |
//! | [`metadata`] | Description fallbacks, excerpts, video link extraction, escaping |
//! | [`naming`] | URL slugs and safe path joins |
//! | [`sitemap`] | Sitemap accumulation and XML output |
//! | [`pipeline`] | Build orchestration and the build report |
//! | [`config`] | `emugames.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Template Is Opaque
//!
//! The page template belongs to the front-end. The builder never parses it:
//! it replaces the literal default `<title>` and meta-description tags and
//! inserts before `</body>` and `</head>`. The markers are configurable so a
//! reworded template does not need a code change.
//!
//! ## Missing Data Is Not An Error
//!
//! Catalogs are always partially filled in. A missing description, entry
//! list, or screenshot folder means that piece is left out of the output and
//! listed as skipped. Only a missing catalog or template stops the build.
//!
//! ## Explicit Configuration
//!
//! Paths, base URL, and template markers travel in a [`config::BuildConfig`]
//! value passed into [`pipeline::build`]; nothing is global, so tests build
//! complete sites inside temp directories.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod ini;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
