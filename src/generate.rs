//! Static page rendering.
//!
//! Every page is the site's single-page-app template with three edits:
//!
//! 1. the default `<title>` tag is replaced with a page-specific title,
//! 2. the default meta-description tag is replaced with a snippet of the
//!    page's description,
//! 3. a hidden `#seo-content` block is inserted before `</body>`.
//!
//! Entry pages additionally get a small script before `</head>` that sends
//! human visitors to the interactive catalog at `/#systems/<sys>/<entry>`
//! while crawlers stay on the static content.
//!
//! ## Output Structure
//!
//! ```text
//! pages/
//! ├── index.html                        # template, unchanged
//! └── systems/
//!     └── nes/
//!         ├── index.html                # system page (needs Info/Info.txt)
//!         └── super-mario-bros.html     # entry page
//! ```
//!
//! The template is opaque: only the literal markers from
//! [`TemplateMarkers`] are searched for. All catalog text is HTML-escaped on
//! the way in. The hidden block is built with [maud](https://maud.lambda.xyz/),
//! which escapes interpolations; titles and meta descriptions go through
//! [`escape_html`].

use crate::config::{SiteConfig, TemplateMarkers};
use crate::metadata::{self, escape_html, excerpt, extract_video_id, meta_description};
use crate::naming::SYSTEM_PAGE_STEM;
use crate::types::{Entry, System};
use maud::{Markup, html};
use std::path::PathBuf;

/// Characters of the system description shown in the hidden block.
pub const SYSTEM_EXCERPT_CHARS: usize = 500;
/// Characters of the entry description shown in the hidden block.
pub const ENTRY_EXCERPT_CHARS: usize = 1000;

/// Top-level output directory for generated pages.
pub const PAGES_DIR: &str = "systems";

const REDIRECT_SCRIPT: &str = r#"<script>
  (function () {
    var isBot = /bot|crawler|spider|google|yandex|archiver|ahrefs|bing/i.test(navigator.userAgent);
    var path = window.location.pathname;
    if (!isBot && path.endsWith('.html')) {
      var start = path.indexOf('/systems/');
      if (start >= 0) {
        var hash = path.slice(start + 1).replace(/\.html$/, '');
        window.location.replace(path.slice(0, start + 1) + '#' + hash);
      }
    }
  })();
</script>
"#;

/// Substitutions applied to the template for one page.
pub struct PageMeta<'a> {
    /// Unescaped page title.
    pub title: &'a str,
    /// Unescaped meta description.
    pub description: &'a str,
    /// Hidden block inserted before the closing body tag.
    pub seo_block: Markup,
    /// Raw HTML inserted before the closing head tag.
    pub head_extra: Option<&'a str>,
}

/// A rendered page and where it goes.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Path relative to the output directory.
    pub file: PathBuf,
    /// Site-relative URL path for the sitemap.
    pub url: String,
    pub html: String,
}

/// A link from a system page to one of its entry pages.
#[derive(Debug, Clone)]
pub struct EntryLink {
    pub title: String,
    pub url: String,
}

/// Fill the template for one page.
///
/// Only the first occurrence of each marker is touched. A marker missing
/// from the template leaves that part of the page as-is.
pub fn apply_template(template: &str, markers: &TemplateMarkers, page: &PageMeta<'_>) -> String {
    let mut out = replace_marker(
        template,
        &markers.title,
        &format!("<title>{}</title>", escape_html(page.title)),
    );
    out = replace_marker(
        &out,
        &markers.meta_description,
        &format!(
            r#"<meta name="description" content="{}" />"#,
            escape_html(page.description)
        ),
    );
    out = replace_marker(
        &out,
        &markers.body_close,
        &format!("{}{}", page.seo_block.0, markers.body_close),
    );
    if let Some(extra) = page.head_extra {
        out = replace_marker(&out, &markers.head_close, &format!("{extra}{}", markers.head_close));
    }
    out
}

fn replace_marker(html: &str, marker: &str, with: &str) -> String {
    if !html.contains(marker) {
        log::debug!("template marker {marker:?} not found");
        return html.to_string();
    }
    html.replacen(marker, with, 1)
}

/// Catalog display title: name, type suffix, year, rating.
///
/// ```text
/// Super Mario Bros (1985)
/// FCEUX - Emulator (2002) ⭐ 4
/// ```
pub fn display_title(entry: &Entry) -> String {
    let mut title = format!("{}{}", entry.name, entry.entry_type.title_suffix());
    if !entry.year.is_empty() {
        title.push_str(&format!(" ({})", entry.year));
    }
    if !entry.rating.is_empty() {
        title.push_str(&format!(" ⭐ {}", entry.rating));
    }
    title
}

pub fn system_page_url(system: &System) -> String {
    format!("/{PAGES_DIR}/{}/", system.slug())
}

pub fn entry_page_url(system: &System, entry: &Entry) -> String {
    format!("/{PAGES_DIR}/{}/{}.html", system.slug(), entry.slug())
}

/// Render a system overview page.
pub fn render_system_page(
    template: &str,
    site: &SiteConfig,
    system: &System,
    description: &str,
    entries: &[EntryLink],
) -> RenderedPage {
    let title = format!("{} Games List | {}", system.name, site.site_name);
    let meta = meta_description(description);
    let seo_block = html! {
        div id="seo-content" style="display: none;" {
            h1 { (system.name) " Games" }
            p { "System Overview: " (excerpt(description, SYSTEM_EXCERPT_CHARS)) }
            @if !entries.is_empty() {
                ul {
                    @for link in entries {
                        li { a href=(link.url) { (link.title) } }
                    }
                }
            }
        }
    };

    let html = apply_template(
        template,
        &site.markers,
        &PageMeta {
            title: &title,
            description: &meta,
            seo_block,
            head_extra: None,
        },
    );

    RenderedPage {
        file: PathBuf::from(PAGES_DIR).join(system.slug())
            .join(format!("{SYSTEM_PAGE_STEM}.html")),
        url: system_page_url(system),
        html,
    }
}

/// Render one entry page.
///
/// `info` is the entry's `Info.txt` text; the `Comment` field and then the
/// configured placeholder stand in when it is missing.
pub fn render_entry_page(
    template: &str,
    site: &SiteConfig,
    system: &System,
    entry: &Entry,
    info: Option<&str>,
) -> RenderedPage {
    let description = metadata::resolve(&[info, Some(entry.comment.as_str())])
        .unwrap_or_else(|| site.placeholder.clone());
    let video = extract_video_id(&description).map(|id| metadata::watch_url(&id));

    let year_part = if entry.year.is_empty() {
        String::new()
    } else {
        format!(" {}", entry.year)
    };
    let title = format!("{} ({}{year_part}) - Gameplay & Info", entry.name, system.name);
    let meta = meta_description(&description);

    let seo_block = html! {
        div id="seo-content" style="display: none;" {
            h1 { (display_title(entry)) }
            p { "System: " (system.name) }
            @if !entry.year.is_empty() {
                p { "Year: " (entry.year) }
            }
            @if !entry.rating.is_empty() {
                p { "Rating: " (entry.rating) }
            }
            p { "Description: " (excerpt(&description, ENTRY_EXCERPT_CHARS)) }
            @if let Some(url) = &video {
                p { "Video: " a href=(url) { (url) } }
            }
        }
    };

    let html = apply_template(
        template,
        &site.markers,
        &PageMeta {
            title: &title,
            description: &meta,
            seo_block,
            head_extra: Some(REDIRECT_SCRIPT),
        },
    );

    RenderedPage {
        file: PathBuf::from(PAGES_DIR)
            .join(system.slug())
            .join(format!("{}.html", entry.slug())),
        url: entry_page_url(system, entry),
        html,
    }
}
