//! `sitemap.xml` for search engines.
//!
//! URLs are collected as site-relative paths while pages are written and
//! resolved against the configured base URL once at the end. The root page is
//! always first. Duplicates are kept: two pages claiming one URL means two
//! catalog entries collided, and hiding that here would only hide the input
//! problem.

use crate::metadata::escape_html;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered list of site-relative page paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Sitemap {
    paths: Vec<String>,
}

impl Default for Sitemap {
    fn default() -> Self {
        Self::new()
    }
}

impl Sitemap {
    /// A sitemap holding only the root page.
    pub fn new() -> Self {
        Self {
            paths: vec!["/".to_string()],
        }
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Absolute URLs, in insertion order.
    pub fn resolve(&self, base_url: &str) -> Result<Vec<Url>, SitemapError> {
        let base = Url::parse(base_url)?;
        self.paths
            .iter()
            .map(|path| {
                base.join(path.trim_start_matches('/'))
                    .map_err(SitemapError::from)
            })
            .collect()
    }

    /// Serialize as a sitemaps.org `urlset`.
    ///
    /// `lastmod` is the only time-dependent part of the output.
    pub fn to_xml(&self, base_url: &str, lastmod: Option<NaiveDate>) -> Result<String, SitemapError> {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
        for url in self.resolve(base_url)? {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_html(url.as_str())));
            if let Some(date) = lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date.format("%Y-%m-%d")));
            }
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        Ok(xml)
    }

    pub fn write(
        &self,
        path: &Path,
        base_url: &str,
        lastmod: Option<NaiveDate>,
    ) -> Result<(), SitemapError> {
        fs::write(path, self.to_xml(base_url, lastmod)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://imadering.github.io/emugames-list/";

    #[test]
    fn root_is_always_first() {
        let mut sitemap = Sitemap::new();
        sitemap.push("/systems/nes/");
        assert_eq!(sitemap.paths(), ["/", "/systems/nes/"]);
    }

    #[test]
    fn resolves_under_base_path() {
        let mut sitemap = Sitemap::new();
        sitemap.push("/systems/nes/super-mario-bros.html");
        let urls: Vec<String> = sitemap
            .resolve(BASE)
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://imadering.github.io/emugames-list/",
                "https://imadering.github.io/emugames-list/systems/nes/super-mario-bros.html",
            ]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let mut sitemap = Sitemap::new();
        sitemap.push("/systems/nes/a.html");
        sitemap.push("/systems/nes/a.html");
        let xml = sitemap.to_xml(BASE, None).unwrap();
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn xml_has_no_lastmod_without_date() {
        let xml = Sitemap::new().to_xml(BASE, None).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://imadering.github.io/emugames-list/</loc>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn xml_stamps_lastmod() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let xml = Sitemap::new().to_xml(BASE, Some(date)).unwrap();
        assert!(xml.contains("<lastmod>2026-10-16</lastmod>"));
    }

    #[test]
    fn invalid_base_is_an_error() {
        assert!(matches!(
            Sitemap::new().to_xml("nope", None),
            Err(SitemapError::BaseUrl(_))
        ));
    }
}
