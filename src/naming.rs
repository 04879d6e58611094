//! URL slugs and safe output placement.
//!
//! Every generated page path is built from slugs, and every mirrored asset
//! path is built from directory names taken from the catalog. Both pass
//! through this module so nothing written can land outside the output tree.
//!
//! ## Slugs
//!
//! - `"Super Mario Bros."` → `"super-mario-bros"`
//! - `"  Contra  Force "` → `"contra-force"`
//! - `"R-Type / Delta"` → `"r-type-delta"`
//! - `"Pokémon Red"` → `"pokemon-red"`
//! - `"Танчики"` → `"untitled"` (no ASCII word characters survive)

use std::ops::RangeInclusive;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Slug used when nothing of the input survives.
pub const FALLBACK_SLUG: &str = "untitled";

/// File stem of a system page inside its page directory.
pub const SYSTEM_PAGE_STEM: &str = "index";

/// Combining diacritical marks, stripped after canonical decomposition.
const COMBINING_MARKS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Turn a display name into a lowercase, dash-separated URL slug.
///
/// Accents are folded first (NFD, then combining marks removed). Keeps ASCII
/// alphanumerics, `_` and `-`; whitespace becomes `-`; everything else is
/// dropped. Dash runs collapse and leading/trailing dashes are trimmed. The
/// result never contains `/` or `.`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_dash = false;
    let folded = text.nfd().filter(|c| !COMBINING_MARKS.contains(c));
    for c in folded.flat_map(char::to_lowercase) {
        let mapped = if c.is_whitespace() || c == '-' {
            '-'
        } else if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            continue;
        };
        if mapped == '-' {
            if !prev_dash {
                slug.push('-');
            }
            prev_dash = true;
        } else {
            slug.push(mapped);
            prev_dash = false;
        }
    }

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Slug for an entry page file.
///
/// Entry pages share a directory with their system page, so an entry that
/// slugs to the system page's stem gets a `-1` suffix instead.
pub fn entry_slug(name: &str) -> String {
    let slug = slugify(name);
    if slug == SYSTEM_PAGE_STEM {
        format!("{slug}-1")
    } else {
        slug
    }
}

/// Join a catalog-supplied relative path onto `base`.
///
/// Returns `None` for anything that is not a plain relative path (absolute
/// paths, `..`, drive prefixes), or for an empty path.
pub fn safe_join(base: &Path, relative: &str) -> Option<PathBuf> {
    let rel = Path::new(relative);
    let mut has_normal = false;
    for component in rel.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    has_normal.then(|| base.join(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_dashes_spaces() {
        assert_eq!(slugify("Super Mario Bros"), "super-mario-bros");
    }

    #[test]
    fn slug_drops_punctuation() {
        assert_eq!(slugify("Super Mario Bros."), "super-mario-bros");
        assert_eq!(slugify("Tom & Jerry!"), "tom-jerry");
    }

    #[test]
    fn slug_collapses_and_trims_dashes() {
        assert_eq!(slugify("  Contra  Force "), "contra-force");
        assert_eq!(slugify("--R-Type--"), "r-type");
        assert_eq!(slugify("R-Type / Delta"), "r-type-delta");
    }

    #[test]
    fn slug_keeps_underscores_and_digits() {
        assert_eq!(slugify("Doom_2 1994"), "doom_2-1994");
    }

    #[test]
    fn slug_never_contains_path_characters() {
        let slug = slugify("../../etc/passwd");
        assert!(!slug.contains('/'));
        assert!(!slug.contains('.'));
        assert_eq!(slug, "etcpasswd");
    }

    #[test]
    fn slug_folds_accents() {
        assert_eq!(slugify("Pokémon Red"), "pokemon-red");
        assert_eq!(slugify("Él Niño Ça"), "el-nino-ca");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
    }

    #[test]
    fn entry_slug_avoids_system_page_stem() {
        assert_eq!(entry_slug("Index"), "index-1");
        assert_eq!(entry_slug("  INDEX! "), "index-1");
        assert_eq!(entry_slug("Index Pro"), "index-pro");
        assert_eq!(entry_slug("Super Mario Bros"), "super-mario-bros");
    }

    #[test]
    fn slug_of_empty_or_non_ascii_is_fallback() {
        assert_eq!(slugify(""), FALLBACK_SLUG);
        assert_eq!(slugify("Танчики"), FALLBACK_SLUG);
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
    }

    #[test]
    fn safe_join_accepts_plain_relative_paths() {
        let base = Path::new("/out");
        assert_eq!(safe_join(base, "nes"), Some(PathBuf::from("/out/nes")));
        assert_eq!(
            safe_join(base, "Games/mario"),
            Some(PathBuf::from("/out/Games/mario"))
        );
    }

    #[test]
    fn safe_join_rejects_escapes() {
        let base = Path::new("/out");
        assert_eq!(safe_join(base, "../secret"), None);
        assert_eq!(safe_join(base, "a/../../b"), None);
        assert_eq!(safe_join(base, "/etc"), None);
        assert_eq!(safe_join(base, ""), None);
        assert_eq!(safe_join(base, "."), None);
    }
}
