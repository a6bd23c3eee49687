use std::path::{Path, PathBuf};

use gtk4::glib;

const DEFAULT_DATA_DIR: &str = "/usr/share/prefapps";
const CATALOGUE_FILE: &str = "prefapps.conf";

/// Directory holding the catalogue files and the bundled icons.
pub(crate) fn data_dir() -> PathBuf {
    PathBuf::from(option_env!("PREFAPPS_DATA_DIR").unwrap_or(DEFAULT_DATA_DIR))
}

/// Reduces a locale name such as `de_DE.UTF-8` to its language code.
pub(crate) fn language_code(locale: &str) -> Option<String> {
    let code = locale
        .split(|c: char| matches!(c, '_' | '.' | '@' | ' '))
        .next()
        .unwrap_or("")
        .trim();
    if code.is_empty() || code == "C" || code == "POSIX" {
        None
    } else {
        Some(code.to_string())
    }
}

pub(crate) fn user_language() -> Option<String> {
    glib::language_names()
        .first()
        .and_then(|name| language_code(name.as_str()))
}

/// Catalogue files to try, most specific first.
pub(crate) fn catalogue_candidates(dir: &Path, language: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(language) = language {
        candidates.push(dir.join(format!("prefapps_{}.conf", language)));
    }
    candidates.push(dir.join(CATALOGUE_FILE));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_code_strips_territory_and_encoding() {
        assert_eq!(language_code("de_DE.UTF-8").as_deref(), Some("de"));
        assert_eq!(language_code("fr.UTF-8").as_deref(), Some("fr"));
        assert_eq!(language_code("sr@latin").as_deref(), Some("sr"));
        assert_eq!(language_code("en").as_deref(), Some("en"));
        assert_eq!(language_code("C"), None);
        assert_eq!(language_code("POSIX"), None);
        assert_eq!(language_code(""), None);
    }

    #[test]
    fn localized_catalogue_is_tried_first() {
        let dir = Path::new("/usr/share/prefapps");
        assert_eq!(
            catalogue_candidates(dir, Some("de")),
            vec![
                PathBuf::from("/usr/share/prefapps/prefapps_de.conf"),
                PathBuf::from("/usr/share/prefapps/prefapps.conf"),
            ]
        );
        assert_eq!(
            catalogue_candidates(dir, None),
            vec![PathBuf::from("/usr/share/prefapps/prefapps.conf")]
        );
    }
}
