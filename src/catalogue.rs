use std::path::{Path, PathBuf};

use gtk4::glib;
use tracing::{debug, info};

use crate::categories::{all_programs, push_unique};
use crate::error::CatalogueError;
use crate::settings::{catalogue_candidates, data_dir, user_language};
use crate::types::{CatalogueEntry, Category};

/// Entries and categories read from the catalogue key file.
#[derive(Clone, Debug, Default)]
pub(crate) struct Catalogue {
    pub entries: Vec<CatalogueEntry>,
    pub categories: Vec<Category>,
}

pub(crate) fn load_default_catalogue() -> Result<Catalogue, CatalogueError> {
    let language = user_language();
    let candidates = catalogue_candidates(&data_dir(), language.as_deref());
    load_catalogue(&candidates)
}

/// Loads the first candidate that parses as a key file.
pub(crate) fn load_catalogue(candidates: &[PathBuf]) -> Result<Catalogue, CatalogueError> {
    for path in candidates {
        match open_key_file(path) {
            Ok(key_file) => {
                let catalogue = read_catalogue(&key_file);
                info!(
                    path = %path.display(),
                    entries = catalogue.entries.len(),
                    categories = catalogue.categories.len(),
                    "catalogue loaded"
                );
                return Ok(catalogue);
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "catalogue candidate skipped");
            }
        }
    }

    Err(CatalogueError::Unavailable {
        tried: candidates.to_vec(),
    })
}

fn open_key_file(path: &Path) -> Result<glib::KeyFile, glib::Error> {
    let key_file = glib::KeyFile::new();
    key_file.load_from_file(path, glib::KeyFileFlags::NONE)?;
    Ok(key_file)
}

fn read_catalogue(key_file: &glib::KeyFile) -> Catalogue {
    let mut catalogue = Catalogue {
        entries: Vec::new(),
        categories: vec![all_programs()],
    };

    for group in key_file.groups().iter() {
        let group = group.as_str();
        let value = |key: &str| {
            key_file
                .value(group, key)
                .map(|value| value.to_string())
                .unwrap_or_default()
        };

        let category = value("category");
        push_unique(&mut catalogue.categories, &category);

        catalogue.entries.push(CatalogueEntry::new(
            value("name"),
            value("description"),
            category,
            value("package"),
            value("icon"),
        ));
    }

    catalogue
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CATALOGUE: &str = "\
[chromium]
category=Internet
name=Chromium
description=Web browser
icon=chromium-browser
package=chromium-browser

[claws]
category=Internet
name=Claws Mail
description=E-mail client
icon=claws-mail
package=claws-mail

[scratch]
category=Programming
name=Scratch 3
package=scratch3
";

    #[test]
    fn reads_groups_in_file_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefapps.conf");
        fs::write(&path, CATALOGUE).expect("write catalogue");

        let catalogue = load_catalogue(&[path]).expect("catalogue loads");
        let names: Vec<&str> = catalogue.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Chromium", "Claws Mail", "Scratch 3"]);

        let categories: Vec<&str> = catalogue
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(categories, ["All Programs", "Internet", "Programming"]);

        let scratch = &catalogue.entries[2];
        assert_eq!(scratch.package, "scratch3");
        assert_eq!(scratch.description, "", "missing keys load as empty");
        assert_eq!(scratch.icon, "");
        assert!(!scratch.is_resolved());
        assert!(!scratch.installed);
    }

    #[test]
    fn falls_back_to_generic_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generic = dir.path().join("prefapps.conf");
        fs::write(&generic, CATALOGUE).expect("write catalogue");

        let candidates = catalogue_candidates(dir.path(), Some("de"));
        let catalogue = load_catalogue(&candidates).expect("generic file loads");
        assert_eq!(catalogue.entries.len(), 3);
    }

    #[test]
    fn prefers_localized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("prefapps.conf"), CATALOGUE).expect("write catalogue");
        fs::write(
            dir.path().join("prefapps_de.conf"),
            "[chromium]\ncategory=Internet\nname=Chromium\ndescription=Webbrowser\npackage=chromium-browser\n",
        )
        .expect("write localized catalogue");

        let candidates = catalogue_candidates(dir.path(), Some("de"));
        let catalogue = load_catalogue(&candidates).expect("localized file loads");
        assert_eq!(catalogue.entries.len(), 1);
        assert_eq!(catalogue.entries[0].description, "Webbrowser");
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let candidates = catalogue_candidates(dir.path(), Some("de"));
        let err = load_catalogue(&candidates).expect_err("nothing to load");
        let CatalogueError::Unavailable { tried } = err;
        assert_eq!(tried, candidates);
    }
}
