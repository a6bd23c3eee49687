use gtk4::glib;

use crate::types::CatalogueEntry;

const BYTES_PER_MB: f64 = 1_048_576.0;

pub(crate) const NO_DETAIL_TEXT: &str = "No additional information available for this package.";

/// Renders a byte count in MB with fewer decimals for larger sizes.
pub(crate) fn format_size_mb(bytes: u64) -> String {
    let megabytes = bytes as f64 / BYTES_PER_MB;
    let decimals = if megabytes >= 100.0 {
        0
    } else if megabytes >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*} MB", decimals, megabytes)
}

/// Pango markup shown for an entry in the package list.
pub(crate) fn entry_markup(entry: &CatalogueEntry) -> String {
    let mut markup = format!(
        "<b>{}</b>\n{}",
        glib::markup_escape_text(&entry.name),
        glib::markup_escape_text(&entry.description)
    );

    let label = if entry.package_id.has_installed_marker() {
        "Installed"
    } else {
        "Download"
    };
    markup.push_str(&format!(
        "\n{} size : {}",
        label,
        format_size_mb(entry.size.unwrap_or(0))
    ));

    if let Some(change) = entry.pending_change() {
        markup.push_str(&format!("   <b>{}</b>", change.annotation()));
    }

    markup
}

/// Content of the package information dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PackageInfo {
    pub title: String,
    pub icon: String,
    pub summary: String,
    pub description: String,
}

pub(crate) fn package_info(entry: &CatalogueEntry) -> PackageInfo {
    let summary = entry
        .summary
        .clone()
        .filter(|summary| !summary.trim().is_empty())
        .unwrap_or_else(|| entry.description.clone());
    let description = entry
        .long_description
        .clone()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NO_DETAIL_TEXT.to_string());
    PackageInfo {
        title: entry.name.clone(),
        icon: entry.icon.clone(),
        summary,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PackageId;

    fn entry(id: &str) -> CatalogueEntry {
        let mut entry = CatalogueEntry::new(
            "Sonic Pi".into(),
            "Live coding <music>".into(),
            "Programming".into(),
            "sonic-pi".into(),
            "sonic-pi".into(),
        );
        entry.package_id = PackageId::new(id);
        entry
    }

    #[test]
    fn size_precision_depends_on_magnitude() {
        assert_eq!(format_size_mb(150_994_944), "144 MB");
        assert_eq!(format_size_mb(15_728_640), "15.0 MB");
        assert_eq!(format_size_mb(2_097_152), "2.00 MB");
        assert_eq!(format_size_mb(104_857_600), "100 MB");
        assert_eq!(format_size_mb(10_485_760), "10.0 MB");
        assert_eq!(format_size_mb(0), "0.00 MB");
    }

    #[test]
    fn markup_escapes_and_labels_download_size() {
        let mut item = entry("sonic-pi;3.2;armhf;raspberrypi");
        item.size = Some(2_097_152);
        assert_eq!(
            entry_markup(&item),
            "<b>Sonic Pi</b>\nLive coding &lt;music&gt;\nDownload size : 2.00 MB"
        );
    }

    #[test]
    fn markup_shows_zero_when_size_is_unknown() {
        let item = entry("sonic-pi;3.2;armhf;raspberrypi");
        assert_eq!(
            entry_markup(&item),
            "<b>Sonic Pi</b>\nLive coding &lt;music&gt;\nDownload size : 0.00 MB"
        );
    }

    #[test]
    fn markup_annotates_pending_changes() {
        let mut item = entry("sonic-pi;3.2;armhf;installed:raspberrypi");
        item.size = Some(150_994_944);
        item.installed = true;
        item.desired = true;
        assert!(entry_markup(&item).ends_with("Installed size : 144 MB"));

        item.desired = false;
        assert!(entry_markup(&item).ends_with("144 MB   <b>Will be removed</b>"));

        let mut fresh = entry("sonic-pi;3.2;armhf;raspberrypi");
        fresh.desired = true;
        assert!(entry_markup(&fresh).ends_with("0.00 MB   <b>Will be installed</b>"));
    }

    #[test]
    fn info_text_falls_back() {
        let item = entry("sonic-pi;3.2;armhf;raspberrypi");
        let info = package_info(&item);
        assert_eq!(info.summary, "Live coding <music>");
        assert_eq!(info.description, NO_DETAIL_TEXT);
    }

    #[test]
    fn info_is_titled_with_the_entry_name() {
        let mut item = entry("sonic-pi;3.2;armhf;raspberrypi");
        item.summary = Some("Code music live".into());
        item.long_description = Some("A live coding synth.".into());
        assert_eq!(
            package_info(&item),
            PackageInfo {
                title: "Sonic Pi".into(),
                icon: "sonic-pi".into(),
                summary: "Code music live".into(),
                description: "A live coding synth.".into(),
            }
        );
    }
}
