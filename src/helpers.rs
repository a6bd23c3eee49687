use gtk4 as gtk;

use gtk::gdk;
use gtk::prelude::*;

pub(crate) fn clear_listbox(list: &gtk::ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}

/// Returns `name` when the current icon theme provides it, otherwise `fallback`.
pub(crate) fn themed_icon_name(name: &str, fallback: &str) -> String {
    if name.is_empty() {
        return fallback.to_string();
    }
    let available = gdk::Display::default()
        .map(|display| gtk::IconTheme::for_display(&display).has_icon(name))
        .unwrap_or(false);
    if available {
        name.to_string()
    } else {
        fallback.to_string()
    }
}
