use std::rc::Rc;

use gtk4 as gtk;

use gtk::glib;
use gtk::prelude::*;

use super::AppController;
use crate::categories::{ALL_PROGRAMS, FALLBACK_PACKAGE_ICON};
use crate::details::entry_markup;
use crate::helpers::{clear_listbox, themed_icon_name};
use crate::types::{CatalogueEntry, Category};

const ICON_SIZE: i32 = 32;

impl AppController {
    pub(crate) fn rebuild_category_list(self: &Rc<Self>) {
        let list = &self.widgets.catalogue.category_list;
        clear_listbox(list);

        let categories: Vec<Category> = self.state.borrow().session.categories().to_vec();
        for category in &categories {
            list.append(&build_category_row(category));
        }

        if let Some(first) = list.row_at_index(0) {
            list.select_row(Some(&first));
        } else {
            self.rebuild_package_list();
        }
    }

    pub(crate) fn on_category_selected(self: &Rc<Self>, index: i32) {
        let name = {
            let state = self.state.borrow();
            usize::try_from(index)
                .ok()
                .and_then(|index| state.session.categories().get(index))
                .map(|category| category.name.clone())
                .unwrap_or_else(|| ALL_PROGRAMS.to_string())
        };
        self.state.borrow_mut().selected_category = name;
        self.rebuild_package_list();
        self.widgets
            .catalogue
            .package_scroller
            .vadjustment()
            .set_value(0.0);
    }

    pub(crate) fn rebuild_package_list(self: &Rc<Self>) {
        let list = &self.widgets.catalogue.package_list;
        clear_listbox(list);

        let rows: Vec<(usize, CatalogueEntry)> = {
            let mut state = self.state.borrow_mut();
            let visible = state.session.visible_entries(&state.selected_category);
            state.visible = visible.clone();
            state.selected_package = None;
            visible
                .into_iter()
                .filter_map(|index| {
                    state
                        .session
                        .entry(index)
                        .map(|entry| (index, entry.clone()))
                })
                .collect()
        };

        for (index, entry) in &rows {
            list.append(&self.build_package_row(*index, entry));
        }
        self.update_info_button();
    }

    fn build_package_row(self: &Rc<Self>, index: usize, entry: &CatalogueEntry) -> gtk::ListBoxRow {
        let icon = gtk::Image::from_icon_name(&themed_icon_name(&entry.icon, FALLBACK_PACKAGE_ICON));
        icon.set_pixel_size(ICON_SIZE);
        icon.set_valign(gtk::Align::Center);

        let label = gtk::Label::builder()
            .use_markup(true)
            .wrap(true)
            .xalign(0.0)
            .hexpand(true)
            .build();
        label.set_markup(&entry_markup(entry));

        let check_button = gtk::CheckButton::builder()
            .active(entry.desired)
            .valign(gtk::Align::Center)
            .tooltip_text("Install")
            .build();
        check_button.connect_toggled(glib::clone!(
            #[strong(rename_to = controller)]
            self,
            #[weak]
            label,
            move |_| {
                controller.on_install_toggled(index, &label);
            }
        ));

        let content = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(12)
            .margin_top(6)
            .margin_bottom(6)
            .margin_start(6)
            .margin_end(6)
            .build();
        content.append(&icon);
        content.append(&label);
        content.append(&check_button);

        gtk::ListBoxRow::builder().child(&content).build()
    }

    pub(crate) fn on_install_toggled(&self, index: usize, label: &gtk::Label) {
        let markup = {
            let mut state = self.state.borrow_mut();
            state.session.toggle(index).map(entry_markup)
        };
        if let Some(markup) = markup {
            label.set_markup(&markup);
        }
    }

    pub(crate) fn on_package_selected(&self, row: Option<i32>) {
        {
            let mut state = self.state.borrow_mut();
            let selected = row
                .and_then(|row| usize::try_from(row).ok())
                .and_then(|row| state.visible.get(row).copied());
            state.selected_package = selected;
        }
        self.update_info_button();
    }

    pub(crate) fn update_info_button(&self) {
        let selected = self.state.borrow().selected_package.is_some();
        let interactive = self.widgets.catalogue.install_button.is_sensitive();
        self.widgets
            .catalogue
            .info_button
            .set_sensitive(selected && interactive);
    }

    pub(crate) fn set_controls_sensitive(&self, sensitive: bool) {
        let widgets = &self.widgets.catalogue;
        widgets.category_list.set_sensitive(sensitive);
        widgets.package_list.set_sensitive(sensitive);
        widgets.cancel_button.set_sensitive(sensitive);
        widgets.install_button.set_sensitive(sensitive);
        self.update_info_button();
    }
}

fn build_category_row(category: &Category) -> gtk::ListBoxRow {
    let icon = gtk::Image::from_icon_name(category.icon);
    icon.set_pixel_size(24);

    let label = gtk::Label::builder()
        .label(category.name.as_str())
        .xalign(0.0)
        .hexpand(true)
        .build();

    let content = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(8)
        .margin_top(4)
        .margin_bottom(4)
        .margin_start(4)
        .margin_end(4)
        .build();
    content.append(&icon);
    content.append(&label);

    gtk::ListBoxRow::builder().child(&content).build()
}
