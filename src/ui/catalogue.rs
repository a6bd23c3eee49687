use gtk4 as gtk;

use gtk::prelude::*;

pub(crate) struct CatalogueWidgets {
    pub(crate) category_list: gtk::ListBox,
    pub(crate) package_list: gtk::ListBox,
    pub(crate) package_scroller: gtk::ScrolledWindow,
    pub(crate) info_button: gtk::Button,
    pub(crate) cancel_button: gtk::Button,
    pub(crate) install_button: gtk::Button,
}

pub(crate) fn build_page() -> (gtk::Box, CatalogueWidgets) {
    let container = gtk::Box::builder()
        .orientation(gtk::Orientation::Vertical)
        .spacing(12)
        .margin_top(12)
        .margin_bottom(12)
        .margin_start(12)
        .margin_end(12)
        .build();
    container.set_vexpand(true);

    let category_list = gtk::ListBox::builder()
        .selection_mode(gtk::SelectionMode::Browse)
        .build();
    category_list.add_css_class("navigation-sidebar");

    let category_scroller = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .min_content_width(160)
        .vexpand(true)
        .child(&category_list)
        .build();
    category_scroller.add_css_class("card");

    let package_list = gtk::ListBox::builder()
        .selection_mode(gtk::SelectionMode::Single)
        .build();
    package_list.add_css_class("boxed-list");

    let placeholder = gtk::Label::builder()
        .label("No programs in this category")
        .margin_top(24)
        .margin_bottom(24)
        .build();
    placeholder.add_css_class("dim-label");
    package_list.set_placeholder(Some(&placeholder));

    let package_scroller = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .hexpand(true)
        .vexpand(true)
        .child(&package_list)
        .build();

    let lists_row = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(12)
        .vexpand(true)
        .build();
    lists_row.append(&category_scroller);
    lists_row.append(&package_scroller);

    let info_button = gtk::Button::builder().label("Info").build();
    let cancel_button = gtk::Button::builder().label("Cancel").build();
    let install_button = gtk::Button::builder().label("Apply").build();
    install_button.add_css_class("suggested-action");

    let spacer = gtk::Box::builder().hexpand(true).build();
    let button_row = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(6)
        .build();
    button_row.append(&info_button);
    button_row.append(&spacer);
    button_row.append(&cancel_button);
    button_row.append(&install_button);

    container.append(&lists_row);
    container.append(&button_row);

    for button in [&info_button, &cancel_button, &install_button] {
        button.set_sensitive(false);
    }

    (
        container,
        CatalogueWidgets {
            category_list,
            package_list,
            package_scroller,
            info_button,
            cancel_button,
            install_button,
        },
    )
}
