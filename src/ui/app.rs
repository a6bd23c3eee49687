use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::{gdk, glib};
use tracing::debug;

use crate::settings::data_dir;
use crate::state::controller::AppController;
use crate::state::types::AppMessage;
use crate::ui::{CatalogueWidgets, build_catalogue_page};

const MESSAGE_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(crate) struct AppWidgets {
    pub(crate) catalogue: CatalogueWidgets,
}

pub(crate) fn build_ui(app: &adw::Application) {
    if let Some(display) = gdk::Display::default() {
        let theme = gtk::IconTheme::for_display(&display);
        theme.add_search_path(data_dir());
    }

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Recommended Software")
        .default_width(640)
        .default_height(400)
        .build();

    let root_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    window.set_content(Some(&root_box));

    let header_bar = adw::HeaderBar::new();
    root_box.append(&header_bar);

    let (catalogue_page, catalogue_widgets) = build_catalogue_page();
    root_box.append(&catalogue_page);

    let widgets = AppWidgets {
        catalogue: catalogue_widgets,
    };

    let (sender, receiver) = mpsc::channel::<AppMessage>();
    let controller = Rc::new(AppController::new(
        widgets,
        sender,
        app.clone(),
        window.clone(),
    ));

    let controller_clone = controller.clone();
    glib::timeout_add_local(MESSAGE_POLL_INTERVAL, move || {
        while let Ok(msg) = receiver.try_recv() {
            controller_clone.handle_message(msg);
        }
        glib::ControlFlow::Continue
    });

    controller.setup_connections();

    {
        let app = app.clone();
        window.connect_close_request(move |_| {
            debug!("main window closed");
            app.quit();
            glib::Propagation::Proceed
        });
    }

    window.present();

    {
        let controller_weak = Rc::downgrade(&controller);
        glib::idle_add_local_once(move || {
            if let Some(controller) = controller_weak.upgrade() {
                controller.start();
            }
        });
    }
}
