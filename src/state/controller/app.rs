use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::glib;
use tracing::debug;

use crate::categories::FALLBACK_PACKAGE_ICON;
use crate::details::package_info;
use crate::helpers::themed_icon_name;
use crate::state::types::{AppMessage, AppState};
use crate::ui::{AppWidgets, MessageWidgets, build_message_window};

pub(crate) struct AppController {
    pub(crate) widgets: AppWidgets,
    pub(crate) state: RefCell<AppState>,
    pub(crate) sender: mpsc::Sender<AppMessage>,
    pub(crate) app: adw::Application,
    pub(crate) window: adw::ApplicationWindow,
    pub(crate) message: RefCell<Option<MessageWidgets>>,
}

impl AppController {
    pub(crate) fn new(
        widgets: AppWidgets,
        sender: mpsc::Sender<AppMessage>,
        app: adw::Application,
        window: adw::ApplicationWindow,
    ) -> Self {
        Self {
            widgets,
            state: RefCell::new(AppState::default()),
            sender,
            app,
            window,
            message: RefCell::new(None),
        }
    }

    pub(crate) fn setup_connections(self: &Rc<Self>) {
        self.widgets
            .catalogue
            .category_list
            .connect_row_selected(glib::clone!(
                #[strong(rename_to = controller)]
                self,
                move |_, row| {
                    if let Some(row) = row {
                        controller.on_category_selected(row.index());
                    }
                }
            ));

        self.widgets
            .catalogue
            .package_list
            .connect_row_selected(glib::clone!(
                #[strong(rename_to = controller)]
                self,
                move |_, row| {
                    controller.on_package_selected(row.map(|row| row.index()));
                }
            ));

        self.widgets.catalogue.info_button.connect_clicked(glib::clone!(
            #[strong(rename_to = controller)]
            self,
            move |_| {
                controller.show_package_info();
            }
        ));

        self.widgets
            .catalogue
            .cancel_button
            .connect_clicked(glib::clone!(
                #[strong(rename_to = controller)]
                self,
                move |_| {
                    debug!("cancelled by user");
                    controller.app.quit();
                }
            ));

        self.widgets
            .catalogue
            .install_button
            .connect_clicked(glib::clone!(
                #[strong(rename_to = controller)]
                self,
                move |_| {
                    controller.on_install_clicked();
                }
            ));
    }

    pub(crate) fn handle_message(self: &Rc<Self>, msg: AppMessage) {
        match msg {
            AppMessage::Progress(progress) => {
                self.on_progress(progress);
            }
            AppMessage::StageFinished { stage, result } => {
                self.finish_stage(stage, result);
            }
        }
    }

    fn with_message_window<F>(&self, f: F)
    where
        F: FnOnce(&MessageWidgets),
    {
        let mut slot = self.message.borrow_mut();
        let message = slot.get_or_insert_with(|| {
            let widgets = build_message_window(&self.window);
            let app = self.app.clone();
            widgets.ok_button.connect_clicked(move |_| app.quit());
            let app = self.app.clone();
            widgets.window.connect_close_request(move |_| {
                app.quit();
                glib::Propagation::Proceed
            });
            widgets
        });
        f(message);
    }

    pub(crate) fn show_progress(&self, text: Option<&str>, percentage: Option<u32>) {
        self.with_message_window(|message| message.show_progress(text, percentage));
    }

    /// Final message of the session; OK quits the application.
    pub(crate) fn show_notice(&self, text: &str) {
        self.with_message_window(|message| message.show_notice(text));
    }

    pub(crate) fn close_message(&self) {
        if let Some(message) = self.message.borrow_mut().take() {
            message.window.destroy();
        }
    }

    pub(crate) fn show_package_info(&self) {
        let info = {
            let state = self.state.borrow();
            let Some(entry) = state
                .selected_package
                .and_then(|index| state.session.entry(index))
            else {
                return;
            };
            package_info(entry)
        };

        let dialog = gtk::MessageDialog::builder()
            .transient_for(&self.window)
            .modal(true)
            .title(info.title.as_str())
            .message_type(gtk::MessageType::Info)
            .text(info.summary.as_str())
            .secondary_text(info.description.as_str())
            .build();

        let icon = gtk::Image::from_icon_name(&themed_icon_name(&info.icon, FALLBACK_PACKAGE_ICON));
        icon.set_pixel_size(48);
        if let Ok(area) = dialog.message_area().downcast::<gtk::Box>() {
            area.prepend(&icon);
        }

        dialog.add_button("OK", gtk::ResponseType::Ok);
        dialog.connect_response(|dlg, _| dlg.close());
        dialog.present();
    }
}
