use gtk4 as gtk;

use gtk::pango;
use gtk::prelude::*;

/// Modal window used for progress while the backend works and for the
/// final notice the user has to dismiss.
pub(crate) struct MessageWidgets {
    pub(crate) window: gtk::Window,
    pub(crate) label: gtk::Label,
    pub(crate) progress: gtk::ProgressBar,
    pub(crate) ok_button: gtk::Button,
}

pub(crate) fn build_message_window(parent: &impl IsA<gtk::Window>) -> MessageWidgets {
    let window = gtk::Window::builder()
        .transient_for(parent)
        .modal(true)
        .destroy_with_parent(true)
        .deletable(false)
        .resizable(false)
        .default_width(340)
        .default_height(100)
        .title("")
        .build();

    let content = gtk::Box::builder()
        .orientation(gtk::Orientation::Vertical)
        .spacing(12)
        .margin_top(18)
        .margin_bottom(18)
        .margin_start(18)
        .margin_end(18)
        .build();

    let label = gtk::Label::builder()
        .wrap(true)
        .wrap_mode(pango::WrapMode::WordChar)
        .justify(gtk::Justification::Center)
        .max_width_chars(48)
        .build();

    let progress = gtk::ProgressBar::builder().hexpand(true).build();
    progress.set_pulse_step(0.1);

    let ok_button = gtk::Button::builder()
        .label("OK")
        .halign(gtk::Align::End)
        .visible(false)
        .build();
    ok_button.add_css_class("suggested-action");

    content.append(&label);
    content.append(&progress);
    content.append(&ok_button);
    window.set_child(Some(&content));

    MessageWidgets {
        window,
        label,
        progress,
        ok_button,
    }
}

impl MessageWidgets {
    pub(crate) fn show_progress(&self, text: Option<&str>, percentage: Option<u32>) {
        if let Some(text) = text {
            self.label.set_text(text);
        }
        self.ok_button.set_visible(false);
        self.progress.set_visible(true);
        match percentage {
            Some(value) => self.progress.set_fraction(f64::from(value.min(100)) / 100.0),
            None => self.progress.pulse(),
        }
        self.window.present();
    }

    pub(crate) fn show_notice(&self, text: &str) {
        self.label.set_text(text);
        self.progress.set_visible(false);
        self.ok_button.set_visible(true);
        self.window.set_deletable(true);
        self.window.present();
        self.ok_button.grab_focus();
    }
}
