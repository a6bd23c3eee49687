pub(crate) mod app;
pub(crate) mod catalogue;
pub(crate) mod message;

pub(crate) use app::{AppWidgets, build_ui};
pub(crate) use catalogue::{CatalogueWidgets, build_page as build_catalogue_page};
pub(crate) use message::{MessageWidgets, build_message_window};
