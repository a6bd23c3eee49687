mod app;
mod chain;
mod packages;

pub(crate) use app::AppController;
