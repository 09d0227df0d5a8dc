mod app;
mod effects;
pub(crate) mod logging;
mod observer;
pub mod ui;

pub use app::run_app;
