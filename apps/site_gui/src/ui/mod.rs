//! UI layer for the site window: eframe app shell and the egui display host.

pub mod app;
pub mod host;

pub use app::SiteGuiApp;
pub use host::EguiHost;
