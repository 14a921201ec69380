//! Tabbed terminal front end (`notebook ui`).

pub mod app;
pub mod view;

pub use app::run;
