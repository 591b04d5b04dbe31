pub mod app;
pub mod input;
pub mod logging;
pub mod report;
pub mod settings;
