pub mod loader;

pub use loader::BandTableLoader;
