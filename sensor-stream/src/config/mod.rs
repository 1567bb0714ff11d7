//! Configuration and dependency wiring.

mod dependencies;
mod settings;
mod sources;

pub use dependencies::Dependencies;
pub use settings::{LogFormat, Settings};
pub use sources::{default_sources, load_sources_file};
