pub mod config_file;
pub mod defaults;

pub use config_file::{ConfigFileError, FileConfig};
pub use defaults::DefaultsConfig;
