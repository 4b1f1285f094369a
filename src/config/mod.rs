#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, FlattenCliConfig};
pub use toml_config::InviteConfig;
