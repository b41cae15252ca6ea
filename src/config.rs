//! Settings: the TOML schema, the loading precedence and persistence.

mod load;
mod schema;

pub use load::{default_config_path, log_path, resolve_config_path};
pub use schema::{
    AppearanceSettings, AudioSettings, Column, ColumnSettings, LibrarySettings, Settings,
};

#[cfg(test)]
mod tests;
