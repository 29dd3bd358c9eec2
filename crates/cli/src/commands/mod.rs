pub mod color;
pub mod find;
pub mod help;
pub mod list_colors;
pub mod query;
pub mod replace_all;
pub mod show_config;
pub mod validate_config;
pub mod version;
