pub mod env_file;
pub mod templates;
pub mod types;
