pub mod app;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
