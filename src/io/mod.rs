// io/mod.rs
// Command line, config files, render settings and model loading
pub mod args;
pub mod config_loader;
pub mod obj_loader;
pub mod render_settings;
