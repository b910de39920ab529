// Library exports for the formcheck CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod ui;
