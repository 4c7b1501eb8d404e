//! Interactive lighting demo
//!
//! A fixed scene of four shapes lit by one directional light, one spot light
//! and a ring of orbiting point lights. Every parameter is editable at runtime
//! through egui windows.

pub mod config;
pub mod demo;
mod ui;

pub use config::DemoConfig;
pub use demo::LightingDemo;
