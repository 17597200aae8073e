//! # AuraFlow Plugins
//!
//! Optional-feature management for the AuraFlow point-of-sale system:
//! - **Plugins**: registry, dependency-checked activation, lifecycle hooks
//! - **Presets**: industry feature bundles and subscription resolution
//! - **Config**: static plugin/preset data and runtime settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use auraflow_plugins::config::PluginsConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = PluginsConfig::default();
//!     auraflow_plugins::monitoring::init_logging(&config.logging);
//!
//!     let mut controller = config.build_controller();
//!     controller.activate("order-types").await.unwrap();
//!     controller.activate("kitchen-display").await.unwrap();
//!     println!("Active: {:?}", controller.active_ids());
//! }
//! ```

pub mod config;
pub mod core;
pub mod monitoring;
pub mod plugin;
pub mod preset;

pub use crate::core::error::{Error, Result};
