//! Preset Module
//!
//! Subscription presets per industry vertical:
//! - Preset definitions and feature descriptions
//! - Preset and subscription resolution

pub mod definition;
pub mod resolver;

pub use definition::{builtin_presets, feature_description, IndustryType, PresetDefinition};
pub use resolver::{PresetResolver, SubscriptionProfile};
