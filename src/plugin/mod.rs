//! Plugin Module
//!
//! Optional POS features with declared dependencies:
//! - Plugin descriptors and lifecycle interface
//! - Plugin registry
//! - Active set tracking
//! - Dependency-checked activation controller
//! - Built-in plugin catalog

pub mod builtin;
pub mod controller;
pub mod descriptor;
pub mod interface;
pub mod registry;
pub mod tracker;

pub use builtin::BuiltinPlugin;
pub use controller::{
    ActivationEvent, ActivationEventKind, ActivationSnapshot, PluginController, StateChange,
    DEFAULT_HOOK_TIMEOUT,
};
pub use descriptor::{PluginDescriptor, PluginInfo};
pub use interface::{Activatable, HookContext, HookError, HookResult, NoopHooks};
pub use registry::PluginRegistry;
pub use tracker::ActiveSet;
