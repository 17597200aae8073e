//! Built-in POS plugins.
//!
//! The shipped plugin set is closed, so it is modelled as an enum rather
//! than one type per plugin.

use crate::plugin::descriptor::{PluginDescriptor, PluginInfo};
use crate::plugin::interface::{Activatable, HookContext, HookResult};
use crate::plugin::registry::PluginRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const BUILTIN_VERSION: &str = "1.0.0";

/// Plugins shipped with the POS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinPlugin {
    /// Customer records; required by loyalty, tabs and appointments
    CustomerManagement,
    /// Dine-in / takeout / delivery order types
    OrderTypes,
    /// Barcode scanning
    BarcodeScanner,
    /// Loyalty and rewards
    LoyaltyProgram,
    /// Kitchen display system
    KitchenDisplay,
    /// Dining table management
    TableManagement,
    /// Open customer tabs
    OpenTabs,
    /// Stock tracking
    InventoryTracking,
    /// Appointment scheduling
    Appointments,
    /// Age checks for restricted items
    AgeVerification,
}

impl BuiltinPlugin {
    /// All built-in plugins, foundations first.
    pub const ALL: [BuiltinPlugin; 10] = [
        BuiltinPlugin::CustomerManagement,
        BuiltinPlugin::OrderTypes,
        BuiltinPlugin::BarcodeScanner,
        BuiltinPlugin::LoyaltyProgram,
        BuiltinPlugin::KitchenDisplay,
        BuiltinPlugin::TableManagement,
        BuiltinPlugin::OpenTabs,
        BuiltinPlugin::InventoryTracking,
        BuiltinPlugin::Appointments,
        BuiltinPlugin::AgeVerification,
    ];

    /// Plugin id.
    pub fn id(self) -> &'static str {
        match self {
            BuiltinPlugin::CustomerManagement => "customer-management",
            BuiltinPlugin::OrderTypes => "order-types",
            BuiltinPlugin::BarcodeScanner => "barcode-scanner",
            BuiltinPlugin::LoyaltyProgram => "loyalty-program",
            BuiltinPlugin::KitchenDisplay => "kitchen-display",
            BuiltinPlugin::TableManagement => "table-management",
            BuiltinPlugin::OpenTabs => "open-tabs",
            BuiltinPlugin::InventoryTracking => "inventory-tracking",
            BuiltinPlugin::Appointments => "appointments",
            BuiltinPlugin::AgeVerification => "age-verification",
        }
    }

    /// Look up a built-in by id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plugin| plugin.id() == id)
    }

    fn name(self) -> &'static str {
        match self {
            BuiltinPlugin::CustomerManagement => "Customer Management",
            BuiltinPlugin::OrderTypes => "Order Types",
            BuiltinPlugin::BarcodeScanner => "Barcode Scanner",
            BuiltinPlugin::LoyaltyProgram => "Loyalty Program",
            BuiltinPlugin::KitchenDisplay => "Kitchen Display System",
            BuiltinPlugin::TableManagement => "Table Management",
            BuiltinPlugin::OpenTabs => "Open Tabs",
            BuiltinPlugin::InventoryTracking => "Inventory Tracking",
            BuiltinPlugin::Appointments => "Appointments",
            BuiltinPlugin::AgeVerification => "Age Verification",
        }
    }

    fn description(self) -> &'static str {
        match self {
            BuiltinPlugin::CustomerManagement => "Track customer information",
            BuiltinPlugin::OrderTypes => "Dine-in, takeout, delivery options",
            BuiltinPlugin::BarcodeScanner => "Scan product barcodes for quick entry",
            BuiltinPlugin::LoyaltyProgram => "Customer loyalty and rewards system",
            BuiltinPlugin::KitchenDisplay => "Display orders in kitchen/prep area",
            BuiltinPlugin::TableManagement => "Manage dining tables and seating",
            BuiltinPlugin::OpenTabs => "Keep customer tabs open (bar/restaurant)",
            BuiltinPlugin::InventoryTracking => "Track stock levels and reorder points",
            BuiltinPlugin::Appointments => "Schedule and manage appointments",
            BuiltinPlugin::AgeVerification => "Verify customer age for restricted items",
        }
    }

    fn dependencies(self) -> &'static [&'static str] {
        match self {
            BuiltinPlugin::LoyaltyProgram
            | BuiltinPlugin::OpenTabs
            | BuiltinPlugin::Appointments => &["customer-management"],
            BuiltinPlugin::KitchenDisplay => &["order-types"],
            _ => &[],
        }
    }

    /// Plugin metadata.
    pub fn info(self) -> PluginInfo {
        let info = PluginInfo::new(self.id(), self.name(), BUILTIN_VERSION)
            .with_description(self.description());
        let info = self
            .dependencies()
            .iter()
            .fold(info, |info, dep| info.with_dependency(dep));

        match self {
            BuiltinPlugin::LoyaltyProgram => info.with_soft_dependency("gift-cards"),
            BuiltinPlugin::KitchenDisplay => info.with_soft_dependency("table-management"),
            BuiltinPlugin::AgeVerification => info.with_default("minimum_age", serde_json::json!(21)),
            _ => info,
        }
    }

    /// Descriptor with this plugin's hooks bound.
    pub fn descriptor(self) -> PluginDescriptor {
        PluginDescriptor::new(self.info(), Arc::new(self))
    }
}

#[async_trait]
impl Activatable for BuiltinPlugin {
    async fn on_activate(&self, ctx: &HookContext) -> HookResult<()> {
        debug!(plugin = %ctx.plugin_id, name = self.name(), "initializing built-in plugin");
        Ok(())
    }

    async fn on_deactivate(&self, ctx: &HookContext) -> HookResult<()> {
        debug!(plugin = %ctx.plugin_id, name = self.name(), "releasing built-in plugin");
        Ok(())
    }
}

/// Registry pre-populated with every built-in plugin.
pub fn registry() -> PluginRegistry {
    PluginRegistry::from_descriptors(BuiltinPlugin::ALL.into_iter().map(BuiltinPlugin::descriptor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::controller::PluginController;

    #[test]
    fn test_ids_round_trip() {
        for plugin in BuiltinPlugin::ALL {
            assert_eq!(BuiltinPlugin::from_id(plugin.id()), Some(plugin));
        }
        assert_eq!(BuiltinPlugin::from_id("split-checks"), None);
    }

    #[test]
    fn test_catalog_is_closed() {
        let registry = registry();
        assert_eq!(registry.len(), BuiltinPlugin::ALL.len());

        for descriptor in registry.all() {
            for dep in descriptor.dependencies() {
                assert!(registry.contains(dep), "{} needs {}", descriptor.id(), dep);
            }
        }
    }

    #[test]
    fn test_builtin_metadata() {
        let info = BuiltinPlugin::KitchenDisplay.info();
        assert_eq!(info.name, "Kitchen Display System");
        assert_eq!(info.dependencies, vec!["order-types".to_string()]);

        let info = BuiltinPlugin::AgeVerification.info();
        assert_eq!(info.defaults.get("minimum_age"), Some(&serde_json::json!(21)));
    }

    #[test]
    fn test_builtin_hooks() {
        let ctx = BuiltinPlugin::BarcodeScanner.descriptor().context();
        assert!(tokio_test::block_on(BuiltinPlugin::BarcodeScanner.on_activate(&ctx)).is_ok());
        assert!(tokio_test::block_on(BuiltinPlugin::BarcodeScanner.on_deactivate(&ctx)).is_ok());
    }

    #[tokio::test]
    async fn test_restaurant_bring_up() {
        let mut ctl = PluginController::new(Arc::new(registry()));

        assert_eq!(
            ctl.missing_dependencies("kitchen-display").unwrap(),
            vec!["order-types".to_string()]
        );
        ctl.activate("order-types").await.unwrap();
        ctl.activate("kitchen-display").await.unwrap();
        ctl.activate("table-management").await.unwrap();

        assert!(ctl.deactivate("order-types").await.is_err());
        assert!(ctl.soft_dependencies_inactive("kitchen-display").unwrap().is_empty());
    }
}
