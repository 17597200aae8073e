//! Preset definitions.
//!
//! Named feature bundles per industry vertical, plus the order types each
//! industry offers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Industry vertical of a business.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndustryType {
    /// No specific vertical
    #[default]
    General,
    /// Full-service restaurant
    Restaurant,
    /// Retail store
    Retail,
    /// Bar
    Bar,
    /// Cafe
    Cafe,
    /// Salon
    Salon,
    /// Pharmacy
    Pharmacy,
}

impl IndustryType {
    /// Order types offered in this industry.
    pub fn order_types(self) -> &'static [&'static str] {
        match self {
            IndustryType::Restaurant | IndustryType::Cafe => &["dine-in", "takeout", "delivery"],
            IndustryType::Bar => &["dine-in", "takeout"],
            IndustryType::Retail | IndustryType::Salon | IndustryType::Pharmacy => {
                &["in-store", "online"]
            }
            IndustryType::General => &["standard"],
        }
    }

    /// Name of the matching built-in preset.
    pub fn preset_name(self) -> &'static str {
        match self {
            IndustryType::General => "general",
            IndustryType::Restaurant => "restaurant",
            IndustryType::Retail => "retail",
            IndustryType::Bar => "bar",
            IndustryType::Cafe => "cafe",
            IndustryType::Salon => "salon",
            IndustryType::Pharmacy => "pharmacy",
        }
    }
}

impl std::fmt::Display for IndustryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.preset_name())
    }
}

/// A named bundle of feature flags.
///
/// `extends` names other presets whose features are included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDefinition {
    /// Preset name
    pub name: String,
    /// Presets whose features are inherited
    #[serde(default)]
    pub extends: Vec<String>,
    /// Features added by this preset
    #[serde(default)]
    pub features: BTreeSet<String>,
}

impl PresetDefinition {
    /// Create a preset from its own feature list.
    pub fn new(name: &str, features: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extends: Vec::new(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Inherit another preset's features.
    pub fn extending(mut self, parent: &str) -> Self {
        self.extends.push(parent.to_string());
        self
    }
}

const GENERAL: &[&str] = &[
    "basic-pos",
    "cash-drawer",
    "receipt-printing",
    "product-management",
    "basic-reporting",
    "user-management",
];

const RETAIL: &[&str] = &[
    "inventory-tracking",
    "barcode-scanner",
    "customer-management",
    "discount-management",
    "gift-cards",
    "loyalty-program",
    "returns-exchanges",
];

const RESTAURANT: &[&str] = &[
    "table-management",
    "order-types",
    "tipping",
    "kitchen-display",
    "course-management",
    "split-checks",
    "modifiers",
    "variations",
];

const BAR: &[&str] = &[
    "open-tabs",
    "tab-management",
    "happy-hour",
    "age-verification",
    "quick-drink-builder",
];

const CAFE: &[&str] = &[
    "order-types",
    "tipping",
    "modifiers",
    "variations",
    "loyalty-program",
    "customer-management",
    "inventory-tracking",
];

const SALON: &[&str] = &[
    "appointments",
    "service-providers",
    "customer-notes",
    "tipping",
    "package-deals",
    "loyalty-program",
];

const PHARMACY: &[&str] = &[
    "prescription-tracking",
    "inventory-expiration",
    "customer-profiles",
    "insurance-billing",
    "regulated-substances",
];

// Ultimate spells out its list; it omits pharmacy's customer-profiles.
const ULTIMATE: &[&str] = &[
    "basic-pos",
    "cash-drawer",
    "receipt-printing",
    "product-management",
    "basic-reporting",
    "user-management",
    "inventory-tracking",
    "barcode-scanner",
    "customer-management",
    "discount-management",
    "gift-cards",
    "loyalty-program",
    "returns-exchanges",
    "table-management",
    "order-types",
    "tipping",
    "kitchen-display",
    "course-management",
    "split-checks",
    "modifiers",
    "variations",
    "open-tabs",
    "tab-management",
    "happy-hour",
    "age-verification",
    "quick-drink-builder",
    "appointments",
    "service-providers",
    "customer-notes",
    "package-deals",
    "prescription-tracking",
    "inventory-expiration",
    "insurance-billing",
    "regulated-substances",
    "multi-location",
    "advanced-analytics",
    "custom-reporting",
    "api-integrations",
    "employee-performance",
    "price-optimization",
    "automated-ordering",
];

/// The presets shipped with the POS.
pub fn builtin_presets() -> Vec<PresetDefinition> {
    vec![
        PresetDefinition::new("general", GENERAL),
        PresetDefinition::new("retail", RETAIL).extending("general"),
        PresetDefinition::new("restaurant", RESTAURANT).extending("general"),
        PresetDefinition::new("bar", BAR).extending("restaurant"),
        PresetDefinition::new("cafe", CAFE).extending("general"),
        PresetDefinition::new("salon", SALON).extending("general"),
        PresetDefinition::new("pharmacy", PHARMACY).extending("retail"),
        PresetDefinition::new("ultimate", ULTIMATE),
    ]
}

const FEATURE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("basic-pos", "Core point-of-sale functionality"),
    ("cash-drawer", "Cash management and drawer tracking"),
    ("receipt-printing", "Print physical receipts"),
    ("product-management", "Add, edit, and organize products"),
    ("basic-reporting", "Sales reports and analytics"),
    ("user-management", "Manage employees and permissions"),
    ("inventory-tracking", "Track stock levels and reorder"),
    ("barcode-scanner", "Scan product barcodes"),
    ("customer-management", "Track customer information"),
    ("discount-management", "Apply discounts and promotions"),
    ("gift-cards", "Sell and redeem gift cards"),
    ("loyalty-program", "Customer loyalty and rewards"),
    ("returns-exchanges", "Process returns and exchanges"),
    ("table-management", "Manage dining tables"),
    ("order-types", "Dine-in, takeout, delivery options"),
    ("tipping", "Add tips to transactions"),
    ("kitchen-display", "Display orders in kitchen"),
    ("course-management", "Manage meal courses"),
    ("split-checks", "Split bills among customers"),
    ("modifiers", "Customize items with modifiers"),
    ("variations", "Product size/color variations"),
    ("open-tabs", "Keep customer tabs open"),
    ("tab-management", "Manage bar tabs"),
    ("happy-hour", "Time-based pricing"),
    ("age-verification", "Verify customer age"),
    ("quick-drink-builder", "Build drinks quickly"),
    ("appointments", "Schedule appointments"),
    ("service-providers", "Assign staff to services"),
    ("customer-notes", "Store customer preferences"),
    ("package-deals", "Create service packages"),
    ("prescription-tracking", "Track prescriptions"),
    ("inventory-expiration", "Monitor expiration dates"),
    ("insurance-billing", "Process insurance claims"),
    ("regulated-substances", "Track controlled items"),
    ("multi-location", "Manage multiple locations"),
    ("advanced-analytics", "Detailed business analytics"),
    ("custom-reporting", "Create custom reports"),
    ("api-integrations", "Connect with third-party services"),
    ("employee-performance", "Track employee metrics"),
    ("price-optimization", "AI-powered pricing"),
    ("automated-ordering", "Auto-generate purchase orders"),
];

/// Human-readable description of a feature flag.
pub fn feature_description(feature: &str) -> Option<&'static str> {
    FEATURE_DESCRIPTIONS
        .iter()
        .find(|(flag, _)| *flag == feature)
        .map(|(_, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_types() {
        assert_eq!(IndustryType::Cafe.order_types(), ["dine-in", "takeout", "delivery"]);
        assert_eq!(IndustryType::Bar.order_types(), ["dine-in", "takeout"]);
        assert_eq!(IndustryType::Pharmacy.order_types(), ["in-store", "online"]);
        assert_eq!(IndustryType::General.order_types(), ["standard"]);
    }

    #[test]
    fn test_industry_serde() {
        let industry: IndustryType = serde_json::from_str("\"restaurant\"").unwrap();
        assert_eq!(industry, IndustryType::Restaurant);
        assert_eq!(serde_json::to_string(&IndustryType::Salon).unwrap(), "\"salon\"");
        assert_eq!(IndustryType::default().to_string(), "general");
    }

    #[test]
    fn test_builtin_preset_names_unique() {
        let presets = builtin_presets();
        let names: BTreeSet<&str> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), presets.len());
    }

    #[test]
    fn test_every_ultimate_feature_is_described() {
        for feature in ULTIMATE {
            assert!(feature_description(feature).is_some(), "{}", feature);
        }
        assert_eq!(feature_description("tipping"), Some("Add tips to transactions"));
        assert_eq!(feature_description("teleportation"), None);
    }

    #[test]
    fn test_preset_definition_deserialize() {
        let preset: PresetDefinition =
            serde_json::from_str(r#"{"name": "food-truck", "extends": ["cafe"], "features": ["mobile-payments"]}"#)
                .unwrap();
        assert_eq!(preset.extends, vec!["cafe".to_string()]);
        assert!(preset.features.contains("mobile-payments"));
    }
}
