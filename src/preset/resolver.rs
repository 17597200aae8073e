//! Preset resolution.
//!
//! Maps preset and subscription names to feature-flag sets.

use crate::preset::definition::{builtin_presets, IndustryType, PresetDefinition};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Read-only lookup from preset name to features.
#[derive(Clone, Debug, Default)]
pub struct PresetResolver {
    presets: HashMap<String, PresetDefinition>,
}

impl PresetResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver holding the built-in presets.
    pub fn with_builtin() -> Self {
        let mut resolver = Self::new();
        for preset in builtin_presets() {
            resolver.register(preset);
        }
        resolver
    }

    /// Add or replace a preset. Returns the replaced definition, if any.
    pub fn register(&mut self, preset: PresetDefinition) -> Option<PresetDefinition> {
        self.presets.insert(preset.name.clone(), preset)
    }

    /// Get a preset definition.
    pub fn get(&self, name: &str) -> Option<&PresetDefinition> {
        self.presets.get(name)
    }

    /// Known preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Features of a preset, including inherited ones.
    ///
    /// Unknown names resolve to an empty set.
    pub fn resolve(&self, name: &str) -> BTreeSet<String> {
        let mut features = BTreeSet::new();
        self.collect(name, &mut HashSet::new(), &mut features);
        features
    }

    /// Union of the features of every named subscription.
    pub fn features_for_active_subscriptions<I, S>(&self, subscriptions: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut features = BTreeSet::new();
        let mut visited = HashSet::new();
        for name in subscriptions {
            self.collect(name.as_ref(), &mut visited, &mut features);
        }
        features
    }

    fn collect<'a>(
        &'a self,
        name: &str,
        visited: &mut HashSet<&'a str>,
        features: &mut BTreeSet<String>,
    ) {
        let Some(preset) = self.presets.get(name) else {
            return;
        };
        if !visited.insert(preset.name.as_str()) {
            return;
        }
        for parent in &preset.extends {
            self.collect(parent, visited, features);
        }
        features.extend(preset.features.iter().cloned());
    }
}

/// Subscriptions enabled for a business, with its industry vertical.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionProfile {
    /// Enabled subscription (preset) names
    #[serde(default)]
    pub subscriptions: BTreeSet<String>,
    /// Industry vertical
    #[serde(default)]
    pub industry: IndustryType,
}

impl SubscriptionProfile {
    /// Create a profile.
    pub fn new<I, S>(subscriptions: I, industry: IndustryType) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subscriptions: subscriptions.into_iter().map(Into::into).collect(),
            industry,
        }
    }

    /// Replace the enabled subscriptions.
    pub fn set_subscriptions<I, S>(&mut self, subscriptions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subscriptions = subscriptions.into_iter().map(Into::into).collect();
    }

    /// Change the industry vertical.
    pub fn set_industry(&mut self, industry: IndustryType) {
        self.industry = industry;
    }

    /// Check whether a subscription is enabled.
    pub fn has_subscription(&self, subscription: &str) -> bool {
        self.subscriptions.contains(subscription)
    }

    /// Features granted by all enabled subscriptions.
    pub fn active_features(&self, resolver: &PresetResolver) -> BTreeSet<String> {
        resolver.features_for_active_subscriptions(&self.subscriptions)
    }

    /// Check whether any enabled subscription grants `feature`.
    pub fn has_feature(&self, resolver: &PresetResolver, feature: &str) -> bool {
        self.subscriptions
            .iter()
            .any(|subscription| resolver.resolve(subscription).contains(feature))
    }

    /// Order types for the profile's industry.
    pub fn order_types(&self) -> &'static [&'static str] {
        self.industry.order_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_preset_is_empty() {
        let resolver = PresetResolver::with_builtin();
        assert!(resolver.resolve("spaceport").is_empty());
        assert!(PresetResolver::new().resolve("general").is_empty());
    }

    #[test]
    fn test_inherited_features() {
        let resolver = PresetResolver::with_builtin();
        let general = resolver.resolve("general");
        let bar = resolver.resolve("bar");
        let pharmacy = resolver.resolve("pharmacy");

        assert_eq!(general.len(), 6);
        assert!(general.is_subset(&bar));
        assert!(resolver.resolve("restaurant").is_subset(&bar));
        assert!(bar.contains("open-tabs"));
        assert!(resolver.resolve("retail").is_subset(&pharmacy));
        assert!(pharmacy.contains("customer-profiles"));
        assert!(!resolver.resolve("ultimate").contains("customer-profiles"));
    }

    #[test]
    fn test_cafe_features() {
        let resolver = PresetResolver::with_builtin();
        let cafe = resolver.resolve("cafe");

        assert_eq!(cafe.len(), 13);
        assert!(cafe.contains("loyalty-program"));
        assert!(!cafe.contains("table-management"));
    }

    #[test]
    fn test_union_of_subscriptions() {
        let resolver = PresetResolver::with_builtin();
        let features = resolver.features_for_active_subscriptions(["salon", "retail", "nonexistent"]);

        assert!(features.contains("appointments"));
        assert!(features.contains("gift-cards"));
        assert!(features.contains("basic-pos"));

        let expected: BTreeSet<String> = resolver
            .resolve("salon")
            .union(&resolver.resolve("retail"))
            .cloned()
            .collect();
        assert_eq!(features, expected);
        assert!(resolver
            .features_for_active_subscriptions(Vec::<String>::new())
            .is_empty());
    }

    #[test]
    fn test_extends_cycle_terminates() {
        let mut resolver = PresetResolver::new();
        resolver.register(PresetDefinition::new("a", &["x"]).extending("b"));
        resolver.register(PresetDefinition::new("b", &["y"]).extending("a"));

        let features = resolver.resolve("a");
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn test_register_override() {
        let mut resolver = PresetResolver::with_builtin();
        let replaced = resolver.register(PresetDefinition::new("general", &["basic-pos"]));

        assert!(replaced.is_some());
        assert_eq!(resolver.resolve("general").len(), 1);
        assert!(resolver.names().contains(&"ultimate"));
    }

    #[test]
    fn test_subscription_profile() {
        let resolver = PresetResolver::with_builtin();
        let mut profile = SubscriptionProfile::new(["restaurant"], IndustryType::Restaurant);

        assert!(profile.has_subscription("restaurant"));
        assert!(profile.has_feature(&resolver, "split-checks"));
        assert!(!profile.has_feature(&resolver, "gift-cards"));
        assert_eq!(profile.order_types(), ["dine-in", "takeout", "delivery"]);

        profile.set_subscriptions(["retail"]);
        profile.set_industry(IndustryType::Retail);
        assert!(profile.has_feature(&resolver, "gift-cards"));
        assert!(!profile.has_subscription("restaurant"));
        assert_eq!(profile.active_features(&resolver), resolver.resolve("retail"));
        assert_eq!(profile.order_types(), ["in-store", "online"]);
    }
}
