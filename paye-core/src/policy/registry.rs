use std::collections::HashMap;

use tracing::debug;

use super::{PolicyError, TaxPolicy};
use crate::models::LawVersion;

/// Tax policies keyed by code.
///
/// Typical lifetime:
/// 1. Create with [`PolicyRegistry::with_builtin`] (or `new()` for an empty one).
/// 2. Call `register` for any custom policy, e.g. a band table loaded from CSV.
/// 3. Call `get` whenever a policy is needed.
///
/// Codes naming a built-in law version are normalised through
/// [`LawVersion::parse`], so `"new"` resolves to the `"2026"` entry.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    policies: HashMap<String, TaxPolicy>,
}

impl PolicyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// A registry holding the policy of every built-in law version.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for version in LawVersion::all() {
            registry.register(TaxPolicy::for_version(*version));
        }
        registry
    }

    /// Register a policy under its own code, returning any policy it replaced.
    pub fn register(
        &mut self,
        policy: TaxPolicy,
    ) -> Option<TaxPolicy> {
        let code = normalize_code(&policy.code);
        debug!(code = %code, bands = policy.bands.len(), "registering tax policy");
        self.policies.insert(code, policy)
    }

    /// Codes of every registered policy, sorted alphabetically.
    pub fn available_policies(&self) -> Vec<String> {
        let mut codes: Vec<_> = self.policies.keys().cloned().collect();
        codes.sort_unstable();
        codes
    }

    /// Look up a policy by code.
    ///
    /// # Errors
    /// [`PolicyError::UnknownPolicy`] when nothing is registered under `code`.
    pub fn get(
        &self,
        code: &str,
    ) -> Result<&TaxPolicy, PolicyError> {
        self.policies
            .get(&normalize_code(code))
            .ok_or_else(|| PolicyError::UnknownPolicy {
                code: code.to_string(),
                available: self.available_policies(),
            })
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

fn normalize_code(code: &str) -> String {
    match LawVersion::parse(code) {
        Some(version) => version.as_str().to_string(),
        None => code.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BandTable, Money, Rate, TaxBand};

    fn flat_policy(code: &str) -> TaxPolicy {
        let bands = BandTable::new(vec![TaxBand::new(Money::ZERO, None, Rate::new(dec!(0.10)))])
            .unwrap();
        TaxPolicy::for_version(LawVersion::Y2026).with_bands(code, bands)
    }

    #[test]
    fn new_registry_has_no_policies() {
        assert!(PolicyRegistry::new().available_policies().is_empty());
    }

    #[test]
    fn builtin_registry_lists_both_laws() {
        let registry = PolicyRegistry::with_builtin();

        assert_eq!(registry.available_policies(), vec!["2025", "2026"]);
    }

    #[test]
    fn default_registry_is_builtin() {
        assert_eq!(
            PolicyRegistry::default().available_policies(),
            vec!["2025", "2026"]
        );
    }

    #[test]
    fn get_resolves_aliases() {
        let registry = PolicyRegistry::with_builtin();

        assert_eq!(registry.get("new").unwrap().code, "2026");
        assert_eq!(registry.get("OLD").unwrap().code, "2025");
    }

    #[test]
    fn register_custom_policy() {
        let mut registry = PolicyRegistry::with_builtin();

        let replaced = registry.register(flat_policy("flat"));

        assert_eq!(replaced, None);
        assert_eq!(registry.available_policies(), vec!["2025", "2026", "flat"]);
        assert_eq!(registry.get("flat").unwrap().bands.len(), 1);
    }

    #[test]
    fn register_replaces_existing_policy() {
        let mut registry = PolicyRegistry::with_builtin();

        let replaced = registry.register(flat_policy("2026"));

        assert_eq!(replaced.map(|p| p.bands.len()), Some(5));
        assert_eq!(registry.get("2026").unwrap().bands.len(), 1);
    }

    #[test]
    fn unknown_policy_names_requested_and_available_codes() {
        let registry = PolicyRegistry::with_builtin();

        match registry.get("2030") {
            Err(PolicyError::UnknownPolicy { code, available }) => {
                assert_eq!(code, "2030");
                assert_eq!(available, vec!["2025", "2026"]);
            }
            other => panic!("expected UnknownPolicy, got {other:#?}"),
        }
    }
}
