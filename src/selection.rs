//! User-selected maintenance options.
//!
//! A [`Selection`] is the configuration side of the engine: a set of enabled
//! catalog options, usually built from named boolean toggles supplied by the
//! hosting UI via [`Selection::from_toggles`].

use crate::Tweak;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A set of enabled maintenance options.
///
/// Selections are value types: build one per user action, derive a plan from
/// it, and discard it. The engine never mutates a selection it was given.
///
/// Iteration order is the catalog's declaration order, never the insertion
/// order or the hash order of the toggle map it was built from, so plans
/// derived from equal selections are byte-identical.
///
/// # Example
///
/// ```rust
/// use tuneup_engine::{Selection, Tweak};
///
/// let mut selection = Selection::new();
/// selection.enable(Tweak::RemoveOneDrive);
/// selection.enable(Tweak::DisableTelemetry);
///
/// assert!(selection.is_enabled(Tweak::DisableTelemetry));
/// assert_eq!(selection.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    enabled: BTreeSet<Tweak>,
}

impl Selection {
    /// Empty selection (nothing enabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from named boolean toggles.
    ///
    /// Names use the catalog's camel-case identifiers (e.g.
    /// `"disableTelemetry"`). Unknown names are ignored, and options absent
    /// from the map are treated as not selected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tuneup_engine::{Selection, Tweak};
    ///
    /// let toggles = [
    ///     ("removeOneDrive", true),
    ///     ("disableTelemetry", true),
    ///     ("disableHibernation", false),
    ///     ("someUnknownOption", true),
    /// ];
    /// let selection = Selection::from_toggles(toggles);
    ///
    /// assert!(selection.is_enabled(Tweak::RemoveOneDrive));
    /// assert!(!selection.is_enabled(Tweak::DisableHibernation));
    /// assert_eq!(selection.len(), 2);
    /// ```
    pub fn from_toggles<I, S>(toggles: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for (name, on) in toggles {
            if !on {
                continue;
            }
            if let Ok(tweak) = Tweak::from_str(name.as_ref()) {
                selection.enable(tweak);
            }
        }
        selection
    }

    /// Enable an option. Enabling twice is a no-op.
    pub fn enable(&mut self, tweak: Tweak) {
        self.enabled.insert(tweak);
    }

    /// Disable an option.
    pub fn disable(&mut self, tweak: Tweak) {
        self.enabled.remove(&tweak);
    }

    /// Whether an option is enabled.
    pub fn is_enabled(&self, tweak: Tweak) -> bool {
        self.enabled.contains(&tweak)
    }

    /// Number of enabled options.
    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Whether nothing is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Enabled options in catalog declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Tweak> + '_ {
        // BTreeSet ordering matches the enum's derived Ord, which is
        // declaration order.
        self.enabled.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_selection() {
        let selection = Selection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
        assert!(!selection.is_enabled(Tweak::RemoveOneDrive));
    }

    #[test]
    fn test_enable_disable() {
        let mut selection = Selection::new();
        selection.enable(Tweak::DisableTelemetry);
        selection.enable(Tweak::DisableTelemetry);
        assert_eq!(selection.len(), 1);

        selection.disable(Tweak::DisableTelemetry);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_from_toggles_ignores_unknown_and_false() {
        let mut toggles = HashMap::new();
        toggles.insert("removeXbox".to_string(), true);
        toggles.insert("disableAds".to_string(), false);
        toggles.insert("nonsense".to_string(), true);

        let selection = Selection::from_toggles(toggles);
        assert_eq!(selection.len(), 1);
        assert!(selection.is_enabled(Tweak::RemoveXbox));
    }

    #[test]
    fn test_iteration_order_is_declaration_order() {
        // Insert in reverse category order; iteration must still come out
        // removal -> privacy -> performance.
        let mut selection = Selection::new();
        selection.enable(Tweak::OptimizeNetwork);
        selection.enable(Tweak::DisableTelemetry);
        selection.enable(Tweak::RemoveOneDrive);

        let order: Vec<_> = selection.iter().collect();
        assert_eq!(
            order,
            vec![
                Tweak::RemoveOneDrive,
                Tweak::DisableTelemetry,
                Tweak::OptimizeNetwork
            ]
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let mut selection = Selection::new();
        selection.enable(Tweak::RemoveSkype);
        let json = serde_json::to_string(&selection).unwrap();
        let parsed: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, selection);
    }
}
