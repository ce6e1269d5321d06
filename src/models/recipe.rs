use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CraftError, Result};

/// Equipment slot. Also the column label of the base focus cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    Head,
    Body,
    Legs,
    RightHand,
    LeftHand,
    TwoHanded,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Head,
        Slot::Body,
        Slot::Legs,
        Slot::RightHand,
        Slot::LeftHand,
        Slot::TwoHanded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Head => "head",
            Slot::Body => "body",
            Slot::Legs => "legs",
            Slot::RightHand => "right-hand",
            Slot::LeftHand => "left-hand",
            Slot::TwoHanded => "two-handed",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = CraftError;

    fn from_str(s: &str) -> Result<Self> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| CraftError::InvalidInput(format!("unknown slot '{}'", s)))
    }
}

/// One craftable item.
///
/// Built once from configuration and never mutated. The valuation
/// formulas live in [`crate::engine`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,

    /// Resource name to units consumed per craft.
    pub resources: BTreeMap<String, u32>,

    pub artifact: Option<String>,

    /// Royal items consume tier-scaled artifact amounts.
    pub is_royal: bool,

    pub slot: Option<Slot>,

    /// Crafting station, needed for journals.
    pub machine: Option<String>,

    /// Mastery family, needed for focus efficiency.
    pub family: Option<String>,
}

impl Recipe {
    /// Create a recipe with just resources. Use the `with_*` builders for the rest.
    pub fn new(name: impl Into<String>, resources: BTreeMap<String, u32>) -> Result<Self> {
        let name = name.into();
        if resources.is_empty() {
            return Err(CraftError::config(format!("recipe '{}' has no resources", name)));
        }
        if let Some((resource, _)) = resources.iter().find(|(_, qty)| **qty == 0) {
            return Err(CraftError::config(format!(
                "recipe '{}' uses zero units of '{}'",
                name, resource
            )));
        }
        Ok(Self {
            name,
            resources,
            artifact: None,
            is_royal: false,
            slot: None,
            machine: None,
            family: None,
        })
    }

    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Mark the recipe royal. Royal recipes must know their slot.
    pub fn royal(mut self) -> Result<Self> {
        if self.slot.is_none() {
            return Err(CraftError::config(format!(
                "royal recipe '{}' requires a slot",
                self.name
            )));
        }
        self.is_royal = true;
        Ok(self)
    }

    /// Total resource units per craft.
    pub fn resource_units(&self) -> u32 {
        self.resources.values().sum()
    }

    /// Slot, or a configuration error naming what needed it.
    pub fn require_slot(&self, purpose: &str) -> Result<Slot> {
        self.slot.ok_or_else(|| {
            CraftError::config(format!("{} of '{}' requires a slot", purpose, self.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_slot_roundtrip_names() {
        for slot in Slot::ALL {
            assert_eq!(slot.as_str().parse::<Slot>().unwrap(), slot);
        }
        assert!("feet".parse::<Slot>().is_err());
    }

    #[test]
    fn test_slot_serde_names() {
        let slot: Slot = serde_yaml::from_str("two-handed").unwrap();
        assert_eq!(slot, Slot::TwoHanded);
    }

    #[test]
    fn test_new_rejects_zero_quantity() {
        let err = Recipe::new("cap", resources(&[("cloth", 0)]));
        assert!(matches!(err, Err(CraftError::Configuration(_))));
        assert!(Recipe::new("cap", BTreeMap::new()).is_err());
    }

    #[test]
    fn test_royal_requires_slot() {
        let recipe = Recipe::new("royal cowl", resources(&[("cloth", 8)])).unwrap();
        assert!(recipe.clone().royal().is_err());

        let royal = recipe.with_slot(Slot::Head).royal().unwrap();
        assert!(royal.is_royal);
    }

    #[test]
    fn test_resource_units() {
        let recipe = Recipe::new("sword", resources(&[("bar", 16), ("leather", 8)])).unwrap();
        assert_eq!(recipe.resource_units(), 24);
    }
}
