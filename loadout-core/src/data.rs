use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::card::CardSlot;

/// A weapon, grenade or stratagem as published by the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub icon: String,
}

impl Item {
    #[must_use]
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// Card label text for this item.
    #[must_use]
    pub fn label(&self) -> String {
        self.name.to_uppercase()
    }
}

/// Stratagems as published: category name to the items in that category.
pub type StratagemGroups = IndexMap<String, Vec<Item>>;

/// Everything a roll can draw from. Loaded once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub primaries: Vec<Item>,
    #[serde(default)]
    pub secondaries: Vec<Item>,
    #[serde(default)]
    pub grenades: Vec<Item>,
    #[serde(default)]
    pub stratagems: Vec<Item>,
}

impl Catalog {
    /// Create an empty catalog (the state before loading completes)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from the four published documents, flattening the
    /// grouped stratagems in document order.
    #[must_use]
    pub fn from_parts(
        primaries: Vec<Item>,
        secondaries: Vec<Item>,
        grenades: Vec<Item>,
        stratagem_groups: StratagemGroups,
    ) -> Self {
        Self {
            primaries,
            secondaries,
            grenades,
            stratagems: flatten_stratagems(stratagem_groups),
        }
    }

    /// A catalog counts as loaded once primaries are present.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.primaries.is_empty()
    }

    /// Items a card in `slot` draws its decoys from.
    #[must_use]
    pub fn pool(&self, slot: CardSlot) -> &[Item] {
        match slot {
            CardSlot::Primary => &self.primaries,
            CardSlot::Secondary => &self.secondaries,
            CardSlot::Grenade => &self.grenades,
            CardSlot::Stratagem(_) => &self.stratagems,
        }
    }

    /// Item counts in primary, secondary, grenade, stratagem order.
    #[must_use]
    pub fn counts(&self) -> [usize; 4] {
        [
            self.primaries.len(),
            self.secondaries.len(),
            self.grenades.len(),
            self.stratagems.len(),
        ]
    }
}

/// Discard category keys and concatenate the lists in document order.
#[must_use]
pub fn flatten_stratagems(groups: StratagemGroups) -> Vec<Item> {
    groups.into_values().flatten().collect()
}
