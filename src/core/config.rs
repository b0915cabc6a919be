//! Generator configuration: loaded from RON, defaulting to the fixed tables.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::sentence::{EventKind, Role};
use crate::schema::entity::EntityKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Entity kinds one event accepts as its subjects and objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWhitelist {
    #[serde(default)]
    pub subjects: Vec<EntityKind>,
    #[serde(default)]
    pub objects: Vec<EntityKind>,
}

static NOTHING_ALLOWED: RoleWhitelist = RoleWhitelist {
    subjects: Vec::new(),
    objects: Vec::new(),
};

impl RoleWhitelist {
    pub fn new(subjects: &[EntityKind], objects: &[EntityKind]) -> Self {
        Self {
            subjects: subjects.to_vec(),
            objects: objects.to_vec(),
        }
    }

    pub fn allows(&self, role: Role, kind: EntityKind) -> bool {
        match role {
            Role::Subject => self.subjects.contains(&kind),
            Role::Object => self.objects.contains(&kind),
        }
    }
}

/// Event kind → accepted entity kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhitelistTable {
    pub rules: FxHashMap<EventKind, RoleWhitelist>,
}

impl Default for WhitelistTable {
    fn default() -> Self {
        use EntityKind::{Instance, Item, Player};

        let mut rules = FxHashMap::default();
        rules.insert(EventKind::Buy, RoleWhitelist::new(&[Player], &[Item]));
        rules.insert(EventKind::Sell, RoleWhitelist::new(&[Player], &[Item]));
        rules.insert(EventKind::FindGroup, RoleWhitelist::new(&[Player], &[Instance]));
        rules.insert(EventKind::FindMore, RoleWhitelist::new(&[], &[Player]));
        Self { rules }
    }
}

impl WhitelistTable {
    /// Rules for `kind`; an event missing from the table accepts nothing.
    pub fn for_event(&self, kind: EventKind) -> &RoleWhitelist {
        self.rules.get(&kind).unwrap_or(&NOTHING_ALLOWED)
    }

    /// Merge another table into this one. Entries from `other` replace
    /// entries for the same event kind.
    pub fn merge(&mut self, other: FxHashMap<EventKind, RoleWhitelist>) {
        for (kind, rules) in other {
            self.rules.insert(kind, rules);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    /// Print the parse trees of every line after its sentences.
    pub show_tree: bool,
    pub whitelist: WhitelistTable,
}

// The RON file lists only the event kinds it overrides, so it is read
// through an intermediate shape and merged over the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename = "Config")]
struct RonConfig {
    #[serde(default)]
    show_tree: bool,
    #[serde(default)]
    whitelist: FxHashMap<EventKind, RoleWhitelist>,
}

impl GeneratorConfig {
    pub fn load_from_ron(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<GeneratorConfig, ConfigError> {
        let raw: RonConfig = ron::from_str(input)?;
        let mut whitelist = WhitelistTable::default();
        whitelist.merge(raw.whitelist);
        Ok(GeneratorConfig {
            show_tree: raw.show_tree,
            whitelist,
        })
    }
}
