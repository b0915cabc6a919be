//! Entities: the typed things a sentence talks about.
//!
//! Each concrete entity is extracted from one tree node by reading the
//! node's direct children as attributes. Which extractor runs is decided by
//! the node's type name through `EXTRACTORS`; unknown names produce nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::instance::Instance;
use super::item::Item;
use super::player::Player;
use super::token::LogicOp;
use super::tree::{NodeId, ParseForest};

/// A numeric attribute that could not be read. Extraction carries on with
/// the field left at its default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Could not parse \"{value}\" as an integer for {field}.")]
    NotAnInteger { field: String, value: String },
}

/// The concrete entity categories, used by the per-event whitelists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Item,
    Instance,
}

impl EntityKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Item => "item",
            Self::Instance => "instance",
        }
    }
}

/// Negation and connective copied from the token an entity came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marks {
    pub negated: bool,
    pub logic: Option<LogicOp>,
}

impl Marks {
    pub fn of(forest: &ParseForest, node: NodeId) -> Self {
        let token = forest.token(node);
        Self {
            negated: token.negated,
            logic: token.logic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Entity {
    Player(Player),
    Item(Item),
    Instance(Instance),
}

type Extractor = fn(&ParseForest, NodeId, &mut Vec<FieldError>) -> Entity;

fn extract_player(forest: &ParseForest, node: NodeId, diagnostics: &mut Vec<FieldError>) -> Entity {
    Entity::Player(Player::from_node(forest, node, diagnostics))
}

fn extract_item(forest: &ParseForest, node: NodeId, diagnostics: &mut Vec<FieldError>) -> Entity {
    Entity::Item(Item::from_node(forest, node, diagnostics))
}

fn extract_instance(forest: &ParseForest, node: NodeId, _: &mut Vec<FieldError>) -> Entity {
    Entity::Instance(Instance::from_node(forest, node))
}

/// Type name → extractor.
const EXTRACTORS: &[(EntityKind, Extractor)] = &[
    (EntityKind::Player, extract_player),
    (EntityKind::Item, extract_item),
    (EntityKind::Instance, extract_instance),
];

impl Entity {
    /// Build the entity named by the node's type, if the type is known.
    pub fn extract(
        forest: &ParseForest,
        node: NodeId,
        diagnostics: &mut Vec<FieldError>,
    ) -> Option<Entity> {
        let token = forest.token(node);
        EXTRACTORS
            .iter()
            .find(|(kind, _)| token.is_type(kind.type_name()))
            .map(|(_, extract)| extract(forest, node, diagnostics))
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Player(_) => EntityKind::Player,
            Self::Item(_) => EntityKind::Item,
            Self::Instance(_) => EntityKind::Instance,
        }
    }

    fn marks(&self) -> &Marks {
        match self {
            Self::Player(p) => &p.marks,
            Self::Item(i) => &i.marks,
            Self::Instance(i) => &i.marks,
        }
    }

    pub fn logic(&self) -> Option<LogicOp> {
        self.marks().logic
    }

    pub fn is_negated(&self) -> bool {
        self.marks().negated
    }

    pub fn negate(&mut self) {
        match self {
            Self::Player(p) => p.marks.negated = true,
            Self::Item(i) => i.marks.negated = true,
            Self::Instance(i) => i.marks.negated = true,
        }
    }

    /// Players counted toward a group's size; other entities count zero.
    pub fn headcount(&self) -> i64 {
        match self {
            Self::Player(p) => i64::from(p.quantity),
            _ => 0,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(p) => fmt::Display::fmt(p, f),
            Self::Item(i) => fmt::Display::fmt(i, f),
            Self::Instance(i) => fmt::Display::fmt(i, f),
        }
    }
}

/// Read an integer attribute, recording a diagnostic when it is malformed.
pub(crate) fn parse_int(
    field: &str,
    value: Option<&str>,
    diagnostics: &mut Vec<FieldError>,
) -> Option<i32> {
    let value = value.unwrap_or_default();
    match value.trim().parse::<i32>() {
        Ok(n) => Some(n),
        Err(_) => {
            diagnostics.push(FieldError::NotAnInteger {
                field: field.to_string(),
                value: value.to_string(),
            });
            None
        }
    }
}
