//! Sentence assembly: collapses a tree's AND/OR structure into groups.
//!
//! Subjects and objects are stored as OR-separated groups of AND-joined
//! entities. A connective of OR opens a new group, but only when there is
//! something to separate: an OR against an empty bucket never produces an
//! empty group.

use serde::{Deserialize, Serialize};

use crate::core::config::RoleWhitelist;
use crate::core::events;
use crate::schema::entity::{Entity, FieldError};
use crate::schema::instance::Instance;
use crate::schema::token::{LogicOp, ParseToken};
use crate::schema::tree::{NodeId, ParseForest};

/// The recognized event roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Buy,
    Sell,
    FindGroup,
    FindMore,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [Self::Buy, Self::Sell, Self::FindGroup, Self::FindMore];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::FindGroup => "findgroup",
            Self::FindMore => "findmore",
        }
    }

    /// The event a root token names, if any.
    pub fn from_token(token: &ParseToken) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| token.is_type(kind.type_name()))
    }

    pub fn sentence_name(&self) -> &'static str {
        match self {
            Self::Buy => "BuySentence",
            Self::Sell => "SellSentence",
            Self::FindGroup => "FindGroupSentence",
            Self::FindMore => "FindMoreSentence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Subject,
    Object,
}

impl Role {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Object => "object",
        }
    }
}

/// OR-separated groups of AND-joined items.
pub type Groups<T> = Vec<Vec<T>>;

/// Tracks which group the next item lands in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupCursor {
    index: usize,
}

impl GroupCursor {
    /// A cursor on the last existing group, or on the first when there is none.
    pub fn at_last<T>(groups: &Groups<T>) -> Self {
        Self {
            index: groups.len().saturating_sub(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to a fresh group when `logic` is OR and the current group is
    /// either missing or already holds something.
    pub fn advance<T>(&mut self, logic: Option<LogicOp>, groups: &Groups<T>) {
        if logic == Some(LogicOp::Or)
            && groups.get(self.index).map_or(true, |group| !group.is_empty())
        {
            self.index += 1;
        }
    }

    /// Place `item` in the current group, creating the group if needed.
    pub fn insert<T>(&mut self, groups: &mut Groups<T>, item: T) {
        if self.index >= groups.len() {
            groups.push(Vec::new());
            self.index = groups.len() - 1;
        }
        groups[self.index].push(item);
    }
}

/// One event, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub kind: EventKind,
    pub subjects: Groups<Entity>,
    pub objects: Groups<Entity>,
    /// Buy and Sell only.
    pub contact_methods: Groups<String>,
    /// FindMore only.
    pub instances: Groups<Instance>,
    pub rules: RoleWhitelist,
    pub diagnostics: Vec<FieldError>,
}

impl Sentence {
    pub fn new(kind: EventKind, rules: RoleWhitelist) -> Self {
        Self {
            kind,
            subjects: Groups::new(),
            objects: Groups::new(),
            contact_methods: Groups::new(),
            instances: Groups::new(),
            rules,
            diagnostics: Vec::new(),
        }
    }

    /// Populate a sentence of `kind` from the tree under `root`.
    pub fn assemble(
        forest: &ParseForest,
        root: NodeId,
        kind: EventKind,
        rules: &RoleWhitelist,
    ) -> Self {
        let mut sentence = Self::new(kind, rules.clone());
        sentence.read_role(forest, root, Role::Object);
        sentence.read_bare_objects(forest, root);
        sentence.read_role(forest, root, Role::Subject);

        match kind {
            EventKind::Buy | EventKind::Sell => {
                sentence.contact_methods = read_contact_methods(forest, root);
            }
            EventKind::FindMore => {
                sentence.instances = read_instances(forest, root);
            }
            EventKind::FindGroup => {}
        }

        sentence
    }

    /// Collect every entity under every `role` node anywhere below `root`.
    pub fn read_role(&mut self, forest: &ParseForest, root: NodeId, role: Role) {
        let mut cursor = GroupCursor::default();
        for clause in forest.find_all(root, role.type_name()) {
            let token = forest.token(clause);
            cursor.advance(token.logic, self.groups(role));
            self.read_clause(forest, clause, role, &mut cursor, token.negated);
        }
    }

    /// Entities written straight under the event root, outside any role
    /// clause, are read as objects. They join the last object group.
    pub fn read_bare_objects(&mut self, forest: &ParseForest, root: NodeId) {
        let mut cursor = GroupCursor::at_last(&self.objects);
        self.read_clause(forest, root, Role::Object, &mut cursor, false);
    }

    fn groups(&self, role: Role) -> &Groups<Entity> {
        match role {
            Role::Subject => &self.subjects,
            Role::Object => &self.objects,
        }
    }

    fn read_clause(
        &mut self,
        forest: &ParseForest,
        clause: NodeId,
        role: Role,
        cursor: &mut GroupCursor,
        negated: bool,
    ) {
        let Sentence {
            subjects,
            objects,
            rules,
            diagnostics,
            ..
        } = self;
        let groups = match role {
            Role::Subject => subjects,
            Role::Object => objects,
        };

        for &child in forest.children(clause) {
            let Some(mut entity) = Entity::extract(forest, child, diagnostics) else {
                continue;
            };
            if negated {
                entity.negate();
            }

            // An OR between entities inside one clause splits too.
            cursor.advance(entity.logic(), groups);

            if rules.allows(role, entity.kind()) {
                cursor.insert(groups, entity);
            }
        }
    }

    /// Every subject and object is of a kind this sentence accepts.
    pub fn roles_valid(&self) -> bool {
        let subjects_ok = self
            .subjects
            .iter()
            .flatten()
            .all(|e| self.rules.allows(Role::Subject, e.kind()));
        let objects_ok = self
            .objects
            .iter()
            .flatten()
            .all(|e| self.rules.allows(Role::Object, e.kind()));
        subjects_ok && objects_ok
    }

    pub fn render(&self) -> String {
        events::render(self)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Contact methods are direct `ContactMethod` children of the event root.
fn read_contact_methods(forest: &ParseForest, root: NodeId) -> Groups<String> {
    let mut groups = Groups::new();
    let mut cursor = GroupCursor::default();
    for node in forest.find_direct(root, "contactmethod") {
        let token = forest.token(node);
        cursor.advance(token.logic, &groups);
        if let Some(value) = &token.value {
            cursor.insert(&mut groups, value.clone());
        }
    }
    groups
}

/// Target instances are direct `Instance` children of the event root.
fn read_instances(forest: &ParseForest, root: NodeId) -> Groups<Instance> {
    let mut groups = Groups::new();
    let mut cursor = GroupCursor::default();
    for node in forest.find_direct(root, "instance") {
        cursor.advance(forest.token(node).logic, &groups);
        cursor.insert(&mut groups, Instance::from_node(forest, node));
    }
    groups
}
