use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{parse_int, FieldError, Marks};
use super::tree::{NodeId, ParseForest};
use crate::core::text::{delimiter_list, pluralize};

/// A player character, or a number of them (`quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub classes: Vec<String>,
    pub specializations: Vec<String>,
    pub race: String,
    pub role: String,
    pub level: Option<i32>,
    pub item_level: Option<i32>,
    pub quantity: i32,
    pub marks: Marks,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            specializations: Vec::new(),
            race: String::new(),
            role: String::new(),
            level: None,
            item_level: None,
            quantity: 1,
            marks: Marks::default(),
        }
    }
}

impl Player {
    pub fn from_node(forest: &ParseForest, node: NodeId, diagnostics: &mut Vec<FieldError>) -> Self {
        let mut player = Self {
            marks: Marks::of(forest, node),
            ..Self::default()
        };

        for &attribute in forest.children(node) {
            let token = forest.token(attribute);
            let value = token.value.as_deref();
            match token.kind.to_ascii_lowercase().as_str() {
                "class" => player.classes.extend(value.map(str::to_string)),
                "specialization" => player.specializations.extend(value.map(str::to_string)),
                "race" => player.race = value.unwrap_or_default().to_string(),
                "role" => player.role = value.unwrap_or_default().to_string(),
                "level" => {
                    if let Some(level) = parse_int("level", value, diagnostics) {
                        player.level = Some(level);
                    }
                }
                "itemlevel" => {
                    if let Some(item_level) = parse_int("item level", value, diagnostics) {
                        player.item_level = Some(item_level);
                    }
                }
                "quantity" => {
                    if let Some(quantity) = parse_int("quantity", value, diagnostics) {
                        player.quantity = quantity;
                    }
                }
                _ => {}
            }
        }

        player
    }

    /// A player needs at least a class or a role to be rendered.
    pub fn is_complete(&self) -> bool {
        !self.classes.is_empty() || !self.role.is_empty()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_complete() {
            return f.write_str("< Error: Incomplete player encountered >");
        }

        let mut out = String::new();
        if self.quantity > 1 {
            out.push_str(&format!("{} ", self.quantity));
        }

        let level = self.level.filter(|l| *l > -1);
        let item_level = self.item_level.filter(|l| *l > -1);
        if let Some(level) = level {
            out.push_str(&format!("Level {} ", level));
            if item_level.is_some() {
                out.push_str("/ ");
            }
        }
        if let Some(item_level) = item_level {
            out.push_str(&format!("Item Level {} ", item_level));
        }

        if !self.classes.is_empty() {
            if !self.race.is_empty() {
                out.push_str(&self.race);
                out.push(' ');
            }
            if !self.specializations.is_empty() {
                out.push_str(&delimiter_list(&self.specializations, " / "));
                out.push(' ');
            }
            if self.classes.len() == 1 && self.quantity > 1 {
                out.push_str(&pluralize(&self.classes[0]));
            } else {
                out.push_str(&delimiter_list(&self.classes, " / "));
            }
        } else if self.quantity > 1 {
            out.push_str(&pluralize(&self.role));
        } else {
            out.push_str(&self.role);
        }

        f.write_str(out.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_forest;
    use crate::core::parser::parse_tokens;

    fn player(attributes: &str) -> (Player, Vec<FieldError>) {
        let line = format!("Subject(s), Player(s,p){}", attributes);
        let forest = build_forest(parse_tokens(&line).unwrap());
        let node = forest.children(forest.roots()[0])[0];
        let mut diagnostics = Vec::new();
        let player = Player::from_node(&forest, node, &mut diagnostics);
        (player, diagnostics)
    }

    #[test]
    fn role_only_player() {
        let (p, _) = player(", Role(p,\"Healer\")");
        assert_eq!(p.to_string(), "Healer");
    }

    #[test]
    fn several_healers_are_pluralized() {
        let (p, _) = player(", Role(p,\"Healer\"), Quantity(p,'3')");
        assert_eq!(p.to_string(), "3 Healers");
    }

    #[test]
    fn full_description() {
        let (p, diagnostics) = player(
            ", Class(p,\"Paladin\"), Specialization(p,\"Holy\"), Race(p,\"Dwarf\"), \
             Level(p,'85'), ItemLevel(p,'378')",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(p.to_string(), "Level 85 / Item Level 378 Dwarf Holy Paladin");
    }

    #[test]
    fn multiple_classes_use_slashes() {
        let (p, _) = player(", Class(p,\"Warrior\"), Class(p,\"Paladin\"), Quantity(p,'2')");
        assert_eq!(p.to_string(), "2 Warrior / Paladin");
    }

    #[test]
    fn bad_level_keeps_default() {
        let (p, diagnostics) = player(", Role(p,\"Tank\"), Level(p,\"high\")");
        assert_eq!(p.level, None);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(p.to_string(), "Tank");
    }

    #[test]
    fn incomplete_player() {
        let (p, _) = player(", Level(p,'10')");
        assert_eq!(p.to_string(), "< Error: Incomplete player encountered >");
    }
}
