use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::Marks;
use super::tree::{NodeId, ParseForest};

/// A dungeon, raid or other instance a group can be formed for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub mode: String,
    pub difficulty: String,
    pub marks: Marks,
}

impl Instance {
    pub fn from_node(forest: &ParseForest, node: NodeId) -> Self {
        let mut instance = Self {
            marks: Marks::of(forest, node),
            ..Self::default()
        };

        for &attribute in forest.children(node) {
            let token = forest.token(attribute);
            let value = token.value.as_deref().unwrap_or_default().to_string();
            match token.kind.to_ascii_lowercase().as_str() {
                "name" => instance.name = value,
                "mode" => instance.mode = value,
                "difficulty" => instance.difficulty = value,
                _ => {}
            }
        }

        instance
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            return f.write_str("< Error Incomplete Instance Encountered >");
        }
        let parts: Vec<&str> = [&self.difficulty, &self.mode, &self.name]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        f.write_str(parts.join(" ").trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_forest;
    use crate::core::parser::parse_tokens;

    fn instance(attributes: &str) -> Instance {
        let line = format!("Object(o), Instance(o,i){}", attributes);
        let forest = build_forest(parse_tokens(&line).unwrap());
        Instance::from_node(&forest, forest.children(forest.roots()[0])[0])
    }

    #[test]
    fn full_instance_name() {
        let i = instance(", Name(i,\"Icecrown Citadel\"), Mode(i,\"25-man\"), Difficulty(i,\"Heroic\")");
        assert_eq!(i.to_string(), "Heroic 25-man Icecrown Citadel");
    }

    #[test]
    fn name_only() {
        assert_eq!(instance(", Name(i,\"Deadmines\")").to_string(), "Deadmines");
    }

    #[test]
    fn missing_name_is_incomplete() {
        assert_eq!(
            instance(", Mode(i,\"Heroic\")").to_string(),
            "< Error Incomplete Instance Encountered >"
        );
    }
}
