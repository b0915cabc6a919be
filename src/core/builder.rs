//! Tree builder: groups the flat token list into rooted trees.

use rustc_hash::FxHashMap;

use crate::schema::token::ParseToken;
use crate::schema::tree::{NodeId, ParseForest};

/// Result of a build: the forest plus every token no root could reach.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub forest: ParseForest,
    pub unreachable: Vec<ParseToken>,
}

/// Build the forest for one line, silently dropping unreachable tokens.
pub fn build_forest(tokens: Vec<ParseToken>) -> ParseForest {
    build_with_orphans(tokens).forest
}

/// Build the forest and report tokens that hang off an id no root reaches.
///
/// Each token becomes at most one node, so duplicate or cyclic ids in a
/// hand-built token list cannot make the build loop.
pub fn build_with_orphans(tokens: Vec<ParseToken>) -> BuildOutput {
    let mut by_parent: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    let mut roots = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match token.parent.as_deref() {
            Some(parent) => by_parent.entry(parent).or_default().push(index),
            None => roots.push(index),
        }
    }

    let mut forest = ParseForest::new();
    let mut placed = vec![false; tokens.len()];
    // (token index, node it should hang under)
    let mut pending: Vec<(usize, Option<NodeId>)> =
        roots.iter().rev().map(|&index| (index, None)).collect();

    while let Some((index, parent)) = pending.pop() {
        if placed[index] {
            continue;
        }
        placed[index] = true;

        let token = tokens[index].clone();
        let node = match parent {
            Some(parent) => forest.add_child(parent, token),
            None => forest.add_root(token),
        };

        if let Some(children) = tokens[index].id.as_deref().and_then(|id| by_parent.get(id)) {
            pending.extend(children.iter().rev().map(|&child| (child, Some(node))));
        }
    }

    let unreachable = tokens
        .iter()
        .zip(&placed)
        .filter(|(_, placed)| !**placed)
        .map(|(token, _)| token.clone())
        .collect();

    BuildOutput {
        forest,
        unreachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_tokens;

    #[test]
    fn single_root_tree_mirrors_linkage() {
        let tokens = parse_tokens("Buy(a), Item(a,b), Name(b,\"Sword\"), Quantity(b,'2')").unwrap();
        let forest = build_forest(tokens);
        assert_eq!(forest.roots().len(), 1);

        let root = forest.roots()[0];
        assert!(forest.token(root).is_type("buy"));
        let item = forest.children(root)[0];
        assert!(forest.token(item).is_type("item"));
        let attrs: Vec<&str> = forest
            .children(item)
            .iter()
            .map(|&n| forest.token(n).kind.as_str())
            .collect();
        assert_eq!(attrs, vec!["Name", "Quantity"]);
    }

    #[test]
    fn multiple_roots_keep_input_order() {
        let tokens = parse_tokens("Sell(a), Buy(b), Item(a,c), Item(b,d)").unwrap();
        let forest = build_forest(tokens);
        let kinds: Vec<&str> = forest
            .roots()
            .iter()
            .map(|&r| forest.token(r).kind.as_str())
            .collect();
        assert_eq!(kinds, vec!["Sell", "Buy"]);
        assert_eq!(forest.children(forest.roots()[0]).len(), 1);
        assert_eq!(forest.children(forest.roots()[1]).len(), 1);
    }

    #[test]
    fn children_keep_flat_list_order_across_levels() {
        let tokens =
            parse_tokens("Buy(a), Object(a,o), Subject(a,s), Item(o,i), Player(s,p)").unwrap();
        let forest = build_forest(tokens);
        let root = forest.roots()[0];
        let first = forest.children(root)[0];
        let second = forest.children(root)[1];
        assert!(forest.token(first).is_type("object"));
        assert!(forest.token(second).is_type("subject"));
        assert!(forest.token(forest.children(first)[0]).is_type("item"));
        assert!(forest.token(forest.children(second)[0]).is_type("player"));
    }

    #[test]
    fn orphans_are_reported_not_attached() {
        let tokens = vec![
            ParseToken::new("Buy").with_id("a"),
            ParseToken::new("Item").with_parent("zz").with_id("b"),
            ParseToken::new("Name").with_parent("b").with_value("Sword"),
        ];
        let out = build_with_orphans(tokens);
        assert_eq!(out.forest.len(), 1);
        assert_eq!(out.unreachable.len(), 2);
    }

    #[test]
    fn self_referencing_ids_do_not_loop() {
        let tokens = vec![
            ParseToken::new("Buy").with_id("a"),
            ParseToken::new("Item").with_parent("a").with_id("a"),
        ];
        let forest = build_forest(tokens);
        assert_eq!(forest.len(), 2);
    }
}
