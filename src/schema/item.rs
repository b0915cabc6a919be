use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{parse_int, FieldError, Marks};
use super::tree::{NodeId, ParseForest};
use crate::core::text::{comma_list, pluralize, ListItem};

/// An amount of money: a whole denomination in some currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyAmount {
    pub denomination: Option<i64>,
    pub currency: String,
}

impl MoneyAmount {
    pub fn new(denomination: i64, currency: &str) -> Self {
        Self {
            denomination: Some(denomination),
            currency: currency.to_string(),
        }
    }

    /// Read a `MoneyAmount` node. Denomination and currency are searched
    /// anywhere below it; when repeated, the last one wins.
    pub fn from_node(forest: &ParseForest, node: NodeId, diagnostics: &mut Vec<FieldError>) -> Self {
        let mut amount = Self::default();
        for denomination in forest.find_all(node, "denomination") {
            let value = forest.token(denomination).value.as_deref();
            if let Some(n) = parse_int("denomination", value, diagnostics) {
                amount.denomination = Some(i64::from(n));
            }
        }
        for currency in forest.find_all(node, "currency") {
            if let Some(value) = forest.token(currency).value.as_deref() {
                amount.currency = value.to_string();
            }
        }
        amount
    }

    pub fn is_complete(&self) -> bool {
        self.denomination.is_some() && !self.currency.is_empty()
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(denomination) = self.denomination.filter(|_| !self.currency.is_empty()) else {
            return f.write_str("< Error: Incomplete currency encountered >");
        };
        let currency = self.currency.to_lowercase();
        if denomination > 1000 {
            let thousands = denomination as f64 / 1000.0;
            write!(f, "{}k {}", thousands, currency)
        } else {
            write!(f, "{} {}", denomination, currency)
        }
    }
}

/// An in-game item, identified by its name or, failing that, its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub rarity: String,
    pub item_type: String,
    pub value: Vec<MoneyAmount>,
    pub level: Option<i32>,
    pub quantity: i32,
    pub marks: Marks,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            name: String::new(),
            rarity: String::new(),
            item_type: String::new(),
            value: Vec::new(),
            level: None,
            quantity: 1,
            marks: Marks::default(),
        }
    }
}

impl Item {
    pub fn from_node(forest: &ParseForest, node: NodeId, diagnostics: &mut Vec<FieldError>) -> Self {
        let mut item = Self {
            marks: Marks::of(forest, node),
            ..Self::default()
        };

        for &attribute in forest.children(node) {
            let token = forest.token(attribute);
            let value = token.value.as_deref();
            match token.kind.to_ascii_lowercase().as_str() {
                "name" => item.name = value.unwrap_or_default().to_string(),
                "rarity" => item.rarity = value.unwrap_or_default().to_string(),
                "type" => item.item_type = value.unwrap_or_default().to_string(),
                "level" => {
                    if let Some(level) = parse_int("level", value, diagnostics) {
                        item.level = Some(level);
                    }
                }
                "quantity" => {
                    if let Some(quantity) = parse_int("quantity", value, diagnostics) {
                        item.quantity = quantity;
                    }
                }
                // The value attribute is compound: amounts sit somewhere below it.
                "value" => {
                    for money in forest.find_all(attribute, "moneyamount") {
                        let amount = MoneyAmount::from_node(forest, money, diagnostics);
                        if amount.is_complete() {
                            item.value.push(amount);
                        }
                    }
                }
                _ => {}
            }
        }

        item
    }

    fn price_clause(&self) -> String {
        if self.value.is_empty() {
            return String::new();
        }
        let amounts: Vec<ListItem> = self.value.iter().map(ListItem::scalar).collect();
        format!("for {}", comma_list(&amounts, "and", &[]))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if self.quantity > 0 {
            out.push_str(&format!("{} ", self.quantity));
        }

        if !self.name.is_empty() {
            if self.quantity > 1 {
                out.push_str(&pluralize(&self.name));
            } else {
                out.push_str(&self.name);
            }
        } else if !self.item_type.is_empty() {
            if !self.rarity.is_empty() {
                out.push_str(&self.rarity.to_lowercase());
                out.push(' ');
            }
            if let Some(level) = self.level.filter(|l| *l > -1) {
                out.push_str(&format!("Item Level {} ", level));
            }
            let item_type = self.item_type.to_lowercase();
            if self.quantity > 1 {
                out.push_str(&pluralize(&item_type));
            } else {
                out.push_str(&item_type);
            }
        } else {
            return f.write_str("< Error: Incomplete item encountered >");
        }

        out.push(' ');
        out.push_str(&self.price_clause());
        f.write_str(out.trim())
    }
}
