//! Per-event sentence templates.

use crate::core::sentence::{EventKind, Sentence};
use crate::core::text::{append_comma_list, groups};

/// Top-level groups are alternatives; members of one group are joined.
const OUTER: &str = "or";
const INNER: &[&str] = &["and"];

/// Why a sentence renders as an error string instead of its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceFault {
    /// The roles the template needs are all empty.
    Empty,
    /// A subject or object is of a kind the event does not accept.
    InvalidRoles,
}

pub fn fault(sentence: &Sentence) -> Option<SentenceFault> {
    let empty = match sentence.kind {
        EventKind::Buy | EventKind::Sell => sentence.objects.is_empty(),
        EventKind::FindGroup => sentence.objects.is_empty() && sentence.subjects.is_empty(),
        EventKind::FindMore => {
            sentence.objects.is_empty()
                && sentence.subjects.is_empty()
                && sentence.instances.is_empty()
        }
    };
    if empty {
        Some(SentenceFault::Empty)
    } else if !sentence.roles_valid() {
        Some(SentenceFault::InvalidRoles)
    } else {
        None
    }
}

fn fault_message(kind: EventKind, fault: SentenceFault) -> String {
    let detail = match (kind, fault) {
        (EventKind::Buy, SentenceFault::Empty) => "No object to buy found",
        (EventKind::Sell, SentenceFault::Empty) => "No object to sell found",
        (EventKind::FindGroup, SentenceFault::Empty) => "No object nor subject found",
        (EventKind::FindMore, SentenceFault::Empty) => "No subject or object found",
        (EventKind::Buy | EventKind::Sell, SentenceFault::InvalidRoles) => {
            "Invalid object or subject found"
        }
        (EventKind::FindGroup | EventKind::FindMore, SentenceFault::InvalidRoles) => {
            "Invalid subject or object found"
        }
    };
    format!("< Error in {}: {} >", kind.sentence_name(), detail)
}

pub fn render(sentence: &Sentence) -> String {
    if let Some(fault) = fault(sentence) {
        return fault_message(sentence.kind, fault);
    }
    match sentence.kind {
        EventKind::Buy => render_trade(sentence, "WTB"),
        EventKind::Sell => render_trade(sentence, "WTS"),
        EventKind::FindGroup => render_find_group(sentence),
        EventKind::FindMore => render_find_more(sentence),
    }
}

/// `[subjects ]WTB objects[, contact methods].`
fn render_trade(sentence: &Sentence, marker: &str) -> String {
    let mut out = String::new();
    append_comma_list(&mut out, &groups(&sentence.subjects), OUTER, INNER);
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(marker);
    out.push(' ');
    append_comma_list(&mut out, &groups(&sentence.objects), OUTER, INNER);
    if !sentence.contact_methods.is_empty() {
        out.push_str(", ");
        append_comma_list(&mut out, &groups(&sentence.contact_methods), OUTER, INNER);
    }
    out.push('.');
    out
}

/// `[subjects ]LFG[ for objects].`
fn render_find_group(sentence: &Sentence) -> String {
    let mut out = String::new();
    append_comma_list(&mut out, &groups(&sentence.subjects), OUTER, INNER);
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str("LFG");
    if !sentence.objects.is_empty() {
        out.push_str(" for ");
        append_comma_list(&mut out, &groups(&sentence.objects), OUTER, INNER);
    }
    out.push('.');
    out
}

/// `LF{n}M objects[ for instances].`
fn render_find_more(sentence: &Sentence) -> String {
    let mut out = String::new();
    append_comma_list(&mut out, &groups(&sentence.subjects), OUTER, INNER);
    out.push_str(" LF");
    if let Some(range) = headcount_range(sentence) {
        out.push_str(&range);
    }
    out.push_str("M ");
    append_comma_list(&mut out, &groups(&sentence.objects), OUTER, INNER);
    if !sentence.instances.is_empty() {
        if !sentence.objects.is_empty() {
            out.push(' ');
        }
        out.push_str("for ");
        append_comma_list(&mut out, &groups(&sentence.instances), OUTER, INNER);
    }
    out.push('.');
    out.trim().to_string()
}

/// Players wanted per object group: "n" when every group agrees, otherwise
/// "smallest-largest". Groups that count nobody are ignored.
fn headcount_range(sentence: &Sentence) -> Option<String> {
    let counts: Vec<i64> = sentence
        .objects
        .iter()
        .map(|group| group.iter().map(|entity| entity.headcount()).sum())
        .filter(|&count: &i64| count > 0)
        .collect();
    let small = counts.iter().min()?;
    let big = counts.iter().max()?;
    if small == big {
        Some(small.to_string())
    } else {
        Some(format!("{}-{}", small, big))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_forest;
    use crate::core::config::{RoleWhitelist, WhitelistTable};
    use crate::core::parser::parse_tokens;
    use crate::schema::entity::{Entity, EntityKind};
    use crate::schema::instance::Instance;

    fn sentence(line: &str) -> Sentence {
        let forest = build_forest(parse_tokens(line).unwrap());
        let root = forest.roots()[0];
        let kind = EventKind::from_token(forest.token(root)).unwrap();
        Sentence::assemble(&forest, root, kind, WhitelistTable::default().for_event(kind))
    }

    #[test]
    fn buy_bare_item() {
        let s = sentence("Buy(a), Item(a,b), Name(b,\"Sword\"), Quantity(b,'2')");
        assert_eq!(s.render(), "WTB 2 Swords.");
    }

    #[test]
    fn sell_with_subject_alternatives_and_contacts() {
        let s = sentence(
            "Sell(a), Subject(a,s), Player(s,p), Class(p,\"Mage\"); Subject(a,t), Player(t,q), \
             Class(q,\"Priest\"), Object(a,o), Item(o,i), Name(i,\"Sword\"), \
             Item(o,j), Name(j,\"Shield\"), ContactMethod(a,\"PM me\"); ContactMethod(a,\"mail me\")",
        );
        assert_eq!(
            s.render(),
            "Mage or Priest WTS 1 Sword and 1 Shield, PM me or mail me."
        );
    }

    #[test]
    fn three_object_groups_use_commas() {
        let s = sentence(
            "Buy(a), Object(a,o), Item(o,i), Name(i,\"Sword\"); Item(o,j), Name(j,\"Axe\"); \
             Item(o,k), Name(k,\"Mace\")",
        );
        assert_eq!(s.render(), "WTB 1 Sword, 1 Axe, or 1 Mace.");
    }

    #[test]
    fn buy_without_objects() {
        let s = sentence("Buy(a), Subject(a,s), Player(s,p), Role(p,\"Tank\")");
        assert_eq!(s.render(), "< Error in BuySentence: No object to buy found >");
        assert_eq!(fault(&s), Some(SentenceFault::Empty));
    }

    #[test]
    fn sell_without_objects() {
        let s = sentence("Sell(a), ContactMethod(a,\"PM me\")");
        assert_eq!(s.render(), "< Error in SellSentence: No object to sell found >");
    }

    #[test]
    fn find_group_for_instance() {
        let s = sentence(
            "FindGroup(a), Subject(a,s), Player(s,p), Role(p,\"Healer\"), Object(a,o), \
             Instance(o,i), Name(i,\"Deadmines\"), Mode(i,\"Heroic\")",
        );
        assert_eq!(s.render(), "Healer LFG for Heroic Deadmines.");
    }

    #[test]
    fn find_group_subject_only() {
        let s = sentence("FindGroup(a), Subject(a,s), Player(s,p), Class(p,\"Rogue\")");
        assert_eq!(s.render(), "Rogue LFG.");
    }

    #[test]
    fn find_group_empty() {
        let s = sentence("FindGroup(a)");
        assert_eq!(
            s.render(),
            "< Error in FindGroupSentence: No object nor subject found >"
        );
    }

    #[test]
    fn find_more_single_count() {
        let s = sentence(
            "FindMore(a), Object(a,o), Player(o,p), Role(p,\"Healer\"), Quantity(p,'2'), \
             Instance(a,i), Name(i,\"Deadmines\")",
        );
        assert_eq!(s.render(), "LF2M 2 Healers for Deadmines.");
    }

    #[test]
    fn find_more_range_across_groups() {
        let s = sentence(
            "FindMore(a), Object(a,o), Player(o,p), Role(p,\"Tank\"); Player(o,q), \
             Role(q,\"DPS\"), Quantity(q,'3')",
        );
        assert_eq!(s.render(), "LF1-3M Tank or 3 DPSes.");
    }

    #[test]
    fn find_more_instances_only() {
        let s = sentence("FindMore(a), Instance(a,i), Name(i,\"Stockade\")");
        assert_eq!(s.render(), "LFM for Stockade.");
    }

    #[test]
    fn find_more_empty() {
        let s = sentence("FindMore(a)");
        assert_eq!(
            s.render(),
            "< Error in FindMoreSentence: No subject or object found >"
        );
    }

    #[test]
    fn invalid_role_kind_is_reported() {
        let mut s = Sentence::new(EventKind::Buy, RoleWhitelist::new(&[EntityKind::Player], &[]));
        s.objects.push(vec![Entity::Instance(Instance {
            name: "Deadmines".to_string(),
            ..Instance::default()
        })]);
        assert_eq!(fault(&s), Some(SentenceFault::InvalidRoles));
        assert_eq!(
            s.render(),
            "< Error in BuySentence: Invalid object or subject found >"
        );
    }

    #[test]
    fn rendering_twice_is_identical() {
        let s = sentence(
            "Buy(a), -Object(a,o), Item(o,i), Name(i,\"Sword\"), Quantity(i,'2')",
        );
        let first = s.render();
        assert_eq!(first, s.render());
        assert_eq!(first, s.to_string());
    }
}
