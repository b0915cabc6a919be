//! Lang Generator: chat sentences from a compact semantic notation.
//!
//! Parses lines such as `Buy(a), Item(a,b), Name(b,"Sword")` into typed
//! token trees, collapses their AND/OR structure into groups of entities,
//! and renders MMO chat shorthand like `WTB 1 Sword.` or `LF2M 2 Healers.`

pub mod core;
pub mod schema;
