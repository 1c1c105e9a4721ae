//! Domain vocabulary for refining plain words into game token kinds.
//!
//! The lexer hands every `TEXT` run to [`classify`]. The first category that
//! accepts the lowercase word wins; a word no category accepts stays `TEXT`.

use crate::token::{Payload, TokenKind};

/// Population roles, with short aliases mapped to their canonical name.
pub const POPULATION: &[(&str, &str)] = &[
    ("civilian", "civilian"),
    ("construction-crew", "construction-crew"),
    ("professional", "professional"),
    ("soldier", "soldier"),
    ("spy", "spy"),
    ("unskilled-worker", "unskilled-worker"),
    ("unsk", "unskilled-worker"),
];

/// Raw resources.
pub const RESOURCES: &[&str] = &["fuel", "gold", "metallics", "non-metallics"];

/// Manufactured products, with short aliases mapped to their canonical name.
pub const PRODUCTS: &[(&str, &str)] = &[
    ("anti-missile", "anti-missile"),
    ("assault-craft", "assault-craft"),
    ("assault-weapons", "assault-weapons"),
    ("automation", "automation"),
    ("consumer-goods", "consumer-goods"),
    ("energy-shield", "energy-shield"),
    ("energy-weapon", "energy-weapon"),
    ("factory", "factory"),
    ("farm", "farm"),
    ("food", "food"),
    ("hyper-engine", "hyper-engine"),
    ("life-support", "life-support"),
    ("light-structural-unit", "light-structural-unit"),
    ("lsu", "light-structural-unit"),
    ("military-robot", "military-robot"),
    ("military-supplies", "military-supplies"),
    ("mine", "mine"),
    ("missile", "missile"),
    ("missile-launcher", "missile-launcher"),
    ("sensor", "sensor"),
    ("space-drive", "space-drive"),
    ("structural-unit", "structural-unit"),
    ("su", "structural-unit"),
    ("super-light-structural-unit", "super-light-structural-unit"),
    ("slsu", "super-light-structural-unit"),
    ("transport", "transport"),
];

/// Prefix of a deposit id such as `dp-12`.
pub const DEPOSIT_PREFIX: &str = "dp-";
/// Prefix of a factory group id such as `fg-3`.
pub const FACTORY_GROUP_PREFIX: &str = "fg-";
/// Prefix of a mine group id such as `mg-7`.
pub const MINE_GROUP_PREFIX: &str = "mg-";
/// Prefix of a research tech level such as `tl-4`.
pub const TECH_LEVEL_PREFIX: &str = "tl-";
/// The research keyword.
pub const RESEARCH: &str = "research";

/// Classifies a word into its token kind and payload.
///
/// Returns `(TokenKind::Text, Payload::Text(word))` when no category matches.
#[must_use]
pub fn classify(word: &str) -> (TokenKind, Payload) {
    let lower = word.to_ascii_lowercase();

    if let Some(name) = lookup(POPULATION, &lower) {
        return (TokenKind::Population, material(name, None));
    }
    if let Some(name) = RESOURCES.iter().find(|&&r| r == lower) {
        return (TokenKind::Resource, material(name, None));
    }
    if let Some(n) = prefixed_number(&lower, DEPOSIT_PREFIX) {
        return (TokenKind::DepositId, Payload::Integer(n));
    }
    if let Some(n) = prefixed_number(&lower, FACTORY_GROUP_PREFIX) {
        return (TokenKind::FactoryGroupId, Payload::Integer(n));
    }
    if let Some(n) = prefixed_number(&lower, MINE_GROUP_PREFIX) {
        return (TokenKind::MineGroupId, Payload::Integer(n));
    }
    if lower == RESEARCH {
        return (TokenKind::Research, material(RESEARCH, None));
    }
    if let Some(tl) = prefixed_tech_level(&lower, TECH_LEVEL_PREFIX) {
        return (TokenKind::Research, material(RESEARCH, Some(tl)));
    }
    if let Some((name, tech_level)) = product(&lower) {
        return (TokenKind::Product, material(name, tech_level));
    }

    (TokenKind::Text, Payload::Text(word.to_string()))
}

fn material(name: &str, tech_level: Option<u32>) -> Payload {
    Payload::Material {
        name: name.to_string(),
        tech_level,
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == word)
        .map(|(_, canonical)| *canonical)
}

fn product(word: &str) -> Option<(&'static str, Option<u32>)> {
    if let Some(name) = lookup(PRODUCTS, word) {
        return Some((name, None));
    }
    let (stem, suffix) = word.rsplit_once('-')?;
    let tech_level = digits(suffix)?.parse().ok()?;
    lookup(PRODUCTS, stem).map(|name| (name, Some(tech_level)))
}

fn prefixed_number(word: &str, prefix: &str) -> Option<i64> {
    digits(word.strip_prefix(prefix)?)?.parse().ok()
}

fn prefixed_tech_level(word: &str, prefix: &str) -> Option<u32> {
    digits(word.strip_prefix(prefix)?)?.parse().ok()
}

fn digits(s: &str) -> Option<&str> {
    (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())).then_some(s)
}
