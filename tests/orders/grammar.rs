//! Integration tests for the order grammar
//!
//! Runs the grammar rules over lexed input and inspects the parse and debug
//! trees.

use wraith_language::filter::prepare_for_parser;
use wraith_language::{BuildOutcome, Builder, DebugLabel, Lexer};
use wraith_orders::{Keyword, ParseConfig, grammar};

fn build(source: &str, config: &ParseConfig) -> BuildOutcome {
    let tokens = prepare_for_parser(&Lexer::tokenize_all(source));
    let mut b = Builder::new(&tokens);
    grammar::orders(&mut b, config);
    b.finish()
}

fn accepts(source: &str) -> bool {
    build(source, &ParseConfig::default()).is_success()
}

/// A minimal valid line for each keyword.
fn minimal_line(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::Assemble => "assemble 1 10 factory\n",
        Keyword::Bombard => "bombard 1 2 10%\n",
        Keyword::Buy => "buy 1 food 10 2.5\n",
        Keyword::Disassemble => "disassemble 1 10 mine\n",
        Keyword::Invade => "invade 1 2 10%\n",
        Keyword::Move => "move 1 (1,2,3)\n",
        Keyword::Name => "name 1 \"Home\"\n",
        Keyword::News => "news (1,2,3) \"Hello\"\n",
        Keyword::Pay => "pay soldier 1.5\n",
        Keyword::Probe => "probe 1 3\n",
        Keyword::Raid => "raid 1 2 10% gold\n",
        Keyword::Ration => "ration 50%\n",
        Keyword::Retool => "retool 1 fg-2 factory\n",
        Keyword::Sell => "sell 1 research 100\n",
        Keyword::Setup => "setup 1 (1,2,3) ship transfer\nend\n",
        Keyword::Support => "support 1 2 10%\n",
        Keyword::Survey => "survey 1\n",
        Keyword::Transfer => "transfer 1 10 fuel 2\n",
    }
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn every_keyword_has_a_minimal_line() {
    for keyword in Keyword::ALL {
        assert!(accepts(minimal_line(keyword)), "{keyword}");
    }
}

#[test]
fn dispatch_runs_only_the_keyword_rule() {
    for keyword in Keyword::ALL {
        let outcome = build(minimal_line(keyword), &ParseConfig::default());
        let trace = outcome.debug_tree.unwrap();
        let order = trace.find_rule("order").unwrap();

        assert_eq!(order.children.len(), 1, "{keyword}");
        let DebugLabel::Rule { name, result } = order.children[0].label else {
            panic!("{keyword}: order's only child should be a rule");
        };
        assert_eq!(name, keyword.as_str());
        assert!(result, "{keyword}");
    }
}

#[test]
fn keywords_are_case_insensitive() {
    assert!(accepts("BOMBARD 1 2 10%\n"));
    assert!(accepts("Survey 1\n"));
}

// =============================================================================
// Fragments
// =============================================================================

#[test]
fn coordinate_orbit_range() {
    assert!(accepts("move 1 (10,20,30)\n"));
    assert!(accepts("move 1 (10,20,30,1)\n"));
    assert!(accepts("move 1 (10,20,30,10)\n"));
    assert!(!accepts("move 1 (10,20,30,11)\n"));
    assert!(!accepts("move 1 (10,20,30,0)\n"));
    assert!(!accepts("move 1 (10,20)\n"));
}

#[test]
fn cargo_accepts_every_domain_kind() {
    for cargo in ["unsk", "factory-3", "research", "tl-2", "metallics"] {
        assert!(accepts(&format!("transfer 1 10 {cargo} 2\n")), "{cargo}");
    }
    assert!(!accepts("transfer 1 10 widgets 2\n"));
}

#[test]
fn material_rejects_resources() {
    assert!(accepts("assemble 1 5 factory-2\n"));
    assert!(!accepts("assemble 1 5 gold\n"));
}

#[test]
fn optional_fields() {
    assert!(accepts("assemble 1 dp-4 10 mine\n"));
    assert!(accepts("disassemble 1 fg-2 10 factory\n"));
    assert!(!accepts("disassemble 1 dp-2 10 factory\n"));
    assert!(accepts("support 1 2 3 10%\n"));
    assert!(accepts("pay 4 soldier 2\n"));
    assert!(accepts("ration 4 50%\n"));
    assert!(accepts("news (1,2,3) \"Hello\" \"Admiral\"\n"));
}

#[test]
fn trade_items() {
    assert!(accepts("buy 1 research 10\n"));
    assert!(accepts("sell 1 food 20 1.25\n"));
    assert!(!accepts("buy 1 food 1.25\n"));
    assert!(!accepts("sell 1 gold 20 1.25\n"));
}

#[test]
fn probe_targets() {
    assert!(accepts("probe 1 4\n"));
    assert!(accepts("probe 1 (3,4,5)\n"));
    assert!(accepts("probe 1\n"));
    assert!(!accepts("probe 1 (3,4)\n"));
    assert!(!accepts("probe 1 fuel\n"));
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn setup_block() {
    assert!(accepts("setup 3 (10,20,30) colony transfer\n5 food\n12 factory-2\nend\n"));
    assert!(accepts("setup 3 (10,20,30) ship transfer\nend\n"));
    assert!(!accepts("setup 3 (10,20,30) colony transfer\n5 food\n"));
    assert!(!accepts("setup 3 (10,20,30) colony transfer\n5 widgets\nend\n"));
    assert!(!accepts("setup 3 (10,20,30) base transfer\nend\n"));
}

#[test]
fn setup_items_are_xfer_detail_nodes() {
    let outcome = build(
        "setup 3 (10,20,30) colony transfer\n5 food\n7 fuel\nend\n",
        &ParseConfig::default(),
    );
    let tree = outcome.parse_tree.unwrap();
    let setup = &tree.children()[0].children()[0];
    assert_eq!(setup.name(), Some("setup"));
    let details = setup
        .children()
        .iter()
        .filter(|c| c.is_rule("xfer_detail"))
        .count();
    assert_eq!(details, 2);
}

// =============================================================================
// Modes
// =============================================================================

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert!(accepts("; orders for turn 4\n\n\nsurvey 1\n\n; done\n"));
    assert!(accepts(""));
}

#[test]
fn fail_fast_stops_at_first_bad_line() {
    let outcome = build("survey 1\nsurvey x\nsurvey 2\n", &ParseConfig::default());
    assert!(outcome.parse_tree.is_none());
    assert_eq!(outcome.error.unwrap().line(), Some(2));
}

#[test]
fn recovery_wraps_bad_lines_in_unknown() {
    let outcome = build("survey 1\nsurvey x\nsurvey 2\n", &ParseConfig::recovering());
    let tree = outcome.parse_tree.unwrap();
    let names: Vec<_> = tree.children().iter().filter_map(|c| c.name()).collect();
    assert_eq!(names, vec!["order", "unknown", "order"]);
}
