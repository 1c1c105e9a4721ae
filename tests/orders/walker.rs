//! Integration tests for the tree walker
//!
//! Parses one order at a time and checks the typed order it walks to.

use wraith_foundation::Coordinates;
use wraith_orders::order::{
    Assemble, Bombard, Buy, Move, News, Pay, Probe, Raid, Sell, Setup, SupportAttack,
    SupportDefend, Transfer,
};
use wraith_orders::{
    GroupRef, Keyword, Material, Order, ParseConfig, ProbeTarget, SetupAction, SetupKind,
    TransferItem, WalkError, parse,
};

fn one(source: &str) -> Order {
    let parsed = parse(source.as_bytes(), &ParseConfig::default()).unwrap();
    assert_eq!(parsed.orders.len(), 1, "{source:?}");
    parsed.orders.into_iter().next().unwrap()
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn bombard() {
    assert_eq!(
        one("bombard 5 7 50%\n"),
        Order::Bombard(Bombard {
            line: 1,
            errors: vec![],
            id: 5,
            target_id: 7,
            pct_committed: 50,
        })
    );
}

#[test]
fn raid_takes_cargo() {
    assert_eq!(
        one("raid 8 9 25% gold\n"),
        Order::Raid(Raid {
            line: 1,
            errors: vec![],
            id: 8,
            target_id: 9,
            pct_committed: 25,
            material: Material::new("gold"),
        })
    );
}

#[test]
fn support_attack_and_defend() {
    assert_eq!(
        one("support 2 5 9 40%\n"),
        Order::SupportAttack(SupportAttack {
            line: 1,
            errors: vec![],
            id: 2,
            support_id: 5,
            target_id: 9,
            pct_committed: 40,
        })
    );
    assert_eq!(
        one("support 2 5 40%\n"),
        Order::SupportDefend(SupportDefend {
            line: 1,
            errors: vec![],
            id: 2,
            support_id: 5,
            pct_committed: 40,
        })
    );
}

#[test]
fn percentage_over_100_is_a_walk_error() {
    let order = one("invade 5 9 120%\n");
    assert!(!order.is_valid());
    assert_eq!(
        order.errors(),
        &[WalkError::OutOfRange {
            line: 1,
            field: "pct_committed",
            value: 120,
            min: 0,
            max: 100,
        }]
    );
}

#[test]
fn negative_id_is_a_walk_error() {
    let order = one("survey -3\n");
    assert!(matches!(
        order.errors(),
        [WalkError::OutOfRange { field: "id", value: -3, .. }]
    ));
}

// =============================================================================
// Production and Trade
// =============================================================================

#[test]
fn assemble_with_group() {
    assert_eq!(
        one("assemble 11 fg-2 30 factory-1\n"),
        Order::Assemble(Assemble {
            line: 1,
            errors: vec![],
            id: 11,
            group: Some(GroupRef::FactoryGroup(2)),
            quantity: 30,
            material: Material::new("factory").with_tech_level(1),
        })
    );
}

#[test]
fn transfer() {
    assert_eq!(
        one("transfer 4 200 metallics 7\n"),
        Order::Transfer(Transfer {
            line: 1,
            errors: vec![],
            id: 4,
            quantity: 200,
            material: Material::new("metallics"),
            target_id: 7,
        })
    );
}

#[test]
fn buy_and_sell() {
    assert_eq!(
        one("buy 11 food 100 2.5\n"),
        Order::Buy(Buy {
            line: 1,
            errors: vec![],
            id: 11,
            quantity: 100,
            material: Material::new("food"),
            bid: 2.5,
        })
    );
    assert_eq!(
        one("sell 11 tl-3 40\n"),
        Order::Sell(Sell {
            line: 1,
            errors: vec![],
            id: 11,
            quantity: 1,
            material: Material::new("research").with_tech_level(3),
            ask: 40.0,
        })
    );
}

#[test]
fn trades_display_as_written() {
    assert_eq!(one("sell 11 tl-3 40\n").to_string(), "1: sell 11 tl-3 40");
    assert_eq!(one("buy 11 research 2.5\n").to_string(), "1: buy 11 research 2.5");
    assert_eq!(one("buy 11 food 100 2.5\n").to_string(), "1: buy 11 food 100 2.5");
}

#[test]
fn pay_without_id() {
    assert_eq!(
        one("pay unsk 0.5\n"),
        Order::Pay(Pay {
            line: 1,
            errors: vec![],
            id: None,
            profession: Material::new("unskilled-worker"),
            rate: 0.5,
        })
    );
    assert!(!one("pay 3 soldier -1.5\n").is_valid());
}

// =============================================================================
// Movement and Messages
// =============================================================================

#[test]
fn move_with_orbit() {
    assert_eq!(
        one("move 6 (10,20,30,5)\n"),
        Order::Move(Move {
            line: 1,
            errors: vec![],
            id: 6,
            location: Coordinates::new(10, 20, 30, 5).unwrap(),
        })
    );
}

#[test]
fn orbit_eleven_rejects_the_file() {
    assert!(parse(b"move 6 (10,20,30,11)\n", &ParseConfig::default()).is_err());
}

#[test]
fn probe_orbit_or_system() {
    assert_eq!(
        one("probe 6 3\n"),
        Order::Probe(Probe {
            line: 1,
            errors: vec![],
            id: 6,
            target: Some(ProbeTarget::Orbit(3)),
        })
    );
    let Order::Probe(probe) = one("probe 6 (4,5,6)\n") else {
        panic!("expected probe");
    };
    assert_eq!(probe.target, Some(ProbeTarget::System(Coordinates::system(4, 5, 6))));
    assert!(!one("probe 6 12\n").is_valid());
}

#[test]
fn probe_without_target_probes_own_orbit() {
    let order = one("probe 1\n");
    assert_eq!(
        order,
        Order::Probe(Probe {
            line: 1,
            errors: vec![],
            id: 1,
            target: None,
        })
    );
    assert_eq!(order.to_string(), "1: probe 1");
}

#[test]
fn news_with_signature() {
    assert_eq!(
        one("news (1,2,3) \"Ships sighted\" \"Admiral\"\n"),
        Order::News(News {
            line: 1,
            errors: vec![],
            location: Coordinates::system(1, 2, 3),
            article: "Ships sighted".into(),
            signature: Some("Admiral".into()),
        })
    );
}

#[test]
fn name_keeps_quoted_text() {
    let Order::Name(name) = one("name 4 \"New Hope\"\n") else {
        panic!("expected name");
    };
    assert_eq!(name.id, 4);
    assert_eq!(name.name, "New Hope");
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn setup_colony() {
    assert_eq!(
        one("setup 3 (10,20,30) colony transfer\n5 food\nend\n"),
        Order::Setup(Setup {
            line: 1,
            errors: vec![],
            id: 3,
            location: Coordinates::system(10, 20, 30),
            kind: SetupKind::Colony,
            action: SetupAction::Transfer,
            items: vec![TransferItem {
                material: Material::new("food"),
                quantity: 5,
            }],
        })
    );
}

#[test]
fn setup_ship_with_several_items() {
    let Order::Setup(setup) = one("setup 3 (1,2,3,4) ship transfer\n5 food\n10 unsk\n2 factory-3\nend\n")
    else {
        panic!("expected setup");
    };
    assert_eq!(setup.kind, SetupKind::Ship);
    assert_eq!(setup.location.orbit, 4);
    let items: Vec<_> = setup.items.iter().map(|i| i.material.to_string()).collect();
    assert_eq!(items, vec!["food", "unskilled-worker", "factory-3"]);
}

// =============================================================================
// Accessors
// =============================================================================

#[test]
fn line_and_keyword_accessors() {
    let parsed = parse(
        b"; turn 3\n\nsurvey 1\nsupport 1 2 3 10%\n",
        &ParseConfig::default(),
    )
    .unwrap();
    let lines: Vec<_> = parsed.orders.iter().map(Order::line).collect();
    assert_eq!(lines, vec![3, 4]);
    let keywords: Vec<_> = parsed.orders.iter().map(Order::keyword).collect();
    assert_eq!(keywords, vec![Some(Keyword::Survey), Some(Keyword::Support)]);
}
