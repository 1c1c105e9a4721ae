//! Integration tests for Layer 2: Debug
//!
//! Formats real traces from the order pipeline.

use wraith_debug::{HumanFormatter, JsonFormatter, TraceFormatter, nearest_miss};
use wraith_orders::{ParseConfig, parse};

fn failed_trace(source: &str) -> wraith_language::DebugTree {
    parse(source.as_bytes(), &ParseConfig::default())
        .unwrap_err()
        .debug_tree
        .unwrap()
}

#[test]
fn nearest_miss_names_the_closest_order() {
    let miss = nearest_miss(&failed_trace("bombard 5 7 x\n")).unwrap();
    assert_eq!(miss.rule, "bombard");
    assert_eq!(miss.matched, 3);
    assert_eq!(miss.expected, "PERCENTAGE");
    assert_eq!(miss.found.map(|t| t.lexeme), Some("x".to_string()));
}

#[test]
fn nearest_miss_inside_a_fragment() {
    let miss = nearest_miss(&failed_trace("move 6 (1,2,3,11)\n")).unwrap();
    assert_eq!(miss.rule, "move");
    assert_eq!(miss.expected, "coordinate");
}

#[test]
fn nearest_miss_on_garbage_points_at_the_root() {
    let miss = nearest_miss(&failed_trace("garbage\n")).unwrap();
    assert_eq!(miss.rule, "orders");
    assert_eq!(miss.matched, 0);
    assert_eq!(miss.expected, "EOL");
}

#[test]
fn human_trace_shows_failed_attempts() {
    let text = HumanFormatter::new().format(&failed_trace("bombard 5 7 x\n"));
    assert!(text.starts_with("orders(false)\n"));
    assert!(text.contains("  order(false)\n"));
    assert!(text.contains("    bombard(false)\n"));
    assert!(text.contains("{1 \"x\"} != PERCENTAGE"));
}

#[test]
fn collapsed_trace_hides_successful_lines() {
    let tree = failed_trace("survey 1\nsurvey 2\nbombard 5 7 x\n");
    let full = HumanFormatter::new().format(&tree);
    let collapsed = HumanFormatter::new().collapse_successes().format(&tree);
    assert!(collapsed.lines().count() < full.lines().count());
    assert!(collapsed.contains("order(true) ..."));
    assert!(collapsed.contains("bombard(false)"));
}

#[test]
fn json_trace_round_trips_through_serde_json() {
    let tree = failed_trace("survey x\n");
    let json = JsonFormatter::new().format(&tree);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["label"]["name"], "orders");
    assert_eq!(value["label"]["result"], false);
}
