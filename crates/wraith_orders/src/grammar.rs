//! Order-file grammar rules.
//!
//! Each rule is a function over a [`Builder`] that brackets itself with a
//! named rule frame. The order in which a rule matches its children is the
//! only contract with the walker, which reads them back positionally.
//!
//! `CSID` and `QUANTITY` in [`GRAMMAR`] are both `INTEGER` tokens.

use wraith_foundation::MAX_ORBIT;
use wraith_language::{Builder, Token, TokenKind};

use crate::config::ParseConfig;
use crate::keyword::Keyword;

use TokenKind::{
    Comma, DepositId, Eof, Eol, FactoryGroupId, Float, Integer, MineGroupId, ParenCl, ParenOp,
    Percentage, Population, Product, QuotedText, Research, Resource,
};

/// Revision of the grammar implemented here.
pub const GRAMMAR_VERSION: u32 = 1;

/// EBNF description of the order-file syntax.
pub const GRAMMAR: &str = r#"orders      = {order | EOL} EOF .
order       = assemble | bombard | buy | disassemble | invade | move | name
            | news | pay | probe | raid | ration | retool | sell | setup
            | support | survey | transfer .
assemble    = "assemble"    CSID [DEPOSIT_ID | FACTORY_GROUP_ID | MINE_GROUP_ID] QUANTITY material EOL .
disassemble = "disassemble" CSID [FACTORY_GROUP_ID | MINE_GROUP_ID] QUANTITY material EOL .
retool      = "retool"      CSID FACTORY_GROUP_ID material EOL .
bombard     = "bombard"     CSID CSID PERCENTAGE EOL .
invade      = "invade"      CSID CSID PERCENTAGE EOL .
raid        = "raid"        CSID CSID PERCENTAGE cargo EOL .
support     = "support"     CSID CSID [CSID] PERCENTAGE EOL .
transfer    = "transfer"    CSID QUANTITY cargo CSID EOL .
buy         = "buy"         CSID (RESEARCH | PRODUCT QUANTITY) number EOL .
sell        = "sell"        CSID (RESEARCH | PRODUCT QUANTITY) number EOL .
move        = "move"        CSID coordinate EOL .
name        = "name"        CSID QUOTED_TEXT EOL .
news        = "news"        coordinate QUOTED_TEXT [QUOTED_TEXT] EOL .
pay         = "pay"         [CSID] POPULATION number EOL .
ration      = "ration"      [CSID] PERCENTAGE EOL .
probe       = "probe"       CSID [INTEGER | coordinate] EOL .
survey      = "survey"      CSID EOL .
setup       = "setup"       CSID coordinate ("ship" | "colony") "transfer" EOL
              {xfer_detail} "end" EOL .
cargo       = POPULATION | PRODUCT | RESEARCH | RESOURCE .
material    = PRODUCT | RESEARCH .
number      = FLOAT | INTEGER .
coordinate  = '(' INTEGER ',' INTEGER ',' INTEGER [',' INTEGER(1..10)] ')' .
xfer_detail = QUANTITY cargo EOL .
unknown     = {any token except EOL/EOF} EOL .
"#;

const CARGO: &[TokenKind] = &[Population, Product, Research, Resource];
const MATERIAL: &[TokenKind] = &[Product, Research];
const NUMBER: &[TokenKind] = &[Float, Integer];

// =============================================================================
// Top Level
// =============================================================================

/// Root rule.
///
/// In fail-fast mode the first line that is neither an order nor empty fails
/// the whole rule. In recovery mode such lines become `unknown` nodes.
pub fn orders(b: &mut Builder<'_>, config: &ParseConfig) -> bool {
    b.rule("orders", |b| {
        while !b.check(Eof, 0) {
            if order(b) || b.match_kind(Eol) {
                continue;
            }
            if config.stop_on_first_error || !unknown(b) {
                return false;
            }
        }
        b.match_kind(Eof)
    })
}

/// Dispatches on the first token of the line to exactly one order rule.
pub fn order(b: &mut Builder<'_>) -> bool {
    b.rule("order", |b| {
        match b.peek(0).and_then(Keyword::from_token) {
            Some(keyword) => dispatch(b, keyword),
            None => false,
        }
    })
}

/// Runs the rule for `keyword`.
pub fn dispatch(b: &mut Builder<'_>, keyword: Keyword) -> bool {
    match keyword {
        Keyword::Assemble => assemble(b),
        Keyword::Bombard => bombard(b),
        Keyword::Buy => buy(b),
        Keyword::Disassemble => disassemble(b),
        Keyword::Invade => invade(b),
        Keyword::Move => move_to(b),
        Keyword::Name => name(b),
        Keyword::News => news(b),
        Keyword::Pay => pay(b),
        Keyword::Probe => probe(b),
        Keyword::Raid => raid(b),
        Keyword::Ration => ration(b),
        Keyword::Retool => retool(b),
        Keyword::Sell => sell(b),
        Keyword::Setup => setup(b),
        Keyword::Support => support(b),
        Keyword::Survey => survey(b),
        Keyword::Transfer => transfer(b),
    }
}

/// Consumes the rest of a line no order rule accepted.
pub fn unknown(b: &mut Builder<'_>) -> bool {
    b.rule("unknown", |b| {
        while !b.check(Eol, 0) && !b.check(Eof, 0) {
            if !b.advance() {
                return false;
            }
        }
        b.match_kind(Eol)
    })
}

// =============================================================================
// Orders
// =============================================================================

fn assemble(b: &mut Builder<'_>) -> bool {
    b.rule("assemble", |b| {
        b.match_keyword("assemble")
            && b.match_kind(Integer)
            && optional(b, &[DepositId, FactoryGroupId, MineGroupId])
            && b.match_kind(Integer)
            && material(b)
            && b.match_kind(Eol)
    })
}

fn disassemble(b: &mut Builder<'_>) -> bool {
    b.rule("disassemble", |b| {
        b.match_keyword("disassemble")
            && b.match_kind(Integer)
            && optional(b, &[FactoryGroupId, MineGroupId])
            && b.match_kind(Integer)
            && material(b)
            && b.match_kind(Eol)
    })
}

fn retool(b: &mut Builder<'_>) -> bool {
    b.rule("retool", |b| {
        b.match_keyword("retool")
            && b.match_kind(Integer)
            && b.match_kind(FactoryGroupId)
            && material(b)
            && b.match_kind(Eol)
    })
}

fn bombard(b: &mut Builder<'_>) -> bool {
    b.rule("bombard", |b| {
        b.match_keyword("bombard")
            && b.match_kind(Integer)
            && b.match_kind(Integer)
            && b.match_kind(Percentage)
            && b.match_kind(Eol)
    })
}

fn invade(b: &mut Builder<'_>) -> bool {
    b.rule("invade", |b| {
        b.match_keyword("invade")
            && b.match_kind(Integer)
            && b.match_kind(Integer)
            && b.match_kind(Percentage)
            && b.match_kind(Eol)
    })
}

fn raid(b: &mut Builder<'_>) -> bool {
    b.rule("raid", |b| {
        b.match_keyword("raid")
            && b.match_kind(Integer)
            && b.match_kind(Integer)
            && b.match_kind(Percentage)
            && cargo(b)
            && b.match_kind(Eol)
    })
}

fn support(b: &mut Builder<'_>) -> bool {
    b.rule("support", |b| {
        b.match_keyword("support")
            && b.match_kind(Integer)
            && b.match_kind(Integer)
            && optional(b, &[Integer])
            && b.match_kind(Percentage)
            && b.match_kind(Eol)
    })
}

fn transfer(b: &mut Builder<'_>) -> bool {
    b.rule("transfer", |b| {
        b.match_keyword("transfer")
            && b.match_kind(Integer)
            && b.match_kind(Integer)
            && cargo(b)
            && b.match_kind(Integer)
            && b.match_kind(Eol)
    })
}

fn buy(b: &mut Builder<'_>) -> bool {
    b.rule("buy", |b| {
        b.match_keyword("buy")
            && b.match_kind(Integer)
            && trade_item(b)
            && number(b)
            && b.match_kind(Eol)
    })
}

fn sell(b: &mut Builder<'_>) -> bool {
    b.rule("sell", |b| {
        b.match_keyword("sell")
            && b.match_kind(Integer)
            && trade_item(b)
            && number(b)
            && b.match_kind(Eol)
    })
}

/// `RESEARCH | PRODUCT QUANTITY`
fn trade_item(b: &mut Builder<'_>) -> bool {
    if b.check(Research, 0) {
        return b.match_kind(Research);
    }
    b.match_kind(Product) && b.match_kind(Integer)
}

fn move_to(b: &mut Builder<'_>) -> bool {
    b.rule("move", |b| {
        b.match_keyword("move") && b.match_kind(Integer) && coordinate(b) && b.match_kind(Eol)
    })
}

fn name(b: &mut Builder<'_>) -> bool {
    b.rule("name", |b| {
        b.match_keyword("name")
            && b.match_kind(Integer)
            && b.match_kind(QuotedText)
            && b.match_kind(Eol)
    })
}

fn news(b: &mut Builder<'_>) -> bool {
    b.rule("news", |b| {
        b.match_keyword("news")
            && coordinate(b)
            && b.match_kind(QuotedText)
            && optional(b, &[QuotedText])
            && b.match_kind(Eol)
    })
}

fn pay(b: &mut Builder<'_>) -> bool {
    b.rule("pay", |b| {
        b.match_keyword("pay")
            && optional(b, &[Integer])
            && b.match_kind(Population)
            && number(b)
            && b.match_kind(Eol)
    })
}

fn ration(b: &mut Builder<'_>) -> bool {
    b.rule("ration", |b| {
        b.match_keyword("ration")
            && optional(b, &[Integer])
            && b.match_kind(Percentage)
            && b.match_kind(Eol)
    })
}

fn probe(b: &mut Builder<'_>) -> bool {
    b.rule("probe", |b| {
        if !(b.match_keyword("probe") && b.match_kind(Integer)) {
            return false;
        }
        let target = if b.check(Integer, 0) {
            b.match_kind(Integer)
        } else if b.check(ParenOp, 0) {
            coordinate(b)
        } else {
            true
        };
        target && b.match_kind(Eol)
    })
}

fn survey(b: &mut Builder<'_>) -> bool {
    b.rule("survey", |b| {
        b.match_keyword("survey") && b.match_kind(Integer) && b.match_kind(Eol)
    })
}

fn setup(b: &mut Builder<'_>) -> bool {
    b.rule("setup", |b| {
        let header = b.match_keyword("setup")
            && b.match_kind(Integer)
            && coordinate(b)
            && one_of_keywords(b, &["ship", "colony"])
            && b.match_keyword("transfer")
            && b.match_kind(Eol);
        if !header {
            return false;
        }
        while !b.check_keyword("end", 0) && xfer_detail(b) {}
        b.match_keyword("end") && b.match_kind(Eol)
    })
}

// =============================================================================
// Fragments
// =============================================================================

/// `POPULATION | PRODUCT | RESEARCH | RESOURCE`
pub fn cargo(b: &mut Builder<'_>) -> bool {
    b.rule("cargo", |b| b.match_any_of(CARGO))
}

/// `PRODUCT | RESEARCH`
pub fn material(b: &mut Builder<'_>) -> bool {
    b.rule("material", |b| b.match_any_of(MATERIAL))
}

/// `FLOAT | INTEGER`
pub fn number(b: &mut Builder<'_>) -> bool {
    b.rule("number", |b| b.match_any_of(NUMBER))
}

/// `'(' INTEGER ',' INTEGER ',' INTEGER [',' INTEGER] ')'`
///
/// A fourth field is an orbit and must be in `1..=10`; anything else fails
/// the whole rule.
pub fn coordinate(b: &mut Builder<'_>) -> bool {
    b.rule("coordinate", |b| {
        let system = b.match_kind(ParenOp)
            && b.match_kind(Integer)
            && b.match_kind(Comma)
            && b.match_kind(Integer)
            && b.match_kind(Comma)
            && b.match_kind(Integer);
        if !system {
            return false;
        }
        if b.check(Comma, 0) {
            if !(b.match_kind(Comma) && b.match_kind(Integer)) {
                return false;
            }
            let orbit = b.peek(-1).and_then(Token::integer);
            if !orbit.is_some_and(|o| (1..=MAX_ORBIT).contains(&o)) {
                return false;
            }
        }
        b.match_kind(ParenCl)
    })
}

/// `QUANTITY cargo EOL`
pub fn xfer_detail(b: &mut Builder<'_>) -> bool {
    b.rule("xfer_detail", |b| {
        b.match_kind(Integer) && cargo(b) && b.match_kind(Eol)
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Matches one of `kinds` if the next token has one. Always succeeds.
fn optional(b: &mut Builder<'_>, kinds: &[TokenKind]) -> bool {
    if kinds.iter().any(|&k| b.check(k, 0)) {
        b.match_any_of(kinds);
    }
    true
}

/// Matches whichever of `words` is next, recording a single failed match
/// against the first when none is.
fn one_of_keywords(b: &mut Builder<'_>, words: &[&'static str]) -> bool {
    match words.iter().copied().find(|w| b.check_keyword(w, 0)) {
        Some(word) => b.match_keyword(word),
        None => words.first().is_some_and(|&w| b.match_keyword(w)),
    }
}
