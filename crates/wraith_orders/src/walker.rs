//! Tree walker: parse tree to typed orders.
//!
//! The walker reads each rule's children in the order the grammar matched
//! them. A missing or mis-kinded child becomes a [`WalkError`] on that order
//! and the walker carries on with a default value, so every order in the file
//! gets reported in one pass.

use tracing::warn;

use wraith_foundation::{Coordinates, MAX_ORBIT};
use wraith_language::{Token, TokenKind, Tree};

use crate::error::WalkError;
use crate::keyword::Keyword;
use crate::order::{
    Assemble, Bombard, Buy, Disassemble, GroupRef, Invade, Material, Move, Name, News, Order, Pay,
    Probe, ProbeTarget, Raid, Ration, Retool, Sell, Setup, SetupAction, SetupKind, SupportAttack,
    SupportDefend, Survey, Transfer, TransferItem, Unknown,
};

/// Walks an `orders` parse tree into orders, returning every walk error
/// found along the way. Each order's own errors are also attached to it.
#[must_use]
pub fn walk(tree: &Tree) -> (Vec<Order>, Vec<WalkError>) {
    let mut orders = Vec::new();
    let mut errors = Vec::new();

    if !tree.is_rule("orders") {
        errors.push(unexpected(tree));
        return (orders, errors);
    }

    for child in tree.children() {
        match child {
            Tree::Terminal(token) if matches!(token.kind, TokenKind::Eol | TokenKind::Eof) => {}
            node if node.is_rule("order") => match walk_order(node) {
                Ok(order) => {
                    errors.extend_from_slice(order.errors());
                    orders.push(order);
                }
                Err(err) => errors.push(err),
            },
            node if node.is_rule("unknown") => orders.push(Order::Unknown(walk_unknown(node))),
            node => errors.push(unexpected(node)),
        }
    }

    for err in &errors {
        warn!(line = err.line(), "{err}");
    }
    (orders, errors)
}

/// Walks one `order` node. Fails only if the node holds no keyword rule.
///
/// # Errors
/// Returns [`WalkError::UnexpectedNode`] if the node's child is not a rule
/// for a known keyword.
pub fn walk_order(node: &Tree) -> Result<Order, WalkError> {
    let Some(rule) = node.children().first() else {
        return Err(unexpected(node));
    };
    let Some(keyword) = rule.name().and_then(Keyword::from_word) else {
        return Err(unexpected(rule));
    };

    let mut c = Cursor::new(rule);
    c.keyword(keyword.as_str());
    let order = match keyword {
        Keyword::Assemble => Order::Assemble(assemble(&mut c)),
        Keyword::Bombard => Order::Bombard(bombard(&mut c)),
        Keyword::Buy => Order::Buy(buy(&mut c)),
        Keyword::Disassemble => Order::Disassemble(disassemble(&mut c)),
        Keyword::Invade => Order::Invade(invade(&mut c)),
        Keyword::Move => Order::Move(move_to(&mut c)),
        Keyword::Name => Order::Name(name(&mut c)),
        Keyword::News => Order::News(news(&mut c)),
        Keyword::Pay => Order::Pay(pay(&mut c)),
        Keyword::Probe => Order::Probe(probe(&mut c)),
        Keyword::Raid => Order::Raid(raid(&mut c)),
        Keyword::Ration => Order::Ration(ration(&mut c)),
        Keyword::Retool => Order::Retool(retool(&mut c)),
        Keyword::Sell => Order::Sell(sell(&mut c)),
        Keyword::Setup => Order::Setup(setup(&mut c)),
        Keyword::Support => support(&mut c),
        Keyword::Survey => Order::Survey(survey(&mut c)),
        Keyword::Transfer => Order::Transfer(transfer(&mut c)),
    };
    Ok(order)
}

fn walk_unknown(node: &Tree) -> Unknown {
    let command = node
        .tokens()
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eol)
        .map(|t| t.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Unknown {
        line: node.line().unwrap_or_default(),
        command,
    }
}

fn unexpected(node: &Tree) -> WalkError {
    WalkError::UnexpectedNode {
        line: node.line().unwrap_or_default(),
        found: describe(node),
    }
}

fn describe(node: &Tree) -> String {
    match node {
        Tree::Terminal(token) => token.to_string(),
        Tree::NonTerminal { name, .. } => (*name).to_string(),
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Positional reader over one rule's children.
struct Cursor<'a> {
    rule: &'static str,
    line: u32,
    children: &'a [Tree],
    next: usize,
    errors: Vec<WalkError>,
}

impl<'a> Cursor<'a> {
    fn new(node: &'a Tree) -> Self {
        Self {
            rule: node.name().unwrap_or("?"),
            line: node.line().unwrap_or_default(),
            children: node.children(),
            next: 0,
            errors: Vec::new(),
        }
    }

    /// Reads a nested rule with its own cursor, folding its errors into ours.
    fn nested<T>(&mut self, rule: &'static str, read: impl FnOnce(&mut Cursor<'a>) -> T) -> Option<T> {
        let node = self.rule_node(rule)?;
        let mut inner = Cursor::new(node);
        inner.line = self.line;
        let value = read(&mut inner);
        let errors = inner.finish();
        self.errors.extend(errors);
        Some(value)
    }

    fn peek(&self) -> Option<&'a Tree> {
        self.children.get(self.next)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().and_then(Tree::token).map(|t| t.kind)
    }

    fn missing(&mut self, expected: impl Into<String>) {
        self.errors.push(WalkError::Missing {
            line: self.line,
            rule: self.rule,
            expected: expected.into(),
        });
    }

    fn wrong(&mut self, expected: impl Into<String>, found: &Tree) {
        self.errors.push(WalkError::WrongKind {
            line: self.line,
            rule: self.rule,
            expected: expected.into(),
            found: describe(found),
        });
    }

    fn check_range(&mut self, field: &'static str, value: i64, min: i64, max: i64) -> i64 {
        if !(min..=max).contains(&value) {
            self.errors.push(WalkError::OutOfRange {
                line: self.line,
                field,
                value,
                min,
                max,
            });
        }
        value
    }

    /// Consumes the next child if it is a token of one of `kinds`.
    fn token_of(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        let expected = || {
            kinds
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(" | ")
        };
        let Some(node) = self.peek() else {
            self.missing(expected());
            return None;
        };
        self.next += 1;
        match node.token() {
            Some(token) if kinds.contains(&token.kind) => Some(token),
            _ => {
                self.wrong(expected(), node);
                None
            }
        }
    }

    fn token(&mut self, kind: TokenKind) -> Option<&'a Token> {
        self.token_of(&[kind])
    }

    /// Consumes the next child if it is a token of one of `kinds`, without
    /// complaint if it is not.
    fn optional(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        let kind = self.peek_kind()?;
        if kinds.contains(&kind) {
            self.token(kind)
        } else {
            None
        }
    }

    fn keyword(&mut self, word: &str) {
        match self.peek() {
            None => self.missing(format!("{word:?}")),
            Some(node) => {
                self.next += 1;
                if !node.token().is_some_and(|t| t.is_keyword(word)) {
                    self.wrong(format!("{word:?}"), node);
                }
            }
        }
    }

    /// Consumes a `TEXT` token spelling one of `words` and returns its index.
    fn one_of(&mut self, words: &[&str]) -> Option<usize> {
        let expected = words
            .iter()
            .map(|w| format!("{w:?}"))
            .collect::<Vec<_>>()
            .join(" | ");
        let Some(node) = self.peek() else {
            self.missing(expected);
            return None;
        };
        self.next += 1;
        let found = node
            .token()
            .and_then(|t| words.iter().position(|w| t.is_keyword(w)));
        if found.is_none() {
            self.wrong(expected, node);
        }
        found
    }

    fn integer(&mut self) -> i64 {
        self.token(TokenKind::Integer)
            .and_then(Token::integer)
            .unwrap_or_default()
    }

    fn non_negative(&mut self, field: &'static str) -> i64 {
        let value = self.integer();
        self.check_range(field, value, 0, i64::MAX)
    }

    fn percentage(&mut self, field: &'static str) -> i64 {
        let value = self
            .token(TokenKind::Percentage)
            .and_then(Token::integer)
            .unwrap_or_default();
        self.check_range(field, value, 0, 100)
    }

    fn text(&mut self, kind: TokenKind) -> String {
        self.token(kind)
            .and_then(Token::text)
            .map(str::to_string)
            .unwrap_or_default()
    }

    fn rule_node(&mut self, rule: &'static str) -> Option<&'a Tree> {
        let Some(node) = self.peek() else {
            self.missing(rule);
            return None;
        };
        self.next += 1;
        if node.is_rule(rule) {
            Some(node)
        } else {
            self.wrong(rule, node);
            None
        }
    }

    /// Reads a material out of a token of one of `kinds`.
    fn material_token(&mut self, kinds: &[TokenKind]) -> Material {
        self.token_of(kinds).map(to_material).unwrap_or_default()
    }

    /// Reads a `material` or `cargo` rule.
    fn material_rule(&mut self, rule: &'static str, kinds: &'static [TokenKind]) -> Material {
        self.nested(rule, |c| c.material_token(kinds))
            .unwrap_or_default()
    }

    fn material(&mut self) -> Material {
        self.material_rule("material", &[TokenKind::Product, TokenKind::Research])
    }

    fn cargo(&mut self) -> Material {
        self.material_rule(
            "cargo",
            &[
                TokenKind::Population,
                TokenKind::Product,
                TokenKind::Research,
                TokenKind::Resource,
            ],
        )
    }

    fn number(&mut self) -> f64 {
        self.nested("number", |c| {
            c.token_of(&[TokenKind::Float, TokenKind::Integer])
                .and_then(Token::number)
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    fn coordinate(&mut self) -> Coordinates {
        self.nested("coordinate", |c| {
            c.token(TokenKind::ParenOp);
            let x = c.integer();
            c.token(TokenKind::Comma);
            let y = c.integer();
            c.token(TokenKind::Comma);
            let z = c.integer();
            let mut orbit = 0;
            if c.optional(&[TokenKind::Comma]).is_some() {
                let value = c.integer();
                orbit = c.check_range("orbit", value, 0, MAX_ORBIT);
            }
            c.token(TokenKind::ParenCl);
            Coordinates::new(x, y, z, orbit).unwrap_or(Coordinates::system(x, y, z))
        })
        .unwrap_or_default()
    }

    fn eol(&mut self) {
        self.token(TokenKind::Eol);
    }

    /// Takes the collected errors, adding a trailing-input error if children
    /// are left over.
    fn finish(&mut self) -> Vec<WalkError> {
        if self.next < self.children.len() {
            self.errors.push(WalkError::Trailing {
                line: self.line,
                rule: self.rule,
            });
            self.next = self.children.len();
        }
        std::mem::take(&mut self.errors)
    }
}

fn to_material(token: &Token) -> Material {
    match token.material() {
        Some((name, tech_level)) => Material {
            name: name.to_string(),
            tech_level,
        },
        None => Material::new(token.lexeme.to_ascii_lowercase()),
    }
}

fn group_ref(token: &Token) -> Option<GroupRef> {
    let n = token.integer()?;
    match token.kind {
        TokenKind::DepositId => Some(GroupRef::Deposit(n)),
        TokenKind::FactoryGroupId => Some(GroupRef::FactoryGroup(n)),
        TokenKind::MineGroupId => Some(GroupRef::MineGroup(n)),
        _ => None,
    }
}

// =============================================================================
// Orders
// =============================================================================

fn assemble(c: &mut Cursor<'_>) -> Assemble {
    let id = c.non_negative("id");
    let group = c
        .optional(&[
            TokenKind::DepositId,
            TokenKind::FactoryGroupId,
            TokenKind::MineGroupId,
        ])
        .and_then(group_ref);
    let quantity = c.non_negative("quantity");
    let material = c.material();
    c.eol();
    Assemble {
        line: c.line,
        errors: c.finish(),
        id,
        group,
        quantity,
        material,
    }
}

fn disassemble(c: &mut Cursor<'_>) -> Disassemble {
    let id = c.non_negative("id");
    let group = c
        .optional(&[TokenKind::FactoryGroupId, TokenKind::MineGroupId])
        .and_then(group_ref);
    let quantity = c.non_negative("quantity");
    let material = c.material();
    c.eol();
    Disassemble {
        line: c.line,
        errors: c.finish(),
        id,
        group,
        quantity,
        material,
    }
}

fn retool(c: &mut Cursor<'_>) -> Retool {
    let id = c.non_negative("id");
    let factory_group = c
        .token(TokenKind::FactoryGroupId)
        .and_then(Token::integer)
        .unwrap_or_default();
    let material = c.material();
    c.eol();
    Retool {
        line: c.line,
        errors: c.finish(),
        id,
        factory_group,
        material,
    }
}

fn bombard(c: &mut Cursor<'_>) -> Bombard {
    let id = c.non_negative("id");
    let target_id = c.non_negative("target_id");
    let pct_committed = c.percentage("pct_committed");
    c.eol();
    Bombard {
        line: c.line,
        errors: c.finish(),
        id,
        target_id,
        pct_committed,
    }
}

fn invade(c: &mut Cursor<'_>) -> Invade {
    let id = c.non_negative("id");
    let target_id = c.non_negative("target_id");
    let pct_committed = c.percentage("pct_committed");
    c.eol();
    Invade {
        line: c.line,
        errors: c.finish(),
        id,
        target_id,
        pct_committed,
    }
}

fn raid(c: &mut Cursor<'_>) -> Raid {
    let id = c.non_negative("id");
    let target_id = c.non_negative("target_id");
    let pct_committed = c.percentage("pct_committed");
    let material = c.cargo();
    c.eol();
    Raid {
        line: c.line,
        errors: c.finish(),
        id,
        target_id,
        pct_committed,
        material,
    }
}

/// Three unit ids support an attack on the third; two support a defense.
fn support(c: &mut Cursor<'_>) -> Order {
    let id = c.non_negative("id");
    let support_id = c.non_negative("support_id");
    let target_id = (c.peek_kind() == Some(TokenKind::Integer)).then(|| c.non_negative("target_id"));
    let pct_committed = c.percentage("pct_committed");
    c.eol();
    let line = c.line;
    let errors = c.finish();
    match target_id {
        Some(target_id) => Order::SupportAttack(SupportAttack {
            line,
            errors,
            id,
            support_id,
            target_id,
            pct_committed,
        }),
        None => Order::SupportDefend(SupportDefend {
            line,
            errors,
            id,
            support_id,
            pct_committed,
        }),
    }
}

fn transfer(c: &mut Cursor<'_>) -> Transfer {
    let id = c.non_negative("id");
    let quantity = c.non_negative("quantity");
    let material = c.cargo();
    let target_id = c.non_negative("target_id");
    c.eol();
    Transfer {
        line: c.line,
        errors: c.finish(),
        id,
        quantity,
        material,
        target_id,
    }
}

/// Reads `RESEARCH | PRODUCT QUANTITY`. Research always trades one unit.
fn trade_item(c: &mut Cursor<'_>) -> (i64, Material) {
    if c.peek_kind() == Some(TokenKind::Research) {
        return (1, c.material_token(&[TokenKind::Research]));
    }
    let material = c.material_token(&[TokenKind::Product, TokenKind::Research]);
    (c.non_negative("quantity"), material)
}

fn buy(c: &mut Cursor<'_>) -> Buy {
    let id = c.non_negative("id");
    let (quantity, material) = trade_item(c);
    let bid = c.number();
    c.eol();
    Buy {
        line: c.line,
        errors: c.finish(),
        id,
        quantity,
        material,
        bid,
    }
}

fn sell(c: &mut Cursor<'_>) -> Sell {
    let id = c.non_negative("id");
    let (quantity, material) = trade_item(c);
    let ask = c.number();
    c.eol();
    Sell {
        line: c.line,
        errors: c.finish(),
        id,
        quantity,
        material,
        ask,
    }
}

fn move_to(c: &mut Cursor<'_>) -> Move {
    let id = c.non_negative("id");
    let location = c.coordinate();
    c.eol();
    Move {
        line: c.line,
        errors: c.finish(),
        id,
        location,
    }
}

fn name(c: &mut Cursor<'_>) -> Name {
    let id = c.non_negative("id");
    let name = c.text(TokenKind::QuotedText);
    c.eol();
    Name {
        line: c.line,
        errors: c.finish(),
        id,
        name,
    }
}

fn news(c: &mut Cursor<'_>) -> News {
    let location = c.coordinate();
    let article = c.text(TokenKind::QuotedText);
    let signature = c
        .optional(&[TokenKind::QuotedText])
        .and_then(Token::text)
        .map(str::to_string);
    c.eol();
    News {
        line: c.line,
        errors: c.finish(),
        location,
        article,
        signature,
    }
}

fn pay(c: &mut Cursor<'_>) -> Pay {
    let id = c.optional(&[TokenKind::Integer]).and_then(Token::integer);
    if let Some(id) = id {
        c.check_range("id", id, 0, i64::MAX);
    }
    let profession = c.material_token(&[TokenKind::Population]);
    let rate = c.number();
    if rate < 0.0 {
        #[allow(clippy::cast_possible_truncation)]
        let value = rate.floor() as i64;
        c.check_range("rate", value, 0, i64::MAX);
    }
    c.eol();
    Pay {
        line: c.line,
        errors: c.finish(),
        id,
        profession,
        rate,
    }
}

fn ration(c: &mut Cursor<'_>) -> Ration {
    let id = c.optional(&[TokenKind::Integer]).and_then(Token::integer);
    if let Some(id) = id {
        c.check_range("id", id, 0, i64::MAX);
    }
    let pct = c.percentage("pct");
    c.eol();
    Ration {
        line: c.line,
        errors: c.finish(),
        id,
        pct,
    }
}

fn probe(c: &mut Cursor<'_>) -> Probe {
    let id = c.non_negative("id");
    let target = match c.peek() {
        Some(Tree::Terminal(t)) if t.kind == TokenKind::Integer => {
            let orbit = c.integer();
            Some(ProbeTarget::Orbit(c.check_range("orbit", orbit, 0, MAX_ORBIT)))
        }
        Some(node) if node.name() == Some("coordinate") => Some(ProbeTarget::System(c.coordinate())),
        _ => None,
    };
    c.eol();
    Probe {
        line: c.line,
        errors: c.finish(),
        id,
        target,
    }
}

fn survey(c: &mut Cursor<'_>) -> Survey {
    let id = c.non_negative("id");
    c.eol();
    Survey {
        line: c.line,
        errors: c.finish(),
        id,
    }
}

fn setup(c: &mut Cursor<'_>) -> Setup {
    let id = c.non_negative("id");
    let location = c.coordinate();
    let kind = match c.one_of(&["colony", "ship"]) {
        Some(1) => SetupKind::Ship,
        _ => SetupKind::Colony,
    };
    c.keyword("transfer");
    c.eol();

    let mut items = Vec::new();
    while c.peek().is_some_and(|n| n.is_rule("xfer_detail")) {
        let item = c.nested("xfer_detail", |d| {
            let quantity = d.non_negative("quantity");
            let material = d.cargo();
            d.eol();
            TransferItem { material, quantity }
        });
        items.extend(item);
    }

    c.keyword("end");
    c.eol();
    Setup {
        line: c.line,
        errors: c.finish(),
        id,
        location,
        kind,
        action: SetupAction::Transfer,
        items,
    }
}
