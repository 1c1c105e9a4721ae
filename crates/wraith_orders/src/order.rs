//! Typed order commands.
//!
//! Every order carries the line it came from and the walk errors found in it.
//! An order with errors is still returned so a whole file's problems can be
//! reported at once.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use wraith_foundation::Coordinates;
use wraith_language::vocabulary::{RESEARCH, TECH_LEVEL_PREFIX};

use crate::error::WalkError;
use crate::keyword::Keyword;

// =============================================================================
// Shared Value Types
// =============================================================================

/// A population role, resource, research, or product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Material {
    /// Canonical lowercase name.
    pub name: String,
    /// Tech level, if the order named one.
    pub tech_level: Option<u32>,
}

impl Material {
    /// Creates a material with no tech level.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tech_level: None,
        }
    }

    /// Sets the tech level.
    #[must_use]
    pub fn with_tech_level(mut self, tech_level: u32) -> Self {
        self.tech_level = Some(tech_level);
        self
    }

    /// Returns true if this is research rather than a physical good.
    #[must_use]
    pub fn is_research(&self) -> bool {
        self.name == RESEARCH
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tech_level {
            Some(tl) if self.is_research() => write!(f, "{TECH_LEVEL_PREFIX}{tl}"),
            Some(tl) => write!(f, "{}-{tl}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A deposit or production group named in an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum GroupRef {
    /// `dp-<n>`
    Deposit(i64),
    /// `fg-<n>`
    FactoryGroup(i64),
    /// `mg-<n>`
    MineGroup(i64),
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit(n) => write!(f, "dp-{n}"),
            Self::FactoryGroup(n) => write!(f, "fg-{n}"),
            Self::MineGroup(n) => write!(f, "mg-{n}"),
        }
    }
}

/// What a probe looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ProbeTarget {
    /// An orbit in the probing unit's own system.
    Orbit(i64),
    /// Another system or orbit.
    System(Coordinates),
}

/// What a setup order creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SetupKind {
    /// A new colony.
    Colony,
    /// A new ship.
    Ship,
}

impl fmt::Display for SetupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Colony => "colony",
            Self::Ship => "ship",
        })
    }
}

/// How a setup order stocks what it creates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SetupAction {
    /// Move the listed items from the parent unit.
    #[default]
    Transfer,
}

impl fmt::Display for SetupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("transfer")
    }
}

/// One line in the body of a setup order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TransferItem {
    /// What is moved.
    pub material: Material,
    /// How many.
    pub quantity: i64,
}

// =============================================================================
// Order Structs
// =============================================================================

/// Builds units from materials at a deposit or group.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Assemble {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Deposit or group the work happens at.
    pub group: Option<GroupRef>,
    /// Number of units.
    pub quantity: i64,
    /// What is built, moved, or traded.
    pub material: Material,
}

/// Breaks units back down.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Disassemble {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Deposit or group the work happens at.
    pub group: Option<GroupRef>,
    /// Number of units.
    pub quantity: i64,
    /// What is built, moved, or traded.
    pub material: Material,
}

/// Switches a factory group to a new product.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Retool {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Factory group being retooled.
    pub factory_group: i64,
    /// What is built, moved, or traded.
    pub material: Material,
}

/// Commits a share of a unit to bombarding a target.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Bombard {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Unit on the receiving end.
    pub target_id: i64,
    /// Share of the unit committed, in percent.
    pub pct_committed: i64,
}

/// Commits a share of a unit to invading a target.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Invade {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Unit on the receiving end.
    pub target_id: i64,
    /// Share of the unit committed, in percent.
    pub pct_committed: i64,
}

/// Commits a share of a unit to raiding a target for one material.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Raid {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Unit on the receiving end.
    pub target_id: i64,
    /// Share of the unit committed, in percent.
    pub pct_committed: i64,
    /// What is built, moved, or traded.
    pub material: Material,
}

/// Supports another unit's attack on a target.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SupportAttack {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Unit being supported.
    pub support_id: i64,
    /// Unit on the receiving end.
    pub target_id: i64,
    /// Share of the unit committed, in percent.
    pub pct_committed: i64,
}

/// Supports another unit's defense.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SupportDefend {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Unit being supported.
    pub support_id: i64,
    /// Share of the unit committed, in percent.
    pub pct_committed: i64,
}

/// Moves goods or people between two units.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Transfer {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Number of units.
    pub quantity: i64,
    /// What is built, moved, or traded.
    pub material: Material,
    /// Unit on the receiving end.
    pub target_id: i64,
}

/// Places a bid on the market.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Buy {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Number of units.
    pub quantity: i64,
    /// What is built, moved, or traded.
    pub material: Material,
    /// Price offered per unit.
    pub bid: f64,
}

/// Offers goods on the market.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Sell {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Number of units.
    pub quantity: i64,
    /// What is built, moved, or traded.
    pub material: Material,
    /// Price asked per unit.
    pub ask: f64,
}

/// Moves a ship to new coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Move {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Where the order applies.
    pub location: Coordinates,
}

/// Renames a unit.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Name {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// New name.
    pub name: String,
}

/// Publishes a news article at a location.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct News {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Where the order applies.
    pub location: Coordinates,
    /// Article text.
    pub article: String,
    /// Optional byline.
    pub signature: Option<String>,
}

/// Sets the pay rate for a profession, for one unit or everywhere.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pay {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: Option<i64>,
    /// Population role being paid.
    pub profession: Material,
    /// Pay rate.
    pub rate: f64,
}

/// Sets the food ration, for one unit or everywhere.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Ration {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: Option<i64>,
    /// Ration, in percent.
    pub pct: i64,
}

/// Probes an orbit or another system, or the unit's own orbit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Probe {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// What is probed; `None` probes the unit's current orbit.
    pub target: Option<ProbeTarget>,
}

/// Surveys the unit's current orbit.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Survey {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
}

/// Creates a colony or ship and stocks it from the parent unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Setup {
    /// Line the order starts on.
    pub line: u32,
    /// Problems found while walking the order.
    pub errors: Vec<WalkError>,
    /// Unit giving the order.
    pub id: i64,
    /// Where the order applies.
    pub location: Coordinates,
    /// What is created.
    pub kind: SetupKind,
    /// How it is stocked.
    pub action: SetupAction,
    /// Goods and people moved into it.
    pub items: Vec<TransferItem>,
}

/// A line no rule accepted, kept in recovery mode.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Unknown {
    /// Line the order starts on.
    pub line: u32,
    /// The line's tokens joined by spaces.
    pub command: String,
}

// =============================================================================
// Order
// =============================================================================

/// One parsed order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "order", rename_all = "snake_case"))]
pub enum Order {
    /// An `assemble` order.
    Assemble(Assemble),
    /// A `bombard` order.
    Bombard(Bombard),
    /// A `buy` order.
    Buy(Buy),
    /// A `disassemble` order.
    Disassemble(Disassemble),
    /// An `invade` order.
    Invade(Invade),
    /// A `move` order.
    Move(Move),
    /// A `name` order.
    Name(Name),
    /// A `news` order.
    News(News),
    /// A `pay` order.
    Pay(Pay),
    /// A `probe` order.
    Probe(Probe),
    /// A `raid` order.
    Raid(Raid),
    /// A `ration` order.
    Ration(Ration),
    /// A `retool` order.
    Retool(Retool),
    /// A `sell` order.
    Sell(Sell),
    /// A `setup` order.
    Setup(Setup),
    /// A three-unit `support` order.
    SupportAttack(SupportAttack),
    /// A two-unit `support` order.
    SupportDefend(SupportDefend),
    /// A `survey` order.
    Survey(Survey),
    /// A `transfer` order.
    Transfer(Transfer),
    /// An unrecognized line order.
    Unknown(Unknown),
}

macro_rules! each_order {
    ($self:expr, $o:ident => $body:expr, unknown $u:ident => $ubody:expr) => {
        match $self {
            Order::Assemble($o) => $body,
            Order::Bombard($o) => $body,
            Order::Buy($o) => $body,
            Order::Disassemble($o) => $body,
            Order::Invade($o) => $body,
            Order::Move($o) => $body,
            Order::Name($o) => $body,
            Order::News($o) => $body,
            Order::Pay($o) => $body,
            Order::Probe($o) => $body,
            Order::Raid($o) => $body,
            Order::Ration($o) => $body,
            Order::Retool($o) => $body,
            Order::Sell($o) => $body,
            Order::Setup($o) => $body,
            Order::SupportAttack($o) => $body,
            Order::SupportDefend($o) => $body,
            Order::Survey($o) => $body,
            Order::Transfer($o) => $body,
            Order::Unknown($u) => $ubody,
        }
    };
}

impl Order {
    /// Returns the line the order starts on.
    #[must_use]
    pub fn line(&self) -> u32 {
        each_order!(self, o => o.line, unknown u => u.line)
    }

    /// Returns the walk errors found in this order.
    #[must_use]
    pub fn errors(&self) -> &[WalkError] {
        each_order!(self, o => o.errors.as_slice(), unknown _u => &[])
    }

    /// Returns the keyword that introduced this order, or `None` for an
    /// unrecognized line.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        Some(match self {
            Self::Assemble(_) => Keyword::Assemble,
            Self::Bombard(_) => Keyword::Bombard,
            Self::Buy(_) => Keyword::Buy,
            Self::Disassemble(_) => Keyword::Disassemble,
            Self::Invade(_) => Keyword::Invade,
            Self::Move(_) => Keyword::Move,
            Self::Name(_) => Keyword::Name,
            Self::News(_) => Keyword::News,
            Self::Pay(_) => Keyword::Pay,
            Self::Probe(_) => Keyword::Probe,
            Self::Raid(_) => Keyword::Raid,
            Self::Ration(_) => Keyword::Ration,
            Self::Retool(_) => Keyword::Retool,
            Self::Sell(_) => Keyword::Sell,
            Self::Setup(_) => Keyword::Setup,
            Self::SupportAttack(_) | Self::SupportDefend(_) => Keyword::Support,
            Self::Survey(_) => Keyword::Survey,
            Self::Transfer(_) => Keyword::Transfer,
            Self::Unknown(_) => return None,
        })
    }

    /// Returns true if this is a line no rule accepted.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Returns true if the order has no walk errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line();
        match self {
            Self::Assemble(o) => {
                write!(f, "{line}: assemble {}", o.id)?;
                if let Some(group) = o.group {
                    write!(f, " {group}")?;
                }
                write!(f, " {} {}", o.quantity, o.material)
            }
            Self::Disassemble(o) => {
                write!(f, "{line}: disassemble {}", o.id)?;
                if let Some(group) = o.group {
                    write!(f, " {group}")?;
                }
                write!(f, " {} {}", o.quantity, o.material)
            }
            Self::Retool(o) => write!(
                f,
                "{line}: retool {} fg-{} {}",
                o.id, o.factory_group, o.material
            ),
            Self::Bombard(o) => write!(
                f,
                "{line}: bombard {} {} {}%",
                o.id, o.target_id, o.pct_committed
            ),
            Self::Invade(o) => write!(
                f,
                "{line}: invade {} {} {}%",
                o.id, o.target_id, o.pct_committed
            ),
            Self::Raid(o) => write!(
                f,
                "{line}: raid {} {} {}% {}",
                o.id, o.target_id, o.pct_committed, o.material
            ),
            Self::SupportAttack(o) => write!(
                f,
                "{line}: support {} {} {} {}%",
                o.id, o.support_id, o.target_id, o.pct_committed
            ),
            Self::SupportDefend(o) => write!(
                f,
                "{line}: support {} {} {}%",
                o.id, o.support_id, o.pct_committed
            ),
            Self::Transfer(o) => write!(
                f,
                "{line}: transfer {} {} {} {}",
                o.id, o.quantity, o.material, o.target_id
            ),
            Self::Buy(o) => {
                write!(f, "{line}: buy {} ", o.id)?;
                write_trade(f, o.quantity, &o.material)?;
                write!(f, " {}", o.bid)
            }
            Self::Sell(o) => {
                write!(f, "{line}: sell {} ", o.id)?;
                write_trade(f, o.quantity, &o.material)?;
                write!(f, " {}", o.ask)
            }
            Self::Move(o) => write!(f, "{line}: move {} {}", o.id, o.location),
            Self::Name(o) => write!(f, "{line}: name {} {:?}", o.id, o.name),
            Self::News(o) => {
                write!(f, "{line}: news {} {:?}", o.location, o.article)?;
                if let Some(signature) = &o.signature {
                    write!(f, " {signature:?}")?;
                }
                Ok(())
            }
            Self::Pay(o) => {
                write!(f, "{line}: pay")?;
                if let Some(id) = o.id {
                    write!(f, " {id}")?;
                }
                write!(f, " {} {}", o.profession, o.rate)
            }
            Self::Ration(o) => {
                write!(f, "{line}: ration")?;
                if let Some(id) = o.id {
                    write!(f, " {id}")?;
                }
                write!(f, " {}%", o.pct)
            }
            Self::Probe(o) => match o.target {
                Some(ProbeTarget::Orbit(orbit)) => write!(f, "{line}: probe {} {orbit}", o.id),
                Some(ProbeTarget::System(c)) => write!(f, "{line}: probe {} {c}", o.id),
                None => write!(f, "{line}: probe {}", o.id),
            },
            Self::Survey(o) => write!(f, "{line}: survey {}", o.id),
            Self::Setup(o) => {
                write!(
                    f,
                    "{line}: setup {} {} {} {}",
                    o.id, o.location, o.kind, o.action
                )?;
                for item in &o.items {
                    write!(f, " [{} {}]", item.quantity, item.material)?;
                }
                Ok(())
            }
            Self::Unknown(o) => write!(f, "{line}: unknown {:?}", o.command),
        }
    }
}

/// Research trades are written without a quantity.
fn write_trade(f: &mut fmt::Formatter<'_>, quantity: i64, material: &Material) -> fmt::Result {
    if material.is_research() {
        write!(f, "{material}")
    } else {
        write!(f, "{material} {quantity}")
    }
}
