//! Room-type catalog: constant per-type data supplied once at startup.
//!
//! The catalog is read-only configuration.  Every lookup goes through
//! [`Catalog::spec`], which turns a miss into
//! [`ConfigError::UnknownRoomType`] so callers can abort the triggering
//! operation before touching any state.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::{ConfigError, ConfigResult};

// ── RoomType ──────────────────────────────────────────────────────────────────

/// Every kind of room the grid can hold.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomType {
    Lobby,
    Office,
    Condo,
    Hotel,
    Food,
    Parking,
    Stairs,
    Elevator,
    ExpressElevator,
    ServiceElevator,
}

impl RoomType {
    pub const ALL: [RoomType; 10] = [
        RoomType::Lobby,
        RoomType::Office,
        RoomType::Condo,
        RoomType::Hotel,
        RoomType::Food,
        RoomType::Parking,
        RoomType::Stairs,
        RoomType::Elevator,
        RoomType::ExpressElevator,
        RoomType::ServiceElevator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Lobby           => "lobby",
            RoomType::Office          => "office",
            RoomType::Condo           => "condo",
            RoomType::Hotel           => "hotel",
            RoomType::Food            => "food",
            RoomType::Parking         => "parking",
            RoomType::Stairs          => "stairs",
            RoomType::Elevator        => "elevator",
            RoomType::ExpressElevator => "express_elevator",
            RoomType::ServiceElevator => "service_elevator",
        }
    }

    /// Rooms that `demolish` refuses to remove.
    pub fn is_protected(self) -> bool {
        matches!(self, RoomType::Lobby)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Transit data ──────────────────────────────────────────────────────────────

/// Vertical transit families.  Connectivity only links vertically adjacent
/// cells of the same room type, so a standard shaft never joins an express
/// one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitKind {
    Stairs,
    Standard,
    Express,
    Service,
}

/// The floors a transit variant may stop at.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    #[default]
    All,
    /// Inclusive floor range.
    Range { min: i32, max: i32 },
    Floors(BTreeSet<i32>),
}

impl Zone {
    pub fn serves(&self, floor: i32) -> bool {
        match self {
            Zone::All                => true,
            Zone::Range { min, max } => (*min..=*max).contains(&floor),
            Zone::Floors(set)        => set.contains(&floor),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitSpec {
    pub kind: TransitKind,
    /// Maximum passengers aboard.  Zero for stairs.
    pub capacity: usize,
    /// Floors per tick at nominal motion scale.
    pub speed: f64,
    pub zone: Zone,
    /// Only staff occupants may board.
    pub staff_only: bool,
}

impl TransitSpec {
    pub fn is_car(&self) -> bool {
        self.kind != TransitKind::Stairs
    }
}

// ── Placement and income ──────────────────────────────────────────────────────

/// Vertical zoning for a room type relative to the lobby floor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementRule {
    #[default]
    Anywhere,
    LobbyFloor,
    /// Needs sunlight: strictly above the lobby.
    AboveLobby,
    /// Underground: strictly below the lobby.
    BelowLobby,
}

impl PlacementRule {
    pub fn permits(self, floor: i32, lobby_floor: i32) -> bool {
        match self {
            PlacementRule::Anywhere   => true,
            PlacementRule::LobbyFloor => floor == lobby_floor,
            PlacementRule::AboveLobby => floor > lobby_floor,
            PlacementRule::BelowLobby => floor < lobby_floor,
        }
    }
}

/// How a room type earns money.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Income {
    /// Paid at each day rollover while the room is connected.
    DailyRent(u32),
    /// Paid at each day rollover while the room has an occupant.
    OccupiedRent(u32),
    /// Paid once, on the first resident arrival.
    Sale(u32),
    /// Paid on every visitor arrival.
    PerVisit(u32),
}

// ── RoomSpec ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomSpec {
    /// Footprint width in cells (always one floor tall).
    pub width: u32,
    pub cost: u32,
    /// Maximum occupants that may call this room home.
    pub occupancy: usize,
    pub placement: PlacementRule,
    pub transit: Option<TransitSpec>,
    pub income: Option<Income>,
}

impl RoomSpec {
    fn room(width: u32, cost: u32, occupancy: usize, placement: PlacementRule, income: Income) -> Self {
        Self { width, cost, occupancy, placement, transit: None, income: Some(income) }
    }

    fn shaft(cost: u32, transit: TransitSpec) -> Self {
        Self {
            width: 1,
            cost,
            occupancy: 0,
            placement: PlacementRule::Anywhere,
            transit: Some(transit),
            income: None,
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    specs: BTreeMap<RoomType, RoomSpec>,
}

impl Catalog {
    /// An empty catalog.  Every lookup misses until types are inserted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock room set for a grid `height` floors tall with the lobby at
    /// `lobby_floor`.  Express cars stop on every tenth floor counted from
    /// the lobby, in both directions.
    pub fn standard(lobby_floor: i32, height: u32) -> Self {
        use PlacementRule::*;

        let express_floors: BTreeSet<i32> = (0..height as i32)
            .filter(|f| (f - lobby_floor).rem_euclid(10) == 0)
            .collect();

        let mut c = Catalog::empty();
        c.insert(RoomType::Lobby, RoomSpec {
            width: 1,
            cost: 0,
            occupancy: 0,
            placement: LobbyFloor,
            transit: None,
            income: None,
        });
        c.insert(RoomType::Office,  RoomSpec::room(2, 8_000, 6, AboveLobby, Income::DailyRent(400)));
        c.insert(RoomType::Condo,   RoomSpec::room(4, 15_000, 3, AboveLobby, Income::Sale(30_000)));
        c.insert(RoomType::Hotel,   RoomSpec::room(2, 12_000, 2, AboveLobby, Income::OccupiedRent(250)));
        c.insert(RoomType::Food,    RoomSpec::room(3, 10_000, 8, Anywhere, Income::PerVisit(30)));
        c.insert(RoomType::Parking, RoomSpec::room(1, 5_000, 0, BelowLobby, Income::DailyRent(100)));
        c.insert(RoomType::Stairs, RoomSpec::shaft(1_000, TransitSpec {
            kind: TransitKind::Stairs,
            capacity: 0,
            speed: 0.0,
            zone: Zone::All,
            staff_only: false,
        }));
        c.insert(RoomType::Elevator, RoomSpec::shaft(5_000, TransitSpec {
            kind: TransitKind::Standard,
            capacity: 8,
            speed: 0.2,
            zone: Zone::All,
            staff_only: false,
        }));
        c.insert(RoomType::ExpressElevator, RoomSpec::shaft(20_000, TransitSpec {
            kind: TransitKind::Express,
            capacity: 12,
            speed: 0.5,
            zone: Zone::Floors(express_floors),
            staff_only: false,
        }));
        c.insert(RoomType::ServiceElevator, RoomSpec::shaft(8_000, TransitSpec {
            kind: TransitKind::Service,
            capacity: 6,
            speed: 0.15,
            zone: Zone::All,
            staff_only: true,
        }));
        c
    }

    /// Add or replace the entry for `ty`.
    pub fn insert(&mut self, ty: RoomType, spec: RoomSpec) {
        self.specs.insert(ty, spec);
    }

    pub fn remove(&mut self, ty: RoomType) -> Option<RoomSpec> {
        self.specs.remove(&ty)
    }

    pub fn spec(&self, ty: RoomType) -> ConfigResult<&RoomSpec> {
        self.specs.get(&ty).ok_or(ConfigError::UnknownRoomType(ty))
    }

    pub fn contains(&self, ty: RoomType) -> bool {
        self.specs.contains_key(&ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomType, &RoomSpec)> {
        self.specs.iter().map(|(ty, spec)| (*ty, spec))
    }
}
