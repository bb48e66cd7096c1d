//! Occupant roles.

use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, RoomType};

/// Who an occupant is.  The role decides which rooms it lives in, which
/// daily windows move it, and which cars will admit it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OccupantKind {
    OfficeWorker,
    Resident,
    HotelGuest,
    Visitor,
    /// Building staff.  The only role service cars admit.
    Janitor,
}

impl OccupantKind {
    pub const ALL: [OccupantKind; 5] = [
        OccupantKind::OfficeWorker,
        OccupantKind::Resident,
        OccupantKind::HotelGuest,
        OccupantKind::Visitor,
        OccupantKind::Janitor,
    ];

    /// The room type this role occupies, if it has a home room at all.
    pub fn room_type(self) -> Option<RoomType> {
        match self {
            OccupantKind::OfficeWorker => Some(RoomType::Office),
            OccupantKind::Resident     => Some(RoomType::Condo),
            OccupantKind::HotelGuest   => Some(RoomType::Hotel),
            OccupantKind::Visitor      => Some(RoomType::Food),
            OccupantKind::Janitor      => None,
        }
    }

    pub fn is_staff(self) -> bool {
        matches!(self, OccupantKind::Janitor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OccupantKind::OfficeWorker => "office_worker",
            OccupantKind::Resident     => "resident",
            OccupantKind::HotelGuest   => "hotel_guest",
            OccupantKind::Visitor      => "visitor",
            OccupantKind::Janitor      => "janitor",
        }
    }
}

impl fmt::Display for OccupantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OccupantKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OccupantKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| ConfigError::Invalid(format!("unknown occupant kind {s:?}")))
    }
}
