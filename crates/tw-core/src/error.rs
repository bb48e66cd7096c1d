//! Configuration errors shared by every `tw-*` crate.
//!
//! Sub-crates wrap `ConfigError` as one variant of their own error enums via
//! `#[from]`, so a catalog miss surfaces from `place` as
//! `PlacementError::Catalog(..)` without the caller matching on two types.

use thiserror::Error;

use crate::RoomType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A room-type lookup missed the catalog.  This is a data-integrity bug:
    /// the triggering operation is aborted before it touches any state.
    #[error("room type {0} is missing from the catalog")]
    UnknownRoomType(RoomType),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
