use thiserror::Error;

use tw_core::CarId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitError {
    /// A load attempt beyond the car's capacity.  The exchange loop swallows
    /// this; the occupant simply keeps waiting.
    #[error("car {car} is full ({capacity} aboard)")]
    CapacityExceeded { car: CarId, capacity: usize },
}

pub type TransitResult<T> = Result<T, TransitError>;
