//! Value objects for the order domain.

use rust_decimal::{Decimal, RoundingStrategy};

use super::OrderError;

/// Positive order total with exactly two decimal places.
///
/// Inputs with more precision are rounded half away from zero before the
/// positivity check, so `0.004` is rejected and `0.005` becomes `0.01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TotalAmount(Decimal);

impl TotalAmount {
    /// Number of fractional digits kept.
    pub const SCALE: u32 = 2;

    /// Creates a total amount, validating and rescaling the input.
    pub fn new(amount: Decimal) -> Result<Self, OrderError> {
        let mut rounded =
            amount.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);

        if rounded <= Decimal::ZERO {
            return Err(OrderError::InvalidTotalAmount { amount });
        }
        // NUMERIC(19, 2) leaves 17 integer digits
        if rounded >= Decimal::from(100_000_000_000_000_000_i64) {
            return Err(OrderError::TotalAmountOutOfRange { amount });
        }

        rounded.rescale(Self::SCALE);
        Ok(Self(rounded))
    }

    /// Creates a total amount from a number of cents.
    pub fn from_cents(cents: i64) -> Result<Self, OrderError> {
        Self::new(Decimal::new(cents, Self::SCALE))
    }

    /// Returns the amount.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for TotalAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TotalAmount> for Decimal {
    fn from(amount: TotalAmount) -> Self {
        amount.0
    }
}
