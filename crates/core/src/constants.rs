use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Ceiling every allocation map is held under (percent)
pub const FULL_ALLOCATION: Decimal = dec!(100);

/// Distance from 100 a committed allocation may sit at and still be valid
pub const DEFAULT_ALLOCATION_TOLERANCE: Decimal = dec!(0.1);

/// Decimal places kept for allocations produced by proportional redistribution
pub const ALLOCATION_PRECISION: u32 = 10;

/// Months per projection year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Default projection horizon offered to the user
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Longest projection horizon the dashboard allows
pub const MAX_HORIZON_YEARS: u32 = 50;

/// Bounds of a strategy risk score
pub const MIN_RISK_SCORE: u8 = 1;
pub const MAX_RISK_SCORE: u8 = 5;
