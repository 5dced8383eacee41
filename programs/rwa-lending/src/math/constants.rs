use static_assertions::const_assert;

// PRECISIONS
pub const SCALAR_7: u128 = 10_000_000; // rates, utilization, percents, health factor
pub const SCALAR_7_I128: i128 = SCALAR_7 as i128;
pub const SCALAR_7_U32: u32 = SCALAR_7 as u32;
pub const SCALAR_12: u128 = 1_000_000_000_000; // bToken / dToken exchange rates
pub const BPS_PRECISION: u128 = 10_000; // collateral factors
pub const BPS_PRECISION_U32: u32 = BPS_PRECISION as u32;

// TIME
pub const SECONDS_PER_YEAR: u128 = 31_536_000;
pub const ONE_DAY_SECONDS: i64 = 86_400;

// INTEREST
pub const MIN_RATE_MODIFIER: u128 = SCALAR_7 / 10; // 0.1x
pub const MAX_RATE_MODIFIER: u128 = SCALAR_7 * 10; // 10x

const_assert!(MIN_RATE_MODIFIER < SCALAR_7);
const_assert!(SCALAR_7 < MAX_RATE_MODIFIER);

// HEALTH
pub const HEALTH_FACTOR_ONE: u128 = SCALAR_7;
pub const MAX_HEALTH_FACTOR: u128 = 11_500_000; // 1.15 after a fill

const_assert!(HEALTH_FACTOR_ONE < MAX_HEALTH_FACTOR);

// AUCTIONS
pub const AUCTION_DURATION_SECONDS: i64 = 1_000;
pub const AUCTION_MAX_SECONDS: i64 = 2_500;
pub const BAD_DEBT_LOT_MULTIPLIER: u128 = 12_000_000; // 120% of the debt
pub const MIN_INTEREST_AUCTION_LOT: u128 = 100;

const_assert!(2 * AUCTION_DURATION_SECONDS <= AUCTION_MAX_SECONDS);

// BACKSTOP
pub const BACKSTOP_WITHDRAWAL_QUEUE_SECONDS: i64 = 17 * ONE_DAY_SECONDS;

// ORACLE
pub const ORACLE_MAX_AGE_SECONDS: i64 = ONE_DAY_SECONDS;
