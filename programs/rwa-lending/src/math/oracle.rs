use std::fmt;

use borsh::{ BorshDeserialize, BorshSerialize };
use solana_program::msg;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::bn::U192;
use crate::math::casting::Cast;
use crate::math::constants::ORACLE_MAX_AGE_SECONDS;
use crate::math::safe_math::SafeMath;
use crate::state::oracle::OraclePriceData;


// ordered by "severity"
#[derive(
	Clone,
	Copy,
	BorshSerialize,
	BorshDeserialize,
	PartialEq,
	Debug,
	Eq,
	Default
)]
pub enum OracleValidity {
	NonPositive,
	Stale,
	#[default]
	Valid,
}

impl OracleValidity {
	pub fn get_error_code(&self) -> Option<ErrorCode> {
		match self {
			OracleValidity::NonPositive | OracleValidity::Stale => Some(ErrorCode::InvalidOraclePrice),
			OracleValidity::Valid => None,
		}
	}
}

impl fmt::Display for OracleValidity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OracleValidity::NonPositive => write!(f, "NonPositive"),
			OracleValidity::Stale => write!(f, "Stale"),
			OracleValidity::Valid => write!(f, "Valid"),
		}
	}
}

pub fn oracle_validity(oracle_price_data: &OraclePriceData, now: i64) -> OracleValidity {
	let OraclePriceData { price, timestamp } = *oracle_price_data;

	if price <= 0 {
		OracleValidity::NonPositive
	} else if now.saturating_sub(timestamp) > ORACLE_MAX_AGE_SECONDS {
		OracleValidity::Stale
	} else {
		OracleValidity::Valid
	}
}

pub fn validate_oracle_price(oracle_price_data: &OraclePriceData, now: i64) -> PoolResult<u128> {
	let validity = oracle_validity(oracle_price_data, now);

	if let Some(error_code) = validity.get_error_code() {
		msg!(
			"Invalid oracle price {} at {} (now {}): {}",
			oracle_price_data.price,
			oracle_price_data.timestamp,
			now,
			validity
		);
		return Err(error_code);
	}

	oracle_price_data.price.cast::<u128>()
}

/// `amount * price / 10^decimals`, in oracle precision
pub fn get_usd_value(amount: u128, price: u128, oracle_decimals: u32) -> PoolResult<u128> {
	if amount == 0 {
		return Ok(0);
	}

	let precision = (10_u128)
		.checked_pow(oracle_decimals)
		.ok_or(ErrorCode::MathError)?;

	U192::from(amount)
		.safe_mul(U192::from(price))?
		.safe_div(U192::from(precision))?
		.try_to_u128()
}

/// Inverse of [`get_usd_value`], rounded down
pub fn get_amount_for_usd_value(
	usd_value: u128,
	price: u128,
	oracle_decimals: u32
) -> PoolResult<u128> {
	let precision = (10_u128)
		.checked_pow(oracle_decimals)
		.ok_or(ErrorCode::MathError)?;

	U192::from(usd_value)
		.safe_mul(U192::from(precision))?
		.safe_div(U192::from(price))?
		.try_to_u128()
}
