use std::fmt;

use anchor_lang::prelude::*;

use crate::error::PoolResult;
use crate::math::oracle::validate_oracle_price;
use crate::state::reserve::AssetId;

/// What a price is requested for. RWA collateral and the backstop token are
/// priced by token address, reserve assets by symbol.
#[derive(
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Debug,
	AnchorSerialize,
	AnchorDeserialize
)]
pub enum OracleAsset {
	Token(Pubkey),
	Symbol(AssetId),
}

impl fmt::Display for OracleAsset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OracleAsset::Token(token) => write!(f, "Token({})", token),
			OracleAsset::Symbol(asset) => write!(f, "Symbol({})", asset),
		}
	}
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OraclePriceData {
	/// precision: 10^decimals
	pub price: i128,
	/// unix timestamp of the observation
	pub timestamp: i64,
}

/// Price feed consumed by the pool. Implementations surface
/// `OraclePriceFetchFailed`, `OracleDecimalsFetchFailed` or
/// `AssetNotFoundInOracle` when a lookup fails.
pub trait PriceOracle {
	fn get_price(&self, asset: &OracleAsset) -> PoolResult<OraclePriceData>;

	fn decimals(&self) -> PoolResult<u32>;
}

/// Fetches a price and rejects non-positive or stale observations
pub fn get_validated_price(
	oracle: &dyn PriceOracle,
	asset: &OracleAsset,
	now: i64
) -> PoolResult<u128> {
	let oracle_price_data = oracle.get_price(asset).map_err(|e| {
		msg!("Could not fetch price for {}", asset);
		e
	})?;

	validate_oracle_price(&oracle_price_data, now)
}
