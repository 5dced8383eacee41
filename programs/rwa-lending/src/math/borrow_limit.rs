use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::error::PoolResult;
use crate::math::balance::get_repayment_amount;
use crate::math::bn::U192;
use crate::math::casting::Cast;
use crate::math::constants::{ BPS_PRECISION, SCALAR_7 };
use crate::math::oracle::get_usd_value;
use crate::math::safe_math::SafeMath;
use crate::state::oracle::{ get_validated_price, OracleAsset, PriceOracle };
use crate::state::reserve::AssetId;
use crate::state::reserve_map::ReserveMap;
use crate::state::user::UserPositions;

#[cfg(test)]
mod tests;

/// Snapshot of an account's collateral and debt, in oracle precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BorrowLimitCalculation {
	pub collateral_value: u128,
	/// collateral value weighted by collateral factors
	pub borrow_limit: u128,
	pub debt_value: u128,
}

impl BorrowLimitCalculation {
	pub fn health_factor(&self) -> PoolResult<u128> {
		calculate_health_factor(self.borrow_limit, self.debt_value)
	}

	pub fn is_insolvent(&self) -> bool {
		self.borrow_limit < self.debt_value
	}
}

/// Weighted collateral over debt (SCALAR_7), `u128::MAX` without debt
pub fn calculate_health_factor(borrow_limit: u128, debt_value: u128) -> PoolResult<u128> {
	if debt_value == 0 {
		return Ok(u128::MAX);
	}

	U192::from(borrow_limit)
		.safe_mul(U192::from(SCALAR_7))?
		.safe_div(U192::from(debt_value))?
		.try_to_u128()
}

pub fn calculate_weighted_value(value: u128, collateral_factor: u32) -> PoolResult<u128> {
	value.safe_mul(collateral_factor.cast::<u128>()?)?.safe_div(BPS_PRECISION)
}

/// USD value of `amount` of `asset`
pub fn calculate_asset_value(
	amount: u128,
	asset: &OracleAsset,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<u128> {
	if amount == 0 {
		return Ok(0);
	}

	let price = get_validated_price(oracle, asset, now)?;
	get_usd_value(amount, price, oracle.decimals()?)
}

/// Raw and weighted value of every posted collateral token
pub fn calculate_collateral_value(
	user: &UserPositions,
	collateral_factors: &BTreeMap<Pubkey, u32>,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<(u128, u128)> {
	let mut collateral_value = 0_u128;
	let mut borrow_limit = 0_u128;

	for (rwa_token, amount) in user.collateral.iter() {
		if *amount == 0 {
			continue;
		}

		let value = calculate_asset_value(*amount, &OracleAsset::Token(*rwa_token), oracle, now)?;
		let collateral_factor = collateral_factors.get(rwa_token).copied().unwrap_or(0);

		collateral_value = collateral_value.safe_add(value)?;
		borrow_limit = borrow_limit.safe_add(calculate_weighted_value(value, collateral_factor)?)?;
	}

	Ok((collateral_value, borrow_limit))
}

/// Asset amount currently owed by `user`, rounded up
pub fn calculate_debt_amount(user: &UserPositions, reserves: &ReserveMap) -> PoolResult<u128> {
	match user.get_debt() {
		Some((asset, d_tokens)) => get_repayment_amount(d_tokens, reserves.get_ref(&asset)?),
		None => Ok(0),
	}
}

pub fn calculate_debt_value(
	debt_amount: u128,
	debt_asset: &AssetId,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<u128> {
	calculate_asset_value(debt_amount, &OracleAsset::Symbol(*debt_asset), oracle, now)
}

pub fn calculate_borrow_limit(
	user: &UserPositions,
	collateral_factors: &BTreeMap<Pubkey, u32>,
	reserves: &ReserveMap,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<BorrowLimitCalculation> {
	let (collateral_value, borrow_limit) = calculate_collateral_value(
		user,
		collateral_factors,
		oracle,
		now
	)?;

	let debt_value = match user.get_debt() {
		Some((asset, _)) =>
			calculate_debt_value(calculate_debt_amount(user, reserves)?, &asset, oracle, now)?,
		None => 0,
	};

	Ok(BorrowLimitCalculation {
		collateral_value,
		borrow_limit,
		debt_value,
	})
}
