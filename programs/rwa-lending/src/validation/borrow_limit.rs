use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::borrow_limit::{
	calculate_borrow_limit,
	calculate_debt_value,
	BorrowLimitCalculation,
};
use crate::math::safe_math::SafeMath;
use crate::state::oracle::PriceOracle;
use crate::state::pool::Pool;
use crate::state::reserve::AssetId;
use crate::validate;

#[cfg(test)]
mod tests;

pub fn get_borrow_limit(
	pool: &Pool,
	user: &Pubkey,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<BorrowLimitCalculation> {
	match pool.users.get(user) {
		Some(positions) =>
			calculate_borrow_limit(
				positions,
				&pool.collateral_factors,
				&pool.reserves,
				oracle,
				now
			),
		None => Ok(BorrowLimitCalculation::default()),
	}
}

/// Borrowing `amount` more of `asset` must keep the debt at or under the
/// borrow limit. Runs against the balances before the new dTokens are minted.
pub fn validate_borrow(
	pool: &Pool,
	borrower: &Pubkey,
	asset: &AssetId,
	amount: u128,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult {
	let calculation = get_borrow_limit(pool, borrower, oracle, now)?;

	let new_debt_value = calculate_debt_value(amount, asset, oracle, now)?;
	let debt_value = calculation.debt_value.safe_add(new_debt_value)?;

	validate!(
		debt_value <= calculation.borrow_limit,
		ErrorCode::InsufficientBorrowLimit,
		"{} debt value {} would exceed borrow limit {}",
		borrower,
		debt_value,
		calculation.borrow_limit
	)
}

/// Runs after the collateral has been taken out of `borrower`'s positions
pub fn validate_collateral_removal(
	pool: &Pool,
	borrower: &Pubkey,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult {
	let calculation = get_borrow_limit(pool, borrower, oracle, now)?;

	validate!(
		calculation.debt_value <= calculation.borrow_limit,
		ErrorCode::InsufficientCollateral,
		"{} debt value {} exceeds borrow limit {} after removal",
		borrower,
		calculation.debt_value,
		calculation.borrow_limit
	)
}
