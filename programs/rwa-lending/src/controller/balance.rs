use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::balance::{
	calculate_debt_payment,
	get_b_tokens_for_deposit,
	get_d_tokens_for_borrow,
	get_repayment_amount,
	get_withdrawal_amount,
};
use crate::math::safe_math::SafeMath;
use crate::state::pool::Pool;
use crate::state::reserve::AssetId;
use crate::validate;


/// Mints bTokens for `amount`, returns the bTokens minted
pub fn update_balances_for_deposit(
	pool: &mut Pool,
	lender: &Pubkey,
	asset: &AssetId,
	amount: u128
) -> PoolResult<u128> {
	let reserve = pool.reserves.get_ref_mut(asset)?;

	let b_tokens = get_b_tokens_for_deposit(amount, reserve)?;
	validate!(
		b_tokens > 0,
		ErrorCode::InsufficientDepositAmount,
		"deposit of {} {} mints no bTokens",
		amount,
		asset
	)?;

	reserve.b_token_supply = reserve.b_token_supply.safe_add(b_tokens)?;
	reserve.increase_pool_balance(amount)?;

	pool.users.get_or_create_mut(lender).increase_b_tokens(asset, b_tokens)?;

	Ok(b_tokens)
}

/// Burns `b_tokens`, returns the asset amount owed to the lender
pub fn update_balances_for_withdrawal(
	pool: &mut Pool,
	lender: &Pubkey,
	asset: &AssetId,
	b_tokens: u128
) -> PoolResult<u128> {
	let reserve = pool.reserves.get_ref_mut(asset)?;

	let amount = get_withdrawal_amount(b_tokens, reserve)?;

	pool.users.get_or_create_mut(lender).decrease_b_tokens(asset, b_tokens)?;
	reserve.decrease_pool_balance(amount)?;
	reserve.b_token_supply = reserve.b_token_supply.safe_sub(b_tokens)?;

	Ok(amount)
}

/// Mints dTokens for `amount` of new debt, returns the dTokens minted
pub fn update_balances_for_borrow(
	pool: &mut Pool,
	borrower: &Pubkey,
	asset: &AssetId,
	amount: u128
) -> PoolResult<u128> {
	let reserve = pool.reserves.get_ref_mut(asset)?;

	validate!(
		reserve.pool_balance >= amount,
		ErrorCode::InsufficientLiquidity,
		"{} pool balance {} cannot cover borrow of {}",
		asset,
		reserve.pool_balance,
		amount
	)?;

	let d_tokens = get_d_tokens_for_borrow(amount, reserve)?;

	pool.users.get_or_create_mut(borrower).increase_d_tokens(asset, d_tokens)?;
	reserve.pool_balance = reserve.pool_balance.safe_sub(amount)?;
	reserve.d_token_supply = reserve.d_token_supply.safe_add(d_tokens)?;

	Ok(d_tokens)
}

/// Burns `d_tokens`, returns the asset amount the borrower must pay
pub fn update_balances_for_repayment(
	pool: &mut Pool,
	borrower: &Pubkey,
	asset: &AssetId,
	d_tokens: u128
) -> PoolResult<u128> {
	let reserve = pool.reserves.get_ref_mut(asset)?;
	let user = pool.users.get_or_create_mut(borrower);

	validate!(
		user.get_d_token_balance(asset) > 0,
		ErrorCode::InsufficientDebtToRepay,
		"no {} debt to repay",
		asset
	)?;

	let amount = get_repayment_amount(d_tokens, reserve)?;

	user.decrease_d_tokens(asset, d_tokens)?;
	reserve.d_token_supply = reserve.d_token_supply.safe_sub(d_tokens)?;
	reserve.increase_pool_balance(amount)?;

	Ok(amount)
}

/// Applies a payment of `amount` against `borrower`'s debt. The dTokens
/// cleared are capped at the borrower's balance, in which case only the
/// amount owed for that balance is taken. Returns (amount taken, dTokens burnt).
pub fn update_balances_for_debt_payment(
	pool: &mut Pool,
	borrower: &Pubkey,
	asset: &AssetId,
	amount: u128
) -> PoolResult<(u128, u128)> {
	let reserve = pool.reserves.get_ref_mut(asset)?;
	let user = pool.users.get_or_create_mut(borrower);

	let (amount, d_tokens) = calculate_debt_payment(
		amount,
		user.get_d_token_balance(asset),
		reserve
	)?;

	user.decrease_d_tokens(asset, d_tokens)?;
	reserve.d_token_supply = reserve.d_token_supply.safe_sub(d_tokens)?;
	reserve.increase_pool_balance(amount)?;

	Ok((amount, d_tokens))
}
