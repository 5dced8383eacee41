use anchor_lang::prelude::*;

use crate::controller::balance::{
	update_balances_for_borrow,
	update_balances_for_deposit,
	update_balances_for_repayment,
	update_balances_for_withdrawal,
};
use crate::controller::collateral::{ add_collateral, remove_collateral };
use crate::controller::interest::update_reserve_interest;
use crate::error::PoolResult;
use crate::instructions::context::Invocation;
use crate::state::events::{ BalanceAction, BalanceRecord, CollateralAction, CollateralRecord };
use crate::state::paused_operations::PoolOperation;
use crate::state::pool::Pool;
use crate::state::reserve::AssetId;
use crate::validation::amount::validate_amount;
use crate::validation::borrow_limit::{ validate_borrow, validate_collateral_removal };

fn emit_balance_record(
	pool: &Pool,
	ctx: &Invocation,
	user: &Pubkey,
	asset: &AssetId,
	action: BalanceAction,
	amount: u128,
	tokens: u128
) -> PoolResult {
	let reserve = pool.reserves.get_ref(asset)?;
	let token_rate = match action {
		BalanceAction::Deposit | BalanceAction::Withdraw => reserve.b_token_rate,
		BalanceAction::Borrow | BalanceAction::Repay => reserve.d_token_rate,
	};

	emit!(BalanceRecord {
		ts: ctx.now,
		user: *user,
		action,
		asset: *asset,
		amount,
		tokens,
		token_rate,
		pool_balance_after: reserve.pool_balance,
	});

	Ok(())
}

/// Returns the bTokens minted
pub fn handle_deposit(
	pool: &mut Pool,
	ctx: &mut Invocation,
	lender: &Pubkey,
	asset: &AssetId,
	amount: u128
) -> PoolResult<u128> {
	pool.state.validate_operation(PoolOperation::Deposit)?;
	validate_amount(amount)?;

	let token = pool.reserves.get_ref(asset)?.get_token_contract()?;
	update_reserve_interest(pool, asset, ctx.now)?;

	let b_tokens = update_balances_for_deposit(pool, lender, asset, amount)?;
	ctx.transfers.receive(&token, lender, amount);

	emit_balance_record(pool, ctx, lender, asset, BalanceAction::Deposit, amount, b_tokens)?;

	Ok(b_tokens)
}

/// Returns the asset amount paid out
pub fn handle_withdraw(
	pool: &mut Pool,
	ctx: &mut Invocation,
	lender: &Pubkey,
	asset: &AssetId,
	b_tokens: u128
) -> PoolResult<u128> {
	pool.state.validate_operation(PoolOperation::Withdraw)?;
	validate_amount(b_tokens)?;

	let token = pool.reserves.get_ref(asset)?.get_token_contract()?;
	update_reserve_interest(pool, asset, ctx.now)?;

	let amount = update_balances_for_withdrawal(pool, lender, asset, b_tokens)?;
	ctx.transfers.send_from_pool(&token, lender, amount);

	emit_balance_record(pool, ctx, lender, asset, BalanceAction::Withdraw, amount, b_tokens)?;

	Ok(amount)
}

/// Returns the amount borrowed
pub fn handle_borrow(
	pool: &mut Pool,
	ctx: &mut Invocation,
	borrower: &Pubkey,
	asset: &AssetId,
	amount: u128
) -> PoolResult<u128> {
	pool.state.validate_operation(PoolOperation::Borrow)?;
	validate_amount(amount)?;

	let token = pool.reserves.get_ref(asset)?.get_token_contract()?;
	update_reserve_interest(pool, asset, ctx.now)?;

	validate_borrow(pool, borrower, asset, amount, ctx.oracle, ctx.now)?;

	let d_tokens = update_balances_for_borrow(pool, borrower, asset, amount)?;
	ctx.transfers.send_from_pool(&token, borrower, amount);

	emit_balance_record(pool, ctx, borrower, asset, BalanceAction::Borrow, amount, d_tokens)?;

	Ok(amount)
}

/// Returns the asset amount taken from the borrower
pub fn handle_repay(
	pool: &mut Pool,
	ctx: &mut Invocation,
	borrower: &Pubkey,
	asset: &AssetId,
	d_tokens: u128
) -> PoolResult<u128> {
	pool.state.validate_operation(PoolOperation::Repay)?;
	validate_amount(d_tokens)?;

	let token = pool.reserves.get_ref(asset)?.get_token_contract()?;
	update_reserve_interest(pool, asset, ctx.now)?;

	let amount = update_balances_for_repayment(pool, borrower, asset, d_tokens)?;
	ctx.transfers.receive(&token, borrower, amount);

	emit_balance_record(pool, ctx, borrower, asset, BalanceAction::Repay, amount, d_tokens)?;

	Ok(amount)
}

pub fn handle_add_collateral(
	pool: &mut Pool,
	ctx: &mut Invocation,
	borrower: &Pubkey,
	rwa_token: &Pubkey,
	amount: u128
) -> PoolResult {
	pool.state.validate_operation(PoolOperation::AddCollateral)?;
	validate_amount(amount)?;

	let collateral_after = add_collateral(pool, borrower, rwa_token, amount)?;
	ctx.transfers.receive(rwa_token, borrower, amount);

	emit!(CollateralRecord {
		ts: ctx.now,
		user: *borrower,
		action: CollateralAction::Add,
		rwa_token: *rwa_token,
		amount,
		collateral_after,
	});

	Ok(())
}

pub fn handle_remove_collateral(
	pool: &mut Pool,
	ctx: &mut Invocation,
	borrower: &Pubkey,
	rwa_token: &Pubkey,
	amount: u128
) -> PoolResult {
	pool.state.validate_operation(PoolOperation::RemoveCollateral)?;
	validate_amount(amount)?;

	let debt_asset = pool.users.get(borrower).and_then(|user| user.debt_asset);
	if let Some(debt_asset) = debt_asset {
		update_reserve_interest(pool, &debt_asset, ctx.now)?;
	}

	let collateral_after = remove_collateral(pool, borrower, rwa_token, amount)?;
	validate_collateral_removal(pool, borrower, ctx.oracle, ctx.now)?;

	ctx.transfers.send_from_pool(rwa_token, borrower, amount);

	emit!(CollateralRecord {
		ts: ctx.now,
		user: *borrower,
		action: CollateralAction::Remove,
		rwa_token: *rwa_token,
		amount,
		collateral_after,
	});

	Ok(())
}
