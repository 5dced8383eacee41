use anchor_lang::prelude::*;

use crate::controller::backstop::{
	add_backstop_deposit,
	cancel_backstop_withdrawal_request,
	remove_backstop_deposit,
	request_backstop_withdrawal,
};
use crate::error::PoolResult;
use crate::instructions::context::Invocation;
use crate::state::events::{ BackstopAction, BackstopRecord };
use crate::state::paused_operations::PoolOperation;
use crate::state::pool::Pool;
use crate::state::state::PoolStatus;
use crate::validation::amount::validate_amount;

fn emit_backstop_record(
	pool: &Pool,
	ctx: &Invocation,
	depositor: &Pubkey,
	action: BackstopAction,
	amount: u128,
	shares: u128
) {
	emit!(BackstopRecord {
		ts: ctx.now,
		depositor: *depositor,
		action,
		amount,
		shares,
		backstop_total_after: pool.backstop.total,
		total_shares_after: pool.backstop.total_shares,
	});
}

/// Returns the shares minted
pub fn handle_deposit_to_backstop(
	pool: &mut Pool,
	ctx: &mut Invocation,
	depositor: &Pubkey,
	amount: u128
) -> PoolResult<u128> {
	pool.state.validate_operation(PoolOperation::Backstop)?;
	validate_amount(amount)?;

	let backstop_token = pool.state.get_backstop_token()?;

	let shares = add_backstop_deposit(&mut pool.backstop, depositor, amount, ctx.now)?;
	ctx.transfers.receive(&backstop_token, depositor, amount);

	emit_backstop_record(pool, ctx, depositor, BackstopAction::Deposit, amount, shares);

	Ok(shares)
}

pub fn handle_queue_backstop_withdrawal(
	pool: &mut Pool,
	ctx: &mut Invocation,
	depositor: &Pubkey,
	shares: u128
) -> PoolResult {
	pool.state.validate_operation(PoolOperation::Backstop)?;

	request_backstop_withdrawal(&mut pool.backstop, depositor, shares, ctx.now)?;

	emit_backstop_record(pool, ctx, depositor, BackstopAction::QueueWithdrawal, 0, shares);

	Ok(())
}

pub fn handle_cancel_backstop_withdrawal(
	pool: &mut Pool,
	ctx: &mut Invocation,
	depositor: &Pubkey
) -> PoolResult {
	pool.state.validate_operation(PoolOperation::Backstop)?;

	let shares = cancel_backstop_withdrawal_request(&mut pool.backstop, depositor)?;

	emit_backstop_record(pool, ctx, depositor, BackstopAction::CancelWithdrawal, 0, shares);

	Ok(())
}

/// Pays out an expired withdrawal request. An active pool whose backstop
/// drops below the threshold is put on ice.
pub fn handle_withdraw_from_backstop(
	pool: &mut Pool,
	ctx: &mut Invocation,
	depositor: &Pubkey
) -> PoolResult<u128> {
	pool.state.validate_operation(PoolOperation::Backstop)?;

	let backstop_token = pool.state.get_backstop_token()?;

	let (amount, shares) = remove_backstop_deposit(&mut pool.backstop, depositor, ctx.now)?;
	ctx.transfers.send_from_pool(&backstop_token, depositor, amount);

	if pool.state.pool_status == PoolStatus::Active &&
		pool.backstop.total < pool.state.backstop_threshold
	{
		msg!(
			"backstop total {} below threshold {}, pool status: {:?} -> {:?}",
			pool.backstop.total,
			pool.state.backstop_threshold,
			pool.state.pool_status,
			PoolStatus::OnIce
		);
		pool.state.pool_status = PoolStatus::OnIce;
	}

	emit_backstop_record(pool, ctx, depositor, BackstopAction::Withdraw, amount, shares);

	Ok(amount)
}
