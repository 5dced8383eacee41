use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::backstop::{ backstop_shares_to_amount, amount_to_backstop_shares };
use crate::math::constants::BACKSTOP_WITHDRAWAL_QUEUE_SECONDS;
use crate::math::safe_math::SafeMath;
use crate::state::backstop::{ Backstop, BackstopDeposit, WithdrawalRequest };
use crate::validate;

#[cfg(test)]
mod tests;

/// Returns the shares minted
pub fn add_backstop_deposit(
	backstop: &mut Backstop,
	depositor: &Pubkey,
	amount: u128,
	now: i64
) -> PoolResult<u128> {
	validate!(
		!(backstop.total == 0 && backstop.total_shares != 0),
		ErrorCode::InsufficientBackstopDeposit,
		"Backstop balance should be non-zero for new depositors to enter"
	)?;

	let shares = amount_to_backstop_shares(amount, backstop.total_shares, backstop.total)?;
	validate!(
		shares > 0,
		ErrorCode::InsufficientDepositAmount,
		"backstop deposit of {} mints no shares",
		amount
	)?;

	let deposit = backstop.deposits.entry(*depositor).or_insert_with(BackstopDeposit::default);
	deposit.shares = deposit.shares.safe_add(shares)?;
	deposit.deposited_at = now;

	backstop.total_shares = backstop.total_shares.safe_add(shares)?;
	backstop.increase_total(amount)?;

	Ok(shares)
}

pub fn request_backstop_withdrawal(
	backstop: &mut Backstop,
	depositor: &Pubkey,
	shares: u128,
	now: i64
) -> PoolResult {
	let deposit = match backstop.deposits.get_mut(depositor) {
		Some(deposit) if deposit.shares > 0 => deposit,
		_ => {
			msg!("{} has no backstop deposit", depositor);
			return Err(ErrorCode::InsufficientBackstopDeposit);
		}
	};

	validate!(
		!deposit.in_withdrawal_queue,
		ErrorCode::WithdrawalQueueActive,
		"{} already has a queued withdrawal",
		depositor
	)?;

	validate!(
		shares > 0 && shares <= deposit.shares,
		ErrorCode::InsufficientWithdrawalBalance,
		"cannot queue {} of {} shares",
		shares,
		deposit.shares
	)?;

	deposit.in_withdrawal_queue = true;
	deposit.queued_at = now;

	backstop.withdrawal_queue.push(WithdrawalRequest {
		depositor: *depositor,
		shares,
		queued_at: now,
	});

	Ok(())
}

/// Returns the shares that were queued
pub fn cancel_backstop_withdrawal_request(
	backstop: &mut Backstop,
	depositor: &Pubkey
) -> PoolResult<u128> {
	let request = backstop.remove_request(depositor).ok_or_else(|| {
		msg!("{} has no queued withdrawal", depositor);
		ErrorCode::WithdrawalNotQueued
	})?;

	if let Some(deposit) = backstop.deposits.get_mut(depositor) {
		deposit.in_withdrawal_queue = false;
		deposit.queued_at = 0;
	}

	Ok(request.shares)
}

/// Redeems an expired request. Returns (backstop tokens paid out, shares burnt).
pub fn remove_backstop_deposit(
	backstop: &mut Backstop,
	depositor: &Pubkey,
	now: i64
) -> PoolResult<(u128, u128)> {
	let request = *backstop.get_request(depositor).ok_or_else(|| {
		msg!("{} has no queued withdrawal", depositor);
		ErrorCode::WithdrawalNotQueued
	})?;

	let unlocks_at = request.queued_at.safe_add(BACKSTOP_WITHDRAWAL_QUEUE_SECONDS)?;
	validate!(
		now >= unlocks_at,
		ErrorCode::WithdrawalQueueNotExpired,
		"withdrawal for {} unlocks at {} (now {})",
		depositor,
		unlocks_at,
		now
	)?;

	let amount = backstop_shares_to_amount(
		request.shares,
		backstop.total_shares,
		backstop.total
	)?;

	let deposit = backstop.deposits.get_mut(depositor).ok_or(ErrorCode::InsufficientBackstopDeposit)?;
	deposit.shares = deposit.shares.safe_sub(request.shares)?;
	deposit.in_withdrawal_queue = false;
	deposit.queued_at = 0;

	backstop.remove_request(depositor);
	backstop.total_shares = backstop.total_shares.safe_sub(request.shares)?;
	backstop.total = backstop.total.safe_sub(amount)?;

	Ok((amount, request.shares))
}
