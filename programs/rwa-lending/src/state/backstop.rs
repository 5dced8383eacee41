use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::safe_math::SafeMath;
use crate::state::reserve::AssetId;
use crate::validate;


#[derive(
	Clone,
	Copy,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct BackstopDeposit {
	/// backstop shares, redeemable pro rata against `Backstop::total`
	pub shares: u128,
	pub deposited_at: i64,
	pub in_withdrawal_queue: bool,
	pub queued_at: i64,
}

#[derive(
	Clone,
	Copy,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct WithdrawalRequest {
	pub depositor: Pubkey,
	pub shares: u128,
	pub queued_at: i64,
}

/// Insurance fund absorbing losses the reserves cannot.
#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct Backstop {
	/// backstop tokens held by the pool
	pub total: u128,
	pub total_shares: u128,
	pub deposits: BTreeMap<Pubkey, BackstopDeposit>,
	/// pending exits in the order they were queued
	pub withdrawal_queue: Vec<WithdrawalRequest>,
	/// dTokens of defaulted accounts taken over by the backstop
	pub d_tokens: BTreeMap<AssetId, u128>,
}

impl Backstop {
	pub fn get_deposit(&self, depositor: &Pubkey) -> BackstopDeposit {
		self.deposits.get(depositor).copied().unwrap_or_default()
	}

	pub fn get_d_token_balance(&self, asset: &AssetId) -> u128 {
		self.d_tokens.get(asset).copied().unwrap_or(0)
	}

	pub fn increase_total(&mut self, amount: u128) -> PoolResult {
		self.total = self.total.safe_add(amount)?;
		Ok(())
	}

	/// Takes up to `amount` out of the backstop, returning what was taken
	pub fn decrease_total(&mut self, amount: u128) -> PoolResult<u128> {
		let taken = amount.min(self.total);
		self.total = self.total.safe_sub(taken)?;
		Ok(taken)
	}

	pub fn increase_d_tokens(&mut self, asset: &AssetId, delta: u128) -> PoolResult {
		let balance = self.d_tokens.entry(*asset).or_insert(0);
		*balance = balance.safe_add(delta)?;
		Ok(())
	}

	pub fn decrease_d_tokens(&mut self, asset: &AssetId, delta: u128) -> PoolResult {
		let balance = self.d_tokens.entry(*asset).or_insert(0);
		validate!(
			*balance >= delta,
			ErrorCode::InsufficientDTokenBalance,
			"backstop {} dToken balance {} < {}",
			asset,
			balance,
			delta
		)?;
		*balance = balance.safe_sub(delta)?;
		Ok(())
	}

	pub fn get_request(&self, depositor: &Pubkey) -> Option<&WithdrawalRequest> {
		self.withdrawal_queue.iter().find(|request| request.depositor == *depositor)
	}

	pub fn remove_request(&mut self, depositor: &Pubkey) -> Option<WithdrawalRequest> {
		let index = self.withdrawal_queue
			.iter()
			.position(|request| request.depositor == *depositor)?;
		Some(self.withdrawal_queue.remove(index))
	}
}
