#![allow(clippy::too_many_arguments)]
#![allow(clippy::bool_assert_comparison)]

use anchor_lang::prelude::{ msg, Pubkey };

use crate::controller::liquidation::{ AuctionFill, BadDebtResolution };
use crate::controller::token::TokenClient;
use crate::error::{ ErrorCode, PoolResult };
use crate::instructions::*;
use crate::math::borrow_limit::BorrowLimitCalculation;
use crate::state::auction::Auction;
use crate::state::backstop::BackstopDeposit;
use crate::state::clock::Clock;
use crate::state::oracle::PriceOracle;
use crate::state::pool::Pool;
use crate::state::reserve::{ AssetId, InterestRateParams, Reserve };
use crate::state::state::PoolStatus;
use crate::validation::borrow_limit::get_borrow_limit;

pub mod controller;
pub mod error;
pub mod instructions;
pub mod macros;
pub mod math;
pub mod state;
pub mod validation;

#[cfg(test)]
mod test_utils;

/// A lending pool bound to its price feed, token ledger and clock.
///
/// Every mutating entry point runs its handler against a copy of the pool.
/// The copy is committed only if the handler and every token transfer it
/// requested succeed, so a failed call leaves no trace.
pub struct LendingPool<O: PriceOracle, T: TokenClient, C: Clock> {
	address: Pubkey,
	pool: Option<Pool>,
	oracle: O,
	token: T,
	clock: C,
}

impl<O: PriceOracle, T: TokenClient, C: Clock> LendingPool<O, T, C> {
	/// `address` is the account that holds the pool's tokens
	pub fn new(address: Pubkey, oracle: O, token: T, clock: C) -> Self {
		LendingPool {
			address,
			pool: None,
			oracle,
			token,
			clock,
		}
	}

	pub fn address(&self) -> Pubkey {
		self.address
	}

	pub fn oracle_mut(&mut self) -> &mut O {
		&mut self.oracle
	}

	pub fn token(&self) -> &T {
		&self.token
	}

	pub fn token_mut(&mut self) -> &mut T {
		&mut self.token
	}

	pub fn clock_mut(&mut self) -> &mut C {
		&mut self.clock
	}

	pub fn pool(&self) -> PoolResult<&Pool> {
		self.pool.as_ref().ok_or_else(print_error!(ErrorCode::NotInitialized))
	}

	fn transact<R>(
		&mut self,
		handler: impl FnOnce(&mut Pool, &mut Invocation) -> PoolResult<R>
	) -> PoolResult<R> {
		let mut pool = self.pool()?.clone();
		let now = self.clock.unix_timestamp();

		let mut ctx = Invocation::new(self.address, &self.oracle, now);
		let result = handler(&mut pool, &mut ctx)?;

		ctx.transfers.execute(&mut self.token)?;
		self.pool = Some(pool);

		Ok(result)
	}

	// Admin instructions

	pub fn initialize(
		&mut self,
		admin: &Pubkey,
		backstop_threshold: u128,
		backstop_take_rate: u32
	) -> PoolResult {
		validate!(self.pool.is_none(), ErrorCode::AlreadyInitialized, "pool {} is already initialized", self.address)?;

		let now = self.clock.unix_timestamp();
		self.pool = Some(handle_initialize(admin, backstop_threshold, backstop_take_rate, now)?);
		Ok(())
	}

	pub fn set_admin(&mut self, caller: &Pubkey, new_admin: &Pubkey) -> PoolResult {
		self.transact(|pool, ctx| handle_set_admin(pool, ctx, caller, new_admin))
	}

	pub fn set_collateral_factor(
		&mut self,
		caller: &Pubkey,
		rwa_token: &Pubkey,
		collateral_factor: u32
	) -> PoolResult {
		self.transact(|pool, ctx| {
			handle_set_collateral_factor(pool, ctx, caller, rwa_token, collateral_factor)
		})
	}

	pub fn set_interest_rate_params(
		&mut self,
		caller: &Pubkey,
		asset: &AssetId,
		interest_rate_params: InterestRateParams
	) -> PoolResult {
		self.transact(|pool, ctx| {
			handle_set_interest_rate_params(pool, ctx, caller, asset, interest_rate_params)
		})
	}

	pub fn set_pool_state(&mut self, caller: &Pubkey, pool_status: PoolStatus) -> PoolResult {
		self.transact(|pool, ctx| handle_set_pool_state(pool, ctx, caller, pool_status))
	}

	pub fn set_backstop_threshold(&mut self, caller: &Pubkey, backstop_threshold: u128) -> PoolResult {
		self.transact(|pool, ctx| handle_set_backstop_threshold(pool, ctx, caller, backstop_threshold))
	}

	pub fn set_backstop_take_rate(&mut self, caller: &Pubkey, backstop_take_rate: u32) -> PoolResult {
		self.transact(|pool, ctx| handle_set_backstop_take_rate(pool, ctx, caller, backstop_take_rate))
	}

	pub fn set_token_contract(
		&mut self,
		caller: &Pubkey,
		asset: &AssetId,
		token_contract: &Pubkey
	) -> PoolResult {
		self.transact(|pool, ctx| handle_set_token_contract(pool, ctx, caller, asset, token_contract))
	}

	pub fn set_backstop_token(&mut self, caller: &Pubkey, backstop_token: &Pubkey) -> PoolResult {
		self.transact(|pool, ctx| handle_set_backstop_token(pool, ctx, caller, backstop_token))
	}

	pub fn upgrade(&mut self, caller: &Pubkey, code_hash: [u8; 32]) -> PoolResult {
		self.transact(|pool, ctx| handle_upgrade(pool, ctx, caller, code_hash))
	}

	// User instructions

	pub fn deposit(&mut self, lender: &Pubkey, asset: &AssetId, amount: u128) -> PoolResult<u128> {
		self.transact(|pool, ctx| handle_deposit(pool, ctx, lender, asset, amount))
	}

	pub fn withdraw(&mut self, lender: &Pubkey, asset: &AssetId, b_tokens: u128) -> PoolResult<u128> {
		self.transact(|pool, ctx| handle_withdraw(pool, ctx, lender, asset, b_tokens))
	}

	pub fn borrow(&mut self, borrower: &Pubkey, asset: &AssetId, amount: u128) -> PoolResult<u128> {
		self.transact(|pool, ctx| handle_borrow(pool, ctx, borrower, asset, amount))
	}

	pub fn repay(&mut self, borrower: &Pubkey, asset: &AssetId, d_tokens: u128) -> PoolResult<u128> {
		self.transact(|pool, ctx| handle_repay(pool, ctx, borrower, asset, d_tokens))
	}

	pub fn add_collateral(&mut self, borrower: &Pubkey, rwa_token: &Pubkey, amount: u128) -> PoolResult {
		self.transact(|pool, ctx| handle_add_collateral(pool, ctx, borrower, rwa_token, amount))
	}

	pub fn remove_collateral(
		&mut self,
		borrower: &Pubkey,
		rwa_token: &Pubkey,
		amount: u128
	) -> PoolResult {
		self.transact(|pool, ctx| handle_remove_collateral(pool, ctx, borrower, rwa_token, amount))
	}

	// Keeper instructions

	pub fn initiate_liquidation(
		&mut self,
		liquidator: &Pubkey,
		borrower: &Pubkey,
		rwa_token: &Pubkey,
		debt_asset: &AssetId,
		liquidation_percent: u128
	) -> PoolResult<Auction> {
		self.transact(|pool, ctx| {
			handle_initiate_liquidation(
				pool,
				ctx,
				liquidator,
				borrower,
				rwa_token,
				debt_asset,
				liquidation_percent
			)
		})
	}

	pub fn fill_auction(&mut self, filler: &Pubkey, auction_id: u64) -> PoolResult<AuctionFill> {
		self.transact(|pool, ctx| handle_fill_auction(pool, ctx, filler, auction_id))
	}

	pub fn cancel_auction(&mut self, caller: &Pubkey, auction_id: u64) -> PoolResult<Auction> {
		self.transact(|pool, ctx| handle_cancel_auction(pool, ctx, caller, auction_id))
	}

	pub fn handle_bad_debt(&mut self, caller: &Pubkey, borrower: &Pubkey) -> PoolResult<BadDebtResolution> {
		self.transact(|pool, ctx| handle_bad_debt(pool, ctx, caller, borrower))
	}

	pub fn create_bad_debt_auction(
		&mut self,
		caller: &Pubkey,
		asset: &AssetId
	) -> PoolResult<Option<Auction>> {
		self.transact(|pool, ctx| handle_create_bad_debt_auction(pool, ctx, caller, asset))
	}

	pub fn create_interest_auction(&mut self, caller: &Pubkey, asset: &AssetId) -> PoolResult<Auction> {
		self.transact(|pool, ctx| handle_create_interest_auction(pool, ctx, caller, asset))
	}

	// Backstop instructions

	pub fn deposit_to_backstop(&mut self, depositor: &Pubkey, amount: u128) -> PoolResult<u128> {
		self.transact(|pool, ctx| handle_deposit_to_backstop(pool, ctx, depositor, amount))
	}

	pub fn queue_backstop_withdrawal(&mut self, depositor: &Pubkey, shares: u128) -> PoolResult {
		self.transact(|pool, ctx| handle_queue_backstop_withdrawal(pool, ctx, depositor, shares))
	}

	pub fn cancel_backstop_withdrawal(&mut self, depositor: &Pubkey) -> PoolResult {
		self.transact(|pool, ctx| handle_cancel_backstop_withdrawal(pool, ctx, depositor))
	}

	pub fn withdraw_from_backstop(&mut self, depositor: &Pubkey) -> PoolResult<u128> {
		self.transact(|pool, ctx| handle_withdraw_from_backstop(pool, ctx, depositor))
	}

	// Queries

	fn reserve(&self, asset: &AssetId) -> PoolResult<&Reserve> {
		self.pool()?.reserves.get_ref(asset)
	}

	pub fn get_pool_balance(&self, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.reserve(asset)?.pool_balance)
	}

	pub fn get_pool_state(&self) -> PoolResult<PoolStatus> {
		Ok(self.pool()?.state.pool_status)
	}

	pub fn get_b_token_balance(&self, user: &Pubkey, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.pool()?.users.get(user).map_or(0, |positions| positions.get_b_token_balance(asset)))
	}

	pub fn get_b_token_rate(&self, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.reserve(asset)?.b_token_rate)
	}

	pub fn get_b_token_supply(&self, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.reserve(asset)?.b_token_supply)
	}

	pub fn get_d_token_balance(&self, user: &Pubkey, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.pool()?.users.get(user).map_or(0, |positions| positions.get_d_token_balance(asset)))
	}

	pub fn get_d_token_rate(&self, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.reserve(asset)?.d_token_rate)
	}

	pub fn get_d_token_supply(&self, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.reserve(asset)?.d_token_supply)
	}

	pub fn get_collateral(&self, user: &Pubkey, rwa_token: &Pubkey) -> PoolResult<u128> {
		Ok(self.pool()?.users.get(user).map_or(0, |positions| positions.get_collateral(rwa_token)))
	}

	pub fn get_collateral_factor(&self, rwa_token: &Pubkey) -> PoolResult<u32> {
		Ok(self.pool()?.get_collateral_factor(rwa_token))
	}

	/// Annual borrow rate at the stored utilization and rate modifier
	pub fn get_interest_rate(&self, asset: &AssetId) -> PoolResult<u128> {
		self.reserve(asset)?.get_interest_rate()
	}

	pub fn get_utilization(&self, asset: &AssetId) -> PoolResult<u128> {
		self.reserve(asset)?.get_utilization()
	}

	pub fn get_backstop_credit(&self, asset: &AssetId) -> PoolResult<u128> {
		Ok(self.reserve(asset)?.backstop_credit)
	}

	pub fn get_auction(&self, auction_id: u64) -> PoolResult<Auction> {
		self.pool()?.auctions.get_ref(&auction_id).cloned()
	}

	pub fn get_backstop_deposit(&self, depositor: &Pubkey) -> PoolResult<BackstopDeposit> {
		Ok(self.pool()?.backstop.get_deposit(depositor))
	}

	pub fn get_backstop_total(&self) -> PoolResult<u128> {
		Ok(self.pool()?.backstop.total)
	}

	pub fn calculate_borrow_limit(&self, user: &Pubkey) -> PoolResult<BorrowLimitCalculation> {
		get_borrow_limit(self.pool()?, user, &self.oracle, self.clock.unix_timestamp())
	}

	pub fn get_health_factor(&self, user: &Pubkey) -> PoolResult<u128> {
		self.calculate_borrow_limit(user)?.health_factor()
	}
}
