use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;

use crate::controller::token::TokenClient;
use crate::error::{ ErrorCode, PoolResult };
use crate::math::constants::SCALAR_7;
use crate::state::clock::Clock;
use crate::state::oracle::{ OracleAsset, OraclePriceData, PriceOracle };
use crate::state::pool::Pool;
use crate::state::reserve::AssetId;
use crate::state::state::{ PoolStatus, State };

pub const TEST_ORACLE_DECIMALS: u32 = 7;

/// In memory price feed. Prices are quoted with `TEST_ORACLE_DECIMALS`.
#[derive(Clone, Debug, Default)]
pub struct TestOracle {
	pub prices: BTreeMap<OracleAsset, OraclePriceData>,
	pub decimals: Option<u32>,
}

impl TestOracle {
	pub fn new() -> TestOracle {
		TestOracle {
			prices: BTreeMap::new(),
			decimals: Some(TEST_ORACLE_DECIMALS),
		}
	}

	pub fn set_price(&mut self, asset: OracleAsset, price: i128, timestamp: i64) {
		self.prices.insert(asset, OraclePriceData { price, timestamp });
	}

	pub fn set_token_price(&mut self, token: &Pubkey, price: i128, timestamp: i64) {
		self.set_price(OracleAsset::Token(*token), price, timestamp);
	}

	pub fn set_asset_price(&mut self, asset: &AssetId, price: i128, timestamp: i64) {
		self.set_price(OracleAsset::Symbol(*asset), price, timestamp);
	}
}

impl PriceOracle for TestOracle {
	fn get_price(&self, asset: &OracleAsset) -> PoolResult<OraclePriceData> {
		self.prices.get(asset).copied().ok_or(ErrorCode::AssetNotFoundInOracle)
	}

	fn decimals(&self) -> PoolResult<u32> {
		self.decimals.ok_or(ErrorCode::OracleDecimalsFetchFailed)
	}
}

/// Token balances keyed by (token, owner)
#[derive(Clone, Debug, Default)]
pub struct TestTokenClient {
	pub balances: BTreeMap<(Pubkey, Pubkey), u128>,
}

impl TestTokenClient {
	pub fn mint(&mut self, token: &Pubkey, owner: &Pubkey, amount: u128) {
		*self.balances.entry((*token, *owner)).or_insert(0) += amount;
	}

	pub fn balance(&self, token: &Pubkey, owner: &Pubkey) -> u128 {
		self.balances.get(&(*token, *owner)).copied().unwrap_or(0)
	}
}

impl TokenClient for TestTokenClient {
	fn transfer(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> PoolResult {
		let from_balance = self.balance(token, from);
		if from_balance < amount {
			return Err(ErrorCode::TokenTransferFailed);
		}
		self.balances.insert((*token, *from), from_balance - amount);
		self.mint(token, to, amount);
		Ok(())
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TestClock {
	pub now: i64,
}

impl TestClock {
	pub fn new(now: i64) -> TestClock {
		TestClock { now }
	}

	pub fn advance(&mut self, seconds: i64) {
		self.now += seconds;
	}
}

impl Clock for TestClock {
	fn unix_timestamp(&self) -> i64 {
		self.now
	}
}

/// One dollar at `TEST_ORACLE_DECIMALS`
pub const ONE_DOLLAR: i128 = SCALAR_7 as i128;

/// Active pool with one reserve for `asset` backed by `token`, created at `now`
pub fn active_pool(admin: &Pubkey, asset: &AssetId, token: &Pubkey, now: i64) -> Pool {
	let mut state = State::new(*admin, 0, 1_000_000);
	state.pool_status = PoolStatus::Active;

	let mut pool = Pool::new(state);
	pool.reserves.get_or_create_mut(asset, now).token_contract = Some(*token);
	pool
}
