use std::fmt;

use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::balance::{ get_token_amount_floor, BalanceType };
use crate::math::constants::{ SCALAR_12, SCALAR_7, SCALAR_7_U32 };
use crate::math::interest::{ calculate_interest_rate, calculate_utilization };
use crate::math::safe_math::SafeMath;
use crate::validate;


pub const ASSET_ID_LENGTH: usize = 16;

/// Identifier of a lendable asset, stored as a zero padded symbol.
#[derive(
	Clone,
	Copy,
	Default,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct AssetId(pub [u8; ASSET_ID_LENGTH]);

impl AssetId {
	/// Symbols longer than 16 bytes are truncated.
	pub fn from_symbol(symbol: &str) -> AssetId {
		let mut bytes = [0_u8; ASSET_ID_LENGTH];
		for (i, b) in symbol.bytes().take(ASSET_ID_LENGTH).enumerate() {
			bytes[i] = b;
		}
		AssetId(bytes)
	}

	pub fn symbol(&self) -> String {
		let end = self.0
			.iter()
			.rposition(|b| *b != 0)
			.map_or(0, |i| i + 1);
		String::from_utf8_lossy(&self.0[..end]).into_owned()
	}
}

impl fmt::Display for AssetId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.symbol())
	}
}

impl fmt::Debug for AssetId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "AssetId({})", self.symbol())
	}
}

/// Kinked utilization curve. All values use SCALAR_7 precision.
#[derive(
	Clone,
	Copy,
	Debug,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct InterestRateParams {
	/// annual rate applied at or below target utilization
	pub base_rate: u32,
	/// rate added across the first band above target
	pub slope_1: u32,
	pub slope_2: u32,
	pub slope_3: u32,
	pub target_utilization: u32,
	/// speed at which the rate modifier reacts to utilization drift
	pub reactivity_constant: u32,
}

impl Default for InterestRateParams {
	fn default() -> Self {
		InterestRateParams {
			base_rate: 100_000, // 1%
			slope_1: 500_000, // 5%
			slope_2: 5_000_000, // 50%
			slope_3: 15_000_000, // 150%
			target_utilization: 7_500_000, // 75%
			reactivity_constant: 200,
		}
	}
}

impl InterestRateParams {
	pub fn validate(&self) -> PoolResult {
		validate!(
			self.target_utilization > 0 && self.target_utilization < SCALAR_7_U32,
			ErrorCode::InvalidUtilizationRatio,
			"target utilization {} must be within (0, {})",
			self.target_utilization,
			SCALAR_7_U32
		)?;

		validate!(
			(SCALAR_7_U32 - self.target_utilization) / 3 > 0,
			ErrorCode::InvalidUtilizationRatio,
			"target utilization {} leaves no room for the rate bands",
			self.target_utilization
		)?;

		validate!(
			self.slope_1 <= self.slope_2 && self.slope_2 <= self.slope_3,
			ErrorCode::InvalidInterestRateParams,
			"slopes must be non-decreasing: {} {} {}",
			self.slope_1,
			self.slope_2,
			self.slope_3
		)?;

		Ok(())
	}
}

/// Per-asset ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct Reserve {
	pub asset: AssetId,
	pub token_contract: Option<Pubkey>,
	/// liquid balance held by the pool
	pub pool_balance: u128,
	pub b_token_supply: u128,
	/// precision: SCALAR_12
	pub b_token_rate: u128,
	pub d_token_supply: u128,
	/// precision: SCALAR_12
	pub d_token_rate: u128,
	pub interest_rate_params: InterestRateParams,
	/// precision: SCALAR_7, bounded to [0.1, 10]
	pub rate_modifier: u128,
	pub last_accrual_time: i64,
	/// interest owed to the backstop, in asset units
	pub backstop_credit: u128,
}

impl Reserve {
	pub fn new(asset: AssetId, now: i64) -> Reserve {
		Reserve {
			asset,
			token_contract: None,
			pool_balance: 0,
			b_token_supply: 0,
			b_token_rate: SCALAR_12,
			d_token_supply: 0,
			d_token_rate: SCALAR_12,
			interest_rate_params: InterestRateParams::default(),
			rate_modifier: SCALAR_7,
			last_accrual_time: now,
			backstop_credit: 0,
		}
	}

	#[track_caller]
	pub fn get_token_contract(&self) -> PoolResult<Pubkey> {
		self.token_contract.ok_or_else(|| {
			let caller = std::panic::Location::caller();
			msg!(
				"Token contract not set for {} at {}:{}",
				self.asset,
				caller.file(),
				caller.line()
			);
			ErrorCode::TokenContractNotSet
		})
	}

	/// Value owed to lenders, rounded down
	pub fn get_total_supply(&self) -> PoolResult<u128> {
		get_token_amount_floor(self.b_token_supply, self, &BalanceType::Supply)
	}

	/// Value owed by borrowers, rounded down
	pub fn get_total_liabilities(&self) -> PoolResult<u128> {
		get_token_amount_floor(self.d_token_supply, self, &BalanceType::Debt)
	}

	pub fn get_utilization(&self) -> PoolResult<u128> {
		calculate_utilization(self.get_total_liabilities()?, self.pool_balance)
	}

	/// Current annual borrow rate including the rate modifier
	pub fn get_interest_rate(&self) -> PoolResult<u128> {
		calculate_interest_rate(
			self.get_utilization()?,
			&self.interest_rate_params,
			self.rate_modifier
		)
	}

	pub fn increase_pool_balance(&mut self, amount: u128) -> PoolResult {
		self.pool_balance = self.pool_balance.safe_add(amount)?;
		Ok(())
	}

	pub fn decrease_pool_balance(&mut self, amount: u128) -> PoolResult {
		validate!(
			self.pool_balance >= amount,
			ErrorCode::InsufficientPoolBalance,
			"{} pool balance {} < {}",
			self.asset,
			self.pool_balance,
			amount
		)?;
		self.pool_balance = self.pool_balance.safe_sub(amount)?;
		Ok(())
	}

	/// `floor(b_supply * b_rate) <= pool_balance + floor(d_supply * d_rate) - backstop_credit`
	pub fn is_solvent(&self) -> PoolResult<bool> {
		let assets = self.pool_balance.safe_add(self.get_total_liabilities()?)?;
		Ok(
			assets >= self.backstop_credit &&
				self.get_total_supply()? <= assets.safe_sub(self.backstop_credit)?
		)
	}
}
