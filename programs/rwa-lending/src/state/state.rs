use anchor_lang::prelude::*;
use enumflags2::BitFlags;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::constants::SCALAR_7_U32;
use crate::state::paused_operations::PoolOperation;
use crate::validate;

#[cfg(test)]
mod tests;

#[derive(
	Clone,
	Copy,
	AnchorSerialize,
	AnchorDeserialize,
	PartialEq,
	Debug,
	Eq,
	Default
)]
pub enum PoolStatus {
	/// every operation is allowed
	Active,
	/// only operations that reduce risk are allowed
	#[default]
	OnIce,
	/// only admin actions are allowed
	Frozen,
}

impl PoolStatus {
	pub fn allowed_operations(&self) -> BitFlags<PoolOperation> {
		match self {
			PoolStatus::Active => BitFlags::all(),
			PoolStatus::OnIce => PoolOperation::risk_reducing(),
			PoolStatus::Frozen => BitFlags::empty(),
		}
	}

	pub fn is_operation_allowed(&self, operation: PoolOperation) -> bool {
		self.allowed_operations().contains(operation)
	}

	pub fn validate_operation(&self, operation: PoolOperation) -> PoolResult {
		if self.is_operation_allowed(operation) {
			return Ok(());
		}

		msg!("{:?} is not allowed while the pool is {:?}", operation, self);
		PoolOperation::log_all_operations_allowed(self.allowed_operations());

		match self {
			PoolStatus::Frozen => Err(ErrorCode::PoolFrozen),
			_ => Err(ErrorCode::PoolOnIce),
		}
	}
}

/// Pool wide configuration.
#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct State {
	pub admin: Pubkey,
	pub pool_status: PoolStatus,
	/// backstop tokens required before the pool can be activated
	pub backstop_threshold: u128,
	/// share of interest routed to the backstop, precision: SCALAR_7
	pub backstop_take_rate: u32,
	pub backstop_token: Option<Pubkey>,
	pub next_auction_id: u64,
	/// hash of the last code upgrade
	pub code_hash: [u8; 32],
}

impl State {
	pub fn new(admin: Pubkey, backstop_threshold: u128, backstop_take_rate: u32) -> State {
		State {
			admin,
			pool_status: PoolStatus::OnIce,
			backstop_threshold,
			backstop_take_rate,
			backstop_token: None,
			next_auction_id: 1,
			code_hash: [0; 32],
		}
	}

	pub fn validate_admin(&self, caller: &Pubkey) -> PoolResult {
		validate!(
			*caller == self.admin,
			ErrorCode::NotAuthorized,
			"{} is not the pool admin",
			caller
		)
	}

	pub fn validate_operation(&self, operation: PoolOperation) -> PoolResult {
		self.pool_status.validate_operation(operation)
	}

	#[track_caller]
	pub fn get_backstop_token(&self) -> PoolResult<Pubkey> {
		self.backstop_token.ok_or_else(|| {
			let caller = std::panic::Location::caller();
			msg!("Backstop token not set at {}:{}", caller.file(), caller.line());
			ErrorCode::TokenContractNotSet
		})
	}
}

pub fn validate_backstop_take_rate(backstop_take_rate: u32) -> PoolResult {
	validate!(
		backstop_take_rate <= SCALAR_7_U32,
		ErrorCode::InvalidInterestRateParams,
		"backstop take rate {} exceeds 100%",
		backstop_take_rate
	)
}
