use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::constants::BPS_PRECISION_U32;
use crate::state::auction::AuctionMap;
use crate::state::backstop::Backstop;
use crate::state::reserve_map::ReserveMap;
use crate::state::state::State;
use crate::state::user::UserMap;
use crate::validate;

/// Everything one lending pool owns. Entry points operate on a working copy
/// and the copy replaces the committed pool only when the call succeeds.
#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct Pool {
	pub state: State,
	pub reserves: ReserveMap,
	pub users: UserMap,
	/// basis points of collateral value counted toward the borrow limit
	pub collateral_factors: BTreeMap<Pubkey, u32>,
	pub auctions: AuctionMap,
	pub backstop: Backstop,
}

impl Pool {
	pub fn new(state: State) -> Pool {
		Pool {
			state,
			..Pool::default()
		}
	}

	pub fn get_collateral_factor(&self, rwa_token: &Pubkey) -> u32 {
		self.collateral_factors.get(rwa_token).copied().unwrap_or(0)
	}

	pub fn set_collateral_factor(&mut self, rwa_token: &Pubkey, collateral_factor: u32) -> PoolResult {
		validate!(
			collateral_factor <= BPS_PRECISION_U32,
			ErrorCode::InvalidCollateralFactor,
			"collateral factor {} exceeds {}",
			collateral_factor,
			BPS_PRECISION_U32
		)?;
		self.collateral_factors.insert(*rwa_token, collateral_factor);
		Ok(())
	}
}
