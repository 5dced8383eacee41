use std::collections::BTreeMap;
use std::panic::Location;

use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::state::reserve::{ AssetId, Reserve };

#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct ReserveMap(pub BTreeMap<AssetId, Reserve>);

impl ReserveMap {
	#[track_caller]
	#[inline(always)]
	pub fn get_ref(&self, asset: &AssetId) -> PoolResult<&Reserve> {
		match self.0.get(asset) {
			Some(reserve) => Ok(reserve),
			None => {
				let caller = Location::caller();
				msg!("Could not find reserve {} at {}:{}", asset, caller.file(), caller.line());
				Err(ErrorCode::ReserveNotFound)
			}
		}
	}

	#[track_caller]
	#[inline(always)]
	pub fn get_ref_mut(&mut self, asset: &AssetId) -> PoolResult<&mut Reserve> {
		match self.0.get_mut(asset) {
			Some(reserve) => Ok(reserve),
			None => {
				let caller = Location::caller();
				msg!("Could not find reserve {} at {}:{}", asset, caller.file(), caller.line());
				Err(ErrorCode::ReserveNotFound)
			}
		}
	}

	/// Returns the reserve for `asset`, creating it with default params
	pub fn get_or_create_mut(&mut self, asset: &AssetId, now: i64) -> &mut Reserve {
		self.0.entry(*asset).or_insert_with(|| {
			msg!("Creating reserve {}", asset);
			Reserve::new(*asset, now)
		})
	}
}
