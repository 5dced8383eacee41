use std::collections::BTreeMap;
use std::panic::Location;

use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::state::reserve::AssetId;

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
pub enum AuctionType {
	#[default]
	/// selling a borrower's collateral to repay their debt
	UserLiquidation,
	/// selling backstop tokens to repay debt the backstop took over
	BadDebt,
	/// selling accrued backstop credit for backstop tokens
	Interest,
}

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
pub enum AuctionStatus {
	#[default]
	Active,
	Filled,
	Cancelled,
}

/// A Dutch auction. `lot` is what the filler receives, `bid` what the filler
/// pays, both before the time based modifiers are applied.
#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct Auction {
	pub id: u64,
	pub auction_type: AuctionType,
	/// liquidated account, or the pool itself for interest auctions
	pub borrower: Pubkey,
	/// token the lot is paid in (the backstop token for bad debt auctions)
	pub rwa_token: Pubkey,
	pub debt_asset: AssetId,
	pub lot: u128,
	pub bid: u128,
	pub started_at: i64,
	pub status: AuctionStatus,
}

impl Auction {
	pub fn is_active(&self) -> bool {
		self.status == AuctionStatus::Active
	}

	pub fn is_for(&self, borrower: &Pubkey, rwa_token: &Pubkey, debt_asset: &AssetId) -> bool {
		self.borrower == *borrower && self.rwa_token == *rwa_token && self.debt_asset == *debt_asset
	}
}

#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct AuctionMap(pub BTreeMap<u64, Auction>);

impl AuctionMap {
	#[track_caller]
	#[inline(always)]
	pub fn get_ref(&self, auction_id: &u64) -> PoolResult<&Auction> {
		match self.0.get(auction_id) {
			Some(auction) => Ok(auction),
			None => {
				let caller = Location::caller();
				msg!(
					"Could not find auction {} at {}:{}",
					auction_id,
					caller.file(),
					caller.line()
				);
				Err(ErrorCode::AuctionNotFound)
			}
		}
	}

	#[track_caller]
	#[inline(always)]
	pub fn get_ref_mut(&mut self, auction_id: &u64) -> PoolResult<&mut Auction> {
		match self.0.get_mut(auction_id) {
			Some(auction) => Ok(auction),
			None => {
				let caller = Location::caller();
				msg!(
					"Could not find auction {} at {}:{}",
					auction_id,
					caller.file(),
					caller.line()
				);
				Err(ErrorCode::AuctionNotFound)
			}
		}
	}

	pub fn find_active(
		&self,
		auction_type: &AuctionType,
		borrower: &Pubkey,
		rwa_token: &Pubkey,
		debt_asset: &AssetId
	) -> Option<&Auction> {
		self.0
			.values()
			.find(|auction| {
				auction.is_active() &&
					auction.auction_type == *auction_type &&
					auction.is_for(borrower, rwa_token, debt_asset)
			})
	}

	/// Whether any active auction is seizing `rwa_token` from `borrower`
	pub fn is_collateral_locked(&self, borrower: &Pubkey, rwa_token: &Pubkey) -> bool {
		self.0
			.values()
			.any(
				|auction|
					auction.is_active() &&
					auction.auction_type == AuctionType::UserLiquidation &&
					auction.borrower == *borrower &&
					auction.rwa_token == *rwa_token
			)
	}

	pub fn insert(&mut self, auction: Auction) {
		self.0.insert(auction.id, auction);
	}
}
