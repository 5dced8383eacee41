use anchor_lang::prelude::*;

use crate::controller::interest::update_reserve_interest;
use crate::controller::liquidation::{
	cancel_auction,
	create_bad_debt_auction,
	create_interest_auction,
	create_user_liquidation_auction,
	fill_auction,
	resolve_bad_debt,
	validate_liquidation_request,
	AuctionFill,
	BadDebtResolution,
};
use crate::error::PoolResult;
use crate::instructions::context::Invocation;
use crate::state::auction::Auction;
use crate::state::events::{ AuctionAction, AuctionRecord, BadDebtRecord };
use crate::state::paused_operations::PoolOperation;
use crate::state::pool::Pool;
use crate::state::reserve::AssetId;

fn emit_auction_record(
	ctx: &Invocation,
	auction: &Auction,
	action: AuctionAction,
	filler: &Pubkey,
	lot: u128,
	bid: u128
) {
	emit!(AuctionRecord {
		ts: ctx.now,
		auction_id: auction.id,
		auction_type: auction.auction_type,
		action,
		borrower: auction.borrower,
		rwa_token: auction.rwa_token,
		debt_asset: auction.debt_asset,
		filler: *filler,
		lot,
		bid,
	});
}

pub fn handle_initiate_liquidation(
	pool: &mut Pool,
	ctx: &mut Invocation,
	liquidator: &Pubkey,
	borrower: &Pubkey,
	rwa_token: &Pubkey,
	debt_asset: &AssetId,
	liquidation_percent: u128
) -> PoolResult<Auction> {
	pool.state.validate_operation(PoolOperation::Liquidation)?;
	validate_liquidation_request(pool, borrower, debt_asset, liquidation_percent)?;

	update_reserve_interest(pool, debt_asset, ctx.now)?;

	let auction = create_user_liquidation_auction(
		pool,
		borrower,
		rwa_token,
		debt_asset,
		liquidation_percent,
		ctx.oracle,
		ctx.now
	)?;

	msg!(
		"liquidation auction {} for {}: lot {} bid {}",
		auction.id,
		borrower,
		auction.lot,
		auction.bid
	);
	emit_auction_record(ctx, &auction, AuctionAction::Create, liquidator, auction.lot, auction.bid);

	Ok(auction)
}

/// The filler pays the bid into the pool and receives the lot from it
pub fn handle_fill_auction(
	pool: &mut Pool,
	ctx: &mut Invocation,
	filler: &Pubkey,
	auction_id: u64
) -> PoolResult<AuctionFill> {
	pool.state.validate_operation(PoolOperation::FillAuction)?;

	let debt_asset = pool.auctions.get_ref(&auction_id)?.debt_asset;
	update_reserve_interest(pool, &debt_asset, ctx.now)?;

	let (auction, fill) = fill_auction(pool, &ctx.pool_address, auction_id, ctx.oracle, ctx.now)?;

	ctx.transfers.receive(&fill.bid_token, filler, fill.bid);
	ctx.transfers.send_from_pool(&fill.lot_token, filler, fill.lot);

	emit_auction_record(ctx, &auction, AuctionAction::Fill, filler, fill.lot, fill.bid);

	if let Some(next_auction_id) = fill.next_auction {
		let next_auction = pool.auctions.get_ref(&next_auction_id)?;
		emit_auction_record(
			ctx,
			next_auction,
			AuctionAction::Create,
			filler,
			next_auction.lot,
			next_auction.bid
		);
	}

	Ok(fill)
}

/// The admin may cancel whatever the pool status
pub fn handle_cancel_auction(
	pool: &mut Pool,
	ctx: &mut Invocation,
	caller: &Pubkey,
	auction_id: u64
) -> PoolResult<Auction> {
	if *caller != pool.state.admin {
		pool.state.validate_operation(PoolOperation::CancelAuction)?;
	}

	let auction = cancel_auction(pool, auction_id, caller, ctx.now)?;

	emit_auction_record(ctx, &auction, AuctionAction::Cancel, caller, 0, 0);

	Ok(auction)
}

pub fn handle_bad_debt(
	pool: &mut Pool,
	ctx: &mut Invocation,
	caller: &Pubkey,
	borrower: &Pubkey
) -> PoolResult<BadDebtResolution> {
	pool.state.validate_operation(PoolOperation::BadDebt)?;

	let debt_asset = pool.users.get(borrower).and_then(|user| user.debt_asset);
	if let Some(debt_asset) = debt_asset {
		update_reserve_interest(pool, &debt_asset, ctx.now)?;
	}

	let resolution = resolve_bad_debt(pool, &ctx.pool_address, borrower, ctx.oracle, ctx.now)?;

	emit!(BadDebtRecord {
		ts: ctx.now,
		borrower: *borrower,
		asset: debt_asset.unwrap_or_default(),
		d_tokens_written_off: resolution.d_tokens_written_off,
		backstop_credit_used: resolution.backstop_credit_used,
		d_tokens_to_backstop: resolution.d_tokens_to_backstop,
	});

	if let Some(auction) = resolution.auction.as_ref() {
		emit_auction_record(ctx, auction, AuctionAction::Create, caller, auction.lot, auction.bid);
	}

	Ok(resolution)
}

/// Puts bad debt left on the backstop's books back up for auction, e.g.
/// after its auction was cancelled or the backstop was refilled
pub fn handle_create_bad_debt_auction(
	pool: &mut Pool,
	ctx: &mut Invocation,
	caller: &Pubkey,
	asset: &AssetId
) -> PoolResult<Option<Auction>> {
	pool.state.validate_operation(PoolOperation::BadDebt)?;

	update_reserve_interest(pool, asset, ctx.now)?;

	let auction = create_bad_debt_auction(pool, &ctx.pool_address, asset, ctx.oracle, ctx.now)?;

	if let Some(auction) = auction.as_ref() {
		emit_auction_record(ctx, auction, AuctionAction::Create, caller, auction.lot, auction.bid);
	}

	Ok(auction)
}

pub fn handle_create_interest_auction(
	pool: &mut Pool,
	ctx: &mut Invocation,
	caller: &Pubkey,
	asset: &AssetId
) -> PoolResult<Auction> {
	pool.state.validate_operation(PoolOperation::InterestAuction)?;

	update_reserve_interest(pool, asset, ctx.now)?;

	let auction = create_interest_auction(pool, &ctx.pool_address, asset, ctx.oracle, ctx.now)?;

	emit_auction_record(ctx, &auction, AuctionAction::Create, caller, auction.lot, auction.bid);

	Ok(auction)
}
