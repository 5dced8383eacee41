use std::cmp::min;

use anchor_lang::prelude::*;

use crate::controller::balance::update_balances_for_debt_payment;
use crate::error::{ ErrorCode, PoolResult };
use crate::get_then_update_id;
use crate::math::balance::{ calculate_debt_payment, get_d_tokens_repaid, get_repayment_amount };
use crate::math::borrow_limit::{
	calculate_asset_value,
	calculate_borrow_limit,
	calculate_debt_amount,
	calculate_debt_value,
};
use crate::math::constants::{ AUCTION_MAX_SECONDS, MAX_HEALTH_FACTOR, MIN_INTEREST_AUCTION_LOT, SCALAR_7 };
use crate::math::liquidation::{
	calculate_auction_modifiers,
	calculate_bad_debt_lot,
	calculate_liquidation_bid,
	calculate_liquidation_lot,
	scale_by_modifier,
};
use crate::math::oracle::get_amount_for_usd_value;
use crate::math::safe_math::SafeMath;
use crate::state::auction::{ Auction, AuctionStatus, AuctionType };
use crate::state::oracle::{ get_validated_price, OracleAsset, PriceOracle };
use crate::state::pool::Pool;
use crate::state::reserve::{ AssetId, Reserve };
use crate::validate;


/// What a fill moved: the filler received `lot` of `lot_token` and paid
/// `bid` of `bid_token`. `next_auction` is the auction reopened for bad debt
/// the fill left on the backstop's books.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuctionFill {
	pub lot: u128,
	pub lot_token: Pubkey,
	pub bid: u128,
	pub bid_token: Pubkey,
	pub next_auction: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BadDebtResolution {
	pub backstop_credit_used: u128,
	pub d_tokens_written_off: u128,
	pub d_tokens_to_backstop: u128,
	pub auction: Option<Auction>,
}

fn open_auction(
	pool: &mut Pool,
	auction_type: AuctionType,
	borrower: &Pubkey,
	rwa_token: &Pubkey,
	debt_asset: &AssetId,
	lot: u128,
	bid: u128,
	now: i64
) -> PoolResult<Auction> {
	validate!(
		pool.auctions.find_active(&auction_type, borrower, rwa_token, debt_asset).is_none(),
		ErrorCode::AuctionAlreadyInProgress,
		"{:?} auction already open for {} {} {}",
		auction_type,
		borrower,
		rwa_token,
		debt_asset
	)?;

	let auction = Auction {
		id: get_then_update_id!(pool.state, next_auction_id),
		auction_type,
		borrower: *borrower,
		rwa_token: *rwa_token,
		debt_asset: *debt_asset,
		lot,
		bid,
		started_at: now,
		status: AuctionStatus::Active,
	};

	pool.auctions.insert(auction.clone());

	Ok(auction)
}

/// Opens a Dutch auction selling part of an insolvent borrower's collateral.
/// The debt asset's rates must already be current.
pub fn create_user_liquidation_auction(
	pool: &mut Pool,
	borrower: &Pubkey,
	rwa_token: &Pubkey,
	debt_asset: &AssetId,
	liquidation_percent: u128,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<Auction> {
	let user = pool.users.get_or_create_mut(borrower).clone();

	let calculation = calculate_borrow_limit(
		&user,
		&pool.collateral_factors,
		&pool.reserves,
		oracle,
		now
	)?;

	validate!(
		calculation.is_insolvent(),
		ErrorCode::CDPNotInsolvent,
		"{} health factor {} is not below 1",
		borrower,
		calculation.health_factor()?
	)?;

	validate!(
		pool.auctions
			.find_active(&AuctionType::UserLiquidation, borrower, rwa_token, debt_asset)
			.is_none(),
		ErrorCode::AuctionAlreadyInProgress,
		"liquidation already open for {} {} {}",
		borrower,
		rwa_token,
		debt_asset
	)?;

	let collateral = user.get_collateral(rwa_token);
	validate!(
		collateral > 0,
		ErrorCode::CollateralNotFound,
		"{} has no {} collateral",
		borrower,
		rwa_token
	)?;

	let debt_amount = calculate_debt_amount(&user, &pool.reserves)?;
	let bid = calculate_liquidation_bid(debt_amount, liquidation_percent)?;
	validate!(
		bid > 0,
		ErrorCode::InvalidLiquidationAmount,
		"{} of {} debt rounds to nothing",
		liquidation_percent,
		debt_amount
	)?;

	let collateral_value = calculate_asset_value(
		collateral,
		&OracleAsset::Token(*rwa_token),
		oracle,
		now
	)?;

	let lot = calculate_liquidation_lot(
		collateral,
		collateral_value,
		calculation.debt_value,
		liquidation_percent,
		pool.get_collateral_factor(rwa_token)
	)?;

	open_auction(
		pool,
		AuctionType::UserLiquidation,
		borrower,
		rwa_token,
		debt_asset,
		lot,
		bid,
		now
	)
}

/// Settles an active auction at the current Dutch price and marks it filled.
/// Bad debt a late fill leaves on the backstop goes straight back to auction.
pub fn fill_auction(
	pool: &mut Pool,
	pool_address: &Pubkey,
	auction_id: u64,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<(Auction, AuctionFill)> {
	let auction = pool.auctions.get_ref(&auction_id)?.clone();

	validate!(
		auction.status != AuctionStatus::Filled,
		ErrorCode::AuctionAlreadyFilled,
		"auction {} already filled",
		auction_id
	)?;
	validate!(auction.is_active(), ErrorCode::AuctionNotActive, "auction {} is not active", auction_id)?;

	let (lot_modifier, bid_modifier) = calculate_auction_modifiers(
		&auction.auction_type,
		now.safe_sub(auction.started_at)?
	)?;

	let mut fill = match auction.auction_type {
		AuctionType::UserLiquidation =>
			fill_user_liquidation(pool, &auction, lot_modifier, bid_modifier, oracle, now)?,
		AuctionType::BadDebt => fill_bad_debt(pool, &auction, lot_modifier, bid_modifier)?,
		AuctionType::Interest => fill_interest(pool, &auction, lot_modifier, bid_modifier)?,
	};

	let filled = pool.auctions.get_ref_mut(&auction_id)?;
	filled.status = AuctionStatus::Filled;
	let filled = filled.clone();

	if
		auction.auction_type == AuctionType::BadDebt &&
		pool.backstop.get_d_token_balance(&auction.debt_asset) > 0
	{
		fill.next_auction = match
			create_bad_debt_auction(pool, pool_address, &auction.debt_asset, oracle, now)
		{
			Ok(next_auction) => next_auction.map(|next_auction| next_auction.id),
			Err(ErrorCode::BadDebtNotCovered) => {
				msg!(
					"{} {} dTokens stay on the backstop until it can cover them",
					pool.backstop.get_d_token_balance(&auction.debt_asset),
					auction.debt_asset
				);
				None
			}
			Err(e) => {
				return Err(e);
			}
		};
	}

	Ok((filled, fill))
}

fn fill_user_liquidation(
	pool: &mut Pool,
	auction: &Auction,
	lot_modifier: u128,
	bid_modifier: u128,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<AuctionFill> {
	let borrower = &auction.borrower;
	let asset = &auction.debt_asset;
	let bid_token = pool.reserves.get_ref(asset)?.get_token_contract()?;

	let bid_amount = scale_by_modifier(auction.bid, bid_modifier)?;
	let (paid, _) = update_balances_for_debt_payment(pool, borrower, asset, bid_amount)?;

	let user = pool.users.get_or_create_mut(borrower);
	let lot_amount = min(
		scale_by_modifier(auction.lot, lot_modifier)?,
		user.get_collateral(&auction.rwa_token)
	);
	if lot_amount > 0 {
		user.remove_collateral(&auction.rwa_token, lot_amount)?;
	}

	let user = user.clone();
	let calculation = calculate_borrow_limit(
		&user,
		&pool.collateral_factors,
		&pool.reserves,
		oracle,
		now
	)?;

	if calculation.debt_value > 0 {
		let health_factor = calculation.health_factor()?;
		validate!(
			health_factor <= MAX_HEALTH_FACTOR,
			ErrorCode::HealthFactorTooHigh,
			"fill leaves {} with health factor {} > {}",
			borrower,
			health_factor,
			MAX_HEALTH_FACTOR
		)?;
	}

	Ok(AuctionFill {
		lot: lot_amount,
		lot_token: auction.rwa_token,
		bid: paid,
		bid_token,
		next_auction: None,
	})
}

fn fill_bad_debt(
	pool: &mut Pool,
	auction: &Auction,
	lot_modifier: u128,
	bid_modifier: u128
) -> PoolResult<AuctionFill> {
	let asset = &auction.debt_asset;
	let reserve = pool.reserves.get_ref_mut(asset)?;
	let bid_token = reserve.get_token_contract()?;

	let bid_amount = scale_by_modifier(auction.bid, bid_modifier)?;
	let (paid, d_tokens) = calculate_debt_payment(
		bid_amount,
		pool.backstop.get_d_token_balance(asset),
		reserve
	)?;
	pool.backstop.decrease_d_tokens(asset, d_tokens)?;
	reserve.d_token_supply = reserve.d_token_supply.safe_sub(d_tokens)?;
	reserve.increase_pool_balance(paid)?;

	let lot_amount = pool.backstop.decrease_total(scale_by_modifier(auction.lot, lot_modifier)?)?;

	Ok(AuctionFill {
		lot: lot_amount,
		lot_token: auction.rwa_token,
		bid: paid,
		bid_token,
		next_auction: None,
	})
}

fn fill_interest(
	pool: &mut Pool,
	auction: &Auction,
	lot_modifier: u128,
	bid_modifier: u128
) -> PoolResult<AuctionFill> {
	let reserve = pool.reserves.get_ref_mut(&auction.debt_asset)?;
	let lot_token = reserve.get_token_contract()?;

	let lot_amount = min(scale_by_modifier(auction.lot, lot_modifier)?, reserve.backstop_credit);
	reserve.decrease_pool_balance(lot_amount)?;
	reserve.backstop_credit = reserve.backstop_credit.safe_sub(lot_amount)?;

	let bid_amount = scale_by_modifier(auction.bid, bid_modifier)?;
	pool.backstop.increase_total(bid_amount)?;

	Ok(AuctionFill {
		lot: lot_amount,
		lot_token,
		bid: bid_amount,
		bid_token: auction.rwa_token,
		next_auction: None,
	})
}

/// Admins may cancel at any time, anyone else once the auction has run
/// longer than `AUCTION_MAX_SECONDS`.
pub fn cancel_auction(
	pool: &mut Pool,
	auction_id: u64,
	caller: &Pubkey,
	now: i64
) -> PoolResult<Auction> {
	let is_admin = pool.state.admin == *caller;
	let auction = pool.auctions.get_ref_mut(&auction_id)?;

	validate!(auction.is_active(), ErrorCode::AuctionNotActive, "auction {} is not active", auction_id)?;

	let age = now.safe_sub(auction.started_at)?;
	validate!(
		is_admin || age > AUCTION_MAX_SECONDS,
		ErrorCode::NotAuthorized,
		"auction {} is {}s old, only the admin can cancel before {}s",
		auction_id,
		age,
		AUCTION_MAX_SECONDS
	)?;

	auction.status = AuctionStatus::Cancelled;

	Ok(auction.clone())
}

/// Writes off up to `d_tokens` of debt against the reserve's backstop credit.
/// Returns the credit used and the dTokens burnt.
fn absorb_with_backstop_credit(reserve: &mut Reserve, d_tokens: u128) -> PoolResult<(u128, u128)> {
	let debt_amount = get_repayment_amount(d_tokens, reserve)?;

	let backstop_credit_used = min(reserve.backstop_credit, debt_amount);
	let d_tokens_burnt = if backstop_credit_used == debt_amount {
		d_tokens
	} else {
		get_d_tokens_repaid(backstop_credit_used, reserve)?
	};

	reserve.backstop_credit = reserve.backstop_credit.safe_sub(backstop_credit_used)?;
	reserve.d_token_supply = reserve.d_token_supply.safe_sub(d_tokens_burnt)?;

	Ok((backstop_credit_used, d_tokens_burnt))
}

/// Bid and lot for auctioning every `asset` dToken the backstop holds.
/// Fails with `BadDebtNotCovered` when the lot exceeds the backstop.
fn calculate_backstop_debt_auction(
	pool: &Pool,
	asset: &AssetId,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<(u128, u128)> {
	let reserve = pool.reserves.get_ref(asset)?;
	let bid = get_repayment_amount(pool.backstop.get_d_token_balance(asset), reserve)?;

	let backstop_token = pool.state.get_backstop_token()?;
	let debt_value = calculate_debt_value(bid, asset, oracle, now)?;
	let backstop_token_price = get_validated_price(
		oracle,
		&OracleAsset::Token(backstop_token),
		now
	)?;
	let lot = calculate_bad_debt_lot(debt_value, backstop_token_price, oracle.decimals()?)?;

	validate!(
		pool.backstop.total > 0 && lot <= pool.backstop.total,
		ErrorCode::BadDebtNotCovered,
		"{} {} of bad debt needs {} backstop tokens, backstop holds {}",
		bid,
		asset,
		lot,
		pool.backstop.total
	)?;

	Ok((bid, lot))
}

/// Auctions the `asset` debt on the backstop's books for backstop tokens,
/// after the reserve's backstop credit has absorbed what it can. Returns
/// `None` when the credit cleared it all.
pub fn create_bad_debt_auction(
	pool: &mut Pool,
	pool_address: &Pubkey,
	asset: &AssetId,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<Option<Auction>> {
	let d_tokens = pool.backstop.get_d_token_balance(asset);
	validate!(d_tokens > 0, ErrorCode::DebtAssetNotSet, "backstop holds no {} debt", asset)?;

	let (_, d_tokens_burnt) = absorb_with_backstop_credit(pool.reserves.get_ref_mut(asset)?, d_tokens)?;
	pool.backstop.decrease_d_tokens(asset, d_tokens_burnt)?;

	if d_tokens_burnt == d_tokens {
		return Ok(None);
	}

	let (bid, lot) = calculate_backstop_debt_auction(pool, asset, oracle, now)?;
	let backstop_token = pool.state.get_backstop_token()?;

	let auction = open_auction(
		pool,
		AuctionType::BadDebt,
		pool_address,
		&backstop_token,
		asset,
		lot,
		bid,
		now
	)?;

	Ok(Some(auction))
}

/// Clears the debt of a borrower with no collateral left. The reserve's
/// backstop credit absorbs what it can; the rest moves onto the backstop's
/// books and is auctioned for backstop tokens.
pub fn resolve_bad_debt(
	pool: &mut Pool,
	pool_address: &Pubkey,
	borrower: &Pubkey,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<BadDebtResolution> {
	let user = pool.users.get_or_create_mut(borrower);

	validate!(
		!user.has_collateral(),
		ErrorCode::CDPNotInsolvent,
		"{} still has collateral, liquidate instead",
		borrower
	)?;

	let (asset, d_tokens) = user.get_debt().ok_or_else(|| {
		msg!("{} has no debt", borrower);
		ErrorCode::DebtAssetNotSet
	})?;

	let reserve = pool.reserves.get_ref_mut(&asset)?;
	let (backstop_credit_used, d_tokens_written_off) = absorb_with_backstop_credit(reserve, d_tokens)?;
	user.decrease_d_tokens(&asset, d_tokens_written_off)?;

	let d_tokens_to_backstop = d_tokens.safe_sub(d_tokens_written_off)?;

	if d_tokens_to_backstop == 0 {
		return Ok(BadDebtResolution {
			backstop_credit_used,
			d_tokens_written_off,
			d_tokens_to_backstop,
			auction: None,
		});
	}

	user.decrease_d_tokens(&asset, d_tokens_to_backstop)?;
	pool.backstop.increase_d_tokens(&asset, d_tokens_to_backstop)?;

	let backstop_token = pool.state.get_backstop_token()?;
	let active_auction_id = pool.auctions
		.find_active(&AuctionType::BadDebt, pool_address, &backstop_token, &asset)
		.map(|auction| auction.id);

	let auction = match active_auction_id {
		Some(auction_id) => {
			// the open auction's fill puts the rest back up for auction
			calculate_backstop_debt_auction(pool, &asset, oracle, now)?;
			msg!("{} {} dTokens join bad debt auction {}", d_tokens_to_backstop, asset, auction_id);
			None
		}
		None => create_bad_debt_auction(pool, pool_address, &asset, oracle, now)?,
	};

	Ok(BadDebtResolution {
		backstop_credit_used,
		d_tokens_written_off,
		d_tokens_to_backstop,
		auction,
	})
}

/// Auctions a reserve's backstop credit for backstop tokens of equal value
pub fn create_interest_auction(
	pool: &mut Pool,
	pool_address: &Pubkey,
	asset: &AssetId,
	oracle: &dyn PriceOracle,
	now: i64
) -> PoolResult<Auction> {
	let backstop_credit = pool.reserves.get_ref(asset)?.backstop_credit;
	validate!(
		backstop_credit >= MIN_INTEREST_AUCTION_LOT,
		ErrorCode::InsufficientBackstopCredit,
		"{} backstop credit {} below {}",
		asset,
		backstop_credit,
		MIN_INTEREST_AUCTION_LOT
	)?;

	let backstop_token = pool.state.get_backstop_token()?;

	let credit_value = calculate_debt_value(backstop_credit, asset, oracle, now)?;
	let backstop_token_price = get_validated_price(
		oracle,
		&OracleAsset::Token(backstop_token),
		now
	)?;
	let bid = get_amount_for_usd_value(credit_value, backstop_token_price, oracle.decimals()?)?;

	open_auction(
		pool,
		AuctionType::Interest,
		pool_address,
		&backstop_token,
		asset,
		backstop_credit,
		bid,
		now
	)
}

/// Checks that can run before any rates are touched
pub fn validate_liquidation_request(
	pool: &Pool,
	borrower: &Pubkey,
	debt_asset: &AssetId,
	liquidation_percent: u128
) -> PoolResult {
	validate!(
		liquidation_percent > 0 && liquidation_percent <= SCALAR_7,
		ErrorCode::InvalidLiquidationAmount,
		"liquidation percent {} outside (0, {}]",
		liquidation_percent,
		SCALAR_7
	)?;

	let borrower_debt_asset = pool.users.get(borrower).and_then(|user| user.debt_asset);
	validate!(
		borrower_debt_asset == Some(*debt_asset),
		ErrorCode::DebtAssetNotSet,
		"{} has no {} debt",
		borrower,
		debt_asset
	)
}
