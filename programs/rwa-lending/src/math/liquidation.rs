use std::cmp::min;

use crate::error::PoolResult;
use crate::math::bn::U192;
use crate::math::casting::Cast;
use crate::math::constants::{
	AUCTION_DURATION_SECONDS,
	BAD_DEBT_LOT_MULTIPLIER,
	BPS_PRECISION,
	SCALAR_7,
};
use crate::math::oracle::get_amount_for_usd_value;
use crate::math::safe_math::SafeMath;
use crate::state::auction::AuctionType;


/// `1 + (1 - collateral_factor) / 2`, precision: SCALAR_7
pub fn calculate_liquidation_premium(collateral_factor: u32) -> PoolResult<u128> {
	let collateral_factor = collateral_factor
		.cast::<u128>()?
		.safe_mul(SCALAR_7)?
		.safe_div(BPS_PRECISION)?;

	SCALAR_7.safe_add(SCALAR_7.saturating_sub(collateral_factor).safe_div(2)?)
}

/// Debt asset the liquidator must repay for `liquidation_percent` of the debt
pub fn calculate_liquidation_bid(debt_amount: u128, liquidation_percent: u128) -> PoolResult<u128> {
	scale_by_modifier(debt_amount, liquidation_percent)
}

/// Collateral offered for `liquidation_percent` of the debt, including the
/// premium. Never more than the posted collateral.
pub fn calculate_liquidation_lot(
	collateral_amount: u128,
	collateral_value: u128,
	debt_value: u128,
	liquidation_percent: u128,
	collateral_factor: u32
) -> PoolResult<u128> {
	if collateral_value == 0 {
		return Ok(collateral_amount);
	}

	let premium = calculate_liquidation_premium(collateral_factor)?;

	// premium * percent * debt_value / collateral_value
	let collateral_percent = U192::from(premium)
		.safe_mul(U192::from(liquidation_percent))?
		.safe_mul(U192::from(debt_value))?
		.safe_div(U192::from(SCALAR_7))?
		.safe_div(U192::from(collateral_value))?;

	let collateral_percent = min(collateral_percent, U192::from(SCALAR_7)).try_to_u128()?;

	scale_by_modifier(collateral_amount, collateral_percent)
}

/// Backstop tokens offered to cover bad debt worth `debt_value`. Not capped
/// by the backstop's holdings, callers compare against them.
pub fn calculate_bad_debt_lot(
	debt_value: u128,
	backstop_token_price: u128,
	oracle_decimals: u32
) -> PoolResult<u128> {
	let lot_value = scale_by_modifier(debt_value, BAD_DEBT_LOT_MULTIPLIER)?;
	get_amount_for_usd_value(lot_value, backstop_token_price, oracle_decimals)
}

/// Lot and bid modifiers (SCALAR_7) `elapsed` seconds into an auction.
///
/// The lot grows from nothing to the full lot over the first
/// `AUCTION_DURATION_SECONDS`, then the bid falls from the full bid to
/// nothing over the next `AUCTION_DURATION_SECONDS`. Interest auctions
/// offer the full lot from the start and only lower the bid.
pub fn calculate_auction_modifiers(
	auction_type: &AuctionType,
	elapsed: i64
) -> PoolResult<(u128, u128)> {
	let elapsed = elapsed.max(0).cast::<u128>()?;
	let duration = AUCTION_DURATION_SECONDS.cast::<u128>()?;

	let (lot_modifier, bid_modifier) = match auction_type {
		AuctionType::Interest => {
			let progress = min(elapsed, duration).safe_mul(SCALAR_7)?.safe_div(duration)?;
			(SCALAR_7, SCALAR_7.safe_sub(progress)?)
		}
		AuctionType::UserLiquidation | AuctionType::BadDebt => {
			if elapsed <= duration {
				(elapsed.safe_mul(SCALAR_7)?.safe_div(duration)?, SCALAR_7)
			} else {
				let bid_elapsed = min(elapsed.safe_sub(duration)?, duration);
				let progress = bid_elapsed.safe_mul(SCALAR_7)?.safe_div(duration)?;
				(SCALAR_7, SCALAR_7.safe_sub(progress)?)
			}
		}
	};

	Ok((lot_modifier, bid_modifier))
}

/// `amount * modifier / SCALAR_7`, rounded down
pub fn scale_by_modifier(amount: u128, modifier: u128) -> PoolResult<u128> {
	U192::from(amount)
		.safe_mul(U192::from(modifier))?
		.safe_div(U192::from(SCALAR_7))?
		.try_to_u128()
}
