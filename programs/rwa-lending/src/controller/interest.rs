use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::interest::{ calculate_accrual, validate_accrual_elapsed, InterestAccrual };
use crate::state::events::InterestRecord;
use crate::state::pool::Pool;
use crate::state::reserve::{ AssetId, Reserve };


/// Brings a reserve's rates current. Either every field is updated or none is.
pub fn accrue_interest(
	reserve: &mut Reserve,
	backstop_take_rate: u32,
	now: i64
) -> PoolResult<Option<InterestAccrual>> {
	let elapsed = validate_accrual_elapsed(reserve.last_accrual_time, now)?;

	if elapsed == 0 {
		return Ok(None);
	}

	let accrual = calculate_accrual(reserve, backstop_take_rate, elapsed).map_err(|e| {
		msg!("Interest accrual for {} failed: {:?}", reserve.asset, e);
		ErrorCode::RateAccrualError
	})?;

	reserve.d_token_rate = accrual.d_token_rate;
	reserve.b_token_rate = accrual.b_token_rate;
	reserve.backstop_credit = accrual.backstop_credit;
	reserve.rate_modifier = accrual.rate_modifier;
	reserve.last_accrual_time = now;

	emit!(InterestRecord {
		ts: now,
		asset: reserve.asset,
		elapsed,
		utilization: accrual.utilization,
		interest_rate: accrual.interest_rate,
		b_token_rate: accrual.b_token_rate,
		d_token_rate: accrual.d_token_rate,
		rate_modifier: accrual.rate_modifier,
		interest: accrual.interest,
		backstop_share: accrual.backstop_share,
	});

	Ok(Some(accrual))
}

pub fn update_reserve_interest(pool: &mut Pool, asset: &AssetId, now: i64) -> PoolResult {
	let backstop_take_rate = pool.state.backstop_take_rate;
	let reserve = pool.reserves.get_ref_mut(asset)?;
	accrue_interest(reserve, backstop_take_rate, now)?;
	Ok(())
}
