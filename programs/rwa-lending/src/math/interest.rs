use std::cmp::min;

use solana_program::msg;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::bn::U192;
use crate::math::casting::Cast;
use crate::math::constants::{
	MAX_RATE_MODIFIER,
	MIN_RATE_MODIFIER,
	SCALAR_12,
	SCALAR_7,
	SCALAR_7_I128,
	SECONDS_PER_YEAR,
};
use crate::math::safe_math::SafeMath;
use crate::state::reserve::{ InterestRateParams, Reserve };
use crate::validate;

#[cfg(test)]
mod tests;

/// `borrowed / (borrowed + pool_balance)`, capped at 100%
pub fn calculate_utilization(total_liabilities: u128, pool_balance: u128) -> PoolResult<u128> {
	if total_liabilities == 0 {
		return Ok(0);
	}

	let utilization = total_liabilities
		.safe_mul(SCALAR_7)?
		.safe_div(total_liabilities.safe_add(pool_balance)?)?;

	Ok(min(utilization, SCALAR_7))
}

/// Annual borrow rate (SCALAR_7) for the given utilization.
///
/// At or below target the base rate applies. Above target the remaining
/// utilization range is split into three bands of equal width, each adding
/// its slope linearly across the band.
pub fn calculate_interest_rate(
	utilization: u128,
	params: &InterestRateParams,
	rate_modifier: u128
) -> PoolResult<u128> {
	let base_rate = params.base_rate.cast::<u128>()?;
	let target = params.target_utilization.cast::<u128>()?;
	let slope_1 = params.slope_1.cast::<u128>()?;
	let slope_2 = params.slope_2.cast::<u128>()?;
	let slope_3 = params.slope_3.cast::<u128>()?;

	let utilization = min(utilization, SCALAR_7);

	let curve_rate = if utilization <= target {
		base_rate
	} else {
		let band_width = SCALAR_7.safe_sub(target)?.safe_div(3)?;
		let kink_1 = target.safe_add(band_width)?;
		let kink_2 = kink_1.safe_add(band_width)?;

		if utilization <= kink_1 {
			let ramp = slope_1.safe_mul(utilization.safe_sub(target)?)?.safe_div(band_width)?;
			base_rate.safe_add(ramp)?
		} else if utilization <= kink_2 {
			let ramp = slope_2.safe_mul(utilization.safe_sub(kink_1)?)?.safe_div(band_width)?;
			base_rate.safe_add(slope_1)?.safe_add(ramp)?
		} else {
			let last_band_width = SCALAR_7.safe_sub(kink_2)?;
			let ramp = slope_3
				.safe_mul(utilization.safe_sub(kink_2)?)?
				.safe_div(last_band_width)?;
			base_rate.safe_add(slope_1)?.safe_add(slope_2)?.safe_add(ramp)?
		}
	};

	curve_rate.safe_mul(rate_modifier)?.safe_div(SCALAR_7)
}

/// Moves the rate modifier toward pushing utilization back to target
pub fn calculate_rate_modifier(
	rate_modifier: u128,
	utilization: u128,
	params: &InterestRateParams,
	elapsed: i64
) -> PoolResult<u128> {
	let util_diff = utilization
		.cast::<i128>()?
		.safe_sub(params.target_utilization.cast::<i128>()?)?;

	let change = elapsed
		.cast::<i128>()?
		.safe_mul(util_diff)?
		.safe_mul(params.reactivity_constant.cast::<i128>()?)?
		.safe_div(SCALAR_7_I128)?;

	let new_rate_modifier = rate_modifier.cast::<i128>()?.safe_add(change)?;

	let clamped = new_rate_modifier.clamp(
		MIN_RATE_MODIFIER.cast::<i128>()?,
		MAX_RATE_MODIFIER.cast::<i128>()?
	);

	clamped.cast::<u128>()
}

/// Result of bringing a reserve's rates forward in time. Nothing is written
/// to the reserve until the whole computation succeeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterestAccrual {
	pub elapsed: i64,
	pub utilization: u128,
	pub interest_rate: u128,
	pub b_token_rate: u128,
	pub d_token_rate: u128,
	pub rate_modifier: u128,
	/// interest charged to borrowers, asset units
	pub interest: u128,
	pub backstop_share: u128,
	pub backstop_credit: u128,
}

pub fn calculate_accrual(
	reserve: &Reserve,
	backstop_take_rate: u32,
	elapsed: i64
) -> PoolResult<InterestAccrual> {
	let utilization = reserve.get_utilization()?;
	let interest_rate = calculate_interest_rate(
		utilization,
		&reserve.interest_rate_params,
		reserve.rate_modifier
	)?;

	// d_rate * rate * elapsed / (year * SCALAR_7)
	let d_token_rate_delta = U192::from(reserve.d_token_rate)
		.safe_mul(U192::from(interest_rate))?
		.safe_mul(U192::from(elapsed.cast::<u128>()?))?
		.safe_div(U192::from(SECONDS_PER_YEAR.safe_mul(SCALAR_7)?))?
		.try_to_u128()?;

	let d_token_rate = reserve.d_token_rate.safe_add(d_token_rate_delta)?;

	let interest = U192::from(reserve.d_token_supply)
		.safe_mul(U192::from(d_token_rate_delta))?
		.safe_div(U192::from(SCALAR_12))?
		.try_to_u128()?;

	let (backstop_share, b_token_rate) = if reserve.b_token_supply == 0 {
		(interest, reserve.b_token_rate)
	} else {
		let backstop_share = interest
			.safe_mul(backstop_take_rate.cast::<u128>()?)?
			.safe_div(SCALAR_7)?;
		let lender_share = interest.safe_sub(backstop_share)?;
		let b_token_rate_delta = U192::from(lender_share)
			.safe_mul(U192::from(SCALAR_12))?
			.safe_div(U192::from(reserve.b_token_supply))?
			.try_to_u128()?;
		(backstop_share, reserve.b_token_rate.safe_add(b_token_rate_delta)?)
	};

	let backstop_credit = reserve.backstop_credit.safe_add(backstop_share)?;

	let rate_modifier = calculate_rate_modifier(
		reserve.rate_modifier,
		utilization,
		&reserve.interest_rate_params,
		elapsed
	)?;

	Ok(InterestAccrual {
		elapsed,
		utilization,
		interest_rate,
		b_token_rate,
		d_token_rate,
		rate_modifier,
		interest,
		backstop_share,
		backstop_credit,
	})
}

pub fn validate_accrual_elapsed(last_accrual_time: i64, now: i64) -> PoolResult<i64> {
	validate!(
		now >= last_accrual_time,
		ErrorCode::InvalidLedgerSequence,
		"now {} is before last accrual {}",
		now,
		last_accrual_time
	)?;

	now.safe_sub(last_accrual_time)
}
