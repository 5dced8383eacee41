use crate::error::ErrorCode;
use crate::math::constants::{ MAX_RATE_MODIFIER, MIN_RATE_MODIFIER, SCALAR_12, SCALAR_7 };
use crate::math::interest::*;
use crate::state::reserve::{ AssetId, InterestRateParams, Reserve };

fn params() -> InterestRateParams {
	// target 70%, bands of 10% each
	InterestRateParams {
		base_rate: 200_000,
		slope_1: 400_000,
		slope_2: 2_000_000,
		slope_3: 10_000_000,
		target_utilization: 7_000_000,
		reactivity_constant: 200,
	}
}

#[test]
fn utilization() {
	assert_eq!(calculate_utilization(0, 1_000_000).unwrap(), 0);
	assert_eq!(calculate_utilization(500_000, 500_000).unwrap(), 5_000_000);
	assert_eq!(calculate_utilization(100, 0).unwrap(), SCALAR_7);
	assert_eq!(calculate_utilization(1, 2).unwrap(), 3_333_333);
}

#[test]
fn interest_rate_below_target_is_base_rate() {
	let params = params();
	assert_eq!(calculate_interest_rate(0, &params, SCALAR_7).unwrap(), 200_000);
	assert_eq!(calculate_interest_rate(5_000_000, &params, SCALAR_7).unwrap(), 200_000);
	assert_eq!(calculate_interest_rate(7_000_000, &params, SCALAR_7).unwrap(), 200_000);
}

#[test]
fn interest_rate_bands() {
	let params = params();

	// halfway through band 1
	assert_eq!(calculate_interest_rate(7_500_000, &params, SCALAR_7).unwrap(), 400_000);
	// first kink
	assert_eq!(calculate_interest_rate(8_000_000, &params, SCALAR_7).unwrap(), 600_000);
	// halfway through band 2
	assert_eq!(calculate_interest_rate(8_500_000, &params, SCALAR_7).unwrap(), 1_600_000);
	// second kink
	assert_eq!(calculate_interest_rate(9_000_000, &params, SCALAR_7).unwrap(), 2_600_000);
	// full utilization
	assert_eq!(calculate_interest_rate(SCALAR_7, &params, SCALAR_7).unwrap(), 12_600_000);
}

#[test]
fn interest_rate_is_monotonic_in_utilization() {
	let params = params();
	let mut last = 0;
	for utilization in (0..=SCALAR_7).step_by(50_000) {
		let rate = calculate_interest_rate(utilization, &params, SCALAR_7).unwrap();
		assert!(rate >= last, "rate dropped at utilization {}", utilization);
		last = rate;
	}
}

#[test]
fn interest_rate_scales_with_modifier() {
	let params = params();
	assert_eq!(calculate_interest_rate(0, &params, 2 * SCALAR_7).unwrap(), 400_000);
	assert_eq!(calculate_interest_rate(0, &params, SCALAR_7 / 2).unwrap(), 100_000);
}

#[test]
fn rate_modifier_moves_toward_target_and_is_clamped() {
	let params = params();

	// 10% over target for 1000s: 1000 * 1_000_000 * 200 / 1e7 = 20_000
	assert_eq!(
		calculate_rate_modifier(SCALAR_7, 8_000_000, &params, 1000).unwrap(),
		SCALAR_7 + 20_000
	);
	assert_eq!(
		calculate_rate_modifier(SCALAR_7, 6_000_000, &params, 1000).unwrap(),
		SCALAR_7 - 20_000
	);
	assert_eq!(
		calculate_rate_modifier(SCALAR_7, 0, &params, 31_536_000).unwrap(),
		MIN_RATE_MODIFIER
	);
	assert_eq!(
		calculate_rate_modifier(SCALAR_7, SCALAR_7, &params, 31_536_000).unwrap(),
		MAX_RATE_MODIFIER
	);
}

#[test]
fn params_validation() {
	assert_eq!(params().validate(), Ok(()));
	assert_eq!(InterestRateParams::default().validate(), Ok(()));

	let mut bad_target = params();
	bad_target.target_utilization = 0;
	assert_eq!(bad_target.validate(), Err(ErrorCode::InvalidUtilizationRatio));
	bad_target.target_utilization = SCALAR_7 as u32;
	assert_eq!(bad_target.validate(), Err(ErrorCode::InvalidUtilizationRatio));

	let mut bad_slopes = params();
	bad_slopes.slope_2 = bad_slopes.slope_1 - 1;
	assert_eq!(bad_slopes.validate(), Err(ErrorCode::InvalidInterestRateParams));
}

#[test]
fn one_year_at_half_utilization_accrues_base_rate() {
	let mut reserve = Reserve::new(AssetId::from_symbol("XLM"), 0);
	reserve.interest_rate_params = InterestRateParams {
		base_rate: 200_000,
		target_utilization: 8_000_000,
		..InterestRateParams::default()
	};
	reserve.pool_balance = 500_000;
	reserve.b_token_supply = 1_000_000;
	reserve.d_token_supply = 500_000;

	let accrual = calculate_accrual(&reserve, 0, 31_536_000).unwrap();

	assert_eq!(accrual.utilization, 5_000_000);
	assert_eq!(accrual.interest_rate, 200_000);
	assert_eq!(accrual.d_token_rate, 1_020_000_000_000);
	assert_eq!(accrual.interest, 10_000);
	assert_eq!(accrual.b_token_rate, 1_010_000_000_000);
	assert_eq!(accrual.backstop_credit, 0);
}

#[test]
fn accrual_splits_interest_with_backstop() {
	let mut reserve = Reserve::new(AssetId::from_symbol("USDC"), 0);
	reserve.pool_balance = 500_000;
	reserve.b_token_supply = 1_000_000;
	reserve.d_token_supply = 500_000;

	// 10% take rate
	let accrual = calculate_accrual(&reserve, 1_000_000, 31_536_000).unwrap();

	// base rate 1% on 500_000
	assert_eq!(accrual.interest, 5_000);
	assert_eq!(accrual.backstop_share, 500);
	assert_eq!(accrual.backstop_credit, 500);
	// 4_500 over 1_000_000 bTokens
	assert_eq!(accrual.b_token_rate, SCALAR_12 + 4_500_000_000);
}

#[test]
fn accrual_without_lenders_credits_backstop() {
	let mut reserve = Reserve::new(AssetId::from_symbol("USDC"), 0);
	reserve.d_token_supply = 500_000;

	let accrual = calculate_accrual(&reserve, 1_000_000, 31_536_000).unwrap();

	assert_eq!(accrual.b_token_rate, SCALAR_12);
	assert_eq!(accrual.backstop_credit, accrual.interest);
}

#[test]
fn accrual_overflow_is_an_error() {
	let mut reserve = Reserve::new(AssetId::from_symbol("USDC"), 0);
	reserve.d_token_rate = u128::MAX / 2;
	reserve.d_token_supply = 1;
	reserve.b_token_supply = 1;

	assert!(calculate_accrual(&reserve, 0, 31_536_000).is_err());
}

#[test]
fn elapsed_validation() {
	assert_eq!(validate_accrual_elapsed(100, 100), Ok(0));
	assert_eq!(validate_accrual_elapsed(100, 250), Ok(150));
	assert_eq!(validate_accrual_elapsed(100, 99), Err(ErrorCode::InvalidLedgerSequence));
}
