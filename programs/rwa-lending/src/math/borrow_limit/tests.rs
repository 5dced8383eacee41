use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;

use crate::error::ErrorCode;
use crate::math::borrow_limit::*;
use crate::math::constants::{ ORACLE_MAX_AGE_SECONDS, SCALAR_12, SCALAR_7 };
use crate::state::oracle::OracleAsset;
use crate::state::reserve::{ AssetId, Reserve };
use crate::state::reserve_map::ReserveMap;
use crate::state::user::UserPositions;
use crate::test_utils::{ TestOracle, ONE_DOLLAR };

#[test]
fn health_factor() {
	assert_eq!(calculate_health_factor(100, 0), Ok(u128::MAX));
	assert_eq!(calculate_health_factor(0, 100), Ok(0));
	assert_eq!(calculate_health_factor(150, 100), Ok((SCALAR_7 * 3) / 2));

	let calculation = BorrowLimitCalculation {
		collateral_value: 1_000,
		borrow_limit: 800,
		debt_value: 800,
	};
	assert!(!calculation.is_insolvent());
	assert_eq!(calculation.health_factor(), Ok(SCALAR_7));
}

#[test]
fn weighted_value() {
	assert_eq!(calculate_weighted_value(1_000, 10_000), Ok(1_000));
	assert_eq!(calculate_weighted_value(1_000, 7_500), Ok(750));
	assert_eq!(calculate_weighted_value(1_000, 0), Ok(0));
	assert_eq!(calculate_weighted_value(999, 3_333), Ok(332));
}

#[test]
fn collateral_value_sums_every_token() {
	let house = Pubkey::new_unique();
	let bond = Pubkey::new_unique();
	let unlisted = Pubkey::new_unique();

	let mut user = UserPositions::default();
	user.add_collateral(&house, 100).unwrap();
	user.add_collateral(&bond, 2_000).unwrap();
	user.add_collateral(&unlisted, 0).unwrap();

	let mut collateral_factors = BTreeMap::new();
	collateral_factors.insert(house, 5_000);
	collateral_factors.insert(bond, 9_000);

	let mut oracle = TestOracle::new();
	oracle.set_token_price(&house, 250 * ONE_DOLLAR, 0);
	oracle.set_token_price(&bond, ONE_DOLLAR / 2, 0);

	let (value, limit) = calculate_collateral_value(&user, &collateral_factors, &oracle, 0).unwrap();
	assert_eq!(value, 25_000 + 1_000);
	assert_eq!(limit, 12_500 + 900);
}

#[test]
fn missing_or_stale_prices_abort() {
	let house = Pubkey::new_unique();
	let mut user = UserPositions::default();
	user.add_collateral(&house, 100).unwrap();

	let mut collateral_factors = BTreeMap::new();
	collateral_factors.insert(house, 5_000);

	let mut oracle = TestOracle::new();
	assert_eq!(
		calculate_collateral_value(&user, &collateral_factors, &oracle, 0),
		Err(ErrorCode::AssetNotFoundInOracle)
	);

	oracle.set_price(OracleAsset::Token(house), ONE_DOLLAR, 0);
	assert_eq!(
		calculate_collateral_value(&user, &collateral_factors, &oracle, ORACLE_MAX_AGE_SECONDS + 1),
		Err(ErrorCode::InvalidOraclePrice)
	);

	oracle.set_price(OracleAsset::Token(house), 0, 0);
	assert_eq!(
		calculate_collateral_value(&user, &collateral_factors, &oracle, 0),
		Err(ErrorCode::InvalidOraclePrice)
	);
}

#[test]
fn borrow_limit_includes_accrued_debt() {
	let rwa = Pubkey::new_unique();
	let xlm = AssetId::from_symbol("XLM");

	let mut reserve = Reserve::new(xlm, 0);
	// 1.05
	reserve.d_token_rate = (SCALAR_12 * 105) / 100;
	let mut reserves = ReserveMap::default();
	reserves.0.insert(xlm, reserve);

	let mut user = UserPositions::default();
	user.add_collateral(&rwa, 1_000).unwrap();
	user.increase_d_tokens(&xlm, 1_000).unwrap();

	let mut collateral_factors = BTreeMap::new();
	collateral_factors.insert(rwa, 8_000);

	let mut oracle = TestOracle::new();
	oracle.set_token_price(&rwa, 10 * ONE_DOLLAR, 0);
	oracle.set_asset_price(&xlm, ONE_DOLLAR / 10, 0);

	assert_eq!(calculate_debt_amount(&user, &reserves), Ok(1_050));

	let calculation = calculate_borrow_limit(&user, &collateral_factors, &reserves, &oracle, 0).unwrap();
	assert_eq!(calculation, BorrowLimitCalculation {
		collateral_value: 10_000,
		borrow_limit: 8_000,
		debt_value: 105,
	});
	assert!(!calculation.is_insolvent());
}

#[test]
fn no_debt_needs_no_debt_price() {
	let user = UserPositions::default();
	let oracle = TestOracle::new();

	let calculation = calculate_borrow_limit(
		&user,
		&BTreeMap::new(),
		&ReserveMap::default(),
		&oracle,
		0
	).unwrap();
	assert_eq!(calculation, BorrowLimitCalculation::default());
	assert_eq!(calculation.health_factor(), Ok(u128::MAX));
}
