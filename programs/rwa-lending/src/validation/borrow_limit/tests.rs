use anchor_lang::prelude::Pubkey;

use crate::controller::balance::{ update_balances_for_borrow, update_balances_for_deposit };
use crate::controller::collateral::{ add_collateral, remove_collateral };
use crate::error::ErrorCode;
use crate::state::reserve::AssetId;
use crate::test_utils::{ active_pool, TestOracle, ONE_DOLLAR };
use crate::validation::borrow_limit::*;

#[test]
fn borrow_up_to_the_exact_limit() {
	let usdc = AssetId::from_symbol("USDC");
	let rwa = Pubkey::new_unique();
	let borrower = Pubkey::new_unique();

	let mut pool = active_pool(&Pubkey::new_unique(), &usdc, &Pubkey::new_unique(), 0);
	pool.set_collateral_factor(&rwa, 8_000).unwrap();
	update_balances_for_deposit(&mut pool, &Pubkey::new_unique(), &usdc, 10_000).unwrap();
	add_collateral(&mut pool, &borrower, &rwa, 1_000).unwrap();

	let mut oracle = TestOracle::new();
	oracle.set_asset_price(&usdc, ONE_DOLLAR, 0);
	oracle.set_token_price(&rwa, ONE_DOLLAR, 0);

	assert_eq!(
		validate_borrow(&pool, &borrower, &usdc, 801, &oracle, 0),
		Err(ErrorCode::InsufficientBorrowLimit)
	);
	assert_eq!(validate_borrow(&pool, &borrower, &usdc, 800, &oracle, 0), Ok(()));

	update_balances_for_borrow(&mut pool, &borrower, &usdc, 800).unwrap();
	assert_eq!(
		validate_borrow(&pool, &borrower, &usdc, 1, &oracle, 0),
		Err(ErrorCode::InsufficientBorrowLimit)
	);
	assert_eq!(validate_collateral_removal(&pool, &borrower, &oracle, 0), Ok(()));

	remove_collateral(&mut pool, &borrower, &rwa, 1).unwrap();
	assert_eq!(
		validate_collateral_removal(&pool, &borrower, &oracle, 0),
		Err(ErrorCode::InsufficientCollateral)
	);
}

#[test]
fn zero_collateral_factor_disables_borrowing() {
	let usdc = AssetId::from_symbol("USDC");
	let rwa = Pubkey::new_unique();
	let borrower = Pubkey::new_unique();

	let mut pool = active_pool(&Pubkey::new_unique(), &usdc, &Pubkey::new_unique(), 0);
	add_collateral(&mut pool, &borrower, &rwa, 1_000).unwrap();

	let mut oracle = TestOracle::new();
	oracle.set_asset_price(&usdc, ONE_DOLLAR, 0);
	oracle.set_token_price(&rwa, ONE_DOLLAR, 0);

	let calculation = get_borrow_limit(&pool, &borrower, &oracle, 0).unwrap();
	assert_eq!(calculation.collateral_value, 1_000);
	assert_eq!(calculation.borrow_limit, 0);
	assert_eq!(
		validate_borrow(&pool, &borrower, &usdc, 1, &oracle, 0),
		Err(ErrorCode::InsufficientBorrowLimit)
	);
}

#[test]
fn unknown_user_has_no_limit() {
	let pool = active_pool(
		&Pubkey::new_unique(),
		&AssetId::from_symbol("USDC"),
		&Pubkey::new_unique(),
		0
	);
	let calculation = get_borrow_limit(&pool, &Pubkey::new_unique(), &TestOracle::new(), 0).unwrap();
	assert_eq!(calculation.borrow_limit, 0);
	assert_eq!(calculation.debt_value, 0);
}
