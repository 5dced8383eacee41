use crate::math::balance::*;
use crate::math::constants::SCALAR_12;
use crate::state::reserve::{ AssetId, Reserve };

fn reserve_with_rates(b_token_rate: u128, d_token_rate: u128) -> Reserve {
	let mut reserve = Reserve::new(AssetId::from_symbol("USDC"), 0);
	reserve.b_token_rate = b_token_rate;
	reserve.d_token_rate = d_token_rate;
	reserve
}

#[test]
fn deposit_at_par_mints_one_to_one() {
	let reserve = reserve_with_rates(SCALAR_12, SCALAR_12);
	assert_eq!(get_b_tokens_for_deposit(1000, &reserve).unwrap(), 1000);
	assert_eq!(get_withdrawal_amount(1000, &reserve).unwrap(), 1000);
}

#[test]
fn supply_conversions_round_down() {
	// 1.05
	let reserve = reserve_with_rates(1_050_000_000_000, SCALAR_12);

	// 1000 / 1.05 = 952.38
	assert_eq!(get_b_tokens_for_deposit(1000, &reserve).unwrap(), 952);
	// 952 * 1.05 = 999.6
	assert_eq!(get_withdrawal_amount(952, &reserve).unwrap(), 999);
	assert_eq!(get_withdrawal_amount(1000, &reserve).unwrap(), 1050);
}

#[test]
fn debt_conversions_round_against_borrower() {
	// 1.03
	let reserve = reserve_with_rates(SCALAR_12, 1_030_000_000_000);

	// 100 / 1.03 = 97.08
	assert_eq!(get_d_tokens_for_borrow(100, &reserve).unwrap(), 98);
	assert_eq!(get_d_tokens_repaid(100, &reserve).unwrap(), 97);
	// 97 * 1.03 = 99.91
	assert_eq!(get_repayment_amount(97, &reserve).unwrap(), 100);
	assert_eq!(
		get_token_amount_floor(97, &reserve, &BalanceType::Debt).unwrap(),
		99
	);
}

#[test]
fn large_balances_use_wide_intermediates() {
	let reserve = reserve_with_rates(2 * SCALAR_12, 2 * SCALAR_12);
	let amount = u128::MAX / 4;

	assert_eq!(get_withdrawal_amount(amount, &reserve).unwrap(), amount * 2);
	assert!(get_withdrawal_amount(u128::MAX, &reserve).is_err());
}
