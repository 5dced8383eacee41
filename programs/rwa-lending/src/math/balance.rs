use crate::error::PoolResult;
use crate::math::bn::U192;
use crate::math::constants::SCALAR_12;
use crate::math::safe_math::SafeMath;
use crate::state::reserve::Reserve;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum BalanceType {
	/// bTokens, a claim on pool liquidity
	Supply,
	/// dTokens, an obligation to the pool
	Debt,
}

fn get_rate(reserve: &Reserve, balance_type: &BalanceType) -> u128 {
	match balance_type {
		BalanceType::Supply => reserve.b_token_rate,
		BalanceType::Debt => reserve.d_token_rate,
	}
}

fn mul_div(a: u128, b: u128, c: u128, round_up: bool) -> PoolResult<u128> {
	let numerator = U192::from(a).safe_mul(U192::from(b))?;
	let result = if round_up {
		numerator.safe_div_ceil(U192::from(c))?
	} else {
		numerator.safe_div(U192::from(c))?
	};
	result.try_to_u128()
}

/// Converts an asset amount into bTokens or dTokens
pub fn get_token_balance(
	token_amount: u128,
	reserve: &Reserve,
	balance_type: &BalanceType,
	round_up: bool
) -> PoolResult<u128> {
	mul_div(token_amount, SCALAR_12, get_rate(reserve, balance_type), round_up)
}

/// Converts bTokens or dTokens into an asset amount
pub fn get_token_amount(
	token_balance: u128,
	reserve: &Reserve,
	balance_type: &BalanceType,
	round_up: bool
) -> PoolResult<u128> {
	mul_div(token_balance, get_rate(reserve, balance_type), SCALAR_12, round_up)
}

pub fn get_token_amount_floor(
	token_balance: u128,
	reserve: &Reserve,
	balance_type: &BalanceType
) -> PoolResult<u128> {
	get_token_amount(token_balance, reserve, balance_type, false)
}

/// bTokens minted for a deposit, rounded in favor of the pool
pub fn get_b_tokens_for_deposit(amount: u128, reserve: &Reserve) -> PoolResult<u128> {
	get_token_balance(amount, reserve, &BalanceType::Supply, false)
}

/// Asset amount paid out for burnt bTokens, rounded in favor of the pool
pub fn get_withdrawal_amount(b_tokens: u128, reserve: &Reserve) -> PoolResult<u128> {
	get_token_amount(b_tokens, reserve, &BalanceType::Supply, false)
}

/// dTokens minted for a borrow, rounded in favor of the pool
pub fn get_d_tokens_for_borrow(amount: u128, reserve: &Reserve) -> PoolResult<u128> {
	get_token_balance(amount, reserve, &BalanceType::Debt, true)
}

/// Asset amount owed for dTokens, rounded in favor of the pool
pub fn get_repayment_amount(d_tokens: u128, reserve: &Reserve) -> PoolResult<u128> {
	get_token_amount(d_tokens, reserve, &BalanceType::Debt, true)
}

/// dTokens cleared by a payment of `amount`, rounded in favor of the pool
pub fn get_d_tokens_repaid(amount: u128, reserve: &Reserve) -> PoolResult<u128> {
	get_token_balance(amount, reserve, &BalanceType::Debt, false)
}

/// Splits a payment of `amount` against `d_token_balance` dTokens into
/// (amount taken, dTokens cleared). A payment covering the whole balance only
/// takes what that balance is worth.
pub fn calculate_debt_payment(
	amount: u128,
	d_token_balance: u128,
	reserve: &Reserve
) -> PoolResult<(u128, u128)> {
	let d_tokens_repaid = get_d_tokens_repaid(amount, reserve)?;

	if d_tokens_repaid >= d_token_balance {
		let amount_owed = get_repayment_amount(d_token_balance, reserve)?;
		Ok((amount_owed.min(amount), d_token_balance))
	} else {
		Ok((amount, d_tokens_repaid))
	}
}
