use crate::error::{ ErrorCode, PoolResult };
use crate::validate;
use solana_program::msg;

pub fn validate_amount(amount: u128) -> PoolResult {
	validate!(amount > 0, ErrorCode::NotPositive, "amount must be positive")
}
