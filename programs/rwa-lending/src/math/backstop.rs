use crate::error::PoolResult;
use crate::math::bn::U192;
use crate::math::safe_math::SafeMath;

pub fn amount_to_backstop_shares(
	amount: u128,
	total_shares: u128,
	backstop_total: u128
) -> PoolResult<u128> {
	// first deposit mints one share per token
	if total_shares == 0 {
		return Ok(amount);
	}

	U192::from(amount)
		.safe_mul(U192::from(total_shares))?
		.safe_div(U192::from(backstop_total))?
		.try_to_u128()
}

pub fn backstop_shares_to_amount(
	shares: u128,
	total_shares: u128,
	backstop_total: u128
) -> PoolResult<u128> {
	if total_shares == 0 {
		return Ok(0);
	}

	U192::from(shares)
		.safe_mul(U192::from(backstop_total))?
		.safe_div(U192::from(total_shares))?
		.try_to_u128()
}

#[cfg(test)]
mod tests {
	use crate::math::backstop::*;

	#[test]
	fn first_deposit_is_one_to_one() {
		assert_eq!(amount_to_backstop_shares(500, 0, 0).unwrap(), 500);
	}

	#[test]
	fn shares_track_losses_pro_rata() {
		// 1000 shares backed by 800 tokens after a loss
		assert_eq!(amount_to_backstop_shares(400, 1000, 800).unwrap(), 500);
		assert_eq!(backstop_shares_to_amount(500, 1000, 800).unwrap(), 400);
		assert_eq!(backstop_shares_to_amount(1000, 1000, 800).unwrap(), 800);
	}

	#[test]
	fn depleted_backstop_cannot_price_shares() {
		assert!(amount_to_backstop_shares(1, 1000, 0).is_err());
		assert_eq!(backstop_shares_to_amount(1000, 1000, 0).unwrap(), 0);
	}
}
