use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::state::pool::Pool;
use crate::validate;

/// Returns the borrower's collateral after the deposit
pub fn add_collateral(
	pool: &mut Pool,
	borrower: &Pubkey,
	rwa_token: &Pubkey,
	amount: u128
) -> PoolResult<u128> {
	let user = pool.users.get_or_create_mut(borrower);
	user.add_collateral(rwa_token, amount)?;
	Ok(user.get_collateral(rwa_token))
}

/// Returns the borrower's collateral after the removal
pub fn remove_collateral(
	pool: &mut Pool,
	borrower: &Pubkey,
	rwa_token: &Pubkey,
	amount: u128
) -> PoolResult<u128> {
	validate!(
		!pool.auctions.is_collateral_locked(borrower, rwa_token),
		ErrorCode::AuctionAlreadyInProgress,
		"{} collateral of {} is being auctioned",
		rwa_token,
		borrower
	)?;

	let user = pool.users.get_or_create_mut(borrower);
	user.remove_collateral(rwa_token, amount)?;
	Ok(user.get_collateral(rwa_token))
}
