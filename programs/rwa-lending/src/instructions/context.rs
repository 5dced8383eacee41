use anchor_lang::prelude::*;

use crate::controller::token::PendingTransfers;
use crate::state::oracle::PriceOracle;

/// Everything a handler sees besides the pool it mutates: the call's
/// timestamp, the price feed and the transfers it wants executed once it
/// succeeds.
pub struct Invocation<'a> {
	pub now: i64,
	pub pool_address: Pubkey,
	pub oracle: &'a dyn PriceOracle,
	pub transfers: PendingTransfers,
}

impl<'a> Invocation<'a> {
	pub fn new(pool_address: Pubkey, oracle: &'a dyn PriceOracle, now: i64) -> Invocation<'a> {
		Invocation {
			now,
			pool_address,
			oracle,
			transfers: PendingTransfers::new(pool_address),
		}
	}
}
