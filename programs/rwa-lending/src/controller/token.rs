use anchor_lang::prelude::*;

use crate::error::PoolResult;

/// Token movement primitive supplied by the host ledger.
pub trait TokenClient {
	fn transfer(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> PoolResult;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenTransfer {
	pub token: Pubkey,
	pub from: Pubkey,
	pub to: Pubkey,
	pub amount: u128,
}

/// Transfers requested by a call, executed only after the call succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingTransfers {
	pool_address: Pubkey,
	transfers: Vec<TokenTransfer>,
}

impl PendingTransfers {
	pub fn new(pool_address: Pubkey) -> PendingTransfers {
		PendingTransfers {
			pool_address,
			transfers: Vec::new(),
		}
	}

	/// Pull `amount` of `token` from `from` into the pool
	pub fn receive(&mut self, token: &Pubkey, from: &Pubkey, amount: u128) {
		if amount == 0 {
			return;
		}
		self.transfers.push(TokenTransfer {
			token: *token,
			from: *from,
			to: self.pool_address,
			amount,
		});
	}

	/// Push `amount` of `token` from the pool to `to`
	pub fn send_from_pool(&mut self, token: &Pubkey, to: &Pubkey, amount: u128) {
		if amount == 0 {
			return;
		}
		self.transfers.push(TokenTransfer {
			token: *token,
			from: self.pool_address,
			to: *to,
			amount,
		});
	}

	pub fn len(&self) -> usize {
		self.transfers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transfers.is_empty()
	}

	/// Executes every transfer, pulls into the pool before pushes out of it.
	/// On the first failure the transfers already made are sent back, last
	/// first, and the failure is returned.
	pub fn execute(self, client: &mut dyn TokenClient) -> PoolResult {
		let pool_address = self.pool_address;
		let (pulls, pushes): (Vec<TokenTransfer>, Vec<TokenTransfer>) = self.transfers
			.into_iter()
			.partition(|transfer| transfer.to == pool_address);

		let mut executed: Vec<&TokenTransfer> = Vec::with_capacity(pulls.len() + pushes.len());
		for transfer in pulls.iter().chain(pushes.iter()) {
			let result = client.transfer(&transfer.token, &transfer.from, &transfer.to, transfer.amount);
			if let Err(e) = result {
				msg!(
					"Transfer of {} {} from {} to {} failed",
					transfer.amount,
					transfer.token,
					transfer.from,
					transfer.to
				);
				revert(client, &executed);
				return Err(e);
			}
			executed.push(transfer);
		}

		Ok(())
	}
}

fn revert(client: &mut dyn TokenClient, executed: &[&TokenTransfer]) {
	for transfer in executed.iter().rev() {
		if client.transfer(&transfer.token, &transfer.to, &transfer.from, transfer.amount).is_err() {
			msg!(
				"Could not return {} {} from {} to {}",
				transfer.amount,
				transfer.token,
				transfer.to,
				transfer.from
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use anchor_lang::prelude::Pubkey;

	use crate::controller::token::PendingTransfers;
	use crate::error::ErrorCode;
	use crate::test_utils::TestTokenClient;

	#[test]
	fn pulls_execute_before_pushes() {
		let pool = Pubkey::new_unique();
		let user = Pubkey::new_unique();
		let usdc = Pubkey::new_unique();
		let rwa = Pubkey::new_unique();

		let mut client = TestTokenClient::default();
		client.mint(&usdc, &user, 100);

		// the pool only holds usdc once the pull has landed
		let mut transfers = PendingTransfers::new(pool);
		transfers.send_from_pool(&usdc, &user, 40);
		transfers.receive(&usdc, &user, 100);
		transfers.receive(&rwa, &user, 0);
		assert_eq!(transfers.len(), 2);

		transfers.execute(&mut client).unwrap();
		assert_eq!(client.balance(&usdc, &pool), 60);
		assert_eq!(client.balance(&usdc, &user), 40);
	}

	#[test]
	fn stops_at_first_failure() {
		let pool = Pubkey::new_unique();
		let user = Pubkey::new_unique();
		let usdc = Pubkey::new_unique();

		let mut client = TestTokenClient::default();
		client.mint(&usdc, &pool, 10);

		let mut transfers = PendingTransfers::new(pool);
		assert!(transfers.is_empty());
		transfers.receive(&usdc, &user, 5);
		transfers.send_from_pool(&usdc, &user, 10);

		assert_eq!(transfers.execute(&mut client), Err(ErrorCode::TokenTransferFailed));
		assert_eq!(client.balance(&usdc, &pool), 10);
		assert_eq!(client.balance(&usdc, &user), 0);
	}

	#[test]
	fn failed_push_returns_the_pull() {
		let pool = Pubkey::new_unique();
		let filler = Pubkey::new_unique();
		let usdc = Pubkey::new_unique();
		let rwa = Pubkey::new_unique();

		let mut client = TestTokenClient::default();
		client.mint(&usdc, &filler, 100);
		client.mint(&usdc, &pool, 7);
		client.mint(&rwa, &pool, 20);

		// pool only holds 20 rwa
		let mut transfers = PendingTransfers::new(pool);
		transfers.receive(&usdc, &filler, 100);
		transfers.send_from_pool(&usdc, &filler, 5);
		transfers.send_from_pool(&rwa, &filler, 50);

		assert_eq!(transfers.execute(&mut client), Err(ErrorCode::TokenTransferFailed));
		assert_eq!(client.balance(&usdc, &filler), 100);
		assert_eq!(client.balance(&usdc, &pool), 7);
		assert_eq!(client.balance(&rwa, &filler), 0);
		assert_eq!(client.balance(&rwa, &pool), 20);
	}
}
