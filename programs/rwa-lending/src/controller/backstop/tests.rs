use anchor_lang::prelude::Pubkey;

use crate::controller::backstop::*;
use crate::error::ErrorCode;
use crate::math::constants::BACKSTOP_WITHDRAWAL_QUEUE_SECONDS;
use crate::state::backstop::Backstop;

#[test]
fn deposits_mint_shares_pro_rata() {
	let alice = Pubkey::new_unique();
	let bob = Pubkey::new_unique();
	let mut backstop = Backstop::default();

	assert_eq!(add_backstop_deposit(&mut backstop, &alice, 1_000, 0), Ok(1_000));

	// a loss halves the value of each share
	backstop.decrease_total(500).unwrap();
	assert_eq!(add_backstop_deposit(&mut backstop, &bob, 500, 0), Ok(1_000));

	assert_eq!(backstop.total, 1_000);
	assert_eq!(backstop.total_shares, 2_000);
	assert_eq!(backstop.get_deposit(&bob).shares, 1_000);
}

#[test]
fn depleted_backstop_rejects_deposits() {
	let alice = Pubkey::new_unique();
	let mut backstop = Backstop::default();
	add_backstop_deposit(&mut backstop, &alice, 1_000, 0).unwrap();
	backstop.decrease_total(1_000).unwrap();

	assert_eq!(
		add_backstop_deposit(&mut backstop, &alice, 1_000, 0),
		Err(ErrorCode::InsufficientBackstopDeposit)
	);
}

#[test]
fn withdrawal_queue_lifecycle() {
	let alice = Pubkey::new_unique();
	let mut backstop = Backstop::default();

	assert_eq!(
		request_backstop_withdrawal(&mut backstop, &alice, 1, 0),
		Err(ErrorCode::InsufficientBackstopDeposit)
	);

	add_backstop_deposit(&mut backstop, &alice, 1_000, 0).unwrap();

	assert_eq!(
		request_backstop_withdrawal(&mut backstop, &alice, 1_001, 10),
		Err(ErrorCode::InsufficientWithdrawalBalance)
	);
	assert_eq!(
		remove_backstop_deposit(&mut backstop, &alice, 10),
		Err(ErrorCode::WithdrawalNotQueued)
	);

	request_backstop_withdrawal(&mut backstop, &alice, 400, 10).unwrap();
	assert!(backstop.get_deposit(&alice).in_withdrawal_queue);
	assert_eq!(
		request_backstop_withdrawal(&mut backstop, &alice, 100, 11),
		Err(ErrorCode::WithdrawalQueueActive)
	);

	let unlocks_at = 10 + BACKSTOP_WITHDRAWAL_QUEUE_SECONDS;
	assert_eq!(
		remove_backstop_deposit(&mut backstop, &alice, unlocks_at - 1),
		Err(ErrorCode::WithdrawalQueueNotExpired)
	);

	assert_eq!(remove_backstop_deposit(&mut backstop, &alice, unlocks_at), Ok((400, 400)));
	assert_eq!(backstop.total, 600);
	assert_eq!(backstop.total_shares, 600);
	assert!(backstop.withdrawal_queue.is_empty());

	let deposit = backstop.get_deposit(&alice);
	assert_eq!(deposit.shares, 600);
	assert!(!deposit.in_withdrawal_queue);
}

#[test]
fn cancelled_request_leaves_the_queue() {
	let alice = Pubkey::new_unique();
	let mut backstop = Backstop::default();
	add_backstop_deposit(&mut backstop, &alice, 1_000, 0).unwrap();

	assert_eq!(
		cancel_backstop_withdrawal_request(&mut backstop, &alice),
		Err(ErrorCode::WithdrawalNotQueued)
	);

	request_backstop_withdrawal(&mut backstop, &alice, 1_000, 5).unwrap();
	assert_eq!(cancel_backstop_withdrawal_request(&mut backstop, &alice), Ok(1_000));
	assert!(backstop.withdrawal_queue.is_empty());
	assert!(!backstop.get_deposit(&alice).in_withdrawal_queue);

	// can queue again
	request_backstop_withdrawal(&mut backstop, &alice, 1_000, 6).unwrap();
}

#[test]
fn queued_shares_bear_losses() {
	let alice = Pubkey::new_unique();
	let mut backstop = Backstop::default();
	add_backstop_deposit(&mut backstop, &alice, 1_000, 0).unwrap();
	request_backstop_withdrawal(&mut backstop, &alice, 1_000, 0).unwrap();

	backstop.decrease_total(250).unwrap();

	assert_eq!(
		remove_backstop_deposit(&mut backstop, &alice, BACKSTOP_WITHDRAWAL_QUEUE_SECONDS),
		Ok((750, 1_000))
	);
	assert_eq!(backstop.total, 0);
}
