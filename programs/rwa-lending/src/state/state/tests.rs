use anchor_lang::prelude::Pubkey;

use crate::error::ErrorCode;
use crate::state::paused_operations::PoolOperation;
use crate::state::state::{ validate_backstop_take_rate, PoolStatus, State };

#[test]
fn new_pool_starts_on_ice() {
	let state = State::new(Pubkey::new_unique(), 1_000, 1_000_000);
	assert_eq!(state.pool_status, PoolStatus::OnIce);
	assert_eq!(state.next_auction_id, 1);
}

#[test]
fn active_allows_everything() {
	for operation in [PoolOperation::Deposit, PoolOperation::Borrow, PoolOperation::Backstop] {
		assert_eq!(PoolStatus::Active.validate_operation(operation), Ok(()));
	}
}

#[test]
fn on_ice_only_allows_risk_reducing_operations() {
	let status = PoolStatus::OnIce;
	assert_eq!(status.validate_operation(PoolOperation::Deposit), Err(ErrorCode::PoolOnIce));
	assert_eq!(status.validate_operation(PoolOperation::Borrow), Err(ErrorCode::PoolOnIce));
	assert_eq!(status.validate_operation(PoolOperation::AddCollateral), Err(ErrorCode::PoolOnIce));

	assert!(status.is_operation_allowed(PoolOperation::Withdraw));
	assert!(status.is_operation_allowed(PoolOperation::Repay));
	assert!(status.is_operation_allowed(PoolOperation::RemoveCollateral));
	assert!(status.is_operation_allowed(PoolOperation::Liquidation));
	assert!(status.is_operation_allowed(PoolOperation::Backstop));
}

#[test]
fn frozen_allows_nothing() {
	let status = PoolStatus::Frozen;
	assert_eq!(status.validate_operation(PoolOperation::Withdraw), Err(ErrorCode::PoolFrozen));
	assert_eq!(status.validate_operation(PoolOperation::Repay), Err(ErrorCode::PoolFrozen));
	assert_eq!(status.validate_operation(PoolOperation::Backstop), Err(ErrorCode::PoolFrozen));
}

#[test]
fn admin_validation() {
	let admin = Pubkey::new_unique();
	let state = State::new(admin, 0, 0);
	assert_eq!(state.validate_admin(&admin), Ok(()));
	assert_eq!(state.validate_admin(&Pubkey::new_unique()), Err(ErrorCode::NotAuthorized));
}

#[test]
fn take_rate_bounds() {
	assert_eq!(validate_backstop_take_rate(10_000_000), Ok(()));
	assert_eq!(
		validate_backstop_take_rate(10_000_001),
		Err(ErrorCode::InvalidInterestRateParams)
	);
}
