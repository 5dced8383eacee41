use anchor_lang::prelude::*;
use borsh::{ BorshDeserialize, BorshSerialize };

use crate::state::auction::AuctionType;
use crate::state::reserve::AssetId;
use crate::state::state::PoolStatus;

#[derive(Clone, Copy, BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Default)]
pub enum BalanceAction {
	#[default]
	Deposit,
	Withdraw,
	Borrow,
	Repay,
}

#[event]
#[derive(Default)]
pub struct BalanceRecord {
	/// unix_timestamp of action
	pub ts: i64,
	pub user: Pubkey,
	pub action: BalanceAction,
	pub asset: AssetId,
	/// asset units moved in or out of the pool
	pub amount: u128,
	/// bTokens for deposits and withdrawals, dTokens otherwise
	pub tokens: u128,
	/// precision: SCALAR_12
	pub token_rate: u128,
	pub pool_balance_after: u128,
}

#[derive(Clone, Copy, BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Default)]
pub enum CollateralAction {
	#[default]
	Add,
	Remove,
}

#[event]
#[derive(Default)]
pub struct CollateralRecord {
	pub ts: i64,
	pub user: Pubkey,
	pub action: CollateralAction,
	pub rwa_token: Pubkey,
	pub amount: u128,
	pub collateral_after: u128,
}

#[event]
#[derive(Default)]
pub struct InterestRecord {
	pub ts: i64,
	pub asset: AssetId,
	pub elapsed: i64,
	/// precision: SCALAR_7
	pub utilization: u128,
	/// annual rate, precision: SCALAR_7
	pub interest_rate: u128,
	/// precision: SCALAR_12
	pub b_token_rate: u128,
	/// precision: SCALAR_12
	pub d_token_rate: u128,
	/// precision: SCALAR_7
	pub rate_modifier: u128,
	pub interest: u128,
	pub backstop_share: u128,
}

#[derive(Clone, Copy, BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Default)]
pub enum AuctionAction {
	#[default]
	Create,
	Fill,
	Cancel,
}

#[event]
#[derive(Default)]
pub struct AuctionRecord {
	pub ts: i64,
	pub auction_id: u64,
	pub auction_type: AuctionType,
	pub action: AuctionAction,
	pub borrower: Pubkey,
	pub rwa_token: Pubkey,
	pub debt_asset: AssetId,
	/// the account creating, filling or cancelling the auction
	pub filler: Pubkey,
	/// lot delivered (or offered, on creation)
	pub lot: u128,
	/// bid paid (or asked, on creation)
	pub bid: u128,
}

#[event]
#[derive(Default)]
pub struct BadDebtRecord {
	pub ts: i64,
	pub borrower: Pubkey,
	pub asset: AssetId,
	/// dTokens cleared against the reserve's backstop credit
	pub d_tokens_written_off: u128,
	pub backstop_credit_used: u128,
	/// dTokens moved onto the backstop's books
	pub d_tokens_to_backstop: u128,
}

#[derive(Clone, Copy, BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Default)]
pub enum BackstopAction {
	#[default]
	Deposit,
	QueueWithdrawal,
	CancelWithdrawal,
	Withdraw,
}

#[event]
#[derive(Default)]
pub struct BackstopRecord {
	pub ts: i64,
	pub depositor: Pubkey,
	pub action: BackstopAction,
	/// backstop tokens
	pub amount: u128,
	pub shares: u128,
	pub backstop_total_after: u128,
	pub total_shares_after: u128,
}

#[derive(Clone, Copy, BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Default)]
pub enum AdminAction {
	#[default]
	Initialize,
	SetAdmin,
	SetCollateralFactor,
	SetInterestRateParams,
	SetPoolState,
	SetBackstopThreshold,
	SetBackstopTakeRate,
	SetTokenContract,
	SetBackstopToken,
	Upgrade,
}

#[event]
#[derive(Default)]
pub struct AdminRecord {
	pub ts: i64,
	pub admin: Pubkey,
	pub action: AdminAction,
	pub pool_status: PoolStatus,
}

#[event]
pub struct UpgradeRecord {
	pub ts: i64,
	pub admin: Pubkey,
	pub code_hash: [u8; 32],
}
