use enumflags2::BitFlags;
use solana_program::msg;

/// User facing operations gated by the pool status.
#[derive(BitFlags, Clone, Copy, PartialEq, Debug, Eq)]
#[repr(u16)]
pub enum PoolOperation {
	Deposit = 0b0000_0000_0001,
	Withdraw = 0b0000_0000_0010,
	Borrow = 0b0000_0000_0100,
	Repay = 0b0000_0000_1000,
	AddCollateral = 0b0000_0001_0000,
	RemoveCollateral = 0b0000_0010_0000,
	Liquidation = 0b0000_0100_0000,
	FillAuction = 0b0000_1000_0000,
	CancelAuction = 0b0001_0000_0000,
	BadDebt = 0b0010_0000_0000,
	InterestAuction = 0b0100_0000_0000,
	Backstop = 0b1000_0000_0000,
}

const ALL_POOL_OPERATIONS: [PoolOperation; 12] = [
	PoolOperation::Deposit,
	PoolOperation::Withdraw,
	PoolOperation::Borrow,
	PoolOperation::Repay,
	PoolOperation::AddCollateral,
	PoolOperation::RemoveCollateral,
	PoolOperation::Liquidation,
	PoolOperation::FillAuction,
	PoolOperation::CancelAuction,
	PoolOperation::BadDebt,
	PoolOperation::InterestAuction,
	PoolOperation::Backstop,
];

impl PoolOperation {
	/// Everything that unwinds risk: allowed while the pool is on ice
	pub fn risk_reducing() -> BitFlags<PoolOperation> {
		PoolOperation::Withdraw |
			PoolOperation::Repay |
			PoolOperation::RemoveCollateral |
			PoolOperation::Liquidation |
			PoolOperation::FillAuction |
			PoolOperation::CancelAuction |
			PoolOperation::BadDebt |
			PoolOperation::InterestAuction |
			PoolOperation::Backstop
	}

	pub fn log_all_operations_allowed(allowed: BitFlags<PoolOperation>) {
		for operation in ALL_POOL_OPERATIONS.iter() {
			if allowed.contains(*operation) {
				msg!("{:?} is allowed", operation);
			}
		}
	}
}
