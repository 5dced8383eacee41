use anchor_lang::prelude::*;

pub type PoolResult<T = ()> = std::result::Result<T, ErrorCode>;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum ErrorCode {
	// Authorization
	#[msg("Caller is not authorized for this action")]
	NotAuthorized,

	// Lifecycle
	#[msg("Pool has not been initialized")]
	NotInitialized,
	#[msg("Pool is already initialized")]
	AlreadyInitialized,
	#[msg("Pool is frozen")]
	PoolFrozen,
	#[msg("Pool is on ice")]
	PoolOnIce,

	// Arithmetic
	#[msg("Amount must be positive")]
	NotPositive,
	#[msg("Arithmetic error")]
	ArithmeticError,
	#[msg("Math Error")]
	MathError,
	#[msg("Casting Failure")]
	CastingFailure,
	#[msg("Conversion to u128/u64 failed with an overflow or underflow")]
	BnConversionError,
	#[msg("Ledger timestamp moved backwards")]
	InvalidLedgerSequence,
	#[msg("Interest accrual failed")]
	RateAccrualError,
	#[msg("Utilization rate out of bounds")]
	InvalidUtilRate,

	// Liquidity / balances
	#[msg("Insufficient pool balance")]
	InsufficientPoolBalance,
	#[msg("Insufficient liquidity to borrow")]
	InsufficientLiquidity,
	#[msg("Insufficient bToken balance")]
	InsufficientBTokenBalance,
	#[msg("Insufficient dToken balance")]
	InsufficientDTokenBalance,
	#[msg("Deposit amount too small to mint bTokens")]
	InsufficientDepositAmount,
	#[msg("Insufficient balance to withdraw")]
	InsufficientWithdrawalBalance,
	#[msg("No debt to repay")]
	InsufficientDebtToRepay,

	// Collateral / borrowing
	#[msg("Insufficient collateral")]
	InsufficientCollateral,
	#[msg("Insufficient borrow limit")]
	InsufficientBorrowLimit,
	#[msg("Collateral not found")]
	CollateralNotFound,
	#[msg("Collateral amount too large")]
	CollateralAmountTooLarge,
	#[msg("Invalid collateral factor")]
	InvalidCollateralFactor,
	#[msg("Debt asset already set")]
	DebtAssetAlreadySet,
	#[msg("Debt asset not set")]
	DebtAssetNotSet,
	#[msg("Cannot borrow a second asset while debt is outstanding")]
	CannotSwitchDebtAsset,

	// Rate configuration
	#[msg("Invalid interest rate params")]
	InvalidInterestRateParams,
	#[msg("Invalid utilization ratio")]
	InvalidUtilizationRatio,

	// Liquidation
	#[msg("Position is not insolvent")]
	CDPNotInsolvent,
	#[msg("Auction not found")]
	AuctionNotFound,
	#[msg("Auction not active")]
	AuctionNotActive,
	#[msg("Auction already filled")]
	AuctionAlreadyFilled,
	#[msg("An auction is already in progress for this position")]
	AuctionAlreadyInProgress,
	#[msg("Invalid auction type")]
	InvalidAuctionType,
	#[msg("Invalid liquidation amount")]
	InvalidLiquidationAmount,
	#[msg("Health factor too high after liquidation")]
	HealthFactorTooHigh,
	#[msg("Health factor too low")]
	HealthFactorTooLow,

	// Backstop
	#[msg("Insufficient backstop deposit")]
	InsufficientBackstopDeposit,
	#[msg("Withdrawal already queued")]
	WithdrawalQueueActive,
	#[msg("Withdrawal queue cooldown has not expired")]
	WithdrawalQueueNotExpired,
	#[msg("Withdrawal not queued")]
	WithdrawalNotQueued,
	#[msg("Bad debt not covered by backstop")]
	BadDebtNotCovered,
	#[msg("Backstop threshold not met")]
	BackstopThresholdNotMet,
	#[msg("Not enough backstop credit to auction")]
	InsufficientBackstopCredit,

	// Oracle
	#[msg("Oracle price fetch failed")]
	OraclePriceFetchFailed,
	#[msg("Oracle decimals fetch failed")]
	OracleDecimalsFetchFailed,
	#[msg("Invalid oracle price")]
	InvalidOraclePrice,
	#[msg("Asset not found in oracle")]
	AssetNotFoundInOracle,
	#[msg("Token contract not set")]
	TokenContractNotSet,
	#[msg("Reserve not found")]
	ReserveNotFound,
	#[msg("Token transfer failed")]
	TokenTransferFailed,
}

#[macro_export]
macro_rules! print_error {
	($err:expr) => {
		{
		|| {
			let error_code: ErrorCode = $err;
			msg!("{:?} thrown at {}:{}", error_code, file!(), line!());
			error_code
		}
		}
	};
}

