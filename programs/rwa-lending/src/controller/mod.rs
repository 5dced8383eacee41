pub mod backstop;
pub mod balance;
pub mod collateral;
pub mod interest;
pub mod liquidation;
pub mod token;
