pub mod backstop;
pub mod balance;
pub mod bn;
pub mod borrow_limit;
pub mod casting;
pub mod ceil_div;
pub mod constants;
pub mod interest;
pub mod liquidation;
pub mod oracle;
pub mod safe_math;
