pub mod amount;
pub mod borrow_limit;
