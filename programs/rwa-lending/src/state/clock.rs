/// Source of the ledger's current unix timestamp.
pub trait Clock {
	fn unix_timestamp(&self) -> i64;
}
