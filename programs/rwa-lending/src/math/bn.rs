//! Wide integers for intermediate products that can exceed 128 bits.
#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use crate::error::{ ErrorCode::BnConversionError, PoolResult };
use uint::construct_uint;

construct_uint! {
	/// 192-bit unsigned integer.
	pub struct U192(3);
}

impl U192 {
	/// Convert u192 to u128, failing when the value does not fit
	pub fn try_to_u128(self) -> PoolResult<u128> {
		if self.bits() > 128 {
			return Err(BnConversionError);
		}

		Ok(self.low_u128())
	}
}
