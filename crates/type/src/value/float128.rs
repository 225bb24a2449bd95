// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// IEEE 754 binary128 value carried as its raw bits.
///
/// Arithmetic is out of scope; the value round-trips through rows unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Float128 {
	pub low: i64,
	pub high: i64,
}

impl Float128 {
	pub const SIZE: usize = 16;

	pub const fn new(high: i64, low: i64) -> Self {
		Self {
			low,
			high,
		}
	}

	pub fn to_le_bytes(self) -> [u8; 16] {
		let mut result = [0u8; 16];
		result[..8].copy_from_slice(&self.low.to_le_bytes());
		result[8..].copy_from_slice(&self.high.to_le_bytes());
		result
	}

	pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
		let mut low = [0u8; 8];
		let mut high = [0u8; 8];
		low.copy_from_slice(&bytes[..8]);
		high.copy_from_slice(&bytes[8..]);
		Self {
			low: i64::from_le_bytes(low),
			high: i64::from_le_bytes(high),
		}
	}
}

impl Display for Float128 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "0x{:016x}{:016x}", self.high as u64, self.low as u64)
	}
}
