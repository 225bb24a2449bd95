// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// 12-byte MongoDB ObjectId, stored big-endian as on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MongoDbObjectId(pub [u8; 12]);

impl MongoDbObjectId {
	pub const SIZE: usize = 12;

	pub fn new(high: u32, low: u64) -> Self {
		let mut bytes = [0u8; 12];
		bytes[..4].copy_from_slice(&high.to_be_bytes());
		bytes[4..].copy_from_slice(&low.to_be_bytes());
		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8; 12] {
		&self.0
	}
}

impl Display for MongoDbObjectId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for b in self.0 {
			write!(f, "{:02x}", b)?;
		}
		Ok(())
	}
}
