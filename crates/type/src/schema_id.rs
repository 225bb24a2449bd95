// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifies a compiled schema within a resolver's namespace.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(pub i32);

impl SchemaId {
	/// Reserved for "no schema".
	pub const INVALID: SchemaId = SchemaId(0);

	/// Size of an encoded schema id in bytes.
	pub const SIZE: usize = 4;

	pub const fn new(id: i32) -> Self {
		Self(id)
	}

	pub const fn id(self) -> i32 {
		self.0
	}

	pub const fn is_valid(self) -> bool {
		self.0 != 0
	}

	pub fn to_le_bytes(self) -> [u8; 4] {
		self.0.to_le_bytes()
	}

	pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
		Self(i32::from_le_bytes(bytes))
	}
}

impl From<i32> for SchemaId {
	fn from(value: i32) -> Self {
		Self(value)
	}
}

impl Display for SchemaId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
