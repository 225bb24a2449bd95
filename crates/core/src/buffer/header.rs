// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_type::{Error, Result, SchemaId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HybridRowVersion {
	Invalid = 0,
	V1 = 0x81,
}

impl HybridRowVersion {
	pub fn from_u8(value: u8) -> Self {
		match value {
			0x81 => HybridRowVersion::V1,
			_ => HybridRowVersion::Invalid,
		}
	}
}

/// Leading bytes of every row: `version:u8 schema-id:i32le`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HybridRowHeader {
	pub version: HybridRowVersion,
	pub schema_id: SchemaId,
}

impl HybridRowHeader {
	pub const SIZE: usize = 1 + SchemaId::SIZE;

	pub fn new(version: HybridRowVersion, schema_id: SchemaId) -> Self {
		Self {
			version,
			schema_id,
		}
	}

	pub fn encode(&self) -> [u8; Self::SIZE] {
		let mut result = [0u8; Self::SIZE];
		result[0] = self.version as u8;
		result[1..].copy_from_slice(&self.schema_id.to_le_bytes());
		result
	}

	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let header = bytes.get(..Self::SIZE).ok_or(Error::InvalidRow)?;
		let mut id = [0u8; SchemaId::SIZE];
		id.copy_from_slice(&header[1..]);
		Ok(Self {
			version: HybridRowVersion::from_u8(header[0]),
			schema_id: SchemaId::from_le_bytes(id),
		})
	}
}
