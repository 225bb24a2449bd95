// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_type::LayoutCode;
use serde::{Deserialize, Serialize};

/// Where a top-level primitive column lives in the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
	/// Located by path at runtime.
	#[default]
	Sparse,
	/// Stored at a compile-time offset in the fixed region.
	Fixed,
	/// Length-prefixed, located by walking earlier variable columns.
	Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
	Null,
	Boolean,
	Int8,
	Int16,
	Int32,
	Int64,
	UInt8,
	UInt16,
	UInt32,
	UInt64,
	VarInt,
	VarUInt,
	Float32,
	Float64,
	Float128,
	Decimal,
	DateTime,
	UnixDateTime,
	Guid,
	MongoDbObjectId,
	Utf8,
	Binary,
	/// Untyped item; only meaningful as the item type of an array.
	Any,
}

impl TypeKind {
	pub fn code(self) -> Option<LayoutCode> {
		let code = match self {
			TypeKind::Null => LayoutCode::Null,
			TypeKind::Boolean => LayoutCode::Boolean,
			TypeKind::Int8 => LayoutCode::Int8,
			TypeKind::Int16 => LayoutCode::Int16,
			TypeKind::Int32 => LayoutCode::Int32,
			TypeKind::Int64 => LayoutCode::Int64,
			TypeKind::UInt8 => LayoutCode::UInt8,
			TypeKind::UInt16 => LayoutCode::UInt16,
			TypeKind::UInt32 => LayoutCode::UInt32,
			TypeKind::UInt64 => LayoutCode::UInt64,
			TypeKind::VarInt => LayoutCode::VarInt,
			TypeKind::VarUInt => LayoutCode::VarUInt,
			TypeKind::Float32 => LayoutCode::Float32,
			TypeKind::Float64 => LayoutCode::Float64,
			TypeKind::Float128 => LayoutCode::Float128,
			TypeKind::Decimal => LayoutCode::Decimal,
			TypeKind::DateTime => LayoutCode::DateTime,
			TypeKind::UnixDateTime => LayoutCode::UnixDateTime,
			TypeKind::Guid => LayoutCode::Guid,
			TypeKind::MongoDbObjectId => LayoutCode::MongoDbObjectId,
			TypeKind::Utf8 => LayoutCode::Utf8,
			TypeKind::Binary => LayoutCode::Binary,
			TypeKind::Any => return None,
		};
		Some(code)
	}
}
