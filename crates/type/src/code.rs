// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The closed catalog of HybridRow type codes.
///
/// Each code is the single byte written in front of a sparse value. Scope
/// codes come in pairs: the even code is the mutable scope and the following
/// odd code its immutable twin.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum LayoutCode {
	Invalid = 0,
	Null = 1,
	BooleanFalse = 2,
	Boolean = 3,
	Int8 = 5,
	Int16 = 6,
	Int32 = 7,
	Int64 = 8,
	UInt8 = 9,
	UInt16 = 10,
	UInt32 = 11,
	UInt64 = 12,
	VarInt = 13,
	VarUInt = 14,
	Float32 = 15,
	Float64 = 16,
	Decimal = 17,
	DateTime = 18,
	Guid = 19,
	Utf8 = 20,
	Binary = 21,
	Float128 = 22,
	UnixDateTime = 23,
	MongoDbObjectId = 24,
	ObjectScope = 30,
	ImmutableObjectScope = 31,
	ArrayScope = 32,
	ImmutableArrayScope = 33,
	TypedArrayScope = 34,
	ImmutableTypedArrayScope = 35,
	TupleScope = 36,
	ImmutableTupleScope = 37,
	TypedTupleScope = 38,
	ImmutableTypedTupleScope = 39,
	TypedMapScope = 42,
	ImmutableTypedMapScope = 43,
	TypedSetScope = 46,
	ImmutableTypedSetScope = 47,
	NullableScope = 48,
	ImmutableNullableScope = 49,
	TaggedScope = 50,
	ImmutableTaggedScope = 51,
	Tagged2Scope = 52,
	ImmutableTagged2Scope = 53,
	Schema = 68,
	ImmutableSchema = 69,
	EndScope = 70,
}

impl LayoutCode {
	pub fn to_u8(self) -> u8 {
		self as u8
	}

	pub fn from_u8(value: u8) -> Result<Self, Error> {
		let code = match value {
			0 => LayoutCode::Invalid,
			1 => LayoutCode::Null,
			2 => LayoutCode::BooleanFalse,
			3 => LayoutCode::Boolean,
			5 => LayoutCode::Int8,
			6 => LayoutCode::Int16,
			7 => LayoutCode::Int32,
			8 => LayoutCode::Int64,
			9 => LayoutCode::UInt8,
			10 => LayoutCode::UInt16,
			11 => LayoutCode::UInt32,
			12 => LayoutCode::UInt64,
			13 => LayoutCode::VarInt,
			14 => LayoutCode::VarUInt,
			15 => LayoutCode::Float32,
			16 => LayoutCode::Float64,
			17 => LayoutCode::Decimal,
			18 => LayoutCode::DateTime,
			19 => LayoutCode::Guid,
			20 => LayoutCode::Utf8,
			21 => LayoutCode::Binary,
			22 => LayoutCode::Float128,
			23 => LayoutCode::UnixDateTime,
			24 => LayoutCode::MongoDbObjectId,
			30 => LayoutCode::ObjectScope,
			31 => LayoutCode::ImmutableObjectScope,
			32 => LayoutCode::ArrayScope,
			33 => LayoutCode::ImmutableArrayScope,
			34 => LayoutCode::TypedArrayScope,
			35 => LayoutCode::ImmutableTypedArrayScope,
			36 => LayoutCode::TupleScope,
			37 => LayoutCode::ImmutableTupleScope,
			38 => LayoutCode::TypedTupleScope,
			39 => LayoutCode::ImmutableTypedTupleScope,
			42 => LayoutCode::TypedMapScope,
			43 => LayoutCode::ImmutableTypedMapScope,
			46 => LayoutCode::TypedSetScope,
			47 => LayoutCode::ImmutableTypedSetScope,
			48 => LayoutCode::NullableScope,
			49 => LayoutCode::ImmutableNullableScope,
			50 => LayoutCode::TaggedScope,
			51 => LayoutCode::ImmutableTaggedScope,
			52 => LayoutCode::Tagged2Scope,
			53 => LayoutCode::ImmutableTagged2Scope,
			68 => LayoutCode::Schema,
			69 => LayoutCode::ImmutableSchema,
			70 => LayoutCode::EndScope,
			_ => return Err(Error::InvalidRow),
		};
		Ok(code)
	}
}

impl TryFrom<u8> for LayoutCode {
	type Error = Error;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		LayoutCode::from_u8(value)
	}
}

impl LayoutCode {
	pub fn is_scope(self) -> bool {
		let code = self as u8;
		(30..=69).contains(&code)
	}

	pub fn is_immutable(self) -> bool {
		self.is_scope() && (self as u8) % 2 == 1
	}

	/// The mutable twin of a scope code; booleans collapse onto `Boolean`.
	pub fn canonical(self) -> Self {
		match self {
			LayoutCode::BooleanFalse => LayoutCode::Boolean,
			code if code.is_immutable() => LayoutCode::from_u8(code as u8 - 1).unwrap_or(code),
			code => code,
		}
	}

	/// The immutable twin of a scope code; other codes are returned as is.
	pub fn to_immutable(self) -> Self {
		if self.is_scope() && !self.is_immutable() {
			LayoutCode::from_u8(self as u8 + 1).unwrap_or(self)
		} else {
			self
		}
	}

	pub fn is_bool(self) -> bool {
		matches!(self, LayoutCode::Boolean | LayoutCode::BooleanFalse)
	}

	/// Fixed-width primitives, encoded without a length prefix.
	pub fn is_fixed(self) -> bool {
		matches!(
			self,
			LayoutCode::Null
				| LayoutCode::Boolean | LayoutCode::BooleanFalse
				| LayoutCode::Int8 | LayoutCode::Int16
				| LayoutCode::Int32 | LayoutCode::Int64
				| LayoutCode::UInt8 | LayoutCode::UInt16
				| LayoutCode::UInt32 | LayoutCode::UInt64
				| LayoutCode::Float32 | LayoutCode::Float64
				| LayoutCode::Float128 | LayoutCode::Decimal
				| LayoutCode::DateTime | LayoutCode::UnixDateTime
				| LayoutCode::Guid | LayoutCode::MongoDbObjectId
		)
	}

	/// Length-prefixed or varint-encoded primitives.
	pub fn is_variable(self) -> bool {
		matches!(self, LayoutCode::Utf8 | LayoutCode::Binary | LayoutCode::VarInt | LayoutCode::VarUInt)
	}

	/// Payload width in bytes of a fixed primitive.
	///
	/// Booleans and null carry no payload: their value lives in the type code,
	/// or in the bitmask for fixed columns.
	pub fn size(self) -> usize {
		match self {
			LayoutCode::Null => 0,
			LayoutCode::Boolean | LayoutCode::BooleanFalse => 0,
			LayoutCode::Int8 | LayoutCode::UInt8 => 1,
			LayoutCode::Int16 | LayoutCode::UInt16 => 2,
			LayoutCode::Int32 | LayoutCode::UInt32 | LayoutCode::Float32 => 4,
			LayoutCode::Int64 | LayoutCode::UInt64 | LayoutCode::Float64 => 8,
			LayoutCode::DateTime | LayoutCode::UnixDateTime => 8,
			LayoutCode::MongoDbObjectId => 12,
			LayoutCode::Float128 | LayoutCode::Decimal | LayoutCode::Guid => 16,
			_ => 0,
		}
	}
}

impl LayoutCode {
	/// Scopes whose elements are addressed by position rather than by path.
	pub fn is_indexed_scope(self) -> bool {
		matches!(
			self.canonical(),
			LayoutCode::ArrayScope
				| LayoutCode::TypedArrayScope
				| LayoutCode::TupleScope | LayoutCode::TypedTupleScope
				| LayoutCode::TypedMapScope
				| LayoutCode::TypedSetScope
				| LayoutCode::NullableScope
				| LayoutCode::TaggedScope | LayoutCode::Tagged2Scope
		)
	}

	/// Scopes whose elements carry no type code of their own.
	pub fn is_typed_scope(self) -> bool {
		matches!(
			self.canonical(),
			LayoutCode::TypedArrayScope
				| LayoutCode::TypedTupleScope
				| LayoutCode::TypedMapScope
				| LayoutCode::TypedSetScope
				| LayoutCode::NullableScope
				| LayoutCode::TaggedScope | LayoutCode::Tagged2Scope
		)
	}

	/// Scopes prefixed with a `u32` element count.
	pub fn is_sized_scope(self) -> bool {
		matches!(
			self.canonical(),
			LayoutCode::TypedArrayScope | LayoutCode::TypedMapScope | LayoutCode::TypedSetScope
		)
	}

	/// Scopes whose element count is fixed by their type arguments.
	pub fn is_fixed_arity(self) -> bool {
		matches!(
			self.canonical(),
			LayoutCode::TupleScope
				| LayoutCode::TypedTupleScope
				| LayoutCode::NullableScope
				| LayoutCode::TaggedScope | LayoutCode::Tagged2Scope
		)
	}

	/// Scopes kept in sorted order with unique elements (or keys).
	pub fn is_unique_scope(self) -> bool {
		matches!(self.canonical(), LayoutCode::TypedMapScope | LayoutCode::TypedSetScope)
	}

	/// Scopes holding path-addressed sparse fields.
	pub fn is_object_like(self) -> bool {
		matches!(self.canonical(), LayoutCode::ObjectScope | LayoutCode::Schema)
	}

	/// Scopes terminated by an `EndScope` marker.
	pub fn is_terminated_scope(self) -> bool {
		matches!(
			self.canonical(),
			LayoutCode::ObjectScope | LayoutCode::ArrayScope | LayoutCode::TupleScope | LayoutCode::Schema
		)
	}

	/// Codes that are written even in typed positions, because the code itself
	/// carries the value.
	pub fn always_requires_type_code(self) -> bool {
		matches!(self, LayoutCode::Boolean | LayoutCode::BooleanFalse | LayoutCode::Null)
	}

	pub fn is_udt(self) -> bool {
		self.canonical() == LayoutCode::Schema
	}
}

impl Display for LayoutCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self.canonical() {
			LayoutCode::Invalid => "invalid",
			LayoutCode::Null => "null",
			LayoutCode::Boolean => "bool",
			LayoutCode::Int8 => "int8",
			LayoutCode::Int16 => "int16",
			LayoutCode::Int32 => "int32",
			LayoutCode::Int64 => "int64",
			LayoutCode::UInt8 => "uint8",
			LayoutCode::UInt16 => "uint16",
			LayoutCode::UInt32 => "uint32",
			LayoutCode::UInt64 => "uint64",
			LayoutCode::VarInt => "varint",
			LayoutCode::VarUInt => "varuint",
			LayoutCode::Float32 => "float32",
			LayoutCode::Float64 => "float64",
			LayoutCode::Decimal => "decimal",
			LayoutCode::DateTime => "datetime",
			LayoutCode::Guid => "guid",
			LayoutCode::Utf8 => "utf8",
			LayoutCode::Binary => "binary",
			LayoutCode::Float128 => "float128",
			LayoutCode::UnixDateTime => "unixdatetime",
			LayoutCode::MongoDbObjectId => "mongodbobjectid",
			LayoutCode::ObjectScope => "object",
			LayoutCode::ArrayScope => "array",
			LayoutCode::TypedArrayScope => "array_t",
			LayoutCode::TupleScope => "tuple",
			LayoutCode::TypedTupleScope => "tuple_t",
			LayoutCode::TypedMapScope => "map_t",
			LayoutCode::TypedSetScope => "set_t",
			LayoutCode::NullableScope => "nullable",
			LayoutCode::TaggedScope => "tagged_t",
			LayoutCode::Tagged2Scope => "tagged2_t",
			LayoutCode::Schema => "udt",
			LayoutCode::EndScope => "end",
			_ => "unknown",
		};
		if self.is_immutable() {
			write!(f, "im_{}", name)
		} else {
			f.write_str(name)
		}
	}
}
