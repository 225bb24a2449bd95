// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_type::{DateTime, Decimal, Float128, Guid, LayoutCode, MongoDbObjectId, Result, UnixDateTime};

use super::{FixedCodec, LayoutType, PrimitiveCodec};
use crate::buffer::RowBuffer;

macro_rules! fixed_codec {
	($($(#[$meta:meta])* $name:ident => $code:ident, $ty:ty, $read:ident, |$value:ident| $bytes:expr);* $(;)?) => {
		$(
			$(#[$meta])*
			#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
			pub struct $name;

			impl LayoutType for $name {
				fn code(&self) -> LayoutCode {
					LayoutCode::$code
				}
			}

			impl PrimitiveCodec for $name {
				type Value = $ty;

				fn encode(&self, $value: &$ty, out: &mut Vec<u8>) -> Result<()> {
					out.extend_from_slice(&$bytes);
					Ok(())
				}

				fn decode(&self, b: &RowBuffer, offset: usize) -> Result<$ty> {
					b.$read(offset)
				}
			}

			impl FixedCodec for $name {}
		)*
	};
}

fixed_codec! {
	LayoutInt8 => Int8, i8, read_i8, |value| value.to_le_bytes();
	LayoutInt16 => Int16, i16, read_i16, |value| value.to_le_bytes();
	LayoutInt32 => Int32, i32, read_i32, |value| value.to_le_bytes();
	LayoutInt64 => Int64, i64, read_i64, |value| value.to_le_bytes();
	LayoutUInt8 => UInt8, u8, read_u8, |value| value.to_le_bytes();
	LayoutUInt16 => UInt16, u16, read_u16, |value| value.to_le_bytes();
	LayoutUInt32 => UInt32, u32, read_u32, |value| value.to_le_bytes();
	LayoutUInt64 => UInt64, u64, read_u64, |value| value.to_le_bytes();
	LayoutFloat32 => Float32, f32, read_f32, |value| value.to_le_bytes();
	LayoutFloat64 => Float64, f64, read_f64, |value| value.to_le_bytes();
	/// IEEE 754 binary128, carried as raw bits.
	LayoutFloat128 => Float128, Float128, read_float128, |value| value.to_le_bytes();
	LayoutDecimal => Decimal, Decimal, read_decimal, |value| value.to_le_bytes();
	/// 100ns ticks since 0001-01-01.
	LayoutDateTime => DateTime, DateTime, read_date_time, |value| value.ticks().to_le_bytes();
	/// Milliseconds since the Unix epoch.
	LayoutUnixDateTime => UnixDateTime, UnixDateTime, read_unix_date_time, |value| value.milliseconds().to_le_bytes();
	LayoutGuid => Guid, Guid, read_guid, |value| value.to_bytes_le();
	LayoutMongoDbObjectId => MongoDbObjectId, MongoDbObjectId, read_mongodb_object_id, |value| *value.as_bytes();
}
