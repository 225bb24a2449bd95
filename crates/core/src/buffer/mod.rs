// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The physical row: a header, a bitmask with fixed columns, the variable
//! values and a self-describing sparse region.
//!
//! Structural mutations shift every byte behind the mutation point. Cursors
//! over a scope that encloses the mutation are adjusted by the operation that
//! performed it; any other cursor must be re-acquired.

mod column;
mod header;
mod resize;
mod sparse;
mod unique;
pub mod varint;

use std::{fmt::Debug, io, sync::Arc};

pub use header::{HybridRowHeader, HybridRowVersion};
use hybridrow_type::{
	DateTime, Decimal, Error, Float128, Guid, MongoDbObjectId, Result, SchemaId, UnixDateTime,
};
pub use resize::{DefaultResizer, Resizer};
pub use sparse::UpdateOptions;
pub(crate) use unique::unique_element_type;
use tracing::{instrument, trace};

use crate::{
	layout::{Layout, LayoutBit},
	resolver::LayoutResolver,
};

#[derive(Debug)]
pub struct RowBuffer {
	buffer: Vec<u8>,
	capacity: usize,
	resolver: Arc<dyn LayoutResolver>,
	resizer: Option<Box<dyn Resizer>>,
	layout: Option<Layout>,
}

impl RowBuffer {
	/// A buffer that fails with [`Error::Exceeded`] once `capacity` bytes are
	/// in use.
	pub fn new(capacity: usize, resolver: Arc<dyn LayoutResolver>) -> Self {
		Self {
			buffer: Vec::with_capacity(capacity),
			capacity,
			resolver,
			resizer: None,
			layout: None,
		}
	}

	pub fn with_resizer(capacity: usize, resolver: Arc<dyn LayoutResolver>, resizer: Box<dyn Resizer>) -> Self {
		Self {
			buffer: Vec::with_capacity(capacity),
			capacity,
			resolver,
			resizer: Some(resizer),
			layout: None,
		}
	}

	/// Starts an empty row of `layout`: the header followed by a zeroed
	/// bitmask and fixed region.
	pub fn init_layout(&mut self, version: HybridRowVersion, layout: &Layout) -> Result<()> {
		if version == HybridRowVersion::Invalid {
			return Err(Error::InvalidRow);
		}
		let size = HybridRowHeader::SIZE + layout.size;
		self.ensure(size)?;

		self.buffer.clear();
		self.buffer.extend_from_slice(&HybridRowHeader::new(version, layout.schema_id).encode());
		self.buffer.resize(size, 0);
		self.layout = Some(layout.clone());
		Ok(())
	}

	/// Adopts an encoded row after validating its header.
	#[instrument(name = "buffer::read_from", level = "trace", skip(self, bytes), fields(len = bytes.len()))]
	pub fn read_from(&mut self, bytes: &[u8], version: HybridRowVersion) -> Result<()> {
		let header = HybridRowHeader::decode(bytes)?;
		if version == HybridRowVersion::Invalid || header.version != version {
			return Err(Error::InvalidRow);
		}
		let layout = self.resolver.resolve(header.schema_id)?;
		if bytes.len() < HybridRowHeader::SIZE + layout.size {
			return Err(Error::InvalidRow);
		}

		self.buffer.clear();
		self.buffer.extend_from_slice(bytes);
		self.capacity = self.capacity.max(bytes.len());
		self.layout = Some(layout);
		Ok(())
	}

	pub fn write_to<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
		sink.write_all(&self.buffer)
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.buffer
	}

	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn header(&self) -> Result<HybridRowHeader> {
		HybridRowHeader::decode(&self.buffer)
	}

	/// Layout of the row's root scope.
	pub fn layout(&self) -> Result<&Layout> {
		self.layout.as_ref().ok_or(Error::InvalidRow)
	}

	pub fn resolver(&self) -> &Arc<dyn LayoutResolver> {
		&self.resolver
	}

	pub(crate) fn resolve(&self, schema_id: SchemaId) -> Result<Layout> {
		self.resolver.resolve(schema_id)
	}

	/// Makes room for a row of `size` bytes, consulting the resizer when the
	/// current capacity is too small.
	pub(crate) fn ensure(&mut self, size: usize) -> Result<()> {
		if size <= self.capacity {
			return Ok(());
		}
		let Some(resizer) = &self.resizer else {
			return Err(Error::Exceeded);
		};
		let capacity = resizer.resize(size, self.capacity);
		if capacity < size {
			return Err(Error::Exceeded);
		}
		trace!(from = self.capacity, to = capacity, "growing row buffer");
		self.buffer.reserve(capacity - self.buffer.len());
		self.capacity = capacity;
		Ok(())
	}

	/// Replaces the `existing` bytes at `offset` with `needed` bytes, moving
	/// the tail of the row. The first `min(existing, needed)` bytes keep their
	/// old content, new bytes are zero. Returns the signed change in length.
	pub fn shift(&mut self, offset: usize, existing: usize, needed: usize) -> Result<isize> {
		let end = offset.checked_add(existing).ok_or(Error::InvalidRow)?;
		if end > self.buffer.len() {
			return Err(Error::InvalidRow);
		}
		if needed > existing {
			self.ensure(self.buffer.len() + needed - existing)?;
			self.buffer.splice(end..end, std::iter::repeat_n(0u8, needed - existing));
		} else if needed < existing {
			self.buffer.drain(offset + needed..end);
		}
		Ok(needed as isize - existing as isize)
	}

	pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
		let end = offset.checked_add(len).ok_or(Error::InvalidRow)?;
		self.buffer.get(offset..end).ok_or(Error::InvalidRow)
	}

	/// Overwrites bytes in place; never changes the row length.
	pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
		let end = offset.checked_add(bytes.len()).ok_or(Error::InvalidRow)?;
		self.buffer.get_mut(offset..end).ok_or(Error::InvalidRow)?.copy_from_slice(bytes);
		Ok(())
	}

	fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
		let mut result = [0u8; N];
		result.copy_from_slice(self.read_bytes(offset, N)?);
		Ok(result)
	}
}

macro_rules! primitive_access {
	($($ty:ty => $read:ident, $write:ident);* $(;)?) => {
		impl RowBuffer {
			$(
				pub fn $read(&self, offset: usize) -> Result<$ty> {
					Ok(<$ty>::from_le_bytes(self.read_array(offset)?))
				}

				pub fn $write(&mut self, offset: usize, value: $ty) -> Result<()> {
					self.write_bytes(offset, &value.to_le_bytes())
				}
			)*
		}
	};
}

primitive_access! {
	i8 => read_i8, write_i8;
	i16 => read_i16, write_i16;
	i32 => read_i32, write_i32;
	i64 => read_i64, write_i64;
	u8 => read_u8, write_u8;
	u16 => read_u16, write_u16;
	u32 => read_u32, write_u32;
	u64 => read_u64, write_u64;
	f32 => read_f32, write_f32;
	f64 => read_f64, write_f64;
	Float128 => read_float128, write_float128;
	Decimal => read_decimal, write_decimal;
}

impl RowBuffer {
	pub fn read_date_time(&self, offset: usize) -> Result<DateTime> {
		Ok(DateTime::from_ticks(self.read_i64(offset)?))
	}

	pub fn write_date_time(&mut self, offset: usize, value: DateTime) -> Result<()> {
		self.write_i64(offset, value.ticks())
	}

	pub fn read_unix_date_time(&self, offset: usize) -> Result<UnixDateTime> {
		Ok(UnixDateTime::from_milliseconds(self.read_i64(offset)?))
	}

	pub fn write_unix_date_time(&mut self, offset: usize, value: UnixDateTime) -> Result<()> {
		self.write_i64(offset, value.milliseconds())
	}

	pub fn read_guid(&self, offset: usize) -> Result<Guid> {
		Ok(Guid::from_bytes_le(self.read_array(offset)?))
	}

	pub fn write_guid(&mut self, offset: usize, value: Guid) -> Result<()> {
		self.write_bytes(offset, &value.to_bytes_le())
	}

	pub fn read_mongodb_object_id(&self, offset: usize) -> Result<MongoDbObjectId> {
		Ok(MongoDbObjectId(self.read_array(offset)?))
	}

	pub fn write_mongodb_object_id(&mut self, offset: usize, value: MongoDbObjectId) -> Result<()> {
		self.write_bytes(offset, value.as_bytes())
	}

	/// A fixed-length utf8 value of exactly `len` bytes.
	pub fn read_fixed_string(&self, offset: usize, len: usize) -> Result<&str> {
		std::str::from_utf8(self.read_bytes(offset, len)?).map_err(|_| Error::InvalidRow)
	}

	/// A `varuint` length followed by that many bytes; returns the payload
	/// and the total encoded size.
	pub fn read_variable_binary(&self, offset: usize) -> Result<(&[u8], usize)> {
		let (len, prefix) = self.read_varuint(offset)?;
		let len = usize::try_from(len).map_err(|_| Error::InvalidRow)?;
		Ok((self.read_bytes(offset + prefix, len)?, prefix + len))
	}

	pub fn read_variable_string(&self, offset: usize) -> Result<(&str, usize)> {
		let (bytes, size) = self.read_variable_binary(offset)?;
		let value = std::str::from_utf8(bytes).map_err(|_| Error::InvalidRow)?;
		Ok((value, size))
	}

	pub fn read_bit(&self, start: usize, bit: LayoutBit) -> Result<bool> {
		Ok(self.read_u8(start + bit.offset())? & bit.mask() != 0)
	}

	pub fn set_bit(&mut self, start: usize, bit: LayoutBit) -> Result<()> {
		let byte = self.read_u8(start + bit.offset())?;
		self.write_u8(start + bit.offset(), byte | bit.mask())
	}

	pub fn unset_bit(&mut self, start: usize, bit: LayoutBit) -> Result<()> {
		let byte = self.read_u8(start + bit.offset())?;
		self.write_u8(start + bit.offset(), byte & !bit.mask())
	}
}

/// Applies a signed length change to an offset behind the mutation point.
pub(crate) fn rebase(offset: usize, shift: isize) -> usize {
	offset.wrapping_add_signed(shift)
}
