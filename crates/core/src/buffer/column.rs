// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Schematized columns of a UDT scope: fixed values at compile-time offsets
//! and variable values found by walking the preceding ones.

use hybridrow_type::{Error, LayoutCode, Result};

use super::RowBuffer;
use crate::{
	cursor::RowCursor,
	layout::{Layout, LayoutColumn, column_width},
	schema::StorageKind,
};

impl RowBuffer {
	/// Offset where the value of variable slot `slot` starts, or would start
	/// if it were present. `slot == layout.num_variable` yields the start of
	/// the sparse region.
	pub(crate) fn compute_variable_value_offset(&self, layout: &Layout, start: usize, slot: usize) -> Result<usize> {
		let mut offset = start + layout.size;
		for column in layout.variable_columns() {
			if column.offset >= slot {
				break;
			}
			let Some(bit) = column.null_bit else {
				continue;
			};
			if self.read_bit(start, bit)? {
				offset += self.primitive_value_size(column.code(), offset)?;
			}
		}
		Ok(offset)
	}

	/// Encoded size of a non-scope value without type code.
	pub(crate) fn primitive_value_size(&self, code: LayoutCode, offset: usize) -> Result<usize> {
		match code {
			LayoutCode::Utf8 | LayoutCode::Binary => Ok(self.read_variable_binary(offset)?.1),
			LayoutCode::VarInt | LayoutCode::VarUInt => Ok(self.read_varuint(offset)?.1),
			code if code.is_fixed() => Ok(code.size()),
			_ => Err(Error::InvalidRow),
		}
	}

	pub(crate) fn check_column(
		&self,
		scope: &RowCursor,
		column: &LayoutColumn,
		code: LayoutCode,
		storage: StorageKind,
	) -> Result<()> {
		if !scope.scope_type.is_udt() || !scope.layout.owns(column) {
			return Err(Error::SchemaMismatch);
		}
		if column.storage != storage || column.code() != code {
			return Err(Error::TypeMismatch);
		}
		Ok(())
	}

	/// Offset of a fixed column's value, or `NotFound` when its presence bit
	/// is clear.
	pub(crate) fn fixed_column_offset(&self, scope: &RowCursor, column: &LayoutColumn) -> Result<usize> {
		if let Some(bit) = column.null_bit {
			if !self.read_bit(scope.start, bit)? {
				return Err(Error::NotFound);
			}
		}
		Ok(scope.start + column.offset)
	}

	pub(crate) fn write_fixed_column(&mut self, scope: &RowCursor, column: &LayoutColumn, payload: &[u8]) -> Result<()> {
		if scope.immutable {
			return Err(Error::InsufficientPermissions);
		}
		self.write_bytes(scope.start + column.offset, payload)?;
		if let Some(bit) = column.null_bit {
			self.set_bit(scope.start, bit)?;
		}
		Ok(())
	}

	pub(crate) fn write_fixed_bool(&mut self, scope: &RowCursor, column: &LayoutColumn, value: bool) -> Result<()> {
		if scope.immutable {
			return Err(Error::InsufficientPermissions);
		}
		let bit = column.bool_bit.ok_or(Error::InvalidRow)?;
		if value {
			self.set_bit(scope.start, bit)?;
		} else {
			self.unset_bit(scope.start, bit)?;
		}
		if let Some(bit) = column.null_bit {
			self.set_bit(scope.start, bit)?;
		}
		Ok(())
	}

	pub(crate) fn read_fixed_bool(&self, scope: &RowCursor, column: &LayoutColumn) -> Result<bool> {
		self.fixed_column_offset(scope, column)?;
		self.read_bit(scope.start, column.bool_bit.ok_or(Error::InvalidRow)?)
	}

	/// Clears a nullable fixed column back to its initial, all-zero state.
	pub(crate) fn delete_fixed_column(&mut self, scope: &RowCursor, column: &LayoutColumn) -> Result<()> {
		if scope.immutable {
			return Err(Error::InsufficientPermissions);
		}
		let bit = column.null_bit.ok_or(Error::TypeConstraint)?;
		self.unset_bit(scope.start, bit)?;
		if let Some(bit) = column.bool_bit {
			self.unset_bit(scope.start, bit)?;
		}
		let width = column_width(column);
		self.write_bytes(scope.start + column.offset, &vec![0u8; width])
	}

	/// Offset of a present variable column's value.
	pub(crate) fn variable_column_offset(&self, scope: &RowCursor, column: &LayoutColumn) -> Result<usize> {
		let bit = column.null_bit.ok_or(Error::InvalidRow)?;
		if !self.read_bit(scope.start, bit)? {
			return Err(Error::NotFound);
		}
		self.compute_variable_value_offset(&scope.layout, scope.start, column.offset)
	}

	/// Writes or replaces a variable column's encoded value, shifting the
	/// rest of the row. The scope's sparse position moves with it.
	pub(crate) fn write_variable_column(
		&mut self,
		scope: &mut RowCursor,
		column: &LayoutColumn,
		payload: &[u8],
	) -> Result<()> {
		if scope.immutable {
			return Err(Error::InsufficientPermissions);
		}
		let bit = column.null_bit.ok_or(Error::InvalidRow)?;
		let offset = self.compute_variable_value_offset(&scope.layout, scope.start, column.offset)?;
		let existing = if self.read_bit(scope.start, bit)? {
			self.primitive_value_size(column.code(), offset)?
		} else {
			0
		};

		let shift = self.shift(offset, existing, payload.len())?;
		self.write_bytes(offset, payload)?;
		self.set_bit(scope.start, bit)?;
		scope.rebase(shift);
		Ok(())
	}

	pub(crate) fn delete_variable_column(&mut self, scope: &mut RowCursor, column: &LayoutColumn) -> Result<()> {
		if scope.immutable {
			return Err(Error::InsufficientPermissions);
		}
		let offset = self.variable_column_offset(scope, column)?;
		let existing = self.primitive_value_size(column.code(), offset)?;
		let shift = self.shift(offset, existing, 0)?;
		self.unset_bit(scope.start, column.null_bit.ok_or(Error::InvalidRow)?)?;
		scope.rebase(shift);
		Ok(())
	}
}
