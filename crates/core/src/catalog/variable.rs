// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Length-prefixed and varint-encoded types.

use hybridrow_type::{Error, LayoutCode, Result};

use super::{FixedCodec, LayoutType, PrimitiveCodec, VariableCodec};
use crate::{
	buffer::{
		RowBuffer,
		varint::{encode_varint, encode_varuint},
	},
	cursor::RowCursor,
	layout::LayoutColumn,
	schema::StorageKind,
};

fn encode_bytes(value: &[u8], out: &mut Vec<u8>) {
	encode_varuint(value.len() as u64, out);
	out.extend_from_slice(value);
}

/// Fixed utf8 and binary columns hold exactly their declared length.
fn check_fixed_len(column: &LayoutColumn, len: usize) -> Result<()> {
	match len.cmp(&column.size) {
		std::cmp::Ordering::Greater => Err(Error::Exceeded),
		std::cmp::Ordering::Less => Err(Error::TypeConstraint),
		std::cmp::Ordering::Equal => Ok(()),
	}
}

/// Variable columns with a declared length accept values up to it.
fn check_max_len(column: &LayoutColumn, len: usize) -> Result<()> {
	if column.size > 0 && len > column.size {
		return Err(Error::Exceeded);
	}
	Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutUtf8;

impl LayoutType for LayoutUtf8 {
	fn code(&self) -> LayoutCode {
		LayoutCode::Utf8
	}
}

impl LayoutUtf8 {
	/// Borrows the string of a sparse field instead of copying it.
	pub fn read_sparse_str<'a>(&self, b: &'a RowBuffer, edit: &RowCursor) -> Result<&'a str> {
		b.prepare_sparse_read(edit, LayoutCode::Utf8)?;
		Ok(b.read_variable_string(edit.value_offset)?.0)
	}
}

impl PrimitiveCodec for LayoutUtf8 {
	type Value = str;

	fn encode(&self, value: &str, out: &mut Vec<u8>) -> Result<()> {
		encode_bytes(value.as_bytes(), out);
		Ok(())
	}

	fn decode(&self, b: &RowBuffer, offset: usize) -> Result<String> {
		Ok(b.read_variable_string(offset)?.0.to_string())
	}
}

impl FixedCodec for LayoutUtf8 {
	fn write_fixed(&self, b: &mut RowBuffer, scope: &RowCursor, column: &LayoutColumn, value: &str) -> Result<()> {
		b.check_column(scope, column, LayoutCode::Utf8, StorageKind::Fixed)?;
		check_fixed_len(column, value.len())?;
		b.write_fixed_column(scope, column, value.as_bytes())
	}

	fn read_fixed(&self, b: &RowBuffer, scope: &RowCursor, column: &LayoutColumn) -> Result<String> {
		b.check_column(scope, column, LayoutCode::Utf8, StorageKind::Fixed)?;
		let offset = b.fixed_column_offset(scope, column)?;
		Ok(b.read_fixed_string(offset, column.size)?.to_string())
	}
}

impl VariableCodec for LayoutUtf8 {
	fn write_variable(
		&self,
		b: &mut RowBuffer,
		scope: &mut RowCursor,
		column: &LayoutColumn,
		value: &str,
	) -> Result<()> {
		b.check_column(scope, column, LayoutCode::Utf8, StorageKind::Variable)?;
		check_max_len(column, value.len())?;
		let mut payload = Vec::with_capacity(value.len() + 2);
		encode_bytes(value.as_bytes(), &mut payload);
		b.write_variable_column(scope, column, &payload)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutBinary;

impl LayoutType for LayoutBinary {
	fn code(&self) -> LayoutCode {
		LayoutCode::Binary
	}
}

impl PrimitiveCodec for LayoutBinary {
	type Value = [u8];

	fn encode(&self, value: &[u8], out: &mut Vec<u8>) -> Result<()> {
		encode_bytes(value, out);
		Ok(())
	}

	fn decode(&self, b: &RowBuffer, offset: usize) -> Result<Vec<u8>> {
		Ok(b.read_variable_binary(offset)?.0.to_vec())
	}
}

impl FixedCodec for LayoutBinary {
	fn write_fixed(&self, b: &mut RowBuffer, scope: &RowCursor, column: &LayoutColumn, value: &[u8]) -> Result<()> {
		b.check_column(scope, column, LayoutCode::Binary, StorageKind::Fixed)?;
		check_fixed_len(column, value.len())?;
		b.write_fixed_column(scope, column, value)
	}

	fn read_fixed(&self, b: &RowBuffer, scope: &RowCursor, column: &LayoutColumn) -> Result<Vec<u8>> {
		b.check_column(scope, column, LayoutCode::Binary, StorageKind::Fixed)?;
		let offset = b.fixed_column_offset(scope, column)?;
		Ok(b.read_bytes(offset, column.size)?.to_vec())
	}
}

impl VariableCodec for LayoutBinary {
	fn write_variable(
		&self,
		b: &mut RowBuffer,
		scope: &mut RowCursor,
		column: &LayoutColumn,
		value: &[u8],
	) -> Result<()> {
		b.check_column(scope, column, LayoutCode::Binary, StorageKind::Variable)?;
		check_max_len(column, value.len())?;
		let mut payload = Vec::with_capacity(value.len() + 2);
		encode_bytes(value, &mut payload);
		b.write_variable_column(scope, column, &payload)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutVarInt;

impl LayoutType for LayoutVarInt {
	fn code(&self) -> LayoutCode {
		LayoutCode::VarInt
	}
}

impl PrimitiveCodec for LayoutVarInt {
	type Value = i64;

	fn encode(&self, value: &i64, out: &mut Vec<u8>) -> Result<()> {
		encode_varint(*value, out);
		Ok(())
	}

	fn decode(&self, b: &RowBuffer, offset: usize) -> Result<i64> {
		Ok(b.read_varint(offset)?.0)
	}
}

impl VariableCodec for LayoutVarInt {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutVarUInt;

impl LayoutType for LayoutVarUInt {
	fn code(&self) -> LayoutCode {
		LayoutCode::VarUInt
	}
}

impl PrimitiveCodec for LayoutVarUInt {
	type Value = u64;

	fn encode(&self, value: &u64, out: &mut Vec<u8>) -> Result<()> {
		encode_varuint(*value, out);
		Ok(())
	}

	fn decode(&self, b: &RowBuffer, offset: usize) -> Result<u64> {
		Ok(b.read_varuint(offset)?.0)
	}
}

impl VariableCodec for LayoutVarUInt {}
