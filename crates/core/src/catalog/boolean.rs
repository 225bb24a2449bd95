// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Types whose value is carried by the type code (sparse) or by the bitmask
//! (fixed columns) instead of payload bytes.

use hybridrow_type::{Error, LayoutCode, Result, TypeArgument};

use super::{FixedCodec, LayoutType, PrimitiveCodec};
use crate::{
	buffer::{RowBuffer, UpdateOptions},
	cursor::RowCursor,
	layout::LayoutColumn,
	schema::StorageKind,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutBoolean;

impl LayoutType for LayoutBoolean {
	fn code(&self) -> LayoutCode {
		LayoutCode::Boolean
	}
}

impl PrimitiveCodec for LayoutBoolean {
	type Value = bool;

	fn encode(&self, _value: &bool, _out: &mut Vec<u8>) -> Result<()> {
		Ok(())
	}

	/// Reads the code byte of a boolean stored at a typed position.
	fn decode(&self, b: &RowBuffer, offset: usize) -> Result<bool> {
		match LayoutCode::from_u8(b.read_u8(offset)?)? {
			LayoutCode::Boolean => Ok(true),
			LayoutCode::BooleanFalse => Ok(false),
			_ => Err(Error::InvalidRow),
		}
	}

	fn write_sparse(&self, b: &mut RowBuffer, edit: &mut RowCursor, value: &bool, options: UpdateOptions) -> Result<()> {
		b.prepare_sparse_write(edit, &TypeArgument::simple(LayoutCode::Boolean), options)?;
		let code = if *value {
			LayoutCode::Boolean
		} else {
			LayoutCode::BooleanFalse
		};
		b.write_sparse_primitive(edit, code, &[], options)
	}

	fn read_sparse(&self, b: &RowBuffer, edit: &RowCursor) -> Result<bool> {
		b.prepare_sparse_read(edit, LayoutCode::Boolean)?;
		Ok(edit.cell_type == Some(LayoutCode::Boolean))
	}
}

impl FixedCodec for LayoutBoolean {
	fn write_fixed(&self, b: &mut RowBuffer, scope: &RowCursor, column: &LayoutColumn, value: &bool) -> Result<()> {
		b.check_column(scope, column, LayoutCode::Boolean, StorageKind::Fixed)?;
		b.write_fixed_bool(scope, column, *value)
	}

	fn read_fixed(&self, b: &RowBuffer, scope: &RowCursor, column: &LayoutColumn) -> Result<bool> {
		b.check_column(scope, column, LayoutCode::Boolean, StorageKind::Fixed)?;
		b.read_fixed_bool(scope, column)
	}
}

/// The unit type; a present null field is distinct from a missing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutNull;

impl LayoutType for LayoutNull {
	fn code(&self) -> LayoutCode {
		LayoutCode::Null
	}
}

impl PrimitiveCodec for LayoutNull {
	type Value = ();

	fn encode(&self, _value: &(), _out: &mut Vec<u8>) -> Result<()> {
		Ok(())
	}

	fn decode(&self, _b: &RowBuffer, _offset: usize) -> Result<()> {
		Ok(())
	}
}
