// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Codecs for every layout code.
//!
//! Primitive codecs read and write a value in three places: a fixed column at
//! its compiled offset, a variable column, or a sparse field addressed by a
//! cursor. Scope codecs create and enter nested scopes.

mod boolean;
mod primitive;
mod scope;
mod unique;
mod variable;

use std::fmt::Debug;

pub use boolean::{LayoutBoolean, LayoutNull};
use hybridrow_type::{LayoutCode, Result, TypeArgument, TypeArgumentList};
pub use primitive::{
	LayoutDateTime, LayoutDecimal, LayoutFloat32, LayoutFloat64, LayoutFloat128, LayoutGuid, LayoutInt8,
	LayoutInt16, LayoutInt32, LayoutInt64, LayoutMongoDbObjectId, LayoutUInt8, LayoutUInt16, LayoutUInt32,
	LayoutUInt64, LayoutUnixDateTime,
};
pub use scope::{
	LayoutArray, LayoutNullable, LayoutObject, LayoutTagged, LayoutTagged2, LayoutTuple, LayoutTypedArray,
	LayoutTypedTuple, LayoutUdt,
};
pub use unique::{LayoutTypedMap, LayoutTypedSet, UniqueScopeCodec};
pub use variable::{LayoutBinary, LayoutUtf8, LayoutVarInt, LayoutVarUInt};

use crate::{
	buffer::{RowBuffer, UpdateOptions},
	cursor::RowCursor,
	layout::LayoutColumn,
	schema::StorageKind,
};

pub trait LayoutType: Debug + Send + Sync {
	fn code(&self) -> LayoutCode;

	fn name(&self) -> String {
		self.code().to_string()
	}
}

/// A value type without nested scopes.
pub trait PrimitiveCodec: LayoutType {
	type Value: ?Sized + ToOwned;

	/// Appends the encoding of `value` as stored in a sparse field.
	fn encode(&self, value: &Self::Value, out: &mut Vec<u8>) -> Result<()>;

	fn decode(&self, b: &RowBuffer, offset: usize) -> Result<<Self::Value as ToOwned>::Owned>;

	fn write_sparse(
		&self,
		b: &mut RowBuffer,
		edit: &mut RowCursor,
		value: &Self::Value,
		options: UpdateOptions,
	) -> Result<()> {
		let mut payload = Vec::new();
		self.encode(value, &mut payload)?;
		b.prepare_sparse_write(edit, &TypeArgument::simple(self.code()), options)?;
		b.write_sparse_primitive(edit, self.code(), &payload, options)
	}

	fn read_sparse(&self, b: &RowBuffer, edit: &RowCursor) -> Result<<Self::Value as ToOwned>::Owned> {
		b.prepare_sparse_read(edit, self.code())?;
		self.decode(b, edit.value_offset)
	}

	fn delete_sparse(&self, b: &mut RowBuffer, edit: &mut RowCursor) -> Result<()> {
		b.prepare_sparse_delete(edit, self.code())?;
		b.delete_sparse(edit)?;
		Ok(())
	}
}

/// Values that can be stored in a fixed column.
pub trait FixedCodec: PrimitiveCodec {
	fn write_fixed(&self, b: &mut RowBuffer, scope: &RowCursor, column: &LayoutColumn, value: &Self::Value) -> Result<()> {
		b.check_column(scope, column, self.code(), StorageKind::Fixed)?;
		let mut payload = Vec::new();
		self.encode(value, &mut payload)?;
		b.write_fixed_column(scope, column, &payload)
	}

	fn read_fixed(
		&self,
		b: &RowBuffer,
		scope: &RowCursor,
		column: &LayoutColumn,
	) -> Result<<Self::Value as ToOwned>::Owned> {
		b.check_column(scope, column, self.code(), StorageKind::Fixed)?;
		let offset = b.fixed_column_offset(scope, column)?;
		self.decode(b, offset)
	}

	/// Only nullable columns can be deleted.
	fn delete_fixed(&self, b: &mut RowBuffer, scope: &RowCursor, column: &LayoutColumn) -> Result<()> {
		b.check_column(scope, column, self.code(), StorageKind::Fixed)?;
		b.delete_fixed_column(scope, column)
	}
}

/// Values that can be stored in a variable column.
pub trait VariableCodec: PrimitiveCodec {
	fn write_variable(
		&self,
		b: &mut RowBuffer,
		scope: &mut RowCursor,
		column: &LayoutColumn,
		value: &Self::Value,
	) -> Result<()> {
		b.check_column(scope, column, self.code(), StorageKind::Variable)?;
		let mut payload = Vec::new();
		self.encode(value, &mut payload)?;
		b.write_variable_column(scope, column, &payload)
	}

	fn read_variable(
		&self,
		b: &RowBuffer,
		scope: &RowCursor,
		column: &LayoutColumn,
	) -> Result<<Self::Value as ToOwned>::Owned> {
		b.check_column(scope, column, self.code(), StorageKind::Variable)?;
		let offset = b.variable_column_offset(scope, column)?;
		self.decode(b, offset)
	}

	fn delete_variable(&self, b: &mut RowBuffer, scope: &mut RowCursor, column: &LayoutColumn) -> Result<()> {
		b.check_column(scope, column, self.code(), StorageKind::Variable)?;
		b.delete_variable_column(scope, column)
	}
}

/// A scope type. Writing a scope leaves it empty (fixed-arity scopes hold a
/// default value per element) and returns a cursor positioned before its
/// first element.
pub trait ScopeCodec: LayoutType {
	fn immutable(&self) -> bool {
		self.code().is_immutable()
	}

	fn write_scope(
		&self,
		b: &mut RowBuffer,
		edit: &mut RowCursor,
		args: &TypeArgumentList,
		options: UpdateOptions,
	) -> Result<RowCursor> {
		b.prepare_sparse_write(edit, &TypeArgument::new(self.code(), args.clone()), options)?;
		b.write_sparse_scope(edit, self.code(), args, false, options)
	}

	/// Enters the scope at `edit`. The result is immutable if either the
	/// enclosing scope or the stored scope type is.
	fn read_scope(&self, b: &RowBuffer, edit: &RowCursor) -> Result<RowCursor> {
		b.prepare_sparse_read(edit, self.code())?;
		b.sparse_iterator_read_scope(edit, edit.immutable)
	}

	fn delete_scope(&self, b: &mut RowBuffer, edit: &mut RowCursor) -> Result<()> {
		b.prepare_sparse_delete(edit, self.code())?;
		b.delete_sparse(edit)?;
		Ok(())
	}
}

/// The scope codec for `code`, if `code` denotes a scope.
pub fn scope_codec(code: LayoutCode) -> Option<&'static dyn ScopeCodec> {
	let immutable = code.is_immutable();
	let codec: &'static dyn ScopeCodec = match (code.canonical(), immutable) {
		(LayoutCode::ObjectScope, false) => &LayoutObject::MUTABLE,
		(LayoutCode::ObjectScope, true) => &LayoutObject::IMMUTABLE,
		(LayoutCode::ArrayScope, false) => &LayoutArray::MUTABLE,
		(LayoutCode::ArrayScope, true) => &LayoutArray::IMMUTABLE,
		(LayoutCode::TypedArrayScope, false) => &LayoutTypedArray::MUTABLE,
		(LayoutCode::TypedArrayScope, true) => &LayoutTypedArray::IMMUTABLE,
		(LayoutCode::TupleScope, false) => &LayoutTuple::MUTABLE,
		(LayoutCode::TupleScope, true) => &LayoutTuple::IMMUTABLE,
		(LayoutCode::TypedTupleScope, false) => &LayoutTypedTuple::MUTABLE,
		(LayoutCode::TypedTupleScope, true) => &LayoutTypedTuple::IMMUTABLE,
		(LayoutCode::TaggedScope, false) => &LayoutTagged::MUTABLE,
		(LayoutCode::TaggedScope, true) => &LayoutTagged::IMMUTABLE,
		(LayoutCode::Tagged2Scope, false) => &LayoutTagged2::MUTABLE,
		(LayoutCode::Tagged2Scope, true) => &LayoutTagged2::IMMUTABLE,
		(LayoutCode::NullableScope, false) => &LayoutNullable::MUTABLE,
		(LayoutCode::NullableScope, true) => &LayoutNullable::IMMUTABLE,
		(LayoutCode::TypedSetScope, false) => &LayoutTypedSet::MUTABLE,
		(LayoutCode::TypedSetScope, true) => &LayoutTypedSet::IMMUTABLE,
		(LayoutCode::TypedMapScope, false) => &LayoutTypedMap::MUTABLE,
		(LayoutCode::TypedMapScope, true) => &LayoutTypedMap::IMMUTABLE,
		(LayoutCode::Schema, false) => &LayoutUdt::MUTABLE,
		(LayoutCode::Schema, true) => &LayoutUdt::IMMUTABLE,
		_ => return None,
	};
	Some(codec)
}
