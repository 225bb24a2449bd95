// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_type::{Error, LayoutCode, Result, SchemaId, TypeArgument, TypeArgumentList};

use super::{LayoutType, ScopeCodec};
use crate::{
	buffer::{RowBuffer, UpdateOptions},
	cursor::RowCursor,
};

macro_rules! scope_codec {
	($($(#[$meta:meta])* $name:ident => $mutable:ident, $immutable:ident);* $(;)?) => {
		$(
			$(#[$meta])*
			#[derive(Debug, Clone, Copy, PartialEq, Eq)]
			pub struct $name {
				immutable: bool,
			}

			impl $name {
				pub const MUTABLE: Self = Self { immutable: false };
				pub const IMMUTABLE: Self = Self { immutable: true };
			}

			impl LayoutType for $name {
				fn code(&self) -> LayoutCode {
					if self.immutable {
						LayoutCode::$immutable
					} else {
						LayoutCode::$mutable
					}
				}
			}
		)*
	};
}

scope_codec! {
	/// Path-addressed fields of any type, terminated by an end marker.
	LayoutObject => ObjectScope, ImmutableObjectScope;
	/// Elements of any type, terminated by an end marker.
	LayoutArray => ArrayScope, ImmutableArrayScope;
	/// A fixed number of elements of any type.
	LayoutTuple => TupleScope, ImmutableTupleScope;
	/// A count followed by elements of the single argument type.
	LayoutTypedArray => TypedArrayScope, ImmutableTypedArrayScope;
	/// One element per argument type.
	LayoutTypedTuple => TypedTupleScope, ImmutableTypedTupleScope;
	/// A `uint8` tag and one value.
	LayoutTagged => TaggedScope, ImmutableTaggedScope;
	/// A `uint8` tag and two values.
	LayoutTagged2 => Tagged2Scope, ImmutableTagged2Scope;
	/// A presence byte and, when set, one value.
	LayoutNullable => NullableScope, ImmutableNullableScope;
	/// An embedded row of another schema, with its own bitmask, fixed and
	/// variable columns.
	LayoutUdt => Schema, ImmutableSchema;
}

impl ScopeCodec for LayoutObject {}
impl ScopeCodec for LayoutArray {}
impl ScopeCodec for LayoutTuple {}
impl ScopeCodec for LayoutTypedArray {}
impl ScopeCodec for LayoutTypedTuple {}
impl ScopeCodec for LayoutTagged {}
impl ScopeCodec for LayoutTagged2 {}
impl ScopeCodec for LayoutNullable {}
impl ScopeCodec for LayoutUdt {}

impl LayoutNullable {
	/// Writes a nullable scope that either holds a default value of its
	/// argument type or no value at all.
	pub fn write_scope_value(
		&self,
		b: &mut RowBuffer,
		edit: &mut RowCursor,
		args: &TypeArgumentList,
		has_value: bool,
		options: UpdateOptions,
	) -> Result<RowCursor> {
		b.prepare_sparse_write(edit, &TypeArgument::new(self.code(), args.clone()), options)?;
		b.write_sparse_scope(edit, self.code(), args, has_value, options)
	}

	/// Whether the nullable at `edit` holds a value. A missing field is
	/// `NotFound`, which is distinct from a present null.
	pub fn has_value(&self, b: &RowBuffer, edit: &RowCursor) -> Result<bool> {
		if !edit.exists {
			return Err(Error::NotFound);
		}
		if edit.cell_type.map(LayoutCode::canonical) != Some(LayoutCode::NullableScope) {
			return Err(Error::TypeMismatch);
		}
		Ok(b.read_u8(edit.value_offset)? != 0)
	}
}

impl LayoutUdt {
	pub fn write_udt(
		&self,
		b: &mut RowBuffer,
		edit: &mut RowCursor,
		schema_id: SchemaId,
		options: UpdateOptions,
	) -> Result<RowCursor> {
		self.write_scope(b, edit, &TypeArgumentList::from_schema_id(schema_id), options)
	}
}
