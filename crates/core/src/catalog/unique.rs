// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_type::{LayoutCode, Result, TypeArgument, TypeArgumentList};
use tracing::debug;

use super::{LayoutType, ScopeCodec};
use crate::{
	buffer::{RowBuffer, UpdateOptions},
	cursor::RowCursor,
};

/// Sets and maps keep their elements sorted and unique, so elements are not
/// written in place. A value is built in a standalone field of the enclosing
/// scope and then moved into the collection, or the collection is filled in
/// bulk and sorted once at the end.
pub trait UniqueScopeCodec: ScopeCodec {
	/// Type of the fields that can be moved into the collection.
	fn field_type(&self, scope: &RowCursor) -> Result<TypeArgument> {
		crate::buffer::unique_element_type(scope)
	}

	/// Moves the field at `src` into `scope` at its sorted position and
	/// deletes `src`. `InsertAt` is rejected; `Insert` fails with `Exists`
	/// when an equal element is present and `Upsert` replaces it.
	fn move_field(
		&self,
		b: &mut RowBuffer,
		scope: &mut RowCursor,
		src: &mut RowCursor,
		options: UpdateOptions,
	) -> Result<()> {
		b.typed_collection_move_field(scope, src, options)
	}

	/// Finds the element equal to the field at `pattern` (for maps, the entry
	/// with an equal key) and deletes the pattern field, whether or not a
	/// match exists.
	fn find(&self, b: &mut RowBuffer, scope: &mut RowCursor, pattern: &mut RowCursor) -> Result<RowCursor> {
		b.typed_collection_find(scope, pattern)
	}

	/// Writes the collection and lets `fill` append elements in any order
	/// through the returned scope. The elements are sorted afterwards; if
	/// `fill` fails or produced duplicates the whole collection is removed
	/// again.
	fn write_scope_with<F>(
		&self,
		b: &mut RowBuffer,
		edit: &mut RowCursor,
		args: &TypeArgumentList,
		options: UpdateOptions,
		fill: F,
	) -> Result<()>
	where
		Self: Sized,
		F: FnOnce(&mut RowBuffer, &mut RowCursor) -> Result<()>,
	{
		let mut scope = self.write_scope(b, edit, args, options)?;
		scope.defer_unique_index = true;

		let result = fill(b, &mut scope).and_then(|()| b.typed_collection_unique_index_rebuild(&scope));
		if let Err(err) = result {
			debug!(scope = %self.code(), %err, "discarding unique scope");
			b.delete_sparse(edit)?;
			return Err(err);
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTypedSet {
	immutable: bool,
}

impl LayoutTypedSet {
	pub const MUTABLE: Self = Self {
		immutable: false,
	};
	pub const IMMUTABLE: Self = Self {
		immutable: true,
	};
}

impl LayoutType for LayoutTypedSet {
	fn code(&self) -> LayoutCode {
		if self.immutable {
			LayoutCode::ImmutableTypedSetScope
		} else {
			LayoutCode::TypedSetScope
		}
	}
}

impl ScopeCodec for LayoutTypedSet {}
impl UniqueScopeCodec for LayoutTypedSet {}

/// Entries are `tuple_t<key, value>` ordered by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTypedMap {
	immutable: bool,
}

impl LayoutTypedMap {
	pub const MUTABLE: Self = Self {
		immutable: false,
	};
	pub const IMMUTABLE: Self = Self {
		immutable: true,
	};
}

impl LayoutType for LayoutTypedMap {
	fn code(&self) -> LayoutCode {
		if self.immutable {
			LayoutCode::ImmutableTypedMapScope
		} else {
			LayoutCode::TypedMapScope
		}
	}
}

impl ScopeCodec for LayoutTypedMap {}
impl UniqueScopeCodec for LayoutTypedMap {}
