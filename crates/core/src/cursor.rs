// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_type::{Error, LayoutCode, Result, TypeArgumentList};

use crate::{
	buffer::{HybridRowHeader, RowBuffer, rebase},
	layout::Layout,
};

/// Position within one scope of a row.
///
/// A cursor is a plain value: cloning it is cheap and the clone navigates
/// independently. It holds offsets rather than borrows, so a structural
/// mutation through one cursor leaves other cursors over the same scope
/// stale; re-acquire them after writing.
#[derive(Debug, Clone)]
pub struct RowCursor {
	pub(crate) layout: Layout,
	pub(crate) scope_type: LayoutCode,
	pub(crate) scope_type_args: TypeArgumentList,
	pub(crate) immutable: bool,
	/// Set while a unique scope is filled in bulk; the index is rebuilt
	/// afterwards.
	pub(crate) defer_unique_index: bool,
	/// First byte of the scope body: the bitmask of a UDT, the count of a
	/// sized scope, otherwise the first element.
	pub(crate) start: usize,
	pub(crate) count: usize,
	pub(crate) index: usize,
	pub(crate) depth: usize,
	pub(crate) meta_offset: usize,
	pub(crate) value_offset: usize,
	pub(crate) path_offset: usize,
	pub(crate) path_token: u64,
	/// End of the current element when known from a [`RowCursor::skip`].
	pub(crate) end_offset: usize,
	pub(crate) cell_type: Option<LayoutCode>,
	pub(crate) cell_type_args: TypeArgumentList,
	pub(crate) exists: bool,
	pub(crate) write_path: Option<String>,
}

impl RowCursor {
	pub(crate) fn scope(
		layout: Layout,
		scope_type: LayoutCode,
		scope_type_args: TypeArgumentList,
		start: usize,
		immutable: bool,
		depth: usize,
	) -> Self {
		Self {
			layout,
			scope_type,
			scope_type_args,
			immutable,
			defer_unique_index: false,
			start,
			count: 0,
			index: 0,
			depth,
			meta_offset: start,
			value_offset: start,
			path_offset: 0,
			path_token: 0,
			end_offset: 0,
			cell_type: None,
			cell_type_args: TypeArgumentList::empty(),
			exists: false,
			write_path: None,
		}
	}

	/// Cursor over the root scope of an initialized row.
	pub fn create(b: &RowBuffer) -> Result<Self> {
		let layout = b.layout()?.clone();
		let args = TypeArgumentList::from_schema_id(layout.schema_id);
		let mut cursor = Self::scope(layout, LayoutCode::Schema, args, HybridRowHeader::SIZE, false, 0);
		cursor.reset(b)?;
		Ok(cursor)
	}

	/// Locates the field at `path` within this object-like scope.
	///
	/// A missing field is not an error: the returned cursor reports
	/// `exists() == false`, reads through it fail with `NotFound`, and writes
	/// through it append the field at the end of the scope. Layouts that
	/// disallow unschematized fields only accept declared paths; any other
	/// path is `NotFound`.
	pub fn find(&self, b: &RowBuffer, path: &str) -> Result<RowCursor> {
		if !self.scope_type.is_object_like() {
			return Err(Error::TypeConstraint);
		}
		if self.layout.disallow_unschematized && self.layout.tokenizer().find_token(path).is_none() {
			return Err(Error::NotFound);
		}
		let mut edit = self.clone();
		edit.reset(b)?;
		while b.sparse_iterator_move_next(&mut edit)? {
			if b.sparse_path_equals(&edit, path)? {
				break;
			}
		}
		edit.write_path = Some(path.to_string());
		Ok(edit)
	}

	/// Advances to the next element of the scope. Returns `false` once the
	/// end of the scope is reached; the cursor then sits where a new element
	/// would be appended.
	pub fn move_next(&mut self, b: &RowBuffer) -> Result<bool> {
		self.write_path = None;
		b.sparse_iterator_move_next(self)
	}

	/// Moves to the element at `index` of an indexed scope.
	pub fn move_to(&mut self, b: &RowBuffer, index: usize) -> Result<bool> {
		if !self.scope_type.is_indexed_scope() {
			return Err(Error::TypeConstraint);
		}
		if index < self.index || (index == self.index && !self.exists) {
			self.reset(b)?;
		}
		self.write_path = None;
		loop {
			if self.exists && self.index == index {
				return Ok(true);
			}
			if !b.sparse_iterator_move_next(self)? {
				return Ok(false);
			}
		}
	}

	/// Records the end of `child`, a scope entered at the current element, so
	/// the next [`RowCursor::move_next`] lands right behind it.
	pub fn skip(&mut self, b: &RowBuffer, child: &RowCursor) -> Result<()> {
		let mut child = child.clone();
		if child.cell_type != Some(LayoutCode::EndScope) {
			while b.sparse_iterator_move_next(&mut child)? {}
		}
		self.end_offset = if child.scope_type.is_terminated_scope() {
			child.meta_offset + 1
		} else {
			child.meta_offset
		};
		Ok(())
	}

	/// Path of the current field in an object-like scope.
	pub fn path(&self, b: &RowBuffer) -> Result<String> {
		if !self.exists || !self.scope_type.is_object_like() {
			return Err(Error::NotFound);
		}
		b.read_sparse_path(self)
	}

	/// Rewinds to before the first element, re-reading the scope's size.
	pub(crate) fn reset(&mut self, b: &RowBuffer) -> Result<()> {
		match self.scope_type.canonical() {
			code if code.is_sized_scope() => self.count = b.read_u32(self.start)? as usize,
			LayoutCode::NullableScope => self.count = usize::from(b.read_u8(self.start)? != 0),
			_ => {}
		}
		self.meta_offset = b.scope_first_offset(self)?;
		self.value_offset = self.meta_offset;
		self.index = 0;
		self.path_offset = 0;
		self.path_token = 0;
		self.end_offset = 0;
		self.cell_type = None;
		self.cell_type_args = TypeArgumentList::empty();
		self.exists = false;
		self.write_path = None;
		Ok(())
	}

	/// Moves every element offset by a length change that happened in front
	/// of the current element.
	pub(crate) fn rebase(&mut self, shift: isize) {
		self.meta_offset = rebase(self.meta_offset, shift);
		self.value_offset = rebase(self.value_offset, shift);
		if self.path_offset != 0 {
			self.path_offset = rebase(self.path_offset, shift);
		}
		if self.end_offset != 0 {
			self.end_offset = rebase(self.end_offset, shift);
		}
	}

	/// Whether iteration stops after `count` elements.
	pub(crate) fn is_counted(&self) -> bool {
		self.scope_type.is_sized_scope() || self.scope_type.is_fixed_arity()
	}
}

impl RowCursor {
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	pub fn scope_type(&self) -> LayoutCode {
		self.scope_type
	}

	pub fn scope_type_args(&self) -> &TypeArgumentList {
		&self.scope_type_args
	}

	pub fn immutable(&self) -> bool {
		self.immutable
	}

	pub fn index(&self) -> usize {
		self.index
	}

	/// Element count of a sized or fixed-arity scope.
	pub fn count(&self) -> usize {
		self.count
	}

	pub fn exists(&self) -> bool {
		self.exists
	}

	pub fn cell_type(&self) -> Option<LayoutCode> {
		self.cell_type
	}

	pub fn cell_type_args(&self) -> &TypeArgumentList {
		&self.cell_type_args
	}
}
