// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Sorted, duplicate-free storage for typed sets and maps.
//!
//! Set elements are ordered by value and map entries by key. Values compare
//! by their type: integers and floats numerically, strings and binaries by
//! their payload bytes, anything else by its encoded bytes.

use std::cmp::Ordering;

use hybridrow_type::{Error, LayoutCode, Result, TypeArgument, TypeArgumentList};
use tracing::trace;

use super::{RowBuffer, UpdateOptions, rebase, sparse::map_entry_type};
use crate::{cursor::RowCursor, layout::Layout};

/// Type of the elements of a set, or of the entries of a map.
pub(crate) fn unique_element_type(scope: &RowCursor) -> Result<TypeArgument> {
	match scope.scope_type.canonical() {
		LayoutCode::TypedSetScope => scope.scope_type_args.first().cloned().ok_or(Error::TypeConstraint),
		LayoutCode::TypedMapScope => Ok(map_entry_type(scope.scope_type, &scope.scope_type_args)),
		_ => Err(Error::TypeMismatch),
	}
}

/// The part of an element that decides its position: the key of a map entry,
/// the whole value otherwise.
fn ordering_type(scope: &RowCursor) -> Result<TypeArgument> {
	match scope.scope_type.canonical() {
		LayoutCode::TypedMapScope => scope.scope_type_args.first().cloned().ok_or(Error::TypeConstraint),
		_ => unique_element_type(scope),
	}
}

impl RowBuffer {
	/// Compares two values of type `arg`, each stored at a typed position.
	pub(crate) fn compare_values(
		&self,
		layout: &Layout,
		arg: &TypeArgument,
		left: usize,
		right: usize,
		depth: usize,
	) -> Result<Ordering> {
		let ordering = match arg.code.canonical() {
			LayoutCode::Null => Ordering::Equal,
			LayoutCode::Boolean | LayoutCode::UInt8 => self.read_u8(left)?.cmp(&self.read_u8(right)?),
			LayoutCode::Int8 => self.read_i8(left)?.cmp(&self.read_i8(right)?),
			LayoutCode::Int16 => self.read_i16(left)?.cmp(&self.read_i16(right)?),
			LayoutCode::Int32 => self.read_i32(left)?.cmp(&self.read_i32(right)?),
			LayoutCode::Int64 | LayoutCode::DateTime | LayoutCode::UnixDateTime => {
				self.read_i64(left)?.cmp(&self.read_i64(right)?)
			}
			LayoutCode::UInt16 => self.read_u16(left)?.cmp(&self.read_u16(right)?),
			LayoutCode::UInt32 => self.read_u32(left)?.cmp(&self.read_u32(right)?),
			LayoutCode::UInt64 => self.read_u64(left)?.cmp(&self.read_u64(right)?),
			LayoutCode::Float32 => self.read_f32(left)?.total_cmp(&self.read_f32(right)?),
			LayoutCode::Float64 => self.read_f64(left)?.total_cmp(&self.read_f64(right)?),
			LayoutCode::VarInt => self.read_varint(left)?.0.cmp(&self.read_varint(right)?.0),
			LayoutCode::VarUInt => self.read_varuint(left)?.0.cmp(&self.read_varuint(right)?.0),
			LayoutCode::Utf8 | LayoutCode::Binary => {
				self.read_variable_binary(left)?.0.cmp(self.read_variable_binary(right)?.0)
			}
			code => {
				let left_size = self.value_size(layout, code, &arg.args, left, depth)?;
				let right_size = self.value_size(layout, code, &arg.args, right, depth)?;
				self.read_bytes(left, left_size)?.cmp(self.read_bytes(right, right_size)?)
			}
		};
		Ok(ordering)
	}

	/// Compares the field at `src` against the element of `scope` at
	/// `element`.
	fn compare_with_element(&self, scope: &RowCursor, src: &RowCursor, element: usize) -> Result<Ordering> {
		let arg = ordering_type(scope)?;
		if arg.code.always_requires_type_code() && !is_map(scope) {
			let code = src.cell_type.ok_or(Error::NotFound)?;
			return Ok(code.to_u8().cmp(&self.read_u8(element)?));
		}
		self.compare_values(&scope.layout, &arg, src.value_offset, element, scope.depth)
	}

	fn compare_elements(&self, scope: &RowCursor, left: usize, right: usize) -> Result<Ordering> {
		self.compare_values(&scope.layout, &ordering_type(scope)?, left, right, scope.depth)
	}

	/// Finds where the value at `src` belongs in `scope`. The returned cursor
	/// sits on the equal element if there is one, otherwise on the first
	/// greater element or the end of the scope.
	pub(crate) fn prepare_sparse_move(&self, scope: &RowCursor, src: &RowCursor) -> Result<RowCursor> {
		let mut dst = scope.clone();
		dst.reset(self)?;
		while dst.index < dst.count {
			self.read_sparse_metadata(&mut dst)?;
			match self.compare_with_element(scope, src, dst.meta_offset)? {
				Ordering::Greater => {
					dst.meta_offset += self.sparse_compute_size(&dst)?;
					dst.index += 1;
				}
				ordering => {
					dst.exists = ordering == Ordering::Equal;
					return Ok(dst);
				}
			}
		}
		dst.cell_type = Some(LayoutCode::EndScope);
		dst.cell_type_args = TypeArgumentList::empty();
		dst.value_offset = dst.meta_offset;
		dst.exists = false;
		Ok(dst)
	}

	/// Moves the field at `src` into `scope` at its sorted position and
	/// deletes `src`. `scope` is re-read afterwards and left at its first
	/// element.
	pub(crate) fn typed_collection_move_field(
		&mut self,
		scope: &mut RowCursor,
		src: &mut RowCursor,
		options: UpdateOptions,
	) -> Result<()> {
		if options == UpdateOptions::InsertAt {
			return Err(Error::TypeConstraint);
		}
		if scope.immutable || src.immutable {
			return Err(Error::InsufficientPermissions);
		}
		if !src.exists {
			return Err(Error::NotFound);
		}
		let code = src.cell_type.ok_or(Error::NotFound)?;
		check_element_type(scope, code, &src.cell_type_args)?;

		let mut dst = self.prepare_sparse_move(scope, src)?;
		match options {
			UpdateOptions::Insert if dst.exists => return Err(Error::Exists),
			UpdateOptions::Update if !dst.exists => return Err(Error::NotFound),
			_ => {}
		}

		let metadata = src.value_offset - src.meta_offset;
		let payload_len = self.sparse_compute_size(src)? - metadata;
		let payload = self.read_bytes(src.value_offset, payload_len)?.to_vec();
		let args = src.cell_type_args.clone();

		let before = self.len();
		self.write_sparse_header(&mut dst, code, &args, payload.len(), options)?;
		self.write_bytes(dst.value_offset, &payload)?;
		let inserted = self.len() as isize - before as isize;

		if src.meta_offset >= dst.meta_offset {
			src.rebase(inserted);
		}
		let src_offset = src.meta_offset;
		let removed = self.delete_sparse(src)?;
		if src_offset < scope.start {
			scope.start = rebase(scope.start, removed);
		}
		trace!(scope = %scope.scope_type, index = dst.index, "moved field into unique scope");
		scope.reset(self)
	}

	/// Locates the element equal to the field at `pattern` and deletes the
	/// pattern. Fails with `NotFound` when no element matches.
	pub(crate) fn typed_collection_find(&mut self, scope: &mut RowCursor, pattern: &mut RowCursor) -> Result<RowCursor> {
		if !pattern.exists {
			return Err(Error::NotFound);
		}
		let code = pattern.cell_type.ok_or(Error::NotFound)?;
		check_element_type(scope, code, &pattern.cell_type_args)?;

		let dst = self.prepare_sparse_move(scope, pattern)?;
		let found = dst.exists;
		let pattern_offset = pattern.meta_offset;
		let removed = self.delete_sparse(pattern)?;
		if pattern_offset < scope.start {
			scope.start = rebase(scope.start, removed);
		}
		if !found {
			return Err(Error::NotFound);
		}

		let index = dst.index;
		let mut dst = scope.clone();
		dst.reset(self)?;
		while self.sparse_iterator_move_next(&mut dst)? {
			if dst.index == index {
				return Ok(dst);
			}
		}
		Err(Error::NotFound)
	}

	/// Re-sorts the elements of `scope` after a bulk fill, failing with
	/// `Exists` on duplicates.
	pub(crate) fn typed_collection_unique_index_rebuild(&mut self, scope: &RowCursor) -> Result<()> {
		let mut it = scope.clone();
		it.reset(self)?;
		let mut elements = Vec::new();
		while self.sparse_iterator_move_next(&mut it)? {
			elements.push((it.meta_offset, self.sparse_compute_size(&it)?));
		}
		let (Some(&(first, _)), Some(&(last, last_size))) = (elements.first(), elements.last()) else {
			return Ok(());
		};

		let mut order: Vec<usize> = Vec::with_capacity(elements.len());
		for i in 0..elements.len() {
			let (mut low, mut high) = (0, order.len());
			while low < high {
				let mid = (low + high) / 2;
				match self.compare_elements(scope, elements[order[mid]].0, elements[i].0)? {
					Ordering::Less => low = mid + 1,
					Ordering::Greater => high = mid,
					Ordering::Equal => return Err(Error::Exists),
				}
			}
			order.insert(low, i);
		}
		if order.iter().enumerate().all(|(position, &i)| position == i) {
			return Ok(());
		}

		let mut sorted = Vec::with_capacity(last + last_size - first);
		for i in order {
			let (offset, size) = elements[i];
			sorted.extend_from_slice(self.read_bytes(offset, size)?);
		}
		self.write_bytes(first, &sorted)
	}
}

/// Fields moved into a unique scope must have its element type; mutability
/// of nested scopes is not part of the comparison.
fn check_element_type(scope: &RowCursor, code: LayoutCode, args: &TypeArgumentList) -> Result<()> {
	let expected = unique_element_type(scope)?;
	if code.canonical() != expected.code.canonical() || *args != expected.args {
		return Err(Error::TypeConstraint);
	}
	Ok(())
}

fn is_map(scope: &RowCursor) -> bool {
	scope.scope_type.canonical() == LayoutCode::TypedMapScope
}
