// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The self-describing sparse region.
//!
//! Every sparse element is `[code][type args][path]` followed by its value,
//! where the code and arguments are omitted in typed scopes (the scope already
//! names the element type) and the path only appears in object-like scopes.
//! Booleans and null are the exception: their value is the code, so the code
//! is always written.

use hybridrow_type::{Error, LayoutCode, Result, SchemaId, TypeArgument, TypeArgumentList};

use super::{RowBuffer, varint::encode_varuint};
use crate::{cursor::RowCursor, layout::Layout};

/// Deepest nesting of scopes or type arguments accepted in a row.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// How a write treats an existing value at the target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateOptions {
	/// Replace an existing value; fails with `NotFound` otherwise.
	Update,
	/// Write a new value; fails with `Exists` if one is present.
	Insert,
	/// Insert or replace.
	#[default]
	Upsert,
	/// Insert in front of the current element of an indexed scope.
	InsertAt,
}

/// Element type implied by a typed scope at the cursor's position.
pub(crate) fn element_type(edit: &RowCursor) -> Option<TypeArgument> {
	let args = &edit.scope_type_args;
	match edit.scope_type.canonical() {
		LayoutCode::TypedArrayScope | LayoutCode::TypedSetScope | LayoutCode::NullableScope => args.first().cloned(),
		LayoutCode::TypedMapScope => Some(map_entry_type(edit.scope_type, args)),
		LayoutCode::TypedTupleScope | LayoutCode::TaggedScope | LayoutCode::Tagged2Scope => {
			args.get(edit.index).cloned()
		}
		_ => None,
	}
}

/// Entries of a map are key/value tuples sharing the map's mutability.
pub(crate) fn map_entry_type(scope_type: LayoutCode, args: &TypeArgumentList) -> TypeArgument {
	let code = if scope_type.is_immutable() {
		LayoutCode::ImmutableTypedTupleScope
	} else {
		LayoutCode::TypedTupleScope
	};
	TypeArgument::new(code, args.clone())
}

/// Type equality where both boolean codes denote the same type.
pub(crate) fn same_type(left: &TypeArgument, right: &TypeArgument) -> bool {
	let canonical = |code: LayoutCode| if code.is_bool() { LayoutCode::Boolean } else { code };
	canonical(left.code) == canonical(right.code) && left.args == right.args
}

fn validate_type_args(code: LayoutCode, args: &TypeArgumentList) -> Result<()> {
	let valid = match code.canonical() {
		LayoutCode::TypedArrayScope | LayoutCode::TypedSetScope | LayoutCode::NullableScope => args.len() == 1,
		LayoutCode::TypedMapScope => args.len() == 2,
		LayoutCode::TaggedScope => args.len() == 2 && args[0].code == LayoutCode::UInt8,
		LayoutCode::Tagged2Scope => args.len() == 3 && args[0].code == LayoutCode::UInt8,
		LayoutCode::Schema => args.schema_id().is_valid(),
		LayoutCode::TupleScope | LayoutCode::TypedTupleScope => true,
		_ => args.is_empty(),
	};
	if valid { Ok(()) } else { Err(Error::TypeConstraint) }
}

fn encode_type_argument(arg: &TypeArgument, out: &mut Vec<u8>, depth: usize) -> Result<()> {
	out.push(arg.code.to_u8());
	encode_type_args(arg.code, &arg.args, out, depth + 1)
}

/// Appends the wire form of `code`'s arguments. Tagged scopes keep their
/// implicit `uint8` tag out of the wire form.
pub(crate) fn encode_type_args(
	code: LayoutCode,
	args: &TypeArgumentList,
	out: &mut Vec<u8>,
	depth: usize,
) -> Result<()> {
	if depth > MAX_NESTING_DEPTH {
		return Err(Error::TypeConstraint);
	}
	validate_type_args(code, args)?;
	match code.canonical() {
		LayoutCode::Schema => out.extend_from_slice(&args.schema_id().to_le_bytes()),
		LayoutCode::TaggedScope | LayoutCode::Tagged2Scope => {
			for arg in args.iter().skip(1) {
				encode_type_argument(arg, out, depth)?;
			}
		}
		LayoutCode::TupleScope | LayoutCode::TypedTupleScope => {
			encode_varuint(args.len() as u64, out);
			for arg in args.iter() {
				encode_type_argument(arg, out, depth)?;
			}
		}
		_ => {
			for arg in args.iter() {
				encode_type_argument(arg, out, depth)?;
			}
		}
	}
	Ok(())
}

impl RowBuffer {
	fn read_type_argument(&self, offset: usize, depth: usize) -> Result<(TypeArgument, usize)> {
		let code = LayoutCode::from_u8(self.read_u8(offset)?)?;
		if code == LayoutCode::EndScope || code == LayoutCode::Invalid {
			return Err(Error::InvalidRow);
		}
		let (args, len) = self.read_type_argument_list(code, offset + 1, depth + 1)?;
		Ok((TypeArgument::new(code, args), len + 1))
	}

	fn read_type_arguments(
		&self,
		offset: usize,
		count: usize,
		depth: usize,
		into: &mut Vec<TypeArgument>,
	) -> Result<usize> {
		let mut len = 0;
		for _ in 0..count {
			let (arg, arg_len) = self.read_type_argument(offset + len, depth)?;
			into.push(arg);
			len += arg_len;
		}
		Ok(len)
	}

	/// Reads the arguments that follow `code` at `offset`, returning them with
	/// their encoded length.
	pub(crate) fn read_type_argument_list(
		&self,
		code: LayoutCode,
		offset: usize,
		depth: usize,
	) -> Result<(TypeArgumentList, usize)> {
		if depth > MAX_NESTING_DEPTH {
			return Err(Error::InvalidRow);
		}
		let mut args = Vec::new();
		let len = match code.canonical() {
			LayoutCode::Schema => {
				let id = SchemaId::new(self.read_i32(offset)?);
				return Ok((TypeArgumentList::from_schema_id(id), SchemaId::SIZE));
			}
			LayoutCode::TypedArrayScope | LayoutCode::TypedSetScope | LayoutCode::NullableScope => {
				self.read_type_arguments(offset, 1, depth, &mut args)?
			}
			LayoutCode::TypedMapScope => self.read_type_arguments(offset, 2, depth, &mut args)?,
			LayoutCode::TaggedScope => {
				args.push(LayoutCode::UInt8.into());
				self.read_type_arguments(offset, 1, depth, &mut args)?
			}
			LayoutCode::Tagged2Scope => {
				args.push(LayoutCode::UInt8.into());
				self.read_type_arguments(offset, 2, depth, &mut args)?
			}
			LayoutCode::TupleScope | LayoutCode::TypedTupleScope => {
				let (count, prefix) = self.read_varuint(offset)?;
				// Every argument takes at least one byte.
				let count = usize::try_from(count).map_err(|_| Error::InvalidRow)?;
				if count > self.len().saturating_sub(offset) {
					return Err(Error::InvalidRow);
				}
				prefix + self.read_type_arguments(offset + prefix, count, depth, &mut args)?
			}
			_ => 0,
		};
		Ok((TypeArgumentList::new(args), len))
	}
}

impl RowBuffer {
	pub(crate) fn read_sparse_path(&self, edit: &RowCursor) -> Result<String> {
		Ok(self.sparse_path(edit)?.to_string())
	}

	pub(crate) fn sparse_path_equals(&self, edit: &RowCursor, path: &str) -> Result<bool> {
		Ok(self.sparse_path(edit)? == path)
	}

	fn sparse_path<'a>(&'a self, edit: &'a RowCursor) -> Result<&'a str> {
		let tokenizer = edit.layout.tokenizer();
		if edit.path_token < tokenizer.count() {
			return tokenizer.find_string(edit.path_token).ok_or(Error::InvalidRow);
		}
		let len = usize::try_from(edit.path_token - tokenizer.count()).map_err(|_| Error::InvalidRow)?;
		std::str::from_utf8(self.read_bytes(edit.path_offset, len)?).map_err(|_| Error::InvalidRow)
	}

	/// Appends the path of the field at `edit` and returns the token written
	/// together with the offset of the path within `out`.
	fn encode_sparse_path(&self, edit: &RowCursor, out: &mut Vec<u8>) -> Result<(u64, usize)> {
		let path = match &edit.write_path {
			Some(path) => path.clone(),
			None if edit.exists => self.read_sparse_path(edit)?,
			None => return Err(Error::TypeConstraint),
		};
		let tokenizer = edit.layout.tokenizer();
		match tokenizer.find_token(&path) {
			Some(token) => {
				encode_varuint(token, out);
				Ok((token, out.len()))
			}
			None => {
				let token = tokenizer.count() + path.len() as u64;
				encode_varuint(token, out);
				let offset = out.len();
				out.extend_from_slice(path.as_bytes());
				Ok((token, offset))
			}
		}
	}
}

impl RowBuffer {
	/// Offset of the first element of `scope`.
	pub(crate) fn scope_first_offset(&self, scope: &RowCursor) -> Result<usize> {
		match scope.scope_type.canonical() {
			code if code.is_sized_scope() => Ok(scope.start + 4),
			LayoutCode::NullableScope => Ok(scope.start + 1),
			LayoutCode::Schema => {
				self.compute_variable_value_offset(&scope.layout, scope.start, scope.layout.num_variable)
			}
			_ => Ok(scope.start),
		}
	}

	/// A cursor over the scope of type `code` whose body starts at `offset`.
	pub(crate) fn scope_at(
		&self,
		layout: &Layout,
		code: LayoutCode,
		args: &TypeArgumentList,
		offset: usize,
		immutable: bool,
		depth: usize,
	) -> Result<RowCursor> {
		if depth > MAX_NESTING_DEPTH {
			return Err(Error::InvalidRow);
		}
		let layout = if code.is_udt() {
			self.resolve(args.schema_id())?
		} else {
			layout.clone()
		};
		let mut scope = RowCursor::scope(layout, code, args.clone(), offset, immutable, depth);
		match code.canonical() {
			LayoutCode::ObjectScope | LayoutCode::ArrayScope | LayoutCode::Schema => {}
			LayoutCode::TupleScope
			| LayoutCode::TypedTupleScope
			| LayoutCode::TaggedScope
			| LayoutCode::Tagged2Scope => scope.count = args.len(),
			LayoutCode::TypedArrayScope
			| LayoutCode::TypedSetScope
			| LayoutCode::TypedMapScope
			| LayoutCode::NullableScope => {}
			_ => return Err(Error::TypeMismatch),
		}
		scope.reset(self)?;
		Ok(scope)
	}

	/// Enters the scope stored at the current element of `edit`.
	pub(crate) fn sparse_iterator_read_scope(&self, edit: &RowCursor, immutable: bool) -> Result<RowCursor> {
		let code = edit.cell_type.ok_or(Error::NotFound)?;
		self.scope_at(
			&edit.layout,
			code,
			&edit.cell_type_args,
			edit.value_offset,
			immutable || code.is_immutable(),
			edit.depth + 1,
		)
	}

	pub(crate) fn sparse_iterator_move_next(&self, edit: &mut RowCursor) -> Result<bool> {
		if edit.cell_type.is_some() && edit.exists {
			if edit.scope_type.is_indexed_scope() {
				edit.index += 1;
			}
			if edit.end_offset != 0 {
				edit.meta_offset = edit.end_offset;
				edit.end_offset = 0;
			} else {
				edit.meta_offset += self.sparse_compute_size(edit)?;
			}
		}

		let in_bounds = edit.meta_offset < self.len();
		let within_count = !edit.is_counted() || edit.index < edit.count;
		if in_bounds && within_count {
			self.read_sparse_metadata(edit)?;
			if edit.cell_type != Some(LayoutCode::EndScope) {
				edit.exists = true;
				return Ok(true);
			}
		}

		edit.cell_type = Some(LayoutCode::EndScope);
		edit.cell_type_args = TypeArgumentList::empty();
		edit.exists = false;
		edit.value_offset = edit.meta_offset;
		Ok(false)
	}

	/// Decodes the type and path of the element at `edit.meta_offset`.
	pub(crate) fn read_sparse_metadata(&self, edit: &mut RowCursor) -> Result<()> {
		edit.path_token = 0;
		edit.path_offset = 0;

		let element = element_type(edit);
		if let Some(arg) = &element {
			if !arg.code.always_requires_type_code() {
				edit.cell_type = Some(arg.code);
				edit.cell_type_args = arg.args.clone();
				edit.value_offset = edit.meta_offset;
				return Ok(());
			}
		}

		let code = LayoutCode::from_u8(self.read_u8(edit.meta_offset)?)?;
		edit.cell_type = Some(code);
		if code == LayoutCode::Invalid {
			return Err(Error::InvalidRow);
		}
		if code == LayoutCode::EndScope {
			if !edit.scope_type.is_terminated_scope() {
				return Err(Error::InvalidRow);
			}
			edit.cell_type_args = TypeArgumentList::empty();
			edit.value_offset = edit.meta_offset;
			return Ok(());
		}
		if let Some(arg) = element {
			if !same_type(&arg, &TypeArgument::simple(code)) {
				return Err(Error::InvalidRow);
			}
		}

		let (args, len) = self.read_type_argument_list(code, edit.meta_offset + 1, 0)?;
		edit.cell_type_args = args;
		edit.value_offset = edit.meta_offset + 1 + len;

		if edit.scope_type.is_object_like() {
			let (token, len) = self.read_varuint(edit.value_offset)?;
			edit.path_token = token;
			edit.path_offset = edit.value_offset + len;
			edit.value_offset += len;
			let count = edit.layout.tokenizer().count();
			if token >= count {
				let inline = usize::try_from(token - count).map_err(|_| Error::InvalidRow)?;
				self.read_bytes(edit.path_offset, inline)?;
				edit.value_offset += inline;
			}
		}
		Ok(())
	}

	/// Encoded size of the current element including its metadata.
	pub(crate) fn sparse_compute_size(&self, edit: &RowCursor) -> Result<usize> {
		let code = edit.cell_type.ok_or(Error::NotFound)?;
		let metadata = edit.value_offset - edit.meta_offset;
		Ok(metadata + self.value_size(&edit.layout, code, &edit.cell_type_args, edit.value_offset, edit.depth)?)
	}

	/// Size of a value of type `code` stored at `offset` without metadata.
	pub(crate) fn value_size(
		&self,
		layout: &Layout,
		code: LayoutCode,
		args: &TypeArgumentList,
		offset: usize,
		depth: usize,
	) -> Result<usize> {
		if !code.is_scope() {
			return self.primitive_value_size(code, offset);
		}
		let scope = self.scope_at(layout, code, args, offset, true, depth + 1)?;
		Ok(self.skip_scope(scope)? - offset)
	}

	/// Offset just past the end of `scope`.
	pub(crate) fn skip_scope(&self, mut scope: RowCursor) -> Result<usize> {
		while self.sparse_iterator_move_next(&mut scope)? {}
		if !scope.scope_type.is_terminated_scope() {
			return Ok(scope.meta_offset);
		}
		// Only the root scope ends with the row instead of an end marker.
		match (scope.meta_offset < self.len(), scope.depth) {
			(true, _) => Ok(scope.meta_offset + 1),
			(false, 0) => Ok(scope.meta_offset),
			(false, _) => Err(Error::InvalidRow),
		}
	}
}

impl RowBuffer {
	/// Appends the initial encoding of a value of type `code` in a typed
	/// position: booleans and null include their code, scopes are empty and
	/// fixed-arity scopes hold defaults for each of their elements.
	pub(crate) fn default_value(
		&self,
		code: LayoutCode,
		args: &TypeArgumentList,
		out: &mut Vec<u8>,
		depth: usize,
	) -> Result<()> {
		if depth > MAX_NESTING_DEPTH {
			return Err(Error::TypeConstraint);
		}
		match code.canonical() {
			LayoutCode::Null => out.push(LayoutCode::Null.to_u8()),
			LayoutCode::Boolean => out.push(LayoutCode::BooleanFalse.to_u8()),
			LayoutCode::Utf8 | LayoutCode::Binary | LayoutCode::VarInt | LayoutCode::VarUInt => out.push(0),
			LayoutCode::ObjectScope | LayoutCode::ArrayScope => out.push(LayoutCode::EndScope.to_u8()),
			LayoutCode::TypedArrayScope | LayoutCode::TypedSetScope | LayoutCode::TypedMapScope => {
				out.extend_from_slice(&0u32.to_le_bytes())
			}
			LayoutCode::TupleScope => {
				out.extend(std::iter::repeat_n(LayoutCode::Null.to_u8(), args.len()));
				out.push(LayoutCode::EndScope.to_u8());
			}
			LayoutCode::TypedTupleScope | LayoutCode::TaggedScope | LayoutCode::Tagged2Scope => {
				for arg in args.iter() {
					self.default_value(arg.code, &arg.args, out, depth + 1)?;
				}
			}
			LayoutCode::NullableScope => out.push(0),
			LayoutCode::Schema => {
				let layout = self.resolve(args.schema_id())?;
				out.resize(out.len() + layout.size, 0);
				out.push(LayoutCode::EndScope.to_u8());
			}
			code if code.is_fixed() => out.resize(out.len() + code.size(), 0),
			_ => return Err(Error::TypeConstraint),
		}
		Ok(())
	}

	/// Validates a write of `type_arg` at `edit` against the scope's type
	/// constraints and the update mode.
	pub(crate) fn prepare_sparse_write(
		&self,
		edit: &mut RowCursor,
		type_arg: &TypeArgument,
		options: UpdateOptions,
	) -> Result<()> {
		if edit.immutable || (edit.scope_type.is_unique_scope() && !edit.defer_unique_index) {
			return Err(Error::InsufficientPermissions);
		}

		let scope = edit.scope_type.canonical();
		if scope.is_fixed_arity() {
			if options == UpdateOptions::InsertAt || edit.index >= edit.count {
				return Err(Error::TypeConstraint);
			}
			if !edit.exists {
				self.read_sparse_metadata(edit)?;
				edit.exists = true;
			}
			let expected = edit.scope_type_args.get(edit.index).ok_or(Error::TypeConstraint)?;
			let null_slot = scope == LayoutCode::TupleScope && type_arg.code == LayoutCode::Null;
			if !null_slot && !same_type(type_arg, expected) {
				return Err(Error::TypeConstraint);
			}
		} else if scope == LayoutCode::TypedMapScope {
			if type_arg.code.canonical() != LayoutCode::TypedTupleScope || type_arg.args != edit.scope_type_args {
				return Err(Error::TypeConstraint);
			}
		} else if scope.is_typed_scope() {
			let expected = edit.scope_type_args.first().ok_or(Error::TypeConstraint)?;
			if !same_type(type_arg, expected) {
				return Err(Error::TypeConstraint);
			}
		}

		if options == UpdateOptions::InsertAt {
			if !scope.is_indexed_scope() {
				return Err(Error::TypeConstraint);
			}
			edit.exists = false;
		}
		if options == UpdateOptions::Update && !edit.exists {
			return Err(Error::NotFound);
		}
		if options == UpdateOptions::Insert && edit.exists {
			return Err(Error::Exists);
		}

		Ok(())
	}

	pub(crate) fn prepare_sparse_read(&self, edit: &RowCursor, code: LayoutCode) -> Result<()> {
		if !edit.exists {
			return Err(Error::NotFound);
		}
		let stored = edit.cell_type.ok_or(Error::NotFound)?;
		if stored.canonical() != code.canonical() {
			return Err(Error::TypeMismatch);
		}
		Ok(())
	}

	pub(crate) fn prepare_sparse_delete(&self, edit: &RowCursor, code: LayoutCode) -> Result<()> {
		if edit.scope_type.is_fixed_arity() {
			return Err(Error::TypeConstraint);
		}
		if edit.immutable {
			return Err(Error::InsufficientPermissions);
		}
		self.prepare_sparse_read(edit, code)
	}

	/// Writes the metadata for a value of `num_bytes` bytes at `edit`,
	/// replacing the existing element if there is one. The value bytes are
	/// left zeroed at `edit.value_offset` for the caller to fill.
	pub(crate) fn write_sparse_header(
		&mut self,
		edit: &mut RowCursor,
		code: LayoutCode,
		args: &TypeArgumentList,
		num_bytes: usize,
		options: UpdateOptions,
	) -> Result<()> {
		let implicit = element_type(edit).is_some_and(|arg| !arg.code.always_requires_type_code());

		let mut metadata = Vec::new();
		let mut path = None;
		if !implicit {
			metadata.push(code.to_u8());
			encode_type_args(code, args, &mut metadata, 0)?;
			if edit.scope_type.is_object_like() {
				path = Some(self.encode_sparse_path(edit, &mut metadata)?);
			}
		}

		let existed = edit.exists && options != UpdateOptions::InsertAt;
		let available = if existed {
			self.sparse_compute_size(edit)?
		} else {
			0
		};
		self.shift(edit.meta_offset, available, metadata.len() + num_bytes)?;
		self.write_bytes(edit.meta_offset, &metadata)?;

		if edit.scope_type.is_sized_scope() && !existed {
			let count = self.read_u32(edit.start)?;
			self.write_u32(edit.start, count + 1)?;
			edit.count += 1;
		}

		let (path_token, path_offset) = path.map_or((0, 0), |(token, offset)| (token, edit.meta_offset + offset));
		edit.path_token = path_token;
		edit.path_offset = path_offset;
		edit.value_offset = edit.meta_offset + metadata.len();
		edit.cell_type = Some(code);
		edit.cell_type_args = args.clone();
		edit.exists = true;
		edit.end_offset = 0;
		Ok(())
	}

	/// Writes a non-scope value whose encoding is `payload`.
	pub(crate) fn write_sparse_primitive(
		&mut self,
		edit: &mut RowCursor,
		code: LayoutCode,
		payload: &[u8],
		options: UpdateOptions,
	) -> Result<()> {
		self.write_sparse_header(edit, code, &TypeArgumentList::empty(), payload.len(), options)?;
		self.write_bytes(edit.value_offset, payload)
	}

	/// Writes an empty scope at `edit` and returns a cursor over it.
	pub(crate) fn write_sparse_scope(
		&mut self,
		edit: &mut RowCursor,
		code: LayoutCode,
		args: &TypeArgumentList,
		has_value: bool,
		options: UpdateOptions,
	) -> Result<RowCursor> {
		validate_type_args(code, args)?;
		let mut body = Vec::new();
		if code.canonical() == LayoutCode::NullableScope {
			body.push(u8::from(has_value));
			if has_value {
				self.default_value(args[0].code, &args[0].args, &mut body, 1)?;
			}
		} else {
			self.default_value(code, args, &mut body, 0)?;
		}

		self.write_sparse_header(edit, code, args, body.len(), options)?;
		self.write_bytes(edit.value_offset, &body)?;
		self.scope_at(&edit.layout, code, args, edit.value_offset, edit.immutable, edit.depth + 1)
	}

	/// Removes the current element, returning the change in row length.
	pub(crate) fn delete_sparse(&mut self, edit: &mut RowCursor) -> Result<isize> {
		if !edit.exists {
			return Err(Error::NotFound);
		}
		let size = self.sparse_compute_size(edit)?;
		let shift = self.shift(edit.meta_offset, size, 0)?;
		if edit.scope_type.is_sized_scope() {
			let count = self.read_u32(edit.start)?;
			self.write_u32(edit.start, count.saturating_sub(1))?;
			edit.count = edit.count.saturating_sub(1);
		}
		edit.cell_type = None;
		edit.cell_type_args = TypeArgumentList::empty();
		edit.exists = false;
		edit.value_offset = edit.meta_offset;
		edit.path_token = 0;
		edit.path_offset = 0;
		edit.end_offset = 0;
		Ok(shift)
	}
}
