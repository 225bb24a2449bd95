// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod compiler;
mod tokenizer;

use std::{collections::HashMap, ops::Deref, sync::Arc};

pub use compiler::LayoutCompiler;
use hybridrow_type::{LayoutCode, SchemaId, TypeArgument};
pub use tokenizer::StringTokenizer;

use crate::schema::StorageKind;

/// Position of a bit in a scope's bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutBit(pub usize);

impl LayoutBit {
	/// Byte holding the bit, relative to the bitmask start.
	pub const fn offset(self) -> usize {
		self.0 / 8
	}

	pub const fn mask(self) -> u8 {
		1 << (self.0 % 8)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutColumn {
	/// Dotted path from the layout root, e.g. `address.city`.
	pub path: String,
	/// Last path segment; the name written into the row for sparse fields.
	pub name: String,
	pub type_arg: TypeArgument,
	pub storage: StorageKind,
	/// Fixed columns: byte offset from the scope start. Variable columns:
	/// ordinal among the layout's variable columns. Sparse columns: zero.
	pub offset: usize,
	pub null_bit: Option<LayoutBit>,
	/// Value bit of a fixed boolean column.
	pub bool_bit: Option<LayoutBit>,
	/// Declared length of a utf8 or binary column; zero when unbounded.
	pub size: usize,
	pub index: usize,
	pub parent: Option<usize>,
}

impl LayoutColumn {
	pub fn code(&self) -> LayoutCode {
		self.type_arg.code
	}
}

/// Compiled, immutable memory plan for one schema.
#[derive(Debug, Clone)]
pub struct Layout(Arc<LayoutInner>);

impl Deref for Layout {
	type Target = LayoutInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq for Layout {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0) || self.schema_id == other.schema_id
	}
}

#[derive(Debug)]
pub struct LayoutInner {
	pub name: String,
	pub schema_id: SchemaId,
	/// Fixed columns, then variable columns, then sparse columns.
	pub columns: Vec<LayoutColumn>,
	pub num_fixed: usize,
	pub num_variable: usize,
	/// Bytes of the presence bitmask.
	pub num_bitmask_bytes: usize,
	/// Bitmask plus fixed columns, in bytes.
	pub size: usize,
	pub disallow_unschematized: bool,
	path_map: HashMap<String, usize>,
	tokenizer: StringTokenizer,
}

impl Layout {
	pub(crate) fn new(
		name: String,
		schema_id: SchemaId,
		columns: Vec<LayoutColumn>,
		num_bitmask_bytes: usize,
		tokenizer: StringTokenizer,
		disallow_unschematized: bool,
	) -> Self {
		let num_fixed = columns.iter().filter(|c| c.storage == StorageKind::Fixed).count();
		let num_variable = columns.iter().filter(|c| c.storage == StorageKind::Variable).count();
		let fixed_bytes: usize = columns
			.iter()
			.filter(|c| c.storage == StorageKind::Fixed)
			.map(|c| column_width(c))
			.sum();
		let path_map = columns.iter().map(|c| (c.path.clone(), c.index)).collect();

		Self(Arc::new(LayoutInner {
			name,
			schema_id,
			columns,
			num_fixed,
			num_variable,
			num_bitmask_bytes,
			size: num_bitmask_bytes + fixed_bytes,
			disallow_unschematized,
			path_map,
			tokenizer,
		}))
	}
}

/// Bytes a fixed column takes in the fixed region.
pub(crate) fn column_width(column: &LayoutColumn) -> usize {
	match column.code() {
		LayoutCode::Utf8 | LayoutCode::Binary => column.size,
		code => code.size(),
	}
}

impl LayoutInner {
	pub fn column(&self, path: &str) -> Option<&LayoutColumn> {
		self.path_map.get(path).map(|&index| &self.columns[index])
	}

	pub fn fixed_columns(&self) -> &[LayoutColumn] {
		&self.columns[..self.num_fixed]
	}

	pub fn variable_columns(&self) -> &[LayoutColumn] {
		&self.columns[self.num_fixed..self.num_fixed + self.num_variable]
	}

	pub fn sparse_columns(&self) -> &[LayoutColumn] {
		&self.columns[self.num_fixed + self.num_variable..]
	}

	pub fn tokenizer(&self) -> &StringTokenizer {
		&self.tokenizer
	}

	/// Whether `column` was compiled into this layout.
	pub fn owns(&self, column: &LayoutColumn) -> bool {
		self.columns.get(column.index) == Some(column)
	}
}
