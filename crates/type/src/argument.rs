// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
	sync::Arc,
};

use crate::{LayoutCode, SchemaId};

/// A layout code together with the arguments that parameterize it, e.g.
/// `array_t<int32>` or `map_t<utf8, udt<7>>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeArgument {
	pub code: LayoutCode,
	pub args: TypeArgumentList,
}

impl TypeArgument {
	pub fn new(code: LayoutCode, args: TypeArgumentList) -> Self {
		Self {
			code,
			args,
		}
	}

	/// An argument without parameters, e.g. a primitive.
	pub fn simple(code: LayoutCode) -> Self {
		Self {
			code,
			args: TypeArgumentList::empty(),
		}
	}

	pub fn udt(immutable: bool, schema_id: SchemaId) -> Self {
		let code = if immutable {
			LayoutCode::ImmutableSchema
		} else {
			LayoutCode::Schema
		};
		Self {
			code,
			args: TypeArgumentList::from_schema_id(schema_id),
		}
	}

	pub fn is_immutable(&self) -> bool {
		self.code.is_immutable()
	}
}

impl From<LayoutCode> for TypeArgument {
	fn from(code: LayoutCode) -> Self {
		Self::simple(code)
	}
}

impl Display for TypeArgument {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}", self.code, self.args)
	}
}

/// Ordered, immutable list of type arguments. UDT scopes carry their schema id
/// here instead of nested arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeArgumentList {
	args: Arc<[TypeArgument]>,
	schema_id: SchemaId,
}

impl TypeArgumentList {
	pub fn empty() -> Self {
		Self {
			args: Arc::from(Vec::new()),
			schema_id: SchemaId::INVALID,
		}
	}

	pub fn new(args: Vec<TypeArgument>) -> Self {
		Self {
			args: Arc::from(args),
			schema_id: SchemaId::INVALID,
		}
	}

	pub fn from_schema_id(schema_id: SchemaId) -> Self {
		Self {
			args: Arc::from(Vec::new()),
			schema_id,
		}
	}

	pub fn schema_id(&self) -> SchemaId {
		self.schema_id
	}

	pub fn as_slice(&self) -> &[TypeArgument] {
		&self.args
	}
}

impl Default for TypeArgumentList {
	fn default() -> Self {
		Self::empty()
	}
}

impl Deref for TypeArgumentList {
	type Target = [TypeArgument];

	fn deref(&self) -> &Self::Target {
		&self.args
	}
}

impl From<Vec<TypeArgument>> for TypeArgumentList {
	fn from(args: Vec<TypeArgument>) -> Self {
		Self::new(args)
	}
}

impl Display for TypeArgumentList {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.schema_id.is_valid() {
			return write!(f, "<{}>", self.schema_id);
		}
		if self.args.is_empty() {
			return Ok(());
		}
		f.write_str("<")?;
		for (i, arg) in self.args.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", arg)?;
		}
		f.write_str(">")
	}
}
