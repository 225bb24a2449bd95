// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_type::{Error, LayoutCode, Result, TypeArgument, TypeArgumentList};
use tracing::instrument;

use super::{Layout, LayoutBit, LayoutColumn, StringTokenizer, column_width};
use crate::schema::{Namespace, Property, PropertyKind, PropertyType, Schema, StorageKind, TypeKind};

/// Turns a [`Schema`] into a [`Layout`].
pub struct LayoutCompiler;

impl LayoutCompiler {
	#[instrument(
		name = "layout::compile",
		level = "trace",
		skip(namespace, schema),
		fields(schema = %schema.name, id = %schema.id)
	)]
	pub fn compile(namespace: &Namespace, schema: &Schema) -> Result<Layout> {
		let mut builder = LayoutBuilder::default();
		for property in &schema.properties {
			builder.add_property(namespace, property, None)?;
		}
		Ok(builder.build(schema))
	}
}

#[derive(Default)]
struct LayoutBuilder {
	fixed: Vec<LayoutColumn>,
	variable: Vec<LayoutColumn>,
	sparse: Vec<LayoutColumn>,
	next_bit: usize,
	tokenizer: StringTokenizer,
}

impl LayoutBuilder {
	fn allocate_bit(&mut self) -> LayoutBit {
		let bit = LayoutBit(self.next_bit);
		self.next_bit += 1;
		bit
	}

	fn add_property(&mut self, namespace: &Namespace, property: &Property, parent: Option<usize>) -> Result<()> {
		let pt = &property.property_type;
		let path = match parent {
			Some(index) => format!("{}.{}", self.sparse[index].path, property.path),
			None => property.path.clone(),
		};

		match &pt.kind {
			PropertyKind::Primitive {
				type_kind,
				storage,
				length,
			} => {
				let code = type_kind.code().ok_or(Error::TypeConstraint)?;
				match storage {
					StorageKind::Fixed => {
						if parent.is_some() {
							return Err(Error::TypeConstraint);
						}
						let sized = matches!(code, LayoutCode::Utf8 | LayoutCode::Binary);
						if (sized && *length == 0) || (!sized && (!code.is_fixed() || code == LayoutCode::Null)) {
							return Err(Error::TypeConstraint);
						}
						let null_bit = pt.nullable.then(|| self.allocate_bit());
						let bool_bit = (code == LayoutCode::Boolean).then(|| self.allocate_bit());
						self.fixed.push(LayoutColumn {
							path,
							name: property.path.clone(),
							type_arg: TypeArgument::simple(code),
							storage: StorageKind::Fixed,
							offset: 0,
							null_bit,
							bool_bit,
							size: *length as usize,
							index: 0,
							parent: None,
						});
					}
					StorageKind::Variable => {
						if parent.is_some() || !code.is_variable() {
							return Err(Error::TypeConstraint);
						}
						let null_bit = Some(self.allocate_bit());
						let slot = self.variable.len();
						self.variable.push(LayoutColumn {
							path,
							name: property.path.clone(),
							type_arg: TypeArgument::simple(code),
							storage: StorageKind::Variable,
							offset: slot,
							null_bit,
							bool_bit: None,
							size: *length as usize,
							index: 0,
							parent: None,
						});
					}
					StorageKind::Sparse => {
						self.push_sparse(property, path, TypeArgument::simple(code), parent);
					}
				}
			}
			PropertyKind::Object {
				properties,
			} => {
				let code = immutable_twin(LayoutCode::ObjectScope, pt.immutable);
				let index = self.push_sparse(property, path, TypeArgument::simple(code), parent);
				for nested in properties {
					self.add_property(namespace, nested, Some(index))?;
				}
			}
			_ => {
				let type_arg = type_argument(namespace, pt)?;
				self.push_sparse(property, path, type_arg, parent);
			}
		}
		Ok(())
	}

	fn push_sparse(
		&mut self,
		property: &Property,
		path: String,
		type_arg: TypeArgument,
		parent: Option<usize>,
	) -> usize {
		self.tokenizer.add(&property.path);
		self.sparse.push(LayoutColumn {
			path,
			name: property.path.clone(),
			type_arg,
			storage: StorageKind::Sparse,
			offset: 0,
			null_bit: None,
			bool_bit: None,
			size: 0,
			index: 0,
			parent,
		});
		self.sparse.len() - 1
	}

	fn build(self, schema: &Schema) -> Layout {
		let num_bitmask_bytes = self.next_bit.div_ceil(8);
		let sparse_base = self.fixed.len() + self.variable.len();

		let mut offset = num_bitmask_bytes;
		let mut columns = Vec::with_capacity(sparse_base + self.sparse.len());
		for mut column in self.fixed {
			column.offset = offset;
			offset += column_width(&column);
			columns.push(column);
		}
		columns.extend(self.variable);
		columns.extend(self.sparse.into_iter().map(|mut column| {
			column.parent = column.parent.map(|p| p + sparse_base);
			column
		}));
		for (index, column) in columns.iter_mut().enumerate() {
			column.index = index;
		}

		Layout::new(
			schema.name.clone(),
			schema.id,
			columns,
			num_bitmask_bytes,
			self.tokenizer,
			schema.options.disallow_unschematized,
		)
	}
}

fn immutable_twin(code: LayoutCode, immutable: bool) -> LayoutCode {
	if immutable {
		code.to_immutable()
	} else {
		code
	}
}

/// Type argument of a sparse property or collection item.
fn type_argument(namespace: &Namespace, pt: &PropertyType) -> Result<TypeArgument> {
	let arg = match &pt.kind {
		PropertyKind::Primitive {
			type_kind,
			storage,
			..
		} => {
			if *storage != StorageKind::Sparse {
				return Err(Error::TypeConstraint);
			}
			TypeArgument::simple(type_kind.code().ok_or(Error::TypeConstraint)?)
		}
		PropertyKind::Array {
			items,
		} => match items.kind {
			PropertyKind::Primitive {
				type_kind: TypeKind::Any,
				..
			} => TypeArgument::simple(LayoutCode::ArrayScope),
			_ => TypeArgument::new(
				LayoutCode::TypedArrayScope,
				TypeArgumentList::new(vec![item_argument(namespace, items)?]),
			),
		},
		PropertyKind::Object {
			..
		} => TypeArgument::simple(LayoutCode::ObjectScope),
		PropertyKind::Set {
			items,
		} => TypeArgument::new(
			LayoutCode::TypedSetScope,
			TypeArgumentList::new(vec![item_argument(namespace, items)?]),
		),
		PropertyKind::Map {
			keys,
			values,
		} => TypeArgument::new(
			LayoutCode::TypedMapScope,
			TypeArgumentList::new(vec![item_argument(namespace, keys)?, item_argument(namespace, values)?]),
		),
		PropertyKind::Tuple {
			items,
		} => {
			let args = items.iter().map(|item| item_argument(namespace, item)).collect::<Result<Vec<_>>>()?;
			TypeArgument::new(LayoutCode::TypedTupleScope, TypeArgumentList::new(args))
		}
		PropertyKind::Tagged {
			items,
		} => {
			let code = match items.len() {
				1 => LayoutCode::TaggedScope,
				2 => LayoutCode::Tagged2Scope,
				_ => return Err(Error::TypeConstraint),
			};
			let mut args = vec![TypeArgument::simple(LayoutCode::UInt8)];
			for item in items {
				args.push(item_argument(namespace, item)?);
			}
			TypeArgument::new(code, TypeArgumentList::new(args))
		}
		PropertyKind::Udt {
			name,
			id,
		} => {
			let schema_id = match id {
				Some(id) => *id,
				None => namespace.schema_by_name(name).map(|s| s.id).ok_or(Error::SchemaMismatch)?,
			};
			TypeArgument::udt(false, schema_id)
		}
	};

	Ok(TypeArgument::new(immutable_twin(arg.code, pt.immutable), arg.args))
}

fn item_argument(namespace: &Namespace, pt: &PropertyType) -> Result<TypeArgument> {
	let arg = type_argument(namespace, pt)?;
	if pt.nullable {
		Ok(TypeArgument::new(LayoutCode::NullableScope, TypeArgumentList::new(vec![arg])))
	} else {
		Ok(arg)
	}
}
