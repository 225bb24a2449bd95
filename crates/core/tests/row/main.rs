// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod collections;
mod fixture;
mod scopes;
mod sparse;

use std::sync::Arc;

use hybridrow_core::{
	HybridRowVersion, LayoutResolver, LayoutResolverNamespace, RowBuffer, RowCursor, SchemaId,
	schema::{Namespace, PropertyType, Schema, TypeKind},
};

/// Schema 7: `a` nullable fixed int32, `b` fixed bool, `c` variable utf8.
/// Schema 1 has no columns.
pub fn resolver() -> Arc<dyn LayoutResolver> {
	Arc::new(LayoutResolverNamespace::new(
		Namespace::new("tests")
			.with_schema(
				Schema::new("Fixture", SchemaId::new(7))
					.with_property("a", PropertyType::fixed(TypeKind::Int32).nullable())
					.with_property("b", PropertyType::fixed(TypeKind::Boolean))
					.with_property("c", PropertyType::variable(TypeKind::Utf8)),
			)
			.with_schema(Schema::new("Sparse", SchemaId::new(1)))
			.with_schema(Schema::new("Strict", SchemaId::new(2)).disallow_unschematized().with_property(
				"known",
				PropertyType::primitive(TypeKind::Int32),
			)),
	))
}

pub fn new_row(resolver: Arc<dyn LayoutResolver>, schema_id: i32, capacity: usize) -> (RowBuffer, RowCursor) {
	let layout = resolver.resolve(SchemaId::new(schema_id)).unwrap();
	let mut b = RowBuffer::new(capacity, resolver);
	b.init_layout(HybridRowVersion::V1, &layout).unwrap();
	let root = RowCursor::create(&b).unwrap();
	(b, root)
}
