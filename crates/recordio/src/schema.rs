// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use hybridrow_core::{
	LayoutResolver, LayoutResolverNamespace, SchemaId,
	schema::{Namespace, PropertyType, Schema, TypeKind},
};
use once_cell::sync::Lazy;

static RESOLVER: Lazy<Arc<LayoutResolverNamespace>> =
	Lazy::new(|| Arc::new(LayoutResolverNamespace::new(SystemSchema::namespace())));

/// Reserved schemas of the stream framing.
pub struct SystemSchema;

impl SystemSchema {
	/// Leading row of a stream: total row length, then optional comment and
	/// schema document.
	pub const SEGMENT: SchemaId = SchemaId::new(-2);
	/// Header row in front of each record body.
	pub const RECORD: SchemaId = SchemaId::new(-3);

	pub fn namespace() -> Namespace {
		Namespace::new("system")
			.with_schema(
				Schema::new("Segment", Self::SEGMENT)
					.with_property("length", PropertyType::fixed(TypeKind::Int32))
					.with_property("comment", PropertyType::primitive(TypeKind::Utf8))
					.with_property("sdl", PropertyType::primitive(TypeKind::Utf8)),
			)
			.with_schema(
				Schema::new("Record", Self::RECORD)
					.with_property("length", PropertyType::fixed(TypeKind::Int32))
					.with_property("crc32", PropertyType::fixed(TypeKind::UInt32)),
			)
	}

	/// Shared resolver for the system schemas. Also usable as the parent of a
	/// user namespace.
	pub fn resolver() -> Arc<dyn LayoutResolver> {
		RESOLVER.clone()
	}
}
