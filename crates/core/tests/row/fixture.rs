// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use hybridrow_core::{
	Error, HybridRowVersion, LayoutResolverNamespace, RowBuffer, RowCursor, SchemaId,
	catalog::{FixedCodec, LayoutBoolean, LayoutInt32, LayoutUtf8, VariableCodec},
	schema::Namespace,
};

use crate::{new_row, resolver};

const FIXTURE: &str = "810700000007aaaaaaaa03616263";

fn assert_fixture(b: &RowBuffer, root: &RowCursor) {
	let layout = b.layout().unwrap().clone();
	assert_eq!(LayoutInt32.read_fixed(b, root, layout.column("a").unwrap()), Ok(-1431655766));
	assert_eq!(LayoutBoolean.read_fixed(b, root, layout.column("b").unwrap()), Ok(true));
	assert_eq!(LayoutUtf8.read_variable(b, root, layout.column("c").unwrap()).unwrap(), "abc");
}

#[test]
fn test_read_fixture() {
	let mut b = RowBuffer::new(64, resolver());
	b.read_from(&hex::decode(FIXTURE).unwrap(), HybridRowVersion::V1).unwrap();
	assert_eq!(b.header().unwrap().schema_id, SchemaId::new(7));

	let root = RowCursor::create(&b).unwrap();
	assert_fixture(&b, &root);
}

#[test]
fn test_write_fixture() {
	let (mut b, mut root) = new_row(resolver(), 7, 64);
	assert_eq!(hex::encode(b.as_bytes()), "81070000000000000000");

	let layout = b.layout().unwrap().clone();
	LayoutUtf8.write_variable(&mut b, &mut root, layout.column("c").unwrap(), "abc").unwrap();
	LayoutBoolean.write_fixed(&mut b, &root, layout.column("b").unwrap(), &true).unwrap();
	LayoutInt32.write_fixed(&mut b, &root, layout.column("a").unwrap(), &-1431655766).unwrap();

	assert_eq!(hex::encode(b.as_bytes()), FIXTURE);
	let mut out = Vec::new();
	b.write_to(&mut out).unwrap();
	assert_eq!(out, hex::decode(FIXTURE).unwrap());
}

#[test]
fn test_fixture_from_json_schema() {
	let namespace: Namespace = serde_json::from_str(
		r#"{
			"name": "json",
			"schemas": [{
				"name": "Fixture",
				"id": 7,
				"properties": [
					{ "path": "a", "type": { "kind": "primitive", "type": "int32", "storage": "fixed", "nullable": true } },
					{ "path": "b", "type": { "kind": "primitive", "type": "boolean", "storage": "fixed" } },
					{ "path": "c", "type": { "kind": "primitive", "type": "utf8", "storage": "variable" } }
				]
			}]
		}"#,
	)
	.unwrap();

	let mut b = RowBuffer::new(64, Arc::new(LayoutResolverNamespace::new(namespace)));
	b.read_from(&hex::decode(FIXTURE).unwrap(), HybridRowVersion::V1).unwrap();
	let root = RowCursor::create(&b).unwrap();
	assert_fixture(&b, &root);
}

#[test]
fn test_rejects_bad_headers() {
	let mut b = RowBuffer::new(64, resolver());
	assert_eq!(b.read_from(&hex::decode("8107").unwrap(), HybridRowVersion::V1), Err(Error::InvalidRow));
	assert_eq!(
		b.read_from(&hex::decode("0007000000").unwrap(), HybridRowVersion::V1),
		Err(Error::InvalidRow)
	);
	assert_eq!(
		b.read_from(&hex::decode("8107000000").unwrap(), HybridRowVersion::V1),
		Err(Error::InvalidRow)
	);
	assert_eq!(
		b.read_from(&hex::decode("8163000000").unwrap(), HybridRowVersion::V1),
		Err(Error::SchemaMismatch)
	);
}

#[test]
fn test_null_column_reads_not_found() {
	let (mut b, root) = new_row(resolver(), 7, 64);
	let layout = b.layout().unwrap().clone();
	let a = layout.column("a").unwrap();
	assert_eq!(LayoutInt32.read_fixed(&b, &root, a), Err(Error::NotFound));
	LayoutInt32.write_fixed(&mut b, &root, a, &0).unwrap();
	assert_eq!(LayoutInt32.read_fixed(&b, &root, a), Ok(0));
	assert_eq!(LayoutUtf8.read_variable(&b, &root, layout.column("c").unwrap()), Err(Error::NotFound));
}
