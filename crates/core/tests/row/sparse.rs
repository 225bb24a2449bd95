// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{borrow::Borrow, fmt::Debug};

use hybridrow_core::{
	DateTime, Decimal, DefaultResizer, Error, Float128, Guid, HybridRowVersion, LayoutCode, MongoDbObjectId,
	RowBuffer, RowCursor, SchemaId, TypeArgument, TypeArgumentList, UnixDateTime,
	buffer::UpdateOptions,
	catalog::{
		LayoutBinary, LayoutBoolean, LayoutDateTime, LayoutDecimal, LayoutFloat32, LayoutFloat64, LayoutFloat128,
		LayoutGuid, LayoutInt8, LayoutInt16, LayoutInt32, LayoutInt64, LayoutMongoDbObjectId, LayoutNull,
		LayoutTypedArray, LayoutUInt8, LayoutUInt16, LayoutUInt32, LayoutUInt64, LayoutUnixDateTime, LayoutUtf8,
		LayoutVarInt, LayoutVarUInt, LayoutType, PrimitiveCodec, ScopeCodec,
	},
};

use crate::{new_row, resolver};

fn populate<C>(b: &mut RowBuffer, root: &RowCursor, codec: C, value: &C::Value)
where
	C: PrimitiveCodec,
	C::Value: PartialEq + Debug,
	<C::Value as ToOwned>::Owned: Borrow<C::Value>,
{
	let path = codec.name();
	let mut field = root.find(b, &path).unwrap();
	codec.write_sparse(b, &mut field, value, UpdateOptions::Insert).unwrap();
	let stored = codec.read_sparse(b, &root.find(b, &path).unwrap()).unwrap();
	let stored: &C::Value = stored.borrow();
	assert_eq!(stored, value, "{path}");
}

fn clear<C: PrimitiveCodec>(b: &mut RowBuffer, root: &RowCursor, codec: C, _value: &C::Value) {
	let path = codec.name();
	let mut field = root.find(b, &path).unwrap();
	codec.delete_sparse(b, &mut field).unwrap();
	let field = root.find(b, &path).unwrap();
	assert!(!field.exists(), "{path}");
	assert!(matches!(codec.read_sparse(b, &field), Err(Error::NotFound)), "{path}");
}

macro_rules! every_primitive {
	($visit:ident, $b:expr, $root:expr) => {
		$visit($b, $root, LayoutNull, &());
		$visit($b, $root, LayoutBoolean, &true);
		$visit($b, $root, LayoutInt8, &-86);
		$visit($b, $root, LayoutInt16, &-21846);
		$visit($b, $root, LayoutInt32, &-1431655766);
		$visit($b, $root, LayoutInt64, &-6148914691236517206);
		$visit($b, $root, LayoutUInt8, &0xaa);
		$visit($b, $root, LayoutUInt16, &0xaaaa);
		$visit($b, $root, LayoutUInt32, &0xaaaa_aaaa);
		$visit($b, $root, LayoutUInt64, &0xaaaa_aaaa_aaaa_aaaa);
		$visit($b, $root, LayoutFloat32, &f32::from_bits(0xaaaa_aaaa));
		$visit($b, $root, LayoutFloat64, &f64::from_bits(0xaaaa_aaaa_aaaa_aaaa));
		$visit($b, $root, LayoutFloat128, &Float128::new(-6148914691236517206, -6148914691236517206));
		$visit($b, $root, LayoutDecimal, &Decimal::new(-1431655766, 2).unwrap());
		$visit($b, $root, LayoutDateTime, &DateTime::from_ticks(0x0aaa_aaaa_aaaa_aaaa));
		$visit($b, $root, LayoutUnixDateTime, &UnixDateTime::from_milliseconds(-1431655766));
		$visit($b, $root, LayoutGuid, &Guid::from_bytes([0xaa; 16]));
		$visit($b, $root, LayoutMongoDbObjectId, &MongoDbObjectId([0xaa; 12]));
		$visit($b, $root, LayoutUtf8, "abc");
		$visit($b, $root, LayoutBinary, &[0xaa, 0xaa, 0xaa][..]);
		$visit($b, $root, LayoutVarInt, &-6148914691236517206);
		$visit($b, $root, LayoutVarUInt, &0xaaaa_aaaa_aaaa_aaaa);
	};
}

#[test]
fn test_delete_restores_empty_row() {
	let (mut b, root) = new_row(resolver(), 1, 1024);
	let empty = b.as_bytes().to_vec();
	assert_eq!(hex::encode(&empty), "8101000000");

	every_primitive!(populate, &mut b, &root);

	let int8 = TypeArgumentList::new(vec![TypeArgument::simple(LayoutCode::Int8)]);
	let mut field = root.find(&b, "array_int8").unwrap();
	let mut scope = LayoutTypedArray::MUTABLE.write_scope(&mut b, &mut field, &int8, UpdateOptions::Insert).unwrap();
	for value in [-86i8; 3] {
		LayoutInt8.write_sparse(&mut b, &mut scope, &value, UpdateOptions::Upsert).unwrap();
		scope.move_next(&b).unwrap();
	}
	let mut it = RowCursor::create(&b).unwrap();
	let mut count = 0;
	while it.move_next(&b).unwrap() {
		count += 1;
	}
	assert_eq!(count, 23);

	every_primitive!(clear, &mut b, &root);
	assert_ne!(b.as_bytes(), &empty[..]);

	let mut field = root.find(&b, "array_int8").unwrap();
	LayoutTypedArray::MUTABLE.delete_scope(&mut b, &mut field).unwrap();
	assert!(matches!(
		LayoutTypedArray::MUTABLE.read_scope(&b, &root.find(&b, "array_int8").unwrap()),
		Err(Error::NotFound)
	));
	assert_eq!(b.as_bytes(), &empty[..]);
}

#[test]
fn test_missing_null_and_value() {
	let (mut b, root) = new_row(resolver(), 1, 64);
	let mut field = root.find(&b, "n").unwrap();
	assert!(!field.exists());
	assert_eq!(LayoutNull.read_sparse(&b, &field), Err(Error::NotFound));
	assert_eq!(LayoutInt32.delete_sparse(&mut b, &mut field), Err(Error::NotFound));

	LayoutNull.write_sparse(&mut b, &mut field, &(), UpdateOptions::Upsert).unwrap();
	let field = root.find(&b, "n").unwrap();
	assert!(field.exists());
	assert_eq!(LayoutNull.read_sparse(&b, &field), Ok(()));
	assert_eq!(LayoutInt32.read_sparse(&b, &field), Err(Error::TypeMismatch));
}

#[test]
fn test_survives_reload() {
	let (mut b, root) = new_row(resolver(), 1, 64);
	let mut field = root.find(&b, "greeting").unwrap();
	LayoutUtf8.write_sparse(&mut b, &mut field, "hello", UpdateOptions::Upsert).unwrap();
	let mut field = root.find(&b, "answer").unwrap();
	LayoutInt64.write_sparse(&mut b, &mut field, &42, UpdateOptions::Upsert).unwrap();

	let mut reloaded = RowBuffer::new(64, resolver());
	reloaded.read_from(b.as_bytes(), HybridRowVersion::V1).unwrap();
	assert_eq!(reloaded.header().unwrap().schema_id, SchemaId::new(1));

	let mut it = RowCursor::create(&reloaded).unwrap();
	let mut fields = Vec::new();
	while it.move_next(&reloaded).unwrap() {
		fields.push((it.path(&reloaded).unwrap(), it.cell_type().unwrap()));
	}
	assert_eq!(
		fields,
		vec![
			("greeting".to_string(), LayoutCode::Utf8),
			("answer".to_string(), LayoutCode::Int64),
		]
	);
}

#[test]
fn test_unschematized_paths_not_found() {
	let (mut b, root) = new_row(resolver(), 2, 64);
	let mut field = root.find(&b, "known").unwrap();
	LayoutInt32.write_sparse(&mut b, &mut field, &1, UpdateOptions::Upsert).unwrap();

	assert!(matches!(root.find(&b, "unknown"), Err(Error::NotFound)));
	assert_eq!(LayoutInt32.read_sparse(&b, &root.find(&b, "known").unwrap()), Ok(1));
}

#[test]
fn test_capacity() {
	let (mut b, root) = new_row(resolver(), 1, 8);
	let mut field = root.find(&b, "x").unwrap();
	assert_eq!(LayoutInt64.write_sparse(&mut b, &mut field, &1, UpdateOptions::Upsert), Err(Error::Exceeded));

	let layout = b.layout().unwrap().clone();
	let mut b = RowBuffer::with_resizer(8, resolver(), Box::new(DefaultResizer::default()));
	b.init_layout(HybridRowVersion::V1, &layout).unwrap();
	let root = RowCursor::create(&b).unwrap();
	let mut field = root.find(&b, "x").unwrap();
	LayoutInt64.write_sparse(&mut b, &mut field, &1, UpdateOptions::Upsert).unwrap();
	assert!(b.capacity() >= b.len());
	assert_eq!(LayoutInt64.read_sparse(&b, &root.find(&b, "x").unwrap()), Ok(1));
}
