// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_core::{
	Error, LayoutCode, RowCursor, SchemaId, TypeArgument, TypeArgumentList,
	buffer::UpdateOptions,
	catalog::{
		FixedCodec, LayoutArray, LayoutInt32, LayoutInt64, LayoutNullable, LayoutObject, LayoutTypedArray,
		LayoutTypedTuple, LayoutUdt, LayoutUtf8, PrimitiveCodec, ScopeCodec, VariableCodec,
	},
};

use crate::{new_row, resolver};

#[test]
fn test_nested_scopes() {
	let (mut b, root) = new_row(resolver(), 1, 256);

	let mut field = root.find(&b, "person").unwrap();
	let person = LayoutObject::MUTABLE.write_scope(&mut b, &mut field, &TypeArgumentList::empty(), UpdateOptions::Upsert).unwrap();
	let mut name = person.find(&b, "name").unwrap();
	LayoutUtf8.write_sparse(&mut b, &mut name, "ada", UpdateOptions::Upsert).unwrap();

	let field = root.find(&b, "person").unwrap();
	let person = LayoutObject::MUTABLE.read_scope(&b, &field).unwrap();
	let mut tags = person.find(&b, "scores").unwrap();
	let int32 = TypeArgumentList::new(vec![TypeArgument::simple(LayoutCode::Int32)]);
	let mut scores = LayoutTypedArray::MUTABLE.write_scope(&mut b, &mut tags, &int32, UpdateOptions::Upsert).unwrap();
	for value in [3, 1, 4] {
		LayoutInt32.write_sparse(&mut b, &mut scores, &value, UpdateOptions::Upsert).unwrap();
		scores.move_next(&b).unwrap();
	}

	let mut after = root.find(&b, "after").unwrap();
	LayoutInt32.write_sparse(&mut b, &mut after, &9, UpdateOptions::Upsert).unwrap();

	let field = root.find(&b, "person").unwrap();
	let person = LayoutObject::MUTABLE.read_scope(&b, &field).unwrap();
	assert_eq!(LayoutUtf8.read_sparse(&b, &person.find(&b, "name").unwrap()).unwrap(), "ada");
	let scores = person.find(&b, "scores").unwrap();
	let mut scores = LayoutTypedArray::MUTABLE.read_scope(&b, &scores).unwrap();
	assert_eq!(scores.count(), 3);
	let mut values = Vec::new();
	while scores.move_next(&b).unwrap() {
		values.push(LayoutInt32.read_sparse(&b, &scores).unwrap());
	}
	assert_eq!(values, vec![3, 1, 4]);
	assert_eq!(LayoutInt32.read_sparse(&b, &root.find(&b, "after").unwrap()), Ok(9));
}

#[test]
fn test_immutable_scope_is_read_only() {
	let (mut b, root) = new_row(resolver(), 1, 256);
	let mut field = root.find(&b, "frozen").unwrap();
	let mut scope = LayoutArray::IMMUTABLE.write_scope(&mut b, &mut field, &TypeArgumentList::empty(), UpdateOptions::Upsert).unwrap();
	LayoutInt32.write_sparse(&mut b, &mut scope, &1, UpdateOptions::Upsert).unwrap();

	let before = b.as_bytes().to_vec();
	let field = root.find(&b, "frozen").unwrap();
	assert_eq!(field.cell_type(), Some(LayoutCode::ImmutableArrayScope));
	let mut scope = LayoutArray::IMMUTABLE.read_scope(&b, &field).unwrap();
	assert!(scope.immutable());
	assert!(scope.move_next(&b).unwrap());
	assert_eq!(LayoutInt32.read_sparse(&b, &scope), Ok(1));
	assert_eq!(LayoutInt32.write_sparse(&mut b, &mut scope, &2, UpdateOptions::Upsert), Err(Error::InsufficientPermissions));
	assert_eq!(LayoutInt32.delete_sparse(&mut b, &mut scope), Err(Error::InsufficientPermissions));
	assert_eq!(b.as_bytes(), &before[..]);

	let mut field = root.find(&b, "frozen").unwrap();
	LayoutArray::IMMUTABLE.delete_scope(&mut b, &mut field).unwrap();
	assert_eq!(hex::encode(b.as_bytes()), "8101000000");
}

#[test]
fn test_skip_lands_on_sibling() {
	let (mut b, root) = new_row(resolver(), 1, 256);
	let int32 = TypeArgumentList::new(vec![TypeArgument::simple(LayoutCode::Int32)]);
	let mut field = root.find(&b, "list").unwrap();
	let mut list = LayoutTypedArray::MUTABLE.write_scope(&mut b, &mut field, &int32, UpdateOptions::Upsert).unwrap();
	for value in [7, 8, 9] {
		LayoutInt32.write_sparse(&mut b, &mut list, &value, UpdateOptions::Upsert).unwrap();
		list.move_next(&b).unwrap();
	}
	let mut field = root.find(&b, "object").unwrap();
	let object = LayoutObject::MUTABLE.write_scope(&mut b, &mut field, &TypeArgumentList::empty(), UpdateOptions::Upsert).unwrap();
	let mut inner = object.find(&b, "inner").unwrap();
	LayoutUtf8.write_sparse(&mut b, &mut inner, "nested", UpdateOptions::Upsert).unwrap();
	let mut sibling = root.find(&b, "sibling").unwrap();
	LayoutInt32.write_sparse(&mut b, &mut sibling, &5, UpdateOptions::Upsert).unwrap();

	let mut it = RowCursor::create(&b).unwrap();
	assert!(it.move_next(&b).unwrap());
	assert_eq!(it.path(&b).unwrap(), "list");
	let list = LayoutTypedArray::MUTABLE.read_scope(&b, &it).unwrap();
	it.skip(&b, &list).unwrap();

	assert!(it.move_next(&b).unwrap());
	assert_eq!(it.path(&b).unwrap(), "object");
	let object = LayoutObject::MUTABLE.read_scope(&b, &it).unwrap();
	it.skip(&b, &object).unwrap();

	assert!(it.move_next(&b).unwrap());
	assert_eq!(it.path(&b).unwrap(), "sibling");
	assert_eq!(LayoutInt32.read_sparse(&b, &it), Ok(5));
	assert!(!it.move_next(&b).unwrap());

	let sibling = it.find(&b, "sibling").unwrap();
	assert!(sibling.exists());
	assert_eq!(LayoutInt32.read_sparse(&b, &sibling), Ok(5));
}

#[test]
fn test_tuple_of_null_value_and_udt() {
	let (mut b, root) = new_row(resolver(), 1, 512);
	let nullable_utf8 = TypeArgument::new(
		LayoutCode::NullableScope,
		TypeArgumentList::new(vec![TypeArgument::simple(LayoutCode::Utf8)]),
	);
	let members = TypeArgumentList::new(vec![
		nullable_utf8.clone(),
		nullable_utf8.clone(),
		TypeArgument::simple(LayoutCode::Int64),
		TypeArgument::udt(false, SchemaId::new(7)),
	]);

	let mut field = root.find(&b, "mixed").unwrap();
	let mut tuple = LayoutTypedTuple::MUTABLE.write_scope(&mut b, &mut field, &members, UpdateOptions::Upsert).unwrap();
	LayoutNullable::MUTABLE.write_scope_value(&mut b, &mut tuple, &nullable_utf8.args, false, UpdateOptions::Upsert).unwrap();
	tuple.move_next(&b).unwrap();
	let mut present = LayoutNullable::MUTABLE
		.write_scope_value(&mut b, &mut tuple, &nullable_utf8.args, true, UpdateOptions::Upsert)
		.unwrap();
	assert!(present.move_next(&b).unwrap());
	LayoutUtf8.write_sparse(&mut b, &mut present, "abc", UpdateOptions::Upsert).unwrap();
	tuple.skip(&b, &present).unwrap();
	tuple.move_next(&b).unwrap();
	LayoutInt64.write_sparse(&mut b, &mut tuple, &-1431655766, UpdateOptions::Upsert).unwrap();
	tuple.move_next(&b).unwrap();
	let mut udt = LayoutUdt::MUTABLE.write_udt(&mut b, &mut tuple, SchemaId::new(7), UpdateOptions::Upsert).unwrap();
	let layout = udt.layout().clone();
	LayoutInt32.write_fixed(&mut b, &udt, layout.column("a").unwrap(), &42).unwrap();
	LayoutUtf8.write_variable(&mut b, &mut udt, layout.column("c").unwrap(), "xyz").unwrap();

	let mut sibling = root.find(&b, "sibling").unwrap();
	LayoutInt32.write_sparse(&mut b, &mut sibling, &5, UpdateOptions::Upsert).unwrap();

	let field = root.find(&b, "mixed").unwrap();
	let mut tuple = LayoutTypedTuple::MUTABLE.read_scope(&b, &field).unwrap();
	assert_eq!(tuple.count(), 4);

	assert!(tuple.move_next(&b).unwrap());
	assert_eq!(LayoutNullable::MUTABLE.has_value(&b, &tuple), Ok(false));
	let mut absent = LayoutNullable::MUTABLE.read_scope(&b, &tuple).unwrap();
	assert!(!absent.move_next(&b).unwrap());

	assert!(tuple.move_next(&b).unwrap());
	assert_eq!(LayoutNullable::MUTABLE.has_value(&b, &tuple), Ok(true));
	let mut present = LayoutNullable::MUTABLE.read_scope(&b, &tuple).unwrap();
	assert!(present.move_next(&b).unwrap());
	assert_eq!(LayoutUtf8.read_sparse(&b, &present).unwrap(), "abc");

	assert!(tuple.move_next(&b).unwrap());
	assert_eq!(LayoutInt64.read_sparse(&b, &tuple), Ok(-1431655766));

	assert!(tuple.move_next(&b).unwrap());
	let udt = LayoutUdt::MUTABLE.read_scope(&b, &tuple).unwrap();
	assert_eq!(LayoutInt32.read_fixed(&b, &udt, layout.column("a").unwrap()), Ok(42));
	assert_eq!(LayoutUtf8.read_variable(&b, &udt, layout.column("c").unwrap()).unwrap(), "xyz");
	assert!(!tuple.move_next(&b).unwrap());

	assert_eq!(LayoutInt32.read_sparse(&b, &root.find(&b, "sibling").unwrap()), Ok(5));
}
