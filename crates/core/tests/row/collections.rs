// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_core::{
	Error, LayoutCode, RowBuffer, RowCursor, SchemaId, TypeArgument, TypeArgumentList,
	buffer::UpdateOptions,
	catalog::{
		FixedCodec, LayoutArray, LayoutInt32, LayoutNullable, LayoutTypedArray, LayoutTypedMap, LayoutTypedSet,
		LayoutTypedTuple, LayoutUdt, LayoutUtf8, PrimitiveCodec, ScopeCodec, UniqueScopeCodec, VariableCodec,
	},
};

use crate::{new_row, resolver};

fn args(list: Vec<TypeArgument>) -> TypeArgumentList {
	TypeArgumentList::new(list)
}

fn simple(code: LayoutCode) -> TypeArgument {
	TypeArgument::simple(code)
}

fn emails(b: &RowBuffer, root: &RowCursor) -> Vec<String> {
	let field = root.find(b, "emails").unwrap();
	let mut scope = LayoutTypedArray::MUTABLE.read_scope(b, &field).unwrap();
	let mut values = Vec::new();
	while scope.move_next(b).unwrap() {
		values.push(LayoutUtf8.read_sparse(b, &scope).unwrap());
	}
	values
}

#[test]
fn test_list_surgery() {
	let (mut b, root) = new_row(resolver(), 1, 512);
	let mut field = root.find(&b, "emails").unwrap();
	let mut scope = LayoutTypedArray::MUTABLE
		.write_scope(&mut b, &mut field, &args(vec![simple(LayoutCode::Utf8)]), UpdateOptions::Upsert)
		.unwrap();
	LayoutUtf8.write_sparse(&mut b, &mut scope, "president@whitehouse.gov", UpdateOptions::Upsert).unwrap();

	let field = root.find(&b, "emails").unwrap();
	let mut scope = LayoutTypedArray::MUTABLE.read_scope(&b, &field).unwrap();
	while scope.move_next(&b).unwrap() {}
	LayoutUtf8.write_sparse(&mut b, &mut scope, "vice_president@whitehouse.gov", UpdateOptions::Upsert).unwrap();
	assert_eq!(scope.index(), 1);

	let field = root.find(&b, "emails").unwrap();
	let mut scope = LayoutTypedArray::MUTABLE.read_scope(&b, &field).unwrap();
	assert!(scope.move_to(&b, 0).unwrap());
	LayoutUtf8.write_sparse(&mut b, &mut scope, "ex_president@whitehouse.gov", UpdateOptions::InsertAt).unwrap();
	assert_eq!(scope.index(), 0);

	let field = root.find(&b, "emails").unwrap();
	let mut scope = LayoutTypedArray::MUTABLE.read_scope(&b, &field).unwrap();
	assert!(scope.move_to(&b, 1).unwrap());
	LayoutUtf8.write_sparse(&mut b, &mut scope, "future_president@whitehouse.gov", UpdateOptions::InsertAt).unwrap();

	assert_eq!(
		emails(&b, &root),
		vec![
			"ex_president@whitehouse.gov",
			"future_president@whitehouse.gov",
			"president@whitehouse.gov",
			"vice_president@whitehouse.gov",
		]
	);
	let field = root.find(&b, "emails").unwrap();
	assert_eq!(LayoutTypedArray::MUTABLE.read_scope(&b, &field).unwrap().count(), 4);
}

#[test]
fn test_array_of_arrays() {
	let (mut b, root) = new_row(resolver(), 1, 512);
	let inner = TypeArgument::new(LayoutCode::TypedArrayScope, args(vec![simple(LayoutCode::Int32)]));
	let mut field = root.find(&b, "matrix").unwrap();
	let mut rows = LayoutTypedArray::MUTABLE
		.write_scope(&mut b, &mut field, &args(vec![inner.clone()]), UpdateOptions::Upsert)
		.unwrap();
	for row in [[1, 2], [3, 4]] {
		let mut cells = LayoutTypedArray::MUTABLE.write_scope(&mut b, &mut rows, &inner.args, UpdateOptions::Upsert).unwrap();
		for value in row {
			LayoutInt32.write_sparse(&mut b, &mut cells, &value, UpdateOptions::Upsert).unwrap();
			cells.move_next(&b).unwrap();
		}
		rows.skip(&b, &cells).unwrap();
		rows.move_next(&b).unwrap();
	}

	let field = root.find(&b, "matrix").unwrap();
	let mut rows = LayoutTypedArray::MUTABLE.read_scope(&b, &field).unwrap();
	let mut matrix = Vec::new();
	while rows.move_next(&b).unwrap() {
		let mut cells = LayoutTypedArray::MUTABLE.read_scope(&b, &rows).unwrap();
		let mut row = Vec::new();
		while cells.move_next(&b).unwrap() {
			row.push(LayoutInt32.read_sparse(&b, &cells).unwrap());
		}
		matrix.push(row);
	}
	assert_eq!(matrix, vec![vec![1, 2], vec![3, 4]]);

	let mut field = root.find(&b, "matrix").unwrap();
	assert_eq!(LayoutArray::MUTABLE.delete_scope(&mut b, &mut field), Err(Error::TypeMismatch));
	LayoutTypedArray::MUTABLE.delete_scope(&mut b, &mut field).unwrap();
	assert_eq!(hex::encode(b.as_bytes()), "8101000000");
}

#[test]
fn test_set_of_sets() {
	let (mut b, root) = new_row(resolver(), 1, 512);
	let inner = TypeArgument::new(LayoutCode::TypedSetScope, args(vec![simple(LayoutCode::Int32)]));
	let mut field = root.find(&b, "groups").unwrap();
	LayoutTypedSet::MUTABLE
		.write_scope(&mut b, &mut field, &args(vec![inner.clone()]), UpdateOptions::Upsert)
		.unwrap();

	let add = |b: &mut RowBuffer, values: &[i32], options: UpdateOptions| -> Result<(), Error> {
		let mut temp = root.find(b, "temp").unwrap();
		LayoutTypedSet::MUTABLE.write_scope_with(b, &mut temp, &inner.args, UpdateOptions::Upsert, |b, scope| {
			for value in values {
				LayoutInt32.write_sparse(b, scope, value, UpdateOptions::Upsert)?;
				scope.move_next(b)?;
			}
			Ok(())
		})?;
		let field = root.find(b, "groups").unwrap();
		let mut groups = LayoutTypedSet::MUTABLE.read_scope(b, &field).unwrap();
		let mut temp = root.find(b, "temp").unwrap();
		let result = LayoutTypedSet::MUTABLE.move_field(b, &mut groups, &mut temp, options);
		if result.is_err() {
			let mut temp = root.find(b, "temp").unwrap();
			LayoutTypedSet::MUTABLE.delete_scope(b, &mut temp).unwrap();
		}
		result
	};

	add(&mut b, &[3, 1], UpdateOptions::Insert).unwrap();
	add(&mut b, &[2], UpdateOptions::Insert).unwrap();
	assert_eq!(add(&mut b, &[1, 3], UpdateOptions::Insert), Err(Error::Exists));

	let field = root.find(&b, "groups").unwrap();
	let mut groups = LayoutTypedSet::MUTABLE.read_scope(&b, &field).unwrap();
	let mut collected = Vec::new();
	while groups.move_next(&b).unwrap() {
		let mut set = LayoutTypedSet::MUTABLE.read_scope(&b, &groups).unwrap();
		let mut values = Vec::new();
		while set.move_next(&b).unwrap() {
			values.push(LayoutInt32.read_sparse(&b, &set).unwrap());
		}
		collected.push(values);
	}
	collected.sort();
	assert_eq!(collected, vec![vec![1, 3], vec![2]]);
	assert!(!root.find(&b, "temp").unwrap().exists());
}

#[test]
fn test_set_of_arrays() {
	let (mut b, root) = new_row(resolver(), 1, 512);
	let inner = TypeArgument::new(LayoutCode::TypedArrayScope, args(vec![simple(LayoutCode::Int32)]));
	let mut field = root.find(&b, "paths").unwrap();
	LayoutTypedSet::MUTABLE
		.write_scope_with(&mut b, &mut field, &args(vec![inner.clone()]), UpdateOptions::Upsert, |b, scope| {
			for values in [&[3, 4][..], &[1][..], &[1, 2][..]] {
				let mut array = LayoutTypedArray::MUTABLE.write_scope(b, scope, &inner.args, UpdateOptions::Upsert)?;
				for value in values {
					LayoutInt32.write_sparse(b, &mut array, value, UpdateOptions::Upsert)?;
					array.move_next(b)?;
				}
				scope.skip(b, &array)?;
				scope.move_next(b)?;
			}
			Ok(())
		})
		.unwrap();

	let mut sibling = root.find(&b, "sibling").unwrap();
	LayoutInt32.write_sparse(&mut b, &mut sibling, &5, UpdateOptions::Upsert).unwrap();

	let field = root.find(&b, "paths").unwrap();
	let mut set = LayoutTypedSet::MUTABLE.read_scope(&b, &field).unwrap();
	assert_eq!(set.count(), 3);
	let mut collected = Vec::new();
	while set.move_next(&b).unwrap() {
		let mut array = LayoutTypedArray::MUTABLE.read_scope(&b, &set).unwrap();
		let mut values = Vec::new();
		while array.move_next(&b).unwrap() {
			values.push(LayoutInt32.read_sparse(&b, &array).unwrap());
		}
		collected.push(values);
	}
	assert_eq!(collected, vec![vec![1], vec![1, 2], vec![3, 4]]);
	assert_eq!(LayoutInt32.read_sparse(&b, &root.find(&b, "sibling").unwrap()), Ok(5));
}

#[test]
fn test_array_of_nullables() {
	let (mut b, root) = new_row(resolver(), 1, 512);
	let nullable = TypeArgument::new(LayoutCode::NullableScope, args(vec![simple(LayoutCode::Int32)]));
	let mut field = root.find(&b, "readings").unwrap();
	let mut array = LayoutTypedArray::MUTABLE
		.write_scope(&mut b, &mut field, &args(vec![nullable.clone()]), UpdateOptions::Upsert)
		.unwrap();
	for reading in [Some(1), None, Some(3)] {
		let mut item = LayoutNullable::MUTABLE
			.write_scope_value(&mut b, &mut array, &nullable.args, reading.is_some(), UpdateOptions::Upsert)
			.unwrap();
		if let Some(value) = reading {
			assert!(item.move_next(&b).unwrap());
			LayoutInt32.write_sparse(&mut b, &mut item, &value, UpdateOptions::Upsert).unwrap();
		}
		array.skip(&b, &item).unwrap();
		array.move_next(&b).unwrap();
	}
	let mut sibling = root.find(&b, "sibling").unwrap();
	LayoutInt32.write_sparse(&mut b, &mut sibling, &5, UpdateOptions::Upsert).unwrap();

	let field = root.find(&b, "readings").unwrap();
	let mut array = LayoutTypedArray::MUTABLE.read_scope(&b, &field).unwrap();
	assert_eq!(array.count(), 3);
	let mut readings = Vec::new();
	while array.move_next(&b).unwrap() {
		let mut item = LayoutNullable::MUTABLE.read_scope(&b, &array).unwrap();
		if LayoutNullable::MUTABLE.has_value(&b, &array).unwrap() {
			assert!(item.move_next(&b).unwrap());
			readings.push(Some(LayoutInt32.read_sparse(&b, &item).unwrap()));
		} else {
			assert!(!item.move_next(&b).unwrap());
			readings.push(None);
		}
	}
	assert_eq!(readings, vec![Some(1), None, Some(3)]);
	assert_eq!(LayoutInt32.read_sparse(&b, &root.find(&b, "sibling").unwrap()), Ok(5));
}

#[test]
fn test_map_of_maps() {
	let (mut b, root) = new_row(resolver(), 1, 1024);
	let inner_args = args(vec![simple(LayoutCode::Utf8), simple(LayoutCode::Int32)]);
	let inner = TypeArgument::new(LayoutCode::TypedMapScope, inner_args.clone());
	let outer_args = args(vec![simple(LayoutCode::Utf8), inner]);

	let mut field = root.find(&b, "scores").unwrap();
	LayoutTypedMap::MUTABLE.write_scope(&mut b, &mut field, &outer_args, UpdateOptions::Upsert).unwrap();

	for (player, games) in [("bob", vec![("chess", 3)]), ("alice", vec![("go", 7), ("chess", 5)])] {
		let mut temp = root.find(&b, "entry").unwrap();
		let mut entry = LayoutTypedTuple::MUTABLE.write_scope(&mut b, &mut temp, &outer_args, UpdateOptions::Upsert).unwrap();
		LayoutUtf8.write_sparse(&mut b, &mut entry, player, UpdateOptions::Upsert).unwrap();

		for (game, score) in games {
			let mut pair = root.find(&b, "pair").unwrap();
			let mut scope = LayoutTypedTuple::MUTABLE.write_scope(&mut b, &mut pair, &inner_args, UpdateOptions::Upsert).unwrap();
			LayoutUtf8.write_sparse(&mut b, &mut scope, game, UpdateOptions::Upsert).unwrap();
			scope.move_next(&b).unwrap();
			LayoutInt32.write_sparse(&mut b, &mut scope, &score, UpdateOptions::Upsert).unwrap();

			let temp = root.find(&b, "entry").unwrap();
			let mut entry = LayoutTypedTuple::MUTABLE.read_scope(&b, &temp).unwrap();
			entry.move_next(&b).unwrap();
			entry.move_next(&b).unwrap();
			let mut games = LayoutTypedMap::MUTABLE.read_scope(&b, &entry).unwrap();
			let mut pair = root.find(&b, "pair").unwrap();
			LayoutTypedMap::MUTABLE.move_field(&mut b, &mut games, &mut pair, UpdateOptions::Insert).unwrap();
		}

		let field = root.find(&b, "scores").unwrap();
		let mut scores = LayoutTypedMap::MUTABLE.read_scope(&b, &field).unwrap();
		let mut temp = root.find(&b, "entry").unwrap();
		LayoutTypedMap::MUTABLE.move_field(&mut b, &mut scores, &mut temp, UpdateOptions::Insert).unwrap();
	}

	let field = root.find(&b, "scores").unwrap();
	let mut scores = LayoutTypedMap::MUTABLE.read_scope(&b, &field).unwrap();
	let mut collected = Vec::new();
	while scores.move_next(&b).unwrap() {
		let mut entry = LayoutTypedTuple::MUTABLE.read_scope(&b, &scores).unwrap();
		assert!(entry.move_next(&b).unwrap());
		let player = LayoutUtf8.read_sparse(&b, &entry).unwrap();
		assert!(entry.move_next(&b).unwrap());
		let mut games = LayoutTypedMap::MUTABLE.read_scope(&b, &entry).unwrap();
		while games.move_next(&b).unwrap() {
			let mut pair = LayoutTypedTuple::MUTABLE.read_scope(&b, &games).unwrap();
			pair.move_next(&b).unwrap();
			let game = LayoutUtf8.read_sparse(&b, &pair).unwrap();
			pair.move_next(&b).unwrap();
			collected.push((player.clone(), game, LayoutInt32.read_sparse(&b, &pair).unwrap()));
		}
	}
	assert_eq!(
		collected,
		vec![
			("alice".to_string(), "chess".to_string(), 5),
			("alice".to_string(), "go".to_string(), 7),
			("bob".to_string(), "chess".to_string(), 3),
		]
	);
}

#[test]
fn test_map_of_udts() {
	let (mut b, root) = new_row(resolver(), 1, 1024);
	let udt = TypeArgument::udt(false, SchemaId::new(7));
	let entry_args = args(vec![simple(LayoutCode::Utf8), udt]);

	let mut field = root.find(&b, "fixtures").unwrap();
	LayoutTypedMap::MUTABLE.write_scope(&mut b, &mut field, &entry_args, UpdateOptions::Upsert).unwrap();

	for (key, a, c) in [("second", 2, "two"), ("first", 1, "one")] {
		let mut temp = root.find(&b, "temp").unwrap();
		let mut entry = LayoutTypedTuple::MUTABLE.write_scope(&mut b, &mut temp, &entry_args, UpdateOptions::Upsert).unwrap();
		LayoutUtf8.write_sparse(&mut b, &mut entry, key, UpdateOptions::Upsert).unwrap();
		entry.move_next(&b).unwrap();
		let mut value = LayoutUdt::MUTABLE.write_udt(&mut b, &mut entry, SchemaId::new(7), UpdateOptions::Upsert).unwrap();
		let layout = value.layout().clone();
		LayoutInt32.write_fixed(&mut b, &value, layout.column("a").unwrap(), &a).unwrap();
		LayoutUtf8.write_variable(&mut b, &mut value, layout.column("c").unwrap(), c).unwrap();

		let field = root.find(&b, "fixtures").unwrap();
		let mut map = LayoutTypedMap::MUTABLE.read_scope(&b, &field).unwrap();
		let mut temp = root.find(&b, "temp").unwrap();
		LayoutTypedMap::MUTABLE.move_field(&mut b, &mut map, &mut temp, UpdateOptions::Upsert).unwrap();
	}

	let field = root.find(&b, "fixtures").unwrap();
	let mut map = LayoutTypedMap::MUTABLE.read_scope(&b, &field).unwrap();
	let mut collected = Vec::new();
	while map.move_next(&b).unwrap() {
		let mut entry = LayoutTypedTuple::MUTABLE.read_scope(&b, &map).unwrap();
		entry.move_next(&b).unwrap();
		let key = LayoutUtf8.read_sparse(&b, &entry).unwrap();
		entry.move_next(&b).unwrap();
		let value = LayoutUdt::MUTABLE.read_scope(&b, &entry).unwrap();
		let layout = value.layout().clone();
		collected.push((
			key,
			LayoutInt32.read_fixed(&b, &value, layout.column("a").unwrap()).unwrap(),
			LayoutUtf8.read_variable(&b, &value, layout.column("c").unwrap()).unwrap(),
		));
	}
	assert_eq!(
		collected,
		vec![("first".to_string(), 1, "one".to_string()), ("second".to_string(), 2, "two".to_string())]
	);
}
