// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Schema model the layout compiler works from.
//!
//! A [`Namespace`] groups [`Schema`]s that may reference each other as
//! user-defined types. The structs are plain serde types; loading them from a
//! document is left to the caller.

mod kind;

pub use kind::{StorageKind, TypeKind};
use hybridrow_type::SchemaId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
	pub name: String,
	#[serde(default)]
	pub schemas: Vec<Schema>,
}

impl Namespace {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			schemas: Vec::new(),
		}
	}

	pub fn with_schema(mut self, schema: Schema) -> Self {
		self.schemas.push(schema);
		self
	}

	pub fn schema(&self, id: SchemaId) -> Option<&Schema> {
		self.schemas.iter().find(|s| s.id == id)
	}

	pub fn schema_by_name(&self, name: &str) -> Option<&Schema> {
		self.schemas.iter().find(|s| s.name == name)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOptions {
	/// Reject sparse writes whose path is not declared by the schema.
	#[serde(default)]
	pub disallow_unschematized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
	pub name: String,
	pub id: SchemaId,
	#[serde(default)]
	pub options: SchemaOptions,
	#[serde(default)]
	pub properties: Vec<Property>,
}

impl Schema {
	pub fn new(name: impl Into<String>, id: SchemaId) -> Self {
		Self {
			name: name.into(),
			id,
			options: SchemaOptions::default(),
			properties: Vec::new(),
		}
	}

	pub fn with_property(mut self, path: impl Into<String>, property_type: PropertyType) -> Self {
		self.properties.push(Property::new(path, property_type));
		self
	}

	pub fn disallow_unschematized(mut self) -> Self {
		self.options.disallow_unschematized = true;
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
	pub path: String,
	#[serde(rename = "type")]
	pub property_type: PropertyType,
}

impl Property {
	pub fn new(path: impl Into<String>, property_type: PropertyType) -> Self {
		Self {
			path: path.into(),
			property_type,
		}
	}
}

/// Declared type of a property or of a collection item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyType {
	/// Fixed columns get a presence bit; collection items are wrapped in a
	/// nullable scope.
	#[serde(default)]
	pub nullable: bool,
	/// Scopes are written with their immutable code.
	#[serde(default)]
	pub immutable: bool,
	#[serde(flatten)]
	pub kind: PropertyKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyKind {
	Primitive {
		#[serde(rename = "type")]
		type_kind: TypeKind,
		#[serde(default)]
		storage: StorageKind,
		/// Exact length for fixed columns, maximum length for variable ones;
		/// zero means unbounded.
		#[serde(default)]
		length: u32,
	},
	Array {
		items: Box<PropertyType>,
	},
	Object {
		#[serde(default)]
		properties: Vec<Property>,
	},
	Set {
		items: Box<PropertyType>,
	},
	Map {
		keys: Box<PropertyType>,
		values: Box<PropertyType>,
	},
	Tuple {
		items: Vec<PropertyType>,
	},
	Tagged {
		items: Vec<PropertyType>,
	},
	Udt {
		name: String,
		#[serde(default)]
		id: Option<SchemaId>,
	},
}

impl PropertyType {
	fn of(kind: PropertyKind) -> Self {
		Self {
			nullable: false,
			immutable: false,
			kind,
		}
	}

	pub fn primitive(type_kind: TypeKind) -> Self {
		Self::of(PropertyKind::Primitive {
			type_kind,
			storage: StorageKind::Sparse,
			length: 0,
		})
	}

	pub fn fixed(type_kind: TypeKind) -> Self {
		Self::of(PropertyKind::Primitive {
			type_kind,
			storage: StorageKind::Fixed,
			length: 0,
		})
	}

	pub fn variable(type_kind: TypeKind) -> Self {
		Self::of(PropertyKind::Primitive {
			type_kind,
			storage: StorageKind::Variable,
			length: 0,
		})
	}

	pub fn array(items: PropertyType) -> Self {
		Self::of(PropertyKind::Array {
			items: Box::new(items),
		})
	}

	pub fn object(properties: Vec<Property>) -> Self {
		Self::of(PropertyKind::Object {
			properties,
		})
	}

	pub fn set(items: PropertyType) -> Self {
		Self::of(PropertyKind::Set {
			items: Box::new(items),
		})
	}

	pub fn map(keys: PropertyType, values: PropertyType) -> Self {
		Self::of(PropertyKind::Map {
			keys: Box::new(keys),
			values: Box::new(values),
		})
	}

	pub fn tuple(items: Vec<PropertyType>) -> Self {
		Self::of(PropertyKind::Tuple {
			items,
		})
	}

	pub fn tagged(items: Vec<PropertyType>) -> Self {
		Self::of(PropertyKind::Tagged {
			items,
		})
	}

	pub fn udt(name: impl Into<String>) -> Self {
		Self::of(PropertyKind::Udt {
			name: name.into(),
			id: None,
		})
	}

	pub fn udt_id(name: impl Into<String>, id: SchemaId) -> Self {
		Self::of(PropertyKind::Udt {
			name: name.into(),
			id: Some(id),
		})
	}

	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	pub fn immutable(mut self) -> Self {
		self.immutable = true;
		self
	}

	/// Declared length of a primitive: exact for fixed storage, a maximum
	/// for variable storage.
	pub fn length(mut self, value: u32) -> Self {
		if let PropertyKind::Primitive {
			length,
			..
		} = &mut self.kind
		{
			*length = value;
		}
		self
	}
}
