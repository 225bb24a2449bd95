// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, fmt::Debug, sync::Arc};

use hybridrow_type::{Error, Result, SchemaId};
use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::{
	layout::{Layout, LayoutCompiler},
	schema::Namespace,
};

/// Maps schema ids to compiled layouts.
pub trait LayoutResolver: Send + Sync + Debug {
	/// Unknown ids fail with [`Error::SchemaMismatch`].
	fn resolve(&self, schema_id: SchemaId) -> Result<Layout>;
}

/// Resolves the schemas of one namespace, compiling each layout on first use.
/// Ids the namespace does not declare are delegated to the parent, if any.
#[derive(Debug)]
pub struct LayoutResolverNamespace {
	namespace: Namespace,
	parent: Option<Arc<dyn LayoutResolver>>,
	cache: RwLock<HashMap<SchemaId, Layout>>,
}

impl LayoutResolverNamespace {
	pub fn new(namespace: Namespace) -> Self {
		Self {
			namespace,
			parent: None,
			cache: RwLock::new(HashMap::new()),
		}
	}

	pub fn with_parent(namespace: Namespace, parent: Arc<dyn LayoutResolver>) -> Self {
		Self {
			namespace,
			parent: Some(parent),
			cache: RwLock::new(HashMap::new()),
		}
	}

	pub fn namespace(&self) -> &Namespace {
		&self.namespace
	}
}

impl LayoutResolver for LayoutResolverNamespace {
	#[instrument(name = "resolver::resolve", level = "trace", skip(self), fields(namespace = %self.namespace.name))]
	fn resolve(&self, schema_id: SchemaId) -> Result<Layout> {
		if let Some(layout) = self.cache.read().get(&schema_id) {
			return Ok(layout.clone());
		}

		let Some(schema) = self.namespace.schema(schema_id) else {
			return match &self.parent {
				Some(parent) => parent.resolve(schema_id),
				None => Err(Error::SchemaMismatch),
			};
		};

		debug!(schema = %schema.name, id = %schema_id, "compiling layout");
		let layout = LayoutCompiler::compile(&self.namespace, schema)?;

		let mut cache = self.cache.write();
		Ok(cache.entry(schema_id).or_insert(layout).clone())
	}
}
