// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod buffer;
pub mod catalog;
mod cursor;
pub mod layout;
mod resolver;
pub mod schema;

pub use buffer::{DefaultResizer, HybridRowHeader, HybridRowVersion, Resizer, RowBuffer};
pub use cursor::RowCursor;
pub use hybridrow_type::{
	DateTime, Decimal, Error, Float128, Guid, LayoutCode, MongoDbObjectId, Result, SchemaId, TypeArgument,
	TypeArgumentList, UnixDateTime,
};
pub use layout::{Layout, LayoutBit, LayoutColumn, LayoutCompiler, StringTokenizer};
pub use resolver::{LayoutResolver, LayoutResolverNamespace};
