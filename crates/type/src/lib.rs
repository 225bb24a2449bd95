// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Shared vocabulary of the HybridRow format: the closed catalog of layout
//! codes, schema identifiers, generic type arguments, the fixed-width value
//! types that have no direct Rust primitive, and the result taxonomy every
//! fallible row operation reports through.

mod argument;
mod code;
mod error;
mod schema_id;
pub mod value;

pub use argument::{TypeArgument, TypeArgumentList};
pub use code::LayoutCode;
pub use error::Error;
pub use schema_id::SchemaId;
pub use value::{DateTime, Decimal, Float128, Guid, MongoDbObjectId, UnixDateTime};

pub type Result<T> = std::result::Result<T, Error>;
