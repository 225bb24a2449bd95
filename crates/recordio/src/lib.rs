// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! RecordIO: a forward-only stream of HybridRow records.
//!
//! ```text
//! stream  := segment (segment | record)*
//! segment := Segment row (its `length` column covers the whole row)
//! record  := Record row (length, crc32) body
//! ```
//!
//! Segment and record headers are rows of the [`SystemSchema`]. Record bodies
//! are opaque to the stream; they are usually rows of some user schema.

mod config;
mod error;
mod parser;
mod reader;
mod schema;
mod segment;
mod writer;

pub use config::RecordIOConfig;
pub use error::RecordIOError;
pub use parser::{Production, RecordIOParser};
pub use reader::RecordIOReader;
pub use schema::SystemSchema;
pub use segment::{Record, Segment};
pub use writer::RecordIOWriter;

pub type Result<T> = std::result::Result<T, RecordIOError>;
