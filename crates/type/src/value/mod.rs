// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Fixed-width value types without a direct Rust primitive counterpart.

mod datetime;
mod decimal;
mod float128;
mod object_id;

pub use datetime::{DateTime, UnixDateTime};
pub use decimal::Decimal;
pub use float128::Float128;
pub use object_id::MongoDbObjectId;
/// 16-byte globally unique identifier, stored in little-endian field order.
pub use uuid::Uuid as Guid;
