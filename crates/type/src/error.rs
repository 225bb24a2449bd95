// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Closed taxonomy of row operation outcomes.
///
/// Success is expressed through `Ok`; every other outcome is one of these
/// variants. Callers probing optional fields treat [`Error::NotFound`] as
/// ordinary control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
	/// The field, column or element is absent.
	#[error("field not found")]
	NotFound,

	/// An insert collided with a value that is already present.
	#[error("field already exists")]
	Exists,

	/// A value does not fit the declared length or the buffer cannot grow.
	#[error("value exceeds the declared length or the available capacity")]
	Exceeded,

	/// The stored type code disagrees with the requested codec.
	#[error("stored type does not match the requested type")]
	TypeMismatch,

	/// The value or operation violates the type arguments of its scope.
	#[error("value violates the type constraints of its scope")]
	TypeConstraint,

	/// A mutation was attempted through an immutable scope.
	#[error("scope is immutable")]
	InsufficientPermissions,

	/// The schema id is unknown to the resolver or disagrees with the row.
	#[error("schema is unknown or does not match the row")]
	SchemaMismatch,

	/// The row header or encoding is malformed.
	#[error("row is malformed")]
	InvalidRow,
}
