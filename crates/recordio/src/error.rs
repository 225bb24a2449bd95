// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io;

use hybridrow_type::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordIOError {
	#[error(transparent)]
	Row(#[from] Error),

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("invalid record: {0}")]
	InvalidRecord(String),

	#[error("record checksum mismatch: expected {expected:#010x}, found {actual:#010x}")]
	CrcMismatch {
		expected: u32,
		actual: u32,
	},
}

impl RecordIOError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		RecordIOError::InvalidRecord(message.into())
	}
}
