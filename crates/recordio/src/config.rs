// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#[derive(Debug, Clone)]
pub struct RecordIOConfig {
	/// Starting capacity of the rows built for segment and record headers.
	pub initial_capacity: usize,
	/// Largest record body or segment row accepted by the writer and the
	/// reader.
	pub max_record_size: usize,
}

impl Default for RecordIOConfig {
	fn default() -> Self {
		Self {
			initial_capacity: 1024,
			max_record_size: i32::MAX as usize,
		}
	}
}

impl RecordIOConfig {
	pub fn with_max_record_size(mut self, max_record_size: usize) -> Self {
		self.max_record_size = max_record_size;
		self
	}
}
