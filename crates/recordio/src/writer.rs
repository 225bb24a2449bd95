// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::Write;

use tracing::{debug, instrument, trace};

use crate::{RecordIOConfig, RecordIOError, Record, Result, Segment};

#[derive(Debug, Clone, Default)]
pub struct RecordIOWriter {
	config: RecordIOConfig,
}

impl RecordIOWriter {
	pub fn new(config: RecordIOConfig) -> Self {
		Self {
			config,
		}
	}

	/// Writes `segment` followed by the records returned by `produce`, which
	/// is called with increasing indexes until it returns `None`. Returns the
	/// number of records written.
	#[instrument(name = "recordio::write", level = "trace", skip_all)]
	pub fn write<W, F>(&self, sink: &mut W, segment: &Segment, mut produce: F) -> Result<usize>
	where
		W: Write,
		F: FnMut(usize) -> Result<Option<Vec<u8>>>,
	{
		let segment = segment.encode(&self.config)?;
		if segment.len() > self.config.max_record_size {
			return Err(RecordIOError::invalid(format!(
				"segment of {} bytes exceeds the limit of {}",
				segment.len(),
				self.config.max_record_size
			)));
		}
		sink.write_all(&segment)?;

		let mut index = 0;
		while let Some(body) = produce(index)? {
			self.write_record(sink, &body)?;
			trace!(index, len = body.len(), "wrote record");
			index += 1;
		}
		sink.flush()?;

		debug!(records = index, "wrote stream");
		Ok(index)
	}

	/// Appends one record to a stream whose segment has already been written.
	pub fn write_record<W: Write>(&self, sink: &mut W, body: &[u8]) -> Result<()> {
		if body.len() > self.config.max_record_size {
			return Err(RecordIOError::invalid(format!(
				"record of {} bytes exceeds the limit of {}",
				body.len(),
				self.config.max_record_size
			)));
		}
		sink.write_all(&Record::new(body)?.encode()?)?;
		sink.write_all(body)?;
		Ok(())
	}
}
