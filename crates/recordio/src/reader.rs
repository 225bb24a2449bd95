// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{ErrorKind, Read};

use tracing::{debug, instrument};

use crate::{Production, RecordIOConfig, RecordIOError, RecordIOParser, Result, Segment};

const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Default)]
pub struct RecordIOReader {
	config: RecordIOConfig,
}

impl RecordIOReader {
	pub fn new(config: RecordIOConfig) -> Self {
		Self {
			config,
		}
	}

	/// Reads the whole stream, calling `visit_segment` for every segment and
	/// `visit_record` for every record body in stream order. The first error,
	/// from the source or from a callback, ends the read. Returns the number
	/// of records read.
	#[instrument(name = "recordio::read", level = "trace", skip_all)]
	pub fn read<R, FR, FS>(&self, source: &mut R, mut visit_record: FR, mut visit_segment: FS) -> Result<usize>
	where
		R: Read,
		FR: FnMut(&[u8]) -> Result<()>,
		FS: FnMut(Segment) -> Result<()>,
	{
		let mut parser = RecordIOParser::new(&self.config);
		let mut pending: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);
		let mut chunk = [0u8; CHUNK_SIZE];
		let mut records = 0;

		loop {
			let needed = match parser.process(&pending)? {
				Production::Segment(segment) => {
					debug!(comment = ?segment.comment, "read segment");
					visit_segment(segment)?;
					None
				}
				Production::Record(body) => {
					visit_record(body)?;
					records += 1;
					None
				}
				Production::NeedMore(needed) => Some(needed),
			};
			pending.drain(..parser.consumed());

			let Some(needed) = needed else {
				continue;
			};
			if needed <= pending.len() {
				continue;
			}
			let read = match source.read(&mut chunk) {
				Ok(read) => read,
				Err(err) if err.kind() == ErrorKind::Interrupted => continue,
				Err(err) => return Err(err.into()),
			};
			if read == 0 {
				if pending.is_empty() && parser.at_boundary() {
					break;
				}
				return Err(RecordIOError::invalid(format!(
					"stream ended with {} of {} bytes of the next item",
					pending.len(),
					needed
				)));
			}
			pending.extend_from_slice(&chunk[..read]);
		}

		debug!(records, "read stream");
		Ok(records)
	}
}
