// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_core::HybridRowHeader;
use hybridrow_type::SchemaId;
use tracing::trace;

use crate::{RecordIOConfig, RecordIOError, Record, Result, Segment, SystemSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	/// At the start of the stream, which must open with a segment.
	Start,
	/// Waiting for the fixed part of a segment row that holds its length.
	NeedSegmentLength,
	NeedSegment(usize),
	/// Waiting for the next record or segment header.
	NeedHeader,
	NeedBody(Record),
}

/// Result of one [`RecordIOParser::process`] step.
#[derive(Debug, PartialEq, Eq)]
pub enum Production<'a> {
	/// At least this many bytes, counted from the first unconsumed byte, are
	/// needed before the next item can be produced.
	NeedMore(usize),
	Segment(Segment),
	/// A record body whose checksum has been verified.
	Record(&'a [u8]),
}

/// Incremental parser over a stream that may arrive in pieces.
///
/// Each call to [`RecordIOParser::process`] looks at the unconsumed input and
/// either produces one item or reports how much input it needs. Consumed
/// bytes are reported through [`RecordIOParser::consumed`] and must be
/// dropped by the caller before the next call.
#[derive(Debug)]
pub struct RecordIOParser {
	state: State,
	consumed: usize,
	max_record_size: usize,
}

impl RecordIOParser {
	pub fn new(config: &RecordIOConfig) -> Self {
		Self {
			state: State::Start,
			consumed: 0,
			max_record_size: config.max_record_size,
		}
	}

	/// Bytes of the last input taken by the last [`RecordIOParser::process`].
	pub fn consumed(&self) -> usize {
		self.consumed
	}

	/// True between items, where the stream may legally end.
	pub fn at_boundary(&self) -> bool {
		self.state == State::NeedHeader
	}

	pub fn process<'a>(&mut self, input: &'a [u8]) -> Result<Production<'a>> {
		self.consumed = 0;
		loop {
			match self.state {
				State::Start => {
					if input.len() < HybridRowHeader::SIZE {
						return Ok(Production::NeedMore(HybridRowHeader::SIZE));
					}
					if read_schema_id(input)? != SystemSchema::SEGMENT {
						return Err(RecordIOError::invalid("stream does not start with a segment"));
					}
					self.state = State::NeedSegmentLength;
				}
				State::NeedSegmentLength => {
					let needed = Segment::length_prefix_size()?;
					if input.len() < needed {
						return Ok(Production::NeedMore(needed));
					}
					let length = Segment::read_length(input)?;
					if length < needed {
						return Err(RecordIOError::invalid(format!("segment length {length} is too short")));
					}
					if length > self.max_record_size {
						return Err(RecordIOError::invalid(format!(
							"segment of {length} bytes exceeds the limit of {}",
							self.max_record_size
						)));
					}
					self.state = State::NeedSegment(length);
				}
				State::NeedSegment(length) => {
					if input.len() < length {
						return Ok(Production::NeedMore(length));
					}
					let segment = Segment::decode(&input[..length])?;
					trace!(length, "parsed segment");
					self.consumed = length;
					self.state = State::NeedHeader;
					return Ok(Production::Segment(segment));
				}
				State::NeedHeader => {
					if input.len() < HybridRowHeader::SIZE {
						return Ok(Production::NeedMore(HybridRowHeader::SIZE));
					}
					match read_schema_id(input)? {
						id if id == SystemSchema::SEGMENT => {
							self.state = State::NeedSegmentLength;
						}
						id if id == SystemSchema::RECORD => {
							let size = Record::size()?;
							if input.len() < size {
								return Ok(Production::NeedMore(size));
							}
							let record = Record::decode(&input[..size])?;
							if record.length as usize > self.max_record_size {
								return Err(RecordIOError::invalid(format!(
									"record of {} bytes exceeds the limit of {}",
									record.length, self.max_record_size
								)));
							}
							self.consumed = size;
							self.state = State::NeedBody(record);
							return Ok(Production::NeedMore(record.length as usize));
						}
						id => return Err(RecordIOError::invalid(format!("unexpected header schema {id}"))),
					}
				}
				State::NeedBody(record) => {
					let length = record.length as usize;
					if input.len() < length {
						return Ok(Production::NeedMore(length));
					}
					let body = &input[..length];
					let actual = crc32fast::hash(body);
					if actual != record.crc32 {
						return Err(RecordIOError::CrcMismatch {
							expected: record.crc32,
							actual,
						});
					}
					trace!(length, "parsed record");
					self.consumed = length;
					self.state = State::NeedHeader;
					return Ok(Production::Record(body));
				}
			}
		}
	}
}

fn read_schema_id(input: &[u8]) -> Result<SchemaId> {
	Ok(HybridRowHeader::decode(input)?.schema_id)
}
