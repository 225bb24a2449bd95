// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use hybridrow_core::{
	DefaultResizer, HybridRowHeader, HybridRowVersion, RowBuffer, RowCursor,
	buffer::UpdateOptions,
	catalog::{FixedCodec, LayoutInt32, LayoutUInt32, LayoutUtf8, PrimitiveCodec},
};
use hybridrow_type::{Error, Result};

use crate::{RecordIOConfig, SystemSchema};

/// Metadata that opens a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
	pub comment: Option<String>,
	/// Schema document describing the records that follow.
	pub sdl: Option<String>,
}

impl Segment {
	pub fn new(comment: impl Into<String>, sdl: impl Into<String>) -> Self {
		Self {
			comment: Some(comment.into()),
			sdl: Some(sdl.into()),
		}
	}

	/// Bytes needed before [`Segment::read_length`] can succeed.
	pub(crate) fn length_prefix_size() -> Result<usize> {
		let layout = SystemSchema::resolver().resolve(SystemSchema::SEGMENT)?;
		Ok(HybridRowHeader::SIZE + layout.size)
	}

	pub fn encode(&self, config: &RecordIOConfig) -> Result<Vec<u8>> {
		let resolver = SystemSchema::resolver();
		let layout = resolver.resolve(SystemSchema::SEGMENT)?;
		let mut b = RowBuffer::with_resizer(config.initial_capacity, resolver, Box::new(DefaultResizer::default()));
		b.init_layout(HybridRowVersion::V1, &layout)?;
		let root = RowCursor::create(&b)?;

		for (path, value) in [("comment", &self.comment), ("sdl", &self.sdl)] {
			if let Some(value) = value {
				let mut field = root.find(&b, path)?;
				LayoutUtf8.write_sparse(&mut b, &mut field, value, UpdateOptions::Upsert)?;
			}
		}

		let length = i32::try_from(b.len()).map_err(|_| Error::Exceeded)?;
		let column = layout.column("length").ok_or(Error::SchemaMismatch)?;
		LayoutInt32.write_fixed(&mut b, &root, column, &length)?;
		Ok(b.as_bytes().to_vec())
	}

	/// Total length of the segment row starting at `bytes`.
	pub(crate) fn read_length(bytes: &[u8]) -> Result<usize> {
		let header = HybridRowHeader::decode(bytes)?;
		if header.version != HybridRowVersion::V1 || header.schema_id != SystemSchema::SEGMENT {
			return Err(Error::InvalidRow);
		}
		let layout = SystemSchema::resolver().resolve(SystemSchema::SEGMENT)?;
		let column = layout.column("length").ok_or(Error::SchemaMismatch)?;
		let offset = HybridRowHeader::SIZE + column.offset;
		let raw = bytes.get(offset..offset + 4).ok_or(Error::InvalidRow)?;
		let length = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
		usize::try_from(length).map_err(|_| Error::InvalidRow)
	}

	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let mut b = RowBuffer::new(bytes.len(), SystemSchema::resolver());
		b.read_from(bytes, HybridRowVersion::V1)?;
		if b.header()?.schema_id != SystemSchema::SEGMENT {
			return Err(Error::SchemaMismatch);
		}
		let root = RowCursor::create(&b)?;

		let layout = b.layout()?.clone();
		let column = layout.column("length").ok_or(Error::SchemaMismatch)?;
		if LayoutInt32.read_fixed(&b, &root, column)? as i64 != bytes.len() as i64 {
			return Err(Error::InvalidRow);
		}

		let read = |path: &str| -> Result<Option<String>> {
			match LayoutUtf8.read_sparse(&b, &root.find(&b, path)?) {
				Ok(value) => Ok(Some(value)),
				Err(Error::NotFound) => Ok(None),
				Err(err) => Err(err),
			}
		};
		Ok(Self {
			comment: read("comment")?,
			sdl: read("sdl")?,
		})
	}
}

/// Header in front of a record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
	pub length: u32,
	pub crc32: u32,
}

impl Record {
	pub fn new(body: &[u8]) -> Result<Self> {
		let length = i32::try_from(body.len()).map_err(|_| Error::Exceeded)?;
		Ok(Self {
			length: length as u32,
			crc32: crc32fast::hash(body),
		})
	}

	/// Encoded size of the header row.
	pub(crate) fn size() -> Result<usize> {
		let layout = SystemSchema::resolver().resolve(SystemSchema::RECORD)?;
		Ok(HybridRowHeader::SIZE + layout.size)
	}

	pub fn encode(&self) -> Result<Vec<u8>> {
		let resolver = SystemSchema::resolver();
		let layout = resolver.resolve(SystemSchema::RECORD)?;
		let mut b = RowBuffer::new(HybridRowHeader::SIZE + layout.size, resolver);
		b.init_layout(HybridRowVersion::V1, &layout)?;
		let root = RowCursor::create(&b)?;

		let length = i32::try_from(self.length).map_err(|_| Error::Exceeded)?;
		LayoutInt32.write_fixed(&mut b, &root, layout.column("length").ok_or(Error::SchemaMismatch)?, &length)?;
		LayoutUInt32.write_fixed(&mut b, &root, layout.column("crc32").ok_or(Error::SchemaMismatch)?, &self.crc32)?;
		Ok(b.as_bytes().to_vec())
	}

	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let mut b = RowBuffer::new(bytes.len(), SystemSchema::resolver());
		b.read_from(bytes, HybridRowVersion::V1)?;
		if b.header()?.schema_id != SystemSchema::RECORD {
			return Err(Error::SchemaMismatch);
		}
		let root = RowCursor::create(&b)?;
		let layout = b.layout()?.clone();

		let length = LayoutInt32.read_fixed(&b, &root, layout.column("length").ok_or(Error::SchemaMismatch)?)?;
		let crc32 = LayoutUInt32.read_fixed(&b, &root, layout.column("crc32").ok_or(Error::SchemaMismatch)?)?;
		Ok(Self {
			length: u32::try_from(length).map_err(|_| Error::InvalidRow)?,
			crc32,
		})
	}
}
