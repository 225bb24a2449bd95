// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! 7-bit variable length integers.
//!
//! Unsigned values are written in little-endian 7-bit groups, the high bit of
//! each byte flagging a continuation. Signed values are first rotated so the
//! sign lands in the least significant bit.

use hybridrow_type::{Error, Result};

use super::RowBuffer;

/// Longest encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

pub fn rotate_sign_to_lsb(value: i64) -> u64 {
	if value < 0 {
		((value.wrapping_neg() as u64) << 1) | 1
	} else {
		(value as u64) << 1
	}
}

pub fn rotate_sign_to_msb(value: u64) -> i64 {
	let magnitude = (value >> 1) as i64;
	match (value & 1 != 0, magnitude) {
		// There is no negative zero; the slot encodes i64::MIN.
		(true, 0) => i64::MIN,
		(true, _) => -magnitude,
		(false, _) => magnitude,
	}
}

pub fn varuint_len(mut value: u64) -> usize {
	let mut len = 1;
	while value >= 0x80 {
		value >>= 7;
		len += 1;
	}
	len
}

pub fn varint_len(value: i64) -> usize {
	varuint_len(rotate_sign_to_lsb(value))
}

pub fn encode_varuint(mut value: u64, out: &mut Vec<u8>) {
	while value >= 0x80 {
		out.push((value as u8) | 0x80);
		value >>= 7;
	}
	out.push(value as u8);
}

pub fn encode_varint(value: i64, out: &mut Vec<u8>) {
	encode_varuint(rotate_sign_to_lsb(value), out)
}

/// Decodes a varuint from the front of `bytes`, returning the value and the
/// number of bytes consumed.
pub fn decode_varuint(bytes: &[u8]) -> Result<(u64, usize)> {
	let mut result = 0u64;
	for (i, &byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
		let shift = 7 * i as u32;
		let bits = (byte & 0x7F) as u64;
		if shift == 63 && bits > 1 {
			return Err(Error::InvalidRow);
		}
		result |= bits << shift;
		if byte & 0x80 == 0 {
			return Ok((result, i + 1));
		}
	}
	Err(Error::InvalidRow)
}

impl RowBuffer {
	pub fn read_varuint(&self, offset: usize) -> Result<(u64, usize)> {
		decode_varuint(self.as_bytes().get(offset..).ok_or(Error::InvalidRow)?)
	}

	pub fn read_varint(&self, offset: usize) -> Result<(i64, usize)> {
		let (value, len) = self.read_varuint(offset)?;
		Ok((rotate_sign_to_msb(value), len))
	}

	/// Writes over existing bytes; the caller makes room first.
	pub fn write_varuint(&mut self, offset: usize, value: u64) -> Result<usize> {
		let mut encoded = Vec::with_capacity(MAX_VARINT_LEN);
		encode_varuint(value, &mut encoded);
		self.write_bytes(offset, &encoded)?;
		Ok(encoded.len())
	}

	pub fn write_varint(&mut self, offset: usize, value: i64) -> Result<usize> {
		self.write_varuint(offset, rotate_sign_to_lsb(value))
	}
}
