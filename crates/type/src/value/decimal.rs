// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::Error;

const SIGN_MASK: u32 = 0x8000_0000;
const SCALE_MASK: u32 = 0x00FF_0000;
const SCALE_SHIFT: u32 = 16;
const MANTISSA_LIMIT: u128 = 1 << 96;

/// 128-bit decimal floating point: a 96-bit unsigned mantissa, a sign and a
/// base-10 scale between 0 and 28.
///
/// Stored as `flags:u32le hi:u32le lo:u64le`, where `flags` holds the scale in
/// bits 16..24 and the sign in bit 31.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
	flags: u32,
	hi: u32,
	lo: u64,
}

impl Decimal {
	pub const SIZE: usize = 16;

	pub const MAX_SCALE: u32 = 28;

	pub fn new(mantissa: i128, scale: u32) -> Result<Self, Error> {
		if scale > Self::MAX_SCALE {
			return Err(Error::TypeConstraint);
		}
		let magnitude = mantissa.unsigned_abs();
		if magnitude >= MANTISSA_LIMIT {
			return Err(Error::Exceeded);
		}
		let mut flags = scale << SCALE_SHIFT;
		if mantissa < 0 {
			flags |= SIGN_MASK;
		}
		Ok(Self {
			flags,
			hi: (magnitude >> 64) as u32,
			lo: magnitude as u64,
		})
	}

	pub fn mantissa(&self) -> i128 {
		let magnitude = ((self.hi as i128) << 64) | self.lo as i128;
		if self.is_negative() {
			-magnitude
		} else {
			magnitude
		}
	}

	pub fn scale(&self) -> u32 {
		(self.flags & SCALE_MASK) >> SCALE_SHIFT
	}

	pub fn is_negative(&self) -> bool {
		self.flags & SIGN_MASK != 0
	}

	pub fn to_le_bytes(self) -> [u8; 16] {
		let mut result = [0u8; 16];
		result[..4].copy_from_slice(&self.flags.to_le_bytes());
		result[4..8].copy_from_slice(&self.hi.to_le_bytes());
		result[8..].copy_from_slice(&self.lo.to_le_bytes());
		result
	}

	pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
		let mut flags = [0u8; 4];
		let mut hi = [0u8; 4];
		let mut lo = [0u8; 8];
		flags.copy_from_slice(&bytes[..4]);
		hi.copy_from_slice(&bytes[4..8]);
		lo.copy_from_slice(&bytes[8..]);
		Self {
			flags: u32::from_le_bytes(flags),
			hi: u32::from_le_bytes(hi),
			lo: u64::from_le_bytes(lo),
		}
	}

	pub fn to_big_decimal(&self) -> BigDecimal {
		BigDecimal::new(BigInt::from(self.mantissa()), self.scale() as i64)
	}
}

impl TryFrom<&BigDecimal> for Decimal {
	type Error = Error;

	fn try_from(value: &BigDecimal) -> Result<Self, Self::Error> {
		let (_, exponent) = value.as_bigint_and_exponent();
		let scale = exponent.clamp(0, Self::MAX_SCALE as i64);
		let (mantissa, _) = value.with_scale(scale).into_bigint_and_exponent();
		let mantissa = mantissa.to_i128().ok_or(Error::Exceeded)?;
		Decimal::new(mantissa, scale as u32)
	}
}

impl From<Decimal> for BigDecimal {
	fn from(value: Decimal) -> Self {
		value.to_big_decimal()
	}
}

impl FromStr for Decimal {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let value = BigDecimal::from_str(s).map_err(|_| Error::TypeConstraint)?;
		Decimal::try_from(&value)
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.to_big_decimal())
	}
}
