// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Point in time as 100-nanosecond ticks since 0001-01-01T00:00:00 UTC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateTime(i64);

impl DateTime {
	pub const SIZE: usize = 8;

	/// Ticks between 0001-01-01 and the Unix epoch.
	pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

	pub const TICKS_PER_MILLISECOND: i64 = 10_000;

	pub const fn from_ticks(ticks: i64) -> Self {
		Self(ticks)
	}

	pub const fn ticks(self) -> i64 {
		self.0
	}

	pub fn from_unix(value: UnixDateTime) -> Option<Self> {
		value.milliseconds()
			.checked_mul(Self::TICKS_PER_MILLISECOND)
			.and_then(|ticks| ticks.checked_add(Self::UNIX_EPOCH_TICKS))
			.map(Self)
	}
}

impl Display for DateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}t", self.0)
	}
}

/// Point in time as milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnixDateTime(i64);

impl UnixDateTime {
	pub const SIZE: usize = 8;

	pub const fn from_milliseconds(milliseconds: i64) -> Self {
		Self(milliseconds)
	}

	pub const fn milliseconds(self) -> i64 {
		self.0
	}
}

impl Display for UnixDateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}ms", self.0)
	}
}
