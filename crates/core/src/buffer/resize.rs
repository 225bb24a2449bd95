// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Debug;

/// Capacity policy of a growable [`RowBuffer`](super::RowBuffer).
pub trait Resizer: Send + Sync + Debug {
	/// Returns the new capacity, at least `minimum`.
	fn resize(&self, minimum: usize, current: usize) -> usize;
}

/// Grows by a constant factor, or straight to the requested size when that is
/// larger.
#[derive(Debug, Clone, Copy)]
pub struct DefaultResizer {
	pub growth_factor: usize,
}

impl Default for DefaultResizer {
	fn default() -> Self {
		Self {
			growth_factor: 2,
		}
	}
}

impl Resizer for DefaultResizer {
	fn resize(&self, minimum: usize, current: usize) -> usize {
		current.saturating_mul(self.growth_factor).max(minimum)
	}
}
