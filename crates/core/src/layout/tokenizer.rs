// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

/// Maps the sparse paths a layout knows about to small integer tokens.
///
/// Token `0` is always the empty path. A path token at or above
/// [`StringTokenizer::count`] is not a token at all: it encodes the byte
/// length of an inline UTF-8 path, offset by `count`.
#[derive(Debug, Clone)]
pub struct StringTokenizer {
	tokens: HashMap<String, u64>,
	strings: Vec<String>,
}

impl StringTokenizer {
	pub fn new() -> Self {
		let mut tokens = HashMap::new();
		tokens.insert(String::new(), 0);
		Self {
			tokens,
			strings: vec![String::new()],
		}
	}

	/// Returns the token for `path`, allocating one if needed.
	pub fn add(&mut self, path: &str) -> u64 {
		if let Some(token) = self.tokens.get(path) {
			return *token;
		}
		let token = self.strings.len() as u64;
		self.tokens.insert(path.to_string(), token);
		self.strings.push(path.to_string());
		token
	}

	pub fn find_token(&self, path: &str) -> Option<u64> {
		self.tokens.get(path).copied()
	}

	pub fn find_string(&self, token: u64) -> Option<&str> {
		self.strings.get(token as usize).map(String::as_str)
	}

	pub fn count(&self) -> u64 {
		self.strings.len() as u64
	}
}

impl Default for StringTokenizer {
	fn default() -> Self {
		Self::new()
	}
}
