// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stream in-memory buffers.
//!
//! A buffer is created on the first append to a stream and then persists,
//! empty between flushes, until the store is cleared.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Capacity reserved for a freshly created buffer.
const INITIAL_CAPACITY: usize = 16 * 1024;

/// Append-only byte buffer for one stream.
#[derive(Debug)]
pub struct LogBuffer {
    content: Vec<u8>,
    last_write: Instant,
}

impl LogBuffer {
    fn new(now: Instant) -> Self {
        Self {
            content: Vec::with_capacity(INITIAL_CAPACITY),
            last_write: now,
        }
    }

    /// Buffered byte count.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn last_write(&self) -> Instant {
        self.last_write
    }

    /// Time since the last append, as seen at `now`.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_write)
    }
}

/// Mapping from stream name to its buffer.
#[derive(Debug, Default)]
pub struct BufferStore {
    buffers: BTreeMap<String, LogBuffer>,
}

impl BufferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `content` to the stream's buffer, creating it if absent.
    ///
    /// Returns the buffer size after the append.
    pub fn append(&mut self, stream: &str, content: &[u8], now: Instant) -> usize {
        let buffer = self
            .buffers
            .entry(stream.to_string())
            .or_insert_with(|| LogBuffer::new(now));
        buffer.content.extend_from_slice(content);
        buffer.last_write = now;
        buffer.content.len()
    }

    /// Take the stream's content, leaving its buffer empty.
    ///
    /// Returns `None` when the stream has no buffer or nothing buffered.
    pub fn drain(&mut self, stream: &str) -> Option<Vec<u8>> {
        let buffer = self.buffers.get_mut(stream)?;
        if buffer.content.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut buffer.content))
    }

    pub fn get(&self, stream: &str) -> Option<&LogBuffer> {
        self.buffers.get(stream)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogBuffer)> {
        self.buffers.iter().map(|(name, buf)| (name.as_str(), buf))
    }

    /// Names of streams with buffered content, in name order.
    pub fn pending_streams(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, buf)| !buf.is_empty())
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Number of known streams (empty buffers included).
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Drop every buffer and its content.
    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
