//! Line-oriented metric reader that groups metrics into write cycles

use std::collections::VecDeque;

use cwsink::Metric;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Split};

use super::parse_line;

pub struct MetricReader<R> {
    lines: Split<R>,
    line_number: usize,
    pending: VecDeque<Metric>,
    skipped_lines: usize,
    exhausted: bool,
}

impl<R: AsyncBufRead + Unpin> MetricReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            lines: input.split(b'\n'),
            line_number: 0,
            pending: VecDeque::new(),
            skipped_lines: 0,
            exhausted: false,
        }
    }

    /// Read until `max` metrics are buffered or the input ends.
    ///
    /// Returns `None` once the input is exhausted and nothing is buffered.
    /// Cancel safe: metrics read before cancellation stay buffered and can be
    /// recovered with `take_pending`.
    pub async fn next_batch(&mut self, max: usize) -> std::io::Result<Option<Vec<Metric>>> {
        while !self.exhausted && self.pending.len() < max {
            match self.lines.next_segment().await? {
                Some(bytes) => {
                    self.line_number += 1;
                    self.ingest(bytes);
                }
                None => self.exhausted = true,
            }
        }

        if self.pending.is_empty() {
            return Ok(None);
        }

        let take = max.min(self.pending.len());
        Ok(Some(self.pending.drain(..take).collect()))
    }

    /// Drain whatever is buffered without reading further
    pub fn take_pending(&mut self) -> Vec<Metric> {
        self.pending.drain(..).collect()
    }

    /// Lines that could not be parsed so far
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    fn ingest(&mut self, bytes: Vec<u8>) {
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                self.skipped_lines += 1;
                tracing::warn!(
                    line = self.line_number,
                    error = %e,
                    "Skipping non UTF-8 input line"
                );
                return;
            }
        };

        match parse_line(&line) {
            Ok(metrics) => self.pending.extend(metrics),
            Err(e) => {
                self.skipped_lines += 1;
                tracing::warn!(
                    line = self.line_number,
                    error = %e,
                    "Skipping malformed input line"
                );
            }
        }
    }
}
