//! Append-only, human-readable diagnostic log of a run.

use serde::{Deserialize, Serialize};

use cascade_core::constants::TICK_MARKER_PREFIX;

/// Ordered diagnostic lines. Each tick's block starts with a
/// `--- Tick <t> ---` marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticLog {
    lines: Vec<String>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append the boundary marker that opens tick `tick`.
    pub fn push_tick_marker(&mut self, tick: u32) {
        self.lines.push(format!("{TICK_MARKER_PREFIX} {tick} ---"));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The last `n` tick blocks, markers included.
    ///
    /// With fewer than `n` markers the whole log is returned; `n == 0`
    /// returns nothing.
    pub fn last_tick_blocks(&self, n: usize) -> &[String] {
        if n == 0 {
            return &[];
        }
        let mut seen = 0;
        for (i, line) in self.lines.iter().enumerate().rev() {
            if is_tick_marker(line) {
                seen += 1;
                if seen == n {
                    return &self.lines[i..];
                }
            }
        }
        &self.lines
    }
}

impl From<Vec<String>> for DiagnosticLog {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

pub fn is_tick_marker(line: &str) -> bool {
    line.starts_with(TICK_MARKER_PREFIX)
}
