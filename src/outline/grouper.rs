//! Heading grouping state machine.

use regex::Regex;

use crate::model::ProgramEntry;

/// Groups heading-candidate text runs into numbered section entries.
///
/// A marker run (digits plus one trailing period, `"3."`) opens a new
/// entry; every following non-marker run extends the open entry's title.
/// Headings commonly arrive from PDF extraction as several font-measured
/// runs, so any non-marker run is treated as a continuation of the most
/// recently opened marker.
///
/// One grouper instance is scoped to a single pass: feed runs with
/// [`push`](Self::push), then take the entries with
/// [`finish`](Self::finish).
pub struct HeadingGrouper {
    marker: Regex,
    state: State,
    entries: Vec<ProgramEntry>,
}

enum State {
    /// No marker seen yet, or no entry currently open.
    Idle,
    /// An entry under construction, owned here until emitted or dropped.
    Accumulating(ProgramEntry),
}

impl HeadingGrouper {
    /// Create a grouper for one pass.
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"^\d+\.$").unwrap(),
            state: State::Idle,
            entries: Vec::new(),
        }
    }

    /// Feed one heading-candidate text run, in document order.
    ///
    /// Non-marker text arriving while idle is discarded: heading text
    /// before the first marker has no entry to attach to.
    pub fn push(&mut self, text: &str) {
        if self.marker.is_match(text) {
            self.close_open_entry();
            let number = text.strip_suffix('.').unwrap_or(text);
            self.state = State::Accumulating(ProgramEntry::new(number, ""));
        } else if let State::Accumulating(entry) = &mut self.state {
            if !entry.title.is_empty() {
                entry.title.push(' ');
            }
            entry.title.push_str(text);
        }
    }

    /// End of stream: emit a qualifying open entry and return all emitted
    /// entries in the order their markers appeared.
    ///
    /// A dangling trailing marker with no title text is discarded.
    pub fn finish(mut self) -> Vec<ProgramEntry> {
        self.close_open_entry();
        self.entries
    }

    fn close_open_entry(&mut self) {
        if let State::Accumulating(entry) = std::mem::replace(&mut self.state, State::Idle) {
            if entry.is_complete() {
                self.entries.push(entry);
            }
        }
    }
}

impl Default for HeadingGrouper {
    fn default() -> Self {
        Self::new()
    }
}
