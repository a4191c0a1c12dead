// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Undo / Redo over retained document snapshots.
//!
//! Documents share unchanged blocks, so keeping every snapshot is cheap.
//! `push` drops anything that was undone, `undo` and `redo` just move the
//! cursor. Once more than `limit` snapshots are held the oldest is evicted.

use std::collections::VecDeque;

use crate::{Document, Selection};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Monotonic id, never reused within one history.
    pub seq: u64,
    pub document: Document,
    pub selection: Selection,
}

#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    next_seq: u64,
    limit: usize,
}

impl History {
    /// Start a history whose only entry is `document` at `selection`.
    pub fn new(document: Document, selection: Selection, limit: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(Snapshot {
            seq: 0,
            document,
            selection,
        });
        Self {
            entries,
            cursor: 0,
            next_seq: 1,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    /// Record a new snapshot after the current one and return its seq.
    pub fn push(&mut self, document: Document, selection: Selection) -> u64 {
        self.entries.truncate(self.cursor + 1);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(Snapshot {
            seq,
            document,
            selection,
        });
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
        seq
    }

    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of retained snapshots, including undone ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a retained snapshot by its seq.
    pub fn get(&self, seq: u64) -> Option<&Snapshot> {
        self.entries.iter().find(|s| s.seq == seq)
    }
}
