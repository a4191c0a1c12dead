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

//! Caret and range selections.
//!
//! A selection is a pair of points, each naming a block by key and a
//! UTF-16 code unit offset inside that block's text. Model operations
//! require a forward selection (anchor at or before focus); use
//! [`Document::normalize_selection`](crate::Document::normalize_selection)
//! to turn a backward one around.

use crate::model::BlockKey;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionPoint {
    pub key: BlockKey,
    pub offset: usize,
}

impl SelectionPoint {
    pub fn new(key: impl Into<BlockKey>, offset: usize) -> Self {
        Self {
            key: key.into(),
            offset,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: SelectionPoint,
    pub focus: SelectionPoint,
}

impl Selection {
    pub fn new(anchor: SelectionPoint, focus: SelectionPoint) -> Self {
        Self { anchor, focus }
    }

    /// A caret at `offset` in block `key`.
    pub fn collapsed(key: impl Into<BlockKey>, offset: usize) -> Self {
        let point = SelectionPoint::new(key, offset);
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// The range `[start, end)` inside a single block.
    pub fn within(key: impl Into<BlockKey>, start: usize, end: usize) -> Self {
        let key = key.into();
        Self {
            anchor: SelectionPoint::new(key.clone(), start),
            focus: SelectionPoint::new(key, end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start_key(&self) -> &BlockKey {
        &self.anchor.key
    }

    /// Swap anchor and focus.
    pub fn reversed(&self) -> Self {
        Self {
            anchor: self.focus.clone(),
            focus: self.anchor.clone(),
        }
    }

    /// Map this selection through the removal of `len` code units at
    /// `offset` in block `key`. Points inside the removed span collapse to
    /// its start.
    pub(crate) fn after_removal(
        &self,
        key: &BlockKey,
        offset: usize,
        len: usize,
    ) -> Self {
        let map = |point: &SelectionPoint| {
            if &point.key != key || point.offset <= offset {
                point.clone()
            } else if point.offset >= offset + len {
                SelectionPoint::new(key.clone(), point.offset - len)
            } else {
                SelectionPoint::new(key.clone(), offset)
            }
        };
        Self {
            anchor: map(&self.anchor),
            focus: map(&self.focus),
        }
    }
}
