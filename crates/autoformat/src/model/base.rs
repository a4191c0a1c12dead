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

use std::fmt;
use std::sync::Arc;

use crate::{BlockType, InlineStyle, ModelError, Selection, SelectionPoint};

/// Stable identifier of a block within a document.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&BlockKey> for BlockKey {
    fn from(key: &BlockKey) -> Self {
        key.clone()
    }
}

/// A style applied to the UTF-16 code units `[start, end)` of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InlineStyleRange {
    pub style: InlineStyle,
    pub start: usize,
    pub end: usize,
}

impl InlineStyleRange {
    pub fn new(style: InlineStyle, start: usize, end: usize) -> Self {
        Self { style, start, end }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// One paragraph- or heading-level unit of text.
///
/// Style ranges are kept canonical: sorted by style then start, and for
/// each style non-empty, non-overlapping and non-adjacent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub(crate) key: BlockKey,
    pub(crate) block_type: BlockType,
    pub(crate) text: String,
    pub(crate) inline_style_ranges: Vec<InlineStyleRange>,
}

impl Block {
    pub(crate) fn new(
        key: BlockKey,
        block_type: BlockType,
        text: String,
        ranges: Vec<InlineStyleRange>,
    ) -> Self {
        Self {
            key,
            block_type,
            text,
            inline_style_ranges: normalize_ranges(ranges),
        }
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn inline_style_ranges(&self) -> &[InlineStyleRange] {
        &self.inline_style_ranges
    }

    /// The text length in UTF-16 code units.
    pub fn len(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An immutable rich-text document snapshot.
///
/// Blocks are shared between snapshots: an edit clones the block list
/// (a vector of reference-counted pointers) and replaces only the blocks it
/// touched, so retaining old snapshots for history is cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub(crate) blocks: Vec<Arc<Block>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::create_empty()
    }
}

/// A forward selection resolved to block indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ResolvedRange {
    pub start_block: usize,
    pub start: usize,
    pub end_block: usize,
    pub end: usize,
}

impl ResolvedRange {
    pub fn is_collapsed(&self) -> bool {
        self.start_block == self.end_block && self.start == self.end
    }
}

impl Document {
    /// A document holding one empty paragraph.
    pub fn create_empty() -> Self {
        Self {
            blocks: vec![Arc::new(Block::new(
                BlockKey::from("b0"),
                BlockType::Paragraph,
                String::new(),
                Vec::new(),
            ))],
        }
    }

    pub(crate) fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().map(|b| b.as_ref())
    }

    pub fn block_keys(&self) -> impl Iterator<Item = &BlockKey> {
        self.blocks.iter().map(|b| &b.key)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| &b.key == key)
    }

    pub fn block(&self, key: &BlockKey) -> Result<&Block, ModelError> {
        self.blocks
            .iter()
            .find(|b| &b.key == key)
            .map(|b| b.as_ref())
            .ok_or_else(|| ModelError::not_found(key))
    }

    pub fn first_block(&self) -> &Block {
        // A document always holds at least one block.
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// The plain text of the block named `key`.
    pub fn block_text(&self, key: &BlockKey) -> Result<&str, ModelError> {
        self.block(key).map(Block::text)
    }

    /// A caret at the very start of the document.
    pub fn selection_at_start(&self) -> Selection {
        Selection::collapsed(self.first_block().key.clone(), 0)
    }

    /// A caret at the very end of the document.
    pub fn selection_at_end(&self) -> Selection {
        let last = self.last_block();
        Selection::collapsed(last.key.clone(), last.len())
    }

    /// Check that `point` names an existing block and sits on a character
    /// boundary inside it. Returns the block index.
    pub(crate) fn check_point(
        &self,
        point: &SelectionPoint,
    ) -> Result<usize, ModelError> {
        let index = self
            .block_index(&point.key)
            .ok_or_else(|| ModelError::not_found(&point.key))?;
        let block = &self.blocks[index];
        if byte_index(&block.text, point.offset).is_none() {
            return Err(ModelError::invariant(format!(
                "offset {} is not a character boundary in block `{}` \
                 (length {})",
                point.offset,
                block.key,
                block.len()
            )));
        }
        Ok(index)
    }

    /// Resolve a forward selection. Reversed selections are rejected.
    pub(crate) fn resolve(
        &self,
        selection: &Selection,
    ) -> Result<ResolvedRange, ModelError> {
        let start_block = self.check_point(&selection.anchor)?;
        let end_block = self.check_point(&selection.focus)?;
        let range = ResolvedRange {
            start_block,
            start: selection.anchor.offset,
            end_block,
            end: selection.focus.offset,
        };
        if (range.start_block, range.start) > (range.end_block, range.end) {
            return Err(ModelError::invariant(
                "selection anchor is after its focus",
            ));
        }
        Ok(range)
    }

    /// Validate `selection` and return it in forward order.
    pub fn normalize_selection(
        &self,
        selection: &Selection,
    ) -> Result<Selection, ModelError> {
        let anchor = self.check_point(&selection.anchor)?;
        let focus = self.check_point(&selection.focus)?;
        if (anchor, selection.anchor.offset) > (focus, selection.focus.offset)
        {
            Ok(selection.reversed())
        } else {
            Ok(selection.clone())
        }
    }

    /// A copy of this document with the block at `index` swapped out.
    pub(crate) fn with_block(&self, index: usize, block: Block) -> Self {
        let mut blocks = self.blocks.clone();
        blocks[index] = Arc::new(block);
        Self { blocks }
    }

    /// Byte index of a UTF-16 `offset` into the text of block `index`.
    pub(crate) fn byte_offset(
        &self,
        index: usize,
        offset: usize,
    ) -> Result<usize, ModelError> {
        let block = &self.blocks[index];
        byte_index(&block.text, offset).ok_or_else(|| {
            ModelError::invariant(format!(
                "offset {offset} is not a character boundary in block `{}`",
                block.key
            ))
        })
    }

    /// A key not used by any block in this document.
    pub(crate) fn fresh_key(&self) -> BlockKey {
        let mut n = self.blocks.len();
        loop {
            let candidate = format!("b{n}");
            if self.blocks.iter().all(|b| b.key.as_str() != candidate) {
                return BlockKey(candidate);
            }
            n += 1;
        }
    }
}

/// Length of `text` in UTF-16 code units.
pub(crate) fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Convert a UTF-16 offset into a byte index into `text`.
///
/// Returns `None` when the offset is past the end or falls inside a
/// surrogate pair.
pub(crate) fn byte_index(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, c) in text.char_indices() {
        if units == offset {
            return Some(byte);
        }
        if units > offset {
            return None;
        }
        units += c.len_utf16();
    }
    (units == offset).then_some(text.len())
}

/// Sort, merge and drop empty ranges so each style is stored once per run.
pub(crate) fn normalize_ranges(
    mut ranges: Vec<InlineStyleRange>,
) -> Vec<InlineStyleRange> {
    ranges.retain(|r| r.start < r.end);
    ranges.sort();
    let mut merged: Vec<InlineStyleRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.style == range.style && range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}
