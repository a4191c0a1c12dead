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

//! Inline formatting: bold, red line, underline.
//!
//! Toggling decides once for the whole selection: if every selected
//! character already carries the style it is removed everywhere, otherwise
//! it is applied everywhere.

use super::base::{Block, InlineStyleRange, ResolvedRange};
use super::Document;
use crate::{BlockKey, InlineStyle, ModelError, Selection, StyleSet};

impl Block {
    /// Whether `style` covers every code unit in `[lo, hi)`.
    pub(crate) fn covers(&self, style: InlineStyle, lo: usize, hi: usize) -> bool {
        lo >= hi
            || self
                .inline_style_ranges
                .iter()
                .any(|r| r.style == style && r.start <= lo && hi <= r.end)
    }

    fn with_style(&self, style: InlineStyle, lo: usize, hi: usize) -> Block {
        let mut ranges = self.inline_style_ranges.clone();
        ranges.push(InlineStyleRange::new(style, lo, hi));
        Block::new(self.key.clone(), self.block_type, self.text.clone(), ranges)
    }

    fn without_style(&self, style: InlineStyle, lo: usize, hi: usize) -> Block {
        let mut ranges = Vec::with_capacity(self.inline_style_ranges.len() + 1);
        for range in &self.inline_style_ranges {
            if range.style != style || range.end <= lo || hi <= range.start {
                ranges.push(*range);
                continue;
            }
            if range.start < lo {
                ranges.push(InlineStyleRange::new(style, range.start, lo));
            }
            if hi < range.end {
                ranges.push(InlineStyleRange::new(style, hi, range.end));
            }
        }
        Block::new(self.key.clone(), self.block_type, self.text.clone(), ranges)
    }

    /// Styles carried by the code unit at `offset`.
    pub fn styles_at(&self, offset: usize) -> StyleSet {
        self.inline_style_ranges
            .iter()
            .filter(|r| r.contains(offset))
            .map(|r| r.style)
            .collect()
    }
}

impl Document {
    /// The non-empty `(block index, lo, hi)` spans a resolved range covers.
    fn spans(&self, range: &ResolvedRange) -> Vec<(usize, usize, usize)> {
        (range.start_block..=range.end_block)
            .filter_map(|index| {
                let lo = if index == range.start_block { range.start } else { 0 };
                let hi = if index == range.end_block {
                    range.end
                } else {
                    self.blocks[index].len()
                };
                (lo < hi).then_some((index, lo, hi))
            })
            .collect()
    }

    /// Whether every character in `selection` carries `style`.
    pub fn has_inline_style(
        &self,
        selection: &Selection,
        style: InlineStyle,
    ) -> Result<bool, ModelError> {
        let range = self.resolve(selection)?;
        Ok(self
            .spans(&range)
            .into_iter()
            .all(|(index, lo, hi)| self.blocks[index].covers(style, lo, hi)))
    }

    /// Toggle `style` over `selection`.
    ///
    /// A collapsed selection contains no characters and leaves the document
    /// unchanged.
    pub fn toggle_inline_style(
        &self,
        selection: &Selection,
        style: InlineStyle,
    ) -> Result<Document, ModelError> {
        let range = self.resolve(selection)?;
        let spans = self.spans(&range);
        if spans.is_empty() {
            return Ok(self.clone());
        }

        let is_active = spans
            .iter()
            .all(|&(index, lo, hi)| self.blocks[index].covers(style, lo, hi));

        let mut doc = self.clone();
        for (index, lo, hi) in spans {
            let block = &self.blocks[index];
            let updated = if is_active {
                block.without_style(style, lo, hi)
            } else {
                block.with_style(style, lo, hi)
            };
            doc = doc.with_block(index, updated);
        }
        Ok(doc)
    }

    /// Styles carried by the character at `offset` in block `key`.
    pub fn inline_styles_at(
        &self,
        key: &BlockKey,
        offset: usize,
    ) -> Result<StyleSet, ModelError> {
        let block = self.block(key)?;
        if offset >= block.len() {
            return Err(ModelError::invariant(format!(
                "no character at offset {offset} in block `{key}`"
            )));
        }
        Ok(block.styles_at(offset))
    }

    /// Styles that text typed at `selection` should inherit: those of the
    /// character just before the caret.
    pub fn styles_before(
        &self,
        selection: &Selection,
    ) -> Result<StyleSet, ModelError> {
        let range = self.resolve(selection)?;
        let block = &self.blocks[range.start_block];
        Ok(match range.start {
            0 => StyleSet::new(),
            offset => block.styles_at(offset - 1),
        })
    }
}
