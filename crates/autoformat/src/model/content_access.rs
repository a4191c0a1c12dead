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

//! Content access: the persisted form and plain text.

use std::collections::HashSet;
use std::str::FromStr;

use super::base::{byte_index, Block, InlineStyleRange};
use super::{BlockKey, Document};
use crate::{
    BlockType, InlineStyle, ModelError, SerializedBlock, SerializedDocument,
    SerializedStyleRange,
};

impl Document {
    /// The lossless persisted form of this document.
    pub fn serialize(&self) -> SerializedDocument {
        SerializedDocument {
            blocks: self
                .blocks()
                .map(|block| SerializedBlock {
                    key: block.key.to_string(),
                    block_type: block.block_type.to_string(),
                    text: block.text.clone(),
                    inline_style_ranges: block
                        .inline_style_ranges
                        .iter()
                        .map(|r| SerializedStyleRange {
                            style: r.style.to_string(),
                            offset_start: r.start,
                            offset_end: r.end,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Rebuild a document from its persisted form.
    ///
    /// Rejects empty documents, empty or duplicate keys, unknown block types
    /// and style names, and style ranges that are empty, out of bounds or
    /// split a surrogate pair.
    pub fn from_serialized(
        data: &SerializedDocument,
    ) -> Result<Document, ModelError> {
        if data.blocks.is_empty() {
            return Err(ModelError::deserialization("document has no blocks"));
        }

        let mut seen = HashSet::new();
        let mut blocks = Vec::with_capacity(data.blocks.len());
        for raw in &data.blocks {
            if raw.key.is_empty() {
                return Err(ModelError::deserialization(
                    "block has an empty key",
                ));
            }
            if !seen.insert(raw.key.as_str()) {
                return Err(ModelError::deserialization(format!(
                    "duplicate block key `{}`",
                    raw.key
                )));
            }
            blocks.push(block_from_serialized(raw)?);
        }
        Ok(Document::from_blocks(blocks))
    }

    /// The text of every block joined by newlines, styles stripped.
    pub fn to_plain_text(&self) -> String {
        self.blocks()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the plain text is empty or whitespace only. A byte order
    /// mark counts as whitespace.
    pub fn is_blank(&self) -> bool {
        self.blocks().all(|b| {
            b.text
                .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
                .is_empty()
        })
    }
}

fn block_from_serialized(raw: &SerializedBlock) -> Result<Block, ModelError> {
    let block_type = BlockType::from_str(&raw.block_type).map_err(|_| {
        ModelError::deserialization(format!(
            "unknown block type `{}` in block `{}`",
            raw.block_type, raw.key
        ))
    })?;

    let ranges = raw
        .inline_style_ranges
        .iter()
        .map(|r| range_from_serialized(raw, r))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Block::new(
        BlockKey::from(raw.key.as_str()),
        block_type,
        raw.text.clone(),
        ranges,
    ))
}

fn range_from_serialized(
    block: &SerializedBlock,
    range: &SerializedStyleRange,
) -> Result<InlineStyleRange, ModelError> {
    let style = InlineStyle::from_str(&range.style).map_err(|_| {
        ModelError::deserialization(format!(
            "unknown inline style `{}` in block `{}`",
            range.style, block.key
        ))
    })?;

    let start = range.offset_start;
    let end = range.offset_end;
    if start >= end
        || byte_index(&block.text, start).is_none()
        || byte_index(&block.text, end).is_none()
    {
        return Err(ModelError::deserialization(format!(
            "style range [{start}, {end}) is out of bounds in block `{}`",
            block.key
        )));
    }
    Ok(InlineStyleRange::new(style, start, end))
}
