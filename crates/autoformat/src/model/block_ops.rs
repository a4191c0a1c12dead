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

//! Block-level operations: switching between paragraph and heading.

use super::base::Block;
use super::Document;
use crate::{BlockKey, BlockType, ModelError};

impl Document {
    /// Set the type of block `key`.
    pub fn set_block_type(
        &self,
        key: &BlockKey,
        block_type: BlockType,
    ) -> Result<Document, ModelError> {
        let index = self
            .block_index(key)
            .ok_or_else(|| ModelError::not_found(key))?;
        let block = &self.blocks[index];
        if block.block_type == block_type {
            return Ok(self.clone());
        }
        let updated = Block {
            block_type,
            ..block.as_ref().clone()
        };
        Ok(self.with_block(index, updated))
    }

    /// Give block `key` the type `block_type`, or turn it back into a
    /// paragraph if it already has that type.
    pub fn toggle_block_type(
        &self,
        key: &BlockKey,
        block_type: BlockType,
    ) -> Result<Document, ModelError> {
        let current = self.block(key)?.block_type;
        let target = if current == block_type {
            BlockType::Paragraph
        } else {
            block_type
        };
        self.set_block_type(key, target)
    }
}
