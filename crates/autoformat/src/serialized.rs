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

//! The persisted document format.
//!
//! ```json
//! {
//!   "blocks": [
//!     {
//!       "key": "b0",
//!       "blockType": "heading-one",
//!       "text": "Hello world",
//!       "inlineStyleRanges": [
//!         { "style": "BOLD", "offsetStart": 6, "offsetEnd": 11 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Draft-style documents that carry the block type under `type` are read
//! as well; they are always written back with `blockType`.
//!
//! Names are kept as strings here so that unknown styles or block types
//! reach [`Document::from_serialized`](crate::Document::from_serialized)
//! and are reported as deserialization errors rather than JSON errors.

use serde::{Deserialize, Serialize};

use crate::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDocument {
    pub blocks: Vec<SerializedBlock>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedBlock {
    pub key: String,
    #[serde(rename = "blockType", alias = "type")]
    pub block_type: String,
    pub text: String,
    #[serde(default)]
    pub inline_style_ranges: Vec<SerializedStyleRange>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedStyleRange {
    pub style: String,
    pub offset_start: usize,
    pub offset_end: usize,
}

impl SerializedDocument {
    /// Parse the JSON form. Malformed JSON is a deserialization error.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json)
            .map_err(|e| ModelError::deserialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
