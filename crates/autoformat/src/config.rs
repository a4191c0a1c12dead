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

//! Editing session configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "draftEditorContent";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_PLACEHOLDER: &str =
    "Type # for Heading, * for Bold, ** for Red Line, *** for Underline";

/// Settings for an [`EditingSession`](crate::EditingSession).
///
/// Every field has a default, so a partial (or empty) configuration file
/// deserializes cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Name the document is persisted under.
    pub storage_key: String,
    /// Maximum number of snapshots kept for undo.
    pub history_limit: usize,
    /// Hint shown by front-ends while the document is empty.
    pub placeholder: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

impl ComposerConfig {
    /// The history limit, never less than one snapshot.
    pub fn effective_history_limit(&self) -> usize {
        self.history_limit.max(1)
    }
}
