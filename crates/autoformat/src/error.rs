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

//! Error types for the content model, the persistence collaborators and the
//! editing session.

use crate::model::BlockKey;

/// Failures raised by content model operations and the trigger engine.
///
/// None of these ever leave a [`Document`](crate::Document) half-edited:
/// operations build a new snapshot and the candidate is simply dropped when
/// an error is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The persisted form is structurally invalid.
    #[error("cannot deserialize document: {reason}")]
    Deserialization { reason: String },

    /// A selection or operation named a block that is not in the document.
    #[error("block `{key}` not found")]
    NotFound { key: BlockKey },

    /// A selection or range is out of bounds or reversed.
    #[error("invariant violated: {reason}")]
    Invariant { reason: String },
}

impl ModelError {
    pub(crate) fn deserialization(reason: impl Into<String>) -> Self {
        Self::Deserialization {
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::Invariant {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(key: &BlockKey) -> Self {
        Self::NotFound { key: key.clone() }
    }
}

/// Failures raised by a [`PersistenceStore`](crate::PersistenceStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes are not a well-formed serialized document.
    #[error("stored document is malformed: {0}")]
    Malformed(#[from] ModelError),
}

/// Failures surfaced by an [`EditingSession`](crate::EditingSession).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Saving was refused because the document has no visible text.
    #[error("refusing to save a document with no text")]
    EmptyContent,

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A malformed stored document is a model error however it was read.
impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Malformed(e) => SessionError::Model(e),
            e => SessionError::Store(e),
        }
    }
}
