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

//! A small rich-text composer with markup autoformatting.
//!
//! Typing `#`, `*`, `**` or `***` followed by a space turns the block into a
//! heading or toggles bold, red-line or underline. The [`Document`] model is
//! immutable and every edit yields a new snapshot, which is what
//! [`History`] keeps for undo. [`EditingSession`] ties the model, the
//! trigger engine and persistence together.

mod config;
mod error;
mod history;
mod model;
mod notify;
mod selection;
mod serialized;
mod session;
mod store;
pub mod style_map;
pub mod triggers;

pub use crate::config::{
    ComposerConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_PLACEHOLDER,
    DEFAULT_STORAGE_KEY,
};
pub use crate::error::{ModelError, SessionError, StoreError};
pub use crate::history::{History, Snapshot};
pub use crate::model::{Block, BlockKey, Document, InlineStyleRange, StyledRun};
pub use crate::notify::{
    Notification, NotificationSink, RecordingSink, TracingSink,
};
pub use crate::selection::{Selection, SelectionPoint};
pub use crate::serialized::{
    SerializedBlock, SerializedDocument, SerializedStyleRange,
};
pub use crate::session::EditingSession;
pub use crate::store::{JsonFileStore, MemoryStore, PersistenceStore};
pub use crate::style_map::{
    BlockType, InlineStyle, StyleEffect, StyleSet, STYLE_MAP,
};
pub use crate::triggers::{
    on_before_insert, AutoformatEdit, Trigger, TriggerAction, Verdict,
};
