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

//! Immutable rich-text content model.
//!
//! A [`Document`] is an ordered list of [`Block`]s, each with a key, a
//! [`BlockType`](crate::BlockType), its text and the
//! [`InlineStyleRange`]s painted over it. All offsets are UTF-16 code
//! units. Every operation returns a new snapshot and leaves its receiver
//! untouched, so history is just a list of retained documents.

mod base;
mod block_ops;
mod content_access;
mod formatting;
mod spans_html;
mod text_ops;

pub use base::{Block, BlockKey, Document, InlineStyleRange};
pub(crate) use base::utf16_len;
pub use spans_html::StyledRun;
