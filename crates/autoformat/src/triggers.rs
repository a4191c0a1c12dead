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

//! Markup autoformat triggers.
//!
//! When a space is typed, the text of the block holding the selection start
//! is checked for a trigger sequence. The first match in this order wins:
//!
//! | Trigger | Guard           | Action                       |
//! |---------|-----------------|------------------------------|
//! | `#`     | no `##`         | toggle block to heading-one  |
//! | `*`     | no `**`         | toggle `BOLD`                |
//! | `**`    | no `***`        | toggle `RED-LINE`            |
//! | `***`   |                 | toggle `UNDERLINE`           |
//!
//! The first occurrence of the sequence is deleted and the space itself is
//! swallowed. Inline styles are toggled from where the sequence stood to the
//! end of the block; when nothing follows it, the toggled style is handed
//! back as an override for the next typed characters instead.
//!
//! The sequence may appear anywhere in the block, not only right before the
//! caret, so a stray `*` typed earlier in a line fires on any later space in
//! that line. Callers relying on caret-local triggers need to filter first.

use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{debug, trace};

use crate::model::utf16_len;
use crate::{BlockType, Document, InlineStyle, ModelError, Selection, StyleSet};

/// A recognised markup sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Trigger {
    Heading,
    Bold,
    RedLine,
    Underline,
}

/// What a trigger does once its characters are removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerAction {
    ToggleBlockType(BlockType),
    ToggleInlineStyle(InlineStyle),
}

impl Trigger {
    /// Triggers in the order they are tried.
    pub const PRIORITY: [Trigger; 4] = [
        Trigger::Heading,
        Trigger::Bold,
        Trigger::RedLine,
        Trigger::Underline,
    ];

    /// The literal character sequence.
    pub fn pattern(self) -> &'static str {
        match self {
            Trigger::Heading => "#",
            Trigger::Bold => "*",
            Trigger::RedLine => "**",
            Trigger::Underline => "***",
        }
    }

    /// A longer sequence whose presence disables this trigger.
    fn excluded_by(self) -> Option<&'static str> {
        match self {
            Trigger::Heading => Some("##"),
            Trigger::Bold => Some("**"),
            Trigger::RedLine => Some("***"),
            Trigger::Underline => None,
        }
    }

    pub fn action(self) -> TriggerAction {
        match self {
            Trigger::Heading => {
                TriggerAction::ToggleBlockType(BlockType::HeadingOne)
            }
            Trigger::Bold => TriggerAction::ToggleInlineStyle(InlineStyle::Bold),
            Trigger::RedLine => {
                TriggerAction::ToggleInlineStyle(InlineStyle::RedLine)
            }
            Trigger::Underline => {
                TriggerAction::ToggleInlineStyle(InlineStyle::Underline)
            }
        }
    }

    fn matches(self, text: &str) -> bool {
        text.contains(self.pattern())
            && self.excluded_by().map_or(true, |longer| !text.contains(longer))
    }

    /// The highest priority trigger present in `text`.
    pub fn detect(text: &str) -> Option<Trigger> {
        Self::PRIORITY.into_iter().find(|t| t.matches(text))
    }
}

/// The result of an autoformat: the new snapshot and where the caret goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoformatEdit {
    pub document: Document,
    pub selection: Selection,
    pub trigger: Trigger,
    /// Styles the next typed characters should carry, when the trigger had
    /// no text after it to style.
    pub style_override: Option<StyleSet>,
}

/// What the caller should do with the incoming character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The engine consumed the character and produced a new snapshot.
    Handled(AutoformatEdit),
    /// Insert the character as ordinary text.
    PassThrough,
}

/// Decide what to do with `ch` typed at `selection`.
///
/// Only a space can trigger formatting; any other character passes through
/// without the document being looked at. For a space, the selection must be
/// valid and forward or an invariant error is returned.
pub fn on_before_insert(
    doc: &Document,
    selection: &Selection,
    ch: char,
) -> Result<Verdict, ModelError> {
    if ch != ' ' {
        return Ok(Verdict::PassThrough);
    }

    doc.resolve(selection)?;

    let key = selection.start_key().clone();
    let text = doc.block_text(&key)?;
    let Some(trigger) = Trigger::detect(text) else {
        trace!(block = %key, "no trigger, passing through");
        return Ok(Verdict::PassThrough);
    };

    let pattern = trigger.pattern();
    let Some(byte) = text.find(pattern) else {
        return Ok(Verdict::PassThrough);
    };
    let index = utf16_len(&text[..byte]);
    let len = pattern.len();

    debug!(%trigger, block = %key, index, "autoformat trigger fired");

    let stripped = doc
        .replace_range(&Selection::within(key.clone(), index, index + len), "")?;
    let selection = selection.after_removal(&key, index, len);

    let (document, style_override) = match trigger.action() {
        TriggerAction::ToggleBlockType(block_type) => {
            (stripped.toggle_block_type(&key, block_type)?, None)
        }
        TriggerAction::ToggleInlineStyle(style) => {
            let end = stripped.block(&key)?.len();
            if index < end {
                let span = Selection::within(key.clone(), index, end);
                (stripped.toggle_inline_style(&span, style)?, None)
            } else {
                let mut styles = stripped.styles_before(&selection)?;
                if !styles.remove(&style) {
                    styles.insert(style);
                }
                (stripped, Some(styles))
            }
        }
    };

    Ok(Verdict::Handled(AutoformatEdit {
        document,
        selection,
        trigger,
        style_override,
    }))
}
