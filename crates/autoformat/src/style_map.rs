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

//! Inline styles, block types and the style map used to paint them.
//!
//! | Style       | Persisted name | Visual effect              |
//! |-------------|----------------|----------------------------|
//! | Bold        | `"BOLD"`       | `font-weight: bold`        |
//! | Red line    | `"RED-LINE"`   | `color: red`               |
//! | Underline   | `"UNDERLINE"`  | `text-decoration: underline` |
//!
//! Block types persist as `"paragraph"` and `"heading-one"`. The older
//! `"unstyled"` / `"header-one"` names are accepted when reading.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A character-level style that may be applied to a run of text.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub enum InlineStyle {
    #[strum(serialize = "BOLD")]
    Bold,
    #[strum(serialize = "RED-LINE")]
    RedLine,
    #[strum(serialize = "UNDERLINE")]
    Underline,
}

/// The set of inline styles carried by a character.
pub type StyleSet = BTreeSet<InlineStyle>;

/// The block-level type of a [`Block`](crate::Block).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub enum BlockType {
    #[default]
    #[strum(to_string = "paragraph", serialize = "unstyled")]
    Paragraph,
    #[strum(to_string = "heading-one", serialize = "header-one")]
    HeadingOne,
}

impl BlockType {
    /// The HTML element a rendering layer should use for this block.
    pub fn html_tag(self) -> &'static str {
        match self {
            BlockType::Paragraph => "p",
            BlockType::HeadingOne => "h1",
        }
    }
}

/// A single CSS declaration painting one inline style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleEffect {
    pub property: &'static str,
    pub value: &'static str,
}

impl StyleEffect {
    pub fn css(&self) -> String {
        format!("{}: {}", self.property, self.value)
    }
}

/// Process-wide mapping from inline style to its visual effect.
pub static STYLE_MAP: Lazy<HashMap<InlineStyle, StyleEffect>> =
    Lazy::new(|| {
        HashMap::from([
            (
                InlineStyle::Bold,
                StyleEffect {
                    property: "font-weight",
                    value: "bold",
                },
            ),
            (
                InlineStyle::RedLine,
                StyleEffect {
                    property: "color",
                    value: "red",
                },
            ),
            (
                InlineStyle::Underline,
                StyleEffect {
                    property: "text-decoration",
                    value: "underline",
                },
            ),
        ])
    });

impl InlineStyle {
    /// Look up this style in [`STYLE_MAP`].
    pub fn effect(self) -> StyleEffect {
        // Every variant is registered in STYLE_MAP.
        STYLE_MAP[&self]
    }
}

/// Render a set of styles as an inline CSS declaration list.
pub fn css_for(styles: &StyleSet) -> String {
    styles
        .iter()
        .map(|s| s.effect().css())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_style_has_an_effect() {
        for style in InlineStyle::iter() {
            assert!(STYLE_MAP.contains_key(&style), "missing {style}");
        }
    }

    #[test]
    fn style_names_match_persisted_form() {
        assert_eq!(InlineStyle::Bold.to_string(), "BOLD");
        assert_eq!(InlineStyle::RedLine.to_string(), "RED-LINE");
        assert_eq!(InlineStyle::Underline.to_string(), "UNDERLINE");
        assert_eq!(
            InlineStyle::from_str("RED-LINE"),
            Ok(InlineStyle::RedLine)
        );
        assert!(InlineStyle::from_str("ITALIC").is_err());
    }

    #[test]
    fn block_types_accept_legacy_names() {
        assert_eq!(BlockType::HeadingOne.to_string(), "heading-one");
        assert_eq!(
            BlockType::from_str("header-one"),
            Ok(BlockType::HeadingOne)
        );
        assert_eq!(BlockType::from_str("unstyled"), Ok(BlockType::Paragraph));
        assert_eq!(BlockType::Paragraph.to_string(), "paragraph");
    }

    #[test]
    fn css_joins_effects_in_style_order() {
        let styles =
            StyleSet::from([InlineStyle::Underline, InlineStyle::Bold]);
        assert_eq!(
            css_for(&styles),
            "font-weight: bold; text-decoration: underline"
        );
    }
}
