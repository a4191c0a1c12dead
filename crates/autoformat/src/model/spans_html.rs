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

//! Rendering a document to HTML using the style map.
//!
//! - `paragraph`   → `<p>…</p>`
//! - `heading-one` → `<h1>…</h1>`
//!
//! Each run of characters sharing the same style set becomes one
//! `<span style="…">` carrying the CSS from
//! [`STYLE_MAP`](crate::STYLE_MAP). Unstyled runs are emitted bare.

use std::collections::BTreeSet;

use super::base::{byte_index, Block};
use super::Document;
use crate::style_map::css_for;

/// A maximal run of identically styled text within a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub styles: crate::StyleSet,
}

impl Block {
    /// Split the block text into runs at every style boundary.
    pub fn styled_runs(&self) -> Vec<StyledRun<'_>> {
        let mut bounds: BTreeSet<usize> = BTreeSet::from([0, self.len()]);
        for range in &self.inline_style_ranges {
            bounds.insert(range.start);
            bounds.insert(range.end);
        }

        let bounds: Vec<usize> = bounds.into_iter().collect();
        bounds
            .windows(2)
            .filter_map(|pair| {
                let (start, end) = (pair[0], pair[1]);
                let from = byte_index(&self.text, start)?;
                let to = byte_index(&self.text, end)?;
                Some(StyledRun {
                    text: &self.text[from..to],
                    start,
                    end,
                    styles: self.styles_at(start),
                })
            })
            .collect()
    }
}

impl Document {
    /// Render every block as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for block in self.blocks() {
            let tag = block.block_type.html_tag();
            html.push('<');
            html.push_str(tag);
            html.push('>');
            for run in block.styled_runs() {
                let text = html_escape::encode_text(run.text);
                if run.styles.is_empty() {
                    html.push_str(&text);
                } else {
                    html.push_str("<span style=\"");
                    html.push_str(&html_escape::encode_double_quoted_attribute(
                        &css_for(&run.styles),
                    ));
                    html.push_str("\">");
                    html.push_str(&text);
                    html.push_str("</span>");
                }
            }
            html.push_str("</");
            html.push_str(tag);
            html.push('>');
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use crate::InlineStyle::{Bold, RedLine, Underline};
    use crate::{BlockKey, BlockType, Document, Selection, StyleSet};

    fn doc_with_text(text: &str) -> Document {
        let doc = Document::create_empty();
        doc.replace_range(&doc.selection_at_start(), text).unwrap()
    }

    #[test]
    fn empty_document_is_an_empty_paragraph() {
        assert_eq!(Document::create_empty().to_html(), "<p></p>");
    }

    #[test]
    fn headings_render_as_h1() {
        let doc = doc_with_text("Title")
            .toggle_block_type(&BlockKey::from("b0"), BlockType::HeadingOne)
            .unwrap();
        assert_eq!(doc.to_html(), "<h1>Title</h1>");
    }

    #[test]
    fn styled_runs_render_as_spans() {
        let doc = doc_with_text("Hello world")
            .toggle_inline_style(&Selection::within("b0", 6, 11), Bold)
            .unwrap();
        assert_eq!(
            doc.to_html(),
            r#"<p>Hello <span style="font-weight: bold">world</span></p>"#
        );
    }

    #[test]
    fn overlapping_styles_split_runs() {
        let doc = doc_with_text("abcd")
            .toggle_inline_style(&Selection::within("b0", 0, 3), RedLine)
            .unwrap()
            .toggle_inline_style(&Selection::within("b0", 2, 4), Underline)
            .unwrap();
        let runs = doc.first_block().styled_runs();
        let summary: Vec<(&str, StyleSet)> =
            runs.iter().map(|r| (r.text, r.styles.clone())).collect();
        assert_eq!(
            summary,
            vec![
                ("ab", StyleSet::from([RedLine])),
                ("c", StyleSet::from([RedLine, Underline])),
                ("d", StyleSet::from([Underline])),
            ]
        );
        assert_eq!(
            doc.to_html(),
            "<p><span style=\"color: red\">ab</span>\
             <span style=\"color: red; text-decoration: underline\">c</span>\
             <span style=\"text-decoration: underline\">d</span></p>"
        );
    }

    #[test]
    fn text_is_escaped() {
        let doc = doc_with_text("a < b & c");
        assert_eq!(doc.to_html(), "<p>a &lt; b &amp; c</p>");
    }
}
