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

use autoformat::{
    on_before_insert, BlockKey, Document, InlineStyle, Selection,
    SerializedDocument, StyleSet, Trigger, Verdict,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn model_with_text(text: &str) -> Document {
    let doc = Document::create_empty();
    doc.replace_range(&doc.selection_at_start(), text).unwrap()
}

/// UTF-16 offsets of every character boundary in `text`.
fn boundaries(text: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    let mut n = 0;
    for c in text.chars() {
        n += c.len_utf16();
        offsets.push(n);
    }
    offsets
}

fn span(text: &str, a: &Index, b: &Index) -> (usize, usize) {
    let bounds = boundaries(text);
    let (a, b) = (*a.get(&bounds), *b.get(&bounds));
    (a.min(b), a.max(b))
}

fn any_style() -> impl Strategy<Value = InlineStyle> {
    prop_oneof![
        Just(InlineStyle::Bold),
        Just(InlineStyle::RedLine),
        Just(InlineStyle::Underline),
    ]
}

/// Plain text that may include astral characters.
fn any_text() -> impl Strategy<Value = String> {
    "[a-z é😀]{0,16}"
}

/// A single-block document with a handful of styles painted on it.
fn styled_doc() -> impl Strategy<Value = (String, Document)> {
    (
        any_text(),
        prop::collection::vec((any::<Index>(), any::<Index>(), any_style()), 0..4),
    )
        .prop_map(|(text, toggles)| {
            let mut doc = model_with_text(&text);
            for (a, b, style) in toggles {
                let (start, end) = span(&text, &a, &b);
                doc = doc
                    .toggle_inline_style(&Selection::within("b0", start, end), style)
                    .unwrap();
            }
            (text, doc)
        })
}

/// A styled document, optionally split in two somewhere.
fn any_doc() -> impl Strategy<Value = Document> {
    (styled_doc(), any::<Option<Index>>()).prop_map(|((text, doc), split)| {
        match split {
            Some(at) => {
                let offset = *at.get(&boundaries(&text));
                doc.split_block(&Selection::collapsed("b0", offset))
                    .unwrap()
                    .0
            }
            None => doc,
        }
    })
}

proptest! {
    #[test]
    fn serialized_form_round_trips(doc in any_doc()) {
        let restored = Document::from_serialized(&doc.serialize()).unwrap();
        prop_assert_eq!(&restored, &doc);

        let json = doc.serialize().to_json().unwrap();
        let parsed = SerializedDocument::from_json(&json).unwrap();
        prop_assert_eq!(Document::from_serialized(&parsed).unwrap(), doc);
    }

    #[test]
    fn space_without_trigger_characters_passes_through(
        text in "[^#*]{0,20}",
        caret in any::<Index>(),
    ) {
        let doc = model_with_text(&text);
        let offset = *caret.get(&boundaries(&text));
        let verdict =
            on_before_insert(&doc, &Selection::collapsed("b0", offset), ' ');
        prop_assert_eq!(verdict, Ok(Verdict::PassThrough));
    }

    #[test]
    fn non_space_characters_always_pass_through(
        text in "[#* a-z]{0,12}",
        ch in any::<char>().prop_filter("not a space", |c| *c != ' '),
    ) {
        let doc = model_with_text(&text);
        let verdict = on_before_insert(&doc, &doc.selection_at_end(), ch);
        prop_assert_eq!(verdict, Ok(Verdict::PassThrough));
    }

    #[test]
    fn bold_trigger_reindexes_existing_styles(
        pre in "[a-z ]{0,10}",
        post in "[a-z ]{0,10}",
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let text = format!("{pre}*{post}");
        let (start, end) = span(&text, &a, &b);
        let doc = model_with_text(&text)
            .toggle_inline_style(
                &Selection::within("b0", start, end),
                InlineStyle::Underline,
            )
            .unwrap();
        let key = BlockKey::from("b0");
        let before: Vec<StyleSet> = (0..text.len())
            .map(|i| doc.inline_styles_at(&key, i).unwrap())
            .collect();

        let Ok(Verdict::Handled(edit)) =
            on_before_insert(&doc, &doc.selection_at_end(), ' ')
        else {
            panic!("expected the bold trigger to fire");
        };
        prop_assert_eq!(edit.trigger, Trigger::Bold);
        prop_assert_eq!(edit.document.to_plain_text(), format!("{pre}{post}"));
        prop_assert_eq!(
            edit.selection,
            Selection::collapsed("b0", pre.len() + post.len())
        );

        let trigger_at = pre.len();
        for i in 0..pre.len() + post.len() {
            let original = if i < trigger_at { i } else { i + 1 };
            let after = edit.document.inline_styles_at(&key, i).unwrap();
            prop_assert_eq!(
                after.contains(&InlineStyle::Underline),
                before[original].contains(&InlineStyle::Underline)
            );
            prop_assert_eq!(after.contains(&InlineStyle::Bold), i >= trigger_at);
        }
        prop_assert_eq!(edit.style_override.is_some(), post.is_empty());
    }

    #[test]
    fn replace_range_shifts_styles_after_the_edit(
        (text, doc) in styled_doc(),
        a in any::<Index>(),
        b in any::<Index>(),
        replacement in "[a-z😀]{0,4}",
    ) {
        let (start, end) = span(&text, &a, &b);
        let inserted: usize = replacement.chars().map(char::len_utf16).sum();
        let delta = inserted as isize - (end - start) as isize;
        let edited = doc
            .replace_range(&Selection::within("b0", start, end), &replacement)
            .unwrap();
        let key = BlockKey::from("b0");

        let old_len = doc.first_block().len();
        for offset in boundaries(&text).into_iter().filter(|&o| o < old_len) {
            let before = doc.inline_styles_at(&key, offset).unwrap();
            if offset < start {
                prop_assert_eq!(edited.inline_styles_at(&key, offset).unwrap(), before);
            } else if offset >= end {
                let moved = (offset as isize + delta) as usize;
                prop_assert_eq!(edited.inline_styles_at(&key, moved).unwrap(), before);
            }
        }
        for offset in boundaries(&replacement)
            .into_iter()
            .filter(|&o| o < inserted)
        {
            prop_assert!(edited.inline_styles_at(&key, start + offset).unwrap().is_empty());
        }
    }

    #[test]
    fn toggling_twice_returns_to_a_uniform_state(
        (text, doc) in styled_doc(),
        a in any::<Index>(),
        b in any::<Index>(),
        style in any_style(),
    ) {
        let (start, end) = span(&text, &a, &b);
        let sel = Selection::within("b0", start, end);
        let once = doc.toggle_inline_style(&sel, style).unwrap();
        let thrice = once
            .toggle_inline_style(&sel, style)
            .and_then(|d| d.toggle_inline_style(&sel, style))
            .unwrap();
        prop_assert_eq!(thrice, once);
    }

    #[test]
    fn toggling_an_absent_style_twice_is_a_no_op(
        text in any_text(),
        a in any::<Index>(),
        b in any::<Index>(),
        style in any_style(),
    ) {
        let doc = model_with_text(&text);
        let (start, end) = span(&text, &a, &b);
        let sel = Selection::within("b0", start, end);
        let twice = doc
            .toggle_inline_style(&sel, style)
            .and_then(|d| d.toggle_inline_style(&sel, style))
            .unwrap();
        prop_assert_eq!(twice, doc);
    }
}
