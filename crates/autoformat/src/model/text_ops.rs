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

//! Text editing operations: replace_range, insert_text, split_block,
//! backspace.
//!
//! Every operation returns a new [`Document`]; the receiver is never
//! touched. Style ranges are re-indexed against the edit: ranges before the
//! edit point stay put, ranges after it move by the length delta, and ranges
//! overlapping the removed span keep only their surviving parts. Inserted
//! text carries no style unless the caller asks for one.

use std::sync::Arc;

use super::base::{utf16_len, Block, InlineStyleRange, ResolvedRange};
use super::Document;
use crate::{
    BlockType, ModelError, Selection, SelectionPoint, StyleSet,
};

/// Keep the part of `range` inside `[lo, hi)`.
fn clip(range: &InlineStyleRange, lo: usize, hi: usize) -> Option<InlineStyleRange> {
    let start = range.start.max(lo);
    let end = range.end.min(hi);
    (start < end).then(|| InlineStyleRange::new(range.style, start, end))
}

/// Move a range that starts at or after `from` so that `from` lands on `to`.
fn rebase(range: InlineStyleRange, from: usize, to: usize) -> InlineStyleRange {
    InlineStyleRange::new(
        range.style,
        range.start - from + to,
        range.end - from + to,
    )
}

impl Document {
    /// Delete the text spanned by `selection` and insert `replacement` in
    /// its place.
    ///
    /// A selection spanning several blocks merges the tail of the last block
    /// into the first one, which keeps its key and type.
    pub fn replace_range(
        &self,
        selection: &Selection,
        replacement: &str,
    ) -> Result<Document, ModelError> {
        self.splice(selection, replacement).map(|(doc, _)| doc)
    }

    /// [`Self::replace_range`], also returning the caret after the
    /// inserted text.
    pub(crate) fn splice(
        &self,
        selection: &Selection,
        replacement: &str,
    ) -> Result<(Document, Selection), ModelError> {
        let range = self.resolve(selection)?;
        self.splice_resolved(&range, replacement)
    }

    fn splice_resolved(
        &self,
        range: &ResolvedRange,
        replacement: &str,
    ) -> Result<(Document, Selection), ModelError> {
        let first = &self.blocks[range.start_block];
        let last = &self.blocks[range.end_block];
        let head_end = self.byte_offset(range.start_block, range.start)?;
        let tail_start = self.byte_offset(range.end_block, range.end)?;

        let mut text = String::with_capacity(
            head_end + replacement.len() + last.text.len() - tail_start,
        );
        text.push_str(&first.text[..head_end]);
        text.push_str(replacement);
        text.push_str(&last.text[tail_start..]);

        let caret = range.start + utf16_len(replacement);
        let mut ranges: Vec<InlineStyleRange> = first
            .inline_style_ranges
            .iter()
            .filter_map(|r| clip(r, 0, range.start))
            .collect();
        ranges.extend(
            last.inline_style_ranges
                .iter()
                .filter_map(|r| clip(r, range.end, usize::MAX))
                .map(|r| rebase(r, range.end, caret)),
        );

        let merged =
            Block::new(first.key.clone(), first.block_type, text, ranges);
        let key = merged.key.clone();

        let mut blocks = Vec::with_capacity(
            self.blocks.len() - (range.end_block - range.start_block),
        );
        blocks.extend(self.blocks[..range.start_block].iter().cloned());
        blocks.push(Arc::new(merged));
        blocks.extend(self.blocks[range.end_block + 1..].iter().cloned());

        Ok((Document { blocks }, Selection::collapsed(key, caret)))
    }

    /// Replace `selection` with `text` and give the inserted characters
    /// `styles`. This is the ordinary typing path.
    pub fn insert_text(
        &self,
        selection: &Selection,
        text: &str,
        styles: &StyleSet,
    ) -> Result<(Document, Selection), ModelError> {
        let (doc, caret) = self.splice(selection, text)?;
        if text.is_empty() || styles.is_empty() {
            return Ok((doc, caret));
        }

        let index = doc.check_point(&caret.anchor)?;
        let block = &doc.blocks[index];
        let end = caret.anchor.offset;
        let start = end - utf16_len(text);
        let mut ranges = block.inline_style_ranges.clone();
        ranges.extend(
            styles
                .iter()
                .map(|style| InlineStyleRange::new(*style, start, end)),
        );
        let styled = Block::new(
            block.key.clone(),
            block.block_type,
            block.text.clone(),
            ranges,
        );
        Ok((doc.with_block(index, styled), caret))
    }

    /// Delete the selection, then split its block at the caret (Enter).
    ///
    /// The new block gets a fresh key and the caret moves to its start.
    /// Splitting a heading at its end starts a plain paragraph; otherwise
    /// both halves keep the original block type.
    pub fn split_block(
        &self,
        selection: &Selection,
    ) -> Result<(Document, Selection), ModelError> {
        let (doc, caret) = self.splice(selection, "")?;
        let index = doc.check_point(&caret.anchor)?;
        let block = &doc.blocks[index];
        let at = caret.anchor.offset;
        let byte = doc.byte_offset(index, at)?;

        let head_ranges = block
            .inline_style_ranges
            .iter()
            .filter_map(|r| clip(r, 0, at))
            .collect();
        let tail_ranges = block
            .inline_style_ranges
            .iter()
            .filter_map(|r| clip(r, at, usize::MAX))
            .map(|r| rebase(r, at, 0))
            .collect();

        let tail_type = if at == block.len()
            && block.block_type == BlockType::HeadingOne
        {
            BlockType::Paragraph
        } else {
            block.block_type
        };

        let key = doc.fresh_key();
        let head = Block::new(
            block.key.clone(),
            block.block_type,
            block.text[..byte].to_owned(),
            head_ranges,
        );
        let tail = Block::new(
            key.clone(),
            tail_type,
            block.text[byte..].to_owned(),
            tail_ranges,
        );

        let mut blocks = doc.blocks.clone();
        blocks[index] = Arc::new(head);
        blocks.insert(index + 1, Arc::new(tail));
        Ok((Document { blocks }, Selection::collapsed(key, 0)))
    }

    /// Delete backward from the caret, or delete the selection if it is a
    /// range.
    ///
    /// At the start of a heading the block falls back to a paragraph; at
    /// the start of a paragraph it merges into the previous block.
    pub fn backspace(
        &self,
        selection: &Selection,
    ) -> Result<(Document, Selection), ModelError> {
        let range = self.resolve(selection)?;
        if !range.is_collapsed() {
            return self.splice_resolved(&range, "");
        }

        let block = &self.blocks[range.start_block];
        if range.start > 0 {
            let width = unit_width_before(&block.text, range.start);
            let removal = ResolvedRange {
                start: range.start - width,
                ..range
            };
            return self.splice_resolved(&removal, "");
        }

        if block.block_type != BlockType::Paragraph {
            let doc = self.set_block_type(&block.key, BlockType::Paragraph)?;
            return Ok((doc, selection.clone()));
        }

        if range.start_block == 0 {
            return Ok((self.clone(), selection.clone()));
        }

        let previous = &self.blocks[range.start_block - 1];
        let join = Selection::new(
            SelectionPoint::new(previous.key.clone(), previous.len()),
            SelectionPoint::new(block.key.clone(), 0),
        );
        self.splice(&join, "")
    }
}

/// Width in UTF-16 units of the character ending at `offset`.
fn unit_width_before(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for c in text.chars() {
        let width = c.len_utf16();
        if units + width == offset {
            return width;
        }
        units += width;
        if units > offset {
            break;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use crate::InlineStyle::{Bold, RedLine, Underline};
    use crate::{
        BlockKey, BlockType, Document, InlineStyle, InlineStyleRange,
        ModelError, Selection, SelectionPoint, StyleSet,
    };

    fn doc_with_text(text: &str) -> Document {
        let doc = Document::create_empty();
        doc.replace_range(&doc.selection_at_start(), text).unwrap()
    }

    fn styled(text: &str, ranges: &[(InlineStyle, usize, usize)]) -> Document {
        let mut doc = doc_with_text(text);
        for (style, start, end) in ranges {
            doc = doc
                .toggle_inline_style(&Selection::within("b0", *start, *end), *style)
                .unwrap();
        }
        doc
    }

    fn ranges(doc: &Document) -> Vec<(InlineStyle, usize, usize)> {
        doc.first_block()
            .inline_style_ranges()
            .iter()
            .map(|r| (r.style, r.start, r.end))
            .collect()
    }

    fn texts(doc: &Document) -> Vec<&str> {
        doc.blocks().map(|b| b.text()).collect()
    }

    // ===================================================================
    // replace_range
    // ===================================================================

    #[test]
    fn inserting_into_an_empty_document() {
        let doc = doc_with_text("abc");
        assert_eq!(texts(&doc), vec!["abc"]);
    }

    #[test]
    fn replacing_a_selection_with_text() {
        let doc = doc_with_text("abcdefghi");
        let doc = doc
            .replace_range(&Selection::within("b0", 3, 6), "Z")
            .unwrap();
        assert_eq!(texts(&doc), vec!["abcZghi"]);
    }

    #[test]
    fn replace_range_never_mutates_its_input() {
        let before = doc_with_text("abc");
        let after = before
            .replace_range(&Selection::within("b0", 0, 1), "")
            .unwrap();
        assert_eq!(texts(&before), vec!["abc"]);
        assert_eq!(texts(&after), vec!["bc"]);
    }

    #[test]
    fn ranges_before_the_edit_are_unchanged() {
        let doc = styled("hello world", &[(Bold, 0, 3)]);
        let doc = doc
            .replace_range(&Selection::within("b0", 6, 8), "")
            .unwrap();
        assert_eq!(ranges(&doc), vec![(Bold, 0, 3)]);
    }

    #[test]
    fn ranges_after_a_deletion_shift_left() {
        let doc = styled("hello world", &[(Bold, 6, 11)]);
        let doc = doc
            .replace_range(&Selection::within("b0", 1, 3), "")
            .unwrap();
        assert_eq!(ranges(&doc), vec![(Bold, 4, 9)]);
    }

    #[test]
    fn ranges_after_an_insertion_shift_right() {
        let doc = styled("hello world", &[(RedLine, 6, 11)]);
        let doc = doc
            .replace_range(&Selection::collapsed("b0", 0), ">> ")
            .unwrap();
        assert_eq!(ranges(&doc), vec![(RedLine, 9, 14)]);
    }

    #[test]
    fn ranges_overlapping_a_deletion_are_truncated() {
        let doc = styled("abcdefgh", &[(Bold, 1, 4), (Underline, 5, 8)]);
        let doc = doc
            .replace_range(&Selection::within("b0", 3, 6), "")
            .unwrap();
        assert_eq!(texts(&doc), vec!["abcgh"]);
        assert_eq!(ranges(&doc), vec![(Bold, 1, 3), (Underline, 3, 5)]);
    }

    #[test]
    fn range_entirely_deleted_disappears() {
        let doc = styled("abcdef", &[(Bold, 2, 4)]);
        let doc = doc
            .replace_range(&Selection::within("b0", 1, 5), "")
            .unwrap();
        assert!(ranges(&doc).is_empty());
    }

    #[test]
    fn inserted_text_inside_a_range_is_unstyled() {
        let doc = styled("abcd", &[(Bold, 0, 4)]);
        let doc = doc
            .replace_range(&Selection::collapsed("b0", 2), "XY")
            .unwrap();
        assert_eq!(texts(&doc), vec!["abXYcd"]);
        assert_eq!(ranges(&doc), vec![(Bold, 0, 2), (Bold, 4, 6)]);
    }

    #[test]
    fn offsets_are_utf16_code_units() {
        // \u{1F4A9} is 2 UTF-16 code units
        let doc = styled("\u{1F4A9}ab", &[(Bold, 2, 4)]);
        let doc = doc
            .replace_range(&Selection::within("b0", 0, 2), "")
            .unwrap();
        assert_eq!(texts(&doc), vec!["ab"]);
        assert_eq!(ranges(&doc), vec![(Bold, 0, 2)]);
    }

    #[test]
    fn offset_inside_a_surrogate_pair_is_rejected() {
        let doc = doc_with_text("\u{1F4A9}");
        let result = doc.replace_range(&Selection::collapsed("b0", 1), "x");
        assert!(matches!(result, Err(ModelError::Invariant { .. })));
    }

    #[test]
    fn unknown_block_is_not_found() {
        let doc = doc_with_text("abc");
        let result = doc.replace_range(&Selection::collapsed("nope", 0), "x");
        assert_eq!(
            result,
            Err(ModelError::NotFound {
                key: BlockKey::from("nope")
            })
        );
    }

    #[test]
    fn replacing_across_blocks_merges_them() {
        let doc = doc_with_text("hello");
        let (doc, _) = doc.split_block(&Selection::collapsed("b0", 5)).unwrap();
        let second = doc.last_block().key().clone();
        let doc = doc
            .replace_range(&Selection::collapsed(second.clone(), 0), "world")
            .unwrap();
        let doc = doc
            .toggle_inline_style(&Selection::within(second.clone(), 0, 5), Bold)
            .unwrap();

        let sel = Selection::new(
            SelectionPoint::new("b0", 3),
            SelectionPoint::new(second, 2),
        );
        let doc = doc.replace_range(&sel, "-").unwrap();
        assert_eq!(texts(&doc), vec!["hel-rld"]);
        assert_eq!(doc.first_block().key(), &BlockKey::from("b0"));
        assert_eq!(ranges(&doc), vec![(Bold, 4, 7)]);
    }

    // ===================================================================
    // insert_text
    // ===================================================================

    #[test]
    fn insert_text_applies_requested_styles() {
        let doc = doc_with_text("ab");
        let (doc, caret) = doc
            .insert_text(
                &Selection::collapsed("b0", 1),
                "XYZ",
                &StyleSet::from([Underline]),
            )
            .unwrap();
        assert_eq!(texts(&doc), vec!["aXYZb"]);
        assert_eq!(ranges(&doc), vec![(Underline, 1, 4)]);
        assert_eq!(caret, Selection::collapsed("b0", 4));
    }

    #[test]
    fn insert_text_extends_an_adjacent_range_of_the_same_style() {
        let doc = styled("ab", &[(Bold, 0, 2)]);
        let (doc, _) = doc
            .insert_text(
                &Selection::collapsed("b0", 2),
                "c",
                &StyleSet::from([Bold]),
            )
            .unwrap();
        assert_eq!(
            doc.first_block().inline_style_ranges(),
            &[InlineStyleRange::new(Bold, 0, 3)]
        );
    }

    // ===================================================================
    // split_block
    // ===================================================================

    #[test]
    fn split_block_moves_tail_and_its_styles() {
        let doc = styled("abcdef", &[(Bold, 2, 5)]);
        let (doc, caret) =
            doc.split_block(&Selection::collapsed("b0", 3)).unwrap();
        assert_eq!(texts(&doc), vec!["abc", "def"]);
        let second = doc.last_block();
        assert_eq!(caret, Selection::collapsed(second.key().clone(), 0));
        assert_eq!(ranges(&doc), vec![(Bold, 2, 3)]);
        assert_eq!(
            second.inline_style_ranges(),
            &[InlineStyleRange::new(Bold, 0, 2)]
        );
    }

    #[test]
    fn split_block_generates_unique_keys() {
        let doc = doc_with_text("abc");
        let (doc, _) = doc.split_block(&Selection::collapsed("b0", 1)).unwrap();
        let (doc, _) = doc.split_block(&Selection::collapsed("b0", 1)).unwrap();
        let mut keys: Vec<_> = doc.block_keys().cloned().collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn splitting_a_heading_at_its_end_starts_a_paragraph() {
        let doc = doc_with_text("Title");
        let doc = doc
            .toggle_block_type(&BlockKey::from("b0"), BlockType::HeadingOne)
            .unwrap();
        let (doc, _) = doc.split_block(&Selection::collapsed("b0", 5)).unwrap();
        assert_eq!(doc.first_block().block_type(), BlockType::HeadingOne);
        assert_eq!(doc.last_block().block_type(), BlockType::Paragraph);
    }

    #[test]
    fn splitting_a_heading_in_the_middle_keeps_both_headings() {
        let doc = doc_with_text("Title");
        let doc = doc
            .toggle_block_type(&BlockKey::from("b0"), BlockType::HeadingOne)
            .unwrap();
        let (doc, _) = doc.split_block(&Selection::collapsed("b0", 2)).unwrap();
        assert_eq!(doc.last_block().block_type(), BlockType::HeadingOne);
    }

    // ===================================================================
    // backspace
    // ===================================================================

    #[test]
    fn backspace_deletes_the_previous_character() {
        let doc = doc_with_text("abc");
        let (doc, caret) =
            doc.backspace(&Selection::collapsed("b0", 3)).unwrap();
        assert_eq!(texts(&doc), vec!["ab"]);
        assert_eq!(caret, Selection::collapsed("b0", 2));
    }

    #[test]
    fn backspace_deletes_a_whole_surrogate_pair() {
        let doc = doc_with_text("a\u{1F4A9}");
        let (doc, caret) =
            doc.backspace(&Selection::collapsed("b0", 3)).unwrap();
        assert_eq!(texts(&doc), vec!["a"]);
        assert_eq!(caret, Selection::collapsed("b0", 1));
    }

    #[test]
    fn backspace_at_start_of_a_heading_makes_it_a_paragraph() {
        let doc = doc_with_text("Title");
        let doc = doc
            .toggle_block_type(&BlockKey::from("b0"), BlockType::HeadingOne)
            .unwrap();
        let (doc, _) = doc.backspace(&Selection::collapsed("b0", 0)).unwrap();
        assert_eq!(doc.first_block().block_type(), BlockType::Paragraph);
        assert_eq!(texts(&doc), vec!["Title"]);
    }

    #[test]
    fn backspace_at_start_of_a_paragraph_merges_blocks() {
        let doc = doc_with_text("abcdef");
        let (doc, caret) =
            doc.split_block(&Selection::collapsed("b0", 3)).unwrap();
        let (doc, caret) = doc.backspace(&caret).unwrap();
        assert_eq!(texts(&doc), vec!["abcdef"]);
        assert_eq!(caret, Selection::collapsed("b0", 3));
    }

    #[test]
    fn backspace_at_start_of_the_document_is_a_noop() {
        let doc = doc_with_text("abc");
        let sel = Selection::collapsed("b0", 0);
        let (after, caret) = doc.backspace(&sel).unwrap();
        assert_eq!(after, doc);
        assert_eq!(caret, sel);
    }
}
