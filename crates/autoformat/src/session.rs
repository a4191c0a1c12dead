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

//! The editing session: one document, its selection and history, wired to
//! the trigger engine, a persistence store and a notification sink.
//!
//! Each accepted mutation, including an autoformat, records exactly one
//! snapshot in the history.

use tracing::{error, info, warn};

use crate::triggers::{on_before_insert, Trigger, Verdict};
use crate::{
    ComposerConfig, Document, History, ModelError, Notification,
    NotificationSink, PersistenceStore, Selection, SessionError, StyleSet,
};

pub struct EditingSession<S, N> {
    store: S,
    sink: N,
    config: ComposerConfig,
    history: History,
    selection: Selection,
    style_override: Option<StyleSet>,
    load_error: Option<SessionError>,
}

impl<S, N> EditingSession<S, N>
where
    S: PersistenceStore,
    N: NotificationSink,
{
    /// Open a session on whatever `store` holds.
    ///
    /// A missing document starts empty. A document that cannot be loaded or
    /// deserialized also starts empty, and the failure is kept for
    /// [`Self::load_error`].
    pub fn open(store: S, sink: N, config: ComposerConfig) -> Self {
        let (document, load_error) = match load(&store) {
            Ok(Some(document)) => (document, None),
            Ok(None) => (Document::create_empty(), None),
            Err(e) => {
                warn!(
                    storage_key = %config.storage_key,
                    "could not restore saved document, starting empty: {e}"
                );
                (Document::create_empty(), Some(e))
            }
        };
        let selection = document.selection_at_end();
        let history = History::new(
            document,
            selection.clone(),
            config.effective_history_limit(),
        );
        Self {
            store,
            sink,
            config,
            history,
            selection,
            style_override: None,
            load_error,
        }
    }

    pub fn load_error(&self) -> Option<&SessionError> {
        self.load_error.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.history.current().document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Styles the next typed character will carry instead of inheriting
    /// from the character before the caret.
    pub fn style_override(&self) -> Option<&StyleSet> {
        self.style_override.as_ref()
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn plain_text(&self) -> String {
        self.document().to_plain_text()
    }

    pub fn to_html(&self) -> String {
        self.document().to_html()
    }

    /// Move the selection. Backward selections are turned around.
    pub fn select(&mut self, selection: &Selection) -> Result<(), ModelError> {
        self.selection = self.document().normalize_selection(selection)?;
        self.style_override = None;
        Ok(())
    }

    /// Type one character at the selection.
    ///
    /// Returns the trigger that fired, if the character was consumed by an
    /// autoformat. `'\n'` splits the block.
    pub fn type_char(&mut self, c: char) -> Result<Option<Trigger>, ModelError> {
        let verdict = on_before_insert(self.document(), &self.selection, c)?;
        match verdict {
            Verdict::Handled(edit) => {
                self.commit(edit.document, edit.selection);
                self.style_override = edit.style_override;
                Ok(Some(edit.trigger))
            }
            Verdict::PassThrough if c == '\n' => {
                self.split_block()?;
                Ok(None)
            }
            Verdict::PassThrough => {
                let mut buf = [0; 4];
                self.insert_text(c.encode_utf8(&mut buf))?;
                Ok(None)
            }
        }
    }

    /// Type every character of `text` in turn, returning the triggers that
    /// fired.
    pub fn type_text(&mut self, text: &str) -> Result<Vec<Trigger>, ModelError> {
        let mut fired = Vec::new();
        for c in text.chars() {
            fired.extend(self.type_char(c)?);
        }
        Ok(fired)
    }

    /// Insert `text` as-is, without looking for triggers.
    pub fn insert_text(&mut self, text: &str) -> Result<(), ModelError> {
        let styles = match self.style_override.take() {
            Some(styles) => styles,
            None => self.document().styles_before(&self.selection)?,
        };
        let (document, caret) =
            self.document().insert_text(&self.selection, text, &styles)?;
        self.commit(document, caret);
        Ok(())
    }

    pub fn split_block(&mut self) -> Result<(), ModelError> {
        let (document, caret) = self.document().split_block(&self.selection)?;
        self.style_override = None;
        self.commit(document, caret);
        Ok(())
    }

    pub fn backspace(&mut self) -> Result<(), ModelError> {
        let (document, caret) = self.document().backspace(&self.selection)?;
        self.style_override = None;
        self.commit(document, caret);
        Ok(())
    }

    /// Step back one snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.selection = snapshot.selection.clone();
                self.style_override = None;
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.selection = snapshot.selection.clone();
                self.style_override = None;
                true
            }
            None => false,
        }
    }

    /// Persist the document and start over with an empty one.
    ///
    /// A document without visible text is refused: the store is not touched
    /// and the document stays as it is.
    pub fn save(&mut self) -> Result<(), SessionError> {
        if self.document().is_blank() {
            self.sink.notify(Notification::EmptyContentRejected);
            return Err(SessionError::EmptyContent);
        }

        let serialized = self.document().serialize();
        if let Err(e) = self.store.save(&serialized) {
            error!(storage_key = %self.config.storage_key, "save failed: {e}");
            return Err(e.into());
        }
        info!(
            storage_key = %self.config.storage_key,
            blocks = serialized.blocks.len(),
            "document saved"
        );
        self.sink.notify(Notification::SaveSucceeded);
        self.clear();
        Ok(())
    }

    /// Discard everything, history included.
    pub fn reset(&mut self) {
        self.clear();
        info!("editor reset");
        self.sink.notify(Notification::ResetPerformed);
    }

    fn clear(&mut self) {
        let document = Document::create_empty();
        self.selection = document.selection_at_start();
        self.history = History::new(
            document,
            self.selection.clone(),
            self.config.effective_history_limit(),
        );
        self.style_override = None;
    }

    fn commit(&mut self, document: Document, selection: Selection) {
        self.history.push(document, selection.clone());
        self.selection = selection;
    }
}

fn load<S: PersistenceStore>(store: &S) -> Result<Option<Document>, SessionError> {
    match store.load()? {
        Some(data) => Ok(Some(Document::from_serialized(&data)?)),
        None => Ok(None),
    }
}
