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

use std::fs;
use std::path::Path;

use anyhow::Context;
use autoformat::{
    ComposerConfig, EditingSession, JsonFileStore, Notification,
    NotificationSink, TracingSink,
};
use tracing::debug;

use crate::ShowFormat;

/// Prints notifications to stderr the way the editor would toast them.
#[derive(Default)]
struct ConsoleSink {
    log: TracingSink,
}

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, notification: Notification) {
        self.log.notify(notification);
        if notification.is_error() {
            eprintln!("error: {}", notification.message());
        } else {
            eprintln!("{}", notification.message());
        }
    }
}

type Session = EditingSession<JsonFileStore, ConsoleSink>;

pub fn load_config(path: Option<&Path>) -> anyhow::Result<ComposerConfig> {
    let Some(path) = path else {
        return Ok(ComposerConfig::default());
    };
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ComposerConfig = serde_yaml::from_str(&yaml)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(?config, "loaded configuration");
    Ok(config)
}

fn open(store_dir: &Path, config: ComposerConfig) -> Session {
    let store = JsonFileStore::new(store_dir, &config.storage_key);
    let session = EditingSession::open(store, ConsoleSink::default(), config);
    if let Some(e) = session.load_error() {
        eprintln!("warning: starting from an empty document: {e}");
    }
    session
}

pub fn type_text(
    store_dir: &Path,
    config: ComposerConfig,
    text: &str,
    save: bool,
) -> anyhow::Result<()> {
    let mut session = open(store_dir, config);
    let fired = session.type_text(text)?;
    debug!(triggers = fired.len(), "typing finished");

    println!("{}", session.to_html());
    if save {
        session.save()?;
    }
    Ok(())
}

pub fn show(
    store_dir: &Path,
    config: ComposerConfig,
    format: ShowFormat,
) -> anyhow::Result<()> {
    let session = open(store_dir, config);
    if session.document().is_blank() {
        eprintln!("{}", session.config().placeholder);
    }
    match format {
        ShowFormat::Html => println!("{}", session.to_html()),
        ShowFormat::Plain => println!("{}", session.plain_text()),
        ShowFormat::Json => {
            println!("{}", session.document().serialize().to_json_pretty()?)
        }
    }
    Ok(())
}

pub fn reset(store_dir: &Path, config: ComposerConfig) -> anyhow::Result<()> {
    let store = JsonFileStore::new(store_dir, &config.storage_key);
    let removed = store
        .remove()
        .with_context(|| format!("removing {}", store.path().display()))?;
    debug!(removed, "stored document cleared");

    let mut session = EditingSession::open(store, ConsoleSink::default(), config);
    session.reset();
    Ok(())
}
