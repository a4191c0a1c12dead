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

//! User-facing notifications raised by the editing session.

use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Notification {
    EmptyContentRejected,
    SaveSucceeded,
    ResetPerformed,
}

impl Notification {
    /// The text shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Notification::EmptyContentRejected => "Please enter some text.",
            Notification::SaveSucceeded => "Content saved successfully",
            Notification::ResetPerformed => "Editor reset to default state.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Notification::EmptyContentRejected)
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Remembers every notification, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<Notification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Notification] {
        &self.events
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, notification: Notification) {
        self.events.push(notification);
    }
}

/// Forwards notifications to the `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            warn!(event = %notification, "{}", notification.message());
        } else {
            info!(event = %notification, "{}", notification.message());
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn notifications_have_kebab_case_names() {
        let names: Vec<String> =
            Notification::iter().map(|n| n.to_string()).collect();
        assert_eq!(
            names,
            ["empty-content-rejected", "save-succeeded", "reset-performed"]
        );
    }

    #[test]
    fn only_rejection_is_an_error() {
        assert!(Notification::EmptyContentRejected.is_error());
        assert!(!Notification::SaveSucceeded.is_error());
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.notify(Notification::SaveSucceeded);
        sink.notify(Notification::ResetPerformed);
        assert_eq!(
            sink.events(),
            [Notification::SaveSucceeded, Notification::ResetPerformed]
        );
    }
}
