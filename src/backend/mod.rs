// SPDX-License-Identifier: GPL-3.0-only

//! Commands sent from the editor to the native backend.
//!
//! The editor never talks to hardware. Every user action that changes a
//! profile becomes a [`BackendCommand`] pushed through a [`CommandSender`];
//! the embedding application owns the receiving end and decides how the
//! command reaches the backend.
//!
//! # Wire Encoding
//!
//! Backends that take a single string receive [`BackendCommand::encode`]:
//!
//! - `set-key?{row}?{col}?{colour}`
//! - `clear-key?{row}?{col}`
//! - `profile-set-metadata;{name};{icon}`
//! - `pref-set?{group}?{setting}?{value}`
//!
//! Profile metadata is delimited by `;` because profile names may contain `?`.

use futures::channel::mpsc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commands the editor sends to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum BackendCommand {
    /// Assign a colour to a key.
    SetKey {
        /// Matrix row
        row: u32,
        /// Matrix column
        col: u32,
        /// CSS colour string
        color: String,
    },
    /// Remove the colour of a key.
    ClearKey {
        /// Matrix row
        row: u32,
        /// Matrix column
        col: u32,
    },
    /// Rename the profile and change its icon.
    #[serde(rename = "profile-set-metadata")]
    SetProfileMetadata {
        /// New profile name
        name: String,
        /// Path of the new profile icon
        icon: String,
    },
    /// Update an application preference.
    #[serde(rename = "pref-set")]
    SetPreference {
        /// Preference group
        group: String,
        /// Setting within the group
        setting: String,
        /// New value, stringified
        value: String,
    },
}

impl BackendCommand {
    /// Returns the delimited string form of the command.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            BackendCommand::SetKey { row, col, color } => {
                format!("set-key?{}?{}?{}", row, col, color)
            }
            BackendCommand::ClearKey { row, col } => format!("clear-key?{}?{}", row, col),
            BackendCommand::SetProfileMetadata { name, icon } => {
                format!("profile-set-metadata;{};{}", name, icon)
            }
            BackendCommand::SetPreference {
                group,
                setting,
                value,
            } => format!("pref-set?{}?{}?{}", group, setting, value),
        }
    }
}

impl fmt::Display for BackendCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Sending half of the backend command channel.
///
/// Sending never blocks. If the receiver is gone the command is dropped and
/// the failure logged.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<BackendCommand>,
}

impl CommandSender {
    /// Creates a connected sender/receiver pair.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BackendCommand>) {
        let (tx, rx) = mpsc::unbounded();
        (Self { tx }, rx)
    }

    /// Wraps an existing channel sender.
    #[must_use]
    pub fn from_sender(tx: mpsc::UnboundedSender<BackendCommand>) -> Self {
        Self { tx }
    }

    /// Sends a command.
    ///
    /// # Returns
    ///
    /// `true` if the command was queued, `false` if the receiver was dropped.
    pub fn send(&self, command: BackendCommand) -> bool {
        tracing::debug!("Backend command: {}", command);
        match self.tx.unbounded_send(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send backend command: {}", e);
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
