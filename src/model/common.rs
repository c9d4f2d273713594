//! Types shared by all web service operations.

use serde::Serialize;

/// The web service schema version a request is built against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major_release: String,
    pub minor_release: String,
}

impl Version {
    pub fn new(major_release: impl Into<String>, minor_release: impl Into<String>) -> Self {
        Self {
            major_release: major_release.into(),
            minor_release: minor_release.into(),
        }
    }
}

impl Default for Version {
    /// The schema version this crate is developed against.
    fn default() -> Self {
        Self::new("3", "0")
    }
}

/// Outcome of processing one request or one item within a request.
///
/// Code `0` means success. A code of `0` combined with a status text other
/// than `"ok"` is a *weak* validation outcome (a warning; the item is still
/// usable). Any non-zero code is a hard error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInformation {
    /// Machine-readable status code, `0` on success.
    pub code: u32,
    /// Short human-readable status text.
    pub text: String,
    /// Additional detail messages, may repeat.
    pub messages: Vec<String>,
}

impl StatusInformation {
    pub fn new(code: u32, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }

    /// `true` if the carrier processed the item without rejecting it.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// `true` if the item was accepted but the carrier attached warnings.
    pub fn is_warning(&self) -> bool {
        self.code == 0 && !self.text.is_empty() && !self.text.eq_ignore_ascii_case("ok")
    }

    /// Detail messages with duplicates and empty entries removed, insertion
    /// order preserved.
    pub fn unique_messages(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for message in &self.messages {
            let message = message.trim();
            if !message.is_empty() && !seen.iter().any(|m: &String| m == message) {
                seen.push(message.to_string());
            }
        }
        seen
    }
}

/// Uniform view on the three response types for the cross-cutting client
/// decorators: the overall call status plus the per-item statuses.
pub trait StatusResponse {
    /// Status of the call as a whole.
    fn status(&self) -> &StatusInformation;

    /// Status of each item the carrier reported on, request order preserved.
    fn item_statuses(&self) -> Vec<&StatusInformation>;
}
