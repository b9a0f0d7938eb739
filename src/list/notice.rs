//! Utilities to surface the outcome of list operations

use std::fmt::{Display, Error, Formatter};

/// A transient, user-facing message about the outcome of an operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Nothing has been reported yet
    None,
    /// The operation went through
    Success(String),
    /// The operation failed and the displayed rows were left as they were
    Failure(String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Notice::None => write!(f, "Nothing to report"),
            Notice::Success(text) => write!(f, "{}", text),
            Notice::Failure(text) => write!(f, "Error: {}", text),
        }
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self::None
    }
}

/// See [`notice_channel`]
pub type NoticeSender = tokio::sync::watch::Sender<Notice>;
/// See [`notice_channel`]
pub type NoticeReceiver = tokio::sync::watch::Receiver<Notice>;

/// Create a notice channel, that a UI can watch to display toast-like messages
pub fn notice_channel() -> (NoticeSender, NoticeReceiver) {
    tokio::sync::watch::channel(Notice::default())
}

/// Routes operation outcomes to the log and to an optional notice channel
pub struct Reporter {
    notice_channel: Option<NoticeSender>,
}

impl Reporter {
    pub fn new() -> Self {
        Self { notice_channel: None }
    }
    pub fn new_with_notice_channel(channel: NoticeSender) -> Self {
        Self { notice_channel: Some(channel) }
    }

    /// Log a success and notify the listener (if any)
    pub fn success(&self, text: &str) {
        log::info!("{}", text);
        self.send(Notice::Success(text.to_string()));
    }

    /// Log a failure and notify the listener (if any)
    pub fn failure(&self, text: &str) {
        log::error!("{}", text);
        self.send(Notice::Failure(text.to_string()));
    }

    fn send(&self, notice: Notice) {
        self.notice_channel
            .as_ref()
            .map(|sender| {
                sender.send(notice)
            });
    }
}
