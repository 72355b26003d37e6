use std::time::Duration;

/// How long the copy button reads "Copied!".
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Identifies one copy; only the latest ticket may reset the label.
pub struct CopyTicket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Label state of a copy-to-clipboard button.
///
/// The reset is a delayed action owned by the caller: schedule
/// `expire(ticket)` after [`COPY_FEEDBACK_DURATION`] and cancel it when the
/// button goes away. A second copy before the delay elapses supersedes the
/// first ticket, so the stale timer cannot cut the new feedback short.
pub struct CopyFeedback {
    copied: bool,
    generation: u64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_copied(&mut self) -> CopyTicket {
        self.generation = self.generation.wrapping_add(1);
        self.copied = true;
        CopyTicket(self.generation)
    }

    /// Reverts the label if `ticket` is still current. Returns whether it did.
    pub fn expire(&mut self, ticket: CopyTicket) -> bool {
        if !self.copied || ticket.0 != self.generation {
            return false;
        }
        self.copied = false;
        true
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn label(&self) -> &'static str {
        if self.copied { "Copied!" } else { "Copy" }
    }
}
