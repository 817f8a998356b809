//! OTP confirmation for the new-applicant flow.
//!
//! The issuance endpoint returns the code to the client (a demo-only
//! shortcut), so the comparison happens here: six entered digits against the
//! issued code, re-classified on every input change. Resend is gated by a
//! 60-second cooldown driven by a single one-second timer.

use std::time::Duration;

use tokio::sync::watch;

/// Seconds before the resend control re-enables.
pub const RESEND_SECONDS: u16 = 60;

/// Classification of the entered code against the issued one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStatus {
    /// Fewer than six digits entered so far.
    Pending,
    /// Six digits entered, equal to the issued code.
    Matched,
    /// Six digits entered, not equal.
    Mismatched,
}

/// An issued OTP code plus the user's current entry.
///
/// Lives only in the creation flow's memory; discarded on navigation.
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    code: String,
    entered: String,
}

impl OtpChallenge {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            entered: String::new(),
        }
    }

    /// Record the user's entry, keeping digits only (max six), and return
    /// the resulting classification.
    pub fn enter(&mut self, raw: &str) -> OtpStatus {
        self.entered = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(6)
            .collect();
        self.status()
    }

    pub fn entered(&self) -> &str {
        &self.entered
    }

    pub fn status(&self) -> OtpStatus {
        if self.entered.len() < 6 {
            OtpStatus::Pending
        } else if self.entered == self.code {
            OtpStatus::Matched
        } else {
            OtpStatus::Mismatched
        }
    }

    pub fn is_matched(&self) -> bool {
        self.status() == OtpStatus::Matched
    }
}

/// Pure countdown state: starts at [`RESEND_SECONDS`], one tick per second,
/// resend re-enabled exactly at zero.
#[derive(Debug, Clone)]
pub struct ResendCooldown {
    remaining: u16,
}

impl ResendCooldown {
    pub fn start() -> Self {
        Self {
            remaining: RESEND_SECONDS,
        }
    }

    pub fn idle() -> Self {
        Self { remaining: 0 }
    }

    /// One second elapsed. Saturates at zero.
    pub fn tick(&mut self) -> u16 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }
}

/// The running form of [`ResendCooldown`]: a single tokio interval task
/// publishing the remaining seconds over a watch channel.
///
/// The task stops on its own when the countdown reaches zero; dropping the
/// timer aborts it early, so a torn-down screen never leaves a ticking task
/// behind.
pub struct CooldownTimer {
    remaining: watch::Receiver<u16>,
    handle: tokio::task::AbortHandle,
}

impl CooldownTimer {
    pub fn start() -> Self {
        Self::with_seconds(RESEND_SECONDS)
    }

    pub fn with_seconds(seconds: u16) -> Self {
        let (tx, rx) = watch::channel(seconds);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // first tick completes immediately
            interval.tick().await;
            let mut left = seconds;
            while left > 0 {
                interval.tick().await;
                left -= 1;
                if tx.send(left).is_err() {
                    // receiver gone, nothing to tick for
                    return;
                }
            }
            tracing::debug!("OTP resend cooldown elapsed");
        });

        Self {
            remaining: rx,
            handle: task.abort_handle(),
        }
    }

    pub fn remaining(&self) -> u16 {
        *self.remaining.borrow()
    }

    pub fn can_resend(&self) -> bool {
        self.remaining() == 0
    }
}

impl Drop for CooldownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
