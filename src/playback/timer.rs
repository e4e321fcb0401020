//! Single-shot emission timer owned by the playback controller.
//!
//! Arming or cancelling bumps a generation counter, so a token handed out by an
//! earlier `arm` can never match the live schedule again. There is at most one
//! pending emission at any time.

use std::time::{Duration, Instant};

/// Identifies one armed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEmission {
    pub token: CancellationToken,
    /// Unit index that fires when the deadline passes
    pub index: usize,
    pub armed_at: Instant,
    pub deadline: Instant,
}

impl PendingEmission {
    pub fn delay(&self) -> Duration {
        self.deadline.saturating_duration_since(self.armed_at)
    }
}

#[derive(Debug, Default)]
pub struct Timer {
    generation: u64,
    pending: Option<PendingEmission>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending emission with a new one firing `delay` after `armed_at`.
    pub fn arm(&mut self, index: usize, armed_at: Instant, delay: Duration) -> CancellationToken {
        self.generation = self.generation.wrapping_add(1);
        let token = CancellationToken(self.generation);
        self.pending = Some(PendingEmission {
            token,
            index,
            armed_at,
            deadline: armed_at + delay,
        });
        token
    }

    /// Keeps the original arming instant but swaps in a new delay.
    /// Returns `None` when nothing is pending.
    pub fn rearm(&mut self, delay: Duration) -> Option<CancellationToken> {
        let pending = self.pending?;
        Some(self.arm(pending.index, pending.armed_at, delay))
    }

    /// Invalidates the pending emission, if any.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    pub fn is_live(&self, token: CancellationToken) -> bool {
        self.pending.map(|p| p.token == token).unwrap_or(false)
    }

    pub fn pending(&self) -> Option<&PendingEmission> {
        self.pending.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|d| d.saturating_duration_since(now))
    }

    /// Takes the pending emission if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingEmission> {
        match self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take(),
            _ => None,
        }
    }
}
