//! The resume gate that sits in front of a restored cart.
//!
//! When a previous session left items behind, the shopper is asked whether to
//! continue with them or start over. Until they answer, the cart is read-only.

use serde::Serialize;
use std::fmt::{self, Display};

/// Where the cart is in its start-up handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResumePhase {
    /// Nothing restored yet.
    #[default]
    Idle,
    /// A saved cart is being looked up.
    Checking,
    /// A non-empty cart was restored; the shopper has not decided yet.
    AwaitingDecision,
    /// The shopper chose to keep the restored cart.
    Resuming,
    /// No saved cart, or the shopper chose to start over.
    Fresh,
}

impl ResumePhase {
    /// Whether cart mutations are accepted in this phase.
    pub fn is_settled(self) -> bool {
        matches!(self, ResumePhase::Resuming | ResumePhase::Fresh)
    }
}

impl Display for ResumePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResumePhase::Idle => "idle",
            ResumePhase::Checking => "checking",
            ResumePhase::AwaitingDecision => "awaiting decision",
            ResumePhase::Resuming => "resuming",
            ResumePhase::Fresh => "fresh",
        };
        f.write_str(label)
    }
}

/// The shopper's answer to "continue your previous order?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeDecision {
    Continue,
    StartFresh,
}

/// Tracks the phase and enforces the legal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumeFlow {
    phase: ResumePhase,
}

impl ResumeFlow {
    pub fn phase(&self) -> ResumePhase {
        self.phase
    }

    /// `Idle -> Checking`. Other phases are left alone.
    pub fn begin_check(&mut self) {
        if self.phase == ResumePhase::Idle {
            self.phase = ResumePhase::Checking;
        }
    }

    /// Ends the lookup: a cart with items waits for a decision, anything else
    /// starts fresh.
    pub fn settle_check(&mut self, found_items: bool) {
        if self.phase == ResumePhase::Checking {
            self.phase = if found_items {
                ResumePhase::AwaitingDecision
            } else {
                ResumePhase::Fresh
            };
        }
    }

    /// Applies the shopper's decision. Returns the new phase, or `None` when no
    /// decision is pending.
    pub fn decide(&mut self, decision: ResumeDecision) -> Option<ResumePhase> {
        if self.phase != ResumePhase::AwaitingDecision {
            return None;
        }
        self.phase = match decision {
            ResumeDecision::Continue => ResumePhase::Resuming,
            ResumeDecision::StartFresh => ResumePhase::Fresh,
        };
        Some(self.phase)
    }
}
