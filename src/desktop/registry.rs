use std::collections::BTreeMap;
use std::fmt;

use super::DesktopState;
use super::geometry::Position;
use crate::constants::MAX_LIVE_WINDOWS;
use crate::error::{DeskError, DeskResult};

/// Tag naming which mini-app a window belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowKind(String);

impl WindowKind {
    pub const MEMORY_GAME: &'static str = "memory_game";
    pub const CHAT_APP: &'static str = "chat_app";
    pub const HANGMAN_GAME: &'static str = "hangman_game";
    pub const BMI_APP: &'static str = "bmi_app";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn memory_game() -> Self {
        Self::new(Self::MEMORY_GAME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique window identity: kind tag plus per-kind sequence number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    kind: WindowKind,
    seq: u32,
}

impl SlotId {
    pub fn new(kind: WindowKind, seq: u32) -> Self {
        Self { kind, seq }
    }

    pub fn kind(&self) -> &WindowKind {
        &self.kind
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.seq)
    }
}

/// A reserved window identity together with the cascade position it was
/// handed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSlot {
    pub id: SlotId,
    pub position: Position,
}

/// Hands out window identities and enforces the live-window cap.
#[derive(Debug, Clone)]
pub struct WindowSlotRegistry {
    cap: usize,
    sequences: BTreeMap<WindowKind, u32>,
}

impl Default for WindowSlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSlotRegistry {
    pub fn new() -> Self {
        Self::with_cap(MAX_LIVE_WINDOWS)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            sequences: BTreeMap::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Reserve a slot for a new window of `kind`.
    ///
    /// Fails with `CapacityExceeded` once `cap` windows are live; nothing is
    /// reserved in that case.
    pub fn try_open(
        &mut self,
        state: &mut DesktopState,
        kind: &WindowKind,
    ) -> DeskResult<WindowSlot> {
        if state.live_windows() >= self.cap {
            tracing::debug!(kind = %kind, live = state.live_windows(), "window cap reached");
            return Err(DeskError::CapacityExceeded { cap: self.cap });
        }
        let seq = self.sequences.entry(kind.clone()).or_insert(0);
        let id = SlotId::new(kind.clone(), *seq);
        *seq += 1;

        state.increment_live();
        state.cascade_mut().advance();
        let cascade = state.cascade();
        Ok(WindowSlot {
            id,
            position: Position::new(cascade.top(), cascade.left()),
        })
    }

    /// Release a slot. Callers must invoke this once per opened slot; the
    /// canvas guarantees that by only closing windows it actually removed.
    pub fn close(&mut self, state: &mut DesktopState, slot: &SlotId) {
        tracing::debug!(window = %slot, "releasing window slot");
        state.decrement_live();
        state.cascade_mut().retreat();
    }

    /// Forget every live window. Sequence numbers keep counting.
    pub fn reset(&mut self, state: &mut DesktopState) {
        state.reset();
    }

    /// Sequence number the next window of `kind` will receive.
    pub fn next_seq(&self, kind: &WindowKind) -> u32 {
        self.sequences.get(kind).copied().unwrap_or(0)
    }
}
