// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation-frame coalescing.
//!
//! High-frequency move events are not applied immediately. Each one replaces
//! the pending request, and the host applies the latest request once per
//! animation frame. [`FrameScheduler::request`] tells the host when it needs
//! to ask its platform for a new frame callback: only when nothing was
//! pending before.
//!
//! ```
//! use wayfinder_gesture::frame::FrameScheduler;
//!
//! let mut frames = FrameScheduler::new();
//! assert!(frames.request(1));
//! assert!(!frames.request(2)); // replaces 1, no new callback needed
//! assert_eq!(frames.take(), Some(2));
//! assert_eq!(frames.take(), None);
//! ```

/// Holds at most one pending frame request.
#[derive(Clone, Debug)]
pub struct FrameScheduler<T> {
    pending: Option<T>,
    coalesced: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameScheduler<T> {
    /// Creates an idle scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            coalesced: 0,
        }
    }

    /// Queues `value`, replacing any pending request.
    ///
    /// Returns `true` if no request was pending, meaning the host must
    /// schedule a frame callback.
    pub fn request(&mut self, value: T) -> bool {
        let was_idle = self.pending.is_none();
        if !was_idle {
            self.coalesced += 1;
        }
        self.pending = Some(value);
        was_idle
    }

    /// Takes the pending request when the frame fires.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drops the pending request. Returns `true` if one was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Returns `true` while a request is waiting for a frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of requests that replaced an earlier pending one.
    #[must_use]
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
