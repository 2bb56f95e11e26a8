//! Navigation controller: the single owner of current-view state.
//!
//! A request flips `is_loading` immediately and commits the new page after a
//! fixed delay. The controller is polled from the host loop; it never spawns
//! timers of its own, so dropping it (or calling [`NavigationController::cancel_pending`])
//! leaves nothing scheduled.

use std::{sync::Arc, time::Duration};

use shared::{PageId, Post};

use crate::clock::Clock;

pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(500);

/// A navigation target carried by links and buttons in rendered views.
#[derive(Debug, Clone, PartialEq)]
pub struct NavRequest {
    pub page: PageId,
    pub post: Option<Arc<Post>>,
}

impl NavRequest {
    pub fn to(page: PageId) -> Self {
        Self { page, post: None }
    }

    pub fn open_post(post: Arc<Post>) -> Self {
        Self {
            page: PageId::BlogPost,
            post: Some(post),
        }
    }
}

/// Anything that accepts navigation requests from rendered content.
pub trait Navigator {
    fn navigate_to(&mut self, page: PageId, post: Option<Arc<Post>>);

    fn dispatch(&mut self, request: NavRequest) {
        self.navigate_to(request.page, request.post);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    current_page: PageId,
    selected_post: Option<Arc<Post>>,
    is_loading: bool,
}

impl NavigationState {
    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn selected_post(&self) -> Option<&Arc<Post>> {
        self.selected_post.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Transitioning,
}

#[derive(Debug)]
struct PendingTransition {
    request: NavRequest,
    due: Duration,
}

pub struct NavigationController {
    state: NavigationState,
    pending: Option<PendingTransition>,
    delay: Duration,
    clock: Box<dyn Clock>,
    superseded: u64,
}

impl NavigationController {
    pub fn new(clock: Box<dyn Clock>, delay: Duration) -> Self {
        Self {
            state: NavigationState::default(),
            pending: None,
            delay,
            clock,
            superseded: 0,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn phase(&self) -> TransitionPhase {
        if self.pending.is_some() {
            TransitionPhase::Transitioning
        } else {
            TransitionPhase::Idle
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of pending transitions replaced by a later request.
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }

    /// Remaining time before the pending transition commits, if any.
    pub fn time_until_commit(&self) -> Option<Duration> {
        let pending = self.pending.as_ref()?;
        Some(pending.due.saturating_sub(self.clock.now()))
    }

    /// Commits the pending transition once its delay has elapsed. Returns
    /// `true` when the visible state changed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let due = match &self.pending {
            Some(pending) => pending.due <= now,
            None => false,
        };
        if !due {
            return false;
        }

        let Some(PendingTransition { request, .. }) = self.pending.take() else {
            return false;
        };
        let NavRequest { page, mut post } = request;
        if page != PageId::BlogPost && post.is_some() {
            tracing::debug!(page = %page, "dropping selected post for non-post page");
            post = None;
        }

        self.state = NavigationState {
            current_page: page,
            selected_post: post,
            is_loading: false,
        };
        tracing::debug!(page = %page, "navigation committed");
        true
    }

    /// Drops any pending transition and clears the loading flag.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.state.is_loading = false;
                tracing::debug!(page = %pending.request.page, "pending navigation cancelled");
                true
            }
            None => false,
        }
    }
}

impl Navigator for NavigationController {
    fn navigate_to(&mut self, page: PageId, post: Option<Arc<Post>>) {
        let due = self.clock.now() + self.delay;
        if let Some(previous) = self.pending.replace(PendingTransition {
            request: NavRequest { page, post },
            due,
        }) {
            self.superseded += 1;
            tracing::debug!(
                from = %previous.request.page,
                to = %page,
                "pending navigation superseded"
            );
        }
        self.state.is_loading = true;
        tracing::debug!(page = %page, delay_ms = self.delay.as_millis() as u64, "navigation requested");
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
