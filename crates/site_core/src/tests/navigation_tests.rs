use super::*;

use std::{sync::Arc, time::Duration};

use shared::{PageId, Post, PostId};

use crate::clock::ManualClock;

fn controller() -> (NavigationController, ManualClock) {
    let clock = ManualClock::new();
    let controller = NavigationController::new(Box::new(clock.clone()), DEFAULT_TRANSITION_DELAY);
    (controller, clock)
}

fn sample_post() -> Arc<Post> {
    Arc::new(Post {
        id: PostId(1),
        title: "Sample".to_string(),
        date: "Jan 1, 2025".to_string(),
        body: Vec::new(),
    })
}

#[test]
fn starts_idle_on_home() {
    let (controller, _clock) = controller();
    assert_eq!(controller.state().current_page(), PageId::Home);
    assert!(controller.state().selected_post().is_none());
    assert!(!controller.state().is_loading());
    assert_eq!(controller.phase(), TransitionPhase::Idle);
    assert_eq!(controller.time_until_commit(), None);
}

#[test]
fn loading_is_visible_before_the_commit() {
    let (mut controller, clock) = controller();
    controller.navigate_to(PageId::Blog, None);

    assert!(controller.state().is_loading());
    assert_eq!(controller.state().current_page(), PageId::Home);
    assert_eq!(controller.phase(), TransitionPhase::Transitioning);

    clock.advance(Duration::from_millis(499));
    assert!(!controller.poll());
    assert!(controller.state().is_loading());
    assert_eq!(controller.time_until_commit(), Some(Duration::from_millis(1)));
}

#[test]
fn commits_page_and_post_atomically_after_delay() {
    let (mut controller, clock) = controller();
    let post = sample_post();
    controller.navigate_to(PageId::BlogPost, Some(post.clone()));

    clock.advance(Duration::from_millis(500));
    assert!(controller.poll());

    let state = controller.state();
    assert_eq!(state.current_page(), PageId::BlogPost);
    assert_eq!(state.selected_post(), Some(&post));
    assert!(!state.is_loading());
    assert_eq!(controller.phase(), TransitionPhase::Idle);
    assert!(!controller.poll(), "nothing left to commit");
}

#[test]
fn later_request_supersedes_pending_one() {
    let (mut controller, clock) = controller();
    controller.navigate_to(PageId::Blog, None);
    clock.advance(Duration::from_millis(300));
    controller.navigate_to(PageId::Contact, None);
    assert_eq!(controller.superseded_count(), 1);

    // The first request would have fired here; it was cancelled.
    clock.advance(Duration::from_millis(200));
    assert!(!controller.poll());
    assert_eq!(controller.state().current_page(), PageId::Home);
    assert!(controller.state().is_loading());

    clock.advance(Duration::from_millis(300));
    assert!(controller.poll());
    assert_eq!(controller.state().current_page(), PageId::Contact);
    assert!(!controller.state().is_loading());
}

#[test]
fn post_is_dropped_when_page_is_not_blog_post() {
    let (mut controller, clock) = controller();
    controller.navigate_to(PageId::Blog, Some(sample_post()));
    clock.advance(DEFAULT_TRANSITION_DELAY);
    assert!(controller.poll());
    assert_eq!(controller.state().current_page(), PageId::Blog);
    assert!(controller.state().selected_post().is_none());
}

#[test]
fn blog_post_without_post_is_accepted() {
    let (mut controller, clock) = controller();
    controller.dispatch(NavRequest::to(PageId::BlogPost));
    clock.advance(DEFAULT_TRANSITION_DELAY);
    assert!(controller.poll());
    assert_eq!(controller.state().current_page(), PageId::BlogPost);
    assert!(controller.state().selected_post().is_none());
}

#[test]
fn cancel_pending_clears_loading_and_keeps_page() {
    let (mut controller, clock) = controller();
    controller.navigate_to(PageId::Contact, None);
    assert!(controller.cancel_pending());
    assert!(!controller.state().is_loading());

    clock.advance(Duration::from_secs(1));
    assert!(!controller.poll());
    assert_eq!(controller.state().current_page(), PageId::Home);
    assert!(!controller.cancel_pending());
}

#[test]
fn custom_delay_is_honoured() {
    let clock = ManualClock::new();
    let mut controller =
        NavigationController::new(Box::new(clock.clone()), Duration::from_millis(50));
    controller.navigate_to(PageId::Blog, None);
    clock.advance(Duration::from_millis(50));
    assert!(controller.poll());
    assert_eq!(controller.delay(), Duration::from_millis(50));
}
