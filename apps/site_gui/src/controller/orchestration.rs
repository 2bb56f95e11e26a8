//! Routes navigation requests collected from rendered widgets.

use site_core::{DisplayHost, NavRequest, SiteApp};

/// Returns `false` when the request was dropped because a transition is
/// already in flight.
pub fn dispatch_nav_request<H: DisplayHost>(site: &mut SiteApp<H>, request: NavRequest) -> bool {
    let page = request.page;
    let post = request.post.as_ref().map(|post| post.id);
    let dispatched = site.activate(request);
    tracing::debug!(
        page = page.as_str(),
        post = ?post,
        dispatched,
        "ui navigation request"
    );
    dispatched
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shared::{ContentLibrary, PageId};
    use site_core::{HeadlessHost, ManualClock, SiteSettings, Viewport};

    use super::*;

    fn site() -> (SiteApp<HeadlessHost>, ManualClock) {
        let mut settings = SiteSettings::default();
        settings.background.enabled = false;
        let clock = ManualClock::new();
        let site = SiteApp::mount(
            HeadlessHost::new(Viewport::new(800.0, 600.0)),
            &settings,
            ContentLibrary::bundled().expect("bundled content"),
            Box::new(clock.clone()),
        )
        .expect("mount");
        (site, clock)
    }

    #[test]
    fn requests_reach_navigation() {
        let (mut site, clock) = site();
        assert!(dispatch_nav_request(&mut site, NavRequest::to(PageId::Contact)));
        clock.advance(Duration::from_millis(500));
        site.pump();
        assert_eq!(site.state().current_page(), PageId::Contact);
    }

    #[test]
    fn clicks_under_the_loading_overlay_are_dropped() {
        let (mut site, clock) = site();
        assert!(dispatch_nav_request(&mut site, NavRequest::to(PageId::Blog)));
        assert!(site.compose().overlay.is_some());
        assert!(!dispatch_nav_request(&mut site, NavRequest::to(PageId::Contact)));

        clock.advance(Duration::from_millis(500));
        site.pump();
        assert_eq!(site.state().current_page(), PageId::Blog);
    }
}
