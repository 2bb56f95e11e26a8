//! Header, footer and loading overlay shared by every page.

use shared::PageId;

use crate::{navigation::NavRequest, pages::SITE_NAME, view::View};

pub const COPYRIGHT: &str = "© 2025 Qasly Labs. All Rights Reserved.";
pub const LOADING_LABEL: &str = "Loading...";

pub fn header() -> View {
    let mut view = View::chrome();
    view.link(SITE_NAME, NavRequest::to(PageId::Home))
        .link("Blog", NavRequest::to(PageId::Blog))
        .link("Contact", NavRequest::to(PageId::Contact));
    view
}

pub fn footer() -> View {
    let mut view = View::chrome();
    view.muted(COPYRIGHT)
        .link("Contact", NavRequest::to(PageId::Contact));
    view
}

pub fn loading_overlay() -> View {
    let mut view = View::chrome();
    view.heading(2, LOADING_LABEL);
    view
}
