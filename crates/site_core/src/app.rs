//! Root of the site: owns the host, navigation state, background and the
//! contact draft, and composes them into one renderable [`Composition`].

use std::sync::Arc;

use shared::{ContentLibrary, PageId, Post, SiteError};

use crate::{
    background::BackgroundAnimator,
    chrome,
    clock::Clock,
    config::SiteSettings,
    contact::ContactForm,
    host::DisplayHost,
    navigation::{NavRequest, NavigationController, NavigationState, Navigator},
    pages::{PageContext, PageRegistry},
    view::View,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundStatus {
    Active,
    /// Turned off in settings.
    Disabled,
    /// No surface could be acquired; running without a background.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub background: BackgroundStatus,
    pub header: View,
    pub page: View,
    pub footer: View,
    pub overlay: Option<View>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpOutcome {
    pub navigation_committed: bool,
    pub frame_presented: bool,
}

impl PumpOutcome {
    pub fn needs_render(&self) -> bool {
        self.navigation_committed || self.frame_presented
    }
}

pub struct SiteApp<H: DisplayHost> {
    host: H,
    library: ContentLibrary,
    registry: PageRegistry,
    navigation: NavigationController,
    background: Option<BackgroundAnimator>,
    background_status: BackgroundStatus,
    contact: ContactForm,
    mounted: bool,
}

impl<H: DisplayHost> SiteApp<H> {
    pub fn mount(
        mut host: H,
        settings: &SiteSettings,
        library: ContentLibrary,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SiteError> {
        let (background, background_status) = if settings.background.enabled {
            match BackgroundAnimator::mount(&mut host, &settings.background) {
                Ok(animator) => (Some(animator), BackgroundStatus::Active),
                Err(err) if settings.background.required => return Err(err),
                Err(err) => {
                    tracing::warn!("continuing without background: {err}");
                    (None, BackgroundStatus::Unavailable)
                }
            }
        } else {
            (None, BackgroundStatus::Disabled)
        };

        tracing::info!(
            posts = library.len(),
            background = ?background_status,
            "site mounted"
        );

        Ok(Self {
            host,
            library,
            registry: PageRegistry::standard(),
            navigation: NavigationController::new(clock, settings.transition_delay()),
            background,
            background_status,
            contact: ContactForm::default(),
            mounted: true,
        })
    }

    /// Polls the navigation timer and the background loop.
    pub fn pump(&mut self) -> PumpOutcome {
        if !self.mounted {
            return PumpOutcome::default();
        }
        let navigation_committed = self.navigation.poll();
        let frame_presented = match self.background.as_mut() {
            Some(animator) => animator.pump(&mut self.host),
            None => false,
        };
        PumpOutcome {
            navigation_committed,
            frame_presented,
        }
    }

    pub fn compose(&self) -> Composition {
        let state = self.navigation.state();
        let ctx = PageContext {
            library: &self.library,
            post: state.selected_post().map(|post| &**post),
        };
        Composition {
            background: self.background_status,
            header: chrome::header(),
            page: self.registry.render(state.current_page(), &ctx),
            footer: chrome::footer(),
            overlay: state.is_loading().then(chrome::loading_overlay),
        }
    }

    /// Activation of a rendered link or post entry. The loading overlay covers
    /// the page during a transition, so activations are dropped until it
    /// commits. Returns whether the request was dispatched.
    pub fn activate(&mut self, request: NavRequest) -> bool {
        if self.navigation.state().is_loading() {
            tracing::debug!(page = %request.page, "ignoring activation during transition");
            return false;
        }
        self.dispatch(request);
        true
    }

    pub fn submit_contact(&self) -> Result<(), SiteError> {
        self.contact.submit()
    }

    pub fn contact_form(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_form_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn state(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }

    pub fn background(&self) -> Option<&BackgroundAnimator> {
        self.background.as_ref()
    }

    pub fn background_status(&self) -> BackgroundStatus {
        self.background_status
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Tears down the background and cancels any pending navigation. Runs at
    /// most once; also invoked from `Drop`.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(mut animator) = self.background.take() {
            animator.unmount(&mut self.host);
        }
        self.navigation.cancel_pending();
        tracing::info!("site unmounted");
    }
}

impl<H: DisplayHost> Navigator for SiteApp<H> {
    fn navigate_to(&mut self, page: PageId, post: Option<Arc<Post>>) {
        if !self.mounted {
            tracing::debug!(page = %page, "ignoring navigation after unmount");
            return;
        }
        self.navigation.navigate_to(page, post);
    }
}

impl<H: DisplayHost> Drop for SiteApp<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
