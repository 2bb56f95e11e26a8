//! Navigation, page rendering and background animation for the Qasly Labs
//! site. Everything here is host-independent; the GUI and the command-line
//! tools plug in their own [`host::DisplayHost`] and [`clock::Clock`].

pub mod app;
pub mod background;
pub mod chrome;
pub mod clock;
pub mod config;
pub mod contact;
pub mod host;
pub mod navigation;
pub mod pages;
pub mod view;

pub use app::{BackgroundStatus, Composition, PumpOutcome, SiteApp};
pub use background::{BackgroundAnimator, Camera, Frame, ParticleField, ProjectedPoint};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_settings, BackgroundSettings, SiteSettings};
pub use contact::{ContactField, ContactForm};
pub use host::{DisplayHost, HeadlessHost, Viewport};
pub use navigation::{NavRequest, NavigationController, NavigationState, Navigator};
pub use pages::{PageContext, PageRegistry};
pub use view::{Node, View};
