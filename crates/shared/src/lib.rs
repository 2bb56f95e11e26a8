//! Domain types, error taxonomy and bundled content shared by the site crates.

pub mod content;
pub mod domain;
pub mod error;

pub use content::ContentLibrary;
pub use domain::{Block, PageId, Post, PostId};
pub use error::{ErrorCode, SiteError};
