//! Status banner modeling for the site window.

use shared::{ErrorCode, SiteError};

pub const BACKGROUND_UNAVAILABLE: &str = "Background animation is unavailable on this display.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

impl StatusBanner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: StatusBannerSeverity::Info,
            message: message.into(),
        }
    }

    pub fn from_error(err: &SiteError) -> Self {
        let message = match err.code() {
            ErrorCode::NotImplemented => {
                "Messages can't be sent from this form yet. Please reach out by email instead."
                    .to_string()
            }
            ErrorCode::SurfaceUnavailable => BACKGROUND_UNAVAILABLE.to_string(),
            ErrorCode::Content => format!("Some content could not be loaded: {err}"),
            ErrorCode::UnknownPage | ErrorCode::Config => format!("Unexpected error: {err}"),
        };
        let severity = match err.code() {
            ErrorCode::SurfaceUnavailable => StatusBannerSeverity::Info,
            _ => StatusBannerSeverity::Error,
        };
        Self { severity, message }
    }
}
