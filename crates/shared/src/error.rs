use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotImplemented,
    UnknownPage,
    Content,
    SurfaceUnavailable,
    Config,
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("unknown page id '{0}'")]
    UnknownPage(String),
    #[error("content error: {0}")]
    Content(String),
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl SiteError {
    pub fn content(message: impl Into<String>) -> Self {
        Self::Content(message.into())
    }

    pub fn surface(message: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SiteError::NotImplemented(_) => ErrorCode::NotImplemented,
            SiteError::UnknownPage(_) => ErrorCode::UnknownPage,
            SiteError::Content(_) => ErrorCode::Content,
            SiteError::SurfaceUnavailable(_) => ErrorCode::SurfaceUnavailable,
            SiteError::Config(_) => ErrorCode::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_variants() {
        assert_eq!(
            SiteError::NotImplemented("x").code(),
            ErrorCode::NotImplemented
        );
        assert_eq!(SiteError::surface("no gpu").code(), ErrorCode::SurfaceUnavailable);
        assert_eq!(SiteError::config("bad").code(), ErrorCode::Config);
    }

    #[test]
    fn display_prefixes_are_stable() {
        assert!(SiteError::content("x").to_string().starts_with("content error:"));
        assert!(SiteError::surface("x")
            .to_string()
            .starts_with("rendering surface unavailable:"));
        assert_eq!(
            serde_json::to_string(&ErrorCode::SurfaceUnavailable).expect("serialize"),
            "\"surface_unavailable\""
        );
    }
}
