use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(pub u32);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-level view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    #[default]
    Home,
    Blog,
    BlogPost,
    Contact,
}

impl PageId {
    pub const ALL: [PageId; 4] = [
        PageId::Home,
        PageId::Blog,
        PageId::BlogPost,
        PageId::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Blog => "blog",
            PageId::BlogPost => "blog-post",
            PageId::Contact => "contact",
        }
    }

    /// Lenient route lookup: anything unrecognised selects the home view.
    pub fn from_route(route: &str) -> Self {
        Self::parse_known(route).unwrap_or_default()
    }

    fn parse_known(route: &str) -> Option<Self> {
        let normalized = route.trim().trim_start_matches('/').to_ascii_lowercase();
        match normalized.as_str() {
            "home" | "" => Some(PageId::Home),
            "blog" => Some(PageId::Blog),
            "blog-post" | "blog_post" | "post" => Some(PageId::BlogPost),
            "contact" => Some(PageId::Contact),
            _ => None,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_known(s).ok_or_else(|| SiteError::UnknownPage(s.to_string()))
    }
}

/// One renderable piece of a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Block {
    Paragraph(String),
    Heading { level: u8, text: String },
    List(Vec<String>),
    Code(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub body: Vec<Block>,
}

impl Post {
    /// Parses the display date ("Jan 9, 2025") when it is well formed.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%b %d, %Y").ok()
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_routes_fall_back_to_home() {
        assert_eq!(PageId::from_route("pricing"), PageId::Home);
        assert_eq!(PageId::from_route("  "), PageId::Home);
        assert_eq!(PageId::from_route("/blog"), PageId::Blog);
        assert_eq!(PageId::from_route("post"), PageId::BlogPost);
        assert_eq!(PageId::from_route("Contact"), PageId::Contact);
    }

    #[test]
    fn strict_parse_rejects_unknown_pages() {
        assert_eq!("blog-post".parse::<PageId>().expect("known"), PageId::BlogPost);
        let err = "admin".parse::<PageId>().expect_err("unknown page");
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn page_ids_round_trip_through_their_route_names() {
        for page in PageId::ALL {
            assert_eq!(PageId::from_route(page.as_str()), page);
        }
    }

    #[test]
    fn parses_display_dates() {
        let post = Post {
            id: PostId(1),
            title: "t".to_string(),
            date: "Jan 9, 2025".to_string(),
            body: Vec::new(),
        };
        assert_eq!(
            post.published_on(),
            NaiveDate::from_ymd_opt(2025, 1, 9)
        );

        let undated = Post {
            date: "someday".to_string(),
            ..post
        };
        assert_eq!(undated.published_on(), None);
    }
}
