//! Bundled blog content, kept as a declarative record apart from rendering.

use std::{collections::HashSet, fs, path::Path, sync::Arc};

use serde::Deserialize;

use crate::{
    domain::{Post, PostId},
    error::SiteError,
};

const BUNDLED_POSTS: &str = include_str!("../content/posts.json");

#[derive(Debug, Deserialize)]
struct ContentFile {
    posts: Vec<Post>,
}

/// Fixed, insertion-ordered post collection.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    posts: Vec<Arc<Post>>,
}

impl ContentLibrary {
    pub fn bundled() -> Result<Self, SiteError> {
        Self::from_json(BUNDLED_POSTS)
    }

    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            SiteError::content(format!("failed to read '{}': {err}", path.display()))
        })?;
        let library = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            posts = library.len(),
            "loaded content library"
        );
        Ok(library)
    }

    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let file: ContentFile = serde_json::from_str(raw)
            .map_err(|err| SiteError::content(format!("malformed content record: {err}")))?;

        let mut seen = HashSet::new();
        for post in &file.posts {
            if !seen.insert(post.id) {
                return Err(SiteError::content(format!("duplicate post id {}", post.id)));
            }
        }

        Ok(Self {
            posts: file.posts.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn posts(&self) -> &[Arc<Post>] {
        &self.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Arc<Post>> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
