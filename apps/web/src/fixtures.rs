//! Startup fixtures: the groups posts can be tagged to.
//!
//! ```json
//! {"groups": [{"title": "Лев Толстой", "slug": "leo", "description": "..."}]}
//! ```

use std::path::Path;

use serde::Deserialize;

use yatube_core::domain::{GROUP_TITLE_MAX_LEN, Group};
use yatube_core::error::RepoError;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixtures: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed fixtures: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid group {slug:?}: {reason}")]
    InvalidGroup { slug: String, reason: &'static str },

    #[error("Failed to store fixtures: {0}")]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupFixture {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub groups: Vec<GroupFixture>,
}

impl Fixtures {
    /// Parse and validate a fixtures document.
    pub fn parse(raw: &str) -> Result<Self, FixtureError> {
        let fixtures: Fixtures = serde_json::from_str(raw)?;
        for group in &fixtures.groups {
            let reason = if !Group::is_valid_slug(&group.slug) {
                Some("slug must be 1 to 50 ASCII letters, digits, '-' or '_'")
            } else if group.title.trim().is_empty() {
                Some("title is empty")
            } else if group.title.chars().count() > GROUP_TITLE_MAX_LEN {
                Some("title is too long")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(FixtureError::InvalidGroup {
                    slug: group.slug.clone(),
                    reason,
                });
            }
        }
        Ok(fixtures)
    }

    pub async fn from_path(path: &Path) -> Result<Self, FixtureError> {
        Self::parse(&tokio::fs::read_to_string(path).await?)
    }
}

/// Store the fixture groups. A group whose slug already exists is updated
/// in place. Returns the number of groups written.
pub async fn apply(state: &AppState, fixtures: Fixtures) -> Result<usize, FixtureError> {
    let mut written = 0;
    for fixture in fixtures.groups {
        let group = match state.groups.find_by_slug(&fixture.slug).await? {
            Some(mut existing) => {
                existing.title = fixture.title;
                existing.description = fixture.description;
                existing
            }
            None => Group::new(fixture.title, fixture.slug, fixture.description),
        };
        let group = state.groups.save(group).await?;
        tracing::debug!(slug = %group.slug, "Fixture group stored");
        written += 1;
    }
    Ok(written)
}

/// Load the fixtures file at `path` into the store.
pub async fn load(state: &AppState, path: &Path) -> Result<usize, FixtureError> {
    let fixtures = Fixtures::from_path(path).await?;
    let written = apply(state, fixtures).await?;
    tracing::info!(path = %path.display(), groups = written, "Fixtures loaded");
    Ok(written)
}
