//! Lesson catalog
//!
//! Combines the lesson endpoints with device-local progress. Local progress
//! always replaces whatever the server reported in list and detail views.

use api_client::services::Lesson;
use api_client::ApiClient;
use storage::{KvError, LessonStorage};
use thiserror::Error;

/// Difficulty filter value that matches every lesson
pub const ALL_DIFFICULTIES: &str = "all";

/// Catalog error types
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The server rejected the call
    #[error("API error: {0}")]
    Api(#[from] api_client::Error),

    /// Local storage error
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Lesson catalog service
#[derive(Clone)]
pub struct LessonCatalog {
    client: ApiClient,
    local: LessonStorage,
}

impl LessonCatalog {
    /// Create a catalog sharing the client's store
    pub fn new(client: ApiClient) -> Self {
        let local = LessonStorage::new(client.auth_storage().store().clone());
        Self { client, local }
    }

    /// All lessons with local progress applied
    pub async fn list(&self) -> Result<Vec<Lesson>> {
        let mut lessons = self.client.lessons().list().await.into_result()?;
        for lesson in &mut lessons {
            lesson.progress = self.local.progress(&lesson.id).await?.unwrap_or(0);
        }
        Ok(lessons)
    }

    /// One lesson with local progress applied
    pub async fn get(&self, id: &str) -> Result<Lesson> {
        let mut lesson = self.client.lessons().get(id).await.into_result()?;
        lesson.progress = self.local.progress(id).await?.unwrap_or(0);
        Ok(lesson)
    }

    /// Record progress locally and on the server
    ///
    /// The local write happens first and is kept even if the server call
    /// fails. On success the lesson moves to the front of the recent list.
    pub async fn update_progress(&self, id: &str, progress: u8) -> Result<()> {
        let progress = progress.min(100);
        self.local.set_progress(id, progress).await?;

        self.client
            .lessons()
            .update_progress(id, progress)
            .await
            .into_result()?;

        self.local.push_recent(id).await?;
        tracing::debug!(lesson = id, progress, "Lesson progress updated");
        Ok(())
    }

    /// Local progress for a lesson (0 when none recorded)
    pub async fn progress(&self, id: &str) -> Result<u8> {
        Ok(self.local.progress(id).await?.unwrap_or(0))
    }

    /// Recently studied lesson ids, most recent first
    pub async fn recent_lessons(&self) -> Result<Vec<String>> {
        Ok(self.local.recent_lessons().await?)
    }

    /// Lessons whose title or description contains `query` (case-insensitive)
    pub async fn search(&self, query: &str) -> Result<Vec<Lesson>> {
        Ok(search(self.list().await?, query))
    }

    /// Lessons at a difficulty; [`ALL_DIFFICULTIES`] returns everything
    pub async fn by_difficulty(&self, difficulty: &str) -> Result<Vec<Lesson>> {
        Ok(by_difficulty(self.list().await?, difficulty))
    }

    /// Lessons at 100% progress
    pub async fn completed(&self) -> Result<Vec<Lesson>> {
        Ok(completed(self.list().await?))
    }

    /// Lessons started but not finished
    pub async fn in_progress(&self) -> Result<Vec<Lesson>> {
        Ok(in_progress(self.list().await?))
    }
}

/// Filter by case-insensitive substring match on title or description
pub fn search(lessons: Vec<Lesson>, query: &str) -> Vec<Lesson> {
    let query = query.to_lowercase();
    lessons
        .into_iter()
        .filter(|l| {
            l.title.to_lowercase().contains(&query) || l.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// Filter by exact difficulty
pub fn by_difficulty(lessons: Vec<Lesson>, difficulty: &str) -> Vec<Lesson> {
    if difficulty == ALL_DIFFICULTIES {
        return lessons;
    }
    lessons.into_iter().filter(|l| l.difficulty == difficulty).collect()
}

/// Keep finished lessons
pub fn completed(lessons: Vec<Lesson>) -> Vec<Lesson> {
    lessons.into_iter().filter(|l| l.progress == 100).collect()
}

/// Keep lessons with 0 < progress < 100
pub fn in_progress(lessons: Vec<Lesson>) -> Vec<Lesson> {
    lessons
        .into_iter()
        .filter(|l| l.progress > 0 && l.progress < 100)
        .collect()
}
