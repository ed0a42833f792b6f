//! Local lesson progress and recently studied lessons

use crate::kv::{self, KeyValueStore, Result};
use std::sync::Arc;

/// Prefix for per-lesson progress keys (`lessonProgress_<id>`)
pub const LESSON_PROGRESS_PREFIX: &str = "lessonProgress";

/// Key holding the recently studied lesson ids, most recent first
pub const RECENT_LESSONS_KEY: &str = "recentLessons";

/// Maximum number of recent lessons kept
pub const MAX_RECENT_LESSONS: usize = 10;

/// Device-local lesson bookkeeping
#[derive(Clone)]
pub struct LessonStorage {
    kv: Arc<dyn KeyValueStore>,
}

impl LessonStorage {
    /// Wrap a store
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn progress_key(lesson_id: &str) -> String {
        format!("{}_{}", LESSON_PROGRESS_PREFIX, lesson_id)
    }

    /// Locally recorded progress (0-100) for a lesson
    pub async fn progress(&self, lesson_id: &str) -> Result<Option<u8>> {
        kv::get_json(self.kv.as_ref(), &Self::progress_key(lesson_id)).await
    }

    /// Record progress for a lesson, clamped to 100
    pub async fn set_progress(&self, lesson_id: &str, progress: u8) -> Result<()> {
        kv::set_json(self.kv.as_ref(), &Self::progress_key(lesson_id), &progress.min(100)).await
    }

    /// Recently studied lesson ids, most recent first
    pub async fn recent_lessons(&self) -> Result<Vec<String>> {
        Ok(kv::get_json(self.kv.as_ref(), RECENT_LESSONS_KEY).await?.unwrap_or_default())
    }

    /// Move `lesson_id` to the front of the recent list
    ///
    /// Returns the updated list.
    pub async fn push_recent(&self, lesson_id: &str) -> Result<Vec<String>> {
        let mut recent = self.recent_lessons().await?;
        recent.retain(|id| id != lesson_id);
        recent.insert(0, lesson_id.to_string());
        recent.truncate(MAX_RECENT_LESSONS);

        kv::set_json(self.kv.as_ref(), RECENT_LESSONS_KEY, &recent).await?;
        Ok(recent)
    }
}
