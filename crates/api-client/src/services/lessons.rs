//! Lesson endpoints

use super::{send_json, string_or_number};
use crate::client::ApiClient;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lesson slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide number
    pub id: u32,
    /// Slide title
    pub title: String,
    /// Slide body
    pub content: String,
    /// Slide kind (e.g. "text", "code")
    #[serde(rename = "type")]
    pub kind: String,
    /// Programming language for code slides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Lesson as returned by the lesson endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Lesson id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Human-readable duration
    #[serde(default)]
    pub duration: String,
    /// "beginner", "intermediate" or "advanced"
    #[serde(default)]
    pub difficulty: String,
    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: u8,
    /// Slides, when the lesson detail includes them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<Vec<Slide>>,
}

/// Server-side progress record for a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: u8,
}

/// Progress update body
#[derive(Debug, Clone, Serialize)]
struct ProgressUpdate {
    progress: u8,
}

/// Lesson endpoint wrappers
#[derive(Debug, Clone, Copy)]
pub struct LessonsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LessonsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All lessons
    pub async fn list(&self) -> ApiResponse<Vec<Lesson>> {
        self.client.request(&ApiRequest::get("/api/lessons")).await
    }

    /// One lesson by id
    pub async fn get(&self, id: &str) -> ApiResponse<Lesson> {
        self.client
            .request(&ApiRequest::get(format!("/api/lessons/{}", id)))
            .await
    }

    /// Server-side progress for a lesson
    pub async fn progress(&self, id: &str) -> ApiResponse<LessonProgress> {
        self.client
            .request(&ApiRequest::get(format!("/api/lessons/{}/progress", id)))
            .await
    }

    /// Record progress for a lesson
    pub async fn update_progress(&self, id: &str, progress: u8) -> ApiResponse<Value> {
        let request = ApiRequest::put(format!("/api/lessons/{}/progress", id));
        send_json(self.client, request, &ProgressUpdate { progress }).await
    }
}
