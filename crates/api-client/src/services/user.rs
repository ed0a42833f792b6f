//! User profile endpoints

use super::send_json;
use crate::client::ApiClient;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};

/// User record as stored under `userData` and returned by the profile endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User id
    pub id: i64,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Account creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Profile image URL
    #[serde(default)]
    pub profile_img: Option<String>,
    /// Display name
    #[serde(default)]
    pub nickname: Option<String>,
    /// Experience points
    #[serde(default)]
    pub xp: i64,
    /// Remaining hearts
    #[serde(default)]
    pub heart: i64,
    /// Lessons the user has started
    #[serde(default, alias = "totalLessons")]
    pub total_lessons: u32,
    /// Lessons the user has finished
    #[serde(default, alias = "completedLessons")]
    pub completed_lessons: u32,
    /// Accumulated study time as reported by the server (e.g. "12h 30m")
    #[serde(default, alias = "totalTime")]
    pub total_time: Option<String>,
    /// Consecutive study days
    #[serde(default)]
    pub streak: u32,
}

impl UserRecord {
    /// Learning statistics carried by this record
    pub fn stats(&self) -> UserStats {
        UserStats {
            total_lessons: self.total_lessons,
            completed_lessons: self.completed_lessons,
            total_time: self.total_time.clone().unwrap_or_default(),
            streak: self.streak,
        }
    }
}

/// Learning statistics shown on the profile page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Lessons the user has started
    pub total_lessons: u32,
    /// Lessons the user has finished
    pub completed_lessons: u32,
    /// Accumulated study time, empty when unknown
    pub total_time: String,
    /// Consecutive study days
    pub streak: u32,
}

impl UserStats {
    /// Share of started lessons that are finished, 0-100
    pub fn completion_rate(&self) -> u8 {
        if self.total_lessons == 0 {
            return 0;
        }
        let rate = u64::from(self.completed_lessons.min(self.total_lessons)) * 100
            / u64::from(self.total_lessons);
        rate as u8
    }
}

/// Profile update body; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// New profile image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_img: Option<String>,
}

impl ProfileUpdate {
    /// Change the display name
    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Change the profile image
    pub fn profile_img(mut self, url: impl Into<String>) -> Self {
        self.profile_img = Some(url.into());
        self
    }
}

/// Profile endpoint wrappers
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Current user's profile
    pub async fn profile(&self) -> ApiResponse<UserRecord> {
        self.client.request(&ApiRequest::get("/api/users/profile")).await
    }

    /// Update the current user's profile
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResponse<UserRecord> {
        send_json(self.client, ApiRequest::put("/api/users/profile"), update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::bodies;
    use serde_json::json;

    #[test]
    fn test_user_record_parse() {
        let user: UserRecord = serde_json::from_value(bodies::user()).unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.nickname.as_deref(), Some("coder"));
        assert_eq!(user.xp, 120);
        assert!(user.profile_img.is_none());
    }

    #[test]
    fn test_user_stats_from_record() {
        let mut body = bodies::user();
        body["totalLessons"] = json!(12);
        body["completedLessons"] = json!(8);
        body["totalTime"] = json!("24h 30m");
        body["streak"] = json!(5);
        let user: UserRecord = serde_json::from_value(body).unwrap();

        let stats = user.stats();
        assert_eq!(stats.total_lessons, 12);
        assert_eq!(stats.completed_lessons, 8);
        assert_eq!(stats.total_time, "24h 30m");
        assert_eq!(stats.streak, 5);
        assert_eq!(stats.completion_rate(), 66);
    }

    #[test]
    fn test_user_stats_default_when_absent() {
        let user: UserRecord = serde_json::from_value(bodies::user()).unwrap();

        assert_eq!(user.stats(), UserStats::default());
        assert_eq!(user.stats().completion_rate(), 0);
        assert_eq!(
            serde_json::to_value(user.stats()).unwrap(),
            json!({"totalLessons": 0, "completedLessons": 0, "totalTime": "", "streak": 0})
        );
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let body = serde_json::to_string(&ProfileUpdate::default().nickname("neo")).unwrap();
        assert_eq!(body, r#"{"nickname":"neo"}"#);
    }
}
