//! Test utilities and fixtures for API client testing

#![allow(dead_code)]

/// Pre-populated stores
pub mod fixtures {
    use std::sync::Arc;
    use storage::auth::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use storage::{AuthStorage, MemoryStore};

    /// In-memory store holding the given tokens
    pub fn memory_store_with(access: Option<&str>, refresh: Option<&str>) -> MemoryStore {
        let entries = [(ACCESS_TOKEN_KEY, access), (REFRESH_TOKEN_KEY, refresh)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)));
        MemoryStore::with_entries(entries)
    }

    /// Auth view over an in-memory store holding the given tokens
    pub fn auth_storage_with(access: Option<&str>, refresh: Option<&str>) -> AuthStorage {
        AuthStorage::new(Arc::new(memory_store_with(access, refresh)))
    }
}

/// Sample response bodies
pub mod bodies {
    use serde_json::{json, Value};

    /// Login response with both tokens and a user record
    pub fn login() -> Value {
        json!({
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
            "user": user()
        })
    }

    /// User record as the server returns it
    pub fn user() -> Value {
        json!({
            "id": 7,
            "email": "coder@example.com",
            "created_at": "2024-03-01T09:00:00.000Z",
            "profile_img": null,
            "nickname": "coder",
            "xp": 120,
            "heart": 5
        })
    }

    /// Lesson list
    pub fn lessons() -> Value {
        json!([
            {
                "id": "1",
                "title": "HTML Basics",
                "description": "Tags and structure",
                "duration": "30min",
                "difficulty": "beginner",
                "progress": 0
            },
            {
                "id": 2,
                "title": "CSS Layout",
                "description": "Flexbox and grid",
                "duration": "45min",
                "difficulty": "intermediate"
            }
        ])
    }

    /// Store catalog with one category
    pub fn stores() -> Value {
        json!([
            {
                "id": 1,
                "name": "Web",
                "description": "Front-end courses",
                "Products": [
                    {
                        "id": 10,
                        "name": "HTML",
                        "description": "Start here",
                        "type": "course",
                        "price": 0,
                        "lecture_intro": null
                    }
                ]
            }
        ])
    }
}
