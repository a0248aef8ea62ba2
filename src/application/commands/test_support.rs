// src/application/commands/test_support.rs
//
// Shared fixtures for command tests: a fresh on-disk state per test.

use crate::application::commands::{admin_commands, auth_commands};
use crate::application::dto::MovieFormDto;
use crate::application::state::AppState;
use crate::config::AppConfig;
use crate::domain::DEFAULT_MAX_POSTER_BYTES;

pub const ADMIN_EMAIL: &str = "critic@cinecritic.test";
pub const ADMIN_PASSWORD: &str = "pa55word";

pub fn state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_path: dir.path().join("cinecritic.db"),
        pool_size: 2,
        max_poster_bytes: DEFAULT_MAX_POSTER_BYTES,
    };
    let state = AppState::initialize(config).unwrap();
    (dir, state)
}

pub async fn signed_in_state() -> (tempfile::TempDir, AppState) {
    let (dir, state) = state();
    auth_commands::register_admin(&state, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();
    auth_commands::sign_in(&state, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();
    (dir, state)
}

pub fn nova_form() -> MovieFormDto {
    MovieFormDto {
        title: "Nova".to_string(),
        genres: vec!["Sci-Fi".to_string()],
        languages: vec!["English".to_string()],
        censor: "U".to_string(),
        rating: 4.2,
        poster: Some("https://img.example/nova.jpg".to_string()),
        review: "Quietly ambitious.".to_string(),
    }
}

fn bloodline_form() -> MovieFormDto {
    MovieFormDto {
        title: "Bloodline".to_string(),
        genres: vec!["Horror".to_string()],
        languages: vec!["English".to_string()],
        censor: "A".to_string(),
        rating: 2.0,
        poster: Some("https://img.example/bloodline.jpg".to_string()),
        review: "Tense, then tiresome.".to_string(),
    }
}

/// Signed in, with Bloodline created before Nova
pub async fn seeded_state() -> (tempfile::TempDir, AppState) {
    let (dir, state) = signed_in_state().await;
    admin_commands::create_movie(&state, bloodline_form())
        .await
        .unwrap();
    admin_commands::create_movie(&state, nova_form()).await.unwrap();
    (dir, state)
}
