#![allow(dead_code)]

use axum::Router;

use ustoz_backend_rust::core::ViewState;
use ustoz_backend_rust::routes;
use ustoz_backend_rust::services::gemini::{
    DifficultyLevel, GeminiClient, Source, Syllabus, Topic,
};
use ustoz_backend_rust::state::AppState;

/// Router with an empty credential: every generation call fails with
/// the not-configured error before any request leaves the host.
pub async fn create_test_app() -> Router {
    std::env::set_var("GEMINI_API_KEY", "");
    ustoz_backend_rust::create_app().await
}

/// Router whose session already holds a generated syllabus, the way a
/// user would have reached ViewSyllabus.
pub async fn create_seeded_app() -> Router {
    std::env::set_var("GEMINI_API_KEY", "");
    let state = AppState::new(GeminiClient::from_env());

    {
        let session = state.session();
        let mut guard = session.write().await;
        guard.navigate(ViewState::CreateSyllabus).unwrap();
        guard
            .begin_syllabus_generation("Artificial Intelligence", 3, DifficultyLevel::Intermediate)
            .unwrap();
        guard.syllabus_generated(sample_syllabus());
    }

    routes::router(state)
}

pub fn sample_syllabus() -> Syllabus {
    Syllabus {
        subject: "Artificial Intelligence".to_string(),
        difficulty: DifficultyLevel::Intermediate,
        topics: vec![
            Topic {
                id: "t1".to_string(),
                title: "Search".to_string(),
                description: "State-space search".to_string(),
                week: 1,
            },
            Topic {
                id: "t2".to_string(),
                title: "Logic".to_string(),
                description: "Propositional logic".to_string(),
                week: 2,
            },
            Topic {
                id: "t3".to_string(),
                title: "Learning".to_string(),
                description: "Supervised learning".to_string(),
                week: 3,
            },
        ],
        sources: vec![Source {
            university: "MIT".to_string(),
            url: "https://ocw.mit.edu".to_string(),
            title: "6.034 Artificial Intelligence".to_string(),
        }],
    }
}
