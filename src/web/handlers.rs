//! Route handlers for the recommendation page

use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::utils::error::{CrewError, ErrorCategory};
use crate::web::state::AppState;
use crate::web::templates;

#[derive(Debug, Deserialize)]
pub struct LifestyleInput {
    #[serde(default)]
    pub lifestyle: String,
}

/// 首頁：沒有金鑰時直接顯示設定說明並停用按鈕
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    if state.advisor.api_key_configured() {
        return Html(templates::page_html("", true, "")).into_response();
    }

    let error = missing_key(&state);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Html(templates::page_html("", false, &templates::missing_key_html(&error))),
    )
        .into_response()
}

/// 表單送出；讀不到表單內容也回同一個頁面
pub async fn submit(
    State(state): State<Arc<AppState>>,
    form: std::result::Result<Form<LifestyleInput>, FormRejection>,
) -> Response {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            let error = CrewError::InvalidForm {
                message: rejection.body_text(),
            };
            return error_page("", state.advisor.api_key_configured(), &error);
        }
    };

    match state.advisor.recommend(&input.lifestyle).await {
        Ok(recommendations) => {
            tracing::info!("✅ Recommendations ready for '{}'", recommendations.lifestyle);
            Html(templates::page_html(
                &recommendations.lifestyle,
                true,
                &templates::results_html(&recommendations),
            ))
            .into_response()
        }
        Err(e) => error_page(&input.lifestyle, state.advisor.api_key_configured(), &e),
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.advisor.model(),
        "api_key_configured": state.advisor.api_key_configured(),
    }))
}

fn missing_key(state: &AppState) -> CrewError {
    CrewError::MissingApiKey {
        key: state.advisor.api_key_name().to_string(),
    }
}

fn error_page(lifestyle: &str, form_enabled: bool, error: &CrewError) -> Response {
    let (status, content) = match error.category() {
        ErrorCategory::Configuration => {
            tracing::error!("❌ Request halted: {}", error);
            (StatusCode::SERVICE_UNAVAILABLE, templates::missing_key_html(error))
        }
        ErrorCategory::Input => {
            tracing::info!("⚠️ Request rejected: {}", error);
            (StatusCode::UNPROCESSABLE_ENTITY, templates::error_html(error))
        }
        _ => {
            tracing::error!(
                "❌ Crew run failed: {} (Category: {:?}, Severity: {:?})",
                error,
                error.category(),
                error.severity()
            );
            (StatusCode::BAD_GATEWAY, templates::error_html(error))
        }
    };

    (status, Html(templates::page_html(lifestyle, form_enabled, &content))).into_response()
}
