use crate::errors::AppError;
use crate::models::{SearchParams, SendReminderResponse};
use crate::notify::Severity;
use crate::state::AppState;
use crate::ui;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::error;

/// Delay before the page refetches the reminder list after a successful send,
/// so the operator sees the updated state land.
pub const RELOAD_DELAY_MS: u64 = 2000;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let notices = state.notices.lock().await.active();
    Html(ui::render_dashboard(&state.summary, &notices))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.trim();
    if query.is_empty() {
        return Html(ui::render_search_prompt()).into_response();
    }

    let ticket = state.begin_search();
    match state.upstream.search_members(query).await {
        Ok(members) => {
            if !state.search_is_current(ticket) {
                // A newer search started while this one was in flight; the
                // page keeps the newer panel.
                return StatusCode::NO_CONTENT.into_response();
            }
            Html(ui::render_search_results(&members, state.upstream.base_url())).into_response()
        }
        Err(err) => {
            error!("member search failed: {err}");
            Html(ui::render_search_error()).into_response()
        }
    }
}

pub async fn reminders(State(state): State<AppState>) -> Html<String> {
    match state.upstream.members_needing_reminders().await {
        Ok(members) => Html(ui::render_reminder_list(&members)),
        Err(err) => {
            error!("loading reminder list failed: {err}");
            Html(ui::render_reminder_error())
        }
    }
}

pub async fn send_reminder(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> Result<Json<SendReminderResponse>, AppError> {
    Ok(Json(dispatch_reminder(&state, member_id).await?))
}

pub async fn test_reminder(
    State(state): State<AppState>,
) -> Result<Json<SendReminderResponse>, AppError> {
    let contacts = state.upstream.members_with_phones().await?;
    let Some(contact) = contacts.first() else {
        let notification = state.notices.lock().await.push(
            "No members with phone numbers found. Add phone numbers first.",
            Severity::Error,
        );
        return Ok(Json(SendReminderResponse {
            success: false,
            notification,
            reload_after_ms: None,
        }));
    };

    Ok(Json(dispatch_reminder(&state, contact.id).await?))
}

async fn dispatch_reminder(
    state: &AppState,
    member_id: i64,
) -> Result<SendReminderResponse, AppError> {
    let outcome = state.upstream.send_reminder(member_id).await?;

    let mut notices = state.notices.lock().await;
    if outcome.success {
        let name = outcome.member_name.as_deref().unwrap_or("member");
        let days = outcome.days_until_expiry.unwrap_or(0);
        let notification = notices.push(
            format!("\u{1F4F1} SMS sent to {name} ({days} days until expiry)"),
            Severity::Success,
        );
        Ok(SendReminderResponse {
            success: true,
            notification,
            reload_after_ms: Some(RELOAD_DELAY_MS),
        })
    } else {
        let reason = outcome.message.as_deref().unwrap_or("unknown error");
        let notification = notices.push(format!("Failed: {reason}"), Severity::Error);
        Ok(SendReminderResponse {
            success: false,
            notification,
            reload_after_ms: None,
        })
    }
}

pub async fn notifications(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.notices.lock().await.active())
}

pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> StatusCode {
    state.notices.lock().await.dismiss(id);
    StatusCode::NO_CONTENT
}
