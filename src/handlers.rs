use crate::errors::AppError;
use crate::models::{Notice, NoticeKind, PageState, VoteChoice, VoteForm, VoteOutcome};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::{Html, Redirect},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let notice = query
        .notice
        .as_deref()
        .and_then(NoticeKind::parse)
        .map(NoticeKind::notice);
    Html(render_index(&state.sync.snapshot(), notice.as_ref()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<PageState> {
    Json(state.sync.snapshot())
}

pub async fn vote(
    State(state): State<AppState>,
    payload: Result<Json<VoteForm>, JsonRejection>,
) -> Result<Json<VoteOutcome>, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let choice = payload
        .vote_type
        .parse::<VoteChoice>()
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    state.sync.cast_vote(choice).await?;

    Ok(Json(VoteOutcome {
        notice: accepted_notice(choice),
        state: state.sync.snapshot(),
    }))
}

pub async fn vote_boy(State(state): State<AppState>) -> Redirect {
    submit_form_vote(&state, VoteChoice::Boy).await
}

pub async fn vote_girl(State(state): State<AppState>) -> Redirect {
    submit_form_vote(&state, VoteChoice::Girl).await
}

async fn submit_form_vote(state: &AppState, choice: VoteChoice) -> Redirect {
    let kind = match state.sync.cast_vote(choice).await {
        Ok(_) => NoticeKind::Counted,
        Err(err) => err.kind(),
    };
    Redirect::to(&format!("/?notice={}", kind.as_str()))
}

fn accepted_notice(choice: VoteChoice) -> Notice {
    let title = match choice {
        VoteChoice::Boy => "A vote for a boy!",
        VoteChoice::Girl => "A vote for a girl!",
    };
    Notice::info(title, "Your vote is counted. We will know the answer soon!")
}
