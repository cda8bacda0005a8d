use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{error, info};
use crate::AppState;
use crate::error::{AppError, TaskError};
use crate::logger::log_request;
use crate::metrics::{MetricsSnapshot, Task};
use crate::models::{AnalyzeResponse, PromptRequest, RefineResponse, RewriteResponse, Usage};
use crate::tasks;

type Body = Result<Json<PromptRequest>, JsonRejection>;

pub async fn health_check() -> &'static str {

    "OK"

}

pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {

    Json(state.metrics.snapshot())

}

pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Body
) -> Result<Json<AnalyzeResponse>, AppError> {

    let prompt = accept(&state, Task::Analyze, body)?;

    let (result, usage) = tasks::analyze(state.provider.as_ref(), &prompt)
        .await
        .map_err(|e| fail(&state, Task::Analyze, e))?;

    if !result.is_parsed() {
        state.metrics.record_unparsed();
    }
    complete(&state, Task::Analyze, usage);

    Ok(Json(AnalyzeResponse { result, usage }))

}

pub async fn rewrite_handler(
    State(state): State<AppState>,
    body: Body
) -> Result<Json<RewriteResponse>, AppError> {

    let prompt = accept(&state, Task::Rewrite, body)?;

    let (result, usage) = tasks::rewrite(state.provider.as_ref(), &prompt)
        .await
        .map_err(|e| fail(&state, Task::Rewrite, e))?;

    complete(&state, Task::Rewrite, usage);

    Ok(Json(RewriteResponse { result, usage }))

}

pub async fn refine_handler(
    State(state): State<AppState>,
    body: Body
) -> Result<Json<RefineResponse>, AppError> {

    let prompt = accept(&state, Task::Refine, body)?;

    let (final_prompt, usage) = tasks::refine(state.provider.as_ref(), &prompt)
        .await
        .map_err(|e| fail(&state, Task::Refine, e))?;

    complete(&state, Task::Refine, usage);

    Ok(Json(RefineResponse { final_prompt, usage }))

}

// counts the request and validates the body before any provider call
fn accept(state: &AppState, task: Task, body: Body) -> Result<String, AppError> {

    state.metrics.record_request(task);

    let Json(request) = body
        .map_err(|rejection| report(state, task, AppError::BadRequest(rejection.body_text())))?;

    tasks::validate_prompt(request.prompt).map_err(|e| fail(state, task, e))

}

fn fail(state: &AppState, task: Task, e: TaskError) -> AppError {

    report(state, task, AppError::from_task(task.as_str(), e))

}

fn report(state: &AppState, task: Task, app_error: AppError) -> AppError {

    state.metrics.record_failure();
    error!(task = task.as_str(), status = app_error.status().as_u16(), error = %app_error, "request failed");
    app_error

}

fn complete(state: &AppState, task: Task, usage: Usage) {

    state.metrics.record_usage(usage);
    info!(
        task = task.as_str(),
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_tokens = usage.total_tokens,
        "request completed"
    );

    if let Some(path) = &state.log_path {
        log_request(path, task, state.provider.model(), &usage);
    }

}
