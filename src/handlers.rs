use crate::actions::Action;
use crate::errors::AppError;
use crate::models::{
    FoodRequest, Meal, QuickAddForm, QuickItem, RemoveFoodForm, ResetForm, ResetRequest,
    SummaryResponse, TrackerData, WorkoutForm, WorkoutRequest, WorkoutSlot,
};
use crate::state::AppState;
use crate::stats::build_summary;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let data = state.snapshot().await?;
    Ok(Html(render_index(&data)))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<TrackerData>, AppError> {
    Ok(Json(state.snapshot().await?))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let data = state.snapshot().await?;
    Ok(Json(build_summary(&data)))
}

pub async fn add_food(
    State(state): State<AppState>,
    Json(payload): Json<FoodRequest>,
) -> Result<Json<TrackerData>, AppError> {
    let (meal, entry) = payload.into_parts();
    let data = state.dispatch(Action::AddFood { meal, entry }).await?;
    Ok(Json(data))
}

pub async fn remove_food(
    State(state): State<AppState>,
    Path((meal, index)): Path<(Meal, usize)>,
) -> Result<Json<TrackerData>, AppError> {
    let data = state.dispatch(Action::RemoveFood { meal, index }).await?;
    Ok(Json(data))
}

pub async fn save_workout(
    State(state): State<AppState>,
    Path(slot): Path<WorkoutSlot>,
    Json(payload): Json<WorkoutRequest>,
) -> Result<Json<TrackerData>, AppError> {
    let data = state
        .dispatch(Action::SaveWorkout {
            slot,
            notes: payload.notes,
        })
        .await?;
    Ok(Json(data))
}

pub async fn reset_day(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<TrackerData>, AppError> {
    let data = state
        .dispatch(Action::ResetDay {
            confirmed: payload.confirm,
        })
        .await?;
    Ok(Json(data))
}

pub async fn form_add_food(
    State(state): State<AppState>,
    Form(payload): Form<FoodRequest>,
) -> Result<Redirect, AppError> {
    let (meal, entry) = payload.into_parts();
    state.dispatch(Action::AddFood { meal, entry }).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_quick_add(
    State(state): State<AppState>,
    Form(payload): Form<QuickAddForm>,
) -> Result<Redirect, AppError> {
    let item = QuickItem::find(&payload.item)
        .ok_or_else(|| AppError::not_found(format!("unknown quick item '{}'", payload.item)))?;
    state
        .dispatch(Action::AddFood {
            meal: item.meal,
            entry: item.entry(),
        })
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn form_remove_food(
    State(state): State<AppState>,
    Form(payload): Form<RemoveFoodForm>,
) -> Result<Redirect, AppError> {
    state
        .dispatch(Action::RemoveFood {
            meal: payload.meal,
            index: payload.index,
        })
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn form_save_workout(
    State(state): State<AppState>,
    Form(payload): Form<WorkoutForm>,
) -> Result<Redirect, AppError> {
    state
        .dispatch(Action::SaveWorkout {
            slot: payload.slot,
            notes: payload.notes,
        })
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn form_reset_day(
    State(state): State<AppState>,
    Form(payload): Form<ResetForm>,
) -> Result<Redirect, AppError> {
    state
        .dispatch(Action::ResetDay {
            confirmed: payload.confirm.is_some(),
        })
        .await?;
    Ok(Redirect::to("/"))
}
