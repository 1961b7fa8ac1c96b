use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::company::CompanyRow;
use crate::models::student::StudentProfileRow;
use crate::placement::repository::{
    get_or_create_profile, insert_company, list_companies, upsert_profile,
};
use crate::placement::validation::{
    validate_company, validate_profile, validate_username, NewCompany, ProfileUpdate,
};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub profile: StudentProfileRow,
    pub companies: Vec<CompanyRow>,
}

/// POST /coordinator
pub async fn handle_create_company(
    State(state): State<AppState>,
    WithRejection(Form(company), _): WithRejection<Form<NewCompany>, AppError>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    validate_company(&company)?;
    let row = insert_company(&state.db, &company).await?;
    info!("Company posting {} recorded: {} ({})", row.id, row.name, row.role);
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    Ok(Json(list_companies(&state.db).await?))
}

/// GET /students/:username/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    validate_username(&username)?;
    let profile = get_or_create_profile(&state.db, &username).await?;
    let companies = list_companies(&state.db).await?;
    Ok(Json(DashboardResponse { profile, companies }))
}

/// PUT /students/:username/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    WithRejection(Json(update), _): WithRejection<Json<ProfileUpdate>, AppError>,
) -> Result<Json<DashboardResponse>, AppError> {
    validate_username(&username)?;
    validate_profile(&update)?;
    let profile = upsert_profile(&state.db, &username, &update).await?;
    let companies = list_companies(&state.db).await?;
    Ok(Json(DashboardResponse { profile, companies }))
}
