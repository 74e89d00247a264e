//! Account HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{AccountProfile, Login, Register};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub name: String,
    pub email: String,
}

impl From<AccountProfile> for AccountResponse {
    fn from(p: AccountProfile) -> Self {
        Self {
            name: p.name,
            email: p.email,
        }
    }
}

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let command = Register {
        name: req.name,
        email: req.email,
        password: req.password,
    };
    let profile = state.register_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(profile.into())))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let command = Login {
        email: req.email,
        password: req.password,
    };
    let profile = state.login_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(profile.into())))
}
