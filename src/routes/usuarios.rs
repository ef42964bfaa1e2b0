use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::validation::{self, FieldErrors};

#[derive(Deserialize)]
pub struct CriarUsuario {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub fazenda: Option<String>,
    pub cargo: Option<String>,
}

#[derive(Deserialize)]
pub struct AtualizarUsuario {
    pub nome: Option<String>,
    pub fazenda: Option<String>,
    pub cargo: Option<String>,
    pub ativo: Option<bool>,
}

pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let usuarios = db::usuarios::list_all(&state.pool).await?;

    Ok(Json(json!({
        "success": true,
        "total": usuarios.len(),
        "usuarios": usuarios,
    })))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CriarUsuario>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.require_str(req.nome.as_deref(), "Por favor, informe o nome");
    errors.max_len(req.nome.as_deref(), 50, "Nome não pode ter mais de 50 caracteres");
    errors.require_str(req.email.as_deref(), "Por favor, informe o email");
    if let Some(email) = req.email.as_deref() {
        if !email.trim().is_empty() {
            errors.check(
                validation::email_valido(email.trim()),
                "Por favor, informe um email válido",
            );
        }
    }
    errors.require_str(req.senha.as_deref(), "Por favor, informe uma senha");
    if let Some(senha) = req.senha.as_deref() {
        errors.check(
            senha.is_empty() || senha.chars().count() >= 6,
            "Senha deve ter pelo menos 6 caracteres",
        );
    }
    errors.require_str(req.fazenda.as_deref(), "Por favor, informe o nome da fazenda");
    errors.require_str(req.cargo.as_deref(), "Por favor, informe o cargo");
    errors.one_of(req.cargo.as_deref(), validation::CARGOS, "cargo");
    errors.finish()?;

    let email = req.email.as_deref().unwrap_or_default().trim().to_string();
    if db::usuarios::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Este email já está em uso".to_string()));
    }

    let senha_hash =
        password::hash(req.senha.as_deref().unwrap_or_default()).map_err(AppError::Internal)?;

    let usuario = db::usuarios::create(
        &state.pool,
        req.nome.as_deref().unwrap_or_default().trim(),
        &email,
        &senha_hash,
        req.fazenda.as_deref().unwrap_or_default().trim(),
        req.cargo.as_deref().unwrap_or("Funcionário"),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Este email já está em uso".to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Usuário cadastrado com sucesso",
        "usuario": usuario,
    })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AtualizarUsuario>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.max_len(req.nome.as_deref(), 50, "Nome não pode ter mais de 50 caracteres");
    errors.one_of(req.cargo.as_deref(), validation::CARGOS, "cargo");
    errors.finish()?;

    db::usuarios::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))?;

    let usuario = db::usuarios::update(
        &state.pool,
        id,
        req.nome.as_deref(),
        req.fazenda.as_deref(),
        req.cargo.as_deref(),
        req.ativo,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Usuário não encontrado".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Usuário atualizado com sucesso",
        "usuario": usuario,
    })))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removidos = db::usuarios::delete(&state.pool, id).await?;
    if removidos == 0 {
        return Err(AppError::NotFound("Usuário não encontrado".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Usuário excluído com sucesso",
    })))
}
