use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::validation::{self, FieldErrors};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadastroRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub confirmar_senha: Option<String>,
    pub nome_fazenda: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub senha: Option<String>,
}

pub async fn cadastro(
    State(state): State<SharedState>,
    Json(req): Json<CadastroRequest>,
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
    errors.require_str(req.confirmar_senha.as_deref(), "Por favor, confirme a senha");
    errors.require_str(
        req.nome_fazenda.as_deref(),
        "Por favor, informe o nome da fazenda",
    );
    errors.finish()?;

    if req.senha != req.confirmar_senha {
        return Err(AppError::BadRequest("As senhas não coincidem".to_string()));
    }

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
        req.nome_fazenda.as_deref().unwrap_or_default().trim(),
        "Administrador",
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Este email já está em uso".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(email = %usuario.email, "usuário cadastrado");

    Ok(Json(json!({
        "success": true,
        "message": "Usuário cadastrado com sucesso",
        "usuario": {
            "id": usuario.id,
            "nome": usuario.nome,
            "email": usuario.email,
            "fazenda": usuario.fazenda,
        },
    })))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (Some(email), Some(senha)) = (req.email.as_deref(), req.senha.as_deref()) else {
        return Err(AppError::BadRequest(
            "Por favor, informe email e senha".to_string(),
        ));
    };

    // A single generic message: unknown email and wrong password are
    // indistinguishable to the caller.
    let usuario = db::usuarios::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Credenciais inválidas".to_string()))?;

    let senha_correta =
        password::verify(senha, &usuario.senha_hash).map_err(AppError::Internal)?;
    if !senha_correta {
        return Err(AppError::Unauthorized("Credenciais inválidas".to_string()));
    }

    db::usuarios::touch_ultimo_acesso(&state.pool, usuario.id).await?;

    let claims = Claims::new(usuario.id, usuario.nome.clone(), usuario.fazenda.clone());
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "usuario": {
            "id": usuario.id,
            "nome": usuario.nome,
            "email": usuario.email,
            "fazenda": usuario.fazenda,
            "cargo": usuario.cargo,
        },
    })))
}

pub async fn perfil(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let usuario = db::usuarios::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuário não encontrado".to_string()))?;

    Ok(Json(json!({ "success": true, "usuario": usuario })))
}
