use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::json;

use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

const ADMIN_EMAIL: &str = "admin@gadogest.com";
const ADMIN_SENHA: &str = "admin123";

#[derive(Deserialize)]
pub struct InicializarParams {
    pub codigo: Option<String>,
}

/// Seeds the default administrator on an empty database. Gated by the
/// configured access code; calling it again is a no-op.
pub async fn inicializar(
    State(state): State<SharedState>,
    Query(params): Query<InicializarParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    if params.codigo.as_deref() != Some(state.config.seed_code.as_str()) {
        return Err(AppError::Unauthorized("Código de acesso inválido.".to_string()));
    }

    // Advisory lock serializes concurrent first calls; only one can seed.
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    let usuarios = db::usuarios::count_all(&mut *tx).await?;
    if usuarios == 0 {
        let senha_hash = password::hash(ADMIN_SENHA).map_err(AppError::Internal)?;
        db::usuarios::create(
            &mut *tx,
            "Administrador",
            ADMIN_EMAIL,
            &senha_hash,
            "Fazenda GadoGest",
            "Administrador",
        )
        .await?;
        tracing::info!(email = ADMIN_EMAIL, "usuário administrador criado");
    } else {
        tracing::info!(usuarios, "banco de dados já inicializado");
    }
    tx.commit().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Banco de dados inicializado com sucesso!",
        "usuarioAdmin": {
            "email": ADMIN_EMAIL,
            "senha": ADMIN_SENHA,
        },
    })))
}
