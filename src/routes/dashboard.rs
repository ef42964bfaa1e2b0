use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::db;
use crate::db::{financeiro, reproducao};
use crate::error::AppError;
use crate::state::SharedState;

/// Aggregated counters backing the dashboard cards.
pub async fn resumo(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, AppError> {
    let (total, ativos, em_tratamento) = db::animais::contagem(&state.pool).await?;
    let agendados = db::saude::count_agendados(&state.pool).await?;

    let financeiro = db::financeiro::resumo(
        &state.pool,
        &financeiro::ListParams {
            fazenda: None,
            tipo: None,
            categoria: None,
            status: None,
            data_inicio: None,
            data_fim: None,
            limit: 0,
            offset: 0,
        },
    )
    .await?;

    let reproducao = db::reproducao::resumo(
        &state.pool,
        &reproducao::ListParams {
            tipo: None,
            status: None,
            data_inicio: None,
            data_fim: None,
            limit: 0,
            offset: 0,
        },
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "resumo": {
            "rebanho": {
                "total": total,
                "ativos": ativos,
                "emTratamento": em_tratamento,
            },
            "saude": { "agendados": agendados },
            "financeiro": financeiro,
            "reproducao": reproducao,
        },
    })))
}
