use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db;
use crate::db::reproducao::{AtualizacaoReproducao, ListParams, NovoRegistroReproducao};
use crate::error::AppError;
use crate::models::Bezerros;
use crate::state::SharedState;
use crate::validation::{self, FieldErrors};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltroReproducao {
    pub tipo: Option<String>,
    pub status: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub pagina: Option<i64>,
    pub limite: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarRegistroReproducao {
    pub tipo: Option<String>,
    pub data_evento: Option<String>,
    pub data_prevista: Option<String>,
    pub femea: Option<Uuid>,
    pub macho: Option<Uuid>,
    pub metodo: Option<String>,
    pub responsavel: Option<String>,
    pub status: Option<String>,
    pub observacoes: Option<String>,
    pub bezerros: Option<Bezerros>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarRegistroReproducao {
    pub tipo: Option<String>,
    pub data_evento: Option<String>,
    pub data_prevista: Option<String>,
    pub macho: Option<Uuid>,
    pub metodo: Option<String>,
    pub responsavel: Option<String>,
    pub status: Option<String>,
    pub observacoes: Option<String>,
    pub bezerros: Option<Bezerros>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filtro): Query<FiltroReproducao>,
) -> Result<Json<serde_json::Value>, AppError> {
    let pagina = filtro.pagina.unwrap_or(1).max(1);
    let limite = filtro.limite.unwrap_or(100).max(1);

    let params = ListParams {
        tipo: filtro.tipo,
        status: filtro.status,
        data_inicio: filtro.data_inicio.as_deref().and_then(validation::parse_data),
        data_fim: filtro.data_fim.as_deref().and_then(validation::parse_data),
        limit: limite,
        offset: (pagina - 1) * limite,
    };

    let registros = db::reproducao::list(&state.pool, &params).await?;
    let total = db::reproducao::count(&state.pool, &params).await?;
    let resumo = db::reproducao::resumo(&state.pool, &params).await?;

    Ok(Json(json!({
        "success": true,
        "pagina": pagina,
        "limite": limite,
        "total": total,
        "totalPaginas": (total as f64 / limite as f64).ceil() as i64,
        "resumo": resumo,
        "dados": registros,
    })))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CriarRegistroReproducao>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.require_str(req.tipo.as_deref(), "Por favor, informe o tipo do evento");
    errors.one_of(req.tipo.as_deref(), validation::REPRODUCAO_TIPOS, "tipo");
    let data_evento =
        errors.require_data(req.data_evento.as_deref(), "Por favor, informe a data do evento");
    let data_prevista = errors.optional_data(req.data_prevista.as_deref());
    errors.require(&req.femea, "Por favor, informe a fêmea");
    errors.require_str(req.responsavel.as_deref(), "Por favor, informe o responsável");
    errors.require_str(req.status.as_deref(), "Por favor, informe o status");
    errors.one_of(req.status.as_deref(), validation::REPRODUCAO_STATUS, "status");
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    if let Some(bezerros) = &req.bezerros {
        errors.check(bezerros.quantidade >= 0, "Quantidade de bezerros inválida");
    }
    errors.finish()?;

    let femea_id = req
        .femea
        .ok_or_else(|| AppError::BadRequest("Por favor, informe a fêmea".to_string()))?;
    let data_evento = data_evento
        .ok_or_else(|| AppError::BadRequest("Por favor, informe a data do evento".to_string()))?;

    db::animais::find_by_id(&state.pool, femea_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;
    if let Some(macho_id) = req.macho {
        db::animais::find_by_id(&state.pool, macho_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;
    }

    let novo = NovoRegistroReproducao {
        tipo: req.tipo.as_deref().unwrap_or_default(),
        data_evento,
        data_prevista,
        femea: femea_id,
        macho: req.macho,
        metodo: req.metodo.as_deref(),
        responsavel: req.responsavel.as_deref().unwrap_or_default(),
        status: req.status.as_deref().unwrap_or_default(),
        observacoes: req.observacoes.as_deref(),
        bezerros: req.bezerros.as_ref(),
    };

    let registro = db::reproducao::create(&state.pool, &novo).await?;

    let registro = db::reproducao::find_by_id(&state.pool, registro.id)
        .await?
        .ok_or_else(|| AppError::Internal("Registro recém-criado não encontrado".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Registro de reprodução cadastrado com sucesso",
        "registro": registro,
    })))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let registro = db::reproducao::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registro de reprodução não encontrado".to_string()))?;

    Ok(Json(json!({ "success": true, "registro": registro })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AtualizarRegistroReproducao>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.one_of(req.tipo.as_deref(), validation::REPRODUCAO_TIPOS, "tipo");
    errors.one_of(req.status.as_deref(), validation::REPRODUCAO_STATUS, "status");
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    let data_evento = errors.optional_data(req.data_evento.as_deref());
    let data_prevista = errors.optional_data(req.data_prevista.as_deref());
    errors.finish()?;

    db::reproducao::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registro de reprodução não encontrado".to_string()))?;

    if let Some(macho_id) = req.macho {
        db::animais::find_by_id(&state.pool, macho_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;
    }

    let dados = AtualizacaoReproducao {
        tipo: req.tipo.as_deref(),
        data_evento,
        data_prevista,
        macho: req.macho,
        metodo: req.metodo.as_deref(),
        responsavel: req.responsavel.as_deref(),
        status: req.status.as_deref(),
        observacoes: req.observacoes.as_deref(),
        bezerros: req.bezerros.as_ref(),
    };

    let registro = db::reproducao::update(&state.pool, id, &dados)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound("Registro de reprodução não encontrado".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "Registro de reprodução atualizado com sucesso",
        "registro": registro,
    })))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removidos = db::reproducao::delete(&state.pool, id).await?;
    if removidos == 0 {
        return Err(AppError::NotFound(
            "Registro de reprodução não encontrado".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Registro de reprodução excluído com sucesso",
    })))
}
