use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db;
use crate::db::saude::{AtualizacaoSaude, ListParams, NovoRegistroSaude};
use crate::error::AppError;
use crate::state::SharedState;
use crate::validation::{self, FieldErrors};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltroSaude {
    pub animal: Option<Uuid>,
    pub tipo: Option<String>,
    pub status: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub pagina: Option<i64>,
    pub limite: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarRegistroSaude {
    pub animal: Option<Uuid>,
    pub tipo: Option<String>,
    pub data: Option<String>,
    pub produto: Option<String>,
    pub dosagem: Option<String>,
    pub aplicador: Option<String>,
    pub veterinario: Option<String>,
    pub observacoes: Option<String>,
    pub status: Option<String>,
    pub proxima_aplicacao: Option<String>,
    pub custo: Option<f64>,
    pub atualizar_status_animal: Option<bool>,
    pub novo_status_animal: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarRegistroSaude {
    pub tipo: Option<String>,
    pub data: Option<String>,
    pub produto: Option<String>,
    pub dosagem: Option<String>,
    pub aplicador: Option<String>,
    pub veterinario: Option<String>,
    pub observacoes: Option<String>,
    pub status: Option<String>,
    pub proxima_aplicacao: Option<String>,
    pub custo: Option<f64>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filtro): Query<FiltroSaude>,
) -> Result<Json<serde_json::Value>, AppError> {
    let pagina = filtro.pagina.unwrap_or(1).max(1);
    let limite = filtro.limite.unwrap_or(100).max(1);

    let params = ListParams {
        animal: filtro.animal,
        tipo: filtro.tipo,
        status: filtro.status,
        data_inicio: filtro.data_inicio.as_deref().and_then(validation::parse_data),
        data_fim: filtro.data_fim.as_deref().and_then(validation::parse_data),
        limit: limite,
        offset: (pagina - 1) * limite,
    };

    let registros = db::saude::list(&state.pool, &params).await?;
    let total = db::saude::count(&state.pool, &params).await?;

    Ok(Json(json!({
        "success": true,
        "pagina": pagina,
        "limite": limite,
        "total": total,
        "totalPaginas": (total as f64 / limite as f64).ceil() as i64,
        "dados": registros,
    })))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CriarRegistroSaude>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.require(&req.animal, "Por favor, informe o animal");
    errors.require_str(req.tipo.as_deref(), "Por favor, informe o tipo de procedimento");
    errors.one_of(req.tipo.as_deref(), validation::SAUDE_TIPOS, "tipo");
    let data = errors.require_data(req.data.as_deref(), "Por favor, informe a data do procedimento");
    errors.require_str(
        req.aplicador.as_deref(),
        "Por favor, informe quem aplicou o procedimento",
    );
    errors.one_of(req.status.as_deref(), validation::SAUDE_STATUS, "status");
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    let proxima_aplicacao = errors.optional_data(req.proxima_aplicacao.as_deref());

    let propagar_status = req.atualizar_status_animal.unwrap_or(false);
    if propagar_status {
        errors.require_str(
            req.novo_status_animal.as_deref(),
            "Por favor, informe o novo status do animal",
        );
        errors.one_of(
            req.novo_status_animal.as_deref(),
            validation::ANIMAL_STATUS,
            "novoStatusAnimal",
        );
    }
    errors.finish()?;

    let animal_id = req
        .animal
        .ok_or_else(|| AppError::BadRequest("Por favor, informe o animal".to_string()))?;
    let data =
        data.ok_or_else(|| AppError::BadRequest("Por favor, informe a data do procedimento".to_string()))?;

    db::animais::find_by_id(&state.pool, animal_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;

    let novo = NovoRegistroSaude {
        animal: animal_id,
        tipo: req.tipo.as_deref().unwrap_or_default(),
        data,
        produto: req.produto.as_deref(),
        dosagem: req.dosagem.as_deref(),
        aplicador: req.aplicador.as_deref().unwrap_or_default(),
        veterinario: req.veterinario.as_deref(),
        observacoes: req.observacoes.as_deref(),
        status: req.status.as_deref().unwrap_or("Realizado"),
        proxima_aplicacao,
        custo: req.custo,
    };

    // The record insert and the optional status propagation commit together.
    let mut tx = state.pool.begin().await?;
    let registro = db::saude::create(&mut *tx, &novo).await?;
    if propagar_status {
        if let Some(novo_status) = req.novo_status_animal.as_deref() {
            db::animais::update_status(&mut *tx, animal_id, novo_status).await?;
        }
    }
    tx.commit().await?;

    let registro = db::saude::find_by_id(&state.pool, registro.id)
        .await?
        .ok_or_else(|| AppError::Internal("Registro recém-criado não encontrado".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Registro de saúde cadastrado com sucesso",
        "registro": registro,
    })))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let registro = db::saude::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registro de saúde não encontrado".to_string()))?;

    Ok(Json(json!({ "success": true, "registro": registro })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AtualizarRegistroSaude>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.one_of(req.tipo.as_deref(), validation::SAUDE_TIPOS, "tipo");
    errors.one_of(req.status.as_deref(), validation::SAUDE_STATUS, "status");
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    let data = errors.optional_data(req.data.as_deref());
    let proxima_aplicacao = errors.optional_data(req.proxima_aplicacao.as_deref());
    errors.finish()?;

    db::saude::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registro de saúde não encontrado".to_string()))?;

    let dados = AtualizacaoSaude {
        tipo: req.tipo.as_deref(),
        data,
        produto: req.produto.as_deref(),
        dosagem: req.dosagem.as_deref(),
        aplicador: req.aplicador.as_deref(),
        veterinario: req.veterinario.as_deref(),
        observacoes: req.observacoes.as_deref(),
        status: req.status.as_deref(),
        proxima_aplicacao,
        custo: req.custo,
    };

    let registro = db::saude::update(&state.pool, id, &dados)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound("Registro de saúde não encontrado".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "Registro de saúde atualizado com sucesso",
        "registro": registro,
    })))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removidos = db::saude::delete(&state.pool, id).await?;
    if removidos == 0 {
        return Err(AppError::NotFound("Registro de saúde não encontrado".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Registro de saúde excluído com sucesso",
    })))
}
