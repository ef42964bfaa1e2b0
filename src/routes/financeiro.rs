use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db;
use crate::db::financeiro::{AtualizacaoFinanceiro, ListParams, NovoRegistroFinanceiro};
use crate::error::AppError;
use crate::state::SharedState;
use crate::validation::{self, FieldErrors};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltroFinanceiro {
    pub fazenda: Option<String>,
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub status: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub pagina: Option<i64>,
    pub limite: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarRegistroFinanceiro {
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub data: Option<String>,
    pub forma_pagamento: Option<String>,
    pub status: Option<String>,
    pub animal: Option<Uuid>,
    pub documento_fiscal: Option<String>,
    pub observacoes: Option<String>,
    pub fazenda: Option<String>,
    pub responsavel: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarRegistroFinanceiro {
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub data: Option<String>,
    pub forma_pagamento: Option<String>,
    pub status: Option<String>,
    pub animal: Option<Uuid>,
    pub documento_fiscal: Option<String>,
    pub observacoes: Option<String>,
    pub fazenda: Option<String>,
    pub responsavel: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filtro): Query<FiltroFinanceiro>,
) -> Result<Json<serde_json::Value>, AppError> {
    let pagina = filtro.pagina.unwrap_or(1).max(1);
    let limite = filtro.limite.unwrap_or(100).max(1);

    let params = ListParams {
        fazenda: filtro.fazenda,
        tipo: filtro.tipo,
        categoria: filtro.categoria,
        status: filtro.status,
        data_inicio: filtro.data_inicio.as_deref().and_then(validation::parse_data),
        data_fim: filtro.data_fim.as_deref().and_then(validation::parse_data),
        limit: limite,
        offset: (pagina - 1) * limite,
    };

    let registros = db::financeiro::list(&state.pool, &params).await?;
    let total = db::financeiro::count(&state.pool, &params).await?;
    let resumo = db::financeiro::resumo(&state.pool, &params).await?;

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
    Json(req): Json<CriarRegistroFinanceiro>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.require_str(req.tipo.as_deref(), "Por favor, informe o tipo da movimentação");
    errors.one_of(req.tipo.as_deref(), validation::FINANCEIRO_TIPOS, "tipo");
    errors.require_str(req.categoria.as_deref(), "Por favor, informe a categoria");
    errors.require_str(req.descricao.as_deref(), "Por favor, informe a descrição");
    errors.max_len(
        req.descricao.as_deref(),
        200,
        "Descrição não pode ter mais de 200 caracteres",
    );
    errors.require(&req.valor, "Por favor, informe o valor");
    let data = errors.require_data(req.data.as_deref(), "Por favor, informe a data");
    errors.require_str(
        req.forma_pagamento.as_deref(),
        "Por favor, informe a forma de pagamento",
    );
    errors.one_of(
        req.forma_pagamento.as_deref(),
        validation::FORMAS_PAGAMENTO,
        "formaPagamento",
    );
    errors.require_str(req.status.as_deref(), "Por favor, informe o status");
    errors.one_of(req.status.as_deref(), validation::FINANCEIRO_STATUS, "status");
    errors.require_str(req.fazenda.as_deref(), "Por favor, informe a fazenda");
    errors.require_str(req.responsavel.as_deref(), "Por favor, informe o responsável");
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    errors.finish()?;

    let data = data.ok_or_else(|| AppError::BadRequest("Por favor, informe a data".to_string()))?;

    if let Some(animal_id) = req.animal {
        db::animais::find_by_id(&state.pool, animal_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;
    }

    let novo = NovoRegistroFinanceiro {
        tipo: req.tipo.as_deref().unwrap_or_default(),
        categoria: req.categoria.as_deref().unwrap_or_default(),
        descricao: req.descricao.as_deref().unwrap_or_default(),
        valor: req.valor.unwrap_or_default(),
        data,
        forma_pagamento: req.forma_pagamento.as_deref().unwrap_or("Dinheiro"),
        status: req.status.as_deref().unwrap_or("Pago"),
        animal: req.animal,
        documento_fiscal: req.documento_fiscal.as_deref(),
        observacoes: req.observacoes.as_deref(),
        fazenda: req.fazenda.as_deref().unwrap_or_default(),
        responsavel: req.responsavel.as_deref().unwrap_or_default(),
    };

    let registro = db::financeiro::create(&state.pool, &novo).await?;

    tracing::info!(tipo = %registro.tipo, valor = registro.valor, "registro financeiro cadastrado");

    Ok(Json(json!({
        "success": true,
        "message": "Registro financeiro cadastrado com sucesso",
        "registro": registro,
    })))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let registro = db::financeiro::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registro financeiro não encontrado".to_string()))?;

    Ok(Json(json!({ "success": true, "registro": registro })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AtualizarRegistroFinanceiro>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.one_of(req.tipo.as_deref(), validation::FINANCEIRO_TIPOS, "tipo");
    errors.one_of(
        req.forma_pagamento.as_deref(),
        validation::FORMAS_PAGAMENTO,
        "formaPagamento",
    );
    errors.one_of(req.status.as_deref(), validation::FINANCEIRO_STATUS, "status");
    errors.max_len(
        req.descricao.as_deref(),
        200,
        "Descrição não pode ter mais de 200 caracteres",
    );
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    let data = errors.optional_data(req.data.as_deref());
    errors.finish()?;

    db::financeiro::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registro financeiro não encontrado".to_string()))?;

    let dados = AtualizacaoFinanceiro {
        tipo: req.tipo.as_deref(),
        categoria: req.categoria.as_deref(),
        descricao: req.descricao.as_deref(),
        valor: req.valor,
        data,
        forma_pagamento: req.forma_pagamento.as_deref(),
        status: req.status.as_deref(),
        animal: req.animal,
        documento_fiscal: req.documento_fiscal.as_deref(),
        observacoes: req.observacoes.as_deref(),
        fazenda: req.fazenda.as_deref(),
        responsavel: req.responsavel.as_deref(),
    };

    let registro = db::financeiro::update(&state.pool, id, &dados)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound("Registro financeiro não encontrado".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "Registro financeiro atualizado com sucesso",
        "registro": registro,
    })))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removidos = db::financeiro::delete(&state.pool, id).await?;
    if removidos == 0 {
        return Err(AppError::NotFound(
            "Registro financeiro não encontrado".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Registro financeiro excluído com sucesso",
    })))
}
