use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db;
use crate::db::animais::{AtualizacaoAnimal, NovoAnimal};
use crate::error::AppError;
use crate::state::SharedState;
use crate::validation::{self, FieldErrors};

#[derive(Deserialize)]
pub struct FiltroAnimais {
    pub tipo: Option<String>,
    pub status: Option<String>,
    pub termo: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarAnimal {
    pub identificacao: Option<String>,
    pub tipo: Option<String>,
    pub raca: Option<String>,
    pub data_nascimento: Option<String>,
    pub sexo: Option<String>,
    pub peso: Option<f64>,
    pub altura: Option<f64>,
    pub status: Option<String>,
    pub mae: Option<Uuid>,
    pub pai: Option<Uuid>,
    pub fazenda: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarAnimal {
    pub identificacao: Option<String>,
    pub tipo: Option<String>,
    pub raca: Option<String>,
    pub data_nascimento: Option<String>,
    pub sexo: Option<String>,
    pub peso: Option<f64>,
    pub altura: Option<f64>,
    pub status: Option<String>,
    pub mae: Option<Uuid>,
    pub pai: Option<Uuid>,
    pub fazenda: Option<String>,
    pub observacoes: Option<String>,
    pub ativo: Option<bool>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filtro): Query<FiltroAnimais>,
) -> Result<Json<serde_json::Value>, AppError> {
    let animais = db::animais::list(
        &state.pool,
        filtro.tipo.as_deref(),
        filtro.status.as_deref(),
        filtro.termo.as_deref(),
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "total": animais.len(),
        "animais": animais,
    })))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CriarAnimal>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Lenient creation path: sexo and status fall back to defaults.
    let novo = validar_animal(&req, false)?;
    inserir(&state, novo).await
}

/// Registration-form path: the full field set is mandatory.
pub async fn cadastrar(
    State(state): State<SharedState>,
    Json(req): Json<CriarAnimal>,
) -> Result<Json<serde_json::Value>, AppError> {
    let novo = validar_animal(&req, true)?;
    inserir(&state, novo).await
}

fn validar_animal(req: &CriarAnimal, estrito: bool) -> Result<NovoAnimal<'_>, AppError> {
    let mut errors = FieldErrors::new();

    errors.require_str(
        req.identificacao.as_deref(),
        "Por favor, informe a identificação do animal",
    );
    errors.max_len(
        req.identificacao.as_deref(),
        20,
        "Identificação não pode ter mais de 20 caracteres",
    );
    errors.require_str(req.tipo.as_deref(), "Por favor, informe o tipo do animal");
    errors.one_of(req.tipo.as_deref(), validation::ANIMAL_TIPOS, "tipo");
    errors.require_str(req.raca.as_deref(), "Por favor, informe a raça do animal");
    let data_nascimento = errors.require_data(
        req.data_nascimento.as_deref(),
        "Por favor, informe a data de nascimento",
    );
    errors.require(&req.peso, "Por favor, informe o peso do animal em kg");
    errors.require_str(req.fazenda.as_deref(), "Por favor, informe a fazenda");
    if estrito {
        errors.require_str(req.sexo.as_deref(), "Por favor, informe o sexo do animal");
        errors.require_str(req.status.as_deref(), "Por favor, informe o status do animal");
    }
    errors.one_of(req.sexo.as_deref(), validation::ANIMAL_SEXOS, "sexo");
    errors.one_of(req.status.as_deref(), validation::ANIMAL_STATUS, "status");
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    errors.finish()?;

    let data_nascimento = data_nascimento.ok_or_else(|| {
        AppError::BadRequest("Por favor, informe a data de nascimento".to_string())
    })?;

    Ok(NovoAnimal {
        identificacao: req.identificacao.as_deref().unwrap_or_default().trim(),
        tipo: req.tipo.as_deref().unwrap_or_default(),
        raca: req.raca.as_deref().unwrap_or_default(),
        data_nascimento,
        sexo: req.sexo.as_deref().unwrap_or("Macho"),
        peso: req.peso.unwrap_or_default(),
        altura: req.altura,
        status: req.status.as_deref().unwrap_or("Saudável"),
        mae: req.mae,
        pai: req.pai,
        fazenda: req.fazenda.as_deref().unwrap_or_default(),
        observacoes: req.observacoes.as_deref(),
    })
}

async fn inserir(
    state: &SharedState,
    novo: NovoAnimal<'_>,
) -> Result<Json<serde_json::Value>, AppError> {
    if db::animais::find_by_identificacao(&state.pool, novo.identificacao)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Já existe um animal com essa identificação".to_string(),
        ));
    }

    let animal = db::animais::create(&state.pool, &novo)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Já existe um animal com essa identificação".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!(identificacao = %animal.identificacao, "animal cadastrado");

    Ok(Json(json!({
        "success": true,
        "message": "Animal cadastrado com sucesso",
        "animal": animal,
    })))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let animal = db::animais::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;

    Ok(Json(json!({ "success": true, "animal": animal })))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AtualizarAnimal>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut errors = FieldErrors::new();
    errors.max_len(
        req.identificacao.as_deref(),
        20,
        "Identificação não pode ter mais de 20 caracteres",
    );
    errors.one_of(req.tipo.as_deref(), validation::ANIMAL_TIPOS, "tipo");
    errors.one_of(req.sexo.as_deref(), validation::ANIMAL_SEXOS, "sexo");
    errors.one_of(req.status.as_deref(), validation::ANIMAL_STATUS, "status");
    errors.max_len(
        req.observacoes.as_deref(),
        1000,
        "Observações não podem ter mais de 1000 caracteres",
    );
    let data_nascimento = errors.optional_data(req.data_nascimento.as_deref());
    errors.finish()?;

    db::animais::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;

    let dados = AtualizacaoAnimal {
        identificacao: req.identificacao.as_deref(),
        tipo: req.tipo.as_deref(),
        raca: req.raca.as_deref(),
        data_nascimento,
        sexo: req.sexo.as_deref(),
        peso: req.peso,
        altura: req.altura,
        status: req.status.as_deref(),
        mae: req.mae,
        pai: req.pai,
        fazenda: req.fazenda.as_deref(),
        observacoes: req.observacoes.as_deref(),
        ativo: req.ativo,
    };

    let animal = db::animais::update(&state.pool, id, &dados)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Animal não encontrado".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Já existe um animal com essa identificação".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "Animal atualizado com sucesso",
        "animal": animal,
    })))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removidos = db::animais::delete(&state.pool, id).await?;
    if removidos == 0 {
        return Err(AppError::NotFound("Animal não encontrado".to_string()));
    }

    tracing::info!(%id, "animal excluído");

    Ok(Json(json!({
        "success": true,
        "message": "Animal excluído com sucesso",
    })))
}
