use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AnimalRef, RegistroSaude, RegistroSaudeDetalhado};

pub struct ListParams {
    pub animal: Option<Uuid>,
    pub tipo: Option<String>,
    pub status: Option<String>,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

pub struct NovoRegistroSaude<'a> {
    pub animal: Uuid,
    pub tipo: &'a str,
    pub data: DateTime<Utc>,
    pub produto: Option<&'a str>,
    pub dosagem: Option<&'a str>,
    pub aplicador: &'a str,
    pub veterinario: Option<&'a str>,
    pub observacoes: Option<&'a str>,
    pub status: &'a str,
    pub proxima_aplicacao: Option<DateTime<Utc>>,
    pub custo: Option<f64>,
}

pub struct AtualizacaoSaude<'a> {
    pub tipo: Option<&'a str>,
    pub data: Option<DateTime<Utc>>,
    pub produto: Option<&'a str>,
    pub dosagem: Option<&'a str>,
    pub aplicador: Option<&'a str>,
    pub veterinario: Option<&'a str>,
    pub observacoes: Option<&'a str>,
    pub status: Option<&'a str>,
    pub proxima_aplicacao: Option<DateTime<Utc>>,
    pub custo: Option<f64>,
}

/// Flat join row; folded into the nested listing shape below.
#[derive(sqlx::FromRow)]
struct RegistroSaudeRow {
    id: Uuid,
    animal: Uuid,
    tipo: String,
    data: DateTime<Utc>,
    produto: Option<String>,
    dosagem: Option<String>,
    aplicador: String,
    veterinario: Option<String>,
    observacoes: Option<String>,
    status: String,
    proxima_aplicacao: Option<DateTime<Utc>>,
    data_cadastro: DateTime<Utc>,
    custo: Option<f64>,
    animal_identificacao: String,
    animal_tipo: String,
    animal_raca: String,
}

impl From<RegistroSaudeRow> for RegistroSaudeDetalhado {
    fn from(row: RegistroSaudeRow) -> Self {
        RegistroSaudeDetalhado {
            id: row.id,
            animal: AnimalRef {
                id: row.animal,
                identificacao: row.animal_identificacao,
                tipo: row.animal_tipo,
                raca: row.animal_raca,
            },
            tipo: row.tipo,
            data: row.data,
            produto: row.produto,
            dosagem: row.dosagem,
            aplicador: row.aplicador,
            veterinario: row.veterinario,
            observacoes: row.observacoes,
            status: row.status,
            proxima_aplicacao: row.proxima_aplicacao,
            data_cadastro: row.data_cadastro,
            custo: row.custo,
        }
    }
}

const SELECT_DETALHADO: &str =
    "SELECT s.*, a.identificacao AS animal_identificacao, a.tipo AS animal_tipo,
            a.raca AS animal_raca
     FROM registros_saude s
     JOIN animais a ON s.animal = a.id";

pub async fn list(
    pool: &PgPool,
    params: &ListParams,
) -> Result<Vec<RegistroSaudeDetalhado>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RegistroSaudeRow>(&format!(
        "{SELECT_DETALHADO}
         WHERE ($1::uuid IS NULL OR s.animal = $1)
           AND ($2::text IS NULL OR s.tipo = $2)
           AND ($3::text IS NULL OR s.status = $3)
           AND ($4::timestamptz IS NULL OR s.data >= $4)
           AND ($5::timestamptz IS NULL OR s.data <= $5)
         ORDER BY s.data DESC
         LIMIT $6 OFFSET $7"
    ))
    .bind(params.animal)
    .bind(params.tipo.as_deref())
    .bind(params.status.as_deref())
    .bind(params.data_inicio)
    .bind(params.data_fim)
    .bind(params.limit)
    .bind(params.offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count(pool: &PgPool, params: &ListParams) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM registros_saude s
         WHERE ($1::uuid IS NULL OR s.animal = $1)
           AND ($2::text IS NULL OR s.tipo = $2)
           AND ($3::text IS NULL OR s.status = $3)
           AND ($4::timestamptz IS NULL OR s.data >= $4)
           AND ($5::timestamptz IS NULL OR s.data <= $5)",
    )
    .bind(params.animal)
    .bind(params.tipo.as_deref())
    .bind(params.status.as_deref())
    .bind(params.data_inicio)
    .bind(params.data_fim)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    novo: &NovoRegistroSaude<'_>,
) -> Result<RegistroSaude, sqlx::Error> {
    sqlx::query_as::<_, RegistroSaude>(
        "INSERT INTO registros_saude
             (animal, tipo, data, produto, dosagem, aplicador, veterinario,
              observacoes, status, proxima_aplicacao, custo)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(novo.animal)
    .bind(novo.tipo)
    .bind(novo.data)
    .bind(novo.produto)
    .bind(novo.dosagem)
    .bind(novo.aplicador)
    .bind(novo.veterinario)
    .bind(novo.observacoes)
    .bind(novo.status)
    .bind(novo.proxima_aplicacao)
    .bind(novo.custo)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<RegistroSaudeDetalhado>, sqlx::Error> {
    let row = sqlx::query_as::<_, RegistroSaudeRow>(&format!("{SELECT_DETALHADO} WHERE s.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    dados: &AtualizacaoSaude<'_>,
) -> Result<RegistroSaude, sqlx::Error> {
    sqlx::query_as::<_, RegistroSaude>(
        "UPDATE registros_saude SET
             tipo = COALESCE($2::text, tipo),
             data = COALESCE($3::timestamptz, data),
             produto = COALESCE($4::text, produto),
             dosagem = COALESCE($5::text, dosagem),
             aplicador = COALESCE($6::text, aplicador),
             veterinario = COALESCE($7::text, veterinario),
             observacoes = COALESCE($8::text, observacoes),
             status = COALESCE($9::text, status),
             proxima_aplicacao = COALESCE($10::timestamptz, proxima_aplicacao),
             custo = COALESCE($11::float8, custo)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(dados.tipo)
    .bind(dados.data)
    .bind(dados.produto)
    .bind(dados.dosagem)
    .bind(dados.aplicador)
    .bind(dados.veterinario)
    .bind(dados.observacoes)
    .bind(dados.status)
    .bind(dados.proxima_aplicacao)
    .bind(dados.custo)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM registros_saude WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Scheduled procedures still open, for the dashboard summary.
pub async fn count_agendados(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM registros_saude WHERE status = 'Agendado'")
            .fetch_one(pool)
            .await?;
    Ok(row.0)
}
