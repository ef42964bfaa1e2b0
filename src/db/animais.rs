use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Animal;

pub struct NovoAnimal<'a> {
    pub identificacao: &'a str,
    pub tipo: &'a str,
    pub raca: &'a str,
    pub data_nascimento: DateTime<Utc>,
    pub sexo: &'a str,
    pub peso: f64,
    pub altura: Option<f64>,
    pub status: &'a str,
    pub mae: Option<Uuid>,
    pub pai: Option<Uuid>,
    pub fazenda: &'a str,
    pub observacoes: Option<&'a str>,
}

pub struct AtualizacaoAnimal<'a> {
    pub identificacao: Option<&'a str>,
    pub tipo: Option<&'a str>,
    pub raca: Option<&'a str>,
    pub data_nascimento: Option<DateTime<Utc>>,
    pub sexo: Option<&'a str>,
    pub peso: Option<f64>,
    pub altura: Option<f64>,
    pub status: Option<&'a str>,
    pub mae: Option<Uuid>,
    pub pai: Option<Uuid>,
    pub fazenda: Option<&'a str>,
    pub observacoes: Option<&'a str>,
    pub ativo: Option<bool>,
}

pub async fn list(
    pool: &PgPool,
    tipo: Option<&str>,
    status: Option<&str>,
    termo: Option<&str>,
) -> Result<Vec<Animal>, sqlx::Error> {
    let padrao = termo.map(|t| format!("%{t}%"));
    sqlx::query_as::<_, Animal>(
        "SELECT * FROM animais
         WHERE ($1::text IS NULL OR tipo = $1)
           AND ($2::text IS NULL OR status = $2)
           AND ($3::text IS NULL OR identificacao ILIKE $3 OR raca ILIKE $3)
         ORDER BY data_cadastro DESC",
    )
    .bind(tipo)
    .bind(status)
    .bind(padrao)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, novo: &NovoAnimal<'_>) -> Result<Animal, sqlx::Error> {
    sqlx::query_as::<_, Animal>(
        "INSERT INTO animais
             (identificacao, tipo, raca, data_nascimento, sexo, peso, altura,
              status, mae, pai, fazenda, observacoes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(novo.identificacao)
    .bind(novo.tipo)
    .bind(novo.raca)
    .bind(novo.data_nascimento)
    .bind(novo.sexo)
    .bind(novo.peso)
    .bind(novo.altura)
    .bind(novo.status)
    .bind(novo.mae)
    .bind(novo.pai)
    .bind(novo.fazenda)
    .bind(novo.observacoes)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Animal>, sqlx::Error> {
    sqlx::query_as::<_, Animal>("SELECT * FROM animais WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_identificacao(
    pool: &PgPool,
    identificacao: &str,
) -> Result<Option<Animal>, sqlx::Error> {
    sqlx::query_as::<_, Animal>("SELECT * FROM animais WHERE identificacao = $1")
        .bind(identificacao)
        .fetch_optional(pool)
        .await
}

/// Partial update: absent fields keep their stored value. Always refreshes
/// `ultima_atualizacao`.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    dados: &AtualizacaoAnimal<'_>,
) -> Result<Animal, sqlx::Error> {
    sqlx::query_as::<_, Animal>(
        "UPDATE animais SET
             identificacao = COALESCE($2::text, identificacao),
             tipo = COALESCE($3::text, tipo),
             raca = COALESCE($4::text, raca),
             data_nascimento = COALESCE($5::timestamptz, data_nascimento),
             sexo = COALESCE($6::text, sexo),
             peso = COALESCE($7::float8, peso),
             altura = COALESCE($8::float8, altura),
             status = COALESCE($9::text, status),
             mae = COALESCE($10::uuid, mae),
             pai = COALESCE($11::uuid, pai),
             fazenda = COALESCE($12::text, fazenda),
             observacoes = COALESCE($13::text, observacoes),
             ativo = COALESCE($14::boolean, ativo),
             ultima_atualizacao = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(dados.identificacao)
    .bind(dados.tipo)
    .bind(dados.raca)
    .bind(dados.data_nascimento)
    .bind(dados.sexo)
    .bind(dados.peso)
    .bind(dados.altura)
    .bind(dados.status)
    .bind(dados.mae)
    .bind(dados.pai)
    .bind(dados.fazenda)
    .bind(dados.observacoes)
    .bind(dados.ativo)
    .fetch_one(pool)
    .await
}

/// Status propagation from a health record, inside its transaction.
pub async fn update_status<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE animais SET status = $2, ultima_atualizacao = now() WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM animais WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Herd counters for the dashboard summary.
pub async fn contagem(pool: &PgPool) -> Result<(i64, i64, i64), sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*),
                COUNT(*) FILTER (WHERE ativo),
                COUNT(*) FILTER (WHERE status = 'Em tratamento')
         FROM animais",
    )
    .fetch_one(pool)
    .await
}
