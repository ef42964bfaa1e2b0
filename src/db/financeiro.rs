use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    AnimalRef, RegistroFinanceiro, RegistroFinanceiroDetalhado, ResumoFinanceiro,
};

pub struct ListParams {
    pub fazenda: Option<String>,
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub status: Option<String>,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

pub struct NovoRegistroFinanceiro<'a> {
    pub tipo: &'a str,
    pub categoria: &'a str,
    pub descricao: &'a str,
    pub valor: f64,
    pub data: DateTime<Utc>,
    pub forma_pagamento: &'a str,
    pub status: &'a str,
    pub animal: Option<Uuid>,
    pub documento_fiscal: Option<&'a str>,
    pub observacoes: Option<&'a str>,
    pub fazenda: &'a str,
    pub responsavel: &'a str,
}

pub struct AtualizacaoFinanceiro<'a> {
    pub tipo: Option<&'a str>,
    pub categoria: Option<&'a str>,
    pub descricao: Option<&'a str>,
    pub valor: Option<f64>,
    pub data: Option<DateTime<Utc>>,
    pub forma_pagamento: Option<&'a str>,
    pub status: Option<&'a str>,
    pub animal: Option<Uuid>,
    pub documento_fiscal: Option<&'a str>,
    pub observacoes: Option<&'a str>,
    pub fazenda: Option<&'a str>,
    pub responsavel: Option<&'a str>,
}

#[derive(sqlx::FromRow)]
struct RegistroFinanceiroRow {
    id: Uuid,
    tipo: String,
    categoria: String,
    descricao: String,
    valor: f64,
    data: DateTime<Utc>,
    forma_pagamento: String,
    status: String,
    animal: Option<Uuid>,
    documento_fiscal: Option<String>,
    observacoes: Option<String>,
    fazenda: String,
    data_cadastro: DateTime<Utc>,
    responsavel: String,
    animal_identificacao: Option<String>,
    animal_tipo: Option<String>,
    animal_raca: Option<String>,
}

impl From<RegistroFinanceiroRow> for RegistroFinanceiroDetalhado {
    fn from(row: RegistroFinanceiroRow) -> Self {
        let animal = match (row.animal, row.animal_identificacao) {
            (Some(id), Some(identificacao)) => Some(AnimalRef {
                id,
                identificacao,
                tipo: row.animal_tipo.unwrap_or_default(),
                raca: row.animal_raca.unwrap_or_default(),
            }),
            _ => None,
        };
        RegistroFinanceiroDetalhado {
            id: row.id,
            tipo: row.tipo,
            categoria: row.categoria,
            descricao: row.descricao,
            valor: row.valor,
            data: row.data,
            forma_pagamento: row.forma_pagamento,
            status: row.status,
            animal,
            documento_fiscal: row.documento_fiscal,
            observacoes: row.observacoes,
            fazenda: row.fazenda,
            data_cadastro: row.data_cadastro,
            responsavel: row.responsavel,
        }
    }
}

const SELECT_DETALHADO: &str =
    "SELECT f.*, a.identificacao AS animal_identificacao, a.tipo AS animal_tipo,
            a.raca AS animal_raca
     FROM registros_financeiros f
     LEFT JOIN animais a ON f.animal = a.id";

const FILTRO: &str = "($1::text IS NULL OR f.fazenda = $1)
           AND ($2::text IS NULL OR f.tipo = $2)
           AND ($3::text IS NULL OR f.categoria = $3)
           AND ($4::text IS NULL OR f.status = $4)
           AND ($5::timestamptz IS NULL OR f.data >= $5)
           AND ($6::timestamptz IS NULL OR f.data <= $6)";

pub async fn list(
    pool: &PgPool,
    params: &ListParams,
) -> Result<Vec<RegistroFinanceiroDetalhado>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RegistroFinanceiroRow>(&format!(
        "{SELECT_DETALHADO} WHERE {FILTRO} ORDER BY f.data DESC LIMIT $7 OFFSET $8"
    ))
    .bind(params.fazenda.as_deref())
    .bind(params.tipo.as_deref())
    .bind(params.categoria.as_deref())
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
    let row: (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM registros_financeiros f WHERE {FILTRO}"
    ))
    .bind(params.fazenda.as_deref())
    .bind(params.tipo.as_deref())
    .bind(params.categoria.as_deref())
    .bind(params.status.as_deref())
    .bind(params.data_inicio)
    .bind(params.data_fim)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Revenue/expense totals over the same filtered set as the listing.
pub async fn resumo(pool: &PgPool, params: &ListParams) -> Result<ResumoFinanceiro, sqlx::Error> {
    let (receitas, despesas): (f64, f64) = sqlx::query_as(&format!(
        "SELECT COALESCE(SUM(f.valor) FILTER (WHERE f.tipo = 'Receita'), 0)::float8,
                COALESCE(SUM(f.valor) FILTER (WHERE f.tipo = 'Despesa'), 0)::float8
         FROM registros_financeiros f WHERE {FILTRO}"
    ))
    .bind(params.fazenda.as_deref())
    .bind(params.tipo.as_deref())
    .bind(params.categoria.as_deref())
    .bind(params.status.as_deref())
    .bind(params.data_inicio)
    .bind(params.data_fim)
    .fetch_one(pool)
    .await?;

    Ok(ResumoFinanceiro {
        receitas,
        despesas,
        saldo: receitas - despesas,
    })
}

pub async fn create(
    pool: &PgPool,
    novo: &NovoRegistroFinanceiro<'_>,
) -> Result<RegistroFinanceiro, sqlx::Error> {
    sqlx::query_as::<_, RegistroFinanceiro>(
        "INSERT INTO registros_financeiros
             (tipo, categoria, descricao, valor, data, forma_pagamento, status,
              animal, documento_fiscal, observacoes, fazenda, responsavel)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(novo.tipo)
    .bind(novo.categoria)
    .bind(novo.descricao)
    .bind(novo.valor)
    .bind(novo.data)
    .bind(novo.forma_pagamento)
    .bind(novo.status)
    .bind(novo.animal)
    .bind(novo.documento_fiscal)
    .bind(novo.observacoes)
    .bind(novo.fazenda)
    .bind(novo.responsavel)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<RegistroFinanceiroDetalhado>, sqlx::Error> {
    let row =
        sqlx::query_as::<_, RegistroFinanceiroRow>(&format!("{SELECT_DETALHADO} WHERE f.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(Into::into))
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    dados: &AtualizacaoFinanceiro<'_>,
) -> Result<RegistroFinanceiro, sqlx::Error> {
    sqlx::query_as::<_, RegistroFinanceiro>(
        "UPDATE registros_financeiros SET
             tipo = COALESCE($2::text, tipo),
             categoria = COALESCE($3::text, categoria),
             descricao = COALESCE($4::text, descricao),
             valor = COALESCE($5::float8, valor),
             data = COALESCE($6::timestamptz, data),
             forma_pagamento = COALESCE($7::text, forma_pagamento),
             status = COALESCE($8::text, status),
             animal = COALESCE($9::uuid, animal),
             documento_fiscal = COALESCE($10::text, documento_fiscal),
             observacoes = COALESCE($11::text, observacoes),
             fazenda = COALESCE($12::text, fazenda),
             responsavel = COALESCE($13::text, responsavel)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(dados.tipo)
    .bind(dados.categoria)
    .bind(dados.descricao)
    .bind(dados.valor)
    .bind(dados.data)
    .bind(dados.forma_pagamento)
    .bind(dados.status)
    .bind(dados.animal)
    .bind(dados.documento_fiscal)
    .bind(dados.observacoes)
    .bind(dados.fazenda)
    .bind(dados.responsavel)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM registros_financeiros WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
