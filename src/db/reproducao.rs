use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{
    AnimalRef, Bezerros, RegistroReproducao, RegistroReproducaoDetalhado, ResumoReproducao,
};

pub struct ListParams {
    pub tipo: Option<String>,
    pub status: Option<String>,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

pub struct NovoRegistroReproducao<'a> {
    pub tipo: &'a str,
    pub data_evento: DateTime<Utc>,
    pub data_prevista: Option<DateTime<Utc>>,
    pub femea: Uuid,
    pub macho: Option<Uuid>,
    pub metodo: Option<&'a str>,
    pub responsavel: &'a str,
    pub status: &'a str,
    pub observacoes: Option<&'a str>,
    pub bezerros: Option<&'a Bezerros>,
}

pub struct AtualizacaoReproducao<'a> {
    pub tipo: Option<&'a str>,
    pub data_evento: Option<DateTime<Utc>>,
    pub data_prevista: Option<DateTime<Utc>>,
    pub macho: Option<Uuid>,
    pub metodo: Option<&'a str>,
    pub responsavel: Option<&'a str>,
    pub status: Option<&'a str>,
    pub observacoes: Option<&'a str>,
    pub bezerros: Option<&'a Bezerros>,
}

#[derive(sqlx::FromRow)]
struct RegistroReproducaoRow {
    id: Uuid,
    tipo: String,
    data_evento: DateTime<Utc>,
    data_prevista: Option<DateTime<Utc>>,
    femea: Uuid,
    macho: Option<Uuid>,
    metodo: Option<String>,
    responsavel: String,
    status: String,
    observacoes: Option<String>,
    bezerros: Option<Json<Bezerros>>,
    data_cadastro: DateTime<Utc>,
    femea_identificacao: String,
    femea_tipo: String,
    femea_raca: String,
    macho_identificacao: Option<String>,
    macho_tipo: Option<String>,
    macho_raca: Option<String>,
}

impl From<RegistroReproducaoRow> for RegistroReproducaoDetalhado {
    fn from(row: RegistroReproducaoRow) -> Self {
        let macho = match (row.macho, row.macho_identificacao) {
            (Some(id), Some(identificacao)) => Some(AnimalRef {
                id,
                identificacao,
                tipo: row.macho_tipo.unwrap_or_default(),
                raca: row.macho_raca.unwrap_or_default(),
            }),
            _ => None,
        };
        RegistroReproducaoDetalhado {
            id: row.id,
            tipo: row.tipo,
            data_evento: row.data_evento,
            data_prevista: row.data_prevista,
            femea: AnimalRef {
                id: row.femea,
                identificacao: row.femea_identificacao,
                tipo: row.femea_tipo,
                raca: row.femea_raca,
            },
            macho,
            metodo: row.metodo,
            responsavel: row.responsavel,
            status: row.status,
            observacoes: row.observacoes,
            bezerros: row.bezerros,
            data_cadastro: row.data_cadastro,
        }
    }
}

const SELECT_DETALHADO: &str =
    "SELECT r.*, f.identificacao AS femea_identificacao, f.tipo AS femea_tipo,
            f.raca AS femea_raca, m.identificacao AS macho_identificacao,
            m.tipo AS macho_tipo, m.raca AS macho_raca
     FROM registros_reproducao r
     JOIN animais f ON r.femea = f.id
     LEFT JOIN animais m ON r.macho = m.id";

const FILTRO: &str = "($1::text IS NULL OR r.tipo = $1)
           AND ($2::text IS NULL OR r.status = $2)
           AND ($3::timestamptz IS NULL OR r.data_evento >= $3)
           AND ($4::timestamptz IS NULL OR r.data_evento <= $4)";

pub async fn list(
    pool: &PgPool,
    params: &ListParams,
) -> Result<Vec<RegistroReproducaoDetalhado>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RegistroReproducaoRow>(&format!(
        "{SELECT_DETALHADO} WHERE {FILTRO} ORDER BY r.data_evento DESC LIMIT $5 OFFSET $6"
    ))
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
    let row: (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM registros_reproducao r WHERE {FILTRO}"
    ))
    .bind(params.tipo.as_deref())
    .bind(params.status.as_deref())
    .bind(params.data_inicio)
    .bind(params.data_fim)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Event counters over the filtered set; calves born only counts
/// `Nascimento` events.
pub async fn resumo(pool: &PgPool, params: &ListParams) -> Result<ResumoReproducao, sqlx::Error> {
    let (coberturas, gestacoes, nascimentos, bezerros_nascidos): (i64, i64, i64, i64) =
        sqlx::query_as(&format!(
            "SELECT COUNT(*) FILTER (WHERE r.tipo = 'Cobertura'),
                    COUNT(*) FILTER (WHERE r.tipo = 'Gestação'),
                    COUNT(*) FILTER (WHERE r.tipo = 'Nascimento'),
                    COALESCE(SUM((r.bezerros->>'quantidade')::bigint)
                        FILTER (WHERE r.tipo = 'Nascimento'), 0)::bigint
             FROM registros_reproducao r WHERE {FILTRO}"
        ))
        .bind(params.tipo.as_deref())
        .bind(params.status.as_deref())
        .bind(params.data_inicio)
        .bind(params.data_fim)
        .fetch_one(pool)
        .await?;

    Ok(ResumoReproducao {
        coberturas,
        gestacoes,
        nascimentos,
        bezerros_nascidos,
    })
}

pub async fn create(
    pool: &PgPool,
    novo: &NovoRegistroReproducao<'_>,
) -> Result<RegistroReproducao, sqlx::Error> {
    sqlx::query_as::<_, RegistroReproducao>(
        "INSERT INTO registros_reproducao
             (tipo, data_evento, data_prevista, femea, macho, metodo,
              responsavel, status, observacoes, bezerros)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(novo.tipo)
    .bind(novo.data_evento)
    .bind(novo.data_prevista)
    .bind(novo.femea)
    .bind(novo.macho)
    .bind(novo.metodo)
    .bind(novo.responsavel)
    .bind(novo.status)
    .bind(novo.observacoes)
    .bind(novo.bezerros.map(Json))
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<RegistroReproducaoDetalhado>, sqlx::Error> {
    let row =
        sqlx::query_as::<_, RegistroReproducaoRow>(&format!("{SELECT_DETALHADO} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(Into::into))
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    dados: &AtualizacaoReproducao<'_>,
) -> Result<RegistroReproducao, sqlx::Error> {
    sqlx::query_as::<_, RegistroReproducao>(
        "UPDATE registros_reproducao SET
             tipo = COALESCE($2::text, tipo),
             data_evento = COALESCE($3::timestamptz, data_evento),
             data_prevista = COALESCE($4::timestamptz, data_prevista),
             macho = COALESCE($5::uuid, macho),
             metodo = COALESCE($6::text, metodo),
             responsavel = COALESCE($7::text, responsavel),
             status = COALESCE($8::text, status),
             observacoes = COALESCE($9::text, observacoes),
             bezerros = COALESCE($10::jsonb, bezerros)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(dados.tipo)
    .bind(dados.data_evento)
    .bind(dados.data_prevista)
    .bind(dados.macho)
    .bind(dados.metodo)
    .bind(dados.responsavel)
    .bind(dados.status)
    .bind(dados.observacoes)
    .bind(dados.bezerros.map(Json))
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM registros_reproducao WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
