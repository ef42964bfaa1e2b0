use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Usuario;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    nome: &str,
    email: &str,
    senha_hash: &str,
    fazenda: &str,
    cargo: &str,
) -> Result<Usuario, sqlx::Error> {
    sqlx::query_as::<_, Usuario>(
        "INSERT INTO usuarios (nome, email, senha_hash, fazenda, cargo)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(nome)
    .bind(email)
    .bind(senha_hash)
    .bind(fazenda)
    .bind(cargo)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_all<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY data_criacao DESC")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    nome: Option<&str>,
    fazenda: Option<&str>,
    cargo: Option<&str>,
    ativo: Option<bool>,
) -> Result<Usuario, sqlx::Error> {
    sqlx::query_as::<_, Usuario>(
        "UPDATE usuarios SET
             nome = COALESCE($2::text, nome),
             fazenda = COALESCE($3::text, fazenda),
             cargo = COALESCE($4::text, cargo),
             ativo = COALESCE($5::boolean, ativo)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(nome)
    .bind(fazenda)
    .bind(cargo)
    .bind(ativo)
    .fetch_one(pool)
    .await
}

pub async fn touch_ultimo_acesso(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE usuarios SET ultimo_acesso = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
