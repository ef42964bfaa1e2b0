use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::AnimalRef;

/// Birth outcome attached to `Nascimento` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bezerros {
    pub quantidade: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identificacoes: Option<Vec<String>>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroReproducao {
    pub id: Uuid,
    pub tipo: String,
    pub data_evento: DateTime<Utc>,
    pub data_prevista: Option<DateTime<Utc>>,
    pub femea: Uuid,
    pub macho: Option<Uuid>,
    pub metodo: Option<String>,
    pub responsavel: String,
    pub status: String,
    pub observacoes: Option<String>,
    pub bezerros: Option<sqlx::types::Json<Bezerros>>,
    pub data_cadastro: DateTime<Utc>,
}

/// Listing shape: animal references resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroReproducaoDetalhado {
    pub id: Uuid,
    pub tipo: String,
    pub data_evento: DateTime<Utc>,
    pub data_prevista: Option<DateTime<Utc>>,
    pub femea: AnimalRef,
    pub macho: Option<AnimalRef>,
    pub metodo: Option<String>,
    pub responsavel: String,
    pub status: String,
    pub observacoes: Option<String>,
    pub bezerros: Option<sqlx::types::Json<Bezerros>>,
    pub data_cadastro: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoReproducao {
    pub coberturas: i64,
    pub gestacoes: i64,
    pub nascimentos: i64,
    pub bezerros_nascidos: i64,
}
