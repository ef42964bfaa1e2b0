use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub senha_hash: String,
    pub fazenda: String,
    pub cargo: String,
    pub ativo: bool,
    pub data_criacao: DateTime<Utc>,
    pub ultimo_acesso: Option<DateTime<Utc>>,
}
