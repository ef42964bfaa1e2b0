use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: Uuid,
    pub identificacao: String,
    pub tipo: String,
    pub raca: String,
    pub data_nascimento: DateTime<Utc>,
    pub sexo: String,
    pub peso: f64,
    pub altura: Option<f64>,
    pub status: String,
    pub mae: Option<Uuid>,
    pub pai: Option<Uuid>,
    pub fazenda: String,
    pub observacoes: Option<String>,
    pub data_cadastro: DateTime<Utc>,
    pub ultima_atualizacao: DateTime<Utc>,
    pub ativo: bool,
}

/// Projection embedded in records that reference an animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalRef {
    pub id: Uuid,
    pub identificacao: String,
    pub tipo: String,
    pub raca: String,
}
