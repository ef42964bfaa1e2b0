use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::AnimalRef;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroSaude {
    pub id: Uuid,
    pub animal: Uuid,
    pub tipo: String,
    pub data: DateTime<Utc>,
    pub produto: Option<String>,
    pub dosagem: Option<String>,
    pub aplicador: String,
    pub veterinario: Option<String>,
    pub observacoes: Option<String>,
    pub status: String,
    pub proxima_aplicacao: Option<DateTime<Utc>>,
    pub data_cadastro: DateTime<Utc>,
    pub custo: Option<f64>,
}

/// Listing shape: the animal reference resolved to its identification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroSaudeDetalhado {
    pub id: Uuid,
    pub animal: AnimalRef,
    pub tipo: String,
    pub data: DateTime<Utc>,
    pub produto: Option<String>,
    pub dosagem: Option<String>,
    pub aplicador: String,
    pub veterinario: Option<String>,
    pub observacoes: Option<String>,
    pub status: String,
    pub proxima_aplicacao: Option<DateTime<Utc>>,
    pub data_cadastro: DateTime<Utc>,
    pub custo: Option<f64>,
}
