use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::AnimalRef;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroFinanceiro {
    pub id: Uuid,
    pub tipo: String,
    pub categoria: String,
    pub descricao: String,
    pub valor: f64,
    pub data: DateTime<Utc>,
    pub forma_pagamento: String,
    pub status: String,
    pub animal: Option<Uuid>,
    pub documento_fiscal: Option<String>,
    pub observacoes: Option<String>,
    pub fazenda: String,
    pub data_cadastro: DateTime<Utc>,
    pub responsavel: String,
}

/// Listing shape: the optional animal reference resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroFinanceiroDetalhado {
    pub id: Uuid,
    pub tipo: String,
    pub categoria: String,
    pub descricao: String,
    pub valor: f64,
    pub data: DateTime<Utc>,
    pub forma_pagamento: String,
    pub status: String,
    pub animal: Option<AnimalRef>,
    pub documento_fiscal: Option<String>,
    pub observacoes: Option<String>,
    pub fazenda: String,
    pub data_cadastro: DateTime<Utc>,
    pub responsavel: String,
}

/// Aggregated over the same filtered set as the listing it accompanies.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResumoFinanceiro {
    pub receitas: f64,
    pub despesas: f64,
    pub saldo: f64,
}
