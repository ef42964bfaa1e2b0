use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::error::AppError;

pub const ANIMAL_TIPOS: &[&str] = &["Bezerro", "Novilho", "Boi", "Vaca", "Touro"];
pub const ANIMAL_SEXOS: &[&str] = &["Macho", "Fêmea"];
pub const ANIMAL_STATUS: &[&str] = &[
    "Saudável",
    "Em tratamento",
    "Prenhe",
    "Em Quarentena",
    "Vendido",
    "Abatido",
];

pub const SAUDE_TIPOS: &[&str] = &["Vacinação", "Medicação", "Exame", "Cirurgia", "Outro"];
pub const SAUDE_STATUS: &[&str] = &["Agendado", "Realizado", "Cancelado"];

pub const FINANCEIRO_TIPOS: &[&str] = &["Receita", "Despesa"];
pub const FORMAS_PAGAMENTO: &[&str] = &[
    "Dinheiro",
    "Cartão de Crédito",
    "Cartão de Débito",
    "Transferência",
    "Boleto",
    "Cheque",
    "Outro",
];
pub const FINANCEIRO_STATUS: &[&str] = &["Pendente", "Pago", "Cancelado"];

pub const CARGOS: &[&str] = &["Administrador", "Gerente", "Funcionário"];

pub const REPRODUCAO_TIPOS: &[&str] = &["Cobertura", "Gestação", "Nascimento"];
pub const REPRODUCAO_STATUS: &[&str] = &[
    "Confirmada",
    "Não Confirmada",
    "Em Andamento",
    "Concluído",
];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap()
});

pub fn email_valido(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Parses a date field from the wire. Forms send plain `YYYY-MM-DD`
/// values, API clients send RFC 3339 timestamps; both are accepted.
pub fn parse_data(valor: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(valor) {
        return Some(dt.with_timezone(&Utc));
    }
    valor
        .parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Collects per-field validation failures so a request answers with every
/// problem at once, joined into a single message.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presence check for textual fields; whitespace counts as absent.
    pub fn require_str(&mut self, value: Option<&str>, message: &str) {
        if value.map(str::trim).is_none_or(str::is_empty) {
            self.errors.push(message.to_string());
        }
    }

    /// Presence check for non-textual fields.
    pub fn require<T>(&mut self, value: &Option<T>, message: &str) {
        if value.is_none() {
            self.errors.push(message.to_string());
        }
    }

    pub fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.errors.push(message.to_string());
        }
    }

    /// Enum-membership check. Absent values pass; presence is the
    /// `require_str` call's concern.
    pub fn one_of(&mut self, value: Option<&str>, allowed: &[&str], field: &str) {
        if let Some(v) = value {
            if !v.trim().is_empty() && !allowed.contains(&v) {
                self.errors.push(format!("Valor inválido para o campo {field}"));
            }
        }
    }

    pub fn max_len(&mut self, value: Option<&str>, max: usize, message: &str) {
        if let Some(v) = value {
            if v.chars().count() > max {
                self.errors.push(message.to_string());
            }
        }
    }

    /// Mandatory date field: absent values push `message`, malformed
    /// values push their own failure instead of the presence one.
    pub fn require_data(&mut self, value: Option<&str>, message: &str) -> Option<DateTime<Utc>> {
        match value.map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                self.errors.push(message.to_string());
                None
            }
            Some(s) => self.data_valida(s),
        }
    }

    /// Optional date field: absent passes, malformed fails.
    pub fn optional_data(&mut self, value: Option<&str>) -> Option<DateTime<Utc>> {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| self.data_valida(s))
    }

    fn data_valida(&mut self, s: &str) -> Option<DateTime<Utc>> {
        let parsed = parse_data(s);
        if parsed.is_none() {
            self.errors.push(format!("Data inválida: {s}"));
        }
        parsed
    }

    /// Resolves the collected checks: `Ok(())` when everything passed,
    /// otherwise a 400 with all messages joined.
    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::BadRequest(self.errors.join(", ")))
        }
    }
}
