// User-facing error messages and notices.
//
// Reduces any API failure to one pt-BR sentence, in this order: the
// validation list in `detail`, a plain `detail` string, the body's
// `message`, a per-status message, a network message, the caller's
// default.

use std::time::Duration;

use haras_api::{Error, ErrorDetail};
use tracing::warn;

use crate::error::CoreError;

pub const NETWORK_ERROR: &str = "Erro de conexão. Verifique sua internet.";

/// pt-BR label for a backend column name; unknown names pass through.
pub fn field_label(field: &str) -> &str {
    match field {
        "DATA_OCORRENCIA" => "Data de Ocorrência",
        "ID_USUARIO_REGISTRO" => "Usuário",
        "ID_ANIMAL" => "Animal",
        "TIPO_REGISTRO" => "Tipo de Registro",
        "DESCRICAO" => "Descrição",
        "VETERINARIO_RESPONSAVEL" => "Veterinário",
        "DATA_NASCIMENTO" => "Data de Nascimento",
        "NOME" => "Nome",
        "SEXO" => "Sexo",
        "COR" => "Cor",
        "EMAIL" => "E-mail",
        "SENHA" => "Senha",
        "CONFIRM_SENHA" => "Confirmação de Senha",
        "TELEFONE" => "Telefone",
        "CPF" => "CPF",
        "CNPJ" => "CNPJ",
        "ENDERECO" => "Endereço",
        "CIDADE" => "Cidade",
        "ESTADO" => "Estado",
        "CEP" => "CEP",
        "DATA_INICIO" => "Data de Início",
        "DATA_FIM" => "Data de Fim",
        "VALOR" => "Valor",
        "QUANTIDADE" => "Quantidade",
        "PRECO" => "Preço",
        "ESTOQUE" => "Estoque",
        other => other,
    }
}

pub fn status_message(status: u16) -> String {
    match status {
        400 | 422 => "Dados inválidos".into(),
        401 => "Acesso não autorizado".into(),
        403 => "Acesso negado".into(),
        404 => "Recurso não encontrado".into(),
        409 => "Conflito de dados".into(),
        500 => "Erro interno do servidor".into(),
        502 => "Servidor indisponível".into(),
        503 => "Serviço temporariamente indisponível".into(),
        other => format!("Erro HTTP {other}"),
    }
}

fn summarize_validation(issues: &[haras_api::ValidationIssue]) -> Option<String> {
    let messages: Vec<String> = issues
        .iter()
        .map(|issue| match issue.field() {
            Some(field) => format!("{}: {}", field_label(&field), issue.msg),
            None => issue.msg.clone(),
        })
        .collect();

    let first = messages.first()?;
    Some(match messages.len() {
        1 => first.clone(),
        2 => format!("{first} (e mais 1 erro)"),
        n => format!("{first} (e mais {} erros)", n - 1),
    })
}

/// One readable sentence for `err`, or `default` when nothing better is
/// known.
pub fn extract_message(err: &Error, default: &str) -> String {
    match err {
        Error::Api {
            status,
            detail,
            message,
        } => {
            let from_detail = match detail {
                Some(ErrorDetail::Validation(issues)) => summarize_validation(issues),
                Some(ErrorDetail::Message(m)) => Some(m.clone()),
                None => None,
            };
            from_detail
                .or_else(|| message.clone())
                .unwrap_or_else(|| status_message(*status))
        }
        Error::Transport(e) => match e.status() {
            Some(status) => status_message(status.as_u16()),
            None if err.is_network() => NETWORK_ERROR.into(),
            None => default.into(),
        },
        Error::Authentication { message } => message.clone(),
        Error::SessionExpired => "Sessão expirada".into(),
        _ => default.into(),
    }
}

// ── Notices ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Negative,
    Positive,
    Warning,
    Info,
}

impl NoticeLevel {
    /// How long the notice stays visible.
    pub fn timeout(self) -> Duration {
        match self {
            Self::Negative => Duration::from_millis(5000),
            Self::Positive | Self::Info => Duration::from_millis(3000),
            Self::Warning => Duration::from_millis(4000),
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Negative notice for a failed operation. The error is logged.
    pub fn from_error(err: &CoreError) -> Self {
        warn!(error = %err, "operation failed");
        Self::new(NoticeLevel::Negative, err.user_message())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Positive, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn timeout(&self) -> Duration {
        self.level.timeout()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(status: u16, body: serde_json::Value) -> Error {
        let detail = body
            .get("detail")
            .cloned()
            .map(|d| serde_json::from_value(d).unwrap());
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_owned);
        Error::Api {
            status,
            detail,
            message,
        }
    }

    #[test]
    fn single_validation_error_uses_field_label() {
        let err = api_error(
            422,
            json!({"detail": [{"loc": ["body", "ID_ANIMAL"], "msg": "field required"}]}),
        );
        assert_eq!(extract_message(&err, "x"), "Animal: field required");
    }

    #[test]
    fn multiple_validation_errors_are_counted() {
        let err = api_error(
            422,
            json!({"detail": [
                {"loc": ["body", "NOME"], "msg": "obrigatório"},
                {"loc": ["body", "PESO_ATUAL"], "msg": "inválido"}
            ]}),
        );
        assert_eq!(
            extract_message(&err, "x"),
            "Nome: obrigatório (e mais 1 erro)"
        );

        let err = api_error(
            422,
            json!({"detail": [
                {"loc": ["body"], "msg": "corpo inválido"},
                {"loc": ["body", "A"], "msg": "a"},
                {"loc": ["body", "B"], "msg": "b"}
            ]}),
        );
        assert_eq!(
            extract_message(&err, "x"),
            "corpo inválido (e mais 2 erros)"
        );
    }

    #[test]
    fn string_detail_then_message_then_status() {
        let err = api_error(400, json!({"detail": "Animal já cadastrado"}));
        assert_eq!(extract_message(&err, "x"), "Animal já cadastrado");

        let err = api_error(500, json!({"message": "falha no banco"}));
        assert_eq!(extract_message(&err, "x"), "falha no banco");

        let err = api_error(409, json!({}));
        assert_eq!(extract_message(&err, "x"), "Conflito de dados");

        let err = api_error(418, json!({}));
        assert_eq!(extract_message(&err, "x"), "Erro HTTP 418");
    }

    #[test]
    fn other_errors_fall_back_to_default() {
        let err = Error::Deserialization {
            message: "bad".into(),
            body: String::new(),
        };
        assert_eq!(extract_message(&err, "Erro ao buscar animais"), "Erro ao buscar animais");
    }

    #[test]
    fn unknown_field_passes_through() {
        assert_eq!(field_label("PESO_ATUAL"), "PESO_ATUAL");
        assert_eq!(field_label("EMAIL"), "E-mail");
    }

    #[test]
    fn notice_timeouts() {
        assert_eq!(Notice::success("ok").timeout(), Duration::from_secs(3));
        assert_eq!(Notice::warning("hm").timeout(), Duration::from_secs(4));
        let err = CoreError::Timeout;
        let notice = Notice::from_error(&err);
        assert_eq!(notice.level, NoticeLevel::Negative);
        assert_eq!(notice.message, NETWORK_ERROR);
        assert_eq!(notice.timeout(), Duration::from_secs(5));
    }
}
