use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Access profile of a user account.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Perfil {
    Admin,
    #[default]
    User,
    Readonly,
}

/// The logged-in user's profile, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct User {
    pub id: i64,
    pub nome_completo: String,
    pub email: String,
    #[serde(default)]
    pub perfil: Perfil,
    /// `S`/`N` flag.
    #[serde(default)]
    pub ativo: Option<String>,
    /// `S`/`N` flag.
    #[serde(default)]
    pub mfa_ativo: Option<String>,
    #[serde(default)]
    pub data_cadastro: Option<String>,
    #[serde(default)]
    pub data_ultimo_login: Option<String>,
}

impl User {
    pub fn has_mfa(&self) -> bool {
        self.mfa_ativo.as_deref() == Some("S")
    }
}
