//! Login, logout, session and two-factor handlers.

use std::io::IsTerminal;

use dialoguer::Input;
use secrecy::SecretString;

use haras_api::LoginOutcome;
use haras_api::models::{Perfil, User};
use haras_core::{CoreError, Farm, Notice};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts, MfaCommand};
use crate::config::ActiveProfile;
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

fn perfil_label(perfil: Perfil) -> &'static str {
    match perfil {
        Perfil::Admin => "Administrador",
        Perfil::User => "Usuário",
        Perfil::Readonly => "Somente leitura",
    }
}

fn user_detail(u: &User) -> String {
    [
        format!("ID:           {}", u.id),
        format!("Nome:         {}", u.nome_completo),
        format!("E-mail:       {}", u.email),
        format!("Perfil:       {}", perfil_label(u.perfil)),
        format!("MFA:          {}", if u.has_mfa() { "Ativo" } else { "Inativo" }),
        format!("Último login: {}", output::opt(u.data_ultimo_login.as_ref())),
    ]
    .join("\n")
}

/// TOTP codes are six digits; spaces pasted from authenticator apps are
/// dropped.
fn normalize_code(raw: &str) -> Result<String, CliError> {
    let code: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(CliError::Validation {
            field: "code".into(),
            reason: "the MFA code has 6 digits".into(),
        })
    }
}

fn mfa_code(flag: Option<String>) -> Result<String, CliError> {
    if let Some(code) = flag {
        return normalize_code(&code);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::MfaRequired);
    }
    let raw: String = Input::new()
        .with_prompt("Código MFA")
        .interact_text()
        .map_err(prompt_err)?;
    normalize_code(&raw)
}

fn password(active: &ActiveProfile) -> Result<SecretString, CliError> {
    match haras_config::resolve_password(&active.profile, &active.name) {
        Ok(pw) => Ok(pw),
        Err(_) if std::io::stdin().is_terminal() => {
            let pw = rpassword::prompt_password("Senha: ").map_err(prompt_err)?;
            Ok(SecretString::from(pw))
        }
        Err(e) => Err(e.into()),
    }
}

/// Name the profile in authentication failures.
fn with_profile(err: CoreError, active: &ActiveProfile) -> CliError {
    match CliError::from(err) {
        CliError::AuthFailed { message, .. } => CliError::AuthFailed {
            message,
            profile: active.name.clone(),
        },
        other => other,
    }
}

pub async fn handle(
    farm: &Farm,
    args: AuthArgs,
    active: &ActiveProfile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    match args.command {
        AuthCommand::Login { email, code } => {
            let email = match email {
                Some(e) => e,
                None => haras_config::resolve_email(&active.profile, &active.name)?,
            };
            let password = password(active)?;

            let user = match farm
                .login(&email, &password)
                .await
                .map_err(|e| with_profile(e, active))?
            {
                LoginOutcome::Authenticated(user) => user,
                LoginOutcome::MfaRequired { user_id } => {
                    let code = mfa_code(code)?;
                    farm.verify_mfa(user_id, &code)
                        .await
                        .map_err(|e| with_profile(e, active))?
                }
            };

            output::print_notice(
                &Notice::success(format!("Bem-vindo, {}!", user.nome_completo)),
                global.quiet,
                color,
            );
            Ok(())
        }

        AuthCommand::Logout => {
            farm.logout().await;
            output::print_notice(&Notice::info("Sessão encerrada."), global.quiet, color);
            Ok(())
        }

        AuthCommand::Status => {
            util::require_session(farm)?;
            let user = farm.current_user()?;
            let out = output::render_single(format, &user, user_detail, |u| u.email.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthCommand::Refresh => {
            util::require_session(farm)?;
            farm.api().refresh().await?;
            output::print_notice(&Notice::success("Sessão renovada."), global.quiet, color);
            Ok(())
        }

        AuthCommand::Mfa(mfa) => {
            util::require_session(farm)?;
            match mfa.command {
                MfaCommand::Setup => {
                    let setup = farm.setup_mfa().await?;
                    let out = output::render_single(
                        format,
                        &setup,
                        |s| {
                            [
                                "Cadastre o segredo no seu aplicativo autenticador:".to_owned(),
                                format!("  Segredo: {}", s.secret),
                                format!("  URL:     {}", s.qr_code_url),
                            ]
                            .join("\n")
                        },
                        |s| s.secret.clone(),
                    );
                    output::print_output(&out, global.quiet);
                    Ok(())
                }

                MfaCommand::Disable => {
                    if !util::confirm("Desativar a autenticação de dois fatores?", global.yes)? {
                        return Ok(());
                    }
                    farm.disable_mfa().await?;
                    output::print_notice(
                        &Notice::success("Autenticação de dois fatores desativada."),
                        global.quiet,
                        color,
                    );
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn codes_keep_six_digits_only() {
        assert_eq!(normalize_code("123 456").unwrap(), "123456");
        assert!(normalize_code("12345").is_err());
        assert!(normalize_code("12a456").is_err());
    }

    #[test]
    fn auth_failures_name_the_profile() {
        let active = ActiveProfile {
            name: "fazenda".into(),
            profile: crate::config::Profile::default(),
        };
        let err = with_profile(
            CoreError::AuthenticationFailed {
                message: "Email ou senha incorretos".into(),
            },
            &active,
        );
        assert!(matches!(err, CliError::AuthFailed { ref profile, .. } if profile == "fazenda"));
    }

    #[test]
    fn user_detail_shows_profile_label() {
        let user: User = serde_json::from_value(serde_json::json!({
            "ID": 1,
            "NOME_COMPLETO": "Ana Souza",
            "EMAIL": "ana@haras.com",
            "PERFIL": "ADMIN",
            "MFA_ATIVO": "S",
        }))
        .unwrap();
        let out = user_detail(&user);
        assert!(out.contains("Perfil:       Administrador"));
        assert!(out.contains("MFA:          Ativo"));
    }
}
