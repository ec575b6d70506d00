//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::{ExposeSecret, SecretString};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const VALID_KEYS: &str = "url, email, password_env, ca_cert, insecure, timeout";

/// Apply `key = value` to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "url" => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(CliError::Validation {
                    field: "url".into(),
                    reason: "must start with http:// or https://".into(),
                });
            }
            profile.url = value;
        }
        "email" => profile.email = Some(value),
        "password_env" | "password-env" => profile.password_env = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {VALID_KEYS}"),
            });
        }
    }
    Ok(())
}

/// Profile names sorted, the default one marked with ` *`.
fn profile_listing(cfg: &Config) -> Vec<String> {
    let default = cfg.default_profile.as_deref().unwrap_or("default");
    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| {
            if name == default {
                format!("{name} *")
            } else {
                name.clone()
            }
        })
        .collect()
}

fn prompt_secret(label: &str) -> Result<SecretString, CliError> {
    let secret = rpassword::prompt_password(label).map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(secret))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let config_path = config::config_file(global);
            eprintln!("Haras CLI configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let url: String = Input::new()
                .with_prompt("Backend URL")
                .default("http://localhost:8000".into())
                .interact_text()
                .map_err(prompt_err)?;

            let email: String = Input::new()
                .with_prompt("Login e-mail")
                .interact_text()
                .map_err(prompt_err)?;

            let password = prompt_secret("Password: ")?;

            let store_choices = &[
                "Store password in system keyring (recommended)",
                "Save to config file (plaintext)",
                "Don't store it (prompt at login)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the password?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let password_field = match store_selection {
                0 => {
                    haras_config::store_password(&profile_name, &password)?;
                    eprintln!("   ✓ Password stored in system keyring");
                    None
                }
                1 => Some(password.expose_secret().to_owned()),
                _ => None,
            };

            let mut profile = Profile {
                email: Some(email),
                password: password_field,
                ..Profile::default()
            };
            set_key(&mut profile, "url", url)?;

            // Keep other profiles when re-running the wizard.
            let mut cfg = config::load_or_default(global);
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save(global, &cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Next: haras auth login");
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_or_default(global);
            let out = output::render_single(
                global.output_format(),
                &cfg,
                |c| format!("{c:#?}"),
                |_| config::config_file(global).display().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_or_default(global);
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            config::save(global, &cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_or_default(global);
            let names = profile_listing(&cfg);
            if names.is_empty() {
                eprintln!("No profiles configured. Run: haras config init");
            } else {
                output::print_output(&names.join("\n"), global.quiet);
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_or_default(global);

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save(global, &cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetPassword { name } => {
            let cfg = config::load_or_default(global);
            let profile_name = name.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let password = prompt_secret("Password: ")?;
            haras_config::store_password(&profile_name, &password)?;

            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_key_updates_known_fields() {
        let mut p = Profile::default();
        set_key(&mut p, "url", "https://haras.example.com".into()).unwrap();
        set_key(&mut p, "email", "admin@haras.com".into()).unwrap();
        set_key(&mut p, "password-env", "HARAS_PW".into()).unwrap();
        set_key(&mut p, "timeout", "15".into()).unwrap();
        set_key(&mut p, "insecure", "true".into()).unwrap();
        assert_eq!(p.url, "https://haras.example.com");
        assert_eq!(p.email.as_deref(), Some("admin@haras.com"));
        assert_eq!(p.password_env.as_deref(), Some("HARAS_PW"));
        assert_eq!(p.timeout, Some(15));
        assert_eq!(p.insecure, Some(true));
    }

    #[test]
    fn set_key_rejects_bad_values() {
        let mut p = Profile::default();
        assert!(set_key(&mut p, "timeout", "soon".into()).is_err());
        assert!(set_key(&mut p, "url", "localhost:8000".into()).is_err());
        let err = set_key(&mut p, "site", "x".into()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref reason, .. } if reason.contains(VALID_KEYS)));
    }

    #[test]
    fn profiles_are_sorted_with_default_marked() {
        let mut cfg = Config {
            default_profile: Some("fazenda".into()),
            ..Config::default()
        };
        for name in ["teste", "fazenda", "local"] {
            cfg.profiles.insert(name.into(), Profile::default());
        }
        assert_eq!(profile_listing(&cfg), vec!["fazenda *", "local", "teste"]);
    }
}
