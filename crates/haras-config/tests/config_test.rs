#![allow(clippy::unwrap_used)]
// Integration tests for config loading and the file session store.

use std::path::Path;

use figment::Jail;
use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;
use serde_json::json;

use haras_api::{PersistedSession, SessionStore};
use haras_config::{
    Config, ConfigError, FileSessionStore, Profile, load_config_from, resolve_email,
    resolve_password, save_config_to,
};

const SAMPLE: &str = r#"
default_profile = "fazenda"

[defaults]
output = "json"
timeout = 20

[profiles.fazenda]
url = "http://localhost:8000"
email = "maria@haras.com"
password_env = "FAZENDA_PW"
"#;

fn persisted() -> PersistedSession {
    PersistedSession {
        user: Some(
            serde_json::from_value(json!({
                "ID": 1,
                "NOME_COMPLETO": "Maria Souza",
                "EMAIL": "maria@haras.com"
            }))
            .unwrap(),
        ),
        access_token: Some("a1".into()),
        refresh_token: Some("r1".into()),
    }
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_load_merges_file_over_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", SAMPLE)?;

        let cfg = load_config_from(Path::new("config.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("fazenda"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 20);
        assert_eq!(cfg.defaults.color, "auto");
        assert_eq!(cfg.profile("fazenda").unwrap().url, "http://localhost:8000");
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", SAMPLE)?;
        jail.set_env("HARAS_DEFAULTS__TIMEOUT", "5");
        jail.set_env("HARAS_PROFILES__FAZENDA__URL", "https://haras.example.com");
        // Credential variables are not config keys.
        jail.set_env("HARAS_PASSWORD", "segredo");

        let cfg = load_config_from(Path::new("config.toml")).unwrap();
        assert_eq!(cfg.defaults.timeout, 5);
        assert_eq!(
            cfg.profile("fazenda").unwrap().url,
            "https://haras.example.com"
        );
        Ok(())
    });
}

#[test]
fn test_missing_file_yields_defaults() {
    Jail::expect_with(|_jail| {
        let cfg = load_config_from(Path::new("nao-existe.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        Ok(())
    });
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut cfg = Config::default();
    cfg.profiles.insert(
        "default".into(),
        Profile {
            url: "http://10.0.0.2:8000".into(),
            timeout: Some(8),
            ..Profile::default()
        },
    );
    save_config_to(&cfg, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.profiles, cfg.profiles);
}

#[test]
fn test_password_chain_prefers_profile_env() {
    Jail::expect_with(|jail| {
        jail.set_env("FAZENDA_PW", "do-perfil");
        jail.set_env("HARAS_PASSWORD", "global");

        let profile = Profile {
            url: "http://localhost:8000".into(),
            password_env: Some("FAZENDA_PW".into()),
            ..Profile::default()
        };
        let pw = resolve_password(&profile, "fazenda").unwrap();
        assert_eq!(pw.expose_secret(), "do-perfil");

        let profile = Profile {
            password_env: None,
            ..profile
        };
        let pw = resolve_password(&profile, "fazenda").unwrap();
        assert_eq!(pw.expose_secret(), "global");
        Ok(())
    });
}

#[test]
fn test_email_falls_back_to_env() {
    Jail::expect_with(|jail| {
        let profile = Profile::default();
        assert!(matches!(
            resolve_email(&profile, "x"),
            Err(ConfigError::NoCredentials { .. })
        ));

        jail.set_env("HARAS_EMAIL", "joao@haras.com");
        assert_eq!(resolve_email(&profile, "x").unwrap(), "joao@haras.com");
        Ok(())
    });
}

// ── Session file ────────────────────────────────────────────────────

#[test]
fn test_session_file_roundtrip_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("sessions").join("fazenda.json"));

    assert!(store.load().unwrap().is_empty());

    store.save(&persisted()).unwrap();
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"access_token_haras\": \"a1\""));
    assert!(raw.contains("\"user_haras\""));
    assert_eq!(store.load().unwrap(), persisted());

    store.clear().unwrap();
    assert!(!store.path().exists());
    // Clearing twice is fine.
    store.clear().unwrap();
}

#[cfg(unix)]
#[test]
fn test_session_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("s.json"));
    store.save(&persisted()).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn test_stale_temp_file_does_not_widen_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("s.json"));
    let stale = dir.path().join("s.json.tmp");
    std::fs::write(&stale, "{}").unwrap();
    std::fs::set_permissions(&stale, std::fs::Permissions::from_mode(0o644)).unwrap();

    store.save(&persisted()).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert!(!stale.exists());
    assert_eq!(store.load().unwrap(), persisted());
}

#[test]
fn test_corrupt_session_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileSessionStore::new(&path);
    assert!(store.load().unwrap().is_empty());
}
