//! CLI configuration -- thin wrapper around `haras_config` shared types.
//!
//! Adds the resolution steps that respect `GlobalOpts` flag overrides
//! (--config, --profile, --url, --insecure, --timeout).

use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use tracing::warn;

use haras_api::SessionStore;
use haras_config::FileSessionStore;
use haras_core::FarmConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use haras_config::{Config, Defaults, Profile};

/// The profile a command runs against.
#[derive(Debug, Clone)]
pub struct ActiveProfile {
    pub name: String,
    pub profile: Profile,
}

// ── Config file ─────────────────────────────────────────────────────

/// `--config` / `HARAS_CONFIG`, else the platform location.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(haras_config::config_path)
}

/// Load the config, falling back to defaults when the file is missing or
/// unreadable.
pub fn load_or_default(global: &GlobalOpts) -> Config {
    let path = config_file(global);
    haras_config::load_config_from(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "using default configuration");
        Config::default()
    })
}

pub fn save(global: &GlobalOpts, cfg: &Config) -> Result<PathBuf, CliError> {
    let path = config_file(global);
    haras_config::save_config_to(cfg, &path)?;
    Ok(path)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill `--output` / `--color` from the config defaults when not given.
pub fn apply_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&defaults.color, true).ok();
    }
}

/// Pick the profile to use. `--url` alone is enough to run without a
/// config file.
pub fn resolve_profile(global: &GlobalOpts, config: &Config) -> Result<ActiveProfile, CliError> {
    let name = active_profile_name(global, config);

    let mut profile = match (config.profiles.get(&name), &global.url) {
        (Some(p), _) => p.clone(),
        (None, Some(_)) => Profile::default(),
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(config),
                name,
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_file(global).display().to_string(),
            });
        }
    };

    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(ActiveProfile { name, profile })
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

pub fn farm_config(active: &ActiveProfile, defaults: &Defaults) -> Result<FarmConfig, CliError> {
    Ok(haras_config::profile_to_farm_config(&active.profile, defaults)?)
}

/// On-disk session for the profile.
pub fn session_store(active: &ActiveProfile) -> Arc<dyn SessionStore> {
    Arc::new(FileSessionStore::for_profile(&active.name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["haras"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "show"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, url: &str) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            name.into(),
            Profile {
                url: url.into(),
                timeout: Some(10),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile_values() {
        let cfg = config_with("default", "http://localhost:8000");
        let g = global(&["--url", "http://10.0.0.5:8000", "-k", "--timeout", "3"]);
        let active = resolve_profile(&g, &cfg).unwrap();
        assert_eq!(active.name, "default");
        assert_eq!(active.profile.url, "http://10.0.0.5:8000");
        assert_eq!(active.profile.insecure, Some(true));
        assert_eq!(active.profile.timeout, Some(3));
    }

    #[test]
    fn url_flag_runs_without_profile() {
        let g = global(&["--url", "http://localhost:8000"]);
        let active = resolve_profile(&g, &Config::default()).unwrap();
        assert_eq!(active.profile.url, "http://localhost:8000");
    }

    #[test]
    fn missing_profile_is_reported() {
        let cfg = config_with("fazenda", "http://localhost:8000");
        let err = resolve_profile(&global(&["-p", "outra"]), &cfg).unwrap_err();
        assert!(matches!(
            err,
            CliError::ProfileNotFound { ref available, .. } if available == "fazenda"
        ));

        let err = resolve_profile(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn config_defaults_fill_unset_output() {
        let defaults = Defaults {
            output: "json".into(),
            color: "never".into(),
            ..Defaults::default()
        };
        let mut g = global(&[]);
        apply_defaults(&mut g, &defaults);
        assert_eq!(g.output_format(), OutputFormat::Json);
        assert_eq!(g.color_mode(), ColorMode::Never);

        let mut g = global(&["-o", "yaml"]);
        apply_defaults(&mut g, &defaults);
        assert_eq!(g.output_format(), OutputFormat::Yaml);
    }
}
