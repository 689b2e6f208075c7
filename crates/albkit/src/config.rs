//! CLI configuration: thin layer over `albkit_config`.
//!
//! Adds profile selection and `GlobalOpts` flag overrides (--controller,
//! --username, --tenant, --insecure, --timeout) on top of the shared crate.

use clap::ValueEnum;

use albkit_api::SessionConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use albkit_config::{Config, Profile, config_path, load_config_or_default};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill in `--output` from `defaults.output` when the flag was not given.
pub fn apply_output_default(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
}

/// Build the session config for the selected profile, flags taking priority.
///
/// Without a matching profile, `--controller` alone is enough; credentials
/// then come from `ALBKIT_USERNAME` / `ALBKIT_PASSWORD`.
pub fn resolve_session_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<SessionConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = select_profile(global, config, &profile_name)?;
    let profile = apply_overrides(profile, global);
    Ok(albkit_config::profile_to_session_config(
        &profile,
        &profile_name,
        &config.defaults,
    )?)
}

fn select_profile(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<Profile, CliError> {
    if let Some(profile) = config.profiles.get(profile_name) {
        return Ok(profile.clone());
    }
    if global.controller.is_some() {
        return Ok(Profile::default());
    }
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name.into(),
            available: available_profiles(config),
        });
    }
    Err(CliError::NoConfig {
        path: config_path().display().to_string(),
    })
}

fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref controller) = global.controller {
        profile.controller.clone_from(controller);
    }
    if global.username.is_some() {
        profile.username.clone_from(&global.username);
    }
    if global.tenant.is_some() {
        profile.tenant.clone_from(&global.tenant);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    profile
}

fn available_profiles(config: &Config) -> String {
    let names = config.profile_names();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["albkit"];
        argv.extend_from_slice(args);
        argv.push("version");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut config = Config::default();
        config.profiles.insert(name.into(), profile);
        config
    }

    #[test]
    fn profile_flag_beats_default_profile() {
        let mut config = Config::default();
        config.default_profile = Some("prod".into());
        assert_eq!(active_profile_name(&global(&["-p", "lab"]), &config), "lab");
        assert_eq!(active_profile_name(&global(&[]), &config), "prod");
    }

    #[test]
    fn flags_override_profile_fields() {
        let profile = Profile {
            controller: "ctrl.example".into(),
            username: Some("admin".into()),
            tenant: Some("admin".into()),
            ..Profile::default()
        };
        let flags = global(&["-c", "other.example", "-t", "blue", "-k", "--timeout", "5"]);
        let merged = apply_overrides(profile, &flags);
        assert_eq!(merged.controller, "other.example");
        assert_eq!(merged.tenant.as_deref(), Some("blue"));
        assert_eq!(merged.username.as_deref(), Some("admin"));
        assert_eq!(merged.insecure, Some(true));
        assert_eq!(merged.timeout, Some(5));
    }

    #[test]
    fn controller_flag_works_without_profile() {
        let profile = select_profile(&global(&["-c", "ctrl"]), &Config::default(), "default");
        assert!(profile.unwrap().controller.is_empty());
    }

    #[test]
    fn named_missing_profile_lists_available() {
        let config = config_with("prod", Profile::default());
        let err = select_profile(&global(&["-p", "lab"]), &config, "lab").unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "lab");
                assert_eq!(available, "prod");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nothing_configured_is_no_config() {
        let err = select_profile(&global(&[]), &Config::default(), "default").unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn output_default_comes_from_config() {
        let mut config = Config::default();
        config.defaults.output = "yaml".into();

        let mut flags = global(&[]);
        apply_output_default(&mut flags, &config);
        assert_eq!(flags.output_format(), OutputFormat::Yaml);

        let mut flags = global(&["-o", "json"]);
        apply_output_default(&mut flags, &config);
        assert_eq!(flags.output_format(), OutputFormat::Json);
    }
}
