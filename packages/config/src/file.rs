use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{ConfigError, PortfolioConfig};

/// Points at an explicit config file, overriding directory lookup.
pub const CONFIG_ENV_VAR: &str = "PORTFOLIO_CONFIG";

const CONFIG_FILE_NAME: &str = "portfolio";

/// Get the path to a config file, preferring .json5 but also checking .json
fn get_config_file_path(dir: &Path, filename: &str) -> Option<PathBuf> {
    let json5_path = dir.join(format!("{filename}.json5"));
    if json5_path.exists() {
        return Some(json5_path);
    }

    let json_path = dir.join(format!("{filename}.json"));
    if json_path.exists() {
        return Some(json_path);
    }

    None
}

/// Load and validate a config file, parsing it with json5
///
/// # Errors
///
/// * If the config file cannot be read
/// * If the config file is malformed
/// * If the parsed config fails validation
pub fn load_config_file(path: &Path) -> Result<PortfolioConfig, ConfigError> {
    log::debug!("load_config_file: path={}", path.display());

    let content = fs::read_to_string(path)?;
    let config: PortfolioConfig = json5::from_str(&content)?;
    config.validate()?;

    Ok(config)
}

/// Load `portfolio.json5` (or `portfolio.json`) from `dir`
///
/// # Errors
///
/// * If the config file cannot be read
/// * If the config file is malformed
/// * If the parsed config fails validation
pub fn load_config(dir: &Path) -> Result<PortfolioConfig, ConfigError> {
    if let Some(path) = get_config_file_path(dir, CONFIG_FILE_NAME) {
        load_config_file(&path)
    } else {
        log::debug!(
            "load_config: no config file in {}, using defaults",
            dir.display()
        );
        Ok(PortfolioConfig::default())
    }
}

/// Load the file named by `PORTFOLIO_CONFIG` when set, otherwise look in
/// `fallback_dir`
///
/// # Errors
///
/// * If the config file cannot be read
/// * If the config file is malformed
/// * If the parsed config fails validation
pub fn load_from_env(fallback_dir: &Path) -> Result<PortfolioConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => load_config_file(Path::new(&path)),
        _ => load_config(fallback_dir),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;

    #[test_log::test]
    fn test_parse_full_config_json5() {
        let json5_content = r#"{
            // Splash timings
            loading: { fadeDelayMs: 1000, hideDelayMs: 250 },
            typing: {
                phrases: ["Systems Programmer", "Compiler Hacker"],
                typeDelayMs: 80,
            },
            reveal: {
                threshold: 0.25,
                rootMargin: "0px 0px -100px 0px",
            },
            contact: { simulatedLatencyMs: 10 },
            parallax: { factor: 0.3, },
        }"#;

        let config: PortfolioConfig = json5::from_str(json5_content).unwrap();
        assert_eq!(config.loading.fade_delay_ms, 1000);
        assert_eq!(config.typing.phrases.len(), 2);
        assert_eq!(config.typing.type_delay_ms, 80);
        assert_eq!(config.reveal.root_margin, "0px 0px -100px 0px");
        assert_eq!(config.contact.simulated_latency_ms, 10);
        assert_eq!(
            config.contact.success_message,
            "Message sent successfully! I'll get back to you soon."
        );
    }

    #[test_log::test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_config(dir.path()).unwrap();

        assert_eq!(config, PortfolioConfig::default());
    }

    #[test_log::test]
    fn test_json5_preferred_over_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("portfolio.json"),
            r#"{"navigation": {"headerOffset": 10}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("portfolio.json5"),
            "{ navigation: { headerOffset: 20 } }",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();

        assert!((config.navigation.header_offset - 20.0).abs() < f32::EPSILON);
    }

    #[test_log::test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("portfolio.json"), "{ typing: { phrases: [] } }").unwrap();

        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test_log::test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("portfolio.json5"), "{ typing: ").unwrap();

        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test_log::test]
    #[serial]
    fn test_env_var_overrides_directory() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("custom.json5");
        fs::write(&explicit, "{ entrance: { staggerMs: 50 } }").unwrap();

        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, &explicit);
        }
        let config = load_from_env(Path::new("/nonexistent"));
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }

        assert_eq!(config.unwrap().entrance.stagger_ms, 50);
    }

    #[test_log::test]
    #[serial]
    fn test_env_var_pointing_at_missing_file_is_a_read_error() {
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/portfolio.json5");
        }
        let result = load_from_env(Path::new("/nonexistent"));
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }

        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
