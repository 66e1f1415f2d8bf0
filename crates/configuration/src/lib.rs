use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{
    AnalysisSettings, ChartSettings, Config, GeneratorSettings, LogFormat, LoggingSettings, Paths,
};

/// Prefix for environment overrides, e.g. `REVENUE_EDA__GENERATOR__SEED=7`.
pub const ENV_PREFIX: &str = "REVENUE_EDA";

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, the TOML file at `path`
/// (skipped when it does not exist), then `REVENUE_EDA__*` environment
/// variables. The merged result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Missing sections fall back to `Default` through `#[serde(default)]`.
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn toml_file() -> NamedTempFile {
        Builder::new().suffix(".toml").tempfile().unwrap()
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.analysis.rolling_window, 7);
    }

    #[test]
    fn test_partial_file_overrides_only_named_keys() {
        let mut file = toml_file();
        writeln!(file, "[generator]\nseed = 7\nyear = 2024\n\n[analysis]\niqr_multiplier = 3.0").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.generator.year, 2024);
        assert_eq!(config.generator.missing_days, 20);
        assert_eq!(config.analysis.iqr_multiplier, 3.0);
        assert_eq!(config.analysis.rolling_window, 7);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = toml_file();
        writeln!(file, "[analysis]\npreview_rows = 3\n\n[charts]\nwidth = 800").unwrap();

        // No other test in this crate reads these two keys.
        unsafe {
            std::env::set_var("REVENUE_EDA__ANALYSIS__PREVIEW_ROWS", "9");
            std::env::set_var("REVENUE_EDA__CHARTS__WIDTH", "640");
        }
        let config = load_config(file.path());
        unsafe {
            std::env::remove_var("REVENUE_EDA__ANALYSIS__PREVIEW_ROWS");
            std::env::remove_var("REVENUE_EDA__CHARTS__WIDTH");
        }

        let config = config.unwrap();
        assert_eq!(config.analysis.preview_rows, 9);
        assert_eq!(config.charts.width, 640);
        assert_eq!(config.charts.height, 600);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = toml_file();
        writeln!(file, "[analysis]\nrolling_window = 0").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
