use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Environment prefix for overrides, e.g. `BOOKDESK__SERVER__PORT=9090`.
pub const DEFAULT_PREFIX: &str = "BOOKDESK";

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. built-in defaults,
/// 2. `{config_dir}/default.*` (optional),
/// 3. `{config_dir}/{RUN_ENV}.*` (optional, `RUN_ENV` defaults to `debug`),
/// 4. `BOOKDESK__*` environment variables (after `.env` has been loaded).
///
/// `config_dir` is `BOOKDESK_CONFIG_DIR` or `./config`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
    let config_dir = env::var("BOOKDESK_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env, &prefix)
}

/// Same as [`load_config`] with every source location spelled out.
pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    prefix: &str,
) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(prefix)
                .separator("__")
                .try_parsing(true),
        );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.schedule.validate().map_err(ConfigError::Message)?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` if set, otherwise the first command line
/// argument when it starts with `.env`, otherwise `.env`. Loading happens at
/// most once per process; a missing file is not an error.
///
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path(), "debug", "BOOKDESK_TEST_EMPTY").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.schedule.day_start_hour, 9);
        assert_eq!(config.schedule.day_end_hour, 17);
        assert_eq!(config.console.time_zone, "Europe/Moscow");
    }

    #[test]
    fn test_run_env_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 9000\n[console]\napi_base_url = \"http://admin.local\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("release.toml"), "[server]\nport = 9100\n").unwrap();

        let config = load_config_from(dir.path(), "release", "BOOKDESK_TEST_FILES").unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.console.api_base_url, "http://admin.local");
        assert_eq!(config.console.request_timeout_secs, 30);
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[schedule]\nweek_days = 5\n").unwrap();
        env::set_var("BOOKDESK_TEST_ENV__SCHEDULE__WEEK_DAYS", "6");

        let config = load_config_from(dir.path(), "debug", "BOOKDESK_TEST_ENV").unwrap();
        env::remove_var("BOOKDESK_TEST_ENV__SCHEDULE__WEEK_DAYS");

        assert_eq!(config.schedule.week_days, 6);
        assert_eq!(config.schedule.month_days, 30);
    }

    #[test]
    fn test_out_of_range_schedule_hours_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[schedule]\nday_end_hour = 25\n").unwrap();
        let err = load_config_from(dir.path(), "debug", "BOOKDESK_TEST_HOURS").unwrap_err();
        assert!(err.to_string().contains("0..=23"));

        fs::write(
            dir.path().join("default.toml"),
            "[schedule]\nday_start_hour = 18\nday_end_hour = 9\n",
        )
        .unwrap();
        let err = load_config_from(dir.path(), "debug", "BOOKDESK_TEST_HOURS").unwrap_err();
        assert!(err.to_string().contains("day_start_hour"));
    }
}
