use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// 覆盖配置文件中日志路径的环境变量
pub const LOG_ENV: &str = "SHOPLIST_LOG";

/// 初始化 tracing，仅写入文件
///
/// TUI 占用终端，默认不记录日志。设置 `SHOPLIST_LOG` 或配置 `log.file` 后开启，
/// 实际文件名为 `{path}.{timestamp}.{pid}`，避免多个实例互相覆盖。
pub fn init_tracing(config: &LogConfig) {
    let Some(log_path) = resolve_log_path(std::env::var_os(LOG_ENV).map(PathBuf::from), config)
    else {
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let Ok(file) = File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path.display());
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

/// 环境变量优先于配置文件
fn resolve_log_path(env_path: Option<PathBuf>, config: &LogConfig) -> Option<PathBuf> {
    env_path
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| config.file.clone())
}

fn unique_log_path(path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let pid = std::process::id();
    PathBuf::from(format!("{}.{}.{}", path.display(), timestamp, pid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_path_overrides_config() {
        let config = LogConfig {
            file: Some(PathBuf::from("/tmp/from-config.log")),
            ..LogConfig::default()
        };
        let resolved = resolve_log_path(Some(PathBuf::from("/tmp/from-env.log")), &config);
        assert_eq!(resolved, Some(PathBuf::from("/tmp/from-env.log")));
    }

    #[test]
    fn test_empty_env_falls_back_to_config() {
        let config = LogConfig {
            file: Some(PathBuf::from("/tmp/from-config.log")),
            ..LogConfig::default()
        };
        let resolved = resolve_log_path(Some(PathBuf::new()), &config);
        assert_eq!(resolved, Some(PathBuf::from("/tmp/from-config.log")));
    }

    #[test]
    fn test_logging_disabled_by_default() {
        assert_eq!(resolve_log_path(None, &LogConfig::default()), None);
    }

    #[test]
    fn test_unique_log_path_appends_pid() {
        let path = unique_log_path(Path::new("/tmp/shoplist.log"));
        let name = path.to_string_lossy().into_owned();
        assert!(name.starts_with("/tmp/shoplist.log."));
        assert!(name.ends_with(&format!(".{}", std::process::id())));
    }
}
