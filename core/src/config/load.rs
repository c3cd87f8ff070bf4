use std::path::{Path, PathBuf};

use super::types::AppConfig;

const CONFIG_FILE: &str = "harvester.toml";

/// Candidate config file locations, highest priority first:
/// `./harvester.toml`, then `<user config dir>/harvester/harvester.toml`.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("harvester").join(CONFIG_FILE));
    }
    candidates
}

pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)?;
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    let mut cfg = AppConfig::default();
    for candidate in config_file_candidates() {
        if candidate.exists() {
            cfg = load_from(&candidate)?;
            break;
        }
    }

    if let Some(dir) = cfg.logging.directory.take() {
        cfg.logging.directory = Some(shellexpand::tilde(&dir).to_string());
    }

    // Environment variable overrides (highest priority).
    if let Ok(v) = std::env::var("HARVESTER_URL") {
        if !v.trim().is_empty() {
            cfg.server.url = v;
        }
    }
    if let Ok(v) = std::env::var("HARVESTER_TIMEOUT_MS") {
        if let Ok(ms) = v.trim().parse::<u64>() {
            cfg.http.timeout_ms = ms;
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            url = "https://harvest.example.com/rest/harvester"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.url, "https://harvest.example.com/rest/harvester");
        assert_eq!(cfg.logging.level, "debug");
        // Untouched sections keep their defaults.
        assert_eq!(cfg.http.timeout_ms, 30_000);
        assert!(cfg.logging.console);
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvester.toml");
        std::fs::write(&path, "[http]\ntimeout_ms = 1500\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.http.timeout_ms, 1500);
        assert_eq!(cfg.server.url, "http://localhost:8080/rest/harvester");
    }
}
