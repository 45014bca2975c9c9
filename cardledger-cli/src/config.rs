use anyhow::{Context, Result, bail};
use cardledger_ingest::{RowPolicy, TableLayout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// `config.toml`. Every key is optional.
///
/// ```toml
/// [layout]
/// area = [195.0, 57.0, 800.0, 353.0]   # top, left, bottom, right
/// columns = [58.0, 95.8, 128.0, 301.0]
/// page_height = 792.0
/// row_tolerance = 3.0
///
/// [rows]
/// policy = "skip"                      # or "strict"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: TableLayout,
    pub rows: RowsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowsSection {
    pub policy: RowPolicy,
}

pub fn cardledger_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cardledger"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(cardledger_home()?.join("config.toml"))
}

/// An explicit path must exist. Otherwise `~/.cardledger/config.toml` is used
/// when present, falling back to the built-in layout.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    check_layout(&cfg.layout)?;
    Ok(cfg)
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

fn check_layout(layout: &TableLayout) -> Result<()> {
    if layout.top() >= layout.bottom() || layout.left() >= layout.right() {
        bail!("layout.area must be [top, left, bottom, right] with top < bottom and left < right");
    }
    if layout.columns.windows(2).any(|w| w[0] >= w[1]) {
        bail!("layout.columns must be strictly increasing");
    }
    if layout.columns.len() != 4 {
        bail!(
            "layout.columns needs 4 separators (margin, dates, activity, amount), got {}",
            layout.columns.len()
        );
    }
    if layout.page_height <= 0.0 || layout.row_tolerance < 0.0 {
        bail!("layout.page_height must be positive and layout.row_tolerance non-negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg =
            parse_config("[rows]\npolicy = \"strict\"\n[layout]\npage_height = 842.0\n").unwrap();
        assert_eq!(cfg.rows.policy, RowPolicy::Strict);
        assert_eq!(cfg.layout.page_height, 842.0);
        assert_eq!(cfg.layout.columns, TableLayout::default().columns);
    }

    #[test]
    fn test_rejects_bad_layout() {
        assert!(parse_config("[layout]\ncolumns = [58.0, 40.0, 128.0, 301.0]\n").is_err());
        assert!(parse_config("[layout]\ncolumns = [58.0, 95.8]\n").is_err());
        assert!(parse_config("[layout]\narea = [800.0, 57.0, 195.0, 353.0]\n").is_err());
        assert!(parse_config("[rows]\npolicy = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_rendered_config_parses_back() {
        let cfg = Config::default();
        let text = render_config(&cfg).unwrap();
        assert_eq!(parse_config(&text).unwrap(), cfg);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
