// src/config.rs

use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::source::{Palette, Source};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("unknown source `{0}` in colors")]
    UnknownSource(String),
    #[error("color `{color}` for `{series}` is not #RRGGBB")]
    BadColor { series: Source, color: String },
}

/// Dashboard settings, read from YAML. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub title: String,
    pub attribution: String,
    /// Colour overrides keyed by series name, e.g. `Coal: "#000000"`.
    pub colors: BTreeMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("electricity_prod_databank.xlsx"),
            sheet: None,
            title: "Power Generation Sources in the Philippines".into(),
            attribution: "Dataset from International Energy Agency (IEA) through World Bank - \
                          World Development Indicators"
                .into(),
            colors: BTreeMap::new(),
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl DashboardConfig {
    pub fn from_yaml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.palette()?;
        Ok(cfg)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text, path)
    }

    /// Default palette with the configured overrides applied.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let mut palette = Palette::default();
        for (name, color) in &self.colors {
            let series = Source::from_column_name(name)
                .ok_or_else(|| ConfigError::UnknownSource(name.clone()))?;
            if !is_hex_color(color) {
                return Err(ConfigError::BadColor {
                    series,
                    color: color.clone(),
                });
            }
            palette.set(series, color.clone());
        }
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_gives_defaults() -> Result<()> {
        let cfg = DashboardConfig::from_yaml_str("{}", Path::new("cfg.yaml"))?;
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.palette()?, Palette::default());
        Ok(())
    }

    #[test]
    fn reads_overrides_from_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "input: data/ph.csv")?;
        writeln!(tmp, "sheet: Data")?;
        writeln!(tmp, "colors:")?;
        writeln!(tmp, "  Natural gas: \"#123abc\"")?;

        let cfg = DashboardConfig::from_file(tmp.path())?;
        assert_eq!(cfg.input, PathBuf::from("data/ph.csv"));
        assert_eq!(cfg.sheet.as_deref(), Some("Data"));
        assert_eq!(cfg.palette()?.color(Source::NaturalGas), "#123abc");
        assert_eq!(cfg.palette()?.color(Source::Coal), "#222C61");
        Ok(())
    }

    #[test]
    fn rejects_unknown_source() {
        let err = DashboardConfig::from_yaml_str("colors:\n  Nuclear: \"#000000\"\n", Path::new("c"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSource(ref s) if s == "Nuclear"));
    }

    #[test]
    fn rejects_bad_color() {
        let err = DashboardConfig::from_yaml_str("colors:\n  Oil: red\n", Path::new("c")).unwrap_err();
        assert!(matches!(err, ConfigError::BadColor { series: Source::Oil, .. }));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = DashboardConfig::from_yaml_str("port: 8050\n", Path::new("c")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
