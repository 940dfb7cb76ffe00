//! Environment-derived settings. CLI flags override these; `.env` is loaded by the binary first.
use std::path::PathBuf;

use crate::color::{parse_color_mode, ColorMode};

pub const ENV_COLOR: &str = "PROJ_SCAFFOLD_COLOR";
pub const ENV_PYTHON: &str = "PROJ_SCAFFOLD_PYTHON";
pub const ENV_MANIFEST: &str = "PROJ_SCAFFOLD_MANIFEST";
pub const ENV_LOG: &str = "PROJ_SCAFFOLD_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub color: Option<ColorMode>,
    pub python: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub log: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Settings {
    /// Build from an arbitrary lookup so tests need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        Settings {
            color: non_empty(lookup(ENV_COLOR)).and_then(|v| parse_color_mode(&v)),
            python: non_empty(lookup(ENV_PYTHON)).map(PathBuf::from),
            manifest: non_empty(lookup(ENV_MANIFEST)).map(PathBuf::from),
            log: non_empty(lookup(ENV_LOG)),
        }
    }

    pub fn from_env() -> Settings {
        Settings::from_lookup(|k| std::env::var(k).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let mut env = HashMap::new();
        env.insert(ENV_COLOR, "never");
        env.insert(ENV_PYTHON, "/usr/bin/python3.11");
        env.insert(ENV_MANIFEST, "keep.json");
        env.insert(ENV_LOG, "debug");
        let s = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s.color, Some(ColorMode::Never));
        assert_eq!(s.python, Some(PathBuf::from("/usr/bin/python3.11")));
        assert_eq!(s.manifest, Some(PathBuf::from("keep.json")));
        assert_eq!(s.log.as_deref(), Some("debug"));
    }

    #[test]
    fn test_blank_and_unknown_values_are_ignored() {
        let mut env = HashMap::new();
        env.insert(ENV_COLOR, "sometimes");
        env.insert(ENV_PYTHON, "   ");
        let s = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s, Settings::default());
    }
}
