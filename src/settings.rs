use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process settings, read from the environment (and `.env`, loaded in `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `GREENHOUSE_BIND_ADDR`
    pub bind_addr: String,
    /// `GREENHOUSE_CONFIG`: configuration document loaded at startup.
    pub config_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            bind_addr: non_blank("GREENHOUSE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            config_path: non_blank("GREENHOUSE_CONFIG").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.config_path, None);
    }

    #[test]
    fn test_reads_overrides() {
        let settings = Settings::from_lookup(|key| match key {
            "GREENHOUSE_BIND_ADDR" => Some("127.0.0.1:9000".into()),
            "GREENHOUSE_CONFIG" => Some("/etc/greenhouse.json".into()),
            _ => None,
        });
        assert_eq!(settings.bind_addr, "127.0.0.1:9000");
        assert_eq!(settings.config_path, Some(PathBuf::from("/etc/greenhouse.json")));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let settings = Settings::from_lookup(|_| Some("  ".into()));
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.config_path, None);
    }
}
