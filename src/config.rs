use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime settings, read from the environment and the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            output_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Builds the config from `LEAGUE_HOST`, `LEAGUE_PORT` and `LEAGUE_OUTPUT_DIR`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup; unset or
    /// unparseable values fall back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        AppConfig {
            host: lookup("LEAGUE_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: lookup("LEAGUE_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            output_dir: lookup("LEAGUE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }

    /// A port given on the command line wins over the environment
    pub fn with_port_arg(mut self, arg: Option<&str>) -> Self {
        if let Some(port) = arg.and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        self
    }
}
