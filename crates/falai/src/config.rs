/// Default synchronous-run endpoint.
pub const DEFAULT_API_BASE: &str = "https://fal.run";

/// Default storage REST endpoint.
pub const DEFAULT_STORAGE_BASE: &str = "https://rest.alpha.fal.ai";

/// fal.ai connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FalConfig {
    /// API key. `None` means run with the offline development gateway.
    pub api_key: Option<String>,
    /// Base URL for model runs (default: `https://fal.run`).
    pub api_base: String,
    /// Base URL for storage uploads (default: `https://rest.alpha.fal.ai`).
    pub storage_base: String,
}

impl Default for FalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            storage_base: DEFAULT_STORAGE_BASE.to_string(),
        }
    }
}

impl FalConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                       |
    /// |--------------------------|-------------------------------|
    /// | `FAL_KEY` / `FAL_API_KEY`| unset (development gateway)   |
    /// | `FAL_API_BASE`           | `https://fal.run`             |
    /// | `FAL_STORAGE_BASE`       | `https://rest.alpha.fal.ai`   |
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_env("FAL_KEY").or_else(|| non_empty_env("FAL_API_KEY")),
            api_base: non_empty_env("FAL_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            storage_base: non_empty_env("FAL_STORAGE_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_STORAGE_BASE.to_string()),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
