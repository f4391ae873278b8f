use std::path::PathBuf;
use std::str::FromStr;

use wellness_api::{ApiConfig, DEFAULT_DEMO_PASSWORD};
use wellness_fixtures::seed::EMPLOYEE_EMAIL;

/// Which of the two historical front-ends to imitate. They share every
/// contract and differ only in how snappy the fake backend feels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Demo,
    Frontend,
}

impl Variant {
    pub fn latency_scale(self) -> f64 {
        match self {
            Variant::Demo => 1.0,
            Variant::Frontend => 0.5,
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(Variant::Demo),
            "frontend" => Ok(Variant::Frontend),
            _ => Err(ConfigError::Invalid {
                var: "WELLNESS_VARIANT",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub variant: Variant,
    pub email: String,
    pub password: String,
    pub latency_scale: f64,
    /// File-backed session token when set, in-memory otherwise.
    pub token_path: Option<PathBuf>,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let variant = match lookup("WELLNESS_VARIANT") {
            Some(v) => v.parse()?,
            None => Variant::Demo,
        };

        let latency_scale = match lookup("WELLNESS_LATENCY_SCALE") {
            Some(v) => v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|scale| scale.is_finite() && *scale >= 0.0)
                .ok_or(ConfigError::Invalid {
                    var: "WELLNESS_LATENCY_SCALE",
                    value: v,
                })?,
            None => variant.latency_scale(),
        };

        Ok(Self {
            variant,
            email: lookup("WELLNESS_DEMO_EMAIL").unwrap_or_else(|| EMPLOYEE_EMAIL.into()),
            password: lookup("WELLNESS_DEMO_PASSWORD")
                .unwrap_or_else(|| DEFAULT_DEMO_PASSWORD.into()),
            latency_scale,
            token_path: lookup("WELLNESS_TOKEN_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            demo_password: self.password.clone(),
            latency_scale: self.latency_scale,
        }
    }
}
