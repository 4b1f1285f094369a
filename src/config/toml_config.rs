use crate::core::geo::EARTH_RADIUS_KM;
use crate::core::guest_list::DEFAULT_GUEST_LIST_FILE;
use crate::core::invite::DEFAULT_LIMIT_KM;
use crate::domain::model::Coordinate;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_finite, validate_path, validate_positive, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dublin office, used when no coordinate is configured.
pub const DUBLIN_OFFICE: Coordinate = Coordinate {
    latitude: 53.3393,
    longitude: -6.2576841,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InviteConfig {
    pub office: Option<Coordinate>,
    #[serde(default)]
    pub invite: InviteSection,
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InviteSection {
    pub limit_distance_km: Option<f64>,
    pub earth_radius_km: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSection {
    pub customers_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    pub save: Option<bool>,
    pub guest_list_path: Option<PathBuf>,
}

impl InviteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ToolError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ToolError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ToolError::ConfigError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn office_or_default(&self) -> Coordinate {
        self.office.unwrap_or(DUBLIN_OFFICE)
    }
}

impl Validate for InviteConfig {
    fn validate(&self) -> Result<()> {
        if let Some(office) = &self.office {
            validate_finite("office.latitude", office.latitude)?;
            validate_finite("office.longitude", office.longitude)?;
        }

        if let Some(limit) = self.invite.limit_distance_km {
            validate_finite("invite.limit_distance_km", limit)?;
        }

        if let Some(radius) = self.invite.earth_radius_km {
            validate_positive("invite.earth_radius_km", radius)?;
        }

        if let Some(path) = &self.input.customers_path {
            validate_path("input.customers_path", &path.to_string_lossy())?;
        }

        if let Some(path) = &self.output.guest_list_path {
            validate_path("output.guest_list_path", &path.to_string_lossy())?;
        }

        Ok(())
    }
}

impl ConfigProvider for InviteConfig {
    fn office(&self) -> Coordinate {
        self.office_or_default()
    }

    fn limit_distance_km(&self) -> f64 {
        self.invite.limit_distance_km.unwrap_or(DEFAULT_LIMIT_KM)
    }

    fn earth_radius_km(&self) -> f64 {
        self.invite.earth_radius_km.unwrap_or(EARTH_RADIUS_KM)
    }

    fn customers_path(&self) -> Option<&Path> {
        self.input.customers_path.as_deref()
    }

    fn save_to_file(&self) -> bool {
        self.output.save.unwrap_or(false)
    }

    fn guest_list_path(&self) -> &Path {
        self.output
            .guest_list_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_GUEST_LIST_FILE))
    }
}
