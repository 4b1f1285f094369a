use crate::config::toml_config::{InviteConfig, DUBLIN_OFFICE};
use crate::domain::model::Coordinate;
use crate::utils::error::{Result, ToolError};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CUSTOMERS_FILE: &str = "customers.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "invite-customers")]
#[command(about = "Invite customers who live within a distance of the office")]
pub struct CliConfig {
    /// Office coordinate (latitude longitude) in degrees, e.g. 53.3393 -6.2576841
    #[arg(
        short = 'c',
        long,
        num_args = 2,
        value_names = ["LATITUDE", "LONGITUDE"],
        allow_negative_numbers = true
    )]
    pub coordinate: Option<Vec<f64>>,

    /// Line-delimited JSON file with one customer per line
    #[arg(long)]
    pub customers_path_name: Option<PathBuf>,

    /// Save the guest list to a file ("true" or "True")
    #[arg(short = 's', long)]
    pub save: Option<String>,

    /// Where the guest list is saved
    #[arg(short = 'g', long)]
    pub guest_path_name: Option<PathBuf>,

    /// Maximum distance from the office in kilometers
    #[arg(short = 'l', long, allow_negative_numbers = true)]
    pub limit: Option<f64>,

    /// Optional TOML config file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "flatten-array")]
#[command(about = "Convert a nested array into a flat array")]
pub struct FlattenCliConfig {
    /// Nested array as JSON, e.g. [[1,2,[3]],4]
    #[arg(short = 'a', long, default_value = "[1, [2]]")]
    pub array: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Only the literal strings `true` and `True` enable saving.
    pub fn save_flag(&self) -> Option<bool> {
        self.save
            .as_deref()
            .map(|value| matches!(value, "true" | "True"))
    }

    pub fn office_coordinate(&self) -> Result<Option<Coordinate>> {
        match self.coordinate.as_deref() {
            None => Ok(None),
            Some([latitude, longitude, ..]) => Ok(Some(Coordinate::new(*latitude, *longitude))),
            Some(values) => Err(ToolError::invalid_value(format!(
                "coordinate needs a latitude and a longitude, got {} value(s)",
                values.len()
            ))),
        }
    }

    /// Load the config file if one was given, then layer the flags on top.
    pub fn resolve(&self) -> Result<InviteConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                InviteConfig::from_file(path)?
            }
            None => InviteConfig::default(),
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut InviteConfig) -> Result<()> {
        if let Some(office) = self.office_coordinate()? {
            config.office = Some(office);
        }
        if config.office.is_none() {
            tracing::info!(
                "Use Dublin office coordinate : ({}, {})",
                DUBLIN_OFFICE.latitude,
                DUBLIN_OFFICE.longitude
            );
        }

        if let Some(limit) = self.limit {
            config.invite.limit_distance_km = Some(limit);
        }

        if let Some(path) = &self.customers_path_name {
            config.input.customers_path = Some(path.clone());
        }
        if config.input.customers_path.is_none() {
            config.input.customers_path = Some(PathBuf::from(DEFAULT_CUSTOMERS_FILE));
        }

        if let Some(save) = self.save_flag() {
            config.output.save = Some(save);
        }

        if let Some(path) = &self.guest_path_name {
            config.output.guest_list_path = Some(path.clone());
        }

        Ok(())
    }
}
