pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, FlattenCliConfig};
pub use config::InviteConfig;

pub use crate::core::{
    flatten::{flatten, flatten_json},
    geo::{degrees_to_radians, great_circle_distance, EARTH_RADIUS_KM},
    guest_list::{emit_guest_list, GuestListOutput},
    invite::InviteContext,
    run::{InviteRun, RunSummary},
};
pub use domain::model::{Coordinate, GuestList, RadianCoordinate, Value};
pub use utils::error::{Result, ToolError};
