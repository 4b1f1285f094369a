use crate::domain::model::Coordinate;
use std::path::Path;

/// Resolved settings for one invite run, whichever source they came from.
pub trait ConfigProvider {
    fn office(&self) -> Coordinate;
    fn limit_distance_km(&self) -> f64;
    fn earth_radius_km(&self) -> f64;
    fn customers_path(&self) -> Option<&Path>;
    fn save_to_file(&self) -> bool;
    fn guest_list_path(&self) -> &Path;
}
