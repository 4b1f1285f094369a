pub mod flatten;
pub mod geo;
pub mod guest_list;
pub mod invite;
pub mod run;

pub use crate::domain::model::{Coordinate, CustomerRecord, GuestList, RadianCoordinate, Value};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
