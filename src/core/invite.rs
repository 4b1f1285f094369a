use crate::core::geo::{great_circle_distance, round_half_even, EARTH_RADIUS_KM};
use crate::domain::model::{Coordinate, CustomerRecord, GuestList, RadianCoordinate, Value};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_coordinate, validate_number};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_LIMIT_KM: f64 = 100.0;

const REQUIRED_KEYS: [&str; 4] = ["latitude", "longitude", "user_id", "name"];

/// Office location plus the radius customers must fall within.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteContext {
    office: RadianCoordinate,
    limit_distance_km: f64,
    earth_radius_km: f64,
}

impl InviteContext {
    /// Build from unvalidated input: `office` must be a numeric pair and
    /// `limit_distance` a number.
    pub fn new(office: &Value, limit_distance: &Value) -> Result<Self> {
        let office = validate_coordinate(office)?;
        let limit = validate_number("limit_distance", limit_distance)?;
        Ok(Self::from_coordinate(office, limit))
    }

    pub fn from_coordinate(office: Coordinate, limit_distance_km: f64) -> Self {
        Self {
            office: office.to_radians(),
            limit_distance_km,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }

    pub fn with_earth_radius(mut self, earth_radius_km: f64) -> Self {
        self.earth_radius_km = earth_radius_km;
        self
    }

    pub fn office(&self) -> RadianCoordinate {
        self.office
    }

    pub fn limit_distance_km(&self) -> f64 {
        self.limit_distance_km
    }

    /// Kilometers from the office to a customer location in degrees.
    pub fn distance(&self, customer: Coordinate) -> f64 {
        great_circle_distance(self.office, customer.to_radians(), self.earth_radius_km)
    }

    /// Same as [`InviteContext::distance`] but validates the coordinate first.
    pub fn distance_to(&self, customer: &Value) -> Result<f64> {
        Ok(self.distance(validate_coordinate(customer)?))
    }

    /// The distance is rounded to 2 decimals before the comparison, so
    /// 100.004 km still passes a 100 km limit.
    pub fn is_within_limit(&self, distance_km: f64) -> bool {
        round_half_even(distance_km, 2) <= self.limit_distance_km
    }

    /// Read a line-delimited JSON customer file and keep those near the office.
    ///
    /// Any bad line aborts the whole load.
    pub fn load_customers(&self, source: Option<&Path>) -> Result<GuestList> {
        let path = source.ok_or(ToolError::MissingPath)?;
        if !path.is_file() {
            return Err(ToolError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Reading customers from {}", path.display());
        let file = File::open(path)?;
        self.load_customers_from_reader(BufReader::new(file))
    }

    pub fn load_customers_from_reader<R: BufRead>(&self, reader: R) -> Result<GuestList> {
        let mut guests = GuestList::new();
        let mut total = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => ToolError::invalid_value(format!(
                    "line {} is not valid UTF-8 text",
                    line_number
                )),
                _ => ToolError::IoError(e),
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let customer = parse_customer(&line, line_number)?;
            total += 1;

            let distance = self.distance(customer.location);
            if self.is_within_limit(distance) {
                tracing::debug!(
                    "Customer {} ({}) is {:.2} km away, inviting",
                    customer.user_id,
                    customer.name,
                    distance
                );
                if let Some(previous) = guests.insert(customer.user_id, customer.name) {
                    tracing::debug!(
                        "Duplicate user_id {} on line {} replaces {}",
                        customer.user_id,
                        line_number,
                        previous
                    );
                }
            } else {
                tracing::debug!(
                    "Customer {} is {:.2} km away, outside {} km",
                    customer.user_id,
                    distance,
                    self.limit_distance_km
                );
            }
        }

        tracing::info!(
            "Loaded {} customers, {} within {} km",
            total,
            guests.len(),
            self.limit_distance_km
        );
        Ok(guests)
    }
}

/// Parse one line of the customer file.
pub fn parse_customer(line: &str, line_number: usize) -> Result<CustomerRecord> {
    let parsed: serde_json::Value =
        serde_json::from_str(line).map_err(|source| ToolError::InvalidJson {
            line: line_number,
            source,
        })?;

    let serde_json::Value::Object(fields) = parsed else {
        return Err(ToolError::invalid_value(format!(
            "line {} is not a JSON object",
            line_number
        )));
    };

    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !fields.contains_key(**key)) {
        return Err(ToolError::missing_key(*missing));
    }

    let latitude = coerce_float("latitude", &fields["latitude"], line_number)?;
    let longitude = coerce_float("longitude", &fields["longitude"], line_number)?;
    let user_id = coerce_user_id(&fields["user_id"], line_number)?;
    let name = match &fields["name"] {
        serde_json::Value::String(name) => name.clone(),
        other => {
            return Err(ToolError::type_mismatch(
                "name",
                "str",
                Value::from(other.clone()).type_name(),
            ))
        }
    };

    Ok(CustomerRecord {
        user_id,
        name,
        location: Coordinate::new(latitude, longitude),
    })
}

fn coerce_float(field: &str, value: &serde_json::Value, line_number: usize) -> Result<f64> {
    let coerced = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    coerced.ok_or_else(|| {
        ToolError::invalid_value(format!(
            "could not convert {} to float on line {}: {}",
            field, line_number, value
        ))
    })
}

fn coerce_user_id(value: &serde_json::Value, line_number: usize) -> Result<i64> {
    let coerced = match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    coerced.ok_or_else(|| {
        ToolError::invalid_value(format!(
            "user_id must be an integer on line {}: {}",
            line_number, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn dublin() -> InviteContext {
        InviteContext::new(&Value::from((53.3393, -6.2576841)), &Value::from(DEFAULT_LIMIT_KM))
            .unwrap()
    }

    const CUSTOMERS: &str = r#"{"latitude": "52.986375", "user_id": 12, "name": "Christina McArdle", "longitude": "-6.043701"}
{"latitude": "51.92893", "user_id": 1, "name": "Alice Cahill", "longitude": "-10.27699"}
{"latitude": "53.2451022", "user_id": 4, "name": "Ian Kehoe", "longitude": "-6.238335"}
{"latitude": "53.1302756", "user_id": 5, "name": "Nora Dempsey", "longitude": "-6.2397222"}
{"latitude": "52.833502", "user_id": 25, "name": "David Behan", "longitude": "-8.522366"}
"#;

    #[test]
    fn test_new_validates_inputs() {
        let context = InviteContext::new(&Value::from((53.3393, -4)), &Value::from(80)).unwrap();
        assert_eq!(context.office(), Coordinate::new(53.3393, -4.0).to_radians());
        assert_eq!(context.limit_distance_km(), 80.0);

        let cases = [
            (Value::from((53.3393, -6.2576841)), Value::Null),
            (Value::from(("10.00", -22.0909)), Value::Null),
            (Value::from((10.00, "10.00")), Value::Null),
            (Value::from((53.3393, -22.0909)), Value::from("100")),
            (Value::from(vec![53.3393, -22.0909]), Value::from(22)),
        ];
        for (office, limit) in cases {
            let err = InviteContext::new(&office, &limit).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type, "office {:?} limit {:?}", office, limit);
        }
    }

    #[test]
    fn test_limit_type_error_message() {
        let err = InviteContext::new(&Value::from((53.3393, -6.0)), &Value::from("100")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "limit_distance expected int or float but received str"
        );
    }

    #[test]
    fn test_distance_reference_values() {
        let context = dublin();
        let cases = [
            ((52.986375, -6.043701), 41.755813545096565),
            ((51.92893, -10.27699), 313.24768450696104),
            ((51.8856167, -10.4240951), 324.3670068155382),
            ((52.3191841, -8.5072391), 188.949920038136),
            ((53.807778, -7.714444), 109.38219327418832),
            ((53.4692815, -9.436036), 211.1720126163795),
            ((54.0894797, -6.18671), 83.5468161909727),
            ((53.038056, -7.653889), 98.86864753879988),
        ];

        for ((lat, long), expected) in cases {
            let distance = context.distance(Coordinate::new(lat, long));
            assert_eq!(distance, expected, "distance to ({}, {})", lat, long);
        }
    }

    #[test]
    fn test_distance_to_validates() {
        let context = dublin();
        assert!(context.distance_to(&Value::from((52.986375, -6.043701))).is_ok());
        let err = context.distance_to(&Value::from(vec![52.9, -6.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_is_within_limit() {
        let context = dublin();
        assert!(context.is_within_limit(100.0));
        assert!(!context.is_within_limit(900.0));
        assert!(context.is_within_limit(89.90));
        assert!(context.is_within_limit(99.99));
        assert!(!context.is_within_limit(100.05));
    }

    #[test]
    fn test_is_within_limit_rounds_before_comparing() {
        let context = dublin();
        assert!(context.is_within_limit(100.004));
        assert!(!context.is_within_limit(100.006));

        // 100.125 is an exact tie and rounds to even (100.12).
        let tight = InviteContext::from_coordinate(Coordinate::new(53.3393, -6.2576841), 100.12);
        assert!(tight.is_within_limit(100.125));
        assert!(!tight.is_within_limit(100.126));
    }

    #[test]
    fn test_zero_and_negative_limits() {
        let office = Coordinate::new(53.3393, -6.2576841);
        let zero = InviteContext::from_coordinate(office, 0.0);
        assert!(zero.is_within_limit(zero.distance(office)));
        assert!(!zero.is_within_limit(0.01));

        let negative = InviteContext::from_coordinate(office, -1.0);
        assert!(!negative.is_within_limit(negative.distance(office)));
    }

    #[test]
    fn test_custom_earth_radius_scales_distance() {
        let office = Coordinate::new(53.3393, -6.2576841);
        let customer = Coordinate::new(52.986375, -6.043701);
        let earth = InviteContext::from_coordinate(office, 100.0);
        let half = InviteContext::from_coordinate(office, 100.0).with_earth_radius(EARTH_RADIUS_KM / 2.0);
        assert!((earth.distance(customer) / 2.0 - half.distance(customer)).abs() < 1e-9);
    }

    #[test]
    fn test_load_customers_from_reader() {
        let guests = dublin().load_customers_from_reader(Cursor::new(CUSTOMERS)).unwrap();
        let expected: GuestList = [
            (4, "Ian Kehoe".to_string()),
            (5, "Nora Dempsey".to_string()),
            (12, "Christina McArdle".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(guests, expected);
    }

    #[test]
    fn test_load_customers_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CUSTOMERS.as_bytes()).unwrap();

        let guests = dublin().load_customers(Some(file.path())).unwrap();
        assert_eq!(guests.keys().copied().collect::<Vec<_>>(), vec![4, 5, 12]);
    }

    #[test]
    fn test_load_customers_missing_key_aborts() {
        let data = format!(
            "{}{}\n",
            CUSTOMERS, r#"{"latitude": "52.986375", "user_id": 99, "longitude": "-6.043701"}"#
        );
        let err = dublin().load_customers_from_reader(Cursor::new(data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Key);
        assert_eq!(err.to_string(), "invalid file key : \"name\" not found");
    }

    #[test]
    fn test_load_customers_missing_key_far_away_still_fails() {
        let data = r#"{"latitude": "10.0", "longitude": "10.0", "name": "Far Away"}"#;
        let err = dublin().load_customers_from_reader(Cursor::new(data)).unwrap_err();
        assert_eq!(err.to_string(), "invalid file key : \"user_id\" not found");
    }

    #[test]
    fn test_load_customers_missing_and_absent_paths() {
        let err = dublin().load_customers(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        let dir = tempfile::tempdir().unwrap();
        let err = dublin()
            .load_customers(Some(&dir.path().join("customers_test1.json")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);

        let err = dublin().load_customers(Some(dir.path())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_load_customers_malformed_json() {
        let data = format!("{}{{\"latitude\": \n", CUSTOMERS);
        let err = dublin().load_customers_from_reader(Cursor::new(data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert!(err.to_string().starts_with("invalid JSON on line 6"));
    }

    #[test]
    fn test_load_customers_invalid_utf8_is_value_error() {
        let mut data = CUSTOMERS.as_bytes().to_vec();
        data.extend_from_slice(
            b"{\"latitude\": \"53.0\", \"user_id\": 9, \"name\": \"\xff\", \"longitude\": \"-6.0\"}\n",
        );

        let err = dublin().load_customers_from_reader(Cursor::new(data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(err.to_string(), "line 6 is not valid UTF-8 text");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_load_customers_skips_blank_lines() {
        let data = format!("\n{}\n   \n", CUSTOMERS);
        let guests = dublin().load_customers_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(guests.len(), 3);
    }

    #[test]
    fn test_parse_customer_coercions() {
        let record = parse_customer(
            r#"{"latitude": 52.986375, "longitude": "-6.043701", "user_id": "12", "name": "Christina"}"#,
            1,
        )
        .unwrap();
        assert_eq!(record.user_id, 12);
        assert_eq!(record.location, Coordinate::new(52.986375, -6.043701));

        let err = parse_customer(
            r#"{"latitude": "north", "longitude": "-6.0", "user_id": 1, "name": "X"}"#,
            3,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        let err = parse_customer(
            r#"{"latitude": "53.0", "longitude": "-6.0", "user_id": 1, "name": 7}"#,
            3,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let err = parse_customer("[1, 2]", 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }
}
