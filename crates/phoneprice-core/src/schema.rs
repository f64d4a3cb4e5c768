//! The feature schema: the twenty phone specification fields, in the order the
//! scaler and classifier were fitted with.
//!
//! Position in [`FEATURES`] is the column index the model sees. Reordering,
//! inserting, or removing an entry silently changes what every coefficient
//! means, so artifacts must be refitted whenever this table changes.

use std::fmt;

use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Number of features the model consumes.
pub const FEATURE_COUNT: usize = 20;

/// Allowed values for a single feature (bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Binary yes/no, encoded as 0 or 1.
    Flag,
    /// Whole numbers only.
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
}

impl Domain {
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Self::Flag => value == 0.0 || value == 1.0,
            Self::Integer { min, max } => {
                value.fract() == 0.0 && value >= min as f64 && value <= max as f64
            }
            Self::Float { min, max } => value >= min && value <= max,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "{{0,1}}"),
            Self::Integer { min, max } => write!(f, "integer [{min}, {max}]"),
            Self::Float { min, max } => write!(f, "float [{min:?}, {max:?}]"),
        }
    }
}

/// One entry of the feature schema.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    /// Stable machine name, used as JSON key and Arrow column name.
    pub name: &'static str,
    /// Human-readable label with unit.
    pub label: &'static str,
    pub domain: Domain,
    /// Value used when a request leaves the field out.
    pub default: f64,
}

const fn flag(name: &'static str, label: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        label,
        domain: Domain::Flag,
        default: 0.0,
    }
}

const fn int(
    name: &'static str,
    label: &'static str,
    min: i64,
    max: i64,
    default: i64,
) -> FeatureSpec {
    FeatureSpec {
        name,
        label,
        domain: Domain::Integer { min, max },
        default: default as f64,
    }
}

const fn float(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
) -> FeatureSpec {
    FeatureSpec {
        name,
        label,
        domain: Domain::Float { min, max },
        default,
    }
}

/// The feature schema, in model column order.
pub const FEATURES: [FeatureSpec; FEATURE_COUNT] = [
    int("battery_power", "Battery Power (mAh)", 500, 20000, 1000),
    flag("bluetooth_flag", "Bluetooth"),
    float("clock_speed", "Clock Speed (GHz)", 0.1, 3.0, 1.5),
    flag("dual_sim_flag", "Dual SIM"),
    int("front_camera_mp", "Front Camera (MP)", 0, 20, 5),
    flag("four_g_flag", "4G Support"),
    int("internal_memory_gb", "Internal Memory (GB)", 2, 512, 32),
    float("mobile_depth_cm", "Mobile Depth (cm)", 0.1, 1.0, 0.5),
    int("mobile_weight_g", "Mobile Weight (grams)", 50, 300, 150),
    int("core_count", "Number of Cores", 1, 8, 4),
    int("primary_camera_mp", "Primary Camera (MP)", 0, 20, 10),
    int("pixel_height", "Pixel Height", 0, 2000, 800),
    int("pixel_width", "Pixel Width", 0, 2000, 1200),
    int("ram_mb", "RAM (MB)", 256, 8192, 2048),
    int("screen_height_cm", "Screen Height (cm)", 5, 20, 10),
    int("screen_width_cm", "Screen Width (cm)", 1, 20, 5),
    int("talk_time_hours", "Talk Time (hours)", 2, 50, 10),
    flag("three_g_flag", "3G Support"),
    flag("touch_screen_flag", "Touch Screen"),
    flag("wifi_flag", "WiFi"),
];

/// Look up a feature's position by name.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURES.iter().position(|f| f.name == name)
}

/// Arrow schema for batch input: one non-nullable `Float64` column per
/// feature, in model order.
pub fn feature_schema() -> Schema {
    Schema::new(
        FEATURES
            .iter()
            .map(|f| Field::new(f.name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    )
}

/// Fixed-order numeric encoding of one phone.
///
/// Construction does not validate, so a malformed request (wrong length,
/// out-of-range value) can still be represented and rejected with a
/// precise [`InputError`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check length and per-field domains against [`FEATURES`].
    pub fn validate(&self) -> Result<(), InputError> {
        if self.0.len() != FEATURE_COUNT {
            return Err(InputError::WrongLength {
                expected: FEATURE_COUNT,
                actual: self.0.len(),
            });
        }

        for (spec, &value) in FEATURES.iter().zip(&self.0) {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field: spec.name });
            }
            if !spec.domain.contains(value) {
                return Err(InputError::OutOfDomain {
                    field: spec.name,
                    value,
                    domain: spec.domain,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&PhoneSpec> for FeatureVector {
    fn from(spec: &PhoneSpec) -> Self {
        spec.to_vector()
    }
}

/// Named-field phone specification, as submitted by a caller.
///
/// Missing JSON keys take the schema default. Integer fields are `i64`, so
/// any out-of-range whole number still reaches validation and is reported
/// as [`InputError::OutOfDomain`]. A fractional or non-integral JSON number
/// for an integer field fails deserialization instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhoneSpec {
    pub battery_power: i64,
    pub bluetooth_flag: i64,
    pub clock_speed: f64,
    pub dual_sim_flag: i64,
    pub front_camera_mp: i64,
    pub four_g_flag: i64,
    pub internal_memory_gb: i64,
    pub mobile_depth_cm: f64,
    pub mobile_weight_g: i64,
    pub core_count: i64,
    pub primary_camera_mp: i64,
    pub pixel_height: i64,
    pub pixel_width: i64,
    pub ram_mb: i64,
    pub screen_height_cm: i64,
    pub screen_width_cm: i64,
    pub talk_time_hours: i64,
    pub three_g_flag: i64,
    pub touch_screen_flag: i64,
    pub wifi_flag: i64,
}

impl Default for PhoneSpec {
    fn default() -> Self {
        Self {
            battery_power: 1000,
            bluetooth_flag: 0,
            clock_speed: 1.5,
            dual_sim_flag: 0,
            front_camera_mp: 5,
            four_g_flag: 0,
            internal_memory_gb: 32,
            mobile_depth_cm: 0.5,
            mobile_weight_g: 150,
            core_count: 4,
            primary_camera_mp: 10,
            pixel_height: 800,
            pixel_width: 1200,
            ram_mb: 2048,
            screen_height_cm: 10,
            screen_width_cm: 5,
            talk_time_hours: 10,
            three_g_flag: 0,
            touch_screen_flag: 0,
            wifi_flag: 0,
        }
    }
}

impl PhoneSpec {
    /// Encode in [`FEATURES`] order.
    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector(vec![
            self.battery_power as f64,
            self.bluetooth_flag as f64,
            self.clock_speed,
            self.dual_sim_flag as f64,
            self.front_camera_mp as f64,
            self.four_g_flag as f64,
            self.internal_memory_gb as f64,
            self.mobile_depth_cm,
            self.mobile_weight_g as f64,
            self.core_count as f64,
            self.primary_camera_mp as f64,
            self.pixel_height as f64,
            self.pixel_width as f64,
            self.ram_mb as f64,
            self.screen_height_cm as f64,
            self.screen_width_cm as f64,
            self.talk_time_hours as f64,
            self.three_g_flag as f64,
            self.touch_screen_flag as f64,
            self.wifi_flag as f64,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Every field at the bottom of its domain, flags off.
    fn minimum_vector() -> Vec<f64> {
        FEATURES
            .iter()
            .map(|f| match f.domain {
                Domain::Flag => 0.0,
                Domain::Integer { min, .. } => min as f64,
                Domain::Float { min, .. } => min,
            })
            .collect()
    }

    #[test]
    fn schema_has_twenty_unique_names() {
        let names: HashSet<&str> = FEATURES.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn schema_order_is_fixed() {
        assert_eq!(FEATURES[0].name, "battery_power");
        assert_eq!(FEATURES[2].name, "clock_speed");
        assert_eq!(FEATURES[13].name, "ram_mb");
        assert_eq!(FEATURES[19].name, "wifi_flag");
        assert_eq!(feature_index("pixel_width"), Some(12));
        assert_eq!(feature_index("nope"), None);
    }

    #[test]
    fn defaults_are_within_domain() {
        for f in &FEATURES {
            assert!(f.domain.contains(f.default), "{} default out of domain", f.name);
        }
    }

    #[test]
    fn phone_spec_default_matches_schema_defaults() {
        let v = PhoneSpec::default().to_vector();
        let expected: Vec<f64> = FEATURES.iter().map(|f| f.default).collect();
        assert_eq!(v.values(), expected.as_slice());
    }

    #[test]
    fn phone_spec_vector_follows_schema_order() {
        let spec = PhoneSpec {
            ram_mb: 4096,
            clock_speed: 2.2,
            wifi_flag: 1,
            ..PhoneSpec::default()
        };
        let v = spec.to_vector();
        assert_eq!(v.values()[feature_index("ram_mb").unwrap()], 4096.0);
        assert_eq!(v.values()[feature_index("clock_speed").unwrap()], 2.2);
        assert_eq!(v.values()[feature_index("wifi_flag").unwrap()], 1.0);
    }

    #[test]
    fn minimum_vector_validates() {
        FeatureVector::new(minimum_vector()).validate().unwrap();
    }

    #[test]
    fn short_vector_rejected() {
        let mut values = minimum_vector();
        values.pop();
        let err = FeatureVector::new(values).validate().unwrap_err();
        assert_eq!(
            err,
            InputError::WrongLength {
                expected: 20,
                actual: 19
            }
        );
    }

    #[test]
    fn flag_must_be_zero_or_one() {
        let mut values = minimum_vector();
        values[1] = 2.0;
        let err = FeatureVector::new(values).validate().unwrap_err();
        assert!(matches!(
            err,
            InputError::OutOfDomain {
                field: "bluetooth_flag",
                ..
            }
        ));
    }

    #[test]
    fn integer_field_rejects_fraction() {
        let mut values = minimum_vector();
        values[13] = 512.5;
        let err = FeatureVector::new(values).validate().unwrap_err();
        assert!(matches!(err, InputError::OutOfDomain { field: "ram_mb", .. }));
    }

    #[test]
    fn float_bounds_inclusive() {
        let mut values = minimum_vector();
        values[2] = 3.0;
        values[7] = 1.0;
        FeatureVector::new(values.clone()).validate().unwrap();

        values[2] = 3.01;
        let err = FeatureVector::new(values).validate().unwrap_err();
        assert!(matches!(
            err,
            InputError::OutOfDomain {
                field: "clock_speed",
                ..
            }
        ));
    }

    #[test]
    fn nan_rejected_as_not_finite() {
        let mut values = minimum_vector();
        values[8] = f64::NAN;
        let err = FeatureVector::new(values).validate().unwrap_err();
        assert_eq!(
            err,
            InputError::NotFinite {
                field: "mobile_weight_g"
            }
        );
    }

    #[test]
    fn json_missing_keys_take_defaults() {
        let spec: PhoneSpec =
            serde_json::from_str(r#"{"ram_mb": 6000, "four_g_flag": 1}"#).unwrap();
        assert_eq!(spec.ram_mb, 6000);
        assert_eq!(spec.four_g_flag, 1);
        assert_eq!(spec.battery_power, 1000);
        assert_eq!(spec.clock_speed, 1.5);
    }

    #[test]
    fn json_out_of_range_integer_reaches_validation() {
        let spec: PhoneSpec = serde_json::from_str(r#"{"ram_mb": 100000}"#).unwrap();
        assert!(matches!(
            spec.to_vector().validate(),
            Err(InputError::OutOfDomain { field: "ram_mb", .. })
        ));
    }

    #[test]
    fn json_fraction_for_integer_field_rejected() {
        let result: Result<PhoneSpec, _> = serde_json::from_str(r#"{"ram_mb": 4096.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn json_unknown_key_rejected() {
        let result: Result<PhoneSpec, _> = serde_json::from_str(r#"{"ram": 6000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn domain_display() {
        assert_eq!(Domain::Flag.to_string(), "{0,1}");
        assert_eq!(
            Domain::Integer { min: 256, max: 8192 }.to_string(),
            "integer [256, 8192]"
        );
        assert_eq!(Domain::Float { min: 0.1, max: 3.0 }.to_string(), "float [0.1, 3.0]");
    }

    #[test]
    fn arrow_schema_matches_feature_order() {
        let schema = feature_schema();
        assert_eq!(schema.fields().len(), FEATURE_COUNT);
        for (field, spec) in schema.fields().iter().zip(&FEATURES) {
            assert_eq!(field.name(), spec.name);
            assert_eq!(field.data_type(), &DataType::Float64);
        }
    }
}
