pub mod error;
pub mod labels;
pub mod locate;
pub mod schema;

pub use error::InputError;
pub use labels::PriceLabel;
pub use locate::{default_start_dir, locate};
pub use schema::{
    Domain, FEATURE_COUNT, FEATURES, FeatureSpec, FeatureVector, PhoneSpec, feature_schema,
};
