pub mod customizer;
pub mod logging;
pub mod profile;
pub mod shapes;
pub mod validate;

pub use customizer::CustomizerConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use profile::{
    ProfileConfig, RuleConfig, RuleKindConfig, SetConfig, UserGroupConfig, ValueConfig,
};
pub use shapes::ShapeConfig;
