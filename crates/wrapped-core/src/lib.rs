pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod motion;
pub mod share;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use data::{DataSource, DataState, WrappedData};
pub use error::{Error, Result};
pub use motion::{MotionController, MotionPreference};
pub use share::{ShareAction, ShareTarget};
