mod environment;
mod error;
mod extractors;
mod settings;

pub use environment::{Environment, InvalidEnvironment, DEFAULT_PRESIGN_EXPIRY_SECS};
pub use error::{
    AppError, BODY_TOO_LARGE, CONFIGURATION_ERROR, INTERNAL_ERROR, INVALID_FILENAME, INVALID_JSON,
    UNAUTHORIZED,
};
pub use extractors::{UploadRequest, MAX_BODY_BYTES};
pub use settings::{MissingSetting, UploadSettings, UploadTarget};
