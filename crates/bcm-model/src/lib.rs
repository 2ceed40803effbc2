pub mod error;
pub mod header;
pub mod ids;
pub mod notice;
pub mod platform;
pub mod schema;

pub use error::{ModelError, Result};
pub use header::SourceHeader;
pub use ids::{FieldId, HeaderId};
pub use notice::{BufferedSink, Notice, NotificationSink, Severity};
pub use platform::Platform;
pub use schema::{FieldCategory, TargetField, TargetSchema};
