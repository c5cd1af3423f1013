//! Domain model (logical ids, ARNs, options, schedules, tags).

pub mod arn;
pub mod errors;
pub mod ids;
pub mod options;
pub mod schedule;
pub mod tag;

pub use arn::Arn;
pub use errors::{ArnError, InvalidOptionValue, ScheduleError, TagError};
pub use ids::{Location, LocationRef, LogicalId, ResourceMarker, Task, TaskRef};
pub use options::{
    LogLevel, OverwriteMode, PosixPermissions, PreserveDeletedFiles, PreserveDevices,
    S3StorageClass, TaskOptions, TaskQueueing, VerifyMode,
};
pub use schedule::{RateUnit, ScheduleExpression};
pub use tag::{Tag, validate_tags};
