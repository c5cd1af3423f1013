//! Resource declarations.
//!
//! Each resource type has a props struct and a `declare` function that
//! validates the props and registers the record with a `StackBuilder`.

pub mod location;
pub mod task;

pub use self::location::{LocationS3, LocationS3Props};
pub use self::task::{TaskProps, TransferTask};
