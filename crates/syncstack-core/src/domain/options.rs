//! Transfer task options.
//!
//! Every option is a closed set. The wire strings are what the provisioning
//! engine expects; parsing anything else fails here instead of at deploy time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::InvalidOptionValue;

macro_rules! closed_option {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Wire values accepted for this option.
            pub const ALLOWED: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidOptionValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(InvalidOptionValue {
                        field: $field,
                        value: other.to_string(),
                        allowed: Self::ALLOWED,
                    }),
                }
            }
        }
    };
}

closed_option! {
    /// How data integrity is checked after the transfer.
    VerifyMode, "verify_mode" {
        PointInTimeConsistent => "POINT_IN_TIME_CONSISTENT",
        OnlyFilesTransferred => "ONLY_FILES_TRANSFERRED",
        None => "NONE",
    }
}

closed_option! {
    OverwriteMode, "overwrite_mode" {
        Always => "ALWAYS",
        Never => "NEVER",
    }
}

closed_option! {
    PosixPermissions, "posix_permissions" {
        Preserve => "PRESERVE",
        None => "NONE",
    }
}

closed_option! {
    /// Whether files deleted at the source are removed at the destination.
    PreserveDeletedFiles, "preserve_deleted_files" {
        Preserve => "PRESERVE",
        Remove => "REMOVE",
    }
}

closed_option! {
    PreserveDevices, "preserve_devices" {
        Preserve => "PRESERVE",
        None => "NONE",
    }
}

closed_option! {
    TaskQueueing, "task_queueing" {
        Enabled => "ENABLED",
        Disabled => "DISABLED",
    }
}

closed_option! {
    LogLevel, "log_level" {
        Basic => "BASIC",
        Transfer => "TRANSFER",
        Off => "OFF",
    }
}

closed_option! {
    /// Storage class for objects written to an S3 location.
    S3StorageClass, "s3_storage_class" {
        Standard => "STANDARD",
        StandardIa => "STANDARD_IA",
        OnezoneIa => "ONEZONE_IA",
        IntelligentTiering => "INTELLIGENT_TIERING",
        Glacier => "GLACIER",
        GlacierInstantRetrieval => "GLACIER_INSTANT_RETRIEVAL",
        DeepArchive => "DEEP_ARCHIVE",
        Outposts => "OUTPOSTS",
    }
}

/// The full options record of a transfer task.
///
/// There is no `Default`: every field is chosen by the caller. Serializes
/// with the template's PascalCase keys; deserializes from snake_case config keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskOptions {
    #[serde(rename(serialize = "VerifyMode"))]
    pub verify_mode: VerifyMode,
    #[serde(rename(serialize = "OverwriteMode"))]
    pub overwrite_mode: OverwriteMode,
    #[serde(rename(serialize = "PosixPermissions"))]
    pub posix_permissions: PosixPermissions,
    #[serde(rename(serialize = "PreserveDeletedFiles"))]
    pub preserve_deleted_files: PreserveDeletedFiles,
    #[serde(rename(serialize = "PreserveDevices"))]
    pub preserve_devices: PreserveDevices,
    #[serde(rename(serialize = "TaskQueueing"))]
    pub task_queueing: TaskQueueing,
    #[serde(rename(serialize = "LogLevel"))]
    pub log_level: LogLevel,
}

impl TaskOptions {
    /// Template keys, in declaration order.
    pub const KEYS: [&'static str; 7] = [
        "VerifyMode",
        "OverwriteMode",
        "PosixPermissions",
        "PreserveDeletedFiles",
        "PreserveDevices",
        "TaskQueueing",
        "LogLevel",
    ];
}
