//! S3 storage location declarations.

use serde_json::{Value, json};
use tracing::warn;

use crate::app::builder::{BuildError, StackBuilder};
use crate::domain::{Arn, ArnError, LocationRef, S3StorageClass};

const MAX_SUBDIRECTORY_LEN: usize = 4096;

/// Properties of an S3 location.
///
/// A source location carries agent ARNs; a destination does not. The agent
/// list is only set through [`LocationS3Props::source`], so a destination
/// built with [`LocationS3Props::destination`] can never grow one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationS3Props {
    pub bucket_arn: Arn,
    pub subdirectory: String,
    pub bucket_access_role_arn: Arn,
    agent_arns: Option<Vec<Arn>>,
    pub storage_class: Option<S3StorageClass>,
}

impl LocationS3Props {
    pub fn source(
        bucket_arn: Arn,
        subdirectory: impl Into<String>,
        bucket_access_role_arn: Arn,
        agent_arns: Vec<Arn>,
    ) -> Self {
        Self {
            bucket_arn,
            subdirectory: subdirectory.into(),
            bucket_access_role_arn,
            agent_arns: Some(agent_arns),
            storage_class: None,
        }
    }

    pub fn destination(
        bucket_arn: Arn,
        subdirectory: impl Into<String>,
        bucket_access_role_arn: Arn,
    ) -> Self {
        Self {
            bucket_arn,
            subdirectory: subdirectory.into(),
            bucket_access_role_arn,
            agent_arns: None,
            storage_class: None,
        }
    }

    /// `None` for a destination.
    pub fn agent_arns(&self) -> Option<&[Arn]> {
        self.agent_arns.as_deref()
    }

    pub fn with_storage_class(mut self, storage_class: S3StorageClass) -> Self {
        self.storage_class = Some(storage_class);
        self
    }

    fn to_properties(&self) -> Value {
        let mut properties = json!({
            "S3BucketArn": self.bucket_arn.as_str(),
            "Subdirectory": self.subdirectory,
            "S3Config": {
                "BucketAccessRoleArn": self.bucket_access_role_arn.as_str(),
            },
        });
        if let Value::Object(map) = &mut properties {
            if let Some(agents) = &self.agent_arns {
                let agents: Vec<&str> = agents.iter().map(Arn::as_str).collect();
                map.insert("AgentArns".into(), json!(agents));
            }
            if let Some(class) = self.storage_class {
                map.insert("S3StorageClass".into(), json!(class.as_str()));
            }
        }
        properties
    }
}

/// `AWS::DataSync::LocationS3`
pub struct LocationS3;

impl LocationS3 {
    /// Declares a location in `builder` and returns a reference for tasks.
    pub fn declare(
        builder: &mut StackBuilder,
        logical_id: &str,
        props: LocationS3Props,
    ) -> Result<LocationRef, BuildError> {
        let arn_err = |source: ArnError| BuildError::Arn {
            id: logical_id.to_string(),
            source,
        };

        props.bucket_arn.ensure_s3_bucket().map_err(arn_err)?;
        props
            .bucket_access_role_arn
            .ensure_service("iam")
            .map_err(arn_err)?;

        if let Some(agents) = &props.agent_arns {
            for agent in agents {
                agent.ensure_service("datasync").map_err(arn_err)?;
            }
            if agents.is_empty() {
                warn!(logical_id, "source location declares an empty agent list");
            }
        }

        if !valid_subdirectory(&props.subdirectory) {
            return Err(BuildError::InvalidSubdirectory {
                id: logical_id.to_string(),
                value: props.subdirectory,
            });
        }

        builder.register(logical_id, props.to_properties())
    }
}

fn valid_subdirectory(path: &str) -> bool {
    path.len() <= MAX_SUBDIRECTORY_LEN
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-+./()".contains(c) || is_space_separator(c))
}

/// Unicode `Zs` (space separator) category.
fn is_space_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}
