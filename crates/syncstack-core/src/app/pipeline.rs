//! The S3-to-S3 transfer pipeline: two locations and the task linking them.

use tracing::info;

use crate::app::builder::{BuildError, StackBuilder};
use crate::config::{LocationConfig, PipelineConfig};
use crate::domain::{LocationRef, TaskRef};
use crate::resources::{LocationS3, LocationS3Props, TaskProps, TransferTask};
use crate::template::Template;

pub const SOURCE_LOCATION_ID: &str = "SourceLocation";
pub const DESTINATION_LOCATION_ID: &str = "DestinationLocation";
pub const TASK_ID: &str = "DataSyncTask";

/// References returned by [`define_datasync_stack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRefs {
    pub source: LocationRef,
    pub destination: LocationRef,
    pub task: TaskRef,
}

/// Declares the source location, the destination location and the task, in
/// that order.
pub fn define_datasync_stack(
    builder: &mut StackBuilder,
    config: &PipelineConfig,
) -> Result<PipelineRefs, BuildError> {
    let source = declare_location(builder, SOURCE_LOCATION_ID, &config.source, true)?;
    let destination = declare_location(builder, DESTINATION_LOCATION_ID, &config.destination, false)?;

    let task_config = &config.task;
    let mut props = TaskProps::new(
        source.clone(),
        destination.clone(),
        task_config.options,
        task_config.schedule_expression.clone(),
    )
    .tags(task_config.tags.iter().cloned());
    if let Some(name) = &task_config.name {
        props = props.name(name.clone());
    }
    let task = TransferTask::declare(builder, TASK_ID, props)?;

    Ok(PipelineRefs {
        source,
        destination,
        task,
    })
}

fn declare_location(
    builder: &mut StackBuilder,
    logical_id: &str,
    config: &LocationConfig,
    is_source: bool,
) -> Result<LocationRef, BuildError> {
    let bucket = config.bucket_arn.clone();
    let role = config.bucket_access_role_arn.clone();

    let mut props = match (is_source, &config.agent_arns) {
        (true, Some(agents)) => {
            LocationS3Props::source(bucket, &config.subdirectory, role, agents.clone())
        }
        (true, None) => return Err(BuildError::MissingAgents(logical_id.to_string())),
        (false, None) => LocationS3Props::destination(bucket, &config.subdirectory, role),
        (false, Some(_)) => return Err(BuildError::UnexpectedAgents(logical_id.to_string())),
    };
    if let Some(class) = config.storage_class {
        props = props.with_storage_class(class);
    }

    LocationS3::declare(builder, logical_id, props)
}

/// Builds the whole pipeline stack from config and synthesizes it.
pub fn synth_pipeline(config: &PipelineConfig) -> Result<Template, BuildError> {
    let mut builder = StackBuilder::new(&config.stack.name).export_outputs(config.stack.export_outputs);
    if let Some(description) = &config.stack.description {
        builder = builder.description(description);
    }

    define_datasync_stack(&mut builder, config)?;
    let stack = builder.build()?;
    info!(stack = stack.name(), resources = stack.resource_count(), "pipeline stack built");
    Ok(stack.synth())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::S3StorageClass;

    #[test]
    fn declares_in_order() {
        let config = PipelineConfig::example().unwrap();
        let mut builder = StackBuilder::new("TestStack");
        let refs = define_datasync_stack(&mut builder, &config).unwrap();

        assert_eq!(refs.source.as_str(), SOURCE_LOCATION_ID);
        assert_eq!(refs.destination.as_str(), DESTINATION_LOCATION_ID);
        assert_eq!(refs.task.as_str(), TASK_ID);
        assert_eq!(
            builder.declared(),
            [SOURCE_LOCATION_ID, DESTINATION_LOCATION_ID, TASK_ID].map(String::from)
        );
    }

    #[test]
    fn source_without_agents_is_a_construction_error() {
        let mut config = PipelineConfig::example().unwrap();
        config.source.agent_arns = None;

        let mut builder = StackBuilder::new("TestStack");
        let err = define_datasync_stack(&mut builder, &config).unwrap_err();
        assert!(matches!(err, BuildError::MissingAgents(id) if id == SOURCE_LOCATION_ID));
        assert!(builder.declared().is_empty());
    }

    #[test]
    fn destination_with_agents_is_rejected() {
        let mut config = PipelineConfig::example().unwrap();
        config.destination.agent_arns = config.source.agent_arns.clone();

        let mut builder = StackBuilder::new("TestStack");
        let err = define_datasync_stack(&mut builder, &config).unwrap_err();
        assert!(matches!(err, BuildError::UnexpectedAgents(id) if id == DESTINATION_LOCATION_ID));
    }

    #[test]
    fn optional_settings_flow_into_template() {
        let mut config = PipelineConfig::example().unwrap();
        config.stack.description = Some("nightly sync".into());
        config.destination.storage_class = Some(S3StorageClass::StandardIa);
        config.task.name = Some("nightly".into());

        let template = synth_pipeline(&config).unwrap();
        assert_eq!(template.description.as_deref(), Some("nightly sync"));
        assert_eq!(
            template.resources[DESTINATION_LOCATION_ID].properties["S3StorageClass"],
            "STANDARD_IA"
        );
        assert_eq!(template.resources[TASK_ID].properties["Name"], "nightly");
    }

    #[test]
    fn invalid_stack_name_fails_the_build() {
        let mut config = PipelineConfig::example().unwrap();
        config.stack.name = "data_sync".into();
        assert!(matches!(
            synth_pipeline(&config),
            Err(BuildError::InvalidStackName(_))
        ));
    }
}
