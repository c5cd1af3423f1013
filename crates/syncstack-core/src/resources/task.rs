//! Scheduled transfer task declarations.

use serde_json::{Map, Value, json};

use crate::app::builder::{BuildError, StackBuilder};
use crate::domain::{LocationRef, ScheduleExpression, Tag, TaskOptions, TaskRef, validate_tags};
use crate::template;

/// Properties of a transfer task. All options are chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskProps {
    pub source: LocationRef,
    pub destination: LocationRef,
    pub options: TaskOptions,
    pub schedule: ScheduleExpression,
    pub tags: Vec<Tag>,
    pub name: Option<String>,
}

impl TaskProps {
    pub fn new(
        source: LocationRef,
        destination: LocationRef,
        options: TaskOptions,
        schedule: ScheduleExpression,
    ) -> Self {
        Self {
            source,
            destination,
            options,
            schedule,
            tags: Vec::new(),
            name: None,
        }
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn to_properties(&self) -> Value {
        let mut properties = Map::new();
        properties.insert(
            "SourceLocationArn".into(),
            template::reference(self.source.as_str()),
        );
        properties.insert(
            "DestinationLocationArn".into(),
            template::reference(self.destination.as_str()),
        );
        properties.insert("Options".into(), options_value(&self.options));
        properties.insert(
            "Schedule".into(),
            json!({ "ScheduleExpression": self.schedule.as_str() }),
        );
        if let Some(name) = &self.name {
            properties.insert("Name".into(), json!(name));
        }
        properties.insert(
            "Tags".into(),
            Value::Array(self.tags.iter().map(tag_value).collect()),
        );
        Value::Object(properties)
    }
}

fn options_value(options: &TaskOptions) -> Value {
    json!({
        "VerifyMode": options.verify_mode.as_str(),
        "OverwriteMode": options.overwrite_mode.as_str(),
        "PosixPermissions": options.posix_permissions.as_str(),
        "PreserveDeletedFiles": options.preserve_deleted_files.as_str(),
        "PreserveDevices": options.preserve_devices.as_str(),
        "TaskQueueing": options.task_queueing.as_str(),
        "LogLevel": options.log_level.as_str(),
    })
}

fn tag_value(tag: &Tag) -> Value {
    json!({ "Key": tag.key, "Value": tag.value })
}

/// `AWS::DataSync::Task`
pub struct TransferTask;

impl TransferTask {
    /// Declares a task linking two locations already declared in `builder`.
    pub fn declare(
        builder: &mut StackBuilder,
        logical_id: &str,
        props: TaskProps,
    ) -> Result<TaskRef, BuildError> {
        builder.resolve(logical_id, &props.source)?;
        builder.resolve(logical_id, &props.destination)?;
        validate_tags(&props.tags).map_err(|source| BuildError::Tag {
            id: logical_id.to_string(),
            source,
        })?;

        builder.register(logical_id, props.to_properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Arn, LogLevel, OverwriteMode, PosixPermissions, PreserveDeletedFiles, PreserveDevices,
        TagError, TaskQueueing, VerifyMode,
    };
    use crate::resources::location::{LocationS3, LocationS3Props};
    use serde_json::json;

    fn options() -> TaskOptions {
        TaskOptions {
            verify_mode: VerifyMode::OnlyFilesTransferred,
            overwrite_mode: OverwriteMode::Never,
            posix_permissions: PosixPermissions::None,
            preserve_deleted_files: PreserveDeletedFiles::Remove,
            preserve_devices: PreserveDevices::Preserve,
            task_queueing: TaskQueueing::Disabled,
            log_level: LogLevel::Basic,
        }
    }

    fn with_locations() -> (StackBuilder, LocationRef, LocationRef) {
        let role = Arn::iam_role("arn:aws:iam::123456789012:role/R").unwrap();
        let mut builder = StackBuilder::new("TestStack");
        let src = LocationS3::declare(
            &mut builder,
            "Src",
            LocationS3Props::destination(Arn::s3_bucket("arn:aws:s3:::a").unwrap(), "/", role.clone()),
        )
        .unwrap();
        let dst = LocationS3::declare(
            &mut builder,
            "Dst",
            LocationS3Props::destination(Arn::s3_bucket("arn:aws:s3:::b").unwrap(), "/", role),
        )
        .unwrap();
        (builder, src, dst)
    }

    fn schedule() -> ScheduleExpression {
        ScheduleExpression::parse("rate(12 hours)").unwrap()
    }

    #[test]
    fn task_references_locations_by_ref() {
        let (mut builder, src, dst) = with_locations();
        let props = TaskProps::new(src, dst, options(), schedule())
            .tag(Tag::new("Team", "Data").unwrap())
            .name("nightly-copy");
        let task = TransferTask::declare(&mut builder, "Copy", props).unwrap();
        assert_eq!(task.as_str(), "Copy");

        let template = builder.build().unwrap().synth();
        assert_eq!(
            template.resources["Copy"].properties,
            json!({
                "SourceLocationArn": { "Ref": "Src" },
                "DestinationLocationArn": { "Ref": "Dst" },
                "Options": {
                    "VerifyMode": "ONLY_FILES_TRANSFERRED",
                    "OverwriteMode": "NEVER",
                    "PosixPermissions": "NONE",
                    "PreserveDeletedFiles": "REMOVE",
                    "PreserveDevices": "PRESERVE",
                    "TaskQueueing": "DISABLED",
                    "LogLevel": "BASIC",
                },
                "Schedule": { "ScheduleExpression": "rate(12 hours)" },
                "Name": "nightly-copy",
                "Tags": [{ "Key": "Team", "Value": "Data" }],
            })
        );
    }

    #[test]
    fn options_value_matches_serde_form() {
        assert_eq!(options_value(&options()), serde_json::to_value(options()).unwrap());
    }

    #[test]
    fn task_with_foreign_location_is_unresolved() {
        let (_, foreign_src, foreign_dst) = with_locations();
        let mut builder = StackBuilder::new("Other");

        let err = TransferTask::declare(
            &mut builder,
            "Copy",
            TaskProps::new(foreign_src, foreign_dst, options(), schedule()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BuildError::UnresolvedReference { from, target, .. } if from == "Copy" && target == "Src"
        ));
        assert!(builder.declared().is_empty());
    }

    #[test]
    fn duplicate_tag_keys_are_rejected() {
        let (mut builder, src, dst) = with_locations();
        let props = TaskProps::new(src, dst, options(), schedule()).tags([
            Tag::new("Environment", "Production").unwrap(),
            Tag::new("Environment", "Staging").unwrap(),
        ]);
        let err = TransferTask::declare(&mut builder, "Copy", props).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Tag { source: TagError::DuplicateKey(key), .. } if key == "Environment"
        ));
    }

    #[test]
    fn empty_tag_list_is_emitted_as_empty_array() {
        let (mut builder, src, dst) = with_locations();
        TransferTask::declare(&mut builder, "Copy", TaskProps::new(src, dst, options(), schedule()))
            .unwrap();
        let template = builder.build().unwrap().synth();
        assert_eq!(template.resources["Copy"].properties["Tags"], json!([]));
        assert!(template.resources["Copy"].properties.get("Name").is_none());
    }
}
