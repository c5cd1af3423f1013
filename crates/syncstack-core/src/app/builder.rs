//! StackBuilder - リソース宣言の登録と合成
//!
//! # 学習ポイント
//! - 暗黙の「カレントスタック」の代わりに、明示的な Builder を `&mut` で渡す
//! - 宣言時検証（Fail-fast 設計）: 論理 ID の重複・参照切れはその場でエラー
//! - 合成（synth）は決定的: 同じ宣言からは同じバイト列のテンプレート

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::ids::{Location, LocationRef, LogicalId, ResourceMarker};
use crate::domain::{ArnError, ScheduleError, TagError};
use crate::template::{self, Export, Output, Resource, Template};

const MAX_LOGICAL_ID_LEN: usize = 255;
const MAX_STACK_NAME_LEN: usize = 128;

/// BuildError は宣言・構築時のエラー
///
/// 値の検証エラーは、どの宣言で起きたかを示す論理 ID 付きで包みます。
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("stack name '{0}' must start with a letter and contain only letters, digits and '-' (max 128)")]
    InvalidStackName(String),

    #[error("logical id '{0}' must be 1..=255 ASCII letters or digits")]
    InvalidLogicalId(String),

    #[error("logical id '{0}' is already declared in this stack")]
    DuplicateLogicalId(String),

    #[error("{from} references {target}, which is not a declared {expected_type} in this stack")]
    UnresolvedReference {
        from: String,
        target: String,
        expected_type: &'static str,
    },

    #[error("{0}: a source location must declare agent_arns")]
    MissingAgents(String),

    #[error("{0}: a destination location must not declare agent_arns")]
    UnexpectedAgents(String),

    #[error("{id}: invalid subdirectory '{value}'")]
    InvalidSubdirectory { id: String, value: String },

    #[error("{id}: {source}")]
    Arn {
        id: String,
        #[source]
        source: ArnError,
    },

    #[error("{id}: {source}")]
    Schedule {
        id: String,
        #[source]
        source: ScheduleError,
    },

    #[error("{id}: {source}")]
    Tag {
        id: String,
        #[source]
        source: TagError,
    },

    #[error("stack '{0}' declares no resources")]
    EmptyStack(String),
}

struct Declared {
    resource_type: &'static str,
    arn_attribute: &'static str,
    properties: Value,
}

/// StackBuilder はスタック内のリソース宣言を集める
///
/// # 使用例
/// ```ignore
/// let mut builder = StackBuilder::new("DataSyncStack");
/// let src = LocationS3::declare(&mut builder, "SourceLocation", source_props)?;
/// let dst = LocationS3::declare(&mut builder, "DestinationLocation", dest_props)?;
/// TransferTask::declare(&mut builder, "DataSyncTask", TaskProps::new(src, dst, ...))?;
/// let template = builder.build()?.synth();
/// ```
pub struct StackBuilder {
    stack_name: String,
    description: Option<String>,
    export_outputs: bool,
    resources: BTreeMap<String, Declared>,
    // 宣言順（ログ用）
    order: Vec<String>,
}

impl StackBuilder {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            description: None,
            export_outputs: true,
            resources: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Outputs に `Export.Name` を付けるかどうか（既定: 付ける）
    pub fn export_outputs(mut self, enabled: bool) -> Self {
        self.export_outputs = enabled;
        self
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// リソースを登録して型付き参照を返す
    pub(crate) fn register<T: ResourceMarker>(
        &mut self,
        logical_id: &str,
        properties: Value,
    ) -> Result<LogicalId<T>, BuildError> {
        validate_logical_id(logical_id)?;
        if self.resources.contains_key(logical_id) {
            return Err(BuildError::DuplicateLogicalId(logical_id.to_string()));
        }

        debug!(
            stack = %self.stack_name,
            logical_id,
            resource_type = T::resource_type(),
            "declared resource"
        );
        self.resources.insert(
            logical_id.to_string(),
            Declared {
                resource_type: T::resource_type(),
                arn_attribute: T::arn_attribute(),
                properties,
            },
        );
        self.order.push(logical_id.to_string());
        Ok(LogicalId::new(logical_id))
    }

    /// 参照先がこの Builder で宣言済み、かつ型が一致するかをチェック
    pub(crate) fn resolve<T: ResourceMarker>(
        &self,
        from: &str,
        target: &LogicalId<T>,
    ) -> Result<(), BuildError> {
        match self.resources.get(target.as_str()) {
            Some(declared) if declared.resource_type == T::resource_type() => Ok(()),
            _ => Err(BuildError::UnresolvedReference {
                from: from.to_string(),
                target: target.as_str().to_string(),
                expected_type: T::resource_type(),
            }),
        }
    }

    /// 宣言済みの Location を論理 ID で引く
    pub fn location_ref(&self, logical_id: &str) -> Result<LocationRef, BuildError> {
        let candidate = LocationRef::new(logical_id);
        self.resolve::<Location>(logical_id, &candidate)?;
        Ok(candidate)
    }

    /// 宣言済みの論理 ID（宣言順）
    pub fn declared(&self) -> &[String] {
        &self.order
    }

    /// Builder を検証して Stack を生成
    ///
    /// # 検証
    /// - スタック名の形式
    /// - 少なくとも 1 つのリソースが宣言されていること
    pub fn build(self) -> Result<Stack, BuildError> {
        validate_stack_name(&self.stack_name)?;
        if self.resources.is_empty() {
            return Err(BuildError::EmptyStack(self.stack_name));
        }
        Ok(Stack {
            name: self.stack_name,
            description: self.description,
            export_outputs: self.export_outputs,
            resources: self.resources,
        })
    }
}

/// Stack は構築済み（不変）の宣言集合
pub struct Stack {
    name: String,
    description: Option<String>,
    export_outputs: bool,
    resources: BTreeMap<String, Declared>,
}

impl Stack {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Stack からテンプレートを合成する
    pub fn synth(&self) -> Template {
        let mut out = Template::new(self.description.clone());

        for (logical_id, declared) in &self.resources {
            out.resources.insert(
                logical_id.clone(),
                Resource {
                    resource_type: declared.resource_type.to_string(),
                    properties: declared.properties.clone(),
                },
            );

            let output_id = format!("{logical_id}Arn");
            out.outputs.insert(
                output_id.clone(),
                Output {
                    description: Some(format!("ARN of {logical_id}")),
                    value: template::get_att(logical_id, declared.arn_attribute),
                    export: self.export_outputs.then(|| Export {
                        name: format!("{}-{output_id}", self.name),
                    }),
                },
            );
        }

        info!(
            stack = %self.name,
            resources = out.resources.len(),
            "synthesized template"
        );
        out
    }
}

fn validate_logical_id(logical_id: &str) -> Result<(), BuildError> {
    let valid = !logical_id.is_empty()
        && logical_id.len() <= MAX_LOGICAL_ID_LEN
        && logical_id.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(BuildError::InvalidLogicalId(logical_id.to_string()))
    }
}

fn validate_stack_name(name: &str) -> Result<(), BuildError> {
    let mut chars = name.chars();
    let valid = name.len() <= MAX_STACK_NAME_LEN
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(BuildError::InvalidStackName(name.to_string()))
    }
}
