//! Logical identifiers (strongly-typed resource references).
//!
//! # Phantom Type パターン
//! `LogicalId<T>` というジェネリック型で共通実装を提供しつつ、
//! `T` は実行時には使わない（PhantomData）マーカー型として、
//! コンパイル時の型安全性を提供します。
//!
//! - `LocationRef` を期待する場所に `TaskRef` を渡すとコンパイルエラー
//! - マーカーがテンプレート上のリソース型と出力属性名を持つ
//!
//! ID の発行は `StackBuilder` だけが行います（`pub(crate)` コンストラクタ）。

use std::fmt;
use std::marker::PhantomData;

/// ResourceMarker は各リソース種別のマーカー trait
pub trait ResourceMarker: Send + Sync + 'static {
    /// Template の `Type` フィールド（例: "AWS::DataSync::Task"）
    fn resource_type() -> &'static str;

    /// `Fn::GetAtt` で ARN を取り出す属性名
    fn arn_attribute() -> &'static str;
}

/// ジェネリック論理 ID 型
///
/// 中身はテンプレート内で一意な論理 ID 文字列です。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalId<T: ResourceMarker> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T: ResourceMarker> LogicalId<T> {
    /// Builder からのみ発行する（検証済みの値を前提とする）
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn resource_type(&self) -> &'static str {
        T::resource_type()
    }
}

impl<T: ResourceMarker> fmt::Display for LogicalId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// S3 Location のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {}

impl ResourceMarker for Location {
    fn resource_type() -> &'static str {
        "AWS::DataSync::LocationS3"
    }

    fn arn_attribute() -> &'static str {
        "LocationArn"
    }
}

/// Transfer Task のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl ResourceMarker for Task {
    fn resource_type() -> &'static str {
        "AWS::DataSync::Task"
    }

    fn arn_attribute() -> &'static str {
        "TaskArn"
    }
}

/// Reference to a declared storage location.
pub type LocationRef = LogicalId<Location>;

/// Reference to a declared transfer task.
pub type TaskRef = LogicalId<Task>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refs_carry_their_resource_type() {
        let location = LocationRef::new("SourceLocation");
        let task = TaskRef::new("DataSyncTask");

        assert_eq!(location.resource_type(), "AWS::DataSync::LocationS3");
        assert_eq!(task.resource_type(), "AWS::DataSync::Task");

        // let _: LocationRef = task; // <- does not compile
    }

    #[test]
    fn display_is_the_bare_logical_id() {
        let location = LocationRef::new("DestinationLocation");
        assert_eq!(location.to_string(), "DestinationLocation");
        assert_eq!(location.as_str(), "DestinationLocation");
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<LocationRef>(), size_of::<String>());
        assert_eq!(size_of::<TaskRef>(), size_of::<String>());
    }
}
