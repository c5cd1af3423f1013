//! App - アプリケーション層
//!
//! # 主要コンポーネント
//! - **StackBuilder**: リソース宣言の登録と検証、Stack の構築
//! - **Stack**: 構築済みの宣言集合、テンプレートへの合成
//! - **pipeline**: S3 → S3 転送パイプラインの定義（2 つの Location と Task）

pub mod builder;
pub mod pipeline;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, Stack, StackBuilder};
pub use self::pipeline::{PipelineRefs, define_datasync_stack, synth_pipeline};
