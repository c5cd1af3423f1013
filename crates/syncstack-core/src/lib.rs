//! syncstack-core
//!
//! Declares a scheduled S3-to-S3 transfer pipeline and synthesizes it into a
//! deployment template.
//!
//! # モジュール構成
//! - **domain**: 値オブジェクト（ids, arn, options, schedule, tag, errors）
//! - **resources**: リソース宣言（LocationS3, TransferTask）
//! - **app**: StackBuilder と パイプライン定義
//! - **template**: 合成されたテンプレートとテスト用アサーション
//! - **config**: TOML からのパイプライン設定読み込み

pub mod app;
pub mod config;
pub mod domain;
pub mod resources;
pub mod template;

pub use app::{BuildError, Stack, StackBuilder, define_datasync_stack, synth_pipeline};
pub use config::{ConfigError, PipelineConfig};
pub use template::Template;
