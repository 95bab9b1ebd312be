//! # 格子重新指标化模块
//!
//! 在不同格子设定之间变换取向矩阵。外部协作者以 trait 表示并显式注入：
//! - [`SymopResolver`]: 算符表达式 -> 3x3 矩阵
//! - [`SettingsGenerator`]: 晶胞 + 格子 -> 可选设定列表
//! - [`PrimitiveOperatorSource`]: 空间群编号 -> 原始设定算符
//!
//! ## 依赖关系
//! - 被 `frame.rs`, `commands/` 使用
//! - 使用 `math/`, `models/`, `parsers/matrix_file.rs`
//! - 子模块: symop, settings, engine

pub mod engine;
pub mod settings;
pub mod symop;

pub use engine::{angles_in_detector_plane, apply_reindex, Reindexer};
pub use settings::{CentringSettings, PrimitiveOperatorSource, SettingsGenerator};
pub use symop::{format_operator, SymopParser, SymopResolver};
