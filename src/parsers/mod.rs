//! # 解析器模块
//!
//! 提供 Mosflm 矩阵文件以及自动指标化 / 积分日志的解析器。
//! 日志解析对装饰性或残缺的行保持宽容：无法识别的行直接跳过。
//!
//! ## 依赖关系
//! - 被 `reindex/`, `frame.rs`, `selection/`, `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: matrix_file, autoindex, integration

pub mod autoindex;
pub mod integration;
pub mod matrix_file;

pub use autoindex::{
    parse_autoindex_file, parse_autoindex_output, parse_autoindex_solutions, AutoindexOutput,
};
pub use integration::{parse_integration_file, parse_integration_output};
pub use matrix_file::{format_matrix, parse_matrix, parse_matrix_file, OrientationMatrix};
