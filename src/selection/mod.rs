//! # 解选择与分辨率判定模块
//!
//! 在解析器产出的不可变记录上做纯函数式的分组、过滤和插值。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `parsers/`, `models/`, `config.rs`
//! - 子模块: solutions, resolution

pub mod resolution;
pub mod solutions;

pub use resolution::{
    decide_integration_resolution_limit, resolution_estimate, status_string,
    worst_weighted_residual, RESOLUTION_NOT_REACHED,
};
pub use solutions::{nearest_solution, select_solutions};
