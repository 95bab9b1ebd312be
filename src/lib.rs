//! # mosmat - Mosflm 取向矩阵与自动指标化工具库
//!
//! 晶体学数据处理流程中的两块核心算法：
//! - 取向矩阵 / 格子代数：在 Mosflm、原始格子、实空间 / 倒易空间等设定之间变换
//! - 自动指标化解选择：从日志文本中解析候选解并按格子挑出可接受的最佳解
//!
//! 所有函数都是纯函数，不做缓存，可在多线程中独立调用。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── math/       (向量、3x3 矩阵、B 矩阵)
//!   ├── models/     (晶胞、格子符号、候选解、积分统计)
//!   ├── parsers/    (矩阵文件、自动指标化日志、积分日志)
//!   ├── reindex/    (算符解析、设定生成、重新指标化)
//!   ├── frame.rs    (参考系转换)
//!   ├── selection/  (解选择、分辨率极限)
//!   ├── config.rs   (经验常数)
//!   └── error.rs    (错误处理)
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod math;
pub mod models;
pub mod parsers;
pub mod reindex;
pub mod selection;

pub use error::{MosmatError, Result};
