//! # 统一错误处理模块
//!
//! 定义 mosmat 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 前置条件违例（奇异矩阵、非法晶胞）：直接向上传播，不做数值钳制
//! - 解析歧义（找不到被选中的解 / 被选中的解不可用）：分别命名，调用方的重试策略不同
//! - 无害的解析跳过与无数据哨兵值不在此处出现
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mosmat 统一错误类型
#[derive(Error, Debug)]
pub enum MosmatError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 前置条件违例
    // ─────────────────────────────────────────────────────────────
    #[error("Singular matrix (determinant {det:e}) cannot be inverted")]
    SingularMatrix { det: f64 },

    #[error("Invalid unit cell: {reason}")]
    InvalidCell { reason: String },

    #[error("Invalid wavelength: {0} (must be positive)")]
    InvalidWavelength(f64),

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format}: {reason}")]
    ParseError { format: String, reason: String },

    #[error("Invalid symmetry operator '{op}': {reason}")]
    InvalidSymop { op: String, reason: String },

    #[error("Unknown lattice symbol: {0}")]
    UnknownLattice(String),

    // ─────────────────────────────────────────────────────────────
    // 自动指标化解选择
    // ─────────────────────────────────────────────────────────────
    #[error("No chosen solution identified in autoindexing output")]
    NoChosenSolution,

    #[error("Chosen solution {number} is unrefined or missing from the solution table")]
    ChosenSolutionUnusable { number: u32 },

    // ─────────────────────────────────────────────────────────────
    // 重新指标化
    // ─────────────────────────────────────────────────────────────
    #[error("No setting for lattice {target} generated from {lattice}")]
    UnsupportedSetting { lattice: String, target: String },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MosmatError>;
