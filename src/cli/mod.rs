//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `reindex`: 矩阵文件重新指标化
//! - `axes`: 探测器平面旋转角
//! - `real-space`: 标准参考系实空间轴
//! - `index`: 自动指标化解选择
//! - `integrate`: 积分日志分析
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: matrix, index, integrate

pub mod index;
pub mod integrate;
pub mod matrix;

use clap::{Parser, Subcommand};

/// mosmat - Mosflm 取向矩阵与自动指标化工具
#[derive(Parser)]
#[command(name = "mosmat")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Orientation-matrix reindexing and autoindexing solution selection for Mosflm",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite a Mosflm matrix file in another lattice setting
    Reindex(matrix::ReindexArgs),

    /// Print detector-plane rotation angles of the primitive axes
    Axes(matrix::AxesArgs),

    /// Print primitive real-space axes in the canonical (imgCIF-like) frame
    RealSpace(matrix::RealSpaceArgs),

    /// List autoindexing solutions and select the best one per lattice
    Index(index::IndexArgs),

    /// Summarise per-image integration statistics and the resolution limit
    Integrate(integrate::IntegrateArgs),
}
