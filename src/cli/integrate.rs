//! # integrate 子命令 CLI 定义
//!
//! 积分日志逐帧统计，单文件或目录批量。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/integrate.rs`

use clap::Args;
use mosmat::config::DEFAULT_ISIGMA_CUTOFF;
use std::path::PathBuf;

/// integrate 子命令参数
#[derive(Args, Debug)]
pub struct IntegrateArgs {
    /// Integration log file, or a directory of logs (batch mode)
    pub input: PathBuf,

    /// I/sigma cutoff for the per-image resolution estimate
    #[arg(long, default_value_t = DEFAULT_ISIGMA_CUTOFF)]
    pub cutoff: f64,

    /// Export per-image statistics to CSV (single file mode)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for log files (batch mode, e.g., "*.log,integrate*")
    #[arg(long, default_value = "*.log,*.lp")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,
}
