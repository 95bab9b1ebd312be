//! # mosmat - Mosflm 取向矩阵与自动指标化命令行工具
//!
//! ## 子命令
//! - `reindex`    - 把矩阵文件变换到另一个格子设定
//! - `axes`       - 原始轴落在探测器平面内的旋转角
//! - `real-space` - 标准参考系下的实空间原始轴
//! - `index`      - 自动指标化日志的解表与按格子选择
//! - `integrate`  - 积分日志逐帧统计与分辨率极限（支持目录批量）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑，调用 mosmat 库)
//!   ├── batch/      (批量文件处理)
//!   └── utils/      (工具函数)
//! ```

mod batch;
mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    // 日志输出到 stderr，stdout 留给矩阵文本等结果
    let filter = if cli.verbose {
        EnvFilter::new("mosmat=debug")
    } else {
        EnvFilter::new("mosmat=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
