//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，核心计算全部委托给 `mosmat` 库。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/` 以及 `mosmat` 库
//! - 子模块: reindex, axes, real_space, index, integrate

pub mod axes;
pub mod index;
pub mod integrate;
pub mod real_space;
pub mod reindex;

use crate::cli::Commands;
use mosmat::error::{MosmatError, Result};
use std::fs;
use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Reindex(args) => reindex::execute(args),
        Commands::Axes(args) => axes::execute(args),
        Commands::RealSpace(args) => real_space::execute(args),
        Commands::Index(args) => index::execute(args),
        Commands::Integrate(args) => integrate::execute(args),
    }
}

/// 读取文本文件
pub(crate) fn read_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(MosmatError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    fs::read_to_string(path).map_err(|e| MosmatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
