//! # reindex 子命令实现
//!
//! 把矩阵文件变换到目标格子设定。未指定 `--output` 时新矩阵写到 stdout，
//! 便于直接交给下游程序。
//!
//! ## 依赖关系
//! - 使用 `cli/matrix.rs` 定义的 ReindexArgs
//! - 使用 `mosmat::reindex`

use super::read_text;
use crate::cli::matrix::ReindexArgs;
use crate::utils::output;
use mosmat::error::{MosmatError, Result};
use mosmat::parsers::parse_matrix;
use mosmat::reindex::{format_operator, Reindexer};
use std::fs;

/// 执行重新指标化
pub fn execute(args: ReindexArgs) -> Result<()> {
    let text = read_text(&args.matrix)?;
    let matrix = parse_matrix(&text)?;

    let reindexer = Reindexer::new();
    let operator = reindexer.reindex_operator(&matrix, args.lattice, args.target)?;
    let reindexed = reindexer.reindex_matrix(&matrix, args.lattice, args.target)?;

    match args.output {
        Some(path) => {
            output::print_header(&format!("Reindex {} -> {}", args.lattice, args.target));
            output::print_info(&format!("Operator: {}", format_operator(&operator)));
            output::print_info(&format!("Old cell: {}", matrix.cell));
            output::print_info(&format!("New cell: {}", reindexed.cell));

            fs::write(&path, reindexed.to_text()).map_err(|e| MosmatError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_success(&format!("New matrix saved to '{}'", path.display()));
        }
        None => print!("{}", reindexed.to_text()),
    }

    Ok(())
}
