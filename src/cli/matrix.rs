//! # 矩阵文件类子命令 CLI 定义
//!
//! `reindex`、`axes`、`real-space` 三个子命令都以一个 Mosflm 矩阵文件
//! 和它所属的格子符号为输入。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/reindex.rs`, `commands/axes.rs`, `commands/real_space.rs`

use clap::Args;
use mosmat::models::LatticeSymbol;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// reindex
// ─────────────────────────────────────────────────────────────

/// reindex 子命令参数
#[derive(Args, Debug)]
pub struct ReindexArgs {
    /// Mosflm matrix file
    pub matrix: PathBuf,

    /// Lattice of the input matrix (e.g. mC)
    #[arg(short, long)]
    pub lattice: LatticeSymbol,

    /// Target lattice setting
    #[arg(short, long, default_value = "aP")]
    pub target: LatticeSymbol,

    /// Write the new matrix here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────
// axes
// ─────────────────────────────────────────────────────────────

/// axes 子命令参数
#[derive(Args, Debug)]
pub struct AxesArgs {
    /// Mosflm matrix file
    pub matrix: PathBuf,

    /// Lattice of the input matrix (e.g. mC)
    #[arg(short, long)]
    pub lattice: LatticeSymbol,
}

// ─────────────────────────────────────────────────────────────
// real-space
// ─────────────────────────────────────────────────────────────

/// 常用辐射源波长 (Å)
pub fn get_predefined_wavelength(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "cu-ka" | "cuka" => Some(1.5418),
        "mo-ka" | "moka" => Some(0.7107),
        "se-k" | "sek" => Some(0.9795),
        _ => None,
    }
}

/// 解析波长输入（辐射源名称或数值）
pub fn parse_wavelength(input: &str) -> Result<f64, String> {
    if let Some(wl) = get_predefined_wavelength(input) {
        return Ok(wl);
    }
    let value = input.parse::<f64>().map_err(|_| {
        format!(
            "Invalid wavelength '{}'. Use a number in Å (e.g., 0.99187) or a name: cu-ka, mo-ka, se-k",
            input
        )
    })?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("Wavelength must be positive, got {}", value))
    }
}

/// real-space 子命令参数
#[derive(Args, Debug)]
pub struct RealSpaceArgs {
    /// Mosflm matrix file
    pub matrix: PathBuf,

    /// Lattice of the input matrix (e.g. mC)
    #[arg(short, long)]
    pub lattice: LatticeSymbol,

    /// X-ray wavelength in Å, or a source name (cu-ka, mo-ka, se-k)
    #[arg(short, long, value_parser = parse_wavelength)]
    pub wavelength: f64,
}
