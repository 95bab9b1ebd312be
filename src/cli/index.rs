//! # index 子命令 CLI 定义
//!
//! 解析自动指标化日志，列出候选解并按格子选择。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/index.rs`

use clap::Args;
use mosmat::config::{DEFAULT_PENALTY_WEIGHT, DEFAULT_RMS_TOLERANCE};
use mosmat::models::{LatticeSymbol, UnitCell};
use std::path::PathBuf;

/// 解析 `a,b,c,alpha,beta,gamma` 形式的晶胞
pub fn parse_cell(input: &str) -> Result<UnitCell, String> {
    let values = input
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| format!("Invalid cell '{}'. Expected a,b,c,alpha,beta,gamma", input))?;
    if values.len() != 6 {
        return Err(format!(
            "Invalid cell '{}'. Expected 6 values, got {}",
            input,
            values.len()
        ));
    }
    UnitCell::from_slice(&values).map_err(|e| e.to_string())
}

/// index 子命令参数
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Autoindexing log file
    pub log: PathBuf,

    /// Target cell for nearest-solution lookup (a,b,c,alpha,beta,gamma)
    #[arg(long, value_parser = parse_cell, requires = "target_lattice")]
    pub target_cell: Option<UnitCell>,

    /// Target lattice for nearest-solution lookup
    #[arg(long, requires = "target_cell")]
    pub target_lattice: Option<LatticeSymbol>,

    /// Penalty weight in the adjusted rms (rms + weight × penalty)
    #[arg(long, default_value_t = DEFAULT_PENALTY_WEIGHT)]
    pub penalty_weight: f64,

    /// Acceptable rms as a multiple of the chosen solution's adjusted rms
    #[arg(long, default_value_t = DEFAULT_RMS_TOLERANCE)]
    pub rms_tolerance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        let cell = parse_cell("78.7, 78.7, 37.0, 90, 90, 90").unwrap();
        assert_eq!(cell.c, 37.0);
        assert!(parse_cell("78.7,78.7,37.0").is_err());
        assert!(parse_cell("a,b,c,d,e,f").is_err());
        assert!(parse_cell("78.7,78.7,37.0,90,90,190").is_err());
    }
}
