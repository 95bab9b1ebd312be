//! # 晶胞设定
//!
//! 设定生成器给出的一个候选：目标格子、变换后的晶胞以及
//! 从原设定到该设定的重新指标化算符（文本形式，如 `1/2h+1/2k,-1/2h+1/2k,l`）。
//!
//! ## 依赖关系
//! - 被 `reindex/` 使用
//! - 使用 `models/cell.rs`, `models/lattice.rs`

use super::{LatticeSymbol, UnitCell};
use serde::{Deserialize, Serialize};

/// 一个可选的晶胞设定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSetting {
    pub lattice: LatticeSymbol,
    pub cell: UnitCell,
    /// 重新指标化算符表达式
    pub operator: String,
}
