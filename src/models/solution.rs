//! # 自动指标化解数据模型
//!
//! 单次自动指标化输出解析得到的候选解，只在一次解析/选择过程中存在。
//!
//! ## 依赖关系
//! - 被 `parsers/autoindex.rs`, `selection/solutions.rs` 使用
//! - 使用 `models/cell.rs`, `models/lattice.rs`

use super::{LatticeSymbol, UnitCell};
use serde::{Deserialize, Serialize};

/// 自动指标化表格中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexingSolution {
    /// 解编号
    pub number: u32,
    /// 格子符号（原样保留，可能不在 14 种标准格子内）
    pub lattice: String,
    /// 对称性罚分
    pub penalty: f64,
    /// 程序报告的 rms 偏差
    pub rms: f64,
    /// 晶胞分数变化 (FRACN)
    pub frc: f64,
    /// 晶胞参数
    pub cell: UnitCell,
}

impl IndexingSolution {
    /// 经罚分修正后的 rms：`rms + weight × penalty`
    pub fn adjusted_rms(&self, penalty_weight: f64) -> f64 {
        self.rms + penalty_weight * self.penalty
    }

    /// 标准 Bravais 格子符号，非标准设定返回 `None`
    pub fn lattice_symbol(&self) -> Option<LatticeSymbol> {
        self.lattice.parse().ok()
    }
}

/// 候选解表中的一行及其精修状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRow {
    pub solution: IndexingSolution,
    /// 行内不含 `unrefined` 标记
    pub refined: bool,
}

/// 某一格子的最佳候选
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeCandidate {
    /// 来源解编号
    pub number: u32,
    pub lattice: LatticeSymbol,
    pub cell: UnitCell,
    /// 修正后的 rms（越小越好）
    pub rms: f64,
    pub frc: f64,
}
