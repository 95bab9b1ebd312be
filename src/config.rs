//! # 配置
//!
//! 解选择与积分分析用到的经验常数。默认值针对 Mosflm 的输出分布调校，
//! 命令行参数可以覆盖。
//!
//! ## 依赖关系
//! - 被 `selection/`, `parsers/integration.rs`, `commands/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 罚分修正系数：`adjusted_rms = rms + 0.005 × penalty`
pub const DEFAULT_PENALTY_WEIGHT: f64 = 0.005;

/// 可接受 rms 相对于被选中解的倍数
pub const DEFAULT_RMS_TOLERANCE: f64 = 1.1;

/// 逐帧分辨率估计使用的 I/σ 阈值
pub const DEFAULT_ISIGMA_CUTOFF: f64 = 0.5;

/// 自动指标化解选择参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub penalty_weight: f64,
    pub rms_tolerance: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            penalty_weight: DEFAULT_PENALTY_WEIGHT,
            rms_tolerance: DEFAULT_RMS_TOLERANCE,
        }
    }
}

/// 积分日志分析参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub isigma_cutoff: f64,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        IntegrationConfig {
            isigma_cutoff: DEFAULT_ISIGMA_CUTOFF,
        }
    }
}
