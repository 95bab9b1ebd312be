//! # 积分日志逐帧统计数据模型
//!
//! 扫描积分日志时，每遇到一个 "Processing/Integrating Image N" 标记创建一条记录，
//! 随后的匹配行不断填充该记录，直到下一个图像标记。
//!
//! ## 依赖关系
//! - 被 `parsers/integration.rs`, `selection/resolution.rs`, `commands/integrate.rs` 使用

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// rmsd（像素）高于此值视为偏高
pub const HIGH_RMSD_PIXELS: f64 = 1.0;

/// rmsd（像素）高于此值视为严重偏高
pub const VERY_HIGH_RMSD_PIXELS: f64 = 2.5;

/// 单帧积分统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageStats {
    /// 比例因子
    pub scale: f64,
    /// 本帧测量的衍射点数
    pub strong: Option<u32>,
    /// 过载点数
    pub overloads: Option<u32>,
    /// 坏点（剔除）数
    pub rejected: Option<u32>,
    /// 精修后的镶嵌度（度）
    pub mosaic: Option<f64>,
    /// 晶体-探测器距离 (mm)
    pub distance: Option<f64>,
    /// 光束中心 (mm)
    pub beam: Option<(f64, f64)>,
    /// 由 I/σ 曲线估计的分辨率极限 (Å)，-1.0 表示未达到阈值
    pub resolution: Option<f64>,
    /// 位置残差（像素）
    pub rmsd_pixel: Option<f64>,
    /// φ 残差，日志中不提供，固定为 0.0
    pub rmsd_phi: Option<f64>,
    /// 加权残差
    pub weighted_residual: Option<f64>,
    /// 精修晶胞
    pub cell: Option<[f64; 6]>,
}

impl Default for ImageStats {
    fn default() -> Self {
        ImageStats {
            scale: 1.0,
            strong: None,
            overloads: None,
            rejected: None,
            mosaic: None,
            distance: None,
            beam: None,
            resolution: None,
            rmsd_pixel: None,
            rmsd_phi: None,
            weighted_residual: None,
            cell: None,
        }
    }
}

impl ImageStats {
    /// 按 rmsd 判断该帧积分质量
    pub fn status(&self) -> ImageStatus {
        match self.rmsd_pixel {
            None => ImageStatus::Abandoned,
            Some(r) if r > VERY_HIGH_RMSD_PIXELS => ImageStatus::VeryHighRmsd,
            Some(r) if r > HIGH_RMSD_PIXELS => ImageStatus::HighRmsd,
            Some(_) => ImageStatus::Ok,
        }
    }
}

/// 图像编号 -> 统计记录
pub type IntegrationStats = BTreeMap<u32, ImageStats>;

/// 单帧积分状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStatus {
    Ok,
    HighRmsd,
    VeryHighRmsd,
    /// 没有得到残差，处理被放弃
    Abandoned,
}

impl ImageStatus {
    /// 状态字符
    pub fn symbol(&self) -> char {
        match self {
            ImageStatus::Ok => 'o',
            ImageStatus::HighRmsd => '%',
            ImageStatus::VeryHighRmsd => '!',
            ImageStatus::Abandoned => '@',
        }
    }
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageStatus::Ok => write!(f, "ok"),
            ImageStatus::HighRmsd => write!(f, "high rmsd"),
            ImageStatus::VeryHighRmsd => write!(f, "very high rmsd"),
            ImageStatus::Abandoned => write!(f, "abandoned processing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_status() {
        let mut stats = ImageStats::default();
        assert_eq!(stats.status(), ImageStatus::Abandoned);

        stats.rmsd_pixel = Some(0.6);
        assert_eq!(stats.status(), ImageStatus::Ok);

        stats.rmsd_pixel = Some(1.4);
        assert_eq!(stats.status(), ImageStatus::HighRmsd);

        stats.rmsd_pixel = Some(3.0);
        assert_eq!(stats.status(), ImageStatus::VeryHighRmsd);
        assert_eq!(stats.status().symbol(), '!');
    }

    #[test]
    fn test_default_scale() {
        assert_eq!(ImageStats::default().scale, 1.0);
    }
}
