//! # 分辨率极限估计
//!
//! 由分辨率分层的平均 I/σ 曲线线性插值出 I/σ 穿过阈值处的分辨率，
//! 并在所有图像中取最保守（数值最小）的估计作为积分分辨率极限。
//!
//! 曲线从未达到阈值时返回哨兵值 [`RESOLUTION_NOT_REACHED`]，不视为错误。
//!
//! ## 依赖关系
//! - 被 `parsers/integration.rs`, `commands/integrate.rs` 使用
//! - 使用 `models/integration.rs`

use crate::models::IntegrationStats;

/// I/σ 曲线未达到阈值时的哨兵值
pub const RESOLUTION_NOT_REACHED: f64 = -1.0;

/// 估计 I/σ 穿过阈值处的分辨率
///
/// `shells` 为 (分辨率, I/σ)，低分辨率在前。从高分辨率端开始搜索第一个
/// 达到阈值的分层，与其相邻的更高分辨率分层之间线性插值。
pub fn resolution_estimate(shells: &[(f64, f64)], cutoff: f64) -> f64 {
    let reached = shells.iter().any(|&(_, isigma)| isigma >= cutoff);
    if !reached {
        return RESOLUTION_NOT_REACHED;
    }

    let reversed: Vec<(f64, f64)> = shells.iter().rev().copied().collect();

    let (x0, y0) = reversed[0];
    if y0 >= cutoff {
        return x0;
    }

    let j = reversed
        .iter()
        .position(|&(_, y)| y >= cutoff)
        .unwrap_or(0);
    let (xj, yj) = reversed[j];
    let (xp, yp) = reversed[j - 1];

    xj + (cutoff - yj) * (xp - xj) / (yp - yj)
}

/// 全部图像中最小的正分辨率估计；没有任何图像给出估计时返回哨兵值
pub fn decide_integration_resolution_limit(stats: &IntegrationStats) -> f64 {
    stats
        .values()
        .filter_map(|image| image.resolution)
        .filter(|&r| r > 0.0)
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(RESOLUTION_NOT_REACHED)
}

/// 按图像顺序拼接的状态字符串，如 `oooo%o!@`
pub fn status_string(stats: &IntegrationStats) -> String {
    stats.values().map(|image| image.status().symbol()).collect()
}

/// 全部图像中最大的加权残差
pub fn worst_weighted_residual(stats: &IntegrationStats) -> Option<f64> {
    stats
        .values()
        .filter_map(|image| image.weighted_residual)
        .max_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageStats;

    const DECREASING: [(f64, f64); 5] = [
        (8.0, 12.0),
        (5.0, 6.0),
        (4.0, 2.5),
        (3.0, 0.8),
        (2.5, 0.3),
    ];

    #[test]
    fn test_interpolated_crossing() {
        // 阈值 1.0 落在 (4.0, 2.5) 与 (3.0, 0.8) 之间
        let expected = 4.0 + (1.0 - 2.5) * (3.0 - 4.0) / (0.8 - 2.5);
        let r = resolution_estimate(&DECREASING, 1.0);
        assert!((r - expected).abs() < 1e-12);
        assert!(r > 3.0 && r < 4.0);
    }

    #[test]
    fn test_highest_shell_above_cutoff() {
        assert_eq!(resolution_estimate(&DECREASING, 0.2), 2.5);
    }

    #[test]
    fn test_cutoff_never_reached() {
        assert_eq!(resolution_estimate(&DECREASING, 20.0), RESOLUTION_NOT_REACHED);
        assert_eq!(resolution_estimate(&[], 1.0), RESOLUTION_NOT_REACHED);
    }

    fn image(resolution: Option<f64>, rmsd: Option<f64>, weighted: Option<f64>) -> ImageStats {
        ImageStats {
            resolution,
            rmsd_pixel: rmsd,
            weighted_residual: weighted,
            ..ImageStats::default()
        }
    }

    #[test]
    fn test_integration_limit_is_minimum() {
        let mut stats = IntegrationStats::new();
        stats.insert(1, image(Some(2.4), Some(0.5), Some(0.9)));
        stats.insert(2, image(Some(2.1), Some(1.5), Some(1.3)));
        stats.insert(3, image(Some(RESOLUTION_NOT_REACHED), Some(3.0), None));
        stats.insert(4, image(None, None, None));

        assert_eq!(decide_integration_resolution_limit(&stats), 2.1);
        assert_eq!(status_string(&stats), "o%!@");
        assert_eq!(worst_weighted_residual(&stats), Some(1.3));
    }

    #[test]
    fn test_integration_limit_without_estimates() {
        let mut stats = IntegrationStats::new();
        stats.insert(1, image(Some(RESOLUTION_NOT_REACHED), None, None));
        assert_eq!(
            decide_integration_resolution_limit(&stats),
            RESOLUTION_NOT_REACHED
        );
        assert_eq!(worst_weighted_residual(&stats), None);
    }
}
