//! # 晶胞参数数据模型
//!
//! 六元组 (a, b, c, α, β, γ)，长度单位 Å，角度单位度。
//! 构造时即校验合法性，之后的计算可以假定晶胞有效。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `reindex/`, `selection/` 使用
//! - 使用 `math/metric.rs`

use crate::error::{MosmatError, Result};
use crate::math::metric::{check_cell_parameters, metric_matrix};
use crate::math::Mat3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 晶胞参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// α（度）
    pub alpha: f64,
    /// β（度）
    pub beta: f64,
    /// γ（度）
    pub gamma: f64,
}

impl UnitCell {
    /// 创建并校验晶胞
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        check_cell_parameters(&[a, b, c, alpha, beta, gamma])?;
        Ok(UnitCell {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        })
    }

    /// 从至少 6 个数的切片创建（多余元素忽略）
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() < 6 {
            return Err(MosmatError::InvalidCell {
                reason: format!("expected 6 cell parameters, got {}", values.len()),
            });
        }
        Self::new(
            values[0], values[1], values[2], values[3], values[4], values[5],
        )
    }

    /// 以数组形式返回 (a, b, c, α, β, γ)
    pub fn as_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.alpha, self.beta, self.gamma]
    }

    /// B 矩阵
    pub fn b_matrix(&self) -> Result<Mat3> {
        metric_matrix(self.a, self.b, self.c, self.alpha, self.beta, self.gamma)
    }

    /// 晶胞体积 (Å³)
    pub fn volume(&self) -> f64 {
        let ca = self.alpha.to_radians().cos();
        let cb = self.beta.to_radians().cos();
        let cg = self.gamma.to_radians().cos();
        self.a * self.b * self.c * (1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg).sqrt()
    }

    /// 与另一晶胞的逐参数绝对差之和
    pub fn difference(&self, other: &UnitCell) -> f64 {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .map(|(x, y)| (x - y).abs())
            .sum()
    }
}

impl fmt::Display for UnitCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} {:.4} {:.4} {:.4} {:.4} {:.4}",
            self.a, self.b, self.c, self.alpha, self.beta, self.gamma
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_volume_cubic() {
        let cell = UnitCell::new(5.0, 5.0, 5.0, 90.0, 90.0, 90.0).unwrap();
        assert!((cell.volume() - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_cell_difference() {
        let a = UnitCell::new(227.0, 52.2, 43.9, 90.0, 99.0, 90.0).unwrap();
        let b = UnitCell::new(228.0, 52.6, 44.1, 90.0, 100.6, 90.0).unwrap();
        assert!((a.difference(&b) - (1.0 + 0.4 + 0.2 + 1.6)).abs() < 1e-9);
        assert_eq!(a.difference(&a), 0.0);
    }

    #[test]
    fn test_from_slice_too_short() {
        assert!(UnitCell::from_slice(&[1.0, 2.0, 3.0]).is_err());
        let cell = UnitCell::from_slice(&[10.0, 11.0, 12.0, 90.0, 90.0, 90.0, 0.0]).unwrap();
        assert_eq!(cell.c, 12.0);
    }

    #[test]
    fn test_display() {
        let cell = UnitCell::new(78.6657, 78.6657, 78.6657, 90.0, 90.0, 90.0).unwrap();
        assert_eq!(
            cell.to_string(),
            "78.6657 78.6657 78.6657 90.0000 90.0000 90.0000"
        );
    }
}
