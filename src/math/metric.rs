//! # 度规矩阵 (B 矩阵)
//!
//! 由正空间晶胞参数构造上三角 B 矩阵（Busing & Levy 形式），
//! 以及由实空间轴反求晶胞参数。
//!
//! ```text
//!     | a*   b* cos γ*   c* cos β*        |
//! B = | 0    b* sin γ*  -c* sin β* cos α  |
//!     | 0    0           1 / c            |
//! ```
//!
//! B 的列向量为倒易轴，B⁻¹ 的行向量为正交化后的实空间轴。
//!
//! ## 参考
//! - Busing & Levy, Acta Cryst. 22 (1967) 457
//! - International Tables for Crystallography Vol. C, Section 1.1
//!
//! ## 依赖关系
//! - 被 `models/cell.rs`, `reindex/settings.rs` 使用
//! - 使用 `math/matrix.rs`, `math/vector.rs`

use super::matrix::{invert, rows};
use super::vector::{dot, length};
use super::{Mat3, Vec3};
use crate::error::{MosmatError, Result};
use crate::models::UnitCell;

/// acos 参数允许的浮点越界量，超出即视为非法晶胞
const ACOS_SLACK: f64 = 1e-9;

/// 校验六个晶胞参数：边长为正、角度在 (0°, 180°) 内、度规行列式为正
pub fn check_cell_parameters(params: &[f64; 6]) -> Result<()> {
    let [a, b, c, alpha, beta, gamma] = *params;

    if params.iter().any(|v| !v.is_finite()) {
        return Err(invalid_cell(format!("non-finite parameter in {:?}", params)));
    }
    if a <= 0.0 || b <= 0.0 || c <= 0.0 {
        return Err(invalid_cell(format!(
            "cell lengths must be positive: {} {} {}",
            a, b, c
        )));
    }
    for angle in [alpha, beta, gamma] {
        if angle <= 0.0 || angle >= 180.0 {
            return Err(invalid_cell(format!(
                "cell angle {} outside (0, 180) degrees",
                angle
            )));
        }
    }

    let (ca, cb, cg) = (
        alpha.to_radians().cos(),
        beta.to_radians().cos(),
        gamma.to_radians().cos(),
    );
    let metric = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
    if metric <= 0.0 {
        return Err(invalid_cell(format!(
            "angles {} {} {} do not span a three-dimensional cell",
            alpha, beta, gamma
        )));
    }

    Ok(())
}

/// 由晶胞参数构造 B 矩阵（角度单位：度）
pub fn metric_matrix(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<Mat3> {
    check_cell_parameters(&[a, b, c, alpha, beta, gamma])?;

    let (sa, ca) = alpha.to_radians().sin_cos();
    let (sb, cb) = beta.to_radians().sin_cos();
    let (sg, cg) = gamma.to_radians().sin_cos();

    let volume = a * b * c * (1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg).sqrt();

    // 倒易晶胞边长
    let a_star = b * c * sa / volume;
    let b_star = a * c * sb / volume;
    let c_star = a * b * sg / volume;

    // 倒易晶胞角度（弧度）
    let beta_star = checked_acos((ca * cg - cb) / (sa * sg))?;
    let gamma_star = checked_acos((ca * cb - cg) / (sa * sb))?;

    Ok([
        a_star,
        b_star * gamma_star.cos(),
        c_star * beta_star.cos(),
        0.0,
        b_star * gamma_star.sin(),
        -c_star * beta_star.sin() * ca,
        0.0,
        0.0,
        1.0 / c,
    ])
}

/// 由晶胞参数得到正交化的实空间轴 a, b, c（B⁻¹ 的行向量）
pub fn real_axes(cell: &UnitCell) -> Result<[Vec3; 3]> {
    let b = cell.b_matrix()?;
    Ok(rows(&invert(&b)?))
}

/// 由 B 矩阵反求晶胞参数
pub fn cell_from_b_matrix(b: &Mat3) -> Result<UnitCell> {
    let [a, b, c] = rows(&invert(b)?);
    cell_from_real_axes(&a, &b, &c)
}

/// 由三条实空间轴计算晶胞参数
pub fn cell_from_real_axes(a: &Vec3, b: &Vec3, c: &Vec3) -> Result<UnitCell> {
    let (la, lb, lc) = (length(a), length(b), length(c));
    if la == 0.0 || lb == 0.0 || lc == 0.0 {
        return Err(invalid_cell("zero-length axis".to_string()));
    }

    let alpha = checked_acos(dot(b, c) / (lb * lc))?.to_degrees();
    let beta = checked_acos(dot(c, a) / (lc * la))?.to_degrees();
    let gamma = checked_acos(dot(a, b) / (la * lb))?.to_degrees();

    UnitCell::new(la, lb, lc, alpha, beta, gamma)
}

/// 带定义域校验的 acos：微小越界按浮点误差钳制，明显越界报非法晶胞
fn checked_acos(x: f64) -> Result<f64> {
    if !x.is_finite() || x.abs() > 1.0 + ACOS_SLACK {
        return Err(invalid_cell(format!(
            "inverse cosine argument {} outside [-1, 1]",
            x
        )));
    }
    Ok(x.clamp(-1.0, 1.0).acos())
}

fn invalid_cell(reason: String) -> MosmatError {
    MosmatError::InvalidCell { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::{multiply, rotation_x, rotation_y, rotation_z};

    fn assert_cell_close(cell: &UnitCell, expected: [f64; 6], eps: f64) {
        let got = cell.as_array();
        for k in 0..6 {
            assert!(
                (got[k] - expected[k]).abs() < eps,
                "parameter {}: {} vs {}",
                k,
                got[k],
                expected[k]
            );
        }
    }

    #[test]
    fn test_b_matrix_orthorhombic() {
        let b = metric_matrix(10.0, 20.0, 40.0, 90.0, 90.0, 90.0).unwrap();
        let expected = [0.1, 0.0, 0.0, 0.0, 0.05, 0.0, 0.0, 0.0, 0.025];
        for k in 0..9 {
            assert!((b[k] - expected[k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cell_round_trip_triclinic() {
        let params = [50.0, 60.0, 70.0, 80.0, 95.0, 105.0];
        let b = metric_matrix(50.0, 60.0, 70.0, 80.0, 95.0, 105.0).unwrap();
        let cell = cell_from_b_matrix(&b).unwrap();
        assert_cell_close(&cell, params, 1e-8);
    }

    #[test]
    fn test_cell_round_trip_monoclinic() {
        let params = [228.0796, 52.5895, 44.1177, 90.0, 100.6078, 90.0];
        let b = metric_matrix(228.0796, 52.5895, 44.1177, 90.0, 100.6078, 90.0).unwrap();
        let cell = cell_from_b_matrix(&b).unwrap();
        assert_cell_close(&cell, params, 1e-8);
    }

    #[test]
    fn test_rotated_b_matrix_keeps_cell() {
        // 旋转不改变晶胞：U·B 的逆矩阵行向量仍给出原晶胞
        let b = metric_matrix(57.8349, 77.2950, 86.7453, 90.0, 90.0, 90.0).unwrap();
        let m = multiply(
            &rotation_z(-18.467),
            &multiply(&rotation_y(-3.227), &multiply(&rotation_x(-55.432), &b)),
        );
        let cell = cell_from_b_matrix(&m).unwrap();
        assert_cell_close(&cell, [57.8349, 77.2950, 86.7453, 90.0, 90.0, 90.0], 1e-8);
    }

    #[test]
    fn test_invalid_cells_rejected() {
        assert!(matches!(
            metric_matrix(-1.0, 10.0, 10.0, 90.0, 90.0, 90.0),
            Err(MosmatError::InvalidCell { .. })
        ));
        assert!(matches!(
            metric_matrix(10.0, 10.0, 10.0, 0.0, 90.0, 90.0),
            Err(MosmatError::InvalidCell { .. })
        ));
        // α + β < γ：三个角无法构成晶胞
        assert!(matches!(
            metric_matrix(10.0, 10.0, 10.0, 30.0, 30.0, 120.0),
            Err(MosmatError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_real_axes_lengths() {
        let cell = UnitCell::new(10.0, 20.0, 30.0, 70.0, 80.0, 100.0).unwrap();
        let axes = real_axes(&cell).unwrap();
        assert!((length(&axes[0]) - 10.0).abs() < 1e-9);
        assert!((length(&axes[1]) - 20.0).abs() < 1e-9);
        assert!((length(&axes[2]) - 30.0).abs() < 1e-9);
    }
}
