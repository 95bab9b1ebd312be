//! # 参考系转换
//!
//! 把 Mosflm 取向矩阵转换为标准（类 imgCIF）参考系下的实空间原始轴。
//!
//! ## 步骤
//! 1. 格子符号 -> 参考空间群编号 -> 原始设定算符 O
//! 2. A 矩阵除以波长（Mosflm 的 A 矩阵含 1/λ）
//! 3. 实空间轴 = (O · (A/λ)⁻¹) 的行向量，单位 Å
//! 4. 每条轴乘以固定的坐标轴置换矩阵
//!
//! ## 坐标轴约定
//! ```text
//!                   | 0  0  1 |
//! canonical = M·v,  | 0  1  0 |    即 (x, y, z) -> (z, y, -x)
//!                   |-1  0  0 |
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/real_space.rs` 使用
//! - 使用 `reindex/`, `parsers/matrix_file.rs`, `math/`

use crate::error::{MosmatError, Result};
use crate::math::{columns, invert, multiply, multiply_vec, scale, transpose, Mat3, Vec3};
use crate::models::LatticeSymbol;
use crate::parsers::matrix_file::parse_matrix;
use crate::reindex::{CentringSettings, PrimitiveOperatorSource, SymopParser, SymopResolver};
use tracing::debug;

/// Mosflm 坐标系 -> 标准坐标系
pub const MOSFLM_TO_CANONICAL: Mat3 = [0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0];

pub fn mosflm_to_canonical(v: &Vec3) -> Vec3 {
    multiply_vec(&MOSFLM_TO_CANONICAL, v)
}

pub fn canonical_to_mosflm(v: &Vec3) -> Vec3 {
    multiply_vec(&transpose(&MOSFLM_TO_CANONICAL), v)
}

/// 实空间轴转换器
#[derive(Debug, Clone, Default)]
pub struct FrameConverter<P = CentringSettings, R = SymopParser> {
    source: P,
    resolver: R,
}

impl FrameConverter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PrimitiveOperatorSource, R: SymopResolver> FrameConverter<P, R> {
    pub fn with(source: P, resolver: R) -> Self {
        FrameConverter { source, resolver }
    }

    /// 标准参考系下的实空间原始轴 a, b, c (Å)
    pub fn to_real_space(
        &self,
        wavelength: f64,
        lattice: LatticeSymbol,
        matrix_text: &str,
    ) -> Result<[Vec3; 3]> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(MosmatError::InvalidWavelength(wavelength));
        }

        let matrix = parse_matrix(matrix_text)?;
        let spacegroup = lattice.spacegroup_number();
        let (cell, operator) = self.source.primitive_reindex(&matrix.cell, spacegroup)?;
        debug!(
            "{} (spacegroup {}) primitive cell {} via {}",
            lattice, spacegroup, cell, operator
        );
        let o = self.resolver.resolve(&operator)?;

        let a = scale(&matrix.a, 1.0 / wavelength);
        let real = multiply(&transpose(&invert(&a)?), &transpose(&o));

        Ok(columns(&real).map(|axis| mosflm_to_canonical(&axis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{identity, length};
    use crate::models::UnitCell;
    use crate::parsers::matrix_file::format_matrix;
    use crate::parsers::matrix_file::tests::MC_MATRIX;

    fn assert_vec_close(got: &Vec3, expected: &Vec3, eps: f64) {
        for k in 0..3 {
            assert!(
                (got[k] - expected[k]).abs() < eps,
                "component {}: {} vs {}",
                k,
                got[k],
                expected[k]
            );
        }
    }

    #[test]
    fn test_axis_mapping_round_trip() {
        let v = [1.0, 2.0, 3.0];
        assert_eq!(mosflm_to_canonical(&v), [3.0, 2.0, -1.0]);
        assert_eq!(canonical_to_mosflm(&mosflm_to_canonical(&v)), v);
    }

    #[test]
    fn test_diagonal_matrix_real_space() {
        let cell = UnitCell::new(100.0, 50.0, 25.0, 90.0, 90.0, 90.0).unwrap();
        let text = format_matrix(
            &cell,
            &[0.01, 0.0, 0.0, 0.0, 0.02, 0.0, 0.0, 0.0, 0.04],
            &identity(),
        );

        let [a, b, c] = FrameConverter::new()
            .to_real_space(1.0, LatticeSymbol::AP, &text)
            .unwrap();
        assert_vec_close(&a, &[0.0, 0.0, -100.0], 1e-9);
        assert_vec_close(&b, &[0.0, 50.0, 0.0], 1e-9);
        assert_vec_close(&c, &[25.0, 0.0, 0.0], 1e-9);
    }

    #[test]
    fn test_mc_matrix_real_space() {
        let axes = FrameConverter::new()
            .to_real_space(0.99187, LatticeSymbol::MC, MC_MATRIX)
            .unwrap();

        let expected = [
            [-27.348696, -54.354743, 99.970568],
            [62.850699, 15.637259, -97.477074],
            [30.218488, 28.647607, 14.578342],
        ];
        for (axis, want) in axes.iter().zip(expected.iter()) {
            assert_vec_close(axis, want, 1e-3);
        }

        // 长度与原始晶胞一致
        let lengths: Vec<f64> = axes.iter().map(length).collect();
        assert!((lengths[0] - 117.032).abs() < 0.01);
        assert!((lengths[1] - 117.032).abs() < 0.01);
        assert!((lengths[2] - 44.1177).abs() < 0.01);
    }

    #[test]
    fn test_invalid_wavelength() {
        for wavelength in [0.0, -1.0, f64::NAN] {
            let err = FrameConverter::new()
                .to_real_space(wavelength, LatticeSymbol::MC, MC_MATRIX)
                .unwrap_err();
            assert!(matches!(err, MosmatError::InvalidWavelength(_)));
        }
    }
}
