//! # 重新指标化引擎
//!
//! 把取向矩阵从一个格子设定变换到另一个设定：
//!
//! ```text
//! A' = A · O⁻¹     （A 作用在倒易空间的 Miller 指标上）
//! U' = O · U
//! ```
//!
//! O 把旧 Miller 指标映射为新指标，第 i 行为新的第 i 个指标的系数。
//! 变换后的实空间轴为 (A')⁻¹ 的行向量，倒易轴为 A' 的列向量。
//!
//! ## 依赖关系
//! - 被 `frame.rs`, `commands/reindex.rs`, `commands/axes.rs` 使用
//! - 使用 `reindex/settings.rs`, `reindex/symop.rs`, `parsers/matrix_file.rs`, `math/`

use super::settings::{CentringSettings, SettingsGenerator};
use super::symop::{SymopParser, SymopResolver};
use crate::error::{MosmatError, Result};
use crate::math::{columns, invert, multiply, rows, Mat3, Vec3};
use crate::models::{CellSetting, LatticeSymbol};
use crate::parsers::matrix_file::{parse_matrix, OrientationMatrix};
use tracing::debug;

/// 对 A、U 矩阵应用重新指标化算符
pub fn apply_reindex(a: &Mat3, u: &Mat3, operator: &Mat3) -> Result<(Mat3, Mat3)> {
    let inverse = invert(operator)?;
    Ok((multiply(a, &inverse), multiply(operator, u)))
}

/// 每条轴绕哪个角度旋转后落在探测器平面内：`atan(-x_z / x_0)`（度）
pub fn angles_in_detector_plane(axes: &[Vec3; 3]) -> [f64; 3] {
    axes.map(|x| (-x[2] / x[0]).atan().to_degrees())
}

/// 重新指标化引擎，设定生成器与算符解析器均可注入
#[derive(Debug, Clone, Default)]
pub struct Reindexer<G = CentringSettings, R = SymopParser> {
    generator: G,
    resolver: R,
}

impl Reindexer {
    /// 使用内置设定表与算符解析器
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: SettingsGenerator, R: SymopResolver> Reindexer<G, R> {
    pub fn with(generator: G, resolver: R) -> Self {
        Reindexer {
            generator,
            resolver,
        }
    }

    /// 查找目标格子的设定
    pub fn setting_for(
        &self,
        matrix: &OrientationMatrix,
        lattice: LatticeSymbol,
        target: LatticeSymbol,
    ) -> Result<CellSetting> {
        self.generator
            .settings(&matrix.cell, lattice)?
            .into_iter()
            .find(|s| s.lattice == target)
            .ok_or_else(|| MosmatError::UnsupportedSetting {
                lattice: lattice.to_string(),
                target: target.to_string(),
            })
    }

    /// 目标设定的算符矩阵
    pub fn reindex_operator(
        &self,
        matrix: &OrientationMatrix,
        lattice: LatticeSymbol,
        target: LatticeSymbol,
    ) -> Result<Mat3> {
        let setting = self.setting_for(matrix, lattice, target)?;
        self.resolver.resolve(&setting.operator)
    }

    /// 变换已解析的矩阵，晶胞取自目标设定
    pub fn reindex_matrix(
        &self,
        matrix: &OrientationMatrix,
        lattice: LatticeSymbol,
        target: LatticeSymbol,
    ) -> Result<OrientationMatrix> {
        let setting = self.setting_for(matrix, lattice, target)?;
        let operator = self.resolver.resolve(&setting.operator)?;
        debug!(
            "reindexing {} -> {} with {}",
            lattice, target, setting.operator
        );

        let (a, u) = apply_reindex(&matrix.a, &matrix.u, &operator)?;
        Ok(OrientationMatrix {
            cell: setting.cell,
            a,
            u,
        })
    }

    /// 解析矩阵文本、变换并重新格式化
    pub fn reindex(
        &self,
        lattice: LatticeSymbol,
        matrix_text: &str,
        target: LatticeSymbol,
    ) -> Result<String> {
        let matrix = parse_matrix(matrix_text)?;
        Ok(self.reindex_matrix(&matrix, lattice, target)?.to_text())
    }

    /// 原始（aP）设定下的 A 矩阵
    pub fn primitive_a_matrix(&self, lattice: LatticeSymbol, matrix_text: &str) -> Result<Mat3> {
        let matrix = parse_matrix(matrix_text)?;
        Ok(self.reindex_matrix(&matrix, lattice, LatticeSymbol::AP)?.a)
    }

    /// 原始设定下的实空间轴（A 矩阵逆的行向量）
    pub fn real_space_primitive_axes(
        &self,
        lattice: LatticeSymbol,
        matrix_text: &str,
    ) -> Result<[Vec3; 3]> {
        let a = self.primitive_a_matrix(lattice, matrix_text)?;
        Ok(rows(&invert(&a)?))
    }

    /// 原始设定下的倒易轴（A 矩阵的列向量）
    pub fn reciprocal_space_primitive_axes(
        &self,
        lattice: LatticeSymbol,
        matrix_text: &str,
    ) -> Result<[Vec3; 3]> {
        let a = self.primitive_a_matrix(lattice, matrix_text)?;
        Ok(columns(&a))
    }

    /// 实空间原始轴落在探测器平面内的旋转角（度）
    pub fn find_primitive_axes(&self, lattice: LatticeSymbol, matrix_text: &str) -> Result<[f64; 3]> {
        let axes = self.real_space_primitive_axes(lattice, matrix_text)?;
        Ok(angles_in_detector_plane(&axes))
    }

    /// 倒易原始轴落在探测器平面内的旋转角（度）
    pub fn find_primitive_reciprocal_axes(
        &self,
        lattice: LatticeSymbol,
        matrix_text: &str,
    ) -> Result<[f64; 3]> {
        let axes = self.reciprocal_space_primitive_axes(lattice, matrix_text)?;
        Ok(angles_in_detector_plane(&axes))
    }
}
