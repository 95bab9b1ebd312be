//! # 晶胞设定生成
//!
//! 给定晶胞与格子，列出可选的设定（目标格子、变换后晶胞、算符），
//! 以及由空间群编号给出原始（三斜 P）设定的算符。
//!
//! 内置的 [`CentringSettings`] 覆盖最常见的需求：输入格子自身的恒等设定，
//! 以及各带心类型到原始格子的标准变换。更完整的设定枚举可以通过
//! 实现 [`SettingsGenerator`] 注入。
//!
//! ## 原始格子算符（Miller 指标约定）
//! | 带心 | 算符 |
//! |------|------|
//! | P | `h,k,l` |
//! | C | `1/2h+1/2k,-1/2h+1/2k,l` |
//! | I | `-1/2h+1/2k+1/2l,1/2h-1/2k+1/2l,1/2h+1/2k-1/2l` |
//! | F | `1/2k+1/2l,1/2h+1/2l,1/2h+1/2k` |
//! | R | `2/3h+1/3k+1/3l,-1/3h+1/3k+1/3l,-1/3h-2/3k+1/3l` (六方设定，正向) |
//!
//! ## 依赖关系
//! - 被 `reindex/engine.rs`, `frame.rs` 使用
//! - 使用 `reindex/symop.rs`, `math/`, `models/`

use super::symop::{SymopParser, SymopResolver};
use crate::error::{MosmatError, Result};
use crate::math::{cell_from_real_axes, from_rows, multiply, real_axes, rows};
use crate::models::{CellSetting, Centring, LatticeSymbol, UnitCell};
use tracing::debug;

/// 恒等算符
pub const IDENTITY_OPERATOR: &str = "h,k,l";

/// 枚举可选晶胞设定的能力
pub trait SettingsGenerator {
    fn settings(&self, cell: &UnitCell, lattice: LatticeSymbol) -> Result<Vec<CellSetting>>;
}

/// 由空间群编号给出原始设定晶胞与算符的能力
pub trait PrimitiveOperatorSource {
    fn primitive_reindex(&self, cell: &UnitCell, spacegroup: u32) -> Result<(UnitCell, String)>;
}

/// 内置的带心变换表
#[derive(Debug, Clone, Copy, Default)]
pub struct CentringSettings {
    resolver: SymopParser,
}

impl CentringSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带心类型对应的原始格子算符
    pub fn primitive_operator(centring: Centring) -> &'static str {
        match centring {
            Centring::P => IDENTITY_OPERATOR,
            Centring::C => "1/2h+1/2k,-1/2h+1/2k,l",
            Centring::I => "-1/2h+1/2k+1/2l,1/2h-1/2k+1/2l,1/2h+1/2k-1/2l",
            Centring::F => "1/2k+1/2l,1/2h+1/2l,1/2h+1/2k",
            Centring::R => "2/3h+1/3k+1/3l,-1/3h+1/3k+1/3l,-1/3h-2/3k+1/3l",
        }
    }

    /// 用算符变换晶胞：新实空间轴 = O · 旧实空间轴（按行）
    pub fn transform_cell(&self, cell: &UnitCell, operator: &str) -> Result<UnitCell> {
        let o = self.resolver.resolve(operator)?;
        let basis = from_rows(&real_axes(cell)?);
        let [a, b, c] = rows(&multiply(&o, &basis));
        cell_from_real_axes(&a, &b, &c)
    }
}

impl SettingsGenerator for CentringSettings {
    fn settings(&self, cell: &UnitCell, lattice: LatticeSymbol) -> Result<Vec<CellSetting>> {
        let mut settings = vec![CellSetting {
            lattice,
            cell: *cell,
            operator: IDENTITY_OPERATOR.to_string(),
        }];

        if lattice != LatticeSymbol::AP {
            let operator = Self::primitive_operator(lattice.centring());
            settings.push(CellSetting {
                lattice: LatticeSymbol::AP,
                cell: self.transform_cell(cell, operator)?,
                operator: operator.to_string(),
            });
        }

        debug!("{} settings generated for {} {}", settings.len(), lattice, cell);
        Ok(settings)
    }
}

impl PrimitiveOperatorSource for CentringSettings {
    fn primitive_reindex(&self, cell: &UnitCell, spacegroup: u32) -> Result<(UnitCell, String)> {
        let lattice = LatticeSymbol::from_spacegroup_number(spacegroup).ok_or_else(|| {
            MosmatError::InvalidArgument(format!(
                "spacegroup {} is not a lattice reference spacegroup",
                spacegroup
            ))
        })?;
        let operator = Self::primitive_operator(lattice.centring());
        Ok((self.transform_cell(cell, operator)?, operator.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc_cell() -> UnitCell {
        UnitCell::new(228.0796, 52.5895, 44.1177, 90.0, 100.6078, 90.0).unwrap()
    }

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
    fn test_primitive_operators_volume_ratio() {
        let resolver = SymopParser;
        let expected = [
            (Centring::P, 1.0),
            (Centring::C, 0.5),
            (Centring::I, 0.5),
            (Centring::F, 0.25),
            (Centring::R, 1.0 / 3.0),
        ];
        for (centring, det) in expected {
            let o = resolver
                .resolve(CentringSettings::primitive_operator(centring))
                .unwrap();
            assert!((crate::math::determinant(&o) - det).abs() < 1e-12);
        }
    }

    #[test]
    fn test_mc_settings() {
        let settings = CentringSettings::new()
            .settings(&mc_cell(), LatticeSymbol::MC)
            .unwrap();
        assert_eq!(settings.len(), 2);

        assert_eq!(settings[0].lattice, LatticeSymbol::MC);
        assert_eq!(settings[0].operator, IDENTITY_OPERATOR);

        let primitive = &settings[1];
        assert_eq!(primitive.lattice, LatticeSymbol::AP);
        assert_cell_close(
            &primitive.cell,
            [117.0320, 117.0320, 44.1177, 79.6664, 100.3336, 154.0319],
            1e-3,
        );
        // 体积减半
        assert!((primitive.cell.volume() * 2.0 - mc_cell().volume()).abs() < 1.0);
    }

    #[test]
    fn test_cubic_f_primitive_is_rhombohedral() {
        let cell = UnitCell::new(100.0, 100.0, 100.0, 90.0, 90.0, 90.0).unwrap();
        let (primitive, operator) = CentringSettings::new()
            .primitive_reindex(&cell, LatticeSymbol::CF.spacegroup_number())
            .unwrap();
        assert_eq!(operator, CentringSettings::primitive_operator(Centring::F));
        let edge = 100.0 / 2f64.sqrt();
        assert_cell_close(&primitive, [edge, edge, edge, 60.0, 60.0, 60.0], 1e-8);
    }

    #[test]
    fn test_primitive_reindex_unknown_spacegroup() {
        let cell = mc_cell();
        assert!(CentringSettings::new().primitive_reindex(&cell, 4).is_err());
    }

    #[test]
    fn test_triclinic_has_only_identity() {
        let cell = UnitCell::new(50.0, 60.0, 70.0, 80.0, 95.0, 105.0).unwrap();
        let settings = CentringSettings::new()
            .settings(&cell, LatticeSymbol::AP)
            .unwrap();
        assert_eq!(settings.len(), 1);
    }
}
