//! # Bravais 格子符号
//!
//! 14 种 Bravais 格子的封闭枚举。第一个字母为晶系 {a, m, o, t, h, c}，
//! 第二个字母为带心类型 {P, C, I, F, R}。
//!
//! ## 依赖关系
//! - 被 `parsers/autoindex.rs`, `reindex/`, `selection/`, `cli/` 使用
//! - 无外部模块依赖

use crate::error::{MosmatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 带心类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Centring {
    /// 简单格子
    P,
    /// C 面心
    C,
    /// 体心
    I,
    /// 全面心
    F,
    /// 菱方（六方设定）
    R,
}

/// Bravais 格子符号
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum LatticeSymbol {
    #[serde(rename = "aP")]
    AP,
    #[serde(rename = "mP")]
    MP,
    #[serde(rename = "mC")]
    MC,
    #[serde(rename = "oP")]
    OP,
    #[serde(rename = "oC")]
    OC,
    #[serde(rename = "oF")]
    OF,
    #[serde(rename = "oI")]
    OI,
    #[serde(rename = "tP")]
    TP,
    #[serde(rename = "tI")]
    TI,
    #[serde(rename = "hP")]
    HP,
    #[serde(rename = "hR")]
    HR,
    #[serde(rename = "cP")]
    CP,
    #[serde(rename = "cF")]
    CF,
    #[serde(rename = "cI")]
    CI,
}

impl LatticeSymbol {
    /// 全部 14 种格子，按对称性由低到高排列
    pub const ALL: [LatticeSymbol; 14] = [
        LatticeSymbol::AP,
        LatticeSymbol::MP,
        LatticeSymbol::MC,
        LatticeSymbol::OP,
        LatticeSymbol::OC,
        LatticeSymbol::OF,
        LatticeSymbol::OI,
        LatticeSymbol::TP,
        LatticeSymbol::TI,
        LatticeSymbol::HP,
        LatticeSymbol::HR,
        LatticeSymbol::CP,
        LatticeSymbol::CF,
        LatticeSymbol::CI,
    ];

    /// 两字符符号
    pub fn as_str(&self) -> &'static str {
        match self {
            LatticeSymbol::AP => "aP",
            LatticeSymbol::MP => "mP",
            LatticeSymbol::MC => "mC",
            LatticeSymbol::OP => "oP",
            LatticeSymbol::OC => "oC",
            LatticeSymbol::OF => "oF",
            LatticeSymbol::OI => "oI",
            LatticeSymbol::TP => "tP",
            LatticeSymbol::TI => "tI",
            LatticeSymbol::HP => "hP",
            LatticeSymbol::HR => "hR",
            LatticeSymbol::CP => "cP",
            LatticeSymbol::CF => "cF",
            LatticeSymbol::CI => "cI",
        }
    }

    /// 该格子对称性最低的空间群编号
    pub fn spacegroup_number(&self) -> u32 {
        match self {
            LatticeSymbol::AP => 1,
            LatticeSymbol::MP => 3,
            LatticeSymbol::MC => 5,
            LatticeSymbol::OP => 16,
            LatticeSymbol::OC => 20,
            LatticeSymbol::OF => 22,
            LatticeSymbol::OI => 23,
            LatticeSymbol::TP => 75,
            LatticeSymbol::TI => 79,
            LatticeSymbol::HP => 143,
            LatticeSymbol::HR => 146,
            LatticeSymbol::CP => 195,
            LatticeSymbol::CF => 196,
            LatticeSymbol::CI => 197,
        }
    }

    /// `spacegroup_number` 的逆查找
    pub fn from_spacegroup_number(number: u32) -> Option<LatticeSymbol> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.spacegroup_number() == number)
    }

    /// 带心类型
    pub fn centring(&self) -> Centring {
        match self {
            LatticeSymbol::AP
            | LatticeSymbol::MP
            | LatticeSymbol::OP
            | LatticeSymbol::TP
            | LatticeSymbol::HP
            | LatticeSymbol::CP => Centring::P,
            LatticeSymbol::MC | LatticeSymbol::OC => Centring::C,
            LatticeSymbol::OI | LatticeSymbol::TI | LatticeSymbol::CI => Centring::I,
            LatticeSymbol::OF | LatticeSymbol::CF => Centring::F,
            LatticeSymbol::HR => Centring::R,
        }
    }

    /// 晶系字母
    pub fn crystal_system(&self) -> char {
        self.as_str().chars().next().unwrap_or('a')
    }
}

impl fmt::Display for LatticeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LatticeSymbol {
    type Err = MosmatError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| MosmatError::UnknownLattice(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for lattice in LatticeSymbol::ALL {
            let parsed: LatticeSymbol = lattice.as_str().parse().unwrap();
            assert_eq!(parsed, lattice);
        }
        assert!("xQ".parse::<LatticeSymbol>().is_err());
        assert!("mc".parse::<LatticeSymbol>().is_err());
    }

    #[test]
    fn test_spacegroup_table() {
        assert_eq!(LatticeSymbol::MC.spacegroup_number(), 5);
        assert_eq!(LatticeSymbol::HR.spacegroup_number(), 146);
        assert_eq!(LatticeSymbol::CI.spacegroup_number(), 197);
        assert_eq!(
            LatticeSymbol::from_spacegroup_number(79),
            Some(LatticeSymbol::TI)
        );
        assert_eq!(LatticeSymbol::from_spacegroup_number(4), None);
    }

    #[test]
    fn test_centring_and_system() {
        assert_eq!(LatticeSymbol::MC.centring(), Centring::C);
        assert_eq!(LatticeSymbol::CF.centring(), Centring::F);
        assert_eq!(LatticeSymbol::HR.centring(), Centring::R);
        assert_eq!(LatticeSymbol::TP.crystal_system(), 't');
    }
}
