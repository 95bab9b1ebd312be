//! # 数据模型模块
//!
//! 定义晶胞、格子符号、自动指标化解以及积分统计等值类型。
//! 所有类型都是函数作用域内的临时值，不缓存、不持久化。
//!
//! ## 依赖关系
//! - 被 `math/`, `parsers/`, `reindex/`, `selection/` 和 `commands/` 使用
//! - 子模块: cell, lattice, solution, integration

pub mod cell;
pub mod integration;
pub mod lattice;
pub mod setting;
pub mod solution;

pub use cell::UnitCell;
pub use integration::{ImageStats, ImageStatus, IntegrationStats};
pub use lattice::{Centring, LatticeSymbol};
pub use setting::CellSetting;
pub use solution::{IndexingSolution, LatticeCandidate, SolutionRow};
