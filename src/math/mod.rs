//! # 向量 / 矩阵代数模块
//!
//! 3x3 矩阵以行优先的 9 元素扁平数组表示，与 Mosflm 矩阵文件的数值顺序一致。
//!
//! ## 子模块
//! - `vector`: 三维向量运算（点积、叉积、缩放）
//! - `matrix`: 3x3 矩阵运算（转置、行列式、求逆、乘法、旋转矩阵）
//! - `metric`: 由晶胞参数构造 B 矩阵，以及由实空间轴反求晶胞
//!
//! ## 依赖关系
//! - 被 `models/`, `reindex/`, `frame.rs` 使用
//! - 使用 `error.rs`

pub mod matrix;
pub mod metric;
pub mod vector;

/// 三维向量
pub type Vec3 = [f64; 3];

/// 行优先存储的 3x3 矩阵
pub type Mat3 = [f64; 9];

pub use matrix::{
    columns, determinant, from_columns, from_rows, identity, invert, multiply, multiply_vec,
    rotation_x, rotation_y, rotation_z, rows, transpose,
};
pub use metric::{cell_from_b_matrix, cell_from_real_axes, metric_matrix, real_axes};
pub use vector::{cross, dot, length, scale};
