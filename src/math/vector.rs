//! # 三维向量运算
//!
//! ## 依赖关系
//! - 被 `math/matrix.rs`, `math/metric.rs`, `reindex/engine.rs` 使用

use super::Vec3;

/// 点积
pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// 叉积 a × b
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// 逐元素缩放，向量和扁平矩阵通用
pub fn scale<const N: usize>(x: &[f64; N], s: f64) -> [f64; N] {
    let mut out = *x;
    for v in out.iter_mut() {
        *v *= s;
    }
    out
}

/// 向量长度
pub fn length(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}
