//! # 3x3 矩阵运算
//!
//! 矩阵均为行优先扁平数组 `[m00, m01, m02, m10, ..., m22]`。
//!
//! ## 依赖关系
//! - 被 `math/metric.rs`, `reindex/engine.rs`, `frame.rs` 使用
//! - 使用 `math/vector.rs`

use super::vector::{cross, dot, scale};
use super::{Mat3, Vec3};
use crate::error::{MosmatError, Result};

/// 行列式绝对值低于此阈值视为奇异
const SINGULAR_EPS: f64 = 1e-12;

/// 单位矩阵
pub fn identity() -> Mat3 {
    [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
}

/// 转置：交换 (1,3), (2,6), (5,7)
pub fn transpose(m: &Mat3) -> Mat3 {
    [m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]]
}

/// 三个行向量
pub fn rows(m: &Mat3) -> [Vec3; 3] {
    [[m[0], m[1], m[2]], [m[3], m[4], m[5]], [m[6], m[7], m[8]]]
}

/// 三个列向量
pub fn columns(m: &Mat3) -> [Vec3; 3] {
    rows(&transpose(m))
}

/// 由三个行向量组装矩阵
pub fn from_rows(r: &[Vec3; 3]) -> Mat3 {
    [
        r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
    ]
}

/// 由三个列向量组装矩阵
pub fn from_columns(c: &[Vec3; 3]) -> Mat3 {
    transpose(&from_rows(c))
}

/// 行列式（三个行向量的混合积）
pub fn determinant(m: &Mat3) -> f64 {
    let [r0, r1, r2] = rows(m);
    dot(&r0, &cross(&r1, &r2))
}

/// 矩阵求逆
///
/// 取转置的行向量（即原矩阵的列向量）两两叉乘得到伴随矩阵，除以行列式后再转置回来。
/// 奇异矩阵是调用方的前置条件违例，返回 `SingularMatrix`。
pub fn invert(m: &Mat3) -> Result<Mat3> {
    let [c0, c1, c2] = rows(&transpose(m));
    let det = dot(&c0, &cross(&c1, &c2));

    if det.abs() < SINGULAR_EPS {
        return Err(MosmatError::SingularMatrix { det });
    }

    let scl = 1.0 / det;
    let adjugate = from_columns(&[
        scale(&cross(&c1, &c2), scl),
        scale(&cross(&c2, &c0), scl),
        scale(&cross(&c0, &c1), scl),
    ]);

    Ok(transpose(&adjugate))
}

/// 矩阵乘法 `A · B`
pub fn multiply(a: &Mat3, b: &Mat3) -> Mat3 {
    let a_rows = rows(a);
    let b_cols = columns(b);

    let mut result = [0.0; 9];
    for i in 0..3 {
        for j in 0..3 {
            result[i * 3 + j] = dot(&a_rows[i], &b_cols[j]);
        }
    }
    result
}

/// 矩阵乘向量 `M · v`
pub fn multiply_vec(m: &Mat3, v: &Vec3) -> Vec3 {
    let [r0, r1, r2] = rows(m);
    [dot(&r0, v), dot(&r1, v), dot(&r2, v)]
}

/// 绕 x 轴旋转 theta 度（右手系）
pub fn rotation_x(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();
    [1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c]
}

/// 绕 y 轴旋转 theta 度（右手系）
pub fn rotation_y(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();
    [c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c]
}

/// 绕 z 轴旋转 theta 度（右手系）
pub fn rotation_z(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();
    [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat_close(a: &Mat3, b: &Mat3, eps: f64) {
        for k in 0..9 {
            assert!(
                (a[k] - b[k]).abs() < eps,
                "element {}: {} vs {}",
                k,
                a[k],
                b[k]
            );
        }
    }

    fn assert_vec_close(a: &Vec3, b: &Vec3, eps: f64) {
        for k in 0..3 {
            assert!((a[k] - b[k]).abs() < eps, "{:?} vs {:?}", a, b);
        }
    }

    const M: Mat3 = [4.0, 7.0, 2.0, 3.0, 6.0, 1.0, 2.0, 5.0, 3.0];

    #[test]
    fn test_transpose_is_index_permutation() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(transpose(&m), [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(transpose(&transpose(&M)), M);
    }

    #[test]
    fn test_multiply_hand_computed() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let b = [9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

        assert_eq!(
            multiply(&a, &b),
            [30.0, 24.0, 18.0, 84.0, 69.0, 54.0, 138.0, 114.0, 90.0]
        );
        // 操作数顺序不可交换
        assert_eq!(
            multiply(&b, &a),
            [90.0, 114.0, 138.0, 54.0, 69.0, 84.0, 18.0, 24.0, 30.0]
        );
    }

    #[test]
    fn test_multiply_vec() {
        let swap = [0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        assert_eq!(multiply_vec(&swap, &[1.0, 2.0, 3.0]), [2.0, 1.0, 3.0]);

        let twice = [2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0];
        assert_eq!(multiply_vec(&twice, &[1.0, 2.0, 3.0]), [2.0, 4.0, 6.0]);

        let upper = [1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0];
        assert_eq!(multiply_vec(&upper, &[1.0, 1.0, 1.0]), [6.0, 5.0, 1.0]);
    }

    #[test]
    fn test_determinant() {
        assert!((determinant(&M) - 9.0).abs() < 1e-12);
        assert_eq!(determinant(&identity()), 1.0);
    }

    #[test]
    fn test_invert_round_trip() {
        let inv = invert(&M).unwrap();
        assert_mat_close(&multiply(&inv, &M), &identity(), 1e-12);
        assert_mat_close(&multiply(&M, &inv), &identity(), 1e-12);
        assert_mat_close(&invert(&inv).unwrap(), &M, 1e-12);
    }

    #[test]
    fn test_invert_known_values() {
        // det = 9, 伴随矩阵手算
        let inv = invert(&M).unwrap();
        let expected = [
            13.0 / 9.0,
            -11.0 / 9.0,
            -5.0 / 9.0,
            -7.0 / 9.0,
            8.0 / 9.0,
            2.0 / 9.0,
            3.0 / 9.0,
            -6.0 / 9.0,
            3.0 / 9.0,
        ];
        assert_mat_close(&inv, &expected, 1e-12);
    }

    #[test]
    fn test_invert_singular() {
        let singular = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0];
        let err = invert(&singular).unwrap_err();
        assert!(matches!(err, MosmatError::SingularMatrix { .. }));
    }

    #[test]
    fn test_rows_columns() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(rows(&m)[1], [4.0, 5.0, 6.0]);
        assert_eq!(columns(&m)[1], [2.0, 5.0, 8.0]);
        assert_eq!(from_rows(&rows(&m)), m);
        assert_eq!(from_columns(&columns(&m)), m);
    }

    #[test]
    fn test_rotations_right_handed() {
        let x = [1.0, 0.0, 0.0];
        let y = [0.0, 1.0, 0.0];
        let z = [0.0, 0.0, 1.0];

        assert_vec_close(&multiply_vec(&rotation_z(90.0), &x), &y, 1e-12);
        assert_vec_close(&multiply_vec(&rotation_x(90.0), &y), &z, 1e-12);
        assert_vec_close(&multiply_vec(&rotation_y(90.0), &z), &x, 1e-12);
    }

    #[test]
    fn test_rotation_is_orthogonal() {
        let r = multiply(&rotation_z(-18.467), &multiply(&rotation_y(-3.227), &rotation_x(-55.432)));
        assert_mat_close(&multiply(&r, &transpose(&r)), &identity(), 1e-12);
        assert!((determinant(&r) - 1.0).abs() < 1e-12);
    }
}
