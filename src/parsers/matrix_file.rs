//! # Mosflm 取向矩阵文件解析器
//!
//! ## 格式说明
//! ```text
//!  a11 a12 a13        # A 矩阵（含波长缩放）
//!  a21 a22 a23
//!  a31 a32 a33
//!  mx  my  mz         # 误取向角（不读取）
//!  u11 u12 u13        # U 矩阵
//!  u21 u22 u23
//!  u31 u32 u33
//!  a b c alpha beta gamma
//!  mx  my  mz         # 误取向角（不读取）
//! ```
//!
//! 固定宽度输出在负数较大时会与前一列粘连（如 `-0.00417059-0.00089426`），
//! 因此分词前在每个前面不是空白的负号前补一个空格。
//!
//! ## 依赖关系
//! - 被 `reindex/engine.rs`, `frame.rs`, `commands/` 使用
//! - 使用 `models/cell.rs`

use crate::error::{MosmatError, Result};
use crate::math::Mat3;
use crate::models::UnitCell;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// 误取向角行，在 U 矩阵前和晶胞后各输出一次
const MISSET_LINE: &str = "       0.000       0.000       0.000\n";

/// 最少需要的数值个数：A(9) + 误取向(3) + U(9) + 晶胞(6)
const MIN_TOKENS: usize = 27;

/// 解析后的取向矩阵文件
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationMatrix {
    pub cell: UnitCell,
    /// A 矩阵（行优先）
    pub a: Mat3,
    /// U 矩阵（行优先）
    pub u: Mat3,
}

impl OrientationMatrix {
    /// 重新格式化为矩阵文件文本
    pub fn to_text(&self) -> String {
        format_matrix(&self.cell, &self.a, &self.u)
    }
}

/// 读取并解析矩阵文件
pub fn parse_matrix_file(path: &Path) -> Result<OrientationMatrix> {
    let content = fs::read_to_string(path).map_err(|e| MosmatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_matrix(&content)
}

/// 从文本解析 (cell, A, U)
pub fn parse_matrix(text: &str) -> Result<OrientationMatrix> {
    let separated = separate_merged_negatives(text);

    let tokens = separated
        .split_whitespace()
        .map(|t| {
            t.parse::<f64>().map_err(|_| MosmatError::ParseError {
                format: "matrix".to_string(),
                reason: format!("non-numeric token '{}'", t),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if tokens.len() < MIN_TOKENS {
        return Err(MosmatError::ParseError {
            format: "matrix".to_string(),
            reason: format!(
                "expected at least {} numbers, found {}",
                MIN_TOKENS,
                tokens.len()
            ),
        });
    }

    Ok(OrientationMatrix {
        cell: UnitCell::from_slice(&tokens[21..27])?,
        a: to_mat3(&tokens[0..9]),
        u: to_mat3(&tokens[12..21]),
    })
}

/// 按固定宽度格式输出矩阵文件
pub fn format_matrix(cell: &UnitCell, a: &Mat3, u: &Mat3) -> String {
    let mut result = String::new();

    push_matrix(&mut result, a);
    result.push_str(MISSET_LINE);
    push_matrix(&mut result, u);

    for value in cell.as_array() {
        result.push_str(&format!(" {:11.4}", value));
    }
    result.push('\n');
    result.push_str(MISSET_LINE);

    result
}

/// 在粘连的负号前插入空格（指数记号中的负号除外）
fn separate_merged_negatives(text: &str) -> String {
    static MERGED: OnceLock<Regex> = OnceLock::new();
    let pattern =
        MERGED.get_or_init(|| Regex::new(r"([^\seE])-").expect("valid merged-negative regex"));
    pattern.replace_all(text, "$1 -").into_owned()
}

fn push_matrix(out: &mut String, m: &Mat3) {
    for row in m.chunks(3) {
        out.push_str(&format!(" {:11.8} {:11.8} {:11.8}\n", row[0], row[1], row[2]));
    }
}

fn to_mat3(values: &[f64]) -> Mat3 {
    let mut m = [0.0; 9];
    m.copy_from_slice(&values[..9]);
    m
}
