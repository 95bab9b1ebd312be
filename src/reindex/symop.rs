//! # 重新指标化算符解析
//!
//! 将 `1/2h+1/2k,-1/2h+1/2k,l` 之类的表达式解析为 3x3 矩阵，
//! 第 i 行为新的第 i 个指标关于旧指标 (h, k, l) 的系数。
//!
//! ## 语法
//! - 三个分量以逗号分隔
//! - 每个分量是若干项之和：`[+|-][系数][*]字母`
//! - 系数可以是整数、小数或分数（`2`, `0.5`, `1/3`）
//! - 字母 `h k l`、`x y z`、`a b c` 互为别名，不区分大小写
//! - 不含字母的平移项不允许出现
//!
//! ## 依赖关系
//! - 被 `reindex/settings.rs`, `reindex/engine.rs` 使用
//! - 使用 `math/`

use crate::error::{MosmatError, Result};
use crate::math::Mat3;
use regex::Regex;
use std::sync::OnceLock;

/// 把算符表达式解析为矩阵的能力
pub trait SymopResolver {
    fn resolve(&self, op: &str) -> Result<Mat3>;
}

/// 内置的线性算符解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct SymopParser;

impl SymopResolver for SymopParser {
    fn resolve(&self, op: &str) -> Result<Mat3> {
        let components: Vec<&str> = op.split(',').collect();
        if components.len() != 3 {
            return Err(invalid(
                op,
                format!("expected 3 comma-separated components, got {}", components.len()),
            ));
        }

        let mut m = [0.0; 9];
        for (i, component) in components.iter().enumerate() {
            let row = parse_component(component).map_err(|reason| invalid(op, reason))?;
            m[3 * i..3 * i + 3].copy_from_slice(&row);
        }
        Ok(m)
    }
}

fn term_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-]?)(\d+(?:\.\d+)?(?:/\d+)?)?\*?([hklxyzabcHKLXYZABC])$")
            .expect("valid term regex")
    })
}

/// 解析一个分量，返回 (h, k, l) 系数
fn parse_component(component: &str) -> std::result::Result<[f64; 3], String> {
    let compact: String = component.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err("empty component".to_string());
    }

    let mut row = [0.0; 3];
    for term in split_terms(&compact) {
        let caps = match term_regex().captures(term) {
            Some(caps) => caps,
            None if parse_coefficient(term.trim_start_matches('+')).is_some() => {
                return Err(format!("translation term '{}' is not allowed", term));
            }
            None => return Err(format!("cannot read term '{}'", term)),
        };

        let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
        let coefficient = match caps.get(2) {
            Some(c) => parse_coefficient(c.as_str())
                .ok_or_else(|| format!("bad coefficient '{}'", c.as_str()))?,
            None => 1.0,
        };
        let axis = match caps[3].to_ascii_lowercase().as_str() {
            "h" | "x" | "a" => 0,
            "k" | "y" | "b" => 1,
            _ => 2,
        };
        row[axis] += sign * coefficient;
    }

    Ok(row)
}

/// 在每个非首位的正负号处切分
fn split_terms(s: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if i > start && (c == '+' || c == '-') {
            terms.push(&s[start..i]);
            start = i;
        }
    }
    terms.push(&s[start..]);
    terms
}

fn parse_coefficient(s: &str) -> Option<f64> {
    let value = match s.split_once('/') {
        Some((num, den)) => {
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num.parse::<f64>().ok()? / den
        }
        None => s.parse().ok()?,
    };
    value.is_finite().then_some(value)
}

fn invalid(op: &str, reason: String) -> MosmatError {
    MosmatError::InvalidSymop {
        op: op.to_string(),
        reason,
    }
}

/// 把矩阵写回算符表达式，系数以最简分数表示（分母不超过 12）
pub fn format_operator(m: &Mat3) -> String {
    (0..3)
        .map(|i| {
            let mut component = String::new();
            for (j, letter) in ['h', 'k', 'l'].iter().enumerate() {
                let value = m[3 * i + j];
                if value.abs() < 1e-9 {
                    continue;
                }
                let sign = if value < 0.0 { "-" } else if component.is_empty() { "" } else { "+" };
                component.push_str(sign);
                let magnitude = fraction(value.abs());
                if magnitude != "1" {
                    component.push_str(&magnitude);
                }
                component.push(*letter);
            }
            if component.is_empty() {
                component.push('0');
            }
            component
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn fraction(x: f64) -> String {
    for den in 1..=12u32 {
        let num = x * den as f64;
        if (num - num.round()).abs() < 1e-6 {
            let num = num.round() as i64;
            return if den == 1 {
                num.to_string()
            } else {
                format!("{}/{}", num, den)
            };
        }
    }
    format!("{:.6}", x)
}
