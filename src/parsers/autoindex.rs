//! # 自动指标化输出解析器
//!
//! 单遍扫描 Mosflm 自动指标化日志，得到不可变的候选解列表和被选中的解编号。
//!
//! ## 状态机
//! - `No PENALTY SDCELL` 表头行在“扫描”与“收集”两种状态间切换
//! - 收集状态下，以整数开头的行视为候选解；其余行（表头、脚注）静默跳过
//! - 被选中的解编号由三种标记之一给出，后出现的覆盖先出现的
//!
//! ## 候选解行格式
//! ```text
//!  No PENALTY SDCELL FRACN LATT      a        b        c    alpha   beta  gamma
//!   9      0    0.042   0.000   tP   78.66    78.66   78.72  90.0   90.0   90.0  P4,P41
//! ```
//!
//! ## 依赖关系
//! - 被 `selection/solutions.rs`, `commands/index.rs` 使用
//! - 使用 `models/solution.rs`

use crate::error::{MosmatError, Result};
use crate::models::{IndexingSolution, SolutionRow, UnitCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 切换收集状态的表头标记
const TABLE_MARKER: &str = "No PENALTY SDCELL";

/// 未精修解的标记
const UNREFINED_MARKER: &str = "unrefined";

/// 一次自动指标化运行的解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoindexOutput {
    /// 已精修的候选解，按编号升序
    pub solutions: Vec<IndexingSolution>,
    /// 标记为 unrefined 而被排除的解编号
    pub unrefined: Vec<u32>,
    /// 程序选中的解编号
    pub chosen: Option<u32>,
    /// 表中所有可解析的行（含未精修解），按编号升序，供列表显示
    pub rows: Vec<SolutionRow>,
}

impl AutoindexOutput {
    /// 按编号查找候选解
    pub fn solution(&self, number: u32) -> Option<&IndexingSolution> {
        self.solutions.iter().find(|s| s.number == number)
    }
}

/// 读取并解析自动指标化日志文件
pub fn parse_autoindex_file(path: &Path) -> Result<AutoindexOutput> {
    let content = fs::read_to_string(path).map_err(|e| MosmatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let lines: Vec<&str> = content.lines().collect();
    Ok(parse_autoindex_output(&lines))
}

/// 解析自动指标化日志行
pub fn parse_autoindex_output<S: AsRef<str>>(lines: &[S]) -> AutoindexOutput {
    let mut collecting = false;
    let mut chosen: Option<u32> = None;

    // 同一编号出现多次时保留最后一行
    let mut raw: BTreeMap<u32, &str> = BTreeMap::new();

    for line in lines {
        let line = line.as_ref();

        if line.contains(TABLE_MARKER) {
            collecting = !collecting;
        }

        if collecting {
            if let Some(number) = line
                .split_whitespace()
                .next()
                .and_then(|t| t.parse::<u32>().ok())
            {
                raw.insert(number, line);
            }
        }

        if let Some(number) = chosen_solution_marker(line) {
            debug!("autoindexing output selects solution {}", number);
            chosen = Some(number);
        }
    }

    let mut solutions = Vec::new();
    let mut unrefined = Vec::new();
    let mut rows = Vec::new();

    for (number, line) in raw {
        let refined = !line.contains(UNREFINED_MARKER);
        if !refined {
            unrefined.push(number);
        }
        match parse_solution_line(line) {
            Some(solution) => {
                if refined {
                    solutions.push(solution.clone());
                }
                rows.push(SolutionRow { solution, refined });
            }
            None => debug!("skipping malformed solution line: {}", line.trim()),
        }
    }

    AutoindexOutput {
        solutions,
        unrefined,
        chosen,
        rows,
    }
}

/// 完整的候选解表（含未精修解），用于显示
pub fn parse_autoindex_solutions<S: AsRef<str>>(lines: &[S]) -> Vec<SolutionRow> {
    parse_autoindex_output(lines).rows
}

/// 识别三种“已选中解”的标记行，返回解编号
fn chosen_solution_marker(line: &str) -> Option<u32> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut number = None;

    if line.contains("Suggested Solution") {
        number = tokens.get(2).and_then(|t| t.parse().ok()).or(number);
    }
    if line.contains("Mosflm has chosen solution") {
        number = tokens.get(4).and_then(|t| t.parse().ok()).or(number);
    }
    if line.contains("Solution") && line.contains("has been chosen from the list") {
        number = tokens.get(1).and_then(|t| t.parse().ok()).or(number);
    }

    number
}

/// 解析一行候选解：编号 罚分 rms frc 格子 a b c α β γ ...
fn parse_solution_line(line: &str) -> Option<IndexingSolution> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 11 {
        return None;
    }

    let cell: Vec<f64> = tokens[5..11]
        .iter()
        .map(|t| t.parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    Some(IndexingSolution {
        number: tokens[0].parse().ok()?,
        penalty: tokens[1].parse().ok()?,
        rms: tokens[2].parse().ok()?,
        frc: tokens[3].parse().ok()?,
        lattice: tokens[4].to_string(),
        cell: UnitCell::from_slice(&cell).ok()?,
    })
}
