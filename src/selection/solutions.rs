//! # 自动指标化解选择
//!
//! 1. 对每个已精修解计算 `adjusted_rms = rms + 0.005 × penalty`
//! 2. 以程序选中解的 `1.1 × adjusted_rms` 作为可接受 rms
//! 3. 按格子分组，每组保留 adjusted_rms 最低者
//! 4. 只返回 rms 低于阈值且属于 14 种标准格子的结果
//!
//! 另提供按目标晶胞查找最接近解编号的功能。
//!
//! ## 依赖关系
//! - 被 `commands/index.rs` 使用
//! - 使用 `parsers/autoindex.rs`, `models/solution.rs`, `config.rs`

use crate::config::SelectionConfig;
use crate::error::{MosmatError, Result};
use crate::models::{IndexingSolution, LatticeCandidate, LatticeSymbol, UnitCell};
use crate::parsers::AutoindexOutput;
use std::collections::BTreeMap;
use tracing::debug;

/// 为每种格子选出可接受的最佳候选
pub fn select_solutions(
    output: &AutoindexOutput,
    config: &SelectionConfig,
) -> Result<BTreeMap<LatticeSymbol, LatticeCandidate>> {
    let chosen = output.chosen.ok_or(MosmatError::NoChosenSolution)?;

    let acceptable_rms = output
        .solution(chosen)
        .map(|s| config.rms_tolerance * s.adjusted_rms(config.penalty_weight))
        .ok_or(MosmatError::ChosenSolutionUnusable { number: chosen })?;

    debug!(
        "solution {} chosen, acceptable rms {:.4}",
        chosen, acceptable_rms
    );

    let best = best_per_lattice(&output.solutions, config.penalty_weight);

    let mut results = BTreeMap::new();
    for (lattice, (solution, rms)) in best {
        if rms >= acceptable_rms {
            continue;
        }
        match solution.lattice_symbol() {
            Some(symbol) => {
                results.insert(
                    symbol,
                    LatticeCandidate {
                        number: solution.number,
                        lattice: symbol,
                        cell: solution.cell,
                        rms,
                        frc: solution.frc,
                    },
                );
            }
            None => debug!("excluding non-standard lattice setting {}", lattice),
        }
    }

    Ok(results)
}

/// 按格子分组，保留 adjusted_rms 最低的解（相同时保留先出现者）
fn best_per_lattice(
    solutions: &[IndexingSolution],
    penalty_weight: f64,
) -> BTreeMap<&str, (&IndexingSolution, f64)> {
    solutions
        .iter()
        .fold(BTreeMap::new(), |mut best, solution| {
            let rms = solution.adjusted_rms(penalty_weight);
            let keep_existing = best
                .get(solution.lattice.as_str())
                .is_some_and(|(_, existing): &(&IndexingSolution, f64)| *existing <= rms);
            if !keep_existing {
                best.insert(solution.lattice.as_str(), (solution, rms));
            }
            best
        })
}

/// 在指定格子的全部解中找晶胞最接近目标的解编号
///
/// 打分为六个参数绝对差之和，相同分数取扫描顺序中先出现者；
/// 没有该格子的解时返回 `None`。
pub fn nearest_solution(
    solutions: &[IndexingSolution],
    target_cell: &UnitCell,
    target_lattice: LatticeSymbol,
) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;

    for solution in solutions
        .iter()
        .filter(|s| s.lattice == target_lattice.as_str())
    {
        let score = solution.cell.difference(target_cell);
        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((solution.number, score));
        }
    }

    best.map(|(number, _)| number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::autoindex::parse_autoindex_output;
    use crate::parsers::autoindex::tests::TETRAGONAL_LOG;

    fn parse(text: &str) -> AutoindexOutput {
        let lines: Vec<&str> = text.lines().collect();
        parse_autoindex_output(&lines)
    }

    #[test]
    fn test_select_lower_rms_tp_and_reject_ti() {
        let results = select_solutions(&parse(TETRAGONAL_LOG), &SelectionConfig::default()).unwrap();

        let tp = &results[&LatticeSymbol::TP];
        assert_eq!(tp.number, 9);
        assert!((tp.rms - 0.042).abs() < 1e-12);

        // tI: 0.080 + 0.005 × 2 = 0.090 > 1.1 × 0.042
        assert!(!results.contains_key(&LatticeSymbol::TI));

        // aP: 0.041 < 0.0462
        assert_eq!(results[&LatticeSymbol::AP].number, 1);
    }

    #[test]
    fn test_penalty_adjusts_rms() {
        // 选中 8 号解：可接受 rms = 1.1 × (0.058 + 0.005) = 0.0693
        let log = TETRAGONAL_LOG.replace("chosen solution  9", "chosen solution  8");
        let results = select_solutions(&parse(&log), &SelectionConfig::default()).unwrap();

        // tP 仍取分组内最低的 9 号解
        assert_eq!(results[&LatticeSymbol::TP].number, 9);
        assert!(!results.contains_key(&LatticeSymbol::TI));

        let loose = SelectionConfig {
            penalty_weight: 0.0,
            rms_tolerance: 1.5,
        };
        let results = select_solutions(&parse(&log), &loose).unwrap();
        // 1.5 × 0.058 = 0.087 > 0.080
        assert_eq!(results[&LatticeSymbol::TI].number, 7);
    }

    #[test]
    fn test_no_chosen_solution_error() {
        let log = TETRAGONAL_LOG.replace("Mosflm has chosen solution  9 (tP, penalty 0)", "");
        let err = select_solutions(&parse(&log), &SelectionConfig::default()).unwrap_err();
        assert!(matches!(err, MosmatError::NoChosenSolution));
    }

    #[test]
    fn test_chosen_solution_unrefined_error() {
        let log = TETRAGONAL_LOG.replace("P4,P41,P42,P43", "unrefined");
        let err = select_solutions(&parse(&log), &SelectionConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            MosmatError::ChosenSolutionUnusable { number: 9 }
        ));
    }

    #[test]
    fn test_non_standard_lattice_excluded() {
        let log = TETRAGONAL_LOG.replace("   aP   78.64", "   xX   78.64");
        let results = select_solutions(&parse(&log), &SelectionConfig::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.contains_key(&LatticeSymbol::TP));
    }

    #[test]
    fn test_nearest_solution() {
        let output = parse(TETRAGONAL_LOG);

        let target = UnitCell::new(78.7, 78.6, 78.7, 90.0, 90.0, 90.0).unwrap();
        assert_eq!(
            nearest_solution(&output.solutions, &target, LatticeSymbol::TP),
            Some(8)
        );

        let target = UnitCell::new(78.66, 78.66, 78.72, 90.0, 90.0, 90.0).unwrap();
        assert_eq!(
            nearest_solution(&output.solutions, &target, LatticeSymbol::TP),
            Some(9)
        );

        assert_eq!(
            nearest_solution(&output.solutions, &target, LatticeSymbol::CF),
            None
        );
    }

    #[test]
    fn test_nearest_solution_tie_keeps_first() {
        let log = r#"
 No PENALTY SDCELL FRACN LATT      a        b        c     alpha  beta  gamma
  4      0    0.041   0.000   tP   80.00    80.00    80.00   90.0   90.0   90.0
  6      0    0.041   0.000   tP   80.00    80.00    80.00   90.0   90.0   90.0
 No PENALTY SDCELL FRACN LATT      a        b        c     alpha  beta  gamma
"#;
        let output = parse(log);
        let target = UnitCell::new(79.0, 79.0, 79.0, 90.0, 90.0, 90.0).unwrap();
        assert_eq!(
            nearest_solution(&output.solutions, &target, LatticeSymbol::TP),
            Some(4)
        );
    }
}
