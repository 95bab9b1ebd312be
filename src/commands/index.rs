//! # index 子命令实现
//!
//! 1. 解析自动指标化日志，打印全部候选解（含未精修解）
//! 2. 按格子选出可接受的最佳解
//! 3. 可选：按目标晶胞查找最接近的解编号
//!
//! ## 依赖关系
//! - 使用 `cli/index.rs` 定义的 IndexArgs
//! - 使用 `mosmat::parsers::autoindex`, `mosmat::selection`

use super::read_text;
use crate::cli::index::IndexArgs;
use crate::utils::output;
use mosmat::config::SelectionConfig;
use mosmat::error::Result;
use mosmat::models::SolutionRow;
use mosmat::parsers::parse_autoindex_output;
use mosmat::selection::{nearest_solution, select_solutions};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SolutionTableRow {
    #[tabled(rename = "No")]
    number: u32,
    #[tabled(rename = "Lattice")]
    lattice: String,
    #[tabled(rename = "Penalty")]
    penalty: String,
    #[tabled(rename = "rms")]
    rms: String,
    #[tabled(rename = "Adjusted rms")]
    adjusted: String,
    #[tabled(rename = "Cell")]
    cell: String,
    #[tabled(rename = "Refined")]
    refined: &'static str,
}

#[derive(Tabled)]
struct SelectionRow {
    #[tabled(rename = "Lattice")]
    lattice: String,
    #[tabled(rename = "No")]
    number: u32,
    #[tabled(rename = "Adjusted rms")]
    rms: String,
    #[tabled(rename = "Cell")]
    cell: String,
}

/// 执行自动指标化解选择
pub fn execute(args: IndexArgs) -> Result<()> {
    let text = read_text(&args.log)?;
    let lines: Vec<&str> = text.lines().collect();
    let parsed = parse_autoindex_output(&lines);

    let config = SelectionConfig {
        penalty_weight: args.penalty_weight,
        rms_tolerance: args.rms_tolerance,
    };

    output::print_header("Autoindexing Solutions");
    if parsed.rows.is_empty() {
        output::print_warning("No solution table found in the log");
    } else {
        print_solution_table(&parsed.rows, config.penalty_weight);
    }

    let selected = select_solutions(&parsed, &config)?;
    if let Some(chosen) = parsed.chosen {
        output::print_info(&format!("Chosen solution: {}", chosen));
    }

    output::print_header("Best Solution per Lattice");
    let rows: Vec<SelectionRow> = selected
        .values()
        .map(|c| SelectionRow {
            lattice: c.lattice.to_string(),
            number: c.number,
            rms: format!("{:.4}", c.rms),
            cell: c.cell.to_string(),
        })
        .collect();
    println!("{}", Table::new(&rows));
    output::print_success(&format!("{} lattices acceptable", rows.len()));

    if let (Some(cell), Some(lattice)) = (args.target_cell, args.target_lattice) {
        match nearest_solution(&parsed.solutions, &cell, lattice) {
            Some(number) => output::print_success(&format!(
                "Nearest {} solution to {}: {}",
                lattice, cell, number
            )),
            None => output::print_warning(&format!("No {} solution in the log", lattice)),
        }
    }

    Ok(())
}

fn print_solution_table(rows: &[SolutionRow], penalty_weight: f64) {
    let table_rows: Vec<SolutionTableRow> = rows
        .iter()
        .map(|row| {
            let s = &row.solution;
            SolutionTableRow {
                number: s.number,
                lattice: s.lattice.clone(),
                penalty: format!("{:.0}", s.penalty),
                rms: format!("{:.4}", s.rms),
                adjusted: format!("{:.4}", s.adjusted_rms(penalty_weight)),
                cell: s.cell.to_string(),
                refined: if row.refined { "yes" } else { "no" },
            }
        })
        .collect();

    println!("{}", Table::new(&table_rows));
}
