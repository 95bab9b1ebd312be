//! # axes 子命令实现
//!
//! 打印原始设定下实空间与倒易空间轴落在探测器平面内所需的旋转角。
//!
//! ## 依赖关系
//! - 使用 `cli/matrix.rs` 定义的 AxesArgs
//! - 使用 `mosmat::reindex::Reindexer`

use super::read_text;
use crate::cli::matrix::AxesArgs;
use crate::utils::output;
use mosmat::error::Result;
use mosmat::reindex::Reindexer;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct AngleRow {
    #[tabled(rename = "Axis")]
    axis: &'static str,
    #[tabled(rename = "Real space (°)")]
    real: String,
    #[tabled(rename = "Reciprocal space (°)")]
    reciprocal: String,
}

/// 执行探测器平面角计算
pub fn execute(args: AxesArgs) -> Result<()> {
    let text = read_text(&args.matrix)?;

    let reindexer = Reindexer::new();
    let real = reindexer.find_primitive_axes(args.lattice, &text)?;
    let reciprocal = reindexer.find_primitive_reciprocal_axes(args.lattice, &text)?;

    output::print_header(&format!(
        "Primitive Axes in the Detector Plane ({})",
        args.lattice
    ));

    let rows: Vec<AngleRow> = ["a", "b", "c"]
        .into_iter()
        .zip(real.iter().zip(reciprocal.iter()))
        .map(|(axis, (r, q))| AngleRow {
            axis,
            real: format!("{:.3}", r),
            reciprocal: format!("{:.3}", q),
        })
        .collect();

    println!("{}", Table::new(&rows));
    Ok(())
}
