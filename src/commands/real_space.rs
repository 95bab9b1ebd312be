//! # real-space 子命令实现
//!
//! 打印标准参考系下的实空间原始轴 (Å) 及其长度。
//!
//! ## 依赖关系
//! - 使用 `cli/matrix.rs` 定义的 RealSpaceArgs
//! - 使用 `mosmat::frame::FrameConverter`

use super::read_text;
use crate::cli::matrix::RealSpaceArgs;
use crate::utils::output;
use mosmat::error::Result;
use mosmat::frame::FrameConverter;
use mosmat::math::length;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct AxisRow {
    #[tabled(rename = "Axis")]
    axis: &'static str,
    #[tabled(rename = "x (Å)")]
    x: String,
    #[tabled(rename = "y (Å)")]
    y: String,
    #[tabled(rename = "z (Å)")]
    z: String,
    #[tabled(rename = "|v| (Å)")]
    length: String,
}

/// 执行实空间轴转换
pub fn execute(args: RealSpaceArgs) -> Result<()> {
    let text = read_text(&args.matrix)?;
    let axes = FrameConverter::new().to_real_space(args.wavelength, args.lattice, &text)?;

    output::print_header(&format!("Primitive Real-Space Axes ({})", args.lattice));
    output::print_info(&format!("Wavelength: {:.5} Å", args.wavelength));

    let rows: Vec<AxisRow> = ["a", "b", "c"]
        .into_iter()
        .zip(axes.iter())
        .map(|(axis, v)| AxisRow {
            axis,
            x: format!("{:.4}", v[0]),
            y: format!("{:.4}", v[1]),
            z: format!("{:.4}", v[2]),
            length: format!("{:.4}", length(v)),
        })
        .collect();

    println!("{}", Table::new(&rows));
    Ok(())
}
