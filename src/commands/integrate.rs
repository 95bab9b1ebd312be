//! # integrate 子命令实现
//!
//! 积分日志逐帧统计、状态字符串与积分分辨率极限。
//!
//! ## 功能
//! - 单文件：逐帧表格，可选导出 CSV
//! - 目录：收集匹配的日志并行处理（rayon），逐个报告分辨率极限
//!
//! ## 依赖关系
//! - 使用 `cli/integrate.rs` 定义的 IntegrateArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `mosmat::parsers::integration`, `mosmat::selection::resolution`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::integrate::IntegrateArgs;
use crate::utils::output;
use mosmat::config::IntegrationConfig;
use mosmat::error::{MosmatError, Result};
use mosmat::models::IntegrationStats;
use mosmat::parsers::parse_integration_file;
use mosmat::selection::{
    decide_integration_resolution_limit, status_string, worst_weighted_residual,
    RESOLUTION_NOT_REACHED,
};
use std::path::Path;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ImageRow {
    #[tabled(rename = "Image")]
    image: u32,
    #[tabled(rename = "Status")]
    status: char,
    #[tabled(rename = "Spots")]
    strong: String,
    #[tabled(rename = "Overloads")]
    overloads: String,
    #[tabled(rename = "Rejected")]
    rejected: String,
    #[tabled(rename = "Mosaic (°)")]
    mosaic: String,
    #[tabled(rename = "rmsd (px)")]
    rmsd: String,
    #[tabled(rename = "Resolution (Å)")]
    resolution: String,
}

/// 执行积分日志分析
pub fn execute(args: IntegrateArgs) -> Result<()> {
    if args.cutoff <= 0.0 {
        return Err(MosmatError::InvalidArgument(format!(
            "I/sigma cutoff must be positive, got {}",
            args.cutoff
        )));
    }

    output::print_header("Integration Log Analysis");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(MosmatError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &IntegrateArgs) -> Result<()> {
    let config = IntegrationConfig {
        isigma_cutoff: args.cutoff,
    };
    let stats = parse_integration_file(&args.input, &config)?;

    if stats.is_empty() {
        output::print_warning(&format!(
            "No processed images found in '{}'",
            args.input.display()
        ));
        return Ok(());
    }

    print_image_table(&stats);

    output::print_info(&format!("Status: {}", status_string(&stats)));
    if let Some(worst) = worst_weighted_residual(&stats) {
        output::print_info(&format!("Worst weighted residual: {:.3}", worst));
    }
    output::print_success(&format_limit(decide_integration_resolution_limit(&stats)));

    if let Some(ref path) = args.csv {
        save_stats_csv(&stats, path)?;
        output::print_success(&format!("Per-image statistics saved to '{}'", path.display()));
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &IntegrateArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(MosmatError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }
    output::print_info(&format!("Found {} log files", files.len()));

    if args.csv.is_some() {
        output::print_warning("--csv is ignored in batch mode");
    }

    let config = IntegrationConfig {
        isigma_cutoff: args.cutoff,
    };
    let runner = BatchRunner::new(args.jobs);
    let mut result = runner.run(files, |file| process_log(file, &config));

    result.reports.sort();
    for report in &result.reports {
        output::print_success(report);
    }

    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} logs, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理单个日志，返回一行报告
fn process_log(path: &Path, config: &IntegrationConfig) -> ProcessResult {
    let name = path.display().to_string();
    match parse_integration_file(path, config) {
        Ok(stats) if stats.is_empty() => ProcessResult::Skipped(name),
        Ok(stats) => ProcessResult::Success(format!(
            "{}: {} images [{}], {}",
            name,
            stats.len(),
            status_string(&stats),
            format_limit(decide_integration_resolution_limit(&stats))
        )),
        Err(e) => ProcessResult::Failed(name, e.to_string()),
    }
}

fn format_limit(limit: f64) -> String {
    if limit == RESOLUTION_NOT_REACHED {
        "Resolution limit: not reached".to_string()
    } else {
        format!("Resolution limit: {:.2} Å", limit)
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_image_table(stats: &IntegrationStats) {
    let rows: Vec<ImageRow> = stats
        .iter()
        .map(|(&image, s)| ImageRow {
            image,
            status: s.status().symbol(),
            strong: opt(s.strong),
            overloads: opt(s.overloads),
            rejected: opt(s.rejected),
            mosaic: opt(s.mosaic.map(|m| format!("{:.2}", m))),
            rmsd: opt(s.rmsd_pixel.map(|r| format!("{:.2}", r))),
            resolution: match s.resolution {
                Some(r) if r == RESOLUTION_NOT_REACHED => "n/r".to_string(),
                r => opt(r.map(|r| format!("{:.2}", r))),
            },
        })
        .collect();

    output::print_header(&format!("{} Images", rows.len()));
    println!("{}", Table::new(&rows));
}

/// 保存逐帧统计到 CSV
fn save_stats_csv(stats: &IntegrationStats, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "image",
        "status",
        "scale",
        "strong",
        "overloads",
        "rejected",
        "mosaic",
        "distance",
        "beam_x",
        "beam_y",
        "resolution",
        "rmsd_pixel",
        "rmsd_phi",
        "weighted_residual",
    ])?;

    let cell = |v: Option<f64>| v.map(|x| format!("{:.4}", x)).unwrap_or_default();
    let count = |v: Option<u32>| v.map(|x| x.to_string()).unwrap_or_default();

    for (image, s) in stats {
        wtr.write_record(&[
            image.to_string(),
            s.status().symbol().to_string(),
            format!("{:.4}", s.scale),
            count(s.strong),
            count(s.overloads),
            count(s.rejected),
            cell(s.mosaic),
            cell(s.distance),
            cell(s.beam.map(|b| b.0)),
            cell(s.beam.map(|b| b.1)),
            cell(s.resolution),
            cell(s.rmsd_pixel),
            cell(s.rmsd_phi),
            cell(s.weighted_residual),
        ])?;
    }

    wtr.flush().map_err(|e| MosmatError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
