//! # Mosflm 积分日志解析器
//!
//! 逐行扫描积分日志，构建“图像编号 -> 统计记录”映射。
//!
//! ## 识别的标记
//! - `Pixel size of` / `Pixel size in the`：像素尺寸 (mm)，用于把残差换算为像素
//! - `Processing Image N` / `Integrating Image N`：切换当前图像
//! - `XCEN    YCEN  XTOFRA   XTOFD`：下一行给出光束中心与距离
//! - `Smoothed value for refined mosaic spread`：镶嵌度
//! - `Final rms residual:`：位置残差与加权残差
//! - `Real cell parameters`：下一行给出精修晶胞
//! - `Spots measured on this image` / `are OVERLOADS` / `Number of bad spots`：计数
//! - `Analysis as a function of resolution.`（其前第三行含 `Maximum Intensity`）：
//!   多行分辨率分层 I/σ 表，据此估计该帧的分辨率极限
//!
//! 出现在第一个图像标记之前的统计信息被丢弃。
//!
//! ## 依赖关系
//! - 被 `commands/integrate.rs` 使用
//! - 使用 `models/integration.rs`, `selection/resolution.rs`

use crate::config::IntegrationConfig;
use crate::error::{MosmatError, Result};
use crate::models::{ImageStats, IntegrationStats};
use crate::selection::resolution::resolution_estimate;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 读取并解析积分日志文件
pub fn parse_integration_file(path: &Path, config: &IntegrationConfig) -> Result<IntegrationStats> {
    let content = fs::read_to_string(path).map_err(|e| MosmatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let lines: Vec<&str> = content.lines().collect();
    Ok(parse_integration_output(&lines, config))
}

/// 解析积分日志行
pub fn parse_integration_output<S: AsRef<str>>(
    lines: &[S],
    config: &IntegrationConfig,
) -> IntegrationStats {
    let line_at = |i: usize| lines.get(i).map(|l| l.as_ref());

    let mut stats = IntegrationStats::new();
    let mut current_image: u32 = 0;
    let mut pixel_size: f64 = 0.0;

    for (i, line) in lines.iter().enumerate() {
        let record = line.as_ref();

        if record.contains("Pixel size of") {
            if let Some(v) = nth_number(&record.replace("mm", " "), 3) {
                pixel_size = v;
            }
        }

        if record.contains("Pixel size in the") {
            if let Some(v) = last_number(&record.replace("mm", " ")) {
                pixel_size = v;
            }
        }

        if record.contains("Processing Image") || record.contains("Integrating Image") {
            match nth_number::<u32>(record, 2) {
                Some(image) => {
                    current_image = image;
                    stats.entry(image).or_insert_with(ImageStats::default);
                }
                None => debug!("unreadable image marker: {}", record.trim()),
            }
        }

        let image = stats.entry(current_image).or_insert_with(ImageStats::default);

        if record.contains("XCEN    YCEN  XTOFRA   XTOFD") {
            if let Some(data) = line_at(i + 1).and_then(parse_floats) {
                if data.len() >= 4 {
                    image.beam = Some((data[0], data[1]));
                    image.distance = Some(data[3]);
                }
            }
        }

        if record.contains("Smoothed value for refined mosaic spread") {
            if let Some(v) = last_number(record) {
                image.mosaic = Some(v);
            }
        }

        if record.contains("Final rms residual:") {
            match nth_number::<f64>(&record.replace("mm", " "), 3) {
                Some(residual) if pixel_size > 0.0 => {
                    image.rmsd_pixel = Some(residual / pixel_size);
                    image.rmsd_phi = Some(0.0);
                }
                Some(_) => debug!("rms residual seen before pixel size, not converted"),
                None => {}
            }
            if let Some(v) = last_number(record) {
                image.weighted_residual = Some(v);
            }
        }

        if record.contains("Real cell parameters") {
            if let Some(data) = line_at(i + 1).and_then(parse_floats) {
                if data.len() >= 6 {
                    image.cell = Some([data[0], data[1], data[2], data[3], data[4], data[5]]);
                }
            }
        }

        if record.contains("Spots measured on this image") {
            if let Some(v) = nth_number(record, 0) {
                image.strong = Some(v);
            }
        }

        if record.contains("are OVERLOADS") {
            if let Some(v) = nth_number(&record.replace(',', " "), 4) {
                image.overloads = Some(v);
            }
        }

        if record.contains("Number of bad spots") {
            if let Some(v) = last_number(&record.replace('=', "")) {
                image.rejected = Some(v as u32);
            }
        }

        if record.contains("Analysis as a function of resolution.")
            && i >= 3
            && line_at(i - 3).is_some_and(|l| l.contains("Maximum Intensity"))
        {
            match parse_resolution_table(lines, i) {
                Some(shells) => {
                    image.resolution = Some(resolution_estimate(&shells, config.isigma_cutoff));
                }
                None => debug!("incomplete resolution table at line {}", i + 1),
            }
        }
    }

    stats.remove(&0);
    stats
}

/// 读取分辨率分层表，返回 [(分辨率, 合并 I/σ)]，低分辨率在前
///
/// 相对于标记行的偏移：+1 分辨率，+3 全反射点数，+6 全反射 I/σ，
/// +8 部分反射点数，+11 部分反射 I/σ。每行最后一列为总计，不使用。
fn parse_resolution_table<S: AsRef<str>>(lines: &[S], marker: usize) -> Option<Vec<(f64, f64)>> {
    let row = |offset: usize| lines.get(marker + offset).map(|l| l.as_ref());

    let resolution_tokens: Vec<&str> = row(1)?.split_whitespace().collect();
    if resolution_tokens.len() < 3 {
        return None;
    }
    let resolution = resolution_tokens[2..resolution_tokens.len() - 1]
        .iter()
        .map(|t| t.parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    let number_full = table_row(&row(3)?.replace("Number", ""))?;
    let sigma_full = table_row(&row(6)?.replace("<I/sigma>", ""))?;
    let number_partial = table_row(&row(8)?.replace("Number", ""))?;
    let sigma_partial = table_row(&row(11)?.replace("<I/sigma>", ""))?;

    let n = resolution.len();
    if number_full.len() < n
        || sigma_full.len() < n
        || number_partial.len() < n
        || sigma_partial.len() < n
    {
        return None;
    }

    let shells = (0..n)
        .map(|j| {
            let total = number_full[j] + number_partial[j];
            let sigma = if total > 0.0 {
                (number_full[j] * sigma_full[j] + number_partial[j] * sigma_partial[j]) / total
            } else {
                0.0
            };
            (resolution[j], sigma)
        })
        .collect();

    Some(shells)
}

/// 表格一行：去掉最后的总计列后全部解析为数值
fn table_row(line: &str) -> Option<Vec<f64>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    tokens[..tokens.len() - 1]
        .iter()
        .map(|t| t.parse::<f64>().ok())
        .collect()
}

fn parse_floats(line: &str) -> Option<Vec<f64>> {
    line.split_whitespace()
        .map(|t| t.parse::<f64>().ok())
        .collect()
}

fn nth_number<T: std::str::FromStr>(line: &str, n: usize) -> Option<T> {
    line.split_whitespace().nth(n)?.parse().ok()
}

fn last_number(line: &str) -> Option<f64> {
    line.split_whitespace().last()?.parse().ok()
}
