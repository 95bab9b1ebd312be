//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/integrate.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功，附带一行报告
    Success(String),
    /// 跳过（如日志中没有图像）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功文件的报告
    pub reports: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(report) => {
                self.success += 1;
                self.reports.push(report);
            }
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理文件列表
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> BatchResult
    where
        F: Fn(&Path) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");

        let process = |file: &PathBuf| {
            let result = processor(file);
            pb.inc(1);
            result
        };

        // 线程池创建失败时退回 rayon 全局线程池
        let results: Vec<ProcessResult> =
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(process).collect()),
                Err(e) => {
                    warn!("cannot build a {}-thread pool: {}", self.jobs, e);
                    files.par_iter().map(process).collect()
                }
            };

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        batch_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_results_in_order() {
        let files: Vec<PathBuf> = ["a.log", "skip.log", "bad.log", "b.log"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let result = BatchRunner::new(2).run(files, |path| {
            let name = path.display().to_string();
            match name.as_str() {
                "skip.log" => ProcessResult::Skipped(name),
                "bad.log" => ProcessResult::Failed(name, "unreadable".to_string()),
                _ => ProcessResult::Success(format!("{} ok", name)),
            }
        });

        assert_eq!(result.total(), 4);
        assert_eq!(result.success, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.reports, vec!["a.log ok", "b.log ok"]);
        assert_eq!(result.failures[0].1, "unreadable");
    }
}
