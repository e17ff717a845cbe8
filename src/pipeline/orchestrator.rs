// 全ファイル見積り

use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::pipeline::estimator::estimate_file;
use crate::pipeline::report::CostReport;

/// Estimate multiple files, collecting results.
/// One file failure does NOT prevent other files from being estimated.
pub fn estimate_all_files(
    paths: &[PathBuf],
    settings: &Settings,
) -> Vec<crate::error::Result<CostReport>> {
    paths
        .iter()
        .map(|path| estimate_file(path, settings))
        .collect()
}
