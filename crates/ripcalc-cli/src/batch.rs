//! Parallel batch processing using Rayon
//!
//! Calculates many CIDRs at once:
//! - One CIDR per line from a file or stdin
//! - Blank lines and `#` comments skipped
//! - Configurable thread pool
//! - Individual error handling, results kept in input order

use anyhow::{Context, Result};
use rayon::prelude::*;
use ripcalc_ipv6::ReportOptions;
use serde::Serialize;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use crate::output::{self, Calculated, OutputFormat};

/// Batch processing result
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub input: String,
    pub result: Result<Calculated, String>,
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self { thread_pool })
    }

    /// Calculate every input in parallel, keeping input order
    pub fn process(&self, inputs: Vec<String>) -> Vec<BatchResult> {
        let total = inputs.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            inputs
                .into_par_iter()
                .map(|input| {
                    let result = Calculated::from_cidr(&input).map_err(|e| format!("{:#}", e));

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        debug!("Processed {}/{} CIDRs", count, total);
                    }

                    BatchResult { input, result }
                })
                .collect()
        })
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Read batch input from a file, or stdin for `None` / `-`
pub fn read_inputs(file: Option<&str>) -> Result<Vec<String>> {
    let text = match file {
        None | Some("-") => io::read_to_string(io::stdin()).context("failed to read stdin")?,
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
        }
    };

    Ok(parse_lines(&text))
}

/// One trimmed CIDR per line, skipping blanks and `#` comments
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[derive(Serialize)]
struct BatchRecord<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    network: Option<&'a Calculated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Render batch results; failed inputs only appear in JSON output
pub fn render(results: &[BatchResult], format: OutputFormat, options: ReportOptions) -> Result<String> {
    let ok = results.iter().filter_map(|r| r.result.as_ref().ok());

    match format {
        OutputFormat::Human => Ok(ok
            .map(|net| net.report(options))
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Json | OutputFormat::JsonCompact => {
            let records: Vec<BatchRecord<'_>> = results
                .iter()
                .map(|r| BatchRecord {
                    input: &r.input,
                    network: r.result.as_ref().ok(),
                    error: r.result.as_ref().err().map(String::as_str),
                })
                .collect();

            if format == OutputFormat::Json {
                Ok(serde_json::to_string_pretty(&records)?)
            } else {
                Ok(serde_json::to_string(&records)?)
            }
        }
        OutputFormat::Csv => output::to_csv(ok),
    }
}
