//! Scrapes diagnostics, bundle sizes and coverage from tool output

use super::ChunkMetric;
use regex_utils::diagnostics as patterns;

/// What one tool run printed, sorted into buckets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOutput {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub chunks: Vec<ChunkMetric>,
    /// Statement coverage from the summary row, in percent
    pub coverage: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputParser;

fn push_unique(lines: &mut Vec<String>, line: &str) {
    if !lines.iter().any(|l| l == line) {
        lines.push(line.to_string());
    }
}

fn to_bytes(value: &str, unit: &str) -> Option<u64> {
    let value: f64 = value.replace(',', "").parse().ok()?;
    let scale = match unit {
        "B" => 1.0,
        "kB" | "KB" => 1_000.0,
        "KiB" => 1_024.0,
        "MB" => 1_000_000.0,
        "MiB" => 1_048_576.0,
        _ => return None,
    };
    Some((value * scale).round() as u64)
}

impl OutputParser {
    pub fn new() -> Self {
        Self
    }

    pub fn strip_ansi(raw: &str) -> String {
        patterns::ANSI_ESCAPE.replace_all(raw, "").into_owned()
    }

    pub fn parse(&self, raw: &str) -> ParsedOutput {
        let clean = Self::strip_ansi(raw);
        let mut parsed = ParsedOutput::default();

        for line in clean.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let is_error = [&*patterns::FAILED_TEST, &*patterns::COMPILER_ERROR, &*patterns::BUNDLER_ERROR]
                .iter()
                .any(|set| set.iter().any(|re| re.is_match(line)));
            if is_error {
                push_unique(&mut parsed.errors, trimmed);
                continue;
            }
            if patterns::WARNING.iter().any(|re| re.is_match(line)) {
                push_unique(&mut parsed.warnings, trimmed);
                continue;
            }

            if let Some(caps) = patterns::SIZE_ROW.captures(line) {
                let bytes = to_bytes(&caps[2], &caps[3]);
                let compressed = to_bytes(&caps[4], &caps[5]);
                if let (Some(bytes), Some(compressed_bytes)) = (bytes, compressed) {
                    parsed.chunks.push(ChunkMetric { name: caps[1].to_string(), bytes, compressed_bytes });
                }
                continue;
            }

            if let Some(caps) = patterns::COVERAGE_SUMMARY.captures(line) {
                parsed.coverage = caps[1].parse().ok();
            }
        }

        parsed
    }
}
