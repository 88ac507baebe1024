//! Convert command - run the full conversion pipeline for one component

use crate::cli::app::ConvertArgs;
use crate::cli::source::read_source;
use anyhow::Result;
use porter_core::pipeline::{ConversionConfig, ConversionResult, PipelineCoordinator};
use std::path::Path;
use tracing::debug;

pub async fn load_config(path: Option<&Path>) -> Result<ConversionConfig> {
    match path {
        Some(path) => Ok(ConversionConfig::load(path).await?),
        None => Ok(ConversionConfig::default()),
    }
}

/// Command-line flags win over the config file
pub fn apply_overrides(mut config: ConversionConfig, args: &ConvertArgs) -> ConversionConfig {
    if let Some(output) = &args.output {
        config.output_root = output.clone();
    }
    config.run_tests |= args.run_tests;
    config.run_build |= args.run_build;
    config
}

/// Returns whether the conversion succeeded
pub async fn execute(args: ConvertArgs, config_path: Option<&Path>) -> Result<bool> {
    let config = apply_overrides(load_config(config_path).await?, &args);
    debug!("Conversion config: {:?}", config);

    let source = read_source(args.input.as_deref()).await?;
    let result = PipelineCoordinator::new(config).convert(&source, args.name.as_deref()).await;

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        print_summary(&result);
    }

    Ok(result.success())
}

fn print_summary(result: &ConversionResult) {
    let status = if result.success() { "converted" } else { "failed" };
    println!(" {} {} ({:?} complexity)", result.component_name, status, result.metrics.complexity);

    if !result.files.is_empty() {
        println!("\n Files written:");
        for file in &result.files {
            println!("    {:<9} {}", file.artifact_kind.as_str(), file.display_path());
        }
    }

    if !result.metrics.applied_optimizations.is_empty() {
        println!("\n Optimizations:");
        for applied in &result.metrics.applied_optimizations {
            println!("    {:<22} {}", applied.pass, applied.path);
        }
    }

    if let Some(outcome) = &result.build_outcome {
        println!("\n Toolchain: {}", if outcome.success { "passed" } else { "failed" });
        if let Some(coverage) = outcome.metrics.coverage {
            println!("    Coverage: {:.2}%", coverage);
        }
        if outcome.metrics.total_bundle_bytes > 0 {
            println!("    Bundle:   {} bytes in {} chunks", outcome.metrics.total_bundle_bytes, outcome.metrics.chunks.len());
        }
        for error in &outcome.errors {
            println!("    {}", error);
        }
    }

    for warning in &result.diagnostics.warnings {
        println!(" warning: {}", warning);
    }
    for error in &result.diagnostics.errors {
        println!(" error: {}", error);
    }

    println!(
        "\n {} files, {} lines in {}ms",
        result.metrics.file_count, result.metrics.line_count, result.metrics.elapsed_ms
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(output: Option<&str>, run_tests: bool) -> ConvertArgs {
        ConvertArgs {
            input: None,
            name: None,
            output: output.map(PathBuf::from),
            run_tests,
            run_build: false,
            json: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = apply_overrides(ConversionConfig::default(), &args(Some("web/src"), true));
        assert_eq!(config.output_root, PathBuf::from("web/src"));
        assert!(config.run_tests);
        assert!(!config.run_build);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let base = ConversionConfig { run_build: true, ..ConversionConfig::default() };
        let config = apply_overrides(base, &args(None, false));
        assert_eq!(config.output_root, PathBuf::from("src"));
        assert!(config.run_build);
    }

    #[tokio::test]
    async fn test_convert_file_into_output_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("Badge.js");
        std::fs::write(&input, "const Badge = ({ label }) => <span>{label}</span>;\n\nexport default Badge;\n").unwrap();

        let mut convert_args = args(dir.path().join("out").to_str(), false);
        convert_args.input = input.to_str().map(String::from);
        let success = execute(convert_args, None).await.unwrap();

        assert!(success);
        assert!(dir.path().join("out/components/leaf/Badge/Badge.tsx").is_file());
    }
}
