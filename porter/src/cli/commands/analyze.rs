//! Analyze command - print the extracted facts about a component

use crate::cli::app::AnalyzeArgs;
use crate::cli::source::read_source;
use anyhow::Result;
use porter_core::analysis::{ComponentAnalysis, analyze};

/// Returns whether the analysis raised no errors
pub async fn execute(args: AnalyzeArgs) -> Result<bool> {
    let source = read_source(args.input.as_deref()).await?;
    let analysis = analyze(&source, args.name.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }

    Ok(!analysis.diagnostics.has_errors())
}

fn print_analysis(analysis: &ComponentAnalysis) {
    println!(" Component: {}", analysis.component_name);
    println!("  Kind:       {:?}", analysis.component_kind);
    println!("  Tier:       {}", analysis.structural_tier);
    println!("  Complexity: {:?} ({:.1})", analysis.complexity_class(), analysis.complexity_score());

    if !analysis.props.is_empty() {
        println!("\n  Props:");
        for prop in &analysis.props {
            let optional = if prop.required { "" } else { "?" };
            println!("    {}{}: {}", prop.name, optional, prop.inferred_type);
        }
    }

    if !analysis.state_bindings.is_empty() {
        println!("\n  State:");
        for binding in &analysis.state_bindings {
            println!("    {}: {}", binding.name, binding.inferred_type);
        }
    }

    if !analysis.effect_primitives.is_empty() {
        println!("\n  Effects:");
        for effect in &analysis.effect_primitives {
            println!("    {:?} [{}]", effect.kind, effect.dependencies.join(", "));
        }
    }

    let flags = &analysis.feature_flags;
    let enabled: Vec<&str> = [
        (flags.uses_navigation, "navigation"),
        (flags.uses_media, "media"),
        (flags.uses_animation, "animation"),
        (flags.uses_remote_data, "remote data"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    if !enabled.is_empty() {
        println!("\n  Uses: {}", enabled.join(", "));
    }

    for warning in &analysis.diagnostics.warnings {
        println!(" warning: {}", warning);
    }
    for error in &analysis.diagnostics.errors {
        println!(" error: {}", error);
    }
}
