//! Artifact synthesizer: runs the registered templates for one analysis

use super::templates::{
    ArtifactTemplate, ComponentTemplate, HookTemplate, RenderContext, ServiceTemplate, StoreTemplate,
    TypesTemplate,
};
use super::{ArtifactKind, ArtifactLayout, GeneratedFile, Result, SynthesisError};
use crate::analysis::ComponentAnalysis;
use crate::pipeline::ConversionConfig;
use crate::text;
use std::collections::HashSet;
use tracing::{debug, info};

/// Which optional artifacts accompany the component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactPlan {
    pub types: bool,
    pub hook: bool,
    pub service: bool,
    pub store: bool,
}

impl ArtifactPlan {
    pub fn includes(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Component => true,
            ArtifactKind::Types => self.types,
            ArtifactKind::Hook => self.hook,
            ArtifactKind::Service => self.service,
            ArtifactKind::Store => self.store,
            ArtifactKind::Test => false,
        }
    }

    fn set(&mut self, kind: ArtifactKind) {
        match kind {
            ArtifactKind::Types => self.types = true,
            ArtifactKind::Hook => self.hook = true,
            ArtifactKind::Service => self.service = true,
            ArtifactKind::Store => self.store = true,
            ArtifactKind::Component | ArtifactKind::Test => {}
        }
    }
}

/// Produces the non-test artifacts for a component.
pub struct ArtifactSynthesizer {
    templates: Vec<Box<dyn ArtifactTemplate>>,
    config: ConversionConfig,
}

impl ArtifactSynthesizer {
    /// Synthesizer with the component, types, hook, service and store templates
    pub fn new(config: ConversionConfig) -> Self {
        let templates: Vec<Box<dyn ArtifactTemplate>> = vec![
            Box::new(ComponentTemplate),
            Box::new(TypesTemplate),
            Box::new(HookTemplate),
            Box::new(ServiceTemplate),
            Box::new(StoreTemplate),
        ];
        Self { templates, config }
    }

    /// Register an additional template; it renders after the built-in ones
    pub fn with_template(mut self, template: Box<dyn ArtifactTemplate>) -> Self {
        self.templates.push(template);
        self
    }

    pub fn plan(&self, analysis: &ComponentAnalysis) -> ArtifactPlan {
        let mut plan = ArtifactPlan::default();
        for template in &self.templates {
            if template.applies(analysis, &self.config) {
                plan.set(template.kind());
            }
        }
        plan
    }

    pub fn generate(&self, analysis: &ComponentAnalysis) -> Result<Vec<GeneratedFile>> {
        let layout = ArtifactLayout::new(&analysis.component_name, analysis.structural_tier);
        if !text::is_identifier(layout.name()) {
            return Err(SynthesisError::InvalidName(analysis.component_name.clone()));
        }

        let plan = self.plan(analysis);
        debug!("Artifact plan for {}: {:?}", layout.name(), plan);

        let ctx = RenderContext { analysis, layout: &layout, plan: &plan };
        let mut files = Vec::new();
        let mut seen = HashSet::new();

        for template in &self.templates {
            if !template.applies(analysis, &self.config) {
                continue;
            }
            let kind = template.kind();
            let path = layout.path_for(kind);
            if !seen.insert(path.clone()) {
                return Err(SynthesisError::DuplicatePath(path.display().to_string()));
            }
            let content = template.render(&ctx)?;
            let tier = matches!(kind, ArtifactKind::Component | ArtifactKind::Types).then_some(layout.tier());
            files.push(GeneratedFile::new(path, content, kind, tier));
        }

        info!("Synthesized {} artifacts for {}", files.len(), layout.name());
        Ok(files)
    }
}

impl Default for ArtifactSynthesizer {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    const PLAIN: &str = "const Divider = () => <hr />;\n\nexport default Divider;\n";

    const DASHBOARD: &str = r#"
import React, { useState, useEffect } from 'react';

function StatsPanel() {
  const [stats, setStats] = useState([]);
  const [error, setError] = useState(null);

  useEffect(() => {
    fetch('/api/stats')
      .then((res) => res.json())
      .then(setStats)
      .catch(setError);
  }, []);

  return (
    <div className="card">
      {error ? <p>{String(error)}</p> : stats.map((s) => <span key={s.id}>{s.value}</span>)}
    </div>
  );
}

export default StatsPanel;
"#;

    fn kinds(files: &[GeneratedFile]) -> Vec<ArtifactKind> {
        files.iter().map(|f| f.artifact_kind).collect()
    }

    #[test]
    fn test_minimal_component_emits_only_component() {
        let analysis = analyze(PLAIN, None);
        let files = ArtifactSynthesizer::default().generate(&analysis).unwrap();

        assert_eq!(kinds(&files), vec![ArtifactKind::Component]);
        assert!(files[0].content.contains("const Divider = () => {"));
        assert!(files[0].content.contains("export default Divider;"));
    }

    #[test]
    fn test_remote_component_emits_four_artifacts() {
        let analysis = analyze(DASHBOARD, None);
        let files = ArtifactSynthesizer::default().generate(&analysis).unwrap();

        assert_eq!(
            kinds(&files),
            vec![ArtifactKind::Component, ArtifactKind::Types, ArtifactKind::Hook, ArtifactKind::Service]
        );
    }

    #[test]
    fn test_disabled_artifacts_are_skipped() {
        let analysis = analyze(DASHBOARD, None);
        let config = ConversionConfig {
            generate_types: false,
            generate_services: false,
            ..ConversionConfig::default()
        };
        let files = ArtifactSynthesizer::new(config).generate(&analysis).unwrap();
        assert_eq!(kinds(&files), vec![ArtifactKind::Component, ArtifactKind::Hook]);
    }

    #[test]
    fn test_paths_are_stable() {
        let analysis = analyze(DASHBOARD, None);
        let synthesizer = ArtifactSynthesizer::default();

        let first: Vec<_> = synthesizer.generate(&analysis).unwrap().into_iter().map(|f| f.relative_path).collect();
        let second: Vec<_> = synthesizer.generate(&analysis).unwrap().into_iter().map(|f| f.relative_path).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let mut analysis = analyze(PLAIN, None);
        analysis.component_name = "42".to_string();

        let result = ArtifactSynthesizer::default().generate(&analysis);
        assert!(matches!(result, Err(SynthesisError::InvalidName(_))));
    }
}
