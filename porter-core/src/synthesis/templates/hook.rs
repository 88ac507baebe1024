//! `use<Name>Data.ts`: a react-query hook over the component's data source

use super::types::declares_data;
use super::{ArtifactTemplate, RenderContext};
use crate::analysis::{ComplexityClass, ComponentAnalysis};
use crate::pipeline::ConversionConfig;
use crate::synthesis::{ArtifactKind, CodeBuilder, Result};

pub struct HookTemplate;

const STALE_TIME: &str = "5 * 60 * 1000";

impl ArtifactTemplate for HookTemplate {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Hook
    }

    fn applies(&self, analysis: &ComponentAnalysis, config: &ConversionConfig) -> bool {
        config.generate_hooks && analysis.complexity_class() != ComplexityClass::Low
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let layout = ctx.layout;
        let data_type = layout.data_type();
        let mut code = CodeBuilder::new();

        code.line("import { useQuery } from '@tanstack/react-query';");
        if ctx.plan.service {
            code.line(format!(
                "import {{ {} }} from '{}';",
                layout.service_instance(),
                ctx.import_path(ArtifactKind::Hook, ArtifactKind::Service)
            ));
        }
        if ctx.plan.types && declares_data(ctx) {
            code.line(format!(
                "import type {{ {} }} from '{}';",
                data_type,
                ctx.import_path(ArtifactKind::Hook, ArtifactKind::Types)
            ));
            code.blank();
        } else {
            code.blank();
            code.line(format!("export type {data_type} = unknown;"));
            code.blank();
        }

        code.line(format!("export const {} = ['{}'] as const;", layout.query_key(), layout.kebab_name()));
        code.blank();

        code.block(format!("export function {}() {{", layout.hook_name()), "}", |b| {
            b.block(format!("const query = useQuery<{data_type}, Error>({{"), "});", |b| {
                b.line(format!("queryKey: {},", layout.query_key()));
                if ctx.plan.service {
                    b.line(format!(
                        "queryFn: () => {}.{}(),",
                        layout.service_instance(),
                        layout.service_fetch_method()
                    ));
                } else {
                    b.block("queryFn: async () => {", "},", |b| {
                        b.line(format!(
                            "const response = await fetch(`${{import.meta.env.VITE_API_URL ?? ''}}/{}`);",
                            layout.kebab_name()
                        ));
                        b.block("if (!response.ok) {", "}", |b| {
                            b.line("throw new Error(`Request failed with status ${response.status}`);");
                        });
                        b.line(format!("return (await response.json()) as {data_type};"));
                    });
                }
                b.line(format!("staleTime: {STALE_TIME},"));
            });
            b.blank();
            b.block("return {", "};", |b| {
                b.line("data: query.data,");
                b.line("isLoading: query.isLoading,");
                b.line("error: query.error,");
                b.line("refetch: query.refetch,");
            });
        });

        Ok(code.build())
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::analyze;
    use crate::synthesis::{ArtifactKind, ArtifactSynthesizer};

    #[test]
    fn test_hook_uses_service() {
        let source = r#"
function Feed() {
  const [posts, setPosts] = useState([]);
  useEffect(() => { fetch('/api/posts').then((r) => r.json()).then(setPosts); }, []);
  return <ul>{posts.map((p) => <li key={p.id}>{p.title}</li>)}</ul>;
}
"#;
        let files = ArtifactSynthesizer::default().generate(&analyze(source, None)).unwrap();
        let hook = files.iter().find(|f| f.artifact_kind == ArtifactKind::Hook).unwrap();

        assert!(hook.content.contains("import { feedService } from '../services/feedService';"));
        assert!(hook.content.contains("import type { FeedData } from '../components/assembly/Feed/Feed.types';"));
        assert!(hook.content.contains("export function useFeedData() {"));
        assert!(hook.content.contains("queryFn: () => feedService.fetchFeedData(),"));
        assert!(hook.content.contains("export const feedQueryKey = ['feed'] as const;"));
    }
}
