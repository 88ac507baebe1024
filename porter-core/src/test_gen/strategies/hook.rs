//! Data hook tests: loading, data, error, query key and stable refetch

use super::{TestContext, TestStrategy};
use crate::synthesis::ArtifactKind;
use crate::test_gen::{ScenarioKind, TestCase, TestSuite};
use anyhow::Result;

pub struct HookStrategy;

/// How a test controls the hook's data source
enum Source {
    Service { instance: String, method: String },
    Fetch,
}

impl Source {
    fn pending(&self) -> String {
        match self {
            Self::Service { instance, method } => {
                format!("vi.mocked({instance}.{method}).mockReturnValue(new Promise(() => {{}}));")
            }
            Self::Fetch => "vi.mocked(fetch).mockReturnValue(new Promise(() => {}));".to_string(),
        }
    }

    fn resolves(&self, value: &str) -> String {
        match self {
            Self::Service { instance, method } => format!("vi.mocked({instance}.{method}).mockResolvedValue({value});"),
            Self::Fetch => {
                format!("vi.mocked(fetch).mockResolvedValue({{ ok: true, json: async () => {value} }} as Response);")
            }
        }
    }

    fn rejects(&self, message: &str) -> String {
        match self {
            Self::Service { instance, method } => {
                format!("vi.mocked({instance}.{method}).mockRejectedValue(new Error('{message}'));")
            }
            Self::Fetch => format!("vi.mocked(fetch).mockRejectedValue(new Error('{message}'));"),
        }
    }
}

const WRAPPER: &str = "const createWrapper = () => {
  const client = new QueryClient({ defaultOptions: { queries: { retry: false } } });
  return ({ children }: { children: ReactNode }) => (
    <QueryClientProvider client={client}>{children}</QueryClientProvider>
  );
};";

impl TestStrategy for HookStrategy {
    fn target(&self) -> ArtifactKind {
        ArtifactKind::Hook
    }

    fn generate(&self, ctx: &TestContext<'_>) -> Result<TestSuite> {
        let layout = ctx.layout;
        let hook = layout.hook_name();
        let query_key = layout.query_key();

        let mut suite = TestSuite::new(&hook, ArtifactKind::Hook);
        suite.add_import("import '@testing-library/jest-dom/vitest';");
        suite.add_import("import type { ReactNode } from 'react';");
        suite.add_import("import { QueryClient, QueryClientProvider } from '@tanstack/react-query';");
        suite.add_import("import { renderHook, waitFor } from '@testing-library/react';");
        suite.add_import(format!("import {{ {hook}, {query_key} }} from '{}';", ctx.import_path(ArtifactKind::Hook)));

        let source = if ctx.plan.service {
            let service_path = ctx.import_path(ArtifactKind::Service);
            let instance = layout.service_instance();
            let method = layout.service_fetch_method();
            suite.add_import(format!("import {{ {instance} }} from '{service_path}';"));
            suite.add_preamble(format!("vi.mock('{service_path}', () => ({{ {instance}: {{ {method}: vi.fn() }} }}));"));
            suite.setup.push("vi.clearAllMocks();".to_string());
            Source::Service { instance, method }
        } else {
            suite.setup.push("vi.stubGlobal('fetch', vi.fn());".to_string());
            suite.teardown.push("vi.unstubAllGlobals();".to_string());
            Source::Fetch
        };
        suite.add_preamble(WRAPPER);

        let render = format!("const {{ result }} = renderHook(() => {hook}(), {{ wrapper: createWrapper() }});");

        suite.add_test(
            TestCase::new("starts in the loading state", ScenarioKind::Loading)
                .line(source.pending())
                .line(&render)
                .line("expect(result.current.isLoading).toBe(true);"),
        );
        suite.add_test(
            TestCase::new("returns the loaded data", ScenarioKind::Data)
                .asynchronous()
                .line(source.resolves("[{ id: 1 }]"))
                .line(&render)
                .line("await waitFor(() => expect(result.current.isLoading).toBe(false));")
                .line("expect(result.current.data).toEqual([{ id: 1 }]);")
                .line("expect(result.current.error).toBeNull();"),
        );
        suite.add_test(
            TestCase::new("exposes request errors", ScenarioKind::Error)
                .asynchronous()
                .line(source.rejects("Network down"))
                .line(&render)
                .line("await waitFor(() => expect(result.current.error).toBeTruthy());")
                .line("expect(result.current.error?.message).toBe('Network down');"),
        );
        suite.add_test(
            TestCase::new("uses a stable query key", ScenarioKind::Shape)
                .line(format!("expect({query_key}).toEqual(['{}']);", layout.kebab_name())),
        );
        suite.add_test(
            TestCase::new("keeps refetch stable across renders", ScenarioKind::Rerender)
                .line(source.resolves("[]"))
                .line(format!(
                    "const {{ result, rerender }} = renderHook(() => {hook}(), {{ wrapper: createWrapper() }});"
                ))
                .line("const first = result.current.refetch;")
                .line("rerender();")
                .line("expect(result.current.refetch).toBe(first);"),
        );

        Ok(suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::synthesis::{ArtifactLayout, ArtifactPlan};

    const FEED: &str = r#"
function Feed() {
  const [posts, setPosts] = useState([]);
  useEffect(() => { fetch('/api/posts').then((r) => r.json()).then(setPosts); }, []);
  return <ul>{posts.map((p) => <li key={p.id}>{p.title}</li>)}</ul>;
}
"#;

    fn generate(plan: ArtifactPlan) -> TestSuite {
        let analysis = analyze(FEED, None);
        let layout = ArtifactLayout::new(&analysis.component_name, analysis.structural_tier);
        let ctx = TestContext { analysis: &analysis, layout: &layout, plan, target: ArtifactKind::Hook, content: "" };
        HookStrategy.generate(&ctx).unwrap()
    }

    #[test]
    fn test_hook_tests_mock_the_service() {
        let suite = generate(ArtifactPlan { types: true, hook: true, service: true, store: false });

        assert_eq!(suite.name, "useFeedData");
        assert!(suite.imports.contains(&"import { useFeedData, feedQueryKey } from '../useFeedData';".to_string()));
        assert_eq!(
            suite.preamble[0],
            "vi.mock('../../services/feedService', () => ({ feedService: { fetchFeedData: vi.fn() } }));"
        );
        assert_eq!(suite.tests.len(), 5);
        assert!(suite.tests[1].body[0].contains("vi.mocked(feedService.fetchFeedData).mockResolvedValue([{ id: 1 }]);"));
    }

    #[test]
    fn test_hook_tests_stub_fetch_without_service() {
        let suite = generate(ArtifactPlan { types: false, hook: true, service: false, store: false });

        assert_eq!(suite.setup, vec!["vi.stubGlobal('fetch', vi.fn());".to_string()]);
        assert_eq!(suite.teardown, vec!["vi.unstubAllGlobals();".to_string()]);
        assert!(suite.tests[2].body[0].starts_with("vi.mocked(fetch).mockRejectedValue"));
    }
}
