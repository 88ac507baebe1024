//! Component tests: render, props, data states, navigation, state,
//! accessibility, viewport and re-render scenarios

use super::{SampleSite, TestContext, TestStrategy, sample_value};
use crate::analysis::{PropSpec, StateBinding};
use crate::synthesis::ArtifactKind;
use crate::synthesis::templates::store::initial_value;
use crate::test_gen::{ScenarioKind, TestCase, TestSuite};
use crate::text;
use anyhow::Result;

/// Viewport widths for the responsive scenario: phone, tablet, desktop
const VIEWPORT_WIDTHS: &str = "[375, 768, 1280]";

pub struct ComponentStrategy;

impl ComponentStrategy {
    fn props_fixture(ctx: &TestContext<'_>, typed: bool) -> String {
        let mut fixture = if typed {
            format!("const defaultProps: {} = {{\n", ctx.layout.props_type())
        } else {
            "const defaultProps = {\n".to_string()
        };
        for prop in &ctx.analysis.props {
            let value = sample_value(&prop.inferred_type, &prop.name, SampleSite::Component);
            fixture.push_str(&format!("  {}: {value},\n", prop.name));
        }
        fixture.push_str("};");
        fixture
    }

    /// `ui()` builds the element under test; `renderComponent()` renders it
    fn render_helpers(ctx: &TestContext<'_>, router: bool, typed: bool) -> String {
        let name = ctx.layout.name();
        let has_props = !ctx.analysis.props.is_empty();
        let (param, element) = if has_props {
            let param = if typed {
                format!("props: Partial<{}> = {{}}", ctx.layout.props_type())
            } else {
                "props = {}".to_string()
            };
            (param, format!("<{name} {{...defaultProps}} {{...props}} />"))
        } else {
            (String::new(), format!("<{name} />"))
        };

        let ui = if router {
            format!("const ui = ({param}) => (\n  <MemoryRouter>\n    {element}\n  </MemoryRouter>\n);")
        } else {
            format!("const ui = ({param}) => {element};")
        };
        let render = if has_props {
            format!("const renderComponent = ({param}) => render(ui(props));")
        } else {
            "const renderComponent = () => render(ui());".to_string()
        };
        format!("{ui}\n\n{render}")
    }

    fn mock_query_helper(hook: &str) -> String {
        format!(
            "const mockQuery = (overrides = {{}}) =>\n  \
             ({{\n    data: [],\n    isLoading: false,\n    error: null,\n    refetch: vi.fn(),\n    ...overrides,\n  \
             }}) as unknown as ReturnType<typeof {hook}>;"
        )
    }

    fn prop_case(ctx: &TestContext<'_>, prop: &PropSpec) -> TestCase {
        let name = &prop.name;
        if prop.inferred_type == "() => void" {
            return TestCase::new(format!("accepts the {name} callback"), ScenarioKind::Prop)
                .line(format!("const {name} = vi.fn();"))
                .line(format!("renderComponent({{ {name} }});"))
                .line(format!("expect({name}).not.toHaveBeenCalled();"));
        }

        let value = sample_value(&prop.inferred_type, name, SampleSite::Component);
        let rendered_as_text = matches!(prop.inferred_type.as_str(), "string" | "unknown")
            && ctx.content.contains(&format!("{{{name}}}"));
        let case = TestCase::new(format!("renders with the {name} prop"), ScenarioKind::Prop);
        if rendered_as_text {
            case.line(format!("renderComponent({{ {name}: 'custom {name}' }});"))
                .line(format!("expect(screen.getAllByText(/custom {name}/).length).toBeGreaterThan(0);"))
        } else {
            case.line(format!("const {{ container }} = renderComponent({{ {name}: {value} }});"))
                .line("expect(container.firstChild).toBeTruthy();")
        }
    }

    fn query_cases(hook: &str) -> Vec<TestCase> {
        vec![
            TestCase::new("shows a loading indicator while data loads", ScenarioKind::Loading)
                .line(format!("vi.mocked({hook}).mockReturnValue(mockQuery({{ isLoading: true }}));"))
                .line("renderComponent();")
                .line("expect(screen.getByRole('status')).toBeInTheDocument();"),
            TestCase::new("shows the error when loading fails", ScenarioKind::Error)
                .line(format!(
                    "vi.mocked({hook}).mockReturnValue(mockQuery({{ error: new Error('Request failed') }}));"
                ))
                .line("renderComponent();")
                .line("expect(screen.getByRole('alert')).toHaveTextContent('Request failed');"),
            TestCase::new("renders the loaded data", ScenarioKind::Data)
                .line(format!("vi.mocked({hook}).mockReturnValue(mockQuery({{ data: [] }}));"))
                .line("renderComponent();")
                .line("expect(screen.queryByRole('status')).not.toBeInTheDocument();")
                .line("expect(screen.queryByRole('alert')).not.toBeInTheDocument();"),
        ]
    }

    fn fetch_cases(calls_fetch: bool) -> Vec<TestCase> {
        let data = TestCase::new("requests data after mounting", ScenarioKind::Data).asynchronous();
        let data = if calls_fetch {
            data.line("renderComponent();").line("await waitFor(() => expect(fetch).toHaveBeenCalled());")
        } else {
            data.line("const { container } = renderComponent();")
                .line("await waitFor(() => expect(container.firstChild).toBeTruthy());")
        };
        vec![
            TestCase::new("renders while the request is pending", ScenarioKind::Loading)
                .line("vi.mocked(fetch).mockReturnValue(new Promise(() => {}));")
                .line("const { container } = renderComponent();")
                .line("expect(container.firstChild).toBeTruthy();"),
            TestCase::new("survives a failed request", ScenarioKind::Error)
                .line("vi.mocked(fetch).mockRejectedValue(new Error('Network down'));")
                .line("expect(() => renderComponent()).not.toThrow();"),
            data,
        ]
    }

    fn state_case(ctx: &TestContext<'_>, state: &StateBinding) -> TestCase {
        let name = &state.name;
        let derived = ctx.content.contains(&format!("const {name} = query."))
            || ctx.content.contains(&format!("const {name} = (query."));
        if derived {
            TestCase::new(format!("derives the {name} state from the data hook"), ScenarioKind::State)
                .line("renderComponent();")
                .line(format!("expect({}).toHaveBeenCalled();", ctx.layout.hook_name()))
        } else if ctx.plan.store {
            TestCase::new(format!("reads the {name} state from the store"), ScenarioKind::State)
                .line("renderComponent();")
                .line(format!("expect({}.getState().{name}).toEqual({});", ctx.layout.store_hook(), initial_value(state)))
        } else {
            TestCase::new(format!("renders with the initial {name} state"), ScenarioKind::State)
                .line("const { container } = renderComponent();")
                .line("expect(container.firstChild).toBeTruthy();")
        }
    }
}

impl TestStrategy for ComponentStrategy {
    fn target(&self) -> ArtifactKind {
        ArtifactKind::Component
    }

    fn generate(&self, ctx: &TestContext<'_>) -> Result<TestSuite> {
        let analysis = ctx.analysis;
        let layout = ctx.layout;
        let name = layout.name();
        let hook = layout.hook_name();

        let uses_query = ctx.uses_query();
        let fetches = analysis.feature_flags.uses_remote_data && !uses_query;
        let mocks_navigate = text::count_word(ctx.content, "useNavigate") > 0;
        let router = analysis.feature_flags.uses_navigation || ctx.content.contains("'react-router-dom'");
        let typed = ctx.plan.types && !analysis.props.is_empty();

        let mut suite = TestSuite::new(name, ArtifactKind::Component);
        suite.add_import("import '@testing-library/jest-dom/vitest';");
        let testing_library = if fetches { "render, screen, waitFor" } else { "render, screen" };
        suite.add_import(format!("import {{ {testing_library} }} from '@testing-library/react';"));
        if router {
            suite.add_import("import { MemoryRouter } from 'react-router-dom';");
        }
        suite.add_import(format!("import {name} from '{}';", ctx.import_path(ArtifactKind::Component)));
        if typed {
            suite.add_import(format!(
                "import type {{ {} }} from '{}';",
                layout.props_type(),
                ctx.import_path(ArtifactKind::Types)
            ));
        }
        if uses_query {
            suite.add_import(format!("import {{ {hook} }} from '{}';", ctx.import_path(ArtifactKind::Hook)));
        }
        if ctx.plan.store {
            suite.add_import(format!(
                "import {{ {} }} from '{}';",
                layout.store_hook(),
                ctx.import_path(ArtifactKind::Store)
            ));
        }

        if mocks_navigate {
            suite.add_preamble("const mockNavigate = vi.hoisted(() => vi.fn());");
            suite.add_preamble(
                "vi.mock('react-router-dom', async (importOriginal) => ({\n  \
                 ...(await importOriginal<typeof import('react-router-dom')>()),\n  \
                 useNavigate: () => mockNavigate,\n}));",
            );
        }
        if uses_query {
            suite.add_preamble(format!(
                "vi.mock('{}', () => ({{ {hook}: vi.fn() }}));",
                ctx.import_path(ArtifactKind::Hook)
            ));
            suite.add_preamble(Self::mock_query_helper(&hook));
        }
        if !analysis.props.is_empty() {
            suite.add_preamble(Self::props_fixture(ctx, typed));
        }
        suite.add_preamble(Self::render_helpers(ctx, router, typed));

        if mocks_navigate || uses_query || fetches {
            suite.setup.push("vi.clearAllMocks();".to_string());
        }
        if uses_query {
            suite.setup.push(format!("vi.mocked({hook}).mockReturnValue(mockQuery());"));
        }
        if fetches {
            suite.setup.push("vi.stubGlobal('fetch', vi.fn().mockResolvedValue({ ok: true, json: async () => [] }));".to_string());
            suite.teardown.push("vi.unstubAllGlobals();".to_string());
        }
        if ctx.plan.store {
            suite.setup.push(format!("{}.getState().reset();", layout.store_hook()));
        }

        suite.add_test(
            TestCase::new("renders without crashing", ScenarioKind::Render)
                .line("const { container } = renderComponent();")
                .line("expect(container.firstChild).toBeTruthy();"),
        );

        for prop in &analysis.props {
            suite.add_test(Self::prop_case(ctx, prop));
        }

        if uses_query {
            for case in Self::query_cases(&hook) {
                suite.add_test(case);
            }
        } else if fetches {
            for case in Self::fetch_cases(ctx.content.contains("fetch(")) {
                suite.add_test(case);
            }
        }

        if mocks_navigate {
            suite.add_test(
                TestCase::new("does not navigate on first render", ScenarioKind::Navigation)
                    .line("renderComponent();")
                    .line("expect(mockNavigate).not.toHaveBeenCalled();"),
            );
        } else if router {
            suite.add_test(
                TestCase::new("renders inside a router", ScenarioKind::Navigation)
                    .line("const { container } = renderComponent();")
                    .line("expect(container.firstChild).toBeTruthy();"),
            );
        }

        for state in &analysis.state_bindings {
            suite.add_test(Self::state_case(ctx, state));
        }

        suite.add_test(
            TestCase::new("gives images alt text and buttons an accessible name", ScenarioKind::Accessibility)
                .line("renderComponent();")
                .line("for (const image of screen.queryAllByRole('img')) {\n  expect(image).toHaveAttribute('alt');\n}")
                .line("for (const button of screen.queryAllByRole('button')) {\n  expect(button).toHaveAccessibleName();\n}"),
        );
        suite.add_test(
            TestCase::new("renders at a %ipx wide viewport", ScenarioKind::Responsive)
                .each(VIEWPORT_WIDTHS, "width")
                .line("Object.defineProperty(window, 'innerWidth', { configurable: true, writable: true, value: width });")
                .line("window.dispatchEvent(new Event('resize'));")
                .line("const { container } = renderComponent();")
                .line("expect(container.firstChild).toBeTruthy();"),
        );
        suite.add_test(
            TestCase::new("keeps its DOM when re-rendered with the same props", ScenarioKind::Rerender)
                .line("const { container, rerender } = renderComponent();")
                .line("const first = container.firstChild;")
                .line("rerender(ui());")
                .line("expect(container.firstChild).toBe(first);"),
        );

        Ok(suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::synthesis::{ArtifactLayout, ArtifactPlan, ArtifactSynthesizer};

    fn suite_for(source: &str) -> TestSuite {
        let analysis = analyze(source, None);
        let files = ArtifactSynthesizer::default().generate(&analysis).unwrap();
        let layout = ArtifactLayout::new(&analysis.component_name, analysis.structural_tier);
        let plan = ArtifactPlan {
            types: files.iter().any(|f| f.artifact_kind == ArtifactKind::Types),
            hook: files.iter().any(|f| f.artifact_kind == ArtifactKind::Hook),
            service: files.iter().any(|f| f.artifact_kind == ArtifactKind::Service),
            store: files.iter().any(|f| f.artifact_kind == ArtifactKind::Store),
        };
        let component = files.iter().find(|f| f.artifact_kind == ArtifactKind::Component).unwrap();
        let ctx = TestContext {
            analysis: &analysis,
            layout: &layout,
            plan,
            target: ArtifactKind::Component,
            content: &component.content,
        };
        ComponentStrategy.generate(&ctx).unwrap()
    }

    #[test]
    fn test_minimal_component_scenarios() {
        let suite = suite_for("const Divider = () => <hr />;");
        let kinds: Vec<ScenarioKind> = suite.tests.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScenarioKind::Render,
                ScenarioKind::Accessibility,
                ScenarioKind::Responsive,
                ScenarioKind::Rerender
            ]
        );
        assert!(suite.imports.contains(&"import Divider from '../Divider';".to_string()));
        assert!(suite.preamble.iter().any(|p| p.contains("const renderComponent = () => render(ui());")));
    }

    #[test]
    fn test_prop_and_data_scenarios() {
        let source = r#"
const UserCard = ({ name, onSelect }) => {
  const [user, setUser] = useState(null);
  const [loading, setLoading] = useState(true);
  useEffect(() => {
    fetch('/api/user').then((r) => r.json()).then((u) => { setUser(u); setLoading(false); });
  }, []);
  return <div onClick={onSelect}>{name}</div>;
};
"#;
        let suite = suite_for(source);

        assert_eq!(suite.count(ScenarioKind::Prop), 2);
        assert_eq!(suite.count(ScenarioKind::Loading), 1);
        assert_eq!(suite.count(ScenarioKind::Error), 1);
        assert_eq!(suite.count(ScenarioKind::Data), 1);
        assert_eq!(suite.count(ScenarioKind::State), 2);
        assert!(suite.imports.contains(&"import type { UserCardProps } from '../UserCard.types';".to_string()));
        assert!(suite.preamble.iter().any(|p| p == "vi.mock('../../../../hooks/useUserCardData', () => ({ useUserCardData: vi.fn() }));"));

        let name_case = suite.tests.iter().find(|t| t.name == "renders with the name prop").unwrap();
        assert!(name_case.body.iter().any(|l| l.contains("getAllByText(/custom name/)")));
        let callback_case = suite.tests.iter().find(|t| t.name == "accepts the onSelect callback").unwrap();
        assert_eq!(callback_case.body[0], "const onSelect = vi.fn();");
    }

    #[test]
    fn test_navigation_is_mocked() {
        let source = r#"
import { useHistory } from 'react-router-dom';

function BackLink() {
  const history = useHistory();
  return <button onClick={() => history.goBack()}>Back</button>;
}
"#;
        let suite = suite_for(source);

        assert!(suite.imports.contains(&"import { MemoryRouter } from 'react-router-dom';".to_string()));
        assert!(suite.preamble.iter().any(|p| p.contains("useNavigate: () => mockNavigate,")));
        assert_eq!(suite.count(ScenarioKind::Navigation), 1);
    }
}
