//! API client tests: requests, retry with backoff, failure and shared instance

use super::{TestContext, TestStrategy};
use crate::synthesis::ArtifactKind;
use crate::synthesis::templates::service::{MAX_RETRIES, primary_path};
use crate::test_gen::{ScenarioKind, TestCase, TestSuite};
use anyhow::Result;

/// Base URL the tests construct the client with
const TEST_BASE_URL: &str = "http://api.test";

const JSON_RESPONSE: &str = "const jsonResponse = (body: unknown, status = 200) =>
  ({ ok: status >= 200 && status < 300, status, json: async () => body }) as Response;";

pub struct ServiceStrategy;

impl TestStrategy for ServiceStrategy {
    fn target(&self) -> ArtifactKind {
        ArtifactKind::Service
    }

    fn generate(&self, ctx: &TestContext<'_>) -> Result<TestSuite> {
        let layout = ctx.layout;
        let class = layout.service_class();
        let instance = layout.service_instance();
        let method = layout.service_fetch_method();
        let path = primary_path(ctx.analysis, layout);
        let attempts = MAX_RETRIES + 1;

        let mut suite = TestSuite::new(&class, ArtifactKind::Service);
        suite.add_import(format!("import {{ {class}, {instance} }} from '{}';", ctx.import_path(ArtifactKind::Service)));
        suite.add_preamble(JSON_RESPONSE);
        suite.setup.push("vi.stubGlobal('fetch', vi.fn());".to_string());
        suite.setup.push("vi.useFakeTimers();".to_string());
        suite.teardown.push("vi.useRealTimers();".to_string());
        suite.teardown.push("vi.unstubAllGlobals();".to_string());

        let client = format!("const service = new {class}('{TEST_BASE_URL}');");

        suite.add_test(
            TestCase::new("fetches data from the primary endpoint", ScenarioKind::Data)
                .asynchronous()
                .line("vi.mocked(fetch).mockResolvedValue(jsonResponse([{ id: 1 }]));")
                .line(&client)
                .line(format!("await expect(service.{method}()).resolves.toEqual([{{ id: 1 }}]);"))
                .line(format!(
                    "expect(fetch).toHaveBeenCalledWith('{TEST_BASE_URL}{path}', expect.objectContaining({{ headers: expect.any(Object) }}));"
                )),
        );
        suite.add_test(
            TestCase::new("retries failed requests before giving up", ScenarioKind::Retry)
                .asynchronous()
                .line("vi.mocked(fetch).mockResolvedValue(jsonResponse({}, 500));")
                .line(&client)
                .line(format!("const assertion = expect(service.{method}()).rejects.toThrow('500');"))
                .line("await vi.runAllTimersAsync();")
                .line("await assertion;")
                .line(format!("expect(fetch).toHaveBeenCalledTimes({attempts});")),
        );
        suite.add_test(
            TestCase::new("recovers when a retry succeeds", ScenarioKind::Retry)
                .asynchronous()
                .line("vi.mocked(fetch)")
                .line("  .mockResolvedValueOnce(jsonResponse({}, 503))")
                .line("  .mockResolvedValueOnce(jsonResponse({ ok: true }));")
                .line(&client)
                .line(format!("const request = service.{method}();"))
                .line("await vi.runAllTimersAsync();")
                .line("await expect(request).resolves.toEqual({ ok: true });")
                .line("expect(fetch).toHaveBeenCalledTimes(2);"),
        );
        suite.add_test(
            TestCase::new("rejects when the network is unavailable", ScenarioKind::Error)
                .asynchronous()
                .line("vi.mocked(fetch).mockRejectedValue(new Error('offline'));")
                .line(&client)
                .line(format!("const assertion = expect(service.{method}()).rejects.toThrow('offline');"))
                .line("await vi.runAllTimersAsync();")
                .line("await assertion;"),
        );
        suite.add_test(
            TestCase::new("exports a shared instance", ScenarioKind::Shape)
                .line(format!("expect({instance}).toBeInstanceOf({class});")),
        );

        Ok(suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::synthesis::{ArtifactLayout, ArtifactPlan};

    #[test]
    fn test_service_scenarios() {
        let source = r#"
function OrderTable() {
  const [orders, setOrders] = useState([]);
  useEffect(() => { fetch('https://shop.example.com/api/orders').then((r) => r.json()).then(setOrders); }, []);
  return <table>{orders.length}</table>;
}
"#;
        let analysis = analyze(source, None);
        let layout = ArtifactLayout::new(&analysis.component_name, analysis.structural_tier);
        let plan = ArtifactPlan { types: true, hook: true, service: true, store: false };
        let ctx = TestContext { analysis: &analysis, layout: &layout, plan, target: ArtifactKind::Service, content: "" };
        let suite = ServiceStrategy.generate(&ctx).unwrap();

        assert_eq!(suite.imports, vec!["import { OrderTableService, orderTableService } from '../orderTableService';"]);
        assert_eq!(suite.count(ScenarioKind::Retry), 2);
        let retry = &suite.tests[1];
        assert!(retry.body.contains(&"expect(fetch).toHaveBeenCalledTimes(4);".to_string()));
        let first = &suite.tests[0];
        assert!(first.body.iter().any(|l| l.contains("'http://api.test/api/orders'")));
    }
}
