//! `<name>Service.ts`: a fetch based API client with retry and backoff

use super::types::declares_data;
use super::{ArtifactTemplate, RenderContext};
use crate::analysis::ComponentAnalysis;
use crate::pipeline::ConversionConfig;
use crate::synthesis::{ArtifactKind, ArtifactLayout, CodeBuilder, Result};
use crate::text;

pub struct ServiceTemplate;

pub(crate) const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u32 = 500;

/// Path part of an endpoint; absolute URLs lose their origin so requests
/// go through the configured base URL.
fn endpoint_path(endpoint: &str) -> String {
    let path = match endpoint.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => endpoint,
    };
    if path.starts_with('/') { path.to_string() } else { format!("/{path}") }
}

/// Distinct endpoint paths in the order they appear
pub(crate) fn endpoint_paths(analysis: &ComponentAnalysis) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for endpoint in &analysis.endpoints {
        let path = endpoint_path(endpoint);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Path requested by `fetch<Name>Data`
pub(crate) fn primary_path(analysis: &ComponentAnalysis, layout: &ArtifactLayout) -> String {
    endpoint_paths(analysis).into_iter().next().unwrap_or_else(|| format!("/{}", layout.kebab_name()))
}

/// `fetch<Segment>` for an extra endpoint, from its last literal path segment
fn method_for(path: &str) -> Option<String> {
    let segment = path
        .split('?')
        .next()?
        .split('/')
        .filter(|s| !s.is_empty() && !s.starts_with(':') && s.chars().any(|c| c.is_ascii_alphabetic()))
        .next_back()?;
    let name = text::to_pascal_case(segment);
    (!name.is_empty()).then(|| format!("fetch{name}"))
}

impl ArtifactTemplate for ServiceTemplate {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Service
    }

    fn applies(&self, analysis: &ComponentAnalysis, config: &ConversionConfig) -> bool {
        config.generate_services && analysis.feature_flags.uses_remote_data
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let layout = ctx.layout;
        let data_type = layout.data_type();
        let mut code = CodeBuilder::new();

        if ctx.plan.types && declares_data(ctx) {
            code.line(format!(
                "import type {{ {} }} from '{}';",
                data_type,
                ctx.import_path(ArtifactKind::Service, ArtifactKind::Types)
            ));
        } else {
            code.line(format!("export type {data_type} = unknown;"));
        }
        code.blank();

        code.line("const API_BASE_URL = import.meta.env.VITE_API_URL ?? '';");
        code.line(format!("const MAX_RETRIES = {MAX_RETRIES};"));
        code.line(format!("const RETRY_DELAY_MS = {RETRY_DELAY_MS};"));
        code.blank();

        let paths = endpoint_paths(ctx.analysis);
        let primary = primary_path(ctx.analysis, layout);
        let mut methods = vec![layout.service_fetch_method()];

        code.block(format!("export class {} {{", layout.service_class()), "}", |b| {
            b.line("constructor(private readonly baseUrl: string = API_BASE_URL) {}");
            b.blank();

            b.block("private async request<T>(path: string, init?: RequestInit): Promise<T> {", "}", |b| {
                b.line("let lastError: unknown;");
                b.block("for (let attempt = 0; attempt <= MAX_RETRIES; attempt++) {", "}", |b| {
                    b.open("try {");
                    b.block("const response = await fetch(`${this.baseUrl}${path}`, {", "});", |b| {
                        b.line("...init,");
                        b.line("headers: { 'Content-Type': 'application/json', ...init?.headers },");
                    });
                    b.block("if (!response.ok) {", "}", |b| {
                        b.line("throw new Error(`Request to ${path} failed with status ${response.status}`);");
                    });
                    b.line("return (await response.json()) as T;");
                    b.branch("} catch (error) {");
                    b.line("lastError = error;");
                    b.block("if (attempt < MAX_RETRIES) {", "}", |b| {
                        b.line("await new Promise((resolve) => setTimeout(resolve, RETRY_DELAY_MS * 2 ** attempt));");
                    });
                    b.close("}");
                });
                b.line("throw lastError;");
            });
            b.blank();

            b.block(format!("{}(): Promise<{data_type}> {{", layout.service_fetch_method()), "}", |b| {
                b.line(format!("return this.request<{data_type}>('{}');", text::escape_single_quoted(&primary)));
            });

            for path in paths.iter().skip(1) {
                let Some(method) = method_for(path) else { continue };
                if methods.contains(&method) {
                    continue;
                }
                b.blank();
                b.block(format!("{method}<T = unknown>(): Promise<T> {{"), "}", |b| {
                    b.line(format!("return this.request<T>('{}');", text::escape_single_quoted(path)));
                });
                methods.push(method);
            }
        });
        code.blank();
        code.line(format!("export const {} = new {}();", layout.service_instance(), layout.service_class()));

        Ok(code.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::synthesis::ArtifactSynthesizer;

    #[test]
    fn test_endpoint_path() {
        assert_eq!(endpoint_path("https://api.example.com/v1/users"), "/v1/users");
        assert_eq!(endpoint_path("https://api.example.com"), "/");
        assert_eq!(endpoint_path("api/orders"), "/api/orders");
        assert_eq!(method_for("/api/users/:id/orders"), Some("fetchOrders".to_string()));
        assert_eq!(method_for("/api/order-items?page=1"), Some("fetchOrderItems".to_string()));
    }

    #[test]
    fn test_service_methods_per_endpoint() {
        let source = r#"
function OrderTable() {
  const [orders, setOrders] = useState([]);
  useEffect(() => {
    fetch('https://shop.example.com/api/orders').then((r) => r.json()).then(setOrders);
    axios.get('/api/customers');
  }, []);
  return <table>{orders.map((o) => <tr key={o.id}><td>{o.total}</td></tr>)}</table>;
}
"#;
        let files = ArtifactSynthesizer::default().generate(&analyze(source, None)).unwrap();
        let service = files.iter().find(|f| f.artifact_kind == ArtifactKind::Service).unwrap();

        assert!(service.content.contains("export class OrderTableService {"));
        assert!(service.content.contains("const MAX_RETRIES = 3;"));
        assert!(service.content.contains("fetchOrderTableData(): Promise<OrderTableData> {"));
        assert!(service.content.contains("return this.request<OrderTableData>('/api/orders');"));
        assert!(service.content.contains("fetchCustomers<T = unknown>(): Promise<T> {"));
        assert!(service.content.contains("export const orderTableService = new OrderTableService();"));
        assert!(text::is_balanced(&service.content));
    }
}
