//! `<name>Store.ts`: a zustand store holding the component's state

use super::{ArtifactTemplate, RenderContext};
use crate::analysis::{ComponentAnalysis, StateBinding};
use crate::pipeline::ConversionConfig;
use crate::synthesis::{ArtifactKind, CodeBuilder, Result, SynthesisError};

pub struct StoreTemplate;

/// State bindings needed before state moves out of the component
pub(crate) const MIN_STORE_BINDINGS: usize = 3;

/// Initial value for the store; expressions that depend on the component
/// scope cannot move and start as `null`.
pub(crate) fn initial_value(state: &StateBinding) -> String {
    let expr = state.initial_expr.trim();
    if state.inferred_type != "unknown" || matches!(expr, "null" | "undefined") {
        expr.to_string()
    } else {
        "null".to_string()
    }
}

impl ArtifactTemplate for StoreTemplate {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Store
    }

    fn applies(&self, analysis: &ComponentAnalysis, config: &ConversionConfig) -> bool {
        config.generate_state_container && analysis.state_bindings.len() >= MIN_STORE_BINDINGS
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let state = &ctx.analysis.state_bindings;
        if state.is_empty() {
            return Err(SynthesisError::MissingInput(format!(
                "store for {} needs at least one state binding",
                ctx.layout.name()
            )));
        }

        let name = ctx.layout.name();
        let values_type = format!("{name}StoreValues");
        let state_type = format!("{name}StoreState");
        let mut code = CodeBuilder::new();

        code.line("import { create } from 'zustand';").blank();

        code.block(format!("export type {values_type} = {{"), "};", |b| {
            for binding in state {
                b.line(format!("{}: {};", binding.name, binding.inferred_type));
            }
        });
        code.blank();

        code.block(format!("export interface {state_type} extends {values_type} {{"), "}", |b| {
            for binding in state {
                let ty = &binding.inferred_type;
                b.line(format!("{}: (value: {ty} | ((prev: {ty}) => {ty})) => void;", binding.setter_name()));
            }
            b.line("reset: () => void;");
        });
        code.blank();

        code.block(format!("const initialState: {values_type} = {{"), "};", |b| {
            for binding in state {
                b.lines(format!("{}: {},", binding.name, initial_value(binding)));
            }
        });
        code.blank();

        code.block(
            format!("export const {} = create<{state_type}>()((set) => ({{", ctx.layout.store_hook()),
            "}));",
            |b| {
                b.line("...initialState,");
                for binding in state {
                    let ty = &binding.inferred_type;
                    let field = &binding.name;
                    b.line(format!("{}: (value) =>", binding.setter_name()));
                    b.line(format!(
                        "  set((state) => ({{ {field}: typeof value === 'function' ? (value as (prev: {ty}) => {ty})(state.{field}) : value }})),"
                    ));
                }
                b.line("reset: () => set(initialState),");
            },
        );

        Ok(code.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::synthesis::{ArtifactLayout, ArtifactPlan, ArtifactSynthesizer};

    const TODO_BOARD: &str = r#"
import React, { useState } from 'react';

export default function TodoBoard() {
  const [items, setItems] = useState([]);
  const [filter, setFilter] = useState('all');
  const [draft, setDraft] = useState('');
  const [editing, setEditing] = useState(false);

  const add = () => {
    setItems([...items, { title: draft, done: false }]);
    setDraft('');
    setEditing(false);
  };

  return (
    <section>
      <input value={draft} onChange={(e) => setDraft(e.target.value)} onFocus={() => setEditing(true)} />
      <button onClick={add}>Add</button>
      <select value={filter} onChange={(e) => setFilter(e.target.value)} />
      {items.map((item) => <p key={item.title}>{item.title}</p>)}
      {editing && <small>editing</small>}
    </section>
  );
}
"#;

    #[test]
    fn test_store_holds_every_binding() {
        let files = ArtifactSynthesizer::default().generate(&analyze(TODO_BOARD, None)).unwrap();
        let store = files.iter().find(|f| f.artifact_kind == ArtifactKind::Store).unwrap();

        assert_eq!(store.relative_path.to_string_lossy().replace('\\', "/"), "stores/todoBoardStore.ts");
        assert!(store.content.starts_with("import { create } from 'zustand';\n"));
        assert!(store.content.contains("  filter: string;\n"));
        assert!(store.content.contains("  setEditing: (value: boolean | ((prev: boolean) => boolean)) => void;\n"));
        assert!(store.content.contains("  items: [],\n"));
        assert!(store.content.contains("  draft: '',\n"));
        assert!(store.content.contains("export const useTodoBoardStore = create<TodoBoardStoreState>()((set) => ({"));
        assert!(store.content.contains("reset: () => set(initialState),"));
        assert!(crate::text::is_balanced(&store.content));
    }

    #[test]
    fn test_small_state_has_no_store() {
        let source = "function Toggle() {\n  const [on, setOn] = useState(false);\n  return <button onClick={() => setOn(!on)} />;\n}\n";
        let files = ArtifactSynthesizer::default().generate(&analyze(source, None)).unwrap();
        assert!(files.iter().all(|f| f.artifact_kind != ArtifactKind::Store));
    }

    #[test]
    fn test_store_without_state_is_missing_input() {
        let analysis = analyze("const Empty = () => <div />;", None);
        let layout = ArtifactLayout::new(&analysis.component_name, analysis.structural_tier);
        let plan = ArtifactPlan { store: true, ..ArtifactPlan::default() };
        let ctx = RenderContext { analysis: &analysis, layout: &layout, plan: &plan };

        assert!(matches!(StoreTemplate.render(&ctx), Err(SynthesisError::MissingInput(_))));
    }
}
