//! Store tests: initial state, one update per binding, reset and stable setters

use super::{TestContext, TestStrategy, updated_value};
use crate::synthesis::ArtifactKind;
use crate::synthesis::templates::store::initial_value;
use crate::test_gen::{ScenarioKind, TestCase, TestSuite};
use anyhow::{Result, bail};

pub struct StoreStrategy;

impl TestStrategy for StoreStrategy {
    fn target(&self) -> ArtifactKind {
        ArtifactKind::Store
    }

    fn generate(&self, ctx: &TestContext<'_>) -> Result<TestSuite> {
        let state = &ctx.analysis.state_bindings;
        let Some(first) = state.first() else {
            bail!("store for {} has no state bindings to test", ctx.layout.name());
        };
        let store = ctx.layout.store_hook();

        let mut suite = TestSuite::new(&store, ArtifactKind::Store);
        suite.add_import(format!("import {{ {store} }} from '{}';", ctx.import_path(ArtifactKind::Store)));
        suite.setup.push(format!("{store}.getState().reset();"));

        let mut initial = TestCase::new("starts from the initial state", ScenarioKind::Render)
            .line(format!("const state = {store}.getState();"));
        for binding in state {
            initial = initial.line(format!("expect(state.{}).toEqual({});", binding.name, initial_value(binding)));
        }
        suite.add_test(initial);

        for binding in state {
            let setter = binding.setter_name();
            let value = updated_value(binding);
            let mut case = TestCase::new(format!("updates {}", binding.name), ScenarioKind::State)
                .line(format!("{store}.getState().{setter}({value});"))
                .line(format!("expect({store}.getState().{}).toEqual({value});", binding.name));
            if binding.inferred_type == "boolean" {
                case = case
                    .line(format!("{store}.getState().{setter}((prev) => !prev);"))
                    .line(format!("expect({store}.getState().{}).toEqual(!{value});", binding.name));
            }
            suite.add_test(case);
        }

        let mut reset = TestCase::new("resets to the initial state", ScenarioKind::Rerender);
        for binding in state {
            reset = reset.line(format!("{store}.getState().{}({});", binding.setter_name(), updated_value(binding)));
        }
        reset = reset.line(format!("{store}.getState().reset();"));
        for binding in state {
            reset = reset.line(format!("expect({store}.getState().{}).toEqual({});", binding.name, initial_value(binding)));
        }
        suite.add_test(reset);

        let setter = first.setter_name();
        suite.add_test(
            TestCase::new("keeps setters stable across updates", ScenarioKind::Shape)
                .line(format!("const {{ {setter} }} = {store}.getState();"))
                .line(format!("{setter}({});", updated_value(first)))
                .line(format!("expect({store}.getState().{setter}).toBe({setter});")),
        );

        Ok(suite)
    }
}
