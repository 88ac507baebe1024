// Pattern extractor tests
//
// Realistic Create-React-App style components, class and functional

use super::*;
use crate::diagnostics::DiagnosticKind;

const GREETING: &str = r#"
import React from 'react';

const Greeting = ({ name, isActive = false }) => {
  return (
    <div className="p-3 text-primary">
      Hello {name} {isActive ? '!' : ''}
    </div>
  );
};

export default Greeting;
"#;

const COUNTER: &str = r#"
import React, { Component } from 'react';
import PropTypes from 'prop-types';

class Counter extends Component {
  state = { count: 0, step: 1 };

  handleIncrement = () => {
    this.setState({ count: this.state.count + this.state.step });
  };

  componentDidMount() {
    document.title = `Count ${this.state.count}`;
  }

  render() {
    const { label } = this.props;
    return (
      <button className="btn btn-primary" onClick={this.handleIncrement}>
        {label}: {this.state.count}
      </button>
    );
  }
}

Counter.propTypes = {
  label: PropTypes.string.isRequired,
};

export default Counter;
"#;

const USER_LIST: &str = r#"
import React, { useState, useEffect } from 'react';
import { useHistory } from 'react-router-dom';

// Lists users (don't forget pagination)
function UserList({ onSelect }) {
  const [users, setUsers] = useState([]);
  const [loading, setLoading] = useState(true);
  const history = useHistory();

  useEffect(() => {
    fetch('/api/users')
      .then((res) => res.json())
      .then((data) => {
        setUsers(data);
        setLoading(false);
      });
  }, []);

  if (loading) {
    return <p>Loading...</p>;
  }

  return (
    <ul className="list-group">
      {users.map((u) => (
        <li key={u.id} onClick={() => { onSelect(u); history.push(`/users/${u.id}`); }}>{u.name}</li>
      ))}
    </ul>
  );
}

export default UserList;
"#;

const AVATAR: &str = r#"
import PropTypes from 'prop-types';

function Avatar({ src, size, rounded }) {
  return (
    <img src={src} width={size} className={rounded ? 'rounded-circle' : ''} alt="" />
  );
}

Avatar.propTypes = {
  src: PropTypes.string.isRequired,
  size: PropTypes.number,
  rounded: PropTypes.bool,
};

Avatar.defaultProps = {
  size: 48,
  rounded: true,
};

export default Avatar;
"#;

fn prop<'a>(analysis: &'a ComponentAnalysis, name: &str) -> &'a PropSpec {
    analysis
        .props
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("prop {name} not extracted"))
}

#[test]
fn test_functional_component_props() {
    let analysis = analyze(GREETING, None);

    assert_eq!(analysis.component_name, "Greeting");
    assert_eq!(analysis.name_source, NameSource::Declaration);
    assert_eq!(analysis.component_kind, ComponentKind::Functional);
    assert_eq!(analysis.props.len(), 2);

    let name = prop(&analysis, "name");
    assert!(name.required);
    assert_eq!(name.inferred_type, "unknown");

    let active = prop(&analysis, "isActive");
    assert!(!active.required);
    assert_eq!(active.inferred_type, "boolean");
    assert_eq!(active.default_expr.as_deref(), Some("false"));

    assert!(analysis.state_bindings.is_empty());
    assert!(analysis.render_markup.as_deref().is_some_and(|m| m.contains("Hello {name}")));
    assert!(analysis.style_tokens.contains("text-primary"));
    assert_eq!(analysis.complexity_class(), ComplexityClass::Low);
    assert!(!analysis.diagnostics.has_errors());
}

#[test]
fn test_class_component() {
    let analysis = analyze(COUNTER, None);

    assert_eq!(analysis.component_name, "Counter");
    assert!(analysis.is_class_component());

    let names: Vec<&str> = analysis.state_bindings.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["count", "step"]);
    assert!(analysis.state_bindings.iter().all(|s| s.inferred_type == "number"));
    assert_eq!(analysis.state_bindings[0].setter_name(), "setCount");

    assert_eq!(analysis.effect_primitives.len(), 1);
    assert_eq!(analysis.effect_primitives[0].kind, EffectKind::Mount);

    assert_eq!(analysis.handlers.len(), 1);
    assert!(analysis.handlers[0].source.starts_with("const handleIncrement = () =>"));

    let label = prop(&analysis, "label");
    assert_eq!(label.inferred_type, "string");
    assert!(label.required);

    assert!(analysis.style_tokens.contains("btn-primary"));
    assert!(analysis.body_statements.as_deref().is_some_and(|b| b.contains("this.props")));
    assert!(analysis.render_markup.as_deref().is_some_and(|m| m.starts_with("<button")));
    assert!(analysis.diagnostics.warnings.is_empty(), "{:?}", analysis.diagnostics.warnings);
}

#[test]
fn test_hooks_effects_and_flags() {
    let analysis = analyze(USER_LIST, None);

    assert_eq!(analysis.component_name, "UserList");
    assert_eq!(analysis.structural_tier, StructuralTier::Composite);

    assert_eq!(analysis.state_bindings.len(), 2);
    assert_eq!(analysis.state_bindings[0].inferred_type, "unknown[]");
    assert_eq!(analysis.state_bindings[1].inferred_type, "boolean");
    assert_eq!(analysis.state_bindings[1].setter.as_deref(), Some("setLoading"));

    assert_eq!(analysis.effect_primitives.len(), 1);
    assert_eq!(analysis.effect_primitives[0].kind, EffectKind::Effect);
    assert!(analysis.effect_primitives[0].dependencies.is_empty());

    assert_eq!(analysis.endpoints, vec!["/api/users".to_string()]);
    assert!(analysis.feature_flags.uses_navigation);
    assert!(analysis.feature_flags.uses_remote_data);
    assert!(!analysis.feature_flags.uses_media);

    assert_eq!(prop(&analysis, "onSelect").inferred_type, "() => void");
    assert!(
        analysis
            .imports
            .iter()
            .any(|i| i.name == "useHistory" && i.binding_kind == BindingKind::Named)
    );

    // 1 prop + 2 state + 1 effect + navigation + remote data
    assert_eq!(analysis.complexity_score(), 12.5);
    assert_eq!(analysis.complexity_class(), ComplexityClass::Medium);

    // The early return stays in the body, the final one becomes the markup
    let body = analysis.body_statements.as_deref().unwrap_or_default();
    assert!(body.contains("<p>Loading...</p>"));
    assert!(analysis.render_markup.as_deref().is_some_and(|m| m.starts_with("<ul")));
}

#[test]
fn test_prop_types_and_defaults() {
    let analysis = analyze(AVATAR, None);

    let src = prop(&analysis, "src");
    assert_eq!(src.inferred_type, "string");
    assert!(src.required);

    let size = prop(&analysis, "size");
    assert_eq!(size.inferred_type, "number");
    assert!(!size.required);
    assert_eq!(size.default_expr.as_deref(), Some("48"));

    let rounded = prop(&analysis, "rounded");
    assert_eq!(rounded.inferred_type, "boolean");
    assert_eq!(rounded.default_expr.as_deref(), Some("true"));

    assert!(analysis.feature_flags.uses_media);
}

#[test]
fn test_empty_source_yields_sentinel() {
    let analysis = analyze("", None);

    assert_eq!(analysis.component_name, UNKNOWN_COMPONENT);
    assert_eq!(analysis.name_source, NameSource::Fallback);
    assert_eq!(analysis.diagnostics.count(DiagnosticKind::AnalysisError), 1);

    let analysis = analyze("   \n// nothing here\n", None);
    assert!(analysis.diagnostics.has_errors());
}

#[test]
fn test_declared_name_wins() {
    let source = r#"
const Item = () => <li />;

function List() {
  return (
    <ul><Item /></ul>
  );
}
"#;
    let analysis = analyze(source, Some("List"));
    assert_eq!(analysis.component_name, "List");
    assert_eq!(analysis.name_source, NameSource::Declared);
    assert!(analysis.render_markup.as_deref().is_some_and(|m| m.contains("<ul>")));

    let analysis = analyze(source, None);
    assert_eq!(analysis.component_name, "Item");
    assert_eq!(analysis.render_markup.as_deref(), Some("<li />"));
}

#[test]
fn test_export_only_name_is_low_confidence() {
    let analysis = analyze("import Base from './Base';\n\nexport default Base;\n", None);

    assert_eq!(analysis.component_name, "Base");
    assert_eq!(analysis.name_source, NameSource::Export);
    assert!(!analysis.diagnostics.has_errors());
    assert!(analysis.diagnostics.warnings.iter().any(|w| w.message.contains("confidence is low")));
}

#[test]
fn test_hooks_inside_class_is_an_error() {
    let source = r#"
class Broken extends React.Component {
  render() {
    const [open, setOpen] = useState(false);
    return <div onClick={() => setOpen(!open)} />;
  }
}
"#;
    let analysis = analyze(source, None);
    assert!(analysis.is_class_component());
    assert_eq!(analysis.diagnostics.count(DiagnosticKind::AnalysisError), 1);
    assert!(analysis.diagnostics.errors[0].message.contains("useState"));
}

#[test]
fn test_unused_prop_warning() {
    let analysis = analyze("const Badge = ({ label, tone }) => (<span>{label}</span>);", None);

    let unused: Vec<&str> = analysis
        .diagnostics
        .warnings
        .iter()
        .filter(|w| w.message.contains("never used"))
        .map(|w| w.message.as_str())
        .collect();
    assert_eq!(unused, vec!["prop 'tone' is declared but never used"]);
}

#[test]
fn test_props_alias() {
    let source = r#"
export function Title(props) {
  return <h1 className={props.className}>{props.text}</h1>;
}
"#;
    let analysis = analyze(source, None);
    assert_eq!(analysis.props_alias.as_deref(), Some("props"));
    let names: Vec<&str> = analysis.props.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["className", "text"]);
    assert_eq!(prop(&analysis, "className").inferred_type, "string");
}

#[test]
fn test_unbalanced_source_warns() {
    let analysis = analyze("function Broken() {\n  return (<div>);\n", None);
    assert!(analysis.diagnostics.warnings.iter().any(|w| w.message.contains("unbalanced")));
}

#[test]
fn test_analysis_is_deterministic() {
    let first = analyze(USER_LIST, None);
    let second = analyze(USER_LIST, None);

    assert_eq!(first.complexity_score(), second.complexity_score());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_unclosed_class_ending_in_non_ascii_degrades_to_warning() {
    let analysis = analyze("class Card extends Component {\n  render() { return <p>é", None);

    assert_eq!(analysis.component_name, "Card");
    assert!(analysis.is_class_component());
    assert!(analysis.diagnostics.warnings.iter().any(|w| w.message.contains("unbalanced")));
}

#[test]
fn test_markup_with_non_breaking_space_line() {
    let source = "const Card = () => {\n  return (\n    <div>\n   \u{a0}\n    </div>\n  );\n};\nexport default Card;\n";
    let analysis = analyze(source, None);

    let markup = analysis.render_markup.as_deref().unwrap();
    assert!(markup.starts_with("<div>"));
    assert!(markup.ends_with("</div>"));
}

#[test]
fn test_complexity_class_boundaries() {
    assert_eq!(ComplexityClass::from_score(0.0), ComplexityClass::Low);
    assert_eq!(ComplexityClass::from_score(4.9), ComplexityClass::Low);
    assert_eq!(ComplexityClass::from_score(5.0), ComplexityClass::Medium);
    assert_eq!(ComplexityClass::from_score(14.5), ComplexityClass::Medium);
    assert_eq!(ComplexityClass::from_score(15.0), ComplexityClass::High);
}

#[test]
fn test_animated_remote_data_component_is_high_complexity() {
    let source = format!("import {{ motion }} from 'framer-motion';\n{USER_LIST}");
    let analysis = analyze(&source, None);

    assert!(analysis.feature_flags.uses_animation);
    assert!(analysis.feature_flags.uses_remote_data);
    assert!(analysis.complexity_score() >= 15.0);
    assert_eq!(analysis.complexity_class(), ComplexityClass::High);
    assert_eq!(analyze(USER_LIST, None).complexity_class(), ComplexityClass::Medium);
}
