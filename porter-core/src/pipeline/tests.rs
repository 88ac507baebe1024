use super::*;
use crate::analysis::UNKNOWN_COMPONENT;
use crate::diagnostics::DiagnosticKind;
use crate::synthesis::ArtifactKind;
use std::path::Path;
use tempfile::TempDir;

const DIVIDER: &str = "const Divider = () => <hr />;\n\nexport default Divider;\n";

const USER_LIST: &str = r#"
import React, { useState, useEffect } from 'react';
import { useHistory } from 'react-router-dom';

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

fn config_for(dir: &TempDir) -> ConversionConfig {
    ConversionConfig {
        output_root: dir.path().join("src"),
        project_root: dir.path().to_path_buf(),
        ..ConversionConfig::default()
    }
}

fn paths(result: &ConversionResult) -> Vec<String> {
    result.files.iter().map(|f| f.display_path()).collect()
}

#[tokio::test]
async fn test_leaf_without_facts_yields_component_and_test() {
    let dir = TempDir::new().unwrap();
    let result = convert(DIVIDER, None, config_for(&dir)).await;

    assert!(result.success(), "{:?}", result.diagnostics.errors);
    assert_eq!(
        paths(&result),
        vec!["components/leaf/Divider/Divider.tsx", "components/leaf/Divider/__tests__/Divider.test.tsx"]
    );
    assert_eq!(result.metrics.file_count, 2);
    assert!(dir.path().join("src/components/leaf/Divider/Divider.tsx").is_file());
    assert!(result.build_outcome.is_none());
}

#[tokio::test]
async fn test_remote_data_component_yields_four_artifacts_and_four_tests() {
    let dir = TempDir::new().unwrap();
    let result = convert(USER_LIST, None, config_for(&dir)).await;

    assert!(result.success(), "{:?}", result.diagnostics.errors);
    let kinds: Vec<ArtifactKind> = result.files.iter().filter(|f| !f.is_test()).map(|f| f.artifact_kind).collect();
    assert_eq!(kinds, vec![ArtifactKind::Component, ArtifactKind::Types, ArtifactKind::Hook, ArtifactKind::Service]);
    assert_eq!(result.test_files().count(), 4);

    for file in &result.files {
        let on_disk = std::fs::read_to_string(dir.path().join("src").join(&file.relative_path)).unwrap();
        assert_eq!(on_disk, file.content, "{}", file.display_path());
    }
    assert!(dir.path().join("src/hooks/useUserListData.ts").is_file());
    assert!(dir.path().join("src/services/userListService.ts").is_file());

    let lines: usize = result.files.iter().map(|f| f.line_count()).sum();
    assert_eq!(result.metrics.line_count, lines);
    assert_eq!(result.metrics.complexity, ComplexityClass::Medium);
    assert!(!result.metrics.applied_optimizations.is_empty());
}

#[tokio::test]
async fn test_empty_source_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let result = convert("", None, config_for(&dir)).await;

    assert!(!result.success());
    assert_eq!(result.component_name, UNKNOWN_COMPONENT);
    assert!(result.diagnostics.count(DiagnosticKind::AnalysisError) >= 1);
    assert!(result.files.is_empty());
    assert!(!dir.path().join("src").exists());
}

#[tokio::test]
async fn test_generation_flags_are_honoured() {
    let dir = TempDir::new().unwrap();
    let config = ConversionConfig {
        generate_tests: false,
        apply_optimizations: false,
        generate_services: false,
        ..config_for(&dir)
    };
    let result = convert(USER_LIST, None, config).await;

    assert!(result.success());
    assert_eq!(result.test_files().count(), 0);
    assert!(result.files.iter().all(|f| f.artifact_kind != ArtifactKind::Service));
    assert!(result.metrics.applied_optimizations.is_empty());
    assert!(!result.files[0].content.contains("memo("));
}

#[tokio::test]
async fn test_rerun_overwrites_same_paths() {
    let dir = TempDir::new().unwrap();
    let coordinator = PipelineCoordinator::new(config_for(&dir));

    let first = coordinator.convert(USER_LIST, None).await;
    let second = coordinator.convert(USER_LIST, None).await;

    assert_eq!(paths(&first), paths(&second));
    assert_eq!(first.files, second.files);
}

#[tokio::test]
async fn test_declared_name_drives_paths() {
    let dir = TempDir::new().unwrap();
    let result = convert(DIVIDER, Some("Separator"), config_for(&dir)).await;

    assert_eq!(result.component_name, "Separator");
    assert!(Path::new(&paths(&result)[0]).starts_with("components/assembly/Separator"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_failing_test_run_keeps_files() {
    let plain_dir = TempDir::new().unwrap();
    let plain = convert(USER_LIST, None, config_for(&plain_dir)).await;

    let dir = TempDir::new().unwrap();
    let config = ConversionConfig {
        run_tests: true,
        test_command: Some(vec![
            "sh".to_string(),
            "-c".to_string(),
            "echo ' FAIL  src/components/composite/UserList/__tests__/UserList.test.tsx > UserList > renders'; exit 1"
                .to_string(),
        ]),
        ..config_for(&dir)
    };
    let result = convert(USER_LIST, None, config).await;

    let outcome = result.build_outcome.as_ref().unwrap();
    assert!(!outcome.success);
    assert!(!outcome.errors.is_empty());
    assert!(!result.success());
    assert_eq!(result.diagnostics.count(DiagnosticKind::BuildError), 1);

    assert_eq!(result.files, plain.files);
    for file in &result.files {
        assert!(dir.path().join("src").join(&file.relative_path).is_file());
    }
}

#[tokio::test]
async fn test_json_report_carries_success() {
    let dir = TempDir::new().unwrap();
    let result = convert(DIVIDER, None, config_for(&dir)).await;

    let report: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(report["success"], serde_json::Value::Bool(true));
    assert_eq!(report["result"]["component_name"], "Divider");
    assert_eq!(report["result"]["metrics"]["complexity"], "low");
}
