//! End-to-end cloning between local cluster files

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ankra::domain::cluster::clone::{
    merge_stacks, referenced_files, scaffold_target, CloneSource, CopyOutcome, StackAction,
};
use ankra::{CloneOptions, ImportClusterConfig};

const SOURCE_YAML: &str = r#"
apiVersion: v1
kind: ImportCluster
metadata:
  name: prod-cluster
  description: Production
spec:
  stacks:
    - name: monitoring
      manifests:
        - name: alert-rules
          from_file: manifests/alerts.yaml
          namespace: monitoring
      addons:
        - name: grafana
          chart_name: grafana
          chart_version: 7.3.0
          configuration_type: standalone
          configuration:
            from_file: values/grafana.yaml
"#;

fn write_source(dir: &Path) -> std::path::PathBuf {
    let cluster = dir.join("cluster.yaml");
    fs::write(&cluster, SOURCE_YAML).unwrap();
    fs::create_dir_all(dir.join("manifests")).unwrap();
    fs::write(dir.join("manifests/alerts.yaml"), "kind: ConfigMap\n").unwrap();
    fs::create_dir_all(dir.join("values")).unwrap();
    fs::write(dir.join("values/grafana.yaml"), "adminPassword: secret\n").unwrap();
    cluster
}

#[tokio::test]
async fn local_clone_creates_target_with_files() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let source_path = write_source(source_dir.path());
    let target_path = target_dir.path().join("cloned.yaml");

    let source = CloneSource::parse(source_path.to_str().unwrap());
    let source_config = source.load_config().await.unwrap();
    let mut target_config = scaffold_target(&source_config);

    let report = merge_stacks(&source_config, &mut target_config, &CloneOptions::default());
    assert_eq!(report.added(), 1);

    for stack in &source_config.spec.stacks {
        for rel in referenced_files(stack) {
            let outcome = source
                .copy_asset(&rel, target_dir.path(), false, false)
                .await
                .unwrap();
            assert_eq!(outcome, CopyOutcome::Copied);
        }
    }
    target_config.save(&target_path).unwrap();

    let reloaded = ImportClusterConfig::load(&target_path).unwrap();
    assert_eq!(reloaded.metadata.name, "prod-cloned-cluster");
    assert_eq!(reloaded.metadata.description, "Cloned cluster");
    assert_eq!(reloaded.spec.stacks.len(), 1);
    assert_eq!(reloaded.spec.stacks[0].manifests[0].name, "alert-rules");

    assert_eq!(
        fs::read_to_string(target_dir.path().join("manifests/alerts.yaml")).unwrap(),
        "kind: ConfigMap\n"
    );
    assert_eq!(
        fs::read_to_string(target_dir.path().join("values/grafana.yaml")).unwrap(),
        "adminPassword: secret\n"
    );
}

#[tokio::test]
async fn merge_into_existing_target_skips_conflicting_stack() {
    let source_dir = TempDir::new().unwrap();
    let source_path = write_source(source_dir.path());

    let source = CloneSource::parse(source_path.to_str().unwrap());
    let source_config = source.load_config().await.unwrap();

    // Target already carries a stack with the same name.
    let mut target_config = scaffold_target(&source_config);
    target_config
        .spec
        .stacks
        .push(source_config.spec.stacks[0].clone());

    let report = merge_stacks(&source_config, &mut target_config, &CloneOptions::default());
    assert_eq!(report.skipped(), 1);
    assert!(matches!(
        report.decisions[0].action,
        StackAction::Skipped {
            name_conflict: true,
            ..
        }
    ));
    assert_eq!(target_config.spec.stacks.len(), 1);
}

#[tokio::test]
async fn copy_asset_honours_force_for_existing_files() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let source_path = write_source(source_dir.path());

    fs::create_dir_all(target_dir.path().join("manifests")).unwrap();
    fs::write(
        target_dir.path().join("manifests/alerts.yaml"),
        "kind: Secret\n",
    )
    .unwrap();

    let source = CloneSource::parse(source_path.to_str().unwrap());

    let outcome = source
        .copy_asset("manifests/alerts.yaml", target_dir.path(), false, false)
        .await
        .unwrap();
    assert_eq!(outcome, CopyOutcome::SkippedExisting);
    assert_eq!(
        fs::read_to_string(target_dir.path().join("manifests/alerts.yaml")).unwrap(),
        "kind: Secret\n"
    );

    let outcome = source
        .copy_asset("manifests/alerts.yaml", target_dir.path(), false, true)
        .await
        .unwrap();
    assert_eq!(outcome, CopyOutcome::Copied);
    assert_eq!(
        fs::read_to_string(target_dir.path().join("manifests/alerts.yaml")).unwrap(),
        "kind: ConfigMap\n"
    );
}

#[tokio::test]
async fn copy_asset_skips_when_only_missing_and_present() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let source_path = write_source(source_dir.path());

    fs::create_dir_all(target_dir.path().join("values")).unwrap();
    fs::write(target_dir.path().join("values/grafana.yaml"), "kept: true\n").unwrap();

    let source = CloneSource::parse(source_path.to_str().unwrap());
    let outcome = source
        .copy_asset("values/grafana.yaml", target_dir.path(), true, true)
        .await
        .unwrap();

    assert_eq!(outcome, CopyOutcome::SkippedExisting);
    assert_eq!(
        fs::read_to_string(target_dir.path().join("values/grafana.yaml")).unwrap(),
        "kept: true\n"
    );
}

#[tokio::test]
async fn missing_source_file_is_reported_not_fatal() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let source_path = write_source(source_dir.path());
    fs::remove_file(source_dir.path().join("values/grafana.yaml")).unwrap();

    let source = CloneSource::parse(source_path.to_str().unwrap());
    let outcome = source
        .copy_asset("values/grafana.yaml", target_dir.path(), false, false)
        .await
        .unwrap();

    assert_eq!(outcome, CopyOutcome::SourceMissing);
    assert!(!target_dir.path().join("values/grafana.yaml").exists());
}
