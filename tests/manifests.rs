#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

const KUBECTL_STUB: &str = r#"#!/bin/sh
if [ "$1" = "config" ] && [ "$2" = "current-context" ]; then
    echo "test-cluster"
    exit 0
fi
if [ "$1" = "config" ] && [ "$2" = "view" ]; then
    printf '%s' "${STUB_NAMESPACE:-}"
    exit 0
fi
echo "kubectl-stub: $*"
"#;

const TEST_CONFIG: &str = "mode: warn-only
protectedNamespaces:
  - kube-system
  - istio-system
";

const DEPLOYMENT: &str = "apiVersion: apps/v1
kind: Deployment
metadata:
  name: nginx
  namespace: istio-system
";

const SERVICE: &str = "apiVersion: v1
kind: Service
metadata:
  name: nginx-svc
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), TEST_CONFIG).unwrap();
        let stub = dir.path().join("kubectl");
        fs::write(&stub, KUBECTL_STUB).unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
        fs::create_dir(dir.path().join("manifests")).unwrap();
        Self { dir }
    }

    fn manifest(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join("manifests").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn manifests_dir(&self) -> String {
        self.dir.path().join("manifests").to_string_lossy().into_owned()
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("safekubectl");
        cmd.env("SAFEKUBECTL_CONFIG", self.dir.path().join("config.yaml"))
            .env("SAFEKUBECTL_KUBECTL", self.dir.path().join("kubectl"))
            .env("HOME", self.dir.path());
        cmd
    }
}

mod should_pass_through {
    use super::*;

    #[test]
    fn create_from_file() {
        let ws = Workspace::new();
        let file = ws.manifest("deploy.yaml", DEPLOYMENT);
        ws.cmd()
            .args(["create", "-f", &file])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("kubectl-stub: create -f"));
    }

    #[test]
    fn dry_run_without_reading_manifest() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["apply", "-f", "/nonexistent/x.yaml", "--dry-run=client"])
            .assert()
            .success()
            .stdout(predicate::str::contains("kubectl-stub: apply"));
    }
}

mod should_warn_and_proceed {
    use super::*;

    #[test]
    fn unprotected_manifest() {
        let ws = Workspace::new();
        let file = ws.manifest("svc.yaml", SERVICE);
        ws.cmd()
            .args(["apply", "-f", &file])
            .assert()
            .success()
            .stdout(predicate::str::contains("Service/nginx-svc (namespace: default)"))
            .stdout(predicate::str::contains("Proceeding with operation..."))
            .stdout(predicate::str::contains("kubectl-stub: apply"));
    }

    #[test]
    fn json_manifest() {
        let ws = Workspace::new();
        let file = ws.manifest(
            "pod.json",
            r#"{"apiVersion":"v1","kind":"Pod","metadata":{"name":"web","namespace":"team"}}"#,
        );
        ws.cmd()
            .args(["apply", "-f", &file])
            .assert()
            .success()
            .stdout(predicate::str::contains("Pod/web (namespace: team)"));
    }
}

mod should_prompt {
    use super::*;

    #[test]
    fn protected_namespace_in_manifest() {
        let ws = Workspace::new();
        let file = ws.manifest("deploy.yaml", DEPLOYMENT);
        ws.cmd()
            .args(["apply", "-f", &file])
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Deployment/nginx (namespace: istio-system)"))
            .stdout(predicate::str::contains("protected namespace: istio-system"))
            .stdout(predicate::str::contains("Operation aborted."))
            .stdout(predicate::str::contains("kubectl-stub").not());
    }

    #[test]
    fn multi_document_lists_every_resource() {
        let ws = Workspace::new();
        let file = ws.manifest("all.yaml", &format!("{DEPLOYMENT}---\n{SERVICE}"));
        ws.cmd()
            .args(["apply", "-f", &file])
            .write_stdin("y\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Deployment/nginx"))
            .stdout(predicate::str::contains("Service/nginx-svc"))
            .stdout(predicate::str::contains("kubectl-stub: apply"));
    }

    #[test]
    fn namespace_from_context() {
        let ws = Workspace::new();
        let file = ws.manifest("svc.yaml", SERVICE);
        ws.cmd()
            .args(["delete", "-f", &file])
            .env("STUB_NAMESPACE", "kube-system")
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Service/nginx-svc (namespace: kube-system)"))
            .stdout(predicate::str::contains("Operation aborted."));
    }

    #[test]
    fn symlinked_manifest_in_directory() {
        let ws = Workspace::new();
        let target = ws.dir.path().join("deploy.yaml");
        fs::write(&target, DEPLOYMENT).unwrap();
        std::os::unix::fs::symlink(&target, ws.dir.path().join("manifests").join("prod.yaml"))
            .unwrap();

        ws.cmd()
            .args(["apply", "-f", &ws.manifests_dir()])
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Deployment/nginx (namespace: istio-system)"))
            .stdout(predicate::str::contains("protected namespace: istio-system"))
            .stdout(predicate::str::contains("Operation aborted."))
            .stdout(predicate::str::contains("kubectl-stub").not());
    }

    #[test]
    fn recursive_directory() {
        let ws = Workspace::new();
        ws.manifest("svc.yaml", SERVICE);
        ws.manifest("nested/deploy.yaml", DEPLOYMENT);
        ws.cmd()
            .args(["apply", "-R", "-f", &ws.manifests_dir()])
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Service/nginx-svc"))
            .stdout(predicate::str::contains("Deployment/nginx"));
    }
}

mod should_fail {
    use super::*;

    #[test]
    fn missing_manifest() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["apply", "-f", "/nonexistent/deploy.yaml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "safekubectl: failed to parse /nonexistent/deploy.yaml",
            ))
            .stdout(predicate::str::contains("kubectl-stub").not());
    }

    #[test]
    fn invalid_yaml() {
        let ws = Workspace::new();
        let file = ws.manifest("bad.yaml", "kind: [unclosed\n");
        ws.cmd()
            .args(["apply", "-f", &file])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to parse"));
    }

    #[test]
    fn stdin_manifest() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["apply", "-f", "-"])
            .write_stdin("kind: Pod\n")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("kubectl-stub").not());
    }

    #[test]
    fn declined_remote_manifest() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["apply", "-f", "https://example.invalid/deploy.yaml"])
            .write_stdin("n\n")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("REMOTE MANIFEST"))
            .stdout(predicate::str::contains("kubectl-stub").not());
    }
}
