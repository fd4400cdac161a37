//! End-to-end manifest parsing against the fixtures in `tests/testdata`

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use ssh_runner::core::{
    CloneSettings, Condition, Conditions, FailurePolicy, Pipeline, Platform, Resource, Secret, Server,
    Signature, Step, Variable, Workspace,
};
use ssh_runner::manifest::{self, Manifest, ManifestError, ParseOptions, RawResource, Registry};
use ssh_runner::ssh::{self, LintError};
use std::io::Write;
use std::path::PathBuf;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

fn expected_pipeline() -> Pipeline {
    let mut environment = IndexMap::new();
    environment.insert("GOOS".to_string(), Variable::literal("linux"));
    environment.insert("GOARCH".to_string(), Variable::literal("arm64"));

    Pipeline {
        kind: "pipeline".to_string(),
        r#type: "ssh".to_string(),
        name: "default".to_string(),
        version: "1".to_string(),
        server: Server {
            host: Variable::literal("localhost"),
            user: Variable::literal("root"),
            password: Variable::literal("correct-horse-battery-staple"),
            ssh_key: Variable::secret("private_key"),
        },
        workspace: Workspace {
            path: "/drone/src".to_string(),
        },
        platform: Platform {
            os: "linux".to_string(),
            arch: "arm64".to_string(),
            ..Default::default()
        },
        clone: CloneSettings {
            depth: 50,
            ..Default::default()
        },
        trigger: Conditions {
            branch: Condition::include(["master"]),
            ..Default::default()
        },
        steps: vec![Step {
            name: "build".to_string(),
            shell: "/bin/sh".to_string(),
            detach: false,
            depends_on: vec!["clone".to_string()],
            commands: vec!["go build".to_string(), "go test".to_string()],
            environment,
            failure: FailurePolicy::Never,
            when: Conditions {
                event: Condition::include(["push"]),
                ..Default::default()
            },
        }],
        ..Default::default()
    }
}

#[test]
fn test_parse() {
    let manifest = Manifest::from_file(testdata("manifest.yml"), &Registry::builtin()).unwrap();

    let want = vec![
        Resource::Signature(Signature {
            kind: "signature".to_string(),
            hmac: "a8842634682b78946a2".to_string(),
        }),
        Resource::Secret(Secret {
            kind: "secret".to_string(),
            r#type: "encrypted".to_string(),
            name: "username".to_string(),
            data: "f0e4c2f76c58916ec25".to_string(),
        }),
        Resource::Pipeline(Box::new(expected_pipeline())),
    ];

    assert_eq!(manifest.resources, want);

    let pipeline = manifest.find_pipeline("default").unwrap();
    assert_eq!(pipeline.steps[0].depends_on, vec!["clone"]);
}

#[test]
fn test_parse_err() {
    let err = Manifest::from_file(testdata("malformed.yml"), &Registry::builtin()).unwrap_err();
    assert!(matches!(err, ManifestError::Malformed(_)), "got {:?}", err);
}

#[test]
fn test_parse_lint_err() {
    let err = Manifest::from_file(testdata("linterr.yml"), &Registry::builtin()).unwrap_err();
    assert_eq!(err.lint_error(), Some(&LintError::DuplicateName("build".to_string())));
}

#[test]
fn test_parse_no_match() {
    let raw = RawResource::new("pipeline", "docker");
    assert!(ssh::parse(&raw).unwrap().is_none());
}

#[test]
fn test_match() {
    assert!(ssh::matches(&RawResource::new("pipeline", "ssh")));
    assert!(!ssh::matches(&RawResource::new("approval", "ssh")), "expect kind mismatch");
    assert!(!ssh::matches(&RawResource::new("pipeline", "docker")), "expect type mismatch");
}

#[test]
fn test_matcher_only_claims_pipeline_ssh() {
    let kinds = ["pipeline", "secret", "signature", "approval", "Pipeline", ""];
    let types = ["ssh", "docker", "exec", "SSH", ""];

    for kind in kinds {
        for t in types {
            let expected = kind == "pipeline" && t == "ssh";
            assert_eq!(
                ssh::matches(&RawResource::new(kind, t)),
                expected,
                "kind={:?} type={:?}",
                kind,
                t
            );
        }
    }
}

#[test]
fn test_round_trip_preserves_order() {
    let yaml = r#"
kind: pipeline
type: ssh
name: ordered
server: { host: localhost, user: root, password: root }
steps:
  - name: zeta
    commands: [ "echo 3", "echo 1", "echo 2" ]
  - name: alpha
    depends_on: [ zeta, mid ]
    commands: [ "make" ]
    environment:
      Z: last
      A: first
  - name: mid
"#;
    let manifest = Manifest::from_yaml(yaml, &Registry::builtin()).unwrap();
    let pipeline = manifest.find_pipeline("ordered").unwrap();

    let encoded = serde_yaml::to_string(pipeline).unwrap();
    let body = serde_yaml::from_str(&encoded).unwrap();
    let raw = RawResource::from_value(0, body).unwrap().unwrap();
    let decoded = ssh::parse(&raw).unwrap().unwrap();

    assert_eq!(&decoded, pipeline);
    assert_eq!(decoded.step_names(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(decoded.steps[0].commands, vec!["echo 3", "echo 1", "echo 2"]);
    assert_eq!(decoded.steps[1].depends_on, vec!["zeta", "mid"]);
    let keys: Vec<_> = decoded.steps[1].environment.keys().cloned().collect();
    assert_eq!(keys, vec!["Z", "A"]);
}

#[test]
fn test_lint_error_after_successful_decode() {
    let yaml = r#"
kind: pipeline
type: ssh
server: { host: localhost, user: root, ssh_key: { from_secret: key } }
steps:
  - name: build
    detach: true
"#;
    let raw = RawResource::from_value(0, serde_yaml::from_str(yaml).unwrap())
        .unwrap()
        .unwrap();
    assert!(ssh::decode(&raw).is_ok());

    let err = Manifest::from_yaml(yaml, &Registry::builtin()).unwrap_err();
    assert_eq!(err.lint_error(), Some(&LintError::DetachedStep("build".to_string())));
}

#[test]
fn test_missing_step_name_is_a_lint_error() {
    let yaml = r#"
kind: pipeline
type: ssh
server: { host: localhost, user: root, password: root }
steps:
  - commands: [ ls ]
"#;
    let err = Manifest::from_yaml(yaml, &Registry::builtin()).unwrap_err();
    assert_eq!(err.lint_error(), Some(&LintError::MissingName));
}

#[test]
fn test_parse_file_from_temp_dir() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "kind: pipeline\ntype: ssh\nname: remote\nserver:\n  host: {{ from_secret: host }}\n  user: deploy\n  ssh_key: {{ from_secret: key }}\n"
    )
    .unwrap();

    let manifest = manifest::parse_file(file.path(), &Registry::builtin(), ParseOptions::default()).unwrap();
    let pipeline = manifest.find_pipeline("remote").unwrap();
    assert_eq!(pipeline.server.host, Variable::secret("host"));
    assert_eq!(pipeline.secret_refs(), vec!["host", "key"]);
}
