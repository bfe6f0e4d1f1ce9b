//! Subcommand implementations. Each returns the lines to print rather than
//! printing, so the output can be checked in tests.

use std::fs::File;
use std::io::BufReader;
use std::path::Path as FsPath;

use anyhow::Context;
use smd_core::fieldpath::extract_field_paths_with;
use smd_core::{ExtractorConfig, Path, Schema, TypeRef, TypedValue, Value};
use tracing::{debug, info};

use crate::cli::{Command, PathsArgs, ValidateArgs};

/// Result of a subcommand.
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    /// Lines for stdout.
    pub lines: Vec<String>,
    /// False when the document failed validation.
    pub success: bool,
}

pub fn run(command: &Command) -> anyhow::Result<Report> {
    match command {
        Command::Paths(args) => paths(args),
        Command::Validate(args) => validate(args),
    }
}

fn paths(args: &PathsArgs) -> anyhow::Result<Report> {
    let value: Value = load_json(&args.input)?;
    let config = if args.candidate_keys.is_empty() {
        ExtractorConfig::default()
    } else {
        ExtractorConfig::with_candidate_key_fields(args.candidate_keys.iter().cloned())
    };
    debug!(candidates = ?config.candidate_key_fields, "extracting field paths");

    let set = extract_field_paths_with(&value, &config);
    Ok(Report {
        lines: sorted_lines(set.iter()),
        success: true,
    })
}

fn validate(args: &ValidateArgs) -> anyhow::Result<Report> {
    let schema: Schema = load_json(&args.schema)?;
    let value: Value = load_json(&args.input)?;
    let tv = TypedValue::new(&value, &schema, TypeRef::named(args.type_name.clone()));

    let mut leaves = Vec::new();
    let errs = tv.validate_with_leaves(&mut |path: &Path| leaves.push(path.clone()));

    if !errs.is_empty() {
        info!(errors = errs.len(), input = %args.input.display(), "document failed validation");
        return Ok(Report {
            lines: errs.iter().map(ToString::to_string).collect(),
            success: false,
        });
    }

    let lines = if args.leaves {
        sorted_lines(leaves.iter())
    } else {
        vec!["valid".to_string()]
    };
    Ok(Report {
        lines,
        success: true,
    })
}

fn load_json<T: serde::de::DeserializeOwned>(path: &FsPath) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {} as JSON", path.display()))
}

fn sorted_lines<'a>(paths: impl Iterator<Item = &'a Path>) -> Vec<String> {
    let mut lines: Vec<String> = paths.map(ToString::to_string).collect();
    lines.sort();
    lines
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;

    const SCHEMA: &str = r#"{
        "types": {
            "pod": {"struct": {"fields": [
                {"name": "name", "type": {"inline": {"scalar": "string"}}},
                {"name": "containers", "type": {"namedType": "containers"}}
            ]}},
            "containers": {"list": {
                "elementType": {"namedType": "container"},
                "elementRelationship": "associative",
                "keys": ["name"]
            }},
            "container": {"struct": {"fields": [
                {"name": "name", "type": {"inline": {"scalar": "string"}}},
                {"name": "image", "type": {"inline": {"scalar": "string"}}}
            ]}}
        }
    }"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    fn validate_args(doc: &NamedTempFile, schema: &NamedTempFile, leaves: bool) -> ValidateArgs {
        ValidateArgs {
            input: doc.path().to_path_buf(),
            schema: schema.path().to_path_buf(),
            type_name: "pod".to_string(),
            leaves,
        }
    }

    // ---- paths ----

    #[test]
    fn paths_prints_sorted_guessed_paths() {
        let doc = write_temp(r#"{"b": [{"name": "x", "v": 1}], "a": 2}"#);
        let report = run(&Command::Paths(PathsArgs {
            input: doc.path().to_path_buf(),
            candidate_keys: vec![],
        }))
        .expect("runs");
        assert!(report.success);
        assert_eq!(
            report.lines,
            vec![".a", r#".b[name="x"].name"#, r#".b[name="x"].v"#]
        );
    }

    #[test]
    fn paths_honours_custom_candidates() {
        let doc = write_temp(r#"[{"name": "x", "uid": 7}]"#);
        let report = run(&Command::Paths(PathsArgs {
            input: doc.path().to_path_buf(),
            candidate_keys: vec!["uid".to_string()],
        }))
        .expect("runs");
        assert_eq!(report.lines, vec!["[uid=7].name", "[uid=7].uid"]);
    }

    #[test]
    fn paths_reports_missing_file() {
        let err = run(&Command::Paths(PathsArgs {
            input: PathBuf::from("/definitely/not/here.json"),
            candidate_keys: vec![],
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to open"));
    }

    #[test]
    fn paths_reports_malformed_json() {
        let doc = write_temp("{not json");
        let err = run(&Command::Paths(PathsArgs {
            input: doc.path().to_path_buf(),
            candidate_keys: vec![],
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"));
    }

    // ---- validate ----

    #[test]
    fn validate_valid_document() {
        let schema = write_temp(SCHEMA);
        let doc = write_temp(r#"{"name": "p", "containers": [{"name": "c", "image": "i"}]}"#);

        let report = run(&Command::Validate(validate_args(&doc, &schema, false))).expect("runs");
        assert_eq!(
            report,
            Report {
                lines: vec!["valid".to_string()],
                success: true
            }
        );

        let report = run(&Command::Validate(validate_args(&doc, &schema, true))).expect("runs");
        assert_eq!(
            report.lines,
            vec![
                ".containers[name=\"c\"].image",
                ".containers[name=\"c\"].name",
                ".name",
            ]
        );
    }

    #[test]
    fn validate_invalid_document_lists_errors() {
        let schema = write_temp(SCHEMA);
        let doc = write_temp(r#"{"name": 1, "containers": [{"image": "i"}], "x": true}"#);
        let report = run(&Command::Validate(validate_args(&doc, &schema, true))).expect("runs");
        assert!(!report.success);
        assert_eq!(
            report.lines,
            vec![
                ".name: expected string, got integer 1",
                ".containers: element 0: associative list with keys has an element that omits key field name",
                "field x is not mentioned in the schema",
            ]
        );
    }

    #[test]
    fn validate_reports_bad_schema_file() {
        let schema = write_temp(r#"{"types": {"pod": {"nonsense": 1}}}"#);
        let doc = write_temp("{}");
        let err = run(&Command::Validate(validate_args(&doc, &schema, false))).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
