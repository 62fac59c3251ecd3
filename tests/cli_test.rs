//! CLI integration tests for schema-literal binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("schema-literal"))
}

// Helper to create a temp input file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const STORED_SCHEMA: &str = r#"{
    "type": "struct",
    "fields": [
        {"name": "id", "type": "long", "nullable": false, "metadata": {}},
        {"name": "tags",
         "type": {"type": "array", "elementType": "string", "containsNull": true},
         "nullable": true, "metadata": {}}
    ]
}"#;

mod convert_command {
    use super::*;

    #[test]
    fn basic_convert() {
        let dir = TempDir::new().unwrap();
        let input = write_temp_file(
            &dir,
            "schema.txt",
            "StructType(List(StructField(age,IntegerType,true)))\n",
        );

        cmd()
            .args(["convert", input.to_str().unwrap()])
            .assert()
            .success()
            .stdout(r#"StructType([StructField("age",IntegerType(),True)])"#.to_owned() + "\n");
    }

    #[test]
    fn convert_from_stdin() {
        cmd()
            .arg("convert")
            .write_stdin("StructField(age,List(IntegerType,true),false)")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"StructField("age",[IntegerType(),True],False)"#,
            ));
    }

    #[test]
    fn convert_dash_reads_stdin() {
        cmd()
            .args(["convert", "-"])
            .write_stdin("List(a,b)")
            .assert()
            .success()
            .stdout(predicate::str::contains("[a,b]"));
    }

    #[test]
    fn convert_with_output_file() {
        let dir = TempDir::new().unwrap();
        let input = write_temp_file(&dir, "schema.txt", "StructType(List(StructField(a,LongType,false)))");
        let output = dir.path().join("schema.py");

        cmd()
            .args([
                "convert",
                input.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content, r#"StructType([StructField("a",LongType(),False)])"#);
    }

    #[test]
    fn convert_per_line() {
        cmd()
            .args(["convert", "--per-line"])
            .write_stdin("StructType(List(StructField(a,LongType,true),StructField(b,LongType,true)))")
            .assert()
            .success()
            .stdout(predicate::str::contains("[\nStructField(\"a\""))
            .stdout(predicate::str::contains(",\nStructField(\"b\""));
    }

    #[test]
    fn convert_selected_stages() {
        cmd()
            .args(["convert", "--stages", "containers,booleans"])
            .write_stdin("StructType(List(StructField(a,LongType,true)))")
            .assert()
            .success()
            .stdout(predicate::str::contains("StructType([StructField(a,LongType,True)])"));
    }

    #[test]
    fn convert_unknown_stage() {
        cmd()
            .args(["convert", "--stages", "containers,quotes"])
            .write_stdin("List(a)")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown stage \"quotes\""));
    }

    #[test]
    fn convert_custom_tokens() {
        cmd()
            .args([
                "convert",
                "--container-token",
                "Seq",
                "--field-token",
                "Field",
            ])
            .write_stdin("Seq(Field(a,LongType,true))")
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"[Field("a",LongType(),True)]"#));
    }

    #[test]
    fn convert_empty_token_rejected() {
        cmd()
            .args(["convert", "--container-token", ""])
            .write_stdin("List(a)")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid grammar"));
    }

    #[test]
    fn convert_missing_file() {
        cmd()
            .args(["convert", "/nonexistent/schema.txt"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn convert_passes_unknown_text_through() {
        cmd()
            .arg("convert")
            .write_stdin("nothing to convert here")
            .assert()
            .success()
            .stdout("nothing to convert here\n");
    }
}

mod from_json_command {
    use super::*;

    #[test]
    fn basic_from_json() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", STORED_SCHEMA);

        cmd()
            .args(["from-json", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"StructType([StructField("id",LongType(),False),StructField("tags",ArrayType(StringType(),True),True)])"#,
            ));
    }

    #[test]
    fn from_json_raw() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", STORED_SCHEMA);

        cmd()
            .args(["from-json", schema.to_str().unwrap(), "--raw"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "StructType(List(StructField(id,LongType,false),StructField(tags,ArrayType(StringType,true),true)))",
            ));
    }

    #[test]
    fn from_json_double_encoded() {
        let dir = TempDir::new().unwrap();
        let stored = serde_json::to_string(STORED_SCHEMA).unwrap();
        let schema = write_temp_file(&dir, "schema.json", &stored);

        cmd()
            .args(["from-json", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"StructField("id",LongType(),False)"#));
    }

    #[test]
    fn from_json_per_line_to_file() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", STORED_SCHEMA);
        let output = dir.path().join("schema.py");

        cmd()
            .args([
                "from-json",
                schema.to_str().unwrap(),
                "--per-line",
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn from_json_unsupported_type() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type":"struct","fields":[{"name":"d","type":"interval","nullable":true}]}"#,
        );

        cmd()
            .args(["from-json", schema.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unsupported data type \"interval\""));
    }

    #[test]
    fn from_json_invalid_json() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", "not json");

        cmd()
            .args(["from-json", schema.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn from_json_missing_file() {
        cmd()
            .args(["from-json", "/nonexistent/schema.json"])
            .assert()
            .code(3);
    }

    #[cfg(feature = "remote")]
    #[test]
    fn from_json_url() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/schema.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(STORED_SCHEMA)
            .create();

        cmd()
            .args(["from-json", &format!("{}/schema.json", server.url())])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"StructField("id",LongType(),False)"#));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn check_valid_document() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", STORED_SCHEMA);

        cmd()
            .args(["check", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn check_valid_document_json() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", STORED_SCHEMA);

        cmd()
            .args(["check", schema.to_str().unwrap(), "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"valid":true}"#));
    }

    #[test]
    fn check_invalid_document() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type":"struct","fields":[{"name":"a","type":"long","nullable":"yes"}]}"#,
        );

        cmd()
            .args(["check", schema.to_str().unwrap()])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("/fields/0/nullable"));
    }

    #[test]
    fn check_invalid_document_json() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type":"struct","fields":[{"type":"long","nullable":true}]}"#,
        );

        let output = cmd()
            .args(["check", schema.to_str().unwrap(), "--json"])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(result["valid"], false);
        assert!(!result["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn check_missing_file_json() {
        cmd()
            .args(["check", "/nonexistent/schema.json", "--json"])
            .assert()
            .code(3)
            .stdout(predicate::str::contains(r#""valid":false"#));
    }
}
