use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_direct_reference_is_used() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "export const label = t('a.b');")?;

    let report = test.analyze_report()?;

    assert_eq!(report["total_defined"], 1);
    assert_eq!(report["used_count"], 1);
    assert_eq!(report["used"]["a.b"]["value"], "Hello");
    assert_eq!(report["used"]["a.b"]["locations"][0], "src/app.tsx");

    Ok(())
}

#[test]
fn test_template_prefix_is_possibly_dynamic() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"c": "World"}}"#)?;
    test.write_file("src/app.tsx", "const label = t(`a.${name}`);")?;

    let report = test.analyze_report()?;

    assert_eq!(report["possibly_dynamic_count"], 1);
    assert_eq!(report["possibly_dynamic"]["a.c"]["matched_pattern"], "a.${name}");
    assert_eq!(report["possibly_dynamic"]["a.c"]["pattern_file"], "src/app.tsx");

    Ok(())
}

#[test]
fn test_bare_literal_is_possibly_dynamic_via_deep_scan() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"x": {"y": "Z"}}"#)?;
    test.write_file("src/config.ts", r#"const config = { titleKey: "x.y" };"#)?;

    let report = test.analyze_report()?;

    assert_eq!(
        report["possibly_dynamic"]["x.y"]["matched_pattern"],
        "string literal reference in source"
    );
    assert_eq!(report["possibly_dynamic"]["x.y"]["pattern_file"], "src/config.ts");

    Ok(())
}

#[test]
fn test_unreferenced_key_is_unused() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"orphan": {"key": "never used"}}"#)?;
    test.write_file("src/app.tsx", "export const nothing = 1;")?;

    let report = test.analyze_report()?;

    assert_eq!(report["unused_count"], 1);
    assert_eq!(report["unused"]["orphan.key"]["value"], "never used");

    Ok(())
}

#[test]
fn test_key_used_only_in_tests_is_tagged_test_only() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"banner": {"title": "Hi"}, "cta": {"label": "Go"}}"#)?;
    test.write_file("src/__tests__/banner.test.tsx", "t('banner.title')")?;
    test.write_file("src/cta.tsx", "t('cta.label')")?;

    let report = test.analyze_report()?;

    assert_eq!(report["used_count"], 2);
    assert_eq!(report["test_only_count"], 1);
    assert_eq!(report["test_only_keys"][0], "banner.title");

    Ok(())
}

#[test]
fn test_buckets_partition_the_universe() -> Result<()> {
    let test = CliTest::with_key_document(
        r#"{
            "used": {"key": "a"},
            "dynamic": {"key": "b"},
            "threaded": {"key": "c"},
            "dead": {"key": "d"}
        }"#,
    )?;
    test.write_file(
        "src/app.tsx",
        r#"
        t('used.key');
        t(`dynamic.${kind}`);
        const config = { labelKey: "threaded.key" };
        "#,
    )?;

    let report = test.analyze_report()?;

    assert_eq!(report["total_defined"], 4);
    assert_eq!(report["used_count"], 1);
    assert_eq!(report["possibly_dynamic_count"], 2);
    assert_eq!(report["unused_count"], 1);

    Ok(())
}

#[test]
fn test_direct_reference_beats_deep_scan() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "t('a.b')")?;
    test.write_file("src/config.ts", r#"const k = "a.b";"#)?;

    let report = test.analyze_report()?;

    assert_eq!(report["used_count"], 1);
    assert_eq!(report["possibly_dynamic_count"], 0);
    assert_eq!(report["used"]["a.b"]["locations"][0], "src/app.tsx");

    Ok(())
}

#[test]
fn test_evidence_includes_all_referencing_files() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/one.tsx", "t('a.b')")?;
    test.write_file("src/two.tsx", "t('a.b')")?;

    let report = test.analyze_report()?;

    let locations = report["used"]["a.b"]["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 2);

    Ok(())
}

#[test]
fn test_variable_patterns_are_listed_but_match_nothing() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "t(labelKey)")?;

    let report = test.analyze_report()?;

    assert_eq!(report["unused_count"], 1);
    assert_eq!(report["dynamic_patterns"][0]["pattern"], "variable: labelKey");
    assert!(report["dynamic_patterns"][0]["prefix"].is_null());

    Ok(())
}

#[test]
fn test_excluded_directories_are_not_scanned() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("node_modules/lib/index.js", "t('a.b')")?;
    test.write_file("dist/bundle.js", "t('a.b')")?;

    let report = test.analyze_report()?;

    assert_eq!(report["unused_count"], 1);

    Ok(())
}

#[test]
fn test_missing_key_document_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.tsx", "t('a.b')")?;

    let output = test.analyze_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("messages/en.json"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_unparsable_key_document_is_fatal() -> Result<()> {
    let test = CliTest::with_key_document("{ not json }")?;

    let output = test.analyze_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse key document"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_strict_fails_on_unused_keys() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"orphan": {"key": "never"}}"#)?;

    let output = test.analyze_command().arg("--strict").output()?;

    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_strict_passes_without_unused_keys() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "t('a.b')")?;

    let output = test.analyze_command().arg("--strict").output()?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_output_flag_writes_report_file() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "t('a.b')")?;

    let output = test
        .analyze_command()
        .args(["--output", "report.json"])
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(report["used_count"], 1);

    Ok(())
}

#[test]
fn test_config_file_overrides_key_document_location() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lokeyrc.json", r#"{ "keyDocument": "./i18n/en-US.json" }"#)?;
    test.write_file("i18n/en-US.json", r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "t('a.b')")?;

    let report = test.analyze_report()?;

    assert_eq!(report["used_count"], 1);

    Ok(())
}

#[test]
fn test_cli_key_document_overrides_config() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"ignored": {"key": "x"}}"#)?;
    test.write_file("custom/keys.json", r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "t('a.b')")?;

    let output = test
        .analyze_command()
        .args(["--key-document", "./custom/keys.json"])
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["total_defined"], 1);
    assert_eq!(report["used"]["a.b"]["value"], "Hello");

    Ok(())
}

#[test]
fn test_config_ignores_exclude_files() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file(".lokeyrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;
    test.write_file("src/generated/api.ts", "t('a.b')")?;

    let report = test.analyze_report()?;

    assert_eq!(report["unused_count"], 1);

    Ok(())
}

#[test]
fn test_summary_goes_to_stderr_not_stdout() -> Result<()> {
    let test = CliTest::with_key_document(r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("src/app.tsx", "t('a.b')")?;

    let output = test.analyze_command().output()?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Total defined keys: 1"), "stderr: {}", stderr);
    assert!(stderr.contains("no unused keys"), "stderr: {}", stderr);

    // stdout is the report alone.
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["total_defined"], 1);

    Ok(())
}

#[test]
fn test_source_root_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("project/messages/en.json", r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("project/src/app.tsx", "t('a.b')")?;

    let output = test
        .analyze_command()
        .args(["--source-root", "project"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["used"]["a.b"]["locations"][0], "src/app.tsx");

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("init"));

    Ok(())
}
