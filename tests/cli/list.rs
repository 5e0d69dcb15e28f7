use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

fn annotated_package() -> Result<CliTest> {
    let test = CliTest::with_file("setters.yaml", "image: nginx\nenv: [foo, bar]\nunused: x\n")?;
    test.write_file(
        "deploy.yaml",
        "spec:\n  image: nginx # kpt-set: ${image}\n  env: # kpt-set: ${env}\n  - bar\n  - foo\n",
    )?;
    test.write_file(
        "svc/service.yaml",
        "metadata:\n  name: nginx # kpt-set: ${image}\n",
    )?;
    Ok(test)
}

#[test]
fn test_list_prints_table() -> Result<()> {
    let test = annotated_package()?;

    let output = run(&mut test.list_command())?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "NAME    VALUE      TYPE    COUNT\n\
         env     [bar foo]  list    1\n\
         image   nginx      scalar  2\n\
         unused  x          scalar  0\n"
    );
    Ok(())
}

#[test]
fn test_list_prints_json() -> Result<()> {
    let test = annotated_package()?;

    let output = run(test.list_command().arg("--json"))?;

    assert_eq!(output.code, Some(0));
    let records: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        records,
        serde_json::json!([
            { "name": "env", "value": "[bar foo]", "type": "list", "count": 1 },
            { "name": "image", "value": "nginx", "type": "scalar", "count": 2 },
            { "name": "unused", "value": "x", "type": "scalar", "count": 0 },
        ])
    );
    Ok(())
}

#[test]
fn test_list_ignores_changed_values() -> Result<()> {
    let test = CliTest::with_file("setters.yaml", "image: nginx\n")?;
    test.write_file("deploy.yaml", "spec:\n  image: httpd # kpt-set: ${image}\n")?;

    let output = run(test.list_command().arg("--json"))?;

    let records: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(records[0]["count"], 0);
    Ok(())
}

#[test]
fn test_list_after_create() -> Result<()> {
    let test = CliTest::with_file("setters.yaml", "image: nginx\ntag: 1.7.1\n")?;
    test.write_file("deploy.yaml", "spec:\n  image: nginx:1.7.1\n  tag: 1.7.1\n")?;
    run(test.create_command().arg("--apply"))?;

    let output = run(test.list_command().arg("--json"))?;

    let records: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(records[0]["name"], "image");
    assert_eq!(records[0]["count"], 1);
    assert_eq!(records[1]["name"], "tag");
    assert_eq!(records[1]["count"], 2);
    Ok(())
}

#[test]
fn test_list_empty_setters_is_an_error() -> Result<()> {
    let test = CliTest::with_file("setters.yaml", "")?;

    let output = run(&mut test.list_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error:"));
    Ok(())
}

#[test]
fn test_list_path_must_be_a_directory() -> Result<()> {
    let test = CliTest::with_file("setters.yaml", "image: nginx\n")?;

    let output = run(test.list_command().arg("missing"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Package path is not a directory"));
    Ok(())
}
