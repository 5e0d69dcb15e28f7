use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("init"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Created .settersrc.json\n");
    let config: serde_json::Value = serde_json::from_str(&test.read_file(".settersrc.json")?)?;
    assert_eq!(config["settersFile"], "setters.yaml");
    assert_eq!(config["includes"], serde_json::json!(["**/*.yaml", "**/*.yml"]));
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::with_file(".settersrc.json", "{}")?;

    let output = run(test.command().arg("init"))?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stderr, "Error: .settersrc.json already exists\n");
    assert_eq!(test.read_file(".settersrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_loaded_by_create() -> Result<()> {
    let test = CliTest::new()?;
    run(test.command().arg("init"))?;
    test.write_file("setters.yaml", "image: nginx\n")?;
    test.write_file("deploy.yml", "image: nginx\n")?;

    let output = run(test.create_command().arg("--apply"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(test.read_file("deploy.yml")?, "image: nginx # kpt-set: ${image}\n");
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(&mut test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Usage: kpt-setters"));
    assert!(!test.root_has(".settersrc.json"));
    Ok(())
}
