use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const SETTERS: &str = "image: nginx\ntag: 1.7.1\n";
const DEPLOYMENT: &str = "spec:\n  image: nginx:1.7.1\n  replicas: 3\n";

fn package() -> Result<CliTest> {
    let test = CliTest::with_file("setters.yaml", SETTERS)?;
    test.write_file("deploy.yaml", DEPLOYMENT)?;
    Ok(test)
}

#[test]
fn test_create_dry_run_reports_pending_annotations() -> Result<()> {
    let test = package()?;

    let output = run(&mut test.create_command())?;

    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stdout,
        "  --> deploy.yaml\n \
         2 -   image: nginx:1.7.1\n   \
         +   image: nginx:1.7.1 # kpt-set: ${image}:${tag}\n\
         \n\
         Would write 1 annotation(s) in 1 file(s).\n\
         Run with --apply to write these annotations.\n"
    );
    assert_eq!(test.read_file("deploy.yaml")?, DEPLOYMENT);
    Ok(())
}

#[test]
fn test_create_apply_writes_annotations() -> Result<()> {
    let test = package()?;

    let output = run(test.create_command().arg("--apply"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Wrote 1 annotation(s) in 1 file(s).\n");
    assert_eq!(
        test.read_file("deploy.yaml")?,
        "spec:\n  image: nginx:1.7.1 # kpt-set: ${image}:${tag}\n  replicas: 3\n"
    );
    // The setter config itself is never annotated
    assert_eq!(test.read_file("setters.yaml")?, SETTERS);
    Ok(())
}

#[test]
fn test_create_is_idempotent_after_apply() -> Result<()> {
    let test = package()?;
    run(test.create_command().arg("--apply"))?;

    let output = run(&mut test.create_command())?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Checked 1 file - no new annotations\n");
    Ok(())
}

#[test]
fn test_create_annotates_lists() -> Result<()> {
    let test = CliTest::with_file("setters.yaml", "env: [foo, bar]\n")?;
    test.write_file(
        "app/deploy.yaml",
        "spec:\n  env:\n  - bar\n  - foo\n  flags: [foo, bar]\n",
    )?;

    let output = run(test.create_command().arg("--apply"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        test.read_file("app/deploy.yaml")?,
        "spec:\n  env: # kpt-set: ${env}\n  - bar\n  - foo\n  flags: [foo, bar] # kpt-set: ${env}\n"
    );
    Ok(())
}

#[test]
fn test_create_verbose_lists_visited_fields() -> Result<()> {
    let test = package()?;

    let output = run(test.create_command().arg("--verbose"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.starts_with("FILE         FIELD          VALUE"));
    assert!(
        output
            .stdout
            .contains("deploy.yaml  spec.image     nginx:1.7.1  # kpt-set: ${image}:${tag}\n")
    );
    assert!(output.stdout.contains("deploy.yaml  spec.replicas  3\n"));
    Ok(())
}

#[test]
fn test_create_with_explicit_setters_file() -> Result<()> {
    let test = CliTest::with_file("config/values.yaml", "replicas: \"3\"\n")?;
    test.write_file("deploy.yaml", DEPLOYMENT)?;

    let output = run(test
        .create_command()
        .args(["--setters", "config/values.yaml", "--apply"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        test.read_file("deploy.yaml")?,
        "spec:\n  image: nginx:1.7.1\n  replicas: 3 # kpt-set: ${replicas}\n"
    );
    Ok(())
}

#[test]
fn test_create_uses_config_file_setters_path() -> Result<()> {
    let test = CliTest::with_file(
        ".settersrc.json",
        r#"{ "settersFile": "kpt/setters.yaml" }"#,
    )?;
    test.write_file("kpt/setters.yaml", SETTERS)?;
    test.write_file("deploy.yaml", DEPLOYMENT)?;

    let output = run(test.create_command().arg("--apply"))?;

    assert_eq!(output.code, Some(0));
    assert!(test.read_file("deploy.yaml")?.contains("# kpt-set: ${image}:${tag}"));
    Ok(())
}

#[test]
fn test_create_empty_setters_is_an_error() -> Result<()> {
    let test = CliTest::with_file("setters.yaml", "")?;
    test.write_file("deploy.yaml", DEPLOYMENT)?;

    let output = run(&mut test.create_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error:"));
    assert_eq!(test.read_file("deploy.yaml")?, DEPLOYMENT);
    Ok(())
}

#[test]
fn test_create_missing_setters_is_an_error() -> Result<()> {
    let test = CliTest::with_file("deploy.yaml", DEPLOYMENT)?;

    let output = run(&mut test.create_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read setter config"));
    Ok(())
}

#[test]
fn test_create_non_scalar_key_aborts_without_writing() -> Result<()> {
    let test = package()?;
    test.write_file("bad.yaml", "? [a, b]\n: nginx\n")?;

    let output = run(test.create_command().arg("--apply"))?;

    assert_eq!(output.code, Some(2));
    assert_eq!(test.read_file("deploy.yaml")?, DEPLOYMENT);
    Ok(())
}

#[test]
fn test_create_reports_unparsable_files() -> Result<()> {
    let test = package()?;
    test.write_file("broken.yaml", "spec: [unclosed\n")?;

    let output = run(test.create_command().arg("--apply"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("failed to load broken.yaml"));
    assert!(test.read_file("deploy.yaml")?.contains("# kpt-set: ${image}:${tag}"));
    Ok(())
}

#[test]
fn test_create_keeps_block_scalar_content() -> Result<()> {
    let test = CliTest::with_file("setters.yaml", "image: nginx\n")?;
    let input = "spec:\n  image: >-\n    nginx\n  script: |\n    run nginx\n    done\n";
    test.write_file("deploy.yaml", input)?;

    let output = run(test.create_command().arg("--apply"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        test.read_file("deploy.yaml")?,
        "spec:\n  image: >- # kpt-set: ${image}\n    nginx\n  script: |\n    run nginx\n    done\n"
    );
    Ok(())
}
