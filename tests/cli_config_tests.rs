/// Integration tests for configuration loading and catalog assembly
use llm_cost_calculator::config::{load_config, UsageOverrides};
use llm_cost_calculator::pricing::UserRange;
use std::io::Write;

fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_catalog_file_overrides_builtin_prices() {
    let catalog = write_file(
        ".json",
        r#"{"models": [
            {"name": "OpenAPI GPT4", "provider": "openai", "input_rate": 0.01, "output_rate": 0.03},
            {"name": "gpt-4o-mini", "input_rate": 0.00015, "output_rate": 0.0006}
        ]}"#,
    );
    let config = write_file(
        ".toml",
        &format!(
            "[catalog]\npath = \"{}\"\n",
            catalog.path().display().to_string().replace('\\', "/")
        ),
    );

    let cfg = load_config(config.path()).unwrap();
    let catalog = cfg.catalog.build().unwrap();

    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.get("OpenAPI GPT4").unwrap().rate.input_rate, 0.01);
    assert_eq!(catalog.get("gpt-4o-mini").unwrap().provider, "openai");
}

#[test]
fn test_inline_entry_overrides_file_entry() {
    let catalog = write_file(
        ".toml",
        r#"
        [[models]]
        name = "Local Llama"
        provider = "self-hosted"
        input_rate = 0.001
        output_rate = 0.002
        "#,
    );
    let config = write_file(
        ".toml",
        &format!(
            r#"
            [catalog]
            path = "{}"

            [[catalog.models]]
            name = "Local Llama"
            provider = "self-hosted"
            input_rate = 0.0
            output_rate = 0.0
            "#,
            catalog.path().display().to_string().replace('\\', "/")
        ),
    );

    let cfg = load_config(config.path()).unwrap();
    let catalog = cfg.catalog.build().unwrap();

    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.get("Local Llama").unwrap().rate.input_rate, 0.0);
}

#[test]
fn test_sweep_flags_fitted_into_limits() {
    let cfg = load_config(&std::path::PathBuf::from("does-not-exist.toml")).unwrap();
    let range = cfg
        .sweep_range(Some(UserRange {
            start: 1,
            end: 4_000_000_000,
            step: 1_000,
        }))
        .unwrap();
    assert_eq!((range.start, range.end), (100, 20_000));
    assert_eq!(range.point_count(), 20);
}

#[test]
fn test_catalog_without_builtin() {
    let config = write_file(
        ".toml",
        r#"
        [catalog]
        include_builtin = false

        [[catalog.models]]
        name = "Only Model"
        provider = "local"
        input_rate = 0.001
        output_rate = 0.002

        [defaults]
        model = "Only Model"
        "#,
    );

    let cfg = load_config(config.path()).unwrap();
    let catalog = cfg.catalog.build().unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains(&cfg.defaults.model));
}

#[test]
fn test_invalid_limits_fail_to_load() {
    let config = write_file(
        ".toml",
        r#"
        [limits.num_users]
        min = 5000
        max = 100
        "#,
    );

    assert!(load_config(config.path()).is_err());
}

#[test]
fn test_configured_limits_drive_clamping() {
    let config = write_file(
        ".toml",
        r#"
        [limits.num_users]
        min = 1
        max = 1000

        [defaults]
        num_users = 10
        "#,
    );

    let cfg = load_config(config.path()).unwrap();
    let usage = cfg.usage(&UsageOverrides {
        num_users: Some(5000),
        ..UsageOverrides::default()
    });
    assert_eq!(usage.num_users, 1000);

    let usage = cfg.usage(&UsageOverrides::default());
    assert_eq!(usage.num_users, 10);
}
