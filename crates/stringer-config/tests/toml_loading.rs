//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use stringer_config::StringerConfig;

fn from_file() -> Figment {
    Figment::from(Serialized::defaults(StringerConfig::default())).merge(Toml::file("config.toml"))
}

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[entry]
unit_count = 8
operator = "Night Shift"
autosave = false

[timing]
validation_debounce_ms = 150
autosave_debounce_ms = 5000

[validation]
quality_floor_pct = 85.5
outlier_ceiling = 640

[storage]
data_dir = "/srv/stringer"

[logging]
filter = "stringer_session=debug"
"#,
        )?;

        let config: StringerConfig = from_file().extract()?;

        assert_eq!(config.entry.unit_count, 8);
        assert_eq!(config.entry.operator, "Night Shift");
        assert!(!config.entry.autosave);
        assert_eq!(config.timing.validation_debounce_ms, 150);
        assert_eq!(config.timing.autosave_debounce_ms, 5000);
        assert!((config.validation.quality_floor_pct - 85.5).abs() < f64::EPSILON);
        assert_eq!(config.validation.outlier_ceiling, 640);
        assert_eq!(config.storage.data_dir, "/srv/stringer");
        assert_eq!(config.logging.filter, "stringer_session=debug");
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[timing]
autosave_debounce_ms = 750
"#,
        )?;

        let config: StringerConfig = from_file().extract()?;

        assert_eq!(config.timing.autosave_debounce_ms, 750);
        assert_eq!(config.timing.validation_debounce_ms, 300);
        assert_eq!(config.entry.unit_count, 6);
        assert_eq!(config.entry.operator, "Current User");
        assert!(config.entry.autosave);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[entry]
unit_count = 4
operator = "Day Shift"
"#,
        )?;
        jail.set_env("STRINGER_ENTRY__OPERATOR", "Relief Operator");

        let config: StringerConfig = from_file()
            .merge(Env::prefixed("STRINGER_").split("__"))
            .extract()?;

        assert_eq!(config.entry.unit_count, 4);
        assert_eq!(config.entry.operator, "Relief Operator");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".stringer")).expect("create .stringer");
        jail.create_file(
            ".stringer/config.toml",
            r#"
[validation]
outlier_ceiling = 900
"#,
        )?;

        let config = StringerConfig::load().expect("config loads");
        assert_eq!(config.validation.outlier_ceiling, 900);
        Ok(())
    });
}

#[test]
fn load_rejects_invalid_values() {
    Jail::expect_with(|jail| {
        jail.set_env("STRINGER_ENTRY__UNIT_COUNT", "0");
        let err = StringerConfig::load().unwrap_err();
        assert!(err.to_string().contains("entry.unit_count"));
        Ok(())
    });
}

#[test]
fn malformed_dotenv_is_skipped() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".stringer")).expect("create .stringer");
        jail.create_file(".env", "this line has no equals sign\n")?;
        jail.create_file(
            ".stringer/config.toml",
            r#"
[entry]
unit_count = 4
"#,
        )?;

        let config = StringerConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.entry.unit_count, 4);
        Ok(())
    });
}
