//! Registry configuration loading tests.
//!
//! Covers TOML parsing, field defaults and file loading for
//! `RegistryConfig`.

mod loading_tests {
    use rebind_config::{ConfigError, RegistryConfig};
    use std::io::Write;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RegistryConfig::from_toml_str("trace_dispatch = true\n")
            .expect("partial config parses");

        assert!(config.trace_dispatch);
        assert!(config.capture_skipped);
    }

    #[test]
    fn test_full_toml() {
        let text = r#"
            capture_skipped = false
            trace_dispatch = true
        "#;
        let config = RegistryConfig::from_toml_str(text).expect("config parses");

        assert_eq!(
            config,
            RegistryConfig::default()
                .with_capture_skipped(false)
                .with_trace_dispatch(true)
        );
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = RegistryConfig::from_toml_str("capture_skipped = \"yes\"")
            .expect_err("string is not a bool");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = RegistryConfig::from_toml_str("capture_skiped = false")
            .expect_err("misspelled key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "capture_skipped = false").expect("write config");

        let config = RegistryConfig::from_file(file.path()).expect("config loads");
        assert!(!config.capture_skipped);
        assert!(!config.trace_dispatch);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = RegistryConfig::from_file(dir.path().join("absent.toml"))
            .expect_err("file does not exist");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
