//! Tests for option validation.

use super::configuration::{ApiVersion, Configuration};
use super::error::ConfigError;
use super::options::AgentOptions;

fn some(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn valid() -> AgentOptions {
    AgentOptions {
        url: some("http://h:8086"),
        database: some("db1"),
        data: some("cpu value=1"),
        influxdb_version: some("v1"),
        ..AgentOptions::default()
    }
}

fn err(options: &AgentOptions) -> ConfigError {
    Configuration::from_options(options).unwrap_err()
}

mod required {
    use super::*;

    #[test]
    fn minimal_v1_is_valid() {
        let config = Configuration::from_options(&valid()).unwrap();

        assert_eq!(config.url, "http://h:8086");
        assert_eq!(config.database, "db1");
        assert_eq!(config.data, "cpu value=1");
        assert_eq!(config.api, Some(ApiVersion::V1));
        assert!(!config.debug);
        assert!(!config.emit_events);
        assert_eq!(config.expected_receive_period_in_days.get(), 2);
    }

    #[test]
    fn absent_empty_and_blank_are_missing() {
        for value in [None, some(""), some("   ")] {
            let e = err(&AgentOptions {
                url: value.clone(),
                ..valid()
            });

            assert!(
                matches!(e, ConfigError::MissingRequired { field: "url" }),
                "{value:?}"
            );
        }
    }

    #[test]
    fn database_is_checked_before_url_and_data() {
        let e = err(&AgentOptions::default());

        assert!(matches!(e, ConfigError::MissingRequired { field: "database" }));
        assert_eq!(e.to_string(), "database is a required field");
    }

    #[test]
    fn url_is_checked_before_data() {
        let e = err(&AgentOptions {
            url: None,
            data: None,
            ..valid()
        });

        assert!(matches!(e, ConfigError::MissingRequired { field: "url" }));
    }

    #[test]
    fn values_are_kept_verbatim() {
        let config = Configuration::from_options(&AgentOptions {
            data: some(" cpu value=1\nmem value=2 "),
            ..valid()
        })
        .unwrap();

        assert_eq!(config.data, " cpu value=1\nmem value=2 ");
    }

    #[test]
    fn url_syntax_is_not_checked_here() {
        let config = Configuration::from_options(&AgentOptions {
            url: some("{{host}}"),
            ..valid()
        })
        .unwrap();

        assert_eq!(config.url, "{{host}}");
    }
}

mod booleans {
    use super::*;

    #[test]
    fn true_false_empty_and_absent() {
        for (value, expected) in [
            (some("true"), true),
            (some("false"), false),
            (some(""), false),
            (None, false),
        ] {
            let config = Configuration::from_options(&AgentOptions {
                debug: value.clone(),
                emit_events: value.clone(),
                ..valid()
            })
            .unwrap();

            assert_eq!(config.debug, expected, "{value:?}");
            assert_eq!(config.emit_events, expected, "{value:?}");
        }
    }

    #[test]
    fn anything_else_is_rejected() {
        for value in ["yes", "True", "1", " true"] {
            let e = err(&AgentOptions {
                debug: some(value),
                ..valid()
            });

            assert!(
                matches!(e, ConfigError::InvalidBoolean { field: "debug", .. }),
                "{value}"
            );
        }
    }

    #[test]
    fn emit_events_is_checked_before_debug() {
        let e = err(&AgentOptions {
            debug: some("nope"),
            emit_events: some("nope"),
            ..valid()
        });

        assert!(matches!(
            e,
            ConfigError::InvalidBoolean {
                field: "emit_events",
                ..
            }
        ));
    }
}

mod receive_period {
    use super::*;

    #[test]
    fn absent_uses_default() {
        let config = Configuration::from_options(&AgentOptions {
            expected_receive_period_in_days: None,
            ..valid()
        })
        .unwrap();

        assert_eq!(config.expected_receive_period_in_days.get(), 2);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let config = Configuration::from_options(&AgentOptions {
            expected_receive_period_in_days: some(" 14 "),
            ..valid()
        })
        .unwrap();

        assert_eq!(config.expected_receive_period_in_days.get(), 14);
    }

    #[test]
    fn non_positive_or_non_integer_is_rejected_on_accept() {
        for value in ["", "0", "-1", "1.5", "two"] {
            let e = Configuration::accept(&AgentOptions {
                expected_receive_period_in_days: some(value),
                ..valid()
            })
            .unwrap_err();

            assert!(
                matches!(e, ConfigError::InvalidReceivePeriod { .. }),
                "{value}"
            );
        }
    }

    #[test]
    fn unusable_value_falls_back_to_default_per_write() {
        for value in ["", "0", "-1", "two"] {
            let config = Configuration::from_options(&AgentOptions {
                expected_receive_period_in_days: some(value),
                ..valid()
            })
            .unwrap();

            assert_eq!(config.expected_receive_period_in_days.get(), 2, "{value}");
        }
    }

    #[test]
    fn accept_checks_booleans_before_receive_period() {
        let e = Configuration::accept(&AgentOptions {
            debug: some("yes"),
            expected_receive_period_in_days: some("0"),
            ..valid()
        })
        .unwrap_err();

        assert!(matches!(e, ConfigError::InvalidBoolean { field: "debug", .. }));
    }

    #[test]
    fn accept_checks_receive_period_before_version() {
        let e = Configuration::accept(&AgentOptions {
            expected_receive_period_in_days: some("0"),
            influxdb_version: some("v3"),
            ..valid()
        })
        .unwrap_err();

        assert!(matches!(e, ConfigError::InvalidReceivePeriod { .. }));
    }
}

mod version {
    use super::*;

    #[test]
    fn absent_or_empty_is_unset() {
        for value in [None, some("")] {
            let config = Configuration::from_options(&AgentOptions {
                influxdb_version: value,
                ..valid()
            })
            .unwrap();

            assert_eq!(config.api, None);
        }
    }

    #[test]
    fn v2_carries_credentials() {
        let config = Configuration::from_options(&AgentOptions {
            influxdb_version: some("v2"),
            token: some("t1"),
            org: some("o1"),
            ..valid()
        })
        .unwrap();

        assert_eq!(
            config.api,
            Some(ApiVersion::V2 {
                org: "o1".to_string(),
                token: "t1".to_string(),
            })
        );
    }

    #[test]
    fn v2_token_is_checked_before_org() {
        let e = err(&AgentOptions {
            influxdb_version: some("v2"),
            ..valid()
        });

        assert!(matches!(e, ConfigError::MissingRequired { field: "token" }));
    }

    #[test]
    fn v1_ignores_credentials() {
        let config = Configuration::from_options(&AgentOptions {
            token: some(""),
            org: None,
            ..valid()
        })
        .unwrap();

        assert_eq!(config.api, Some(ApiVersion::V1));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let e = err(&AgentOptions {
            influxdb_version: some("v3"),
            ..valid()
        });

        assert!(matches!(e, ConfigError::InvalidVersion { ref value } if value == "v3"));
    }
}

mod display {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let api = ApiVersion::V2 {
            org: "o1".to_string(),
            token: "super-secret".to_string(),
        };

        let shown = format!("{api:?}");

        assert!(shown.contains("o1"));
        assert!(!shown.contains("super-secret"));
    }

    #[test]
    fn configuration_display_omits_payload_and_token() {
        let config = Configuration::from_options(&AgentOptions {
            influxdb_version: some("v2"),
            token: some("super-secret"),
            org: some("o1"),
            ..valid()
        })
        .unwrap();

        let shown = config.to_string();

        assert!(shown.contains("influxdb_version: v2"));
        assert!(!shown.contains("super-secret"));
    }
}
