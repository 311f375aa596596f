//! Tests for `AgentOptions`.

use super::options::AgentOptions;

fn some(s: &str) -> Option<String> {
    Some(s.to_string())
}

mod defaults {
    use super::*;

    #[test]
    fn fresh_agent_starts_blank_and_quiet() {
        let options = AgentOptions::defaults();

        assert_eq!(options.url, some(""));
        assert_eq!(options.database, some(""));
        assert_eq!(options.data, some(""));
        assert_eq!(options.influxdb_version, None);
        assert_eq!(options.debug, some("false"));
        assert_eq!(options.emit_events, some("false"));
        assert_eq!(options.expected_receive_period_in_days, some("2"));
    }
}

mod merge {
    use super::*;

    #[test]
    fn overrides_win_where_set() {
        let base = AgentOptions {
            url: some("http://base"),
            database: some("db"),
            ..AgentOptions::default()
        };
        let overrides = AgentOptions {
            url: some("http://override"),
            token: some("t"),
            ..AgentOptions::default()
        };

        let merged = base.merge(overrides);

        assert_eq!(merged.url, some("http://override"));
        assert_eq!(merged.database, some("db"));
        assert_eq!(merged.token, some("t"));
        assert_eq!(merged.org, None);
    }

    #[test]
    fn empty_override_still_wins() {
        let base = AgentOptions {
            influxdb_version: some("v1"),
            ..AgentOptions::default()
        };
        let overrides = AgentOptions {
            influxdb_version: some(""),
            ..AgentOptions::default()
        };

        assert_eq!(base.merge(overrides).influxdb_version, some(""));
    }
}

mod try_map {
    use super::*;

    #[test]
    fn maps_present_options_only() {
        let options = AgentOptions {
            url: some("http://h"),
            data: some("cpu"),
            ..AgentOptions::default()
        };
        let mut seen = Vec::new();

        let mapped = options
            .try_map(|name, value| {
                seen.push(name);
                Ok::<_, ()>(value.to_uppercase())
            })
            .unwrap();

        assert_eq!(seen, vec!["url", "data"]);
        assert_eq!(mapped.url, some("HTTP://H"));
        assert_eq!(mapped.data, some("CPU"));
        assert_eq!(mapped.database, None);
    }

    #[test]
    fn stops_at_first_error() {
        let options = AgentOptions::defaults();

        let result = options.try_map(|name, _| {
            if name == "data" {
                Err(name)
            } else {
                Ok(String::new())
            }
        });

        assert_eq!(result, Err("data"));
    }
}

mod serde_shape {
    use super::*;

    #[test]
    fn json_round_trip_skips_absent_options() {
        let options = AgentOptions {
            url: some("http://h"),
            ..AgentOptions::default()
        };

        let json = serde_json::to_string(&options).unwrap();

        assert_eq!(json, r#"{"url":"http://h"}"#);
        assert_eq!(serde_json::from_str::<AgentOptions>(&json).unwrap(), options);
    }

    #[test]
    fn json_accepts_booleans_and_numbers() {
        let options: AgentOptions = serde_json::from_str(
            r#"{"debug": true, "emit_events": "false", "expected_receive_period_in_days": 3}"#,
        )
        .unwrap();

        assert_eq!(options.debug, some("true"));
        assert_eq!(options.emit_events, some("false"));
        assert_eq!(options.expected_receive_period_in_days, some("3"));
    }

    #[test]
    fn json_null_is_absent() {
        let options: AgentOptions = serde_json::from_str(r#"{"token": null}"#).unwrap();

        assert_eq!(options.token, None);
    }
}
