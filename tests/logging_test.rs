// ABOUTME: Integration tests for logging configuration and subscriber setup
// ABOUTME: Validates environment handling, format parsing and one-time initialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use morphy::logging::{LogFormat, LoggingConfig, SERVICE_NAME};
use serial_test::serial;

const VARS: [&str; 8] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "SERVICE_VERSION",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "LOG_INCLUDE_SPANS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "morphy-worker");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "morphy-worker");
    // production turns every detail flag on
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(config.include_spans);
}

#[test]
#[serial]
fn test_individual_flags_in_development() {
    clear_env();
    env::set_var("LOG_INCLUDE_THREAD", "1");
    env::set_var("LOG_FORMAT", "yaml");

    let config = LoggingConfig::from_env();
    clear_env();

    assert!(config.include_thread);
    assert!(!config.include_location);
    assert_eq!(config.format, LogFormat::Pretty);
}

#[test]
#[serial]
fn test_default_logging_config() {
    clear_env();
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, SERVICE_NAME);
    assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
    assert!(!config.include_location);
    assert_eq!(LoggingConfig::from_env(), config);
}

#[test]
fn test_log_format_parsing() {
    assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
    assert!("xml".parse::<LogFormat>().is_err());
}

#[test]
#[serial]
fn test_init_only_succeeds_once() {
    clear_env();
    let config = LoggingConfig {
        level: "warn".into(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };

    assert!(config.init().is_ok());
    assert!(config.init().is_err());
}
