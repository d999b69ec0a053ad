// ABOUTME: Integration tests for logging configuration and subscriber installation
// ABOUTME: Covers format parsing, environment overrides, and double initialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use rehab_plan_engine::errors::ErrorCode;
use rehab_plan_engine::logging::{init_from_env, LogFormat, LoggingConfig, DEFAULT_SERVICE_NAME};
use serial_test::serial;
use std::env;

const LOGGING_VARS: [&str; 8] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "LOG_INCLUDE_SPANS",
    "SERVICE_NAME",
    "SERVICE_VERSION",
];

fn clear_env() {
    for key in LOGGING_VARS {
        env::remove_var(key);
    }
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str_or_default("json"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_or_default("pretty"), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str_or_default("xml"), LogFormat::Pretty);
}

#[test]
#[serial]
fn test_development_defaults() {
    clear_env();

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
    assert!(!config.include_location);
    assert!(!config.include_spans);
}

#[test]
#[serial]
fn test_production_enables_detail() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");
    env::set_var("SERVICE_NAME", "rehab-worker");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "debug");
    assert_eq!(config.service_name, "rehab-worker");
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(config.include_spans);
}

#[test]
#[serial]
fn test_second_init_is_an_error() {
    clear_env();
    env::set_var("RUST_LOG", "warn");
    init_from_env().unwrap();
    clear_env();

    let config = LoggingConfig {
        level: "warn".to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };
    let err = config.init().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}
