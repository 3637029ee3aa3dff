//! Tests for the live line protocol parser

use super::create_live_lines;
use crate::models::{PartialReading, Zone};
use crate::parser::line::{LineParser, ParseError};

#[test]
fn test_parse_indoor_environment_line() {
    let parser = LineParser::new();
    let reading = parser.parse("Humidity IN: 41.50% : 21.30*C").unwrap();

    assert_eq!(
        reading,
        PartialReading::Environment {
            zone: Zone::In,
            humidity: 41.5,
            temperature: 21.3,
        }
    );
}

#[test]
fn test_parse_outdoor_environment_line() {
    let parser = LineParser::new();
    let reading = parser.parse("Humidity out : 78.0 % : -2.5 *C").unwrap();

    assert_eq!(
        reading,
        PartialReading::Environment {
            zone: Zone::Out,
            humidity: 78.0,
            temperature: -2.5,
        }
    );
}

#[test]
fn test_parse_degree_sign_marker() {
    let parser = LineParser::new();
    let reading = parser.parse("Humidity IN: 40% : 22.5°C").unwrap();

    assert!(matches!(
        reading,
        PartialReading::Environment { temperature, .. } if temperature == 22.5
    ));
}

#[test]
fn test_parse_co2_line() {
    let parser = LineParser::new();

    assert_eq!(
        parser.parse("CO2: 612.00 ppm").unwrap(),
        PartialReading::Co2 { value: 612.0 }
    );
    assert_eq!(
        parser.parse("  CO2 :1020ppm  ").unwrap(),
        PartialReading::Co2 { value: 1020.0 }
    );
}

#[test]
fn test_unrecognized_lines() {
    let parser = LineParser::new();

    for line in ["", "Sensor boot v1.2", "Pressure: 1013 hPa", "humidity in: 40% : 20*C"] {
        match parser.parse(line) {
            Err(ParseError::Unrecognized { .. }) => {}
            other => panic!("Expected Unrecognized for '{}', got {:?}", line, other),
        }
    }
}

#[test]
fn test_malformed_environment_lines() {
    let parser = LineParser::new();

    let cases = [
        "Humidity IN: 41.50%",
        "Humidity IN: 41.50 : 21.30*C",
        "Humidity IN: 41.50% : 21.30",
        "Humidity IN: abc% : 21.30*C",
        "Humidity IN: % : 21.30*C",
        "Humidity IN: 41.5% : NaN*C",
        "Humidity IN: inf% : 20*C",
    ];

    for line in cases {
        let err = parser.parse(line).unwrap_err();
        assert!(err.is_malformed(), "Expected Malformed for '{}'", line);
    }
}

#[test]
fn test_malformed_co2_lines() {
    let parser = LineParser::new();

    for line in ["CO2 612 ppm", "CO2: 612", "CO2: ppm", "CO2: high ppm"] {
        let err = parser.parse(line).unwrap_err();
        assert!(err.is_malformed(), "Expected Malformed for '{}'", line);
    }
}

#[test]
fn test_malformed_error_message_contains_reason() {
    let parser = LineParser::new();
    let err = parser.parse("CO2: 612").unwrap_err();

    assert_eq!(
        err.to_string(),
        "Malformed line 'CO2: 612': missing 'ppm' unit"
    );
}

#[test]
fn test_parse_is_deterministic() {
    let parser = LineParser::new();

    for line in create_live_lines() {
        let first = parser.parse(line);
        let second = parser.parse(line);
        assert_eq!(first, second, "Parse result changed for '{}'", line);
    }
}

#[test]
fn test_humidity_keyword_takes_precedence() {
    let parser = LineParser::new();
    let reading = parser.parse("Humidity IN (CO2 room): 40% : 20*C").unwrap();

    assert!(matches!(
        reading,
        PartialReading::Environment { zone: Zone::In, .. }
    ));
}
