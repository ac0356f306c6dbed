// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The "ui-type helper" family: a uniform describe/enumerate/parse/format
//! interface used for every settable configuration parameter.

use crate::error::ConfigShellError;

/// The value produced by a successful [`UiType::parse`].
///
/// Every built-in type ultimately reduces to one of these three shapes;
/// `loglevel`, `color`, and `color_default` are constrained strings rather
/// than distinct Rust types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// describe/enumerate/parse/format over one parameter type.
pub trait UiType {
    /// Human-readable syntax description, e.g. `"<'true' or 'false'>"`.
    fn describe(&self) -> String;

    /// Finite candidate list for completion; empty when the type is open-ended.
    fn enumerate(&self) -> Vec<String>;

    /// Validate and convert free text into a [`ParamValue`].
    fn parse(&self, name: &str, text: &str) -> Result<ParamValue, ConfigShellError>;

    /// Render a value (or its absence) for display.
    fn format(&self, value: Option<&ParamValue>) -> String {
        match value {
            Some(v) => self.format_value(v),
            None => "n/a".to_string(),
        }
    }

    fn format_value(&self, value: &ParamValue) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolType;

impl UiType for BoolType {
    fn describe(&self) -> String {
        "<'true' or 'false'>".to_string()
    }

    fn enumerate(&self) -> Vec<String> {
        vec!["true".to_string(), "false".to_string()]
    }

    fn parse(&self, name: &str, text: &str) -> Result<ParamValue, ConfigShellError> {
        match text {
            "true" => Ok(ParamValue::Bool(true)),
            "false" => Ok(ParamValue::Bool(false)),
            other => Err(ConfigShellError::bad_value(
                name,
                format!("'{other}' is not a boolean, expected 'true' or 'false'"),
            )),
        }
    }

    fn format_value(&self, value: &ParamValue) -> String {
        match value.as_bool() {
            Some(true) => "true".to_string(),
            Some(false) => "false".to_string(),
            None => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl UiType for NumberType {
    fn describe(&self) -> String {
        "<a decimal integer>".to_string()
    }

    fn enumerate(&self) -> Vec<String> {
        Vec::new()
    }

    fn parse(&self, name: &str, text: &str) -> Result<ParamValue, ConfigShellError> {
        text.parse::<i64>().map(ParamValue::Number).map_err(|_| {
            ConfigShellError::bad_value(name, format!("'{text}' is not a decimal integer"))
        })
    }

    fn format_value(&self, value: &ParamValue) -> String {
        value
            .as_number()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl UiType for StringType {
    fn describe(&self) -> String {
        "<a string>".to_string()
    }

    fn enumerate(&self) -> Vec<String> {
        Vec::new()
    }

    fn parse(&self, _name: &str, text: &str) -> Result<ParamValue, ConfigShellError> {
        Ok(ParamValue::Text(text.to_string()))
    }

    fn format_value(&self, value: &ParamValue) -> String {
        value.as_text().unwrap_or("n/a").to_string()
    }
}

/// The log levels `tracing` recognizes, in increasing order of severity.
pub const LOGLEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Copy, Default)]
pub struct LoglevelType;

impl UiType for LoglevelType {
    fn describe(&self) -> String {
        format!("<one of {}>", LOGLEVELS.join(", "))
    }

    fn enumerate(&self) -> Vec<String> {
        LOGLEVELS.iter().map(|s| s.to_string()).collect()
    }

    fn parse(&self, name: &str, text: &str) -> Result<ParamValue, ConfigShellError> {
        if LOGLEVELS.contains(&text) {
            Ok(ParamValue::Text(text.to_string()))
        } else {
            Err(ConfigShellError::bad_value(
                name,
                format!("'{text}' is not a valid log level ({})", LOGLEVELS.join(", ")),
            ))
        }
    }

    fn format_value(&self, value: &ParamValue) -> String {
        value.as_text().unwrap_or("n/a").to_string()
    }
}

/// The eight ANSI color names the terminal renderer recognizes.
pub const ANSI_COLORS: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorType;

impl UiType for ColorType {
    fn describe(&self) -> String {
        format!("<one of {}, 'default'>", ANSI_COLORS.join(", "))
    }

    fn enumerate(&self) -> Vec<String> {
        let mut values: Vec<String> = ANSI_COLORS.iter().map(|s| s.to_string()).collect();
        values.push("default".to_string());
        values
    }

    fn parse(&self, name: &str, text: &str) -> Result<ParamValue, ConfigShellError> {
        if text == "default" || ANSI_COLORS.contains(&text) {
            Ok(ParamValue::Text(text.to_string()))
        } else {
            Err(ConfigShellError::bad_value(
                name,
                format!(
                    "'{text}' is not a valid color ({}, default)",
                    ANSI_COLORS.join(", ")
                ),
            ))
        }
    }

    fn format_value(&self, value: &ParamValue) -> String {
        value.as_text().unwrap_or("n/a").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorDefaultType;

impl UiType for ColorDefaultType {
    fn describe(&self) -> String {
        format!("<one of {}, 'default', 'none'>", ANSI_COLORS.join(", "))
    }

    fn enumerate(&self) -> Vec<String> {
        let mut values: Vec<String> = ANSI_COLORS.iter().map(|s| s.to_string()).collect();
        values.push("default".to_string());
        values.push("none".to_string());
        values
    }

    fn parse(&self, name: &str, text: &str) -> Result<ParamValue, ConfigShellError> {
        if text == "default" || text == "none" || ANSI_COLORS.contains(&text) {
            Ok(ParamValue::Text(text.to_string()))
        } else {
            Err(ConfigShellError::bad_value(
                name,
                format!(
                    "'{text}' is not a valid color ({}, default, none)",
                    ANSI_COLORS.join(", ")
                ),
            ))
        }
    }

    fn format_value(&self, value: &ParamValue) -> String {
        value.as_text().unwrap_or("n/a").to_string()
    }
}

/// Identifies which built-in [`UiType`] backs a configuration parameter,
/// so a [`super::node::GroupParam`] can be declared as plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTypeKind {
    Bool,
    Number,
    String,
    Loglevel,
    Color,
    ColorDefault,
}

impl UiTypeKind {
    pub fn helper(self) -> Box<dyn UiType> {
        match self {
            Self::Bool => Box::new(BoolType),
            Self::Number => Box::new(NumberType),
            Self::String => Box::new(StringType),
            Self::Loglevel => Box::new(LoglevelType),
            Self::Color => Box::new(ColorType),
            Self::ColorDefault => Box::new(ColorDefaultType),
        }
    }
}

#[cfg(test)]
#[path = "ui_type_tests.rs"]
mod tests;
