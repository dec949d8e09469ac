//! Framework-independent form model.
//!
//! A [`FormGroup`] is an ordered table of named controls. Every control holds
//! a JSON value (`null` when empty) and the validation rules that apply to it.
//! Entity types provide the plain functions that map themselves into a group
//! and back out of it.

use crate::error::{CatalogError, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Validation rule attached to a control.
///
/// Length and pattern rules skip empty values; combine with `Required` to
/// reject them.
#[derive(Debug, Clone)]
pub enum Validator {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
}

impl Validator {
    /// Anchored pattern rule: the whole value must match.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Validator::Pattern)
            .map_err(|e| CatalogError::Form(format!("invalid pattern {pattern:?}: {e}")))
    }

    fn rule_name(&self) -> &'static str {
        match self {
            Validator::Required => "required",
            Validator::MinLength(_) => "minlength",
            Validator::MaxLength(_) => "maxlength",
            Validator::Pattern(_) => "pattern",
        }
    }

    fn check(&self, value: &Value) -> bool {
        match self {
            Validator::Required => !is_empty(value),
            Validator::MinLength(min) => length(value).is_none_or(|len| len >= *min),
            Validator::MaxLength(max) => length(value).is_none_or(|len| len <= *max),
            Validator::Pattern(re) => match value {
                Value::String(s) if !s.is_empty() => re.is_match(s),
                Value::Number(n) => re.is_match(&n.to_string()),
                _ => true,
            },
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.chars().count()),
        Value::Array(a) if !a.is_empty() => Some(a.len()),
        _ => None,
    }
}

/// One failed rule on one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub rule: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

#[derive(Debug, Clone)]
struct FormControl {
    name: String,
    value: Value,
    validators: Vec<Validator>,
}

/// Ordered set of named controls.
#[derive(Debug, Clone, Default)]
pub struct FormGroup {
    controls: Vec<FormControl>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control, empty, with the given rules.
    pub fn control(mut self, name: impl Into<String>, validators: Vec<Validator>) -> Self {
        self.controls.push(FormControl {
            name: name.into(),
            value: Value::Null,
            validators,
        });
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    fn find(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.controls.iter_mut().find(|c| c.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.find(name).map(|c| &c.value)
    }

    /// Read a control back as a typed value.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self
            .get(name)
            .ok_or_else(|| CatalogError::Form(format!("no control named {name:?}")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| CatalogError::Form(format!("{name}: {e}")))
    }

    /// Set one control. Unknown names are an error.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match self.find_mut(name) {
            Some(control) => {
                control.value = value;
                Ok(())
            }
            None => Err(CatalogError::Form(format!("no control named {name:?}"))),
        }
    }

    /// Set every named control present in `values`; names without a control
    /// are ignored and controls not mentioned keep their value.
    pub fn patch_value<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        for (name, value) in values {
            if let Some(control) = self.find_mut(name.as_ref()) {
                control.value = value;
            }
        }
    }

    /// Snapshot of every control as a JSON object, in control order.
    pub fn value(&self) -> Value {
        let map: Map<String, Value> = self
            .controls
            .iter()
            .map(|c| (c.name.clone(), c.value.clone()))
            .collect();
        Value::Object(map)
    }

    pub fn errors(&self) -> Vec<FieldError> {
        self.controls
            .iter()
            .flat_map(|c| {
                c.validators
                    .iter()
                    .filter(|v| !v.check(&c.value))
                    .map(|v| FieldError {
                        field: c.name.clone(),
                        rule: v.rule_name(),
                    })
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.controls
            .iter()
            .all(|c| c.validators.iter().all(|v| v.check(&c.value)))
    }

    /// Empty every control.
    pub fn reset(&mut self) {
        for control in &mut self.controls {
            control.value = Value::Null;
        }
    }
}
