//! Form controller: per-field value, validity and touched flag

use crate::students::Level;

/// Values accepted by the level select
pub const LEVEL_VALUES: [&str; 3] = ["BACHELOR", "MASTER", "PHD"];

/// Validation rule for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// Non-blank after trimming
    Required,
    /// One of a fixed set of values; an empty value is left to `Required`
    OneOf(&'static [&'static str]),
}

impl Validator {
    fn check(&self, label: &str, value: &str) -> Option<String> {
        match self {
            Validator::Required if value.trim().is_empty() => Some(format!("{} is required", label)),
            Validator::OneOf(allowed) if !value.is_empty() && !allowed.contains(&value) => {
                Some(format!("Please select a valid {}", label.to_lowercase()))
            }
            _ => None,
        }
    }
}

/// A single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Set once the user has interacted with the field or tried to submit
    pub touched: bool,
    validators: Vec<Validator>,
}

impl FormField {
    /// First failing validation message
    pub fn error(&self) -> Option<String> {
        self.validators
            .iter()
            .find_map(|validator| validator.check(self.label, &self.value))
    }

    pub fn is_valid(&self) -> bool {
        self.error().is_none()
    }

    /// The error to render: only for touched fields
    pub fn visible_error(&self) -> Option<String> {
        if self.touched {
            self.error()
        } else {
            None
        }
    }
}

/// Explicit replacement for two-way form binding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    fields: Vec<FormField>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with an empty initial value
    pub fn field(mut self, name: &'static str, label: &'static str, validators: Vec<Validator>) -> Self {
        self.fields.push(FormField {
            name,
            label,
            value: String::new(),
            touched: false,
            validators,
        });
        self
    }

    /// Username and password, both required
    pub fn credentials() -> Self {
        Self::new()
            .field("username", "Username", vec![Validator::Required])
            .field("password", "Password", vec![Validator::Required])
    }

    /// Username and level, both required
    pub fn student() -> Self {
        Self::new()
            .field("username", "Username", vec![Validator::Required])
            .field("level", "Level", vec![Validator::Required, Validator::OneOf(&LEVEL_VALUES)])
    }

    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Current value of a field, empty for unknown names
    pub fn value(&self, name: &str) -> &str {
        self.get(name).map(|field| field.value.as_str()).unwrap_or("")
    }

    /// User edit: update the value and mark the field touched
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.get_mut(name) {
            field.value = value.to_string();
            field.touched = true;
        }
    }

    /// Programmatic fill, leaving touched flags alone
    pub fn patch_value(&mut self, values: &[(&str, &str)]) {
        for (name, value) in values {
            if let Some(field) = self.get_mut(name) {
                field.value = value.to_string();
            }
        }
    }

    pub fn touch(&mut self, name: &str) {
        if let Some(field) = self.get_mut(name) {
            field.touched = true;
        }
    }

    pub fn mark_all_touched(&mut self) {
        for field in &mut self.fields {
            field.touched = true;
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FormField::is_valid)
    }

    /// Field name and message for every invalid field
    pub fn errors(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .filter_map(|field| field.error().map(|error| (field.name, error)))
            .collect()
    }

    /// Level field parsed, if valid
    pub fn level(&self) -> Option<Level> {
        self.value("level").parse().ok()
    }
}
