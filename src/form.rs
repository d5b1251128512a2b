//! Declarative form engine.
//!
//! Every create/edit dialog in the console is driven by a
//! [`FormDescriptor`]: a list of tagged-union field descriptors with their
//! validation rules colocated. A single dispatch in the TUI renders each
//! kind, and submission produces a flat key/value JSON payload.
//!
//! Validation here is advisory only. The server is the authority; its
//! error message is surfaced verbatim when a submit fails.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One choice in a select or multi-select field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Field kind with its kind-specific constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
        pattern: Option<String>,
    },
    Email,
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Textarea {
        max_len: Option<usize>,
    },
    /// ISO date, `YYYY-MM-DD`.
    Date,
    Checkbox,
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
}

impl FieldKind {
    /// Whether the field accepts free text editing (cursor + characters).
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::Text { .. }
                | FieldKind::Email
                | FieldKind::Number { .. }
                | FieldKind::Textarea { .. }
                | FieldKind::Date
        )
    }
}

/// One field of a form, with label, placement and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    pub section: Option<String>,
    /// Overrides the generated validation message when set.
    pub message: Option<String>,
}

impl FieldDescriptor {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            placeholder: None,
            section: None,
            message: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Text {
                min_len: None,
                max_len: None,
                pattern: None,
            },
        )
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number { min: None, max: None })
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Textarea { max_len: None })
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn select(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, FieldKind::Select { options })
    }

    pub fn multi_select(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, FieldKind::MultiSelect { options })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    pub fn section(mut self, title: &str) -> Self {
        self.section = Some(title.to_string());
        self
    }

    pub fn message(mut self, text: &str) -> Self {
        self.message = Some(text.to_string());
        self
    }

    /// Set string-length bounds. Applies to text and textarea kinds.
    pub fn length(mut self, min: usize, max: usize) -> Self {
        match &mut self.kind {
            FieldKind::Text {
                min_len, max_len, ..
            } => {
                *min_len = Some(min);
                *max_len = Some(max);
            }
            FieldKind::Textarea { max_len } => {
                *max_len = Some(max);
            }
            _ => {}
        }
        self
    }

    /// Set a regex the whole value must match. Applies to text kinds.
    pub fn pattern(mut self, regex: &str) -> Self {
        if let FieldKind::Text { pattern, .. } = &mut self.kind {
            *pattern = Some(regex.to_string());
        }
        self
    }

    /// Set a numeric range. Applies to number kinds.
    pub fn range(mut self, low: f64, high: f64) -> Self {
        if let FieldKind::Number { min, max } = &mut self.kind {
            *min = Some(low);
            *max = Some(high);
        }
        self
    }

    /// Validate one value against this descriptor. `None` means valid.
    pub fn validate(&self, value: Option<&Value>) -> Option<String> {
        let present = match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        };

        if self.required && !present {
            return Some(format!("{} is required", self.label));
        }
        if !present {
            return None;
        }
        let value = value?;

        let failure = match &self.kind {
            FieldKind::Text {
                min_len,
                max_len,
                pattern,
            } => validate_text(value, *min_len, *max_len, pattern.as_deref()),
            FieldKind::Email => validate_email(value),
            FieldKind::Number { min, max } => validate_number(value, *min, *max),
            FieldKind::Textarea { max_len } => validate_text(value, None, *max_len, None),
            FieldKind::Date => validate_date(value),
            FieldKind::Checkbox => None,
            FieldKind::Select { options } => validate_choice(value, options),
            FieldKind::MultiSelect { options } => validate_multi_choice(value, options),
        };

        failure.map(|generated| self.message.clone().unwrap_or(generated))
    }
}

fn validate_text(
    value: &Value,
    min_len: Option<usize>,
    max_len: Option<usize>,
    pattern: Option<&str>,
) -> Option<String> {
    let text = value.as_str()?;
    if let Some(min) = min_len {
        if text.chars().count() < min {
            return Some(format!("Minimum {min} characters required"));
        }
    }
    if let Some(max) = max_len {
        if text.chars().count() > max {
            return Some(format!("Maximum {max} characters allowed"));
        }
    }
    if let Some(raw) = pattern {
        match Regex::new(raw) {
            Ok(re) if re.is_match(text) => {}
            Ok(_) => return Some("Invalid format".to_string()),
            // An unparseable pattern in a descriptor is a programming
            // error; fail the field rather than silently passing it.
            Err(_) => return Some("Invalid format".to_string()),
        }
    }
    None
}

fn validate_email(value: &Value) -> Option<String> {
    let text = value.as_str()?;
    let ok = text.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if ok {
        None
    } else {
        Some("Invalid email address".to_string())
    }
}

fn validate_number(value: &Value, min: Option<f64>, max: Option<f64>) -> Option<String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(number) = number else {
        return Some("Must be a number".to_string());
    };
    if let Some(min) = min {
        if number < min {
            return Some(format!("Must be at least {min}"));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Some(format!("Must be at most {max}"));
        }
    }
    None
}

fn validate_date(value: &Value) -> Option<String> {
    let text = value.as_str()?;
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(_) => None,
        Err(_) => Some("Expected date as YYYY-MM-DD".to_string()),
    }
}

fn validate_choice(value: &Value, options: &[SelectOption]) -> Option<String> {
    if options.iter().any(|o| &o.value == value) {
        None
    } else {
        Some("Not a valid choice".to_string())
    }
}

fn validate_multi_choice(value: &Value, options: &[SelectOption]) -> Option<String> {
    let Some(items) = value.as_array() else {
        return Some("Not a valid choice".to_string());
    };
    for item in items {
        if !options.iter().any(|o| &o.value == item) {
            return Some("Not a valid choice".to_string());
        }
    }
    None
}

/// A complete create/edit form: title, section order and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDescriptor {
    pub title: String,
    pub description: String,
    pub sections: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            sections: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn section_order(mut self, sections: &[&str]) -> Self {
        self.sections = sections.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate a full value map. Empty result means the form may submit.
    pub fn validate(&self, values: &Map<String, Value>) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for field in &self.fields {
            if let Some(message) = field.validate(values.get(&field.name)) {
                errors.insert(field.name.clone(), message);
            }
        }
        errors
    }
}

/// Create vs. edit, decided when the dialog opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Live state of an open form dialog: the descriptor, the value map being
/// edited, current validation errors and the focused field.
#[derive(Debug, Clone)]
pub struct FormState {
    pub descriptor: FormDescriptor,
    pub mode: FormMode,
    values: Map<String, Value>,
    errors: BTreeMap<String, String>,
    focus: usize,
    /// Record id carried through for edits; absent for creates.
    record_id: Option<Value>,
}

impl FormState {
    /// Open a blank create form.
    pub fn create(descriptor: FormDescriptor) -> Self {
        Self {
            descriptor,
            mode: FormMode::Create,
            values: Map::new(),
            errors: BTreeMap::new(),
            focus: 0,
            record_id: None,
        }
    }

    /// Open an edit form pre-filled from an existing record. Only keys
    /// named by the descriptor are copied in; `id` is kept aside for the
    /// payload.
    pub fn edit(descriptor: FormDescriptor, record: &Value) -> Self {
        let mut values = Map::new();
        for field in &descriptor.fields {
            if let Some(v) = record.get(&field.name) {
                if !v.is_null() {
                    values.insert(field.name.clone(), v.clone());
                }
            }
        }
        Self {
            descriptor,
            mode: FormMode::Edit,
            values,
            errors: BTreeMap::new(),
            focus: 0,
            record_id: record.get("id").cloned(),
        }
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&FieldDescriptor> {
        self.descriptor.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.descriptor.fields.is_empty() {
            self.focus = (self.focus + 1) % self.descriptor.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.descriptor.fields.is_empty() {
            self.focus = (self.focus + self.descriptor.fields.len() - 1)
                % self.descriptor.fields.len();
        }
    }

    /// Set a field value directly. Clears that field's stale error, the
    /// same way the web form dropped an error as soon as the field changed.
    pub fn set_value(&mut self, name: &str, value: Value) {
        self.errors.remove(name);
        if value.is_null() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    fn focused_name(&self) -> Option<String> {
        self.focused_field().map(|f| f.name.clone())
    }

    /// Append a character to the focused field, if it is textual.
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if !field.kind.is_textual() {
            return;
        }
        let name = field.name.clone();
        let mut text = self
            .values
            .get(&name)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        text.push(c);
        self.set_value(&name, Value::String(text));
    }

    /// Delete the last character of the focused field, if it is textual.
    pub fn backspace(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if !field.kind.is_textual() {
            return;
        }
        let name = field.name.clone();
        let mut text = self
            .values
            .get(&name)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        text.pop();
        if text.is_empty() {
            self.set_value(&name, Value::Null);
        } else {
            self.set_value(&name, Value::String(text));
        }
    }

    /// Toggle the focused checkbox, or cycle the focused select forward.
    pub fn toggle(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let name = field.name.clone();
        match &field.kind {
            FieldKind::Checkbox => {
                let current = self
                    .values
                    .get(&name)
                    .map(value_is_truthy)
                    .unwrap_or(false);
                self.set_value(&name, Value::Bool(!current));
            }
            FieldKind::Select { options } => {
                if options.is_empty() {
                    return;
                }
                let current = self.values.get(&name);
                let next = match current.and_then(|v| options.iter().position(|o| &o.value == v)) {
                    Some(i) => (i + 1) % options.len(),
                    None => 0,
                };
                let value = options[next].value.clone();
                self.set_value(&name, value);
            }
            FieldKind::MultiSelect { options } => {
                // Space on a multi-select toggles membership of the first
                // not-yet-chosen option; full pickers stay in the TUI layer.
                let mut chosen: Vec<Value> = self
                    .values
                    .get(&name)
                    .and_then(|v| v.as_array())
                    .cloned()
                    .unwrap_or_default();
                if let Some(option) = options.iter().find(|o| !chosen.contains(&o.value)) {
                    chosen.push(option.value.clone());
                    self.set_value(&name, Value::Array(chosen));
                }
            }
            _ => {}
        }
    }

    /// Run client-side validation, keeping the errors for rendering.
    /// Returns true when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = self.descriptor.validate(&self.values);
        self.errors.is_empty()
    }

    /// Flat key/value payload for the API. Edits carry the record id.
    pub fn payload(&self) -> Value {
        let mut payload = self.values.clone();
        if self.mode == FormMode::Edit {
            if let Some(id) = &self.record_id {
                payload.insert("id".to_string(), id.clone());
            }
        }
        Value::Object(payload)
    }
}

/// How a read-only detail value is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Text,
    Boolean,
    Date,
    Number,
}

/// One read-only field of a details dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewField {
    pub key: String,
    pub label: String,
    pub kind: ViewKind,
}

impl ViewField {
    pub fn new(key: &str, label: &str, kind: ViewKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Format the field's value out of a record for display.
    pub fn format(&self, record: &Value) -> String {
        let value = record.get(&self.key).unwrap_or(&Value::Null);
        match self.kind {
            ViewKind::Boolean => {
                if value_is_truthy(value) {
                    "Yes".to_string()
                } else {
                    "No".to_string()
                }
            }
            ViewKind::Date => match value.as_str() {
                // Audit columns come back as ISO timestamps; show the date.
                Some(s) => s.split('T').next().unwrap_or(s).to_string(),
                None => "-".to_string(),
            },
            ViewKind::Number => match value {
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                _ => "-".to_string(),
            },
            ViewKind::Text => match value {
                Value::String(s) if !s.is_empty() => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => "-".to_string(),
            },
        }
    }
}

/// One titled group of detail fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSection {
    pub title: String,
    pub fields: Vec<String>,
}

/// A complete read-only details dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDescriptor {
    pub title: String,
    pub description: String,
    pub fields: Vec<ViewField>,
    pub sections: Vec<ViewSection>,
}

impl ViewDescriptor {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            fields: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, label: &str, kind: ViewKind) -> Self {
        self.fields.push(ViewField::new(key, label, kind));
        self
    }

    pub fn section(mut self, title: &str, fields: &[&str]) -> Self {
        self.sections.push(ViewSection {
            title: title.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    pub fn find(&self, key: &str) -> Option<&ViewField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Truthiness the way the API reports active flags: booleans, or the
/// 0/1 integers the master endpoints use.
pub fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|i| i != 0),
        Value::String(s) => !s.is_empty() && s != "0" && s != "false",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit_form() -> FormDescriptor {
        FormDescriptor::new("Unit", "Manage unit information")
            .section_order(&["Basic Information"])
            .field(
                FieldDescriptor::text("name", "Unit Name")
                    .required()
                    .length(2, 50)
                    .section("Basic Information")
                    .message("Name must be between 2-50 characters"),
            )
            .field(
                FieldDescriptor::text("code", "Unit Code")
                    .required()
                    .pattern("^[A-Z0-9]+$")
                    .section("Basic Information")
                    .message("Code must be alphanumeric uppercase"),
            )
            .field(FieldDescriptor::checkbox("active", "Active Status").section("Basic Information"))
    }

    #[test]
    fn test_required_fields_block_submission() {
        let mut form = FormState::create(unit_form());
        assert!(!form.validate());
        assert_eq!(form.error_for("name"), Some("Unit Name is required"));
        assert_eq!(form.error_for("code"), Some("Unit Code is required"));
        // Checkbox is optional.
        assert!(form.error_for("active").is_none());
    }

    #[test]
    fn test_custom_message_overrides_generated() {
        let mut form = FormState::create(unit_form());
        form.set_value("name", json!("X"));
        form.set_value("code", json!("DNA"));
        assert!(!form.validate());
        assert_eq!(
            form.error_for("name"),
            Some("Name must be between 2-50 characters")
        );
    }

    #[test]
    fn test_pattern_validation() {
        let mut form = FormState::create(unit_form());
        form.set_value("name", json!("Directorate of Naval Architecture"));
        form.set_value("code", json!("dna"));
        assert!(!form.validate());
        assert_eq!(
            form.error_for("code"),
            Some("Code must be alphanumeric uppercase")
        );

        form.set_value("code", json!("DNA"));
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_set_value_clears_stale_error() {
        let mut form = FormState::create(unit_form());
        form.validate();
        assert!(form.error_for("name").is_some());
        form.set_value("name", json!("DNA"));
        assert!(form.error_for("name").is_none());
    }

    #[test]
    fn test_create_payload_is_flat_without_id() {
        let mut form = FormState::create(unit_form());
        form.set_value("name", json!("DNA"));
        form.set_value("code", json!("DNA"));
        form.set_value("active", json!(true));
        assert!(form.validate());
        let payload = form.payload();
        assert_eq!(payload, json!({"name": "DNA", "code": "DNA", "active": true}));
    }

    #[test]
    fn test_edit_payload_carries_record_id() {
        let record = json!({
            "id": 12,
            "name": "DNA",
            "code": "DNA",
            "active": 1,
            "created_on": "2024-01-05T10:00:00Z"
        });
        let form = FormState::edit(unit_form(), &record);
        let payload = form.payload();
        assert_eq!(payload.get("id"), Some(&json!(12)));
        assert_eq!(payload.get("name"), Some(&json!("DNA")));
        // Fields not in the descriptor are not copied into the payload.
        assert!(payload.get("created_on").is_none());
    }

    #[test]
    fn test_number_range() {
        let field = FieldDescriptor::number("capacity", "Capacity").range(1.0, 50.0);
        assert!(field.validate(Some(&json!(10))).is_none());
        assert!(field.validate(Some(&json!("25"))).is_none());
        assert_eq!(
            field.validate(Some(&json!(0))),
            Some("Must be at least 1".to_string())
        );
        assert_eq!(
            field.validate(Some(&json!("many"))),
            Some("Must be a number".to_string())
        );
    }

    #[test]
    fn test_email_validation() {
        let field = FieldDescriptor::email("contact_email", "Contact Email");
        assert!(field.validate(Some(&json!("ops@navy.mil"))).is_none());
        assert!(field.validate(Some(&json!("not-an-email"))).is_some());
        // Optional and empty: valid.
        assert!(field.validate(None).is_none());
        assert!(field.validate(Some(&json!(""))).is_none());
    }

    #[test]
    fn test_date_validation() {
        let field = FieldDescriptor::date("commissioned_date", "Commissioned");
        assert!(field.validate(Some(&json!("2020-11-02"))).is_none());
        assert!(field.validate(Some(&json!("02/11/2020"))).is_some());
    }

    #[test]
    fn test_select_rejects_unknown_choice() {
        let options = vec![
            SelectOption::new("Minor", "minor"),
            SelectOption::new("Major", "major"),
        ];
        let field = FieldDescriptor::select("severity", "Severity", options);
        assert!(field.validate(Some(&json!("minor"))).is_none());
        assert!(field.validate(Some(&json!("catastrophic"))).is_some());
    }

    #[test]
    fn test_text_editing_on_focused_field() {
        let mut form = FormState::create(unit_form());
        for c in "DNA".chars() {
            form.input_char(c);
        }
        assert_eq!(form.values().get("name"), Some(&json!("DNA")));
        form.backspace();
        assert_eq!(form.values().get("name"), Some(&json!("DN")));
        form.backspace();
        form.backspace();
        assert!(form.values().get("name").is_none());
    }

    #[test]
    fn test_toggle_checkbox_and_focus_wrap() {
        let mut form = FormState::create(unit_form());
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused_field().unwrap().name, "active");
        form.toggle();
        assert_eq!(form.values().get("active"), Some(&json!(true)));
        form.toggle();
        assert_eq!(form.values().get("active"), Some(&json!(false)));
        form.focus_next();
        assert_eq!(form.focused_field().unwrap().name, "name");
        form.focus_prev();
        assert_eq!(form.focused_field().unwrap().name, "active");
    }

    #[test]
    fn test_view_field_formats() {
        let record = json!({
            "active": 1,
            "created_on": "2024-01-05T10:00:00Z",
            "capacity": 12,
            "name": "DNA"
        });
        assert_eq!(
            ViewField::new("active", "Active", ViewKind::Boolean).format(&record),
            "Yes"
        );
        assert_eq!(
            ViewField::new("created_on", "Created On", ViewKind::Date).format(&record),
            "2024-01-05"
        );
        assert_eq!(
            ViewField::new("capacity", "Capacity", ViewKind::Number).format(&record),
            "12"
        );
        assert_eq!(
            ViewField::new("missing", "Missing", ViewKind::Text).format(&record),
            "-"
        );
    }

    #[test]
    fn test_value_is_truthy() {
        assert!(value_is_truthy(&json!(true)));
        assert!(value_is_truthy(&json!(1)));
        assert!(!value_is_truthy(&json!(0)));
        assert!(!value_is_truthy(&json!(false)));
        assert!(!value_is_truthy(&Value::Null));
    }
}
