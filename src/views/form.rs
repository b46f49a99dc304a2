//! Form panel state
//!
//! A form is a list of labeled fields holding raw text. Typed values are
//! read back through `FormReader`, which collects per-field errors so
//! they can be shown inline.

use crate::types::parse_api_date;
use chrono::NaiveDate;

pub const MSG_REQUIRED: &str = "Campo obligatorio";
pub const MSG_NUMBER: &str = "Debe ser un número";
pub const MSG_DATE: &str = "Fecha inválida (AAAA-MM-DD)";
pub const MSG_SELECT: &str = "Seleccione una opción";

/// Create or edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Crear",
            FormMode::Edit(_) => "Modificar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-negative, optionally with a decimal point
    Number,
    Date,
    Checkbox,
    Select(Vec<SelectOption>),
}

/// One labeled input
#[derive(Debug, Clone)]
pub struct FormField {
    /// Attribute name, as on the wire
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub error: Option<String>,
}

impl FormField {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            value: String::new(),
            error: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn is_checked(&self) -> bool {
        self.value == "true"
    }

    /// Label of the selected option, if any
    pub fn selected_label(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.value == self.value)
                .map(|o| o.label.as_str()),
            _ => None,
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text => !c.is_control(),
            FieldKind::Number => c.is_ascii_digit() || (c == '.' && !self.value.contains('.')),
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Checkbox | FieldKind::Select(_) => false,
        }
    }
}

/// Errors keyed by field
pub type FieldErrors = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
pub struct FormPanel {
    pub mode: FormMode,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormPanel {
    pub fn new(mode: FormMode, fields: Vec<FormField>) -> Self {
        Self {
            mode,
            fields,
            focus: 0,
        }
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type a character into the focused field.
    ///
    /// A space on a checkbox toggles it.
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };

        if field.kind == FieldKind::Checkbox {
            if c == ' ' {
                field.value = (!field.is_checked()).to_string();
                field.error = None;
            }
            return;
        }

        if field.accepts(c) {
            field.value.push(c);
            field.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if matches!(field.kind, FieldKind::Text | FieldKind::Number | FieldKind::Date) {
                field.value.pop();
            }
        }
    }

    /// Move a select to the next or previous option.
    ///
    /// From an empty value, forward picks the first option and backward the last.
    pub fn cycle_select(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let FieldKind::Select(options) = &field.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }

        let len = options.len();
        let next = match options.iter().position(|o| o.value == field.value) {
            Some(pos) if forward => (pos + 1) % len,
            Some(pos) => (pos + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        field.value = options[next].value.clone();
        field.error = None;
    }

    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Replace errors with `errors` and focus the first offending field
    pub fn apply_errors(&mut self, errors: &FieldErrors) {
        for field in &mut self.fields {
            field.error = errors
                .iter()
                .find(|(key, _)| *key == field.key)
                .map(|(_, msg)| msg.clone());
        }

        if let Some(pos) = self.fields.iter().position(|f| f.error.is_some()) {
            self.focus = pos;
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }
}

/// Reads typed values out of a form, collecting errors
pub struct FormReader<'a> {
    form: &'a FormPanel,
    errors: FieldErrors,
}

impl<'a> FormReader<'a> {
    pub fn new(form: &'a FormPanel) -> Self {
        Self {
            form,
            errors: Vec::new(),
        }
    }

    /// Required text, trimmed
    pub fn text(&mut self, key: &'static str) -> String {
        let value = self.form.value(key).trim();
        if value.is_empty() {
            self.errors.push((key, MSG_REQUIRED.into()));
        }
        value.to_string()
    }

    /// Required non-negative number
    pub fn number(&mut self, key: &'static str) -> f64 {
        let value = self.form.value(key).trim();
        if value.is_empty() {
            self.errors.push((key, MSG_REQUIRED.into()));
            return 0.0;
        }
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => n,
            _ => {
                self.errors.push((key, MSG_NUMBER.into()));
                0.0
            }
        }
    }

    /// Required `YYYY-MM-DD` date
    pub fn date(&mut self, key: &'static str) -> Option<NaiveDate> {
        let value = self.form.value(key).trim();
        if value.is_empty() {
            self.errors.push((key, MSG_REQUIRED.into()));
            return None;
        }
        // Forms only take the short format, timestamps are for API input
        if value.len() != 10 {
            self.errors.push((key, MSG_DATE.into()));
            return None;
        }
        match parse_api_date(value) {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.push((key, MSG_DATE.into()));
                None
            }
        }
    }

    pub fn checked(&self, key: &'static str) -> bool {
        self.form.value(key) == "true"
    }

    /// Parse the selected option with `parse`
    pub fn select<T>(&mut self, key: &'static str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let parsed = parse(self.form.value(key));
        if parsed.is_none() {
            self.errors.push((key, MSG_SELECT.into()));
        }
        parsed
    }

    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}
