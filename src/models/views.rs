//! Display-ready shapes handed to the templates. Handlers turn API resources
//! into these so the templates only loop and print.

/// One `<option>` of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }

    /// Options whose value and label are the same string.
    pub fn plain(values: &[&str], selected: &str) -> Vec<Self> {
        values
            .iter()
            .map(|v| Self::new(*v, *v, *v == selected))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    TextArea,
    Select,
    Checkbox,
    Hidden,
}

/// One form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub checked: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub options: Vec<OptionView>,
}

impl FieldView {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            value: String::new(),
            required: false,
            checked: false,
            min: None,
            max: None,
            options: Vec::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn password(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    pub fn number(name: &'static str, label: &'static str, min: i64, max: i64) -> Self {
        let mut field = Self::new(name, label, FieldKind::Number);
        field.min = Some(min);
        field.max = Some(max);
        field
    }

    pub fn select(name: &'static str, label: &'static str, options: Vec<OptionView>) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.options = options;
        field
    }

    pub fn checkbox(name: &'static str, label: &'static str, checked: bool) -> Self {
        let mut field = Self::new(name, label, FieldKind::Checkbox);
        field.checked = checked;
        field
    }

    pub fn hidden(name: &'static str, value: impl Into<String>) -> Self {
        Self::new(name, "", FieldKind::Hidden).with_value(value)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Hidden => "hidden",
            _ => "text",
        }
    }

    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    pub fn is_textarea(&self) -> bool {
        self.kind == FieldKind::TextArea
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == FieldKind::Hidden
    }
}

/// A create form rendered above a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub action: String,
    pub title: String,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
}

/// A table cell; `class` turns it into a status badge, `href` into a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    pub class: Option<&'static str>,
    pub href: Option<String>,
}

impl CellView {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
            href: None,
        }
    }

    /// `-` for absent values.
    pub fn maybe(text: Option<impl Into<String>>) -> Self {
        Self::text(text.map(Into::into).unwrap_or_else(|| "-".to_string()))
    }

    pub fn badge(text: impl Into<String>, class: &'static str) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
            href: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
            href: Some(href.into()),
        }
    }
}

/// A per-row button posting to `action`. Extra `inputs` travel with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub label: &'static str,
    pub action: String,
    pub enabled: bool,
    pub danger: bool,
    pub inputs: Vec<FieldView>,
}

impl ActionView {
    pub fn new(label: &'static str, action: impl Into<String>) -> Self {
        Self {
            label,
            action: action.into(),
            enabled: true,
            danger: false,
            inputs: Vec::new(),
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_input(mut self, input: FieldView) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn button_class(&self) -> &'static str {
        if self.danger {
            "btn btn-danger"
        } else {
            "btn"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<CellView>,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub empty_message: String,
}

impl TableView {
    pub fn new(columns: Vec<&'static str>, empty_message: impl Into<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            empty_message: empty_message.into(),
        }
    }

    pub fn push(&mut self, cells: Vec<CellView>, actions: Vec<ActionView>) {
        self.rows.push(RowView { cells, actions });
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Count card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub label: &'static str,
    pub href: &'static str,
    pub count: Option<usize>,
    pub error: Option<String>,
}
