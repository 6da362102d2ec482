//! Declared command flags.
//!
//! A [`ToolOption`] is declared once per invocation (inside
//! `Tool::schema()` / `Command::schema()`), bound by the binder, and read
//! by the user action after validation.

use once_cell::sync::OnceCell;

use crate::value::{CoerceError, CoercedValue, ValueKind, coerce};

/// How many values a flag takes on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A bare switch: `--verbose`.
    NoValue,
    /// Exactly one value: `--out path` or `--out=path`.
    SingleValue,
    /// One value per occurrence, any number of occurrences.
    MultipleValue,
}

/// A declared flag with typed, validated values.
///
/// Construction contract (violations panic at declaration time):
/// - a `NoValue` option carries no default and no kind other than `Text`;
/// - `default_value` and `default_values` are mutually exclusive.
#[derive(Debug)]
pub struct ToolOption {
    name: String,
    aliases: Vec<String>,
    description: String,
    arity: Arity,
    kind: ValueKind,
    defaults: Vec<String>,
    defaults_declared: bool,
    bound: Vec<String>,
    present: bool,
    coerced: OnceCell<Result<Vec<CoercedValue>, CoerceError>>,
}

impl ToolOption {
    /// Declare a new option. `name` is the long form (matched as `--name`).
    pub fn new(name: impl Into<String>, arity: Arity) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "option name must not be empty");
        Self {
            name,
            aliases: Vec::new(),
            description: String::new(),
            arity,
            kind: ValueKind::Text,
            defaults: Vec::new(),
            defaults_declared: false,
            bound: Vec::new(),
            present: false,
            coerced: OnceCell::new(),
        }
    }

    /// Add an alias. Single-character aliases match as `-a`, longer ones
    /// as `--alias`.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare the value kind. Not allowed for `NoValue` options.
    pub fn kind(mut self, kind: ValueKind) -> Self {
        assert!(
            self.arity != Arity::NoValue || kind == ValueKind::Text,
            "option '{}': a NoValue option cannot declare a value kind",
            self.name
        );
        self.kind = kind;
        self
    }

    /// Declare a single default value. Mutually exclusive with
    /// [`ToolOption::default_values`]; not allowed for `NoValue` options.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        assert!(
            self.arity != Arity::NoValue,
            "option '{}': a NoValue option cannot carry a default value",
            self.name
        );
        assert!(
            !self.defaults_declared,
            "option '{}': default_value and default_values are mutually exclusive",
            self.name
        );
        self.defaults = vec![value.into()];
        self.defaults_declared = true;
        self
    }

    /// Declare a list of default values. Mutually exclusive with
    /// [`ToolOption::default_value`]; not allowed for `NoValue` options.
    pub fn default_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        assert!(
            self.arity != Arity::NoValue,
            "option '{}': a NoValue option cannot carry default values",
            self.name
        );
        assert!(
            !self.defaults_declared,
            "option '{}': default_value and default_values are mutually exclusive",
            self.name
        );
        self.defaults = values.into_iter().map(Into::into).collect();
        self.defaults_declared = true;
        self
    }

    // === Declaration accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    // === Binding (invocation time) ===

    /// Record an occurrence of a `NoValue` switch.
    pub(crate) fn mark_present(&mut self) {
        self.present = true;
    }

    /// Append a raw value from the command line.
    pub(crate) fn bind(&mut self, raw: String) {
        self.bound.push(raw);
    }

    pub(crate) fn bound_len(&self) -> usize {
        self.bound.len()
    }

    /// Whether the flag appeared on the command line at all.
    pub fn is_present(&self) -> bool {
        self.present || !self.bound.is_empty()
    }

    // === Reading (after validation) ===

    /// Coerce bound values (or defaults, if none bound) to the declared
    /// kind. Computed once; the first call through `is_valid`/`value`/
    /// `values` freezes the result for the lifetime of the instance, even
    /// if raw bound values are mutated afterwards.
    fn coerced(&self) -> &Result<Vec<CoercedValue>, CoerceError> {
        self.coerced.get_or_init(|| {
            if self.arity == Arity::NoValue {
                return Ok(Vec::new());
            }
            let source = if self.bound.is_empty() {
                &self.defaults
            } else {
                &self.bound
            };
            source.iter().map(|raw| coerce(raw, self.kind)).collect()
        })
    }

    /// Whether every bound value (or every default, if none bound) coerces
    /// to the declared kind. A `NoValue` option is always valid.
    pub fn is_valid(&self) -> bool {
        self.arity == Arity::NoValue || self.coerced().is_ok()
    }

    /// The first coerced value, or `None` if there is none (or coercion
    /// failed). First read freezes the coerced sequence.
    pub fn value(&self) -> Option<&CoercedValue> {
        self.values().first()
    }

    /// All coerced values. First read freezes the coerced sequence; an
    /// invalid option yields an empty slice.
    pub fn values(&self) -> &[CoercedValue] {
        match self.coerced() {
            Ok(values) => values,
            Err(_) => &[],
        }
    }

    // === Typed convenience getters ===

    pub fn text(&self) -> Option<&str> {
        self.value().and_then(CoercedValue::as_text)
    }

    pub fn integer(&self) -> Option<i64> {
        self.value().and_then(CoercedValue::as_i64)
    }

    pub fn float(&self) -> Option<f64> {
        self.value().and_then(CoercedValue::as_f64)
    }
}

// ============================================================================
// Tests
// ============================================================================
