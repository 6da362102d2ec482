//! Declared positional parameters.
//!
//! Same operation shape as [`crate::option::ToolOption`] (validity check,
//! sticky coerced-value cache) plus the required/empty rules positionals
//! need.

use once_cell::sync::OnceCell;

use crate::value::{CoerceError, CoercedValue, ValueKind, coerce};

/// A declared positional parameter, bound by position on the command line.
///
/// Construction contract (violations panic at declaration time):
/// `default_value` and `default_values` are mutually exclusive.
#[derive(Debug)]
pub struct ToolArgument {
    name: String,
    description: String,
    required: bool,
    can_be_empty: bool,
    collects: bool,
    kind: ValueKind,
    defaults: Vec<String>,
    defaults_declared: bool,
    bound: Vec<String>,
    coerced: OnceCell<Result<Vec<CoercedValue>, CoerceError>>,
}

impl ToolArgument {
    /// Declare a new positional argument. Optional and non-empty-allowing
    /// by default.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "argument name must not be empty");
        Self {
            name,
            description: String::new(),
            required: false,
            can_be_empty: false,
            collects: false,
            kind: ValueKind::Text,
            defaults: Vec::new(),
            defaults_declared: false,
            bound: Vec::new(),
            coerced: OnceCell::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the argument as required: an invocation that binds no value
    /// to it fails validation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow an empty string as a bound value. Without this, a required
    /// argument bound to `""` fails validation.
    pub fn allow_empty(mut self) -> Self {
        self.can_be_empty = true;
        self
    }

    /// Let this argument collect all trailing positionals. Only the final
    /// declared argument may collect (checked at schema construction).
    pub fn multiple(mut self) -> Self {
        self.collects = true;
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Declare a single default value. Mutually exclusive with
    /// [`ToolArgument::default_values`].
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        assert!(
            !self.defaults_declared,
            "argument '{}': default_value and default_values are mutually exclusive",
            self.name
        );
        self.defaults = vec![value.into()];
        self.defaults_declared = true;
        self
    }

    /// Declare a list of default values. Mutually exclusive with
    /// [`ToolArgument::default_value`].
    pub fn default_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        assert!(
            !self.defaults_declared,
            "argument '{}': default_value and default_values are mutually exclusive",
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

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn allows_empty(&self) -> bool {
        self.can_be_empty
    }

    pub fn is_collecting(&self) -> bool {
        self.collects
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    // === Binding (invocation time) ===

    pub(crate) fn bind(&mut self, raw: String) {
        self.bound.push(raw);
    }

    // === Reading (after validation) ===

    fn coerced(&self) -> &Result<Vec<CoercedValue>, CoerceError> {
        self.coerced.get_or_init(|| {
            let source = if self.bound.is_empty() {
                &self.defaults
            } else {
                &self.bound
            };
            source.iter().map(|raw| coerce(raw, self.kind)).collect()
        })
    }

    /// Validity, checked in order with short-circuit on first failure:
    ///
    /// 1. required and no value bound -> invalid;
    /// 2. required, empty not allowed, and any bound value is the empty
    ///    string -> invalid;
    /// 3. otherwise bound values (or defaults, if none bound) must all
    ///    coerce to the declared kind.
    pub fn is_valid(&self) -> bool {
        if self.required && self.bound.is_empty() {
            return false;
        }
        if self.required && !self.can_be_empty && self.bound.iter().any(String::is_empty) {
            return false;
        }
        self.coerced().is_ok()
    }

    /// The first coerced value, or `None`. First read freezes the coerced
    /// sequence for the lifetime of the instance.
    pub fn value(&self) -> Option<&CoercedValue> {
        self.values().first()
    }

    /// All coerced values. First read freezes the coerced sequence; a
    /// coercion failure yields an empty slice.
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
