//! Typed GraphQL selection sets and query documents.
//!
//! Documents are assembled from values rather than string templates so that
//! shared fragments (money, images, connections) are written once and every
//! variable reference can be checked against the operation's definitions.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

/// An argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `$name`
    Variable(&'static str),
    /// Integer literal.
    Int(i64),
}

/// A field argument, e.g. `first: $first`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: &'static str,
    value: Value,
}

/// A selected field with optional alias, arguments and sub-selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    alias: Option<&'static str>,
    name: &'static str,
    arguments: Vec<Argument>,
    selection: SelectionSet,
}

impl Field {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            alias: None,
            name,
            arguments: Vec::new(),
            selection: SelectionSet::new(),
        }
    }

    /// Rename the field in the response (`alias: name`).
    #[must_use]
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Add an argument.
    #[must_use]
    pub fn arg(mut self, name: &'static str, value: Value) -> Self {
        self.arguments.push(Argument { name, value });
        self
    }

    /// Add an argument bound to a variable of the same name.
    #[must_use]
    pub fn var(self, name: &'static str) -> Self {
        self.arg(name, Value::Variable(name))
    }

    /// Set the sub-selection.
    #[must_use]
    pub fn select(mut self, selection: SelectionSet) -> Self {
        self.selection = selection;
        self
    }

    fn write_to(&self, out: &mut String) {
        if let Some(alias) = self.alias {
            out.push_str(alias);
            out.push_str(": ");
        }
        out.push_str(self.name);

        if !self.arguments.is_empty() {
            out.push('(');
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(argument.name);
                out.push_str(": ");
                match argument.value {
                    Value::Variable(name) => {
                        out.push('$');
                        out.push_str(name);
                    }
                    Value::Int(n) => {
                        let _ = write!(out, "{n}");
                    }
                }
            }
            out.push(')');
        }

        if !self.selection.is_empty() {
            out.push(' ');
            self.selection.write_to(out);
        }
    }

    fn collect_variables(&self, into: &mut BTreeSet<&'static str>) {
        for argument in &self.arguments {
            if let Value::Variable(name) = argument.value {
                into.insert(name);
            }
        }
        self.selection.collect_variables(into);
    }
}

/// An ordered list of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    fields: Vec<Field>,
}

impl SelectionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Select leaf fields by name.
    #[must_use]
    pub fn scalars(mut self, names: &[&'static str]) -> Self {
        self.fields.extend(names.iter().map(|&name| Field::new(name)));
        self
    }

    /// Select a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn write_to(&self, out: &mut String) {
        out.push('{');
        for field in &self.fields {
            out.push(' ');
            field.write_to(out);
        }
        out.push_str(" }");
    }

    fn collect_variables(&self, into: &mut BTreeSet<&'static str>) {
        for field in &self.fields {
            field.collect_variables(into);
        }
    }
}

/// Wrap `node` in the Relay connection shape: `edges { node { .. } }`,
/// plus `pageInfo` when `paginated`.
#[must_use]
pub fn connection(field: Field, node: SelectionSet, paginated: bool) -> Field {
    let edges = Field::new("edges").select(SelectionSet::new().field(Field::new("node").select(node)));
    let mut selection = SelectionSet::new().field(edges);
    if paginated {
        selection = selection.field(Field::new("pageInfo").select(SelectionSet::new().scalars(&[
            "hasNextPage",
            "hasPreviousPage",
            "startCursor",
            "endCursor",
        ])));
    }
    field.select(selection)
}

/// A variable declaration in an operation header, e.g. `$first: Int!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    name: &'static str,
    type_name: &'static str,
}

/// A named query operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: &'static str,
    variables: Vec<VariableDefinition>,
    selection: SelectionSet,
}

impl Document {
    #[must_use]
    pub const fn query(name: &'static str) -> Self {
        Self {
            name,
            variables: Vec::new(),
            selection: SelectionSet::new(),
        }
    }

    /// Declare a variable.
    #[must_use]
    pub fn variable(mut self, name: &'static str, type_name: &'static str) -> Self {
        self.variables.push(VariableDefinition { name, type_name });
        self
    }

    /// Set the root selection.
    #[must_use]
    pub fn select(mut self, selection: SelectionSet) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Variables referenced anywhere in the selection.
    #[must_use]
    pub fn used_variables(&self) -> BTreeSet<&'static str> {
        let mut used = BTreeSet::new();
        self.selection.collect_variables(&mut used);
        used
    }

    /// Variables declared in the operation header.
    #[must_use]
    pub fn declared_variables(&self) -> BTreeSet<&'static str> {
        self.variables.iter().map(|v| v.name).collect()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("query ");
        out.push_str(self.name);

        if !self.variables.is_empty() {
            out.push('(');
            for (i, variable) in self.variables.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "${}: {}", variable.name, variable.type_name);
            }
            out.push(')');
        }

        out.push(' ');
        self.selection.write_to(&mut out);
        f.write_str(&out)
    }
}
