//! Type definitions for the plugin system
//!
//! This module contains the metadata model plugins use to describe their
//! commands (names, descriptions, typed parameters) and the result type
//! returned from command execution.

use serde::Serialize;

/// A single labelled value of a discrete (enumeration-like) parameter type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscreteValue {
    pub label: String,
    pub ordinal: i64,
}

impl DiscreteValue {
    pub fn new(label: impl Into<String>, ordinal: i64) -> Self {
        Self {
            label: label.into(),
            ordinal,
        }
    }
}

impl<S: Into<String>> From<(S, i64)> for DiscreteValue {
    fn from((label, ordinal): (S, i64)) -> Self {
        Self::new(label, ordinal)
    }
}

/// Semantic type of a command parameter
///
/// A descriptor is either continuous (just a type name such as `string` or
/// `int32`) or discrete, in which case it carries the ordered set of values
/// the parameter accepts. `is_discrete()` is derived from the value list, so
/// a descriptor can never claim to be discrete without values or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    type_name: String,
    is_discrete: bool,
    discrete_values: Vec<DiscreteValue>,
}

impl TypeDescriptor {
    /// Non-discrete type identified only by its name
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            is_discrete: false,
            discrete_values: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn int32() -> Self {
        Self::new("int32")
    }

    pub fn boolean() -> Self {
        Self::new("bool")
    }

    /// Discrete type with an explicit, ordered list of `(label, ordinal)` values
    ///
    /// An empty value list yields a plain (non-discrete) descriptor.
    pub fn discrete<I, V>(type_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<DiscreteValue>,
    {
        let discrete_values: Vec<DiscreteValue> = values.into_iter().map(Into::into).collect();
        Self {
            type_name: type_name.into(),
            is_discrete: !discrete_values.is_empty(),
            discrete_values,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_discrete(&self) -> bool {
        self.is_discrete
    }

    /// Values in declaration order; empty for non-discrete types
    pub fn discrete_values(&self) -> &[DiscreteValue] {
        &self.discrete_values
    }
}

/// A named, typed command parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: TypeDescriptor,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

/// Description of a command a plugin supports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMetadata {
    pub command_name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

impl CommandMetadata {
    pub fn new(command_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter; parameters keep the order they are added in
    pub fn with_parameter(mut self, name: impl Into<String>, param_type: TypeDescriptor) -> Self {
        self.parameters.push(Parameter::new(name, param_type));
        self
    }
}

/// Outcome of executing a plugin command
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommandResult {
    pub success: bool,
    /// When set the host prints nothing, whatever `success` says
    pub silent: bool,
    pub message: String,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            silent: false,
            message: message.into(),
        }
    }

    /// Successful result the host should not echo
    pub fn silent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            silent: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            silent: false,
            message: message.into(),
        }
    }

    /// Standard rejection for a command the plugin does not implement
    pub fn unknown_command(command_name: &str) -> Self {
        Self::failure(format!("Unknown command: {}", command_name))
    }
}
