// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of operations a scope understands.

use alloc::string::String;

use crate::error::CheckboxesError;

/// One operation on a scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Check every enabled checkbox.
    Check,
    /// Uncheck every enabled checkbox.
    Uncheck,
    /// Flip every enabled checkbox.
    Toggle,
    /// Limit the number of checked boxes; `<= 0` removes the limit.
    Max(i64),
    /// Enable or disable shift-click range selection.
    Range(bool),
}

impl Operation {
    /// Parse a method name and its optional textual argument.
    ///
    /// Arguments follow markup truthiness: a missing `range` value is
    /// `false`, and `""`, `"false"` and `"0"` are false while anything else is
    /// true. A missing or empty `max` value is `0`; anything else must be an
    /// integer. Arguments to `check`, `uncheck` and `toggle` are ignored.
    ///
    /// ```
    /// use understory_checkboxes::Operation;
    ///
    /// assert_eq!(Operation::parse("max", Some("3")), Ok(Operation::Max(3)));
    /// assert_eq!(Operation::parse("range", Some("true")), Ok(Operation::Range(true)));
    /// assert_eq!(Operation::parse("range", None), Ok(Operation::Range(false)));
    /// assert!(Operation::parse("explode", None).is_err());
    /// ```
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, CheckboxesError> {
        match name {
            "check" => Ok(Self::Check),
            "uncheck" => Ok(Self::Uncheck),
            "toggle" => Ok(Self::Toggle),
            "max" => {
                let raw = value.map(str::trim).unwrap_or("");
                if raw.is_empty() {
                    return Ok(Self::Max(0));
                }
                raw.parse()
                    .map(Self::Max)
                    .map_err(|_| CheckboxesError::InvalidArgument {
                        operation: "max",
                        value: String::from(raw),
                    })
            }
            "range" => Ok(Self::Range(value.is_some_and(truthy))),
            other => Err(CheckboxesError::UnknownOperation(String::from(other))),
        }
    }

    /// The method name this operation answers to.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Uncheck => "uncheck",
            Self::Toggle => "toggle",
            Self::Max(_) => "max",
            Self::Range(_) => "range",
        }
    }
}

fn truthy(v: &str) -> bool {
    !matches!(v.trim(), "" | "false" | "0")
}

/// Construction-time options for a scope's controller.
///
/// Applied once, when the registry creates the instance through
/// [`Invocation::Init`]: a positive `max` runs [`Operation::Max`] and a
/// true `range` runs [`Operation::Range`], so a scope can be fully
/// configured in one call. An existing instance ignores them. Creating an
/// instance through [`Invocation::Call`] stores default options and runs
/// only the requested operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Initial selection limit; `<= 0` means none.
    pub max: i64,
    /// Start with range selection enabled.
    pub range: bool,
}

/// What a caller asks of a scope: either an operation, or options for a new instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Run an operation (creating the instance first if needed).
    Call(Operation),
    /// Create the instance with options if it does not exist; no operation runs.
    Init(Options),
}

impl From<Operation> for Invocation {
    fn from(op: Operation) -> Self {
        Self::Call(op)
    }
}

impl From<Options> for Invocation {
    fn from(options: Options) -> Self {
        Self::Init(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for op in [
            Operation::Check,
            Operation::Uncheck,
            Operation::Toggle,
            Operation::Max(0),
            Operation::Range(false),
        ] {
            assert_eq!(Operation::parse(op.name(), None), Ok(op));
        }
    }

    #[test]
    fn max_arguments() {
        assert_eq!(Operation::parse("max", Some(" 2 ")), Ok(Operation::Max(2)));
        assert_eq!(Operation::parse("max", Some("-1")), Ok(Operation::Max(-1)));
        assert_eq!(Operation::parse("max", Some("")), Ok(Operation::Max(0)));
        assert_eq!(
            Operation::parse("max", Some("two")),
            Err(CheckboxesError::InvalidArgument {
                operation: "max",
                value: "two".into(),
            })
        );
    }

    #[test]
    fn range_truthiness() {
        for (raw, want) in [
            ("true", true),
            ("1", true),
            ("yes", true),
            ("false", false),
            ("0", false),
            ("", false),
        ] {
            assert_eq!(
                Operation::parse("range", Some(raw)),
                Ok(Operation::Range(want)),
                "range({raw:?})"
            );
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(
            Operation::parse("Check", None),
            Err(CheckboxesError::UnknownOperation("Check".into()))
        );
    }
}
