//! Parameter binding and coercion.

use crate::dispatch::DispatchError;
use crate::routing::{ParamKind, ParamSource, ParamSpec};

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl ArgValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ArgValue::Int(_) => ParamKind::Int,
            ArgValue::Float(_) => ParamKind::Float,
            ArgValue::Bool(_) => ParamKind::Bool,
            ArgValue::Str(_) => ParamKind::Str,
        }
    }
}

/// Arguments bound for one handler invocation, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<(&'static str, ArgValue)>,
}

impl Arguments {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    fn require(&self, name: &str) -> Result<&ArgValue, DispatchError> {
        self.get(name).ok_or_else(|| DispatchError::MissingArgument {
            name: name.to_string(),
        })
    }

    fn mismatch(name: &str, expected: ParamKind, found: &ArgValue) -> DispatchError {
        DispatchError::ArgumentType {
            name: name.to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64, DispatchError> {
        match self.require(name)? {
            ArgValue::Int(v) => Ok(*v),
            other => Err(Self::mismatch(name, ParamKind::Int, other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<f64, DispatchError> {
        match self.require(name)? {
            ArgValue::Float(v) => Ok(*v),
            other => Err(Self::mismatch(name, ParamKind::Float, other)),
        }
    }

    pub fn bool(&self, name: &str) -> Result<bool, DispatchError> {
        match self.require(name)? {
            ArgValue::Bool(v) => Ok(*v),
            other => Err(Self::mismatch(name, ParamKind::Bool, other)),
        }
    }

    pub fn str(&self, name: &str) -> Result<&str, DispatchError> {
        match self.require(name)? {
            ArgValue::Str(v) => Ok(v),
            other => Err(Self::mismatch(name, ParamKind::Str, other)),
        }
    }

    fn push(&mut self, name: &'static str, value: ArgValue) {
        self.values.push((name, value));
    }
}

/// Value of the last `key=value` piece whose key is `name`.
///
/// Pieces are split on `&`, then on the first `=`. Values are returned
/// exactly as written, with no percent decoding, the same way the path
/// variable is captured. A piece without `=` has an empty value.
pub fn query_value<'q>(query: &'q str, name: &str) -> Option<&'q str> {
    query
        .split('&')
        .filter_map(|piece| {
            let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
            (key == name).then_some(value)
        })
        .last()
}

/// Coerce a raw string to the declared kind.
pub fn coerce(spec: &ParamSpec, raw: &str) -> Result<ArgValue, DispatchError> {
    let invalid = || DispatchError::InvalidParameter {
        name: spec.name.to_string(),
        kind: spec.kind,
        value: raw.to_string(),
    };

    match spec.kind {
        ParamKind::Int => raw.parse().map(ArgValue::Int).map_err(|_| invalid()),
        ParamKind::Float => raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(ArgValue::Float)
            .ok_or_else(invalid),
        ParamKind::Bool => match raw {
            "true" => Ok(ArgValue::Bool(true)),
            "false" => Ok(ArgValue::Bool(false)),
            _ => Err(invalid()),
        },
        ParamKind::Str => Ok(ArgValue::Str(raw.to_string())),
        ParamKind::Other(declared) => Err(unsupported(spec, declared)),
    }
}

fn unsupported(spec: &ParamSpec, declared: &str) -> DispatchError {
    DispatchError::UnsupportedParameterType {
        name: spec.name.to_string(),
        declared: declared.to_string(),
    }
}

/// Bind every tagged parameter from the path variable and query string.
pub fn bind(
    params: &[ParamSpec],
    variable: Option<&str>,
    query: Option<&str>,
) -> Result<Arguments, DispatchError> {
    let mut args = Arguments::default();

    for spec in params {
        let raw = match spec.source {
            ParamSource::Query => query.and_then(|q| query_value(q, spec.name)),
            ParamSource::Path => variable,
            ParamSource::Untagged => continue,
        };

        // An uncoercible kind fails even when the value is absent.
        if let ParamKind::Other(declared) = spec.kind {
            return Err(unsupported(spec, declared));
        }

        let raw = raw.ok_or_else(|| DispatchError::MissingParameter {
            name: spec.name.to_string(),
            location: spec.source,
        })?;
        args.push(spec.name, coerce(spec, raw)?);
    }

    Ok(args)
}
