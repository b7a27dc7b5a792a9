// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Environment variable interpolation for configuration files.
//!
//! Supported syntax:
//! - `${VAR_NAME}` - replaced by the variable's value; an error if unset
//! - `${VAR_NAME:-default}` - `default` when the variable is unset or empty
//!
//! ```
//! use serviceapi::config::env_interpolation::interpolate;
//!
//! std::env::set_var("SERVICEAPI_DOC_PORT", "9000");
//!
//! let input = "port: ${SERVICEAPI_DOC_PORT}\nhost: ${SERVICEAPI_DOC_HOST:-0.0.0.0}";
//! let result = interpolate(input).unwrap();
//! assert_eq!(result, "port: 9000\nhost: 0.0.0.0");
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the size of an interpolated document.
const MAX_INTERPOLATED_LENGTH: usize = 10_000_000;

lazy_static! {
    /// `${NAME}` or `${NAME:-default}`; NAME follows POSIX rules.
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("Invalid regex pattern");
}

/// Errors that can occur during environment variable interpolation.
#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Interpolated result exceeds {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Replace every variable reference in `input`.
///
/// Expansion is not recursive: a value containing `${...}` is inserted as-is.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;
    let mut names = Vec::new();

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let (start, end) = match caps.get(0) {
            Some(m) => (m.start(), m.end()),
            None => continue,
        };
        let (name, value) = resolve(&caps)?;

        output.push_str(&input[cursor..start]);
        output.push_str(&value);
        cursor = end;
        names.push(name);

        if output.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }
    output.push_str(&input[cursor..]);

    if !names.is_empty() {
        debug!("Interpolated environment variables: {}", names.join(", "));
    }
    Ok(output)
}

fn resolve<'a>(caps: &Captures<'a>) -> Result<(&'a str, String), InterpolationError> {
    let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let default = caps.get(3).map(|m| m.as_str());

    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok((name, value)),
        Err(env::VarError::NotUnicode(_)) => Err(InterpolationError::MissingVariable {
            name: format!("{name} (contains invalid Unicode)"),
        }),
        _ => default
            .map(|d| (name, d.to_string()))
            .ok_or_else(|| InterpolationError::MissingVariable {
                name: name.to_string(),
            }),
    }
}
