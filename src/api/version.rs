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

//! API version definitions.

use std::fmt;

/// The current/latest API version.
pub const API_CURRENT_VERSION: ApiVersion = ApiVersion::V1;

/// Available API versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V1,
}

impl ApiVersion {
    /// URL prefix the version's router is nested under.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "/api/v1",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
        }
    }

    /// Swagger UI location for this version.
    pub fn docs_path(&self) -> String {
        format!("{}/docs", self.path_prefix())
    }

    /// OpenAPI document location for this version.
    pub fn openapi_path(&self) -> String {
        format!("{}/openapi.json", self.path_prefix())
    }

    pub fn all() -> &'static [ApiVersion] {
        &[ApiVersion::V1]
    }

    pub fn all_strings() -> Vec<String> {
        Self::all().iter().map(|v| v.as_str().to_string()).collect()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
