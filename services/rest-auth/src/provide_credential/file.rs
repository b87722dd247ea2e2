// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use async_trait::async_trait;
use log::debug;

use cerb_core::{Context, Error, ProvideCredential, Result, SigningCredential};

use crate::{constants::*, Credential};

/// FileCredentialProvider loads Cerb credentials from a JSON file.
///
/// The file looks like:
///
/// ```json
/// {"access-key": "...", "access-secret": "..."}
/// ```
///
/// The path is resolved from, in order:
///
/// - the path set with [`FileCredentialProvider::with_path`]
/// - env value: [`CERB_CREDENTIALS_FILE`]
/// - default to: [`DEFAULT_CREDENTIALS_FILE`]
///
/// A missing or unreadable file yields `None` so that a chain can fall
/// through. A file that exists but does not parse is a config error.
#[derive(Debug, Default, Clone)]
pub struct FileCredentialProvider {
    path: Option<String>,
}

impl FileCredentialProvider {
    /// Create a new FileCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read credentials from this path instead.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for FileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => ctx
                .env_var(CERB_CREDENTIALS_FILE)
                .unwrap_or_else(|| DEFAULT_CREDENTIALS_FILE.to_string()),
        };

        let expanded_path = if path.starts_with('~') {
            match ctx.expand_home_dir(&path) {
                Some(expanded) => expanded,
                None => {
                    debug!("failed to expand homedir for path: {path}");
                    return Ok(None);
                }
            }
        } else {
            path
        };

        let content = match ctx.file_read(&expanded_path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read credentials file {expanded_path}: {err}");
                return Ok(None);
            }
        };

        let cred: Credential = serde_json::from_slice(&content).map_err(|e| {
            Error::config_invalid("failed to parse credentials file")
                .with_context("path", &expanded_path)
                .with_source(e)
        })?;
        if !cred.is_valid() {
            return Err(Error::config_invalid("credentials file has empty key or secret")
                .with_context("path", &expanded_path));
        }

        debug!("loaded cerb credential from {expanded_path}");
        Ok(Some(cred))
    }
}
