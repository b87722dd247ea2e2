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

use std::fmt::{Debug, Formatter};

use cerb_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for the Cerb REST API signer.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CERB_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `access_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CERB_ACCESS_SECRET`]
    pub access_secret: Option<String>,
    /// `credentials_file` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CERB_CREDENTIALS_FILE`]
    /// - default to: [`DEFAULT_CREDENTIALS_FILE`]
    pub credentials_file: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set access_secret
    pub fn with_access_secret(mut self, access_secret: impl Into<String>) -> Self {
        self.access_secret = Some(access_secret.into());
        self
    }

    /// Set credentials_file
    pub fn with_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Load config from env.
    ///
    /// Values already set on this config take precedence.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CERB_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CERB_ACCESS_SECRET) {
            self.access_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CERB_CREDENTIALS_FILE) {
            self.credentials_file.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &Redact::from(&self.access_key))
            .field("access_secret", &Redact::from(&self.access_secret))
            .field("credentials_file", &self.credentials_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cerb_core::StaticEnv;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() {
        let cfg = Config::new().from_env(&ctx(&[
            (CERB_ACCESS_KEY, "ak"),
            (CERB_ACCESS_SECRET, "sk"),
            (CERB_CREDENTIALS_FILE, "/etc/cerb/creds.json"),
        ]));

        assert_eq!(cfg.access_key.as_deref(), Some("ak"));
        assert_eq!(cfg.access_secret.as_deref(), Some("sk"));
        assert_eq!(cfg.credentials_file.as_deref(), Some("/etc/cerb/creds.json"));
    }

    #[test]
    fn test_explicit_values_win_over_env() {
        let cfg = Config::new()
            .with_access_key("explicit")
            .from_env(&ctx(&[(CERB_ACCESS_KEY, "from-env")]));

        assert_eq!(cfg.access_key.as_deref(), Some("explicit"));
        assert_eq!(cfg.credentials_file, None);
    }

    #[test]
    fn test_from_os_env() {
        temp_env::with_vars(
            vec![
                (CERB_ACCESS_KEY, Some("os_key")),
                (CERB_ACCESS_SECRET, Some("os_secret")),
                (CERB_CREDENTIALS_FILE, None),
            ],
            || {
                let cfg = Config::new().from_env(&Context::new().with_env(cerb_core::OsEnv));

                assert_eq!(cfg.access_key.as_deref(), Some("os_key"));
                assert_eq!(cfg.access_secret.as_deref(), Some("os_secret"));
                assert_eq!(cfg.credentials_file, None);
            },
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cfg = Config::new()
            .with_access_key("ak")
            .with_access_secret("super-secret-value");
        let out = format!("{cfg:?}");

        assert!(!out.contains("super-secret-value"));
        assert!(out.contains("sup***lue"));
    }
}
