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

use cerb_core::{utils::Redact, SigningCredential};
use serde::Deserialize;

/// Credential for the Cerb REST API.
///
/// The access key travels in clear text inside the `Cerb-Auth` header. The
/// access secret never leaves the process; only its digest is signed.
#[derive(Clone, Deserialize)]
pub struct Credential {
    /// Access key for cerb.
    #[serde(rename = "access-key")]
    pub access_key: String,
    /// Access secret for cerb.
    #[serde(rename = "access-secret")]
    pub access_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            access_secret: access_secret.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &Redact::from(&self.access_key))
            .field("access_secret", &Redact::from(&self.access_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key.is_empty() && !self.access_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_debug_never_prints_secret() {
        let cred = Credential::new("AK-0123456789", "a-very-long-shared-secret");
        let out = format!("{cred:?}");

        assert!(!out.contains("a-very-long-shared-secret"));
        assert_eq!(
            out,
            r#"Credential { access_key: AK-***789, access_secret: a-v***ret }"#
        );
    }

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("ak", "sk").is_valid());
        assert!(!Credential::new("", "sk").is_valid());
        assert!(!Credential::new("ak", "").is_valid());
    }

    #[test]
    fn test_deserialize_creds_json() {
        let cred: Credential =
            serde_json::from_str(r#"{"access-key":"ak","access-secret":"sk"}"#).unwrap();
        assert_eq!(cred.access_key, "ak");
        assert_eq!(cred.access_secret, "sk");
    }
}
