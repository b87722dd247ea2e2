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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// A signer owns exactly one credential, resolved when it is built and never
/// changed afterwards. Cloning is cheap and clones share the same credential.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    credential: Arc<K>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer from an already resolved credential.
    pub fn new(ctx: Context, credential: K, builder: impl SignRequest<Credential = K>) -> Self {
        Self {
            ctx,
            credential: Arc::new(credential),
            builder: Arc::new(builder),
        }
    }

    /// Create a new signer by resolving the credential from `provider` once.
    ///
    /// Fails with [`crate::ErrorKind::CredentialInvalid`] if the provider has
    /// no credential or returns one that is not valid.
    pub async fn from_provider(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Result<Self> {
        let credential = provider
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential found"))?;
        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "credential is missing its key or secret",
            ));
        }

        Ok(Self::new(ctx, credential, builder))
    }

    /// The context this signer was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The credential this signer signs with.
    pub fn credential(&self) -> &K {
        &self.credential
    }

    /// Sign the request, `body` being the exact bytes that will be sent.
    pub async fn sign(&self, req: &mut http::request::Parts, body: &[u8]) -> Result<()> {
        self.builder
            .sign_request(&self.ctx, req, body, Some(self.credential.as_ref()))
            .await
    }
}
