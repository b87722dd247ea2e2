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

//! Client for the Cerb REST API.
//!
//! Every request is signed with the `Cerb-Auth` scheme and every response is
//! checked for the error envelope Cerb sends with HTTP 200.
//!
//! ## Example
//!
//! ```no_run
//! use cerb::{default_context, Client};
//!
//! #[tokio::main]
//! async fn main() -> cerb::Result<()> {
//!     // CERB_BASE_URL, CERB_ACCESS_KEY and CERB_ACCESS_SECRET must be set,
//!     // or the key pair stored in ~/.config/cerb/creds.json.
//!     let client = Client::from_env(default_context()).await?;
//!
//!     let page = client.list_open_tickets(0).await?;
//!     for ticket in &page.records {
//!         println!("{} {}", ticket.mask, ticket.subject);
//!     }
//!     println!("{} more", page.remaining);
//!     Ok(())
//! }
//! ```

pub use cerb_core::*;

/// The `Cerb-Auth` signer, credentials and encoders.
pub mod auth {
    pub use cerb_rest_auth::*;
}

mod client;
pub use client::Client;

pub mod constants;

pub mod pagination;
pub use pagination::{Numeral, Page};

pub mod record;
pub use record::*;

mod request;
pub use request::ApiRequest;

mod response;
pub use response::parse_response;

/// A [`Context`] backed by reqwest, tokio fs and the process environment.
#[cfg(feature = "default-context")]
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(cerb_file_read_tokio::TokioFileRead)
        .with_http_send(cerb_http_send_reqwest::ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Like [`default_context`] with a configured `reqwest::Client`, for example
/// one with timeouts.
#[cfg(feature = "default-context")]
pub fn default_context_with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_file_read(cerb_file_read_tokio::TokioFileRead)
        .with_http_send(cerb_http_send_reqwest::ReqwestHttpSend::new(client))
        .with_env(OsEnv)
}
