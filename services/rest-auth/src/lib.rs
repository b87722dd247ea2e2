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

//! Signer for the Cerb REST API (`Cerb-Auth` header).
//!
//! Cerb requires every request to carry a digest that the server recomputes
//! from the method, date, path, query, body and the shared secret. The two
//! sides must agree byte for byte, so everything that ends up in the string
//! to sign is taken from the request exactly as it goes on the wire.
//!
//! - [Cerb API authentication](https://cerb.ai/docs/api/authentication/)

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod encode;
pub use encode::{form_encode, legacy_encode, query_wire_encode, Params};

mod sign_request;
pub use sign_request::{signature, string_to_sign, RequestSigner};

mod provide_credential;
pub use provide_credential::*;

pub mod constants;
