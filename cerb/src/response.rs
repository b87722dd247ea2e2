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

//! Interpret Cerb response bodies.
//!
//! Cerb answers application errors with HTTP 200 and an envelope such as
//! `{"__status":"error","message":"Access denied!"}`, so the body decides
//! the outcome, not the status code.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use cerb_core::{Error, Result};

const SUCCESS: &str = "success";
const SUCCESS_MARKER: &str = r#""__status":"success""#;

/// Longest prefix of a body kept in error context.
const BODY_EXCERPT_LEN: usize = 256;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "__status")]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret a 200 response body as `T`.
///
/// - A body with the success marker is decoded as `T`.
/// - A body that is not JSON, or lacks `__status`, is `MalformedResponse`.
/// - A body whose `__status` is anything but `success` is `Remote`.
pub fn parse_response<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let text = String::from_utf8_lossy(body);
    if text.contains(SUCCESS_MARKER) {
        return decode(body);
    }

    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| {
        Error::malformed_response("response body is not a json envelope")
            .with_context("body", excerpt(&text))
            .with_source(e)
    })?;

    match envelope.status.as_deref() {
        Some(SUCCESS) => decode(body),
        Some(status) => Err(Error::remote(
            status,
            envelope.message.unwrap_or_default(),
        )),
        None => Err(Error::malformed_response("response envelope has no __status")
            .with_context("body", excerpt(&text))),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        Error::malformed_response("failed to decode successful response")
            .with_context("body", excerpt(&String::from_utf8_lossy(body)))
            .with_source(e)
    })
}

fn excerpt(s: &str) -> &str {
    match s.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
