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

//! Encoders for query strings and form bodies.
//!
//! Whatever these functions return is placed on the wire verbatim and signed
//! verbatim. Nothing downstream may re-encode it.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes a URL parser escapes inside a query, on top of [`CONTROLS`] and
/// non-ASCII. `#` would otherwise start a fragment.
static QUERY_WIRE_SET: AsciiSet = CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'\'')
    .add(b'<')
    .add(b'>');

/// Escape a raw string the way the Cerb search parser expects it.
///
/// Only three characters are touched:
///
/// | input | output |
/// |-------|--------|
/// | `'`   | `%22`  |
/// | `,`   | `%2C`  |
/// | ` `   | `%20`  |
///
/// Everything else, including characters a generic URL encoder would
/// escape, passes through unchanged. `'` deliberately maps to the code of a
/// double quote; the server relies on that quirk.
pub fn legacy_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' => out.push_str("%22"),
            ',' => out.push_str("%2C"),
            ' ' => out.push_str("%20"),
            c => out.push(c),
        }
    }
    out
}

/// Bring an already encoded query into the exact form it takes on the wire.
///
/// Existing escapes are kept. Non-ASCII, controls, space, `"`, `#`, `'`,
/// `<` and `>` are percent escaped, matching what an HTTP client serializes
/// so the signed query and the sent query stay identical.
pub fn query_wire_encode(encoded: &str) -> String {
    utf8_percent_encode(encoded, &QUERY_WIRE_SET).to_string()
}

/// Encode params as `application/x-www-form-urlencoded`, keys sorted.
///
/// Keys and values are both escaped, space becomes `+`.
pub fn form_encode(params: &BTreeMap<String, String>) -> String {
    let mut s = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        s.append_pair(k, v);
    }
    s.finish()
}

/// Parameters attached to a request, either in the query or in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Params {
    /// Nothing to send.
    #[default]
    None,
    /// Structured key/value pairs, form encoded with sorted keys.
    Form(BTreeMap<String, String>),
    /// A raw `key=value&...` string escaped with [`legacy_encode`].
    Legacy(String),
}

impl Params {
    /// Build form params from any iterator of pairs.
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Params::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build legacy params from a raw string.
    pub fn legacy(raw: impl Into<String>) -> Self {
        Params::Legacy(raw.into())
    }

    /// Returns true if encoding would produce an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Params::None => true,
            Params::Form(m) => m.is_empty(),
            Params::Legacy(s) => s.is_empty(),
        }
    }

    /// Encode into the exact string that goes on the wire.
    pub fn encode(&self) -> String {
        match self {
            Params::None => String::new(),
            Params::Form(m) => form_encode(m),
            Params::Legacy(s) => legacy_encode(s),
        }
    }

    /// Encode into the exact string that goes into a URL query.
    ///
    /// Same as [`Params::encode`] followed by [`query_wire_encode`]. Form
    /// params come out unchanged; legacy params may gain escapes.
    pub fn encode_query(&self) -> String {
        query_wire_encode(&self.encode())
    }
}
