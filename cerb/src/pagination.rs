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

//! Defensive pagination over Cerb search results.
//!
//! The server echoes `page` and `limit` values that can't be trusted and
//! reports `total` sometimes as a number and sometimes as a numeral string.
//! Only `total` is read back; page and limit always come from the request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cerb_core::{Error, Result};

/// A count reported by the server, as a number or as a numeral string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeral {
    /// `350`
    Integer(i64),
    /// `"350"`
    Text(String),
    /// Anything else the server may send.
    Other(Value),
}

impl Numeral {
    /// Coerce into an integer, failing with `PaginationProtocol` when the
    /// value is not integral.
    ///
    /// `field` names the JSON field for the error context.
    pub fn to_i64(&self, field: &str) -> Result<i64> {
        let v = match self {
            Numeral::Integer(v) => Some(*v),
            Numeral::Text(s) => s.trim().parse::<i64>().ok(),
            Numeral::Other(Value::Number(n)) => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64),
            Numeral::Other(_) => None,
        };

        v.ok_or_else(|| {
            Error::pagination_protocol(format!("{field} is not an integer"))
                .with_context("field", field)
                .with_context("value", self)
        })
    }
}

impl std::fmt::Display for Numeral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeral::Integer(v) => write!(f, "{v}"),
            Numeral::Text(s) => write!(f, "{s:?}"),
            Numeral::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Numeral {
    fn from(v: i64) -> Self {
        Numeral::Integer(v)
    }
}

/// Records left after the given zero based page, clamped to zero.
pub fn remaining(total: i64, page: u32, limit: u32) -> i64 {
    let seen = (i64::from(page) + 1).saturating_mul(i64::from(limit));
    total.saturating_sub(seen).max(0)
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records on this page, in server order.
    pub records: Vec<T>,
    /// Zero based page index that was requested.
    pub page: u32,
    /// Page size that was requested.
    pub limit: u32,
    /// Matching records not yet fetched.
    pub remaining: i64,
}

impl<T> Page<T> {
    /// Returns true if another page should be fetched.
    pub fn has_more(&self) -> bool {
        self.remaining > 0
    }
}
