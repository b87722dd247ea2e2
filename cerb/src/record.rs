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

//! Records exchanged with the Cerb REST API.
//!
//! Every field defaults when absent: the set of fields Cerb returns depends on
//! the record and on what was expanded.

use serde::{Deserialize, Serialize};

use cerb_core::{Error, Result};

use crate::pagination::{remaining, Numeral};

/// Result envelope of `records/<record>/search.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults<T> {
    /// Always `success` once decoded.
    #[serde(rename = "__status", default)]
    pub status: String,
    /// API version reported by the server.
    #[serde(rename = "__version", default)]
    pub version: Option<Numeral>,
    /// Records on this page.
    #[serde(default)]
    pub count: Option<Numeral>,
    /// Echoed page index. Not reliable.
    #[serde(default)]
    pub page: Option<Numeral>,
    /// Echoed page size. Not reliable.
    #[serde(default)]
    pub limit: Option<Numeral>,
    /// Total number of matching records.
    #[serde(default)]
    pub total: Option<Numeral>,
    /// Matching records.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> SearchResults<T> {
    /// Reported total as an integer.
    pub fn total(&self) -> Result<i64> {
        self.total
            .as_ref()
            .ok_or_else(|| Error::pagination_protocol("search result has no total"))?
            .to_i64("total")
    }

    /// Records left after this page.
    ///
    /// `page` and `limit` must be the values that were sent; the echoed ones
    /// are ignored.
    pub fn remaining(&self, page: u32, limit: u32) -> Result<i64> {
        Ok(remaining(self.total()?, page, limit))
    }
}

/// A ticket as returned by search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    pub id: i64,
    pub mask: String,
    pub subject: String,
    pub status: String,
    pub bucket_id: i64,
    pub group_id: i64,
    pub num_messages: Option<Numeral>,
    pub url: String,
    /// Only set when `initial_message_sender_` is expanded.
    #[serde(rename = "initial_message_sender_email")]
    pub email: Option<String>,
}

/// Response of `records/ticket/create.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreatedTicket {
    pub id: i64,
    pub mask: String,
    pub subject: String,
    pub status: String,
    pub importance: Option<Numeral>,
    #[serde(rename = "created")]
    pub created_at: Option<Numeral>,
    pub num_messages: Option<Numeral>,
    pub url: String,
}

/// Response of `records/message/create.json` with the ticket sender expanded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreatedMessage {
    pub id: i64,
    pub sender_id: i64,
    #[serde(rename = "ticket_initial_message_sender__image_url")]
    pub sender_avatar: String,
    #[serde(rename = "ticket_initial_message_sender_email")]
    pub sender_email: String,
    #[serde(rename = "ticket_initial_message_sender_id")]
    pub initial_sender_id: i64,
    #[serde(rename = "ticket_initial_message_record_url")]
    pub initial_message_url: String,
    #[serde(rename = "ticket_initial_message_sender_record_url")]
    pub sender_record_url: String,
    #[serde(rename = "ticket_initial_message_ticket_id")]
    pub ticket_id: i64,
    #[serde(rename = "ticket__label")]
    pub ticket_label: String,
    pub ticket_mask: String,
    pub ticket_status: String,
    pub ticket_subject: String,
    pub ticket_url: String,
}

/// Response of `parser/parse.json`.
///
/// The parser returns a loosely shaped object, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParsedTicket {
    pub id: Option<i64>,
    pub mask: Option<String>,
    pub subject: Option<String>,
    pub status: Option<String>,
    pub bucket_id: Option<i64>,
    pub num_messages: Option<Numeral>,
}

/// A question from a customer to be filed as a new ticket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerQuestion {
    pub group_id: i64,
    pub bucket_id: i64,
    pub to: String,
    pub from: String,
    pub subject: String,
    pub content: String,
}

impl CustomerQuestion {
    /// RFC 822 style headers of the first message.
    pub fn headers(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}",
            self.from, self.to, self.subject
        )
    }
}
