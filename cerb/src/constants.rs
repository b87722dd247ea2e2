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

//! Endpoints and limits of the Cerb REST API.

/// Page size used when the caller does not pick one.
pub const DEFAULT_LIMIT: u32 = 100;
/// Largest page size the server accepts.
pub const MAX_LIMIT: u32 = 250;

// Endpoints, relative to the REST base url.
pub const PARSER_PARSE: &str = "parser/parse.json";
pub const TICKET_CREATE: &str = "records/ticket/create.json";
pub const MESSAGE_CREATE: &str = "records/message/create.json";

/// `records/<record>/search.json`
pub fn search_endpoint(record: &str) -> String {
    format!("records/{record}/search.json")
}

/// `records/<record>/<id>/update.json`
pub fn update_endpoint(record: &str, id: i64) -> String {
    format!("records/{record}/{id}/update.json")
}

// Queries and expansions used by the ticket helpers.
pub const OPEN_TICKETS_QUERY: &str = "status:[o]";
pub const EXPAND_INITIAL_MESSAGE_SENDER: &str = "initial_message_sender_";
pub const EXPAND_TICKET_INITIAL_MESSAGE_SENDER: &str = "ticket_initial_message_sender_";
