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

//! Header names, media types and environment variables used by Cerb.

// Headers used by Cerb.
pub const CERB_AUTH: &str = "cerb-auth";

/// Every request body, and for parity every bodyless request, is declared with this type.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Env values used by Cerb.
pub const CERB_BASE_URL: &str = "CERB_BASE_URL";
pub const CERB_ACCESS_KEY: &str = "CERB_ACCESS_KEY";
pub const CERB_ACCESS_SECRET: &str = "CERB_ACCESS_SECRET";
pub const CERB_CREDENTIALS_FILE: &str = "CERB_CREDENTIALS_FILE";

pub const DEFAULT_CREDENTIALS_FILE: &str = "~/.config/cerb/creds.json";
