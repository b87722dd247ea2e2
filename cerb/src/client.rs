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

use std::sync::Arc;

use http::{StatusCode, Uri};
use log::debug;
use serde::de::DeserializeOwned;

use cerb_core::{Context, Error, Result, Signer};
use cerb_rest_auth::constants::CERB_BASE_URL;
use cerb_rest_auth::{Config, Credential, DefaultCredentialProvider, Params, RequestSigner};

use crate::constants::*;
use crate::pagination::Page;
use crate::record::*;
use crate::request::ApiRequest;
use crate::response::parse_response;

/// Client for the Cerb REST API.
///
/// Build it once and share it; cloning is cheap. Every call is a single
/// sequence of build, sign, send and interpret with no retries.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Arc<str>,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client for the REST api at `base_url`, like
    /// `https://cerb.example.com/rest/`.
    pub fn new(signer: Signer<Credential>, base_url: &str) -> Result<Self> {
        let uri: Uri = base_url.parse().map_err(|e| {
            Error::request_invalid("invalid base url")
                .with_context("base_url", base_url)
                .with_source(e)
        })?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::request_invalid("base url must be absolute")
                .with_context("base_url", base_url));
        }
        if uri.query().is_some() {
            return Err(Error::request_invalid("base url must not have a query")
                .with_context("base_url", base_url));
        }

        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            base_url: base_url.into(),
            signer,
        })
    }

    /// Create a client from the environment of `ctx`.
    ///
    /// The base url is read from [`CERB_BASE_URL`]; the credential is
    /// resolved once through [`DefaultCredentialProvider`].
    pub async fn from_env(ctx: Context) -> Result<Self> {
        let base_url = ctx
            .env_var(CERB_BASE_URL)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::config_invalid("base url is not set").with_context("env", CERB_BASE_URL)
            })?;

        let config = Config::new().from_env(&ctx);
        let provider = DefaultCredentialProvider::from_config(&config);
        let signer = Signer::from_provider(ctx, provider, RequestSigner::new()).await?;

        Self::new(signer, &base_url)
    }

    /// The REST base url, always ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The signer every request goes through.
    pub fn signer(&self) -> &Signer<Credential> {
        &self.signer
    }

    /// Build, sign and send `req`, then interpret the response as `T`.
    pub async fn send<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<T> {
        let with_call = |e: Error| {
            e.with_context("method", &req.method)
                .with_context("endpoint", &req.endpoint)
        };

        let (mut parts, body) = req.build(&self.base_url)?.into_parts();
        self.signer
            .sign(&mut parts, &body)
            .await
            .map_err(with_call)?;

        debug!("sending {} {}", parts.method, parts.uri);
        let resp = self
            .signer
            .context()
            .http_send(http::Request::from_parts(parts, body))
            .await
            .map_err(with_call)?;

        let status = resp.status();
        debug!(
            "got response {} ({} bytes) for {}",
            status,
            resp.body().len(),
            req.endpoint
        );
        if status != StatusCode::OK {
            return Err(with_call(Error::unexpected_status(status)));
        }

        parse_response(resp.body()).map_err(with_call)
    }

    /// Fetch one page of `record` matching a search `query`.
    ///
    /// `page` is zero based and `limit` must be within `1..=250`.
    pub async fn search<T: DeserializeOwned>(
        &self,
        record: &str,
        query: &str,
        page: u32,
        limit: u32,
        expand: Option<&str>,
    ) -> Result<Page<T>> {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(Error::request_invalid(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            ))
            .with_context("limit", limit));
        }

        let mut params = vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(expand) = expand {
            params.push(("expand", expand.to_string()));
        }

        let req = ApiRequest::get(search_endpoint(record)).with_query(Params::form(params));
        let results: SearchResults<T> = self.send(&req).await?;
        let remaining = results.remaining(page, limit)?;

        Ok(Page {
            records: results.results,
            page,
            limit,
            remaining,
        })
    }

    /// Fetch every page of `record` matching `query`.
    pub async fn search_all<T: DeserializeOwned>(
        &self,
        record: &str,
        query: &str,
        limit: u32,
        expand: Option<&str>,
    ) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut page = 0;
        loop {
            let p: Page<T> = self.search(record, query, page, limit, expand).await?;
            let fetched = p.records.len();
            let has_more = p.has_more();
            records.extend(p.records);

            if !has_more {
                break;
            }
            // The server claims more records but sent none; stop instead of spinning.
            if fetched == 0 {
                debug!("page {page} of {record} search is empty with {} remaining", p.remaining);
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    /// Search `record` with a raw query string such as
    /// `q=status:[o] group:(Billing OR Sales) page:0 limit:100`.
    ///
    /// The string is escaped with [`cerb_rest_auth::legacy_encode`] and sent
    /// as is.
    pub async fn search_raw<T: DeserializeOwned>(
        &self,
        record: &str,
        raw_query: &str,
    ) -> Result<SearchResults<T>> {
        let req = ApiRequest::get(search_endpoint(record)).with_query(Params::legacy(raw_query));
        self.send(&req).await
    }

    /// Open tickets whose first message was sent by `email`.
    pub async fn find_tickets_by_email(&self, email: &str) -> Result<Vec<Ticket>> {
        let query = format!("{OPEN_TICKETS_QUERY} messages.first:(sender:(email:{email}))");
        let req = ApiRequest::get(search_endpoint("ticket"))
            .with_query(Params::form([("q", query)]));

        let results: SearchResults<Ticket> = self.send(&req).await?;
        Ok(results.results)
    }

    /// One page of open tickets, with the initial sender expanded.
    pub async fn list_open_tickets(&self, page: u32) -> Result<Page<Ticket>> {
        self.search(
            "ticket",
            OPEN_TICKETS_QUERY,
            page,
            DEFAULT_LIMIT,
            Some(EXPAND_INITIAL_MESSAGE_SENDER),
        )
        .await
    }

    /// Create a ticket by handing a raw RFC 822 message to the mail parser.
    pub async fn create_ticket(&self, message: &str) -> Result<ParsedTicket> {
        let req =
            ApiRequest::post(PARSER_PARSE).with_form(Params::legacy(format!("message={message}")));
        self.send(&req).await
    }

    /// File a customer question as a new ticket with its first message.
    ///
    /// The ticket's `fields[participants]` carries the sender address `q.from`.
    pub async fn create_message(&self, q: &CustomerQuestion) -> Result<CreatedMessage> {
        let req = ApiRequest::post(TICKET_CREATE).with_form(Params::form([
            ("fields[group_id]", q.group_id.to_string()),
            ("fields[bucket_id]", q.bucket_id.to_string()),
            ("fields[subject]", q.subject.clone()),
            ("fields[participants]", q.from.clone()),
        ]));
        let ticket: CreatedTicket = self.send(&req).await?;
        debug!("created ticket {} ({})", ticket.id, ticket.mask);

        let req = ApiRequest::post(MESSAGE_CREATE).with_form(Params::form([
            ("expand", EXPAND_TICKET_INITIAL_MESSAGE_SENDER.to_string()),
            ("fields[ticket_id]", ticket.id.to_string()),
            ("fields[sender]", q.from.clone()),
            ("fields[headers]", q.headers()),
            ("fields[content]", q.content.clone()),
        ]));
        self.send(&req).await
    }

    /// Update fields of the `record` with `id`.
    ///
    /// Each `(name, value)` is sent as `fields[name]=value`.
    pub async fn update_record<T, K, V>(
        &self,
        record: &str,
        id: i64,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        K: AsRef<str>,
        V: Into<String>,
    {
        let form = Params::form(
            fields
                .into_iter()
                .map(|(k, v)| (format!("fields[{}]", k.as_ref()), v)),
        );
        let req = ApiRequest::put(update_endpoint(record, id)).with_form(form);
        self.send(&req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cerb_core::{ErrorKind, StaticEnv};
    use cerb_rest_auth::constants::*;
    use std::collections::HashMap;

    fn signer() -> Signer<Credential> {
        Signer::new(
            Context::new(),
            Credential::new("ak", "sk"),
            RequestSigner::new(),
        )
    }

    #[test]
    fn test_new_normalises_trailing_slash() {
        let a = Client::new(signer(), "https://cerb.example.com/rest").unwrap();
        let b = Client::new(signer(), "https://cerb.example.com/rest/").unwrap();
        assert_eq!(a.base_url(), "https://cerb.example.com/rest/");
        assert_eq!(b.base_url(), "https://cerb.example.com/rest/");
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        for url in ["cerb.example.com/rest/", "not a url", "https://h/rest/?x=1"] {
            let err = Client::new(signer(), url).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RequestInvalid, "{url}");
        }
    }

    #[tokio::test]
    async fn test_search_rejects_limit() {
        let client = Client::new(signer(), "https://cerb.example.com/rest/").unwrap();
        for limit in [0, MAX_LIMIT + 1] {
            let err = client
                .search::<Ticket>("ticket", "status:[o]", 0, limit, None)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        }
    }

    #[tokio::test]
    async fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                (CERB_BASE_URL.to_string(), "https://cerb.example.com/rest".to_string()),
                (CERB_ACCESS_KEY.to_string(), "ak".to_string()),
                (CERB_ACCESS_SECRET.to_string(), "sk".to_string()),
            ]),
        });

        let client = Client::from_env(ctx).await.unwrap();
        assert_eq!(client.base_url(), "https://cerb.example.com/rest/");
    }

    #[tokio::test]
    async fn test_from_env_without_base_url() {
        let ctx = Context::new().with_env(StaticEnv::default());
        let err = Client::from_env(ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
