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

use std::borrow::Cow;
use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
///
/// Unlike a parsed URL, the query is kept exactly as it appears on the
/// request URI. The signature must cover the wire bytes, so it is never
/// decoded, re-sorted or re-encoded here.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// Raw HTTP query without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq.query().map(|v| v.to_string()),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = match self.query {
                    Some(query) if !query.is_empty() => format!("{}?{}", self.path, query),
                    _ => self.path,
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Cow<'_, str> {
        percent_encoding::percent_decode_str(&self.path).decode_utf8_lossy()
    }

    /// Get the raw query, or an empty string if the request has none.
    #[inline]
    pub fn query_or_default(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[test]
    fn test_query_kept_verbatim() -> Result<()> {
        let mut p = parts(
            "https://example.cerb.me/rest/records/ticket/search.json?q=status:[o]%20messages.first:(sender:(email:%22a@b.com%22))&b=1",
        );
        let req = SigningRequest::build(&mut p)?;

        assert_eq!(req.path, "/rest/records/ticket/search.json");
        assert_eq!(
            req.query_or_default(),
            "q=status:[o]%20messages.first:(sender:(email:%22a@b.com%22))&b=1"
        );
        Ok(())
    }

    #[test]
    fn test_round_trip_keeps_uri_and_headers() -> Result<()> {
        let uri = "https://example.cerb.me/rest/records/ticket/search.json?limit=100&page=0";
        let mut p = parts(uri);
        let req = SigningRequest::build(&mut p)?;
        assert!(p.headers.is_empty());

        req.apply(&mut p)?;
        assert_eq!(p.uri.to_string(), uri);
        assert_eq!(
            p.headers.get("content-type").unwrap(),
            "application/x-www-form-urlencoded"
        );
        Ok(())
    }

    #[test]
    fn test_without_query() -> Result<()> {
        let mut p = parts("https://example.cerb.me/rest/parser/parse.json");
        let req = SigningRequest::build(&mut p)?;
        assert_eq!(req.query, None);
        assert_eq!(req.query_or_default(), "");

        req.apply(&mut p)?;
        assert_eq!(
            p.uri.to_string(),
            "https://example.cerb.me/rest/parser/parse.json"
        );
        Ok(())
    }

    #[test]
    fn test_path_percent_decoded() -> Result<()> {
        let mut p = parts("https://example.cerb.me/rest/records/my%20record/search.json");
        let req = SigningRequest::build(&mut p)?;
        assert_eq!(req.path_percent_decoded(), "/rest/records/my record/search.json");
        Ok(())
    }

    #[test]
    fn test_without_authority() {
        let mut p = parts("/rest/records/ticket/search.json");
        let err = SigningRequest::build(&mut p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
