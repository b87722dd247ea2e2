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

//! Requests to the Cerb REST API, before signing.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, Uri};

use cerb_core::{Error, Result};
use cerb_rest_auth::constants::FORM_CONTENT_TYPE;
use cerb_rest_auth::Params;

/// A call to one endpoint with its query and form params.
///
/// Both params are encoded exactly once, in [`ApiRequest::build`]; the
/// resulting URI and body are what gets signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint relative to the REST base url, like `records/ticket/search.json`.
    pub endpoint: String,
    /// Params placed in the query string.
    pub query: Params,
    /// Params placed in the form body.
    pub form: Params,
}

impl ApiRequest {
    /// Create a request with no params.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Params::None,
            form: Params::None,
        }
    }

    /// `GET endpoint`
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// `POST endpoint`
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// `PUT endpoint`
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    /// Set query params.
    pub fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    /// Set form params.
    pub fn with_form(mut self, form: Params) -> Self {
        self.form = form;
        self
    }

    /// Build the http request against `base_url`, which must end with `/`.
    ///
    /// The query is brought into its wire form here, so the transport never
    /// re-encodes what was signed.
    pub fn build(&self, base_url: &str) -> Result<http::Request<Bytes>> {
        let mut url = format!("{base_url}{}", self.endpoint);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query.encode_query());
        }
        let uri: Uri = url.parse().map_err(|e| {
            Error::request_invalid("failed to build request url")
                .with_context("endpoint", &self.endpoint)
                .with_source(e)
        })?;

        let mut req = http::Request::new(Bytes::from(self.form.encode()));
        *req.method_mut() = self.method.clone();
        *req.uri_mut() = uri;
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cerb_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const BASE: &str = "https://cerb.example.com/rest/";

    #[test]
    fn test_build_get_with_form_query() {
        let req = ApiRequest::get("records/ticket/search.json")
            .with_query(Params::form([("q", "status:[o]"), ("limit", "100")]))
            .build(BASE)
            .unwrap();

        assert_eq!(*req.method(), Method::GET);
        assert_eq!(
            req.uri().to_string(),
            "https://cerb.example.com/rest/records/ticket/search.json?limit=100&q=status%3A%5Bo%5D"
        );
        assert_eq!(req.headers()[CONTENT_TYPE], FORM_CONTENT_TYPE);
        assert!(req.body().is_empty());
    }

    #[test]
    fn test_build_get_with_legacy_query() {
        let req = ApiRequest::get("records/ticket/search.json")
            .with_query(Params::legacy("q=status:[o] group:(Billing OR Sales)"))
            .build(BASE)
            .unwrap();

        assert_eq!(
            req.uri().query(),
            Some("q=status:[o]%20group:(Billing%20OR%20Sales)")
        );
    }

    #[test_case("q=subject:caf\u{e9}", "q=subject:caf%C3%A9"; "non ascii")]
    #[test_case("q=subject:\"quoted\"", "q=subject:%22quoted%22"; "double quote")]
    #[test_case("q=ticket #12 status:[o]", "q=ticket%20%2312%20status:[o]"; "hash kept in query")]
    fn test_build_legacy_query_wire_form(raw: &str, expected: &str) {
        let req = ApiRequest::get("records/ticket/search.json")
            .with_query(Params::legacy(raw))
            .build(BASE)
            .unwrap();

        assert_eq!(req.uri().query(), Some(expected));
        assert_eq!(req.uri().path(), "/rest/records/ticket/search.json");
    }

    #[test]
    fn test_build_legacy_body_untouched() {
        let req = ApiRequest::post("parser/parse.json")
            .with_form(Params::legacy("message=caf\u{e9} #1"))
            .build(BASE)
            .unwrap();

        assert_eq!(req.body().as_ref(), "message=caf\u{e9}%20#1".as_bytes());
    }

    #[test]
    fn test_build_post_with_form() {
        let req = ApiRequest::post("records/ticket/create.json")
            .with_form(Params::form([("fields[subject]", "Hi there")]))
            .build(BASE)
            .unwrap();

        assert_eq!(req.uri().query(), None);
        assert_eq!(req.body().as_ref(), b"fields%5Bsubject%5D=Hi+there");
    }

    #[test]
    fn test_build_invalid_url() {
        let err = ApiRequest::get("records/ticket/search.json")
            .build("not a url/")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert_eq!(
            err.context_value("endpoint"),
            Some("records/ticket/search.json")
        );
    }
}
