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

use http::header::{CONTENT_TYPE, DATE};
use http::HeaderValue;
use log::debug;

use cerb_core::hash::hex_md5;
use cerb_core::time::{format_http_date, now, DateTime};
use cerb_core::utils::Redact;
use cerb_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::*;
use crate::Credential;

/// RequestSigner that implements Cerb REST API authentication.
///
/// On every request it sets `Date`, `Content-Type` and `Cerb-Auth`. The date
/// is taken once and used both for the header and for the string to sign.
///
/// - [Cerb API authentication](https://cerb.ai/docs/api/authentication/)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let k = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        let date = format_http_date(self.time.unwrap_or_else(now));

        let mut req = SigningRequest::build(parts)?;

        let s = string_to_sign(
            req.method.as_str(),
            &date,
            &req.path_percent_decoded(),
            req.query_or_default(),
            body,
            &k.access_secret,
        );
        let sig = signature(&s);
        debug!("string to sign: {:?}", String::from_utf8_lossy(&s));
        debug!(
            "signed {} {} with key {}",
            req.method,
            req.path,
            Redact::from(&k.access_key)
        );

        req.headers.insert(DATE, date.parse()?);
        req.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        req.headers.insert(CERB_AUTH, {
            let mut value: HeaderValue = format!("{}:{}", k.access_key, sig).parse()?;
            value.set_sensitive(true);

            value
        });

        req.apply(parts)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// METHOD + "\n" +
/// Date + "\n" +
/// Path + "\n" +
/// Query + "\n" +
/// Body + "\n" +
/// hex(md5(AccessSecret)) + "\n"
/// ```
///
/// `query` and `body` must be the exact bytes sent on the wire. The secret
/// itself never appears in the output, only its digest.
pub fn string_to_sign(
    method: &str,
    date: &str,
    path: &str,
    query: &str,
    body: &[u8],
    secret: &str,
) -> Vec<u8> {
    let secret_digest = hex_md5(secret.as_bytes());

    let mut s = Vec::with_capacity(
        method.len() + date.len() + path.len() + query.len() + body.len() + secret_digest.len() + 6,
    );
    for field in [method.as_bytes(), date.as_bytes(), path.as_bytes(), query.as_bytes(), body] {
        s.extend_from_slice(field);
        s.push(b'\n');
    }
    s.extend_from_slice(secret_digest.as_bytes());
    s.push(b'\n');

    s
}

/// Digest of the string to sign, as placed after `key:` in `Cerb-Auth`.
pub fn signature(string_to_sign: &[u8]) -> String {
    hex_md5(string_to_sign)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    async fn signed_parts(
        req: http::Request<()>,
        body: &[u8],
        at: DateTime,
    ) -> http::request::Parts {
        let (mut parts, _) = req.into_parts();
        let signer = RequestSigner::new().with_time(at);
        let cred = Credential::new("testkey", "123456");

        signer
            .sign_request(&Context::new(), &mut parts, body, Some(&cred))
            .await
            .expect("sign must succeed");
        parts
    }

    #[test]
    fn test_string_to_sign_layout() {
        let s = string_to_sign(
            "GET",
            "Mon, 15 Aug 2022 16:50:12 GMT",
            "/rest/records/ticket/search.json",
            "expand=initial_message_sender_&limit=100&page=0&q=status%3A%5Bo%5D",
            b"",
            "123456",
        );

        assert_eq!(
            String::from_utf8(s.clone()).unwrap(),
            "GET\n\
             Mon, 15 Aug 2022 16:50:12 GMT\n\
             /rest/records/ticket/search.json\n\
             expand=initial_message_sender_&limit=100&page=0&q=status%3A%5Bo%5D\n\
             \n\
             e10adc3949ba59abbe56e057f20f883e\n"
        );
        assert_eq!(signature(&s), "1f93bb9b42906c0f0bc406b6b34c00b3");
    }

    #[test]
    fn test_string_to_sign_is_deterministic() {
        let a = string_to_sign("POST", "d", "/p", "q", b"b", "s");
        let b = string_to_sign("POST", "d", "/p", "q", b"b", "s");
        assert_eq!(a, b);
        assert!(!String::from_utf8_lossy(&a).contains("\ns\n"));
    }

    #[tokio::test]
    async fn test_sign_get_request() {
        let at = Utc.with_ymd_and_hms(2022, 8, 15, 16, 50, 12).unwrap();
        let req = http::Request::get(
            "https://cerb.example.com/rest/records/ticket/search.json?expand=initial_message_sender_&limit=100&page=0&q=status%3A%5Bo%5D",
        )
        .body(())
        .unwrap();

        let parts = signed_parts(req, b"", at).await;

        assert_eq!(parts.headers[DATE], "Mon, 15 Aug 2022 16:50:12 GMT");
        assert_eq!(parts.headers[CONTENT_TYPE], FORM_CONTENT_TYPE);
        assert_eq!(
            parts.headers[CERB_AUTH],
            "testkey:1f93bb9b42906c0f0bc406b6b34c00b3"
        );
        assert!(parts.headers[CERB_AUTH].is_sensitive());
        assert_eq!(
            parts.uri.to_string(),
            "https://cerb.example.com/rest/records/ticket/search.json?expand=initial_message_sender_&limit=100&page=0&q=status%3A%5Bo%5D"
        );
    }

    #[tokio::test]
    async fn test_sign_post_request_with_body() {
        let at = Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34).unwrap();
        let req = http::Request::post("https://cerb.example.com/rest/records/ticket/create.json")
            .body(())
            .unwrap();

        let parts = signed_parts(
            req,
            b"fields%5Bbucket_id%5D=2&fields%5Bgroup_id%5D=1&fields%5Bsubject%5D=Refund+please",
            at,
        )
        .await;

        assert_eq!(parts.headers[DATE], "Tue, 01 Mar 2022 08:12:34 GMT");
        assert_eq!(
            parts.headers[CERB_AUTH],
            "testkey:722be1117911d741c206e2cc0e91bb51"
        );
    }

    #[tokio::test]
    async fn test_sign_put_request() {
        let at = Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34).unwrap();
        let req = http::Request::put("https://cerb.example.com/rest/records/ticket/42/update.json")
            .body(())
            .unwrap();

        let parts = signed_parts(req, b"fields%5Bstatus%5D=c", at).await;
        assert_eq!(
            parts.headers[CERB_AUTH],
            "testkey:783cfe4e2332a1a7b9ab4ccb7b118ba5"
        );
    }

    #[tokio::test]
    async fn test_sign_legacy_query_verbatim() {
        let at = Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34).unwrap();
        let req = http::Request::get(
            "https://cerb.example.com/rest/records/ticket/search.json?q=status:[o]%20group:(Billing%20OR%20Sales)",
        )
        .body(())
        .unwrap();

        let parts = signed_parts(req, b"", at).await;
        assert_eq!(
            parts.headers[CERB_AUTH],
            "testkey:f48541f13851033fdbbc0c08a9e0f3b4"
        );
    }

    #[tokio::test]
    async fn test_sign_without_credential() {
        let (mut parts, _) = http::Request::get("https://cerb.example.com/rest/")
            .body(())
            .unwrap()
            .into_parts();

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, b"", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), cerb_core::ErrorKind::CredentialInvalid);
    }
}
