/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_auth::Credentials;
use aws_sigv4::http_request::{
    sign, PayloadChecksumKind, PercentEncodingMode, SignableBody, SignableRequest,
    SigningParams, SigningSettings,
};
use aws_types::region::SigningRegion;
use aws_types::SigningService;
use sdk_http::body::SdkBody;
use std::fmt;
use std::time::SystemTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("invalid signing parameters")]
    InvalidParams(#[from] aws_sigv4::signing_params::BuildError),
    #[error("failed to compute the signature")]
    Signature(#[from] aws_sigv4::http_request::SigningError),
}

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum SigningAlgorithm {
    SigV4,
}

/// Signing Configuration for an Operation
///
/// Although these fields MAY be customized on a per request basis, they are generally static
/// for a given operation
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub struct OperationSigningConfig {
    pub algorithm: SigningAlgorithm,
    pub signing_options: SigningOptions,
}

impl OperationSigningConfig {
    /// The signing configuration used by every operation of the JSON and REST-XML services
    pub fn default_config() -> Self {
        OperationSigningConfig {
            algorithm: SigningAlgorithm::SigV4,
            signing_options: SigningOptions {
                double_uri_encode: true,
                content_sha256_header: false,
            },
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[non_exhaustive]
pub struct SigningOptions {
    pub double_uri_encode: bool,
    pub content_sha256_header: bool,
}

/// Signing Configuration for an individual Request
///
/// These fields may vary on a per-request basis
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RequestConfig<'a> {
    pub request_ts: SystemTime,
    pub region: &'a SigningRegion,
    pub service: &'a SigningService,
}

/// The hex signature added to a request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn new(signature: String) -> Self {
        Signature(signature)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Default)]
pub struct SigV4Signer {
    _private: (),
}

impl fmt::Debug for SigV4Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigV4Signer").finish()
    }
}

impl SigV4Signer {
    pub fn new() -> Self {
        SigV4Signer { _private: () }
    }

    fn settings(operation_config: &OperationSigningConfig) -> SigningSettings {
        let mut settings = SigningSettings::default();
        settings.percent_encoding_mode = if operation_config.signing_options.double_uri_encode {
            PercentEncodingMode::Double
        } else {
            PercentEncodingMode::Single
        };
        settings.payload_checksum_kind = if operation_config.signing_options.content_sha256_header {
            PayloadChecksumKind::XAmzSha256
        } else {
            PayloadChecksumKind::NoHeader
        };
        settings
    }

    fn signing_params<'a>(
        settings: SigningSettings,
        credentials: &'a Credentials,
        request_config: &'a RequestConfig<'a>,
    ) -> Result<SigningParams<'a>, SigningError> {
        let mut builder = SigningParams::builder()
            .access_key(credentials.access_key_id())
            .secret_key(credentials.secret_access_key())
            .region(request_config.region.as_ref())
            .service_name(request_config.service.as_ref())
            .time(request_config.request_ts)
            .settings(settings);
        builder.set_security_token(credentials.session_token());
        Ok(builder.build()?)
    }

    /// Sign a request using the SigV4 Protocol
    ///
    /// Although this function may be used, end users will not typically
    /// interact with this code. It is generally used via middleware in the request pipeline. See [`SigV4SigningStage`](crate::middleware::SigV4SigningStage).
    pub fn sign(
        &self,
        operation_config: &OperationSigningConfig,
        request_config: &RequestConfig<'_>,
        credentials: &Credentials,
        request: &mut http::Request<SdkBody>,
    ) -> Result<Signature, SigningError> {
        let settings = Self::settings(operation_config);
        let signing_params = Self::signing_params(settings, credentials, request_config)?;

        let (signing_instructions, signature) = {
            // A body that is already in memory is signed directly. Streaming bodies are signed
            // as UNSIGNED-PAYLOAD.
            let signable_body = request
                .body()
                .bytes()
                .map(SignableBody::Bytes)
                .unwrap_or(SignableBody::UnsignedPayload);

            let signable_request = SignableRequest::new(
                request.method(),
                request.uri(),
                request.headers(),
                signable_body,
            );
            sign(signable_request, &signing_params)?
        }
        .into_parts();

        signing_instructions.apply_to_request(request);
        tracing::trace!(region = %request_config.region.as_ref(), "signed request");
        Ok(Signature::new(signature))
    }
}

#[cfg(test)]
mod test {
    use super::{OperationSigningConfig, RequestConfig, SigV4Signer};
    use aws_auth::Credentials;
    use aws_types::region::SigningRegion;
    use aws_types::SigningService;
    use http::header::AUTHORIZATION;
    use sdk_http::body::SdkBody;
    use std::time::{Duration, UNIX_EPOCH};

    fn signed(credentials: &Credentials) -> http::Request<SdkBody> {
        let mut request = http::Request::builder()
            .method("POST")
            .uri("https://dms.us-east-1.amazonaws.com/")
            .header("host", "dms.us-east-1.amazonaws.com")
            .body(SdkBody::from("{}"))
            .unwrap();
        let request_config = RequestConfig {
            request_ts: UNIX_EPOCH + Duration::from_secs(1613414417),
            region: &SigningRegion::from_static("us-east-1"),
            service: &SigningService::from_static("dms"),
        };
        SigV4Signer::new()
            .sign(
                &OperationSigningConfig::default_config(),
                &request_config,
                credentials,
                &mut request,
            )
            .expect("signing succeeds");
        request
    }

    #[test]
    fn authorization_header_names_the_scope() {
        let request = signed(&Credentials::from_keys("AKID", "secret", None));
        let auth = request.headers()[AUTHORIZATION].to_str().unwrap();
        assert!(auth.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKID/20210215/us-east-1/dms/aws4_request"
        ));
        assert_eq!(request.headers()["x-amz-date"], "20210215T184017Z");
        assert!(request.headers().get("x-amz-security-token").is_none());
    }

    #[test]
    fn session_token_is_signed() {
        let request = signed(&Credentials::from_keys(
            "AKID",
            "secret",
            Some("token".to_string()),
        ));
        assert_eq!(request.headers()["x-amz-security-token"], "token");
    }

    #[test]
    fn signatures_depend_on_the_secret() {
        let a = signed(&Credentials::from_keys("AKID", "secret-a", None));
        let b = signed(&Credentials::from_keys("AKID", "secret-b", None));
        assert_ne!(a.headers()[AUTHORIZATION], b.headers()[AUTHORIZATION]);
    }
}
