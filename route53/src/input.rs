/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation inputs
//!
//! Resource ids may be given with or without their type prefix (`/hostedzone/Z1`, `hostedzone/Z1`
//! and `Z1` are the same zone).

use crate::model::{HostedZoneConfig, Vpc};
use crate::output;
use crate::protocol::{resource_label, trim_resource_id, RestXmlInput};
use crate::xml_deser;
use aws_auth::Credentials;
use bytes::Bytes;
use http::Method;
use sdk_http::operation::BuildError;
use sdk_xml::decode::XmlError;
use sdk_xml::encode::XmlWriter;

#[derive(Clone, Debug, Default)]
pub struct CreateHostedZoneInput {
    /// Domain name, eg. `example.com.`
    pub name: Option<String>,
    /// VPC to associate with a private zone
    pub vpc: Option<Vpc>,
    /// Unique string that makes retried requests idempotent, at most 128 characters
    pub caller_reference: Option<String>,
    pub hosted_zone_config: Option<HostedZoneConfig>,
    /// Reusable delegation set whose name servers the zone should use
    pub delegation_set_id: Option<String>,
    pub credentials_override: Option<Credentials>,
}

impl CreateHostedZoneInput {
    fn write_body(&self, name: &str, caller_reference: &str) -> String {
        let mut out = String::new();
        {
            let mut writer = XmlWriter::new(&mut out);
            let mut root = writer
                .start_el("CreateHostedZoneRequest")
                .write_ns(crate::NAMESPACE, None)
                .finish();
            root.start_el("Name").finish().data(name);
            if let Some(vpc) = &self.vpc {
                let mut vpc_el = root.start_el("VPC").finish();
                if let Some(region) = &vpc.vpc_region {
                    vpc_el.start_el("VPCRegion").finish().data(region);
                }
                if let Some(id) = &vpc.vpc_id {
                    vpc_el.start_el("VPCId").finish().data(id);
                }
                vpc_el.finish();
            }
            root.start_el("CallerReference")
                .finish()
                .data(caller_reference);
            if let Some(config) = &self.hosted_zone_config {
                let mut config_el = root.start_el("HostedZoneConfig").finish();
                if let Some(comment) = &config.comment {
                    config_el.start_el("Comment").finish().data(comment);
                }
                config_el
                    .start_el("PrivateZone")
                    .finish()
                    .data(if config.private_zone { "true" } else { "false" });
                config_el.finish();
            }
            if let Some(delegation_set_id) = &self.delegation_set_id {
                root.start_el("DelegationSetId")
                    .finish()
                    .data(trim_resource_id(delegation_set_id));
            }
            root.finish();
        }
        out
    }
}

impl RestXmlInput for CreateHostedZoneInput {
    const NAME: &'static str = "CreateHostedZone";
    const METHOD: Method = Method::POST;
    type Output = output::CreateHostedZoneOutput;

    fn uri(&self) -> Result<String, BuildError> {
        Ok("/2013-04-01/hostedzone".to_string())
    }

    fn body(&self) -> Result<Option<String>, BuildError> {
        let name = self.name.as_deref().ok_or(BuildError::MissingField {
            field: "name",
            details: "this field is required",
        })?;
        let caller_reference =
            self.caller_reference
                .as_deref()
                .ok_or(BuildError::MissingField {
                    field: "caller_reference",
                    details: "this field is required",
                })?;
        if caller_reference.is_empty() || caller_reference.chars().count() > 128 {
            return Err(BuildError::InvalidField {
                field: "caller_reference",
                details: format!(
                    "must be 1 to 128 characters, found {}",
                    caller_reference.chars().count()
                ),
            });
        }
        Ok(Some(self.write_body(name, caller_reference)))
    }

    fn parse(response: &http::Response<Bytes>) -> Result<Self::Output, XmlError> {
        xml_deser::create_hosted_zone(response)
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GetHostedZoneInput {
    pub id: Option<String>,
    pub credentials_override: Option<Credentials>,
}

impl RestXmlInput for GetHostedZoneInput {
    const NAME: &'static str = "GetHostedZone";
    const METHOD: Method = Method::GET;
    type Output = output::GetHostedZoneOutput;

    fn uri(&self) -> Result<String, BuildError> {
        Ok(format!(
            "/2013-04-01/hostedzone/{}",
            resource_label(&self.id, "id")?
        ))
    }

    fn parse(response: &http::Response<Bytes>) -> Result<Self::Output, XmlError> {
        xml_deser::get_hosted_zone(response)
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}

/// Deletes a zone. The zone must hold only its default SOA and NS records.
#[derive(Clone, Debug, Default)]
pub struct DeleteHostedZoneInput {
    pub id: Option<String>,
    pub credentials_override: Option<Credentials>,
}

impl RestXmlInput for DeleteHostedZoneInput {
    const NAME: &'static str = "DeleteHostedZone";
    const METHOD: Method = Method::DELETE;
    type Output = output::DeleteHostedZoneOutput;

    fn uri(&self) -> Result<String, BuildError> {
        Ok(format!(
            "/2013-04-01/hostedzone/{}",
            resource_label(&self.id, "id")?
        ))
    }

    fn parse(response: &http::Response<Bytes>) -> Result<Self::Output, XmlError> {
        xml_deser::delete_hosted_zone(response)
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GetChangeInput {
    /// Change id from a previous `ChangeInfo`
    pub id: Option<String>,
    pub credentials_override: Option<Credentials>,
}

impl RestXmlInput for GetChangeInput {
    const NAME: &'static str = "GetChange";
    const METHOD: Method = Method::GET;
    type Output = output::GetChangeOutput;

    fn uri(&self) -> Result<String, BuildError> {
        Ok(format!("/2013-04-01/change/{}", resource_label(&self.id, "id")?))
    }

    fn parse(response: &http::Response<Bytes>) -> Result<Self::Output, XmlError> {
        xml_deser::get_change(response)
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}
