/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Response document readers
//!
//! Unknown elements are skipped so that members added to the service model later do not break
//! older clients.

use crate::model::{ChangeInfo, ChangeStatus, DelegationSet, HostedZone, HostedZoneConfig, Vpc};
use crate::output::{
    CreateHostedZoneOutput, DeleteHostedZoneOutput, GetChangeOutput, GetHostedZoneOutput,
};
use bytes::Bytes;
use sdk_types::instant::Format;
use sdk_types::Instant;
use sdk_xml::decode::{try_data, Document, ScopedDecoder, XmlError};
use std::convert::TryFrom;
use std::str::FromStr;

fn text(tag: &mut ScopedDecoder) -> Result<String, XmlError> {
    Ok(try_data(tag)?.into_owned())
}

fn number<T: FromStr>(tag: &mut ScopedDecoder) -> Result<T, XmlError> {
    let data = try_data(tag)?;
    data.trim()
        .parse()
        .map_err(|_| XmlError::custom(format!("`{}` is not a valid number", data)))
}

fn boolean(tag: &mut ScopedDecoder) -> Result<bool, XmlError> {
    match try_data(tag)?.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(XmlError::custom(format!("`{}` is not a boolean", other))),
    }
}

fn timestamp(tag: &mut ScopedDecoder) -> Result<Instant, XmlError> {
    Instant::from_str(try_data(tag)?.trim(), Format::DateTime)
        .map_err(|err| XmlError::custom(err.to_string()))
}

/// Read `response`'s body, checking that its root element is `root`.
fn with_root<T>(
    response: &http::Response<Bytes>,
    root: &'static str,
    read: impl FnOnce(&mut ScopedDecoder) -> Result<T, XmlError>,
) -> Result<T, XmlError> {
    let mut doc = Document::try_from(response.body().as_ref())?;
    let mut decoder = doc.root_element()?;
    if !decoder.start_el().matches(root) {
        return Err(XmlError::custom(format!(
            "expected {}, found {}",
            root,
            decoder.start_el().local()
        )));
    }
    read(&mut decoder)
}

pub(crate) fn create_hosted_zone(
    response: &http::Response<Bytes>,
) -> Result<CreateHostedZoneOutput, XmlError> {
    let mut output = with_root(response, "CreateHostedZoneResponse", |root| {
        let mut output = CreateHostedZoneOutput::default();
        while let Some(mut tag) = root.next_tag() {
            match tag.start_el().local() {
                "HostedZone" => output.hosted_zone = Some(hosted_zone(&mut tag)?),
                "ChangeInfo" => output.change_info = Some(change_info(&mut tag)?),
                "DelegationSet" => output.delegation_set = Some(delegation_set(&mut tag)?),
                "VPC" => output.vpc = Some(vpc(&mut tag)?),
                _ => {}
            }
        }
        Ok(output)
    })?;
    output.location = response
        .headers()
        .get(http::header::LOCATION)
        .and_then(|location| location.to_str().ok())
        .map(str::to_string);
    Ok(output)
}

pub(crate) fn get_hosted_zone(
    response: &http::Response<Bytes>,
) -> Result<GetHostedZoneOutput, XmlError> {
    with_root(response, "GetHostedZoneResponse", |root| {
        let mut output = GetHostedZoneOutput::default();
        while let Some(mut tag) = root.next_tag() {
            match tag.start_el().local() {
                "HostedZone" => output.hosted_zone = Some(hosted_zone(&mut tag)?),
                "DelegationSet" => output.delegation_set = Some(delegation_set(&mut tag)?),
                "VPCs" => {
                    while let Some(mut member) = tag.next_tag() {
                        if member.start_el().matches("VPC") {
                            output.vpcs.push(vpc(&mut member)?);
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(output)
    })
}

pub(crate) fn delete_hosted_zone(
    response: &http::Response<Bytes>,
) -> Result<DeleteHostedZoneOutput, XmlError> {
    with_root(response, "DeleteHostedZoneResponse", |root| {
        let mut output = DeleteHostedZoneOutput::default();
        while let Some(mut tag) = root.next_tag() {
            if tag.start_el().matches("ChangeInfo") {
                output.change_info = Some(change_info(&mut tag)?);
            }
        }
        Ok(output)
    })
}

pub(crate) fn get_change(response: &http::Response<Bytes>) -> Result<GetChangeOutput, XmlError> {
    with_root(response, "GetChangeResponse", |root| {
        let mut output = GetChangeOutput::default();
        while let Some(mut tag) = root.next_tag() {
            if tag.start_el().matches("ChangeInfo") {
                output.change_info = Some(change_info(&mut tag)?);
            }
        }
        Ok(output)
    })
}

fn hosted_zone(decoder: &mut ScopedDecoder) -> Result<HostedZone, XmlError> {
    let mut zone = HostedZone::default();
    while let Some(mut tag) = decoder.next_tag() {
        match tag.start_el().local() {
            "Id" => zone.id = Some(text(&mut tag)?),
            "Name" => zone.name = Some(text(&mut tag)?),
            "CallerReference" => zone.caller_reference = Some(text(&mut tag)?),
            "Config" => zone.config = Some(hosted_zone_config(&mut tag)?),
            "ResourceRecordSetCount" => zone.resource_record_set_count = Some(number(&mut tag)?),
            _ => {}
        }
    }
    Ok(zone)
}

fn hosted_zone_config(decoder: &mut ScopedDecoder) -> Result<HostedZoneConfig, XmlError> {
    let mut config = HostedZoneConfig::default();
    while let Some(mut tag) = decoder.next_tag() {
        match tag.start_el().local() {
            "Comment" => config.comment = Some(text(&mut tag)?),
            "PrivateZone" => config.private_zone = boolean(&mut tag)?,
            _ => {}
        }
    }
    Ok(config)
}

fn change_info(decoder: &mut ScopedDecoder) -> Result<ChangeInfo, XmlError> {
    let (mut id, mut status, mut submitted_at, mut comment) = (None, None, None, None);
    while let Some(mut tag) = decoder.next_tag() {
        match tag.start_el().local() {
            "Id" => id = Some(text(&mut tag)?),
            "Status" => status = Some(ChangeStatus::from(text(&mut tag)?.as_str())),
            "SubmittedAt" => submitted_at = Some(timestamp(&mut tag)?),
            "Comment" => comment = Some(text(&mut tag)?),
            _ => {}
        }
    }
    let missing = |member: &str| XmlError::custom(format!("ChangeInfo is missing {}", member));
    Ok(ChangeInfo {
        id: id.ok_or_else(|| missing("Id"))?,
        status: status.ok_or_else(|| missing("Status"))?,
        submitted_at: submitted_at.ok_or_else(|| missing("SubmittedAt"))?,
        comment,
    })
}

fn delegation_set(decoder: &mut ScopedDecoder) -> Result<DelegationSet, XmlError> {
    let mut set = DelegationSet::default();
    while let Some(mut tag) = decoder.next_tag() {
        match tag.start_el().local() {
            "Id" => set.id = Some(text(&mut tag)?),
            "CallerReference" => set.caller_reference = Some(text(&mut tag)?),
            "NameServers" => {
                while let Some(mut server) = tag.next_tag() {
                    if server.start_el().matches("NameServer") {
                        set.name_servers.push(text(&mut server)?);
                    }
                }
            }
            _ => {}
        }
    }
    Ok(set)
}

fn vpc(decoder: &mut ScopedDecoder) -> Result<Vpc, XmlError> {
    let mut vpc = Vpc::default();
    while let Some(mut tag) = decoder.next_tag() {
        match tag.start_el().local() {
            "VPCRegion" => vpc.vpc_region = Some(text(&mut tag)?),
            "VPCId" => vpc.vpc_id = Some(text(&mut tag)?),
            _ => {}
        }
    }
    Ok(vpc)
}

#[cfg(test)]
mod test {
    use super::{create_hosted_zone, get_change, get_hosted_zone};
    use crate::model::ChangeStatus;
    use bytes::Bytes;
    use sdk_types::Instant;

    fn response(body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(201)
            .header(
                "Location",
                "https://route53.amazonaws.com/2013-04-01/hostedzone/Z1D633PJN98FT9",
            )
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn read_create_hosted_zone_response() {
        let output = create_hosted_zone(&response(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <CreateHostedZoneResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
                <HostedZone>
                    <Id>/hostedzone/Z1D633PJN98FT9</Id>
                    <Name>example.com.</Name>
                    <CallerReference>2017-03-15T01:36:41.958Z</CallerReference>
                    <Config>
                        <Comment>migration &amp; test</Comment>
                        <PrivateZone>false</PrivateZone>
                    </Config>
                    <ResourceRecordSetCount>2</ResourceRecordSetCount>
                    <LinkedService><ServicePrincipal>x</ServicePrincipal></LinkedService>
                </HostedZone>
                <ChangeInfo>
                    <Id>/change/C1PA6795UKMFR9</Id>
                    <Status>PENDING</Status>
                    <SubmittedAt>2017-03-15T01:36:41.958Z</SubmittedAt>
                </ChangeInfo>
                <DelegationSet>
                    <NameServers>
                        <NameServer>ns-2048.awsdns-64.com</NameServer>
                        <NameServer>ns-2049.awsdns-65.net</NameServer>
                    </NameServers>
                </DelegationSet>
            </CreateHostedZoneResponse>"#,
        ))
        .expect("valid response");
        let zone = output.hosted_zone.expect("zone is present");
        assert_eq!(zone.bare_id(), Some("Z1D633PJN98FT9"));
        assert_eq!(zone.name.as_deref(), Some("example.com."));
        assert_eq!(zone.resource_record_set_count, Some(2));
        let config = zone.config.expect("config is present");
        assert_eq!(config.comment.as_deref(), Some("migration & test"));
        assert!(!config.private_zone);

        let change = output.change_info.expect("change is present");
        assert_eq!(change.status, ChangeStatus::Pending);
        assert_eq!(change.submitted_at.epoch_seconds(), 1489541801);
        assert_eq!(
            output.delegation_set.expect("public zone").name_servers,
            vec!["ns-2048.awsdns-64.com", "ns-2049.awsdns-65.net"]
        );
        assert_eq!(
            output.location.as_deref(),
            Some("https://route53.amazonaws.com/2013-04-01/hostedzone/Z1D633PJN98FT9")
        );
    }

    #[test]
    fn read_private_zone_vpcs() {
        let output = get_hosted_zone(&response(
            r#"<GetHostedZoneResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
                <HostedZone><Id>/hostedzone/Z2</Id><Config><PrivateZone>true</PrivateZone></Config></HostedZone>
                <VPCs>
                    <VPC><VPCRegion>eu-west-1</VPCRegion><VPCId>vpc-1a2b3c4d</VPCId></VPC>
                    <VPC><VPCRegion>us-east-1</VPCRegion><VPCId>vpc-5e6f7a8b</VPCId></VPC>
                </VPCs>
            </GetHostedZoneResponse>"#,
        ))
        .expect("valid response");
        assert_eq!(output.vpcs.len(), 2);
        assert_eq!(output.vpcs[1].vpc_id.as_deref(), Some("vpc-5e6f7a8b"));
        assert!(output.hosted_zone.unwrap().config.unwrap().private_zone);
        assert_eq!(output.delegation_set, None);
    }

    #[test]
    fn change_info_requires_its_members() {
        let err = get_change(&response(
            r#"<GetChangeResponse><ChangeInfo><Id>/change/C1</Id><Status>INSYNC</Status></ChangeInfo></GetChangeResponse>"#,
        ))
        .expect_err("SubmittedAt is required");
        assert!(err.to_string().contains("SubmittedAt"), "{}", err);
    }

    #[test]
    fn unknown_statuses_are_kept() {
        let output = get_change(&response(
            r#"<GetChangeResponse><ChangeInfo><Id>/change/C1</Id><Status>REPLICATING</Status><SubmittedAt>2021-02-15T18:40:17Z</SubmittedAt></ChangeInfo></GetChangeResponse>"#,
        ))
        .expect("valid response");
        let change = output.change_info.unwrap();
        assert_eq!(change.status, ChangeStatus::Unknown("REPLICATING".into()));
        assert_eq!(change.submitted_at, Instant::from_epoch_seconds(1613414417));
    }

    #[test]
    fn wrong_root_is_an_error() {
        assert!(get_change(&response("<DeleteHostedZoneResponse/>")).is_err());
        assert!(get_change(&response("")).is_err());
    }
}
