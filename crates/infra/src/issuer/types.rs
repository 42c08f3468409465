//! Wire types for the issuer REST API
//!
//! Request bodies are typed builders: optional fields carry
//! `skip_serializing_if` so `None` is omitted from the transmitted JSON
//! instead of being sent as an explicit null.

use credsync_domain::{CredentialRecord, Group, Template};
use serde::{Deserialize, Serialize};

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Debug, Serialize)]
pub(super) struct CreateGroupBody<'a> {
    pub group_name: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateGroupBody<'a> {
    pub group_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'a str>,
}

/// Paging window sent on list endpoints; the API treats `0..0` as "all".
#[derive(Debug, Serialize)]
pub(super) struct PagingBody {
    pub from: u32,
    pub to: u32,
}

impl PagingBody {
    pub fn all() -> Self {
        Self { from: 0, to: 0 }
    }
}

/// Certificate fields embedded in credential create/update bodies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BcData<'a> {
    pub rcv_name: &'a str,
    pub issued_date: &'a str,
    pub reg_no: &'a str,
    pub serial_no: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateRecordBody<'a> {
    pub bc_data: BcData<'a>,
    pub email: &'a str,
    pub group_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateBcData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rcv_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateRecordBody<'a> {
    pub bc_data: UpdateBcData<'a>,
    pub record_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct ListRecordsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

// =============================================================================
// Response payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct GroupWire {
    pub group_id: String,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl From<GroupWire> for Group {
    fn from(wire: GroupWire) -> Self {
        Self {
            id: wire.group_id,
            name: wire.group_name.unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            link: wire.link,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GroupIdWire {
    pub group_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TemplateWire {
    pub template_id: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<TemplateWire> for Template {
    fn from(wire: TemplateWire) -> Self {
        Self { id: wire.template_id, description: wire.description.unwrap_or_default() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BcDataWire {
    #[serde(default)]
    pub rcv_name: Option<String>,
    #[serde(default)]
    pub issued_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RecordWire {
    pub record_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub bc_data: Option<BcDataWire>,
    #[serde(default)]
    pub txn_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RecordWire> for CredentialRecord {
    fn from(wire: RecordWire) -> Self {
        let bc_data = wire.bc_data.unwrap_or(BcDataWire { rcv_name: None, issued_date: None });
        Self {
            id: wire.record_id,
            recipient_name: bc_data.rcv_name,
            recipient_email: wire.email.unwrap_or_default(),
            group_id: wire.group_id.unwrap_or_default(),
            template_id: wire.template_id,
            issued_on: bc_data.issued_date,
            transaction_id: wire.txn_id,
            url: wire.url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RecordIdWire {
    pub record_id: String,
}
