use async_trait::async_trait;
use chrono::Utc;
use credsync_core::{IssuerClient, IssuerResult};
use credsync_domain::{
    CredSyncError, CredentialFilter, CredentialRecord, CredentialUpdate, Group, GroupId,
    GroupUpdate, IssuerApiError, IssuerConfig, NewCredential, NewGroup, RecordId, Template,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{
    BcData, CreateGroupBody, CreateRecordBody, GroupIdWire, GroupWire, ListRecordsBody,
    PagingBody, RecordIdWire, RecordWire, TemplateWire, UpdateBcData, UpdateGroupBody,
    UpdateRecordBody,
};
use crate::http::HttpClient;

/// Issuer certificate API lives under one versioned prefix.
const API_PREFIX: &str = "/cert/v1/org/cert";

/// HTTP implementation of [`IssuerClient`] against the remote issuer
/// REST API.
///
/// Stateless apart from its configuration: the API key goes out in the
/// `Authorization` header on every call, failures map to
/// [`IssuerApiError`] and are never retried here.
pub struct RestIssuerClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl RestIssuerClient {
    /// Build a client for the configured issuer deployment.
    pub fn new(config: &IssuerConfig) -> Result<Self, CredSyncError> {
        Self::with_base_url(config.base_url(), &config.api_key)
    }

    /// Build a client against an explicit base URL. Used directly in
    /// tests; production code goes through [`RestIssuerClient::new`].
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: &str,
    ) -> Result<Self, CredSyncError> {
        if api_key.trim().is_empty() {
            return Err(CredSyncError::Config("issuer API key is empty".into()));
        }

        let http = HttpClient::new()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url, api_key: api_key.to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    /// Execute one API call and decode the response.
    ///
    /// The issuer signals failures through a JSON error envelope rather
    /// than status codes alone, so the body is inspected for an `error`
    /// field before any decoding happens.
    async fn execute<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> IssuerResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self
            .http
            .request(method, url.as_str())
            .header("Authorization", &self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| IssuerApiError::Transport(err.to_string()))?;

        let value: Value = serde_json::from_str(&text).map_err(|err| {
            IssuerApiError::Transport(format!("undecodable issuer response: {err}"))
        })?;

        if let Some(code) = value.get("error").and_then(Value::as_str) {
            let description = value
                .get("error_description")
                .and_then(Value::as_str)
                .unwrap_or("no description");
            let err = IssuerApiError::remote(code, description);
            if err.is_invalid_api_key() {
                warn!(%url, "issuer rejected API key");
            }
            return Err(err);
        }

        if !status.is_success() {
            return Err(IssuerApiError::remote(status.as_str(), text));
        }

        serde_json::from_value(value).map_err(|err| {
            IssuerApiError::Transport(format!("unexpected issuer response shape: {err}"))
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> IssuerResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn get<T>(&self, path: &str) -> IssuerResult<T>
    where
        T: DeserializeOwned,
    {
        self.execute::<(), T>(Method::GET, path, None).await
    }
}

#[async_trait]
impl IssuerClient for RestIssuerClient {
    async fn create_group(&self, payload: &NewGroup) -> IssuerResult<Group> {
        let body = CreateGroupBody {
            group_name: &payload.name,
            description: &payload.description,
            link: payload.link.as_deref(),
        };
        let wire: GroupWire = self.post("/group/api-key/create", &body).await?;
        debug!(group_id = %wire.group_id, "created issuer group");
        Ok(wire.into())
    }

    async fn update_group(&self, payload: &GroupUpdate) -> IssuerResult<GroupId> {
        let body = UpdateGroupBody {
            group_id: &payload.group_id,
            group_name: payload.name.as_deref(),
            description: payload.description.as_deref(),
            link: payload.link.as_deref(),
        };
        let wire: GroupIdWire = self.post("/group/api-key/update", &body).await?;
        Ok(wire.group_id)
    }

    async fn get_group(&self, id: &GroupId) -> IssuerResult<Group> {
        let wire: GroupWire =
            self.get(&format!("/group/api-key/get?groupId={id}")).await?;
        Ok(wire.into())
    }

    async fn list_groups(&self) -> IssuerResult<Vec<Group>> {
        let wire: Vec<GroupWire> =
            self.post("/group/api-key/list", &PagingBody::all()).await?;
        Ok(wire.into_iter().map(Group::from).collect())
    }

    async fn list_templates(&self) -> IssuerResult<Vec<Template>> {
        let wire: Vec<TemplateWire> =
            self.post("/template/api-key/list", &PagingBody::all()).await?;
        Ok(wire.into_iter().map(Template::from).collect())
    }

    async fn create_credential(&self, payload: &NewCredential) -> IssuerResult<CredentialRecord> {
        // The certificate always carries an issue date; default to today
        // when the caller did not resolve one.
        let issued_on = payload
            .issued_on
            .clone()
            .unwrap_or_else(|| Utc::now().format("%b %d, %Y").to_string());
        let body = CreateRecordBody {
            bc_data: BcData {
                rcv_name: &payload.recipient_name,
                issued_date: &issued_on,
                reg_no: &payload.serial,
                serial_no: &payload.serial,
            },
            email: &payload.recipient_email,
            group_id: &payload.group_id,
            template_id: payload.template_id.as_deref(),
        };
        let wire: RecordWire = self.post("/record/api-key/create", &body).await?;
        debug!(record_id = %wire.record_id, email = %payload.recipient_email, "created credential record");
        Ok(wire.into())
    }

    async fn update_credential(&self, payload: &CredentialUpdate) -> IssuerResult<RecordId> {
        let body = UpdateRecordBody {
            bc_data: UpdateBcData {
                rcv_name: payload.recipient_name.as_deref(),
                issued_date: payload.issued_on.as_deref(),
            },
            record_id: &payload.record_id,
        };
        let wire: RecordIdWire = self.post("/record/api-key/update", &body).await?;
        Ok(wire.record_id)
    }

    async fn get_credential(&self, id: &RecordId) -> IssuerResult<CredentialRecord> {
        let wire: RecordWire =
            self.get(&format!("/record/api-key/get?recordId={id}")).await?;
        Ok(wire.into())
    }

    async fn list_credentials(
        &self,
        filter: &CredentialFilter,
    ) -> IssuerResult<Vec<CredentialRecord>> {
        let body = ListRecordsBody {
            group_id: filter.group_id.as_deref(),
            template_id: filter.template_id.as_deref(),
            email: filter.email.as_deref(),
        };
        // Filtering by recipient email goes through a dedicated endpoint.
        let path = if filter.email.is_some() {
            "/record/api-key/email/list"
        } else {
            "/record/api-key/list"
        };
        let wire: Vec<RecordWire> = self.post(path, &body).await?;
        Ok(wire.into_iter().map(CredentialRecord::from).collect())
    }

    async fn delete_credential(&self, id: &RecordId) -> IssuerResult<()> {
        let _: Value = self
            .execute::<(), Value>(
                Method::DELETE,
                &format!("/record/api-key/delete?recordId={id}"),
                None,
            )
            .await?;
        Ok(())
    }

    async fn delete_group(&self, _id: &GroupId) -> IssuerResult<()> {
        // Groups deliberately outlive course instances; deletion never
        // reaches the remote API.
        Err(IssuerApiError::Unsupported("delete_group"))
    }
}
