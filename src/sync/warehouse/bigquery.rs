//! BigQuery REST client.
//!
//! Talks to the BigQuery v2 JSON API directly with `reqwest`. Load jobs upload the stage
//! file in a `multipart/related` request and are polled until `DONE`; scripts run through
//! `jobs.query` and are polled with `getQueryResults` until complete.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::sync::{
    config::WarehouseConfig,
    error::warehouse::WarehouseError,
    warehouse::{FieldSchema, QueryParameter, TableId, Warehouse, WriteDisposition},
};

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Tokens are refreshed this long before the metadata server says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const UPLOAD_BOUNDARY: &str = "warehouse_stage_boundary";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobReference {
    job_id: String,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorProto {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobStatus {
    state: String,
    #[serde(default)]
    error_result: Option<ErrorProto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Job {
    job_reference: JobReference,
    #[serde(default)]
    status: Option<JobStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    job_reference: JobReference,
    #[serde(default)]
    job_complete: bool,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

enum TokenSource {
    Static(String),
    Metadata {
        url: String,
        cached: Mutex<Option<CachedToken>>,
    },
}

/// [`Warehouse`] implementation over the BigQuery v2 REST API.
pub struct BigQueryClient {
    http: reqwest::Client,
    api_url: String,
    project: String,
    location: String,
    token: TokenSource,
    poll_interval: Duration,
}

impl BigQueryClient {
    /// Creates a client running jobs in the configured project and location.
    ///
    /// Uses the static token from the configuration when present, otherwise requests
    /// tokens from the compute metadata server.
    pub fn new(config: &WarehouseConfig) -> Result<Self, WarehouseError> {
        let token = match &config.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::Metadata {
                url: METADATA_TOKEN_URL.to_string(),
                cached: Mutex::new(None),
            },
        };

        Ok(Self {
            http: reqwest::Client::builder().build()?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            location: config.location.clone(),
            token,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Requests tokens from `url` instead of the compute metadata server.
    ///
    /// Has no effect when a static token is configured.
    pub fn with_metadata_url(mut self, url: impl Into<String>) -> Self {
        if let TokenSource::Metadata { url: current, .. } = &mut self.token {
            *current = url.into();
        }
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn access_token(&self) -> Result<String, WarehouseError> {
        let (url, cached) = match &self.token {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::Metadata { url, cached } => (url, cached),
        };

        let mut cached = cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(token.value.clone());
        }

        let response = self
            .http
            .get(url.as_str())
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| WarehouseError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WarehouseError::Auth(format!(
                "metadata server returned {}",
                status
            )));
        }

        let token: MetadataToken = response
            .json()
            .await
            .map_err(|e| WarehouseError::Auth(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    /// Sends an authenticated request and decodes a successful JSON response.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, WarehouseError> {
        let token = self.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn jobs_url(&self) -> String {
        format!("{}/bigquery/v2/projects/{}/jobs", self.api_url, self.project)
    }

    fn queries_url(&self) -> String {
        format!("{}/bigquery/v2/projects/{}/queries", self.api_url, self.project)
    }

    fn tables_url(&self, table: &TableId) -> String {
        format!(
            "{}/bigquery/v2/projects/{}/datasets/{}/tables",
            self.api_url, table.project, table.dataset
        )
    }

    fn job_location<'a>(&'a self, reference: &'a JobReference) -> &'a str {
        reference.location.as_deref().unwrap_or(&self.location)
    }

    /// Polls `job` until it reaches `DONE` and fails on its error result.
    async fn wait_for_job(&self, mut job: Job) -> Result<(), WarehouseError> {
        loop {
            if let Some(status) = job.status.as_ref().filter(|s| s.state == "DONE") {
                return match &status.error_result {
                    Some(error) => Err(WarehouseError::Job {
                        job_id: job.job_reference.job_id.clone(),
                        message: match &error.reason {
                            Some(reason) => format!("{} ({})", error.message, reason),
                            None => error.message.clone(),
                        },
                    }),
                    None => Ok(()),
                };
            }

            tokio::time::sleep(self.poll_interval).await;

            let url = format!("{}/{}", self.jobs_url(), job.job_reference.job_id);
            let location = self.job_location(&job.job_reference).to_string();
            job = self
                .send(self.http.get(url).query(&[("location", location)]))
                .await?;
        }
    }
}

fn api_error(status: StatusCode, body: &str) -> WarehouseError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|error| error.error.message)
        .unwrap_or_else(|_| body.to_string());

    WarehouseError::Api {
        status: status.as_u16(),
        message,
    }
}

fn schema_json(schema: &[FieldSchema]) -> Value {
    let fields: Vec<Value> = schema
        .iter()
        .map(|field| json!({"name": field.name, "type": field.field_type, "mode": "NULLABLE"}))
        .collect();

    json!({ "fields": fields })
}

fn table_reference(table: &TableId) -> Value {
    json!({
        "projectId": table.project,
        "datasetId": table.dataset,
        "tableId": table.table,
    })
}

fn multipart_body(metadata: &Value, csv: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(csv.len() + 1024);

    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
             --{b}\r\nContent-Type: text/csv\r\n\r\n",
            b = UPLOAD_BOUNDARY,
        )
        .as_bytes(),
    );
    body.extend_from_slice(csv);
    body.extend_from_slice(format!("\r\n--{}--\r\n", UPLOAD_BOUNDARY).as_bytes());

    body
}

#[async_trait]
impl Warehouse for BigQueryClient {
    async fn load_csv(
        &self,
        table: &TableId,
        csv_path: &Path,
        schema: &[FieldSchema],
        disposition: WriteDisposition,
    ) -> Result<(), WarehouseError> {
        let csv = tokio::fs::read(csv_path).await?;
        let metadata = json!({
            "jobReference": {"projectId": self.project, "location": self.location},
            "configuration": {
                "load": {
                    "destinationTable": table_reference(table),
                    "sourceFormat": "CSV",
                    "skipLeadingRows": 1,
                    "allowQuotedNewlines": true,
                    "createDisposition": "CREATE_IF_NEEDED",
                    "writeDisposition": disposition.as_str(),
                    "schema": schema_json(schema),
                }
            }
        });

        let url = format!(
            "{}/upload/bigquery/v2/projects/{}/jobs",
            self.api_url, self.project
        );
        let request = self
            .http
            .post(url)
            .query(&[("uploadType", "multipart")])
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", UPLOAD_BOUNDARY),
            )
            .body(multipart_body(&metadata, &csv));

        let job: Job = self.send(request).await?;
        tracing::debug!(table = %table, job_id = %job.job_reference.job_id, "Load job submitted");

        self.wait_for_job(job).await
    }

    async fn create_table(
        &self,
        table: &TableId,
        schema: &[FieldSchema],
    ) -> Result<(), WarehouseError> {
        let body = json!({
            "tableReference": table_reference(table),
            "schema": schema_json(schema),
        });

        let _: Value = self
            .send(self.http.post(self.tables_url(table)).json(&body))
            .await?;

        Ok(())
    }

    async fn execute(&self, sql: &str, params: &[QueryParameter]) -> Result<(), WarehouseError> {
        let parameters: Vec<Value> = params
            .iter()
            .map(|param| {
                json!({
                    "name": param.name,
                    "parameterType": {"type": "DATE"},
                    "parameterValue": {"value": param.value.format("%Y-%m-%d").to_string()},
                })
            })
            .collect();
        let body = json!({
            "query": sql,
            "useLegacySql": false,
            "parameterMode": "NAMED",
            "queryParameters": parameters,
            "location": self.location,
        });

        let mut response: QueryResponse = self
            .send(self.http.post(self.queries_url()).json(&body))
            .await?;

        while !response.job_complete {
            tokio::time::sleep(self.poll_interval).await;

            let url = format!("{}/{}", self.queries_url(), response.job_reference.job_id);
            let location = self.job_location(&response.job_reference).to_string();
            response = self
                .send(
                    self.http
                        .get(url)
                        .query(&[("location", location.as_str()), ("maxResults", "0")]),
                )
                .await?;
        }

        tracing::debug!(job_id = %response.job_reference.job_id, "Query completed");

        Ok(())
    }

    async fn delete_table(&self, table: &TableId) -> Result<(), WarehouseError> {
        let token = self.access_token().await?;
        let url = format!("{}/{}", self.tables_url(table), table.table);
        let response = self.http.delete(url).bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body = response.text().await?;
        Err(api_error(status, &body))
    }
}
