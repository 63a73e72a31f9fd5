// Hand-crafted async HTTP client for the per-topic telemetry store.
//
// Read path:  GET  {base}/{topic}          auth via `apikey` default header
// Write path: POST {base}/{topic}          auth via `x-api-key` per request
//             DELETE {base}/alerts?id=…    (alerts only)

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{
    AlertsEnvelope, BandwidthEnvelope, BandwidthPush, GamingEnvelope, GamingPayload, HostQuery,
    HostsEnvelope, HostsPayload, InfrastructureEnvelope, InfrastructurePayload, StoreAck,
    WireAlert,
};

// ── Error response shape from the store ──────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the telemetry store endpoints.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted.
#[derive(Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    base_url: Url,
    /// Secret for the `x-api-key` write header. Reads never send it.
    write_key: Option<SecretString>,
}

impl TelemetryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and the read-side API key.
    ///
    /// The key is injected as the `apikey` default header on every request,
    /// mirroring what the dashboard sends.
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::Api {
                message: format!("invalid API key header value: {e}"),
                status: 0,
            })?;
        key_value.set_sensitive(true);
        headers.insert("apikey", key_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self {
            http,
            base_url,
            write_key: None,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            write_key: None,
        })
    }

    /// Attach the write secret sent as `x-api-key` on POST requests.
    #[must_use]
    pub fn with_write_key(mut self, key: SecretString) -> Self {
        self.write_key = Some(key);
        self
    }

    /// Base URLs always end with a trailing slash so `Url::join` keeps the
    /// final path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, topic: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(topic)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        topic: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(topic)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        topic: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(topic)?;
        debug!("POST {url}");

        let mut req = self.http.post(url).json(body);
        if let Some(ref key) = self.write_key {
            req = req.header("x-api-key", key.expose_secret());
        }
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        topic: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(topic)?;
        debug!("DELETE {url} params={params:?}");

        let resp = self.http.delete(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }

        let body = resp.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            });
        }

        // Non-2xx: the store answers `{ error: … }` on every failure path.
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| format!("HTTP {status}"));

        Err(Error::Api {
            message,
            status: status.as_u16(),
        })
    }

    // ── Read endpoints ───────────────────────────────────────────────

    /// Fetch the most recent bandwidth records (store default: 20).
    pub async fn fetch_bandwidth(&self, limit: Option<u32>) -> Result<BandwidthEnvelope, Error> {
        let params: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();
        self.get("bandwidth", &params).await
    }

    /// Fetch the latest infrastructure snapshot.
    pub async fn fetch_infrastructure(&self) -> Result<InfrastructureEnvelope, Error> {
        self.get("network-infrastructure", &[]).await
    }

    /// Fetch the latest gaming-device snapshot with its platform summary.
    pub async fn fetch_gaming_devices(&self) -> Result<GamingEnvelope, Error> {
        self.get("gaming-devices", &[]).await
    }

    /// Fetch alerts from the last `hours` hours (store default: 1).
    pub async fn fetch_alerts(&self, hours: Option<u32>) -> Result<AlertsEnvelope, Error> {
        let params: Vec<(&str, String)> = hours
            .map(|n| vec![("hours", n.to_string())])
            .unwrap_or_default();
        self.get("alerts", &params).await
    }

    /// Fetch the latest hosts snapshot, optionally filtered server-side.
    pub async fn fetch_hosts(&self, query: &HostQuery) -> Result<HostsEnvelope, Error> {
        self.get("hosts", &query.to_params()).await
    }

    // ── Write endpoints (scanner agents) ─────────────────────────────

    /// Append one bandwidth measurement.
    pub async fn publish_bandwidth(&self, push: &BandwidthPush) -> Result<StoreAck, Error> {
        self.post("bandwidth", push).await
    }

    /// Replace the infrastructure snapshot.
    pub async fn publish_infrastructure(
        &self,
        payload: &InfrastructurePayload,
    ) -> Result<StoreAck, Error> {
        self.post("network-infrastructure", payload).await
    }

    /// Replace the gaming-device snapshot.
    pub async fn publish_gaming_devices(&self, payload: &GamingPayload) -> Result<StoreAck, Error> {
        self.post("gaming-devices", payload).await
    }

    /// Append a batch of alerts.
    pub async fn publish_alerts(&self, alerts: &[WireAlert]) -> Result<StoreAck, Error> {
        #[derive(Serialize)]
        struct Batch<'a> {
            alerts: &'a [WireAlert],
        }
        self.post("alerts", &Batch { alerts }).await
    }

    /// Replace the hosts snapshot.
    pub async fn publish_hosts(&self, payload: &HostsPayload) -> Result<StoreAck, Error> {
        self.post("hosts", payload).await
    }

    /// Delete one alert by id. The store treats a missing id as a no-op.
    pub async fn delete_alert(&self, id: &str) -> Result<StoreAck, Error> {
        self.delete("alerts", &[("id", id.to_owned())]).await
    }
}
