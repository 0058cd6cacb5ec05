use crate::bridge::{BridgeOutcome, TapBridge};
use anyhow::Result;
use serde_json::json;

/// Client for the vendor bridge daemon listening on localhost next to the
/// physical terminal.
pub struct HttpBridge {
    pub base_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl TapBridge for HttpBridge {
    async fn initialize(&self) -> Result<bool> {
        let url = format!("{}/v1/initialize", self.base_url);
        let resp = self
            .client
            .post(url)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        Ok(resp.status().is_success())
    }

    async fn start_payment(&self, amount_minor: i64, currency: &str) -> Result<BridgeOutcome> {
        let url = format!("{}/v1/payment", self.base_url);
        let body = json!({
            "amount": amount_minor,
            "currency": currency,
        });

        let resp = self
            .client
            .post(url)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => Ok(r.json::<BridgeOutcome>().await?),
            Ok(r) => {
                let status = r.status();
                let body = r.text().await.unwrap_or_default();
                Ok(BridgeOutcome {
                    status: "failed".to_string(),
                    transaction_id: None,
                    error_message: Some(format!(
                        "HTTP_{}: {}",
                        status.as_u16(),
                        body.chars().take(200).collect::<String>()
                    )),
                })
            }
            Err(e) if e.is_timeout() => Ok(BridgeOutcome {
                status: "failed".to_string(),
                transaction_id: None,
                error_message: Some("bridge timeout".to_string()),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
