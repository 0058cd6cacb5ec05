#![allow(dead_code)]

use checkout_gateway::bridge::{BridgeOutcome, TapBridge};
use checkout_gateway::invoke::{FunctionInvoker, InvokeRequest, InvokeResponse};
use checkout_gateway::repo::transaction_log_repo::{TransactionLog, TransactionLogEntry};
use std::sync::Mutex;

pub struct MemoryLog {
    pub entries: Mutex<Vec<TransactionLogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<TransactionLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TransactionLog for MemoryLog {
    async fn record(&self, entry: TransactionLogEntry) -> anyhow::Result<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

pub struct CannedInvoker {
    pub response: InvokeResponse,
    pub calls: Mutex<Vec<(String, InvokeRequest)>>,
}

impl CannedInvoker {
    pub fn new(response: InvokeResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(InvokeResponse {
            success: true,
            transaction_id: None,
            status: None,
            error: None,
        })
    }

    pub fn rejecting(error: &str) -> Self {
        Self::new(InvokeResponse {
            success: false,
            transaction_id: None,
            status: None,
            error: Some(error.to_string()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn called_functions(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
    }
}

#[async_trait::async_trait]
impl FunctionInvoker for CannedInvoker {
    async fn invoke(&self, name: &str, request: InvokeRequest) -> anyhow::Result<InvokeResponse> {
        self.calls.lock().unwrap().push((name.to_string(), request));
        Ok(self.response.clone())
    }
}

pub struct FixedBridge {
    pub init_ok: bool,
    pub status: String,
    pub transaction_id: Option<String>,
    pub error_message: Option<String>,
}

impl FixedBridge {
    pub fn completing(transaction_id: &str) -> Self {
        Self {
            init_ok: true,
            status: "completed".to_string(),
            transaction_id: Some(transaction_id.to_string()),
            error_message: None,
        }
    }

    pub fn declining(error: &str) -> Self {
        Self {
            init_ok: true,
            status: "failed".to_string(),
            transaction_id: None,
            error_message: Some(error.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl TapBridge for FixedBridge {
    async fn initialize(&self) -> anyhow::Result<bool> {
        Ok(self.init_ok)
    }

    async fn start_payment(&self, _amount_minor: i64, _currency: &str) -> anyhow::Result<BridgeOutcome> {
        Ok(BridgeOutcome {
            status: self.status.clone(),
            transaction_id: self.transaction_id.clone(),
            error_message: self.error_message.clone(),
        })
    }
}
