use serde::{Deserialize, Serialize};

/// Status string the exchange uses to mark a successful call.
pub const SUCCESS_STATUS: &str = "success";

/// A deposit address issued by the exchange for one user/currency pair.
///
/// Passed back to callers exactly as the exchange returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAddress {
    pub id: String,
    pub address: String,
    pub created_at: String,
}

/// `{ status, data }` wrapper the exchange puts around every response.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: Option<DepositAddress>,
}

impl UpstreamEnvelope {
    /// Unwrap the payload, if the exchange reported success.
    pub fn into_success(self) -> Option<DepositAddress> {
        if self.status == SUCCESS_STATUS {
            self.data
        } else {
            None
        }
    }
}
