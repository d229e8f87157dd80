use serde::{Deserialize, Serialize};

/// Vehicle connectivity as reported by the Fleet API, plus a local `Error`
/// marker for failed fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    Online,
    Asleep,
    Offline,
    Waking,
    Error,
}

impl ConnectivityState {
    /// Lenient mapping from the Fleet API `state` string.
    ///
    /// Unrecognized states are treated as offline; `Error` is reserved for
    /// requests that failed locally.
    pub fn from_api(state: &str) -> Self {
        match state.to_ascii_lowercase().as_str() {
            "online" => Self::Online,
            "asleep" => Self::Asleep,
            "waking" | "waking_up" => Self::Waking,
            _ => Self::Offline,
        }
    }
}

/// Telemetry snapshot shown on the vehicle page.
///
/// Fetched fresh per request; telemetry fields stay `None` unless the
/// vehicle was online and the data fetch succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleStatus {
    pub state: ConnectivityState,
    pub display_name: Option<String>,
    pub battery_level: Option<i64>,
    pub battery_range: Option<f64>,
    pub charging_state: Option<String>,
}

impl VehicleStatus {
    /// Status for a fetch that failed before any state was known
    pub fn error() -> Self {
        Self {
            state: ConnectivityState::Error,
            display_name: None,
            battery_level: None,
            battery_range: None,
            charging_state: None,
        }
    }

    /// Status carrying only connectivity, no telemetry yet
    pub fn with_state(state: ConnectivityState, display_name: Option<String>) -> Self {
        Self {
            state,
            display_name,
            battery_level: None,
            battery_range: None,
            charging_state: None,
        }
    }
}
