use serde::Deserialize;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::tesla::token_manager::TeslaTokenManager;

/// A vehicle entry from `GET /api/1/vehicles`
#[derive(Debug, Clone, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub display_name: Option<String>,
    pub state: Option<String>,
    pub vin: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VehiclesResponse {
    response: Vec<Vehicle>,
}

/// Charge fields of `GET /api/1/vehicles/{id}/vehicle_data`
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeState {
    pub battery_level: Option<i64>,
    pub battery_range: Option<f64>,
    pub charging_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleData {
    pub charge_state: Option<ChargeState>,
}

#[derive(Debug, Deserialize)]
struct VehicleDataResponse {
    response: VehicleData,
}

/// Client for the Tesla Fleet API vehicle endpoints
pub struct TeslaFleetClient {
    fleet_base_url: String,
    token_manager: Arc<TeslaTokenManager>,
    http_client: reqwest::Client,
}

impl TeslaFleetClient {
    pub fn new(fleet_base_url: String, token_manager: Arc<TeslaTokenManager>) -> Self {
        Self {
            fleet_base_url,
            token_manager,
            http_client: reqwest::Client::new(),
        }
    }

    async fn bearer_token(&self) -> Result<String> {
        let token = self.token_manager.get_access_token().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to get Fleet API token: {}", e))
        })?;
        Ok(token.access_token)
    }

    /// List the vehicles on the account
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let token = self.bearer_token().await?;
        let url = format!("{}/api/1/vehicles", self.fleet_base_url);

        tracing::debug!("Listing vehicles: {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Vehicle list request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Fleet API error: HTTP {} - {}",
                status, body
            )));
        }

        let vehicles = response.json::<VehiclesResponse>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse vehicle list: {}", e))
        })?;

        Ok(vehicles.response)
    }

    /// Fetch the telemetry snapshot for a vehicle.
    ///
    /// Only valid while the vehicle reports an online state; the Fleet API
    /// returns 408 for sleeping vehicles.
    pub async fn vehicle_data(&self, vehicle_id: u64) -> Result<VehicleData> {
        let token = self.bearer_token().await?;
        let url = format!("{}/api/1/vehicles/{}/vehicle_data", self.fleet_base_url, vehicle_id);

        tracing::debug!("Fetching vehicle data: {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Vehicle data request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Fleet API error: HTTP {} - {}",
                status, body
            )));
        }

        let data = response.json::<VehicleDataResponse>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse vehicle data: {}", e))
        })?;

        Ok(data.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_list_deserializes_api_shape() {
        let json = r#"{
            "response": [
                {"id": 123456789, "display_name": "Lightning", "state": "online", "vin": "5YJ3E1EA0000000"},
                {"id": 987654321, "display_name": null, "state": "asleep"}
            ],
            "count": 2
        }"#;
        let parsed: VehiclesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.response.len(), 2);
        assert_eq!(parsed.response[0].display_name.as_deref(), Some("Lightning"));
        assert!(parsed.response[1].display_name.is_none());
    }

    #[test]
    fn test_vehicle_data_charge_state_fields() {
        let json = r#"{
            "response": {
                "charge_state": {
                    "battery_level": 72,
                    "battery_range": 241.5,
                    "charging_state": "Disconnected",
                    "charge_limit_soc": 80
                }
            }
        }"#;
        let parsed: VehicleDataResponse = serde_json::from_str(json).unwrap();
        let charge = parsed.response.charge_state.unwrap();
        assert_eq!(charge.battery_level, Some(72));
        assert_eq!(charge.battery_range, Some(241.5));
        assert_eq!(charge.charging_state.as_deref(), Some("Disconnected"));
    }
}
