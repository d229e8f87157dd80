use std::sync::Arc;
use tracing::warn;

use crate::features::tesla::fleet_client::{TeslaFleetClient, Vehicle};
use crate::features::tesla::models::{ConnectivityState, VehicleStatus};

/// Service producing the vehicle status snapshot for the site.
///
/// Every failure degrades to a status object carrying the best-known
/// connectivity state; nothing here surfaces an error page.
pub struct TeslaService {
    client: Arc<TeslaFleetClient>,
    /// Preferred vehicle display name; first listed vehicle when unset
    vehicle_name: Option<String>,
}

impl TeslaService {
    pub fn new(client: Arc<TeslaFleetClient>, vehicle_name: Option<String>) -> Self {
        Self {
            client,
            vehicle_name,
        }
    }

    /// Fetch the current telemetry snapshot.
    ///
    /// Token exchange, vehicle lookup, and data fetch each degrade on
    /// failure instead of propagating.
    pub async fn status(&self) -> VehicleStatus {
        let vehicles = match self.client.list_vehicles().await {
            Ok(vehicles) => vehicles,
            Err(e) => {
                warn!("Vehicle list unavailable: {}", e);
                return VehicleStatus::error();
            }
        };

        let Some(vehicle) = select_vehicle(&vehicles, self.vehicle_name.as_deref()) else {
            warn!("No vehicles on the account");
            return VehicleStatus::error();
        };

        let state = ConnectivityState::from_api(vehicle.state.as_deref().unwrap_or(""));
        let mut status = VehicleStatus::with_state(state, vehicle.display_name.clone());

        // Telemetry is only fetchable while the vehicle is awake
        if state != ConnectivityState::Online {
            return status;
        }

        match self.client.vehicle_data(vehicle.id).await {
            Ok(data) => {
                if let Some(charge) = data.charge_state {
                    status.battery_level = charge.battery_level;
                    status.battery_range = charge.battery_range;
                    status.charging_state = charge.charging_state;
                }
            }
            Err(e) => {
                // Keep the connectivity state we already have
                warn!("Vehicle data fetch failed: {}", e);
            }
        }

        status
    }
}

/// Pick the vehicle matching the target display name (case-insensitive),
/// falling back to the first listed vehicle.
pub fn select_vehicle<'a>(vehicles: &'a [Vehicle], target: Option<&str>) -> Option<&'a Vehicle> {
    if let Some(name) = target {
        if let Some(vehicle) = vehicles.iter().find(|v| {
            v.display_name
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(name))
        }) {
            return Some(vehicle);
        }
    }
    vehicles.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TeslaConfig;
    use crate::features::tesla::token_manager::TeslaTokenManager;

    fn vehicle(id: u64, name: Option<&str>, state: &str) -> Vehicle {
        Vehicle {
            id,
            display_name: name.map(String::from),
            state: Some(state.to_string()),
            vin: None,
        }
    }

    fn unreachable_service() -> TeslaService {
        // Closed local port so the token exchange fails fast
        let config = TeslaConfig {
            client_id: Some("client".to_string()),
            client_secret: None,
            refresh_token: Some("stale-token".to_string()),
            redirect_uri: None,
            auth_base_url: "http://127.0.0.1:9".to_string(),
            fleet_base_url: "http://127.0.0.1:9".to_string(),
            vehicle_name: None,
            partner_domain: "example.com".to_string(),
            public_key_path: "static/well-known/com.tesla.3p.public-key.pem".to_string(),
        };
        let token_manager = Arc::new(TeslaTokenManager::new(config.clone()));
        let client = Arc::new(TeslaFleetClient::new(config.fleet_base_url, token_manager));
        TeslaService::new(client, None)
    }

    #[test]
    fn test_named_vehicle_selected_among_multiple() {
        let vehicles = vec![
            vehicle(1, Some("Daily Driver"), "asleep"),
            vehicle(2, Some("Lightning"), "online"),
            vehicle(3, Some("Track Car"), "offline"),
        ];
        let selected = select_vehicle(&vehicles, Some("lightning")).unwrap();
        assert_eq!(selected.id, 2);
    }

    #[test]
    fn test_unmatched_name_falls_back_to_first() {
        let vehicles = vec![
            vehicle(1, Some("Daily Driver"), "asleep"),
            vehicle(2, Some("Lightning"), "online"),
        ];
        let selected = select_vehicle(&vehicles, Some("Sold Car")).unwrap();
        assert_eq!(selected.id, 1);
    }

    #[test]
    fn test_no_target_takes_first() {
        let vehicles = vec![vehicle(7, None, "online")];
        assert_eq!(select_vehicle(&vehicles, None).unwrap().id, 7);
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        assert!(select_vehicle(&[], Some("Lightning")).is_none());
    }

    #[tokio::test]
    async fn test_failed_token_exchange_degrades_to_error_status() {
        let service = unreachable_service();
        let status = service.status().await;
        assert_eq!(status.state, ConnectivityState::Error);
        assert!(status.battery_level.is_none());
    }

    #[tokio::test]
    async fn test_missing_refresh_token_degrades_to_error_status() {
        let config = TeslaConfig {
            client_id: Some("client".to_string()),
            client_secret: None,
            refresh_token: None,
            redirect_uri: None,
            auth_base_url: "http://127.0.0.1:9".to_string(),
            fleet_base_url: "http://127.0.0.1:9".to_string(),
            vehicle_name: None,
            partner_domain: "example.com".to_string(),
            public_key_path: "static/well-known/com.tesla.3p.public-key.pem".to_string(),
        };
        let token_manager = Arc::new(TeslaTokenManager::new(config.clone()));
        let client = Arc::new(TeslaFleetClient::new(config.fleet_base_url, token_manager));
        let service = TeslaService::new(client, None);

        let status = service.status().await;
        assert_eq!(status.state, ConnectivityState::Error);
    }
}
