//! IP geolocation for the location label.
//!
//! Looks the location up once on a background thread. A failed attempt is
//! retried after a fixed delay for as long as the app runs; until a lookup
//! succeeds the label reads `LOCATING...`.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use motes_config::LocationConfig;
use serde::Deserialize;
use thiserror::Error;

/// Label shown until the location is known.
pub const PLACEHOLDER: &str = "LOCATING...";

/// Longest city or country name shown.
const MAX_NAME_CHARS: usize = 12;

/// How often a waiting retry checks for shutdown.
const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(250);

/// Errors from a single lookup attempt.
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no {0}")]
    MissingField(&'static str),
}

/// A resolved location, already normalized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// Geolocation JSON response (partial - only fields we need).
#[derive(Debug, Deserialize)]
struct GeoResponse {
    city: Option<String>,
    country_name: Option<String>,
}

/// Uppercase and shorten a place name for the side label.
fn normalize(name: &str) -> String {
    name.trim().to_uppercase().chars().take(MAX_NAME_CHARS).collect()
}

/// Parse a geolocation response body.
fn parse_location(body: &str) -> Result<Location, LocationError> {
    let response: GeoResponse = serde_json::from_str(body)?;
    let city = response
        .city
        .filter(|c| !c.trim().is_empty())
        .ok_or(LocationError::MissingField("city"))?;
    let country = response
        .country_name
        .filter(|c| !c.trim().is_empty())
        .ok_or(LocationError::MissingField("country_name"))?;

    Ok(Location {
        city: normalize(&city),
        country: normalize(&country),
    })
}

/// Fetch the location from the configured endpoint.
fn fetch_location(config: &LocationConfig) -> Result<Location, LocationError> {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(config.request_timeout()))
        .build()
        .new_agent();

    let body = agent
        .get(&config.endpoint)
        .call()?
        .body_mut()
        .read_to_string()?;

    parse_location(&body)
}

/// Location monitor that performs the lookup in a background thread.
#[derive(Debug)]
pub struct LocationMonitor {
    /// Resolved location (if any).
    location: Arc<RwLock<Option<Location>>>,
    config: LocationConfig,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl LocationMonitor {
    pub fn new(config: LocationConfig) -> Self {
        Self {
            location: Arc::new(RwLock::new(None)),
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the background lookup thread.
    pub fn start(&self) {
        if !self.config.enabled {
            log::info!("location lookup disabled");
            return;
        }
        if let Ok(mut running) = self.running.write() {
            if *running {
                return; // Already running
            }
            *running = true;
        }

        let location = self.location.clone();
        let running = self.running.clone();
        let config = self.config.clone();

        thread::spawn(move || {
            loop {
                if !is_running(&running) {
                    break;
                }

                match fetch_location(&config) {
                    Ok(found) => {
                        log::info!("location resolved: {}", found.label());
                        if let Ok(mut slot) = location.write() {
                            *slot = Some(found);
                        }
                        break;
                    }
                    Err(e) => {
                        log::warn!(
                            "location lookup failed: {e}; retrying in {:?}",
                            config.retry_delay()
                        );
                        if !wait_while_running(&running, config.retry_delay()) {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Stop the background thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    /// `CITY, COUNTRY`, or the placeholder while unknown.
    /// Never blocks: a contended lock reads as unknown for this frame.
    pub fn label(&self) -> String {
        self.location
            .try_read()
            .ok()
            .and_then(|slot| slot.as_ref().map(Location::label))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

impl Drop for LocationMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn is_running(running: &RwLock<bool>) -> bool {
    running.read().map(|r| *r).unwrap_or(false)
}

/// Sleep for `delay`, waking early if the monitor stops.
/// Returns whether the monitor is still running.
fn wait_while_running(running: &RwLock<bool>, delay: Duration) -> bool {
    let deadline = Instant::now() + delay;
    while Instant::now() < deadline {
        if !is_running(running) {
            return false;
        }
        thread::sleep(STOP_CHECK_INTERVAL.min(deadline.saturating_duration_since(Instant::now())));
    }
    is_running(running)
}
