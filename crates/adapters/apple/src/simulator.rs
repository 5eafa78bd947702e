//! Decoding `xcrun simctl list devices --json`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::AppleError;

const RUNTIME_PREFIX: &str = "com.apple.CoreSimulator.SimRuntime.";
const DEVICE_TYPE_PREFIX: &str = "com.apple.CoreSimulator.SimDeviceType.";

/// Top-level shape of the device list.
#[derive(Debug, Deserialize)]
pub struct DeviceList {
    /// Simulators keyed by runtime identifier.
    pub devices: BTreeMap<String, Vec<Simulator>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulator {
    pub udid: String,
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub device_type_identifier: Option<String>,
    #[serde(default = "available")]
    pub is_available: bool,
}

fn available() -> bool {
    true
}

/// A simulator together with the runtime it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorMatch<'a> {
    pub runtime: &'a str,
    pub simulator: &'a Simulator,
}

impl SimulatorMatch<'_> {
    /// Human-readable OS version (`iOS 17.2`) from the runtime identifier.
    #[must_use]
    pub fn os_version(&self) -> String {
        let runtime = self.runtime.strip_prefix(RUNTIME_PREFIX).unwrap_or(self.runtime);
        match runtime.split_once('-') {
            Some((os, version)) => format!("{os} {}", version.replace('-', ".")),
            None => runtime.to_string(),
        }
    }

    /// Device model (`iPhone 15 Pro`) from the device type identifier.
    #[must_use]
    pub fn model(&self) -> Option<String> {
        let identifier = self.simulator.device_type_identifier.as_deref()?;
        let model = identifier
            .strip_prefix(DEVICE_TYPE_PREFIX)
            .unwrap_or(identifier);
        Some(model.replace('-', " "))
    }
}

impl DeviceList {
    /// Decode `simctl list devices --json` output.
    ///
    /// # Errors
    ///
    /// Returns [`AppleError::DeviceList`] when the JSON does not match.
    pub fn parse(json: &str) -> Result<Self, AppleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find `device` by UDID, or the first booted simulator when `device` is
    /// `None` or `booted`.
    #[must_use]
    pub fn find(&self, device: Option<&str>) -> Option<SimulatorMatch<'_>> {
        let wanted = device.filter(|d| !d.eq_ignore_ascii_case("booted"));
        self.devices.iter().find_map(|(runtime, simulators)| {
            simulators
                .iter()
                .find(|sim| match wanted {
                    Some(udid) => sim.udid.eq_ignore_ascii_case(udid),
                    None => sim.state == "Booted" && sim.is_available,
                })
                .map(|simulator| SimulatorMatch {
                    runtime: runtime.as_str(),
                    simulator,
                })
        })
    }
}
