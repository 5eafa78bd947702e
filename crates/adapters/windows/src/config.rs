//! Windows backend configuration.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowsConfig {
    /// PowerShell executable (`powershell` for Windows PowerShell, `pwsh`
    /// for PowerShell 7).
    pub powershell: String,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            powershell: "powershell".to_string(),
        }
    }
}
