//! PowerShell script fragments for packaged-app management.
//!
//! Every caller-supplied value goes through [`quote`], so scripts never
//! interpolate raw input.

/// Single-quote `value` as a PowerShell literal string.
///
/// Inside single quotes PowerShell expands nothing; an embedded quote is
/// written twice.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[must_use]
pub fn install(app_filename: &str) -> String {
    format!("Add-AppxPackage -Path {}", quote(app_filename))
}

/// Bind `$package` to the installed package named `app_id`.
///
/// `app_id` may be either the package name (`Contoso.App`) or its family
/// name (`Contoso.App_8wekyb3d8bbwe`). The script throws when nothing
/// matches, so PowerShell exits non-zero.
#[must_use]
pub fn resolve(app_id: &str) -> String {
    let id = quote(app_id);
    format!(
        "$package = Get-AppxPackage | Where-Object {{ $_.Name -eq {id} -or $_.PackageFamilyName -eq {id} }} | Select-Object -First 1; \
         if (-not $package) {{ throw ('no installed package matches ' + {id}) }}; "
    )
}

#[must_use]
pub fn remove(app_id: &str) -> String {
    format!("{}$package | Remove-AppxPackage", resolve(app_id))
}

/// Start the app's default entry point through the shell's AppsFolder.
#[must_use]
pub fn launch(app_id: &str) -> String {
    format!(
        r"{}Start-Process ('shell:AppsFolder\' + $package.PackageFamilyName + '!App')",
        resolve(app_id)
    )
}

/// Stop every process whose image lives under the package's install
/// location.
#[must_use]
pub fn stop(app_id: &str) -> String {
    format!(
        "{}Get-Process | Where-Object {{ $_.Path -like ($package.InstallLocation + '\\*') }} | Stop-Process -Force",
        resolve(app_id)
    )
}

#[must_use]
pub fn reset(app_id: &str) -> String {
    format!("{}$package | Reset-AppxPackage", resolve(app_id))
}

#[must_use]
pub fn open(uri: &str) -> String {
    format!("Start-Process {}", quote(uri))
}

pub const OS_VERSION: &str = "[Environment]::OSVersion.VersionString";
