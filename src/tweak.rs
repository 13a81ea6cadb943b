//! Static catalog of maintenance options.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// The category a maintenance option belongs to.
///
/// Categories determine plan ordering: a built plan always lists removal
/// operations first, then privacy, then performance, regardless of which
/// options are enabled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TweakCategory {
    /// Removal of a bundled component or application.
    Removal,
    /// Privacy hardening (telemetry, ads, tracking).
    Privacy,
    /// Gaming and performance adjustments.
    Performance,
}

impl TweakCategory {
    /// All categories in the fixed plan order.
    pub const ORDERED: [TweakCategory; 3] = [Self::Removal, Self::Privacy, Self::Performance];

    /// Human-readable category name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Removal => "App Removal",
            Self::Privacy => "Privacy & Security",
            Self::Performance => "Gaming & Performance",
        }
    }
}

/// A single maintenance option from the static catalog.
///
/// Each variant carries a fixed command template keyed by its identity; no
/// untrusted input is ever interpolated into the template, so the generated
/// script has no injection surface. Variant declaration order within a
/// category is the order operations appear in a built plan.
///
/// # Extensibility
///
/// This enum is marked `#[non_exhaustive]` to allow adding new options
/// in future versions. When matching on `Tweak`, always include a wildcard
/// pattern to handle future variants.
///
/// # Example
///
/// ```rust
/// use tuneup_engine::{Tweak, TweakCategory};
///
/// assert_eq!(Tweak::RemoveOneDrive.category(), TweakCategory::Removal);
/// assert_eq!(Tweak::DisableTelemetry.display_name(), "Disabling Telemetry");
///
/// // Iterate the whole catalog in declaration order
/// for tweak in Tweak::all() {
///     println!("{}: {}", tweak.name(), tweak.display_name());
/// }
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
#[non_exhaustive]
pub enum Tweak {
    // --- App Removal ---
    RemoveOneDrive,
    RemoveCortana,
    RemoveXbox,
    RemoveSkype,
    RemoveWeather,
    RemoveNews,
    RemoveFeedback,
    RemoveGetHelp,
    RemoveTips,
    RemoveMaps,
    RemoveSolitaire,
    RemovePeople,
    RemoveYourPhone,
    RemovePhotos,
    RemoveCalculator,

    // --- Privacy & Security ---
    DisableTelemetry,
    DisableAds,
    DisableLocation,
    DisableCortanaVoice,
    DisableErrorReporting,
    DisableFeedbackNotif,
    RestrictBackgroundApps,
    DisableStartSuggestions,
    DisableWindowsUpdate,

    // --- Gaming & Performance ---
    EnableUltimatePerformance,
    DisableGameDvr,
    DisableHibernation,
    DisableVisualEffects,
    DisableMouseAccel,
    DisableStickyKeys,
    OptimizeNetwork,
}

impl Tweak {
    /// Stable camel-case identifier, used as the operation id and as the
    /// key in toggle maps.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// The category this option belongs to.
    pub fn category(&self) -> TweakCategory {
        match self {
            Self::RemoveOneDrive
            | Self::RemoveCortana
            | Self::RemoveXbox
            | Self::RemoveSkype
            | Self::RemoveWeather
            | Self::RemoveNews
            | Self::RemoveFeedback
            | Self::RemoveGetHelp
            | Self::RemoveTips
            | Self::RemoveMaps
            | Self::RemoveSolitaire
            | Self::RemovePeople
            | Self::RemoveYourPhone
            | Self::RemovePhotos
            | Self::RemoveCalculator => TweakCategory::Removal,

            Self::DisableTelemetry
            | Self::DisableAds
            | Self::DisableLocation
            | Self::DisableCortanaVoice
            | Self::DisableErrorReporting
            | Self::DisableFeedbackNotif
            | Self::RestrictBackgroundApps
            | Self::DisableStartSuggestions
            | Self::DisableWindowsUpdate => TweakCategory::Privacy,

            Self::EnableUltimatePerformance
            | Self::DisableGameDvr
            | Self::DisableHibernation
            | Self::DisableVisualEffects
            | Self::DisableMouseAccel
            | Self::DisableStickyKeys
            | Self::OptimizeNetwork => TweakCategory::Performance,
        }
    }

    /// Human-readable progress label (e.g. "Removing OneDrive").
    ///
    /// Simulated execution derives its output from this label, never from
    /// the raw command template.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RemoveOneDrive => "Removing OneDrive",
            Self::RemoveCortana => "Removing Cortana",
            Self::RemoveXbox => "Removing Xbox Apps",
            Self::RemoveSkype => "Removing Skype",
            Self::RemoveWeather => "Removing Weather",
            Self::RemoveNews => "Removing News",
            Self::RemoveFeedback => "Removing Feedback Hub",
            Self::RemoveGetHelp => "Removing Get Help",
            Self::RemoveTips => "Removing Tips",
            Self::RemoveMaps => "Removing Maps",
            Self::RemoveSolitaire => "Removing Solitaire Collection",
            Self::RemovePeople => "Removing People",
            Self::RemoveYourPhone => "Removing Your Phone",
            Self::RemovePhotos => "Removing Photos",
            Self::RemoveCalculator => "Removing Calculator",
            Self::DisableTelemetry => "Disabling Telemetry",
            Self::DisableAds => "Disabling Advertising ID",
            Self::DisableLocation => "Disabling Location Tracking",
            Self::DisableCortanaVoice => "Disabling Cortana Voice",
            Self::DisableErrorReporting => "Disabling Error Reporting",
            Self::DisableFeedbackNotif => "Disabling Feedback Notifications",
            Self::RestrictBackgroundApps => "Restricting Background Apps",
            Self::DisableStartSuggestions => "Disabling Start Menu Suggestions",
            Self::DisableWindowsUpdate => "Disabling Windows Update",
            Self::EnableUltimatePerformance => "Enabling Ultimate Performance Plan",
            Self::DisableGameDvr => "Disabling GameDVR",
            Self::DisableHibernation => "Disabling Hibernation",
            Self::DisableVisualEffects => "Disabling Transparency",
            Self::DisableMouseAccel => "Disabling Mouse Acceleration",
            Self::DisableStickyKeys => "Disabling Sticky Keys",
            Self::OptimizeNetwork => "Optimizing Network Throttling",
        }
    }

    /// Fixed command template for this option.
    ///
    /// Templates are static PowerShell snippets; one template per option,
    /// possibly multi-line. The engine never interprets these beyond joining
    /// them into the generated script.
    pub fn command_text(&self) -> &'static str {
        match self {
            Self::RemoveOneDrive => {
                "taskkill /f /im OneDrive.exe 2>$null\nif (Test-Path \"$env:SystemRoot\\System32\\OneDriveSetup.exe\") { Start-Process \"$env:SystemRoot\\System32\\OneDriveSetup.exe\" -ArgumentList \"/uninstall\" -Wait }"
            }
            Self::RemoveCortana => {
                "Get-AppxPackage -AllUsers Microsoft.549981C3F5F10 | Remove-AppxPackage"
            }
            Self::RemoveXbox => {
                "Get-AppxPackage -AllUsers Microsoft.XboxGamingOverlay | Remove-AppxPackage\nGet-AppxPackage -AllUsers Microsoft.XboxApp | Remove-AppxPackage\nGet-AppxPackage -AllUsers Microsoft.Xbox.TCUI | Remove-AppxPackage\nGet-AppxPackage -AllUsers Microsoft.XboxSpeechToTextOverlay | Remove-AppxPackage\nGet-AppxPackage -AllUsers Microsoft.XboxGameOverlay | Remove-AppxPackage"
            }
            Self::RemoveSkype => {
                "Get-AppxPackage -AllUsers Microsoft.SkypeApp | Remove-AppxPackage"
            }
            Self::RemoveWeather => {
                "Get-AppxPackage -AllUsers Microsoft.BingWeather | Remove-AppxPackage"
            }
            Self::RemoveNews => {
                "Get-AppxPackage -AllUsers Microsoft.BingNews | Remove-AppxPackage"
            }
            Self::RemoveFeedback => {
                "Get-AppxPackage -AllUsers Microsoft.WindowsFeedbackHub | Remove-AppxPackage"
            }
            Self::RemoveGetHelp => {
                "Get-AppxPackage -AllUsers Microsoft.GetHelp | Remove-AppxPackage"
            }
            Self::RemoveTips => {
                "Get-AppxPackage -AllUsers Microsoft.Getstarted | Remove-AppxPackage"
            }
            Self::RemoveMaps => {
                "Get-AppxPackage -AllUsers Microsoft.WindowsMaps | Remove-AppxPackage"
            }
            Self::RemoveSolitaire => {
                "Get-AppxPackage -AllUsers Microsoft.MicrosoftSolitaireCollection | Remove-AppxPackage"
            }
            Self::RemovePeople => {
                "Get-AppxPackage -AllUsers Microsoft.People | Remove-AppxPackage"
            }
            Self::RemoveYourPhone => {
                "Get-AppxPackage -AllUsers Microsoft.YourPhone | Remove-AppxPackage"
            }
            Self::RemovePhotos => {
                "Get-AppxPackage -AllUsers Microsoft.Windows.Photos | Remove-AppxPackage"
            }
            Self::RemoveCalculator => {
                "Get-AppxPackage -AllUsers Microsoft.WindowsCalculator | Remove-AppxPackage"
            }
            Self::DisableTelemetry => {
                "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\Policies\\Microsoft\\Windows\\DataCollection' -Name 'AllowTelemetry' -Type DWord -Value 0\nSet-ItemProperty -Path 'HKLM:\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Policies\\DataCollection' -Name 'AllowTelemetry' -Type DWord -Value 0\nDisable-ScheduledTask -TaskName 'Microsoft\\Windows\\Customer Experience Improvement Program\\Consolidator' -ErrorAction SilentlyContinue"
            }
            Self::DisableAds => {
                "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\Policies\\Microsoft\\Windows\\AdvertisingInfo' -Name 'DisabledByGroupPolicy' -Type DWord -Value 1\nSet-ItemProperty -Path 'HKCU:\\Software\\Microsoft\\Windows\\CurrentVersion\\AdvertisingInfo' -Name 'Enabled' -Type DWord -Value 0"
            }
            Self::DisableLocation => {
                "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\Policies\\Microsoft\\Windows\\LocationAndSensors' -Name 'DisableLocation' -Type DWord -Value 1"
            }
            Self::DisableCortanaVoice => {
                "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\Policies\\Microsoft\\Windows\\Windows Search' -Name 'AllowCortana' -Type DWord -Value 0"
            }
            Self::DisableErrorReporting => {
                "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\Microsoft\\Windows\\Windows Error Reporting' -Name 'Disabled' -Type DWord -Value 1"
            }
            Self::DisableFeedbackNotif => {
                "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\Policies\\Microsoft\\Windows\\DataCollection' -Name 'DoNotShowFeedbackNotifications' -Type DWord -Value 1"
            }
            Self::RestrictBackgroundApps => {
                "New-Item -Path 'HKCU:\\Software\\Microsoft\\Windows\\CurrentVersion\\AppPrivacy' -Force\nSet-ItemProperty -Path 'HKCU:\\Software\\Microsoft\\Windows\\CurrentVersion\\AppPrivacy' -Name 'LetAppsRunInBackground' -Type DWord -Value 2"
            }
            Self::DisableStartSuggestions => {
                "Set-ItemProperty -Path 'HKCU:\\Software\\Microsoft\\Windows\\CurrentVersion\\ContentDeliveryManager' -Name 'SystemPaneSuggestionsEnabled' -Type DWord -Value 0"
            }
            Self::DisableWindowsUpdate => {
                "Stop-Service -Name wuauserv -Force\nSet-Service -Name wuauserv -StartupType Disabled\nNew-NetFirewallRule -DisplayName 'Block Windows Update' -Direction Outbound -RemoteAddress ('2.22.148.115', '2.22.148.116', '68.232.34.250', '96.17.16.148', 'sls.update.microsoft.com', 'fe2.update.microsoft.com', 'fe3.delivery.dsp.mp.microsoft.com', 'wustat.windows.com', 'windowsupdate.microsoft.com', 'update.microsoft.com') -Action Block"
            }
            Self::EnableUltimatePerformance => {
                "powercfg -duplicatescheme e9a42b02-d5df-448d-aa00-03f14749eb61"
            }
            Self::DisableGameDvr => {
                "Set-ItemProperty -Path 'HKCU:\\System\\GameConfigStore' -Name 'GameDVR_Enabled' -Type DWord -Value 0\nSet-ItemProperty -Path 'HKLM:\\SOFTWARE\\Policies\\Microsoft\\Windows\\GameDVR' -Name 'AllowGameDVR' -Type DWord -Value 0"
            }
            Self::DisableHibernation => "powercfg /h off",
            Self::DisableVisualEffects => {
                "Set-ItemProperty -Path 'HKCU:\\Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize' -Name 'EnableTransparency' -Type DWord -Value 0"
            }
            Self::DisableMouseAccel => {
                "Set-ItemProperty -Path 'HKCU:\\Control Panel\\Mouse' -Name 'MouseSpeed' -Type String -Value '0'\nSet-ItemProperty -Path 'HKCU:\\Control Panel\\Mouse' -Name 'MouseThreshold1' -Type String -Value '0'\nSet-ItemProperty -Path 'HKCU:\\Control Panel\\Mouse' -Name 'MouseThreshold2' -Type String -Value '0'"
            }
            Self::DisableStickyKeys => {
                "Set-ItemProperty -Path 'HKCU:\\Control Panel\\Accessibility\\StickyKeys' -Name 'Flags' -Type String -Value '506'"
            }
            Self::OptimizeNetwork => {
                "Set-ItemProperty -Path 'HKLM:\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion\\Multimedia\\SystemProfile' -Name 'NetworkThrottlingIndex' -Type DWord -Value 4294967295"
            }
        }
    }

    /// Iterator over the whole catalog in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
