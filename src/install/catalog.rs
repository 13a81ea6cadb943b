use serde::{Deserialize, Serialize};

/// A program the installer pipeline knows how to fetch and install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallableProgram {
    /// Display name, also used to prefix the downloaded installer file.
    pub name: String,
    /// One-line description for catalog listings.
    pub description: String,
    /// Direct download URL for the installer binary.
    pub download_url: String,
    /// Arguments that make the installer run without any UI.
    pub silent_args: String,
}

/// The built-in program catalog.
pub fn programs() -> Vec<InstallableProgram> {
    vec![
        InstallableProgram {
            name: "Google Chrome".into(),
            description: "Fast, secure, and free web browser.".into(),
            download_url: "https://dl.google.com/tag/s/appguid%3D%7B8A69D345-D564-463C-AFF1-A69D9E530F96%7D%26iid%3D%7B36E22C9B-1919-C064-946D-24017C7E7796%7D%26lang%3Den%26browser%3D3%26usagestats%3D0%26appname%3DGoogle%2520Chrome%26needsadmin%3Dprefers%26ap%3Dx64-stable-statsdef_1%26installdataindex%3Dempty/update2/installers/ChromeSetup.exe".into(),
            silent_args: "/silent /install".into(),
        },
        InstallableProgram {
            name: "Mozilla Firefox".into(),
            description: "Free and open-source web browser.".into(),
            download_url: "https://download.mozilla.org/?product=firefox-latest&os=win64&lang=en-US".into(),
            silent_args: "-ms".into(),
        },
        InstallableProgram {
            name: "VLC Media Player".into(),
            description: "Free and open source cross-platform multimedia player.".into(),
            download_url: "https://get.videolan.org/vlc/3.0.18/win64/vlc-3.0.18-win64.exe".into(),
            silent_args: "/S".into(),
        },
        InstallableProgram {
            name: "7-Zip".into(),
            description: "File archiver with a high compression ratio.".into(),
            download_url: "https://www.7-zip.org/a/7z2301-x64.exe".into(),
            silent_args: "/S".into(),
        },
        InstallableProgram {
            name: "MemReduct".into(),
            description: "Lightweight real-time memory management application.".into(),
            download_url: "https://github.com/henrypp/memreduct/releases/latest/download/memreduct-3.4-setup.exe".into(),
            silent_args: "/S".into(),
        },
    ]
}
