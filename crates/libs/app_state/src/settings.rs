use crate::{ApiSettings, AppConstants, LoggingSettings, RawSettings, SecretSettings};
use serde::Deserialize;
use std::path::{PathBuf, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub media: MediaSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub constants: AppConstants,
}

/// Media settings with the media folder resolved to an absolute path.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaSettings {
    pub media_root: PathBuf,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = std::io::Error;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let media_root = absolute(&raw.media.media_folder)?;

        Ok(Self {
            media: MediaSettings { media_root },
            logging: raw.logging,
            api: raw.api,
            secrets: raw.secrets,
            constants: raw.constants,
        })
    }
}

impl ApiSettings {
    /// Address string the server binds to.
    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
