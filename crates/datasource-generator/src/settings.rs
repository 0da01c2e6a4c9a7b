//! TOML description of the data source to generate.
//!
//! ```toml
//! [data_source]
//! name = "petStore"
//! url = "http://example.com"
//!
//! [[data_source.headers]]
//! name = "Authorization"
//! value = "Bearer token"
//! ```

use serde::Deserialize;

use crate::{config::Headers, error::Error};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    pub data_source: DataSourceSettings,
}

impl GeneratorSettings {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let settings: GeneratorSettings = toml::from_str(text)?;

        // The url is kept as written, parsing would normalize it.
        if let Err(error) = url::Url::parse(&settings.data_source.url) {
            return Err(Error::InvalidUrl {
                url: settings.data_source.url,
                message: error.to_string(),
            });
        }

        Ok(settings)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSourceSettings {
    /// The name of the generated data source
    pub name: String,
    /// Where the upstream lives
    pub url: String,
    /// Sent with every request to the upstream
    #[serde(default)]
    pub headers: Vec<HeaderSettings>,
}

impl DataSourceSettings {
    /// The configured headers, or `None` if there aren't any.  Later headers win over
    /// earlier ones with the same name.
    pub fn headers(&self) -> Option<Headers> {
        if self.headers.is_empty() {
            return None;
        }

        Some(
            self.headers
                .iter()
                .map(|header| (header.name.clone(), header.value.clone()))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderSettings {
    pub name: String,
    pub value: String,
}
