//! Service Quality

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Returned when a string does not name a known service quality.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service quality: {0:?}")]
pub struct ParseServiceQualityError(pub String);

/// Rating of the service, used to look up the tip margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServiceQuality {
    /// Lowest rating
    #[default]
    Bad,

    /// Middle rating
    Good,

    /// Highest rating
    Perfect,
}

impl ServiceQuality {
    /// All ratings, lowest first.
    pub const ALL: [ServiceQuality; 3] = [
        ServiceQuality::Bad,
        ServiceQuality::Good,
        ServiceQuality::Perfect,
    ];

    /// Key used for this rating in form values and tariff files.
    pub const fn key(self) -> &'static str {
        match self {
            ServiceQuality::Bad => "bad",
            ServiceQuality::Good => "good",
            ServiceQuality::Perfect => "perfect",
        }
    }
}

impl FromStr for ServiceQuality {
    type Err = ParseServiceQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|quality| quality.key() == s)
            .ok_or_else(|| ParseServiceQualityError(s.to_string()))
    }
}

impl fmt::Display for ServiceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
