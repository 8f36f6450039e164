//! Logical names of the warehouse queries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical query identifier.
///
/// Each key corresponds to exactly one SQL template in the `sql` configuration
/// section; errors and logs refer to queries through [`QueryKey::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKey {
    /// Client base available for communications, per brand.
    AvailableClientBase,
    /// Communication coverage per brand, type and channel.
    CommunicationCoverage,
    /// Offer coverage per brand.
    OfferCoverage,
    /// Number of SMS/push messages sent by cascades.
    CascadeCount,
    /// Offer and informational communication counters.
    OfferInfo,
    /// Distribution list.
    Recipients,
}

impl QueryKey {
    /// All keys, in configuration order.
    pub const ALL: [Self; 6] = [
        Self::AvailableClientBase,
        Self::CommunicationCoverage,
        Self::OfferCoverage,
        Self::CascadeCount,
        Self::OfferInfo,
        Self::Recipients,
    ];

    /// Short label used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AvailableClientBase => "available-client-base",
            Self::CommunicationCoverage => "communication-coverage",
            Self::OfferCoverage => "offer-coverage",
            Self::CascadeCount => "cascade-count",
            Self::OfferInfo => "offer-info",
            Self::Recipients => "recipients",
        }
    }

    /// Fully qualified configuration key holding the template.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::AvailableClientBase => "sql.select-available-client-base-query",
            Self::CommunicationCoverage => "sql.select-communication-coverage-query",
            Self::OfferCoverage => "sql.select-offer-coverage-query",
            Self::CascadeCount => "sql.select-cascade-count-query",
            Self::OfferInfo => "sql.select-offer-info-query",
            Self::Recipients => "sql.select-recipients-query",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
