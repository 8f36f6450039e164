//! Records of the monthly coverage report.

use rust_decimal::Decimal;

use super::{ColumnError, FromFieldMap, count, decimal, text};
use crate::field::FieldMap;

/// Client base reachable per channel, per brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableClientBaseRow {
    /// Brand.
    pub brand: Option<String>,
    /// All clients of the brand.
    pub total_clients: Option<i64>,
    /// Clients not excluded from communications.
    pub available_clients: Option<i64>,
    /// Available clients reachable by email.
    pub email_count: Option<i64>,
    /// Available clients reachable by SMS.
    pub sms_count: Option<i64>,
    /// Available clients reachable by email or SMS.
    pub email_and_sms_count: Option<i64>,
    /// Pre-formatted email share.
    pub email_percentage: Option<String>,
    /// Pre-formatted SMS share.
    pub sms_percentage: Option<String>,
    /// Pre-formatted email-or-SMS share.
    pub email_and_sms_percentage: Option<String>,
}

impl FromFieldMap for AvailableClientBaseRow {
    fn from_field_map(row: &FieldMap) -> Result<Self, ColumnError> {
        Ok(Self {
            brand: text(row, "brand")?,
            total_clients: count(row, "total_clients")?,
            available_clients: count(row, "available_clients")?,
            email_count: count(row, "email_count")?,
            sms_count: count(row, "sms_count")?,
            email_and_sms_count: count(row, "email_and_sms_count")?,
            email_percentage: text(row, "email_percentage")?,
            sms_percentage: text(row, "sms_percentage")?,
            email_and_sms_percentage: text(row, "email_and_sms_percentage")?,
        })
    }
}

/// Communication coverage per brand, communication type and channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunicationCoverageRow {
    /// Brand.
    pub brand: Option<String>,
    /// Communication type.
    pub kind: Option<String>,
    /// Channel.
    pub channel: Option<String>,
    /// Clients with at least one communication.
    pub client_count: Option<i64>,
    /// Distinct clients with at least one communication.
    pub unique_client_count: Option<i64>,
    /// Average communications per client.
    pub communications_per_client: Option<Decimal>,
    /// Pre-formatted coverage.
    pub coverage: Option<String>,
}

impl FromFieldMap for CommunicationCoverageRow {
    fn from_field_map(row: &FieldMap) -> Result<Self, ColumnError> {
        Ok(Self {
            brand: text(row, "brand")?,
            kind: text(row, "type")?,
            channel: text(row, "channel")?,
            client_count: count(row, "client_count")?,
            unique_client_count: count(row, "unique_client_count")?,
            communications_per_client: decimal(row, "communications_per_client")?,
            coverage: text(row, "coverage")?,
        })
    }
}

/// Offer coverage per brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferCoverageRow {
    /// Brand.
    pub brand: Option<String>,
    /// Offers issued.
    pub offer_count: Option<i64>,
    /// Distinct clients with an offer.
    pub unique_clients_with_offer: Option<i64>,
    /// Offers followed by a communication.
    pub offers_with_comm: Option<i64>,
    /// Distinct clients with an offer and a communication.
    pub unique_clients_with_offer_and_comm: Option<i64>,
    /// Available base the coverage is computed against.
    pub available_base: Option<i64>,
    /// Pre-formatted offer coverage.
    pub offer_coverage: Option<String>,
    /// Pre-formatted offer-with-communication coverage.
    pub offer_with_comm_coverage: Option<String>,
}

impl FromFieldMap for OfferCoverageRow {
    fn from_field_map(row: &FieldMap) -> Result<Self, ColumnError> {
        Ok(Self {
            brand: text(row, "brand")?,
            offer_count: count(row, "offer_count")?,
            unique_clients_with_offer: count(row, "unique_clients_with_offer")?,
            offers_with_comm: count(row, "offers_with_comm")?,
            unique_clients_with_offer_and_comm: count(row, "unique_clients_with_offer_and_comm")?,
            available_base: count(row, "available_base")?,
            offer_coverage: text(row, "offer_coverage")?,
            offer_with_comm_coverage: text(row, "offer_with_comm_coverage")?,
        })
    }
}

/// SMS/push messages sent by cascades, per message description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeCountRow {
    /// Message description.
    pub message_desc: Option<String>,
    /// Sent for the GZ brand.
    pub gz: Option<i64>,
    /// Sent for the 366 brand.
    pub apteka_366: Option<i64>,
    /// Sent in total.
    pub total: Option<i64>,
}

impl FromFieldMap for CascadeCountRow {
    fn from_field_map(row: &FieldMap) -> Result<Self, ColumnError> {
        Ok(Self {
            message_desc: text(row, "MESSAGE_DESC")?,
            gz: count(row, "GZ")?,
            apteka_366: count(row, "366")?,
            total: count(row, "total")?,
        })
    }
}
