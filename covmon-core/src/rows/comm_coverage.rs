//! Records of the communication coverage report.

use super::{ColumnError, FromFieldMap, count, text};
use crate::field::FieldMap;

/// Offer and informational communication counters for one metric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferInfoRow {
    /// Metric label.
    pub metric_name: Option<String>,
    /// GZ brand, SMS.
    pub gz_sms: Option<i64>,
    /// GZ brand, email.
    pub gz_email: Option<i64>,
    /// 366 pharmacy brand, SMS.
    pub apteka_sms: Option<i64>,
    /// 366 pharmacy brand, email.
    pub apteka_email: Option<i64>,
    /// KF brand, SMS.
    pub kf_sms: Option<i64>,
    /// KF brand, email.
    pub kf_email: Option<i64>,
}

impl FromFieldMap for OfferInfoRow {
    fn from_field_map(row: &FieldMap) -> Result<Self, ColumnError> {
        Ok(Self {
            metric_name: text(row, "METRIC_NAME")?,
            gz_sms: count(row, "GZ_SMS")?,
            gz_email: count(row, "GZ_EMAIL")?,
            apteka_sms: count(row, "366_SMS")?,
            apteka_email: count(row, "366_EMAIL")?,
            kf_sms: count(row, "KF_SMS")?,
            kf_email: count(row, "KF_EMAIL")?,
        })
    }
}
