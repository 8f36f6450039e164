//! Table of the communication coverage report.

use super::html::{Cell, Section};
use crate::rows::comm_coverage::OfferInfoRow;

/// Paragraph under the greeting.
pub const INTRO: &[&str] =
    &["В таблице ниже представлены данные по офферным и информационным коммуникациям."];

/// Title of the offer and informational table.
pub const OFFER_INFO_TITLE: &str = "Офферные и информационные коммуникации";
/// Column headers, one counter pair per brand.
pub const OFFER_INFO_COLUMNS: &[&str] = &[
    "Метрика",
    "ГЗ SMS",
    "ГЗ Email",
    "Аптека SMS",
    "Аптека Email",
    "КФ SMS",
    "КФ Email",
];

/// Offer and informational communication counters.
#[must_use]
pub fn offer_info_section(rows: &[OfferInfoRow]) -> Section {
    Section {
        title: OFFER_INFO_TITLE.to_string(),
        columns: OFFER_INFO_COLUMNS,
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.metric_name.clone()),
                    Cell::Amount(r.gz_sms),
                    Cell::Amount(r.gz_email),
                    Cell::Amount(r.apteka_sms),
                    Cell::Amount(r.apteka_email),
                    Cell::Amount(r.kf_sms),
                    Cell::Amount(r.kf_email),
                ]
            })
            .collect(),
    }
}
