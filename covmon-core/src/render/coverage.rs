//! Tables of the monthly coverage report.

use super::html::{Cell, Section};
use crate::rows::coverage::{
    AvailableClientBaseRow, CascadeCountRow, CommunicationCoverageRow, OfferCoverageRow,
};

/// Paragraphs under the greeting.
pub const INTRO: &[&str] = &[
    "В таблицах ниже представлены данные по покрытию за текущий месяц.",
    "Доступные клиенты: Клиенты, не входящие в ГКГ.",
    "Покрытие = Количество уникальных клиентов c коммуникацией / Доступность соответствующего канала.",
];

/// Title of the client base table.
pub const AVAILABLE_CLIENT_BASE_TITLE: &str = "Доступная база";
/// Column headers of the client base table.
pub const AVAILABLE_CLIENT_BASE_COLUMNS: &[&str] = &[
    "Бренд",
    "Всего клиентов",
    "Доступные клиенты",
    "Доступен EMAIL",
    "Доступен SMS",
    "Доступен EMAIL или SMS",
    "Доля EMAIL от доступных",
    "Доля SMS от доступных",
    "Доля EMAIL или SMS от доступных",
];

/// Title of the communication coverage table.
pub const COMMUNICATION_COVERAGE_TITLE: &str = "Покрытие коммуникациями";
/// Column headers of the communication coverage table.
pub const COMMUNICATION_COVERAGE_COLUMNS: &[&str] = &[
    "Бренд",
    "Тип коммуникации",
    "Канал коммуникации",
    "Количество клиентов c коммуникацией",
    "Количество уникальных клиентов c коммуникацией",
    "Количество коммуникаций на клиента",
    "Покрытие",
];

/// Title of the offer coverage table.
pub const OFFER_COVERAGE_TITLE: &str = "Покрытие офферами";
/// Column headers of the offer coverage table.
pub const OFFER_COVERAGE_COLUMNS: &[&str] = &[
    "Бренд",
    "Доступная база",
    "Количество офферов",
    "Количество уникальных клиентов с оффером",
    "Количество офферов с коммуникацией",
    "Количество уникальных клиентов с оффером и коммуникацией",
    "Покрытие по офферам",
    "Покрытие по офферам с коммуникацией",
];

/// Title of the SMS/push cascade table.
pub const CASCADE_COUNT_TITLE: &str = "Количество отправленных СМС/ПУШ";
/// Column headers of the cascade table.
pub const CASCADE_COUNT_COLUMNS: &[&str] = &["Метрика", "ГОРЗДРАВ", "366", "Всего"];

/// Client base table.
///
/// Percentages come pre-formatted from the warehouse and are not escaped.
#[must_use]
pub fn available_client_base_section(rows: &[AvailableClientBaseRow]) -> Section {
    Section {
        title: AVAILABLE_CLIENT_BASE_TITLE.to_string(),
        columns: AVAILABLE_CLIENT_BASE_COLUMNS,
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.brand.clone()),
                    Cell::Amount(r.total_clients),
                    Cell::Amount(r.available_clients),
                    Cell::Amount(r.email_count),
                    Cell::Amount(r.sms_count),
                    Cell::Amount(r.email_and_sms_count),
                    Cell::Trusted(r.email_percentage.clone()),
                    Cell::Trusted(r.sms_percentage.clone()),
                    Cell::Trusted(r.email_and_sms_percentage.clone()),
                ]
            })
            .collect(),
    }
}

/// Communication coverage table.
#[must_use]
pub fn communication_coverage_section(rows: &[CommunicationCoverageRow]) -> Section {
    Section {
        title: COMMUNICATION_COVERAGE_TITLE.to_string(),
        columns: COMMUNICATION_COVERAGE_COLUMNS,
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.brand.clone()),
                    Cell::Text(r.kind.clone()),
                    Cell::Text(r.channel.clone()),
                    Cell::Amount(r.client_count),
                    Cell::Amount(r.unique_client_count),
                    Cell::Decimal(r.communications_per_client),
                    Cell::Text(r.coverage.clone()),
                ]
            })
            .collect(),
    }
}

/// Offer coverage table.
#[must_use]
pub fn offer_coverage_section(rows: &[OfferCoverageRow]) -> Section {
    Section {
        title: OFFER_COVERAGE_TITLE.to_string(),
        columns: OFFER_COVERAGE_COLUMNS,
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.brand.clone()),
                    Cell::Amount(r.available_base),
                    Cell::Amount(r.offer_count),
                    Cell::Amount(r.unique_clients_with_offer),
                    Cell::Amount(r.offers_with_comm),
                    Cell::Amount(r.unique_clients_with_offer_and_comm),
                    Cell::Text(r.offer_coverage.clone()),
                    Cell::Text(r.offer_with_comm_coverage.clone()),
                ]
            })
            .collect(),
    }
}

/// SMS/push cascade table.
#[must_use]
pub fn cascade_count_section(rows: &[CascadeCountRow]) -> Section {
    Section {
        title: CASCADE_COUNT_TITLE.to_string(),
        columns: CASCADE_COUNT_COLUMNS,
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.message_desc.clone()),
                    Cell::Amount(r.gz),
                    Cell::Amount(r.apteka_366),
                    Cell::Amount(r.total),
                ]
            })
            .collect(),
    }
}
