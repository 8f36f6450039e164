//! Per-variant report layouts: which queries feed which tables, and the
//! subjects the report and its failure notice are sent with.

use std::fmt::Debug;

use covmon_types::{CovmonError, QueryKey, ReportVariant};

use crate::field::FieldMap;
use crate::render::{Section, comm_coverage, coverage};
use crate::rows::{FromFieldMap, decode_rows};

/// Placeholder replaced with the month name in subjects and notice bodies.
pub const MONTH_PLACEHOLDER: &str = "{month}";

type BuildFn = fn(QueryKey, &[FieldMap]) -> Result<Section, CovmonError>;

/// One table of a report.
#[derive(Debug)]
pub struct SectionSpec {
    /// Query feeding the table.
    pub query: QueryKey,
    /// Table title.
    pub title: &'static str,
    /// Declared headers.
    pub columns: &'static [&'static str],
    /// An empty result is an error-level condition rather than a warning.
    pub required: bool,
    build: BuildFn,
}

impl SectionSpec {
    /// Decode `rows` and lay them out as a table.
    ///
    /// # Errors
    /// Returns `Mapping` when any row fails to decode.
    pub fn build(&self, rows: &[FieldMap]) -> Result<Section, CovmonError> {
        (self.build)(self.query, rows)
    }

    /// The table with no rows.
    #[must_use]
    pub fn empty(&self) -> Section {
        Section::empty(self.title, self.columns)
    }
}

/// Everything variant-specific about a report.
#[derive(Debug)]
pub struct ReportLayout {
    /// Variant this layout belongs to.
    pub variant: ReportVariant,
    /// Paragraphs under the greeting.
    pub intro: &'static [&'static str],
    /// Tables in rendering order.
    pub sections: &'static [SectionSpec],
    /// Report subject; may contain [`MONTH_PLACEHOLDER`].
    pub subject: &'static str,
    /// Failure notice subject; may contain [`MONTH_PLACEHOLDER`].
    pub fallback_subject: &'static str,
    /// Failure notice HTML body.
    pub fallback_body: &'static str,
}

impl ReportLayout {
    /// Layout for a variant.
    #[must_use]
    pub fn for_variant(variant: ReportVariant) -> &'static Self {
        match variant {
            ReportVariant::Coverage => &COVERAGE,
            ReportVariant::CommCoverage => &COMM_COVERAGE,
        }
    }
}

/// Replace [`MONTH_PLACEHOLDER`] with `month`.
#[must_use]
pub fn fill_month(template: &str, month: &str) -> String {
    template.replace(MONTH_PLACEHOLDER, month)
}

fn decode_then<T>(
    query: QueryKey,
    rows: &[FieldMap],
    lay_out: fn(&[T]) -> Section,
) -> Result<Section, CovmonError>
where
    T: FromFieldMap + Debug,
{
    let typed = decode_rows::<T>(query, rows)?;
    for row in &typed {
        tracing::debug!(query = %query, ?row, "decoded row");
    }
    Ok(lay_out(&typed))
}

fn build_available_client_base(q: QueryKey, rows: &[FieldMap]) -> Result<Section, CovmonError> {
    decode_then(q, rows, coverage::available_client_base_section)
}

fn build_communication_coverage(q: QueryKey, rows: &[FieldMap]) -> Result<Section, CovmonError> {
    decode_then(q, rows, coverage::communication_coverage_section)
}

fn build_offer_coverage(q: QueryKey, rows: &[FieldMap]) -> Result<Section, CovmonError> {
    decode_then(q, rows, coverage::offer_coverage_section)
}

fn build_cascade_count(q: QueryKey, rows: &[FieldMap]) -> Result<Section, CovmonError> {
    decode_then(q, rows, coverage::cascade_count_section)
}

fn build_offer_info(q: QueryKey, rows: &[FieldMap]) -> Result<Section, CovmonError> {
    decode_then(q, rows, comm_coverage::offer_info_section)
}

static COVERAGE: ReportLayout = ReportLayout {
    variant: ReportVariant::Coverage,
    intro: coverage::INTRO,
    sections: &[
        SectionSpec {
            query: QueryKey::AvailableClientBase,
            title: coverage::AVAILABLE_CLIENT_BASE_TITLE,
            columns: coverage::AVAILABLE_CLIENT_BASE_COLUMNS,
            required: false,
            build: build_available_client_base,
        },
        SectionSpec {
            query: QueryKey::CommunicationCoverage,
            title: coverage::COMMUNICATION_COVERAGE_TITLE,
            columns: coverage::COMMUNICATION_COVERAGE_COLUMNS,
            required: false,
            build: build_communication_coverage,
        },
        SectionSpec {
            query: QueryKey::OfferCoverage,
            title: coverage::OFFER_COVERAGE_TITLE,
            columns: coverage::OFFER_COVERAGE_COLUMNS,
            required: false,
            build: build_offer_coverage,
        },
        SectionSpec {
            query: QueryKey::CascadeCount,
            title: coverage::CASCADE_COUNT_TITLE,
            columns: coverage::CASCADE_COUNT_COLUMNS,
            required: false,
            build: build_cascade_count,
        },
    ],
    subject: "Отчет по покрытию за {month}",
    fallback_subject: "ОШИБКА Отчет по покрытию за {month}",
    fallback_body: "При отправке отчета по покрытию произошла ошибка<br><br>",
};

static COMM_COVERAGE: ReportLayout = ReportLayout {
    variant: ReportVariant::CommCoverage,
    intro: comm_coverage::INTRO,
    sections: &[SectionSpec {
        query: QueryKey::OfferInfo,
        title: comm_coverage::OFFER_INFO_TITLE,
        columns: comm_coverage::OFFER_INFO_COLUMNS,
        required: true,
        build: build_offer_info,
    }],
    subject: "Отчет по покрытию коммуникациями",
    fallback_subject: "ОШИБКА Отчет по покрытию коммуникациями",
    fallback_body: "При отправке отчета по покрытию коммуникациями произошла ошибка<br><br>",
};
