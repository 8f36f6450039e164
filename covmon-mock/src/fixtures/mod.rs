pub mod comm_coverage;
pub mod coverage;
pub mod recipients;

use covmon_core::{FieldMap, QueryKey};

pub fn by_query(key: QueryKey) -> Vec<FieldMap> {
    match key {
        QueryKey::AvailableClientBase => coverage::available_client_base(),
        QueryKey::CommunicationCoverage => coverage::communication_coverage(),
        QueryKey::OfferCoverage => coverage::offer_coverage(),
        QueryKey::CascadeCount => coverage::cascade_count(),
        QueryKey::OfferInfo => comm_coverage::offer_info(),
        QueryKey::Recipients => recipients::recipients(),
    }
}
