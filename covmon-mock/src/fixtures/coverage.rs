use covmon_core::{FieldMap, FieldValue};
use rust_decimal::Decimal;

fn base(brand: &str, total: i64, available: i64, email: i64, sms: i64, either: i64) -> FieldMap {
    let pct = |n: i64| format!("{:.1}%", n as f64 * 100.0 / available as f64).replace('.', ",");
    FieldMap::new()
        .with("brand", brand)
        .with("total_clients", total)
        .with("available_clients", available)
        .with("email_count", email)
        .with("sms_count", sms)
        .with("email_and_sms_count", either)
        .with("email_percentage", pct(email))
        .with("sms_percentage", pct(sms))
        .with("email_and_sms_percentage", pct(either))
}

pub fn available_client_base() -> Vec<FieldMap> {
    vec![
        base("ГОРЗДРАВ", 4_812_330, 4_120_004, 1_530_221, 3_801_442, 3_912_870),
        base("366", 2_104_118, 1_877_650, 602_114, 1_700_902, 1_755_031),
        base("Калина Фарм", 310_442, 288_120, 97_004, 250_331, 261_870),
    ]
}

fn comm(
    brand: &str,
    kind: &str,
    channel: &str,
    clients: i64,
    unique: i64,
    per_client: Option<Decimal>,
    coverage: &str,
) -> FieldMap {
    FieldMap::new()
        .with("brand", brand)
        .with("type", kind)
        .with("channel", channel)
        .with("client_count", clients)
        .with("unique_client_count", unique)
        .with("communications_per_client", per_client)
        .with("coverage", coverage)
}

pub fn communication_coverage() -> Vec<FieldMap> {
    vec![
        comm("ГОРЗДРАВ", "Триггерная", "SMS", 1_204_551, 980_332, Some(Decimal::new(123, 2)), "25,8%"),
        comm("ГОРЗДРАВ", "Массовая", "EMAIL", 803_114, 770_002, Some(Decimal::new(104, 2)), "50,3%"),
        comm("366", "Триггерная", "PUSH", 120_400, 118_000, None, "6,9%"),
    ]
}

pub fn offer_coverage() -> Vec<FieldMap> {
    vec![
        FieldMap::new()
            .with("brand", "ГОРЗДРАВ")
            .with("offer_count", 2_550_120)
            .with("unique_clients_with_offer", 1_902_004)
            .with("offers_with_comm", 1_400_870)
            .with("unique_clients_with_offer_and_comm", 1_100_332)
            .with("available_base", 4_120_004)
            .with("offer_coverage", "46,2%")
            .with("offer_with_comm_coverage", "26,7%"),
        FieldMap::new()
            .with("brand", "366")
            .with("offer_count", 880_410)
            .with("unique_clients_with_offer", 702_118)
            .with("offers_with_comm", FieldValue::Null)
            .with("unique_clients_with_offer_and_comm", FieldValue::Null)
            .with("available_base", 1_877_650)
            .with("offer_coverage", "37,4%")
            .with("offer_with_comm_coverage", FieldValue::Null),
    ]
}

pub fn cascade_count() -> Vec<FieldMap> {
    vec![
        FieldMap::new()
            .with("MESSAGE_DESC", "СМС по каскаду")
            .with("GZ", 301_224)
            .with("366", 120_551)
            .with("total", 421_775),
        FieldMap::new()
            .with("MESSAGE_DESC", "ПУШ по каскаду")
            .with("GZ", 95_003)
            .with("366", 40_118)
            .with("total", 135_121),
    ]
}
