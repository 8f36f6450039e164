use covmon_core::{FieldMap, FieldValue};

fn metric(name: &str, counters: [Option<i64>; 6]) -> FieldMap {
    let [gz_sms, gz_email, a_sms, a_email, kf_sms, kf_email] = counters;
    FieldMap::new()
        .with("METRIC_NAME", name)
        .with("GZ_SMS", gz_sms)
        .with("GZ_EMAIL", gz_email)
        .with("366_SMS", a_sms)
        .with("366_EMAIL", a_email)
        .with("KF_SMS", kf_sms)
        .with("KF_EMAIL", kf_email)
}

pub fn offer_info() -> Vec<FieldMap> {
    vec![
        metric(
            "Офферные коммуникации",
            [Some(1_120_004), Some(640_118), Some(402_556), Some(210_004), Some(31_002), None],
        ),
        metric(
            "Информационные коммуникации",
            [Some(804_331), Some(1_002_874), Some(250_110), Some(330_019), Some(12_440), Some(9_870)],
        ),
        FieldMap::new()
            .with("METRIC_NAME", "Всего")
            .with("GZ_SMS", 1_924_335)
            .with("GZ_EMAIL", 1_642_992)
            .with("366_SMS", 652_666)
            .with("366_EMAIL", 540_023)
            .with("KF_SMS", 43_442)
            .with("KF_EMAIL", FieldValue::Null),
    ]
}
