use covmon_core::FieldMap;

pub const ADDRESSES: [&str; 3] = [
    "analytics@gorzdrav.example",
    "crm-team@apteka366.example",
    "monitoring@kalinafarm.example",
];

pub fn recipients() -> Vec<FieldMap> {
    ADDRESSES
        .iter()
        .map(|a| FieldMap::new().with("EMAIL", *a))
        .collect()
}
