use rust_decimal::Decimal;
use stockboard_core::{DaySnapshots, Document, Item, Payload};

/// Date holding the richest fixture data; demos pin "today" to it.
pub const SAMPLE_TODAY: &str = "2024-05-10";

pub fn by_name(name: &str) -> Option<Document> {
    match name {
        "sample" => Some(sample()),
        "minimal" => Some(minimal()),
        "empty" => Some(Document::new()),
        _ => None,
    }
}

/// One date, one time, one iPhone row.
pub fn minimal() -> Document {
    doc(vec![(
        "2024-01-01",
        vec![(
            "10:00 AM",
            payload(vec![(
                "iphone",
                vec![item("X", "", "", Some(1000), None, "In Stock")],
            )]),
        )],
    )])
}

/// Three days of snapshots across several brands. 2024-05-11 is present
/// but empty.
pub fn sample() -> Document {
    doc(vec![
        (
            "2024-05-09",
            vec![
                (
                    "9:00 AM",
                    payload(vec![
                        (
                            "iphone",
                            vec![
                                item("iPhone 15", "6GB/128GB", "Black", Some(79_900), Some(72_999), "In Stock"),
                                item("iPhone 15 Pro", "8GB/256GB", "Natural Titanium", Some(144_900), None, "Out of Stock"),
                            ],
                        ),
                        (
                            "samsung",
                            vec![item("Galaxy S24", "8GB/256GB", "Onyx Black", Some(79_999), Some(74_999), "In Stock")],
                        ),
                    ]),
                ),
                (
                    "1:00 PM",
                    payload(vec![(
                        "iphone",
                        vec![item("iPhone 15", "6GB/128GB", "Black", Some(79_900), Some(71_999), "In Stock")],
                    )]),
                ),
            ],
        ),
        (
            "2024-05-10",
            vec![
                (
                    "9:15 AM",
                    payload(vec![(
                        "oneplus",
                        vec![item("OnePlus 12", "12GB/256GB", "Flowy Emerald", Some(64_999), Some(0), "In Stock")],
                    )]),
                ),
                (
                    "12:30 PM",
                    payload(vec![
                        (
                            "oneplus",
                            vec![
                                item("OnePlus 12", "12GB/256GB", "Flowy Emerald", Some(64_999), Some(62_999), "In Stock"),
                                item("OnePlus 12R", "8GB/128GB", "Cool Blue", Some(39_999), None, "Out of Stock"),
                            ],
                        ),
                        (
                            "nothing",
                            vec![item("Phone (2a)", "8GB/128GB", "White", Some(23_999), Some(22_499), "In Stock")],
                        ),
                        (
                            "nokia",
                            vec![item("G42 5G", "6GB/128GB", "So Purple", None, None, "")],
                        ),
                    ]),
                ),
                (
                    "10:00 AM",
                    payload(vec![(
                        "oneplus",
                        vec![item("OnePlus 12", "12GB/256GB", "Flowy Emerald", Some(64_999), Some(63_499), "In Stock")],
                    )]),
                ),
            ],
        ),
        ("2024-05-11", Vec::new()),
    ])
}

fn item(
    model: &str,
    ram_storage: &str,
    color: &str,
    price: Option<i64>,
    online_price: Option<i64>,
    stock: &str,
) -> Item {
    Item::new(
        model,
        ram_storage,
        color,
        price.map(Decimal::from),
        online_price.map(Decimal::from),
        stock,
    )
}

fn payload(brands: Vec<(&str, Vec<Item>)>) -> Payload {
    brands
        .into_iter()
        .map(|(brand, items)| (brand.to_string(), items))
        .collect()
}

fn doc(days: Vec<(&str, Vec<(&str, Payload)>)>) -> Document {
    days.into_iter()
        .map(|(date, times)| {
            let day: DaySnapshots = times
                .into_iter()
                .map(|(time, payload)| (time.to_string(), payload))
                .collect();
            (date.to_string(), day)
        })
        .collect()
}
