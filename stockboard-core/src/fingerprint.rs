use std::fmt;

use blake3::Hasher;
use rust_decimal::Decimal;

use crate::{Document, Item, Payload};

/// BLAKE3 digest of a whole [`Document`].
///
/// Fingerprint = hash(dates_count || (date || times_count || (time || payload)*)*)
///
/// Every string is length-prefixed (8 bytes, big-endian) so adjacent fields
/// cannot run together. Map order is the `BTreeMap` key order and item order
/// is preserved, so structurally equal documents fingerprint equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Digest `doc`. Total and deterministic.
    #[must_use]
    pub fn of(doc: &Document) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(b"stockboard/document/v1");
        write_len(&mut hasher, doc.len());
        for (date, day) in doc {
            write_str(&mut hasher, date);
            write_len(&mut hasher, day.len());
            for (time, payload) in day {
                write_str(&mut hasher, time);
                write_payload(&mut hasher, payload);
            }
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        blake3::Hash::from_bytes(self.0).to_hex().to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

/// Whether `current` differs from the previously committed fingerprint.
///
/// Nothing committed yet counts as a change.
#[must_use]
pub fn has_changed(previous: Option<&Fingerprint>, current: &Fingerprint) -> bool {
    previous != Some(current)
}

fn write_len(hasher: &mut Hasher, len: usize) {
    hasher.update(&(len as u64).to_be_bytes());
}

fn write_str(hasher: &mut Hasher, s: &str) {
    write_len(hasher, s.len());
    hasher.update(s.as_bytes());
}

fn write_decimal(hasher: &mut Hasher, value: Option<&Decimal>) {
    match value {
        None => {
            hasher.update(&[0]);
        }
        Some(d) => {
            hasher.update(&[1]);
            // 100 and 100.00 are the same price
            write_str(hasher, &d.normalize().to_string());
        }
    }
}

fn write_payload(hasher: &mut Hasher, payload: &Payload) {
    write_len(hasher, payload.len());
    for (brand, items) in payload {
        write_str(hasher, brand);
        write_len(hasher, items.len());
        for item in items {
            write_item(hasher, item);
        }
    }
}

fn write_item(hasher: &mut Hasher, item: &Item) {
    write_str(hasher, &item.model);
    write_str(hasher, &item.ram_storage);
    write_str(hasher, &item.color);
    write_decimal(hasher, item.price.as_ref());
    write_decimal(hasher, item.online_price.as_ref());
    write_str(hasher, &item.stock);
    write_len(hasher, item.extra.len());
    for (key, value) in &item.extra {
        write_str(hasher, key);
        write_str(hasher, &value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DaySnapshots;
    use rust_decimal::Decimal;

    fn doc_with(item: Item) -> Document {
        let payload: Payload = [("iphone".to_string(), vec![item])].into_iter().collect();
        let day: DaySnapshots = [("10:00 AM".to_string(), payload)].into_iter().collect();
        [("2024-01-01".to_string(), day)].into_iter().collect()
    }

    #[test]
    fn empty_previous_counts_as_changed() {
        let fp = Fingerprint::of(&Document::new());
        assert!(has_changed(None, &fp));
        assert!(!has_changed(Some(&fp), &fp));
    }

    #[test]
    fn any_field_change_is_detected() {
        let base = Item::new("iPhone 15", "6/128", "Black", Some(Decimal::from(79_999)), None, "In Stock");
        let fp = Fingerprint::of(&doc_with(base.clone()));

        let mut stock = base.clone();
        stock.stock = "Out of Stock".into();
        assert_ne!(fp, Fingerprint::of(&doc_with(stock)));

        let mut online = base.clone();
        online.online_price = Some(Decimal::ZERO);
        assert_ne!(fp, Fingerprint::of(&doc_with(online)));

        let mut extra = base;
        extra.extra.insert("sku".into(), serde_json::json!("A1"));
        assert_ne!(fp, Fingerprint::of(&doc_with(extra)));
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let a = Item::new("ab", "c", "", None, None, "");
        let b = Item::new("a", "bc", "", None, None, "");
        assert_ne!(Fingerprint::of(&doc_with(a)), Fingerprint::of(&doc_with(b)));
    }

    #[test]
    fn scale_does_not_affect_price_digest() {
        let a = Item::new("m", "r", "c", Some(Decimal::new(100, 0)), None, "In Stock");
        let b = Item::new("m", "r", "c", Some(Decimal::new(10000, 2)), None, "In Stock");
        assert_eq!(Fingerprint::of(&doc_with(a)), Fingerprint::of(&doc_with(b)));
    }

    #[test]
    fn hex_is_64_chars() {
        let fp = Fingerprint::of(&Document::new());
        assert_eq!(fp.to_hex().len(), 64);
        assert_eq!(fp.to_string(), fp.to_hex());
    }
}
