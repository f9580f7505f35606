// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! On-disk number and timestamp shapes. Whole numbers are written as JSON
//! integers and everything else as floats, and timestamps carry exactly
//! three fraction digits, so files written by earlier versions of the app
//! read and write back unchanged.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

/// `#[serde(with = "crate::wire::number")]`
pub mod number {
    use super::*;
    use serde::Deserializer;
    use serde::ser::Error;

    pub fn serialize<S: Serializer>(d: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        if d.fract().is_zero() {
            if let Some(i) = d.trunc().to_i64() {
                return s.serialize_i64(i);
            }
        }
        // Through the decimal text so the float is the nearest one to it.
        match d.normalize().to_string().parse::<f64>() {
            Ok(f) => s.serialize_f64(f),
            Err(_) => Err(S::Error::custom(format!("{} has no float form", d))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(d)
    }
}

/// Borrowing wrapper for hand-written `Serialize` impls.
pub struct Number<'a>(pub &'a Decimal);

impl Serialize for Number<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        number::serialize(self.0, s)
    }
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-11-05T10:00:00.000Z`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(d)
    }
}

pub mod opt_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => super::timestamp::serialize(t, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<DateTime<Utc>>::deserialize(d)
    }
}
