// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Raw text input to validated drafts. Anything rejected here never
//! reaches the store.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BillDraft, FarmerDraft, SellTogetherDraft, SpendingDraft};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0} is too large")]
    TooLarge(&'static str),
    #[error("select at least one farmer")]
    NoFarmers,
}

/// Largest magnitude accepted for any numeric input. Every derived value
/// then stays well inside what `Decimal` can hold at two decimal places.
pub const MAX_INPUT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

fn required_number(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

/// Blank or unparsable input reads as zero.
pub fn number_or_zero(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

fn bounded(field: &'static str, v: Decimal) -> Result<(), ValidationError> {
    if v.abs() > MAX_INPUT {
        Err(ValidationError::TooLarge(field))
    } else {
        Ok(())
    }
}

fn non_negative(field: &'static str, v: Decimal) -> Result<(), ValidationError> {
    if v.is_sign_negative() && !v.is_zero() {
        return Err(ValidationError::Negative(field));
    }
    bounded(field, v)
}

fn non_empty(field: &'static str, s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct BillForm<'a> {
    pub description: &'a str,
    pub amount: &'a str,
    pub quantity: &'a str,
    pub rate: &'a str,
    pub tax: &'a str,
}

impl BillForm<'_> {
    pub fn parse(&self) -> Result<BillDraft, ValidationError> {
        let draft = BillDraft {
            id: None,
            description: self.description.trim().to_string(),
            amount: required_number("amount", self.amount)?,
            quantity: required_number("quantity", self.quantity)?,
            rate: required_number("rate", self.rate)?,
            tax: required_number("tax", self.tax)?,
            spendings: None,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SpendingForm<'a> {
    pub description: &'a str,
    pub amount: &'a str,
    pub quantity: &'a str,
    pub rate: &'a str,
    pub discount: &'a str,
}

impl SpendingForm<'_> {
    pub fn parse(&self) -> Result<SpendingDraft, ValidationError> {
        let draft = SpendingDraft {
            id: None,
            description: self.description.trim().to_string(),
            amount: required_number("amount", self.amount)?,
            quantity: required_number("quantity", self.quantity)?,
            rate: required_number("rate", self.rate)?,
            discount: required_number("discount", self.discount)?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Only the name is mandatory; the weight and price inputs fall back to zero.
#[derive(Debug, Default, Clone)]
pub struct FarmerForm<'a> {
    pub name: &'a str,
    pub bori: &'a str,
    pub bharti: &'a str,
    pub kad: &'a str,
    pub bhav: &'a str,
}

impl FarmerForm<'_> {
    pub fn parse(&self) -> Result<FarmerDraft, ValidationError> {
        let draft = FarmerDraft {
            id: None,
            name: self.name.trim().to_string(),
            bori: number_or_zero(self.bori),
            bharti: number_or_zero(self.bharti),
            kad: number_or_zero(self.kad),
            bhav: number_or_zero(self.bhav),
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SellTogetherForm<'a> {
    pub farmer_ids: &'a str,
    pub kul_rakam: &'a str,
    pub majuri: &'a str,
    pub bardan: &'a str,
    pub bhadu: &'a str,
    pub kharch: &'a str,
}

impl SellTogetherForm<'_> {
    /// `farmer_ids` is a comma separated list; entries that are not
    /// integers are skipped.
    pub fn parse(&self) -> Result<SellTogetherDraft, ValidationError> {
        let farmer_ids = self
            .farmer_ids
            .split(',')
            .filter_map(|s| s.trim().parse::<i64>().ok())
            .collect();
        let draft = SellTogetherDraft {
            id: None,
            farmer_ids,
            kul_rakam: number_or_zero(self.kul_rakam),
            majuri: number_or_zero(self.majuri),
            bardan: number_or_zero(self.bardan),
            bhadu: number_or_zero(self.bhadu),
            kharch: number_or_zero(self.kharch),
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl BillDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty("description", &self.description)?;
        non_negative("amount", self.amount)?;
        non_negative("quantity", self.quantity)?;
        non_negative("rate", self.rate)?;
        bounded("tax", self.tax)
    }
}

impl SpendingDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty("description", &self.description)?;
        non_negative("amount", self.amount)?;
        non_negative("quantity", self.quantity)?;
        non_negative("rate", self.rate)?;
        bounded("discount", self.discount)
    }
}

impl FarmerDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty("name", &self.name)?;
        bounded("bori", self.bori)?;
        bounded("bharti", self.bharti)?;
        bounded("kad", self.kad)?;
        bounded("bhav", self.bhav)
    }
}

impl SellTogetherDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.farmer_ids.is_empty() {
            return Err(ValidationError::NoFarmers);
        }
        bounded("kulRakam", self.kul_rakam)?;
        bounded("majuri", self.majuri)?;
        bounded("bardan", self.bardan)?;
        bounded("bhadu", self.bhadu)?;
        bounded("kharch", self.kharch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_form_rejects_blank_and_non_numeric() {
        let form = BillForm {
            description: "  ",
            amount: "10",
            quantity: "1",
            rate: "10",
            tax: "0",
        };
        assert_eq!(form.parse(), Err(ValidationError::Missing("description")));

        let form = BillForm {
            description: "Seeds",
            amount: "ten",
            quantity: "1",
            rate: "10",
            tax: "0",
        };
        assert!(matches!(
            form.parse(),
            Err(ValidationError::NotANumber { field: "amount", .. })
        ));

        let form = BillForm {
            description: "Seeds",
            amount: "10",
            quantity: "",
            rate: "10",
            tax: "0",
        };
        assert_eq!(form.parse(), Err(ValidationError::Missing("quantity")));
    }

    #[test]
    fn bill_form_trims_and_parses() {
        let draft = BillForm {
            description: " Seeds ",
            amount: " 12.50 ",
            quantity: "4",
            rate: "12.5",
            tax: "18",
        }
        .parse()
        .unwrap();
        assert_eq!(draft.description, "Seeds");
        assert_eq!(draft.amount.to_string(), "12.50");
        assert!(draft.spendings.is_none());
    }

    #[test]
    fn spending_form_rejects_negative_amount() {
        let form = SpendingForm {
            description: "Diesel",
            amount: "-5",
            quantity: "1",
            rate: "5",
            discount: "0",
        };
        assert_eq!(form.parse(), Err(ValidationError::Negative("amount")));
    }

    #[test]
    fn oversized_numbers_are_rejected() {
        let form = BillForm {
            description: "Seeds",
            amount: "1e20",
            quantity: "1",
            rate: "1",
            tax: "0",
        };
        assert_eq!(form.parse(), Err(ValidationError::TooLarge("amount")));

        let form = SpendingForm {
            description: "Diesel",
            amount: "5",
            quantity: "1",
            rate: "5",
            discount: "-100000001",
        };
        assert_eq!(form.parse(), Err(ValidationError::TooLarge("discount")));

        let form = FarmerForm {
            name: "Mahesh",
            bhav: "100000000",
            ..Default::default()
        };
        assert!(form.parse().is_ok());
        let form = FarmerForm {
            bhav: "100000000.01",
            ..form
        };
        assert_eq!(form.parse(), Err(ValidationError::TooLarge("bhav")));
    }

    #[test]
    fn farmer_form_defaults_numbers_to_zero() {
        let draft = FarmerForm {
            name: "Mahesh",
            bori: "abc",
            bharti: "",
            kad: "1",
            bhav: "20",
        }
        .parse()
        .unwrap();
        assert!(draft.bori.is_zero());
        assert!(draft.bharti.is_zero());
        assert_eq!(draft.kad, Decimal::ONE);

        let missing = FarmerForm {
            name: "",
            ..Default::default()
        };
        assert_eq!(missing.parse(), Err(ValidationError::Missing("name")));
    }

    #[test]
    fn sell_form_needs_farmers() {
        let form = SellTogetherForm {
            farmer_ids: " , x",
            kul_rakam: "100",
            ..Default::default()
        };
        assert_eq!(form.parse(), Err(ValidationError::NoFarmers));

        let draft = SellTogetherForm {
            farmer_ids: "3, 5,x",
            kul_rakam: "100",
            ..Default::default()
        }
        .parse()
        .unwrap();
        assert_eq!(draft.farmer_ids, vec![3, 5]);
        assert!(draft.majuri.is_zero());
    }
}
