//! Sale model
//!
//! One row of the sales history table.

use chrono::NaiveDate;

use super::labels::{invoiced_label, Partner, PaymentMethod};
use super::record::{format_date, RawRow, Record, RowRejection};
use super::Money;

/// Columns of the sales table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleColumn {
    Date,
    Amount,
    PaymentMethod,
    Invoiced,
    Partner,
}

impl SaleColumn {
    /// Header text of the column
    pub fn header(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Amount => "Amount",
            Self::PaymentMethod => "Payment Method",
            Self::Invoiced => "Invoiced",
            Self::Partner => "Partner",
        }
    }
}

/// A recorded sale
///
/// Enumerated fields hold the stored labels rather than typed values so that
/// rows written by older revisions (or with the `Unknown` placeholder) survive
/// a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    /// Sale date; `None` when the stored value could not be parsed
    pub date: Option<NaiveDate>,
    pub amount: Money,
    pub payment_method: String,
    pub invoiced: String,
    pub partner: String,
}

impl Sale {
    /// Build a sale from form input, translating codes into labels
    pub fn from_input(input: &NewSale) -> Self {
        Self {
            date: Some(input.date),
            amount: input.amount,
            payment_method: PaymentMethod::label_for_code(&input.payment_method_code).to_string(),
            invoiced: invoiced_label(input.invoiced).to_string(),
            partner: Partner::label_for_code(&input.partner_code).to_string(),
        }
    }
}

impl Record for Sale {
    type Column = SaleColumn;

    const NAME: &'static str = "sales";

    const HEADERS: &'static [&'static str] =
        &["Date", "Amount", "Payment Method", "Invoiced", "Partner"];

    const AMOUNT_HEADER: &'static str = "Amount";

    fn amount(&self) -> Money {
        self.amount
    }

    fn value(&self, column: SaleColumn) -> String {
        match column {
            SaleColumn::Date => format_date(self.date),
            SaleColumn::Amount => self.amount.to_plain_string(),
            SaleColumn::PaymentMethod => self.payment_method.clone(),
            SaleColumn::Invoiced => self.invoiced.clone(),
            SaleColumn::Partner => self.partner.clone(),
        }
    }

    fn from_row(row: &RawRow<'_>) -> Result<Self, RowRejection> {
        if row.is_blank() {
            return Err(RowRejection::Blank);
        }

        Ok(Self {
            date: row.date(SaleColumn::Date.header()),
            amount: row.amount(Self::AMOUNT_HEADER)?,
            payment_method: row.text(SaleColumn::PaymentMethod.header()),
            invoiced: row.text(SaleColumn::Invoiced.header()),
            partner: row.text(SaleColumn::Partner.header()),
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            format_date(self.date),
            self.amount.to_plain_string(),
            self.payment_method.clone(),
            self.invoiced.clone(),
            self.partner.clone(),
        ]
    }
}

/// Fields submitted for a new sale
#[derive(Debug, Clone)]
pub struct NewSale {
    pub date: NaiveDate,
    pub amount: Money,
    /// Payment method code (`e`, `t`, `d`, `c`)
    pub payment_method_code: String,
    pub invoiced: bool,
    /// Partner code (`f`, `n`)
    pub partner_code: String,
}

impl NewSale {
    /// Check the submitted fields before anything is written
    pub fn validate(&self) -> Result<(), SaleValidationError> {
        if !self.amount.is_positive() {
            return Err(SaleValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

/// Validation errors for new sales
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleValidationError {
    NonPositiveAmount(Money),
}

impl std::fmt::Display for SaleValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Sale amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for SaleValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::labels::UNKNOWN_LABEL;
    use csv::StringRecord;

    fn new_sale(amount: Money) -> NewSale {
        NewSale {
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            amount,
            payment_method_code: "t".into(),
            invoiced: true,
            partner_code: "f".into(),
        }
    }

    #[test]
    fn test_from_input_applies_labels() {
        let sale = Sale::from_input(&new_sale(Money::from_cents(15000)));
        assert_eq!(sale.payment_method, "Transfer");
        assert_eq!(sale.invoiced, "Invoiced");
        assert_eq!(sale.partner, "Fernando");
    }

    #[test]
    fn test_unknown_codes_become_placeholder() {
        let mut input = new_sale(Money::from_cents(100));
        input.payment_method_code = "q".into();
        input.partner_code = "".into();

        let sale = Sale::from_input(&input);
        assert_eq!(sale.payment_method, UNKNOWN_LABEL);
        assert_eq!(sale.partner, UNKNOWN_LABEL);
    }

    #[test]
    fn test_validate_amount() {
        assert!(new_sale(Money::from_cents(1)).validate().is_ok());
        assert!(new_sale(Money::zero()).validate().is_err());
        assert!(new_sale(Money::from_cents(-500)).validate().is_err());
    }

    #[test]
    fn test_from_row_keeps_unparsable_date() {
        let headers: Vec<String> = Sale::HEADERS.iter().map(|h| h.to_string()).collect();
        let values = StringRecord::from(vec!["not a date", "99.9", "Cash", "Invoiced", "Fernando"]);

        let sale = Sale::from_row(&RawRow::new(&headers, &values)).unwrap();
        assert_eq!(sale.date, None);
        assert_eq!(sale.amount, Money::parse("99.9").unwrap());
        assert_eq!(sale.to_row()[0], "");
        assert_eq!(sale.to_row()[1], "99.90");
    }
}
