//! Label lookups for enumerated fields
//!
//! Sales are submitted with single-character codes for the payment method,
//! the partner and the invoiced flag. The stored tables hold the display
//! labels, so a code that is not recognized becomes [`UNKNOWN_LABEL`] instead
//! of blocking the write.

use std::fmt;

/// Placeholder label stored for unrecognized codes
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Label stored for invoiced records
pub const INVOICED_LABEL: &str = "Invoiced";

/// Label stored for records without an invoice
pub const NOT_INVOICED_LABEL: &str = "Not Invoiced";

/// Convert the invoiced flag into its stored label
pub fn invoiced_label(invoiced: bool) -> &'static str {
    if invoiced {
        INVOICED_LABEL
    } else {
        NOT_INVOICED_LABEL
    }
}

/// Interpret an invoiced code: `f` (for "factura") means invoiced, anything else does not
pub fn invoiced_from_code(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case("f")
}

/// How a sale was collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Debit,
    Credit,
}

impl PaymentMethod {
    /// All payment methods in form order
    pub fn all() -> &'static [PaymentMethod] {
        &[Self::Cash, Self::Transfer, Self::Debit, Self::Credit]
    }

    /// Single-character code used by the entry form
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cash => "e",
            Self::Transfer => "t",
            Self::Debit => "d",
            Self::Credit => "c",
        }
    }

    /// Label written to the sales table
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Transfer => "Transfer",
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }

    /// Look up a payment method by its code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(code))
    }

    /// Label for a code, or [`UNKNOWN_LABEL`]
    pub fn label_for_code(code: &str) -> &'static str {
        Self::from_code(code)
            .map(|m| m.label())
            .unwrap_or(UNKNOWN_LABEL)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Business partner credited with a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partner {
    Fernando,
    Ignacio,
}

impl Partner {
    /// All partners in form order
    pub fn all() -> &'static [Partner] {
        &[Self::Fernando, Self::Ignacio]
    }

    /// Single-character code used by the entry form
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fernando => "f",
            Self::Ignacio => "n",
        }
    }

    /// Label written to the sales table
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fernando => "Fernando",
            Self::Ignacio => "Ignacio (Nacho)",
        }
    }

    /// Look up a partner by code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.code().eq_ignore_ascii_case(code))
    }

    /// Label for a code, or [`UNKNOWN_LABEL`]
    pub fn label_for_code(code: &str) -> &'static str {
        Self::from_code(code)
            .map(|p| p.label())
            .unwrap_or(UNKNOWN_LABEL)
    }
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
