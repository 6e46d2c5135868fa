//! In-memory loan roster used by the assistant's status answers.

use plms_core::LoanId;
use serde::{Deserialize, Serialize};

/// Text shown when a loan has no installment due.
pub const NO_EMI_DUE: &str = "No EMI due";

/// A loan as shown in the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Loan identifier.
    pub id: LoanId,
    /// Human-readable status, e.g. "Active" or "Under Review".
    pub status: String,
    /// Next installment description, when one is due.
    pub emi_due: Option<String>,
}

impl LoanRecord {
    /// Creates a loan record.
    #[must_use]
    pub fn new(id: &str, status: impl Into<String>, emi_due: Option<&str>) -> Self {
        Self {
            id: LoanId::new(id),
            status: status.into(),
            emi_due: emi_due.map(str::to_string),
        }
    }

    /// The installment line, falling back to [`NO_EMI_DUE`].
    #[must_use]
    pub fn emi_label(&self) -> &str {
        self.emi_due.as_deref().unwrap_or(NO_EMI_DUE)
    }
}

/// Fixed set of loans and required documents the assistant answers from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRoster {
    loans: Vec<LoanRecord>,
    required_documents: Vec<String>,
}

impl LoanRoster {
    /// Creates a roster.
    #[must_use]
    pub fn new(loans: Vec<LoanRecord>, required_documents: Vec<String>) -> Self {
        Self {
            loans,
            required_documents,
        }
    }

    /// The roster shipped with the widget.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(
            vec![
                LoanRecord::new("LN12345", "Active", Some("₹12,500 due on May 10, 2025")),
                LoanRecord::new("LN67890", "Under Review", None),
            ],
            [
                "PAN Card",
                "Aadhar Card",
                "Bank Statement (last 6 months)",
                "Salary Slips (last 3 months)",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        )
    }

    /// All loans, in roster order.
    #[must_use]
    pub fn loans(&self) -> &[LoanRecord] {
        &self.loans
    }

    /// Documents an applicant must provide.
    #[must_use]
    pub fn required_documents(&self) -> &[String] {
        &self.required_documents
    }

    /// Looks up a loan by id.
    #[must_use]
    pub fn find(&self, id: &LoanId) -> Option<&LoanRecord> {
        self.loans.iter().find(|loan| &loan.id == id)
    }
}
