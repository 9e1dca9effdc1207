//! Order aggregate: a guest order together with its owned lines.
//!
//! An order and its lines form one consistency unit; the total is computed
//! from line subtotals at assembly time so the invariant
//! `total_amount == sum(quantity × unit_price)` holds by construction.
//! Line unit prices are captured at order time, never live-linked to the
//! current product price.

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::domain::catalog::NAME_MAX_LEN;

/// Validation failures for order placement.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum OrderValidationError {
    /// Guest name was missing or blank once trimmed.
    #[error("guest name must not be empty")]
    EmptyGuestName,
    /// Guest name exceeds [`NAME_MAX_LEN`] characters.
    #[error("guest name must be at most {NAME_MAX_LEN} characters")]
    GuestNameTooLong,
    /// Guest email is not a well-formed address.
    #[error("guest email must be a well-formed address")]
    MalformedEmail,
    /// A line's quantity must be strictly positive.
    #[error("line {index}: quantity must be greater than zero")]
    NonPositiveQuantity { index: usize },
}

impl OrderValidationError {
    /// The input field the failure refers to, for error payloads.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyGuestName | Self::GuestNameTooLong => "guestName",
            Self::MalformedEmail => "guestEmail",
            Self::NonPositiveQuantity { .. } => "quantities",
        }
    }
}

/// One submitted order line: a product reference with quantity and the unit
/// price quoted to the guest.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineSubmission {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// Raw order submission, validated before assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub guest_name: String,
    pub guest_email: String,
    pub lines: Vec<OrderLineSubmission>,
}

impl OrderDraft {
    /// Check guest fields and per-line invariants.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        let name = self.guest_name.trim();
        if name.is_empty() {
            return Err(OrderValidationError::EmptyGuestName);
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(OrderValidationError::GuestNameTooLong);
        }
        if !is_well_formed_email(&self.guest_email) {
            return Err(OrderValidationError::MalformedEmail);
        }
        for (index, line) in self.lines.iter().enumerate() {
            if line.quantity <= 0 {
                return Err(OrderValidationError::NonPositiveQuantity { index });
            }
        }
        Ok(())
    }
}

/// Minimal well-formedness check: exactly one `@` with non-empty sides and
/// no whitespace. Deliverability is not the domain's concern.
pub fn is_well_formed_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = raw.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

/// A placed guest order. Hard-deleted on removal, never soft-deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    /// Stored normalized to UTC.
    pub order_date: DateTime<Utc>,
    pub total_amount: BigDecimal,
}

/// One persisted line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Price captured at order time.
    pub unit_price: BigDecimal,
}

impl OrderLine {
    /// `quantity × unit_price`, exact decimal arithmetic.
    pub fn subtotal(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

impl Order {
    /// Assemble an order and its lines from already-resolved submissions,
    /// computing the total as the sum of line subtotals.
    pub fn assemble(
        guest_name: String,
        guest_email: String,
        order_date: DateTime<Utc>,
        lines: Vec<OrderLineSubmission>,
    ) -> (Self, Vec<OrderLine>) {
        let order_id = Uuid::new_v4();
        let lines: Vec<OrderLine> = lines
            .into_iter()
            .map(|line| OrderLine {
                id: Uuid::new_v4(),
                order_id,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();
        let total_amount = lines
            .iter()
            .fold(BigDecimal::zero(), |total, line| total + line.subtotal());
        (
            Self {
                id: order_id,
                guest_name: guest_name.trim().to_owned(),
                guest_email,
                order_date,
                total_amount,
            },
            lines,
        )
    }
}

/// An order line joined with its referenced product, fully materialized for
/// read models (no lazy loading).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineDetail {
    pub line: OrderLine,
    /// Name of the referenced product; `None` only if the product row is
    /// gone, which the soft-delete lifecycle rules out in practice.
    pub product_name: Option<String>,
}

/// An order together with its owned lines.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAggregate {
    pub order: Order,
    pub lines: Vec<OrderLineDetail>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn submission(quantity: i32, unit_price: &str) -> OrderLineSubmission {
        OrderLineSubmission {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price: BigDecimal::from_str(unit_price).expect("test price"),
        }
    }

    #[rstest]
    #[case("a@b.example", true)]
    #[case("guest@example.com", true)]
    #[case("", false)]
    #[case("no-at-sign", false)]
    #[case("@example.com", false)]
    #[case("guest@", false)]
    #[case("two@@example.com", false)]
    #[case("spaced name@example.com", false)]
    fn email_well_formedness(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_well_formed_email(raw), expected);
    }

    #[rstest]
    fn draft_rejects_blank_guest_name() {
        let draft = OrderDraft {
            guest_name: "  ".to_owned(),
            guest_email: "guest@example.com".to_owned(),
            lines: vec![],
        };
        assert_eq!(
            draft.validate(),
            Err(OrderValidationError::EmptyGuestName)
        );
    }

    #[rstest]
    fn draft_rejects_malformed_email() {
        let draft = OrderDraft {
            guest_name: "Guest".to_owned(),
            guest_email: "not-an-email".to_owned(),
            lines: vec![],
        };
        let err = draft.validate().expect_err("email rejected");
        assert_eq!(err, OrderValidationError::MalformedEmail);
        assert_eq!(err.field(), "guestEmail");
    }

    #[rstest]
    #[case(0)]
    #[case(-2)]
    fn draft_rejects_non_positive_quantity(#[case] quantity: i32) {
        let draft = OrderDraft {
            guest_name: "Guest".to_owned(),
            guest_email: "guest@example.com".to_owned(),
            lines: vec![submission(1, "2.00"), submission(quantity, "2.00")],
        };
        assert_eq!(
            draft.validate(),
            Err(OrderValidationError::NonPositiveQuantity { index: 1 })
        );
    }

    #[rstest]
    fn assemble_computes_exact_total() {
        let (order, lines) = Order::assemble(
            "Guest".to_owned(),
            "guest@example.com".to_owned(),
            Utc::now(),
            vec![submission(2, "9.99"), submission(3, "1.25")],
        );
        assert_eq!(
            order.total_amount,
            BigDecimal::from_str("23.73").expect("total")
        );
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.order_id == order.id));
    }

    #[rstest]
    fn assemble_with_no_lines_totals_zero() {
        let (order, lines) = Order::assemble(
            "Guest".to_owned(),
            "guest@example.com".to_owned(),
            Utc::now(),
            vec![],
        );
        assert_eq!(order.total_amount, BigDecimal::zero());
        assert!(lines.is_empty());
    }

    #[rstest]
    fn subtotal_multiplies_quantity_and_price() {
        let (_, lines) = Order::assemble(
            "Guest".to_owned(),
            "guest@example.com".to_owned(),
            Utc::now(),
            vec![submission(2, "9.99")],
        );
        let line = lines.first().expect("one line");
        assert_eq!(line.quantity, 2);
        assert_eq!(
            line.subtotal(),
            BigDecimal::from_str("19.98").expect("subtotal")
        );
    }
}
