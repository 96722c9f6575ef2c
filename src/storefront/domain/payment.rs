//! Payment rows and monetary amounts.

use super::{
    BelongsTo, Customer, CustomerId, Entity, EntityDraft, EntityKind, ParseAmountError,
    PaymentId, Reference, Staff, StaffId, StorefrontDomainError, text,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A non-negative amount of money held as integer cents, at most
/// [`Amount::MAX_CENTS`] so it fits the `numeric(5,2)` column.
///
/// Serialises as a decimal string (`"4.99"`) and accepts either a string or
/// a JSON number on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// Largest storable amount, `999.99`.
    pub const MAX_CENTS: i64 = 99_999;

    /// Creates an amount from cents.
    ///
    /// # Errors
    ///
    /// Returns [`ParseAmountError::Negative`] when `cents` is below zero and
    /// [`ParseAmountError::OutOfRange`] when it exceeds [`Self::MAX_CENTS`].
    pub fn from_cents(cents: i64) -> Result<Self, ParseAmountError> {
        if cents < 0 {
            return Err(ParseAmountError::Negative(cents));
        }
        if cents > Self::MAX_CENTS {
            return Err(ParseAmountError::OutOfRange(cents.to_string()));
        }
        Ok(Self(cents))
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0.div_euclid(100), self.0.rem_euclid(100))
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let malformed = || ParseAmountError::Malformed(value.to_owned());
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let digits_only = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !digits_only(whole)
            || !digits_only(fraction)
            || fraction.len() > 2
        {
            return Err(malformed());
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(|| ParseAmountError::OutOfRange(value.to_owned()))?
        };
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| malformed())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| malformed())?,
        };

        whole_cents
            .checked_add(fraction_cents)
            .filter(|cents| *cents <= Self::MAX_CENTS)
            .map(Self)
            .ok_or_else(|| ParseAmountError::OutOfRange(value.to_owned()))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text,
            Repr::Number(number) => number.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Card fields recorded alongside a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card number (`cc_number`).
    #[serde(default)]
    pub cc_number: Option<String>,
    /// Expiration (`cc_expiration`).
    #[serde(default)]
    pub cc_expiration: Option<String>,
    /// Verification code (`cc_cvv`).
    #[serde(default)]
    pub cc_cvv: Option<String>,
}

/// A row of the `payment` table. Each payment belongs to one customer and
/// one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    id: PaymentId,
    amount: Amount,
    customer_id: CustomerId,
    staff_id: StaffId,
    rental_id: Option<i32>,
    #[serde(flatten)]
    card: CardDetails,
    payment_date: DateTime<Utc>,
}

/// Fields supplied when creating or revising a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDraft {
    /// Amount paid.
    pub amount: Amount,
    /// Paying customer.
    pub customer_id: CustomerId,
    /// Staff member who took the payment.
    pub staff_id: StaffId,
    /// Rental the payment settles, if any.
    #[serde(default)]
    pub rental_id: Option<i32>,
    /// Card fields.
    #[serde(flatten)]
    pub card: CardDetails,
    /// When the payment was made; defaults to the creation time.
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
}

impl PaymentDraft {
    /// Creates a draft paid now, without card fields or rental.
    #[must_use]
    pub fn new(amount: Amount, customer_id: CustomerId, staff_id: StaffId) -> Self {
        Self {
            amount,
            customer_id,
            staff_id,
            rental_id: None,
            card: CardDetails::default(),
            payment_date: None,
        }
    }

    /// Sets the payment date.
    #[must_use]
    pub const fn paid_at(mut self, payment_date: DateTime<Utc>) -> Self {
        self.payment_date = Some(payment_date);
        self
    }
}

impl EntityDraft for PaymentDraft {
    fn normalised(self) -> Result<Self, StorefrontDomainError> {
        let amount = Amount::from_cents(self.amount.cents())?;
        Ok(Self {
            amount,
            card: CardDetails {
                cc_number: text::optional(self.card.cc_number),
                cc_expiration: text::optional(self.card.cc_expiration),
                cc_cvv: text::optional(self.card.cc_cvv),
            },
            ..self
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::to(EntityKind::Customer, self.customer_id),
            Reference::to(EntityKind::Staff, self.staff_id),
        ]
    }
}

impl Payment {
    /// Reconstructs a payment from persisted storage.
    #[must_use]
    pub fn from_persisted(id: PaymentId, fields: PaymentDraft, payment_date: DateTime<Utc>) -> Self {
        Self::from_draft(
            id,
            PaymentDraft {
                payment_date: Some(payment_date),
                ..fields
            },
            payment_date,
        )
    }

    /// Returns the amount paid.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Returns the paying customer key.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the staff key.
    #[must_use]
    pub const fn staff_id(&self) -> StaffId {
        self.staff_id
    }

    /// Returns the rental key, if any.
    #[must_use]
    pub const fn rental_id(&self) -> Option<i32> {
        self.rental_id
    }

    /// Returns the card fields.
    #[must_use]
    pub const fn card(&self) -> &CardDetails {
        &self.card
    }

    /// Returns when the payment was made.
    #[must_use]
    pub const fn payment_date(&self) -> DateTime<Utc> {
        self.payment_date
    }
}

impl Entity for Payment {
    type Id = PaymentId;
    type Draft = PaymentDraft;

    const KIND: EntityKind = EntityKind::Payment;

    fn id(&self) -> PaymentId {
        self.id
    }

    fn from_draft(id: PaymentId, draft: PaymentDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: draft.amount,
            customer_id: draft.customer_id,
            staff_id: draft.staff_id,
            rental_id: draft.rental_id,
            card: draft.card,
            payment_date: draft.payment_date.unwrap_or(now),
        }
    }

    fn revise(&mut self, draft: PaymentDraft, _now: DateTime<Utc>) {
        let payment_date = draft.payment_date.unwrap_or(self.payment_date);
        *self = Self::from_draft(self.id, draft, payment_date);
    }

    fn recency(&self) -> DateTime<Utc> {
        self.payment_date
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::to(EntityKind::Customer, self.customer_id),
            Reference::to(EntityKind::Staff, self.staff_id),
        ]
    }
}

impl BelongsTo<Customer> for Payment {
    fn parent_id(&self) -> CustomerId {
        self.customer_id
    }
}

impl BelongsTo<Staff> for Payment {
    fn parent_id(&self) -> StaffId {
        self.staff_id
    }
}
