//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// pending → confirmed → preparing → ready → dispatched → delivered;
/// any non-terminal status may move to rejected. Delivered and
/// rejected are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Dispatched,
    Delivered,
    Rejected,
}

impl OrderStatus {
    /// Display priority for the orders board.
    ///
    /// Lower ranks surface first: fresh orders need staff attention
    /// before orders already moving through the kitchen.
    pub fn priority_rank(&self) -> u8 {
        match self {
            Self::Pending | Self::Confirmed => 0,
            Self::Preparing => 1,
            Self::Ready => 2,
            Self::Dispatched => 3,
            Self::Delivered => 4,
            Self::Rejected => 5,
        }
    }

    /// Whether this status admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected)
    }

    /// Legal status transitions, without the approval/transfer gates.
    ///
    /// Gates are checked separately by the transition actions so that
    /// a gate violation reports UnauthorizedTransition rather than
    /// InvalidTransition.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if next == Self::Rejected {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Preparing)
                | (Self::Confirmed, Self::Preparing)
                | (Self::Preparing, Self::Ready)
                | (Self::Ready, Self::Dispatched)
                | (Self::Dispatched, Self::Delivered)
        )
    }

    /// Spanish display label (customer-facing app language)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Confirmed => "Confirmado",
            Self::Preparing => "En Preparación",
            Self::Ready => "Listo",
            Self::Dispatched => "Despachado",
            Self::Delivered => "Entregado",
            Self::Rejected => "Rechazado",
        }
    }

    /// Badge color for the orders board
    pub fn color(&self) -> &'static str {
        match self {
            Self::Pending => "#9CA3AF",
            Self::Confirmed => "#3B82F6",
            Self::Preparing => "#F59E0B",
            Self::Ready => "#10B981",
            Self::Dispatched => "#8B5CF6",
            Self::Delivered => "#22C55E",
            Self::Rejected => "#EF4444",
        }
    }
}

/// Board filter tabs. `Pending` covers both pending and confirmed,
/// matching what branch staff treat as "received".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Preparing,
    Ready,
    Dispatched,
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => {
                matches!(status, OrderStatus::Pending | OrderStatus::Confirmed)
            }
            Self::Preparing => status == OrderStatus::Preparing,
            Self::Ready => status == OrderStatus::Ready,
            Self::Dispatched => status == OrderStatus::Dispatched,
        }
    }
}

/// Payment method selected at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    /// Bank transfer - requires admin authorization of the receipt
    Transfer,
}

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: i32,
    /// Unit price in currency unit
    pub price: f64,
}

impl OrderItem {
    /// Line total as a precise decimal
    pub fn line_total(&self) -> Decimal {
        let price = Decimal::from_f64(self.price).unwrap_or_default();
        price * Decimal::from(self.quantity)
    }
}

/// Order entity as stored in the document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Display id shown to staff and customers (e.g. "FC-20260830-1042")
    pub order_number: String,
    pub branch_id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_type: DeliveryType,
    pub items: Vec<OrderItem>,
    /// Total in currency unit, 2-decimal precision
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Reference to the uploaded transfer receipt image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
    pub transfer_authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_authorized_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_authorized_at: Option<DateTime<Utc>>,
    pub admin_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_approved_at: Option<DateTime<Utc>>,
    /// Assigned delivery agent. Set iff the order was dispatched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Whether a branch is allowed to progress this order.
    ///
    /// Transfer orders are blocked until the receipt is authorized,
    /// and every order needs head-office approval first.
    pub fn branch_can_process(&self) -> bool {
        let transfer_ok =
            self.payment_method != PaymentMethod::Transfer || self.transfer_authorized;
        transfer_ok && self.admin_approved
    }

    /// Check that `total` matches the item lines (2-decimal rounding).
    ///
    /// The source system never validated this; the store checks it on
    /// ingestion so a corrupt checkout cannot slip onto the board.
    pub fn verify_total(&self) -> bool {
        let sum: Decimal = self.items.iter().map(|i| i.line_total()).sum();
        let total = Decimal::from_f64(self.total).unwrap_or_default();
        sum.round_dp(2) == total.round_dp(2)
    }
}
