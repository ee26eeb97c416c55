use serde::{Deserialize, Serialize};

// ============================================================================
// Domain Models
// ============================================================================

/// An order aggregate: one `orders` row plus its `items` rows.
///
/// Identifiers are caller-assigned. Status is an open vocabulary; no enum is
/// enforced at this layer or in the schema.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub id: String,
    pub status: String,
    pub total: f64,
    pub currency_unit: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// A line item belonging to exactly one order. The owning order is tracked
/// as the `order_id` column in storage, not as a field here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub id: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
}

// ============================================================================
// List Filter
// ============================================================================

/// Predicate restricting which orders a list operation returns.
/// The only recognized field is an optional exact-match status.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
}

impl OrderFilter {
    pub fn by_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
        }
    }

    /// Effective status predicate. Absent and empty string both mean
    /// "no filter, return all orders".
    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
