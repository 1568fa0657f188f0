use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, OrderId, ProductId, UserId};

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "unknown order status '{other}' (expected one of: pending, processing, shipped, delivered, cancelled)"
            ))),
        }
    }
}

/// A customer order. Owned by exactly one user, its creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_lenient_about_case_and_spelling() {
        assert_eq!("Cancelled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert_eq!(" canceled ".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert_eq!("SHIPPED".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        assert!(matches!(
            "teleported".parse::<OrderStatus>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn new_orders_start_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn order_serializes_status_lowercase() {
        let order = Order {
            id: OrderId::from_raw(5),
            user_id: UserId::from_raw(1),
            product_id: ProductId::from_raw(3),
            status: OrderStatus::Processing,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "processing");
        assert_eq!(json["id"], 5);
    }
}
