//! Wire shapes exchanged with the order service.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use orderdesk_core::{ClientId, OrderId, ProductId, SellerId, round_price};

use crate::draft::DraftOrder;

/// One line of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(rename = "productoId")]
    pub product_id: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    /// Rounded to 2 decimals.
    #[serde(rename = "precioUnitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// Body of `POST /pedidos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedOrder {
    #[serde(rename = "clienteId")]
    pub client_id: ClientId,
    /// Serialized as `null` when unassigned.
    #[serde(rename = "vendedorId")]
    pub seller_id: Option<SellerId>,
    #[serde(rename = "notas")]
    pub notes: String,
    #[serde(rename = "detalles")]
    pub details: Vec<OrderDetail>,
}

impl SubmittedOrder {
    /// Shape a draft whose client has already been checked.
    pub(crate) fn from_draft(draft: &DraftOrder, client_id: ClientId) -> Self {
        Self {
            client_id,
            seller_id: draft.seller_id(),
            notes: draft.notes().to_string(),
            details: draft
                .line_items()
                .iter()
                .map(|line| OrderDetail {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price: round_price(line.price),
                })
                .collect(),
        }
    }
}

/// Order lifecycle as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "EN_PROCESO")]
    InProgress,
    #[serde(rename = "ENTREGADO")]
    Delivered,
    #[serde(rename = "CANCELADO")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Label shown next to an order.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::InProgress => "En Proceso",
            OrderStatus::Delivered => "Entregado",
            OrderStatus::Cancelled => "Cancelado",
            OrderStatus::Unknown => "Desconocido",
        }
    }
}

/// Response of `POST /pedidos`.
///
/// Only `id` is required; fields this crate does not model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
    #[serde(
        rename = "numeroPedido",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,
    #[serde(
        rename = "estado",
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<OrderStatus>,
    #[serde(
        rename = "fechaPedido",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub placed_at: Option<NaiveDateTime>,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "lenient_total",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreatedOrder {
    /// Order number for display, falling back to `#<id>`.
    pub fn display_number(&self) -> String {
        self.number
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

// The order already exists once the service answers; fields in shapes we do
// not model decode as `None` instead of failing the response.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<OrderStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| OrderStatus::deserialize(v).ok()))
}

fn lenient_total<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.to_string().parse().ok(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<NaiveDateTime>().ok()))
}
