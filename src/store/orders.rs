use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    dto::orders::{CartItemInput, OrderWithItems},
    error::AppResult,
    models::{Order, OrderItem, OrderStatus, ShippingAddress},
    pricing::{OrderTotals, to_cents},
    store::{Store, Table},
};

/// Days between placing an order and its estimated delivery.
pub const DELIVERY_ESTIMATE_DAYS: i64 = 5;

/// Checkout snapshot handed to [`Store::create_order`].
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<i64>,
    pub shipping_address: ShippingAddress,
    pub billing_address: Option<ShippingAddress>,
    pub payment_method: String,
    pub items: Vec<CartItemInput>,
}

impl Store {
    /// Persists an order and its items in one step. Totals, order number and
    /// delivery estimate are derived here; item names, prices and images are
    /// stored exactly as given.
    pub fn create_order(&self, new_order: NewOrder) -> AppResult<OrderWithItems> {
        self.create_order_at(new_order, Utc::now())
    }

    pub(crate) fn create_order_at(
        &self,
        new_order: NewOrder,
        created_at: DateTime<Utc>,
    ) -> AppResult<OrderWithItems> {
        let totals = OrderTotals::from_lines(
            new_order
                .items
                .iter()
                .map(|item| (item.price, item.quantity)),
        )?;

        let mut tables = self.write()?;
        let order_id = tables.orders.allocate_id();
        let order = Order {
            id: order_id,
            user_id: new_order.user_id,
            order_number: unused_order_number(&tables.orders),
            status: OrderStatus::Processing,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            tax: totals.tax,
            total: totals.total,
            shipping_address: new_order.shipping_address,
            billing_address: new_order.billing_address,
            payment_method: new_order.payment_method,
            estimated_delivery_date: created_at + Duration::days(DELIVERY_ESTIMATE_DAYS),
            delivered_at: None,
            created_at,
        };
        tables.orders.rows.insert(order_id, order.clone());

        let mut items = Vec::with_capacity(new_order.items.len());
        for line in new_order.items {
            let id = tables.order_items.allocate_id();
            let item = OrderItem {
                id,
                order_id,
                product_id: line.product_id,
                name: line.name,
                price: to_cents(line.price),
                quantity: line.quantity,
                size: line.size,
                color: line.color,
                image_url: line.image_url,
            };
            tables.order_items.rows.insert(id, item.clone());
            items.push(item);
        }

        Ok(OrderWithItems { order, items })
    }

    /// Orders in creation order, optionally limited to one user.
    pub fn list_orders(&self, user_id: Option<i64>) -> AppResult<Vec<Order>> {
        Ok(self
            .read()?
            .orders
            .rows
            .values()
            .filter(|order| user_id.is_none_or(|id| order.user_id == Some(id)))
            .cloned()
            .collect())
    }

    pub fn get_order(&self, id: i64) -> AppResult<Option<Order>> {
        Ok(self.read()?.orders.rows.get(&id).cloned())
    }

    pub fn get_order_items(&self, order_id: i64) -> AppResult<Vec<OrderItem>> {
        Ok(self
            .read()?
            .order_items
            .rows
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }

    pub fn get_order_with_items(&self, id: i64) -> AppResult<Option<OrderWithItems>> {
        let tables = self.read()?;
        let Some(order) = tables.orders.rows.get(&id).cloned() else {
            return Ok(None);
        };
        let items = tables
            .order_items
            .rows
            .values()
            .filter(|item| item.order_id == id)
            .cloned()
            .collect();
        Ok(Some(OrderWithItems { order, items }))
    }

    /// Latest order by creation time; the higher id wins a tie.
    pub fn get_most_recent_order(&self, user_id: Option<i64>) -> AppResult<Option<OrderWithItems>> {
        let latest = {
            let tables = self.read()?;
            tables
                .orders
                .rows
                .values()
                .filter(|order| user_id.is_none_or(|id| order.user_id == Some(id)))
                .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
                .map(|order| order.id)
        };
        match latest {
            Some(id) => self.get_order_with_items(id),
            None => Ok(None),
        }
    }

    /// Sets the status with no transition rules. `delivered_at` is stamped
    /// when an order first becomes delivered.
    pub fn update_order_status(&self, id: i64, status: OrderStatus) -> AppResult<Option<Order>> {
        let mut tables = self.write()?;
        let Some(order) = tables.orders.rows.get_mut(&id) else {
            return Ok(None);
        };
        if status == OrderStatus::Delivered && order.status != OrderStatus::Delivered {
            order.delivered_at = Some(Utc::now());
        }
        order.status = status;
        Ok(Some(order.clone()))
    }
}

fn unused_order_number(orders: &Table<Order>) -> String {
    loop {
        let candidate = build_order_number(Uuid::new_v4());
        if !orders
            .rows
            .values()
            .any(|order| order.order_number == candidate)
        {
            return candidate;
        }
        tracing::debug!(order_number = %candidate, "order number collision, retrying");
    }
}

fn build_order_number(seed: Uuid) -> String {
    let hex = seed.simple().to_string();
    format!("T{}", hex[..5].to_ascii_uppercase())
}
