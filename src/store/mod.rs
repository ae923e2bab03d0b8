//! In-memory storage for the storefront.
//!
//! Every table lives behind one [`RwLock`]. Reads share the lock; each
//! mutating operation holds the write guard from its first scan to its last
//! write, which is what keeps the one-default-per-user rule intact when
//! requests race.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;

use crate::{
    error::AppResult,
    models::{Address, Order, OrderItem, PaymentMethod, Product, User},
};

pub mod catalog;
pub mod identity;
pub mod orders;

pub use catalog::{ProductFilter, ProductSort};
pub use orders::NewOrder;

/// Rows keyed by an auto-incrementing id. Iteration follows id order, which
/// is also insertion order.
#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug)]
pub(crate) struct Tables {
    users: Table<User>,
    addresses: Table<Address>,
    payment_methods: Table<PaymentMethod>,
    products: Table<Product>,
    orders: Table<Order>,
    order_items: Table<OrderItem>,
}

/// Handle to the storefront data. Cloning is cheap and every clone sees the
/// same tables.
#[derive(Debug, Clone)]
pub struct Store {
    tables: Arc<RwLock<Tables>>,
}

impl Store {
    /// An empty store. See [`crate::seed`] for the demo data.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                users: Table::new(),
                addresses: Table::new(),
                payment_methods: Table::new(),
                products: Table::new(),
                orders: Table::new(),
                order_items: Table::new(),
            })),
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e).into())
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e).into())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
