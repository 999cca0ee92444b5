//! Menu storage backed by redb.

use super::owned::{OwnedRows, StoreOwned};
use super::tables::{MENUS, MENUS_BY_STORE};
use crate::models::store::Menu;
use redb::TableDefinition;

/// Accessor for menu rows and their store ownership index.
pub type MenuDb = OwnedRows<Menu>;

impl StoreOwned for Menu {
    const ROWS: TableDefinition<'static, &'static str, &'static [u8]> = MENUS;
    const BY_STORE: TableDefinition<'static, (&'static str, &'static str), ()> = MENUS_BY_STORE;
    const LABEL: &'static str = "Menu";

    fn id(&self) -> &str {
        &self.id
    }

    fn store_id(&self) -> &str {
        &self.store_id
    }
}
