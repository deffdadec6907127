//! Cart Store

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    cart::Cart,
    items::LineItem,
    selector::TicketSelector,
    storage::{Storage, StorageError},
};

/// Storage key of the persisted cart.
pub const CART_KEY: &str = "cart";

/// Persists the cart after every mutation.
#[derive(Debug, Clone)]
pub struct CartStore {
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Create a store over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Restores the persisted cart.
    ///
    /// A missing, unreadable or malformed record yields an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(error) => {
                warn!(%error, "failed to read stored cart, starting empty");
                return Cart::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, "stored cart is malformed, starting empty");
            Cart::new()
        })
    }

    /// Overwrites the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be encoded or written.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart).map_err(|source| StorageError::Encode {
            key: CART_KEY.to_string(),
            source,
        })?;

        self.storage.set(CART_KEY, &raw)?;

        debug!(lines = cart.len(), "cart saved");

        Ok(())
    }

    /// Deletes the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CART_KEY)
    }

    /// Merges `items` into `cart` and persists the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be saved; `cart` keeps the merge.
    pub fn add_items(
        &self,
        cart: &mut Cart,
        items: impl IntoIterator<Item = LineItem>,
    ) -> Result<(), StorageError> {
        cart.add_items(items);

        self.save(cart)
    }

    /// Sets the quantity of the line at `index` and persists the result.
    ///
    /// Returns `Ok(false)` without writing when the update is rejected (see
    /// [`Cart::update_quantity`]).
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be saved.
    pub fn update_quantity(
        &self,
        cart: &mut Cart,
        index: usize,
        quantity: i64,
    ) -> Result<bool, StorageError> {
        if !cart.update_quantity(index, quantity) {
            debug!(index, quantity, "quantity update ignored");
            return Ok(false);
        }

        self.save(cart)?;

        Ok(true)
    }

    /// Removes the line at `index` and persists the remainder.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be saved.
    pub fn remove_item(
        &self,
        cart: &mut Cart,
        index: usize,
    ) -> Result<Option<LineItem>, StorageError> {
        let Some(removed) = cart.remove_item(index) else {
            return Ok(None);
        };

        self.save(cart)?;

        Ok(Some(removed))
    }

    /// Adds every positive selection of `selector` to `cart`.
    ///
    /// Returns the number of lines submitted. Nothing is written when no
    /// ticket type has a positive quantity.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be saved.
    pub fn add_selection(
        &self,
        cart: &mut Cart,
        selector: &TicketSelector,
    ) -> Result<usize, StorageError> {
        let items = selector.line_items();

        if items.is_empty() {
            return Ok(0);
        }

        let submitted = items.len();

        self.add_items(cart, items)?;

        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::{Decimal, dec};
    use testresult::TestResult;

    use crate::{
        catalog::{Event, EventId, TicketType, TicketTypeId},
        pricing::line_total,
        storage::MemoryStorage,
        stores::test_support::ReadOnlyStorage,
        users::UserId,
    };

    use super::*;

    fn line(ticket: u64, price: Decimal, quantity: u32) -> LineItem {
        LineItem {
            event_id: EventId::new(1),
            event_name: "Festival".to_string(),
            ticket_type_id: TicketTypeId::new(ticket),
            ticket_name: format!("Ticket {ticket}"),
            price,
            quantity,
            total_price: line_total(price, quantity).unwrap_or_default(),
        }
    }

    fn store() -> (Arc<MemoryStorage>, CartStore) {
        let storage = Arc::new(MemoryStorage::new());

        (storage.clone(), CartStore::new(storage))
    }

    #[test]
    fn load_without_record_is_empty() {
        let (_, store) = store();

        assert!(store.load().is_empty());
    }

    #[test]
    fn load_malformed_record_is_empty() {
        let store = CartStore::new(Arc::new(MemoryStorage::with_value(CART_KEY, "{not json")));

        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() -> TestResult {
        let (_, store) = store();
        let cart = Cart::with_items([line(1, dec!(10), 2), line(2, dec!(7.5), 1)]);

        store.save(&cart)?;

        assert_eq!(store.load(), cart);

        Ok(())
    }

    #[test]
    fn add_items_persists_merge() -> TestResult {
        let (_, store) = store();
        let mut cart = store.load();

        store.add_items(&mut cart, [line(1, dec!(10), 2)])?;
        store.add_items(&mut cart, [line(1, dec!(10), 3)])?;

        let reloaded = store.load();

        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.total(), dec!(50));

        Ok(())
    }

    #[test]
    fn rejected_update_does_not_write() -> TestResult {
        let cart = Cart::with_items([line(1, dec!(10), 2)]);
        let raw = serde_json::to_string(&cart)?;
        let store = CartStore::new(Arc::new(ReadOnlyStorage { value: Some(raw) }));
        let mut cart = store.load();

        assert!(!store.update_quantity(&mut cart, 0, 0)?);
        assert!(store.remove_item(&mut cart, 3)?.is_none());

        Ok(())
    }

    #[test]
    fn accepted_update_persists() -> TestResult {
        let (_, store) = store();
        let mut cart = Cart::with_items([line(1, dec!(10), 2)]);

        assert!(store.update_quantity(&mut cart, 0, 4)?);
        assert_eq!(store.load().total(), dec!(40));

        Ok(())
    }

    #[test]
    fn remove_item_persists_remainder() -> TestResult {
        let (_, store) = store();
        let mut cart = Cart::with_items([line(1, dec!(10), 2), line(2, dec!(5), 1)]);

        let removed = store.remove_item(&mut cart, 0)?;

        assert_eq!(removed.map(|i| i.ticket_type_id), Some(TicketTypeId::new(1)));
        assert_eq!(store.load().len(), 1);

        Ok(())
    }

    #[test]
    fn write_failure_is_reported_and_cart_keeps_mutation() {
        let store = CartStore::new(Arc::new(ReadOnlyStorage::default()));
        let mut cart = Cart::new();

        let result = store.add_items(&mut cart, [line(1, dec!(10), 1)]);

        assert!(matches!(result, Err(StorageError::Io { .. })), "got {result:?}");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn clear_removes_record() -> TestResult {
        let (storage, store) = store();

        store.save(&Cart::with_items([line(1, dec!(10), 1)]))?;
        store.clear()?;

        assert_eq!(storage.get(CART_KEY)?, None);

        Ok(())
    }

    #[test]
    fn empty_selection_is_not_written() -> TestResult {
        let store = CartStore::new(Arc::new(ReadOnlyStorage::default()));
        let event = Event {
            id: EventId::new(1),
            name: "Festival".to_string(),
            description: String::new(),
            local: String::new(),
            date: "2025-03-25".to_string(),
            capacity: 10,
            price: dec!(10),
            category_id: None,
            organizer: UserId::new(1),
            category: None,
            ticket_types: Vec::new(),
        };
        let ticket_type = TicketType {
            id: TicketTypeId::new(1),
            name: "Pista".to_string(),
            description: String::new(),
            price: dec!(10),
            capacity: 10,
            event_id: event.id,
        };
        let selector = TicketSelector::new(&event, vec![ticket_type]);
        let mut cart = Cart::new();

        assert_eq!(store.add_selection(&mut cart, &selector)?, 0);
        assert!(cart.is_empty());

        Ok(())
    }
}
