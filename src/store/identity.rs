use chrono::Utc;

use crate::{
    dto::{
        addresses::{CreateAddressRequest, UpdateAddressRequest},
        auth::RegisterRequest,
        payment_methods::{CreatePaymentMethodRequest, UpdatePaymentMethodRequest, last_four},
        users::UpdateProfileRequest,
    },
    error::{AppError, AppResult},
    models::{Address, PaymentMethod, User},
    store::{Store, Table},
};

/// Records that carry a per-user default flag.
trait Defaultable {
    fn owner(&self) -> i64;
    fn is_default(&self) -> bool;
    fn set_default(&mut self, value: bool);
}

impl Defaultable for Address {
    fn owner(&self) -> i64 {
        self.user_id
    }
    fn is_default(&self) -> bool {
        self.is_default
    }
    fn set_default(&mut self, value: bool) {
        self.is_default = value;
    }
}

impl Defaultable for PaymentMethod {
    fn owner(&self) -> i64 {
        self.user_id
    }
    fn is_default(&self) -> bool {
        self.is_default
    }
    fn set_default(&mut self, value: bool) {
        self.is_default = value;
    }
}

/// Clears the default flag on every record `user_id` owns, except `keep`.
/// Returns how many records were demoted.
fn demote_defaults<T: Defaultable>(
    table: &mut Table<T>,
    user_id: i64,
    keep: Option<i64>,
) -> usize {
    let mut demoted = 0;
    for (id, record) in table.rows.iter_mut() {
        if record.owner() == user_id && record.is_default() && Some(*id) != keep {
            record.set_default(false);
            demoted += 1;
        }
    }
    demoted
}

fn owned_by<T: Defaultable + Clone>(table: &Table<T>, user_id: i64) -> Vec<T> {
    table
        .rows
        .values()
        .filter(|record| record.owner() == user_id)
        .cloned()
        .collect()
}

/// Looks up `id` for a mutation on behalf of `user_id`. `Ok(None)` when it
/// does not exist, `Forbidden` when someone else owns it.
fn owned_mut<T: Defaultable>(
    table: &mut Table<T>,
    id: i64,
    user_id: i64,
) -> AppResult<Option<&mut T>> {
    match table.rows.get_mut(&id) {
        None => Ok(None),
        Some(record) if record.owner() != user_id => Err(AppError::Forbidden),
        Some(record) => Ok(Some(record)),
    }
}

fn delete_owned<T: Defaultable>(table: &mut Table<T>, id: i64, user_id: i64) -> AppResult<bool> {
    if owned_mut(table, id, user_id)?.is_none() {
        return Ok(false);
    }
    Ok(table.rows.remove(&id).is_some())
}

impl Store {
    pub fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.read()?.users.rows.get(&id).cloned())
    }

    pub fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    pub fn create_user(&self, payload: RegisterRequest) -> AppResult<User> {
        let mut tables = self.write()?;
        if tables
            .users
            .rows
            .values()
            .any(|user| user.username == payload.username)
        {
            return Err(AppError::BadRequest("Username already exists".into()));
        }

        let id = tables.users.allocate_id();
        let user = User {
            id,
            username: payload.username,
            password: payload.password,
            email: payload.email,
            name: None,
            phone: None,
            created_at: Utc::now(),
        };
        tables.users.rows.insert(id, user.clone());
        Ok(user)
    }

    pub fn update_user(
        &self,
        id: i64,
        payload: UpdateProfileRequest,
    ) -> AppResult<Option<User>> {
        let mut tables = self.write()?;
        let Some(user) = tables.users.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = payload.name {
            user.name = Some(name);
        }
        if let Some(email) = payload.email {
            user.email = Some(email);
        }
        if let Some(phone) = payload.phone {
            user.phone = Some(phone);
        }
        Ok(Some(user.clone()))
    }

    pub fn list_addresses(&self, user_id: i64) -> AppResult<Vec<Address>> {
        Ok(owned_by(&self.read()?.addresses, user_id))
    }

    pub fn get_address(&self, id: i64) -> AppResult<Option<Address>> {
        Ok(self.read()?.addresses.rows.get(&id).cloned())
    }

    pub fn create_address(
        &self,
        user_id: i64,
        payload: CreateAddressRequest,
    ) -> AppResult<Address> {
        let mut tables = self.write()?;
        if payload.is_default {
            let demoted = demote_defaults(&mut tables.addresses, user_id, None);
            tracing::debug!(user_id, demoted, "cleared previous default address");
        }

        let id = tables.addresses.allocate_id();
        let address = Address {
            id,
            user_id,
            address_name: payload.address_name,
            is_default: payload.is_default,
            first_name: payload.first_name,
            last_name: payload.last_name,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            zip_code: payload.zip_code,
            country: payload.country,
            phone: payload.phone,
            created_at: Utc::now(),
        };
        tables.addresses.rows.insert(id, address.clone());
        Ok(address)
    }

    pub fn update_address(
        &self,
        id: i64,
        user_id: i64,
        payload: UpdateAddressRequest,
    ) -> AppResult<Option<Address>> {
        let mut tables = self.write()?;
        if owned_mut(&mut tables.addresses, id, user_id)?.is_none() {
            return Ok(None);
        }
        if payload.is_default == Some(true) {
            let demoted = demote_defaults(&mut tables.addresses, user_id, Some(id));
            tracing::debug!(user_id, demoted, "cleared previous default address");
        }

        let Some(address) = tables.addresses.rows.get_mut(&id) else {
            return Ok(None);
        };
        payload.apply(address);
        Ok(Some(address.clone()))
    }

    /// Removing the default address leaves the user with no default.
    pub fn delete_address(&self, id: i64, user_id: i64) -> AppResult<bool> {
        delete_owned(&mut self.write()?.addresses, id, user_id)
    }

    pub fn list_payment_methods(&self, user_id: i64) -> AppResult<Vec<PaymentMethod>> {
        Ok(owned_by(&self.read()?.payment_methods, user_id))
    }

    pub fn get_payment_method(&self, id: i64) -> AppResult<Option<PaymentMethod>> {
        Ok(self.read()?.payment_methods.rows.get(&id).cloned())
    }

    pub fn create_payment_method(
        &self,
        user_id: i64,
        payload: CreatePaymentMethodRequest,
    ) -> AppResult<PaymentMethod> {
        let card_number = last_four(&payload.card_number)?;
        let mut tables = self.write()?;
        if payload.is_default {
            let demoted = demote_defaults(&mut tables.payment_methods, user_id, None);
            tracing::debug!(user_id, demoted, "cleared previous default payment method");
        }

        let id = tables.payment_methods.allocate_id();
        let method = PaymentMethod {
            id,
            user_id,
            card_name: payload.card_name,
            cardholder_name: payload.cardholder_name,
            card_number,
            card_type: payload.card_type,
            expiry_month: payload.expiry_month,
            expiry_year: payload.expiry_year,
            is_default: payload.is_default,
            created_at: Utc::now(),
        };
        tables.payment_methods.rows.insert(id, method.clone());
        Ok(method)
    }

    pub fn update_payment_method(
        &self,
        id: i64,
        user_id: i64,
        mut payload: UpdatePaymentMethodRequest,
    ) -> AppResult<Option<PaymentMethod>> {
        payload.card_number = payload.card_number.as_deref().map(last_four).transpose()?;
        let mut tables = self.write()?;
        if owned_mut(&mut tables.payment_methods, id, user_id)?.is_none() {
            return Ok(None);
        }
        if payload.is_default == Some(true) {
            let demoted = demote_defaults(&mut tables.payment_methods, user_id, Some(id));
            tracing::debug!(user_id, demoted, "cleared previous default payment method");
        }

        let Some(method) = tables.payment_methods.rows.get_mut(&id) else {
            return Ok(None);
        };
        payload.apply(method);
        Ok(Some(method.clone()))
    }

    pub fn delete_payment_method(&self, id: i64, user_id: i64) -> AppResult<bool> {
        delete_owned(&mut self.write()?.payment_methods, id, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home(name: &str, is_default: bool) -> CreateAddressRequest {
        CreateAddressRequest {
            address_name: name.to_string(),
            is_default,
            first_name: "Test".into(),
            last_name: "User".into(),
            address: "123 Test Street".into(),
            city: "Test City".into(),
            state: "TS".into(),
            zip_code: "12345".into(),
            country: "Testland".into(),
            phone: "555-123-4567".into(),
        }
    }

    fn card(name: &str, is_default: bool) -> CreatePaymentMethodRequest {
        CreatePaymentMethodRequest {
            card_name: name.to_string(),
            cardholder_name: "Test User".into(),
            card_number: "4234".into(),
            card_type: "visa".into(),
            expiry_month: "12".into(),
            expiry_year: "2030".into(),
            is_default,
        }
    }

    fn default_count<T: Defaultable>(records: &[T]) -> usize {
        records.iter().filter(|r| r.is_default()).count()
    }

    #[test]
    fn new_default_address_demotes_the_old_one() {
        let store = Store::new();
        let a1 = store.create_address(1, home("A1", true)).unwrap();
        let a2 = store.create_address(1, home("A2", true)).unwrap();

        assert!(!store.get_address(a1.id).unwrap().unwrap().is_default);
        assert!(store.get_address(a2.id).unwrap().unwrap().is_default);

        assert!(store.delete_address(a2.id, 1).unwrap());
        let remaining = store.list_addresses(1).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(default_count(&remaining), 0);
    }

    #[test]
    fn defaults_are_scoped_per_user() {
        let store = Store::new();
        let mine = store.create_address(1, home("Mine", true)).unwrap();
        store.create_address(2, home("Theirs", true)).unwrap();

        assert!(store.get_address(mine.id).unwrap().unwrap().is_default);
        assert_eq!(default_count(&store.list_addresses(2).unwrap()), 1);
    }

    #[test]
    fn update_to_default_demotes_siblings() {
        let store = Store::new();
        let home_addr = store.create_address(1, home("Home", true)).unwrap();
        let work = store.create_address(1, home("Work", false)).unwrap();

        let updated = store
            .update_address(
                work.id,
                1,
                UpdateAddressRequest {
                    is_default: Some(true),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert!(updated.is_default);
        assert!(!store.get_address(home_addr.id).unwrap().unwrap().is_default);
        assert_eq!(default_count(&store.list_addresses(1).unwrap()), 1);
    }

    #[test]
    fn clearing_default_does_not_cascade() {
        let store = Store::new();
        let home_addr = store.create_address(1, home("Home", true)).unwrap();
        let work = store.create_address(1, home("Work", false)).unwrap();

        store
            .update_address(
                home_addr.id,
                1,
                UpdateAddressRequest {
                    is_default: Some(false),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        let addresses = store.list_addresses(1).unwrap();
        assert_eq!(default_count(&addresses), 0);
        assert!(!store.get_address(work.id).unwrap().unwrap().is_default);
    }

    #[test]
    fn repeating_an_update_leaves_siblings_alone() {
        let store = Store::new();
        let home_addr = store.create_address(1, home("Home", true)).unwrap();
        let work = store.create_address(1, home("Work", false)).unwrap();

        let same = UpdateAddressRequest {
            city: Some("Test City".into()),
            is_default: Some(true),
            ..Default::default()
        };
        store.update_address(home_addr.id, 1, same.clone()).unwrap();
        store.update_address(home_addr.id, 1, same).unwrap();

        assert!(store.get_address(home_addr.id).unwrap().unwrap().is_default);
        assert!(!store.get_address(work.id).unwrap().unwrap().is_default);
    }

    #[test]
    fn missing_and_foreign_addresses() {
        let store = Store::new();
        let theirs = store.create_address(2, home("Theirs", false)).unwrap();

        assert!(
            store
                .update_address(42, 1, UpdateAddressRequest::default())
                .unwrap()
                .is_none()
        );
        assert!(!store.delete_address(42, 1).unwrap());
        assert!(matches!(
            store.delete_address(theirs.id, 1),
            Err(AppError::Forbidden)
        ));
        assert!(store.get_address(theirs.id).unwrap().is_some());
    }

    #[test]
    fn payment_methods_keep_one_default() {
        let store = Store::new();
        let visa = store.create_payment_method(1, card("Visa", true)).unwrap();
        let master = store.create_payment_method(1, card("Master", false)).unwrap();
        let amex = store.create_payment_method(1, card("Amex", true)).unwrap();

        let methods = store.list_payment_methods(1).unwrap();
        assert_eq!(default_count(&methods), 1);
        assert!(store.get_payment_method(amex.id).unwrap().unwrap().is_default);

        store
            .update_payment_method(
                master.id,
                1,
                UpdatePaymentMethodRequest {
                    is_default: Some(true),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        let methods = store.list_payment_methods(1).unwrap();
        assert_eq!(default_count(&methods), 1);
        assert!(!store.get_payment_method(visa.id).unwrap().unwrap().is_default);
        assert!(store.get_payment_method(master.id).unwrap().unwrap().is_default);

        assert!(store.delete_payment_method(master.id, 1).unwrap());
        assert_eq!(default_count(&store.list_payment_methods(1).unwrap()), 0);
    }

    #[test]
    fn store_keeps_only_the_last_four_digits() {
        let store = Store::new();
        let mut full = card("Visa", false);
        full.card_number = "4111 1111 1111 9012".into();
        let stored = store.create_payment_method(1, full).unwrap();
        assert_eq!(stored.card_number, "9012");

        let updated = store
            .update_payment_method(
                stored.id,
                1,
                UpdatePaymentMethodRequest {
                    card_number: Some("5500-0000-0000-3456".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.card_number, "3456");

        let mut garbage = card("Bad", true);
        garbage.card_number = "12".into();
        assert!(matches!(
            store.create_payment_method(1, garbage),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(store.list_payment_methods(1).unwrap(), vec![updated]);
    }

    #[test]
    fn ids_increment_per_table() {
        let store = Store::new();
        let a = store.create_address(1, home("A", false)).unwrap();
        let p = store.create_payment_method(1, card("P", false)).unwrap();
        let b = store.create_address(1, home("B", false)).unwrap();
        assert_eq!((a.id, b.id, p.id), (1, 2, 1));
    }

    #[test]
    fn usernames_are_unique() {
        let store = Store::new();
        let request = || RegisterRequest {
            username: "ferris".into(),
            password: "crab".into(),
            email: None,
        };
        store.create_user(request()).unwrap();
        assert!(matches!(
            store.create_user(request()),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn profile_update_merges() {
        let store = Store::new();
        let user = store
            .create_user(RegisterRequest {
                username: "ferris".into(),
                password: "crab".into(),
                email: Some("ferris@example.com".into()),
            })
            .unwrap();
        let updated = store
            .update_user(
                user.id,
                UpdateProfileRequest {
                    name: Some("Ferris".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Ferris"));
        assert_eq!(updated.email.as_deref(), Some("ferris@example.com"));
        assert!(store.update_user(99, UpdateProfileRequest::default()).unwrap().is_none());
    }
}
