//! Validating service layer over the repositories.
//!
//! [`CrudService`] runs the base checks every entity shares (blank id,
//! existence, duplicates) and then hands over to a [`ServicePolicy`] for
//! entity-specific rules and post-mutation hooks. Callers go through the
//! services only; they never touch a store directly.

pub mod order;
pub mod product;

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::entity::{Customer, EntityKey, Identifiable, Order, Product};
use crate::error::{ButikError, Result};
use crate::repo::{CrudRepo, InMemoryRepo, OrderStore};

pub use order::OrderRules;
pub use product::ProductRules;

/// Entity-specific rules layered on top of the base checks.
///
/// `check_*` run after the base checks have passed; `after_*` run once the
/// repository call has succeeded.
pub trait ServicePolicy<T: Identifiable>: Send + Sync {
    fn check_create(&self, _entity: &T) -> Result<()> {
        Ok(())
    }

    fn check_update(&self, _entity: &T) -> Result<()> {
        Ok(())
    }

    fn after_create(&self, _entity: &T) {}

    fn after_update(&self, _entity: &T) {}

    fn after_delete(&self, _id: &T::Id) {}
}

/// Policy that adds nothing to the base checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPolicy;

impl<T: Identifiable> ServicePolicy<T> for NoPolicy {}

/// Validating front for one repository.
///
/// Mutations hold `writes` from the first check until the store call
/// returns, so two callers can never both pass a check that only one of
/// them may pass. Reads go straight to the repository.
pub struct CrudService<T, R, P = NoPolicy>
where
    T: Identifiable,
    R: CrudRepo<T> + ?Sized,
    P: ServicePolicy<T>,
{
    repo: Arc<R>,
    policy: P,
    writes: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

pub type CustomerService = CrudService<Customer, InMemoryRepo<Customer>>;
pub type ProductService = CrudService<Product, InMemoryRepo<Product>, ProductRules>;
pub type OrderService = CrudService<Order, OrderStore, OrderRules>;

impl<T, R> CrudService<T, R, NoPolicy>
where
    T: Identifiable,
    R: CrudRepo<T> + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_policy(repo, NoPolicy)
    }
}

impl<T, R, P> CrudService<T, R, P>
where
    T: Identifiable,
    R: CrudRepo<T> + ?Sized,
    P: ServicePolicy<T>,
{
    pub fn with_policy(repo: Arc<R>, policy: P) -> Self {
        Self {
            repo,
            policy,
            writes: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    // === Commands ===

    /// Stores a new entity. Fails on a blank id or an id already in use.
    pub fn create(&self, entity: T) -> Result<T> {
        {
            let _writes = self.writes.lock();
            self.validate_on_create(&entity)?;
            self.repo.create(entity.clone())?;
        }
        tracing::info!("{} created id={}", T::KIND, entity.id());
        self.policy.after_create(&entity);
        Ok(entity)
    }

    /// Replaces an existing entity. Fails on a blank or unknown id.
    pub fn update(&self, entity: T) -> Result<T> {
        {
            let _writes = self.writes.lock();
            self.validate_on_update(&entity)?;
            self.repo.update(entity.clone())?;
        }
        tracing::info!("{} updated id={}", T::KIND, entity.id());
        self.policy.after_update(&entity);
        Ok(entity)
    }

    pub fn delete(&self, id: &T::Id) -> Result<()> {
        {
            let _writes = self.writes.lock();
            self.validate_exists(id)?;
            self.repo.delete(id)?;
        }
        tracing::info!("{} deleted id={}", T::KIND, id);
        self.policy.after_delete(id);
        Ok(())
    }

    // === Queries ===

    pub fn get_all(&self) -> Result<Vec<T>> {
        self.repo.find_all()
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.repo.find_all()?.len())
    }

    /// Looks up an entity; absence is `Ok(None)`, never an error.
    pub fn find_optional_by_id(&self, id: &T::Id) -> Result<Option<T>> {
        require_id::<T>(id)?;
        self.repo.find_by_id(id)
    }

    /// Looks up an entity, failing with `NotFound` when it is absent.
    pub fn require_by_id(&self, id: &T::Id) -> Result<T> {
        self.find_optional_by_id(id)?
            .ok_or_else(|| not_found::<T>(id))
    }

    // === Validation ===

    fn validate_on_create(&self, entity: &T) -> Result<()> {
        let id = entity.id();
        require_id::<T>(id)?;
        if self.repo.find_by_id(id)?.is_some() {
            return Err(ButikError::duplicate(format!(
                "{} already exists: id={}",
                T::KIND,
                id
            )));
        }
        self.policy.check_create(entity)
    }

    fn validate_on_update(&self, entity: &T) -> Result<()> {
        self.validate_exists(entity.id())?;
        self.policy.check_update(entity)
    }

    fn validate_exists(&self, id: &T::Id) -> Result<()> {
        require_id::<T>(id)?;
        match self.repo.find_by_id(id)? {
            Some(_) => Ok(()),
            None => Err(not_found::<T>(id)),
        }
    }
}

fn require_id<T: Identifiable>(id: &T::Id) -> Result<()> {
    if id.is_blank() {
        return Err(ButikError::validation(format!("{} id must not be empty", T::KIND)));
    }
    Ok(())
}

fn not_found<T: Identifiable>(id: &T::Id) -> ButikError {
    ButikError::not_found(format!("{} not found: id={}", T::KIND, id))
}

/// The three shop services wired over fresh in-memory stores.
pub struct Services {
    pub customers: Arc<CustomerService>,
    pub products: Arc<ProductService>,
    pub orders: OrderService,
}

impl Services {
    pub fn in_memory() -> Self {
        let customers = Arc::new(CustomerService::new(Arc::new(InMemoryRepo::new())));
        let products = Arc::new(ProductService::with_policy(
            Arc::new(InMemoryRepo::new()),
            ProductRules,
        ));
        let orders = OrderService::with_collaborators(
            Arc::new(OrderStore::new()),
            Arc::clone(&products),
            Arc::clone(&customers),
        );
        Self {
            customers,
            products,
            orders,
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ErrorKind;

    fn customers() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryRepo::new()))
    }

    #[test]
    fn test_create_rejects_duplicate_id() {
        let service = customers();
        let alice = Customer::new("Alice", "Stockholm");
        service.create(alice.clone()).unwrap();

        let err = service.create(alice).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_update_and_delete_require_existing() {
        let service = customers();
        let ghost = Customer::new("Ghost", "Nowhere");

        assert_eq!(service.update(ghost.clone()).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(service.delete(ghost.id()).unwrap_err().kind(), ErrorKind::NotFound);
        // the lenient store would have upserted; the service must not
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_lookups() {
        let service = customers();
        let mut eva = service.create(Customer::new("Eva", "Västerås")).unwrap();

        assert_eq!(service.find_optional_by_id(&"nope".to_string()).unwrap(), None);
        assert_eq!(
            service.require_by_id(&"nope".to_string()).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.find_optional_by_id(&String::new()).unwrap_err().kind(),
            ErrorKind::Validation
        );

        eva.set_city("Uppsala");
        service.update(eva.clone()).unwrap();
        assert_eq!(service.require_by_id(eva.id()).unwrap().city(), "Uppsala");

        service.delete(eva.id()).unwrap();
        assert!(service.get_all().unwrap().is_empty());
    }

    #[derive(Default)]
    struct Counting {
        checks: AtomicUsize,
        hooks: AtomicUsize,
    }

    impl ServicePolicy<Customer> for Counting {
        fn check_create(&self, entity: &Customer) -> Result<()> {
            self.checks.fetch_add(1, Ordering::Relaxed);
            if entity.name().is_empty() {
                return Err(ButikError::validation("name must not be empty"));
            }
            Ok(())
        }

        fn after_create(&self, _entity: &Customer) {
            self.hooks.fetch_add(1, Ordering::Relaxed);
        }

        fn after_delete(&self, _id: &String) {
            self.hooks.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_policy_runs_after_base_checks() {
        let service: CrudService<Customer, InMemoryRepo<Customer>, Counting> =
            CrudService::with_policy(Arc::new(InMemoryRepo::new()), Counting::default());

        let jack = service.create(Customer::new("Jack", "Stockholm")).unwrap();
        // duplicate is caught by the base check, so the policy is not consulted
        assert_eq!(service.create(jack.clone()).unwrap_err().kind(), ErrorKind::Duplicate);
        assert_eq!(
            service.create(Customer::new("", "Lund")).unwrap_err().kind(),
            ErrorKind::Validation
        );
        service.delete(jack.id()).unwrap();

        assert_eq!(service.policy().checks.load(Ordering::Relaxed), 2);
        assert_eq!(service.policy().hooks.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_works_over_trait_object() {
        let repo: Arc<dyn CrudRepo<Customer>> = Arc::new(InMemoryRepo::new());
        let service: CrudService<Customer, dyn CrudRepo<Customer>> = CrudService::new(repo);
        let ivy = service.create(Customer::new("Ivy", "Gothenburg")).unwrap();
        assert!(service.find_optional_by_id(ivy.id()).unwrap().is_some());
    }
}
