//! Integration tests for the service layer wired the way the shell wires it.

use std::collections::BTreeMap;

use butik::{Category, Customer, ErrorKind, Identifiable, Order, Product, Services};

struct Shop {
    services: Services,
    c1: Customer,
    p1: Product,
    p2: Product,
}

/// C1 exists; P1 costs 10.0 and P2 costs 5.0.
fn shop() -> Shop {
    let services = Services::in_memory();
    let c1 = services
        .customers
        .create(Customer::new("Alice", "Stockholm"))
        .expect("create customer");
    let p1 = services
        .products
        .create(Product::new("Wireless Mouse", Category::Accessories, 10.0).unwrap())
        .expect("create product");
    let p2 = services
        .products
        .create(Product::new("Notebook Set", Category::Stationery, 5.0).unwrap())
        .expect("create product");
    Shop {
        services,
        c1,
        p1,
        p2,
    }
}

// ============================================================================
// Place order
// ============================================================================

mod place {
    use super::*;

    #[test]
    fn test_place_from_quantity_map() {
        let shop = shop();
        let items: BTreeMap<String, i64> =
            [(shop.p1.id().clone(), 2), (shop.p2.id().clone(), 1)].into_iter().collect();

        let order = shop.services.orders.place(shop.c1.id(), items).unwrap();

        assert_eq!(order.products().len(), 3);
        assert_eq!(order.quantity_of(shop.p1.id()), 2);
        assert_eq!(order.quantity_of(shop.p2.id()), 1);
        assert_eq!(order.total(), 25.0);
        assert_eq!(order.customer_id(), shop.c1.id());
    }

    #[test]
    fn test_place_for_missing_customer_names_it() {
        let shop = shop();
        let err = shop
            .services
            .orders
            .place("missing-customer", [(shop.p1.id().as_str(), 1)])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("missing-customer"));
    }

    #[test]
    fn test_failed_place_stores_nothing() {
        let shop = shop();
        let _ = shop
            .services
            .orders
            .place(shop.c1.id(), [(shop.p1.id().as_str(), 1), ("ghost", 1)]);

        assert_eq!(shop.services.orders.count().unwrap(), 0);
        assert!(shop
            .services
            .orders
            .orders_for_customer(shop.c1.id())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_placed_total_is_price_at_placement() {
        let shop = shop();
        let order = shop
            .services
            .orders
            .place(shop.c1.id(), [(shop.p1.id().as_str(), 1)])
            .unwrap();

        let mut repriced = shop.p1.clone();
        repriced.set_price(99.0).unwrap();
        shop.services.products.update(repriced).unwrap();

        let stored = shop.services.orders.require_by_id(order.id()).unwrap();
        assert_eq!(stored.total(), 10.0);
    }
}

// ============================================================================
// Create / update / delete through the order service
// ============================================================================

mod crud {
    use super::*;

    #[test]
    fn test_create_without_products_is_validation() {
        let shop = shop();
        for customer_id in [shop.c1.id().as_str(), "unknown"] {
            let err = shop
                .services
                .orders
                .create(Order::new(customer_id, Vec::new()))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_create_twice_is_duplicate() {
        let shop = shop();
        let order = Order::new(shop.c1.id().as_str(), vec![shop.p1.clone()]);
        shop.services.orders.create(order.clone()).unwrap();

        let err = shop.services.orders.create(order).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn test_reassign_through_service_requires_known_customer() {
        let shop = shop();
        let bob = shop
            .services
            .customers
            .create(Customer::new("Bob", "Gothenburg"))
            .unwrap();
        let mut order = shop
            .services
            .orders
            .place(shop.c1.id(), [(shop.p2.id().as_str(), 3)])
            .unwrap();

        order.set_customer_id("nobody");
        let err = shop.services.orders.update(order.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        order.set_customer_id(bob.id().as_str());
        shop.services.orders.update(order.clone()).unwrap();

        let orders = &shop.services.orders;
        assert!(orders.orders_for_customer(shop.c1.id()).unwrap().is_empty());
        assert_eq!(orders.orders_for_customer(bob.id()).unwrap(), vec![order.clone()]);
        assert_eq!(orders.repo().indexed_customers(), vec![bob.id().clone()]);
    }

    #[test]
    fn test_delete_then_lookup() {
        let shop = shop();
        let order = shop
            .services
            .orders
            .place(shop.c1.id(), [(shop.p1.id().as_str(), 1)])
            .unwrap();

        shop.services.orders.delete(order.id()).unwrap();

        assert_eq!(shop.services.orders.find_optional_by_id(order.id()).unwrap(), None);
        assert_eq!(
            shop.services.orders.delete(order.id()).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(shop.services.orders.repo().indexed_customers().is_empty());
    }
}

// ============================================================================
// Concurrent callers
// ============================================================================

mod concurrency {
    use std::sync::Barrier;
    use std::thread;

    use super::*;

    #[test]
    fn test_update_racing_delete_never_resurrects() {
        let services = Services::in_memory();
        let customers = &services.customers;

        for _ in 0..500 {
            let mut customer = customers.create(Customer::new("Dana", "Malmö")).unwrap();
            customer.set_city("Lund");
            let barrier = Barrier::new(2);

            let (updated, deleted) = thread::scope(|s| {
                let update = s.spawn(|| {
                    barrier.wait();
                    customers.update(customer.clone())
                });
                let delete = s.spawn(|| {
                    barrier.wait();
                    customers.delete(customer.id())
                });
                (update.join().unwrap(), delete.join().unwrap())
            });

            // either the update lands first and the delete removes it, or the
            // delete wins and the update reports NotFound
            assert!(deleted.is_ok());
            if let Err(err) = updated {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            assert_eq!(customers.find_optional_by_id(customer.id()).unwrap(), None);
        }
    }

    #[test]
    fn test_racing_creates_of_one_id_yield_one_duplicate() {
        let services = Services::in_memory();
        let products = &services.products;

        for _ in 0..500 {
            let tripod = Product::new("Tripod", Category::Photography, 69.0).unwrap();
            let barrier = Barrier::new(2);

            let results: Vec<_> = thread::scope(|s| {
                let handles: Vec<_> = (0..2)
                    .map(|_| {
                        s.spawn(|| {
                            barrier.wait();
                            products.create(tripod.clone())
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            let ok = results.iter().filter(|r| r.is_ok()).count();
            let duplicate = results
                .iter()
                .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::Duplicate))
                .count();
            assert_eq!((ok, duplicate), (1, 1));
        }
        assert_eq!(products.count().unwrap(), 500);
    }
}
