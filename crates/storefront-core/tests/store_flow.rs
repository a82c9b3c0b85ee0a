use storefront_core::{
    Action, CatalogAction, FavoritesAction, FilterAction, Product, Rating, SortBy, Store,
};

fn create_test_product(id: u64, title: &str, category: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/{}.jpg", id),
        description: format!("{} description", title),
        rating: Some(Rating {
            rate: 4.1,
            count: 259,
        }),
    }
}

fn catalog() -> Vec<Product> {
    vec![
        create_test_product(1, "Smart Phone", "electronics", 599.99),
        create_test_product(2, "Laptop", "electronics", 999.99),
        create_test_product(3, "Shirt", "clothing", 19.99),
    ]
}

fn visible_ids(store: &Store) -> Vec<u64> {
    store.visible_products().iter().map(|p| p.id).collect()
}

#[test]
fn test_browse_filter_and_reset() {
    let mut store = Store::new();
    store.dispatch(CatalogAction::ProductsRequested);
    assert!(store.visible_products().is_empty());

    store.dispatch(CatalogAction::ProductsLoaded(Ok(catalog())));
    assert_eq!(visible_ids(&store), vec![1, 2, 3]);

    store.dispatch(FilterAction::SetSelectedCategory("electronics".to_string()));
    store.dispatch(FilterAction::SetSortBy(SortBy::PriceAscending));
    assert_eq!(visible_ids(&store), vec![1, 2]);

    store.dispatch(FilterAction::SetSortBy(SortBy::PriceDescending));
    assert_eq!(visible_ids(&store), vec![2, 1]);

    store.dispatch(FilterAction::SetSearchQuery("SHIRT".to_string()));
    assert!(store.visible_products().is_empty());

    assert!(store.filters().is_active());
    store.dispatch(FilterAction::Reset);
    assert!(!store.filters().is_active());
    assert_eq!(store.filters().sort_by(), SortBy::None);
    assert_eq!(visible_ids(&store), vec![1, 2, 3]);
}

#[test]
fn test_intermediate_search_queries_all_satisfy_the_contract() {
    let mut store = Store::new();
    store.dispatch(CatalogAction::ProductsLoaded(Ok(catalog())));

    // Whatever the debounce lets through, each query gives a correct view
    let expected: [(&str, Vec<u64>); 5] = [
        ("s", vec![1, 3]),
        ("sm", vec![1]),
        ("sma", vec![1]),
        ("", vec![1, 2, 3]),
        ("p", vec![1, 2]),
    ];
    for (query, ids) in expected {
        store.dispatch(FilterAction::SetSearchQuery(query.to_string()));
        assert_eq!(visible_ids(&store), ids, "query {:?}", query);
    }
}

#[test]
fn test_favorites_lifecycle() {
    let mut store = Store::new();
    store.dispatch(CatalogAction::ProductsLoaded(Ok(catalog())));

    let laptop = store.catalog().product_by_id(2).cloned().unwrap();
    store.dispatch(FavoritesAction::Add(laptop.clone()));
    store.dispatch(FavoritesAction::Add(laptop));
    assert_eq!(store.favorites_count(), 1);
    assert!(store.is_favorite(2));

    store.dispatch(FavoritesAction::Remove(42));
    assert_eq!(store.favorites_count(), 1);

    let shirt = store.catalog().product_by_id(3).cloned().unwrap();
    store.dispatch(Action::Favorites(FavoritesAction::Toggle(shirt.clone())));
    assert_eq!(
        store.favorites().items().iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![2, 3]
    );

    store.dispatch(FavoritesAction::Toggle(shirt));
    assert!(!store.is_favorite(3));

    store.dispatch(FavoritesAction::Clear);
    assert_eq!(store.favorites_count(), 0);
    assert!(!store.is_favorite(2));
}

#[test]
fn test_favorites_are_independent_of_filters() {
    let mut store = Store::new();
    store.dispatch(CatalogAction::ProductsLoaded(Ok(catalog())));
    store.dispatch(FavoritesAction::Add(create_test_product(3, "Shirt", "clothing", 19.99)));

    store.dispatch(FilterAction::SetSelectedCategory("electronics".to_string()));
    assert!(!visible_ids(&store).contains(&3));
    assert!(store.is_favorite(3));
}

#[test]
fn test_failed_load_then_retry() {
    let mut store = Store::new();
    store.dispatch(CatalogAction::ProductsRequested);
    store.dispatch(CatalogAction::ProductsLoaded(Err(
        "Failed to fetch products: 503 Service Unavailable".to_string(),
    )));
    assert!(store.catalog().products_error().is_some());
    assert!(!store.catalog().is_loaded());

    store.dispatch(CatalogAction::ProductsRequested);
    store.dispatch(CatalogAction::ProductsLoaded(Ok(catalog())));
    assert!(store.catalog().products_error().is_none());
    assert_eq!(store.visible_products().len(), 3);
}
