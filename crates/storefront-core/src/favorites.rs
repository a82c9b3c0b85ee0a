use std::collections::HashSet;

use crate::models::{Product, ProductId};

/// Favorited products, unique by id, in the order they were added
///
/// Entries are full snapshots, so a product that later disappears from the
/// catalog stays here until removed explicitly. Lives in memory only.
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    items: Vec<Product>,
    ids: HashSet<ProductId>,
}

/// State transitions for [`FavoritesSet`]
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesAction {
    Add(Product),
    Remove(ProductId),
    Toggle(Product),
    Clear,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot unless the id is already present
    ///
    /// Returns whether anything was inserted.
    pub fn add(&mut self, product: Product) -> bool {
        if !self.ids.insert(product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Drop the entry with this id; returns whether there was one
    pub fn remove(&mut self, id: ProductId) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.items.retain(|p| p.id != id);
        true
    }

    /// Add when absent, remove when present. Returns the new membership.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.add(product)
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        if !self.contains(id) {
            return None;
        }
        self.items.iter().find(|p| p.id == id)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reduce(mut self, action: FavoritesAction) -> Self {
        match action {
            FavoritesAction::Add(product) => {
                self.add(product);
            }
            FavoritesAction::Remove(id) => {
                self.remove(id);
            }
            FavoritesAction::Toggle(product) => {
                self.toggle(product);
            }
            FavoritesAction::Clear => self.clear(),
        }
        self
    }
}
