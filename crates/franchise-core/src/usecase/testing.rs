//! In-memory gateways for use-case tests.
//!
//! One [`InMemoryStore`] implements all three gateway traits over shared
//! maps, counts writes, and can be told to fail specific reads.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::gateway::{BranchGateway, FranchiseGateway, GatewayError, GatewayResult, ProductGateway};
use crate::types::{Branch, EntityId, Franchise, Product};
use crate::usecase::UseCases;

/// Which gateway calls should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    /// Every call.
    Everything,
    /// `find_by_franchise_id` for this franchise.
    BranchesOf(EntityId),
    /// `find_by_branch_id` for this branch.
    ProductsOf(EntityId),
}

#[derive(Debug, Default)]
struct State {
    next_id: EntityId,
    franchises: BTreeMap<EntityId, Franchise>,
    branches: BTreeMap<EntityId, Branch>,
    products: BTreeMap<EntityId, Product>,
    failures: HashSet<Failure>,
}

impl State {
    fn next_id(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
    franchise_saves: AtomicUsize,
    branch_saves: AtomicUsize,
    product_saves: AtomicUsize,
    product_updates: AtomicUsize,
    product_deletes: AtomicUsize,
}

impl InMemoryStore {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wires every use case to this store.
    pub fn use_cases(self: &Arc<Self>) -> UseCases {
        UseCases::new(self.clone(), self.clone(), self.clone())
    }

    pub fn fail(&self, failure: Failure) {
        self.state.write().unwrap().failures.insert(failure);
    }

    pub fn franchise_saves(&self) -> usize {
        self.franchise_saves.load(Ordering::SeqCst)
    }

    pub fn branch_saves(&self) -> usize {
        self.branch_saves.load(Ordering::SeqCst)
    }

    pub fn product_saves(&self) -> usize {
        self.product_saves.load(Ordering::SeqCst)
    }

    pub fn product_updates(&self) -> usize {
        self.product_updates.load(Ordering::SeqCst)
    }

    pub fn product_deletes(&self) -> usize {
        self.product_deletes.load(Ordering::SeqCst)
    }

    /// Inserts rows directly, bypassing the use cases and the counters.
    pub fn insert_franchise(&self, name: &str) -> EntityId {
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        state.franchises.insert(
            id,
            Franchise {
                id: Some(id),
                ..Franchise::new(name)
            },
        );
        id
    }

    pub fn insert_branch(&self, franchise_id: EntityId, name: &str) -> EntityId {
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        state.branches.insert(
            id,
            Branch {
                id: Some(id),
                franchise_id: Some(franchise_id),
                ..Branch::new(name)
            },
        );
        id
    }

    pub fn insert_product(&self, branch_id: EntityId, name: &str, stock: i32) -> EntityId {
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        state.products.insert(
            id,
            Product {
                id: Some(id),
                branch_id: Some(branch_id),
                ..Product::new(name, stock)
            },
        );
        id
    }

    pub fn product(&self, id: EntityId) -> Option<Product> {
        self.state.read().unwrap().products.get(&id).cloned()
    }

    fn check(&self, failure: Failure) -> GatewayResult<()> {
        let state = self.state.read().unwrap();
        if state.failures.contains(&Failure::Everything) || state.failures.contains(&failure) {
            return Err(GatewayError::new("store unavailable"));
        }
        Ok(())
    }

    fn check_all(&self) -> GatewayResult<()> {
        self.check(Failure::Everything)
    }
}

fn missing(entity: &str, id: Option<EntityId>) -> GatewayError {
    GatewayError::new(format!("{} row {:?} does not exist", entity, id))
}

#[async_trait]
impl FranchiseGateway for InMemoryStore {
    async fn save(&self, franchise: &Franchise) -> GatewayResult<Franchise> {
        self.check_all()?;
        self.franchise_saves.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        let stored = Franchise {
            id: Some(id),
            name: franchise.name.clone(),
            branches: Vec::new(),
        };
        state.franchises.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Franchise>> {
        self.check_all()?;
        Ok(self.state.read().unwrap().franchises.get(&id).cloned())
    }

    async fn find_all(&self) -> GatewayResult<Vec<Franchise>> {
        self.check_all()?;
        Ok(self.state.read().unwrap().franchises.values().cloned().collect())
    }

    async fn update(&self, franchise: &Franchise) -> GatewayResult<Franchise> {
        self.check_all()?;
        let mut state = self.state.write().unwrap();
        let id = franchise.id.ok_or_else(|| missing("franchise", None))?;
        let slot = state
            .franchises
            .get_mut(&id)
            .ok_or_else(|| missing("franchise", Some(id)))?;
        slot.name = franchise.name.clone();
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()> {
        self.check_all()?;
        self.state.write().unwrap().franchises.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool> {
        self.check_all()?;
        Ok(self.state.read().unwrap().franchises.contains_key(&id))
    }
}

#[async_trait]
impl BranchGateway for InMemoryStore {
    async fn save(&self, branch: &Branch) -> GatewayResult<Branch> {
        self.check_all()?;
        self.branch_saves.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        let stored = Branch {
            id: Some(id),
            name: branch.name.clone(),
            franchise_id: branch.franchise_id,
            products: Vec::new(),
        };
        state.branches.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Branch>> {
        self.check_all()?;
        Ok(self.state.read().unwrap().branches.get(&id).cloned())
    }

    async fn find_by_franchise_id(&self, franchise_id: EntityId) -> GatewayResult<Vec<Branch>> {
        self.check(Failure::BranchesOf(franchise_id))?;
        Ok(self
            .state
            .read()
            .unwrap()
            .branches
            .values()
            .filter(|branch| branch.franchise_id == Some(franchise_id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> GatewayResult<Vec<Branch>> {
        self.check_all()?;
        Ok(self.state.read().unwrap().branches.values().cloned().collect())
    }

    async fn update(&self, branch: &Branch) -> GatewayResult<Branch> {
        self.check_all()?;
        let mut state = self.state.write().unwrap();
        let id = branch.id.ok_or_else(|| missing("branch", None))?;
        let slot = state
            .branches
            .get_mut(&id)
            .ok_or_else(|| missing("branch", Some(id)))?;
        slot.name = branch.name.clone();
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()> {
        self.check_all()?;
        self.state.write().unwrap().branches.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool> {
        self.check_all()?;
        Ok(self.state.read().unwrap().branches.contains_key(&id))
    }

    async fn exists_by_id_and_franchise_id(
        &self,
        branch_id: EntityId,
        franchise_id: EntityId,
    ) -> GatewayResult<bool> {
        self.check_all()?;
        Ok(self
            .state
            .read()
            .unwrap()
            .branches
            .get(&branch_id)
            .map_or(false, |branch| branch.franchise_id == Some(franchise_id)))
    }
}

#[async_trait]
impl ProductGateway for InMemoryStore {
    async fn save(&self, product: &Product) -> GatewayResult<Product> {
        self.check_all()?;
        self.product_saves.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        let stored = Product {
            id: Some(id),
            ..product.clone()
        };
        state.products.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: EntityId) -> GatewayResult<Option<Product>> {
        self.check_all()?;
        Ok(self.product(id))
    }

    async fn find_by_branch_id(&self, branch_id: EntityId) -> GatewayResult<Vec<Product>> {
        self.check(Failure::ProductsOf(branch_id))?;
        Ok(self
            .state
            .read()
            .unwrap()
            .products
            .values()
            .filter(|product| product.branch_id == Some(branch_id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> GatewayResult<Vec<Product>> {
        self.check_all()?;
        Ok(self.state.read().unwrap().products.values().cloned().collect())
    }

    async fn update(&self, product: &Product) -> GatewayResult<Product> {
        self.check_all()?;
        self.product_updates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let id = product.id.ok_or_else(|| missing("product", None))?;
        let slot = state
            .products
            .get_mut(&id)
            .ok_or_else(|| missing("product", Some(id)))?;
        slot.name = product.name.clone();
        slot.stock = product.stock;
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: EntityId) -> GatewayResult<()> {
        self.check_all()?;
        self.product_deletes.fetch_add(1, Ordering::SeqCst);
        self.state.write().unwrap().products.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: EntityId) -> GatewayResult<bool> {
        self.check_all()?;
        Ok(self.state.read().unwrap().products.contains_key(&id))
    }

    async fn exists_by_id_and_branch_id(
        &self,
        product_id: EntityId,
        branch_id: EntityId,
    ) -> GatewayResult<bool> {
        self.check_all()?;
        Ok(self
            .product(product_id)
            .map_or(false, |product| product.branch_id == Some(branch_id)))
    }

    async fn find_top_by_branch_id_order_by_stock_desc(
        &self,
        branch_id: EntityId,
    ) -> GatewayResult<Option<Product>> {
        self.check_all()?;
        // Ties go to the lowest id: the map iterates in id order and
        // max_by_key keeps the last maximum, so iterate in reverse.
        Ok(self
            .state
            .read()
            .unwrap()
            .products
            .values()
            .rev()
            .filter(|product| product.branch_id == Some(branch_id))
            .max_by_key(|product| product.stock)
            .cloned())
    }

    async fn update_stock(&self, product_id: EntityId, stock: i32) -> GatewayResult<Product> {
        self.check_all()?;
        self.product_updates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let slot = state
            .products
            .get_mut(&product_id)
            .ok_or_else(|| missing("product", Some(product_id)))?;
        slot.stock = stock;
        Ok(slot.clone())
    }
}
