//! Branch-level use cases.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{CoreError, CoreResult, EntityKind};
use crate::gateway::{BranchGateway, FranchiseGateway, GatewayResultExt};
use crate::types::{Branch, EntityId};
use crate::validation::validate_entity_name;

/// Adds a new branch under an existing franchise.
#[derive(Clone)]
pub struct AddBranchToFranchise {
    franchises: Arc<dyn FranchiseGateway>,
    branches: Arc<dyn BranchGateway>,
}

impl AddBranchToFranchise {
    const CONTEXT: &'static str = "Error adding branch to franchise";

    pub fn new(franchises: Arc<dyn FranchiseGateway>, branches: Arc<dyn BranchGateway>) -> Self {
        AddBranchToFranchise {
            franchises,
            branches,
        }
    }

    /// Persists `branch` as a child of `franchise_id`.
    ///
    /// The parent id on `branch` is overwritten and its id is ignored.
    /// Nothing is written when the franchise does not exist.
    pub async fn execute(&self, franchise_id: EntityId, branch: &Branch) -> CoreResult<Branch> {
        let name = validate_entity_name(EntityKind::Branch, &branch.name)?;

        let exists = self
            .franchises
            .exists_by_id(franchise_id)
            .await
            .or_wrap(Self::CONTEXT)?;
        if !exists {
            return Err(CoreError::not_found(EntityKind::Franchise, franchise_id));
        }

        let prepared = Branch {
            name,
            ..branch.assigned_to(franchise_id)
        };
        let saved = self
            .branches
            .save(&prepared)
            .await
            .or_wrap(Self::CONTEXT)?;

        info!(franchise_id, branch_id = ?saved.id, name = %saved.name, "Branch added");
        Ok(saved)
    }
}

#[derive(Clone)]
pub struct RenameBranch {
    branches: Arc<dyn BranchGateway>,
}

impl RenameBranch {
    const CONTEXT: &'static str = "Error updating branch name";

    pub fn new(branches: Arc<dyn BranchGateway>) -> Self {
        RenameBranch { branches }
    }

    /// Renames an existing branch. The owning franchise is unchanged.
    pub async fn execute(&self, id: EntityId, new_name: &str) -> CoreResult<Branch> {
        validate_entity_name(EntityKind::Branch, new_name)?;

        let current = self
            .branches
            .find_by_id(id)
            .await
            .or_wrap(Self::CONTEXT)?
            .ok_or_else(|| CoreError::not_found(EntityKind::Branch, id))?;

        let renamed = current.update_name(new_name)?;
        let saved = self
            .branches
            .update(&renamed)
            .await
            .or_wrap(Self::CONTEXT)?;

        debug!(branch_id = id, name = %saved.name, "Branch renamed");
        Ok(saved)
    }
}
