//! Request-scoped orchestration over the repository and the world rules.
//!
//! Every operation names its settlement explicitly. Mutations follow one
//! shape: load the whole collection, change it in memory, save it once.
//! When a rule rejects the change nothing is saved.
//!
//! There is no locking between operations. Two mutations of the same
//! collection that overlap in time each save what they loaded plus their own
//! change, and the later save wins.

use std::collections::BTreeMap;

use chrono::Utc;
use settlement_ledger::{Ledger, Upsert, sum_all};
use settlement_store::Repository;
use settlement_types::{
    Blueprint, BlueprintId, BuiltDistrict, DistrictId, NewResident, NewResource, NewSettlement,
    Resident, ResidentId, ResourceId, ResourceKind, Settlement, SettlementId, Spear, SpearId,
    next_id,
};
use settlement_world::{CatalogStore, DailyDelta, construction, population, production, spear};

use crate::error::ServiceError;

/// Id handed to the first settlement.
const FIRST_SETTLEMENT_ID: SettlementId = SettlementId::new(1);

/// Id handed to the first spear.
const FIRST_SPEAR_ID: SpearId = SpearId::new(1);

/// Id of the district seeded from the starter blueprint.
const STARTER_DISTRICT_ID: DistrictId = DistrictId::new(0);

/// The settlement management service.
#[derive(Debug)]
pub struct SettlementService<R> {
    repo: R,
}

impl<R: Repository> SettlementService<R> {
    /// Create a service over `repo`.
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The underlying repository.
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    // =========================================================================
    // Settlements
    // =========================================================================

    /// All settlements as stored (spears not attached).
    pub async fn list_settlements(&self) -> Vec<Settlement> {
        self.repo.load_settlements().await
    }

    /// One settlement with its spears attached.
    pub async fn settlement(&self, id: SettlementId) -> Result<Settlement, ServiceError> {
        let mut settlement = self
            .repo
            .load_settlements()
            .await
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::not_found("settlement", id))?;
        settlement.spears = self.spears_of(id).await;
        Ok(settlement)
    }

    /// Found a settlement, seeded with the starter district if the catalog
    /// has one.
    pub async fn create_settlement(&self, new: NewSettlement) -> Result<Settlement, ServiceError> {
        if new.name.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(String::from(
                "settlement name must not be empty",
            )));
        }

        let mut settlements = self.repo.load_settlements().await;
        let id = next_id(settlements.iter().map(|s| s.id), FIRST_SETTLEMENT_ID)
            .ok_or(ServiceError::ArithmeticOverflow)?;
        let now = Utc::now();
        let mut settlement = Settlement::new(id, new.name, new.description, now);

        let catalog = CatalogStore::from_blueprints(self.repo.load_blueprints().await);
        if let Some(starter) = catalog.starter() {
            settlement.districts.push(BuiltDistrict::from_blueprint(
                starter,
                STARTER_DISTRICT_ID,
                id,
                now,
            ));
        }

        settlements.push(settlement.clone());
        self.repo.save_settlements(&settlements).await?;
        tracing::info!(settlement = %id, name = %settlement.name, "Founded settlement");
        Ok(settlement)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// File a resource contribution in the settlement's ledger.
    pub async fn add_resource(
        &self,
        id: SettlementId,
        resource: NewResource,
    ) -> Result<Upsert, ServiceError> {
        self.mutate(id, |s| Ok(Ledger::new(&mut s.resources).upsert(&resource)?))
            .await
    }

    /// Remove `amount` from the ledger entry with this kind and id.
    ///
    /// Returns the remaining amount. Fails without saving when the entry is
    /// missing or holds less than `amount`.
    pub async fn deduct_resource(
        &self,
        id: SettlementId,
        kind: ResourceKind,
        resource_id: ResourceId,
        amount: i64,
        name: &str,
    ) -> Result<i64, ServiceError> {
        self.mutate(id, |s| {
            Ok(Ledger::new(&mut s.resources).deduct(kind, resource_id, amount, name)?)
        })
        .await
    }

    /// Sum of every ledger amount in the settlement.
    pub async fn saldo(&self, id: SettlementId) -> Result<i64, ServiceError> {
        let settlement = self.load_one(id).await?;
        Ok(sum_all(&settlement.resources)?)
    }

    // =========================================================================
    // Catalog and construction
    // =========================================================================

    /// Add a blueprint to the catalog under the next free id.
    pub async fn register_blueprint(&self, blueprint: Blueprint) -> Result<BlueprintId, ServiceError> {
        let mut catalog = CatalogStore::from_blueprints(self.repo.load_blueprints().await);
        let id = catalog.register(blueprint)?;
        self.repo.save_blueprints(&catalog.into_inner()).await?;
        Ok(id)
    }

    /// The blueprint catalog.
    pub async fn blueprints(&self) -> Vec<Blueprint> {
        self.repo.load_blueprints().await
    }

    /// Whether the settlement can pay for blueprint `blueprint_id`.
    pub async fn can_build(
        &self,
        id: SettlementId,
        blueprint_id: BlueprintId,
    ) -> Result<bool, ServiceError> {
        let blueprint = self.blueprint(blueprint_id).await?;
        let settlement = self.load_one(id).await?;
        Ok(construction::can_build(
            &settlement,
            &blueprint.required_resources,
            &blueprint.required_tools,
        ))
    }

    /// Build blueprint `blueprint_id` in the settlement, paying its costs.
    pub async fn build_district(
        &self,
        id: SettlementId,
        blueprint_id: BlueprintId,
    ) -> Result<BuiltDistrict, ServiceError> {
        let blueprint = self.blueprint(blueprint_id).await?;
        self.build(id, &blueprint).await
    }

    /// Build the blueprint named `name` (case-insensitive) in the settlement.
    pub async fn build_district_by_name(
        &self,
        id: SettlementId,
        name: &str,
    ) -> Result<BuiltDistrict, ServiceError> {
        let catalog = CatalogStore::from_blueprints(self.repo.load_blueprints().await);
        let blueprint = catalog
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("blueprint", name))?;
        self.build(id, &blueprint).await
    }

    /// How many districts of each name the settlement has built.
    pub async fn built_district_counts(
        &self,
        id: SettlementId,
    ) -> Result<BTreeMap<String, usize>, ServiceError> {
        let settlement = self.load_one(id).await?;
        Ok(population::built_district_counts(&settlement))
    }

    // =========================================================================
    // Production
    // =========================================================================

    /// Run `days` days of production and return the net change per kind.
    pub async fn advance_days(&self, id: SettlementId, days: i64) -> Result<DailyDelta, ServiceError> {
        self.mutate(id, |s| Ok(production::advance_days(s, days)?))
            .await
    }

    // =========================================================================
    // Residents
    // =========================================================================

    /// Add a resident, optionally placing it in a district.
    pub async fn add_resident(
        &self,
        id: SettlementId,
        new: NewResident,
    ) -> Result<Resident, ServiceError> {
        let mut settlements = self.repo.load_settlements().await;
        let resident_id = population::next_resident_id(&settlements)?;
        let settlement = find_mut(&mut settlements, id)?;
        population::admit_resident(settlement, resident_id, &new, Utc::now())?;
        let resident = settlement
            .resident(resident_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("resident", resident_id))?;
        self.repo.save_settlements(&settlements).await?;
        Ok(resident)
    }

    /// Move a resident into a district.
    pub async fn assign_resident(
        &self,
        id: SettlementId,
        resident_id: ResidentId,
        district_id: DistrictId,
    ) -> Result<(), ServiceError> {
        self.mutate(id, |s| {
            Ok(population::assign_to_district(s, resident_id, district_id)?)
        })
        .await
    }

    /// Residents working in a district.
    pub async fn residents_in_district(
        &self,
        id: SettlementId,
        district_id: DistrictId,
    ) -> Result<Vec<Resident>, ServiceError> {
        let settlement = self.load_one(id).await?;
        if settlement.district(district_id).is_none() {
            return Err(ServiceError::not_found("district", district_id));
        }
        Ok(population::residents_in_district(&settlement, district_id)
            .into_iter()
            .cloned()
            .collect())
    }

    // =========================================================================
    // Spears
    // =========================================================================

    /// Raise an empty spear quartered in one of the settlement's districts.
    pub async fn add_spear(
        &self,
        id: SettlementId,
        district_id: DistrictId,
    ) -> Result<Spear, ServiceError> {
        let settlement = self.load_one(id).await?;
        if settlement.district(district_id).is_none() {
            return Err(ServiceError::not_found("district", district_id));
        }

        let mut spears = self.repo.load_spears().await;
        let spear_id = next_id(spears.iter().map(|s| s.id), FIRST_SPEAR_ID)
            .ok_or(ServiceError::ArithmeticOverflow)?;
        let spear = Spear::new(spear_id, id, district_id);
        spears.push(spear.clone());
        self.repo.save_spears(&spears).await?;
        tracing::info!(settlement = %id, spear = %spear_id, district = %district_id, "Raised spear");
        Ok(spear)
    }

    /// Copy a resident of the settlement into a spear.
    ///
    /// Returns `false` (and saves nothing) if the resident already serves.
    pub async fn add_spear_member(
        &self,
        id: SettlementId,
        spear_id: SpearId,
        resident_id: ResidentId,
    ) -> Result<bool, ServiceError> {
        let settlement = self.load_one(id).await?;
        let resident = settlement
            .resident(resident_id)
            .ok_or_else(|| ServiceError::not_found("resident", resident_id))?;

        let mut spears = self.repo.load_spears().await;
        let target = find_spear_mut(&mut spears, id, spear_id)?;
        let added = spear::add_member(target, resident);
        if added {
            self.repo.save_spears(&spears).await?;
        }
        Ok(added)
    }

    /// Make a member the spear's leader.
    pub async fn set_spear_leader(
        &self,
        id: SettlementId,
        spear_id: SpearId,
        resident_id: ResidentId,
    ) -> Result<(), ServiceError> {
        let mut spears = self.repo.load_spears().await;
        let target = find_spear_mut(&mut spears, id, spear_id)?;
        spear::set_leader(target, resident_id)?;
        self.repo.save_spears(&spears).await?;
        Ok(())
    }

    /// Daily yield of one spear.
    pub async fn spear_yield(&self, id: SettlementId, spear_id: SpearId) -> Result<u64, ServiceError> {
        let spears = self.spears_of(id).await;
        let target = spears
            .iter()
            .find(|s| s.id == spear_id)
            .ok_or_else(|| ServiceError::not_found("spear", spear_id))?;
        Ok(spear::yield_per_day(target)?)
    }

    /// Combined daily yield of every spear of the settlement.
    pub async fn settlement_daily_yield(&self, id: SettlementId) -> Result<u64, ServiceError> {
        self.load_one(id).await?;
        let spears = self.spears_of(id).await;
        Ok(spear::settlement_daily_yield(&spears)?)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Load, change one settlement, and save the collection once on success.
    async fn mutate<T, F>(&self, id: SettlementId, change: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Settlement) -> Result<T, ServiceError> + Send,
        T: Send,
    {
        let mut settlements = self.repo.load_settlements().await;
        let outcome = change(find_mut(&mut settlements, id)?)?;
        self.repo.save_settlements(&settlements).await?;
        Ok(outcome)
    }

    async fn build(&self, id: SettlementId, blueprint: &Blueprint) -> Result<BuiltDistrict, ServiceError> {
        self.mutate(id, |s| Ok(construction::build(s, blueprint, Utc::now())?))
            .await
    }

    async fn load_one(&self, id: SettlementId) -> Result<Settlement, ServiceError> {
        self.repo
            .load_settlements()
            .await
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::not_found("settlement", id))
    }

    async fn blueprint(&self, id: BlueprintId) -> Result<Blueprint, ServiceError> {
        CatalogStore::from_blueprints(self.repo.load_blueprints().await)
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("blueprint", id))
    }

    async fn spears_of(&self, id: SettlementId) -> Vec<Spear> {
        self.repo
            .load_spears()
            .await
            .into_iter()
            .filter(|s| s.settlement_id == id)
            .collect()
    }
}

fn find_mut(settlements: &mut [Settlement], id: SettlementId) -> Result<&mut Settlement, ServiceError> {
    settlements
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| ServiceError::not_found("settlement", id))
}

fn find_spear_mut(
    spears: &mut [Spear],
    settlement_id: SettlementId,
    spear_id: SpearId,
) -> Result<&mut Spear, ServiceError> {
    spears
        .iter_mut()
        .find(|s| s.id == spear_id && s.settlement_id == settlement_id)
        .ok_or_else(|| ServiceError::not_found("spear", spear_id))
}
