//! Vehicle record access

use super::{within_store_timeout, ServiceError, ServiceResult, ServiceTimeouts};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};
use crate::sanitize::validate_brand;
use crate::store::{parse_record_id, VehicleStore};
use std::sync::Arc;
use tracing::{debug, info};

const NOT_FOUND: &str = "Vehicle not found";
const BRAND_NOT_FOUND: &str = "Vehicle not found with this brand";

/// Vehicle service
///
/// Cheap to clone; all state lives in the store.
#[derive(Clone)]
pub struct VehicleService {
    store: Arc<dyn VehicleStore>,
    timeouts: ServiceTimeouts,
}

impl VehicleService {
    pub fn new(store: Arc<dyn VehicleStore>, timeouts: ServiceTimeouts) -> Self {
        Self { store, timeouts }
    }

    /// Creates a vehicle from exactly `{kind, color, brand, owner}`
    ///
    /// The owner is stored as given; nothing checks that it names a user.
    pub async fn create(&self, data: NewVehicle) -> ServiceResult<Vehicle> {
        let vehicle = within_store_timeout(self.timeouts.store, self.store.insert(data)).await?;
        info!(vehicle_id = %vehicle.id, "Vehicle created");
        Ok(vehicle)
    }

    /// Lists every vehicle
    pub async fn list_all(&self) -> ServiceResult<Vec<Vehicle>> {
        Ok(within_store_timeout(self.timeouts.store, self.store.list()).await?)
    }

    /// Fetches one vehicle
    ///
    /// # Errors
    ///
    /// `NotFound` if no vehicle has this ID, `Store` if the ID is malformed.
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Vehicle> {
        let id = parse_record_id(id)?;
        within_store_timeout(self.timeouts.store, self.store.find_by_id(id))
            .await?
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
    }

    /// Replaces kind, color and brand; the owner is left untouched
    pub async fn update(&self, id: &str, changes: VehicleChanges) -> ServiceResult<Vehicle> {
        let id = parse_record_id(id)?;
        let vehicle = within_store_timeout(self.timeouts.store, self.store.update(id, changes))
            .await?
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))?;

        info!(vehicle_id = %vehicle.id, "Vehicle updated");
        Ok(vehicle)
    }

    /// Finds the first vehicle whose brand matches, ignoring case
    ///
    /// The brand is sanitized first; matching is exact on the sanitized
    /// value, never a substring match.
    ///
    /// # Errors
    ///
    /// - `Validation` if the brand is blank or sanitizes to nothing
    /// - `NotFound` if no vehicle carries this brand
    pub async fn get_by_brand(&self, brand: Option<&str>) -> ServiceResult<Vehicle> {
        let brand = validate_brand(brand)?;
        debug!(%brand, "Looking up vehicle by brand");

        within_store_timeout(self.timeouts.store, self.store.find_by_brand(&brand))
            .await?
            .ok_or_else(|| ServiceError::not_found(BRAND_NOT_FOUND))
    }

    /// Deletes a vehicle and returns it
    pub async fn delete_by_id(&self, id: &str) -> ServiceResult<Vehicle> {
        let id = parse_record_id(id)?;
        let vehicle = within_store_timeout(self.timeouts.store, self.store.delete(id))
            .await?
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))?;

        info!(vehicle_id = %vehicle.id, "Vehicle deleted");
        Ok(vehicle)
    }

    /// Pings the store
    pub async fn health_check(&self) -> ServiceResult<()> {
        Ok(within_store_timeout(self.timeouts.store, self.store.ping()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::BrandError;
    use crate::store::{memory::MemoryVehicleStore, StoreError};
    use uuid::Uuid;

    fn service() -> VehicleService {
        VehicleService::new(Arc::new(MemoryVehicleStore::new()), ServiceTimeouts::default())
    }

    fn honda() -> NewVehicle {
        NewVehicle {
            kind: Some("car".to_string()),
            color: Some("red".to_string()),
            brand: Some("Honda".to_string()),
            owner: Some("u1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service.create(honda()).await.unwrap();

        let found = service.get_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(found, created);
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_brand_ignores_case() {
        let service = service();
        let created = service
            .create(NewVehicle {
                brand: Some("Toyota".to_string()),
                ..honda()
            })
            .await
            .unwrap();

        for query in ["toyota", "TOYOTA", "Toyota", "  toyota!! "] {
            let found = service.get_by_brand(Some(query)).await.unwrap();
            assert_eq!(found.id, created.id, "query {:?}", query);
        }
    }

    #[tokio::test]
    async fn test_get_by_brand_is_not_substring_match() {
        let service = service();
        service
            .create(NewVehicle {
                brand: Some("Toyota".to_string()),
                ..honda()
            })
            .await
            .unwrap();

        let err = service.get_by_brand(Some("Toyo")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_by_brand_validation() {
        let service = service();

        let err = service.get_by_brand(None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(BrandError::Required)));

        let err = service.get_by_brand(Some("$$$")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(BrandError::InvalidAfterSanitization)
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_owner() {
        let service = service();
        let created = service.create(honda()).await.unwrap();

        let updated = service
            .update(
                &created.id.to_string(),
                VehicleChanges {
                    kind: Some("van".to_string()),
                    color: Some("blue".to_string()),
                    brand: Some("Ford".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.brand.as_deref(), Some("Ford"));
        assert_eq!(updated.owner.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let service = service();
        let created = service.create(honda()).await.unwrap();

        let updated = service
            .update(
                &created.id.to_string(),
                VehicleChanges {
                    color: Some("green".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.kind.is_none());
        assert!(updated.brand.is_none());
        assert_eq!(updated.color.as_deref(), Some("green"));
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let service = service();
        let id = Uuid::new_v4().to_string();

        assert!(matches!(
            service.get_by_id(&id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service.update(&id, VehicleChanges::default()).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service.delete_by_id(&id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_malformed_id_is_store_error() {
        let service = service();
        let err = service.delete_by_id("not-an-id").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::MalformedId(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_vehicle() {
        let service = service();
        let created = service.create(honda()).await.unwrap();

        let removed = service.delete_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(removed.id, created.id);
        assert!(service.list_all().await.unwrap().is_empty());
    }
}
