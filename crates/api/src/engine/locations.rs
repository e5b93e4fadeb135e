//! Location sharing: one current position per user, visible to the
//! assignee of that user's requests only while sharing is on.

use voltguard_core::access::{authorize, require_field_staff, Action, Caller};
use voltguard_core::error::CoreError;
use voltguard_core::types::DbId;
use voltguard_db::models::location::{Location, LocationHistory, LocationUpdate, UpsertLocation};
use voltguard_db::store::Store;

use super::load_fault_request;
use crate::error::{AppError, AppResult};

/// Upper bound on `?limit=`. Only one record is ever kept, so this is a sanity clamp.
const MAX_HISTORY_LIMIT: i64 = 100;

pub async fn update(
    store: &dyn Store,
    user_id: DbId,
    input: LocationUpdate,
) -> AppResult<Location> {
    input.check()?;
    let location = store
        .upsert_location(&UpsertLocation::from_input(user_id, input))
        .await?;
    tracing::debug!(user_id, is_sharing = location.is_sharing, "Location updated");
    Ok(location)
}

pub async fn current(store: &dyn Store, user_id: DbId) -> AppResult<Location> {
    store
        .get_location(user_id)
        .await?
        .ok_or_else(|| not_found(user_id))
}

/// Turn sharing on or off without touching the stored position.
pub async fn set_sharing(store: &dyn Store, user_id: DbId, sharing: bool) -> AppResult<Location> {
    if store.set_location_sharing(user_id, sharing).await? == 0 {
        return Err(not_found(user_id));
    }
    tracing::info!(user_id, sharing, "Location sharing changed");
    current(store, user_id).await
}

/// The stored position as a list: zero or one entries. No history is kept.
pub async fn history(
    store: &dyn Store,
    user_id: DbId,
    limit: Option<i64>,
) -> AppResult<LocationHistory> {
    let limit = limit.unwrap_or(10);
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_HISTORY_LIMIT}"
        ))
        .into());
    }
    let locations: Vec<Location> = store.get_location(user_id).await?.into_iter().collect();
    Ok(LocationHistory {
        total: locations.len(),
        locations,
    })
}

/// The reporter's live position, for the request's assignee only.
///
/// A reporter who never shared, or who stopped sharing, reads as not found.
pub async fn reporter_location(
    store: &dyn Store,
    caller: &Caller,
    request_id: DbId,
) -> AppResult<Location> {
    require_field_staff(caller, Action::TrackReporter)?;
    let request = load_fault_request(store, request_id).await?;
    authorize(caller, Action::TrackReporter, &request.state())?;

    match store.get_location(request.consumer_id).await? {
        Some(location) if location.is_sharing => Ok(location),
        _ => Err(not_found(request.consumer_id)),
    }
}

fn not_found(user_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Location for user",
        id: user_id,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use voltguard_core::roles::Role;
    use voltguard_db::models::fault_request::AssignFaultRequest;
    use voltguard_db::store::MemoryStore;

    use super::*;
    use crate::engine::fault_requests;
    use crate::engine::test_support::{reported_by, user};

    fn at(latitude: f64, longitude: f64) -> LocationUpdate {
        LocationUpdate {
            latitude,
            longitude,
            accuracy: Some(8.0),
            altitude: None,
            is_sharing: None,
        }
    }

    #[tokio::test]
    async fn update_then_stop_and_resume_sharing() {
        let store = MemoryStore::new();
        let saved = update(&store, 1, at(13.08, 80.27)).await.unwrap();
        assert!(saved.is_sharing);

        let stopped = set_sharing(&store, 1, false).await.unwrap();
        assert!(!stopped.is_sharing);
        assert_eq!(stopped.latitude, 13.08);

        assert!(set_sharing(&store, 1, true).await.unwrap().is_sharing);
        assert_matches!(
            set_sharing(&store, 2, true).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected() {
        let store = MemoryStore::new();
        assert_matches!(
            update(&store, 1, at(95.0, 0.0)).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            current(&store, 1).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[tokio::test]
    async fn history_holds_at_most_the_current_record() {
        let store = MemoryStore::new();
        assert_eq!(history(&store, 1, None).await.unwrap().total, 0);
        update(&store, 1, at(1.0, 1.0)).await.unwrap();
        update(&store, 1, at(2.0, 2.0)).await.unwrap();
        let h = history(&store, 1, Some(5)).await.unwrap();
        assert_eq!(h.total, 1);
        assert_eq!(h.locations[0].latitude, 2.0);
        assert!(history(&store, 1, Some(0)).await.is_err());
    }

    #[tokio::test]
    async fn only_the_assignee_sees_a_sharing_reporter() {
        let store = MemoryStore::new();
        let consumer = user(&store, "c@example.com", Role::Consumer).await;
        let tech = user(&store, "e@example.com", Role::Electrician).await;
        let other = user(&store, "x@example.com", Role::Electrician).await;
        let req = reported_by(&store, &consumer).await;
        fault_requests::assign(
            &store,
            &tech,
            req.id,
            AssignFaultRequest {
                status: "assigned".into(),
                assigned_to: None,
            },
        )
        .await
        .unwrap();

        assert_matches!(
            reporter_location(&store, &tech, req.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );

        update(&store, consumer.user_id, at(12.9, 77.6)).await.unwrap();
        let seen = reporter_location(&store, &tech, req.id).await.unwrap();
        assert_eq!(seen.user_id, consumer.user_id);

        assert_matches!(
            reporter_location(&store, &other, req.id).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
        assert_matches!(
            reporter_location(&store, &consumer, req.id).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );

        set_sharing(&store, consumer.user_id, false).await.unwrap();
        assert_matches!(
            reporter_location(&store, &tech, req.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }
}
