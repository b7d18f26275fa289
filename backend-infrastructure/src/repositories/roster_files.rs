// File-backed roster directory
// Veterans, events, and services are maintained elsewhere and arrive here as
// JSON exports; this repository loads them once at startup and serves the
// directory ports over the live view. The reserved Check-In service is always
// present.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use backend_domain::{
    Event, EventDirectory, EventId, Service, ServiceCatalog, ServiceId, Veteran, VeteranDirectory,
    VeteranId,
};

pub struct RosterDirectory {
    veterans: HashMap<VeteranId, Veteran>,
    by_card: HashMap<u32, VeteranId>,
    events: HashMap<EventId, Event>,
    services: HashMap<ServiceId, Service>,
}

impl RosterDirectory {
    pub async fn load(roster_dir: &str) -> anyhow::Result<Self> {
        let dir = Path::new(roster_dir);
        let veterans: Vec<Veteran> = load_roster_file(&dir.join("veterans.json")).await?;
        let events: Vec<Event> = load_roster_file(&dir.join("events.json")).await?;
        let services: Vec<Service> = load_roster_file(&dir.join("services.json")).await?;
        Ok(Self::from_rosters(veterans, events, services))
    }

    pub fn from_rosters(
        veterans: Vec<Veteran>,
        events: Vec<Event>,
        services: Vec<Service>,
    ) -> Self {
        let mut by_card = HashMap::new();
        for veteran in veterans.iter().filter(|v| !v.deleted) {
            if let Some(card_number) = veteran.card_number {
                if let Some(previous) = by_card.insert(card_number, veteran.id) {
                    // card ownership is unique among live veterans; enforced
                    // upstream, so a collision here means a stale export
                    warn!(
                        card_number,
                        previous = %previous,
                        replaced_by = %veteran.id,
                        "duplicate card number in veteran roster"
                    );
                }
            }
        }

        let mut services: HashMap<ServiceId, Service> = services
            .into_iter()
            .map(|service| (service.id, service))
            .collect();
        services
            .entry(ServiceId::CHECK_IN)
            .or_insert_with(Service::check_in);

        Self {
            veterans: veterans.into_iter().map(|v| (v.id, v)).collect(),
            by_card,
            events: events.into_iter().map(|e| (e.id, e)).collect(),
            services,
        }
    }
}

async fn load_roster_file<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    if !path.exists() {
        warn!("roster file {} not found, loading empty roster", path.display());
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).await?;
    let entries: Vec<T> = serde_json::from_str(&content)?;
    Ok(entries)
}

#[async_trait]
impl VeteranDirectory for RosterDirectory {
    async fn find_by_card(&self, card_number: u32) -> anyhow::Result<Option<Veteran>> {
        let Some(id) = self.by_card.get(&card_number) else {
            return Ok(None);
        };
        self.find_by_id(*id).await
    }

    async fn find_by_id(&self, id: VeteranId) -> anyhow::Result<Option<Veteran>> {
        Ok(self
            .veterans
            .get(&id)
            .filter(|veteran| !veteran.deleted)
            .cloned())
    }
}

#[async_trait]
impl EventDirectory for RosterDirectory {
    async fn get_event(&self, id: EventId) -> anyhow::Result<Option<Event>> {
        Ok(self.events.get(&id).filter(|event| !event.deleted).cloned())
    }
}

#[async_trait]
impl ServiceCatalog for RosterDirectory {
    async fn get_service(&self, id: ServiceId) -> anyhow::Result<Option<Service>> {
        Ok(self
            .services
            .get(&id)
            .filter(|service| !service.deleted)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn veteran(id: u128, card: Option<u32>, deleted: bool) -> Veteran {
        Veteran {
            id: VeteranId(Uuid::from_u128(id)),
            name: format!("veteran-{id}"),
            card_number: card,
            photo_url: None,
            deleted,
        }
    }

    #[tokio::test]
    async fn check_in_service_is_always_present() {
        let roster = RosterDirectory::from_rosters(Vec::new(), Vec::new(), Vec::new());
        let service = roster
            .get_service(ServiceId::CHECK_IN)
            .await
            .expect("lookup")
            .expect("sentinel service");
        assert_eq!(service.name, "Check-In");
    }

    #[tokio::test]
    async fn card_lookup_skips_deleted_veterans() {
        let roster = RosterDirectory::from_rosters(
            vec![veteran(1, Some(4242), true), veteran(2, Some(1111), false)],
            Vec::new(),
            Vec::new(),
        );
        assert!(roster.find_by_card(4242).await.expect("lookup").is_none());
        let found = roster.find_by_card(1111).await.expect("lookup").expect("live");
        assert_eq!(found.id, VeteranId(Uuid::from_u128(2)));
    }

    #[tokio::test]
    async fn deleted_event_is_not_served() {
        let event = Event {
            id: EventId(Uuid::from_u128(9)),
            name: "Closed".to_string(),
            start_date: Utc::now(),
            end_date: Utc::now(),
            deleted: true,
        };
        let roster = RosterDirectory::from_rosters(Vec::new(), vec![event], Vec::new());
        assert!(roster
            .get_event(EventId(Uuid::from_u128(9)))
            .await
            .expect("lookup")
            .is_none());
    }

    #[tokio::test]
    async fn missing_roster_files_load_empty() {
        let roster = RosterDirectory::load("/nonexistent/roster/dir")
            .await
            .expect("load");
        assert!(roster.find_by_card(4242).await.expect("lookup").is_none());
    }
}
