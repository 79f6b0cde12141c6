use anyhow::{anyhow, Result};
use rota_core::error::CoreError;
use rota_core::repository::Repository;
use uuid::Uuid;

pub async fn resolve_class_id(repo: &impl Repository, short_id: &str) -> Result<Uuid> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let classes = repo.find_classes_by_short_id_prefix(short_id).await?;
    if classes.len() == 1 {
        Ok(classes[0].id)
    } else if classes.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No class found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let info: Vec<(String, String)> = classes
            .into_iter()
            .map(|c| (c.id.to_string(), c.name))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(info)))
    }
}

pub async fn resolve_pattern_id(repo: &impl Repository, short_id: &str) -> Result<Uuid> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let patterns = repo.find_patterns_by_short_id_prefix(short_id).await?;
    if patterns.len() == 1 {
        Ok(patterns[0].id)
    } else if patterns.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No pattern found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let info: Vec<(String, String)> = patterns
            .into_iter()
            .map(|p| {
                (
                    p.id.to_string(),
                    format!("{} {}-{}", p.weekday, p.starts_at, p.ends_at),
                )
            })
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(info)))
    }
}

pub async fn resolve_event_id(repo: &impl Repository, short_id: &str) -> Result<Uuid> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let events = repo.find_events_by_short_id_prefix(short_id).await?;
    if events.len() == 1 {
        Ok(events[0].id)
    } else if events.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No event found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let info: Vec<(String, String)> = events
            .into_iter()
            .map(|e| (e.id.to_string(), e.title))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(info)))
    }
}

/// Seven-character display prefix of an id, the form every lookup accepts.
pub fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(7).collect()
}
