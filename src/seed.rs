use std::path::Path;

use anyhow::Context;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, TransactionTrait};
use tracing::debug;

use crate::{entities::movie, models::DatasetEntry};

// 14 columns per row keeps each statement under SQLite's 999 bound-parameter limit.
const INSERT_CHUNK: usize = 64;

pub async fn load_dataset(path: &Path) -> anyhow::Result<Vec<DatasetEntry>> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading dataset {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing dataset {}", path.display()))
}

/// Replaces the whole collection with `entries`, assigning each record a fresh id.
pub async fn reset_and_seed(db: &DatabaseConnection, entries: Vec<DatasetEntry>) -> Result<u64, DbErr> {
    let txn = db.begin().await?;

    let deleted = movie::Entity::delete_many().exec(&txn).await?.rows_affected;
    debug!(deleted = deleted, "cleared movies");

    let mut inserted = 0;
    for chunk in entries.chunks(INSERT_CHUNK) {
        inserted += movie::Entity::insert_many(chunk.iter().cloned().map(to_active_model))
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(inserted)
}

fn to_active_model(entry: DatasetEntry) -> movie::ActiveModel {
    movie::ActiveModel {
        id: Set(uuid::Uuid::new_v4().simple().to_string()),
        show_id: Set(entry.show_id),
        title_folded: Set(movie::fold_title(&entry.title)),
        title: Set(entry.title),
        kind: Set(entry.kind),
        director: Set(entry.director),
        cast: Set(entry.cast),
        country: Set(entry.country),
        date_added: Set(entry.date_added),
        release_year: Set(entry.release_year),
        rating: Set(entry.rating),
        duration: Set(entry.duration),
        listed_in: Set(entry.listed_in),
        description: Set(entry.description),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::connect_and_migrate;

    fn entries(titles: &[&str]) -> Vec<DatasetEntry> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| DatasetEntry {
                show_id: Some(i as i64),
                title: t.to_string(),
                release_year: Some(2000 + i as i32),
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn seeding_replaces_existing_records() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();

        assert_eq!(reset_and_seed(&db, entries(&["Old One", "Old Two"])).await.unwrap(), 2);
        assert_eq!(reset_and_seed(&db, entries(&["Narcos"])).await.unwrap(), 1);

        let all = movie::Entity::find().all(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Narcos");
        assert_eq!(all[0].title_folded, "narcos");
        assert_eq!(all[0].release_year, Some(2000));
    }

    #[tokio::test]
    async fn seeding_assigns_unique_ids_across_chunks() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let titles: Vec<String> = (0..150).map(|i| format!("Title {i}")).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

        assert_eq!(reset_and_seed(&db, entries(&titles)).await.unwrap(), 150);

        let all = movie::Entity::find().all(&db).await.unwrap();
        let ids: HashSet<_> = all.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), 150);
    }

    #[tokio::test]
    async fn empty_dataset_clears_collection() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        reset_and_seed(&db, entries(&["Dark"])).await.unwrap();

        assert_eq!(reset_and_seed(&db, Vec::new()).await.unwrap(), 0);
        assert!(movie::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seeding_folds_accented_titles() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        reset_and_seed(&db, entries(&["ÉLITE"])).await.unwrap();

        let all = movie::Entity::find().all(&db).await.unwrap();
        assert_eq!(all[0].title, "ÉLITE");
        assert_eq!(all[0].title_folded, "élite");
    }

    #[test]
    fn dataset_entries_tolerate_missing_fields() {
        let parsed: Vec<DatasetEntry> = serde_json::from_str(
            r#"[{"show_id": 80057969, "title": "Love", "type": "Movie", "release_year": 2015, "rating": "NR"},
                {"title": "Untitled"}]"#,
        )
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].kind.as_deref(), Some("Movie"));
        assert_eq!(parsed[0].release_year, Some(2015));
        assert_eq!(parsed[1].release_year, None);
        assert_eq!(parsed[1].director, None);
    }

    #[tokio::test]
    async fn bundled_dataset_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/netflix-titles.json");
        let parsed = load_dataset(&path).await.unwrap();
        assert!(!parsed.is_empty());
        assert!(parsed.iter().any(|e| e.title == "Stranger Things"));
    }
}
