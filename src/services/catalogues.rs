//! Dropdown options backed by catalogue lookups.

use crate::domain::types::RecordId;
use crate::repository::CatalogueReader;
use crate::services::ServiceResult;

/// Catalogue families the edit screens offer as dropdowns.
pub const IDENTIFICATION_TYPE: &str = "IDENTIFICATION_TYPE";
pub const EVENT_TYPE: &str = "EVENT_TYPE";
pub const CERTIFICATION_TYPE: &str = "CERTIFICATION_TYPE";
pub const PROFESSIONAL_DEGREE: &str = "PROFESSIONAL_DEGREE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub id: RecordId,
    pub label: String,
}

/// Loads one catalogue family as `(id, label)` options sorted by label.
/// Entries without an id cannot be referenced and are skipped.
pub async fn load_options<C>(reader: &C, kind: &str) -> ServiceResult<Vec<SelectOption>>
where
    C: CatalogueReader + ?Sized,
{
    let entries = reader.list_catalogues(kind).await?;

    let mut options: Vec<SelectOption> = entries
        .into_iter()
        .filter_map(|entry| {
            entry.id.map(|id| SelectOption {
                id,
                label: entry.name.trim().to_string(),
            })
        })
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));

    log::debug!("Loaded {} {kind} options", options.len());

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalogue::Catalogue;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockCatalogues;
    use crate::services::ServiceError;

    fn entry(id: Option<i64>, name: &str) -> Catalogue {
        Catalogue {
            id: id.map(|id| RecordId::new(id).unwrap()),
            name: name.to_string(),
            ..Catalogue::default()
        }
    }

    #[tokio::test]
    async fn options_are_sorted_and_skip_entries_without_id() {
        let mut reader = MockCatalogues::new();
        reader
            .expect_list_catalogues()
            .withf(|kind| kind == IDENTIFICATION_TYPE)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    entry(Some(2), "Passport"),
                    entry(None, "Draft"),
                    entry(Some(1), " Identity card "),
                ])
            });

        let options = load_options(&reader, IDENTIFICATION_TYPE).await.unwrap();

        assert_eq!(
            options,
            vec![
                SelectOption {
                    id: RecordId::new(1).unwrap(),
                    label: "Identity card".to_string(),
                },
                SelectOption {
                    id: RecordId::new(2).unwrap(),
                    label: "Passport".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn lookup_failure_is_propagated() {
        let mut reader = MockCatalogues::new();
        reader
            .expect_list_catalogues()
            .returning(|_| Err(RepositoryError::Connection("refused".to_string())));

        let result = load_options(&reader, EVENT_TYPE).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::Connection(_)))
        ));
    }
}
