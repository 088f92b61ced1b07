//! Batch export: owner's records to a downloadable payload.
//!
//! Read-only mirror of the import path: fetch every lead the owner has,
//! newest first, hand the ordered set to the format adapter, and wrap the
//! bytes with the MIME type and a timestamped filename.

use chrono::Utc;

use crate::api::logs::{log_info, log_success};
use crate::error::{ExportError, ExportResult};
use crate::format::Format;
use crate::models::ExportPayload;
use crate::storage::LeadStore;

/// Export every lead owned by `user_id` in the given format.
pub async fn export_batch<S: LeadStore>(
    store: &S,
    user_id: &str,
    format: Format,
) -> ExportResult<ExportPayload> {
    if user_id.trim().is_empty() {
        return Err(ExportError::MissingUserId);
    }

    let leads = store.list_by_owner(user_id).await?;
    log_info(format!("Exporting {} leads as {format}...", leads.len()));

    let bytes = format.adapter().encode(&leads)?;
    let filename = format!(
        "leads_export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    log_success(format!("Wrote {} ({} bytes)", filename, bytes.len()));

    Ok(ExportPayload {
        mime_type: format.mime_type().to_string(),
        filename,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lead;
    use crate::pipeline::import::import_batch;
    use crate::storage::MemoryLeadStore;

    fn lead(address: &str) -> Lead {
        Lead {
            user_id: "user-1".into(),
            address: address.into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            county: Some("Sangamon".into()),
            owner_name: Some("Jane Doe".into()),
            owner_phone: Some("+12175551234".into()),
            owner_email: Some("jane@example.com".into()),
            property_type: "Single Family".into(),
            bedrooms: Some(3),
            bathrooms: Some(2.5),
            square_feet: Some(1450),
            year_built: Some(1962),
            estimated_value: Some(185000.0),
            estimated_equity: Some(92000.5),
            mortgage_balance: Some(93000.0),
            last_sale_date: Some("2019-06-01".into()),
            last_sale_price: Some(150000.0),
            status: "Contacted".into(),
            notes: Some("call after 5pm, not before".into()),
        }
    }

    #[tokio::test]
    async fn test_missing_user_id_fails_fast() {
        let store = MemoryLeadStore::new();
        let result = export_batch(&store, "", Format::Csv).await;
        assert!(matches!(result, Err(ExportError::MissingUserId)));
    }

    #[tokio::test]
    async fn test_csv_payload_metadata() {
        let store = MemoryLeadStore::new();
        let payload = export_batch(&store, "user-1", Format::Csv).await.unwrap();
        assert_eq!(payload.mime_type, "text/csv");
        assert!(payload.filename.starts_with("leads_export_"));
        assert!(payload.filename.ends_with(".csv"));
    }

    #[tokio::test]
    async fn test_excel_payload_metadata() {
        let store = MemoryLeadStore::new();
        let payload = export_batch(&store, "user-1", Format::Excel).await.unwrap();
        assert!(payload.mime_type.contains("spreadsheetml"));
        assert!(payload.filename.ends_with(".xlsx"));
    }

    #[tokio::test]
    async fn test_export_is_read_only() {
        let store = MemoryLeadStore::new();
        store.insert_batch(&[lead("1 Elm")]).await.unwrap();
        export_batch(&store, "user-1", Format::Csv).await.unwrap();
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn test_csv_round_trip_preserves_fields() {
        let source = MemoryLeadStore::new();
        source
            .insert_batch(&[lead("123 Main St"), lead("456 Oak Ave")])
            .await
            .unwrap();

        let payload = export_batch(&source, "user-1", Format::Csv).await.unwrap();

        // re-import the exported file into a fresh store
        let target = MemoryLeadStore::new();
        let report = import_batch(&target, &payload.bytes, Format::Csv, "user-1")
            .await
            .unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.failed, 0);

        // records are field-equal apart from fresh ids and timestamps
        let mut originals = source.list_by_owner("user-1").await.unwrap();
        let mut reimported = target.list_by_owner("user-1").await.unwrap();
        originals.sort_by(|a, b| a.lead.address.cmp(&b.lead.address));
        reimported.sort_by(|a, b| a.lead.address.cmp(&b.lead.address));
        assert_eq!(originals.len(), reimported.len());
        for (orig, re) in originals.iter().zip(&reimported) {
            assert_eq!(orig.lead, re.lead);
        }
    }

    #[tokio::test]
    async fn test_excel_round_trip_preserves_fields() {
        let source = MemoryLeadStore::new();
        source.insert_batch(&[lead("77 Birch Ln")]).await.unwrap();

        let payload = export_batch(&source, "user-1", Format::Excel)
            .await
            .unwrap();

        let target = MemoryLeadStore::new();
        import_batch(&target, &payload.bytes, Format::Excel, "user-1")
            .await
            .unwrap();

        let originals = source.list_by_owner("user-1").await.unwrap();
        let reimported = target.list_by_owner("user-1").await.unwrap();
        assert_eq!(originals[0].lead, reimported[0].lead);
    }
}
