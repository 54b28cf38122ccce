use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use models::client::ClientInput;
use models::finance::{FinancialKind, FinancialRecord, FinancialRecordInput, FinancialSummary, ReceivableStatus};
use models::service_record::ServiceInput;
use models::stock::StockItemInput;
use service::errors::ServiceError;
use service::notify::RecordingNotifier;
use service::records::RecordCollection;
use service::storage::{FileKvStore, KvSubstrate, MemoryKvStore};
use service::RecordStore;

fn setup() -> (RecordStore, MemoryKvStore, Arc<RecordingNotifier>) {
    let kv = MemoryKvStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let store = RecordStore::new(Arc::new(kv.clone()), notifier.clone());
    (store, kv, notifier)
}

fn palio() -> ServiceInput {
    ServiceInput {
        client_name: "Maria".into(),
        car: "Fiat Palio".into(),
        plate: "ABC1234".into(),
        model: "ELX".into(),
        year: "2010".into(),
    }
}

fn income_total(records: &[FinancialRecord]) -> Decimal {
    records
        .iter()
        .filter(|r| r.kind == FinancialKind::Income)
        .map(|r| r.amount)
        .sum()
}

#[tokio::test]
async fn scenario_a_add_client() -> anyhow::Result<()> {
    let (store, _, notifier) = setup();
    store
        .clients()
        .add(ClientInput { name: "Maria".into(), phone: "51999999999".into(), address: Some("".into()) })
        .await?;

    let clients = store.clients().list().await;
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Maria");
    assert_eq!(clients[0].phone, "51999999999");
    assert!(!clients[0].id.is_empty());
    assert!(notifier.is_empty());
    Ok(())
}

#[tokio::test]
async fn scenario_b_service_with_billing() -> anyhow::Result<()> {
    let (store, _, _) = setup();
    store.services().register(palio(), Some(Decimal::new(200, 0))).await?;

    assert_eq!(store.services().list().await.len(), 1);
    let ledger = store.finance().list().await;
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, FinancialKind::ServiceReceivable);
    assert_eq!(ledger[0].amount, Decimal::new(200, 0));
    assert_eq!(ledger[0].status, Some(ReceivableStatus::Pending));
    Ok(())
}

#[tokio::test]
async fn scenario_c_receive_payment() -> anyhow::Result<()> {
    let (store, _, _) = setup();
    let reg = store.services().register(palio(), Some(Decimal::new(200, 0))).await?;
    let receivable_id = reg.receivable.expect("billed").id;

    store.finance().update_status(&receivable_id, ReceivableStatus::Received).await?;

    let ledger = store.finance().list().await;
    assert_eq!(ledger.len(), 2);
    let original = ledger.iter().find(|r| r.id == receivable_id).expect("original kept");
    assert_eq!(original.status, Some(ReceivableStatus::Received));
    assert!(original.payment_timestamp.is_some());
    let income: Vec<_> = ledger.iter().filter(|r| r.kind == FinancialKind::Income).collect();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].amount, Decimal::new(200, 0));
    Ok(())
}

#[tokio::test]
async fn scenario_d_clear_stock_then_delete_missing() -> anyhow::Result<()> {
    let (store, _, notifier) = setup();
    store.stock().add(StockItemInput::parse("Oil filter", "2", "20")?).await?;
    store.stock().add(StockItemInput::parse("Brake pad", "4", "85,50")?).await?;
    store.stock().clear().await?;
    assert!(store.stock().list().await.is_empty());

    let err = store.stock().delete_by_id("does-not-exist").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(!err.is_storage_fault());
    assert!(notifier.is_empty());
    Ok(())
}

#[tokio::test]
async fn pending_receivable_is_excluded_from_income_until_paid() -> anyhow::Result<()> {
    let (store, _, _) = setup();
    store.finance().add(FinancialRecordInput::parse(FinancialKind::Income, "Tire repair", "40")?).await?;
    let reg = store.services().register(palio(), Some(Decimal::new(200, 0))).await?;
    let receivable = reg.receivable.expect("billed");

    assert_eq!(income_total(&store.finance().list().await), Decimal::new(40, 0));
    assert_eq!(store.finance().summary().await?.total_income, Decimal::new(40, 0));

    store.finance().update_status(&receivable.id, ReceivableStatus::Received).await?;
    let ledger = store.finance().list().await;
    assert_eq!(income_total(&ledger), Decimal::new(240, 0));

    let summary = FinancialSummary::from_records(&ledger)?;
    assert_eq!(summary.total_income, Decimal::new(240, 0));
    assert_eq!(summary.total_pending, Decimal::ZERO);
    Ok(())
}

#[tokio::test]
async fn round_trip_preserves_fields_and_order() -> anyhow::Result<()> {
    let (store, _, _) = setup();
    let inputs = vec![
        ClientInput { name: "Carla".into(), phone: "1".into(), address: Some("Rua A, 10".into()) },
        ClientInput { name: "Bruno".into(), phone: "2".into(), address: None },
        ClientInput { name: "Ana".into(), phone: "3".into(), address: Some("".into()) },
    ];
    for input in &inputs {
        store.clients().add(input.clone()).await?;
    }

    let listed = store.clients().list().await;
    assert_eq!(listed.len(), inputs.len());
    for (client, input) in listed.iter().zip(&inputs) {
        assert_eq!(client.name, input.name);
        assert_eq!(client.phone, input.phone);
        assert_eq!(client.address, input.address);
    }
    let mut ids: Vec<&str> = listed.iter().map(|c| c.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    Ok(())
}

#[tokio::test]
async fn clear_is_total_and_next_add_starts_fresh() -> anyhow::Result<()> {
    let (store, kv, _) = setup();
    for _ in 0..3 {
        store.services().add(palio()).await?;
    }
    RecordCollection::clear(store.services()).await?;
    assert!(kv.get("services").await?.is_none());

    let fresh = store.services().add(palio()).await?;
    assert_eq!(store.services().list().await, vec![fresh]);
    Ok(())
}

#[tokio::test]
async fn persisted_layout_is_one_json_array_per_namespace() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("oficina_layout_{}", Uuid::new_v4()));
    let kv = FileKvStore::new(&dir).await?;
    let store = RecordStore::new(Arc::new(kv.clone()), Arc::new(RecordingNotifier::new()));

    store.services().register(palio(), Some(Decimal::new(200, 0))).await?;
    store.clients().add(ClientInput { name: "Maria".into(), phone: "51999999999".into(), address: None }).await?;

    let raw = kv.get("financialRecords").await?.expect("ledger written");
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["kind"], "serviceReceivable");
    assert_eq!(entries[0]["status"], "pending");
    assert!(entries[0]["amount"].is_number());
    assert!(raw.contains(r#""amount":200"#));
    assert!(entries[0]["serviceId"].is_string());

    let raw = tokio::fs::read_to_string(dir.join("services.json")).await?;
    let services: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(services[0]["clientName"], "Maria");
    assert_eq!(services[0]["plate"], "ABC1234");

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn extreme_amounts_survive_the_file_store() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("oficina_amounts_{}", Uuid::new_v4()));
    let notifier = Arc::new(RecordingNotifier::new());
    let store = RecordStore::new(Arc::new(FileKvStore::new(&dir).await?), notifier.clone());

    let gold = store.stock().add(StockItemInput::parse("Gold", "1", "79228162514264337593543950335")?).await?;
    let big = store.finance().add(FinancialRecordInput::parse(FinancialKind::Income, "Big", "12345678901234567,89")?).await?;

    let reopened = RecordStore::new(Arc::new(FileKvStore::new(&dir).await?), notifier.clone());
    assert_eq!(reopened.stock().list().await, vec![gold]);
    assert_eq!(reopened.finance().list().await, vec![big]);
    reopened.stock().add(StockItemInput::parse("Bolt", "4", "1,25")?).await?;
    assert_eq!(reopened.stock().list().await.len(), 2);
    assert!(notifier.is_empty());

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn unreadable_store_lists_empty_and_notifies() -> anyhow::Result<()> {
    let (store, kv, notifier) = setup();
    kv.set("appointments", "not json".into()).await?;

    assert!(store.appointments().list().await.is_empty());
    let notices = notifier.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Storage error");
    Ok(())
}
