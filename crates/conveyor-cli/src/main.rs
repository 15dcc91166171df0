use std::sync::Arc;

use chrono::Utc;
use tokio::time::{Duration, sleep};

use conveyor_core::app::{DEFAULT_FETCH_LIMIT, EnqueueService, PromotionService, TaskFetchService};
use conveyor_core::domain::{EntityKeyFactory, QueueConfig, TaskRecord};
use conveyor_core::impls::{MemoryStore, NullQueue};
use conveyor_core::ports::SystemClock;

#[tokio::main]
async fn main() {
    // (A) Wire the emulator graph by hand: in-memory store, no real queue.
    let store = Arc::new(MemoryStore::new());
    let config = QueueConfig::emulator("localhost:8081");
    let enqueue = EnqueueService::new(config, store.clone(), Arc::new(NullQueue::new()))
        .expect("valid emulator config");
    let fetch = TaskFetchService::new(store.clone());
    let promotion = PromotionService::new(store.clone(), SystemClock);

    // (B) Enqueue a few tasks. In emulator mode each becomes a pending
    // document keyed by the task's entity key.
    let keys = EntityKeyFactory::new();
    for n in 1..=3 {
        let task = TaskRecord::new(
            keys.build_for_new(TaskRecord::KIND),
            format!("/work/{n}"),
            "POST",
            serde_json::json!({ "n": n }),
            None,
            Utc::now(),
        );
        enqueue.enqueue(&task, None).await.expect("enqueue");
        println!("enqueued task: {}", task.key());
    }

    let pending = fetch.fetch(DEFAULT_FETCH_LIMIT).await.expect("fetch");
    println!("pending before promotion: {}", pending.len());

    // (C) One promotion tick: each pending task becomes a task process,
    // atomically, and the pending document disappears.
    let report = promotion.execute().await.expect("promotion tick");
    for process in &report.created {
        println!(
            "promoted: {} (uri={}, created_at={})",
            process.key(),
            process.relative_uri(),
            process.created_at()
        );
    }
    for failure in &report.failures {
        println!("failed: {} ({})", failure.task_key, failure.error);
    }

    // (D) A second tick finds nothing to do: committed promotions leave no
    // pending documents behind.
    sleep(Duration::from_millis(50)).await;
    let report = promotion.execute().await.expect("promotion tick");
    println!(
        "second tick: created={} failures={}",
        report.created.len(),
        report.failures.len()
    );

    let pending = fetch.fetch(DEFAULT_FETCH_LIMIT).await.expect("fetch");
    println!("pending after promotion: {}", pending.len());
}
