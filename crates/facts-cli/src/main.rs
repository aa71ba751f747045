use serde::Serialize;
use std::error::Error;
use std::sync::Arc;

use facts_core::app::command::{CreateFact, DeleteFact, UpdateFact};
use facts_core::app::query::{AllFacts, FactById, FactCount, RandomFact};
use facts_core::config::AppConfig;
use facts_core::impls::{InMemoryFactStore, InMemoryMetrics, MetricsSnapshot, StoreStats};
use facts_core::{AppBuilder, Application, Context, Fact};

/// 実行後に JSON で出力するサマリ
#[derive(Debug, Serialize)]
struct Summary {
    store: StoreStats,
    metrics: MetricsSnapshot,
}

fn show(label: &str, fact: &Fact) {
    println!("{label}: id={} text={:?} source={:?}", fact.id(), fact.text(), fact.source());
}

/// 同じ Fact に対する更新を並行に投げる（競合はストア内で吸収される）
async fn concurrent_updates(app: &Application, config: &AppConfig, id: &str, n: usize) -> Result<(), Box<dyn Error>> {
    let mut tasks = Vec::with_capacity(n);
    for i in 0..n {
        let app = app.clone();
        let ctx = Context::with_timeout(config.request_timeout);
        let cmd = UpdateFact::new(id, format!("Cats purr (revision {i})"), "wiki");
        tasks.push(tokio::spawn(async move { app.commands.update_fact.handle(&ctx, cmd).await }));
    }
    for task in tasks {
        task.await??;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // (A) 設定とログ
    let config = AppConfig::from_env()?;
    facts_core::logging::init(config.log_profile);
    tracing::info!(?config, "starting facts demo");

    // (B) ストアとメトリクスを用意して Application を組み立てる
    let store = Arc::new(InMemoryFactStore::new(config.retry_policy()));
    let metrics = Arc::new(InMemoryMetrics::new());
    let app = AppBuilder::new()
        .repository(store.clone())
        .read_model(store.clone())
        .metrics(metrics.clone())
        .build()?;

    let ctx = || Context::with_timeout(config.request_timeout);

    // (C) 作成 → 取得 → 更新
    let id = app.next_fact_id();
    app.commands
        .create_fact
        .handle(&ctx(), CreateFact::new(id.clone(), "Cats purr", "wiki"))
        .await?;
    show("created", &app.queries.fact_by_id.handle(&ctx(), FactById::new(id.clone())).await?);

    for (text, source) in [
        ("Owls cannot move their eyes", "book"),
        ("Octopuses have three hearts", "aquarium"),
    ] {
        app.commands
            .create_fact
            .handle(&ctx(), CreateFact::new(app.next_fact_id(), text, source))
            .await?;
    }

    app.commands
        .update_fact
        .handle(&ctx(), UpdateFact::new(id.clone(), "Cats purr loudly", "wiki"))
        .await?;
    show("updated", &app.queries.fact_by_id.handle(&ctx(), FactById::new(id.clone())).await?);

    concurrent_updates(&app, &config, id.as_str(), 16).await?;
    show("after concurrent updates", &app.queries.fact_by_id.handle(&ctx(), FactById::new(id.clone())).await?);

    // (D) ランダムに数件
    for _ in 0..3 {
        show("random", &app.queries.random_fact.handle(&ctx(), RandomFact::any()).await?);
    }

    let count = app.queries.fact_count.handle(&ctx(), FactCount).await?;
    println!("stored facts: {count}");
    for fact in app.queries.all_facts.handle(&ctx(), AllFacts).await? {
        show("listed", &fact);
    }

    // (E) 不正な入力はそのまま呼び出し側に返る
    if let Err(err) = app
        .commands
        .create_fact
        .handle(&ctx(), CreateFact::new(app.next_fact_id(), "x".repeat(1001), "wiki"))
        .await
    {
        println!("rejected: kind={:?} slug={} error={err}", err.kind(), err.slug());
    }

    // (F) 削除後は NotFound
    app.commands.delete_fact.handle(&ctx(), DeleteFact::new(id.clone())).await?;
    if let Err(err) = app.queries.fact_by_id.handle(&ctx(), FactById::new(id)).await {
        println!("after delete: slug={} error={err}", err.slug());
    }

    let summary = Summary {
        store: store.stats()?,
        metrics: metrics.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
