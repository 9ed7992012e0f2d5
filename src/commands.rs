//! CLI command handlers. Each builds its own session context and goes through the repository.

use {
    crate::{
        Cli, Command, FlagArgs, HotspotArgs, MapArgs,
        analysis::MapFilter,
        app::{HotspotMap, ZoneDisplayMode},
        data::{ReportRepository, SqliteDocumentStore, import_file},
        output::{HotspotRow, MapRow, ZoneRow, describe_session, render},
        utils::now_utc,
    },
    anyhow::{Context, Result, bail},
    chrono::{DateTime, Utc},
    serde_json::{Value, json},
    std::sync::Arc,
};

pub async fn execute(cli: Cli) -> Result<()> {
    let db = cli.db.to_string_lossy().into_owned();
    let store = Arc::new(SqliteDocumentStore::new(&db).await?);
    let repo = ReportRepository::new(store);
    let now = cli.now.unwrap_or_else(now_utc);

    match cli.command {
        Command::Import { file } => {
            let summary = import_file(repo.store().as_ref(), &file).await?;
            for (collection, count) in &summary {
                println!("{:>6}  {}", count, collection);
            }
            log::info!("Imported {} into {}", file.display(), db);
        }
        Command::Hotspots(args) => hotspots(&repo, args, now).await?,
        Command::Map(args) => community_map(&repo, args, now).await?,
        Command::Whoami { email } => {
            let ctx = repo.resolve_session(email.as_deref()).await?;
            println!("{}", describe_session(&ctx));
        }
        Command::Submit { email, kind, file } => {
            let ctx = repo.resolve_session(Some(&email)).await?;
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let body: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            let out = repo.submit_report(&ctx, kind, body, now).await?;
            println!(
                "Submitted {} report {} ({} county notifications)",
                kind, out.id, out.notifications
            );
        }
        Command::Flag(FlagArgs {
            email,
            kind,
            id,
            flag,
            value,
        }) => {
            let ctx = repo.resolve_session(Some(&email)).await?;
            repo.set_flag(&ctx, kind, &id, flag, value).await?;
            println!("{} {}: {} = {}", kind, id, flag, value);
        }
    }
    Ok(())
}

async fn hotspots(repo: &ReportRepository, args: HotspotArgs, now: DateTime<Utc>) -> Result<()> {
    let ctx = repo.resolve_session(Some(&args.email)).await?;
    let mut map = HotspotMap::new(repo.hotspots(&ctx, now).await?);

    if let Some(report) = &args.report {
        if !map.show(report, args.mode) {
            bail!("Report {} is not on the hotspot map", report);
        }
    }

    if args.json {
        let out: Vec<Value> = map
            .hotspots()
            .iter()
            .map(|h| {
                let wanted = args.report.as_deref().is_none_or(|id| id == h.id);
                let zones = if wanted {
                    h.zones(args.mode)
                } else {
                    Vec::new()
                };
                json!({ "hotspot": h, "zones": zones })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", render(map.hotspots().iter().map(HotspotRow::from)));
    if let Some(layer) = map.active_layer() {
        println!(
            "\n{} ({}) around {}",
            layer.hotspot.name, args.mode, layer.center
        );
        println!("{}", render(layer.zones.iter().map(ZoneRow::from)));
    } else if args.report.is_some() && args.mode == ZoneDisplayMode::None {
        println!("\nNo zone mode selected.");
    }
    Ok(())
}

async fn community_map(repo: &ReportRepository, args: MapArgs, now: DateTime<Utc>) -> Result<()> {
    let filter = MapFilter {
        kind: args.kind,
        window: args.window,
    };
    let reports = repo.community_map(filter, now).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", render(reports.iter().map(MapRow::from)));
    }
    Ok(())
}
