use botnen_core::{refresh, RefreshLoop, RefreshReport};

use super::{emit, Context};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn report_expired(report: &RefreshReport) {
    if let Some(event) = report.expired_event() {
        if let Err(e) = emit(&event, false) {
            tracing::warn!(error = %e, "could not print expired countdowns");
        }
    }
}

pub fn status(ctx: &Context, json: bool) -> CmdResult {
    let mut store = ctx.open_store()?;
    let report = refresh(&mut store)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report_expired(&report);
        println!("{}", report.summary());
    }
    Ok(())
}

pub fn watch(ctx: &Context, ticks: Option<u64>) -> CmdResult {
    let mut store = ctx.open_store()?;
    let mut refresh_loop = RefreshLoop::new(ctx.config.refresh_interval());
    if let Some(ticks) = ticks {
        refresh_loop = refresh_loop.with_max_ticks(ticks);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let run = refresh_loop.run(&mut store, |report| {
            report_expired(report);
            println!("{}\n", report.summary());
        });
        tokio::select! {
            passes = run => tracing::debug!(passes, "refresh loop finished"),
            _ = tokio::signal::ctrl_c() => tracing::debug!("interrupted"),
        }
    });
    Ok(())
}
