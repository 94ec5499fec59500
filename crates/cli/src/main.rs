use anyhow::{bail, Context, Result};
use barcut::cutting::{CuttingCfg, Event, Session, Stage};
use barcut::document::BarDocument;
use barcut::sample::{draw_system, ReplayToken, SystemCfg};
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

use input::{read_json, CutInput, ReplayInput};
use provenance::{report_block, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "barcut")]
#[command(about = "Cut calibrated score systems into bar boxes")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Overrides for the cutting configuration (file values otherwise). Only the
/// event-driven commands take them; `cut` has no finishing threshold.
#[derive(Args)]
struct CuttingArgs {
    /// Position along the top edge past which a break point finishes a system
    #[arg(long)]
    threshold: Option<f64>,
    /// Drop the break point that finished a system instead of keeping it
    #[arg(long)]
    exclude_trigger: bool,
}

impl CuttingArgs {
    fn apply(&self, base: CuttingCfg) -> Result<CuttingCfg> {
        let mut cfg = base;
        if let Some(t) = self.threshold {
            if !t.is_finite() || t <= 0.0 {
                bail!("--threshold must be a positive number, got {t}");
            }
            cfg.finish_threshold = t;
        }
        if self.exclude_trigger {
            cfg.include_trigger_point = false;
        }
        Ok(cfg)
    }
}

#[derive(Subcommand)]
enum Action {
    /// Partition recorded system calibrations into bar boxes
    Cut {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Replay recorded pointer events through the cutting workflow
    Replay {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[command(flatten)]
        cutting: CuttingArgs,
    },
    /// Cut synthetic systems drawn from a seed
    Demo {
        #[arg(long, default_value_t = 2025)]
        seed: u64,
        #[arg(long, default_value_t = 3)]
        count: u64,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<String>,
        #[command(flatten)]
        cutting: CuttingArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Cut { input, out } => cut(input, out),
        Action::Replay {
            input,
            out,
            cutting,
        } => replay(input, out, &cutting),
        Action::Demo {
            seed,
            count,
            out,
            cutting,
        } => demo(seed, count, out, &cutting),
        Action::Report => report(),
    }
}

fn cut(input: String, out: String) -> Result<()> {
    tracing::info!(input, out, "cut");
    let parsed: CutInput = read_json(&input)?;
    let mut doc = BarDocument::new();
    for (k, sys) in parsed.systems.iter().enumerate() {
        match doc.add_system(
            sys.page,
            sys.top_left,
            sys.top_right,
            sys.staff_height,
            &sys.break_points,
        ) {
            Ok(bars) => tracing::info!(system = k, page = sys.page, bars = bars.len(), "system cut"),
            Err(err) => tracing::warn!(system = k, page = sys.page, %err, "system skipped"),
        }
    }
    let params = serde_json::json!({ "input": input, "systems": parsed.systems.len() });
    write_document(&out, &doc, Payload::new("cut", params))
}

fn replay(input: String, out: String, args: &CuttingArgs) -> Result<()> {
    tracing::info!(input, out, "replay");
    let parsed: ReplayInput = read_json(&input)?;
    let cfg = args.apply(parsed.cfg.unwrap_or_default())?;
    let mut session = Session::new(cfg);
    for page in &parsed.pages {
        session.load_page(page.page)?;
        feed(&mut session, &page.events);
    }
    let params = serde_json::json!({ "input": input, "cfg": cfg });
    write_document(&out, session.document(), Payload::new("replay", params))
}

fn demo(seed: u64, count: u64, out: Option<String>, args: &CuttingArgs) -> Result<()> {
    tracing::info!(seed, count, "demo");
    let cfg = args.apply(CuttingCfg::default())?;
    let base = SystemCfg::default();
    let mut session = Session::new(cfg);
    session.load_page(1)?;
    for index in 0..count {
        let mut sys_cfg = base;
        // Stack systems down the page below each other.
        sys_cfg.origin.y += index as f64 * (base.staff_height.1 + 80.0);
        let sys = draw_system(&sys_cfg, ReplayToken { seed, index });
        feed(&mut session, &sys.events());
    }
    match out {
        Some(out) => {
            let params = serde_json::json!({ "seed": seed, "count": count, "cfg": cfg });
            write_document(&out, session.document(), Payload::new("demo", params))
        }
        None => {
            println!("{}", serde_json::to_string_pretty(session.document())?);
            Ok(())
        }
    }
}

/// Feed events, logging (not failing on) the ones the workflow rejects, the
/// way an interactive shell ignores a bad click.
fn feed(session: &mut Session, events: &[Event]) {
    for (k, ev) in events.iter().enumerate() {
        if let Err(err) = session.handle(*ev) {
            tracing::warn!(page = session.page(), event = k, %err, "event rejected");
        }
    }
    if !matches!(session.stage(), Stage::TopLeft { .. }) {
        tracing::warn!(
            page = session.page(),
            stage = session.stage().name(),
            "unfinished system discarded"
        );
    }
}

fn write_document(out: &str, doc: &BarDocument, payload: Payload) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {out}"))?;
    let prov = write_sidecar(out_path, payload)?;
    tracing::info!(
        systems = doc.system_count(),
        bars = doc.bar_count(),
        provenance = %prov.display(),
        "wrote bar document"
    );
    Ok(())
}

fn report() -> Result<()> {
    let block = report_block(&Payload::new("report", serde_json::json!({})));
    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}
