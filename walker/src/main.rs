use anyhow::Result;
use clap::Parser;
use tracing::info;

use walker::{load_config, load_layout, Args, Script, Session};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let cfg = load_config(&args.config)?;
    info!(?cfg, "Walker config loaded");

    let layout = args.layout.as_deref().map(load_layout).transpose()?;
    let mut session = Session::new(&cfg, layout.as_ref())?;

    if let Some(path) = &args.script {
        let script = Script::load(path)?;
        session.run_script(&script)?;
    }
    session.idle(args.frames)?;

    let save_to = args
        .save_out
        .as_deref()
        .or_else(|| args.layout.as_deref().filter(|_| cfg.session.autosave));
    if let Some(path) = save_to {
        session.save_layout(path)?;
    }

    println!("{}", serde_json::to_string_pretty(&session.summary())?);
    Ok(())
}
