use std::path::PathBuf;

use blockfall_engine::{GameSession, PieceSeed};

use crate::{
    command::OutputFormat,
    model::{brain_model::BrainModel, report::SessionReport},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Board width in cells
    #[clap(long, default_value_t = 10)]
    pub(crate) width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = 20)]
    pub(crate) height: usize,
    /// Stop after this many pieces have settled
    #[clap(long)]
    pub(crate) max_pieces: Option<usize>,
    /// Piece sequence seed (32 hex characters); random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Path to the brain model file (JSON format); built-in defaults when omitted
    #[clap(long)]
    pub(crate) model: Option<PathBuf>,
    /// Report format: text or json
    #[clap(long, default_value = "text")]
    pub(crate) format: OutputFormat,
    /// Write the report to this file instead of stdout
    #[clap(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        width,
        height,
        max_pieces,
        seed,
        model,
        format,
        output,
    } = arg;

    anyhow::ensure!(
        *width > 0 && *height > 0,
        "board dimensions must be positive (got {width}x{height})"
    );

    let model = BrainModel::load(model.as_deref())?;
    let brain = model.to_brain();
    let mut session = match seed {
        Some(seed) => GameSession::with_seed(*width, *height, *seed),
        None => GameSession::new(*width, *height),
    };
    tracing::info!(seed = %session.seed(), width, height, "starting session");

    let stats = brain.play_session(&mut session, *max_pieces);
    tracing::info!(
        pieces = stats.completed_pieces(),
        rows = stats.total_cleared_rows(),
        score = stats.score(),
        "session finished"
    );

    let report = SessionReport::new(&model.name, &session);
    Output::from_output_path(output.clone())?.write_report(&report, *format)
}
