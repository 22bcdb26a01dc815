use std::path::PathBuf;

use blockfall_brain::score;

use crate::{
    command::OutputFormat,
    model::{brain_model::BrainModel, report::EvaluationReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// ASCII board file: rows top to bottom, `.` empty, a piece letter settled
    pub(crate) board_path: PathBuf,
    /// Board height; the drawing is aligned to the floor
    #[clap(long, default_value_t = 20)]
    pub(crate) height: usize,
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

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        board_path,
        height,
        model,
        format,
        output,
    } = arg;

    let model = BrainModel::load(model.as_deref())?;
    let board = util::read_board_file(board_path, *height)?;
    let report = EvaluationReport::new(&board, score(&board, &model.coefficients));
    tracing::debug!(score = report.score, "evaluated board");

    Output::from_output_path(output.clone())?.write_report(&report, *format)
}
