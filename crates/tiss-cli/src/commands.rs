use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use tiss_cli::export::{write_guia_summary_csv, write_visualization_json};
use tiss_cli::logging::redact_value;
use tiss_model::{InspectionMode, LineItem, LoteData, OutputOptions, load_items, load_lote};
use tiss_transform::{build_financeiro_visualization, inspect_batch};

use crate::cli::{BatchArgs, InspectArgs, SummaryArgs, VisualizeArgs};
use crate::types::RunResult;

fn load_batch(args: &BatchArgs) -> Result<(LoteData, Vec<LineItem>)> {
    let lote = load_lote(&args.lote)
        .with_context(|| format!("load batch record {}", args.lote.display()))?;
    let items = load_items(&args.items)
        .with_context(|| format!("load line items {}", args.items.display()))?;
    info!(item_count = items.len(), "batch loaded");
    Ok((lote, items))
}

fn inspection_mode(strict: bool) -> InspectionMode {
    if strict {
        InspectionMode::Strict
    } else {
        InspectionMode::Permissive
    }
}

pub fn run_visualize(args: &VisualizeArgs) -> Result<RunResult> {
    let span = info_span!("visualize", lote = %args.batch.lote.display());
    let _guard = span.enter();
    let options = OutputOptions::new()
        .with_pretty(args.pretty)
        .with_inspection(inspection_mode(args.strict));

    let (lote, items) = load_batch(&args.batch)?;
    let inspection = inspect_batch(&lote, &items);
    if inspection.blocks(options.inspection) {
        warn!(
            errors = inspection.error_count(),
            warnings = inspection.warning_count(),
            "strict mode: output not written"
        );
        return Ok(RunResult {
            view: None,
            inspection,
            blocked: true,
        });
    }

    let start = Instant::now();
    let view = build_financeiro_visualization(&lote, &items);
    for guia in &view.processed_data.guias {
        debug!(
            guia = %guia.numero_guia_prestador,
            beneficiario = %redact_value(&guia.nome_beneficiario),
            itens = guia.item_count(),
            "guia processed"
        );
    }
    info!(
        guia_count = view.processed_data.guias.len(),
        duration_ms = start.elapsed().as_millis(),
        "visualization built"
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output file {}", path.display()))?;
            write_visualization_json(BufWriter::new(file), &view, &options)?;
            info!(output = %path.display(), "visualization written");
        }
        None => write_visualization_json(io::stdout().lock(), &view, &options)?,
    }

    Ok(RunResult {
        view: Some(view),
        inspection,
        blocked: false,
    })
}

pub fn run_summary(args: &SummaryArgs) -> Result<RunResult> {
    let span = info_span!("summary", lote = %args.batch.lote.display());
    let _guard = span.enter();
    let (lote, items) = load_batch(&args.batch)?;
    let view = build_financeiro_visualization(&lote, &items);
    if let Some(path) = &args.csv {
        let file =
            File::create(path).with_context(|| format!("create csv file {}", path.display()))?;
        write_guia_summary_csv(BufWriter::new(file), &view.processed_data)?;
        info!(output = %path.display(), "csv summary written");
    }
    let inspection = inspect_batch(&lote, &items);
    Ok(RunResult {
        view: Some(view),
        inspection,
        blocked: false,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<RunResult> {
    let span = info_span!("inspect", lote = %args.batch.lote.display());
    let _guard = span.enter();
    let (lote, items) = load_batch(&args.batch)?;
    let inspection = inspect_batch(&lote, &items);
    let blocked = inspection.blocks(inspection_mode(args.strict));
    info!(
        errors = inspection.error_count(),
        warnings = inspection.warning_count(),
        blocked,
        "inspection complete"
    );
    Ok(RunResult {
        view: None,
        inspection,
        blocked,
    })
}
