use clap::Parser;
use folio::cli::{Args, OutputNames};
use folio::{BatchConverter, DocumentAssembler, NamedArchive, PipelineError};
use log::info;
use std::env;
use std::fs;

// Many short-lived pixel buffers per archive; mimalloc keeps fragmentation down.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "folio=info,folio_core=info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    let settings = args.settings()?;
    fs::create_dir_all(&args.out_dir)?;

    let mut names = OutputNames::new();
    let mut archives = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let bytes = fs::read(input)?;
        archives.push(NamedArchive::new(names.stem_for(input), bytes));
    }

    let converter = BatchConverter::new(DocumentAssembler::new(), settings);
    let outcomes = converter
        .run(archives, |p| {
            info!("[{}/{}] {} {}", p.completed, p.total, p.archive, if p.succeeded { "done" } else { "failed" });
        })
        .await;

    let mut failed = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(doc) => {
                let pdf_path = args.out_dir.join(format!("{}.pdf", outcome.name));
                fs::write(&pdf_path, &doc.bytes)?;
                if args.report {
                    let report_path = args.out_dir.join(format!("{}.report.json", outcome.name));
                    fs::write(&report_path, doc.report.to_json()?)?;
                }
                println!(
                    "{}: {} pages, {} processed, {} skipped, {} errors",
                    pdf_path.display(),
                    doc.report.page_count,
                    doc.report.processed_count,
                    doc.report.skipped_count,
                    doc.report.errors.len()
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}", outcome.name, e);
            }
        }
    }

    if failed > 0 {
        return Err(PipelineError::Other(format!(
            "{} of {} archives could not be converted",
            failed,
            args.inputs.len()
        )));
    }
    Ok(())
}
