//! Download command handler.
//!
//! Fetches the dataset archive with a terminal progress bar, extracts it
//! and removes it.

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use scenmeta_core::{DatasetSource, ResolvedPaths};
use scenmeta_download::{
    HttpArchiveSource, ProgressCallback, UnpackOptions, UnpackReport, fetch_and_unpack,
};

use crate::error::CliError;

/// Arguments for the download command.
#[derive(Debug, Default)]
pub struct DownloadArgs<'a> {
    pub work_dir: Option<&'a str>,
    pub dataset_id: Option<&'a str>,
    pub url: Option<&'a str>,
    pub keep_archive: bool,
    pub quiet: bool,
}

/// Execute the download command.
pub async fn execute(args: DownloadArgs<'_>) -> Result<(), CliError> {
    let dataset = DatasetSource::resolve(args.dataset_id, args.url)?;
    let paths = ResolvedPaths::resolve(args.work_dir, &dataset)?;
    let source = HttpArchiveSource::new()?;
    let options = UnpackOptions {
        keep_archive: args.keep_archive,
    };

    if !args.quiet {
        println!("Downloading {} from {}", dataset.id(), dataset.url());
    }

    let bar = (!args.quiet).then(download_bar);
    let callback: Option<ProgressCallback> = bar.clone().map(|pb| {
        Box::new(move |downloaded: u64, total: u64| {
            if total > 0 {
                pb.set_length(total);
            }
            pb.set_position(downloaded);
        }) as ProgressCallback
    });

    let result =
        fetch_and_unpack(&source, &dataset, &paths.layout, options, callback.as_ref()).await;
    if let Some(pb) = &bar {
        pb.finish_and_clear();
    }
    let report = result?;

    if !args.quiet {
        print_summary(&report);
    }
    Ok(())
}

fn download_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
        )
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓░"));
    pb.set_style(style);
    pb
}

fn print_summary(report: &UnpackReport) {
    println!("Downloaded {}", HumanBytes(report.archive_bytes));
    println!(
        "Extracted {} files ({} directories) into {}",
        report.extracted.files,
        report.extracted.directories,
        report.extract_dir.display()
    );
    if report.extracted.skipped > 0 {
        println!(
            "Skipped {} entries with unsafe paths",
            report.extracted.skipped
        );
    }
    if let Some(archive) = &report.archive_retained {
        println!("Archive kept at {}", archive.display());
    }
}
