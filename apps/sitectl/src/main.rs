use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dom::DocumentHost;
use site_ui::{
    dispatch_signal, pagination::PaginationEngine, result_dates, wait_until_present,
    InlineResultsPresenter, RetryPolicy, SearchModalController, SignalOutcome, WidgetSignal,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod page;

#[derive(Parser, Debug)]
#[command(name = "sitectl", about = "Drive the blog's pagination and search behavior offline")]
struct Cli {
    #[arg(long, default_value = "site.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the pagination list for a listing URL path.
    Paginate {
        #[arg(long, default_value = "/")]
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the date badge a search result URL would receive.
    Annotate {
        #[arg(long)]
        url: String,
    },
    /// Replay a search widget lifecycle against a page skeleton.
    SimulateSearch {
        #[arg(long)]
        query: String,
        #[arg(long = "result-url")]
        result_urls: Vec<String>,
        #[arg(long)]
        close: bool,
        #[arg(long)]
        inline: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    let settings = config::load_settings(&cli.config);
    info!(
        total_pages = settings.total_pages,
        window_size = settings.window_size,
        base_path = %settings.base_path,
        "sitectl: settings loaded"
    );

    match cli.command {
        Command::Paginate { path, json } => {
            let engine = PaginationEngine::with_selectors(
                settings.pagination_config(),
                settings.pagination.clone(),
            );
            if json {
                let links = engine.descriptors(&path);
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                let mut page = page::modal_layout(&path)?;
                engine.render(&mut page.doc)?;
                let list = page
                    .doc
                    .query(&settings.pagination.container)
                    .context("pagination container missing after render")?;
                println!("{}", page.doc.outer_html(list));
            }
        }
        Command::Annotate { url } => {
            let origin = settings.search_origin()?;
            match result_dates::extract_result_date(&url, &origin) {
                Ok(date) => println!("{}", result_dates::format_badge(date)),
                Err(err) => println!("no date badge: {err}"),
            }
        }
        Command::SimulateSearch {
            query,
            result_urls,
            close,
            inline,
        } => {
            let origin = settings.search_origin()?;
            let result_urls = if result_urls.is_empty() {
                sample_result_urls(&origin)
            } else {
                result_urls
            };
            if inline {
                simulate_inline(&settings, &origin, &result_urls, close).await?;
            } else {
                simulate_modal(&settings, &origin, &query, &result_urls, close)?;
            }
        }
    }

    Ok(())
}

fn sample_result_urls(origin: &str) -> Vec<String> {
    vec![
        format!("{origin}/2013/2/1/getting-started/"),
        format!("{origin}/2016/11/25/serverless-patterns/"),
    ]
}

fn simulate_modal(
    settings: &config::Settings,
    origin: &str,
    query: &str,
    result_urls: &[String],
    close: bool,
) -> Result<()> {
    let mut page = page::modal_layout("/")?;
    let mut controller = SearchModalController::with_selectors(origin, settings.search.clone());

    let signals = [
        WidgetSignal::Starting {
            name: "searchresults-only0".into(),
            query: query.to_string(),
        },
        WidgetSignal::Ready,
    ];
    let mut aborted = 0;
    for (step, signal) in signals.into_iter().enumerate() {
        aborted += report(step, dispatch_signal(&mut controller, &mut page.doc, signal));
    }

    for url in result_urls {
        page::add_result(&mut page.doc, page.results, url)?;
    }
    aborted += report(2, dispatch_signal(&mut controller, &mut page.doc, WidgetSignal::Rendered));
    if close {
        aborted += report(
            3,
            dispatch_signal(&mut controller, &mut page.doc, WidgetSignal::CloseRequested),
        );
    }
    if aborted > 0 {
        warn!(aborted, "sitectl: some signals were aborted; check the configured selectors");
    }

    println!("{}", page.doc.outer_html(page.doc.body()));
    println!("modal state: {}", controller.state());
    Ok(())
}

async fn simulate_inline(
    settings: &config::Settings,
    origin: &str,
    result_urls: &[String],
    close: bool,
) -> Result<()> {
    let mut page = page::inline_layout("/")?;
    let presenter = InlineResultsPresenter::with_selectors(origin, settings.inline.clone());

    let button = wait_until_present(|| presenter.clear_button(&page.doc), RetryPolicy::default())
        .await
        .context("search widget clear button never appeared")?;
    presenter.attach_clear_action(&mut page.doc, button)?;

    for url in result_urls {
        page::add_result(&mut page.doc, page.results, url)?;
    }
    let annotated = presenter.on_results_rendered(&mut page.doc)?;
    info!(annotated = annotated.annotated, "sitectl: inline results rendered");
    if close {
        presenter.on_search_cleared(&mut page.doc)?;
    }

    println!("{}", page.doc.outer_html(page.doc.body()));
    Ok(())
}

/// Logs one dispatch outcome; returns 1 when the handler aborted.
fn report(step: usize, outcome: SignalOutcome) -> usize {
    let aborted = usize::from(outcome.is_aborted());
    match outcome {
        SignalOutcome::Transition(transition) => {
            info!(step, state = %transition.state(), ?transition, "sitectl: signal handled")
        }
        SignalOutcome::Annotated(counts) => {
            info!(
                step,
                annotated = counts.annotated,
                skipped = counts.skipped,
                "sitectl: results annotated"
            )
        }
        SignalOutcome::Aborted { state, error } => {
            info!(step, %state, %error, "sitectl: signal aborted")
        }
    }
    aborted
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{domain::ModalState, error::SiteUiError};
    use site_ui::AnnotationReport;

    #[test]
    fn report_counts_only_aborted_outcomes() {
        let aborted = SignalOutcome::Aborted {
            state: ModalState::Closed,
            error: SiteUiError::missing(".searchbox-row"),
        };
        assert_eq!(report(0, aborted), 1);
        assert_eq!(
            report(1, SignalOutcome::Annotated(AnnotationReport::default())),
            0
        );
    }

    #[test]
    fn modal_simulation_opens_with_search_box_in_modal() {
        let mut page = page::modal_layout("/").expect("layout");
        let mut controller = SearchModalController::new("https://example.github.io");
        let outcome = dispatch_signal(
            &mut controller,
            &mut page.doc,
            WidgetSignal::Starting {
                name: "searchresults-only0".into(),
                query: "rust".into(),
            },
        );

        assert_eq!(report(0, outcome), 0);
        let search_box = page.doc.query("#___gcse_0").expect("search box");
        let modal_mount = page.doc.query(".searchbox-row").expect("modal mount");
        assert_eq!(page.doc.parent(search_box), Some(modal_mount));
    }
}
