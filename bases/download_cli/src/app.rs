use crate::config::AppConfig;
use crate::output::OutputHandler;
use color_eyre::Result;
use media_downloader::DownloadOrchestrator;
use session_primitives::EventLog;
use title_resolver::TitleResolver;

pub struct App {
    config: AppConfig,
    output: OutputHandler,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let output = OutputHandler::new(config.verbose);
        Self { config, output }
    }

    pub async fn run(&self) -> Result<()> {
        let events = EventLog::default();
        let printer = self.output.spawn(events.subscribe());

        let outcome = self.session(events).await;

        // Every sender is gone once the session returns, so the printer drains and stops
        printer.await?;
        outcome
    }

    /// Resolve the URL and download what it names, reporting through `events`.
    async fn session(&self, events: EventLog) -> Result<()> {
        let url = self.config.url.trim();
        if url.is_empty() {
            events.failure("Please enter a Spotify link");
            return Ok(());
        }

        events.success("Fetching track info...");

        let resolver = TitleResolver::new(self.config.resolver.clone(), events.clone())?;
        let titles = resolver.resolve(url).await;
        if titles.is_empty() {
            events.failure("No valid titles found");
            return Ok(());
        }

        events.success(format!(
            "Found {} track(s). Starting download...",
            titles.len()
        ));

        let orchestrator =
            DownloadOrchestrator::new(self.config.downloader.clone(), events.clone()).await?;
        events.success(format!("Saving to {}", orchestrator.destination().display()));

        // Downloads run on their own task; this one only waits for the report
        let worker = tokio::spawn(async move { orchestrator.run(&titles).await });
        let report = worker.await?;

        let summary = format!(
            "Finished: {} downloaded, {} skipped",
            report.succeeded(),
            report.skipped()
        );
        if report.succeeded() > 0 {
            events.success(summary);
        } else {
            events.failure(summary);
        }

        Ok(())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use chrono::NaiveDate;
    use clap::Parser;
    use session_primitives::SessionEvent;
    use tempfile::TempDir;
    use tokio::sync::broadcast::Receiver;

    fn app(url: &str, root: &TempDir) -> App {
        let args = Args::try_parse_from([
            "spotidownload",
            url,
            "--output-dir",
            root.path().to_str().unwrap(),
        ])
        .unwrap();
        let started_at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        App::new(AppConfig::from_args(args, started_at).unwrap())
    }

    fn messages(rx: &mut Receiver<SessionEvent>) -> Vec<(String, bool)> {
        std::iter::from_fn(|| rx.try_recv().ok())
            .map(|event| (event.message, event.success))
            .collect()
    }

    #[tokio::test]
    async fn empty_url_asks_for_a_link() {
        let root = TempDir::new().unwrap();
        let app = app("   ", &root);
        let events = EventLog::default();
        let mut rx = events.subscribe();

        app.session(events).await.unwrap();

        assert_eq!(
            messages(&mut rx),
            vec![("Please enter a Spotify link".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn foreign_url_stops_before_downloading() {
        let root = TempDir::new().unwrap();
        let app = app("https://www.youtube.com/watch?v=abc", &root);
        let events = EventLog::default();
        let mut rx = events.subscribe();

        app.session(events).await.unwrap();

        let messages = messages(&mut rx);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ("Fetching track info...".to_string(), true));
        assert!(messages[1].0.starts_with("Not a valid Spotify URL"));
        assert!(!messages[1].1);
        assert_eq!(messages[2], ("No valid titles found".to_string(), false));
        assert!(
            !root.path().join("Music").exists(),
            "no session directory should be created without titles"
        );
    }
}
