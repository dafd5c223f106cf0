use chrono::Local;
use session_primitives::SessionEvent;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print events on a task of their own until every sender is dropped.
    pub fn spawn(&self, events: Receiver<SessionEvent>) -> JoinHandle<()> {
        let output = *self;
        tokio::spawn(async move { output.print_events(events).await })
    }

    async fn print_events(self, mut events: Receiver<SessionEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => println!("{}", self.format_event(&event)),
                Err(RecvError::Lagged(missed)) => {
                    eprintln!("({missed} messages dropped, output could not keep up)")
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    pub fn format_event(&self, event: &SessionEvent) -> String {
        let marker = if event.success { "✓" } else { "✗" };

        if self.verbose {
            let time = event.timestamp.with_timezone(&Local).format("%H:%M:%S");
            format!("[{time}] {marker} {}", event.message)
        } else {
            format!("{marker} {}", event.message)
        }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}
