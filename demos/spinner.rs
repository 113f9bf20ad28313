//! Indeterminate progress: an animated spinner for a task of unknown
//! duration. Omit the total to get spinner mode.

use std::time::Duration;

use prompt_pulse::{ProgressIndicator, ProgressOptions};

#[tokio::main]
async fn main() {
    let spinner = ProgressIndicator::new(ProgressOptions::new("Processing data"));

    let driver = tokio::spawn({
        let spinner = spinner.clone();
        async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            spinner.complete_with("Done!");
        }
    });

    match spinner.run().await {
        Ok(_) => println!("Complete"),
        Err(err) => eprintln!("{err}"),
    }
    let _ = driver.await;
}
