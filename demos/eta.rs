//! Progress bar with automatic ETA, calculated from the observed progress
//! rate. Enabled by default; disable with `.show_eta(false)`.

use std::time::Duration;

use prompt_pulse::{ProgressIndicator, ProgressOptions};

#[tokio::main]
async fn main() {
    let bar = ProgressIndicator::new(ProgressOptions::new("Processing files").total(50.0));

    let driver = tokio::spawn({
        let bar = bar.clone();
        async move {
            for done in 1..=50u32 {
                tokio::time::sleep(Duration::from_millis(100)).await;
                bar.update(done);
            }
            bar.complete();
        }
    });

    match bar.run().await {
        Ok(_) => println!("Complete"),
        Err(err) => eprintln!("{err}"),
    }
    let _ = driver.await;
}
