//! Basic determinate progress bar, updated in increments until completion.

use std::time::Duration;

use prompt_pulse::{ProgressIndicator, ProgressOptions};

#[tokio::main]
async fn main() {
    let bar = ProgressIndicator::new(ProgressOptions::new("Downloading files").total(100.0));

    let driver = tokio::spawn({
        let bar = bar.clone();
        async move {
            for done in (10..=100).step_by(10) {
                tokio::time::sleep(Duration::from_millis(200)).await;
                bar.update(done as f64);
            }
            bar.complete();
        }
    });

    match bar.run().await {
        Ok(value) => println!("Finished: {value}"),
        Err(err) => eprintln!("{err}"),
    }
    let _ = driver.await;
}
