//! Progress bar with status text updates alongside the value. The
//! `show_value` option displays `current/total` (e.g. "3/5").

use std::time::Duration;

use prompt_pulse::{ProgressIndicator, ProgressOptions, ProgressUpdate};

const TASKS: &[&str] = &["Init", "Load", "Compile", "Test", "Build"];

#[tokio::main]
async fn main() {
    let bar = ProgressIndicator::new(
        ProgressOptions::new("Building project")
            .total(TASKS.len() as f64)
            .show_value(true),
    );

    let driver = tokio::spawn({
        let bar = bar.clone();
        async move {
            for (i, task) in TASKS.iter().enumerate() {
                bar.update(ProgressUpdate::new().value(i as f64).status(*task));
                tokio::time::sleep(Duration::from_millis(800)).await;
            }
            bar.complete();
        }
    });

    match bar.run().await {
        Ok(_) => println!("Build complete"),
        Err(err) => eprintln!("{err}"),
    }
    let _ = driver.await;
}
