//! Remote endpoint configuration commands.

use liftlog_core::WorkoutStore;
use std::error::Error;

/// Shows the configured endpoint.
pub fn show(store: &WorkoutStore) {
    match store.remote_url() {
        Some(url) => println!("Remote endpoint: {url}"),
        None => {
            println!("No remote endpoint configured. Set one with `liftlog remote set <URL>`.");
        }
    }
}

/// Stores the endpoint URL.
pub fn set(store: &WorkoutStore, url: String) -> Result<(), Box<dyn Error>> {
    store.set_remote_url(Some(url))?;
    // Blank input is stored as unset.
    match store.remote_url() {
        Some(saved) => println!("✓ Remote endpoint set to {saved}"),
        None => return Err("endpoint URL must not be blank".into()),
    }
    Ok(())
}

/// Clears the endpoint.
pub fn clear(store: &WorkoutStore) -> Result<(), Box<dyn Error>> {
    store.set_remote_url(None)?;
    println!("✓ Remote endpoint cleared.");
    Ok(())
}
