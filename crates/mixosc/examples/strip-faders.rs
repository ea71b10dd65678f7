//! Print the fader level of the first eight input strips.
//!
//! Run with:
//!   MIXOSC_HOST=192.168.1.20 cargo run --example strip-faders
//!
//! Set MIXOSC_KIND=x32 for an X32/M32 console.

use std::time::Duration;

use mixosc::client::{Client, DeviceKind, Entity};
use mixosc::units::Param;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::var("MIXOSC_HOST").unwrap_or_else(|_| "192.168.1.20".to_string());
    let kind: DeviceKind = std::env::var("MIXOSC_KIND")
        .unwrap_or_else(|_| "xair".to_string())
        .parse()?;

    let client = Client::connect(&host, None, kind)?;
    if let Some(info) = client.info(Duration::from_millis(500))? {
        eprintln!("Connected to {} ({}) firmware {}", info.name, info.model, info.firmware);
    }

    // One outstanding query at a time keeps each reply paired with its request.
    for strip in 1..=8 {
        let address = client
            .resolver()
            .resolve_path(Entity::Strip, strip, "mix/fader")?;
        match client.get_param(&address, Param::Fader, Duration::from_millis(500))? {
            Some(db) => println!("{address}: {db} dB"),
            None => println!("{address}: no reply"),
        }
    }

    client.close();
    Ok(())
}
