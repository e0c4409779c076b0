pub mod dispatch;
pub mod evaluate;
pub mod health;
pub mod startup;
pub mod tasks;

pub use dispatch::dispatch;

/// Print `value` as one JSON document on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
