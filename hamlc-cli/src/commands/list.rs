//! Print the available output modules.

use anyhow::Result;
use hamlc_backends::{BackendInfo, BACKENDS};

pub fn list_backends(json: bool) -> Result<()> {
    let mut backends: Vec<&BackendInfo> = BACKENDS.iter().collect();
    backends.sort_by_key(|backend| backend.id());

    if json {
        let payload = serde_json::to_string_pretty(&backends)?;
        println!("{}", payload);
        return Ok(());
    }

    println!("Available language IDs:");
    for backend in backends {
        let ids: Vec<String> = backend.ids.iter().map(|id| format!("'{id}'")).collect();
        println!("- {} -> {}", ids.join(", "), backend.name);
    }
    Ok(())
}
