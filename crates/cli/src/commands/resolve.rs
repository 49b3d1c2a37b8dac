use anyhow::Result;
use tracing::debug;

use crate::display::print_reference_breakdown;

use super::service_from_cwd;

pub fn resolve_command(specs: &[String], json: bool) -> Result<()> {
    debug!("resolving {} specs", specs.len());

    let service = service_from_cwd()?;
    let resolution = service.resolve_all(specs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution.references)?);
        return Ok(());
    }

    if resolution.references.is_empty() {
        println!("❌ No bundle references resolved.");
        return Ok(());
    }

    println!("✅ Resolved {} bundle(s):\n", resolution.references.len());
    for (i, reference) in resolution.references.iter().enumerate() {
        println!("{}. {}", i + 1, reference.name);
        print_reference_breakdown(reference);
        if i < resolution.references.len() - 1 {
            println!();
        }
    }

    if !resolution.environment.is_empty() {
        println!("\n🔧 Properties assigned during scanning:");
        for (key, value) in resolution.environment.properties() {
            println!("   • {key}={value}");
        }
    }

    Ok(())
}
