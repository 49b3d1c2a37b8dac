use anyhow::Result;

use super::service_from_cwd;

pub fn schemes_command() -> Result<()> {
    let service = service_from_cwd()?;

    println!("📦 Registered provisioning schemes:\n");
    for scanner in service.registry().iter() {
        println!("   {:<10} {}", scanner.scheme(), scanner.syntax());
    }

    Ok(())
}
