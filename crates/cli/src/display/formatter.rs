use modrun_core::{BundleReference, LaunchDescriptor};

/// Print one resolved reference in breakdown form
pub fn print_reference_breakdown(reference: &BundleReference) {
    println!("   📍 Location: {}", reference.location);
    if let Some(level) = reference.start_level {
        println!("   🎚️  Start level: {level}");
    } else {
        println!("   🎚️  Start level: platform default");
    }
    println!(
        "   ▶️  Start: {}   🔄 Update: {}",
        flag(reference.should_start),
        flag(reference.should_update)
    );
}

/// Print the assembled launch descriptor
pub fn print_descriptor_breakdown(descriptor: &LaunchDescriptor) {
    println!("🚀 Launch descriptor:");
    println!("{}", "=".repeat(80));

    println!("📦 Bundles ({}):", descriptor.bundles.len());
    for (i, bundle) in descriptor.bundles.iter().enumerate() {
        let level = bundle
            .start_level
            .map(|l| l.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "   {}. {} @{} (start: {}, update: {})",
            i + 1,
            bundle.name,
            level,
            flag(bundle.should_start),
            flag(bundle.should_update)
        );
        println!("      {}", bundle.location);
    }

    if !descriptor.classpath.is_empty() {
        println!("\n🧩 Classpath:");
        for entry in &descriptor.classpath {
            println!("   • {}", entry.display());
        }
    }

    if !descriptor.system_properties.is_empty() {
        println!("\n🔧 System properties:");
        for (key, value) in &descriptor.system_properties {
            println!("   • {key}={value}");
        }
    }

    if !descriptor.vm_arguments.is_empty() {
        println!("\n⚙️  VM arguments:");
        for argument in &descriptor.vm_arguments {
            println!("   • {argument}");
        }
    }
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unset",
    }
}
