// Basic usage example for settings-registry
//
// Run with: cargo run --example basic_usage

use settings_registry::{Setting, SettingRegistry, SettingValue, SettingsMap, validators};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Registry is built once at startup and never changes afterwards
    let registry = SettingRegistry::builder()
        .setting(
            Setting::string("vm-driver")
                .description("Hypervisor driver used to create the VM")
                .options(&["kvm", "virtualbox", "xhyve"]),
        )
        .setting(
            Setting::int("cpus")
                .description("Number of CPU cores")
                .validator(validators::is_positive),
        )
        .setting(Setting::bool("show-libmachine-logs"))
        .setting(
            Setting::slice("insecure-registry")
                .description("Registries reachable without TLS"),
        )
        .build()?;

    // The store belongs to the application (loaded from a file elsewhere)
    let mut store = SettingsMap::new();
    store.insert("vm-driver".into(), SettingValue::from("kvm"));
    store.insert("cpus".into(), SettingValue::Int(2));

    println!("📋 Registered settings: {}\n", registry.names().join(", "));

    // Raw strings as they would arrive from `config set <name> <value>`
    let requests = [
        ("cpus", "4"),
        ("show-libmachine-logs", "true"),
        ("insecure-registry", "172.30.0.0/16,registry.local:5000"),
        ("vm-driver", "parallels"),
        ("cpus", "four"),
        ("gpus", "1"),
    ];

    let setter = registry.setter();
    for (name, raw) in requests {
        match setter.set(&mut store, name, raw) {
            Ok(()) => println!("✅ {name} = {}", store[name]),
            Err(e) => println!("❌ {name}: {e}"),
        }
    }

    println!("\n📦 Final store:");
    let mut names: Vec<_> = store.keys().collect();
    names.sort();
    for name in names {
        println!("   {name} = {}", store[name]);
    }

    Ok(())
}
